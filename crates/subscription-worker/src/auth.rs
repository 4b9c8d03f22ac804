//! Session token signing and the auth middlewares.
//!
//! The token is a compact signed claim set in the original three-segment
//! format (`header.payload.signature`): base64url header and payload, hex
//! HMAC-SHA256 signature over the first two segments. It carries only the
//! username and issue time; lifetime is bounded by the cookie's `Max-Age`.

use axum::extract::{Request, State};
use axum::http::header::COOKIE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use base64::engine::general_purpose::URL_SAFE_NO_PAD as BASE64URL;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::ApiError;
use crate::state::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Claims carried by a session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Authenticated username.
    pub username: String,
    /// Issue time, unix seconds.
    pub iat: i64,
}

#[derive(Serialize)]
struct TokenHeader {
    alg: &'static str,
    typ: &'static str,
}

/// Sign a session token for a username.
pub fn sign_token(username: &str, secret: &str) -> String {
    let header = BASE64URL.encode(
        serde_json::to_string(&TokenHeader {
            alg: "HS256",
            typ: "JWT",
        })
        .expect("static header serializes"),
    );
    let claims = TokenClaims {
        username: username.to_string(),
        iat: chrono::Utc::now().timestamp(),
    };
    let payload = BASE64URL.encode(serde_json::to_string(&claims).expect("claims serialize"));

    let signature = hex::encode(hmac_sign(&format!("{header}.{payload}"), secret));

    format!("{header}.{payload}.{signature}")
}

/// Verify a session token, returning its claims when valid.
pub fn verify_token(token: &str, secret: &str) -> Option<TokenClaims> {
    let mut parts = token.split('.');
    let (header, payload, signature) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() {
        return None;
    }

    let expected = hex::decode(signature).ok()?;
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(format!("{header}.{payload}").as_bytes());
    mac.verify_slice(&expected).ok()?;

    let claims = BASE64URL.decode(payload).ok()?;
    serde_json::from_slice(&claims).ok()
}

fn hmac_sign(input: &str, secret: &str) -> Vec<u8> {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(input.as_bytes());
    mac.finalize().into_bytes().to_vec()
}

/// Pull the session token out of the Cookie header, if any.
pub fn token_from_request(request: &Request) -> Option<String> {
    let header = request.headers().get(COOKIE)?.to_str().ok()?;
    for parsed in cookie::Cookie::split_parse(header.to_string()).flatten() {
        if parsed.name() == "token" {
            return Some(parsed.value().to_string());
        }
    }
    None
}

fn authenticated(state: &AppState, request: &Request) -> bool {
    token_from_request(request)
        .and_then(|token| verify_token(&token, &state.config.token_secret))
        .is_some()
}

/// Middleware for `/api/*`: unauthenticated requests get a 401 JSON body.
pub async fn require_auth_api(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if authenticated(&state, &request) {
        next.run(request).await
    } else {
        ApiError::Unauthorized.into_response()
    }
}

/// Middleware for the admin pages: unauthenticated requests go back to the
/// login page.
pub async fn require_auth_page(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if authenticated(&state, &request) {
        next.run(request).await
    } else {
        Redirect::to("/").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn sign_verify_roundtrip() {
        let token = sign_token("admin", SECRET);
        let claims = verify_token(&token, SECRET).expect("token verifies");
        assert_eq!(claims.username, "admin");
        assert!(claims.iat > 0);
    }

    #[test]
    fn wrong_secret_fails() {
        let token = sign_token("admin", SECRET);
        assert!(verify_token(&token, "other-secret").is_none());
    }

    #[test]
    fn tampered_payload_fails() {
        let token = sign_token("admin", SECRET);
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = BASE64URL.encode(r#"{"username":"root","iat":0}"#);
        parts[1] = &forged;
        assert!(verify_token(&parts.join("."), SECRET).is_none());
    }

    #[test]
    fn tampered_signature_fails() {
        let token = sign_token("admin", SECRET);
        let mut forged = token.clone();
        forged.pop();
        forged.push(if token.ends_with('0') { '1' } else { '0' });
        assert!(verify_token(&forged, SECRET).is_none());
    }

    #[test]
    fn malformed_tokens_fail() {
        assert!(verify_token("", SECRET).is_none());
        assert!(verify_token("a.b", SECRET).is_none());
        assert!(verify_token("a.b.c.d", SECRET).is_none());
        assert!(verify_token("not-a-token", SECRET).is_none());
    }
}
