//! Subscription CRUD routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use notifier::{Message, Notifier};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::{self, PeriodUnit, Subscription};
use crate::state::AppState;
use crate::store;

/// Fields accepted when creating or replacing a subscription.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionInput {
    pub name: String,
    #[serde(default)]
    pub custom_type: Option<String>,
    pub start_date: NaiveDate,
    /// Computed from `start_date` + period when omitted.
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default = "default_period_value")]
    pub period_value: u32,
    #[serde(default = "default_period_unit")]
    pub period_unit: PeriodUnit,
    #[serde(default = "models::default_reminder_days")]
    pub reminder_days: i64,
    #[serde(default = "models::default_true")]
    pub is_active: bool,
    #[serde(default)]
    pub auto_renew: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_period_value() -> u32 {
    1
}

fn default_period_unit() -> PeriodUnit {
    PeriodUnit::Month
}

impl SubscriptionInput {
    fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(ApiError::Validation("Name is required".to_string()));
        }
        if self.period_value == 0 {
            return Err(ApiError::Validation(
                "Period value must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    fn resolved_expiry(&self) -> NaiveDate {
        self.expiry_date.unwrap_or_else(|| {
            models::add_period(self.start_date, self.period_value, self.period_unit)
        })
    }
}

/// Mutation response envelope.
#[derive(Serialize)]
pub struct SubscriptionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Subscription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// `GET /api/subscriptions` — list everything.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Subscription>>> {
    Ok(Json(store::list_subscriptions(&state.subs).await?))
}

/// `GET /api/subscriptions/:id`
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Subscription>> {
    store::get_subscription(&state.subs, &id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Subscription not found".to_string()))
}

/// `POST /api/subscriptions` — register a new subscription.
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<SubscriptionInput>,
) -> Result<(StatusCode, Json<SubscriptionResponse>)> {
    input.validate()?;

    let mut subscription = Subscription {
        id: Uuid::new_v4().to_string(),
        name: input.name.trim().to_string(),
        custom_type: input.custom_type.clone(),
        start_date: input.start_date,
        expiry_date: input.resolved_expiry(),
        period_value: input.period_value,
        period_unit: input.period_unit,
        reminder_days: input.reminder_days,
        is_active: input.is_active,
        auto_renew: input.auto_renew,
        notes: input.notes.clone(),
        created_at: None,
        updated_at: None,
    };

    store::save_subscription(&state.subs, &mut subscription).await?;
    info!(subscription = %subscription.name, "Created subscription");

    Ok((
        StatusCode::CREATED,
        Json(SubscriptionResponse {
            success: true,
            subscription: Some(subscription),
            message: None,
        }),
    ))
}

/// `PUT /api/subscriptions/:id` — replace a subscription.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<SubscriptionInput>,
) -> Result<Json<SubscriptionResponse>> {
    input.validate()?;

    let existing = store::get_subscription(&state.subs, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Subscription not found".to_string()))?;

    let mut subscription = Subscription {
        id: existing.id,
        name: input.name.trim().to_string(),
        custom_type: input.custom_type.clone(),
        start_date: input.start_date,
        expiry_date: input.resolved_expiry(),
        period_value: input.period_value,
        period_unit: input.period_unit,
        reminder_days: input.reminder_days,
        is_active: input.is_active,
        auto_renew: input.auto_renew,
        notes: input.notes.clone(),
        created_at: existing.created_at,
        updated_at: None,
    };

    store::save_subscription(&state.subs, &mut subscription).await?;

    Ok(Json(SubscriptionResponse {
        success: true,
        subscription: Some(subscription),
        message: None,
    }))
}

/// `DELETE /api/subscriptions/:id`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SubscriptionResponse>> {
    if store::get_subscription(&state.subs, &id).await?.is_none() {
        return Err(ApiError::NotFound("Subscription not found".to_string()));
    }

    store::delete_subscription(&state.subs, &id).await?;
    info!(subscription = %id, "Deleted subscription");

    Ok(Json(SubscriptionResponse {
        success: true,
        subscription: None,
        message: Some("Subscription deleted".to_string()),
    }))
}

/// Body of `toggle-status`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleRequest {
    pub is_active: bool,
}

/// `POST /api/subscriptions/:id/toggle-status`
pub async fn toggle_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<ToggleRequest>,
) -> Result<Json<SubscriptionResponse>> {
    let mut subscription = store::get_subscription(&state.subs, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Subscription not found".to_string()))?;

    subscription.is_active = req.is_active;
    store::save_subscription(&state.subs, &mut subscription).await?;

    Ok(Json(SubscriptionResponse {
        success: true,
        subscription: Some(subscription),
        message: None,
    }))
}

/// `POST /api/subscriptions/:id/test-notify` — send a test notification for
/// one subscription through the configured channels.
pub async fn test_notify(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<SubscriptionResponse>> {
    let subscription = store::get_subscription(&state.subs, &id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Subscription not found".to_string()))?;

    let settings = store::get_settings(&state.subs).await?;
    let notifier = Notifier::new(settings.to_notifier_config());

    let title = format!("Manual test notification: {}", subscription.name);
    let body = format!(
        "Subscription details:\n- Type: {}\n- Expires: {}\n- Notes: {}",
        subscription.custom_type.as_deref().unwrap_or("other"),
        subscription.expiry_date,
        subscription.notes.as_deref().unwrap_or("none"),
    );
    let message = Message::new(title, body)
        .with_description(format!("Test notification for \"{}\"", subscription.name));

    let outcomes = notifier.broadcast(&message).await;
    let delivered = outcomes.iter().filter(|o| o.success).count();

    let today = Utc::now().date_naive();
    let days = models::days_until(subscription.expiry_date, today);
    info!(
        subscription = %subscription.name,
        days_to_expiry = days,
        delivered,
        "Dispatched test notification"
    );

    if outcomes.is_empty() {
        return Ok(Json(SubscriptionResponse {
            success: false,
            subscription: None,
            message: Some("No notification channels configured".to_string()),
        }));
    }

    Ok(Json(SubscriptionResponse {
        success: delivered > 0,
        subscription: None,
        message: Some(format!(
            "Delivered on {delivered} of {} channel(s)",
            outcomes.len()
        )),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_is_computed_from_period_when_omitted() {
        let input: SubscriptionInput = serde_json::from_str(
            r#"{"name": "Cloud", "startDate": "2024-01-31", "periodValue": 1, "periodUnit": "month"}"#,
        )
        .unwrap();

        assert_eq!(
            input.resolved_expiry(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
        );
    }

    #[test]
    fn explicit_expiry_wins() {
        let input: SubscriptionInput = serde_json::from_str(
            r#"{"name": "Cloud", "startDate": "2024-01-01", "expiryDate": "2024-06-01"}"#,
        )
        .unwrap();

        assert_eq!(
            input.resolved_expiry(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
        );
    }

    #[test]
    fn defaults_apply() {
        let input: SubscriptionInput =
            serde_json::from_str(r#"{"name": "Cloud", "startDate": "2024-01-01"}"#).unwrap();

        assert_eq!(input.period_value, 1);
        assert_eq!(input.period_unit, PeriodUnit::Month);
        assert_eq!(input.reminder_days, 7);
        assert!(input.is_active);
        assert!(!input.auto_renew);
    }

    #[test]
    fn blank_name_fails_validation() {
        let input: SubscriptionInput =
            serde_json::from_str(r#"{"name": "  ", "startDate": "2024-01-01"}"#).unwrap();
        assert!(input.validate().is_err());
    }

    #[test]
    fn zero_period_fails_validation() {
        let input: SubscriptionInput = serde_json::from_str(
            r#"{"name": "Cloud", "startDate": "2024-01-01", "periodValue": 0}"#,
        )
        .unwrap();
        assert!(input.validate().is_err());
    }
}
