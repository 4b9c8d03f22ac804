//! Short random id generation.

use rand::Rng;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random alphanumeric id of the given length.
///
/// Note ids and similar user-visible handles use 8 characters, which keeps
/// URLs short while leaving collisions negligible for the intended scale.
pub fn short_id(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        assert_eq!(short_id(8).len(), 8);
        assert_eq!(short_id(21).len(), 21);
        assert_eq!(short_id(0).len(), 0);
    }

    #[test]
    fn only_alphanumeric_characters() {
        let id = short_id(256);
        assert!(id.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn consecutive_ids_differ() {
        // 62^16 keyspace; a collision here means the generator is broken.
        assert_ne!(short_id(16), short_id(16));
    }
}
