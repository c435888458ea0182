// src/common/id_generator.rs
//! Crockford Base32 ID Generator
//!
//! Generates prefixed, human-readable IDs such as `U_K7NP3XY2QM` for users.
//! The alphabet excludes I, L, O and U so IDs survive being read aloud or
//! retyped from a log line.

use rand::Rng;

/// Crockford Base32 alphabet (excludes I, L, O, U to avoid confusion)
const CROCKFORD_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Random characters in a user ID. 32^10 leaves collisions negligible for a
/// single-node user table.
const USER_ID_LENGTH: usize = 10;

/// Entity type prefixes for ID generation
#[derive(Debug, Clone, Copy)]
pub enum EntityPrefix {
    /// User account (U_)
    User,
}

impl EntityPrefix {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityPrefix::User => "U",
        }
    }
}

fn generate_crockford_string(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| {
            let idx = rng.gen_range(0..32);
            CROCKFORD_ALPHABET[idx] as char
        })
        .collect()
}

/// Generate a prefixed ID in the form `PREFIX_XXXX...`
pub fn generate_id(prefix: EntityPrefix, length: usize) -> String {
    format!("{}_{}", prefix.as_str(), generate_crockford_string(length))
}

/// Generate a User ID (U_XXXXXXXXXX)
pub fn generate_user_id() -> String {
    generate_id(EntityPrefix::User, USER_ID_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_user_id_format() {
        let id = generate_user_id();
        assert!(id.starts_with("U_"));
        assert_eq!(id.len(), 2 + USER_ID_LENGTH);
    }

    #[test]
    fn test_crockford_alphabet_only() {
        let id = generate_user_id();
        let random_part = &id[2..];

        for c in random_part.chars() {
            assert!(
                CROCKFORD_ALPHABET.contains(&(c as u8)),
                "Character '{}' not in Crockford alphabet",
                c
            );
        }

        assert!(!random_part.contains('I'));
        assert!(!random_part.contains('L'));
        assert!(!random_part.contains('O'));
        assert!(!random_part.contains('U'));
    }

    #[test]
    fn test_uniqueness() {
        let mut ids = HashSet::new();
        for _ in 0..1000 {
            assert!(ids.insert(generate_user_id()), "Duplicate ID generated");
        }
    }
}
