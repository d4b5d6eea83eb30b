//! Six-digit judge login codes.
//!
//! A code is the only credential a judge has, so every code must be unique
//! across all judges of all sub-events, not just within one sub-event.

use std::collections::HashSet;

use rand::Rng;
use serde_json::Value;

use crate::error::{Result, StorageError};

pub const CODE_LENGTH: usize = 6;

const CODE_RANGE: std::ops::RangeInclusive<u32> = 100_000..=999_999;
const MAX_ATTEMPTS: usize = 10_000;

/// Exactly six ASCII digits
pub fn is_well_formed(code: &str) -> bool {
    code.len() == CODE_LENGTH && code.bytes().all(|b| b.is_ascii_digit())
}

/// Read a caller-supplied code that may arrive as a JSON string or number
pub fn from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => n.as_u64().map(|n| n.to_string()),
        _ => None,
    }
}

/// Rejection-sample a fresh code that is not in `taken`
pub fn generate<R: Rng>(rng: &mut R, taken: &HashSet<String>) -> Result<String> {
    for _ in 0..MAX_ATTEMPTS {
        let candidate = rng.gen_range(CODE_RANGE).to_string();
        if !taken.contains(&candidate) {
            return Ok(candidate);
        }
    }

    Err(StorageError::CodeSpaceExhausted(MAX_ATTEMPTS))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use serde_json::json;

    #[test]
    fn test_well_formed_codes() {
        assert!(is_well_formed("123456"));
        assert!(is_well_formed("012345"));
        assert!(!is_well_formed("12345"));
        assert!(!is_well_formed("1234567"));
        assert!(!is_well_formed("12a456"));
        assert!(!is_well_formed("１２３４５６"));
    }

    #[test]
    fn test_from_value_accepts_string_and_number() {
        assert_eq!(from_value(&json!(" 654321 ")), Some("654321".to_string()));
        assert_eq!(from_value(&json!(654321)), Some("654321".to_string()));
        assert_eq!(from_value(&json!(-5)), None);
        assert_eq!(from_value(&json!(null)), None);
    }

    #[test]
    fn test_generate_is_six_digits_and_avoids_taken() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut taken = HashSet::new();

        for _ in 0..500 {
            let code = generate(&mut rng, &taken).unwrap();
            assert!(is_well_formed(&code));
            assert!(taken.insert(code), "generated a duplicate code");
        }
    }
}
