use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Characters allowed as the first character of an object key.
pub const KEY_FIRST_CHARS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_";

/// Characters allowed after the first character of an object key.
pub const KEY_REST_CHARS: &str =
    "0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_";

/// Default character pool for generated string values.
pub const DEFAULT_STRING_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ_ ";

/// Text layout of the serialized document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formatting {
    /// No insignificant whitespace.
    Compact,
    /// Two-space indentation, one member per line.
    #[default]
    Indented,
}

/// Parameters that shape a generated document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateConfig {
    /// Number of generated values, the root excluded.
    pub data_count: u64,
    /// Maximum characters in an object key.
    pub max_key_length: usize,
    /// Maximum characters in a string value.
    pub max_string_length: usize,
    /// Character pool for string values.
    pub string_alphabet: String,
    /// Exclusive upper bound for numeric values.
    pub max_number: f64,
    pub formatting: Formatting,
    /// Seed for the pseudo-random source.
    pub seed: u64,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            data_count: 100,
            max_key_length: 20,
            max_string_length: 20,
            string_alphabet: DEFAULT_STRING_ALPHABET.to_string(),
            max_number: 99999.0,
            formatting: Formatting::Indented,
            seed: 0,
        }
    }
}

impl GenerateConfig {
    /// Check that the parameters describe a document that can be generated.
    pub fn validate(&self) -> Result<()> {
        if self.string_alphabet.is_empty() {
            return Err(Error::InvalidConfig(
                "string alphabet must not be empty".to_string(),
            ));
        }
        if self.max_key_length == 0 {
            return Err(Error::InvalidConfig(
                "max key length must be at least 1".to_string(),
            ));
        }
        if !self.max_number.is_finite() || self.max_number <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "max number must be a positive finite value, got {}",
                self.max_number
            )));
        }

        let capacity = key_capacity(self.max_key_length);
        if self.data_count > capacity {
            return Err(Error::InvalidConfig(format!(
                "data count {} exceeds the {} distinct keys allowed by max key length {}",
                self.data_count, capacity, self.max_key_length
            )));
        }

        Ok(())
    }
}

/// Number of distinct object keys of length `1..=max_key_length`, saturating.
pub fn key_capacity(max_key_length: usize) -> u64 {
    let first = KEY_FIRST_CHARS.len() as u64;
    let rest = KEY_REST_CHARS.len() as u64;

    let mut total = 0_u64;
    let mut of_length = first;
    for _ in 0..max_key_length {
        total = total.saturating_add(of_length);
        if total == u64::MAX {
            break;
        }
        of_length = of_length.saturating_mul(rest);
    }
    total
}
