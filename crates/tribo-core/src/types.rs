//! Value types shared by the engine and its callers

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decimal representation of one computed term
///
/// Serializes as `{"Value": "<digits>"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TriboValue {
    #[serde(rename = "Value")]
    value: String,
}

impl TriboValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// The decimal digits
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl From<&BigUint> for TriboValue {
    fn from(term: &BigUint) -> Self {
        Self::new(term.to_str_radix(10))
    }
}

impl fmt::Display for TriboValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_format() {
        let value = TriboValue::from(&BigUint::from(44u32));
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"Value":"44"}"#);

        let back: TriboValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back.value(), "44");
    }
}
