use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A completed calculation recorded in the log.
///
/// Calculations are the paper tape of the keypad: every successful evaluate
/// appends one, nothing updates or deletes them. Both `expression` and
/// `result` are stored as text exactly as rendered for the display, so the
/// log replays what the user actually saw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calculation {
    /// Store-assigned identifier, monotonically increasing in insertion order.
    pub id: i64,
    /// Text rendering of the operation, e.g. `"5 + 3"`.
    pub expression: String,
    /// Text rendering of the numeric outcome.
    pub result: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Input for appending a calculation to the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCalculationInput {
    pub expression: String,
    pub result: String,
}

impl CreateCalculationInput {
    /// Check the input shape before it touches the store.
    ///
    /// Both fields must be non-empty after trimming; the error names the
    /// first offending field so clients can point at the bad value.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.expression.trim().is_empty() {
            return Err(ValidationError::empty("expression"));
        }
        if self.result.trim().is_empty() {
            return Err(ValidationError::empty("result"));
        }
        Ok(())
    }
}

/// A malformed save request. User-correctable, reported with field detail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} must be a non-empty string")]
pub struct ValidationError {
    pub field: &'static str,
}

impl ValidationError {
    fn empty(field: &'static str) -> Self {
        Self { field }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_well_formed_input() {
        let input = CreateCalculationInput {
            expression: "5 + 3".to_string(),
            result: "8".to_string(),
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_expression() {
        let input = CreateCalculationInput {
            expression: "".to_string(),
            result: "8".to_string(),
        };
        assert_eq!(input.validate().unwrap_err().field, "expression");
    }

    #[test]
    fn validate_rejects_whitespace_only_result() {
        let input = CreateCalculationInput {
            expression: "5 + 3".to_string(),
            result: "   ".to_string(),
        };
        assert_eq!(input.validate().unwrap_err().field, "result");
    }
}
