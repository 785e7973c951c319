use serde::{Deserialize, Serialize};

pub const DEFAULT_START_DATE: &str = "2025-01-01";
pub const DEFAULT_END_DATE: &str = "2025-01-07";

/// Inclusive feed window. Values are kept as the raw strings the caller supplied; they are never
/// parsed or reordered before being sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Fills each missing (or empty) bound from `defaults` independently.
    pub fn resolve(start: Option<&str>, end: Option<&str>, defaults: &DateRange) -> Self {
        let pick = |value: Option<&str>, fallback: &str| {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };

        Self {
            start: pick(start, &defaults.start),
            end: pick(end, &defaults.end),
        }
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new(DEFAULT_START_DATE, DEFAULT_END_DATE)
    }
}
