//! Loading configuration for CSV ingestion.

use serde::{Deserialize, Serialize};

/// Options controlling how CSV text is turned into a store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvOptions {
    /// Whether the first column holds row identifiers rather than data.
    pub has_row_names: bool,

    /// Field patterns coerced to NaN before numeric parsing.
    pub nan_patterns: NanPatterns,
}

impl CsvOptions {
    /// Options for a file whose first column is a row identifier.
    pub fn with_row_names() -> Self {
        Self {
            has_row_names: true,
            ..Self::default()
        }
    }
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_row_names: false,
            nan_patterns: NanPatterns::default(),
        }
    }
}

/// Field patterns treated as missing values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NanPatterns {
    /// Patterns to treat as missing
    pub patterns: Vec<String>,

    /// Whether to trim whitespace before checking
    pub trim_whitespace: bool,

    /// Case sensitive matching
    pub case_sensitive: bool,
}

impl Default for NanPatterns {
    fn default() -> Self {
        Self {
            patterns: vec![
                String::new(), // Empty field
                "-".to_string(),
                "N/A".to_string(),
                "null".to_string(),
                "None".to_string(),
            ],
            trim_whitespace: true,
            case_sensitive: false,
        }
    }
}

impl NanPatterns {
    /// Check if a field should be treated as missing.
    pub fn matches(&self, value: &str) -> bool {
        let test_value = if self.trim_whitespace {
            value.trim()
        } else {
            value
        };

        self.patterns.iter().any(|pattern| {
            if self.case_sensitive {
                test_value == pattern
            } else {
                test_value.eq_ignore_ascii_case(pattern)
            }
        })
    }

    /// Add a pattern if it is not already present.
    pub fn add_pattern(&mut self, pattern: String) {
        if !self.patterns.contains(&pattern) {
            self.patterns.push(pattern);
        }
    }
}
