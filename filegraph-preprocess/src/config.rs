use serde::{Deserialize, Serialize};

/// Configuration for the preprocessor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessConfig {
    /// Optional cap on batch length, checked before any lookup is made.
    /// Unset by default, so every batch is accepted.
    #[serde(default)]
    pub max_requests: Option<usize>,
}

impl PreprocessConfig {
    /// Caps batches at `limit` requests.
    pub fn with_max_requests(limit: usize) -> Self {
        Self {
            max_requests: Some(limit),
        }
    }
}
