//! Error types for widget configuration.

/// Errors decoding widget options.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum ConfigError {
    /// Options could not be decoded from JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
