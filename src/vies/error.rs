use std::time::Duration;

use thiserror::Error;

/// Errors from a registry lookup.
///
/// Every variant means "treat the VAT ID as not confirmed". None of them
/// is ever cached.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegistryError {
    /// The request envelope could not be rendered.
    #[error("failed to encode checkVat request: {0}")]
    Encoding(String),

    /// The request could not be built or dispatched, or the body could not be read.
    #[error("VIES transport error: {0}")]
    Transport(String),

    /// The caller cancelled the lookup before the registry answered.
    #[error("VIES request cancelled")]
    Cancelled,

    /// The registry did not answer within the lookup budget.
    #[error("VIES request timed out after {0:?}")]
    Timeout(Duration),

    /// The response was not a well-formed checkVat envelope.
    #[error("failed to decode VIES response: {0}")]
    Decoding(String),
}

impl RegistryError {
    /// Whether the failure happened on the way to or from the registry,
    /// as opposed to rendering or decoding a message.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Cancelled | Self::Timeout(_))
    }
}

impl From<reqwest::Error> for RegistryError {
    fn from(e: reqwest::Error) -> Self {
        Self::Transport(e.to_string())
    }
}
