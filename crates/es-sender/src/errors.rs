use crate::auth::AuthError;
use crate::config::ConfigError;
use crate::envelopes::EnvelopeError;
use thiserror::Error;

/// Top-level error for one sender run; every variant ends the process.
#[derive(Error, Debug)]
pub enum SenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    HttpClient(reqwest::Error),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}
