//! Envelope construction and submission to the signing service REST API.

pub mod client;
pub mod definition;

pub use client::EnvelopesClient;
pub use definition::{make_envelope, EnvelopeDefinition};

use std::path::PathBuf;
use thiserror::Error;

/// Errors from envelope construction or submission.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    /// Document file missing or unreadable.
    #[error("failed to read document at {path}: {source}")]
    Document {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Structured rejection from the envelope endpoint.
    #[error("envelope service error (status {status}): {body}")]
    Service { status: u16, body: String },

    /// Response could not be parsed.
    #[error("invalid envelope response: {0}")]
    InvalidResponse(String),

    /// Network-level failure with no structured body.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}
