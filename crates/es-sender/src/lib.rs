//! JWT-grant authentication and envelope submission for a document-signing
//! service's REST API.
//!
//! The crate is a single-shot sender: authenticate via the OAuth2 JWT-bearer
//! grant (recovering once from a missing consent grant), then submit one PDF
//! for signature routing to a signer and a carbon-copy recipient.

/// Module for the JWT-grant authenticator and consent prompt
pub mod auth;

/// Module for environment-derived configuration
pub mod config;

/// Module for envelope construction and submission
pub mod envelopes;

/// Module for the top-level error type of the binary
pub mod errors;
