//! JWT-grant authentication with one-shot consent recovery.

pub mod authenticator;
pub mod consent;

pub use authenticator::{Account, AuthError, Authenticator, TokenBundle, SCOPES};
pub use consent::{consent_url, ConsentPrompter, StdinPrompter};
