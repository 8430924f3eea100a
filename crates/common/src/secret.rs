//! Secret types for protecting sensitive values from accidental logging.
//!
//! This module re-exports types from the [`secrecy`] crate. Use them for all
//! sensitive values the sender handles: OAuth access tokens and private key
//! material.
//!
//! `SecretString` implements `Debug` with redaction, so any struct that
//! derives `Debug` while holding a secret gets safe logging behavior for
//! free. Accessing the actual value requires an explicit `expose_secret()`
//! call, and secrets are zeroized on drop.
//!
//! # Example
//!
//! ```rust
//! use common::secret::{ExposeSecret, SecretString};
//!
//! #[derive(Debug)]
//! struct Grant {
//!     account_id: String,
//!     access_token: SecretString,
//! }
//!
//! let grant = Grant {
//!     account_id: "2".to_string(),
//!     access_token: SecretString::from("eyJ0eXAi..."),
//! };
//!
//! // Safe: the token renders as [REDACTED]
//! println!("{:?}", grant);
//!
//! // Explicit opt-in to the raw value
//! let raw: &str = grant.access_token.expose_secret();
//! ```
//!
//! Guideline for this repository: the access token crosses exactly two
//! seams (the user-info lookup and the envelope submission), and both call
//! `expose_secret()` at the request-building line, nowhere else.

// Re-export the main types from secrecy
pub use secrecy::{ExposeSecret, SecretBox, SecretString};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let secret = SecretString::from("eyJ0eXAiOiJKV1Qi");
        let debug_str = format!("{secret:?}");

        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("eyJ0eXAiOiJKV1Qi"));
    }

    #[test]
    fn test_expose_secret_returns_inner_value() {
        let secret = SecretString::from("access-token-value");
        assert_eq!(secret.expose_secret(), "access-token-value");
    }

    #[test]
    fn test_struct_with_secret_is_safe() {
        #[allow(dead_code)]
        #[derive(Debug)]
        struct Grant {
            account_id: String,
            access_token: SecretString,
        }

        let grant = Grant {
            account_id: "2".to_string(),
            access_token: SecretString::from("super-secret-token"),
        };

        let debug_str = format!("{grant:?}");

        // Account id should be visible
        assert!(debug_str.contains('2'));
        // Token should be redacted
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("super-secret-token"));
    }

    #[test]
    fn test_clone_works() {
        let secret = SecretString::from("cloneable");
        let cloned = secret.clone();
        assert_eq!(cloned.expose_secret(), "cloneable");
    }
}
