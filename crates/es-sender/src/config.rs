use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// Envelope statuses the signing service accepts at creation time.
/// `sent` routes the envelope immediately; `created` leaves it as a draft.
const VALID_ENVELOPE_STATUSES: &[&str] = &["sent", "created"];

const DEFAULT_EMAIL_SUBJECT: &str = "Please sign this document";
const DEFAULT_ENVELOPE_STATUS: &str = "sent";

#[derive(Debug, Clone)]
pub struct Config {
    pub auth: AuthConfig,
    pub envelope: EnvelopeArgs,
}

/// Inputs for the JWT-grant exchange.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// OAuth server base URL (no trailing slash).
    pub oauth_server: String,
    /// Integration client id; the JWT assertion's `iss`.
    pub client_id: String,
    /// Account holder to impersonate; the JWT assertion's `sub`.
    pub impersonated_user_guid: String,
    /// Location of the integration's RSA private key PEM.
    pub private_key_path: PathBuf,
}

/// Inputs for envelope construction.
#[derive(Debug, Clone)]
pub struct EnvelopeArgs {
    pub signer_email: String,
    pub signer_name: String,
    pub cc_email: String,
    pub cc_name: String,
    pub document_path: PathBuf,
    pub email_subject: String,
    pub status: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid envelope status {0:?}: expected \"sent\" or \"created\"")]
    InvalidEnvelopeStatus(String),
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(&env::vars().collect())
    }

    /// Load configuration from a HashMap (for testing)
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self, ConfigError> {
        let oauth_server = require(vars, "DS_OAUTH_SERVER")?
            .trim_end_matches('/')
            .to_string();

        let auth = AuthConfig {
            oauth_server,
            client_id: require(vars, "DS_JWT_CLIENT_ID")?,
            impersonated_user_guid: require(vars, "DS_IMPERSONATED_USER_GUID")?,
            private_key_path: PathBuf::from(require(vars, "DS_PRIVATE_KEY_PATH")?),
        };

        let status = vars
            .get("DS_ENVELOPE_STATUS")
            .cloned()
            .unwrap_or_else(|| DEFAULT_ENVELOPE_STATUS.to_string());

        if !VALID_ENVELOPE_STATUSES.contains(&status.as_str()) {
            return Err(ConfigError::InvalidEnvelopeStatus(status));
        }

        let envelope = EnvelopeArgs {
            signer_email: require(vars, "DS_SIGNER_EMAIL")?,
            signer_name: require(vars, "DS_SIGNER_NAME")?,
            cc_email: require(vars, "DS_CC_EMAIL")?,
            cc_name: require(vars, "DS_CC_NAME")?,
            document_path: PathBuf::from(require(vars, "DS_DOCUMENT_PATH")?),
            email_subject: vars
                .get("DS_EMAIL_SUBJECT")
                .cloned()
                .unwrap_or_else(|| DEFAULT_EMAIL_SUBJECT.to_string()),
            status,
        };

        Ok(Config { auth, envelope })
    }
}

fn require(vars: &HashMap<String, String>, name: &str) -> Result<String, ConfigError> {
    vars.get(name)
        .cloned()
        .ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}
