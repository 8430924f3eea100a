//! JWT-bearer token acquisition with one-shot consent recovery.
//!
//! One authentication attempt is two sequential calls: exchange a signed
//! assertion for an access token at the OAuth token endpoint, then resolve
//! the impersonated holder's default account via the user-info endpoint.
//!
//! The only recoverable failure is `consent_required`: the account holder
//! has not yet authorized impersonation. Recovery prompts the operator to
//! complete the browser consent grant and retries the exchange exactly once;
//! the retry budget makes termination explicit even if the service keeps
//! reporting missing consent.
//!
//! # Security
//!
//! - The access token is held as `SecretString` and never logged.
//! - Private key bytes are read, turned into a signing key, and dropped.

use crate::auth::consent::{consent_url, ConsentPrompter};
use crate::config::AuthConfig;
use common::jwt::{self, AssertionClaims, AssertionError, EncodingKey, ASSERTION_LIFETIME};
use common::secret::SecretString;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

// =============================================================================
// Constants
// =============================================================================

/// Scopes requested for the JWT grant and listed in the consent URL.
pub const SCOPES: &[&str] = &["signature", "impersonation"];

/// Suffix appended to the account's base URI to form the REST API base path.
const REST_API_SUFFIX: &str = "/restapi";

/// Grant type identifier for the JWT-bearer exchange.
const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Consent recovery runs at most once per process invocation.
const MAX_CONSENT_RETRIES: u32 = 1;

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur during authentication.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Private key file missing or unreadable.
    #[error("failed to read private key at {path}: {source}")]
    KeyLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Private key unusable or assertion signing failed.
    #[error(transparent)]
    Assertion(#[from] AssertionError),

    /// Consent still missing after the granted-consent retry was spent.
    #[error("consent is still required after the consent grant was confirmed")]
    ConsentRequired,

    /// Operator declined the consent grant.
    #[error("operator declined the consent grant")]
    ConsentRefused,

    /// Authenticated, but no account is flagged as default.
    #[error("no account flagged as default; accounts returned: {accounts:?}")]
    NoDefaultAccount { accounts: Vec<Account> },

    /// Structured rejection from the auth or user-info endpoint.
    #[error("auth service error (status {status}): {body}")]
    Service { status: u16, body: String },

    /// Response could not be parsed.
    #[error("invalid auth response: {0}")]
    InvalidResponse(String),

    /// Network-level failure with no structured body.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

// =============================================================================
// Response Types
// =============================================================================

/// OAuth 2.0 token response for a granted exchange.
#[derive(Deserialize)]
struct OAuthTokenResponse {
    access_token: String,
    #[allow(dead_code)]
    token_type: String,
    expires_in: u64,
}

impl fmt::Debug for OAuthTokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthTokenResponse")
            .field("access_token", &"[REDACTED]")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

/// Structured OAuth error body, used to recognize `consent_required`.
#[derive(Deserialize)]
struct OAuthErrorBody {
    error: String,
}

/// One account from the user-info endpoint.
///
/// The default flag is a typed boolean on the wire; comparing it against a
/// string literal silently selects no account.
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub account_id: String,
    #[serde(default)]
    pub account_name: String,
    #[serde(default)]
    pub is_default: bool,
    #[serde(default)]
    pub base_uri: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    accounts: Vec<Account>,
}

/// Outcome of one token-exchange attempt, decided at the network boundary.
enum ExchangeOutcome {
    Granted(OAuthTokenResponse),
    ConsentRequired,
}

// =============================================================================
// Token Bundle
// =============================================================================

/// Product of a successful authentication.
///
/// Consumed exactly once by envelope submission; never persisted.
pub struct TokenBundle {
    /// Bearer token for the REST API.
    pub access_token: SecretString,

    /// Remaining token lifetime in seconds, as reported by the exchange.
    pub expires_in: u64,

    /// Id of the account flagged as default for the impersonated holder.
    pub account_id: String,

    /// REST API base path for that account.
    pub base_path: String,
}

impl fmt::Debug for TokenBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenBundle")
            .field("access_token", &"[REDACTED]")
            .field("expires_in", &self.expires_in)
            .field("account_id", &self.account_id)
            .field("base_path", &self.base_path)
            .finish()
    }
}

// =============================================================================
// Authenticator
// =============================================================================

/// Performs the JWT-bearer exchange and owns consent detection and recovery.
pub struct Authenticator {
    config: AuthConfig,
    http: reqwest::Client,
}

impl Authenticator {
    #[must_use]
    pub fn new(config: AuthConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// Obtain a valid [`TokenBundle`] or fail with a diagnosable error.
    ///
    /// The private key is read and parsed before any network call, so a bad
    /// key path fails without touching the service.
    ///
    /// # Errors
    ///
    /// See [`AuthError`]; every variant other than the internal
    /// `consent_required` signal is fatal to the run.
    #[instrument(skip_all)]
    pub async fn authenticate(
        &self,
        prompter: &dyn ConsentPrompter,
    ) -> Result<TokenBundle, AuthError> {
        let pem = std::fs::read(&self.config.private_key_path).map_err(|source| {
            AuthError::KeyLoad {
                path: self.config.private_key_path.clone(),
                source,
            }
        })?;
        let key = jwt::rsa_signing_key(&pem)?;

        let mut consent_retries = 0;
        loop {
            match self.exchange(&key).await? {
                ExchangeOutcome::Granted(grant) => return self.resolve_account(grant).await,
                ExchangeOutcome::ConsentRequired if consent_retries < MAX_CONSENT_RETRIES => {
                    info!(
                        target: "es_sender.auth",
                        "consent required; prompting operator for the consent grant"
                    );
                    let url = consent_url(&self.config.oauth_server, &self.config.client_id, SCOPES);
                    if !prompter.confirm(&url) {
                        return Err(AuthError::ConsentRefused);
                    }
                    consent_retries += 1;
                }
                ExchangeOutcome::ConsentRequired => {
                    warn!(
                        target: "es_sender.auth",
                        "consent still reported missing after the granted-consent retry"
                    );
                    return Err(AuthError::ConsentRequired);
                }
            }
        }
    }

    /// Submit one signed assertion to the token endpoint.
    async fn exchange(&self, key: &EncodingKey) -> Result<ExchangeOutcome, AuthError> {
        let claims = AssertionClaims::new(
            &self.config.client_id,
            &self.config.impersonated_user_guid,
            &self.config.oauth_server,
            SCOPES,
            ASSERTION_LIFETIME,
        );
        let assertion = jwt::sign_assertion(&claims, key)?;

        let url = format!("{}/oauth/token", self.config.oauth_server);
        debug!(target: "es_sender.auth", url = %url, "requesting access token");

        let form = [
            ("grant_type", JWT_BEARER_GRANT_TYPE),
            ("assertion", assertion.as_str()),
        ];

        let response = self.http.post(&url).form(&form).send().await?;
        let status = response.status();

        if status.is_success() {
            let grant: OAuthTokenResponse = response
                .json()
                .await
                .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;
            debug!(
                target: "es_sender.auth",
                expires_in_secs = grant.expires_in,
                "access token granted"
            );
            return Ok(ExchangeOutcome::Granted(grant));
        }

        let body = response.text().await.unwrap_or_else(|e| {
            debug!(target: "es_sender.auth", error = %e, "failed to read error response body");
            String::new()
        });

        if is_consent_required(&body) {
            return Ok(ExchangeOutcome::ConsentRequired);
        }

        warn!(target: "es_sender.auth", status = %status, "token exchange rejected");
        Err(AuthError::Service {
            status: status.as_u16(),
            body,
        })
    }

    /// Look up the holder's accounts and select the one flagged as default.
    async fn resolve_account(&self, grant: OAuthTokenResponse) -> Result<TokenBundle, AuthError> {
        let url = format!("{}/oauth/userinfo", self.config.oauth_server);
        debug!(target: "es_sender.auth", url = %url, "resolving default account");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&grant.access_token)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                debug!(target: "es_sender.auth", error = %e, "failed to read error response body");
                String::new()
            });
            warn!(target: "es_sender.auth", status = %status, "user-info lookup rejected");
            return Err(AuthError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let user_info: UserInfo = response
            .json()
            .await
            .map_err(|e| AuthError::InvalidResponse(e.to_string()))?;

        let Some(account) = user_info.accounts.iter().find(|a| a.is_default).cloned() else {
            return Err(AuthError::NoDefaultAccount {
                accounts: user_info.accounts,
            });
        };

        info!(
            target: "es_sender.auth",
            account_id = %account.account_id,
            "authenticated; selected default account"
        );

        Ok(TokenBundle {
            access_token: SecretString::from(grant.access_token),
            expires_in: grant.expires_in,
            account_id: account.account_id,
            base_path: format!("{}{REST_API_SUFFIX}", account.base_uri),
        })
    }
}

/// Whether a failed exchange is the expected missing-consent signal.
fn is_consent_required(body: &str) -> bool {
    serde_json::from_str::<OAuthErrorBody>(body)
        .map(|b| b.error == "consent_required")
        .unwrap_or(false)
}

// =============================================================================
// Tests
// =============================================================================
