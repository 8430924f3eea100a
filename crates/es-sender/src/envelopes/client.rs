//! HTTP client for the envelope-creation endpoint.

use super::{EnvelopeDefinition, EnvelopeError};
use crate::auth::TokenBundle;
use common::secret::ExposeSecret;
use serde::Deserialize;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateEnvelopeResponse {
    envelope_id: String,
}

/// Client for the signing service's envelope API.
///
/// Called exactly once per run, after authentication succeeds.
pub struct EnvelopesClient {
    http: reqwest::Client,
}

impl EnvelopesClient {
    #[must_use]
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Submit the envelope; returns the envelope id assigned by the service.
    ///
    /// # Errors
    ///
    /// Returns `EnvelopeError::Service` on a rejection, `Transport` on a
    /// network failure and `InvalidResponse` if the success body has no
    /// envelope id.
    pub async fn create_envelope(
        &self,
        bundle: &TokenBundle,
        envelope: &EnvelopeDefinition,
    ) -> Result<String, EnvelopeError> {
        let url = format!(
            "{}/v2.1/accounts/{}/envelopes",
            bundle.base_path, bundle.account_id
        );
        debug!(target: "es_sender.envelopes", url = %url, "creating envelope");

        let response = self
            .http
            .post(&url)
            .bearer_auth(bundle.access_token.expose_secret())
            .json(envelope)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                debug!(
                    target: "es_sender.envelopes",
                    error = %e,
                    "failed to read error response body"
                );
                String::new()
            });
            warn!(target: "es_sender.envelopes", status = %status, "envelope creation rejected");
            return Err(EnvelopeError::Service {
                status: status.as_u16(),
                body,
            });
        }

        let created: CreateEnvelopeResponse = response
            .json()
            .await
            .map_err(|e| EnvelopeError::InvalidResponse(e.to_string()))?;

        info!(
            target: "es_sender.envelopes",
            envelope_id = %created.envelope_id,
            "envelope created"
        );

        Ok(created.envelope_id)
    }
}
