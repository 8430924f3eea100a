use es_sender::auth::{AuthError, Authenticator, StdinPrompter};
use es_sender::config::Config;
use es_sender::envelopes::{make_envelope, EnvelopesClient};
use es_sender::errors::SenderError;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// HTTP request timeout; generous because envelope bodies carry the document.
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "es_sender=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(envelope_id) => {
            println!("Envelope was created. EnvelopeId {envelope_id}");
            ExitCode::SUCCESS
        }
        Err(SenderError::Auth(AuthError::ConsentRefused)) => {
            error!(target: "es_sender", "operator declined the consent grant");
            eprintln!("Please grant consent!");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!(target: "es_sender", error = %e, "envelope submission failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<String, SenderError> {
    let config = Config::from_env()?;
    info!(target: "es_sender", "configuration loaded");

    let http = reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
        .map_err(SenderError::HttpClient)?;

    let authenticator = Authenticator::new(config.auth, http.clone());
    let bundle = authenticator.authenticate(&StdinPrompter).await?;

    let envelope = make_envelope(&config.envelope)?;
    let client = EnvelopesClient::new(http);
    let envelope_id = client.create_envelope(&bundle, &envelope).await?;

    Ok(envelope_id)
}
