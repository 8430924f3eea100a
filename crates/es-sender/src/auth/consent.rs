//! Operator consent prompt for the out-of-band consent grant.
//!
//! Impersonation requires a one-time authorization from the account holder,
//! granted in a browser. When the token exchange reports that the grant is
//! missing, the authenticator shows the consent URL and blocks on a yes/no
//! answer. This is the one designed suspension point in the program: a wait
//! on human input, with no timeout.

use std::io::{self, BufRead, Write};
use tracing::debug;

/// Fixed redirect endpoint registered for the consent grant.
const CONSENT_REDIRECT_URI: &str = "https://developers.docusign.com/platform/auth/consent";

/// Menu input that confirms consent; everything else is refusal.
const AFFIRMATIVE_INPUT: &str = "1";

/// Build the URL the operator must open to grant consent.
///
/// Scopes are `+`-joined in the query string, unlike the space-joined form
/// inside the JWT assertion.
#[must_use]
pub fn consent_url(oauth_server: &str, client_id: &str, scopes: &[&str]) -> String {
    format!(
        "{oauth_server}/oauth/auth?response_type=code&scope={}&client_id={client_id}&redirect_uri={CONSENT_REDIRECT_URI}",
        scopes.join("+")
    )
}

/// Capability for confirming that the operator completed the consent grant.
///
/// Injected into the [`Authenticator`](super::Authenticator) so tests can
/// script the answer instead of reading process stdin.
pub trait ConsentPrompter {
    /// Block until the operator answers; `true` means consent was granted.
    fn confirm(&self, consent_url: &str) -> bool;
}

/// Interactive prompter that reads the operator's answer from stdin.
pub struct StdinPrompter;

impl ConsentPrompter for StdinPrompter {
    fn confirm(&self, consent_url: &str) -> bool {
        println!("Open the following URL in your browser to grant consent:");
        println!("{consent_url}");
        println!("Consent granted?\n 1) Yes\n 2) No");
        let _ = io::stdout().flush();

        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            debug!(
                target: "es_sender.auth",
                "failed to read consent answer; treating as refusal"
            );
            return false;
        }

        answer.trim() == AFFIRMATIVE_INPUT
    }
}
