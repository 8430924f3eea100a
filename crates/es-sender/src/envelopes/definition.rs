//! Wire types for the envelope-creation request.
//!
//! Field names follow the signing service's camelCase JSON format, and the
//! service represents ids, routing orders and pixel offsets as strings on
//! the wire.

use super::EnvelopeError;
use crate::config::EnvelopeArgs;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

/// Anchor text that places the signature tab inside the document.
const SIGNATURE_ANCHOR: &str = "Signature:";
const ANCHOR_UNITS: &str = "pixels";
const ANCHOR_X_OFFSET: &str = "20";
const ANCHOR_Y_OFFSET: &str = "5";

/// The signer acts first, the carbon copy second.
const SIGNER_RECIPIENT_ID: &str = "1";
const SIGNER_ROUTING_ORDER: &str = "1";
const CC_RECIPIENT_ID: &str = "2";
const CC_ROUTING_ORDER: &str = "2";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvelopeDefinition {
    pub email_subject: String,
    pub documents: Vec<Document>,
    pub recipients: Recipients,
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub document_base64: String,
    pub name: String,
    pub file_extension: String,
    pub document_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipients {
    pub signers: Vec<Signer>,
    pub carbon_copies: Vec<CarbonCopy>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Signer {
    pub email: String,
    pub name: String,
    pub recipient_id: String,
    pub routing_order: String,
    pub tabs: Tabs,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CarbonCopy {
    pub email: String,
    pub name: String,
    pub recipient_id: String,
    pub routing_order: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tabs {
    pub sign_here_tabs: Vec<SignHere>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignHere {
    pub anchor_string: String,
    pub anchor_units: String,
    pub anchor_x_offset: String,
    pub anchor_y_offset: String,
}

/// Build the one-document, signer-plus-cc envelope from the configured args.
///
/// The document name and extension are derived from the file path; the
/// signature tab is anchored to the literal `"Signature:"` text.
///
/// # Errors
///
/// Returns `EnvelopeError::Document` if the document file cannot be read.
pub fn make_envelope(args: &EnvelopeArgs) -> Result<EnvelopeDefinition, EnvelopeError> {
    let bytes = std::fs::read(&args.document_path).map_err(|source| EnvelopeError::Document {
        path: args.document_path.clone(),
        source,
    })?;

    let name = args
        .document_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let file_extension = args
        .document_path
        .extension()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "pdf".to_string());

    let document = Document {
        document_base64: STANDARD.encode(bytes),
        name,
        file_extension,
        document_id: "1".to_string(),
    };

    let signer = Signer {
        email: args.signer_email.clone(),
        name: args.signer_name.clone(),
        recipient_id: SIGNER_RECIPIENT_ID.to_string(),
        routing_order: SIGNER_ROUTING_ORDER.to_string(),
        tabs: Tabs {
            sign_here_tabs: vec![SignHere {
                anchor_string: SIGNATURE_ANCHOR.to_string(),
                anchor_units: ANCHOR_UNITS.to_string(),
                anchor_x_offset: ANCHOR_X_OFFSET.to_string(),
                anchor_y_offset: ANCHOR_Y_OFFSET.to_string(),
            }],
        },
    };

    let cc = CarbonCopy {
        email: args.cc_email.clone(),
        name: args.cc_name.clone(),
        recipient_id: CC_RECIPIENT_ID.to_string(),
        routing_order: CC_ROUTING_ORDER.to_string(),
    };

    Ok(EnvelopeDefinition {
        email_subject: args.email_subject.clone(),
        documents: vec![document],
        recipients: Recipients {
            signers: vec![signer],
            carbon_copies: vec![cc],
        },
        status: args.status.clone(),
    })
}
