//! Versioned JSON envelope for the persisted submission list
//!
//! ```json
//! {"version":1,"submissions":[...]}
//! ```
//!
//! Version 0 is the unversioned layout: a bare array of submissions using
//! `timestamp`/`audioUrl` field names. It still loads and is written back as
//! version 1 on the next save.

use serde::de::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::PersistenceError;
use crate::submission::Submission;

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    submissions: &'a [Submission],
}

#[derive(Debug, Deserialize)]
struct Envelope {
    version: u32,
    #[serde(default)]
    submissions: Vec<Submission>,
}

/// Serialize a submission list at the current format version
pub fn encode(submissions: &[Submission]) -> Result<String, PersistenceError> {
    let envelope = EnvelopeRef {
        version: FORMAT_VERSION,
        submissions,
    };
    Ok(serde_json::to_string(&envelope)?)
}

/// Parse a stored blob, upgrading older layouts
pub fn decode(json: &str) -> Result<Vec<Submission>, PersistenceError> {
    let value: Value = serde_json::from_str(json)?;
    match value {
        Value::Array(_) => {
            let submissions: Vec<Submission> = serde_json::from_value(value)?;
            log::info!(
                "Upgrading {} submissions from unversioned layout",
                submissions.len()
            );
            Ok(submissions)
        }
        Value::Object(_) => {
            let envelope: Envelope = serde_json::from_value(value)?;
            if envelope.version > FORMAT_VERSION {
                return Err(PersistenceError::UnsupportedVersion {
                    found: envelope.version,
                    supported: FORMAT_VERSION,
                });
            }
            Ok(envelope.submissions)
        }
        // `null` is what an emptied slot sometimes holds
        Value::Null => Ok(Vec::new()),
        other => Err(serde_json::Error::custom(format!(
            "expected submission list or envelope, found {}",
            kind_of(&other)
        ))
        .into()),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
