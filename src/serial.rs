//! Object persistence to files.
//!
//! Objects are stored as JSON keyed by field name, inside a small envelope
//! that names the format and its version:
//!
//! ```json
//! {"format": "dbkit", "version": 1, "payload": {"id": 7, "name": "alpha"}}
//! ```
//!
//! Loading rejects files written by a newer format version.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Format tag written into every envelope.
pub const FORMAT_TAG: &str = "dbkit";

/// Current envelope version.
pub const FORMAT_VERSION: u32 = 1;

/// Error type for object persistence.
#[derive(Debug, Error)]
pub enum SerialError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown format tag: {0:?}")]
    UnknownFormat(String),

    #[error("Unsupported format version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    format: &'a str,
    version: u32,
    payload: &'a T,
}

#[derive(Deserialize)]
struct Envelope {
    format: String,
    version: u32,
    payload: serde_json::Value,
}

/// Encode `value` into an envelope.
pub fn to_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerialError> {
    Ok(serde_json::to_vec(&EnvelopeRef {
        format: FORMAT_TAG,
        version: FORMAT_VERSION,
        payload: value,
    })?)
}

/// Decode a value from an envelope.
pub fn from_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerialError> {
    let envelope: Envelope = serde_json::from_slice(bytes)?;
    if envelope.format != FORMAT_TAG {
        return Err(SerialError::UnknownFormat(envelope.format));
    }
    if envelope.version > FORMAT_VERSION {
        return Err(SerialError::UnsupportedVersion {
            found: envelope.version,
            supported: FORMAT_VERSION,
        });
    }
    Ok(serde_json::from_value(envelope.payload)?)
}

/// Write `value` to `path`, replacing any existing file.
pub fn save<T: Serialize, P: AsRef<Path>>(path: P, value: &T) -> Result<(), SerialError> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(
        &mut writer,
        &EnvelopeRef {
            format: FORMAT_TAG,
            version: FORMAT_VERSION,
            payload: value,
        },
    )?;
    writer.flush()?;
    tracing::debug!(path = %path.display(), "Saved object");
    Ok(())
}

/// Read a value previously written with [`save`].
pub fn load<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T, SerialError> {
    let bytes = fs::read(path)?;
    from_bytes(&bytes)
}
