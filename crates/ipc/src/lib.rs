//! IPC message protocol for Gouache
//!
//! Defines the vocabulary exchanged between the painting engine and the UI
//! overlay: pointer events in, paint commands in, snapshots and region hits
//! out. The overlay itself (layout, hit-region sizing, rendering) lives
//! outside the engine and only talks through these types.

mod commands;
mod error;
mod input;
mod messages;
mod types;

pub use commands::*;
pub use error::IpcError;
pub use input::*;
pub use messages::*;
pub use types::*;

/// Serialize a message to a JSON string.
pub fn encode<T: serde::Serialize>(message: &T) -> Result<String, IpcError> {
    Ok(serde_json::to_string(message)?)
}

/// Deserialize a message from a JSON string.
pub fn decode<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, IpcError> {
    if json.trim().is_empty() {
        return Err(IpcError::InvalidFormat("empty message".to_string()));
    }
    Ok(serde_json::from_str(json)?)
}
