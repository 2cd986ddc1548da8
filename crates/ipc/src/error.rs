//! Error types for IPC operations.

/// Errors that can occur while encoding or decoding engine/UI messages.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    #[error("Failed to encode or decode message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid message format: {0}")]
    InvalidFormat(String),
}
