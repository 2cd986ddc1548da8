//! Type definitions for IPC messages.

mod snapshot;

pub use snapshot::*;
