//! Main IPC message enums for communication between the engine and UI.

use serde::{Deserialize, Serialize};

use crate::commands::PaintCommand;
use crate::input::PointerEvent;
use crate::types::{UiHit, UiSnapshot};

/// Messages from the host/UI to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum UiToEngine {
    /// Raw pointer event from the device layer
    Pointer(PointerEvent),
    /// Setting change, action, or navigation from the overlay
    Paint(PaintCommand),
    /// Redraw without new input
    Redraw,
}

/// Messages from the engine to the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum EngineToUi {
    /// State after the last applied message
    Snapshot(UiSnapshot),
    /// Input landed on an overlay region and was not drawn
    RegionHit(UiHit),
    /// A flattened canvas was handed to the export sink
    Exported { name: String },
}
