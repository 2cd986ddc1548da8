//! Gouache painting engine - stroke synthesis and compositing
//!
//! This crate turns pointer input into painted pixels:
//! - [`color`] - OKHSL brush color with deterministic variation
//! - [`input`] - Pointer normalization, device sessions, tap/draw classification
//! - [`recording`] - The replayable sample list of the current stroke
//! - [`brush`] - Brush settings and tool dispatch
//! - [`geometry`] - Shape generators for every tool
//! - [`surface`] / [`tiles`] - CPU raster surfaces with dirty tracking
//! - [`compositor`] - Painting and active-stroke layers
//! - [`export`] - Flattened canvas export sinks
//! - [`pipeline`] - The engine state owner tying it all together

pub mod brush;
pub mod color;
pub mod compositor;
pub mod constants;
pub mod export;
pub mod geometry;
pub mod input;
pub mod noise;
pub mod pipeline;
pub mod recording;
pub mod surface;
pub mod tiles;

pub use brush::{BrushSpec, Generator, ReplayPolicy};
pub use color::Color;
pub use compositor::{Compositor, DirtyTiles};
pub use constants::*;
pub use export::{ExportError, ExportSink, MemorySink, export_name};
pub use geometry::{Shape, ShapeKind, synthesize};
pub use input::{PointerSample, PointerState};
pub use pipeline::*;
pub use recording::StrokeRecording;
pub use surface::{RasterSurface, SurfaceError};
pub use tiles::{TileCoord, TiledSurface};
