//! Complete painting pipeline
//!
//! [`PaintingPipeline`] is the single owner of all mutable engine state:
//! pointer state, the stroke recording, brush settings, UI page tracking
//! and both compositing surfaces. Every mutation goes through its `&mut
//! self` methods, one input event at a time:
//!
//! 1. `handle_pointer` hit-tests the event, updates pointer state and the
//!    recording
//! 2. exactly one `redraw` pass synthesizes geometry for new samples (or
//!    replays a translated recording in edit mode)
//! 3. `commit` merges the active stroke when the next gesture begins
//!
//! Settings, actions and navigation arrive as [`PaintCommand`]s.

mod commands;
mod stroke;
mod surface_ops;
mod undo;

use gouache_config::GouacheConfig;
use gouache_ipc::{BrushSnapshot, PointerSnapshot, UiPage, UiSnapshot};

use crate::brush::BrushSpec;
use crate::color::Color;
use crate::compositor::Compositor;
use crate::input::{DeviceSession, PointerState, UiRegions};
use crate::recording::StrokeRecording;
use crate::surface::SurfaceError;

pub use commands::CommandOutcome;
pub use stroke::EventOutcome;

/// The painting engine state owner
#[derive(Debug)]
pub struct PaintingPipeline {
    pub(crate) config: GouacheConfig,
    pub(crate) regions: UiRegions,
    pub(crate) session: DeviceSession,
    pub(crate) pointer: PointerState,
    pub(crate) recording: StrokeRecording,
    pub(crate) brush: BrushSpec,
    pub(crate) background: Color,
    pub(crate) compositor: Compositor,
    /// Samples already rasterized by accumulating tools
    pub(crate) drawn: usize,
    /// A canvas gesture is in progress (pressed outside the UI regions)
    pub(crate) gesture_active: bool,
    /// The current gesture appends samples to the recording
    pub(crate) capturing: bool,
    /// The recording has been merged into the painting surface
    pub(crate) committed: bool,
    pub(crate) edit_mode: bool,
    /// Pointer position at the previous edit-mode frame
    pub(crate) last_edit_position: Option<glam::Vec2>,
    /// Skip tap disambiguation on the next release
    pub(crate) suppress_tap: bool,
    pub(crate) eyedropper: bool,
    pub(crate) page: UiPage,
    pub(crate) previous_page: UiPage,
    pub(crate) export_count: u32,
}

impl PaintingPipeline {
    /// Create a pipeline with surfaces sized from `config.display`
    pub fn new(config: GouacheConfig) -> Result<Self, SurfaceError> {
        let background = Color::WHITE;
        let compositor = Compositor::new(config.display.width, config.display.height, background)?;
        Ok(Self {
            regions: UiRegions::new(&config.layout),
            config,
            session: DeviceSession::default(),
            pointer: PointerState::default(),
            recording: StrokeRecording::new(),
            brush: BrushSpec::default(),
            background,
            compositor,
            drawn: 0,
            gesture_active: false,
            capturing: false,
            committed: false,
            edit_mode: false,
            last_edit_position: None,
            suppress_tap: false,
            eyedropper: false,
            page: UiPage::Draw,
            previous_page: UiPage::Draw,
            export_count: 0,
        })
    }

    /// Create a pipeline with default settings and the given canvas size
    pub fn with_size(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let mut config = GouacheConfig::default();
        config.display.width = width;
        config.display.height = height;
        Self::new(config)
    }

    pub fn width(&self) -> u32 {
        self.compositor.width()
    }

    pub fn height(&self) -> u32 {
        self.compositor.height()
    }

    pub fn config(&self) -> &GouacheConfig {
        &self.config
    }

    pub fn brush(&self) -> &BrushSpec {
        &self.brush
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn recording(&self) -> &StrokeRecording {
        &self.recording
    }

    pub fn compositor(&self) -> &Compositor {
        &self.compositor
    }

    pub fn page(&self) -> UiPage {
        self.page
    }

    /// The page shown before the current one
    pub fn previous_page(&self) -> UiPage {
        self.previous_page
    }

    pub fn is_editing(&self) -> bool {
        self.edit_mode
    }

    pub fn is_eyedropper(&self) -> bool {
        self.eyedropper
    }

    /// Navigate the overlay to `page`, remembering the current one
    pub fn show_page(&mut self, page: UiPage) {
        if page != self.page {
            self.previous_page = self.page;
            self.page = page;
        }
    }

    /// Read-only state for the overlay
    pub fn snapshot(&self) -> UiSnapshot {
        let color = self.brush.color;
        let current = self.pointer.current;
        UiSnapshot {
            brush: BrushSnapshot {
                tool: self.brush.tool,
                texture: self.brush.texture,
                size: self.brush.size,
                hue: color.h,
                saturation: color.s,
                luminance: color.l,
                alpha: color.a,
                variation: self.brush.variation,
                display_color: color.to_hex(),
                background_color: self.background.to_hex(),
            },
            pointer: PointerSnapshot {
                x: current.map_or(0.0, |s| s.position.x),
                y: current.map_or(0.0, |s| s.position.y),
                angle: current.and_then(|s| s.angle),
                pressure: current.and_then(|s| s.pressure),
                down: self.pointer.down,
                hover: self.pointer.hover,
            },
            recording_bounds: self.recording.bounds(),
            page: self.page,
            edit_mode: self.edit_mode,
            eyedropper: self.eyedropper,
        }
    }
}
