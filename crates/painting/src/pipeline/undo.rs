//! Commit, undo and clear for the painting pipeline
//!
//! There is one level of undo: the uncommitted stroke. Once it is merged
//! into the painting surface it can no longer be discarded.

use tracing::{debug, info};

use super::PaintingPipeline;

impl PaintingPipeline {
    /// Merge the active stroke into the painting surface.
    ///
    /// Committing twice in a row is the same as committing once.
    pub fn commit(&mut self) -> bool {
        let merged = self.compositor.commit();
        if !self.recording.is_empty() {
            self.committed = true;
        }
        merged
    }

    /// Discard the uncommitted stroke, leaving the painting surface as it was
    pub fn undo(&mut self) {
        if self.recording.is_empty() && self.compositor.active().surface().is_blank() {
            debug!("undo: nothing to discard");
            return;
        }
        self.compositor.clear_active();
        self.discard_recording();
        info!("Undid uncommitted stroke");
    }

    /// Fill the canvas with the brush color, and take the old background
    /// as the new brush color.
    ///
    /// The uncommitted stroke is discarded along with the old canvas.
    pub fn clear(&mut self) {
        let fill = self.brush.color;
        self.brush.color = self.background;
        self.background = fill;
        self.compositor.clear(fill);
        self.discard_recording();
    }

    /// Drop the recording. Editing needs a recording, so edit mode ends too.
    fn discard_recording(&mut self) {
        self.recording.clear();
        self.drawn = 0;
        self.capturing = false;
        self.committed = false;
        self.edit_mode = false;
        self.last_edit_position = None;
        self.suppress_tap = false;
    }
}
