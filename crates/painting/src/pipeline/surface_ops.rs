//! Surface operations for the painting pipeline

use tracing::{info, warn};

use crate::compositor::DirtyTiles;
use crate::export::{ExportError, ExportSink, export_name};

use super::PaintingPipeline;

impl PaintingPipeline {
    /// Take dirty tiles of both surfaces for upload
    ///
    /// The dirty flags are cleared.
    pub fn take_dirty_tiles(&mut self) -> DirtyTiles {
        self.compositor.take_dirty_tiles()
    }

    /// Commit, flatten the painting surface and hand it to `sink`.
    ///
    /// Returns the generated file name.
    pub fn export(&mut self, sink: &mut dyn ExportSink) -> Result<String, ExportError> {
        self.commit();
        let image = self.compositor.flatten();
        let name = export_name(self.export_count + 1);

        if let Err(e) = sink.export(&name, image) {
            warn!("Export of {} failed: {}", name, e);
            return Err(e);
        }
        self.export_count += 1;
        info!("Exported {}", name);
        Ok(name)
    }
}
