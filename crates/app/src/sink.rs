//! Export sink writing PNG files into a directory

use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use painting::{ExportError, ExportSink};
use tracing::debug;

/// Writes each export as `<dir>/<name>`
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    /// Create the sink, creating `dir` if needed
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, ExportError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ExportSink for DirectorySink {
    fn export(&mut self, name: &str, image: RgbaImage) -> Result<(), ExportError> {
        if name.contains(['/', '\\']) {
            return Err(ExportError::Rejected {
                name: name.to_string(),
                reason: "name must not contain path separators".to_string(),
            });
        }
        let path = self.dir.join(name);
        image.save_with_format(&path, ImageFormat::Png)?;
        debug!("Wrote {}", path.display());
        Ok(())
    }
}
