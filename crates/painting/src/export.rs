//! Export of the flattened canvas

use image::RgbaImage;
use thiserror::Error;

/// Errors reported by an export sink
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export of {name} rejected: {reason}")]
    Rejected { name: String, reason: String },
}

/// Receiver of flattened canvas images
pub trait ExportSink {
    /// Accept one image under a generated file name
    fn export(&mut self, name: &str, image: RgbaImage) -> Result<(), ExportError>;
}

/// File name for the `index`-th export of a session
pub fn export_name(index: u32) -> String {
    format!("gouache-{index}.png")
}

/// Sink that keeps every export in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    pub exports: Vec<(String, RgbaImage)>,
}

impl ExportSink for MemorySink {
    fn export(&mut self, name: &str, image: RgbaImage) -> Result<(), ExportError> {
        self.exports.push((name.to_string(), image));
        Ok(())
    }
}
