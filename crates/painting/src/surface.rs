//! CPU raster surface backed by a tiny-skia pixmap
//!
//! Pixels are stored as premultiplied RGBA8, which is what the rasterizer
//! writes and what texture uploads expect. Straight-alpha access is
//! available per pixel and for export.

use thiserror::Error;
use tiny_skia::Pixmap;

use crate::color::Color;

/// Errors creating a surface
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Surface must have non-zero size, got {width}x{height}")]
    ZeroSize { width: u32, height: u32 },
}

/// An 8-bit premultiplied RGBA surface
#[derive(Clone)]
pub struct RasterSurface {
    pixmap: Pixmap,
}

impl std::fmt::Debug for RasterSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSurface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl RasterSurface {
    /// Create a transparent surface
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        let pixmap = Pixmap::new(width, height).ok_or(SurfaceError::ZeroSize { width, height })?;
        Ok(Self { pixmap })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Reset every pixel to transparent
    pub fn clear(&mut self) {
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
    }

    /// Fill every pixel with a solid color
    pub fn fill(&mut self, color: Color) {
        self.pixmap.fill(color.to_skia());
    }

    /// True when every pixel is fully transparent
    pub fn is_blank(&self) -> bool {
        self.pixmap.data().iter().all(|&byte| byte == 0)
    }

    /// Straight-alpha RGBA at a pixel, `None` when out of bounds
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        // Pixmap::pixel only checks the linear index, so x past the edge
        // would land in the next row
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let pixel = self.pixmap.pixel(x, y)?.demultiply();
        Some([pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()])
    }

    /// Premultiplied pixels in row-major order
    #[inline]
    pub fn pixels(&self) -> &[[u8; 4]] {
        bytemuck::cast_slice(self.pixmap.data())
    }

    /// Raw premultiplied bytes for a full texture upload
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.pixmap.data()
    }

    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels().len()
    }

    #[inline]
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    #[inline]
    pub fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Copy out as a straight-alpha image
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width(), self.height(), |x, y| {
            image::Rgba(self.get_pixel(x, y).unwrap_or([0, 0, 0, 0]))
        })
    }
}
