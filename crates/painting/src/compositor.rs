//! Layered compositor
//!
//! Two surfaces: the persistent painting surface and the transient
//! active-stroke surface. Geometry for the current stroke is rasterized
//! onto the active surface; `commit` merges it into the painting surface
//! exactly once and leaves the active surface empty.

use tracing::{debug, info};

use crate::color::Color;
use crate::geometry::Shape;
use crate::surface::SurfaceError;
use crate::tiles::{TileCoord, TiledSurface};

/// Tiles changed on each surface since the last take
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirtyTiles {
    pub painting: Vec<TileCoord>,
    pub active: Vec<TileCoord>,
}

/// Owner of the painting and active-stroke surfaces
#[derive(Debug, Clone)]
pub struct Compositor {
    painting: TiledSurface,
    active: TiledSurface,
}

impl Compositor {
    /// Create both surfaces, filling the painting surface with `background`
    pub fn new(width: u32, height: u32, background: Color) -> Result<Self, SurfaceError> {
        let mut painting = TiledSurface::with_default_tile_size(width, height)?;
        painting.fill(background);
        let active = TiledSurface::with_default_tile_size(width, height)?;
        Ok(Self { painting, active })
    }

    #[inline]
    pub fn painting(&self) -> &TiledSurface {
        &self.painting
    }

    #[inline]
    pub fn active(&self) -> &TiledSurface {
        &self.active
    }

    pub fn width(&self) -> u32 {
        self.painting.width()
    }

    pub fn height(&self) -> u32 {
        self.painting.height()
    }

    /// Rasterize shapes onto the active surface
    pub fn draw_active(&mut self, shapes: &[Shape]) -> usize {
        self.active.draw_shapes(shapes)
    }

    /// Empty the active surface. No-op if it is already empty.
    pub fn clear_active(&mut self) {
        if self.active.surface().is_blank() {
            return;
        }
        for tile in self.active.nonblank_tiles() {
            let (x, y, w, h) = self.active.get_tile_bounds(tile);
            self.active.mark_region_dirty(x, y, w, h);
        }
        self.active.surface_mut().clear();
    }

    /// Merge the active surface into the painting surface, then empty it.
    ///
    /// Returns `false` (and changes nothing) when there is nothing to merge.
    pub fn commit(&mut self) -> bool {
        if self.active.surface().is_blank() {
            debug!("commit: active surface empty");
            return false;
        }
        self.painting.draw_surface(&self.active);
        self.clear_active();
        info!("Committed active stroke");
        true
    }

    /// Fill the painting surface with `background` and empty the active surface
    pub fn clear(&mut self, background: Color) {
        self.painting.fill(background);
        self.clear_active();
        info!("Cleared canvas to {}", background.to_hex());
    }

    /// Straight-alpha RGBA of the painting surface at a pixel
    pub fn sample(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.painting.surface().get_pixel(x, y)
    }

    /// Take the dirty tiles of both surfaces
    pub fn take_dirty_tiles(&mut self) -> DirtyTiles {
        DirtyTiles {
            painting: self.painting.take_dirty_tiles(),
            active: self.active.take_dirty_tiles(),
        }
    }

    /// The painting surface as a straight-alpha image
    pub fn flatten(&self) -> image::RgbaImage {
        self.painting.surface().to_rgba_image()
    }
}
