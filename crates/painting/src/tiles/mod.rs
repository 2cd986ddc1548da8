//! Tile management and dirty tracking for raster surfaces

mod data_access;
mod dirty_tracking;
mod shape_application;

use std::collections::HashSet;

use crate::constants::DEFAULT_TILE_SIZE;
use crate::surface::{RasterSurface, SurfaceError};

/// Tile coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    pub x: u32,
    pub y: u32,
}

/// A raster surface split into tiles, remembering which tiles changed
#[derive(Debug, Clone)]
pub struct TiledSurface {
    pub(crate) surface: RasterSurface,
    pub(crate) tile_size: u32,
    tiles_x: u32,
    tiles_y: u32,
    pub(crate) dirty_tiles: HashSet<TileCoord>,
}

impl TiledSurface {
    /// Create a new transparent tiled surface
    pub fn new(width: u32, height: u32, tile_size: u32) -> Result<Self, SurfaceError> {
        let surface = RasterSurface::new(width, height)?;
        let tile_size = tile_size.max(1);

        Ok(Self {
            surface,
            tile_size,
            tiles_x: width.div_ceil(tile_size),
            tiles_y: height.div_ceil(tile_size),
            dirty_tiles: HashSet::new(),
        })
    }

    /// Create a new tiled surface with the default tile size
    pub fn with_default_tile_size(width: u32, height: u32) -> Result<Self, SurfaceError> {
        Self::new(width, height, DEFAULT_TILE_SIZE)
    }

    #[inline]
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    #[inline]
    pub fn tiles_x(&self) -> u32 {
        self.tiles_x
    }

    #[inline]
    pub fn tiles_y(&self) -> u32 {
        self.tiles_y
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.surface.height()
    }

    /// Get the underlying surface for direct pixel access
    #[inline]
    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    /// Get mutable access to the underlying surface
    ///
    /// Changes made this way are not tracked; call
    /// [`mark_region_dirty`](Self::mark_region_dirty) or
    /// [`mark_all_dirty`](Self::mark_all_dirty) afterwards.
    #[inline]
    pub fn surface_mut(&mut self) -> &mut RasterSurface {
        &mut self.surface
    }

    /// Reset to transparent, marking every tile dirty
    pub fn clear(&mut self) {
        self.surface.clear();
        self.mark_all_dirty();
    }

    /// Fill with a solid color, marking every tile dirty
    pub fn fill(&mut self, color: crate::color::Color) {
        self.surface.fill(color);
        self.mark_all_dirty();
    }
}
