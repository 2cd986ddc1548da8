//! Dirty tile tracking for incremental uploads

use tracing::debug;

use super::{TileCoord, TiledSurface};

impl TiledSurface {
    /// Mark a pixel as modified (marks containing tile dirty)
    #[inline]
    pub fn mark_dirty(&mut self, x: u32, y: u32) {
        if x >= self.width() || y >= self.height() {
            return;
        }
        self.dirty_tiles.insert(TileCoord {
            x: x / self.tile_size,
            y: y / self.tile_size,
        });
    }

    /// Mark a rectangular region as dirty
    pub fn mark_region_dirty(&mut self, x: u32, y: u32, w: u32, h: u32) {
        if w == 0 || h == 0 || x >= self.width() || y >= self.height() {
            return;
        }

        // Clamp to surface bounds
        let x_end = x.saturating_add(w).min(self.width());
        let y_end = y.saturating_add(h).min(self.height());

        let tile_x_start = x / self.tile_size;
        let tile_y_start = y / self.tile_size;
        let tile_x_end = (x_end - 1) / self.tile_size;
        let tile_y_end = (y_end - 1) / self.tile_size;

        let tiles_before = self.dirty_tiles.len();
        for ty in tile_y_start..=tile_y_end {
            for tx in tile_x_start..=tile_x_end {
                self.dirty_tiles.insert(TileCoord { x: tx, y: ty });
            }
        }

        debug!(
            "mark_region_dirty: ({}, {}) {}x{} -> {} new tiles (total {})",
            x,
            y,
            w,
            h,
            self.dirty_tiles.len() - tiles_before,
            self.dirty_tiles.len()
        );
    }

    /// Mark every tile dirty
    pub fn mark_all_dirty(&mut self) {
        for ty in 0..self.tiles_y() {
            for tx in 0..self.tiles_x() {
                self.dirty_tiles.insert(TileCoord { x: tx, y: ty });
            }
        }
    }

    /// Get all dirty tiles, sorted row by row, and clear the dirty set
    pub fn take_dirty_tiles(&mut self) -> Vec<TileCoord> {
        let mut tiles: Vec<TileCoord> = self.dirty_tiles.drain().collect();
        tiles.sort_unstable_by_key(|tile| (tile.y, tile.x));
        tiles
    }

    /// Check if any tiles are dirty
    #[inline]
    pub fn has_dirty_tiles(&self) -> bool {
        !self.dirty_tiles.is_empty()
    }

    /// Get the number of dirty tiles
    #[inline]
    pub fn dirty_tile_count(&self) -> usize {
        self.dirty_tiles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_dirty() {
        let mut surface = TiledSurface::new(256, 256, 128).unwrap();

        surface.mark_dirty(0, 0);
        assert!(surface.has_dirty_tiles());
        assert_eq!(surface.dirty_tile_count(), 1);

        surface.mark_dirty(130, 130);
        assert_eq!(surface.dirty_tile_count(), 2);

        // Out of bounds is ignored
        surface.mark_dirty(1000, 0);
        assert_eq!(surface.dirty_tile_count(), 2);

        let tiles = surface.take_dirty_tiles();
        assert_eq!(tiles, vec![TileCoord { x: 0, y: 0 }, TileCoord { x: 1, y: 1 }]);
        assert!(!surface.has_dirty_tiles());
    }

    #[test]
    fn test_mark_region_dirty() {
        let mut surface = TiledSurface::new(256, 256, 128).unwrap();

        // Mark a region that spans all 4 tiles
        surface.mark_region_dirty(100, 100, 56, 56);
        assert_eq!(surface.dirty_tile_count(), 4);
    }

    #[test]
    fn test_mark_region_clamps_to_surface() {
        let mut surface = TiledSurface::new(256, 256, 128).unwrap();
        surface.mark_region_dirty(200, 200, u32::MAX, u32::MAX);
        assert_eq!(surface.take_dirty_tiles(), vec![TileCoord { x: 1, y: 1 }]);
    }
}
