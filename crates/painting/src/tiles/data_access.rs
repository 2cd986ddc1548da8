//! Tile data access and region queries

use super::{TileCoord, TiledSurface};

impl TiledSurface {
    /// Premultiplied pixels of one tile in row-major order
    ///
    /// Edge tiles are smaller than `tile_size` when the surface is not a
    /// multiple of it.
    pub fn get_tile_data(&self, coord: TileCoord) -> Vec<[u8; 4]> {
        let (x, y, width, height) = self.get_tile_bounds(coord);
        self.get_region_data(x, y, width, height)
    }

    /// Get tile bounds (x, y, width, height) in pixel coordinates
    pub fn get_tile_bounds(&self, coord: TileCoord) -> (u32, u32, u32, u32) {
        let tile_start_x = coord.x * self.tile_size;
        let tile_start_y = coord.y * self.tile_size;

        let tile_width = self.tile_size.min(self.width().saturating_sub(tile_start_x));
        let tile_height = self.tile_size.min(self.height().saturating_sub(tile_start_y));

        (tile_start_x, tile_start_y, tile_width, tile_height)
    }

    /// Premultiplied pixels of a region in row-major order, clamped to the surface
    pub fn get_region_data(&self, x: u32, y: u32, width: u32, height: u32) -> Vec<[u8; 4]> {
        let x_end = x.saturating_add(width).min(self.width());
        let y_end = y.saturating_add(height).min(self.height());
        if x_end <= x || y_end <= y {
            return Vec::new();
        }

        let stride = self.width() as usize;
        let pixels = self.surface.pixels();
        let mut data = Vec::with_capacity(((x_end - x) * (y_end - y)) as usize);
        for row in y..y_end {
            let start = row as usize * stride;
            data.extend_from_slice(&pixels[start + x as usize..start + x_end as usize]);
        }
        data
    }
}
