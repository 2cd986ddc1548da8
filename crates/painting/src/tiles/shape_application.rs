//! Shape rasterization onto tiled surfaces

use tiny_skia::{
    FillRule, LineCap, Paint, Path, PathBuilder, PixmapPaint, Rect, Stroke, Transform,
};
use tracing::debug;

use crate::geometry::{Shape, ShapeKind};

use super::{TileCoord, TiledSurface};

/// Extra pixels around a path's bounds covered by anti-aliasing
const AA_MARGIN: f32 = 1.0;

impl TiledSurface {
    /// Rasterize one shape (source-over, anti-aliased).
    ///
    /// Returns the affected region (x, y, width, height), or `None` if the
    /// shape is degenerate or lies entirely outside the surface.
    pub fn draw_shape(&mut self, shape: &Shape) -> Option<(u32, u32, u32, u32)> {
        let mut paint = Paint::default();
        paint.set_color(shape.color.to_skia());
        paint.anti_alias = true;

        let (path, spread) = match &shape.kind {
            ShapeKind::Line { from, to, width } => {
                let mut builder = PathBuilder::new();
                builder.move_to(from.x, from.y);
                builder.line_to(to.x, to.y);
                let path = builder.finish()?;
                let stroke = Stroke {
                    width: *width,
                    line_cap: LineCap::Round,
                    ..Stroke::default()
                };
                self.surface
                    .pixmap_mut()
                    .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
                (path, *width / 2.0)
            }
            kind => {
                let path = shape_path(kind)?;
                self.surface.pixmap_mut().fill_path(
                    &path,
                    &paint,
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
                (path, 0.0)
            }
        };

        let region = self.pixel_region(path.bounds(), spread + AA_MARGIN)?;
        let (x, y, w, h) = region;
        self.mark_region_dirty(x, y, w, h);
        Some(region)
    }

    /// Rasterize shapes in order, returning how many touched the surface
    pub fn draw_shapes(&mut self, shapes: &[Shape]) -> usize {
        let drawn = shapes.iter().filter_map(|shape| self.draw_shape(shape)).count();
        debug!("draw_shapes: {} of {} shapes on surface", drawn, shapes.len());
        drawn
    }

    /// Composite `source` over this surface and mark everything it touched.
    pub fn draw_surface(&mut self, source: &TiledSurface) {
        self.surface.pixmap_mut().draw_pixmap(
            0,
            0,
            source.surface().pixmap().as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        for tile in source.nonblank_tiles() {
            let (x, y, w, h) = source.get_tile_bounds(tile);
            self.mark_region_dirty(x, y, w, h);
        }
    }

    /// Tiles holding at least one non-transparent pixel
    pub fn nonblank_tiles(&self) -> Vec<TileCoord> {
        let mut tiles = Vec::new();
        for ty in 0..self.tiles_y() {
            for tx in 0..self.tiles_x() {
                let coord = TileCoord { x: tx, y: ty };
                if self.get_tile_data(coord).iter().any(|pixel| pixel[3] != 0) {
                    tiles.push(coord);
                }
            }
        }
        tiles
    }

    /// Clamp float bounds grown by `margin` to a pixel region on the surface
    fn pixel_region(&self, bounds: Rect, margin: f32) -> Option<(u32, u32, u32, u32)> {
        let left = (bounds.left() - margin).floor().max(0.0);
        let top = (bounds.top() - margin).floor().max(0.0);
        let right = (bounds.right() + margin).ceil().min(self.width() as f32);
        let bottom = (bounds.bottom() + margin).ceil().min(self.height() as f32);
        if right <= left || bottom <= top {
            return None;
        }
        Some((
            left as u32,
            top as u32,
            (right - left) as u32,
            (bottom - top) as u32,
        ))
    }
}

/// Build the fill path for a non-stroked shape
fn shape_path(kind: &ShapeKind) -> Option<Path> {
    match kind {
        ShapeKind::Polygon(points) => {
            let (first, rest) = points.split_first()?;
            if rest.len() < 2 {
                return None;
            }
            let mut builder = PathBuilder::new();
            builder.move_to(first.x, first.y);
            for point in rest {
                builder.line_to(point.x, point.y);
            }
            builder.close();
            builder.finish()
        }
        ShapeKind::Circle { center, radius } => PathBuilder::from_circle(center.x, center.y, *radius),
        ShapeKind::RoundedRect {
            center,
            length,
            width,
            radius,
            angle,
        } => rounded_rect(*length, *width, *radius)?.transform(
            Transform::from_rotate(angle.to_degrees()).post_translate(center.x, center.y),
        ),
        ShapeKind::Line { .. } => None,
    }
}

/// Rounded rectangle centered on the origin, `length` along x
fn rounded_rect(length: f32, width: f32, radius: f32) -> Option<Path> {
    let (hx, hy) = (length / 2.0, width / 2.0);
    if !(hx > 0.0 && hy > 0.0) {
        return None;
    }
    let r = radius.clamp(0.0, hx.min(hy));

    let mut builder = PathBuilder::new();
    builder.move_to(-hx + r, -hy);
    builder.line_to(hx - r, -hy);
    builder.quad_to(hx, -hy, hx, -hy + r);
    builder.line_to(hx, hy - r);
    builder.quad_to(hx, hy, hx - r, hy);
    builder.line_to(-hx + r, hy);
    builder.quad_to(-hx, hy, -hx, hy - r);
    builder.line_to(-hx, -hy + r);
    builder.quad_to(-hx, -hy, -hx + r, -hy);
    builder.close();
    builder.finish()
}
