//! Drawing styled paths through a draw context

use contour_core::{BlendMode, Color, DrawContext, FillRule, Path, Stroke};

use crate::shape::ShapePath;

/// A read-only view of a [`ShapePath`] ready to be drawn
#[derive(Clone, Debug, PartialEq)]
pub struct RenderablePath<'a> {
    pub geometry: &'a Path,
    pub fill: Option<(Color, FillRule)>,
    pub stroke: Option<(&'a Stroke, Color)>,
}

impl RenderablePath<'_> {
    /// Fill first, then stroke on top
    pub fn draw(&self, ctx: &mut dyn DrawContext) {
        if let Some((color, rule)) = self.fill {
            ctx.fill_path(self.geometry, color, rule);
        }
        if let Some((stroke, color)) = self.stroke {
            ctx.stroke_path(self.geometry, stroke, color);
        }
    }
}

/// View `path` with its fill alpha multiplied by `factor`.
///
/// The path itself is not modified. Stroke colors keep their alpha. A stroke
/// with a non-positive width is not drawn.
pub fn with_scaled_alpha(path: &ShapePath, factor: f32) -> RenderablePath<'_> {
    RenderablePath {
        geometry: path.geometry(),
        fill: path
            .is_filled()
            .then(|| (path.fill_color().scale_alpha(factor), path.fill_rule())),
        stroke: (path.is_stroked() && path.stroke_width() > 0.0)
            .then(|| (path.stroke(), path.stroke_color())),
    }
}

/// Draw every path with alpha blending disabled, fill alpha scaled by `opacity`
pub fn draw_paths(ctx: &mut dyn DrawContext, paths: &[ShapePath], opacity: f32) {
    ctx.push_blend_mode(BlendMode::Source);
    for path in paths {
        with_scaled_alpha(path, opacity).draw(ctx);
    }
    ctx.pop_blend_mode();
}
