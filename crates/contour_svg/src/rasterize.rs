//! Offscreen rasterization with tiny-skia
//!
//! A [`RasterSurface`] owns an RGBA pixmap; [`PixmapContext`] draws paths
//! into it through the [`DrawContext`] interface.

use contour_core::{
    BlendMode, Color, DrawContext, FillRule, LineCap, LineJoin, Path, PathCommand, Stroke,
};
use serde::{Deserialize, Serialize};
use tiny_skia::{Pixmap, Transform};

use crate::error::SvgError;

/// Offscreen surface request
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    /// Anti-aliased edges
    pub anti_alias: bool,
    /// Requested sample count. Any value above 1 turns on anti-aliasing.
    pub samples: u8,
    /// Requested color attachments; the pixmap backend always has one
    pub color_buffers: u8,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            anti_alias: true,
            samples: 8,
            color_buffers: 3,
        }
    }
}

impl SurfaceSettings {
    fn wants_anti_alias(&self) -> bool {
        self.anti_alias || self.samples > 1
    }
}

/// RGBA raster target
pub struct RasterSurface {
    pixmap: Pixmap,
    settings: SurfaceSettings,
}

impl RasterSurface {
    /// Allocate a transparent surface
    pub fn new(width: u32, height: u32, settings: SurfaceSettings) -> Result<Self, SvgError> {
        let pixmap = Pixmap::new(width, height).ok_or_else(|| {
            SvgError::Surface(format!("cannot allocate a {width}x{height} surface"))
        })?;
        Ok(Self { pixmap, settings })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// A draw context targeting this surface
    pub fn context(&mut self) -> PixmapContext<'_> {
        let anti_alias = self.settings.wants_anti_alias();
        PixmapContext::new(&mut self.pixmap, anti_alias)
    }

    /// Straight-alpha RGBA bytes
    pub fn pixels(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// Straight-alpha color of one pixel
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Color::rgba(c.red(), c.green(), c.blue(), c.alpha()))
    }

    /// Encode the surface as PNG
    pub fn encode_png(&self) -> Result<Vec<u8>, SvgError> {
        self.pixmap
            .encode_png()
            .map_err(|e| SvgError::Surface(e.to_string()))
    }
}

/// A [`DrawContext`] drawing into a pixmap
pub struct PixmapContext<'a> {
    pixmap: &'a mut Pixmap,
    blend_mode_stack: Vec<BlendMode>,
    anti_alias: bool,
}

impl<'a> PixmapContext<'a> {
    pub fn new(pixmap: &'a mut Pixmap, anti_alias: bool) -> Self {
        Self {
            pixmap,
            blend_mode_stack: vec![BlendMode::SourceOver],
            anti_alias,
        }
    }

    fn paint(&self, color: Color) -> tiny_skia::Paint<'static> {
        let mut paint = tiny_skia::Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = self.anti_alias;
        paint.blend_mode = match self.blend_mode() {
            BlendMode::SourceOver => tiny_skia::BlendMode::SourceOver,
            BlendMode::Source => tiny_skia::BlendMode::Source,
        };
        paint
    }
}

impl DrawContext for PixmapContext<'_> {
    fn push_blend_mode(&mut self, mode: BlendMode) {
        self.blend_mode_stack.push(mode);
    }

    fn pop_blend_mode(&mut self) {
        if self.blend_mode_stack.len() > 1 {
            self.blend_mode_stack.pop();
        }
    }

    fn blend_mode(&self) -> BlendMode {
        self.blend_mode_stack.last().copied().unwrap_or_default()
    }

    fn clear(&mut self, color: Color) {
        self.pixmap.fill(tiny_skia::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
    }

    fn fill_path(&mut self, path: &Path, color: Color, rule: FillRule) {
        let Some(skia_path) = to_skia_path(path) else {
            return;
        };
        let rule = match rule {
            FillRule::NonZero => tiny_skia::FillRule::Winding,
            FillRule::EvenOdd => tiny_skia::FillRule::EvenOdd,
        };
        let paint = self.paint(color);
        self.pixmap
            .fill_path(&skia_path, &paint, rule, Transform::identity(), None);
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, color: Color) {
        let Some(skia_path) = to_skia_path(path) else {
            return;
        };
        let skia_stroke = tiny_skia::Stroke {
            width: stroke.width,
            miter_limit: stroke.miter_limit,
            line_cap: match stroke.cap {
                LineCap::Butt => tiny_skia::LineCap::Butt,
                LineCap::Round => tiny_skia::LineCap::Round,
                LineCap::Square => tiny_skia::LineCap::Square,
            },
            line_join: match stroke.join {
                LineJoin::Miter => tiny_skia::LineJoin::Miter,
                LineJoin::Round => tiny_skia::LineJoin::Round,
                LineJoin::Bevel => tiny_skia::LineJoin::Bevel,
            },
            ..Default::default()
        };
        let paint = self.paint(color);
        self.pixmap
            .stroke_path(&skia_path, &paint, &skia_stroke, Transform::identity(), None);
    }
}

/// Convert a path to tiny-skia. `None` when nothing drawable remains.
fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = tiny_skia::PathBuilder::new();
    for cmd in path.commands() {
        match cmd {
            PathCommand::MoveTo(p) => pb.move_to(p.x, p.y),
            PathCommand::LineTo(p) => pb.line_to(p.x, p.y),
            PathCommand::CubicTo {
                control1,
                control2,
                end,
            } => pb.cubic_to(control1.x, control1.y, control2.x, control2.y, end.x, end.y),
            PathCommand::Close => pb.close(),
        }
    }
    pb.finish()
}
