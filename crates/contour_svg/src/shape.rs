//! Styled paths built from shape records

use contour_core::{Color, FillRule, Path, Rect, Stroke};

/// A path together with the style it is drawn with
#[derive(Clone, Debug, PartialEq)]
pub struct ShapePath {
    geometry: Path,
    filled: bool,
    fill_color: Color,
    fill_rule: FillRule,
    stroked: bool,
    stroke: Stroke,
    stroke_color: Color,
}

impl Default for ShapePath {
    fn default() -> Self {
        Self {
            geometry: Path::new(),
            filled: false,
            fill_color: Color::WHITE,
            fill_rule: FillRule::NonZero,
            stroked: false,
            stroke: Stroke::default(),
            stroke_color: Color::WHITE,
        }
    }
}

impl ShapePath {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn geometry(&self) -> &Path {
        &self.geometry
    }

    pub fn set_geometry(&mut self, geometry: Path) {
        self.geometry = geometry;
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn set_filled(&mut self, filled: bool) {
        self.filled = filled;
    }

    pub fn fill_color(&self) -> Color {
        self.fill_color
    }

    /// Set the fill color. Does not enable filling.
    pub fn set_fill_color(&mut self, color: Color) {
        self.fill_color = color;
    }

    pub fn fill_rule(&self) -> FillRule {
        self.fill_rule
    }

    pub fn set_fill_rule(&mut self, rule: FillRule) {
        self.fill_rule = rule;
    }

    pub fn is_stroked(&self) -> bool {
        self.stroked
    }

    pub fn set_stroked(&mut self, stroked: bool) {
        self.stroked = stroked;
    }

    pub fn stroke(&self) -> &Stroke {
        &self.stroke
    }

    pub fn stroke_width(&self) -> f32 {
        self.stroke.width
    }

    pub fn set_stroke_width(&mut self, width: f32) {
        self.stroke.width = width;
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = color;
    }

    /// Union of the bounding boxes of every sub-path
    pub fn bounds(&self) -> Rect {
        self.geometry.bounds()
    }
}
