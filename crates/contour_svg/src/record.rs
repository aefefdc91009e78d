//! Shape records: the owned snapshot of what the parser produced
//!
//! Geometry travels as a flat `f32` command stream. Each command is a tag
//! slot followed by its operands:
//!
//! | tag | command | operands            |
//! |-----|---------|---------------------|
//! | 0   | move    | x y                 |
//! | 1   | close   |                     |
//! | 2   | line    | x y                 |
//! | 3   | bezier  | c1x c1y c2x c2y x y |

/// Command tag in a shape's command stream
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathTag {
    Move,
    Close,
    Line,
    Bezier,
}

impl PathTag {
    /// Decode a tag slot. Anything other than an exact tag value is unknown.
    pub fn from_value(value: f32) -> Option<Self> {
        if value == 0.0 {
            Some(PathTag::Move)
        } else if value == 1.0 {
            Some(PathTag::Close)
        } else if value == 2.0 {
            Some(PathTag::Line)
        } else if value == 3.0 {
            Some(PathTag::Bezier)
        } else {
            None
        }
    }

    pub fn value(self) -> f32 {
        match self {
            PathTag::Move => 0.0,
            PathTag::Close => 1.0,
            PathTag::Line => 2.0,
            PathTag::Bezier => 3.0,
        }
    }

    /// Slots taken by this command, tag included
    pub fn stride(self) -> usize {
        match self {
            PathTag::Move | PathTag::Line => 3,
            PathTag::Bezier => 7,
            PathTag::Close => 1,
        }
    }
}

/// Encoder for a flat command stream
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CommandStream {
    data: Vec<f32>,
}

impl CommandStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.data.extend([PathTag::Move.value(), x, y]);
        self
    }

    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.data.extend([PathTag::Line.value(), x, y]);
        self
    }

    pub fn bezier_to(mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) -> Self {
        self.data
            .extend([PathTag::Bezier.value(), c1x, c1y, c2x, c2y, x, y]);
        self
    }

    pub fn close(mut self) -> Self {
        self.data.push(PathTag::Close.value());
        self
    }

    /// Append a raw slot, bypassing the encoder
    pub fn raw(mut self, value: f32) -> Self {
        self.data.push(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }
}

/// What a shape record draws
#[derive(Clone, Debug, PartialEq)]
pub enum ShapeGeometry {
    /// Flat command stream
    Path(Vec<f32>),
    /// Text run anchored at (x, y)
    Text { content: String, x: f32, y: f32 },
}

/// One parsed shape
#[derive(Clone, Debug, PartialEq)]
pub struct ShapeRecord {
    /// Packed `0xRRGGBB` fill, `None` when transparent
    pub fill: Option<u32>,
    /// Packed `0xRRGGBB` stroke, `None` when transparent
    pub stroke: Option<u32>,
    pub stroke_width: f32,
    /// Fill opacity in 0..=1
    pub opacity: f32,
    pub geometry: ShapeGeometry,
}

impl ShapeRecord {
    /// A path-shaped record with no paint
    pub fn path(stream: CommandStream) -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            opacity: 1.0,
            geometry: ShapeGeometry::Path(stream.into_vec()),
        }
    }

    /// A text-shaped record
    pub fn text(content: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            fill: None,
            stroke: None,
            stroke_width: 1.0,
            opacity: 1.0,
            geometry: ShapeGeometry::Text {
                content: content.into(),
                x,
                y,
            },
        }
    }

    pub fn with_fill(mut self, hex: u32) -> Self {
        self.fill = Some(hex);
        self
    }

    pub fn with_stroke(mut self, hex: u32, width: f32) -> Self {
        self.stroke = Some(hex);
        self.stroke_width = width;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    /// The command stream, if this record carries path geometry
    pub fn commands(&self) -> Option<&[f32]> {
        match &self.geometry {
            ShapeGeometry::Path(stream) => Some(stream),
            ShapeGeometry::Text { .. } => None,
        }
    }
}

/// A parsed document: its size and shapes in document order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DiagramRecord {
    pub width: f32,
    pub height: f32,
    pub shapes: Vec<ShapeRecord>,
}

impl DiagramRecord {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            shapes: Vec::new(),
        }
    }

    pub fn with_shape(mut self, shape: ShapeRecord) -> Self {
        self.shapes.push(shape);
        self
    }
}
