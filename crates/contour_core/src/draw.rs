//! Draw Context - Rendering API
//!
//! The `DrawContext` trait is the interface paths are drawn through. Backends
//! (a pixmap rasterizer, a command recorder) implement it; drawing code stays
//! backend-agnostic.
//!
//! # Example
//!
//! ```rust
//! use contour_core::{Color, DrawContext, FillRule, Path, RecordingContext, Rect};
//!
//! let mut ctx = RecordingContext::new();
//! ctx.fill_path(&Path::rect(Rect::new(0.0, 0.0, 10.0, 10.0)), Color::RED, FillRule::EvenOdd);
//! assert_eq!(ctx.commands().len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::path::Path;

// ─────────────────────────────────────────────────────────────────────────────
// Style Types
// ─────────────────────────────────────────────────────────────────────────────

/// Fill rule deciding which regions of overlapping sub-paths are inside
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FillRule {
    #[default]
    NonZero,
    EvenOdd,
}

/// How source pixels combine with what is already drawn
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    /// Alpha blending (source over destination)
    #[default]
    SourceOver,
    /// Source replaces destination, alpha included
    Source,
}

/// Line cap style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Line join style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineJoin {
    /// Miter join (sharp corner)
    #[default]
    Miter,
    /// Round join
    Round,
    /// Bevel join (flat corner)
    Bevel,
}

/// Stroke style configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Line width
    pub width: f32,
    /// Line cap style
    pub cap: LineCap,
    /// Line join style
    pub join: LineJoin,
    /// Miter limit (for Miter joins)
    pub miter_limit: f32,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
            join: LineJoin::Miter,
            miter_limit: 4.0,
        }
    }
}

impl Stroke {
    /// Create a new stroke with the given width
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// The rendering interface for 2D path drawing
pub trait DrawContext {
    /// Push a blend mode
    fn push_blend_mode(&mut self, mode: BlendMode);

    /// Pop the top blend mode from the stack
    fn pop_blend_mode(&mut self);

    /// Get the blend mode currently in effect
    fn blend_mode(&self) -> BlendMode;

    /// Reset every pixel of the target to `color`
    fn clear(&mut self, color: Color);

    /// Fill a path
    fn fill_path(&mut self, path: &Path, color: Color, rule: FillRule);

    /// Stroke a path
    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, color: Color);
}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    PushBlendMode(BlendMode),
    PopBlendMode,
    Clear(Color),
    FillPath {
        path: Path,
        color: Color,
        rule: FillRule,
    },
    StrokePath {
        path: Path,
        stroke: Stroke,
        color: Color,
    },
}

/// A draw context that records commands for later execution
#[derive(Debug)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    blend_mode_stack: Vec<BlendMode>,
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            blend_mode_stack: vec![BlendMode::SourceOver],
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Replay the recorded commands into another context
    pub fn replay(&self, target: &mut dyn DrawContext) {
        for cmd in &self.commands {
            match cmd {
                DrawCommand::PushBlendMode(mode) => target.push_blend_mode(*mode),
                DrawCommand::PopBlendMode => target.pop_blend_mode(),
                DrawCommand::Clear(color) => target.clear(*color),
                DrawCommand::FillPath { path, color, rule } => {
                    target.fill_path(path, *color, *rule)
                }
                DrawCommand::StrokePath {
                    path,
                    stroke,
                    color,
                } => target.stroke_path(path, stroke, *color),
            }
        }
    }
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawContext for RecordingContext {
    fn push_blend_mode(&mut self, mode: BlendMode) {
        self.commands.push(DrawCommand::PushBlendMode(mode));
        self.blend_mode_stack.push(mode);
    }

    fn pop_blend_mode(&mut self) {
        self.commands.push(DrawCommand::PopBlendMode);
        if self.blend_mode_stack.len() > 1 {
            self.blend_mode_stack.pop();
        }
    }

    fn blend_mode(&self) -> BlendMode {
        self.blend_mode_stack.last().copied().unwrap_or_default()
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_path(&mut self, path: &Path, color: Color, rule: FillRule) {
        self.commands.push(DrawCommand::FillPath {
            path: path.clone(),
            color,
            rule,
        });
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke, color: Color) {
        self.commands.push(DrawCommand::StrokePath {
            path: path.clone(),
            stroke: stroke.clone(),
            color,
        });
    }
}
