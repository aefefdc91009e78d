//! Contour Core
//!
//! This crate provides the foundational primitives shared by the Contour crates:
//!
//! - **Geometry**: points, sizes and axis-aligned rectangles with union semantics
//! - **Color**: 8-bit RGBA colors with packed hex conversion
//! - **Paths**: move/line/cubic/close command lists split into sub-paths, with
//!   tight bounding boxes
//! - **Draw Context**: the rendering interface paths are drawn through, plus a
//!   recording implementation
//!
//! # Example
//!
//! ```rust
//! use contour_core::{PathBuilder, Rect};
//!
//! let mut builder = PathBuilder::new();
//! builder.move_to(0.0, 0.0);
//! builder.line_to(10.0, 0.0);
//! builder.line_to(10.0, 10.0);
//! builder.close();
//!
//! let path = builder.build();
//! assert_eq!(path.bounds(), Rect::new(0.0, 0.0, 10.0, 10.0));
//! ```

pub mod color;
pub mod draw;
pub mod geometry;
pub mod path;

pub use color::Color;
pub use draw::{
    BlendMode, DrawCommand, DrawContext, FillRule, LineCap, LineJoin, RecordingContext, Stroke,
};
pub use geometry::{Point, Rect, Size};
pub use path::{Path, PathBuilder, PathCommand, SubPath};
