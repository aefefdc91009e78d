//! SVG shape records to styled vector paths
//!
//! This crate turns the shapes of a parsed SVG document into styled
//! [`ShapePath`]s, tracks the document bounding box and rasterizes to an
//! offscreen surface. Parsing is done by `usvg`; its output is flattened into
//! owned [`DiagramRecord`]s whose geometry is a flat command stream.
//!
//! # Example
//!
//! ```ignore
//! use contour_svg::{LoadOptions, SvgDocument};
//!
//! let mut svg = SvgDocument::new();
//! svg.load("tiger.svg", &LoadOptions::default())?;
//! println!("{:?}", svg.bounding_box());
//! svg.draw(&mut ctx, 0.5);
//! ```

mod convert;
mod document;
mod error;
mod options;
mod parse;
mod rasterize;
mod record;
mod render;
mod shape;
mod style;

pub use convert::{convert_shape, stream_to_path};
pub use document::{assemble, SvgDocument};
pub use error::SvgError;
pub use options::LoadOptions;
pub use parse::{parse, tree_to_diagram, ParseOutput, ParseStatus};
pub use rasterize::{PixmapContext, RasterSurface, SurfaceSettings};
pub use record::{CommandStream, DiagramRecord, PathTag, ShapeGeometry, ShapeRecord};
pub use render::{draw_paths, with_scaled_alpha, RenderablePath};
pub use shape::ShapePath;
