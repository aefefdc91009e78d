//! SVG document type and loading

use std::fs;
use std::path::Path as FilePath;

use contour_core::{Color, DrawContext, Rect};

use crate::convert::convert_shape;
use crate::error::SvgError;
use crate::options::LoadOptions;
use crate::parse::{parse, ParseStatus};
use crate::rasterize::{RasterSurface, SurfaceSettings};
use crate::record::{DiagramRecord, ShapeGeometry};
use crate::render::draw_paths;
use crate::shape::ShapePath;

/// A loaded document: styled paths, their bounding box and an optional
/// offscreen surface
#[derive(Default)]
pub struct SvgDocument {
    width: f32,
    height: f32,
    paths: Vec<ShapePath>,
    bounding_box: Rect,
    surface: Option<RasterSurface>,
    surface_settings: SurfaceSettings,
    surface_allocations: usize,
}

/// Build a document from a parsed diagram
pub fn assemble(diagram: &DiagramRecord) -> SvgDocument {
    let mut document = SvgDocument::new();
    document.setup(diagram);
    document
}

impl SvgDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use `settings` for the surface allocated by the next rasterize
    pub fn with_surface_settings(mut self, settings: SurfaceSettings) -> Self {
        self.surface_settings = settings;
        self
    }

    /// Parse SVG bytes and assemble a document from the result.
    ///
    /// Parse failures are logged; the document is whatever the parser
    /// returned.
    pub fn from_data(data: &[u8]) -> Self {
        let mut document = Self::new();
        document.load_data(data, None);
        document
    }

    /// Load a document from a file, replacing the current contents.
    ///
    /// Relative paths resolve against `options.data_dir`. A missing file is
    /// an error and leaves the document untouched. A parse failure is only
    /// advisory: it is logged, returned as the status, and the document is
    /// still rebuilt from whatever the parser produced.
    pub fn load(
        &mut self,
        path: impl AsRef<FilePath>,
        options: &LoadOptions,
    ) -> Result<ParseStatus, SvgError> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            tracing::error!("load(): path does not exist: \"\"");
            return Err(SvgError::NotFound(path.to_path_buf()));
        }

        let resolved = options.resolve(path);
        if !resolved.exists() {
            tracing::error!("load(): path does not exist: \"{}\"", resolved.display());
            return Err(SvgError::NotFound(resolved));
        }

        let data = fs::read(&resolved)?;
        Ok(self.load_data(&data, Some(&resolved)))
    }

    /// Parse SVG bytes into this document, replacing the current contents
    pub fn load_data(&mut self, data: &[u8], path_hint: Option<&FilePath>) -> ParseStatus {
        let output = parse(data, path_hint);
        if !output.status.is_ok() {
            let source = path_hint
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<memory>".to_string());
            tracing::error!("load(): couldn't parse \"{}\": {}", source, output.status);
        }
        self.setup(&output.diagram);
        output.status
    }

    /// Rebuild paths and bounding box from a diagram
    pub fn setup(&mut self, diagram: &DiagramRecord) {
        self.width = diagram.width;
        self.height = diagram.height;

        self.paths.clear();
        self.bounding_box = Rect::ZERO;

        for shape in &diagram.shapes {
            match &shape.geometry {
                ShapeGeometry::Path(_) => {
                    let (path, bounds) = convert_shape(shape);
                    self.paths.push(path);
                    self.bounding_box = self.bounding_box.merge_bounds(&bounds);
                }
                ShapeGeometry::Text { content, .. } => {
                    tracing::warn!(text = %content, "setup(): text: not implemented yet");
                }
            }
        }

        tracing::debug!(
            paths = self.paths.len(),
            width = self.width,
            height = self.height,
            "document assembled"
        );
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn paths(&self) -> &[ShapePath] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Union of every non-degenerate path bounding box
    pub fn bounding_box(&self) -> Rect {
        self.bounding_box
    }

    /// Give every path the same fill color. Geometry and strokes are untouched.
    pub fn set_fill_color(&mut self, color: Color) {
        for path in &mut self.paths {
            path.set_fill_color(color);
        }
    }

    /// Draw every path with alpha blending disabled, fill alpha scaled by
    /// `opacity`
    pub fn draw(&self, ctx: &mut dyn DrawContext, opacity: f32) {
        draw_paths(ctx, &self.paths, opacity);
    }

    /// Allocate the offscreen surface if there is none yet.
    ///
    /// Returns `true` when this call allocated. An existing surface is kept
    /// as is, whatever its size.
    pub fn ensure_allocated(&mut self, width: u32, height: u32) -> Result<bool, SvgError> {
        if self.surface.is_some() {
            return Ok(false);
        }
        let surface = RasterSurface::new(width, height, self.surface_settings.clone())?;
        tracing::debug!(width, height, "raster surface allocated");
        self.surface = Some(surface);
        self.surface_allocations += 1;
        Ok(true)
    }

    /// Render all paths into the offscreen surface.
    ///
    /// The surface is sized to the document on the first call and reused
    /// afterwards; each call clears it before drawing.
    pub fn rasterize(&mut self) -> Result<&RasterSurface, SvgError> {
        self.ensure_allocated(surface_extent(self.width), surface_extent(self.height))?;
        let surface = self
            .surface
            .as_mut()
            .ok_or_else(|| SvgError::Surface("surface missing after allocation".into()))?;

        {
            let mut ctx = surface.context();
            ctx.clear(Color::TRANSPARENT);
            draw_paths(&mut ctx, &self.paths, 1.0);
        }

        Ok(&*surface)
    }

    pub fn surface(&self) -> Option<&RasterSurface> {
        self.surface.as_ref()
    }

    /// How many times a surface has been allocated for this document
    pub fn surface_allocations(&self) -> usize {
        self.surface_allocations
    }
}

/// Whole pixels needed to cover a document extent
fn surface_extent(extent: f32) -> u32 {
    if extent.is_finite() && extent > 0.0 {
        extent.ceil().min(u32::MAX as f32) as u32
    } else {
        0
    }
}
