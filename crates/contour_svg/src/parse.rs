//! Parser adapter
//!
//! Runs `usvg` over raw bytes and flattens the resulting tree into an owned
//! [`DiagramRecord`]: one [`ShapeRecord`] per path or text node, geometry in
//! document space as a flat command stream.

use std::fmt;
use std::path::Path as FilePath;

use usvg::tiny_skia_path::{PathSegment, Point};
use usvg::{Options, Tree};

use crate::error::SvgError;
use crate::record::{CommandStream, DiagramRecord, ShapeRecord};
use crate::style::{fill_to_packed, stroke_to_packed};

/// Outcome reported by the parser
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseStatus {
    Ok,
    /// The document exceeded the parser's resource limits
    OutOfMemory,
    /// The bytes could not be read as XML
    XmlError(String),
    /// The document is not a usable SVG document
    NotSvg,
    /// Syntax error at a line
    SvgError { line: u32, message: String },
}

impl ParseStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, ParseStatus::Ok)
    }

    /// Turn an advisory status into a hard error
    pub fn into_result(self) -> Result<(), SvgError> {
        match self {
            ParseStatus::Ok => Ok(()),
            status => Err(SvgError::Parse(status)),
        }
    }
}

impl fmt::Display for ParseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseStatus::Ok => write!(f, "ok"),
            ParseStatus::OutOfMemory => write!(f, "out of memory"),
            ParseStatus::XmlError(message) => write!(f, "XML error: {message}"),
            ParseStatus::NotSvg => write!(f, "not an SVG document"),
            ParseStatus::SvgError { line, message } => {
                write!(f, "SVG error: line {line}: {message}")
            }
        }
    }
}

/// Status plus whatever diagram the parser produced
#[derive(Clone, Debug)]
pub struct ParseOutput {
    pub status: ParseStatus,
    pub diagram: DiagramRecord,
}

/// Parse SVG bytes.
///
/// `path_hint` is the file the bytes came from; relative references inside
/// the document resolve against its directory. On failure the diagram is
/// empty, callers still get a value to set up from.
pub fn parse(data: &[u8], path_hint: Option<&FilePath>) -> ParseOutput {
    if data.is_empty() {
        return ParseOutput {
            status: ParseStatus::NotSvg,
            diagram: DiagramRecord::default(),
        };
    }

    let mut options = Options::default();
    options.resources_dir = path_hint.and_then(|p| p.parent()).map(|p| p.to_path_buf());

    match Tree::from_data(data, &options) {
        Ok(tree) => {
            let mut diagram = tree_to_diagram(&tree);
            diagram.shapes.extend(text_records(data));
            ParseOutput {
                status: ParseStatus::Ok,
                diagram,
            }
        }
        Err(err) => ParseOutput {
            status: classify_error(err),
            diagram: DiagramRecord::default(),
        },
    }
}

fn classify_error(err: usvg::Error) -> ParseStatus {
    match err {
        usvg::Error::ElementsLimitReached => ParseStatus::OutOfMemory,
        usvg::Error::NotAnUtf8Str | usvg::Error::MalformedGZip => {
            ParseStatus::XmlError(err.to_string())
        }
        usvg::Error::InvalidSize => ParseStatus::NotSvg,
        usvg::Error::ParsingFailed(xml) => ParseStatus::SvgError {
            line: xml.pos().row,
            message: xml.to_string(),
        },
    }
}

/// Flatten a parsed tree into a diagram record
pub fn tree_to_diagram(tree: &Tree) -> DiagramRecord {
    let size = tree.size();
    let mut diagram = DiagramRecord::new(size.width(), size.height());
    let root = tree.root();
    collect_shapes(root, root.opacity().get(), &mut diagram.shapes);
    diagram
}

/// `opacity` is the product of every enclosing group's opacity. usvg turns
/// an element's own `opacity` into a wrapping group.
fn collect_shapes(group: &usvg::Group, opacity: f32, shapes: &mut Vec<ShapeRecord>) {
    for child in group.children() {
        match child {
            usvg::Node::Group(g) => collect_shapes(g, opacity * g.opacity().get(), shapes),
            usvg::Node::Path(p) => {
                if let Some(record) = path_to_record(p, opacity) {
                    shapes.push(record);
                }
            }
            // Collected from the source XML by text_records
            usvg::Node::Text(_) => {}
            usvg::Node::Image(image) => {
                tracing::debug!(id = image.id(), "image node skipped");
            }
        }
    }
}

fn path_to_record(path: &usvg::Path, group_opacity: f32) -> Option<ShapeRecord> {
    let transform = path.abs_transform();
    let data = if transform.is_identity() {
        path.data().clone()
    } else {
        match path.data().clone().transform(transform) {
            Some(data) => data,
            None => {
                tracing::debug!(id = path.id(), "path collapsed under its transform, skipped");
                return None;
            }
        }
    };

    let (fill, fill_opacity) = fill_to_packed(path.fill());
    let (stroke, stroke_width) = stroke_to_packed(path.stroke());
    // Mean scale factor of the transform
    let scale = (transform.sx * transform.sy - transform.kx * transform.ky)
        .abs()
        .sqrt();

    Some(ShapeRecord {
        fill,
        stroke,
        stroke_width: stroke_width * scale,
        opacity: fill_opacity * group_opacity,
        geometry: crate::record::ShapeGeometry::Path(encode_segments(&data).into_vec()),
    })
}

/// One text record per `<text>` element outside `<defs>`.
///
/// usvg drops text it cannot lay out with the fonts it was given, so these
/// are read from the XML itself. The anchor is the element's first `x`/`y`
/// value, untransformed.
fn text_records(data: &[u8]) -> Vec<ShapeRecord> {
    let decompressed;
    let data = if data.starts_with(&[0x1f, 0x8b]) {
        match usvg::decompress_svgz(data) {
            Ok(bytes) => {
                decompressed = bytes;
                decompressed.as_slice()
            }
            Err(_) => return Vec::new(),
        }
    } else {
        data
    };

    let Ok(xml) = std::str::from_utf8(data) else {
        return Vec::new();
    };
    let options = roxmltree::ParsingOptions {
        allow_dtd: true,
        ..Default::default()
    };
    let Ok(doc) = roxmltree::Document::parse_with_options(xml, options) else {
        return Vec::new();
    };

    doc.descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "text")
        .filter(|n| !n.ancestors().any(|a| a.tag_name().name() == "defs"))
        .map(|n| {
            let content = n
                .descendants()
                .filter(|c| c.is_text())
                .filter_map(|c| c.text())
                .flat_map(str::split_whitespace)
                .collect::<Vec<_>>()
                .join(" ");
            ShapeRecord::text(
                content,
                first_coordinate(n.attribute("x")),
                first_coordinate(n.attribute("y")),
            )
        })
        .collect()
}

/// First number of a coordinate list attribute, 0 when absent
fn first_coordinate(value: Option<&str>) -> f32 {
    value
        .and_then(|v| {
            v.split(|c: char| c.is_whitespace() || c == ',')
                .find(|s| !s.is_empty())
        })
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.0)
}

/// Encode path segments as a command stream. Quadratic segments are raised
/// to cubics.
fn encode_segments(data: &usvg::tiny_skia_path::Path) -> CommandStream {
    let mut stream = CommandStream::new();
    let mut start = Point::zero();
    let mut last = Point::zero();

    for segment in data.segments() {
        match segment {
            PathSegment::MoveTo(p) => {
                stream = stream.move_to(p.x, p.y);
                start = p;
                last = p;
            }
            PathSegment::LineTo(p) => {
                stream = stream.line_to(p.x, p.y);
                last = p;
            }
            PathSegment::QuadTo(c, e) => {
                let c1 = Point::from_xy(
                    last.x + 2.0 / 3.0 * (c.x - last.x),
                    last.y + 2.0 / 3.0 * (c.y - last.y),
                );
                let c2 = Point::from_xy(
                    e.x + 2.0 / 3.0 * (c.x - e.x),
                    e.y + 2.0 / 3.0 * (c.y - e.y),
                );
                stream = stream.bezier_to(c1.x, c1.y, c2.x, c2.y, e.x, e.y);
                last = e;
            }
            PathSegment::CubicTo(c1, c2, e) => {
                stream = stream.bezier_to(c1.x, c1.y, c2.x, c2.y, e.x, e.y);
                last = e;
            }
            PathSegment::Close => {
                stream = stream.close();
                last = start;
            }
        }
    }

    stream
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ShapeGeometry;

    #[test]
    fn test_parse_simple_svg() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" width="100" height="80">
                <rect x="10" y="10" width="80" height="60" fill="red"/>
            </svg>
        "#;

        let output = parse(svg.as_bytes(), None);
        assert!(output.status.is_ok());
        assert_eq!(output.diagram.width, 100.0);
        assert_eq!(output.diagram.height, 80.0);
        assert_eq!(output.diagram.shapes.len(), 1);

        let shape = &output.diagram.shapes[0];
        assert_eq!(shape.fill, Some(0xFF0000));
        assert_eq!(shape.stroke, None);
        assert_eq!(shape.opacity, 1.0);
        let stream = shape.commands().unwrap();
        assert_eq!(stream[..3], [0.0, 10.0, 10.0]);
        assert_eq!(*stream.last().unwrap(), 1.0);
    }

    #[test]
    fn test_parse_stroke_and_opacity() {
        let svg = r##"
            <svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
                <path d="M10,10 L90,10 L90,90 Z" fill="blue" fill-opacity="0.5"
                      stroke="#00ff00" stroke-width="4"/>
            </svg>
        "##;

        let output = parse(svg.as_bytes(), None);
        let shape = &output.diagram.shapes[0];
        assert_eq!(shape.fill, Some(0x0000FF));
        assert_eq!(shape.stroke, Some(0x00FF00));
        assert_eq!(shape.stroke_width, 4.0);
        assert_eq!(shape.opacity, 0.5);
    }

    #[test]
    fn test_parse_applies_group_transform() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
                <g transform="translate(20 30) scale(2)">
                    <path d="M0,0 L5,0 L5,5 Z" fill="black" stroke="black" stroke-width="1"/>
                </g>
            </svg>
        "#;

        let output = parse(svg.as_bytes(), None);
        let shape = &output.diagram.shapes[0];
        let stream = shape.commands().unwrap();
        assert_eq!(stream[..6], [0.0, 20.0, 30.0, 2.0, 30.0, 30.0]);
        assert!((shape.stroke_width - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_parse_quad_becomes_bezier() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
                <path d="M0,0 Q30,60 60,0" fill="none" stroke="black"/>
            </svg>
        "#;

        let output = parse(svg.as_bytes(), None);
        let stream = output.diagram.shapes[0].commands().unwrap();
        assert_eq!(stream.len(), 3 + 7);
        assert_eq!(stream[3], 3.0);
        assert!((stream[4] - 20.0).abs() < 1e-4);
        assert!((stream[5] - 40.0).abs() < 1e-4);
        assert!((stream[6] - 40.0).abs() < 1e-4);
        assert!((stream[7] - 40.0).abs() < 1e-4);
        assert_eq!(stream[8..], [60.0, 0.0]);
    }

    #[test]
    fn test_fill_none_is_transparent() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
                <path d="M1 1 L9 9" fill="none" stroke="red"/>
            </svg>
        "#;

        let output = parse(svg.as_bytes(), None);
        assert_eq!(output.diagram.shapes[0].fill, None);
        assert!(matches!(
            output.diagram.shapes[0].geometry,
            ShapeGeometry::Path(_)
        ));
    }

    #[test]
    fn test_element_and_group_opacity() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" width="40" height="40">
                <rect x="0" y="0" width="10" height="10" fill="red" opacity="0.5"/>
                <g opacity="0.5">
                    <rect x="10" y="10" width="10" height="10" fill="blue" fill-opacity="0.5"/>
                    <g opacity="0.5">
                        <rect x="20" y="20" width="10" height="10" fill="green"/>
                    </g>
                </g>
            </svg>
        "#;

        let output = parse(svg.as_bytes(), None);
        let opacities: Vec<f32> = output.diagram.shapes.iter().map(|s| s.opacity).collect();
        assert_eq!(opacities.len(), 3);
        assert!((opacities[0] - 0.5).abs() < 1e-6);
        assert!((opacities[1] - 0.25).abs() < 1e-6);
        assert!((opacities[2] - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_text_elements_become_text_records() {
        let svg = r#"
            <svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
                <defs>
                    <text id="template">unused</text>
                </defs>
                <text x="10 12" y="20">Hello <tspan font-weight="bold">world</tspan></text>
                <rect x="0" y="0" width="10" height="10" fill="red"/>
            </svg>
        "#;

        let output = parse(svg.as_bytes(), None);
        assert!(output.status.is_ok());
        assert_eq!(output.diagram.shapes.len(), 2);
        assert!(matches!(
            output.diagram.shapes[0].geometry,
            ShapeGeometry::Path(_)
        ));
        assert_eq!(
            output.diagram.shapes[1].geometry,
            ShapeGeometry::Text {
                content: "Hello world".into(),
                x: 10.0,
                y: 20.0,
            }
        );
    }

    #[test]
    fn test_first_coordinate() {
        assert_eq!(first_coordinate(Some("4.5, 6")), 4.5);
        assert_eq!(first_coordinate(Some("  ")), 0.0);
        assert_eq!(first_coordinate(None), 0.0);
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let svg = "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"10\" height=\"10\">\n<rect>\n</svg>";

        let output = parse(svg.as_bytes(), None);
        match output.status {
            ParseStatus::SvgError { line, ref message } => {
                assert!(line >= 2, "line was {line}");
                assert!(!message.is_empty());
            }
            other => panic!("expected a syntax error, got {other:?}"),
        }
        assert!(output.diagram.shapes.is_empty());
    }

    #[test]
    fn test_empty_input_is_not_svg() {
        let output = parse(b"", None);
        assert_eq!(output.status, ParseStatus::NotSvg);
        assert!(output.status.clone().into_result().is_err());
    }

    #[test]
    fn test_status_display() {
        let status = ParseStatus::SvgError {
            line: 3,
            message: "unexpected end".into(),
        };
        assert_eq!(status.to_string(), "SVG error: line 3: unexpected end");
        assert_eq!(ParseStatus::NotSvg.to_string(), "not an SVG document");
        assert!(ParseStatus::Ok.into_result().is_ok());
    }
}
