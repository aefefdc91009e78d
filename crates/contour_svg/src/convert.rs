//! Shape record conversion to styled paths

use contour_core::{color::unit_to_channel, Color, FillRule, Path, PathBuilder, Rect};

use crate::record::{PathTag, ShapeGeometry, ShapeRecord};
use crate::shape::ShapePath;

/// Build a styled path from a shape record and measure it.
///
/// Text records carry no geometry here: the path comes back styled but empty,
/// with a degenerate bounding box. The returned box is the union of every sub-path's
/// bounds; a zero-area box means the shape contributes nothing to a document
/// bounding box.
pub fn convert_shape(record: &ShapeRecord) -> (ShapePath, Rect) {
    let mut path = ShapePath::new();

    if let Some(fill) = record.fill {
        path.set_filled(true);
        path.set_fill_color(Color::from_hex(fill).with_alpha(unit_to_channel(record.opacity)));
        path.set_fill_rule(FillRule::EvenOdd);
    }

    if let Some(stroke) = record.stroke {
        path.set_stroked(true);
        path.set_stroke_width(record.stroke_width);
        path.set_stroke_color(Color::from_hex(stroke));
    }

    if let ShapeGeometry::Path(stream) = &record.geometry {
        path.set_geometry(stream_to_path(stream));
    }

    let bounds = path.bounds();
    (path, bounds)
}

/// Walk a flat command stream into path geometry.
///
/// Unknown tags are logged and skipped one slot at a time, so the commands
/// after them survive. A command whose operands run past the end of the
/// stream ends the walk.
pub fn stream_to_path(stream: &[f32]) -> Path {
    let mut builder = PathBuilder::new();
    let mut i = 0;

    while i < stream.len() {
        let Some(tag) = PathTag::from_value(stream[i]) else {
            tracing::error!(
                offset = i,
                "convert_shape(): unknown path command {}, skipping one slot",
                stream[i]
            );
            i += 1;
            continue;
        };

        let Some(ops) = stream.get(i + 1..i + tag.stride()) else {
            tracing::error!(
                offset = i,
                "convert_shape(): {:?} command truncated ({} of {} operands)",
                tag,
                stream.len() - i - 1,
                tag.stride() - 1
            );
            break;
        };

        match tag {
            PathTag::Move => builder.move_to(ops[0], ops[1]),
            PathTag::Line => builder.line_to(ops[0], ops[1]),
            PathTag::Bezier => builder.cubic_to(ops[0], ops[1], ops[2], ops[3], ops[4], ops[5]),
            PathTag::Close => builder.close(),
        }
        i += tag.stride();
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CommandStream;
    use contour_core::{PathCommand, Point};

    fn square() -> CommandStream {
        CommandStream::new()
            .move_to(0.0, 0.0)
            .line_to(10.0, 0.0)
            .line_to(10.0, 10.0)
            .close()
    }

    #[test]
    fn test_empty_stream() {
        let (path, bounds) = convert_shape(&ShapeRecord::path(CommandStream::new()));
        assert_eq!(path.geometry().subpaths().count(), 0);
        assert!(bounds.is_degenerate());
    }

    #[test]
    fn test_filled_square_with_half_opacity() {
        let record = ShapeRecord::path(square())
            .with_fill(0xFF0000)
            .with_opacity(0.5);

        let (path, bounds) = convert_shape(&record);
        assert!(path.is_filled());
        assert_eq!(path.fill_color(), Color::rgba(255, 0, 0, 127));
        assert_eq!(path.fill_rule(), FillRule::EvenOdd);
        assert!(!path.is_stroked());
        assert_eq!(bounds, Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_stroke_keeps_alpha() {
        let record = ShapeRecord::path(square())
            .with_stroke(0x00FF00, 3.0)
            .with_opacity(0.25);

        let (path, _) = convert_shape(&record);
        assert!(!path.is_filled());
        assert!(path.is_stroked());
        assert_eq!(path.stroke_width(), 3.0);
        assert_eq!(path.stroke_color(), Color::rgba(0, 255, 0, 255));
    }

    #[test]
    fn test_unknown_tag_skips_one_slot() {
        let stream = CommandStream::new()
            .move_to(0.0, 0.0)
            .raw(9.0)
            .line_to(10.0, 0.0)
            .line_to(10.0, 10.0)
            .close();

        let (path, bounds) = convert_shape(&ShapeRecord::path(stream));
        assert_eq!(
            path.geometry().commands(),
            &[
                PathCommand::MoveTo(Point::new(0.0, 0.0)),
                PathCommand::LineTo(Point::new(10.0, 0.0)),
                PathCommand::LineTo(Point::new(10.0, 10.0)),
                PathCommand::Close,
            ]
        );
        assert_eq!(bounds, Rect::new(0.0, 0.0, 10.0, 10.0));
    }

    #[test]
    fn test_unknown_tag_can_realign_on_operands() {
        // After skipping the bad slot the walker reads 2.0 as a LINE tag.
        let stream = CommandStream::new()
            .raw(7.5)
            .raw(2.0)
            .raw(4.0)
            .raw(6.0)
            .into_vec();

        let path = stream_to_path(&stream);
        assert_eq!(
            path.commands(),
            &[
                PathCommand::MoveTo(Point::ZERO),
                PathCommand::LineTo(Point::new(4.0, 6.0)),
            ]
        );
    }

    #[test]
    fn test_truncated_command_keeps_prefix() {
        let stream = CommandStream::new()
            .move_to(1.0, 1.0)
            .line_to(5.0, 5.0)
            .raw(PathTag::Bezier.value())
            .raw(2.0)
            .into_vec();

        let path = stream_to_path(&stream);
        assert_eq!(path.commands().len(), 2);
        assert_eq!(path.bounds(), Rect::new(1.0, 1.0, 4.0, 4.0));
    }

    #[test]
    fn test_bezier_and_multiple_subpaths() {
        let stream = CommandStream::new()
            .move_to(0.0, 0.0)
            .bezier_to(0.0, 10.0, 10.0, 10.0, 10.0, 0.0)
            .close()
            .move_to(20.0, 20.0)
            .line_to(30.0, 25.0);

        let (path, bounds) = convert_shape(&ShapeRecord::path(stream));
        assert_eq!(path.geometry().subpaths().count(), 2);
        assert_eq!(bounds.x(), 0.0);
        assert_eq!(bounds.y(), 0.0);
        assert_eq!(bounds.max_x(), 30.0);
        assert_eq!(bounds.max_y(), 25.0);
    }

    #[test]
    fn test_text_record_has_no_geometry() {
        let record = ShapeRecord::text("label", 5.0, 5.0).with_fill(0x000000);
        let (path, bounds) = convert_shape(&record);
        assert!(path.geometry().is_empty());
        assert!(bounds.is_degenerate());
    }
}
