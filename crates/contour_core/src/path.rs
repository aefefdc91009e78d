//! Vector paths
//!
//! A [`Path`] is a flat list of [`PathCommand`]s. Every `MoveTo` starts a new
//! [`SubPath`]; bounds are measured per sub-path and merged.

use crate::geometry::{Point, Rect};

/// Path command for building vector paths
#[derive(Clone, Debug, PartialEq)]
pub enum PathCommand {
    /// Move to a point, starting a new sub-path
    MoveTo(Point),
    /// Line to a point
    LineTo(Point),
    /// Cubic Bézier curve
    CubicTo {
        control1: Point,
        control2: Point,
        end: Point,
    },
    /// Close the current sub-path
    Close,
}

/// A vector path
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    /// Create a new empty path
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Create a path from a vector of commands
    pub fn from_commands(commands: Vec<PathCommand>) -> Self {
        Self { commands }
    }

    /// Move to a point
    pub fn move_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::MoveTo(Point::new(x, y)));
        self
    }

    /// Line to a point
    pub fn line_to(mut self, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::LineTo(Point::new(x, y)));
        self
    }

    /// Cubic Bézier curve
    pub fn cubic_to(mut self, cx1: f32, cy1: f32, cx2: f32, cy2: f32, x: f32, y: f32) -> Self {
        self.commands.push(PathCommand::CubicTo {
            control1: Point::new(cx1, cy1),
            control2: Point::new(cx2, cy2),
            end: Point::new(x, y),
        });
        self
    }

    /// Close the path
    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Create a rectangle path
    pub fn rect(rect: Rect) -> Self {
        Self::new()
            .move_to(rect.x(), rect.y())
            .line_to(rect.max_x(), rect.y())
            .line_to(rect.max_x(), rect.max_y())
            .line_to(rect.x(), rect.max_y())
            .close()
    }

    /// Get the path commands
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Check if the path is empty
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Iterate over the sub-paths, split at every `MoveTo`
    pub fn subpaths(&self) -> SubPaths<'_> {
        SubPaths {
            commands: &self.commands,
        }
    }

    /// Bounding box of the whole path: the union of every sub-path's bounds.
    ///
    /// Returns [`Rect::ZERO`] for an empty path.
    pub fn bounds(&self) -> Rect {
        let mut subpaths = self.subpaths();
        let Some(first) = subpaths.next() else {
            return Rect::ZERO;
        };
        subpaths.fold(first.bounds(), |acc, sub| acc.union(&sub.bounds()))
    }
}

/// A contiguous run of commands starting at a `MoveTo`
#[derive(Clone, Copy, Debug)]
pub struct SubPath<'a> {
    commands: &'a [PathCommand],
}

impl<'a> SubPath<'a> {
    pub fn commands(&self) -> &'a [PathCommand] {
        self.commands
    }

    /// Point the sub-path starts at. Sub-paths without a leading `MoveTo`
    /// start at the origin.
    pub fn start(&self) -> Point {
        match self.commands.first() {
            Some(PathCommand::MoveTo(p)) => *p,
            _ => Point::ZERO,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }

    /// Tight bounding box. Curves contribute their extrema, not their
    /// control points.
    pub fn bounds(&self) -> Rect {
        let start = self.start();
        let mut bounds = Rect::from_points(start, start);
        let mut current = start;

        for cmd in self.commands {
            match cmd {
                PathCommand::MoveTo(p) | PathCommand::LineTo(p) => {
                    bounds = bounds.expand_to_include(*p);
                    current = *p;
                }
                PathCommand::CubicTo {
                    control1,
                    control2,
                    end,
                } => {
                    for t in cubic_extrema(current, *control1, *control2, *end) {
                        bounds = bounds.expand_to_include(cubic_point(
                            current, *control1, *control2, *end, t,
                        ));
                    }
                    bounds = bounds.expand_to_include(*end);
                    current = *end;
                }
                PathCommand::Close => current = start,
            }
        }

        bounds
    }
}

/// Iterator over the sub-paths of a [`Path`]
pub struct SubPaths<'a> {
    commands: &'a [PathCommand],
}

impl<'a> Iterator for SubPaths<'a> {
    type Item = SubPath<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.commands.is_empty() {
            return None;
        }
        let end = self.commands[1..]
            .iter()
            .position(|cmd| matches!(cmd, PathCommand::MoveTo(_)))
            .map_or(self.commands.len(), |i| i + 1);
        let (head, rest) = self.commands.split_at(end);
        self.commands = rest;
        Some(SubPath { commands: head })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Path Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Incremental path construction with a pen position
///
/// Unlike the chainable methods on [`Path`], the builder keeps track of the
/// open sub-path: drawing after a `close` (or before any `move_to`) starts a
/// new sub-path at the current pen position.
#[derive(Debug, Default)]
pub struct PathBuilder {
    commands: Vec<PathCommand>,
    current: Point,
    start: Point,
    open: bool,
}

impl PathBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        let p = Point::new(x, y);
        self.commands.push(PathCommand::MoveTo(p));
        self.current = p;
        self.start = p;
        self.open = true;
    }

    pub fn line_to(&mut self, x: f32, y: f32) {
        self.ensure_open();
        let p = Point::new(x, y);
        self.commands.push(PathCommand::LineTo(p));
        self.current = p;
    }

    pub fn cubic_to(&mut self, c1x: f32, c1y: f32, c2x: f32, c2y: f32, x: f32, y: f32) {
        self.ensure_open();
        let end = Point::new(x, y);
        self.commands.push(PathCommand::CubicTo {
            control1: Point::new(c1x, c1y),
            control2: Point::new(c2x, c2y),
            end,
        });
        self.current = end;
    }

    pub fn close(&mut self) {
        if !self.open {
            tracing::trace!("close() with no open sub-path ignored");
            return;
        }
        self.commands.push(PathCommand::Close);
        self.current = self.start;
        self.open = false;
    }

    /// Get the current pen position
    pub fn current_position(&self) -> Point {
        self.current
    }

    pub fn build(self) -> Path {
        Path::from_commands(self.commands)
    }

    fn ensure_open(&mut self) {
        if !self.open {
            let p = self.current;
            self.move_to(p.x, p.y);
        }
    }
}

/// Parameters in (0, 1) where a cubic's derivative vanishes on either axis.
fn cubic_extrema(p0: Point, p1: Point, p2: Point, p3: Point) -> Vec<f32> {
    let mut ts = Vec::with_capacity(4);
    for (a0, a1, a2, a3) in [(p0.x, p1.x, p2.x, p3.x), (p0.y, p1.y, p2.y, p3.y)] {
        // B'(t) / 3 = a t^2 + b t + c
        let a = -a0 + 3.0 * a1 - 3.0 * a2 + a3;
        let b = 2.0 * (a0 - 2.0 * a1 + a2);
        let c = a1 - a0;

        if a.abs() < f32::EPSILON {
            if b.abs() > f32::EPSILON {
                ts.push(-c / b);
            }
            continue;
        }

        let disc = b * b - 4.0 * a * c;
        if disc < 0.0 {
            continue;
        }
        let sq = disc.sqrt();
        ts.push((-b + sq) / (2.0 * a));
        ts.push((-b - sq) / (2.0 * a));
    }
    ts.retain(|t| *t > 0.0 && *t < 1.0);
    ts
}

fn cubic_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f32) -> Point {
    let mt = 1.0 - t;
    let w0 = mt * mt * mt;
    let w1 = 3.0 * mt * mt * t;
    let w2 = 3.0 * mt * t * t;
    let w3 = t * t * t;
    Point::new(
        w0 * p0.x + w1 * p1.x + w2 * p2.x + w3 * p3.x,
        w0 * p0.y + w1 * p1.y + w2 * p2.y + w3 * p3.y,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_shortcuts() {
        let rect = Path::rect(Rect::new(0.0, 0.0, 100.0, 50.0));
        assert_eq!(rect.commands().len(), 5); // move + 3 lines + close
        assert_eq!(rect.bounds(), Rect::new(0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn test_empty_path_bounds() {
        let path = Path::new();
        assert!(path.is_empty());
        assert_eq!(path.subpaths().count(), 0);
        assert!(path.bounds().is_degenerate());
    }

    #[test]
    fn test_subpaths_split_at_move() {
        let path = Path::new()
            .move_to(0.0, 0.0)
            .line_to(1.0, 0.0)
            .close()
            .move_to(5.0, 5.0)
            .line_to(6.0, 6.0);

        let subs: Vec<_> = path.subpaths().collect();
        assert_eq!(subs.len(), 2);
        assert!(subs[0].is_closed());
        assert!(!subs[1].is_closed());
        assert_eq!(subs[1].start(), Point::new(5.0, 5.0));
        assert_eq!(path.bounds(), Rect::new(0.0, 0.0, 6.0, 6.0));
    }

    #[test]
    fn test_cubic_bounds_are_tight() {
        // Control points stick out to y = 10, the curve itself peaks at y = 7.5
        let path = Path::new()
            .move_to(0.0, 0.0)
            .cubic_to(0.0, 10.0, 10.0, 10.0, 10.0, 0.0);
        let b = path.bounds();
        assert_eq!(b.x(), 0.0);
        assert_eq!(b.width(), 10.0);
        assert!((b.height() - 7.5).abs() < 1e-4, "height was {}", b.height());
    }

    #[test]
    fn test_builder_implicit_subpath_after_close() {
        let mut builder = PathBuilder::new();
        builder.move_to(2.0, 2.0);
        builder.line_to(4.0, 2.0);
        builder.close();
        assert_eq!(builder.current_position(), Point::new(2.0, 2.0));
        builder.line_to(2.0, 8.0);

        let path = builder.build();
        let subs: Vec<_> = path.subpaths().collect();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[1].start(), Point::new(2.0, 2.0));
        assert_eq!(path.bounds(), Rect::new(2.0, 2.0, 2.0, 6.0));
    }

    #[test]
    fn test_builder_line_without_move_starts_at_origin() {
        let mut builder = PathBuilder::new();
        builder.line_to(3.0, 4.0);
        let path = builder.build();
        assert_eq!(
            path.commands(),
            &[
                PathCommand::MoveTo(Point::ZERO),
                PathCommand::LineTo(Point::new(3.0, 4.0))
            ]
        );
    }

    #[test]
    fn test_builder_ignores_dangling_close() {
        let mut builder = PathBuilder::new();
        builder.close();
        assert!(builder.build().is_empty());
    }
}
