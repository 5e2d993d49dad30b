// Copyright 2026 the Desegno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The reference renderer: a [`Visitor`] that realizes playback events as
//! calls on an abstract drawing surface.

use peniko::kurbo::{Affine, Cap, Join, Point, Rect, Vec2};
use peniko::{Color, Fill};

use crate::visitor::{Visit, Visitor};
use crate::{Drawing, Result, Viewport};

/// An append-only drawing surface.
///
/// This is the capability [`RenderVisitor`] renders through: path
/// construction bracketed by [`begin_path`](Self::begin_path) and
/// [`end_path`](Self::end_path), latched fill and stroke style state, and
/// one composite [`fill_and_stroke`](Self::fill_and_stroke) that applies
/// both paints to the finished path. Methods are infallible from the
/// renderer's point of view; a fallible surface records its own failure
/// and reports it out of band.
pub trait Canvas {
    /// Starts a new, empty path.
    fn begin_path(&mut self);

    /// Starts a new subpath at `to`.
    fn move_to(&mut self, to: Point);

    /// Adds a line from the current point to `to`.
    fn line_to(&mut self, to: Point);

    /// Adds a quadratic Bezier from the current point to `to`.
    fn quad_to(&mut self, control: Point, to: Point);

    /// Adds a cubic Bezier from the current point to `to`.
    fn cubic_to(&mut self, control0: Point, control1: Point, to: Point);

    /// Adds an elliptical arc from the current point to `to`, in the SVG
    /// endpoint parameterization. `rotation` is in radians.
    fn arc_to(&mut self, radii: Vec2, rotation: f64, large_arc: bool, sweep: bool, to: Point);

    /// Closes the current subpath.
    fn close_path(&mut self);

    /// Finishes the path begun by [`begin_path`](Self::begin_path).
    fn end_path(&mut self);

    /// Replaces the transform applied to subsequent geometry.
    fn set_transform(&mut self, transform: Affine);

    /// Sets the fill paint; `None` disables filling.
    fn set_fill_paint(&mut self, color: Option<Color>);

    /// Sets the fill opacity.
    fn set_fill_opacity(&mut self, opacity: f32);

    /// Sets the fill rule.
    fn set_fill_rule(&mut self, rule: Fill);

    /// Sets the stroke paint; `None` disables stroking.
    fn set_stroke_paint(&mut self, color: Option<Color>);

    /// Sets the stroke opacity.
    fn set_stroke_opacity(&mut self, opacity: f32);

    /// Sets the stroke width.
    fn set_stroke_width(&mut self, width: f64);

    /// Sets the stroke line join.
    fn set_stroke_join(&mut self, join: Join);

    /// Sets the stroke line cap.
    fn set_stroke_cap(&mut self, cap: Cap);

    /// Sets the stroke dash pattern; an empty slice disables dashing.
    fn set_stroke_dash_array(&mut self, lengths: &[f32]);

    /// Sets the stroke dash offset.
    fn set_stroke_dash_offset(&mut self, offset: f64);

    /// Sets the stroke miter limit.
    fn set_stroke_miter_limit(&mut self, limit: f64);

    /// Fills and strokes the finished path with the latched style state.
    fn fill_and_stroke(&mut self);
}

/// The control point the previous path segment exposes for smooth
/// continuation.
#[derive(Clone, Copy)]
enum Curve {
    None,
    Cubic(Point),
    Quad(Point),
}

/// The reference [`Visitor`]: renders playback events onto a [`Canvas`].
///
/// The visitor borrows its canvas for the duration of one playback and only
/// ever appends to it. Shape shortcuts are realized as short closed (or for
/// lines and polylines, open) paths, each filled and stroked on the spot;
/// path sub-streams fill and stroke once, when the sub-stream ends.
pub struct RenderVisitor<'c, C: Canvas> {
    canvas: &'c mut C,
    base_transform: Affine,
    paint_is_stroke: bool,
    paint_color: Option<Color>,
    current: Point,
    subpath_start: Point,
    curve: Curve,
}

impl<'c, C: Canvas> RenderVisitor<'c, C> {
    /// Creates a visitor rendering onto `canvas`.
    pub fn new(canvas: &'c mut C) -> Self {
        Self {
            canvas,
            base_transform: Affine::IDENTITY,
            paint_is_stroke: false,
            paint_color: None,
            current: Point::ZERO,
            subpath_start: Point::ZERO,
            curve: Curve::None,
        }
    }

    fn resolve(&self, relative: bool, point: Point) -> Point {
        if relative {
            self.current + point.to_vec2()
        } else {
            point
        }
    }

    fn poly(&mut self, points: &[[f32; 2]], close: bool) -> Visit {
        self.canvas.begin_path();
        let mut points = points
            .iter()
            .map(|p| Point::new(f64::from(p[0]), f64::from(p[1])));
        if let Some(first) = points.next() {
            self.canvas.move_to(first);
            for point in points {
                self.canvas.line_to(point);
            }
            if close {
                self.canvas.close_path();
            }
        }
        self.canvas.end_path();
        self.canvas.fill_and_stroke();
        Visit::Continue
    }
}

/// `control`, mirrored through `origin`.
fn reflect(origin: Point, control: Point) -> Point {
    Point::new(2.0 * origin.x - control.x, 2.0 * origin.y - control.y)
}

impl<C: Canvas> Visitor for RenderVisitor<'_, C> {
    fn start(&mut self, _dest: Rect, transform: Affine, _viewport: Option<&Viewport>) -> Visit {
        self.base_transform = transform;
        self.canvas.set_transform(transform);
        Visit::Continue
    }

    fn finish(&mut self, _success: bool) {}

    fn transform_begin(&mut self) -> Visit {
        Visit::Continue
    }

    fn transform_end(&mut self, transform: Affine) -> Visit {
        self.canvas.set_transform(self.base_transform * transform);
        Visit::Continue
    }

    fn paint_begin(&mut self, is_stroke: bool) -> Visit {
        self.paint_is_stroke = is_stroke;
        self.paint_color = None;
        Visit::Continue
    }

    fn paint_solid_color(&mut self, red: f32, green: f32, blue: f32) -> Visit {
        if self.paint_color.is_none() {
            self.paint_color = Some(Color::rgba(
                f64::from(red),
                f64::from(green),
                f64::from(blue),
                1.0,
            ));
        } else {
            // The grammar admits several colors per paint stream; the first
            // one wins.
            log::warn!("ignoring extra color in paint stream");
        }
        Visit::Continue
    }

    fn paint_end(&mut self) -> Visit {
        if self.paint_is_stroke {
            self.canvas.set_stroke_paint(self.paint_color);
        } else {
            self.canvas.set_fill_paint(self.paint_color);
        }
        Visit::Continue
    }

    fn fill_opacity(&mut self, opacity: f32) -> Visit {
        self.canvas.set_fill_opacity(opacity);
        Visit::Continue
    }

    fn fill_rule(&mut self, rule: Fill) -> Visit {
        self.canvas.set_fill_rule(rule);
        Visit::Continue
    }

    fn stroke_opacity(&mut self, opacity: f32) -> Visit {
        self.canvas.set_stroke_opacity(opacity);
        Visit::Continue
    }

    fn stroke_width(&mut self, width: f64) -> Visit {
        self.canvas.set_stroke_width(width);
        Visit::Continue
    }

    fn stroke_line_join(&mut self, join: Join) -> Visit {
        self.canvas.set_stroke_join(join);
        Visit::Continue
    }

    fn stroke_line_cap(&mut self, cap: Cap) -> Visit {
        self.canvas.set_stroke_cap(cap);
        Visit::Continue
    }

    fn stroke_dash_array(&mut self, lengths: &[f32]) -> Visit {
        self.canvas.set_stroke_dash_array(lengths);
        Visit::Continue
    }

    fn stroke_dash_offset(&mut self, offset: f64) -> Visit {
        self.canvas.set_stroke_dash_offset(offset);
        Visit::Continue
    }

    fn stroke_miter_limit(&mut self, limit: f64) -> Visit {
        self.canvas.set_stroke_miter_limit(limit);
        Visit::Continue
    }

    fn rectangle(&mut self, rect: Rect) -> Visit {
        self.canvas.begin_path();
        self.canvas.move_to(Point::new(rect.x0, rect.y0));
        self.canvas.line_to(Point::new(rect.x1, rect.y0));
        self.canvas.line_to(Point::new(rect.x1, rect.y1));
        self.canvas.line_to(Point::new(rect.x0, rect.y1));
        self.canvas.close_path();
        self.canvas.end_path();
        self.canvas.fill_and_stroke();
        Visit::Continue
    }

    fn circle(&mut self, center: Point, radius: f64) -> Visit {
        self.ellipse(center, Vec2::new(radius, radius))
    }

    fn ellipse(&mut self, center: Point, radii: Vec2) -> Visit {
        // Two half arcs, east to west and back.
        let east = center + Vec2::new(radii.x, 0.0);
        let west = center - Vec2::new(radii.x, 0.0);
        self.canvas.begin_path();
        self.canvas.move_to(east);
        self.canvas.arc_to(radii, 0.0, false, true, west);
        self.canvas.arc_to(radii, 0.0, false, true, east);
        self.canvas.close_path();
        self.canvas.end_path();
        self.canvas.fill_and_stroke();
        Visit::Continue
    }

    fn line(&mut self, from: Point, to: Point) -> Visit {
        self.canvas.begin_path();
        self.canvas.move_to(from);
        self.canvas.line_to(to);
        self.canvas.end_path();
        self.canvas.fill_and_stroke();
        Visit::Continue
    }

    fn polyline(&mut self, points: &[[f32; 2]]) -> Visit {
        self.poly(points, false)
    }

    fn polygon(&mut self, points: &[[f32; 2]]) -> Visit {
        self.poly(points, true)
    }

    fn path_begin(&mut self) -> Visit {
        self.canvas.begin_path();
        self.current = Point::ZERO;
        self.subpath_start = Point::ZERO;
        self.curve = Curve::None;
        Visit::Continue
    }

    fn path_move_to(&mut self, relative: bool, to: Point) -> Visit {
        let to = self.resolve(relative, to);
        self.canvas.move_to(to);
        self.current = to;
        self.subpath_start = to;
        self.curve = Curve::None;
        Visit::Continue
    }

    fn path_line_to(&mut self, relative: bool, to: Point) -> Visit {
        let to = self.resolve(relative, to);
        self.canvas.line_to(to);
        self.current = to;
        self.curve = Curve::None;
        Visit::Continue
    }

    fn path_horizontal_to(&mut self, relative: bool, x: f64) -> Visit {
        let x = if relative { self.current.x + x } else { x };
        self.path_line_to(false, Point::new(x, self.current.y))
    }

    fn path_vertical_to(&mut self, relative: bool, y: f64) -> Visit {
        let y = if relative { self.current.y + y } else { y };
        self.path_line_to(false, Point::new(self.current.x, y))
    }

    fn path_cubic_to(
        &mut self,
        relative: bool,
        control0: Point,
        control1: Point,
        to: Point,
    ) -> Visit {
        let control0 = self.resolve(relative, control0);
        let control1 = self.resolve(relative, control1);
        let to = self.resolve(relative, to);
        self.canvas.cubic_to(control0, control1, to);
        self.current = to;
        self.curve = Curve::Cubic(control1);
        Visit::Continue
    }

    fn path_smooth_cubic_to(&mut self, relative: bool, control1: Point, to: Point) -> Visit {
        let control0 = match self.curve {
            Curve::Cubic(control) => reflect(self.current, control),
            _ => self.current,
        };
        let control1 = self.resolve(relative, control1);
        let to = self.resolve(relative, to);
        self.canvas.cubic_to(control0, control1, to);
        self.current = to;
        self.curve = Curve::Cubic(control1);
        Visit::Continue
    }

    fn path_quadratic_to(&mut self, relative: bool, control: Point, to: Point) -> Visit {
        let control = self.resolve(relative, control);
        let to = self.resolve(relative, to);
        self.canvas.quad_to(control, to);
        self.current = to;
        self.curve = Curve::Quad(control);
        Visit::Continue
    }

    fn path_smooth_quadratic_to(&mut self, relative: bool, to: Point) -> Visit {
        let control = match self.curve {
            Curve::Quad(control) => reflect(self.current, control),
            _ => self.current,
        };
        let to = self.resolve(relative, to);
        self.canvas.quad_to(control, to);
        self.current = to;
        self.curve = Curve::Quad(control);
        Visit::Continue
    }

    fn path_arc_to(
        &mut self,
        relative: bool,
        reflex: bool,
        reverse: bool,
        radii: Vec2,
        rotation: f64,
        to: Point,
    ) -> Visit {
        let to = self.resolve(relative, to);
        self.canvas
            .arc_to(radii, rotation.to_radians(), reflex, reverse, to);
        self.current = to;
        self.curve = Curve::None;
        Visit::Continue
    }

    fn path_close(&mut self) -> Visit {
        self.canvas.close_path();
        self.current = self.subpath_start;
        self.curve = Curve::None;
        Visit::Continue
    }

    fn path_bearing(&mut self, _angle: f64) -> Visit {
        Visit::Continue
    }

    fn path_end(&mut self) -> Visit {
        self.canvas.end_path();
        self.canvas.fill_and_stroke();
        Visit::Continue
    }
}

impl Drawing<'_> {
    /// Renders this drawing onto `canvas`, fitted to `dest`.
    ///
    /// Equivalent to [`execute`](Self::execute) with a fresh
    /// [`RenderVisitor`].
    pub fn render<C: Canvas>(&self, canvas: &mut C, dest: Rect) -> Result<()> {
        let mut visitor = RenderVisitor::new(canvas);
        self.execute(&mut visitor, dest)
    }
}

/// Decodes `data` and renders it onto `canvas`, fitted to `dest`.
pub fn render_drawing<C: Canvas>(canvas: &mut C, data: &[u8], dest: Rect) -> Result<()> {
    Drawing::decode(data)?.render(canvas, dest)
}
