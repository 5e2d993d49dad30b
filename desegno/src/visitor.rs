// Copyright 2026 the Desegno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The playback event interface.
//!
//! The engine walks a drawing's opcode stream and reports each operation to
//! a [`Visitor`] in wire order. Implementations interpret the events
//! however they like: rasterizing, measuring, transcoding, or just
//! recording.

use peniko::kurbo::{Affine, Cap, Join, Point, Rect, Vec2};
use peniko::Fill;

use crate::Viewport;

/// A visitor's verdict after each event.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[must_use = "a stop request is lost unless the engine observes it"]
pub enum Visit {
    /// Keep playing.
    Continue,
    /// Stop playback. The engine reports
    /// [`Cancelled`](crate::Error::Cancelled) and still delivers
    /// [`Visitor::finish`].
    Stop,
}

/// Receives a drawing's operations during playback.
///
/// Events arrive in the order the drawing encodes them. [`start`] is always
/// the first event; once it has fired, [`finish`] fires exactly once no
/// matter how playback ends. Any event other than `finish` may return
/// [`Visit::Stop`] to abandon the rest of the drawing.
///
/// Coordinates are in drawing space. The affine passed to [`start`] maps
/// drawing space onto the destination rectangle; the affine passed to each
/// [`transform_end`] is in drawing space and replaces (not composes with)
/// any earlier transform sub-stream.
///
/// [`start`]: Self::start
/// [`finish`]: Self::finish
/// [`transform_end`]: Self::transform_end
pub trait Visitor {
    /// Playback is beginning. `transform` maps drawing coordinates onto
    /// `dest`; `viewport` is the drawing's declared view box, if any.
    fn start(&mut self, dest: Rect, transform: Affine, viewport: Option<&Viewport>) -> Visit;

    /// Playback is over. `success` is false when playback stopped early,
    /// whether from malformed data or a [`Visit::Stop`].
    fn finish(&mut self, success: bool);

    /// A transform sub-stream is opening.
    fn transform_begin(&mut self) -> Visit;

    /// A transform sub-stream closed; `transform` is the concatenation of
    /// every matrix in the sub-stream, in drawing space. Renderers compose
    /// it onto the mapping passed to [`start`](Self::start).
    fn transform_end(&mut self, transform: Affine) -> Visit;

    /// A paint sub-stream is opening for the fill (`is_stroke` false) or
    /// stroke (`is_stroke` true) paint.
    fn paint_begin(&mut self, is_stroke: bool) -> Visit;

    /// A solid color in the open paint sub-stream, with unit-interval
    /// channels and full opacity.
    fn paint_solid_color(&mut self, red: f32, green: f32, blue: f32) -> Visit;

    /// The open paint sub-stream closed.
    fn paint_end(&mut self) -> Visit;

    /// The fill opacity changed.
    fn fill_opacity(&mut self, opacity: f32) -> Visit;

    /// The fill rule changed.
    fn fill_rule(&mut self, rule: Fill) -> Visit;

    /// The stroke opacity changed.
    fn stroke_opacity(&mut self, opacity: f32) -> Visit;

    /// The stroke width changed.
    fn stroke_width(&mut self, width: f64) -> Visit;

    /// The stroke line join changed.
    fn stroke_line_join(&mut self, join: Join) -> Visit;

    /// The stroke line cap changed.
    fn stroke_line_cap(&mut self, cap: Cap) -> Visit;

    /// The stroke dash pattern changed. An empty slice turns dashing off.
    fn stroke_dash_array(&mut self, lengths: &[f32]) -> Visit;

    /// The stroke dash offset changed.
    fn stroke_dash_offset(&mut self, offset: f64) -> Visit;

    /// The stroke miter limit changed.
    fn stroke_miter_limit(&mut self, limit: f64) -> Visit;

    /// An axis-aligned rectangle.
    fn rectangle(&mut self, rect: Rect) -> Visit;

    /// A circle with the given center and radius.
    fn circle(&mut self, center: Point, radius: f64) -> Visit;

    /// An axis-aligned ellipse with the given center and radii.
    fn ellipse(&mut self, center: Point, radii: Vec2) -> Visit;

    /// A line segment.
    fn line(&mut self, from: Point, to: Point) -> Visit;

    /// An open polyline through the given points.
    fn polyline(&mut self, points: &[[f32; 2]]) -> Visit;

    /// A closed polygon through the given points.
    fn polygon(&mut self, points: &[[f32; 2]]) -> Visit;

    /// A path sub-stream is opening.
    fn path_begin(&mut self) -> Visit;

    /// Start a new subpath at `to`.
    fn path_move_to(&mut self, relative: bool, to: Point) -> Visit;

    /// A line to `to`.
    fn path_line_to(&mut self, relative: bool, to: Point) -> Visit;

    /// A horizontal line to the given x coordinate (or x offset when
    /// relative).
    fn path_horizontal_to(&mut self, relative: bool, x: f64) -> Visit;

    /// A vertical line to the given y coordinate (or y offset when
    /// relative).
    fn path_vertical_to(&mut self, relative: bool, y: f64) -> Visit;

    /// A cubic Bezier with control points `control0` and `control1`.
    fn path_cubic_to(&mut self, relative: bool, control0: Point, control1: Point, to: Point)
        -> Visit;

    /// A cubic Bezier whose first control point is the reflection of the
    /// previous cubic's second control point.
    fn path_smooth_cubic_to(&mut self, relative: bool, control1: Point, to: Point) -> Visit;

    /// A quadratic Bezier with control point `control`.
    fn path_quadratic_to(&mut self, relative: bool, control: Point, to: Point) -> Visit;

    /// A quadratic Bezier whose control point is the reflection of the
    /// previous quadratic's control point.
    fn path_smooth_quadratic_to(&mut self, relative: bool, to: Point) -> Visit;

    /// An elliptical arc to `to`. `radii` are the ellipse semi-axes,
    /// `rotation` its x-axis rotation in degrees; `reflex` selects the
    /// larger sweep and `reverse` the positive-angle direction, as in the
    /// SVG large-arc and sweep flags.
    fn path_arc_to(
        &mut self,
        relative: bool,
        reflex: bool,
        reverse: bool,
        radii: Vec2,
        rotation: f64,
        to: Point,
    ) -> Visit;

    /// Close the current subpath.
    fn path_close(&mut self) -> Visit;

    /// A bearing change of `angle` degrees. Bearings are carried in the
    /// wire format but have no effect on geometry.
    fn path_bearing(&mut self, angle: f64) -> Visit;

    /// The open path sub-stream closed.
    fn path_end(&mut self) -> Visit;
}
