// Copyright 2026 the Desegno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for the integration tests: an encoder for hand-built
//! drawings and a visitor that records every playback event.

// Each test binary compiles its own copy of this module and uses a subset.
#![allow(dead_code)]

use desegno::kurbo::{Affine, Cap, Join, Point, Rect, Vec2};
use desegno::peniko::Fill;
use desegno::{
    Opcode, PathOpcode, Viewport, Visit, Visitor, COUNT_CONTINUATION_BIT, COUNT_VALUE_MASK,
    FLAG_HAS_HEIGHT, FLAG_HAS_VIEWPORT, FLAG_HAS_WIDTH, MAGIC, VERSION,
};

/// Assembles encoded drawings field by field.
///
/// Header fields keep their wire order (width, height, view box, aspect)
/// regardless of call order; body scalars and opcodes append in call order
/// after them.
#[derive(Default)]
pub struct DrawingBuilder {
    flags: u32,
    header_scalars: Vec<f32>,
    header_opcodes: Vec<u8>,
    scalars: Vec<f32>,
    opcodes: Vec<u8>,
}

impl DrawingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares an intrinsic width.
    pub fn width(mut self, value: f32) -> Self {
        assert_eq!(
            self.flags & (FLAG_HAS_HEIGHT | FLAG_HAS_VIEWPORT),
            0,
            "width must be declared first"
        );
        self.flags |= FLAG_HAS_WIDTH;
        self.header_scalars.push(value);
        self
    }

    /// Declares an intrinsic height.
    pub fn height(mut self, value: f32) -> Self {
        assert_eq!(
            self.flags & FLAG_HAS_VIEWPORT,
            0,
            "height must be declared before the viewport"
        );
        self.flags |= FLAG_HAS_HEIGHT;
        self.header_scalars.push(value);
        self
    }

    /// Declares a view box and a raw aspect-mode opcode.
    pub fn viewport(mut self, view_box: [f32; 4], aspect: u8) -> Self {
        self.flags |= FLAG_HAS_VIEWPORT;
        self.header_scalars.extend_from_slice(&view_box);
        self.header_opcodes.push(aspect);
        self
    }

    /// ORs raw bits into the flags word without encoding their fields.
    pub fn flag_bits(mut self, bits: u32) -> Self {
        self.flags |= bits;
        self
    }

    /// Appends a main-stream opcode.
    pub fn op(self, opcode: Opcode) -> Self {
        self.byte(opcode.to_byte())
    }

    /// Appends a path opcode.
    pub fn path_op(self, opcode: PathOpcode) -> Self {
        self.byte(opcode.to_byte())
    }

    /// Appends a raw opcode byte.
    pub fn byte(mut self, byte: u8) -> Self {
        self.opcodes.push(byte);
        self
    }

    /// Appends one body scalar.
    pub fn scalar(self, value: f32) -> Self {
        self.scalars([value])
    }

    /// Appends body scalars.
    pub fn scalars<S: AsRef<[f32]>>(mut self, values: S) -> Self {
        self.scalars.extend_from_slice(values.as_ref());
        self
    }

    /// Appends a variable-length count to the opcode stream.
    ///
    /// Limbs carry six value bits each but weigh a full byte in the
    /// accumulator, so only counts whose base-256 digits fit in six bits
    /// are encodable.
    pub fn count(mut self, mut value: usize) -> Self {
        let mut limbs = Vec::new();
        loop {
            let digit = value % 256;
            assert!(
                digit <= usize::from(COUNT_VALUE_MASK),
                "count digit {digit:#x} does not fit in a limb"
            );
            limbs.push(digit as u8);
            value /= 256;
            if value == 0 {
                break;
            }
        }
        limbs.reverse();
        let last = limbs.len() - 1;
        for (index, limb) in limbs.into_iter().enumerate() {
            self.opcodes.push(if index < last {
                limb | COUNT_CONTINUATION_BIT
            } else {
                limb
            });
        }
        self
    }

    /// Encodes the drawing.
    pub fn build(self) -> Vec<u8> {
        let scalar_count = self.header_scalars.len() + self.scalars.len();
        let opcode_count = self.header_opcodes.len() + self.opcodes.len();

        let mut data = Vec::new();
        data.extend_from_slice(&MAGIC);
        data.push(VERSION);
        data.extend_from_slice(&self.flags.to_le_bytes());
        data.extend_from_slice(&u32::try_from(scalar_count).unwrap().to_le_bytes());
        for scalar in self.header_scalars.iter().chain(&self.scalars) {
            data.extend_from_slice(&scalar.to_le_bytes());
        }
        data.extend_from_slice(&u32::try_from(opcode_count).unwrap().to_le_bytes());
        data.extend_from_slice(&self.header_opcodes);
        data.extend_from_slice(&self.opcodes);
        data
    }
}

/// One playback callback, as the engine delivered it.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Start {
        dest: Rect,
        transform: Affine,
        viewport: Option<Viewport>,
    },
    Finish {
        success: bool,
    },
    TransformBegin,
    TransformEnd(Affine),
    PaintBegin {
        is_stroke: bool,
    },
    PaintSolidColor(f32, f32, f32),
    PaintEnd,
    FillOpacity(f32),
    FillRule(Fill),
    StrokeOpacity(f32),
    StrokeWidth(f64),
    StrokeLineJoin(Join),
    StrokeLineCap(Cap),
    StrokeDashArray(Vec<f32>),
    StrokeDashOffset(f64),
    StrokeMiterLimit(f64),
    Rectangle(Rect),
    Circle(Point, f64),
    Ellipse(Point, Vec2),
    Line(Point, Point),
    Polyline(Vec<[f32; 2]>),
    Polygon(Vec<[f32; 2]>),
    PathBegin,
    MoveTo(bool, Point),
    LineTo(bool, Point),
    HorizontalTo(bool, f64),
    VerticalTo(bool, f64),
    CubicTo(bool, Point, Point, Point),
    SmoothCubicTo(bool, Point, Point),
    QuadraticTo(bool, Point, Point),
    SmoothQuadraticTo(bool, Point),
    ArcTo {
        relative: bool,
        reflex: bool,
        reverse: bool,
        radii: Vec2,
        rotation: f64,
        to: Point,
    },
    Close,
    Bearing(f64),
    PathEnd,
}

/// A [`Visitor`] that records every event, optionally stopping after a set
/// number of them.
#[derive(Default)]
pub struct Recorder {
    pub events: Vec<Event>,
    stop_after: Option<usize>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns [`Visit::Stop`] from the event that brings the count to
    /// `count`. `finish` is not counted; it is delivered regardless.
    pub fn stop_after(count: usize) -> Self {
        Self {
            events: Vec::new(),
            stop_after: Some(count),
        }
    }

    fn record(&mut self, event: Event) -> Visit {
        self.events.push(event);
        match self.stop_after {
            Some(count) if self.events.len() >= count => Visit::Stop,
            _ => Visit::Continue,
        }
    }
}

impl Visitor for Recorder {
    fn start(&mut self, dest: Rect, transform: Affine, viewport: Option<&Viewport>) -> Visit {
        self.record(Event::Start {
            dest,
            transform,
            viewport: viewport.copied(),
        })
    }

    fn finish(&mut self, success: bool) {
        self.events.push(Event::Finish { success });
    }

    fn transform_begin(&mut self) -> Visit {
        self.record(Event::TransformBegin)
    }

    fn transform_end(&mut self, transform: Affine) -> Visit {
        self.record(Event::TransformEnd(transform))
    }

    fn paint_begin(&mut self, is_stroke: bool) -> Visit {
        self.record(Event::PaintBegin { is_stroke })
    }

    fn paint_solid_color(&mut self, red: f32, green: f32, blue: f32) -> Visit {
        self.record(Event::PaintSolidColor(red, green, blue))
    }

    fn paint_end(&mut self) -> Visit {
        self.record(Event::PaintEnd)
    }

    fn fill_opacity(&mut self, opacity: f32) -> Visit {
        self.record(Event::FillOpacity(opacity))
    }

    fn fill_rule(&mut self, rule: Fill) -> Visit {
        self.record(Event::FillRule(rule))
    }

    fn stroke_opacity(&mut self, opacity: f32) -> Visit {
        self.record(Event::StrokeOpacity(opacity))
    }

    fn stroke_width(&mut self, width: f64) -> Visit {
        self.record(Event::StrokeWidth(width))
    }

    fn stroke_line_join(&mut self, join: Join) -> Visit {
        self.record(Event::StrokeLineJoin(join))
    }

    fn stroke_line_cap(&mut self, cap: Cap) -> Visit {
        self.record(Event::StrokeLineCap(cap))
    }

    fn stroke_dash_array(&mut self, lengths: &[f32]) -> Visit {
        self.record(Event::StrokeDashArray(lengths.to_vec()))
    }

    fn stroke_dash_offset(&mut self, offset: f64) -> Visit {
        self.record(Event::StrokeDashOffset(offset))
    }

    fn stroke_miter_limit(&mut self, limit: f64) -> Visit {
        self.record(Event::StrokeMiterLimit(limit))
    }

    fn rectangle(&mut self, rect: Rect) -> Visit {
        self.record(Event::Rectangle(rect))
    }

    fn circle(&mut self, center: Point, radius: f64) -> Visit {
        self.record(Event::Circle(center, radius))
    }

    fn ellipse(&mut self, center: Point, radii: Vec2) -> Visit {
        self.record(Event::Ellipse(center, radii))
    }

    fn line(&mut self, from: Point, to: Point) -> Visit {
        self.record(Event::Line(from, to))
    }

    fn polyline(&mut self, points: &[[f32; 2]]) -> Visit {
        self.record(Event::Polyline(points.to_vec()))
    }

    fn polygon(&mut self, points: &[[f32; 2]]) -> Visit {
        self.record(Event::Polygon(points.to_vec()))
    }

    fn path_begin(&mut self) -> Visit {
        self.record(Event::PathBegin)
    }

    fn path_move_to(&mut self, relative: bool, to: Point) -> Visit {
        self.record(Event::MoveTo(relative, to))
    }

    fn path_line_to(&mut self, relative: bool, to: Point) -> Visit {
        self.record(Event::LineTo(relative, to))
    }

    fn path_horizontal_to(&mut self, relative: bool, x: f64) -> Visit {
        self.record(Event::HorizontalTo(relative, x))
    }

    fn path_vertical_to(&mut self, relative: bool, y: f64) -> Visit {
        self.record(Event::VerticalTo(relative, y))
    }

    fn path_cubic_to(
        &mut self,
        relative: bool,
        control0: Point,
        control1: Point,
        to: Point,
    ) -> Visit {
        self.record(Event::CubicTo(relative, control0, control1, to))
    }

    fn path_smooth_cubic_to(&mut self, relative: bool, control1: Point, to: Point) -> Visit {
        self.record(Event::SmoothCubicTo(relative, control1, to))
    }

    fn path_quadratic_to(&mut self, relative: bool, control: Point, to: Point) -> Visit {
        self.record(Event::QuadraticTo(relative, control, to))
    }

    fn path_smooth_quadratic_to(&mut self, relative: bool, to: Point) -> Visit {
        self.record(Event::SmoothQuadraticTo(relative, to))
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
        self.record(Event::ArcTo {
            relative,
            reflex,
            reverse,
            radii,
            rotation,
            to,
        })
    }

    fn path_close(&mut self) -> Visit {
        self.record(Event::Close)
    }

    fn path_bearing(&mut self, angle: f64) -> Visit {
        self.record(Event::Bearing(angle))
    }

    fn path_end(&mut self) -> Visit {
        self.record(Event::PathEnd)
    }
}
