// Copyright 2026 the Desegno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A canvas that records its calls instead of drawing.

use peniko::kurbo::{Affine, Cap, Join, Point, Vec2};
use peniko::{Color, Fill};

use crate::render::Canvas;

/// One recorded canvas operation.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    BeginPath,
    MoveTo(Point),
    LineTo(Point),
    QuadTo(Point, Point),
    CubicTo(Point, Point, Point),
    ArcTo {
        radii: Vec2,
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    ClosePath,
    EndPath,
    SetTransform(Affine),
    FillPaint(Option<Color>),
    FillOpacity(f32),
    FillRule(Fill),
    StrokePaint(Option<Color>),
    StrokeOpacity(f32),
    StrokeWidth(f64),
    StrokeJoin(Join),
    StrokeCap(Cap),
    StrokeDashArray(Vec<f32>),
    StrokeDashOffset(f64),
    StrokeMiterLimit(f64),
    FillAndStroke,
}

/// List of [`Command`]s captured from one or more renders.
///
/// A `Recording` is itself a [`Canvas`], so a drawing can be rendered once
/// and [`replay`](Self::replay)ed onto real canvases later, or inspected
/// command by command in tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Recording {
    /// The recorded commands, in call order.
    pub commands: Vec<Command>,
}

impl Recording {
    /// Creates an empty recording.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a command.
    pub fn push(&mut self, command: Command) {
        self.commands.push(command);
    }

    /// Returns the recorded commands.
    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }

    /// Replays every recorded command onto `canvas`, in order.
    pub fn replay<C: Canvas>(&self, canvas: &mut C) {
        for command in &self.commands {
            match command {
                Command::BeginPath => canvas.begin_path(),
                Command::MoveTo(to) => canvas.move_to(*to),
                Command::LineTo(to) => canvas.line_to(*to),
                Command::QuadTo(control, to) => canvas.quad_to(*control, *to),
                Command::CubicTo(control0, control1, to) => {
                    canvas.cubic_to(*control0, *control1, *to);
                }
                Command::ArcTo {
                    radii,
                    rotation,
                    large_arc,
                    sweep,
                    to,
                } => canvas.arc_to(*radii, *rotation, *large_arc, *sweep, *to),
                Command::ClosePath => canvas.close_path(),
                Command::EndPath => canvas.end_path(),
                Command::SetTransform(transform) => canvas.set_transform(*transform),
                Command::FillPaint(color) => canvas.set_fill_paint(*color),
                Command::FillOpacity(opacity) => canvas.set_fill_opacity(*opacity),
                Command::FillRule(rule) => canvas.set_fill_rule(*rule),
                Command::StrokePaint(color) => canvas.set_stroke_paint(*color),
                Command::StrokeOpacity(opacity) => canvas.set_stroke_opacity(*opacity),
                Command::StrokeWidth(width) => canvas.set_stroke_width(*width),
                Command::StrokeJoin(join) => canvas.set_stroke_join(*join),
                Command::StrokeCap(cap) => canvas.set_stroke_cap(*cap),
                Command::StrokeDashArray(lengths) => canvas.set_stroke_dash_array(lengths),
                Command::StrokeDashOffset(offset) => canvas.set_stroke_dash_offset(*offset),
                Command::StrokeMiterLimit(limit) => canvas.set_stroke_miter_limit(*limit),
                Command::FillAndStroke => canvas.fill_and_stroke(),
            }
        }
    }
}

impl Canvas for Recording {
    fn begin_path(&mut self) {
        self.push(Command::BeginPath);
    }

    fn move_to(&mut self, to: Point) {
        self.push(Command::MoveTo(to));
    }

    fn line_to(&mut self, to: Point) {
        self.push(Command::LineTo(to));
    }

    fn quad_to(&mut self, control: Point, to: Point) {
        self.push(Command::QuadTo(control, to));
    }

    fn cubic_to(&mut self, control0: Point, control1: Point, to: Point) {
        self.push(Command::CubicTo(control0, control1, to));
    }

    fn arc_to(&mut self, radii: Vec2, rotation: f64, large_arc: bool, sweep: bool, to: Point) {
        self.push(Command::ArcTo {
            radii,
            rotation,
            large_arc,
            sweep,
            to,
        });
    }

    fn close_path(&mut self) {
        self.push(Command::ClosePath);
    }

    fn end_path(&mut self) {
        self.push(Command::EndPath);
    }

    fn set_transform(&mut self, transform: Affine) {
        self.push(Command::SetTransform(transform));
    }

    fn set_fill_paint(&mut self, color: Option<Color>) {
        self.push(Command::FillPaint(color));
    }

    fn set_fill_opacity(&mut self, opacity: f32) {
        self.push(Command::FillOpacity(opacity));
    }

    fn set_fill_rule(&mut self, rule: Fill) {
        self.push(Command::FillRule(rule));
    }

    fn set_stroke_paint(&mut self, color: Option<Color>) {
        self.push(Command::StrokePaint(color));
    }

    fn set_stroke_opacity(&mut self, opacity: f32) {
        self.push(Command::StrokeOpacity(opacity));
    }

    fn set_stroke_width(&mut self, width: f64) {
        self.push(Command::StrokeWidth(width));
    }

    fn set_stroke_join(&mut self, join: Join) {
        self.push(Command::StrokeJoin(join));
    }

    fn set_stroke_cap(&mut self, cap: Cap) {
        self.push(Command::StrokeCap(cap));
    }

    fn set_stroke_dash_array(&mut self, lengths: &[f32]) {
        self.push(Command::StrokeDashArray(lengths.to_vec()));
    }

    fn set_stroke_dash_offset(&mut self, offset: f64) {
        self.push(Command::StrokeDashOffset(offset));
    }

    fn set_stroke_miter_limit(&mut self, limit: f64) {
        self.push(Command::StrokeMiterLimit(limit));
    }

    fn fill_and_stroke(&mut self) {
        self.push(Command::FillAndStroke);
    }
}
