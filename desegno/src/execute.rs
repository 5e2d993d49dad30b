// Copyright 2026 the Desegno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The playback engine: a single pass over a drawing's body streams,
//! dispatching each instruction to a [`Visitor`].

use peniko::kurbo::{Affine, Rect, Vec2};

use crate::cursor::Cursor;
use crate::format::{
    FillRuleOpcode, LineCapOpcode, LineJoinOpcode, Opcode, PaintOpcode, PathOpcode,
    TransformOpcode,
};
use crate::visitor::{Visit, Visitor};
use crate::{Drawing, Error, Result};

impl Drawing<'_> {
    /// Plays this drawing back into `visitor`, fitted to `dest`.
    ///
    /// The drawing's intrinsic size is resolved against `dest` first. A
    /// drawing that resolves to zero width or height is skipped whole: the
    /// visitor sees no callbacks at all and the result is `Ok`. Otherwise
    /// [`Visitor::start`] fires with the resolved destination and its
    /// fitting transform, the body plays in wire order, and
    /// [`Visitor::finish`] fires exactly once however playback ends.
    ///
    /// Playback stops at the first malformed instruction and reports its
    /// taxonomy member; instructions after the failure are never looked at,
    /// and opcodes after the top-level `End` are ignored. A visitor
    /// returning [`Visit::Stop`] stops playback the same way, reported as
    /// [`Error::Cancelled`].
    pub fn execute<V: Visitor>(&self, visitor: &mut V, dest: Rect) -> Result<()> {
        let size = self.intrinsic_size(dest.size());
        if size.width == 0.0 || size.height == 0.0 {
            return Ok(());
        }
        let dest = Rect::from_origin_size(dest.origin(), size);
        let transform = match self.viewport() {
            Some(viewport) => viewport.fit_transform(dest),
            None => Affine::translate(dest.origin().to_vec2()),
        };

        let mut result = visit(visitor.start(dest, transform, self.viewport()));
        if result.is_ok() {
            result = play(&mut self.body_cursor(), visitor);
        }
        visitor.finish(result.is_ok());
        result
    }
}

/// Runs the main stream until its `End` opcode.
fn play<V: Visitor>(cursor: &mut Cursor<'_>, visitor: &mut V) -> Result<()> {
    loop {
        match cursor.op::<Opcode>()? {
            Opcode::End => return Ok(()),
            Opcode::Transform => transform_stream(cursor, visitor)?,
            Opcode::FillPaint => paint_stream(cursor, visitor, false)?,
            Opcode::FillOpacity => {
                let opacity = cursor.unit()?;
                visit(visitor.fill_opacity(opacity))?;
            }
            Opcode::FillRule => {
                let rule = cursor.op::<FillRuleOpcode>()?;
                visit(visitor.fill_rule(rule.to_fill()))?;
            }
            Opcode::StrokePaint => paint_stream(cursor, visitor, true)?,
            Opcode::StrokeOpacity => {
                let opacity = cursor.unit()?;
                visit(visitor.stroke_opacity(opacity))?;
            }
            Opcode::StrokeWidth => {
                let width = cursor.length()?;
                visit(visitor.stroke_width(f64::from(width)))?;
            }
            Opcode::StrokeLineJoin => {
                let join = cursor.op::<LineJoinOpcode>()?;
                visit(visitor.stroke_line_join(join.to_join()))?;
            }
            Opcode::StrokeLineCap => {
                let cap = cursor.op::<LineCapOpcode>()?;
                visit(visitor.stroke_line_cap(cap.to_cap()))?;
            }
            Opcode::StrokeDashArray => {
                let lengths = cursor.lengths()?;
                visit(visitor.stroke_dash_array(lengths))?;
            }
            Opcode::StrokeDashOffset => {
                let offset = cursor.length()?;
                visit(visitor.stroke_dash_offset(f64::from(offset)))?;
            }
            Opcode::StrokeMiterLimit => {
                let limit = cursor.positive()?;
                visit(visitor.stroke_miter_limit(f64::from(limit)))?;
            }
            Opcode::Rectangle => {
                let rect = cursor.rect()?;
                visit(visitor.rectangle(rect))?;
            }
            Opcode::Circle => {
                let center = cursor.point()?;
                let radius = cursor.length()?;
                visit(visitor.circle(center, f64::from(radius)))?;
            }
            Opcode::Ellipse => {
                let center = cursor.point()?;
                let rx = cursor.length()?;
                let ry = cursor.length()?;
                let radii = Vec2::new(f64::from(rx), f64::from(ry));
                visit(visitor.ellipse(center, radii))?;
            }
            Opcode::Line => {
                let from = cursor.point()?;
                let to = cursor.point()?;
                visit(visitor.line(from, to))?;
            }
            Opcode::Polyline => {
                let points = cursor.points()?;
                visit(visitor.polyline(points))?;
            }
            Opcode::Polygon => {
                let points = cursor.points()?;
                visit(visitor.polygon(points))?;
            }
            Opcode::Path => path_stream(cursor, visitor)?,
        }
    }
}

/// Runs a transform sub-stream. Matrices concatenate in stream order onto
/// an identity accumulator; the visitor hears only the final product.
fn transform_stream<V: Visitor>(cursor: &mut Cursor<'_>, visitor: &mut V) -> Result<()> {
    visit(visitor.transform_begin())?;
    let mut accumulated = Affine::IDENTITY;
    loop {
        match cursor.op::<TransformOpcode>()? {
            TransformOpcode::End => return visit(visitor.transform_end(accumulated)),
            TransformOpcode::Affine => {
                // New transforms follow existing ones, as in an SVG
                // transform list.
                accumulated = accumulated * cursor.affine()?;
            }
        }
    }
}

/// Runs a paint sub-stream for the fill or stroke paint.
fn paint_stream<V: Visitor>(
    cursor: &mut Cursor<'_>,
    visitor: &mut V,
    is_stroke: bool,
) -> Result<()> {
    visit(visitor.paint_begin(is_stroke))?;
    loop {
        match cursor.op::<PaintOpcode>()? {
            PaintOpcode::End => return visit(visitor.paint_end()),
            PaintOpcode::SolidColor => {
                let red = cursor.unit()?;
                let green = cursor.unit()?;
                let blue = cursor.unit()?;
                visit(visitor.paint_solid_color(red, green, blue))?;
            }
        }
    }
}

/// Runs a path sub-stream.
fn path_stream<V: Visitor>(cursor: &mut Cursor<'_>, visitor: &mut V) -> Result<()> {
    visit(visitor.path_begin())?;
    loop {
        let signal = match cursor.op::<PathOpcode>()? {
            PathOpcode::End => return visit(visitor.path_end()),
            PathOpcode::MoveTo { relative } => {
                let to = cursor.point()?;
                visitor.path_move_to(relative, to)
            }
            PathOpcode::LineTo { relative } => {
                let to = cursor.point()?;
                visitor.path_line_to(relative, to)
            }
            PathOpcode::HorizontalTo { relative } => {
                let x = cursor.coordinate()?;
                visitor.path_horizontal_to(relative, f64::from(x))
            }
            PathOpcode::VerticalTo { relative } => {
                let y = cursor.coordinate()?;
                visitor.path_vertical_to(relative, f64::from(y))
            }
            PathOpcode::CubicTo { relative } => {
                let control0 = cursor.point()?;
                let control1 = cursor.point()?;
                let to = cursor.point()?;
                visitor.path_cubic_to(relative, control0, control1, to)
            }
            PathOpcode::SmoothCubicTo { relative } => {
                let control1 = cursor.point()?;
                let to = cursor.point()?;
                visitor.path_smooth_cubic_to(relative, control1, to)
            }
            PathOpcode::QuadraticTo { relative } => {
                let control = cursor.point()?;
                let to = cursor.point()?;
                visitor.path_quadratic_to(relative, control, to)
            }
            PathOpcode::SmoothQuadraticTo { relative } => {
                let to = cursor.point()?;
                visitor.path_smooth_quadratic_to(relative, to)
            }
            PathOpcode::ArcTo {
                relative,
                reflex,
                reverse,
            } => {
                let rx = cursor.length()?;
                let ry = cursor.length()?;
                let rotation = cursor.angle()?;
                let to = cursor.point()?;
                let radii = Vec2::new(f64::from(rx), f64::from(ry));
                visitor.path_arc_to(relative, reflex, reverse, radii, f64::from(rotation), to)
            }
            PathOpcode::CloseSubpath => visitor.path_close(),
            PathOpcode::Bearing => {
                let angle = cursor.angle()?;
                visitor.path_bearing(f64::from(angle))
            }
        };
        visit(signal)?;
    }
}

fn visit(signal: Visit) -> Result<()> {
    match signal {
        Visit::Continue => Ok(()),
        Visit::Stop => Err(Error::Cancelled),
    }
}
