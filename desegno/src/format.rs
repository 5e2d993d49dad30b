// Copyright 2026 the Desegno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The wire vocabulary: format identifier, header flags, size scalars, and
//! the opcode domains.

use peniko::kurbo::{Cap, Join};
use peniko::Fill;

use crate::Error;

/// The three magic bytes every drawing starts with.
pub const MAGIC: [u8; 3] = *b"DSG";

/// The one format version this crate decodes.
pub const VERSION: u8 = 0;

/// Header flag: one leading scalar declares the drawing's width.
pub const FLAG_HAS_WIDTH: u32 = 1 << 0;
/// Header flag: one leading scalar declares the drawing's height.
pub const FLAG_HAS_HEIGHT: u32 = 1 << 1;
/// Header flag: four leading scalars and one leading opcode declare a view
/// box and aspect mode.
pub const FLAG_HAS_VIEWPORT: u32 = 1 << 2;

/// Every flag bit with defined meaning; all other bits are reserved and must
/// be zero.
pub const FLAG_MASK: u32 = FLAG_HAS_WIDTH | FLAG_HAS_HEIGHT | FLAG_HAS_VIEWPORT;

/// Bit 6 of a count limb marks that another limb follows.
///
/// Counts are stored most-significant limb first in the opcode stream. Each
/// limb contributes its low six bits, shifted left by eight for every limb
/// that follows; bit 7 is ignored. `[0x05]` decodes to 5 and `[0x41, 0x02]`
/// to 258. Note the continuation bit is bit 6, not the conventional bit 7.
pub const COUNT_CONTINUATION_BIT: u8 = 0x40;

/// The payload bits of a count limb.
pub const COUNT_VALUE_MASK: u8 = 0x3F;

/// A declared width or height: an absolute length or a fraction of the
/// container the drawing is played into.
///
/// On the wire a size scalar `v >= 0` is an absolute length and `v` in
/// `[-1, 0)` is the fraction `-v` of the container. Nothing else, NaN
/// included, is a size scalar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Extent {
    /// A length in drawing units.
    Absolute(f32),
    /// A fraction of the container dimension, in `(0, 1]`.
    Relative(f32),
}

impl Extent {
    /// The whole container; what an absent width or height defaults to.
    pub const FULL: Self = Self::Relative(1.0);

    /// Decodes a size scalar.
    pub fn from_scalar(value: f32) -> Option<Self> {
        if value >= 0.0 {
            Some(Self::Absolute(value))
        } else if value >= -1.0 {
            Some(Self::Relative(-value))
        } else {
            None
        }
    }

    /// The wire scalar this extent decodes from.
    pub fn to_scalar(self) -> f32 {
        match self {
            Self::Absolute(length) => length,
            Self::Relative(fraction) => -fraction,
        }
    }

    /// The length this extent denotes inside `container` units.
    pub fn resolve(self, container: f64) -> f64 {
        match self {
            Self::Absolute(length) => f64::from(length),
            Self::Relative(fraction) => f64::from(fraction) * container,
        }
    }
}

/// An opcode domain: a contiguous range of defined byte values, with a
/// domain-specific taxonomy member for everything outside it.
pub(crate) trait OpcodeDomain: Sized + Copy {
    /// The error reported for a byte outside the domain.
    const OUT_OF_RANGE: Error;

    /// Decodes one byte of this domain.
    fn decode(byte: u8) -> Option<Self>;
}

/// A main-stream instruction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Opcode {
    /// Ends the drawing.
    End = 0,
    /// A transform sub-stream follows.
    Transform = 1,
    /// A paint sub-stream for the fill follows.
    FillPaint = 2,
    /// One unit scalar: the fill opacity.
    FillOpacity = 3,
    /// One fill-rule opcode.
    FillRule = 4,
    /// A paint sub-stream for the stroke follows.
    StrokePaint = 5,
    /// One unit scalar: the stroke opacity.
    StrokeOpacity = 6,
    /// One length scalar: the stroke width.
    StrokeWidth = 7,
    /// One line-join opcode.
    StrokeLineJoin = 8,
    /// One line-cap opcode.
    StrokeLineCap = 9,
    /// A count and that many length scalars: the dash pattern.
    StrokeDashArray = 10,
    /// One length scalar: the dash offset.
    StrokeDashOffset = 11,
    /// One positive scalar: the miter limit.
    StrokeMiterLimit = 12,
    /// Four scalars: x, y, width, height.
    Rectangle = 13,
    /// A point and one length scalar: center and radius.
    Circle = 14,
    /// A point and two length scalars: center and radii.
    Ellipse = 15,
    /// Two points.
    Line = 16,
    /// A count of scalars (must be even) and that many coordinates.
    Polyline = 17,
    /// Like `Polyline`, but closed.
    Polygon = 18,
    /// A path sub-stream follows.
    Path = 19,
}

impl Opcode {
    /// Decodes a main opcode byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0 => Self::End,
            1 => Self::Transform,
            2 => Self::FillPaint,
            3 => Self::FillOpacity,
            4 => Self::FillRule,
            5 => Self::StrokePaint,
            6 => Self::StrokeOpacity,
            7 => Self::StrokeWidth,
            8 => Self::StrokeLineJoin,
            9 => Self::StrokeLineCap,
            10 => Self::StrokeDashArray,
            11 => Self::StrokeDashOffset,
            12 => Self::StrokeMiterLimit,
            13 => Self::Rectangle,
            14 => Self::Circle,
            15 => Self::Ellipse,
            16 => Self::Line,
            17 => Self::Polyline,
            18 => Self::Polygon,
            19 => Self::Path,
            _ => return None,
        })
    }

    /// The wire byte of this opcode.
    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

impl OpcodeDomain for Opcode {
    const OUT_OF_RANGE: Error = Error::InvalidOpcode;

    fn decode(byte: u8) -> Option<Self> {
        Self::from_byte(byte)
    }
}

/// A transform sub-stream instruction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum TransformOpcode {
    /// Ends the sub-stream.
    End = 0,
    /// Six scalars: an affine matrix `a b c d tx ty`.
    Affine = 1,
}

impl TransformOpcode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::End),
            1 => Some(Self::Affine),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

impl OpcodeDomain for TransformOpcode {
    const OUT_OF_RANGE: Error = Error::InvalidTransformOpcode;

    fn decode(byte: u8) -> Option<Self> {
        Self::from_byte(byte)
    }
}

/// A paint sub-stream instruction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum PaintOpcode {
    /// Ends the sub-stream.
    End = 0,
    /// Three unit scalars: red, green, blue. Alpha is always one.
    SolidColor = 1,
}

impl PaintOpcode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::End),
            1 => Some(Self::SolidColor),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }
}

impl OpcodeDomain for PaintOpcode {
    const OUT_OF_RANGE: Error = Error::InvalidPaintOpcode;

    fn decode(byte: u8) -> Option<Self> {
        Self::from_byte(byte)
    }
}

/// A fill rule opcode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum FillRuleOpcode {
    NonZero = 0,
    EvenOdd = 1,
}

impl FillRuleOpcode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::NonZero),
            1 => Some(Self::EvenOdd),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// The equivalent peniko fill style.
    pub fn to_fill(self) -> Fill {
        match self {
            Self::NonZero => Fill::NonZero,
            Self::EvenOdd => Fill::EvenOdd,
        }
    }
}

impl OpcodeDomain for FillRuleOpcode {
    const OUT_OF_RANGE: Error = Error::InvalidFillRuleOpcode;

    fn decode(byte: u8) -> Option<Self> {
        Self::from_byte(byte)
    }
}

/// A stroke line join opcode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum LineJoinOpcode {
    Bevel = 0,
    Round = 1,
    Miter = 2,
}

impl LineJoinOpcode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Bevel),
            1 => Some(Self::Round),
            2 => Some(Self::Miter),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// The equivalent kurbo stroke join.
    pub fn to_join(self) -> Join {
        match self {
            Self::Bevel => Join::Bevel,
            Self::Round => Join::Round,
            Self::Miter => Join::Miter,
        }
    }
}

impl OpcodeDomain for LineJoinOpcode {
    const OUT_OF_RANGE: Error = Error::InvalidStrokeLineJoinOpcode;

    fn decode(byte: u8) -> Option<Self> {
        Self::from_byte(byte)
    }
}

/// A stroke line cap opcode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum LineCapOpcode {
    Butt = 0,
    Round = 1,
    Square = 2,
}

impl LineCapOpcode {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(Self::Butt),
            1 => Some(Self::Round),
            2 => Some(Self::Square),
            _ => None,
        }
    }

    pub fn to_byte(self) -> u8 {
        self as u8
    }

    /// The equivalent kurbo stroke cap.
    pub fn to_cap(self) -> Cap {
        match self {
            Self::Butt => Cap::Butt,
            Self::Round => Cap::Round,
            Self::Square => Cap::Square,
        }
    }
}

impl OpcodeDomain for LineCapOpcode {
    const OUT_OF_RANGE: Error = Error::InvalidStrokeLineCapOpcode;

    fn decode(byte: u8) -> Option<Self> {
        Self::from_byte(byte)
    }
}

/// A path sub-stream instruction.
///
/// Byte values 1 through 24 come in absolute/relative pairs: odd bytes are
/// the absolute variants, even bytes the relative ones. The arc family
/// occupies 17 through 24; with `k = byte - 17`, bit 0 of `k` selects the
/// relative variant, bit 1 the reflex (large) arc, and bit 2 the reverse
/// (swept) direction.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PathOpcode {
    /// Ends the sub-stream (byte 0).
    End,
    /// One point (bytes 1, 2).
    MoveTo { relative: bool },
    /// One point (bytes 3, 4).
    LineTo { relative: bool },
    /// One coordinate scalar (bytes 5, 6).
    HorizontalTo { relative: bool },
    /// One coordinate scalar (bytes 7, 8).
    VerticalTo { relative: bool },
    /// Three points: both controls, then the endpoint (bytes 9, 10).
    CubicTo { relative: bool },
    /// Two points: the second control and the endpoint (bytes 11, 12).
    SmoothCubicTo { relative: bool },
    /// Two points: the control and the endpoint (bytes 13, 14).
    QuadraticTo { relative: bool },
    /// One point: the endpoint (bytes 15, 16).
    SmoothQuadraticTo { relative: bool },
    /// Two length scalars (the radii), one angle scalar (rotation in
    /// degrees), and the endpoint (bytes 17 through 24).
    ArcTo {
        relative: bool,
        reflex: bool,
        reverse: bool,
    },
    /// Closes the current subpath (byte 25).
    CloseSubpath,
    /// One angle scalar (byte 26). Accepted and range-checked, but carries
    /// no geometry in the reference visitor.
    Bearing,
}

impl PathOpcode {
    /// Decodes a path opcode byte.
    pub fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0 => Self::End,
            1..=16 => {
                let relative = byte % 2 == 0;
                match (byte + 1) / 2 {
                    1 => Self::MoveTo { relative },
                    2 => Self::LineTo { relative },
                    3 => Self::HorizontalTo { relative },
                    4 => Self::VerticalTo { relative },
                    5 => Self::CubicTo { relative },
                    6 => Self::SmoothCubicTo { relative },
                    7 => Self::QuadraticTo { relative },
                    8 => Self::SmoothQuadraticTo { relative },
                    _ => return None,
                }
            }
            17..=24 => {
                let k = byte - 17;
                Self::ArcTo {
                    relative: k & 1 != 0,
                    reflex: k & 2 != 0,
                    reverse: k & 4 != 0,
                }
            }
            25 => Self::CloseSubpath,
            26 => Self::Bearing,
            _ => return None,
        })
    }

    /// The wire byte of this opcode.
    pub fn to_byte(self) -> u8 {
        fn pair(base: u8, relative: bool) -> u8 {
            base + u8::from(relative)
        }
        match self {
            Self::End => 0,
            Self::MoveTo { relative } => pair(1, relative),
            Self::LineTo { relative } => pair(3, relative),
            Self::HorizontalTo { relative } => pair(5, relative),
            Self::VerticalTo { relative } => pair(7, relative),
            Self::CubicTo { relative } => pair(9, relative),
            Self::SmoothCubicTo { relative } => pair(11, relative),
            Self::QuadraticTo { relative } => pair(13, relative),
            Self::SmoothQuadraticTo { relative } => pair(15, relative),
            Self::ArcTo {
                relative,
                reflex,
                reverse,
            } => 17 + u8::from(relative) + 2 * u8::from(reflex) + 4 * u8::from(reverse),
            Self::CloseSubpath => 25,
            Self::Bearing => 26,
        }
    }
}

impl OpcodeDomain for PathOpcode {
    const OUT_OF_RANGE: Error = Error::InvalidPathOpcode;

    fn decode(byte: u8) -> Option<Self> {
        Self::from_byte(byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn main_opcodes_round_trip() {
        for byte in 0..=19 {
            let op = Opcode::from_byte(byte).unwrap();
            assert_eq!(op.to_byte(), byte);
        }
        assert_eq!(Opcode::from_byte(20), None);
        assert_eq!(Opcode::from_byte(0xFF), None);
    }

    #[test]
    fn path_opcodes_round_trip() {
        for byte in 0..=26 {
            let op = PathOpcode::from_byte(byte).unwrap();
            assert_eq!(op.to_byte(), byte);
        }
        assert_eq!(PathOpcode::from_byte(27), None);
        assert_eq!(PathOpcode::from_byte(0xFF), None);
    }

    #[test]
    fn arc_opcodes_decode_their_flag_bits() {
        assert_eq!(
            PathOpcode::from_byte(17),
            Some(PathOpcode::ArcTo {
                relative: false,
                reflex: false,
                reverse: false
            })
        );
        assert_eq!(
            PathOpcode::from_byte(20),
            Some(PathOpcode::ArcTo {
                relative: true,
                reflex: true,
                reverse: false
            })
        );
        assert_eq!(
            PathOpcode::from_byte(21),
            Some(PathOpcode::ArcTo {
                relative: false,
                reflex: false,
                reverse: true
            })
        );
        assert_eq!(
            PathOpcode::from_byte(24),
            Some(PathOpcode::ArcTo {
                relative: true,
                reflex: true,
                reverse: true
            })
        );
    }

    #[test]
    fn small_domains_reject_out_of_range_bytes() {
        assert_eq!(TransformOpcode::from_byte(2), None);
        assert_eq!(PaintOpcode::from_byte(2), None);
        assert_eq!(FillRuleOpcode::from_byte(2), None);
        assert_eq!(LineJoinOpcode::from_byte(3), None);
        assert_eq!(LineCapOpcode::from_byte(3), None);
    }

    #[test]
    fn size_scalars_decode() {
        assert_eq!(Extent::from_scalar(12.5), Some(Extent::Absolute(12.5)));
        assert_eq!(Extent::from_scalar(0.0), Some(Extent::Absolute(0.0)));
        assert_eq!(Extent::from_scalar(-0.25), Some(Extent::Relative(0.25)));
        assert_eq!(Extent::from_scalar(-1.0), Some(Extent::Relative(1.0)));
        assert_eq!(Extent::from_scalar(-1.5), None);
        assert_eq!(Extent::from_scalar(f32::NAN), None);
    }

    #[test]
    fn extents_resolve_against_a_container() {
        assert_eq!(Extent::Absolute(40.0).resolve(200.0), 40.0);
        assert_eq!(Extent::Relative(0.25).resolve(200.0), 50.0);
        assert_eq!(Extent::FULL.resolve(123.0), 123.0);
    }
}
