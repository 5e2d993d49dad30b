// Copyright 2026 the Desegno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport fitting: mapping a drawing's view box onto a destination
//! rectangle under an aspect-ratio policy.

use peniko::kurbo::{Affine, Rect};

use crate::format::OpcodeDomain;
use crate::Error;

/// Where leftover space goes along one axis after uniform scaling.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Align {
    /// Pin to the minimum edge.
    Min,
    /// Center.
    Mid,
    /// Pin to the maximum edge.
    Max,
}

impl Align {
    fn factor(self) -> f64 {
        match self {
            Self::Min => 0.0,
            Self::Mid => 0.5,
            Self::Max => 1.0,
        }
    }

    fn index(self) -> u8 {
        match self {
            Self::Min => 0,
            Self::Mid => 1,
            Self::Max => 2,
        }
    }
}

/// How a uniform scale resolves when the view box and destination aspect
/// ratios disagree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FitMode {
    /// Scale so the whole view box is visible; the destination may be
    /// letterboxed.
    Meet,
    /// Scale so the whole destination is covered; the view box may be
    /// cropped.
    Slice,
}

/// The aspect-ratio policy carried in a drawing header.
///
/// On the wire this is a single opcode: `0` selects [`None`](Self::None),
/// `1..=9` the meet alignments and `10..=18` the slice alignments, with the
/// x alignment varying fastest (`1` is x-min/y-min meet, `5` is
/// x-mid/y-mid meet, `14` is x-mid/y-mid slice).
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PreserveAspectRatio {
    /// Scale each axis independently to fill the destination exactly.
    None,
    /// Scale both axes by the same factor and distribute the leftover.
    Uniform {
        /// Horizontal placement of the scaled view box.
        x: Align,
        /// Vertical placement of the scaled view box.
        y: Align,
        /// Whether the uniform scale meets or slices the destination.
        mode: FitMode,
    },
}

impl PreserveAspectRatio {
    /// Decodes a wire opcode.
    pub fn from_byte(byte: u8) -> Option<Self> {
        if byte == 0 {
            return Some(Self::None);
        }
        let index = byte - 1;
        let (index, mode) = if index < 9 {
            (index, FitMode::Meet)
        } else if index < 18 {
            (index - 9, FitMode::Slice)
        } else {
            return None;
        };
        let x = match index % 3 {
            0 => Align::Min,
            1 => Align::Mid,
            _ => Align::Max,
        };
        let y = match index / 3 {
            0 => Align::Min,
            1 => Align::Mid,
            _ => Align::Max,
        };
        Some(Self::Uniform { x, y, mode })
    }

    /// The wire opcode for this policy.
    pub fn to_byte(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Uniform { x, y, mode } => {
                let base = match mode {
                    FitMode::Meet => 1,
                    FitMode::Slice => 10,
                };
                base + y.index() * 3 + x.index()
            }
        }
    }
}

impl Default for PreserveAspectRatio {
    /// Centered meet, matching the `xMidYMid meet` convention.
    fn default() -> Self {
        Self::Uniform {
            x: Align::Mid,
            y: Align::Mid,
            mode: FitMode::Meet,
        }
    }
}

impl OpcodeDomain for PreserveAspectRatio {
    const OUT_OF_RANGE: Error = Error::InvalidViewport;

    fn decode(byte: u8) -> Option<Self> {
        Self::from_byte(byte)
    }
}

/// A drawing's declared coordinate space and how to fit it to a
/// destination.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// The rectangle, in drawing coordinates, that maps onto the
    /// destination.
    pub view_box: Rect,
    /// The aspect-ratio policy for that mapping.
    pub aspect: PreserveAspectRatio,
}

impl Viewport {
    /// The affine that maps [`view_box`](Self::view_box) onto `dest` under
    /// this viewport's aspect policy.
    ///
    /// A zero-width or zero-height view box produces a zero scale on that
    /// axis rather than dividing by zero.
    pub fn fit_transform(&self, dest: Rect) -> Affine {
        let view = self.view_box;
        let axis_scale = |dest_len: f64, view_len: f64| {
            if view_len == 0.0 {
                0.0
            } else {
                dest_len / view_len
            }
        };
        let scale_x = axis_scale(dest.width(), view.width());
        let scale_y = axis_scale(dest.height(), view.height());
        let (scale_x, scale_y, align_x, align_y) = match self.aspect {
            PreserveAspectRatio::None => (scale_x, scale_y, Align::Min, Align::Min),
            PreserveAspectRatio::Uniform { x, y, mode } => {
                let scale = match mode {
                    FitMode::Meet => scale_x.min(scale_y),
                    FitMode::Slice => scale_x.max(scale_y),
                };
                (scale, scale, x, y)
            }
        };
        let tx = dest.x0 - view.x0 * scale_x
            + (dest.width() - view.width() * scale_x) * align_x.factor();
        let ty = dest.y0 - view.y0 * scale_y
            + (dest.height() - view.height() * scale_y) * align_y.factor();
        Affine::new([scale_x, 0.0, 0.0, scale_y, tx, ty])
    }
}
