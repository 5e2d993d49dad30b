// Copyright 2026 the Desegno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Desegno decodes and plays back a compact binary format for vector
//! drawings.
//!
//! An encoded drawing is a short header followed by two flat arrays: IEEE-754
//! binary32 scalars and opcode bytes, both little-endian. Instructions take
//! their operands from the front of the scalar array in order, so the body
//! needs no per-operand framing; a handful of header flags declare an
//! optional intrinsic size and view box. The format is designed to be cheap
//! to validate and cheap to skip: decoding touches only the header, and
//! playback is a single forward pass with no allocation beyond the decoded
//! scalar array.
//!
//! Playback is visitor based. [`Drawing::execute`] walks the opcode stream
//! once and reports every instruction to a [`Visitor`], which can rasterize,
//! measure, transcode, or cancel as it pleases. The crate ships the
//! reference visitor, [`RenderVisitor`], which realizes instructions on any
//! [`Canvas`] surface, and [`Recording`], a canvas that captures commands
//! for inspection or later replay. Rasterization itself is out of scope;
//! a `Canvas` implementation bridges to a real 2D backend.
//!
//! Malformed data is never a panic: every failure mode is a member of the
//! closed [`Error`] taxonomy, and a drawing that fails mid-playback leaves
//! at most the instructions before the failure on the surface.
//!
//! # Example
//!
//! ```
//! use desegno::kurbo::Rect;
//! use desegno::{Drawing, Recording};
//!
//! // The smallest valid drawing: no header fields, no scalars, and a
//! // body that immediately ends.
//! let data = [
//!     b'D', b'S', b'G', 0, // identifier and version
//!     0, 0, 0, 0, // flags
//!     0, 0, 0, 0, // scalar count
//!     1, 0, 0, 0, // opcode count
//!     0, // end of drawing
//! ];
//!
//! let drawing = Drawing::decode(&data)?;
//! let mut recording = Recording::new();
//! drawing.render(&mut recording, Rect::new(0.0, 0.0, 100.0, 100.0))?;
//!
//! // An empty body still fits the drawing to the destination.
//! assert_eq!(recording.commands.len(), 1);
//! # Ok::<(), desegno::Error>(())
//! ```

// LINEBENDER LINT SET - lib.rs - v2
// See https://linebender.org/wiki/canonical-lints/
// These lints aren't included in Cargo.toml because they
// shouldn't apply to examples and tests
#![warn(unused_crate_dependencies)]
#![warn(clippy::print_stdout, clippy::print_stderr)]
// Targeting e.g. 32-bit means structs containing usize can give false positives for 64-bit.
#![cfg_attr(target_pointer_width = "64", warn(clippy::trivially_copy_pass_by_ref))]
// END LINEBENDER LINT SET
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

mod cursor;
mod drawing;
mod error;
mod execute;
mod format;
mod recording;
mod render;
mod viewport;
mod visitor;

/// Styling and composition primitives.
pub use peniko;
/// 2D geometry, with a focus on curves.
pub use peniko::kurbo;

pub use drawing::Drawing;
pub use error::Error;
pub use format::{
    Extent, FillRuleOpcode, LineCapOpcode, LineJoinOpcode, Opcode, PaintOpcode, PathOpcode,
    TransformOpcode, COUNT_CONTINUATION_BIT, COUNT_VALUE_MASK, FLAG_HAS_HEIGHT, FLAG_HAS_VIEWPORT,
    FLAG_HAS_WIDTH, FLAG_MASK, MAGIC, VERSION,
};
pub use recording::{Command, Recording};
pub use render::{render_drawing, Canvas, RenderVisitor};
pub use viewport::{Align, FitMode, PreserveAspectRatio, Viewport};
pub use visitor::{Visit, Visitor};

/// Specialization of `Result` for this crate's [`Error`].
pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;
