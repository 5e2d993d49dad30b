// Copyright 2026 the Desegno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use thiserror::Error;

/// Errors that can occur while decoding or playing back a drawing.
///
/// The taxonomy is closed: every way a drawing can be malformed maps to
/// exactly one member, the first failure wins, and no further stream data is
/// read once a failure has been reported. The same value that is returned to
/// the caller also decides the `success` flag of the visitor's final
/// [`finish`](crate::Visitor::finish) notification.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The buffer is too short for its declared contents, has trailing
    /// bytes, or a fixed header field could not be read.
    #[error("drawing data is malformed")]
    InvalidDrawing,
    /// The buffer does not begin with the `DSG` magic bytes.
    #[error("unrecognized format identifier")]
    InvalidIdent,
    /// The version byte names a version this crate does not understand.
    #[error("unsupported format version")]
    InvalidVersion,
    /// The header flags word has reserved bits set.
    #[error("reserved header flag bits are set")]
    InvalidFlags,
    /// The declared width is not a valid size scalar.
    #[error("invalid width")]
    InvalidWidth,
    /// The declared height is not a valid size scalar.
    #[error("invalid height")]
    InvalidHeight,
    /// The viewport field is incomplete or malformed.
    #[error("invalid viewport")]
    InvalidViewport,
    /// An instruction needed more scalars than the drawing declares.
    #[error("scalar array exhausted")]
    ScalarOverflow,
    /// An instruction needed more opcodes than the drawing declares.
    #[error("opcode array exhausted")]
    OpcodeOverflow,
    /// A main opcode outside the defined range.
    #[error("invalid opcode")]
    InvalidOpcode,
    /// A transform sub-stream opcode outside the defined range.
    #[error("invalid transform opcode")]
    InvalidTransformOpcode,
    /// A paint sub-stream opcode outside the defined range.
    #[error("invalid paint opcode")]
    InvalidPaintOpcode,
    /// A path sub-stream opcode outside the defined range.
    #[error("invalid path opcode")]
    InvalidPathOpcode,
    /// A fill rule opcode outside the defined range.
    #[error("invalid fill rule opcode")]
    InvalidFillRuleOpcode,
    /// A stroke line join opcode outside the defined range.
    #[error("invalid stroke line join opcode")]
    InvalidStrokeLineJoinOpcode,
    /// A stroke line cap opcode outside the defined range.
    #[error("invalid stroke line cap opcode")]
    InvalidStrokeLineCapOpcode,
    /// A point array declared an odd number of scalars.
    #[error("point array has an odd number of scalars")]
    InvalidPointArray,
    /// The visitor asked for playback to stop.
    ///
    /// This is not a defect in the drawing; it is reported through the same
    /// channel because a stop request halts the engine exactly like a parse
    /// failure does.
    #[error("playback was stopped by the visitor")]
    Cancelled,
}
