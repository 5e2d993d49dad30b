// Copyright 2026 the Desegno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoding an encoded drawing's header and owning its two body arrays.

use peniko::kurbo::Size;

use crate::cursor::{ByteReader, Cursor};
use crate::format::{
    Extent, FLAG_HAS_HEIGHT, FLAG_HAS_VIEWPORT, FLAG_HAS_WIDTH, FLAG_MASK, MAGIC, VERSION,
};
use crate::viewport::{PreserveAspectRatio, Viewport};
use crate::{Error, Result};

/// A decoded drawing: validated header fields plus the scalar and opcode
/// arrays its body instructions read from.
///
/// [`decode`](Self::decode) validates the header eagerly; the body streams
/// are only validated as [`execute`](Self::execute) walks them. The opcode
/// array is borrowed from the encoded bytes, so a `Drawing` cannot outlive
/// the buffer it was decoded from.
#[derive(Clone, Debug)]
pub struct Drawing<'a> {
    // Scalars are re-encoded little-endian on the wire with no alignment
    // guarantee, so they are decoded into an owned buffer up front. The
    // opcode array is plain bytes and stays borrowed.
    scalars: Vec<f32>,
    opcodes: &'a [u8],
    width: Option<Extent>,
    height: Option<Extent>,
    viewport: Option<Viewport>,
    first_scalar: usize,
    first_opcode: usize,
}

impl<'a> Drawing<'a> {
    /// Decodes the header of an encoded drawing.
    ///
    /// The encoded layout is the 4-byte identifier (magic plus version), a
    /// little-endian `u32` flags word, a scalar count followed by that many
    /// little-endian binary32 scalars, and an opcode count followed by that
    /// many bytes. Header-declared fields (width, height, view box, aspect
    /// mode) are then consumed from the front of the two arrays.
    ///
    /// Truncated or oversized input reports [`Error::InvalidDrawing`];
    /// other header problems report their own taxonomy member.
    pub fn decode(data: &'a [u8]) -> Result<Self> {
        let mut reader = ByteReader::new(data);
        let ident = reader.take(4).ok_or(Error::InvalidDrawing)?;
        if ident[..MAGIC.len()] != MAGIC {
            return Err(Error::InvalidIdent);
        }
        if ident[MAGIC.len()] != VERSION {
            return Err(Error::InvalidVersion);
        }
        let flags = reader.u32().ok_or(Error::InvalidDrawing)?;
        if flags & !FLAG_MASK != 0 {
            return Err(Error::InvalidFlags);
        }
        let scalar_count = reader.u32().ok_or(Error::InvalidDrawing)?;
        let scalars = reader
            .scalars(scalar_count as usize)
            .ok_or(Error::InvalidDrawing)?;
        let opcode_count = reader.u32().ok_or(Error::InvalidDrawing)?;
        let opcodes = reader
            .take(opcode_count as usize)
            .ok_or(Error::InvalidDrawing)?;
        if !reader.is_empty() {
            return Err(Error::InvalidDrawing);
        }

        let mut cursor = Cursor::new(&scalars, opcodes, 0, 0);
        let width = if flags & FLAG_HAS_WIDTH != 0 {
            Some(Extent::from_scalar(cursor.scalar()?).ok_or(Error::InvalidWidth)?)
        } else {
            None
        };
        let height = if flags & FLAG_HAS_HEIGHT != 0 {
            Some(Extent::from_scalar(cursor.scalar()?).ok_or(Error::InvalidHeight)?)
        } else {
            None
        };
        let viewport = if flags & FLAG_HAS_VIEWPORT != 0 {
            Some(decode_viewport(&mut cursor).map_err(|_| Error::InvalidViewport)?)
        } else {
            None
        };
        let (first_scalar, first_opcode) = cursor.positions();

        Ok(Self {
            scalars,
            opcodes,
            width,
            height,
            viewport,
            first_scalar,
            first_opcode,
        })
    }

    /// Whether `data` begins with the drawing format's magic bytes.
    ///
    /// This is a routing test for dispatching between container formats,
    /// not validation; [`decode`](Self::decode) may still reject the data.
    pub fn sniff(data: &[u8]) -> bool {
        data.get(..MAGIC.len()) == Some(MAGIC.as_slice())
    }

    /// The declared intrinsic width, if the header carries one.
    pub fn width(&self) -> Option<Extent> {
        self.width
    }

    /// The declared intrinsic height, if the header carries one.
    pub fn height(&self) -> Option<Extent> {
        self.height
    }

    /// The declared view box and aspect policy, if the header carries them.
    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    /// The full scalar array, header fields included.
    pub fn scalars(&self) -> &[f32] {
        &self.scalars
    }

    /// The full opcode array, header fields included.
    pub fn opcodes(&self) -> &'a [u8] {
        self.opcodes
    }

    /// The size this drawing occupies within a container of the given size.
    ///
    /// Relative extents resolve against the container; a missing extent
    /// means the full container dimension.
    pub fn intrinsic_size(&self, container: Size) -> Size {
        let width = self.width.unwrap_or(Extent::FULL).resolve(container.width);
        let height = self
            .height
            .unwrap_or(Extent::FULL)
            .resolve(container.height);
        Size::new(width, height)
    }

    /// A cursor positioned on the first body scalar and opcode, past the
    /// header-declared fields.
    pub(crate) fn body_cursor(&self) -> Cursor<'_> {
        Cursor::new(
            &self.scalars,
            self.opcodes,
            self.first_scalar,
            self.first_opcode,
        )
    }
}

fn decode_viewport(cursor: &mut Cursor<'_>) -> Result<Viewport> {
    let view_box = cursor.rect()?;
    let aspect = cursor.op::<PreserveAspectRatio>()?;
    Ok(Viewport { view_box, aspect })
}

static_assertions::assert_impl_all!(Drawing<'static>: Send, Sync);
