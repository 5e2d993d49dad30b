// Copyright 2026 the Desegno Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds-checked readers over the wire data: a little-endian byte reader
//! for the fixed header, and the shared scalar/opcode cursor the engine
//! reads the drawing body through.

use peniko::kurbo::{Affine, Point, Rect};

use crate::format::{OpcodeDomain, COUNT_CONTINUATION_BIT, COUNT_VALUE_MASK};
use crate::{Error, Result};

/// A forward-only reader over raw bytes. Every read either consumes exactly
/// what it asked for or consumes nothing and reports `None`.
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The next `len` bytes, if that many remain.
    pub(crate) fn take(&mut self, len: usize) -> Option<&'a [u8]> {
        let head = self.data.get(..len)?;
        self.data = &self.data[len..];
        Some(head)
    }

    /// A little-endian `u32`.
    pub(crate) fn u32(&mut self) -> Option<u32> {
        let bytes = self.take(4)?;
        Some(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// `count` little-endian IEEE-754 binary32 scalars, decoded into an
    /// owned buffer.
    pub(crate) fn scalars(&mut self, count: usize) -> Option<Vec<f32>> {
        let bytes = self.take(count.checked_mul(4)?)?;
        let mut scalars = Vec::with_capacity(count);
        for chunk in bytes.chunks_exact(4) {
            scalars.push(f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]));
        }
        Some(scalars)
    }
}

/// The read position into a drawing's two body arrays: `sc` is the scalar
/// counter, `pc` the program counter. Both only ever move forward, and
/// every read is bounds-checked against the declared array lengths.
///
/// Transform, paint, and path sub-streams all advance the same cursor; it
/// is lent (`&mut`) to each sub-executor in turn.
pub(crate) struct Cursor<'a> {
    scalars: &'a [f32],
    opcodes: &'a [u8],
    sc: usize,
    pc: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(scalars: &'a [f32], opcodes: &'a [u8], sc: usize, pc: usize) -> Self {
        Self {
            scalars,
            opcodes,
            sc,
            pc,
        }
    }

    /// The current scalar and program counters.
    pub(crate) fn positions(&self) -> (usize, usize) {
        (self.sc, self.pc)
    }

    /// The next scalar.
    pub(crate) fn scalar(&mut self) -> Result<f32> {
        let value = *self.scalars.get(self.sc).ok_or(Error::ScalarOverflow)?;
        self.sc += 1;
        Ok(value)
    }

    /// The next `count` scalars as one borrowed slice.
    pub(crate) fn scalars(&mut self, count: usize) -> Result<&'a [f32]> {
        let end = self.sc.checked_add(count).ok_or(Error::ScalarOverflow)?;
        let slice = self.scalars.get(self.sc..end).ok_or(Error::ScalarOverflow)?;
        self.sc = end;
        Ok(slice)
    }

    // The typed accessors below all read a plain scalar; they exist so call
    // sites record which operand kind they consume.

    pub(crate) fn coordinate(&mut self) -> Result<f32> {
        self.scalar()
    }

    pub(crate) fn unit(&mut self) -> Result<f32> {
        self.scalar()
    }

    pub(crate) fn length(&mut self) -> Result<f32> {
        self.scalar()
    }

    pub(crate) fn positive(&mut self) -> Result<f32> {
        self.scalar()
    }

    pub(crate) fn angle(&mut self) -> Result<f32> {
        self.scalar()
    }

    /// Two coordinate scalars as a point.
    pub(crate) fn point(&mut self) -> Result<Point> {
        let x = self.coordinate()?;
        let y = self.coordinate()?;
        Ok(Point::new(f64::from(x), f64::from(y)))
    }

    /// Four scalars as an x/y/width/height rectangle.
    pub(crate) fn rect(&mut self) -> Result<Rect> {
        let x = self.coordinate()?;
        let y = self.coordinate()?;
        let width = self.length()?;
        let height = self.length()?;
        Ok(Rect::from_origin_size(
            (f64::from(x), f64::from(y)),
            (f64::from(width), f64::from(height)),
        ))
    }

    /// Six scalars as an affine matrix `a b c d tx ty`.
    pub(crate) fn affine(&mut self) -> Result<Affine> {
        let m = self.scalars(6)?;
        Ok(Affine::new([
            f64::from(m[0]),
            f64::from(m[1]),
            f64::from(m[2]),
            f64::from(m[3]),
            f64::from(m[4]),
            f64::from(m[5]),
        ]))
    }

    /// The next opcode byte.
    pub(crate) fn opcode_byte(&mut self) -> Result<u8> {
        let byte = *self.opcodes.get(self.pc).ok_or(Error::OpcodeOverflow)?;
        self.pc += 1;
        Ok(byte)
    }

    /// The next opcode of domain `T`; a byte outside the domain reports the
    /// domain's own taxonomy member.
    pub(crate) fn op<T: OpcodeDomain>(&mut self) -> Result<T> {
        let byte = self.opcode_byte()?;
        T::decode(byte).ok_or(T::OUT_OF_RANGE)
    }

    /// A variable-length count from the opcode stream.
    ///
    /// Accumulation saturates rather than wrapping, so a malicious limb
    /// sequence can at worst produce a count that fails its later bounds
    /// check.
    pub(crate) fn count(&mut self) -> Result<usize> {
        let mut value: usize = 0;
        loop {
            let limb = self.opcode_byte()?;
            value = value.saturating_mul(256) | usize::from(limb & COUNT_VALUE_MASK);
            if limb & COUNT_CONTINUATION_BIT == 0 {
                return Ok(value);
            }
        }
    }

    /// A dash array: a count followed by that many length scalars.
    pub(crate) fn lengths(&mut self) -> Result<&'a [f32]> {
        let count = self.count()?;
        self.scalars(count)
    }

    /// A point array: a count of scalars, which must be even, followed by
    /// the scalars themselves as x/y pairs.
    pub(crate) fn points(&mut self) -> Result<&'a [[f32; 2]]> {
        let count = self.count()?;
        if count % 2 != 0 {
            return Err(Error::InvalidPointArray);
        }
        let scalars = self.scalars(count)?;
        bytemuck::try_cast_slice(scalars).map_err(|_| Error::InvalidPointArray)
    }
}
