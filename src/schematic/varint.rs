//! VarInt coding of Sponge block data.
//!
//! Each value is stored little-endian in 7-bit groups; the high bit of a
//! byte marks that another group follows. A value may use at most 5 bytes.

use crate::error::{Result, SchematicError};

/// Maximum number of bytes in one encoded value.
pub const MAX_VARINT_BYTES: usize = 5;

const SEGMENT_BITS: u8 = 0x7F;
const CONTINUE_BIT: u8 = 0x80;

/// Outcome of reading one value from a byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VarIntRead {
    /// A complete value and the number of bytes it used.
    Value { value: u64, len: usize },
    /// The stream ended before the value was complete.
    Truncated,
}

/// Read one value starting at `offset`.
pub fn read_varint(data: &[u8], offset: usize) -> Result<VarIntRead> {
    let mut value: u64 = 0;
    let mut group = 0;

    loop {
        if group == MAX_VARINT_BYTES {
            return Err(SchematicError::VarIntOverflow { offset });
        }
        let Some(&byte) = data.get(offset + group) else {
            return Ok(VarIntRead::Truncated);
        };

        value |= ((byte & SEGMENT_BITS) as u64) << (7 * group);
        group += 1;

        if byte & CONTINUE_BIT == 0 {
            return Ok(VarIntRead::Value { value, len: group });
        }
    }
}

/// Append the encoding of `value` to `out`.
pub fn write_varint(mut value: u64, out: &mut Vec<u8>) {
    loop {
        let byte = (value as u8) & SEGMENT_BITS;
        value >>= 7;
        if value == 0 {
            out.push(byte);
            return;
        }
        out.push(byte | CONTINUE_BIT);
    }
}

/// Decode a whole block-data stream into one palette code per voxel.
///
/// The stream must hold exactly `expected` values: a shorter stream, a
/// value cut off at the end, or values left over after `expected` all fail
/// with [`SchematicError::BlockDataLengthMismatch`].
pub fn decode_block_data(data: &[u8], expected: usize) -> Result<Vec<u64>> {
    // Every value takes at least one byte.
    let mut codes = Vec::with_capacity(expected.min(data.len()));
    let mut offset = 0;

    while offset < data.len() {
        match read_varint(data, offset)? {
            VarIntRead::Value { value, len } => {
                codes.push(value);
                offset += len;
            }
            VarIntRead::Truncated => {
                return Err(SchematicError::BlockDataLengthMismatch {
                    expected,
                    actual: codes.len(),
                });
            }
        }
    }

    if codes.len() != expected {
        return Err(SchematicError::BlockDataLengthMismatch {
            expected,
            actual: codes.len(),
        });
    }

    Ok(codes)
}

/// Encode palette codes into a block-data stream.
pub fn encode_block_data(codes: &[u64]) -> Vec<u8> {
    let mut out = Vec::with_capacity(codes.len());
    for &code in codes {
        write_varint(code, &mut out);
    }
    out
}
