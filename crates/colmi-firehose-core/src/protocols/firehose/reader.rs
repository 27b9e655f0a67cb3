use super::error::FirehoseError;
use super::layout;

pub struct FirehoseReader<'a> {
    packet: &'a [u8],
}

impl<'a> FirehoseReader<'a> {
    pub fn new(packet: &'a [u8]) -> Self {
        Self { packet }
    }

    pub fn require_len(&self, needed: usize) -> Result<(), FirehoseError> {
        if self.packet.len() < needed {
            return Err(FirehoseError::OutOfBounds {
                needed,
                actual: self.packet.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, FirehoseError> {
        self.packet
            .get(offset)
            .copied()
            .ok_or(FirehoseError::OutOfBounds {
                needed: offset + 1,
                actual: self.packet.len(),
            })
    }

    /// Combine two bytes, `hi` first, into a big-endian `u16`.
    pub fn read_u16_be(&self, hi: usize, lo: usize) -> Result<u16, FirehoseError> {
        Ok(u16::from_be_bytes([self.read_u8(hi)?, self.read_u8(lo)?]))
    }

    /// Read one accelerometer axis.
    ///
    /// The sign flag lives in `sign`, which need not be the byte supplying
    /// the high bits.
    pub fn read_axis(&self, hi: usize, lo: usize, sign: usize) -> Result<i16, FirehoseError> {
        Ok(unpack12(
            self.read_u8(hi)?,
            self.read_u8(lo)?,
            self.read_u8(sign)?,
        ))
    }
}

/// Unpack a 12-bit axis value: `hi` shifted left by four, OR'd with the low
/// nibble of `lo`, then biased by -4096 when bit 3 of `sign_source` is set.
///
/// # Examples
/// This helper is part of an internal module, so the example is marked as
/// text example.
/// ```text
/// assert_eq!(unpack12(0x08, 0x05, 0x08), 0x85 - 4096);
/// assert_eq!(unpack12(0x01, 0x02, 0x00), 0x12);
/// ```
pub fn unpack12(hi_nibble_byte: u8, lo_nibble_byte: u8, sign_source_byte: u8) -> i16 {
    let raw = ((hi_nibble_byte as i16) << 4) | (lo_nibble_byte & layout::AXIS_LO_NIBBLE_MASK) as i16;
    if sign_source_byte & layout::AXIS_SIGN_MASK != 0 {
        raw - layout::AXIS_BIAS
    } else {
        raw
    }
}
