//! Byte-mode data encoding.
//!
//! Turns raw input bytes into the data codeword sequence of a given version:
//! mode indicator, character count, payload, terminator, bit padding and the
//! alternating 0xEC/0x11 pad bytes.

use crate::bits::BitBuffer;
use crate::error::{QrError, Result};
use crate::version::Version;
use log::debug;

/// Mode indicator for 8-bit byte mode.
const BYTE_MODE_BITS: u32 = 0b0100;

/// Filler bytes appended after the terminator, alternating.
const PAD_BYTES: [u8; 2] = [0xEC, 0x11];

/// Encodes `data` as a single byte-mode segment filling `version`'s data capacity.
///
/// The returned buffer is exactly [`Version::num_data_codewords`] bytes long.
///
/// # Errors
///
/// Returns [`QrError::Capacity`] if `data` is longer than the version's byte capacity.
pub fn encode_data_bits(data: &[u8], version: Version) -> Result<BitBuffer> {
    let capacity = version.byte_capacity();
    if data.len() > capacity {
        return Err(QrError::Capacity {
            len: data.len(),
            max: capacity,
        });
    }

    let datacapacitybits: usize = version.num_data_codewords() * 8;
    let mut bb = BitBuffer::with_capacity(datacapacitybits);
    bb.append_bits(BYTE_MODE_BITS, 4)?;
    bb.append_bits(data.len() as u32, version.char_count_bits())?;
    for &b in data {
        bb.append_byte(b)?;
    }
    let datausedbits = bb.len();

    // Add terminator and pad up to a byte if applicable
    let numzerobits: usize = (datacapacitybits - bb.len()).min(4);
    bb.append_bits(0, numzerobits as u8)?;
    let numzerobits: usize = bb.len().wrapping_neg() & 7;
    bb.append_bits(0, numzerobits as u8)?;
    debug_assert_eq!(bb.len() % 8, 0);

    // Pad with alternating bytes until data capacity is reached
    for &padbyte in PAD_BYTES.iter().cycle() {
        if bb.len() >= datacapacitybits {
            break;
        }
        bb.append_byte(padbyte)?;
    }
    debug_assert_eq!(bb.len(), datacapacitybits);

    debug!(
        "Encoded {} bytes into version {}: {} payload bits, {} data codewords",
        data.len(),
        version,
        datausedbits,
        datacapacitybits / 8
    );
    Ok(bb)
}

/// Encodes `data` into the data codewords of `version`.
pub fn encode_data_codewords(data: &[u8], version: Version) -> Result<Vec<u8>> {
    encode_data_bits(data, version).map(BitBuffer::into_bytes)
}
