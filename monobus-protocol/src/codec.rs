//! Stateless wire transforms shared by every telegram.
//!
//! Three primitives make up the codec:
//! - pixel expansion: each pixel byte becomes two bytes of 2-bit symbols
//!   (set bit -> `0b11`, clear bit -> `0b10`)
//! - checksum: rolling XOR seeded `0xFF`, computed before stuffing
//! - byte stuffing: HDLC-style escaping of the flag and escape values inside
//!   the frame body

/// Frame boundary flag, opens and closes every telegram
pub const FLAG_BYTE: u8 = 0x7E;

/// Escape marker introducing a stuffed byte
pub const ESCAPE_BYTE: u8 = 0x7D;

/// XOR mask applied to an escaped byte's substitution value
pub const ESCAPE_XOR: u8 = 0x20;

/// Seed for the rolling XOR checksum
pub const CHECKSUM_SEED: u8 = 0xFF;

/// Errors that can occur while encoding or decoding telegrams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TelegramError {
    /// Output buffer too small for the result
    BufferTooSmall,
    /// Escape byte followed by an invalid substitution value
    InvalidEscape(u8),
    /// Frame ends in the middle of an escape sequence
    TruncatedEscape,
}

/// Expand one pixel byte into its on-wire symbol pair.
///
/// Bit `i` of the input selects the 2-bit symbol at position `2 * i` of the
/// output. Every symbol has its high bit set, so both halves of the result
/// are at least `0x80` and can never collide with [`FLAG_BYTE`] or
/// [`ESCAPE_BYTE`]. The low half goes on the wire first.
pub const fn expand_pixel_byte(byte: u8) -> u16 {
    let mut code = 0u16;
    let mut bit = 0;
    while bit < 8 {
        let symbol: u16 = if byte & (1 << bit) != 0 { 0b11 } else { 0b10 };
        code |= symbol << (2 * bit);
        bit += 1;
    }
    code
}

/// Collapse an on-wire symbol pair back into its pixel byte.
///
/// Exact inverse of [`expand_pixel_byte`]. Returns `None` if any symbol is
/// not `0b10` or `0b11`.
pub const fn collapse_pixel_byte(code: u16) -> Option<u8> {
    let mut byte = 0u8;
    let mut bit = 0;
    while bit < 8 {
        match (code >> (2 * bit)) & 0b11 {
            0b11 => byte |= 1 << bit,
            0b10 => {}
            _ => return None,
        }
        bit += 1;
    }
    Some(byte)
}

/// Rolling XOR checksum over a frame prefix.
///
/// Callers pass the unstuffed bytes from the opening flag through the last
/// payload byte; the result is stored before the closing flag and stuffed
/// like any other body byte.
pub const fn checksum(bytes: &[u8]) -> u8 {
    let mut acc = CHECKSUM_SEED;
    let mut i = 0;
    while i < bytes.len() {
        acc ^= bytes[i];
        i += 1;
    }
    acc
}

/// Byte-stuff an unstuffed telegram into `out`, returning the stuffed length.
///
/// The stuffable region starts at index 2, past the opening flag and the
/// command byte, and runs through the second-to-last byte (the checksum)
/// inclusive; the closing flag is copied verbatim. Each [`FLAG_BYTE`] or
/// [`ESCAPE_BYTE`] in the region is replaced by [`ESCAPE_BYTE`] followed by
/// the value XOR [`ESCAPE_XOR`]. Single pass, appending to `out`.
pub fn stuff(frame: &[u8], out: &mut [u8]) -> Result<usize, TelegramError> {
    let mut len = 0;
    for (index, &byte) in frame.iter().enumerate() {
        let in_region = index >= 2 && index + 1 < frame.len();
        if in_region && (byte == FLAG_BYTE || byte == ESCAPE_BYTE) {
            if len + 2 > out.len() {
                return Err(TelegramError::BufferTooSmall);
            }
            out[len] = ESCAPE_BYTE;
            out[len + 1] = byte ^ ESCAPE_XOR;
            len += 2;
        } else {
            if len >= out.len() {
                return Err(TelegramError::BufferTooSmall);
            }
            out[len] = byte;
            len += 1;
        }
    }
    Ok(len)
}

/// Reverse the stuffing transform, returning the unstuffed length.
///
/// Escapes are only recognized inside the stuffable region. An escape
/// followed by anything other than a valid substitution is an error, as is
/// a frame that ends mid-escape.
pub fn destuff(frame: &[u8], out: &mut [u8]) -> Result<usize, TelegramError> {
    let mut len = 0;
    let mut index = 0;
    while index < frame.len() {
        let byte = frame[index];
        let in_region = index >= 2 && index + 1 < frame.len();
        let value = if in_region && byte == ESCAPE_BYTE {
            // The substitution must sit inside the region as well, not in
            // the closing flag position.
            if index + 2 >= frame.len() {
                return Err(TelegramError::TruncatedEscape);
            }
            index += 1;
            let substitution = frame[index];
            let restored = substitution ^ ESCAPE_XOR;
            if restored != FLAG_BYTE && restored != ESCAPE_BYTE {
                return Err(TelegramError::InvalidEscape(substitution));
            }
            restored
        } else {
            byte
        };
        if len >= out.len() {
            return Err(TelegramError::BufferTooSmall);
        }
        out[len] = value;
        len += 1;
        index += 1;
    }
    Ok(len)
}
