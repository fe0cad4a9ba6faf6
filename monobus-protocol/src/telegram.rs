//! Telegram assembly for the MonoBus wire format.
//!
//! Pixel telegram, before stuffing (13 bytes):
//! - FLAG (1 byte): 0x7E opening flag
//! - COMMAND (1 byte): 0xA0 with the device address in the low nibble
//! - COLUMN (1 byte): physical column byte from the address table
//! - PAYLOAD (8 bytes): four pixel bytes, each expanded to a symbol pair,
//!   low half first
//! - CHECKSUM (1 byte): XOR over bytes 0..=10, seeded 0xFF
//! - FLAG (1 byte): 0x7E closing flag
//!
//! Status telegram (5 bytes):
//! - FLAG, COMMAND (0x80 with the address nibble), a 0x00 placeholder,
//!   CHECKSUM over bytes 0..=2, FLAG
//!
//! Pixel telegrams are byte-stuffed after the checksum is computed; only the
//! column and checksum bytes can hold reserved values, since expanded
//! payload bytes are always 0x80 or above.

use heapless::Vec;

use crate::codec::{checksum, expand_pixel_byte, stuff, TelegramError, FLAG_BYTE};

/// Command byte for a pixel column write, low nibble carries the address
pub const PIXEL_COMMAND: u8 = 0xA0;

/// Command byte for a status query, low nibble carries the address
pub const STATUS_COMMAND: u8 = 0x80;

/// Mask selecting the device address bits of a command byte
pub const ADDRESS_MASK: u8 = 0x0F;

/// Pixel telegram length before stuffing
pub const PIXEL_TELEGRAM_LEN: usize = 13;

/// Status telegram length; status telegrams are never stuffed
pub const STATUS_TELEGRAM_LEN: usize = 5;

/// Worst-case on-wire length: every stuffable byte of a pixel telegram
/// doubled (column, payload and checksum; flags and command are exempt)
pub const MAX_TELEGRAM_LEN: usize = PIXEL_TELEGRAM_LEN + (PIXEL_TELEGRAM_LEN - 3);

/// A single MonoBus telegram, ready to encode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Telegram {
    /// Write one pixel column to a device
    PixelColumn {
        /// Device address on the shared link
        address: u8,
        /// Physical column byte, already resolved through the address table
        column: u8,
        /// Packed column pixels, bit 0 of the first byte first on the wire
        pixels: [u8; 4],
    },
    /// Ask a device to report its status
    ///
    /// Replies travel outside this link; this telegram only requests one.
    StatusQuery {
        /// Device address on the shared link
        address: u8,
    },
}

impl Telegram {
    /// Encode this telegram into a byte buffer.
    ///
    /// Returns the number of bytes written. Pixel telegrams are checksummed
    /// and then byte-stuffed, so their on-wire length varies between
    /// [`PIXEL_TELEGRAM_LEN`] and [`MAX_TELEGRAM_LEN`].
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, TelegramError> {
        match *self {
            Telegram::PixelColumn {
                address,
                column,
                pixels,
            } => {
                let mut frame = [0u8; PIXEL_TELEGRAM_LEN];
                frame[0] = FLAG_BYTE;
                frame[1] = PIXEL_COMMAND | (address & ADDRESS_MASK);
                frame[2] = column;
                for (slot, &pixel) in pixels.iter().enumerate() {
                    let code = expand_pixel_byte(pixel);
                    frame[3 + 2 * slot] = code as u8;
                    frame[4 + 2 * slot] = (code >> 8) as u8;
                }
                let check = checksum(&frame[..11]);
                frame[11] = check;
                frame[12] = FLAG_BYTE;
                stuff(&frame, buffer)
            }
            Telegram::StatusQuery { address } => {
                if buffer.len() < STATUS_TELEGRAM_LEN {
                    return Err(TelegramError::BufferTooSmall);
                }
                buffer[0] = FLAG_BYTE;
                buffer[1] = STATUS_COMMAND | (address & ADDRESS_MASK);
                buffer[2] = 0x00; // placeholder, kept in the checksum
                let check = checksum(&buffer[..3]);
                buffer[3] = check;
                buffer[4] = FLAG_BYTE;
                Ok(STATUS_TELEGRAM_LEN)
            }
        }
    }

    /// Encode this telegram into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_TELEGRAM_LEN>, TelegramError> {
        let mut buffer = [0u8; MAX_TELEGRAM_LEN];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| TelegramError::BufferTooSmall)?;
        Ok(vec)
    }
}
