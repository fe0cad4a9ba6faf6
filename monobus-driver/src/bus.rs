//! Bus abstraction and the serial `Bus5` implementation.

use embedded_io::Write;

use monobus_protocol::{Telegram, MAX_TELEGRAM_LEN};

/// Capability interface for emitting telegrams onto a panel link.
///
/// The link is one-way and fire-and-forget: implementations emit the
/// telegram and return nothing. Matrix and panel writers address any `Bus`,
/// which keeps them independent of the physical interconnect.
pub trait Bus {
    /// Emit one pixel column to the device at `address`.
    ///
    /// `column` is the physical column byte, already resolved through the
    /// address table.
    fn set_pixel_column(&mut self, address: u8, column: u8, pixels: [u8; 4]);

    /// Emit a status query to the device at `address`.
    ///
    /// Replies travel outside this link and are not handled here.
    fn query_status(&mut self, address: u8);
}

/// Bus implementation for the 5-wire panel interconnect.
///
/// Owns the byte sink and a scratch buffer reused for every telegram; the
/// buffer contents are only meaningful while a send is in progress. Sink
/// failures are swallowed, matching the fire-and-forget link: with the
/// `defmt` feature enabled they are logged as warnings.
pub struct Bus5<W> {
    stream: W,
    buffer: [u8; MAX_TELEGRAM_LEN],
}

impl<W: Write> Bus5<W> {
    /// Create a bus over a byte sink
    pub fn new(stream: W) -> Self {
        Self {
            stream,
            buffer: [0; MAX_TELEGRAM_LEN],
        }
    }

    /// Consume the bus and hand back the sink
    pub fn release(self) -> W {
        self.stream
    }

    fn emit(&mut self, telegram: Telegram) {
        // The scratch buffer covers the worst-case stuffed length, so
        // encoding into it cannot run out of room
        if let Ok(len) = telegram.encode(&mut self.buffer) {
            #[cfg(feature = "defmt")]
            defmt::trace!("monobus tx: {=[u8]:02x}", &self.buffer[..len]);
            if self.stream.write_all(&self.buffer[..len]).is_err() {
                #[cfg(feature = "defmt")]
                defmt::warn!("monobus: sink write failed, telegram dropped");
            }
        }
    }
}

impl<W: Write> Bus for Bus5<W> {
    fn set_pixel_column(&mut self, address: u8, column: u8, pixels: [u8; 4]) {
        self.emit(Telegram::PixelColumn {
            address,
            column,
            pixels,
        });
    }

    fn query_status(&mut self, address: u8) {
        self.emit(Telegram::StatusQuery { address });
    }
}
