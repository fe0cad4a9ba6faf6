//! MonoBus Wire Protocol
//!
//! This crate defines the one-way serial protocol between a controller and
//! chains of addressable LED dot-matrix panels. The controller pushes
//! column-oriented pixel data; panels never reply on this link.
//!
//! # Protocol Overview
//!
//! Pixel data travels in flag-delimited telegrams:
//! ```text
//! ┌──────┬─────────┬────────┬─────────┬──────────┬──────┐
//! │ FLAG │ COMMAND │ COLUMN │ PAYLOAD │ CHECKSUM │ FLAG │
//! │ 0x7E │ 1B      │ 1B     │ 8B      │ 1B       │ 0x7E │
//! └──────┴─────────┴────────┴─────────┴──────────┴──────┘
//! ```
//!
//! The column byte comes from a fixed 256-entry address table shared by all
//! module chains. The payload expands four pixel bytes into 2-bit symbols,
//! which keeps every payload byte at 0x80 or above and out of the flag's
//! value range; the frame body is byte-stuffed HDLC-style for the bytes
//! that can still collide with it.

#![no_std]
#![deny(unsafe_code)]

pub mod address;
pub mod codec;
pub mod telegram;

pub use address::{resolve_column, ADDRESS_TABLE, BLOCK_STRIDE, COLUMNS_PER_BLOCK, COLUMN_UNUSED};
pub use codec::{
    checksum, collapse_pixel_byte, destuff, expand_pixel_byte, stuff, TelegramError,
    CHECKSUM_SEED, ESCAPE_BYTE, ESCAPE_XOR, FLAG_BYTE,
};
pub use telegram::{
    Telegram, ADDRESS_MASK, MAX_TELEGRAM_LEN, PIXEL_COMMAND, PIXEL_TELEGRAM_LEN, STATUS_COMMAND,
    STATUS_TELEGRAM_LEN,
};
