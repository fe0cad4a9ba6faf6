//! MonoBus Panel Driver
//!
//! Device-level layer over `monobus-protocol`: the [`Bus`] capability trait,
//! the serial [`Bus5`] implementation, and the [`Matrix`] and [`Panel`]
//! types that route logical columns onto the wire.
//!
//! # Send path
//!
//! ```text
//! Panel::write ──► Matrix::write ──► Bus::set_pixel_column ──► byte sink
//!   width guard      range guard,       telegram encode,
//!   and routing      column lookup      checksum, stuffing
//! ```
//!
//! A panel maps a logical column to one module and a module-local column;
//! the matrix maps that to the physical column byte; the bus encodes and
//! emits the telegram. Invalid positions are dropped silently at the layer
//! that detects them, so a full-width redraw loop needs no bounds handling
//! of its own.

#![no_std]
#![deny(unsafe_code)]

pub mod bus;
pub mod matrix;
pub mod panel;

// Re-export key types
pub use bus::{Bus, Bus5};
pub use matrix::Matrix;
pub use panel::{Panel, Segment};
