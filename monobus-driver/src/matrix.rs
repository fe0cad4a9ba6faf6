//! Matrix module geometry and guarded column writes.

use monobus_protocol::{resolve_column, BLOCK_STRIDE, COLUMN_UNUSED};

use crate::bus::Bus;

/// Slots between an end cap's block start and its first usable column.
///
/// End caps wire their 21 columns to the upper slots of their address block.
const END_CAP_OFFSET: u8 = 7;

/// One physical dot-matrix module.
///
/// A matrix couples its pixel geometry to its base slot in the address
/// table. The predefined constructors cover the two module types found in
/// deployed panels; [`Matrix::new`] supports custom chains, in which case
/// the caller guarantees that all `columns` slots from `address` on resolve
/// to valid physical columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Matrix {
    rows: u8,
    columns: u8,
    address: u8,
    index: u8,
}

impl Matrix {
    /// Create a matrix with custom geometry.
    ///
    /// `address` is the module's base slot in the address table, `index` its
    /// position in the chain.
    pub const fn new(rows: u8, columns: u8, address: u8, index: u8) -> Self {
        Self {
            rows,
            columns,
            address,
            index,
        }
    }

    /// Standard 28x28 square module at chain position `index`
    pub const fn square(index: u8) -> Self {
        Self::new(28, 28, index * BLOCK_STRIDE, index)
    }

    /// 28x21 end-cap module at chain position `index`
    pub const fn end_cap(index: u8) -> Self {
        Self::new(28, 21, index * BLOCK_STRIDE + END_CAP_OFFSET, index)
    }

    /// Pixel rows
    pub const fn rows(&self) -> u8 {
        self.rows
    }

    /// Pixel columns
    pub const fn columns(&self) -> u8 {
        self.columns
    }

    /// Base slot in the address table
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Position in the module chain
    pub const fn index(&self) -> u8 {
        self.index
    }

    /// Write one pixel column to this module.
    ///
    /// `address` is the device address on the shared link and `column` the
    /// module-local column. Columns outside the module and columns that
    /// resolve to the sentinel are dropped without touching the bus.
    pub fn write(&self, bus: &mut impl Bus, address: u8, column: u8, pixels: [u8; 4]) {
        if column >= self.columns {
            return;
        }
        let physical = resolve_column(self.address, column);
        if physical == COLUMN_UNUSED {
            return;
        }
        bus.set_pixel_column(address, physical, pixels);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use super::*;

    struct BusSpy {
        calls: Vec<(u8, u8, [u8; 4])>,
    }

    impl BusSpy {
        fn new() -> Self {
            Self { calls: Vec::new() }
        }
    }

    impl Bus for BusSpy {
        fn set_pixel_column(&mut self, address: u8, column: u8, pixels: [u8; 4]) {
            self.calls.push((address, column, pixels));
        }

        fn query_status(&mut self, _address: u8) {}
    }

    #[test]
    fn test_square_geometry() {
        let matrix = Matrix::square(5);
        assert_eq!(matrix.rows(), 28);
        assert_eq!(matrix.columns(), 28);
        assert_eq!(matrix.address(), 160);
        assert_eq!(matrix.index(), 5);
    }

    #[test]
    fn test_end_cap_geometry() {
        let matrix = Matrix::end_cap(6);
        assert_eq!(matrix.rows(), 28);
        assert_eq!(matrix.columns(), 21);
        assert_eq!(matrix.address(), 199);
        assert_eq!(matrix.index(), 6);
    }

    #[test]
    fn test_write_resolves_physical_column() {
        let mut spy = BusSpy::new();
        Matrix::square(1).write(&mut spy, 9, 17, [1, 2, 3, 4]);
        assert_eq!(spy.calls, [(9, 52, [1, 2, 3, 4])]);
    }

    #[test]
    fn test_every_square_column_is_valid() {
        // All 28 columns of every chain position resolve off-sentinel
        for index in 0..8u8 {
            let matrix = Matrix::square(index);
            for column in 0..matrix.columns() {
                let mut spy = BusSpy::new();
                matrix.write(&mut spy, 0, column, [0; 4]);
                assert_eq!(spy.calls.len(), 1, "index {} column {}", index, column);
            }
        }
    }

    #[test]
    fn test_every_end_cap_column_is_valid() {
        for index in 0..8u8 {
            let matrix = Matrix::end_cap(index);
            for column in 0..matrix.columns() {
                let mut spy = BusSpy::new();
                matrix.write(&mut spy, 0, column, [0; 4]);
                assert_eq!(spy.calls.len(), 1, "index {} column {}", index, column);
            }
        }
    }

    #[test]
    fn test_out_of_range_column_is_dropped() {
        let mut spy = BusSpy::new();
        let matrix = Matrix::square(0);
        matrix.write(&mut spy, 0, 28, [0xFF; 4]);
        matrix.write(&mut spy, 0, 255, [0xFF; 4]);
        assert!(spy.calls.is_empty());
    }

    #[test]
    fn test_sentinel_resolution_is_dropped() {
        // A custom geometry can reach the trailing slots of a block; those
        // writes stop at the sentinel check
        let mut spy = BusSpy::new();
        let matrix = Matrix::new(28, 30, 0, 0);
        matrix.write(&mut spy, 0, 28, [0; 4]);
        matrix.write(&mut spy, 0, 29, [0; 4]);
        assert!(spy.calls.is_empty());

        matrix.write(&mut spy, 0, 27, [0; 4]);
        assert_eq!(spy.calls, [(0, 31, [0; 4])]);
    }
}
