//! Composite panel routing.
//!
//! A panel is a row of matrix modules behind one device address. Routing is
//! a static range table: each segment names the first logical column a
//! module serves, and a write walks the table to find the module covering
//! the requested column. Chain positions run right to left, so the module
//! serving the lowest columns carries the highest index.

use crate::bus::Bus;
use crate::matrix::Matrix;

/// One module's span within a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segment {
    /// First logical panel column served by this module
    pub start: u8,
    /// The module serving columns from `start` on
    pub matrix: Matrix,
}

const SQUARE_SEGMENTS: &[Segment] = &[Segment {
    start: 0,
    matrix: Matrix::square(0),
}];

const STRIP_SEGMENTS: &[Segment] = &[
    Segment {
        start: 0,
        matrix: Matrix::end_cap(6),
    },
    Segment {
        start: 21,
        matrix: Matrix::square(5),
    },
    Segment {
        start: 49,
        matrix: Matrix::square(4),
    },
    Segment {
        start: 77,
        matrix: Matrix::square(3),
    },
    Segment {
        start: 105,
        matrix: Matrix::square(2),
    },
    Segment {
        start: 133,
        matrix: Matrix::square(1),
    },
    Segment {
        start: 161,
        matrix: Matrix::square(0),
    },
];

/// A display panel: one or more matrix modules behind a device address
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Panel {
    address: u8,
    width: u8,
    segments: &'static [Segment],
}

impl Panel {
    /// Single 28x28 panel at `address`.
    ///
    /// Logical columns pass through to the one module unchanged.
    pub const fn square(address: u8) -> Self {
        Self {
            address,
            width: 28,
            segments: SQUARE_SEGMENTS,
        }
    }

    /// 189-column composite strip at `address`: six square modules plus a
    /// 21-column end cap serving the leftmost columns.
    pub const fn strip(address: u8) -> Self {
        Self {
            address,
            width: 189,
            segments: STRIP_SEGMENTS,
        }
    }

    /// Device address on the shared link
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Total logical columns
    pub const fn width(&self) -> u8 {
        self.width
    }

    /// Write one pixel column at a panel-logical position.
    ///
    /// Columns at or past the panel width are dropped without touching the
    /// bus.
    pub fn write(&self, bus: &mut impl Bus, column: u8, pixels: [u8; 4]) {
        if column >= self.width {
            return;
        }
        if let Some(segment) = self.segments.iter().rev().find(|s| s.start <= column) {
            segment
                .matrix
                .write(bus, self.address, column - segment.start, pixels);
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use monobus_protocol::resolve_column;
    use proptest::prelude::*;

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
    fn test_square_panel_passes_column_through() {
        let mut spy = BusSpy::new();
        Panel::square(1).write(&mut spy, 5, [0; 4]);
        assert_eq!(spy.calls, [(1, 6, [0; 4])]);
    }

    #[test]
    fn test_square_panel_drops_out_of_range() {
        let mut spy = BusSpy::new();
        let panel = Panel::square(1);
        panel.write(&mut spy, 28, [0; 4]);
        panel.write(&mut spy, 200, [0; 4]);
        assert!(spy.calls.is_empty());
    }

    #[test]
    fn test_strip_routes_to_band_one_square() {
        // Column 150 sits 129 columns past the end cap: band 1, local 17
        let mut spy = BusSpy::new();
        Panel::strip(2).write(&mut spy, 150, [0; 4]);
        assert_eq!(spy.calls, [(2, 52, [0; 4])]);
    }

    #[test]
    fn test_strip_leftmost_columns_hit_end_cap() {
        let mut spy = BusSpy::new();
        let panel = Panel::strip(0);
        panel.write(&mut spy, 0, [0; 4]);
        panel.write(&mut spy, 20, [0; 4]);
        assert_eq!(spy.calls, [(0, 201, [0; 4]), (0, 223, [0; 4])]);
    }

    #[test]
    fn test_strip_segment_boundaries() {
        let mut spy = BusSpy::new();
        let panel = Panel::strip(0);
        panel.write(&mut spy, 21, [0; 4]); // first column of band 5
        panel.write(&mut spy, 48, [0; 4]); // last column of band 5
        panel.write(&mut spy, 49, [0; 4]); // first column of band 4
        panel.write(&mut spy, 188, [0; 4]); // last column of the strip
        assert_eq!(
            spy.calls,
            [
                (0, 161, [0; 4]),
                (0, 191, [0; 4]),
                (0, 129, [0; 4]),
                (0, 31, [0; 4]),
            ]
        );
    }

    #[test]
    fn test_strip_drops_out_of_range() {
        let mut spy = BusSpy::new();
        let panel = Panel::strip(0);
        panel.write(&mut spy, 189, [0; 4]);
        panel.write(&mut spy, 255, [0; 4]);
        assert!(spy.calls.is_empty());
    }

    #[test]
    fn test_panel_accessors() {
        assert_eq!(Panel::strip(3).address(), 3);
        assert_eq!(Panel::strip(3).width(), 189);
        assert_eq!(Panel::square(7).width(), 28);
    }

    proptest! {
        #[test]
        fn strip_routing_matches_band_arithmetic(column in 0u8..189) {
            // The segment table reproduces the band arithmetic of the wire
            // layout: 21 end-cap columns, then 28-column bands indexed from
            // the far side
            let mut spy = BusSpy::new();
            Panel::strip(3).write(&mut spy, column, [0x12, 0x34, 0x56, 0x78]);

            let expected = if column < 21 {
                resolve_column(6 * 32 + 7, column)
            } else {
                let offset = column - 21;
                resolve_column((5 - offset / 28) * 32, offset % 28)
            };
            prop_assert_ne!(expected, 0);
            prop_assert_eq!(spy.calls, [(3, expected, [0x12, 0x34, 0x56, 0x78])]);
        }
    }
}
