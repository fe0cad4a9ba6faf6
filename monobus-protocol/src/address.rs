//! Logical-to-physical column addressing.
//!
//! Panels do not number their columns contiguously on the wire. Each matrix
//! module owns a 32-entry block of a 256-entry table; the first 28 slots of
//! a block hold the physical column bytes for that module, the last 4 hold
//! the sentinel. Physical column values skip multiples of 8, which is how 28
//! columns fit a block that spans 32 values.

/// Sentinel for table slots that map to no physical column.
///
/// Never a valid column byte; writes that resolve to it are dropped before
/// they reach the bus.
pub const COLUMN_UNUSED: u8 = 0;

/// Table entries reserved per matrix module
pub const BLOCK_STRIDE: u8 = 32;

/// Usable column slots per block
pub const COLUMNS_PER_BLOCK: u8 = 28;

const fn build_table() -> [u8; 256] {
    let mut table = [COLUMN_UNUSED; 256];
    let mut block = 0;
    while block < 8 {
        let mut slot = 0;
        while slot < COLUMNS_PER_BLOCK as usize {
            // Groups of 7 consecutive values, skipping every multiple of 8
            table[block * 32 + slot] = (block * 32 + (slot / 7) * 8 + (slot % 7) + 1) as u8;
            slot += 1;
        }
        block += 1;
    }
    table
}

/// Map from linear table index to physical column byte
pub const ADDRESS_TABLE: [u8; 256] = build_table();

/// Resolve a module-local column to its physical column byte.
///
/// `address` is the module's base slot in the table. Indices past the end of
/// the table resolve to [`COLUMN_UNUSED`], as do the 4 trailing slots of
/// every block.
pub const fn resolve_column(address: u8, column: u8) -> u8 {
    let index = address as usize + column as usize;
    if index < ADDRESS_TABLE.len() {
        ADDRESS_TABLE[index]
    } else {
        COLUMN_UNUSED
    }
}
