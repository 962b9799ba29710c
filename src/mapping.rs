//! Logical (row, col) to physical LED index lookup.
//!
//! The panel is wired as a serpentine: each row runs in the opposite
//! direction of the one above it, and row blocks are stacked from the
//! bottom of the strip upwards. The offsets are properties of one specific
//! board, so the table is written out literally.

pub const ROWS: usize = 6;
pub const COLS: usize = 12;

#[rustfmt::skip]
const WIRING: [[u16; COLS]; ROWS] = [
    [60, 61, 62, 63, 64, 65, 66, 67, 68, 69, 70, 71],
    [59, 58, 57, 56, 55, 54, 53, 52, 51, 50, 49, 48],
    [36, 37, 38, 39, 40, 41, 42, 43, 44, 45, 46, 47],
    [35, 34, 33, 32, 31, 30, 29, 28, 27, 26, 25, 24],
    [12, 13, 14, 15, 16, 17, 18, 19, 20, 21, 22, 23],
    [11, 10,  9,  8,  7,  6,  5,  4,  3,  2,  1,  0],
];

/// Fixed mapping from grid position to position on the LED strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMapping {
    width: usize,
    height: usize,
    table: Vec<u16>,
}

impl IndexMapping {
    /// Mapping for the 12x6 controller board
    pub fn matrix_12x6() -> Self {
        IndexMapping {
            width: COLS,
            height: ROWS,
            table: WIRING.iter().flatten().copied().collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn led_count(&self) -> usize {
        self.width * self.height
    }

    /// Physical index of the LED at (row, col).
    ///
    /// # Panics
    /// If (row, col) lies outside the mapped grid.
    pub fn get(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.height && col < self.width,
            "no LED mapped at ({}, {}) on a {}x{} panel",
            row,
            col,
            self.width,
            self.height
        );
        self.table[row * self.width + col] as usize
    }
}

impl Default for IndexMapping {
    fn default() -> Self {
        IndexMapping::matrix_12x6()
    }
}
