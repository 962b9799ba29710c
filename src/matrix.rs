use crate::color::Color;

/// Logical grid of LED colors, stored row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<Color>,
}

impl Frame {
    /// Create a frame with every cell black
    pub fn new(width: usize, height: usize) -> Self {
        Frame {
            width,
            height,
            cells: vec![Color::BLACK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, row: usize, col: usize) -> Color {
        self.cells[self.offset(row, col)]
    }

    pub fn set(&mut self, row: usize, col: usize, color: Color) {
        let offset = self.offset(row, col);
        self.cells[offset] = color;
    }

    pub fn clear(&mut self, color: Color) {
        self.cells.fill(color);
    }

    /// Iterate over `(row, col, color)` in row-major order
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Color)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, &color)| (i / width, i % width, color))
    }

    fn offset(&self, row: usize, col: usize) -> usize {
        // A bad column would otherwise silently land in the next row.
        assert!(
            row < self.height && col < self.width,
            "cell ({}, {}) is outside the {}x{} frame",
            row,
            col,
            self.width,
            self.height
        );
        row * self.width + col
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_new_frame_is_black() {
        let frame = Frame::new(12, 6);
        assert_eq!(frame.cells().count(), 72);
        assert!(frame.cells().all(|(_, _, c)| c == Color::BLACK));
    }

    #[test]
    fn test_set_and_get() {
        let mut frame = Frame::new(12, 6);
        frame.set(2, 7, Color::new(1, 2, 3));
        assert_eq!(frame.get(2, 7), Color::new(1, 2, 3));
        assert_eq!(frame.get(2, 6), Color::BLACK);
    }

    #[test]
    fn test_clear_fills_every_cell() {
        let mut frame = Frame::new(12, 6);
        frame.set(0, 0, Color::WHITE);
        frame.clear(Color::new(9, 9, 9));
        assert!(frame.cells().all(|(_, _, c)| c == Color::new(9, 9, 9)));
    }

    #[test]
    fn test_cells_are_row_major() {
        let frame = Frame::new(3, 2);
        let positions: Vec<_> = frame.cells().map(|(r, c, _)| (r, c)).collect();
        assert_eq!(positions, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    #[should_panic(expected = "outside the 12x6 frame")]
    fn test_set_row_out_of_bounds_panics() {
        Frame::new(12, 6).set(6, 0, Color::WHITE);
    }

    #[test]
    #[should_panic(expected = "cell (0, 12)")]
    fn test_get_col_out_of_bounds_panics() {
        Frame::new(12, 6).get(0, 12);
    }
}
