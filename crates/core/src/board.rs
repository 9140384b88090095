//! Board module - manages the game grid
//!
//! The board is an N x N grid of tile values where 0 means empty.
//! Uses a flat row-major buffer (row * size + col) for cache locality.
//! Coordinates are `(row, col)`, both counting from the top-left corner.
//!
//! Lines are the unit the move code works on: for a direction, line `i` is
//! the row or column that slides, read starting from the edge tiles travel
//! toward. See [`Board::read_line`].

use thiserror::Error;

use crate::types::{Direction, Tile, DEFAULT_BOARD_SIZE, MAX_BOARD_SIZE, MIN_BOARD_SIZE};

/// Rejected board layouts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("board has no rows")]
    Empty,
    #[error("board size {size} is below the minimum of {min}")]
    TooSmall { size: usize, min: usize },
    #[error("board size {size} exceeds the maximum of {max}")]
    TooLarge { size: usize, max: usize },
    #[error("row {row} has {len} cells, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },
    #[error("cell ({row}, {col}) holds {value}, which is not a power of two")]
    InvalidTile { row: usize, col: usize, value: Tile },
}

/// The game board - `size` x `size` cells in a flat buffer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    size: usize,
    /// Flat array of cells, row-major order (row * size + col)
    cells: Vec<Tile>,
}

impl Board {
    /// Create an empty board. The size is clamped to `MIN_BOARD_SIZE..=MAX_BOARD_SIZE`.
    pub fn new(size: usize) -> Self {
        let size = size.clamp(MIN_BOARD_SIZE, MAX_BOARD_SIZE);
        Self {
            size,
            cells: vec![0; size * size],
        }
    }

    /// Build a board from explicit rows, validating shape and tile values.
    pub fn from_rows<R: AsRef<[Tile]>>(rows: &[R]) -> Result<Self, BoardError> {
        let size = rows.len();
        if size == 0 {
            return Err(BoardError::Empty);
        }
        if size < MIN_BOARD_SIZE {
            return Err(BoardError::TooSmall {
                size,
                min: MIN_BOARD_SIZE,
            });
        }
        if size > MAX_BOARD_SIZE {
            return Err(BoardError::TooLarge {
                size,
                max: MAX_BOARD_SIZE,
            });
        }

        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != size {
                return Err(BoardError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            for (col, &value) in values.iter().enumerate() {
                // 1 is 2^0 but never a legal tile.
                if value == 1 || (value != 0 && !value.is_power_of_two()) {
                    return Err(BoardError::InvalidTile { row, col, value });
                }
                cells.push(value);
            }
        }

        Ok(Self { size, cells })
    }

    /// Build a board from a fixed-size array literal.
    pub fn from_array<const N: usize>(rows: [[Tile; N]; N]) -> Result<Self, BoardError> {
        Self::from_rows(&rows)
    }

    /// Calculate flat index from (row, col)
    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row >= self.size || col >= self.size {
            return None;
        }
        Some(row * self.size + col)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Get the tile at (row, col), `None` if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Set the tile at (row, col). Returns false if out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: Tile) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    pub fn cells(&self) -> &[Tile] {
        &self.cells
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.cells.chunks(self.size)
    }

    pub fn to_rows(&self) -> Vec<Vec<Tile>> {
        self.rows().map(|r| r.to_vec()).collect()
    }

    /// Iterate empty cell coordinates in row-major order
    pub fn empty_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let size = self.size;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &v)| v == 0)
            .map(move |(i, _)| (i / size, i % size))
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    pub fn tile_count(&self) -> usize {
        self.cells.len() - self.empty_count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&v| v != 0)
    }

    pub fn max_tile(&self) -> Tile {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Board coordinates of position `k` along line `line` for `direction`.
    ///
    /// `k == 0` is the edge tiles slide toward.
    #[inline(always)]
    pub fn line_cell(&self, direction: Direction, line: usize, k: usize) -> (usize, usize) {
        let pos = if direction.is_reversed() {
            self.size - 1 - k
        } else {
            k
        };
        if direction.is_vertical() {
            (pos, line)
        } else {
            (line, pos)
        }
    }

    /// Copy line `line` into `out` in slide order for `direction`.
    ///
    /// `out` must hold exactly `size` cells.
    pub fn read_line(&self, direction: Direction, line: usize, out: &mut [Tile]) {
        debug_assert_eq!(out.len(), self.size);
        for (k, slot) in out.iter_mut().enumerate() {
            let (r, c) = self.line_cell(direction, line, k);
            *slot = self.cells[r * self.size + c];
        }
    }

    /// Write `values` (in slide order) back to line `line` for `direction`.
    pub fn write_line(&mut self, direction: Direction, line: usize, values: &[Tile]) {
        debug_assert_eq!(values.len(), self.size);
        for (k, &v) in values.iter().enumerate() {
            let (r, c) = self.line_cell(direction, line, k);
            self.cells[r * self.size + c] = v;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_BOARD_SIZE)
    }
}
