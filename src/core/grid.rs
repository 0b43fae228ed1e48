//! Grid module - the bounded playing field
//!
//! Occupancy truth only: the grid stores locked tiles, never the falling
//! piece (the view composes the two each frame). Coordinates are centered
//! and y-up: a WxH board spans [-W/2, -W/2+W) x [-H/2, -H/2+H).

use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// A grid cell: empty or occupied by a locked tile of some kind.
pub type Tile = Option<PieceKind>;

/// Half-open rectangular extent of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x_min: i8,
    pub y_min: i8,
    pub x_max: i8,
    pub y_max: i8,
}

impl Bounds {
    pub fn contains(&self, x: i8, y: i8) -> bool {
        x >= self.x_min && x < self.x_max && y >= self.y_min && y < self.y_max
    }

    pub fn width(&self) -> i8 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> i8 {
        self.y_max - self.y_min
    }
}

/// The playing field. Row-major flat storage, created once per session;
/// game over clears the occupancy but the grid itself persists.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: i8,
    height: i8,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Empty grid at the default 16x20 size.
    pub fn new() -> Self {
        Self::with_size(BOARD_WIDTH, BOARD_HEIGHT)
    }

    /// Empty grid with custom dimensions, still centered at the origin.
    pub fn with_size(width: i8, height: i8) -> Self {
        assert!(width > 0 && height > 0, "grid dimensions must be positive");
        Self {
            width,
            height,
            tiles: vec![None; width as usize * height as usize],
        }
    }

    /// The fixed rectangular extent derived from the configured size.
    pub fn bounds(&self) -> Bounds {
        let x_min = -self.width / 2;
        let y_min = -self.height / 2;
        Bounds {
            x_min,
            y_min,
            x_max: x_min + self.width,
            y_max: y_min + self.height,
        }
    }

    fn index(&self, x: i8, y: i8) -> Option<usize> {
        let b = self.bounds();
        if !b.contains(x, y) {
            return None;
        }
        let col = (x - b.x_min) as usize;
        let row = (y - b.y_min) as usize;
        Some(row * self.width as usize + col)
    }

    /// Tile at a cell; `None` for empty cells and everything out of bounds.
    pub fn tile(&self, x: i8, y: i8) -> Tile {
        self.index(x, y).and_then(|i| self.tiles[i])
    }

    /// True only when a locked tile exists at the cell.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        self.tile(x, y).is_some()
    }

    /// Write a cell. Out-of-bounds writes are dropped.
    pub fn set(&mut self, x: i8, y: i8, tile: Tile) {
        if let Some(i) = self.index(x, y) {
            self.tiles[i] = tile;
        }
    }

    /// True when every cell of the footprint, translated to `position`, is
    /// in bounds and unoccupied. Short-circuits on the first violation.
    pub fn is_valid_position(&self, cells: &[(i8, i8)], position: (i8, i8)) -> bool {
        let b = self.bounds();
        cells.iter().all(|&(dx, dy)| {
            let x = position.0 + dx;
            let y = position.1 + dy;
            b.contains(x, y) && !self.is_occupied(x, y)
        })
    }

    /// Mark the footprint occupied. No validity check; the caller must have
    /// validated the position first.
    pub fn place(&mut self, cells: &[(i8, i8)], position: (i8, i8), kind: PieceKind) {
        for &(dx, dy) in cells {
            self.set(position.0 + dx, position.1 + dy, Some(kind));
        }
    }

    /// Mark the footprint unoccupied. Idempotent.
    pub fn clear_cells(&mut self, cells: &[(i8, i8)], position: (i8, i8)) {
        for &(dx, dy) in cells {
            self.set(position.0 + dx, position.1 + dy, None);
        }
    }

    /// True iff every column of row `y` is occupied.
    pub fn is_row_full(&self, y: i8) -> bool {
        let b = self.bounds();
        if y < b.y_min || y >= b.y_max {
            return false;
        }
        (b.x_min..b.x_max).all(|x| self.is_occupied(x, y))
    }

    /// Clear all full rows, compacting the stack, and return how many rows
    /// were removed.
    ///
    /// Scans from the floor upward. After clearing a row the same index is
    /// re-examined instead of advancing: the stack above has fallen into it
    /// and may itself be full. This yields correct multi-line clears in a
    /// single pass.
    pub fn clear_lines_cascade(&mut self) -> u32 {
        let b = self.bounds();
        let mut cleared = 0u32;
        let mut row = b.y_min;

        while row < b.y_max {
            if self.is_row_full(row) {
                self.clear_row_and_shift(row);
                cleared += 1;
            } else {
                row += 1;
            }
        }

        cleared
    }

    /// Empty one row, then shift every row above it down by one. The top
    /// row ends empty (`tile` reads past `y_max` as empty).
    fn clear_row_and_shift(&mut self, row: i8) {
        let b = self.bounds();
        for col in b.x_min..b.x_max {
            self.set(col, row, None);
        }

        let mut r = row;
        while r < b.y_max {
            for col in b.x_min..b.x_max {
                let above = self.tile(col, r + 1);
                self.set(col, r, above);
            }
            r += 1;
        }
    }

    /// Empty every cell. The grid object survives; only occupancy resets.
    pub fn clear_all(&mut self) {
        for tile in &mut self.tiles {
            *tile = None;
        }
    }

    /// Count of occupied cells (handy in tests and the score line).
    pub fn occupied_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
