//! Ghost projector - hard-drop landing preview
//!
//! Pure read-only companion to the active piece: recomputed every frame,
//! never persisted, never touches grid occupancy. The footprint always
//! matches the active piece's current rotation.

use crate::core::catalog::FOOTPRINT_CELLS;
use crate::core::grid::Grid;
use crate::core::piece::ActivePiece;

/// Lowest valid resting position for the piece's current footprint, scanning
/// straight down from its current row. The piece itself is valid where it
/// stands, so the scan always yields at least that position.
pub fn drop_position(grid: &Grid, piece: &ActivePiece) -> (i8, i8) {
    let floor = grid.bounds().y_min;
    let mut resting = piece.position;

    let mut y = piece.position.1;
    while y >= floor - 1 {
        let candidate = (piece.position.0, y);
        if grid.is_valid_position(&piece.cells, candidate) {
            resting = candidate;
        } else {
            break;
        }
        y -= 1;
    }

    resting
}

/// Absolute cells of the ghost preview.
pub fn cells(grid: &Grid, piece: &ActivePiece) -> [(i8, i8); FOOTPRINT_CELLS] {
    let (gx, gy) = drop_position(grid, piece);
    let mut out = piece.cells;
    for cell in &mut out {
        cell.0 += gx;
        cell.1 += gy;
    }
    out
}
