//! Active piece module - translation, rotation, and lock timing
//!
//! Exactly one active piece exists at a time; the controller owns it and
//! reinitializes it on every spawn. Every translation - player input,
//! gravity, hard drop, wall kicks - passes through [`ActivePiece::try_move`];
//! nothing else mutates the position.

use crate::core::catalog::{kick_row, rotate_offsets, CellOffset, ShapeData, FOOTPRINT_CELLS};
use crate::core::grid::Grid;
use crate::types::{FrameInput, LOCK_DELAY_MS, MOVE_DELAY_MS, STEP_DELAY_MS};

/// Outcome of one frame update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Still interactive.
    Falling,
    /// The lock transition is due; the controller must commit the piece.
    Lock,
}

/// The falling piece: shape, rotation index, anchor position, and the
/// rotation-transformed footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivePiece {
    pub shape: ShapeData,
    pub position: (i8, i8),
    pub rotation: i8,
    pub cells: [CellOffset; FOOTPRINT_CELLS],
    step_timer_ms: u32,
    move_timer_ms: u32,
    lock_timer_ms: u32,
}

impl ActivePiece {
    /// Fresh piece at the spawn anchor: rotation 0, base footprint, timers
    /// reset. Spawn validity is the controller's problem.
    pub fn spawn(shape: ShapeData, position: (i8, i8)) -> Self {
        Self {
            shape,
            position,
            rotation: 0,
            cells: shape.cells,
            step_timer_ms: 0,
            move_timer_ms: 0,
            lock_timer_ms: 0,
        }
    }

    /// Absolute cells currently occupied by the piece.
    pub fn absolute_cells(&self) -> [(i8, i8); FOOTPRINT_CELLS] {
        let mut out = self.cells;
        for cell in &mut out {
            cell.0 += self.position.0;
            cell.1 += self.position.1;
        }
        out
    }

    /// Attempt a translation. On success the position commits and the
    /// move-repeat and lock timers reset; on failure nothing changes.
    pub fn try_move(&mut self, grid: &Grid, dx: i8, dy: i8) -> bool {
        let candidate = (self.position.0 + dx, self.position.1 + dy);
        if grid.is_valid_position(&self.cells, candidate) {
            self.position = candidate;
            self.move_timer_ms = 0;
            self.lock_timer_ms = 0;
            return true;
        }
        false
    }

    /// Attempt a rotation (+1 clockwise, -1 counter-clockwise) with wall-kick
    /// resolution.
    ///
    /// The rotated footprint is computed fresh, then each kick candidate for
    /// the (new rotation, direction) table row is tried through `try_move`.
    /// The first success commits rotation index, footprint, and translation
    /// together; if every candidate fails the saved footprint is restored and
    /// the position is untouched. All-or-nothing.
    pub fn rotate(&mut self, grid: &Grid, direction: i8) -> bool {
        let next = wrap(i32::from(self.rotation) + i32::from(direction), 0, 4) as i8;
        let previous_cells = self.cells;
        self.cells = rotate_offsets(self.shape.kind, self.cells, direction);

        let row = kick_row(next, direction);
        for i in 0..self.shape.kicks[row].len() {
            let (dx, dy) = self.shape.kicks[row][i];
            if self.try_move(grid, dx, dy) {
                self.rotation = next;
                return true;
            }
        }

        self.cells = previous_cells;
        false
    }

    /// Drop until the piece rests, then demand an immediate lock.
    pub fn hard_drop(&mut self, grid: &Grid) {
        while self.try_move(grid, 0, -1) {}
    }

    /// Advance one frame: rotation and hard-drop edges, repeat-gated held
    /// moves, timed gravity, lock-delay accounting.
    pub fn update(&mut self, grid: &Grid, input: &FrameInput, dt_ms: u32) -> StepOutcome {
        self.lock_timer_ms += dt_ms;

        if input.rotate_ccw_pressed {
            self.rotate(grid, -1);
        } else if input.rotate_cw_pressed {
            self.rotate(grid, 1);
        }

        if input.hard_drop_pressed {
            self.hard_drop(grid);
            return StepOutcome::Lock;
        }

        self.move_timer_ms += dt_ms;
        if self.move_timer_ms >= MOVE_DELAY_MS {
            self.handle_held_moves(grid, input);
        }

        self.step_timer_ms += dt_ms;
        if self.step_timer_ms >= STEP_DELAY_MS {
            self.step_timer_ms = 0;
            self.try_move(grid, 0, -1);
            // A successful step just reset the lock timer; only a piece that
            // can no longer fall accumulates toward the lock delay.
            if self.lock_timer_ms >= LOCK_DELAY_MS {
                return StepOutcome::Lock;
            }
        }

        StepOutcome::Falling
    }

    fn handle_held_moves(&mut self, grid: &Grid, input: &FrameInput) {
        if input.soft_drop_held && self.try_move(grid, 0, -1) {
            // Soft drop replaces the pending gravity step.
            self.step_timer_ms = 0;
        }
        if input.move_left_held {
            self.try_move(grid, -1, 0);
        } else if input.move_right_held {
            self.try_move(grid, 1, 0);
        }
    }
}

/// Canonical modular wrap into `[min, max)`, correct for negative inputs.
pub fn wrap(value: i32, min: i32, max: i32) -> i32 {
    min + (value - min).rem_euclid(max - min)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::ShapeCatalog;
    use crate::types::{PieceKind, SPAWN_POSITION};

    fn piece(kind: PieceKind) -> ActivePiece {
        let catalog = ShapeCatalog::standard();
        ActivePiece::spawn(*catalog.get(kind), SPAWN_POSITION)
    }

    #[test]
    fn wrap_handles_negative_and_boundary_inputs() {
        assert_eq!(wrap(-1, 0, 4), 3);
        assert_eq!(wrap(4, 0, 4), 0);
        assert_eq!(wrap(0, 0, 4), 0);
        assert_eq!(wrap(-4, 0, 4), 0);
        assert_eq!(wrap(-5, 0, 4), 3);
        assert_eq!(wrap(7, 0, 4), 3);
    }

    #[test]
    fn try_move_commits_and_resets_timers() {
        let grid = Grid::new();
        let mut p = piece(PieceKind::T);
        p.lock_timer_ms = 300;
        p.move_timer_ms = 80;

        assert!(p.try_move(&grid, 1, 0));
        assert_eq!(p.position, (SPAWN_POSITION.0 + 1, SPAWN_POSITION.1));
        assert_eq!(p.lock_timer_ms, 0);
        assert_eq!(p.move_timer_ms, 0);
    }

    #[test]
    fn try_move_rejects_out_of_bounds() {
        let grid = Grid::new();
        let mut p = piece(PieceKind::T);

        // Walk into the left wall: eventually every further move fails and
        // the position stops changing.
        while p.try_move(&grid, -1, 0) {}
        let resting = p.position;
        assert!(!p.try_move(&grid, -1, 0));
        assert_eq!(p.position, resting);

        // Leftmost footprint cell sits exactly on the wall.
        let min_x = p.absolute_cells().iter().map(|c| c.0).min().unwrap();
        assert_eq!(min_x, grid.bounds().x_min);
    }

    #[test]
    fn rotation_in_open_space_is_own_inverse() {
        let grid = Grid::new();
        for kind in PieceKind::ALL {
            let mut p = piece(kind);
            let original = p;

            assert!(p.rotate(&grid, 1), "{kind:?} cw rotation in open space");
            assert_eq!(p.rotation, 1);
            assert!(p.rotate(&grid, -1), "{kind:?} ccw rotation in open space");

            assert_eq!(p.rotation, 0);
            assert_eq!(p.cells, original.cells);
            assert_eq!(p.position, original.position, "no kick should be needed");
        }
    }

    #[test]
    fn rotation_index_wraps_through_all_states() {
        let grid = Grid::new();
        let mut p = piece(PieceKind::J);
        for expected in [1, 2, 3, 0] {
            assert!(p.rotate(&grid, 1));
            assert_eq!(p.rotation, expected);
        }
        assert!(p.rotate(&grid, -1));
        assert_eq!(p.rotation, 3);
    }

    #[test]
    fn rotation_against_wall_kicks_inward() {
        let grid = Grid::new();
        let mut p = piece(PieceKind::I);

        // Vertical I hugging the left wall.
        assert!(p.rotate(&grid, 1));
        while p.try_move(&grid, -1, 0) {}
        let x_before = p.position.0;

        // Rotating back to horizontal cannot fit in place; a kick must
        // translate the piece off the wall.
        assert!(p.rotate(&grid, 1));
        assert_ne!(p.position.0, x_before);
        assert!(grid.is_valid_position(&p.cells, p.position));
    }

    #[test]
    fn blocked_rotation_reverts_completely() {
        // Box the piece in so that every kick candidate collides.
        let mut grid = Grid::new();
        let b = grid.bounds();
        for y in b.y_min..b.y_max {
            for x in b.x_min..b.x_max {
                grid.set(x, y, Some(PieceKind::L));
            }
        }

        // Carve out exactly the spawn footprint of a vertical-unfriendly S.
        let mut p = piece(PieceKind::S);
        for (x, y) in p.absolute_cells() {
            grid.set(x, y, None);
        }

        let before = p;
        assert!(!p.rotate(&grid, 1));
        assert_eq!(p.rotation, before.rotation);
        assert_eq!(p.cells, before.cells);
        assert_eq!(p.position, before.position);
    }

    #[test]
    fn gravity_steps_after_interval() {
        let grid = Grid::new();
        let mut p = piece(PieceKind::T);
        let y0 = p.position.1;

        // One full step interval of empty frames.
        let frames = STEP_DELAY_MS / 16 + 1;
        for _ in 0..frames {
            assert_eq!(p.update(&grid, &FrameInput::default(), 16), StepOutcome::Falling);
        }
        assert_eq!(p.position.1, y0 - 1);
    }

    #[test]
    fn soft_drop_descends_and_resets_step_timer() {
        let grid = Grid::new();
        let mut p = piece(PieceKind::T);
        let y0 = p.position.1;

        let input = FrameInput {
            soft_drop_held: true,
            ..FrameInput::default()
        };
        // Enough frames for the move-repeat gate to open at least once.
        for _ in 0..=(MOVE_DELAY_MS / 16) {
            p.update(&grid, &input, 16);
        }
        assert!(p.position.1 < y0);
    }

    #[test]
    fn held_move_walks_toward_wall() {
        let grid = Grid::new();
        let mut p = piece(PieceKind::O);
        let input = FrameInput {
            move_left_held: true,
            ..FrameInput::default()
        };
        for _ in 0..200 {
            p.update(&grid, &input, 16);
        }
        let min_x = p.absolute_cells().iter().map(|c| c.0).min().unwrap();
        assert_eq!(min_x, grid.bounds().x_min);
    }

    #[test]
    fn grounded_piece_locks_after_delay() {
        let grid = Grid::new();
        let mut p = piece(PieceKind::O);
        p.hard_drop(&grid);

        // Resting on the floor: gravity steps fail, the lock timer runs out.
        let mut outcome = StepOutcome::Falling;
        for _ in 0..((STEP_DELAY_MS + LOCK_DELAY_MS) / 16 + 2) {
            outcome = p.update(&grid, &FrameInput::default(), 16);
            if outcome == StepOutcome::Lock {
                break;
            }
        }
        assert_eq!(outcome, StepOutcome::Lock);
    }

    #[test]
    fn hard_drop_reaches_floor_and_demands_lock() {
        let grid = Grid::new();
        let mut p = piece(PieceKind::T);
        let input = FrameInput {
            hard_drop_pressed: true,
            ..FrameInput::default()
        };

        assert_eq!(p.update(&grid, &input, 16), StepOutcome::Lock);
        let min_y = p.absolute_cells().iter().map(|c| c.1).min().unwrap();
        assert_eq!(min_y, grid.bounds().y_min);
    }
}
