//! Game controller - owns the grid and the active piece
//!
//! Orchestrates spawn -> play -> lock -> line clear -> respawn, detects
//! game over, and reports lock events for the score sink. All gameplay
//! mutation happens inside [`Game::update`]; the ghost accessors only read.

use crate::core::catalog::{ShapeCatalog, FOOTPRINT_CELLS};
use crate::core::ghost;
use crate::core::grid::Grid;
use crate::core::piece::{ActivePiece, StepOutcome};
use crate::core::rng::SimpleRng;
use crate::types::{FrameInput, LockEvent, SPAWN_POSITION};

/// Complete game session state.
#[derive(Debug, Clone)]
pub struct Game {
    grid: Grid,
    catalog: ShapeCatalog,
    active: Option<ActivePiece>,
    rng: SimpleRng,
    spawn_position: (i8, i8),
    game_over: bool,
    last_event: Option<LockEvent>,
}

impl Game {
    /// New session on the default grid with the standard catalog.
    pub fn new(seed: u32) -> Self {
        Self::from_grid(Grid::new(), seed)
    }

    /// New session on a prepared grid (custom size or pre-filled cells).
    pub fn from_grid(grid: Grid, seed: u32) -> Self {
        Self {
            grid,
            catalog: ShapeCatalog::standard(),
            active: None,
            rng: SimpleRng::new(seed),
            spawn_position: SPAWN_POSITION,
            game_over: false,
            last_event: None,
        }
    }

    /// Spawn the first piece. No-op once a piece exists or after game over.
    pub fn start(&mut self) {
        if self.active.is_none() && !self.game_over {
            self.spawn_piece();
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> Option<&ActivePiece> {
        self.active.as_ref()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Take and clear the last lock event (consumed by the score sink).
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Ghost preview cells for the active piece, if any.
    pub fn ghost_cells(&self) -> Option<[(i8, i8); FOOTPRINT_CELLS]> {
        self.active.as_ref().map(|p| ghost::cells(&self.grid, p))
    }

    /// Advance one frame. After game over this accepts no input and
    /// mutates nothing until [`Game::reset`].
    pub fn update(&mut self, input: FrameInput, dt_ms: u32) {
        if self.game_over {
            return;
        }
        let Some(piece) = self.active.as_mut() else {
            return;
        };

        match piece.update(&self.grid, &input, dt_ms) {
            StepOutcome::Falling => {}
            StepOutcome::Lock => self.lock_active(),
        }
    }

    /// Draw a shape uniformly at random and place a fresh piece at the
    /// spawn anchor; a blocked anchor ends the session instead.
    fn spawn_piece(&mut self) {
        let kind = self.rng.next_kind();
        let shape = *self.catalog.get(kind);
        let piece = ActivePiece::spawn(shape, self.spawn_position);

        if self.grid.is_valid_position(&piece.cells, piece.position) {
            self.active = Some(piece);
        } else {
            self.trigger_game_over();
        }
    }

    /// Commit the active piece: write its cells into the grid, run the
    /// cascade, report the event, then respawn.
    fn lock_active(&mut self) {
        let Some(piece) = self.active.take() else {
            return;
        };

        self.grid
            .place(&piece.cells, piece.position, piece.shape.kind);
        let rows_cleared = self.grid.clear_lines_cascade();
        self.last_event = Some(LockEvent { rows_cleared });

        self.spawn_piece();
    }

    /// End the session: all occupancy is cleared (not partially), the
    /// game-over signal stays raised until an external reset.
    fn trigger_game_over(&mut self) {
        self.grid.clear_all();
        self.active = None;
        self.game_over = true;
    }

    /// External reset: fresh occupancy, new first piece, same RNG stream.
    pub fn reset(&mut self) {
        self.grid.clear_all();
        self.active = None;
        self.game_over = false;
        self.last_event = None;
        self.spawn_piece();
    }
}
