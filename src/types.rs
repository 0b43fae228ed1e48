//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Default board dimensions (cells).
pub const BOARD_WIDTH: i8 = 16;
pub const BOARD_HEIGHT: i8 = 20;

/// Game timing constants (in milliseconds)
pub const TICK_MS: u32 = 16;
pub const STEP_DELAY_MS: u32 = 1000;
pub const MOVE_DELAY_MS: u32 = 100;
pub const LOCK_DELAY_MS: u32 = 500;

/// Spawn anchor for new pieces (x, y), top-center of the default board.
pub const SPAWN_POSITION: (i8, i8) = (-1, 8);

/// Presentation-side score increment per cleared row.
pub const SCORE_PER_ROW: u32 = 100;

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }
}

/// Per-frame input snapshot consumed by the core.
///
/// `*_held` flags repeat while the key is down (gated by the move-repeat
/// delay); the rest fire once on the frame the key was pressed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameInput {
    pub move_left_held: bool,
    pub move_right_held: bool,
    pub soft_drop_held: bool,
    pub hard_drop_pressed: bool,
    pub rotate_cw_pressed: bool,
    pub rotate_ccw_pressed: bool,
}

impl FrameInput {
    pub fn is_empty(&self) -> bool {
        *self == FrameInput::default()
    }
}

/// Emitted once per lock, consumed by the presentation layer.
///
/// `rows_cleared` counts every row the cascade removed for this lock; how
/// multi-row clears are scored is the sink's policy, not the core's.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub rows_cleared: u32,
}
