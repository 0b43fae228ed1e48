//! GameView: maps a [`Game`] into styled terminal rows.
//!
//! Pure (no I/O), so it can be unit-tested. The grid stores occupancy only;
//! the view re-composes locked tiles, ghost, and active piece every frame.

use crossterm::style::Color;

use crate::core::Game;
use crate::types::PieceKind;

/// One styled character cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewCell {
    pub ch: char,
    pub fg: Color,
}

impl ViewCell {
    fn blank() -> Self {
        Self {
            ch: ' ',
            fg: Color::Reset,
        }
    }

    fn plain(ch: char) -> Self {
        Self {
            ch,
            fg: Color::Reset,
        }
    }
}

/// Each grid cell is drawn this many terminal columns wide, compensating for
/// the glyph aspect ratio.
const CELL_W: usize = 2;

const TILE_CH: char = '█';
const GHOST_CH: char = '░';

pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Render the game into rows of styled cells, top row first.
    pub fn render(&self, game: &Game, score: u32) -> Vec<Vec<ViewCell>> {
        let bounds = game.grid().bounds();
        let board_w = bounds.width() as usize * CELL_W;

        let mut rows = Vec::with_capacity(bounds.height() as usize + 4);
        rows.push(horizontal_border(board_w));

        // Screen rows run top-down; grid y runs bottom-up.
        for y in (bounds.y_min..bounds.y_max).rev() {
            let mut row = Vec::with_capacity(board_w + 2);
            row.push(ViewCell::plain('|'));
            for x in bounds.x_min..bounds.x_max {
                row.extend(self.board_cell(game, x, y));
            }
            row.push(ViewCell::plain('|'));
            rows.push(row);
        }

        rows.push(horizontal_border(board_w));
        rows.push(text_row(&format!("score: {score}")));
        if game.is_game_over() {
            rows.push(text_row("game over - press r to restart"));
        } else {
            rows.push(text_row(
                "a/d move  s soft drop  space hard drop  q/e rotate  esc quit",
            ));
        }
        rows
    }

    fn board_cell(&self, game: &Game, x: i8, y: i8) -> [ViewCell; CELL_W] {
        // Active piece over ghost over locked tiles.
        if let Some(piece) = game.active() {
            if piece.absolute_cells().contains(&(x, y)) {
                let cell = ViewCell {
                    ch: TILE_CH,
                    fg: kind_color(piece.shape.kind),
                };
                return [cell; CELL_W];
            }
        }

        if let Some(ghost) = game.ghost_cells() {
            if ghost.contains(&(x, y)) {
                let cell = ViewCell {
                    ch: GHOST_CH,
                    fg: Color::DarkGrey,
                };
                return [cell; CELL_W];
            }
        }

        match game.grid().tile(x, y) {
            Some(kind) => {
                let cell = ViewCell {
                    ch: TILE_CH,
                    fg: kind_color(kind),
                };
                [cell; CELL_W]
            }
            None => [ViewCell::blank(); CELL_W],
        }
    }
}

impl Default for GameView {
    fn default() -> Self {
        Self::new()
    }
}

fn kind_color(kind: PieceKind) -> Color {
    match kind {
        PieceKind::I => Color::Cyan,
        PieceKind::J => Color::Blue,
        PieceKind::L => Color::DarkYellow,
        PieceKind::O => Color::Yellow,
        PieceKind::S => Color::Green,
        PieceKind::T => Color::Magenta,
        PieceKind::Z => Color::Red,
    }
}

fn horizontal_border(board_w: usize) -> Vec<ViewCell> {
    let mut row = Vec::with_capacity(board_w + 2);
    row.push(ViewCell::plain('+'));
    row.extend(std::iter::repeat(ViewCell::plain('-')).take(board_w));
    row.push(ViewCell::plain('+'));
    row
}

fn text_row(text: &str) -> Vec<ViewCell> {
    text.chars().map(ViewCell::plain).collect()
}
