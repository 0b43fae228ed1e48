//! Terminal gridfall runner.
//!
//! Frame loop: poll input until the next tick, feed one `FrameInput` plus
//! elapsed time into the core, then redraw from grid + piece + ghost. The
//! score lives here, not in the core: the core reports cleared rows per
//! lock and this sink applies its own policy (a flat amount per row).

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};

use gridfall::core::Game;
use gridfall::input::{should_quit, InputCollector};
use gridfall::term::{GameView, TerminalRenderer};
use gridfall::types::{SCORE_PER_ROW, TICK_MS};

fn main() -> Result<()> {
    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(term: &mut TerminalRenderer) -> Result<()> {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(1);

    let mut game = Game::new(seed);
    game.start();

    let view = GameView::new();
    let mut input = InputCollector::new();
    let mut score: u32 = 0;

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        term.draw(&view.render(&game, score))?;

        // Input with timeout until the next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        if should_quit(key) {
                            return Ok(());
                        }
                        if matches!(key.code, KeyCode::Char('r') | KeyCode::Char('R')) {
                            if game.is_game_over() {
                                game.reset();
                                score = 0;
                            }
                        } else {
                            input.handle_key_press(key.code);
                        }
                    }
                    KeyEventKind::Release => {
                        input.handle_key_release(key.code);
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();

            game.update(input.frame(TICK_MS), TICK_MS);
            if let Some(event) = game.take_last_event() {
                score += event.rows_cleared * SCORE_PER_ROW;
            }
        }
    }
}
