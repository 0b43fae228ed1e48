//! TerminalRenderer: owns the raw-mode session and flushes view rows.
//!
//! Full redraw per frame; the board is small enough that diffing buys
//! nothing at 60 Hz over a local tty.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{Print, ResetColor, SetForegroundColor},
    terminal, QueueableCommand,
};

use crate::term::view::ViewCell;

pub struct TerminalRenderer {
    stdout: io::Stdout,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.stdout.queue(terminal::EnterAlternateScreen)?;
        self.stdout.queue(cursor::Hide)?;
        self.stdout.flush()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.stdout.queue(ResetColor)?;
        self.stdout.queue(cursor::Show)?;
        self.stdout.queue(terminal::LeaveAlternateScreen)?;
        self.stdout.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Flush a frame of styled rows, top-left anchored.
    pub fn draw(&mut self, rows: &[Vec<ViewCell>]) -> Result<()> {
        self.stdout
            .queue(terminal::Clear(terminal::ClearType::All))?;

        for (i, row) in rows.iter().enumerate() {
            self.stdout.queue(cursor::MoveTo(0, i as u16))?;
            let mut current_fg = None;
            for cell in row {
                if current_fg != Some(cell.fg) {
                    self.stdout.queue(SetForegroundColor(cell.fg))?;
                    current_fg = Some(cell.fg);
                }
                self.stdout.queue(Print(cell.ch))?;
            }
        }

        self.stdout.queue(ResetColor)?;
        self.stdout.flush()?;
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}
