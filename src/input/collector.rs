//! Collects key events between ticks and emits one `FrameInput` per frame.
//!
//! Terminals often deliver no key-release events, so a held key is emulated:
//! each press arms a countdown and the key counts as held until it expires.
//! Edge-triggered actions (hard drop, rotation) fire once per press.

use arrayvec::ArrayVec;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::types::FrameInput;

/// How long a key stays "held" after its last press when the terminal sends
/// no release events.
const KEY_HOLD_TIMEOUT_MS: u32 = 150;

/// Keys tracked as held (left, right, soft drop).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeldKey {
    Left,
    Right,
    Down,
}

#[derive(Debug, Clone)]
pub struct InputCollector {
    held: ArrayVec<(HeldKey, u32), 3>,
    hard_drop: bool,
    rotate_cw: bool,
    rotate_ccw: bool,
}

impl InputCollector {
    pub fn new() -> Self {
        Self {
            held: ArrayVec::new(),
            hard_drop: false,
            rotate_cw: false,
            rotate_ccw: false,
        }
    }

    /// Record a key press (or terminal auto-repeat, which re-arms the hold).
    pub fn handle_key_press(&mut self, code: KeyCode) {
        match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => self.arm(HeldKey::Left),
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => self.arm(HeldKey::Right),
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => self.arm(HeldKey::Down),
            KeyCode::Char(' ') => self.hard_drop = true,
            KeyCode::Up | KeyCode::Char('e') | KeyCode::Char('E') => self.rotate_cw = true,
            KeyCode::Char('q') | KeyCode::Char('Q') => self.rotate_ccw = true,
            _ => {}
        }
    }

    /// Record a key release, for terminals that do deliver them.
    pub fn handle_key_release(&mut self, code: KeyCode) {
        let key = match code {
            KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => HeldKey::Left,
            KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => HeldKey::Right,
            KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => HeldKey::Down,
            _ => return,
        };
        self.held.retain(|(k, _)| *k != key);
    }

    fn arm(&mut self, key: HeldKey) {
        if let Some(entry) = self.held.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = KEY_HOLD_TIMEOUT_MS;
        } else {
            self.held.push((key, KEY_HOLD_TIMEOUT_MS));
        }
    }

    fn is_held(&self, key: HeldKey) -> bool {
        self.held.iter().any(|(k, _)| *k == key)
    }

    /// Advance hold countdowns and produce this frame's input snapshot.
    /// Edge-triggered flags are consumed.
    pub fn frame(&mut self, dt_ms: u32) -> FrameInput {
        let input = FrameInput {
            move_left_held: self.is_held(HeldKey::Left),
            move_right_held: self.is_held(HeldKey::Right),
            soft_drop_held: self.is_held(HeldKey::Down),
            hard_drop_pressed: self.hard_drop,
            rotate_cw_pressed: self.rotate_cw,
            rotate_ccw_pressed: self.rotate_ccw,
        };

        self.hard_drop = false;
        self.rotate_cw = false;
        self.rotate_ccw = false;

        for entry in &mut self.held {
            entry.1 = entry.1.saturating_sub(dt_ms);
        }
        self.held.retain(|(_, remaining)| *remaining > 0);

        input
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Quit on Esc or Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Esc)
        || (key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C')))
}
