//! Turns terminal key events into a per-tick `TickInput`.
//!
//! Terminals report key *events*, not key *state*, so held keys are tracked
//! by the tick in which each key was last seen.  A key is live while its last
//! press/repeat arrived less than `hold_window` ticks ago.  Terminals with keyboard
//! enhancement (kitty protocol and friends) also send `Release`, which drops
//! the key immediately; classic terminals only send repeated `Press` events
//! and the key simply expires after the window.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::entities::TickInput;

/// Ticks a key stays live after its last press/repeat, counting the tick it
/// arrived in: ≈133 ms at 60 FPS, longer than the gap between OS key-repeat
/// events once auto-repeat has kicked in.
pub const HOLD_WINDOW: u64 = 8;

#[derive(Debug)]
pub struct HeldKeys {
    key_tick: HashMap<KeyCode, u64>,
    hold_window: u64,
}

impl Default for HeldKeys {
    fn default() -> Self {
        HeldKeys::new(HOLD_WINDOW)
    }
}

impl HeldKeys {
    pub fn new(hold_window: u64) -> Self {
        HeldKeys {
            key_tick: HashMap::new(),
            hold_window,
        }
    }

    /// Feed one event seen during tick `tick`.
    pub fn record(&mut self, event: &KeyEvent, tick: u64) {
        let code = normalize(event.code);
        match event.kind {
            KeyEventKind::Press | KeyEventKind::Repeat => {
                self.key_tick.insert(code, tick);
            }
            KeyEventKind::Release => {
                self.key_tick.remove(&code);
            }
        }
    }

    pub fn is_held(&self, code: KeyCode, tick: u64) -> bool {
        self.key_tick
            .get(&normalize(code))
            .map(|&last| tick.saturating_sub(last) < self.hold_window)
            .unwrap_or(false)
    }

    /// Controls live at tick `tick`.
    pub fn snapshot(&self, tick: u64) -> TickInput {
        TickInput {
            left: self.is_held(KeyCode::Left, tick) || self.is_held(KeyCode::Char('a'), tick),
            right: self.is_held(KeyCode::Right, tick) || self.is_held(KeyCode::Char('d'), tick),
            fire: self.is_held(KeyCode::Char(' '), tick),
        }
    }
}

/// Esc, Q or Ctrl-C, on press only.
pub fn is_quit(event: &KeyEvent) -> bool {
    if event.kind != KeyEventKind::Press {
        return false;
    }
    match normalize(event.code) {
        KeyCode::Esc | KeyCode::Char('q') => true,
        KeyCode::Char('c') => event.modifiers.contains(KeyModifiers::CONTROL),
        _ => false,
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
