//! The RUNNING → GAME_OVER → EXIT state machine.
//!
//! Everything here works on any `Write` sink and an event channel, so the
//! binary only has to own the real terminal and the input thread.

use std::io::Write;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::Instant;

use crossterm::event::Event;
use log::info;
use rand::Rng;

use crate::compute::{init_state, tick};
use crate::config::GameConfig;
use crate::display;
use crate::entities::{GameState, GameStatus};
use crate::error::GameError;
use crate::input::{is_quit, HeldKeys};

/// How the RUNNING phase ended.
#[derive(Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Player collided with an enemy → show the summary.
    GameOver,
    /// Esc / Q / Ctrl-C or the terminal went away → exit straight away.
    Quit,
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Fixed-rate RUNNING phase.  Each tick: drain input, step the simulation
/// at the current session time, render, then sleep out the frame.
pub fn game_loop<W: Write>(
    out: &mut W,
    state: &mut GameState,
    rx: &mpsc::Receiver<Event>,
    session_start: Instant,
    rng: &mut impl Rng,
) -> Result<RunOutcome, GameError> {
    let frame = state.config.frame_duration();
    let mut keys = HeldKeys::default();

    loop {
        let frame_start = Instant::now();
        let now_ms = session_start.elapsed().as_millis() as u64;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        loop {
            match rx.try_recv() {
                Ok(Event::Key(key)) => {
                    if is_quit(&key) {
                        return Ok(RunOutcome::Quit);
                    }
                    keys.record(&key, state.tick);
                }
                Ok(_) => {}
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return Ok(RunOutcome::Quit),
            }
        }

        let input = keys.snapshot(state.tick);
        *state = tick(state, &input, now_ms, rng);
        display::render(out, state)?;

        if state.status == GameStatus::GameOver {
            return Ok(RunOutcome::GameOver);
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame {
            thread::sleep(frame - elapsed);
        }
    }
}

/// GAME_OVER phase: the summary stays up until a quit key arrives.
pub fn wait_for_exit<W: Write>(
    out: &mut W,
    state: &GameState,
    rx: &mpsc::Receiver<Event>,
) -> Result<(), GameError> {
    // A closed channel means the input thread died, i.e. the terminal is gone
    while let Ok(ev) = rx.recv() {
        match ev {
            Event::Key(key) if is_quit(&key) => break,
            Event::Resize(..) => display::render(out, state)?,
            _ => {}
        }
    }
    Ok(())
}

/// One whole session, returning the final state.
pub fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    config: GameConfig,
    rng: &mut impl Rng,
) -> Result<GameState, GameError> {
    let session_start = Instant::now();
    let mut state = init_state(config, 0, rng);
    info!(
        "session started with {} enemies on a {}x{} field",
        state.enemies.len(),
        config.screen_width,
        config.screen_height
    );

    match game_loop(out, &mut state, rx, session_start, rng)? {
        RunOutcome::Quit => info!("quit during play, score {}", state.score),
        RunOutcome::GameOver => wait_for_exit(out, &state, rx)?,
    }

    info!(
        "session ended after {} ticks: score {}, {} kills, {} shots",
        state.tick, state.score, state.enemies_destroyed, state.shots_fired
    );
    Ok(state)
}

/// Run `setup` then `body` against `ctx`, and call `restore` afterwards no
/// matter which of them failed.  `body` is skipped when `setup` fails.
pub fn with_restore<C, T>(
    ctx: &mut C,
    setup: impl FnOnce(&mut C) -> Result<(), GameError>,
    body: impl FnOnce(&mut C) -> Result<T, GameError>,
    restore: impl FnOnce(&mut C),
) -> Result<T, GameError> {
    let result = setup(ctx).and_then(|()| body(ctx));
    restore(ctx);
    result
}
