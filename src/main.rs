use std::io::{stdout, BufWriter, Stdout};
use std::sync::mpsc;
use std::thread;

use crossterm::{
    cursor,
    event::{self, Event, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal, ExecutableCommand,
};
use log::{debug, error};
use rand::thread_rng;

use space_shooter::config::GameConfig;
use space_shooter::display;
use space_shooter::error::GameError;
use space_shooter::session::{run, with_restore};

/// The real terminal plus what setup switched on, so teardown can undo it.
struct Terminal {
    out: BufWriter<Stdout>,
    keyboard_enhanced: bool,
}

// ── Terminal setup ────────────────────────────────────────────────────────────

fn check_terminal_size(config: &GameConfig) -> Result<(), GameError> {
    let (need_cols, need_rows) = display::playfield_size(config);
    let (cols, rows) = terminal::size()?;
    if cols < need_cols || rows < need_rows {
        return Err(GameError::TerminalTooSmall {
            cols,
            rows,
            need_cols,
            need_rows,
        });
    }
    Ok(())
}

fn setup_terminal(term: &mut Terminal) -> Result<(), GameError> {
    terminal::enable_raw_mode()?;
    term.out.execute(terminal::EnterAlternateScreen)?;
    term.out.execute(cursor::Hide)?;

    // Ask for key-release events where the terminal speaks the protocol;
    // elsewhere presses keep arriving and the hold window covers them.
    if terminal::supports_keyboard_enhancement().unwrap_or(false) {
        term.out.execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))?;
        term.keyboard_enhanced = true;
    } else {
        debug!("keyboard enhancement unavailable, falling back to key-repeat tracking");
    }
    Ok(())
}

fn restore_terminal(term: &mut Terminal) {
    if term.keyboard_enhanced {
        let _ = term.out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = term.out.execute(cursor::Show);
    let _ = term.out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

fn play(term: &mut Terminal, config: GameConfig) -> Result<(), GameError> {
    // Dedicated thread for blocking event reads so the loop never blocks on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    run(&mut term.out, &rx, config, &mut thread_rng())?;
    Ok(())
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), GameError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = GameConfig::default();
    if let Err(e) = check_terminal_size(&config) {
        error!("cannot start: {e}");
        return Err(e);
    }

    let mut term = Terminal {
        out: BufWriter::new(stdout()),
        keyboard_enhanced: false,
    };
    let result = with_restore(
        &mut term,
        setup_terminal,
        |term| play(term, config),
        restore_terminal,
    );

    if let Err(e) = &result {
        error!("{e}");
    }
    result
}
