//! Crate error type.  Only terminal setup and I/O can fail; the game logic
//! itself is total.

#[derive(thiserror::Error, Debug)]
pub enum GameError {
    /// Terminal I/O failed (raw mode, alternate screen, writing a frame).
    #[error("terminal I/O error: {0}")]
    Terminal(#[from] std::io::Error),

    /// The terminal cannot fit the fixed-size playfield.
    #[error("terminal is {cols}x{rows} cells but the playfield needs at least {need_cols}x{need_rows}")]
    TerminalTooSmall {
        cols: u16,
        rows: u16,
        need_cols: u16,
        need_rows: u16,
    },
}
