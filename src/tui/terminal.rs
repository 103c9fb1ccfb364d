//! Raw-mode terminal lifecycle.
//!
//! The dashboard takes over the terminal for its whole run: raw mode plus
//! the alternate screen buffer, released again in [`restore_terminal`].
//! Every exit path in `main` must go through the restore or the user's
//! shell is left in raw mode.

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{MarketdeckError, Result};

/// The concrete terminal type the render loop draws to.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

fn io_error(context: &str, e: impl std::fmt::Display) -> MarketdeckError {
    MarketdeckError::Io(format!("{context}: {e}"))
}

/// Puts the terminal into dashboard mode and returns the draw handle.
///
/// # Errors
///
/// Fails when stdout is not a TTY or when raw mode / the alternate screen
/// cannot be entered. Raw mode is rolled back on partial failure.
pub fn setup_terminal() -> Result<Tui> {
    if !io::stdout().is_terminal() {
        return Err(MarketdeckError::Io(
            "stdout is not a terminal; the dashboard needs an interactive TTY".to_string(),
        ));
    }

    enable_raw_mode().map_err(|e| io_error("enable raw mode", e))?;

    let mut stdout = io::stdout();
    let setup = execute!(stdout, EnterAlternateScreen)
        .map_err(|e| io_error("enter alternate screen", e))
        .and_then(|()| {
            Terminal::new(CrosstermBackend::new(io::stdout()))
                .map_err(|e| io_error("create terminal", e))
        });

    match setup {
        Ok(terminal) => Ok(terminal),
        Err(e) => {
            // Raw mode is already on at this point; undo it before bailing.
            let _ = disable_raw_mode();
            Err(e)
        }
    }
}

/// Leaves dashboard mode: raw mode off, main screen buffer, cursor back.
///
/// # Errors
///
/// Fails when any of the teardown steps cannot be applied; callers on an
/// error path typically ignore the result since there is nothing left to
/// do about it.
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode().map_err(|e| io_error("disable raw mode", e))?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(|e| io_error("leave alternate screen", e))?;
    terminal
        .show_cursor()
        .map_err(|e| io_error("show cursor", e))?;
    Ok(())
}
