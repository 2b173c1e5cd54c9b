//! Terminal lifecycle management.
//!
//! The terminal is restored on normal exit (via the runtime's Drop), on a
//! forced exit after a second Ctrl+C, and on panic.

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

pub type PageTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Enables raw mode, enters the alternate screen and creates the terminal.
///
/// Call `install_panic_hook()` first.
///
/// # Errors
/// Returns an error if the terminal cannot be put into TUI mode.
pub fn setup_terminal() -> Result<PageTerminal> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Enables mouse wheel scrolling and bracketed paste into form fields.
///
/// # Errors
/// Returns an error if the escape sequences cannot be written.
pub fn enable_input_features() -> Result<()> {
    execute!(io::stdout(), EnableBracketedPaste, EnableMouseCapture)
        .context("Failed to enable input features")?;
    Ok(())
}

/// # Errors
/// Returns an error if the escape sequences cannot be written.
pub fn disable_input_features() -> Result<()> {
    execute!(io::stdout(), DisableMouseCapture, DisableBracketedPaste)
        .context("Failed to disable input features")?;
    Ok(())
}

/// Restores the terminal. Safe to call more than once.
///
/// # Errors
/// Returns an error if the alternate screen or raw mode cannot be left.
pub fn restore_terminal() -> Result<()> {
    // Input features must go before raw mode does.
    let _ = execute!(io::stdout(), DisableMouseCapture, DisableBracketedPaste);
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Restores the terminal before the default panic output is printed.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
