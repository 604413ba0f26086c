use std::io;
use std::panic;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{debug, warn};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use thiserror::Error;

/// Concrete terminal type used by the runtime.
pub type AppTerminal = Terminal<CrosstermBackend<io::Stdout>>;

/// Which step of terminal setup failed.
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("failed to enable raw mode: {0}")]
    RawMode(#[source] io::Error),
    #[error("failed to enter the alternate screen: {0}")]
    AlternateScreen(#[source] io::Error),
    #[error("failed to create the terminal backend: {0}")]
    Backend(#[source] io::Error),
}

/// Owns raw mode and the alternate screen for the lifetime of the game.
///
/// Terminal state is restored on drop, and by a panic hook installed on entry
/// so a crash never leaves the shell in raw mode. Restore failures are logged.
pub struct TerminalSession {
    terminal: AppTerminal,
}

impl TerminalSession {
    /// Enters raw mode, switches to the alternate screen, and creates a ratatui terminal.
    ///
    /// Any step that fails undoes the steps before it.
    pub fn enter() -> Result<Self, TerminalError> {
        install_panic_hook();
        enable_raw_mode().map_err(TerminalError::RawMode)?;

        let mut stdout = io::stdout();
        if let Err(error) = execute!(stdout, EnterAlternateScreen, Hide) {
            if let Err(undo) = disable_raw_mode() {
                warn!("failed to leave raw mode after setup error: {undo}");
            }
            return Err(TerminalError::AlternateScreen(error));
        }

        let terminal = Terminal::new(CrosstermBackend::new(stdout)).map_err(|error| {
            report_restore("setup error");
            TerminalError::Backend(error)
        })?;

        debug!("terminal entered raw mode and alternate screen");
        Ok(Self { terminal })
    }

    pub fn terminal_mut(&mut self) -> &mut AppTerminal {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        report_restore("shutdown");
    }
}

fn install_panic_hook() {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |panic_info| {
        report_restore("panic");
        default_hook(panic_info);
    }));
}

fn report_restore(reason: &str) {
    if let Err(error) = restore_terminal() {
        warn!("failed to restore terminal on {reason}: {error}");
    }
}

/// Leaves raw mode and the alternate screen, showing the cursor again.
///
/// Both steps always run; the first failure is returned.
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let mut stdout = io::stdout();
    let screen = execute!(stdout, Show, LeaveAlternateScreen);
    raw.and(screen)
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::io;

    use super::TerminalError;

    #[test]
    fn setup_errors_name_the_failed_step_and_keep_the_cause() {
        let error = TerminalError::AlternateScreen(io::Error::other("not a tty"));

        assert_eq!(
            error.to_string(),
            "failed to enter the alternate screen: not a tty"
        );
        assert_eq!(
            error.source().map(ToString::to_string),
            Some("not a tty".to_owned())
        );
    }
}
