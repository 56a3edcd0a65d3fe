//! Terminal front end.

mod actions;
pub mod app;
mod input;
pub mod keymap;
mod ui;

pub use app::App;

use crossterm::ExecutableCommand;
use crossterm::event::{
    DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture,
};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::io::stdout;

/// Run the interactive editor until the user quits.
pub fn run(app: &mut App) -> anyhow::Result<()> {
    terminal::enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    // Restore the terminal even if the loop errors or panics.
    struct Cleanup;
    impl Drop for Cleanup {
        fn drop(&mut self) {
            let _ = stdout().execute(DisableFocusChange);
            let _ = stdout().execute(DisableBracketedPaste);
            let _ = stdout().execute(DisableMouseCapture);
            let _ = stdout().execute(LeaveAlternateScreen);
            let _ = terminal::disable_raw_mode();
        }
    }
    let _cleanup = Cleanup;

    stdout().execute(EnableMouseCapture)?;
    stdout().execute(EnableBracketedPaste)?;
    stdout().execute(EnableFocusChange)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;
    input::run_app(&mut terminal, app)?;
    Ok(())
}
