//! Terminal initialization, restoration, and panic-safe cleanup.

use std::io::{Stdout, stdout};

use color_eyre::eyre::Result;
use crossterm::{
    ExecutableCommand, cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub type Backend = CrosstermBackend<Stdout>;

/// Owns the terminal for the lifetime of the UI and restores it on drop.
pub struct Tui {
    pub terminal: Terminal<Backend>,
}

impl Tui {
    /// Create a new terminal instance (does NOT enter raw mode yet).
    pub fn new() -> Result<Self> {
        let backend = CrosstermBackend::new(stdout());
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    /// Alternate screen, raw mode, mouse capture (needed for click-outside
    /// on modals), hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        stdout().execute(EnterAlternateScreen)?;
        stdout().execute(EnableMouseCapture)?;
        stdout().execute(cursor::Hide)?;
        self.terminal.clear()?;
        Ok(())
    }

    pub fn exit(&mut self) {
        restore_terminal();
    }

    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut ratatui::Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Terminal size as (width, height).
    pub fn size(&self) -> Result<(u16, u16)> {
        let size = self.terminal.size()?;
        Ok((size.width, size.height))
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        self.exit();
    }
}

/// Best-effort restoration; individual failures are ignored.
fn restore_terminal() {
    let _ = stdout().execute(cursor::Show);
    let _ = stdout().execute(DisableMouseCapture);
    let _ = stdout().execute(LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();
}

/// Install panic and error hooks that restore the terminal before printing.
///
/// Must be called BEFORE entering the terminal.
pub fn install_hooks() -> Result<()> {
    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default()
        .display_env_section(false)
        .into_hooks();

    eyre_hook.install()?;

    let panic_hook = panic_hook.into_panic_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        panic_hook(info);
    }));

    Ok(())
}
