//! Terminal view for fruitsort: screen ownership plus the grid and status
//! widgets.

pub mod renderer;
pub mod status;

use anyhow::Result;
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use fruitsort_core::snapshot::WorldSnapshot;
use ratatui::backend::CrosstermBackend;
use ratatui::{Frame, Terminal};
use std::io::{self, Stdout};

use crate::renderer::WorldWidget;

/// Owns the alternate screen while a run is displayed. The screen is
/// handed back on [`Tui::leave`] or when dropped.
pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    active: bool,
}

impl Tui {
    pub fn new() -> Result<Self> {
        let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
        Ok(Self {
            terminal,
            active: false,
        })
    }

    pub fn enter(&mut self) -> Result<()> {
        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen, cursor::Hide)?;
        self.active = true;
        self.terminal.clear()?;
        Ok(())
    }

    pub fn leave(&mut self) -> Result<()> {
        if self.active {
            self.active = false;
            restore()?;
        }
        Ok(())
    }

    pub fn draw<F>(&mut self, render: F) -> Result<()>
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(render)?;
        Ok(())
    }

    /// Whether the initial and live grids fit side by side under the
    /// status line.
    pub fn fits(&self, snapshot: &WorldSnapshot) -> Result<bool> {
        let area = self.terminal.size()?;
        let (width, height) = WorldWidget::required_size(snapshot);
        Ok(area.width >= width.saturating_mul(2) && area.height > height)
    }
}

fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, cursor::Show)
}

impl Drop for Tui {
    fn drop(&mut self) {
        if self.active {
            let _ = restore();
        }
    }
}
