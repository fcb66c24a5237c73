pub mod render;
pub mod state;

pub use state::App;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use fruitsort_tui::Tui;
use std::time::Duration;

impl App {
    /// Drives the run in the terminal: one tick per frame, then waits for a
    /// key once every tick has run.
    pub fn run(&mut self, tui: &mut Tui) -> Result<()> {
        if !tui.fits(&self.latest)? {
            tracing::warn!(
                width = self.latest.width,
                height = self.latest.height,
                "Terminal too small, grids will be clipped"
            );
        }

        while self.running {
            tui.draw(|f| self.draw(f))?;

            let timeout = if self.finished {
                Duration::from_millis(250)
            } else {
                self.frame_delay
            };
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if self.running {
                self.step()?;
            }
        }
        Ok(())
    }
}
