use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::{Block, Borders, Widget};

use fruitsort_core::config::SimulationMode;
use fruitsort_core::snapshot::WorldSnapshot;
use fruitsort_data::{Appearance, Cell, Position};

/// Draws one snapshot, two terminal columns per grid cell.
pub struct WorldWidget<'a> {
    snapshot: &'a WorldSnapshot,
    title: &'a str,
}

impl<'a> WorldWidget<'a> {
    pub fn new(snapshot: &'a WorldSnapshot, title: &'a str) -> Self {
        Self { snapshot, title }
    }

    /// Terminal area needed to show the whole grid inside a border.
    pub fn required_size(snapshot: &WorldSnapshot) -> (u16, u16) {
        (
            snapshot.width.saturating_mul(2).saturating_add(2),
            snapshot.height.saturating_add(2),
        )
    }

    pub fn color_for_palette(slot: u8) -> Color {
        match slot {
            1 => Color::Red,
            2 => Color::Green,
            3 => Color::Yellow,
            4 => Color::Blue,
            _ => Color::White,
        }
    }

    fn appearance_at(&self, pos: Position) -> Option<Appearance> {
        let id = self.snapshot.cell(pos).agent()?;
        self.snapshot.agents.get(id.0).map(|a| a.appearance)
    }
}

impl<'a> Widget for WorldWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!("{} (Tick: {})", self.title, self.snapshot.tick))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let show_signal = self.snapshot.mode == SimulationMode::Cooperative;
        let cols = (inner.width / 2).min(self.snapshot.width);
        let rows = inner.height.min(self.snapshot.height);

        for y in 0..rows {
            for x in 0..cols {
                let pos = Position::new(x, y);
                let cell = &mut buf[(inner.x + 2 * x, inner.y + y)];
                if show_signal && self.snapshot.signal(pos) > 0.0 {
                    cell.set_bg(Color::Magenta);
                }
                match self.snapshot.cell(pos) {
                    Cell::Empty => {}
                    Cell::Agent(_) => {
                        let slot = self
                            .appearance_at(pos)
                            .map(Appearance::palette)
                            .unwrap_or(Appearance::BASE_PALETTE);
                        cell.set_symbol("X");
                        cell.set_fg(Self::color_for_palette(slot));
                    }
                    Cell::Fruit(_, kind) => {
                        cell.set_symbol(&kind.symbol().to_string());
                        cell.set_fg(Self::color_for_palette(kind.palette()));
                    }
                }
            }
        }
    }
}

/// Plain-text frame for headless runs: one character per cell, `X` for
/// agents, the kind letter for lying fruit, `.` for empty cells.
pub fn ascii_frame(snapshot: &WorldSnapshot) -> String {
    let mut out = String::with_capacity((snapshot.width as usize + 1) * snapshot.height as usize);
    for y in 0..snapshot.height {
        for x in 0..snapshot.width {
            out.push(match snapshot.cell(Position::new(x, y)) {
                Cell::Empty => '.',
                Cell::Agent(_) => 'X',
                Cell::Fruit(_, kind) => kind.symbol(),
            });
        }
        out.push('\n');
    }
    out
}
