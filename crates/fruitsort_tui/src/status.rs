use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use fruitsort_core::snapshot::WorldSnapshot;

/// One-line run summary shown above the grids.
pub struct StatusWidget<'a> {
    pub snapshot: &'a WorldSnapshot,
    pub total_ticks: u64,
    pub finished: bool,
}

impl<'a> Widget for StatusWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = if self.finished {
            Span::styled("Press any key to quit", Style::default().fg(Color::Yellow))
        } else {
            Span::raw(format!("Iteration {}/{}", self.snapshot.tick, self.total_ticks))
        };
        let line = Line::from(vec![
            state,
            Span::raw(format!(
                " | carried: {} | clustering: {:.3} | q: quit",
                self.snapshot.carried(),
                self.snapshot.clustering
            )),
        ]);
        Paragraph::new(line).render(area, buf);
    }
}
