use fruitsort_tui::renderer::WorldWidget;
use fruitsort_tui::status::StatusWidget;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::Frame;

use crate::app::state::App;

impl App {
    /// Status line on top, the initial layout on the left and the live
    /// world on the right.
    pub fn draw(&self, f: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(1), Constraint::Min(0)])
            .split(f.area());

        f.render_widget(
            StatusWidget {
                snapshot: &self.latest,
                total_ticks: self.total_ticks,
                finished: self.finished,
            },
            rows[0],
        );

        let (grid_width, _) = WorldWidget::required_size(&self.latest);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(grid_width), Constraint::Length(grid_width)])
            .split(rows[1]);

        f.render_widget(WorldWidget::new(&self.initial, "Initial"), columns[0]);
        f.render_widget(WorldWidget::new(&self.latest, "Live"), columns[1]);
    }
}
