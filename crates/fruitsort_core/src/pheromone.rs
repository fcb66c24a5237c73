//! Recruit-signal field used by helpers to call for a second carrier.

use fruitsort_data::Position;
use serde::{Deserialize, Serialize};

use crate::grid::chebyshev_neighbors;

/// Float residue left by repeated non-zero decay; snapped to zero.
const DECAY_RESIDUE: f32 = 16.0 * f32::EPSILON;

/// Per-cell scent intensity in `[0, 1]`, independent of occupancy.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct SignalGrid {
    pub cells: Vec<f32>,
    pub width: u16,
    pub height: u16,
}

impl SignalGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            cells: vec![0.0; width as usize * height as usize],
            width,
            height,
        }
    }

    #[inline(always)]
    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize * self.width as usize) + x as usize
    }

    /// Intensity at `pos`; zero outside the grid.
    pub fn get(&self, pos: Position) -> f32 {
        if pos.x < self.width && pos.y < self.height {
            self.cells[self.index(pos.x, pos.y)]
        } else {
            0.0
        }
    }

    /// Adds `intensity` at `(x, y)`, saturating at 1.
    pub fn add_signal(&mut self, x: u16, y: u16, intensity: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.index(x, y);
        self.cells[idx] = (self.cells[idx] + intensity).min(1.0);
    }

    /// Subtracts `rate` from every cell, clamping at 0. A zero rate leaves
    /// the field untouched.
    pub fn decay_all(&mut self, rate: f32) {
        if rate <= 0.0 {
            return;
        }
        for cell in &mut self.cells {
            *cell = (*cell - rate).max(0.0);
            if *cell < DECAY_RESIDUE {
                *cell = 0.0;
            }
        }
    }

    /// Broadcasts from `source`: every cell at Chebyshev distance `d` in
    /// `1..=distance` receives `1 - (d - 1) / distance`. The source cell
    /// itself gets nothing.
    pub fn emit(&mut self, source: Position, distance: u16) {
        if distance == 0 {
            return;
        }
        let cells: Vec<Position> =
            chebyshev_neighbors(self.width, self.height, source, distance).collect();
        for cell in cells {
            let d = cell.chebyshev(&source);
            let intensity = 1.0 - (d as f32 - 1.0) / distance as f32;
            self.add_signal(cell.x, cell.y, intensity);
        }
    }

    pub fn total(&self) -> f32 {
        self.cells.iter().sum()
    }

    pub fn active_cells(&self) -> usize {
        self.cells.iter().filter(|v| **v > 0.0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn test_add_signal_saturates() {
        let mut grid = SignalGrid::new(4, 4);
        grid.add_signal(1, 1, 0.7);
        grid.add_signal(1, 1, 0.7);
        assert_eq!(grid.get(Position::new(1, 1)), 1.0);
    }

    #[test]
    fn test_deposit_then_decay() {
        let mut grid = SignalGrid::new(5, 5);
        grid.emit(Position::new(2, 2), 3);
        let near = Position::new(3, 2);
        assert_eq!(grid.get(near), 1.0);

        grid.decay_all(0.1);
        assert!(close(grid.get(near), 0.9));

        for _ in 0..9 {
            grid.decay_all(0.1);
        }
        assert_eq!(grid.get(near), 0.0);
    }

    #[test]
    fn test_zero_rate_keeps_faint_signal() {
        let mut grid = SignalGrid::new(3, 3);
        grid.add_signal(1, 1, 5e-5);
        grid.decay_all(0.0);
        assert_eq!(grid.get(Position::new(1, 1)), 5e-5);
    }

    #[test]
    fn test_decay_keeps_values_above_residue() {
        let mut grid = SignalGrid::new(3, 3);
        grid.add_signal(0, 0, 0.10005);
        grid.decay_all(0.1);
        assert!(grid.get(Position::new(0, 0)) > 0.0);
    }

    #[test]
    fn test_emit_linear_falloff() {
        let mut grid = SignalGrid::new(9, 9);
        let source = Position::new(4, 4);
        grid.emit(source, 3);
        assert_eq!(grid.get(source), 0.0);
        assert!(close(grid.get(Position::new(5, 5)), 1.0));
        assert!(close(grid.get(Position::new(6, 4)), 2.0 / 3.0));
        assert!(close(grid.get(Position::new(1, 7)), 1.0 / 3.0));
        assert_eq!(grid.get(Position::new(0, 4)), 0.0);
        assert_eq!(grid.active_cells(), 48);
    }

    #[test]
    fn test_emit_clipped_at_border() {
        let mut grid = SignalGrid::new(3, 3);
        grid.emit(Position::new(0, 0), 3);
        assert_eq!(grid.get(Position::new(0, 0)), 0.0);
        assert_eq!(grid.active_cells(), 8);
    }

    #[test]
    fn test_decay_never_negative() {
        let mut grid = SignalGrid::new(2, 2);
        grid.add_signal(0, 0, 0.05);
        grid.decay_all(0.1);
        assert_eq!(grid.get(Position::new(0, 0)), 0.0);
        assert_eq!(grid.total(), 0.0);
    }
}
