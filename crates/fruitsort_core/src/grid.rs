//! Dense occupancy map over agents and uncarried fruit.

use fruitsort_data::{Cell, Position};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Cells within Chebyshev distance `radius` of `center`, excluding the
/// centre, clipped to the grid and yielded in row-major order.
pub fn chebyshev_neighbors(
    width: u16,
    height: u16,
    center: Position,
    radius: u16,
) -> impl Iterator<Item = Position> {
    let r = radius as i32;
    let cx = center.x as i32;
    let cy = center.y as i32;
    (-r..=r)
        .flat_map(move |dy| (-r..=r).map(move |dx| (dx, dy)))
        .filter(|&(dx, dy)| dx != 0 || dy != 0)
        .filter_map(move |(dx, dy)| {
            let nx = cx + dx;
            let ny = cy + dy;
            if nx >= 0 && ny >= 0 && nx < width as i32 && ny < height as i32 {
                Some(Position::new(nx as u16, ny as u16))
            } else {
                None
            }
        })
}

/// One occupant per cell, rebuilt from scratch after every agent turn.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct OccupancyGrid {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
}

impl OccupancyGrid {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width as usize * height as usize],
        }
    }

    #[inline(always)]
    fn index(&self, pos: Position) -> usize {
        (pos.y as usize * self.width as usize) + pos.x as usize
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn get(&self, pos: Position) -> Option<Cell> {
        if self.in_bounds(pos) {
            Some(self.cells[self.index(pos)])
        } else {
            None
        }
    }

    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos).is_some_and(|cell| cell.is_empty())
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Radius-`radius` neighbourhood of `pos`, see [`chebyshev_neighbors`].
    pub fn neighbors(&self, pos: Position, radius: u16) -> impl Iterator<Item = Position> {
        chebyshev_neighbors(self.width, self.height, pos, radius)
    }

    pub fn empty_neighbors(&self, pos: Position) -> Vec<Position> {
        self.neighbors(pos, 1)
            .filter(|&n| self.is_empty(n))
            .collect()
    }

    /// Puts `cell` at `pos`, refusing to overwrite another occupant.
    pub fn place(&mut self, pos: Position, cell: Cell) -> Result<()> {
        if !self.in_bounds(pos) {
            return Err(SimError::OutOfBounds { x: pos.x, y: pos.y });
        }
        let idx = self.index(pos);
        if !self.cells[idx].is_empty() {
            return Err(SimError::DoubleOccupancy { x: pos.x, y: pos.y });
        }
        self.cells[idx] = cell;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Clears the map and refills it from `occupants`.
    pub fn rebuild<I>(&mut self, occupants: I) -> Result<()>
    where
        I: IntoIterator<Item = (Position, Cell)>,
    {
        self.clear();
        for (pos, cell) in occupants {
            self.place(pos, cell)?;
        }
        Ok(())
    }
}
