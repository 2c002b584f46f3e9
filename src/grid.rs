//! Square grid of cells and the neighbourhood queries used by the engine.
//!
//! Neighbourhoods use the block convention: `neighbors(row, col, radius)` is
//! every in-bounds cell of the `(2·radius+1)²` block centred on `(row, col)`
//! with the centre itself excluded, in row-major order.

use serde::{Deserialize, Serialize};

use crate::types::{Position, Signal};

/// Per-position state of the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    row: usize,
    col: usize,
    inquired: bool,
    signal: Signal,
    probability: f64,
}

impl Cell {
    fn new(row: usize, col: usize, probability: f64) -> Self {
        Self {
            row,
            col,
            inquired: false,
            signal: Signal::Neutral,
            probability,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn position(&self) -> Position {
        (self.row, self.col)
    }

    pub fn is_inquired(&self) -> bool {
        self.inquired
    }

    pub fn signal(&self) -> Signal {
        self.signal
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Record an inquiry result. Inquiry state is write-once per game.
    pub(crate) fn mark_inquired(&mut self, signal: Signal) {
        debug_assert!(!self.inquired, "cell inquired twice");
        self.inquired = true;
        self.signal = signal;
    }
}

/// Square `size × size` grid owning its cells in row-major order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell uninquired and a uniform distribution.
    ///
    /// # Examples
    ///
    /// ```
    /// use ghostbuster::grid::Grid;
    ///
    /// let grid = Grid::new(10);
    /// assert_eq!(grid.cell_count(), 100);
    /// assert!((grid.total_probability() - 1.0).abs() < 1e-9);
    /// ```
    pub fn new(size: usize) -> Self {
        let uniform = uniform_probability(size);
        let cells = (0..size)
            .flat_map(|row| (0..size).map(move |col| Cell::new(row, col, uniform)))
            .collect();
        Self { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.size && col < self.size
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        self.contains(row, col).then(|| row * self.size + col)
    }

    /// Bounds-checked lookup; `None` when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<&Cell> {
        self.index(row, col).map(|idx| &self.cells[idx])
    }

    pub(crate) fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.index(row, col).map(|idx| &mut self.cells[idx])
    }

    /// Coordinates of the block neighbourhood, centre excluded.
    pub fn neighbor_positions(&self, row: usize, col: usize, radius: usize) -> Vec<Position> {
        if !self.contains(row, col) {
            return Vec::new();
        }
        let rows = row.saturating_sub(radius)..=(row + radius).min(self.size - 1);
        let cols = col.saturating_sub(radius)..=(col + radius).min(self.size - 1);
        rows.flat_map(|r| cols.clone().map(move |c| (r, c)))
            .filter(|&pos| pos != (row, col))
            .collect()
    }

    /// Cells of the block neighbourhood, centre excluded.
    pub fn neighbors(&self, row: usize, col: usize, radius: usize) -> Vec<&Cell> {
        self.neighbor_positions(row, col, radius)
            .into_iter()
            .filter_map(|(r, c)| self.get(r, c))
            .collect()
    }

    /// Fraction of the block neighbourhood already inquired; `0.0` when the
    /// block is empty.
    pub fn inquired_fraction(&self, row: usize, col: usize, radius: usize) -> f64 {
        let block = self.neighbors(row, col, radius);
        if block.is_empty() {
            return 0.0;
        }
        let inquired = block.iter().filter(|cell| cell.inquired).count();
        inquired as f64 / block.len() as f64
    }

    /// All cells in stable row-major order.
    pub fn all(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().map(Cell::position)
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.cells.iter().map(|cell| cell.probability).collect()
    }

    /// Overwrite the distribution from a row-major slice.
    pub(crate) fn set_probabilities(&mut self, probabilities: &[f64]) {
        debug_assert_eq!(probabilities.len(), self.cells.len());
        for (cell, &p) in self.cells.iter_mut().zip(probabilities) {
            cell.probability = p;
        }
    }

    pub(crate) fn reset_probabilities(&mut self) {
        let uniform = uniform_probability(self.size);
        for cell in &mut self.cells {
            cell.probability = uniform;
        }
    }

    pub fn total_probability(&self) -> f64 {
        self.cells.iter().map(|cell| cell.probability).sum()
    }

    pub fn inquired_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.inquired).count()
    }

    /// Reinitialize every cell: uninquired, neutral, uniform probability.
    pub fn reset(&mut self) {
        let uniform = uniform_probability(self.size);
        for cell in &mut self.cells {
            *cell = Cell::new(cell.row, cell.col, uniform);
        }
    }
}

fn uniform_probability(size: usize) -> f64 {
    if size == 0 {
        0.0
    } else {
        1.0 / (size * size) as f64
    }
}
