//! Grid Components
//!
//! A square toroidal array of cells, each empty or owning one [`Agent`].
//! Cells are addressed as `(row, col)`; neighbor lookups wrap in both axes.

use bevy_ecs::prelude::*;
use ethno_events::{CellView, GridSnapshot, StrategyCounts};

use super::agent::{Agent, Palette};

/// Grid coordinate as `(row, col)`.
pub type Cell = (usize, usize);

/// One of the four von Neumann neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Neighbor order used by reproduction before shuffling.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// Resource: the simulation grid
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Agent>>,
}

impl Grid {
    /// Creates an empty grid of side `size`.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero; configuration validation rejects that first.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "grid size must be at least 1");
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells (`size²`).
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    fn index(&self, (row, col): Cell) -> usize {
        debug_assert!(row < self.size && col < self.size, "cell {:?} outside grid", (row, col));
        row * self.size + col
    }

    fn cell_at(&self, index: usize) -> Cell {
        (index / self.size, index % self.size)
    }

    pub fn get(&self, cell: Cell) -> Option<&Agent> {
        self.cells[self.index(cell)].as_ref()
    }

    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut Agent> {
        let i = self.index(cell);
        self.cells[i].as_mut()
    }

    pub fn is_empty_at(&self, cell: Cell) -> bool {
        self.get(cell).is_none()
    }

    /// Puts `agent` into `cell`, returning the previous occupant.
    pub fn place(&mut self, cell: Cell, agent: Agent) -> Option<Agent> {
        let i = self.index(cell);
        self.cells[i].replace(agent)
    }

    /// Empties `cell`, returning the agent that lived there.
    pub fn clear(&mut self, cell: Cell) -> Option<Agent> {
        let i = self.index(cell);
        self.cells[i].take()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Occupied cells in row-major order.
    pub fn iter_occupied(&self) -> impl Iterator<Item = (Cell, &Agent)> {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(i, slot)| slot.as_ref().map(|a| (self.cell_at(i), a)))
    }

    /// Every cell coordinate in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let size = self.size;
        (0..size * size).map(move |i| (i / size, i % size))
    }

    /// The wrapped neighbor of `cell` in `direction`.
    pub fn neighbor(&self, (row, col): Cell, direction: Direction) -> Cell {
        let n = self.size;
        match direction {
            Direction::Up => ((row + n - 1) % n, col),
            Direction::Down => ((row + 1) % n, col),
            Direction::Left => (row, (col + n - 1) % n),
            Direction::Right => (row, (col + 1) % n),
        }
    }

    /// Neighbors in [`Direction::ALL`] order.
    pub fn neighbors(&self, cell: Cell) -> [Cell; 4] {
        Direction::ALL.map(|d| self.neighbor(cell, d))
    }

    /// Mutable access to two distinct occupied cells at once.
    /// Returns `None` if the cells coincide or either is empty.
    pub fn pair_mut(&mut self, a: Cell, b: Cell) -> Option<(&mut Agent, &mut Agent)> {
        let ia = self.index(a);
        let ib = self.index(b);
        if ia == ib {
            return None;
        }
        let (lo, hi) = (ia.min(ib), ia.max(ib));
        let (head, tail) = self.cells.split_at_mut(hi);
        let low = head[lo].as_mut()?;
        let high = tail[0].as_mut()?;
        if ia < ib {
            Some((low, high))
        } else {
            Some((high, low))
        }
    }

    /// Sets every agent's potential to `baseline`.
    pub fn reset_potentials(&mut self, baseline: f64) {
        for agent in self.cells.iter_mut().flatten() {
            agent.reset(baseline);
        }
    }

    /// Counts the population by strategy.
    pub fn census(&self) -> StrategyCounts {
        let mut counts = StrategyCounts::default();
        for (_, agent) in self.iter_occupied() {
            counts.add(agent.strategy());
        }
        counts
    }

    /// Render-ready view of every occupied cell.
    pub fn snapshot(&self, palette: &Palette, generation: u64) -> GridSnapshot {
        let mut snapshot = GridSnapshot::new(generation, self.size);
        snapshot.cells = self
            .iter_occupied()
            .map(|((row, col), agent)| {
                CellView::new(row, col, palette.name(agent.color), agent.strategy())
            })
            .collect();
        snapshot
    }
}
