//! Snapshot Types
//!
//! Render-ready view of the grid. A renderer draws each occupied cell as a
//! square with a fill and an outline; the pairing encodes the strategy:
//!
//! | strategy     | fill        | outline     |
//! |--------------|-------------|-------------|
//! | samaritan    | agent color | light       |
//! | ethnocentric | agent color | agent color |
//! | traitor      | light       | agent color |
//! | selfish      | dark        | agent color |

use serde::{Deserialize, Serialize};

use crate::Strategy;

/// A color a renderer should use for part of a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum Paint {
    /// The agent's own palette color
    Color(String),
    /// Neutral marker ('w' in a matplotlib palette)
    Light,
    /// Void marker ('k' in a matplotlib palette)
    Dark,
}

impl Paint {
    /// Short matplotlib-style code for this paint.
    pub fn code(&self) -> &str {
        match self {
            Paint::Color(c) => c,
            Paint::Light => "w",
            Paint::Dark => "k",
        }
    }
}

/// One occupied cell as seen by a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellView {
    pub row: usize,
    pub col: usize,
    pub strategy: Strategy,
    pub fill: Paint,
    pub outline: Paint,
}

impl CellView {
    /// Builds the view of an agent with the given color and strategy.
    pub fn new(row: usize, col: usize, color: impl Into<String>, strategy: Strategy) -> Self {
        let color = Paint::Color(color.into());
        let (fill, outline) = match strategy {
            Strategy::Samaritan => (color, Paint::Light),
            Strategy::Ethnocentric => (color.clone(), color),
            Strategy::Traitor => (Paint::Light, color),
            Strategy::Selfish => (Paint::Dark, color),
        };
        Self {
            row,
            col,
            strategy,
            fill,
            outline,
        }
    }
}

/// All occupied cells of the grid after a generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridSnapshot {
    pub generation: u64,
    pub size: usize,
    #[serde(default)]
    pub cells: Vec<CellView>,
}

impl GridSnapshot {
    pub fn new(generation: u64, size: usize) -> Self {
        Self {
            generation,
            size,
            cells: Vec::new(),
        }
    }

    /// Number of occupied cells in the snapshot.
    pub fn population(&self) -> usize {
        self.cells.len()
    }

    /// Looks up the view at a coordinate, if that cell is occupied.
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellView> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }

    /// Column-oriented arrays in the shape scatter-plot APIs expect:
    /// (xs, ys, fills, outlines).
    pub fn columns(&self) -> (Vec<usize>, Vec<usize>, Vec<&str>, Vec<&str>) {
        let mut xs = Vec::with_capacity(self.cells.len());
        let mut ys = Vec::with_capacity(self.cells.len());
        let mut fills = Vec::with_capacity(self.cells.len());
        let mut outlines = Vec::with_capacity(self.cells.len());
        for cell in &self.cells {
            xs.push(cell.row);
            ys.push(cell.col);
            fills.push(cell.fill.code());
            outlines.push(cell.outline.code());
        }
        (xs, ys, fills, outlines)
    }
}
