//! Row-by-row layout of alien formations and shield walls.

use serde::{Deserialize, Serialize};

use crate::entities::{Body, Collection, GameState};
use crate::factory::Spawner;

/// Horizontal placement rule for the i-th body of a row.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Spacing {
    /// `i * offset`
    Uniform,
    /// Groups of `cluster` bodies with an extra `gap` between groups,
    /// shifted right by `lead`.
    Clustered { cluster: usize, gap: f64, lead: f64 },
}

impl Spacing {
    pub fn x_offset(&self, i: usize, offset: f64) -> f64 {
        match *self {
            Spacing::Uniform => i as f64 * offset,
            Spacing::Clustered { cluster, gap, lead } => {
                i as f64 * offset + gap * (i / cluster.max(1)) as f64 + lead
            }
        }
    }
}

/// Static layout of one grid.  Never mutated once built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Horizontal distance between neighbours in a row.
    pub row_offset: f64,
    /// Vertical distance between rows.
    pub column_offset: f64,
    pub vertical_start: f64,
    pub horizontal_start: f64,
    pub row_size: usize,
    pub target: Collection,
    pub spacing: Spacing,
}

impl GridSpec {
    pub fn x_at(&self, i: usize) -> f64 {
        self.horizontal_start + self.spacing.x_offset(i, self.row_offset)
    }

    /// Rows are stacked upward from `vertical_start`; the trailing `- 1.0`
    /// keeps every row one unit above its nominal line.
    pub fn y_at(&self, row_index: usize) -> f64 {
        self.vertical_start + (self.column_offset * row_index as f64 - 1.0)
    }
}

/// Append one full row built by `spawner` to the grid's target collection.
pub fn generate_row(state: &GameState, grid: &GridSpec, spawner: &Spawner, row_index: usize) -> GameState {
    let y = grid.y_at(row_index);
    let mut cursor = state.clone();
    let mut row: Vec<Body> = Vec::with_capacity(grid.row_size);
    for i in 0..grid.row_size {
        row.push(spawner.build(&cursor, grid.x_at(i), y));
        cursor.obj_count += 1;
    }

    let mut bodies = state.collection(grid.target).to_vec();
    bodies.extend(row);
    GameState {
        obj_count: cursor.obj_count,
        ..state.with_collection(grid.target, bodies)
    }
}

/// Lay out every row in `rows`.  The first row ends up lowest on screen.
pub fn generate_formation(state: &GameState, grid: &GridSpec, rows: &[Spawner]) -> GameState {
    let n = rows.len();
    rows.iter()
        .enumerate()
        .fold(state.clone(), |acc, (k, spawner)| generate_row(&acc, grid, spawner, n - k))
}

/// A single shield wall.
pub fn generate_shields(state: &GameState, grid: &GridSpec, spawner: &Spawner) -> GameState {
    generate_row(state, grid, spawner, 1)
}
