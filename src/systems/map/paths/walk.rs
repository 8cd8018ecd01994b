// random walk engine, covers the whole grid with curvature-bounded paths

use std::collections::{HashMap, HashSet};

use rand::prelude::*;
use rand::rngs::StdRng;
use thiserror::Error;

use super::curvature::acceptable_curvature;
use super::graph::{GraphError, PathGraph};
use super::grid::{Cell, CellGrid, ConfigError};
use super::prune::prune_short_paths;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("{0} cells were never visited after the full walk pass")]
    IncompleteCoverage(usize),
}

/// Covers every grid cell with disjoint curvature-bounded walks.
///
/// Start cells are taken in a uniformly shuffled order rather than
/// row-major, which avoids directional bias in the resulting network.
/// Each walk greedily extends through a uniformly chosen unvisited,
/// curvature-admissible neighbor until none remains; running out of
/// candidates is the normal termination, not an error.
///
/// Deterministic for a fixed `rng` state.
pub fn generate_paths(
    grid: &CellGrid,
    rng: &mut StdRng,
    min_cos_turn: f32,
) -> Result<PathGraph, GenerationError> {
    let mut non_visited: HashSet<Cell> = grid.all_cells().into_iter().collect();
    let mut visit_order = grid.all_cells();
    visit_order.shuffle(rng);

    let mut graph = PathGraph::new();

    for start_cell in visit_order {
        // skip cells already covered by an earlier walk
        if !non_visited.contains(&start_cell) {
            continue;
        }

        let mut cursor = graph.init_path(start_cell)?;

        // iterative walk, the cursor tail is the current cell
        loop {
            let current = cursor.tail();
            non_visited.remove(&current);

            let mut candidates = Vec::new();
            for nbor in grid.neighbors8(current) {
                if non_visited.contains(&nbor)
                    && acceptable_curvature(&graph, current, nbor, min_cos_turn)?
                {
                    candidates.push(nbor);
                }
            }

            let Some(&next_cell) = candidates.choose(rng) else {
                break;
            };
            graph.insert(&mut cursor, next_cell)?;
        }
    }

    // every cell must now belong to exactly one path; anything left over is
    // a logic defect, not a condition to recover from
    if !non_visited.is_empty() {
        return Err(GenerationError::IncompleteCoverage(non_visited.len()));
    }

    Ok(graph)
}

/// Full generation pass: build the covering walk set over a
/// `num_x_cells x num_y_cells` grid, prune paths shorter than
/// `min_path_length`, and return the surviving paths keyed by start cell.
pub fn generate_covering_paths(
    num_x_cells: i32,
    num_y_cells: i32,
    min_path_length: usize,
    min_cos_turn: f32,
    seed: u64,
) -> Result<HashMap<Cell, Vec<Cell>>, GenerationError> {
    let grid = CellGrid::new(num_x_cells, num_y_cells)?;
    let mut rng = StdRng::seed_from_u64(seed);

    let mut graph = generate_paths(&grid, &mut rng, min_cos_turn)?;
    prune_short_paths(&mut graph, min_path_length)?;

    Ok(graph.into_paths())
}
