// directed path graph, the accumulating result of a generation run

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use super::grid::Cell;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("cell {0} already starts a path")]
    DuplicateStart(Cell),
    #[error("no active path to extend")]
    NoActivePath,
    #[error("no path starts at cell {0}")]
    UnknownPath(Cell),
    #[error("cell {0} has {1} predecessors, expected exactly one")]
    MultiplePredecessors(Cell, usize),
}

/// Handle to the path currently eligible for edge insertion.
///
/// Returned by [`PathGraph::init_path`] and threaded through every
/// [`PathGraph::insert`] call, so there is no hidden "current path" state:
/// inserting without a prior init is unrepresentable, and inserting through
/// a cursor whose path was deleted fails with [`GraphError::NoActivePath`].
#[derive(Debug, Clone, Copy)]
pub struct PathCursor {
    start: Cell,
    tail: Cell,
}

impl PathCursor {
    pub fn start(&self) -> Cell {
        self.start
    }

    pub fn tail(&self) -> Cell {
        self.tail
    }
}

/// Directed edges between cells, grouped into paths keyed by their start cell.
///
/// The walk engine only ever creates one outgoing edge per cell, so even
/// though the set-based edge storage could hold more, every cell with a
/// predecessor has exactly one. The curvature filter relies on that.
#[derive(Debug, Default, Clone)]
pub struct PathGraph {
    forward_edges: HashMap<Cell, HashSet<Cell>>,
    backward_edges: HashMap<Cell, HashSet<Cell>>,
    // start cell -> cells visited after it, the start itself is implicit
    paths: HashMap<Cell, Vec<Cell>>,
}

impl PathGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a new path rooted at `start` and returns its cursor.
    /// No edges are created until the first insert.
    pub fn init_path(&mut self, start: Cell) -> Result<PathCursor, GraphError> {
        if self.paths.contains_key(&start) {
            return Err(GraphError::DuplicateStart(start));
        }
        self.paths.insert(start, Vec::new());
        Ok(PathCursor { start, tail: start })
    }

    /// Appends `to` to the cursor's path and records the edge in both maps.
    pub fn insert(&mut self, cursor: &mut PathCursor, to: Cell) -> Result<(), GraphError> {
        // a stale cursor means its path was deleted since init_path
        let Some(sequence) = self.paths.get_mut(&cursor.start) else {
            return Err(GraphError::NoActivePath);
        };
        let from = cursor.tail;
        sequence.push(to);
        self.forward_edges.entry(from).or_default().insert(to);
        self.backward_edges.entry(to).or_default().insert(from);
        cursor.tail = to;
        Ok(())
    }

    /// Removes the path starting at `start` along with exactly its edges.
    /// Empty edge sets are dropped so no dangling entries remain.
    pub fn delete_path(&mut self, start: Cell) -> Result<(), GraphError> {
        let Some(sequence) = self.paths.remove(&start) else {
            return Err(GraphError::UnknownPath(start));
        };

        let mut from = start;
        for to in sequence {
            if let Some(set) = self.forward_edges.get_mut(&from) {
                set.remove(&to);
                if set.is_empty() {
                    self.forward_edges.remove(&from);
                }
            }
            if let Some(set) = self.backward_edges.get_mut(&to) {
                set.remove(&from);
                if set.is_empty() {
                    self.backward_edges.remove(&to);
                }
            }
            from = to;
        }
        Ok(())
    }

    pub fn forward_edges_of(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.forward_edges.get(&cell).into_iter().flatten().copied()
    }

    pub fn backward_edges_of(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        self.backward_edges.get(&cell).into_iter().flatten().copied()
    }

    /// The unique predecessor of `cell`, if it has one.
    /// More than one predecessor means the single-outgoing-edge assumption
    /// was broken somewhere upstream, which is fatal.
    pub fn sole_predecessor(&self, cell: Cell) -> Result<Option<Cell>, GraphError> {
        let Some(parents) = self.backward_edges.get(&cell) else {
            return Ok(None);
        };
        if parents.len() != 1 {
            return Err(GraphError::MultiplePredecessors(cell, parents.len()));
        }
        Ok(parents.iter().next().copied())
    }

    pub fn paths(&self) -> &HashMap<Cell, Vec<Cell>> {
        &self.paths
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    pub fn into_paths(self) -> HashMap<Cell, Vec<Cell>> {
        self.paths
    }
}
