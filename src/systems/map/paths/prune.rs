// post-generation cleanup of short paths

use super::graph::{GraphError, PathGraph};

// TODO: connect leaf endpoints to nearby path starts so the survivors can
// merge into one connected network instead of staying disjoint

/// Deletes every path whose recorded sequence has fewer than
/// `min_path_length` entries.
///
/// The doomed start keys are collected up front so the paths map is never
/// mutated while being iterated. Idempotent for a fixed threshold.
pub fn prune_short_paths(graph: &mut PathGraph, min_path_length: usize) -> Result<(), GraphError> {
    let doomed: Vec<_> = graph
        .paths()
        .iter()
        .filter(|(_, sequence)| sequence.len() < min_path_length)
        .map(|(start, _)| *start)
        .collect();

    for start_cell in doomed {
        graph.delete_path(start_cell)?;
    }
    Ok(())
}
