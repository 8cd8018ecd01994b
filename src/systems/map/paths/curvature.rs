// geometric admissibility of a walk step

use super::graph::{GraphError, PathGraph};
use super::grid::Cell;

use crate::config::COS_TURN_EPS;

/// Decides whether extending a path from `tail` to `candidate` keeps the
/// turn angle inside the accepted band.
///
/// A true path start has no recorded predecessor and accepts any direction.
/// Otherwise the cosine of the angle between the previous segment and the
/// candidate segment must lie in `[min_cos - eps, 1.0 + eps]`:
/// continuing straight or curving softly is always allowed, sharp turns and
/// doubling back are not. The upper slack only absorbs roundoff on exactly
/// collinear steps.
pub fn acceptable_curvature(
    graph: &PathGraph,
    tail: Cell,
    candidate: Cell,
    min_cos: f32,
) -> Result<bool, GraphError> {
    let Some(parent) = graph.sole_predecessor(tail)? else {
        return Ok(true);
    };

    let subpath1 = parent.unit_dir_to(tail);
    let subpath2 = tail.unit_dir_to(candidate);
    let cos_theta = subpath1.dot(subpath2);

    Ok(min_cos - COS_TURN_EPS <= cos_theta && cos_theta <= 1.0 + COS_TURN_EPS)
}
