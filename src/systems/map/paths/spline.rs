// smooths a path polyline into a drawable curve

use bevy::math::cubic_splines::{CubicCardinalSpline, CubicGenerator};
use bevy::prelude::*;

/// Samples a Catmull-Rom spline through `points`, `subdivisions` samples
/// per segment.
///
/// The first and last control point are duplicated so the sampled curve
/// passes through both endpoints, a cardinal spline otherwise skips them.
/// Inputs with fewer than two points come back unchanged.
pub fn interpolate(points: &[Vec2], subdivisions: usize) -> Vec<Vec2> {
    if points.len() < 2 || subdivisions == 0 {
        return points.to_vec();
    }

    let mut control_points = Vec::with_capacity(points.len() + 2);
    control_points.push(points[0]);
    control_points.extend_from_slice(points);
    control_points.push(points[points.len() - 1]);

    // iter_positions spreads its sample count over the whole curve,
    // scale by the segment count to keep density per segment
    let samples = (points.len() - 1) * subdivisions;

    match CubicCardinalSpline::new_catmull_rom(control_points).to_curve() {
        Ok(curve) => curve.iter_positions(samples).collect(),
        // not enough segments to build a curve, the polyline is already drawable
        Err(_) => points.to_vec(),
    }
}
