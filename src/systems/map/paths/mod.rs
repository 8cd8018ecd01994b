// path generation core

pub mod curvature;
pub mod graph;
pub mod grid;
pub mod layout;
pub mod prune;
pub mod spline;
pub mod walk;
