use std::collections::HashSet;

use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{MIN_COS_TURN, COS_TURN_EPS};
use crate::systems::map::paths::curvature::acceptable_curvature;
use crate::systems::map::paths::graph::{GraphError, PathGraph};
use crate::systems::map::paths::grid::{Cell, CellGrid, ConfigError};
use crate::systems::map::paths::layout::MapLayout;
use crate::systems::map::paths::prune::prune_short_paths;
use crate::systems::map::paths::spline::interpolate;
use crate::systems::map::paths::walk::{generate_covering_paths, generate_paths};

fn cell(x: i32, y: i32) -> Cell {
    Cell::new(x, y)
}

// every cell a graph covers, starts and sequences combined
fn covered_cells(graph: &PathGraph) -> Vec<Cell> {
    let mut cells = Vec::new();
    for (&start, sequence) in graph.paths() {
        cells.push(start);
        cells.extend(sequence.iter().copied());
    }
    cells
}

mod grid {
    use super::*;

    #[test]
    fn all_cells_enumerates_every_cell_once() {
        let grid = CellGrid::new(4, 3).unwrap();
        let cells = grid.all_cells();
        assert_eq!(cells.len(), 12);

        let unique: HashSet<Cell> = cells.iter().copied().collect();
        assert_eq!(unique.len(), 12);
        assert!(cells.iter().all(|&c| grid.contains(c)));
    }

    #[test]
    fn neighbors8_respects_bounds() {
        let grid = CellGrid::new(3, 3).unwrap();

        let center = grid.neighbors8(cell(1, 1));
        assert_eq!(center.len(), 8);
        assert!(!center.contains(&cell(1, 1)));

        let corner = grid.neighbors8(cell(0, 0));
        assert_eq!(corner.len(), 3);

        let edge = grid.neighbors8(cell(0, 1));
        assert_eq!(edge.len(), 5);
        assert!(edge.iter().all(|&c| grid.contains(c)));
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        assert_eq!(
            CellGrid::new(0, 5).unwrap_err(),
            ConfigError::BadGridSize(0, 5)
        );
        assert_eq!(
            CellGrid::new(5, -1).unwrap_err(),
            ConfigError::BadGridSize(5, -1)
        );
    }
}

mod graph {
    use super::*;

    #[test]
    fn insert_records_edges_both_ways() {
        let mut graph = PathGraph::new();
        let mut cursor = graph.init_path(cell(0, 0)).unwrap();
        graph.insert(&mut cursor, cell(1, 1)).unwrap();
        graph.insert(&mut cursor, cell(2, 1)).unwrap();

        assert_eq!(graph.paths()[&cell(0, 0)], vec![cell(1, 1), cell(2, 1)]);
        assert_eq!(
            graph.forward_edges_of(cell(0, 0)).collect::<Vec<_>>(),
            vec![cell(1, 1)]
        );
        assert_eq!(
            graph.backward_edges_of(cell(2, 1)).collect::<Vec<_>>(),
            vec![cell(1, 1)]
        );
        assert_eq!(cursor.tail(), cell(2, 1));
    }

    #[test]
    fn duplicate_start_is_rejected() {
        let mut graph = PathGraph::new();
        graph.init_path(cell(3, 3)).unwrap();
        assert_eq!(
            graph.init_path(cell(3, 3)).unwrap_err(),
            GraphError::DuplicateStart(cell(3, 3))
        );
    }

    #[test]
    fn deleting_an_unknown_path_is_rejected() {
        let mut graph = PathGraph::new();
        assert_eq!(
            graph.delete_path(cell(9, 9)).unwrap_err(),
            GraphError::UnknownPath(cell(9, 9))
        );
    }

    #[test]
    fn stale_cursor_cannot_insert() {
        let mut graph = PathGraph::new();
        let mut cursor = graph.init_path(cell(0, 0)).unwrap();
        graph.insert(&mut cursor, cell(1, 0)).unwrap();

        graph.delete_path(cell(0, 0)).unwrap();
        assert_eq!(
            graph.insert(&mut cursor, cell(2, 0)).unwrap_err(),
            GraphError::NoActivePath
        );
    }

    #[test]
    fn delete_removes_exactly_its_own_edges() {
        let mut graph = PathGraph::new();

        let mut doomed = graph.init_path(cell(0, 0)).unwrap();
        graph.insert(&mut doomed, cell(1, 0)).unwrap();
        graph.insert(&mut doomed, cell(2, 0)).unwrap();

        let mut kept = graph.init_path(cell(0, 2)).unwrap();
        graph.insert(&mut kept, cell(1, 2)).unwrap();

        graph.delete_path(cell(0, 0)).unwrap();

        // no residual entries for the deleted chain
        assert_eq!(graph.forward_edges_of(cell(0, 0)).count(), 0);
        assert_eq!(graph.forward_edges_of(cell(1, 0)).count(), 0);
        assert_eq!(graph.backward_edges_of(cell(1, 0)).count(), 0);
        assert_eq!(graph.backward_edges_of(cell(2, 0)).count(), 0);

        // the other path is untouched
        assert_eq!(graph.paths()[&cell(0, 2)], vec![cell(1, 2)]);
        assert_eq!(graph.backward_edges_of(cell(1, 2)).count(), 1);
    }

    #[test]
    fn multiple_predecessors_are_a_fatal_inconsistency() {
        let mut graph = PathGraph::new();

        // two paths converging on one cell, something the walk never does
        let mut first = graph.init_path(cell(0, 0)).unwrap();
        graph.insert(&mut first, cell(1, 1)).unwrap();
        let mut second = graph.init_path(cell(2, 2)).unwrap();
        graph.insert(&mut second, cell(1, 1)).unwrap();

        assert_eq!(
            graph.sole_predecessor(cell(1, 1)).unwrap_err(),
            GraphError::MultiplePredecessors(cell(1, 1), 2)
        );
    }
}

mod curvature {
    use super::*;

    // a path whose tail at (1,0) was entered heading +x
    fn graph_heading_x() -> PathGraph {
        let mut graph = PathGraph::new();
        let mut cursor = graph.init_path(cell(0, 0)).unwrap();
        graph.insert(&mut cursor, cell(1, 0)).unwrap();
        graph
    }

    #[test]
    fn path_start_accepts_any_direction() {
        let graph = graph_heading_x();
        // (0,0) has no predecessor, every neighbor is fine
        assert!(acceptable_curvature(&graph, cell(0, 0), cell(0, 1), MIN_COS_TURN).unwrap());
        assert!(acceptable_curvature(&graph, cell(0, 0), cell(1, 1), MIN_COS_TURN).unwrap());
    }

    #[test]
    fn straight_continuation_is_accepted() {
        let graph = graph_heading_x();
        assert!(acceptable_curvature(&graph, cell(1, 0), cell(2, 0), MIN_COS_TURN).unwrap());
    }

    #[test]
    fn soft_turn_is_accepted() {
        let graph = graph_heading_x();
        // 45 degrees, cos is about 0.707
        assert!(acceptable_curvature(&graph, cell(1, 0), cell(2, 1), MIN_COS_TURN).unwrap());
    }

    #[test]
    fn right_angle_turn_is_rejected() {
        let graph = graph_heading_x();
        // cos 0, below the 0.1 threshold
        assert!(!acceptable_curvature(&graph, cell(1, 0), cell(1, 1), MIN_COS_TURN).unwrap());
    }

    #[test]
    fn reversal_is_rejected() {
        let graph = graph_heading_x();
        assert!(!acceptable_curvature(&graph, cell(1, 0), cell(0, 0), MIN_COS_TURN).unwrap());
    }

    #[test]
    fn inconsistent_graph_surfaces_as_error() {
        let mut graph = graph_heading_x();
        let mut second = graph.init_path(cell(2, 2)).unwrap();
        graph.insert(&mut second, cell(1, 0)).unwrap();

        assert!(acceptable_curvature(&graph, cell(1, 0), cell(2, 0), MIN_COS_TURN).is_err());
    }
}

mod walk {
    use super::*;

    #[test]
    fn covers_every_cell_exactly_once() {
        let grid = CellGrid::new(12, 12).unwrap();
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = generate_paths(&grid, &mut rng, MIN_COS_TURN).unwrap();

            let cells = covered_cells(&graph);
            assert_eq!(cells.len(), grid.cell_count(), "seed {seed}");

            let unique: HashSet<Cell> = cells.iter().copied().collect();
            assert_eq!(unique.len(), grid.cell_count(), "seed {seed}");
        }
    }

    #[test]
    fn every_cell_has_at_most_one_predecessor() {
        let grid = CellGrid::new(10, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let graph = generate_paths(&grid, &mut rng, MIN_COS_TURN).unwrap();

        for c in grid.all_cells() {
            assert!(graph.backward_edges_of(c).count() <= 1);
        }
    }

    #[test]
    fn curvature_bound_holds_along_every_path() {
        let grid = CellGrid::new(14, 14).unwrap();
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = generate_paths(&grid, &mut rng, MIN_COS_TURN).unwrap();

            for (&start, sequence) in graph.paths() {
                let mut chain = vec![start];
                chain.extend(sequence.iter().copied());

                for triple in chain.windows(3) {
                    let v1 = triple[0].unit_dir_to(triple[1]);
                    let v2 = triple[1].unit_dir_to(triple[2]);
                    let cos_theta = v1.dot(v2);
                    assert!(
                        MIN_COS_TURN - COS_TURN_EPS <= cos_theta
                            && cos_theta <= 1.0 + COS_TURN_EPS,
                        "turn at {:?} has cos {cos_theta}",
                        triple[1]
                    );
                }
            }
        }
    }

    #[test]
    fn single_cell_grid_yields_one_trivial_path() {
        let grid = CellGrid::new(1, 1).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let graph = generate_paths(&grid, &mut rng, MIN_COS_TURN).unwrap();

        assert_eq!(graph.path_count(), 1);
        assert_eq!(graph.paths()[&cell(0, 0)], Vec::<Cell>::new());
    }

    #[test]
    fn two_cell_strip_yields_one_transition() {
        let grid = CellGrid::new(1, 2).unwrap();
        // both cells are strip ends, any seed gives a single two-cell path
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = generate_paths(&grid, &mut rng, MIN_COS_TURN).unwrap();

            assert_eq!(graph.path_count(), 1, "seed {seed}");
            let sequence = graph.paths().values().next().unwrap();
            assert_eq!(sequence.len(), 1, "seed {seed}");
        }
    }

    #[test]
    fn strip_walks_stay_collinear() {
        // on a 1xN grid the only admissible continuation is straight ahead,
        // so every path runs in one constant direction
        let grid = CellGrid::new(1, 10).unwrap();
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = generate_paths(&grid, &mut rng, MIN_COS_TURN).unwrap();

            let cells = covered_cells(&graph);
            assert_eq!(cells.len(), 10, "seed {seed}");

            for (&start, sequence) in graph.paths() {
                let mut chain = vec![start];
                chain.extend(sequence.iter().copied());
                for pair in chain.windows(2) {
                    let step = (pair[1].x - pair[0].x, pair[1].y - pair[0].y);
                    let first = (chain[1].x - chain[0].x, chain[1].y - chain[0].y);
                    assert_eq!(step, first, "seed {seed}");
                }
            }
        }
    }

    #[test]
    fn two_by_two_grid_partitions_all_cells() {
        let grid = CellGrid::new(2, 2).unwrap();
        for seed in 0..8 {
            let mut rng = StdRng::seed_from_u64(seed);
            let graph = generate_paths(&grid, &mut rng, MIN_COS_TURN).unwrap();

            let unique: HashSet<Cell> = covered_cells(&graph).into_iter().collect();
            assert_eq!(unique.len(), 4, "seed {seed}");
        }
    }

    #[test]
    fn equal_seeds_generate_equal_maps() {
        let first = generate_covering_paths(16, 16, 5, MIN_COS_TURN, 1234).unwrap();
        let second = generate_covering_paths(16, 16, 5, MIN_COS_TURN, 1234).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn bad_dimensions_fail_before_walking() {
        assert!(generate_covering_paths(0, 10, 15, MIN_COS_TURN, 1).is_err());
    }
}

mod prune {
    use super::*;

    #[test]
    fn removes_paths_below_the_threshold() {
        let mut graph = PathGraph::new();

        let mut short = graph.init_path(cell(0, 0)).unwrap();
        graph.insert(&mut short, cell(1, 0)).unwrap();

        let mut long = graph.init_path(cell(0, 2)).unwrap();
        for x in 1..=4 {
            graph.insert(&mut long, cell(x, 2)).unwrap();
        }

        prune_short_paths(&mut graph, 3).unwrap();

        assert_eq!(graph.path_count(), 1);
        assert!(graph.paths().contains_key(&cell(0, 2)));
        // the short path's edges are gone from both maps
        assert_eq!(graph.forward_edges_of(cell(0, 0)).count(), 0);
        assert_eq!(graph.backward_edges_of(cell(1, 0)).count(), 0);
    }

    #[test]
    fn pruning_is_idempotent() {
        let grid = CellGrid::new(9, 9).unwrap();
        let mut rng = StdRng::seed_from_u64(77);
        let mut graph = generate_paths(&grid, &mut rng, MIN_COS_TURN).unwrap();

        prune_short_paths(&mut graph, 6).unwrap();
        let once = graph.paths().clone();

        prune_short_paths(&mut graph, 6).unwrap();
        assert_eq!(*graph.paths(), once);
        assert!(once.values().all(|sequence| sequence.len() >= 6));
    }

    #[test]
    fn grids_smaller_than_the_threshold_prune_to_nothing() {
        // 12 cells total, no walk can reach 15 transitions
        for seed in 0..4 {
            let paths = generate_covering_paths(3, 4, 15, MIN_COS_TURN, seed).unwrap();
            assert!(paths.is_empty(), "seed {seed}");
        }
    }

    #[test]
    fn zero_threshold_keeps_everything() {
        let paths = generate_covering_paths(1, 1, 0, MIN_COS_TURN, 9).unwrap();
        assert_eq!(paths.len(), 1);
        assert_eq!(paths[&cell(0, 0)], Vec::<Cell>::new());
    }
}

mod layout {
    use super::*;

    fn layout() -> MapLayout {
        MapLayout::new(-100.0, 100.0, -100.0, 100.0, 20, 10, 8, 1.0).unwrap()
    }

    #[test]
    fn ticks_span_the_extent() {
        let layout = layout();
        let x_ticks = layout.grid_x_ticks();
        let y_ticks = layout.grid_y_ticks();

        assert_eq!(x_ticks.len(), 21);
        assert_eq!(y_ticks.len(), 11);
        assert!((x_ticks[0] - -100.0).abs() < 1e-4);
        assert!((x_ticks[20] - 100.0).abs() < 1e-4);
        assert!((y_ticks[5] - 0.0).abs() < 1e-4);
    }

    #[test]
    fn anchor_and_connector_counts() {
        let layout = layout();
        let anchors = layout.grid_anchors();
        assert_eq!(anchors.len(), 21 * 11);
        assert_eq!(layout.connection_points().len(), anchors.len() * 8);
    }

    #[test]
    fn connectors_sit_on_their_ring() {
        let layout = layout();
        let anchors = layout.grid_anchors();
        let points = layout.connection_points();

        // first ring belongs to the first anchor
        for point in &points[..8] {
            assert!((point.distance(anchors[0]) - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn cells_map_to_tick_intersections() {
        let layout = layout();
        assert_eq!(layout.cell_to_world(cell(0, 0)), Vec2::new(-100.0, -100.0));

        let world = layout.path_world_points(cell(0, 0), &[cell(1, 1)]);
        assert_eq!(world.len(), 2);
        assert!((world[1].x - -90.0).abs() < 1e-4);
        assert!((world[1].y - -80.0).abs() < 1e-4);
    }

    #[test]
    fn odd_connector_count_is_rejected() {
        assert_eq!(
            MapLayout::new(-1.0, 1.0, -1.0, 1.0, 4, 4, 7, 1.0).unwrap_err(),
            ConfigError::OddConnectorCount(7)
        );
    }
}

mod spline {
    use super::*;

    #[test]
    fn short_inputs_pass_through_unchanged() {
        let single = vec![Vec2::new(1.0, 2.0)];
        assert_eq!(interpolate(&single, 8), single);
        assert_eq!(interpolate(&[], 8), Vec::<Vec2>::new());
    }

    #[test]
    fn curve_passes_through_the_endpoints() {
        let points = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(10.0, 0.0),
            Vec2::new(20.0, 10.0),
            Vec2::new(30.0, 10.0),
        ];
        let curve = interpolate(&points, 8);

        assert!(curve.len() > points.len());
        assert!(curve.first().unwrap().distance(points[0]) < 1e-3);
        assert!(curve.last().unwrap().distance(points[3]) < 1e-3);
    }

    #[test]
    fn zero_subdivisions_pass_through_unchanged() {
        let points = vec![Vec2::new(0.0, 0.0), Vec2::new(5.0, 5.0)];
        assert_eq!(interpolate(&points, 0), points);
    }
}
