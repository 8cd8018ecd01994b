// this is the entry point for the road map generation plugin
use std::collections::HashMap;

use bevy::prelude::*;

use crate::config::*;

pub mod network;
pub mod paths;

use paths::grid::{Cell, ConfigError};
use paths::layout::MapLayout;
use paths::spline;
use paths::walk::{GenerationError, generate_covering_paths};

// resources
#[derive(Resource)]
pub struct Seed(pub u64);

// generation parameters, runtime-tunable copies of the config defaults
#[derive(Resource)]
pub struct Params {
    pub num_x_cells: i32,
    pub num_y_cells: i32,
    pub min_path_length: usize,
    pub min_cos_turn: f32,
    pub num_connectors: usize,
    pub connector_radius: f32,
    pub spline_subdivisions: usize,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            num_x_cells: NUM_X_CELLS,
            num_y_cells: NUM_Y_CELLS,
            min_path_length: MIN_PATH_LENGTH,
            min_cos_turn: MIN_COS_TURN,
            num_connectors: NUM_CONNECTORS,
            connector_radius: CONNECTOR_RADIUS,
            spline_subdivisions: SPLINE_SUBDIVISIONS,
        }
    }
}

impl Params {
    pub fn layout(&self) -> Result<MapLayout, ConfigError> {
        MapLayout::new(
            -MAP_EXTENT,
            MAP_EXTENT,
            -MAP_EXTENT,
            MAP_EXTENT,
            self.num_x_cells,
            self.num_y_cells,
            self.num_connectors,
            self.connector_radius,
        )
    }
}

// one path's smoothed world-space curve
pub struct PathSpline {
    pub start: Cell,
    pub transitions: usize,
    pub points: Vec<Vec2>,
}

// the result of one generation run
// treated as an immutable snapshot once stored, regeneration replaces it wholesale
#[derive(Resource, Default)]
pub struct MapData {
    pub paths: HashMap<Cell, Vec<Cell>>,
    pub splines: Vec<PathSpline>,
}

// event for regeneration
#[derive(Event)]
pub struct RegenerateEvent {
    pub seed: u64,
}

/// Runs the full pipeline for one seed: covering walk, pruning, world-space
/// mapping, spline smoothing. Fails without a partial result.
pub fn build_map_data(seed: u64, params: &Params) -> Result<MapData, GenerationError> {
    let layout = params.layout()?;
    let paths = generate_covering_paths(
        params.num_x_cells,
        params.num_y_cells,
        params.min_path_length,
        params.min_cos_turn,
        seed,
    )?;

    let splines = paths
        .iter()
        .map(|(&start, sequence)| PathSpline {
            start,
            transitions: sequence.len(),
            points: spline::interpolate(
                &layout.path_world_points(start, sequence),
                params.spline_subdivisions,
            ),
        })
        .collect();

    Ok(MapData { paths, splines })
}

// main plugin for generation
pub struct MapGenerationPlugin;

impl Plugin for MapGenerationPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Seed(INITIAL_SEED))
            .insert_resource(Params::default())
            .insert_resource(MapData::default())
            .add_event::<RegenerateEvent>()
            .add_systems(Startup, initial_generation)
            .add_systems(Update, (debug_gizmos, network::handle_regeneration));
    }
}

fn initial_generation(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    seed: Res<Seed>,
    params: Res<Params>,
    mut map_data: ResMut<MapData>,
) {
    match build_map_data(seed.0, &params) {
        Ok(data) => {
            *map_data = data;
            network::spawn_network(&mut commands, &mut meshes, &mut materials, seed.0, &map_data);
            info!(
                "generated initial road map: {} paths from seed {}",
                map_data.splines.len(),
                seed.0
            );
        }
        Err(err) => error!("initial map generation failed: {err}"),
    }
}

fn debug_gizmos(
    mut gizmos: Gizmos,
    params: Res<Params>,
    map_data: Res<MapData>,
    gizmos_visible: Res<crate::systems::ui::GizmosVisible>,
) {
    if !gizmos_visible.0 {
        return;
    }

    let Ok(layout) = params.layout() else {
        return;
    };

    // grid anchors in blue, connector points in red
    for anchor in layout.grid_anchors() {
        gizmos.sphere(
            Vec3::new(anchor.x, 0.02, anchor.y),
            0.12,
            Color::srgba(0.18, 0.28, 0.85, 0.7),
        );
    }
    for point in layout.connection_points() {
        gizmos.sphere(
            Vec3::new(point.x, 0.02, point.y),
            0.06,
            Color::srgba(0.85, 0.18, 0.18, 0.5),
        );
    }

    // one arrow per recorded edge, on the raw grid positions
    for (&start, sequence) in map_data.paths.iter() {
        let points = layout.path_world_points(start, sequence);
        for pair in points.windows(2) {
            gizmos.arrow(
                Vec3::new(pair[0].x, 0.05, pair[0].y),
                Vec3::new(pair[1].x, 0.05, pair[1].y),
                Color::srgba(1.0, 1.0, 1.0, 0.6),
            );
        }
    }
}
