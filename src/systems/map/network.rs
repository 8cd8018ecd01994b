use bevy::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::config::{ROAD_LAYER_HEIGHT, ROAD_SPHERE_RADIUS};
use crate::systems::loader::{LoadRequest, SplineLoader};

use super::paths::grid::Cell;
use super::{MapData, Params, RegenerateEvent, Seed, build_map_data};

// fixed palette for path colors
const PATH_COLORS: [(u8, u8, u8); 16] = [
    (0xFF, 0xF0, 0xF5),
    (0xFF, 0xD7, 0x00),
    (0xEE, 0x82, 0xEE),
    (0x1E, 0x90, 0xFF),
    (0xEE, 0xE8, 0xAA),
    (0xFF, 0xA5, 0x00),
    (0xBD, 0xB7, 0x6B),
    (0xFF, 0x00, 0xFF),
    (0xFF, 0x00, 0x00),
    (0xDA, 0x70, 0xD6),
    (0x00, 0x00, 0xFF),
    (0x99, 0x66, 0xCC),
    (0xF4, 0xA4, 0x60),
    (0xFF, 0x69, 0xB4),
    (0x9A, 0xCD, 0x32),
    (0x7F, 0xFF, 0x00),
];

// entity hierarchy components
#[derive(Component)]
pub struct RoadNetwork {
    pub seed: u64,
    pub path_count: usize,
}

#[derive(Component)]
pub struct RoadPath {
    pub start: Cell,
    pub transitions: usize,
}

pub fn spawn_network(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    seed: u64,
    map_data: &MapData,
) {
    // nothing survived pruning
    if map_data.splines.is_empty() {
        return;
    }

    let mut rng = StdRng::seed_from_u64(seed);

    // one sphere mesh shared by every path
    let sphere_handle = meshes.add(Sphere::new(ROAD_SPHERE_RADIUS));

    let network_entity = commands
        .spawn((
            RoadNetwork {
                seed,
                path_count: map_data.splines.len(),
            },
            Transform::default(),
            Visibility::Visible,
        ))
        .id();

    for path_spline in &map_data.splines {
        let &(r, g, b) = PATH_COLORS.choose(&mut rng).unwrap_or(&PATH_COLORS[0]);
        let material = materials.add(StandardMaterial {
            base_color: Color::srgb_u8(r, g, b),
            alpha_mode: AlphaMode::Opaque,
            ..default()
        });

        let path_entity = commands
            .spawn((
                RoadPath {
                    start: path_spline.start,
                    transitions: path_spline.transitions,
                },
                Transform::default(),
                Visibility::Visible,
            ))
            .id();

        // sphere chain along the smoothed curve
        let mut sphere_entities = Vec::with_capacity(path_spline.points.len());
        for point in &path_spline.points {
            let sphere_entity = commands
                .spawn((
                    Mesh3d(sphere_handle.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_xyz(point.x, ROAD_LAYER_HEIGHT, point.y),
                    Visibility::Visible,
                ))
                .id();
            sphere_entities.push(sphere_entity);
        }

        commands.entity(path_entity).add_children(&sphere_entities);
        commands.entity(network_entity).add_children(&[path_entity]);
    }
}

pub fn handle_regeneration(
    mut commands: Commands,
    mut events: EventReader<RegenerateEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut seed: ResMut<Seed>,
    params: Res<Params>,
    mut map_data: ResMut<MapData>,
    query: Query<Entity, With<RoadNetwork>>,
    loader: Res<SplineLoader>,
) {
    for event in events.read() {
        seed.0 = event.seed;

        match build_map_data(event.seed, &params) {
            Ok(data) => {
                // cleanup existing network, children despawn with it
                for entity in query.iter() {
                    commands.entity(entity).try_despawn();
                }

                *map_data = data;
                spawn_network(&mut commands, &mut meshes, &mut materials, event.seed, &map_data);
                loader.request(LoadRequest {
                    seed: event.seed,
                    path_count: map_data.splines.len(),
                });
            }
            // a failed run returns nothing, the previous network stays up
            Err(err) => error!("map generation failed: {err}"),
        }
    }
}
