use bevy::gizmos::config::{GizmoConfigGroup, GizmoConfigStore};
use bevy::prelude::*;

// draws the map's actual tick grid on the ground plane
// so the cell structure behind the generated paths stays visible
pub struct GridPlugin;

#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct GridGizmoGroup;

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(GridConfig::default())
            .init_gizmo_group::<GridGizmoGroup>()
            .add_systems(Startup, setup_gizmos)
            .add_systems(Update, draw_grid);
    }
}

// setting these parameters as a resource allows for runtime modifications
#[derive(Resource)]
pub struct GridConfig {
    pub tick_color: Color,
    pub border_color: Color,
    pub enabled: bool,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            tick_color: Color::srgba(0.35, 0.35, 0.35, 0.2),
            border_color: Color::srgba(0.55, 0.55, 0.55, 0.45),
            enabled: true,
        }
    }
}

fn setup_gizmos(mut config_store: ResMut<GizmoConfigStore>) {
    let (config, _) = config_store.config_mut::<GridGizmoGroup>();
    config.depth_bias = 0.1; // render depth
}

fn draw_grid(
    mut gizmos: Gizmos<GridGizmoGroup>,
    config: Res<GridConfig>,
    params: Res<crate::systems::map::Params>,
) {
    if !config.enabled {
        return;
    }

    // layout only fails on bad UI input, nothing to draw then
    let Ok(layout) = params.layout() else {
        return;
    };

    let x_ticks = layout.grid_x_ticks();
    let y_ticks = layout.grid_y_ticks();

    for (i, &x) in x_ticks.iter().enumerate() {
        let color = if i == 0 || i == x_ticks.len() - 1 {
            config.border_color
        } else {
            config.tick_color
        };
        gizmos.line(
            Vec3::new(x, -0.01, layout.y_min),
            Vec3::new(x, -0.01, layout.y_max),
            color,
        );
    }

    for (i, &y) in y_ticks.iter().enumerate() {
        let color = if i == 0 || i == y_ticks.len() - 1 {
            config.border_color
        } else {
            config.tick_color
        };
        gizmos.line(
            Vec3::new(layout.x_min, -0.01, y),
            Vec3::new(layout.x_max, -0.01, y),
            color,
        );
    }
}
