use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin}; // fps
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};

use crate::systems::map::{MapData, Params, RegenerateEvent, Seed};

#[derive(Resource)]
pub struct GizmosVisible(pub bool);

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        assert!(app.is_plugin_added::<EguiPlugin>());
        app.insert_resource(GizmosVisible(false))
            .add_systems(Update, key_input)
            .add_systems(EguiPrimaryContextPass, (ui_main, fps)); // UI rendering here
    }
}

fn key_input(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut gizmos_visible: ResMut<GizmosVisible>,
) {
    if keyboard_input.just_pressed(KeyCode::KeyG) {
        gizmos_visible.0 = !gizmos_visible.0;
    }
}

fn ui_main(
    mut contexts: EguiContexts,
    current_seed: Res<Seed>,
    mut params: ResMut<Params>,
    mut regen_events: EventWriter<RegenerateEvent>,
    mut gizmos_visible: ResMut<GizmosVisible>,
    map_data: Res<MapData>,
    mut grid_config: ResMut<crate::systems::grid::GridConfig>,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::SidePanel::left("config_panel")
            .default_width(200.0)
            .min_width(250.0)
            .max_width(400.0)
            .resizable(true)
            .show(ctx, |ui| {
                let mut regenerate = false;

                // camera
                ui.label("Camera: ");
                ui.label("WASD - Move");
                ui.label("Scroll - Zoom");
                ui.label("MMB - Rotate");

                ui.separator();

                // seed
                egui::CollapsingHeader::new("Seed")
                    .default_open(true)
                    .show(ui, |ui| {
                        ui.label(format!("Current: {}", current_seed.0));
                        if ui.button("Regenerate").clicked() {
                            let new_seed = rand::random();
                            regen_events.write(RegenerateEvent { seed: new_seed });
                        }
                    });

                // grid parameters
                egui::CollapsingHeader::new("Grid")
                    .default_open(true)
                    .show(ui, |ui| {
                        regenerate |= ui
                            .add(egui::Slider::new(&mut params.num_x_cells, 1..=40).text("X Cells"))
                            .on_hover_text("Grid columns. More cells create a denser network.")
                            .changed();
                        regenerate |= ui
                            .add(egui::Slider::new(&mut params.num_y_cells, 1..=40).text("Y Cells"))
                            .on_hover_text("Grid rows. More cells create a denser network.")
                            .changed();
                    });

                // path parameters
                egui::CollapsingHeader::new("Paths")
                    .default_open(true)
                    .show(ui, |ui| {
                        regenerate |= ui
                            .add(
                                egui::Slider::new(&mut params.min_path_length, 0..=40)
                                    .text("Min Path Length"),
                            )
                            .on_hover_text("Paths with fewer transitions are pruned away.")
                            .changed();
                        regenerate |= ui
                            .add(
                                egui::Slider::new(&mut params.min_cos_turn, 0.0..=0.9)
                                    .text("Turn Strictness"),
                            )
                            .on_hover_text(
                                "Minimum cosine of the turn angle between consecutive \
                                 segments. Higher values force straighter roads.",
                            )
                            .changed();
                    });

                // connector ring parameters
                egui::CollapsingHeader::new("Connectors")
                    .default_open(false)
                    .show(ui, |ui| {
                        regenerate |= ui
                            .add(
                                egui::Slider::new(&mut params.num_connectors, 2..=16)
                                    .step_by(2.0)
                                    .text("Count"),
                            )
                            .on_hover_text("Connector points per grid anchor, kept even.")
                            .changed();
                        regenerate |= ui
                            .add(
                                egui::Slider::new(&mut params.connector_radius, 0.2..=3.0)
                                    .text("Radius (m)")
                                    .suffix(" m"),
                            )
                            .on_hover_text("Distance of connector points from their anchor.")
                            .changed();
                    });

                // rendering parameters
                egui::CollapsingHeader::new("Rendering")
                    .default_open(true)
                    .show(ui, |ui| {
                        regenerate |= ui
                            .add(
                                egui::Slider::new(&mut params.spline_subdivisions, 1..=16)
                                    .text("Spline Detail"),
                            )
                            .on_hover_text("Spline samples per path segment.")
                            .changed();
                        ui.checkbox(&mut grid_config.enabled, "Tick Grid")
                            .on_hover_text("Show the cell grid lines.");
                        ui.checkbox(&mut gizmos_visible.0, "Debug Gizmos (G)")
                            .on_hover_text("Show anchors, connector points and edge arrows.");
                    });

                ui.separator();

                // network summary
                ui.horizontal(|ui| {
                    ui.label("Paths:");
                    ui.label(format!("{}", map_data.splines.len()));
                });
                ui.horizontal(|ui| {
                    ui.label("Covered cells:");
                    let covered: usize = map_data
                        .paths
                        .values()
                        .map(|sequence| sequence.len() + 1)
                        .sum();
                    ui.label(format!("{}", covered));
                });

                ui.separator();
                ui.label("ESC - Exit");

                // trigger regeneration on any parameter change
                if regenerate {
                    regen_events.write(RegenerateEvent { seed: current_seed.0 });
                }
            });
    }
}

fn fps(mut contexts: EguiContexts, diagnostics: Res<DiagnosticsStore>) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::Area::new(egui::Id::new("fps_counter"))
            .anchor(egui::Align2::RIGHT_TOP, egui::Vec2::new(-10.0, 10.0))
            .show(ctx, |ui| {
                ui.with_layout(egui::Layout::top_down(egui::Align::RIGHT), |ui| {
                    if let Some(fps_diagnostic) = diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS)
                    {
                        if let Some(fps) = fps_diagnostic.smoothed() {
                            ui.label(
                                egui::RichText::new(format!("{:.0}", fps))
                                    .size(26.0)
                                    .color(egui::Color32::WHITE),
                            );
                        }
                    }
                });
            });
    }
}
