use bevy::prelude::*;
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin}; // fps
use bevy::pbr::wireframe::WireframeConfig;
use bevy_egui::{egui, EguiContexts, EguiPlugin, EguiPrimaryContextPass};

use crate::systems::export::ExportEvent;
use crate::systems::grid::GridConfig;
use crate::systems::tree::{
    ClearEvent, GenerationStatus, Interval, Params, PlacementArmed, RegenerateEvent, Seed,
};

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        assert!(app.is_plugin_added::<EguiPlugin>());
        app.add_systems(EguiPrimaryContextPass, (ui_main, fps)); // UI rendering here
    }
}

// min/max editor for one interval
// returns true when either end was changed
fn interval_row(ui: &mut egui::Ui, label: &str, interval: &mut Interval, speed: f64) -> bool {
    let mut changed = false;
    ui.horizontal(|ui| {
        ui.label(label);
        changed |= ui
            .add(egui::DragValue::new(&mut interval.min).speed(speed).prefix("min "))
            .changed();
        changed |= ui
            .add(egui::DragValue::new(&mut interval.max).speed(speed).prefix("max "))
            .changed();
    });
    changed
}

fn branch_section(
    ui: &mut egui::Ui,
    title: &str,
    profile: &mut crate::systems::tree::BranchProfile,
) -> bool {
    let mut changed = false;
    egui::CollapsingHeader::new(title)
        .default_open(false)
        .show(ui, |ui| {
            changed |= interval_row(ui, "Height scale", &mut profile.height_scale, 0.01);
            changed |= interval_row(ui, "Width scale", &mut profile.width_scale, 0.01);
            changed |= interval_row(ui, "Rotation (deg)", &mut profile.rotation, 1.0);
            changed |= interval_row(ui, "Bending (deg)", &mut profile.bending, 1.0);
        });
    changed
}

fn ui_main(
    mut contexts: EguiContexts,
    current_seed: Res<Seed>,
    mut params: ResMut<Params>,
    mut placement: ResMut<PlacementArmed>,
    status: Res<GenerationStatus>,
    mut grid: ResMut<GridConfig>,
    mut wireframe: ResMut<WireframeConfig>,
    mut regen_events: EventWriter<RegenerateEvent>,
    mut clear_events: EventWriter<ClearEvent>,
    mut export_events: EventWriter<ExportEvent>,
) {
    if let Ok(ctx) = contexts.ctx_mut() {
        egui::SidePanel::left("archetype_panel")
            .default_width(220.0)
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

                // placement
                let place_label = if placement.0 {
                    "Placing... (click ground, Esc cancels)"
                } else {
                    "Place Tree"
                };
                if ui.button(place_label).clicked() {
                    placement.0 = !placement.0;
                }

                ui.separator();

                // seed
                egui::CollapsingHeader::new("Seed")
                    .default_open(true)
                    .show(ui, |ui| {
                        ui.label(format!("Current: {}", current_seed.0));
                        if ui.button("Regenerate").clicked() {
                            regen_events.write(RegenerateEvent { seed: rand::random() });
                        }
                    });

                ui.separator();

                ui.label("Archetype:");

                egui::CollapsingHeader::new("Trunk")
                    .default_open(true)
                    .show(ui, |ui| {
                        // loop count is capped here, buffers grow as 2^L
                        regenerate |= ui
                            .add(egui::Slider::new(&mut params.0.loop_count, 0..=10).text("Loops"))
                            .changed();
                        regenerate |= ui
                            .add(egui::Slider::new(&mut params.0.sides, 3..=16).text("Sides"))
                            .changed();
                        ui.horizontal(|ui| {
                            ui.label("Height");
                            regenerate |= ui
                                .add(egui::DragValue::new(&mut params.0.trunk_height).speed(0.05))
                                .changed();
                            ui.label("Width");
                            regenerate |= ui
                                .add(egui::DragValue::new(&mut params.0.trunk_width).speed(0.02))
                                .changed();
                        });
                    });

                regenerate |= branch_section(ui, "Main Branch", &mut params.0.main);
                regenerate |= branch_section(ui, "Secondary Branch", &mut params.0.secondary);

                // surface configuration errors right where they were caused
                if let Some(error) = &status.0 {
                    ui.separator();
                    ui.colored_label(egui::Color32::from_rgb(220, 80, 80), error);
                }

                ui.separator();

                // view options
                ui.checkbox(&mut grid.enabled, "Ground grid");
                ui.checkbox(&mut wireframe.global, "Wireframe");

                ui.separator();

                if ui.button("Clear Trees").clicked() {
                    clear_events.write(ClearEvent);
                }
                if ui.button("Export OBJ").clicked() {
                    export_events.write(ExportEvent {
                        filename: "grove.obj".to_string(),
                    });
                }

                if regenerate {
                    regen_events.write(RegenerateEvent { seed: current_seed.0 });
                }
            });
    }
}

// fps readout in the corner
fn fps(mut contexts: EguiContexts, diagnostics: Res<DiagnosticsStore>) {
    let Some(value) = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
    else {
        return;
    };

    if let Ok(ctx) = contexts.ctx_mut() {
        egui::Area::new(egui::Id::new("fps_overlay"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-8.0, 8.0))
            .show(ctx, |ui| {
                ui.label(format!("FPS: {:.0}", value));
            });
    }
}
