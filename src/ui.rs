/*
 * UI Module
 *
 * This module contains the egui control panel. It edits a copy of the
 * simulation parameters; the app applies the copy afterwards so invalid
 * combinations can be rejected without touching the running flock.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{NeighborSearch, SimulationParams};

// What the panel asked for this frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UiResponse {
    pub reset_requested: bool,
    pub params_changed: bool,
}

pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
    num_boids: usize,
) -> UiResponse {
    let before = params.clone();
    let mut response = UiResponse::default();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Boid Parameters", |ui| {
                ui.add(egui::Slider::new(&mut params.num_boids, SimulationParams::get_num_boids_range()).text("Number of Boids"));

                if ui.button("Reset Boids").clicked() {
                    response.reset_requested = true;
                }

                ui.add(egui::Slider::new(&mut params.max_speed, SimulationParams::get_max_speed_range()).text("Max Speed"));
            });

            ui.collapsing("Flocking Behavior", |ui| {
                ui.add(egui::Slider::new(&mut params.coherence_factor, SimulationParams::get_factor_range()).text("Coherence Factor"));
                ui.add(egui::Slider::new(&mut params.alignment_factor, SimulationParams::get_factor_range()).text("Alignment Factor"));
                ui.add(egui::Slider::new(&mut params.separation_factor, SimulationParams::get_factor_range()).text("Separation Factor"));
                ui.add(egui::Slider::new(&mut params.distance_visible, SimulationParams::get_distance_range()).text("Visible Distance"));
                ui.add(egui::Slider::new(&mut params.distance_separation, SimulationParams::get_distance_range()).text("Separation Distance"));
            });

            ui.collapsing("Quadtree", |ui| {
                ui.add(egui::Slider::new(&mut params.tree_capacity, SimulationParams::get_capacity_range()).text("Node Capacity"));
                ui.checkbox(&mut params.show_quadtree, "Show Quadtree");

                ui.horizontal(|ui| {
                    ui.radio_value(&mut params.neighbor_search, NeighborSearch::QuadTree, "Quadtree");
                    ui.radio_value(&mut params.neighbor_search, NeighborSearch::BruteForce, "Brute Force");
                });
                ui.checkbox(&mut params.enable_parallel, "Enable Parallel Processing");

                ui.separator();

                ui.label(format!("Nodes: {}", debug_info.tree_nodes));
                ui.label(format!("Depth: {}", debug_info.tree_depth));
                ui.label(format!("Dropped Points: {}", debug_info.dropped_points));
                ui.label(format!("Candidates / Boid: {:.1}", debug_info.candidates_per_boid));
                ui.label(format!("Close / Far Pairs: {} / {}", debug_info.close_pairs, debug_info.far_pairs));
            });

            ui.collapsing("Performance", |ui| {
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Step time: {:.2} ms", debug_info.step_time.as_secs_f64() * 1000.0));
                ui.label(format!("Total Boids: {}", num_boids));
            });

            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    response.params_changed = *params != before;
    response
}
