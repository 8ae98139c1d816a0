/*
 * Application Module
 *
 * This module defines the nannou application model for the boid simulation.
 * It owns the Simulation, feeds it window events, applies changes from the
 * control panel and keeps the current frame's quadtree around for drawing.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use tracing::{error, info, warn};

use crate::debug::DebugInfo;
use crate::input::{self, InputEvent, LoopControl};
use crate::params::SimulationParams;
use crate::quadtree::QuadTree;
use crate::renderer::NannouCanvas;
use crate::simulation::Simulation;
use crate::ui;

// Main model for the application
pub struct Model {
    pub simulation: Simulation,
    pub egui: Egui,
    // Edited by the UI, applied to the simulation when valid
    pub pending_params: SimulationParams,
    pub pending_events: Vec<InputEvent>,
    // Quadtree built for the most recent frame, replaced every frame
    pub quadtree: Option<QuadTree>,
}

// Initialize the model from the default parameters
pub fn model(app: &App) -> Model {
    let params = SimulationParams::default();

    let model = Simulation::new(params)
        .map_err(anyhow::Error::from)
        .and_then(|simulation| build_model(app, simulation));

    match model {
        Ok(model) => model,
        Err(err) => {
            error!(%err, "Failed to start simulation");
            std::process::exit(1);
        }
    }
}

/// Build the model for a simulation that has already been created.
pub fn build_model(app: &App, simulation: Simulation) -> anyhow::Result<Model> {
    let params = simulation.params().clone();

    app.set_exit_on_escape(false);

    let window_id = app
        .new_window()
        .title("Quadtree Boids")
        .size(params.world_width as u32, params.world_height as u32)
        .view(view)
        .event(window_event)
        .raw_event(raw_window_event)
        .build()
        .map_err(|err| anyhow::anyhow!("failed to build window: {:?}", err))?;

    let window = app
        .window(window_id)
        .ok_or_else(|| anyhow::anyhow!("window {:?} closed during startup", window_id))?;
    let egui = Egui::from_window(&window);

    info!(window = ?window_id, "Opened simulation window");

    Ok(Model {
        simulation,
        egui,
        pending_params: params,
        pending_events: Vec::new(),
        quadtree: None,
    })
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    // Handle quit and escape before doing any work
    if input::handle_events(model.pending_events.drain(..)) == LoopControl::Exit {
        info!(frames = model.simulation.debug_info().frames_simulated, "Closing simulation");
        app.quit();
        return;
    }

    {
        let debug_info: &mut DebugInfo = model.simulation.debug_info_mut();
        debug_info.fps = app.fps();
        debug_info.frame_time = update.since_last;
    }

    model.egui.set_elapsed_time(update.since_start);
    let response = ui::update_ui(
        &mut model.egui,
        &mut model.pending_params,
        model.simulation.debug_info(),
        model.simulation.boids().len(),
    );

    if response.params_changed {
        if let Err(err) = model.simulation.set_params(model.pending_params.clone()) {
            warn!(%err, "Rejected parameter change");
            model.pending_params = model.simulation.params().clone();
        }
    }

    if response.reset_requested {
        model.simulation.reset();
    }

    model.quadtree = if model.simulation.params().pause_simulation {
        // Keep the last tree on screen while paused
        model.quadtree.take()
    } else {
        model.simulation.step()
    };
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let overlay = if model.simulation.params().show_quadtree {
        model.quadtree.as_ref()
    } else {
        None
    };

    let mut canvas = NannouCanvas::new(app, &frame);
    model.simulation.draw(&mut canvas, overlay);

    // Draw the egui UI
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!(?err, "Failed to draw control panel");
    }
}

// Collect window events for the next update
fn window_event(_app: &App, model: &mut Model, event: WindowEvent) {
    let event = input::from_window_event(&event);
    if event != InputEvent::Other {
        model.pending_events.push(event);
    }
}

// Handle raw window events for egui
fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
