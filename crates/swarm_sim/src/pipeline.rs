use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use bevy::prelude::*;
use swarm_physics::energy;

use super::ports::{PlacementSink, PointerSource};
use super::swarm::{EmitReport, Swarm};

/// This frame's pointer position and where it comes from
#[derive(Resource)]
pub struct PointerInput {
    source: Box<dyn PointerSource>,
    pub position: [f32; 2],
}

impl PointerInput {
    pub fn new(source: impl PointerSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            position: [f32::NEG_INFINITY, f32::NEG_INFINITY],
        }
    }
}

/// The sink particle positions are emitted to, and the last frame's outcome
#[derive(Resource)]
pub struct PlacementOutput {
    sink: Box<dyn PlacementSink>,
    pub last: EmitReport,
}

impl PlacementOutput {
    pub fn new(sink: impl PlacementSink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
            last: EmitReport::default(),
        }
    }
}

/// Shared stop flag. Clones observe the same flag, so another thread can
/// hold one and end the run between frames.
#[derive(Resource, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn request_stop(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_stop_requested(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Optional frame budget and log cadence
#[derive(Resource, Debug, Clone, Copy)]
pub struct RunLimits {
    pub max_frames: Option<u64>,
    /// Log motion diagnostics every this many frames; 0 disables them
    pub report_interval: u64,
}

impl Default for RunLimits {
    fn default() -> Self {
        Self {
            max_frames: None,
            report_interval: 300,
        }
    }
}

/// Bevy plugin for the per-frame simulation pipeline.
///
/// Expects `Swarm`, `PointerInput` and `PlacementOutput` to be inserted by
/// the caller.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StopSignal>()
            .init_resource::<RunLimits>()
            .add_systems(
                Update,
                (poll_pointer, simulation_tick, emit_placements, stop_check).chain(),
            );
    }
}

fn poll_pointer(mut input: ResMut<PointerInput>) {
    let position = input.source.poll_pointer_position();
    input.position = position;
}

/// Main simulation tick: forces, integration, collisions
fn simulation_tick(mut swarm: ResMut<Swarm>, input: Res<PointerInput>, limits: Res<RunLimits>) {
    let report = swarm.step(input.position);

    if limits.report_interval > 0 && report.frame % limits.report_interval == 0 {
        let stats = energy::motion_stats(swarm.system().particles());
        info!(
            "Frame {}: {} collisions, mean speed {:.1}, peak {:.1}, energy {:.0}",
            report.frame, report.collisions, stats.mean_speed, stats.peak_speed, stats.kinetic_energy
        );
    }
}

fn emit_placements(swarm: Res<Swarm>, mut output: ResMut<PlacementOutput>) {
    let output = &mut *output;
    output.last = swarm.emit(output.sink.as_mut());
}

fn stop_check(
    swarm: Res<Swarm>,
    stop: Res<StopSignal>,
    limits: Res<RunLimits>,
    mut exit: EventWriter<AppExit>,
) {
    let out_of_frames = limits.max_frames.is_some_and(|max| swarm.frame >= max);
    if stop.is_stop_requested() || out_of_frames {
        info!("Simulation stopped after {} frames", swarm.frame);
        exit.send(AppExit::Success);
    }
}
