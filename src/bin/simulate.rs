//! Headless batch run: the same seeded swarm stepped under several worker
//! counts, checking that the trajectories agree and timing each run.

use std::time::Instant;

use swarm_core::{BoundaryMode, Bounds, Container, Particle, SimulationConfig};
use swarm_physics::energy;
use swarm_sim::ports::{OrbitingPointer, PointerSource};
use swarm_sim::{Swarm, VirtualDesktop};

const SCREEN: Bounds = Bounds {
    width: 1920.0,
    height: 1080.0,
};
const SLOTS: usize = 200;
const FRAMES: usize = 300;

struct RunSummary {
    workers: usize,
    mode: BoundaryMode,
    millis_per_frame: f64,
    collisions: usize,
    skipped: usize,
    final_state: Vec<Particle>,
    stats: energy::MotionStats,
}

fn run(workers: usize, mode: BoundaryMode) -> RunSummary {
    let config = SimulationConfig {
        worker_count: workers,
        boundary_mode: mode,
        seed: Some(2024),
        ..SimulationConfig::default()
    };
    let container = Container {
        handle: 1,
        slot_count: SLOTS,
        bounds: SCREEN,
    };
    let mut swarm = match Swarm::new(config, &container) {
        Ok(swarm) => swarm,
        Err(err) => {
            eprintln!("Cannot build swarm: {err}");
            std::process::exit(1);
        }
    };

    let mut pointer = OrbitingPointer::new(SCREEN.center(), 300.0, 0.03);
    let mut desktop = VirtualDesktop::new(SLOTS, SCREEN);
    let mut collisions = 0;
    let mut skipped = 0;

    let start = Instant::now();
    for _ in 0..FRAMES {
        let report = swarm.step(pointer.poll_pointer_position());
        collisions += report.collisions;
        skipped += swarm.emit(&mut desktop).skipped;
    }
    let elapsed = start.elapsed();

    let final_state = swarm.system().particles().to_vec();
    let stats = energy::motion_stats(&final_state);

    RunSummary {
        workers,
        mode,
        millis_per_frame: elapsed.as_secs_f64() * 1000.0 / FRAMES as f64,
        collisions,
        skipped,
        final_state,
        stats,
    }
}

fn main() {
    let worker_counts = [1, 2, 4, 8, 25];

    eprintln!("Stepping {SLOTS} particles for {FRAMES} frames...");

    for mode in [BoundaryMode::Bounce, BoundaryMode::ClampAndDamp] {
        let runs: Vec<RunSummary> = worker_counts.iter().map(|&w| run(w, mode)).collect();

        println!();
        println!("{mode:?}");
        println!("  workers   ms/frame   collisions   skipped   mean speed   peak speed   energy");
        for r in &runs {
            println!(
                "  {:>7}   {:>8.3}   {:>10}   {:>7}   {:>10.1}   {:>10.1}   {:>.0}",
                r.workers,
                r.millis_per_frame,
                r.collisions,
                r.skipped,
                r.stats.mean_speed,
                r.stats.peak_speed,
                r.stats.kinetic_energy
            );
        }

        let reference = &runs[0];
        let diverged: Vec<usize> = runs
            .iter()
            .filter(|r| r.final_state != reference.final_state)
            .map(|r| r.workers)
            .collect();
        if diverged.is_empty() {
            println!("  trajectories identical across worker counts");
        } else {
            println!(
                "  {:?}: trajectories diverged from the serial run for workers {:?}",
                reference.mode, diverged
            );
        }
        println!(
            "  overlapping pairs at end: {}",
            energy::overlap_count(&reference.final_state)
        );
    }
}
