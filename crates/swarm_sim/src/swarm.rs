use bevy::prelude::*;
use swarm_core::{Container, Result, SimulationConfig};
use swarm_physics::{collision, integrator};

use crate::ports::{ContainerSource, PlacementSink};
use crate::scheduler::ParallelScheduler;
use crate::system::ParticleSystem;

/// What happened during one `step`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Frames completed so far, including this one
    pub frame: u64,
    /// Overlapping pairs resolved this frame
    pub collisions: usize,
}

/// Outcome of pushing one frame to a placement sink
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitReport {
    pub placed: usize,
    /// Slots whose placement failed and were skipped this frame
    pub skipped: usize,
}

/// The whole simulation, tracked as a Bevy Resource
#[derive(Resource)]
pub struct Swarm {
    config: SimulationConfig,
    system: ParticleSystem,
    scheduler: ParallelScheduler,
    /// Number of fully completed frames
    pub frame: u64,
    /// While set, `step` leaves every particle and the frame count alone
    pub paused: bool,
}

impl Swarm {
    /// Build the particle set for a discovered container
    pub fn new(config: SimulationConfig, container: &Container) -> Result<Self> {
        config.validate()?;
        config.validate_bounds(&container.bounds)?;

        let system = ParticleSystem::initialize(container.slot_count, container.bounds, &config)?;
        let scheduler = ParallelScheduler::new(system.len(), config.worker_count);

        info!(
            "Swarm ready: {} particles on {}x{} (container {:#x}), {} workers, {:?} boundary",
            system.len(),
            container.bounds.width,
            container.bounds.height,
            container.handle,
            config.worker_count,
            config.boundary_mode
        );

        Ok(Self {
            config,
            system,
            scheduler,
            frame: 0,
            paused: false,
        })
    }

    /// Discover the container and build the swarm for it
    pub fn discover(config: SimulationConfig, source: &mut dyn ContainerSource) -> Result<Self> {
        let container = source.discover_container()?;
        Self::new(config, &container)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn system(&self) -> &ParticleSystem {
        &self.system
    }

    pub fn system_mut(&mut self) -> &mut ParticleSystem {
        &mut self.system
    }

    /// Parallel phase: every particle's velocity picks up this frame's forces
    pub fn accumulate_forces(&mut self, pointer: [f32; 2]) {
        self.scheduler
            .run_force_phase(&mut self.system, pointer, &self.config);
    }

    /// Serial phase: move every particle and apply the boundary policy
    pub fn integrate(&mut self) {
        let bounds = self.system.bounds();
        for p in self.system.particles_mut() {
            integrator::advance(p, &bounds, &self.config);
        }
    }

    /// Serial phase: separate overlapping pairs, then restore containment
    /// and the speed ceiling the corrections may have broken
    pub fn resolve_collisions(&mut self) -> usize {
        let bounds = self.system.bounds();
        let particles = self.system.particles_mut();
        let resolved = collision::resolve_all(particles, &self.config);
        for p in particles.iter_mut() {
            integrator::settle(p, &bounds, self.config.max_speed);
        }
        resolved
    }

    /// Advance one full frame against a pointer snapshot
    pub fn step(&mut self, pointer: [f32; 2]) -> FrameReport {
        if self.paused {
            return FrameReport {
                frame: self.frame,
                collisions: 0,
            };
        }

        self.accumulate_forces(pointer);
        self.integrate();
        let collisions = self.resolve_collisions();
        self.frame += 1;

        FrameReport {
            frame: self.frame,
            collisions,
        }
    }

    /// Send every particle's clamped pixel position to `sink`.
    /// A failing slot is logged and skipped; the rest are still placed.
    pub fn emit(&self, sink: &mut dyn PlacementSink) -> EmitReport {
        let bounds = self.system.bounds();
        let mut report = EmitReport::default();

        for p in self.system.particles() {
            let (x, y) = bounds.pixel(p.position);
            match sink.place(p.index, x, y) {
                Ok(()) => report.placed += 1,
                Err(err) => {
                    warn!("Frame {}: skipping slot {}: {}", self.frame, p.index, err);
                    report.skipped += 1;
                }
            }
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::VirtualDesktop;
    use swarm_core::{BoundaryMode, Bounds, SwarmError};

    fn container(slots: usize) -> Container {
        Container {
            handle: 1,
            slot_count: slots,
            bounds: Bounds::new(1920.0, 1080.0),
        }
    }

    #[test]
    fn test_discover_failure_is_fatal() {
        let mut desktop = VirtualDesktop::unavailable(Bounds::new(1920.0, 1080.0));
        let result = Swarm::discover(SimulationConfig::default(), &mut desktop);
        assert!(matches!(result, Err(SwarmError::ContainerUnavailable(_))));
    }

    #[test]
    fn test_empty_container_is_fatal() {
        let result = Swarm::new(SimulationConfig::default(), &container(0));
        assert!(matches!(result, Err(SwarmError::NoSlots)));
    }

    #[test]
    fn test_invalid_config_is_fatal() {
        let config = SimulationConfig {
            dt: 0.0,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            Swarm::new(config, &container(4)),
            Err(SwarmError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_non_finite_screen_is_fatal() {
        let container = Container {
            bounds: Bounds::new(f32::NAN, 1080.0),
            ..container(4)
        };
        assert!(matches!(
            Swarm::new(SimulationConfig::default(), &container),
            Err(SwarmError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_oversized_worker_count_still_runs() {
        let config = SimulationConfig {
            worker_count: usize::MAX / 16,
            ..SimulationConfig::default()
        };
        let mut swarm = Swarm::new(config, &container(6)).unwrap();
        assert_eq!(swarm.step([0.0, 0.0]).frame, 1);
    }

    #[test]
    fn test_step_counts_frames() {
        let mut swarm = Swarm::new(SimulationConfig::default(), &container(6)).unwrap();
        assert_eq!(swarm.step([0.0, 0.0]).frame, 1);
        assert_eq!(swarm.step([0.0, 0.0]).frame, 2);
        assert_eq!(swarm.frame, 2);
    }

    #[test]
    fn test_paused_swarm_does_not_advance() {
        let mut swarm = Swarm::new(SimulationConfig::default(), &container(6)).unwrap();
        swarm.step([0.0, 0.0]);
        let before = swarm.system().particles().to_vec();

        swarm.paused = true;
        let report = swarm.step([0.0, 0.0]);

        assert_eq!(report, FrameReport { frame: 1, collisions: 0 });
        assert_eq!(swarm.frame, 1);
        assert_eq!(swarm.system().particles(), &before[..]);

        swarm.paused = false;
        assert_eq!(swarm.step([0.0, 0.0]).frame, 2);
    }

    #[test]
    fn test_emit_skips_failed_slots() {
        let mut swarm = Swarm::new(SimulationConfig::default(), &container(5)).unwrap();
        swarm.step([0.0, 0.0]);

        let mut desktop = VirtualDesktop::new(5, Bounds::new(1920.0, 1080.0));
        desktop.invalidate(2);
        let report = swarm.emit(&mut desktop);

        assert_eq!(report, EmitReport { placed: 4, skipped: 1 });
        assert!(desktop.slot(2).is_none());
        assert!(desktop.slot(4).is_some());
        assert_eq!(desktop.slots().iter().filter(|s| s.is_some()).count(), 4);
    }

    #[test]
    fn test_emit_clamps_to_screen() {
        let mut swarm = Swarm::new(SimulationConfig::default(), &container(1)).unwrap();
        // Tamper with the particle so its raw position is off screen
        swarm.system_mut().get_mut(0).unwrap().position = [5000.0, -20.0];

        let mut desktop = VirtualDesktop::new(1, Bounds::new(1920.0, 1080.0));
        swarm.emit(&mut desktop);

        assert_eq!(desktop.slot(0), Some((1919, 0)));
    }

    #[test]
    fn test_collisions_keep_frame_invariants() {
        let config = SimulationConfig {
            boundary_mode: BoundaryMode::ClampAndDamp,
            jitter_strength: 0.0,
            ..SimulationConfig::default()
        };
        let mut swarm = Swarm::new(config, &container(3)).unwrap();
        for p in swarm.system_mut().particles_mut() {
            p.position = [30.0, 30.0 + p.index as f32];
        }

        let resolved = swarm.resolve_collisions();

        assert!(resolved > 0);
        let bounds = swarm.system().bounds();
        for p in swarm.system().particles() {
            assert!(bounds.contains(p.position, p.radius));
            assert!(p.speed() <= swarm.config().max_speed * (1.0 + 1e-5));
        }
    }
}
