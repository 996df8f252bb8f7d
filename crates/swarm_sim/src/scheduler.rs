use std::ops::Range;

use bevy::log::debug;
use bevy::tasks::{TaskPool, TaskPoolBuilder};
use swarm_core::SimulationConfig;
use swarm_physics::forces::ForceField;

use crate::system::ParticleSystem;

/// Split `0..n` into `workers` contiguous ranges. The first `n % workers`
/// ranges hold one extra element. Workers beyond `n` would only get empty
/// ranges, so at most `n` ranges are built.
pub fn partition(n: usize, workers: usize) -> Vec<Range<usize>> {
    let workers = workers.clamp(1, n.max(1));
    let per_worker = n / workers;
    let remainder = n % workers;

    let mut groups = Vec::with_capacity(workers);
    let mut start = 0;
    for i in 0..workers {
        let end = start + per_worker + usize::from(i < remainder);
        groups.push(start..end);
        start = end;
    }
    groups
}

/// Runs the force phase over fixed particle partitions on a persistent pool.
///
/// Each frame fans out one task per non-empty group and joins them before
/// returning. Tasks share a frozen position snapshot and each owns a
/// disjoint slice of particles and random streams, so no locking is needed.
pub struct ParallelScheduler {
    pool: TaskPool,
    groups: Vec<Range<usize>>,
}

impl ParallelScheduler {
    pub fn new(particle_count: usize, worker_count: usize) -> Self {
        let groups = partition(particle_count, worker_count);
        let threads = worker_count.clamp(1, particle_count.max(1));
        let pool = TaskPoolBuilder::new()
            .num_threads(threads)
            .thread_name("swarm force worker".to_string())
            .build();

        debug!(
            "Force partitions: {} groups over {} particles on {} threads",
            groups.len(),
            particle_count,
            threads
        );

        Self { pool, groups }
    }

    pub fn groups(&self) -> &[Range<usize>] {
        &self.groups
    }

    /// Accumulate every particle's forces into its velocity.
    ///
    /// Blocks until all groups have finished. Positions are not touched.
    pub fn run_force_phase(
        &self,
        system: &mut ParticleSystem,
        pointer: [f32; 2],
        config: &SimulationConfig,
    ) {
        let snapshot = system.positions();
        let center = system.bounds().center();
        let field = ForceField::new(&snapshot, pointer, center, config);
        let (particles, streams) = system.split_mut();

        let busy = self.groups.iter().filter(|g| !g.is_empty()).count();
        if busy <= 1 {
            field.apply(particles, streams);
            return;
        }

        let mut rest_particles = particles;
        let mut rest_streams = streams;
        let mut work = Vec::with_capacity(busy);
        for group in &self.groups {
            let (p, p_tail) = std::mem::take(&mut rest_particles).split_at_mut(group.len());
            let (s, s_tail) = std::mem::take(&mut rest_streams).split_at_mut(group.len());
            rest_particles = p_tail;
            rest_streams = s_tail;
            if !group.is_empty() {
                work.push((p, s));
            }
        }

        let field = &field;
        self.pool.scope(|scope| {
            for (group, streams) in work {
                scope.spawn(async move { field.apply(group, streams) });
            }
        });
    }
}
