//! Owned per-tick pipeline: integrate, rebuild the proximity graph,
//! synthesize render buffers.

use rand::Rng;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::graph::EdgeList;
use crate::particle::{Particle, ParticleSet};
use crate::phases;
use crate::render_buffer::RenderBuffers;

/// One simulation instance: the particle population plus the scratch
/// state a tick needs.
///
/// The simulation is the single writer of its [`ParticleSet`]; the
/// frame driver calls [`Simulation::tick`] once per displayed frame and
/// hands the returned [`RenderBuffers`] to the renderer. Pausing is the
/// driver's concern: a paused visualization simply stops calling
/// `tick`, and no teardown handshake is needed since the core holds no
/// external resources.
#[derive(Debug)]
pub struct Simulation {
    cfg: SimConfig,
    set: ParticleSet,
    edges: EdgeList,
    buffers: RenderBuffers,
    tick_count: u64,
}

impl Simulation {
    /// Creates a simulation with an unseeded thread-local RNG.
    ///
    /// ### Errors
    /// [`SimError::InvalidConfig`] if `cfg` fails validation.
    pub fn new(cfg: SimConfig) -> Result<Self, SimError> {
        Self::from_rng(cfg, &mut rand::rng())
    }

    /// Creates a simulation from an injected random source.
    ///
    /// Passing a seeded `StdRng` makes the initial population, and with
    /// it the whole run, reproducible.
    ///
    /// ### Errors
    /// [`SimError::InvalidConfig`] if `cfg` fails validation.
    pub fn from_rng(cfg: SimConfig, rng: &mut impl Rng) -> Result<Self, SimError> {
        let set = ParticleSet::spawn(&cfg, rng)?;
        Ok(Self::assemble(cfg, set))
    }

    /// Creates a simulation from an explicit initial population.
    ///
    /// The partition is derived from the given particles, which take
    /// precedence over `cfg.particle_count`. This is the entry point
    /// for fixed scenarios (tests, replays).
    ///
    /// ### Errors
    /// [`SimError::InvalidConfig`] if `cfg` fails validation, or
    /// [`SimError::InvalidState`] if `particles` is empty.
    pub fn from_particles(cfg: SimConfig, particles: Vec<Particle>) -> Result<Self, SimError> {
        cfg.validate()?;
        let set = ParticleSet::from_particles(particles);
        set.check_consistent()?;
        Ok(Self::assemble(cfg, set))
    }

    fn assemble(cfg: SimConfig, set: ParticleSet) -> Self {
        tracing::debug!(
            particles = set.len(),
            primary = set.primary.len(),
            secondary = set.secondary.len(),
            threshold = cfg.proximity_threshold,
            "simulation ready"
        );
        Self {
            cfg,
            set,
            edges: EdgeList::new(),
            buffers: RenderBuffers::new(),
            tick_count: 0,
        }
    }

    /// Runs one full tick and returns the freshly written buffers.
    ///
    /// The tick is the steady-state cycle
    /// {[`phases::integrate_phase`] -> [`phases::proximity_phase`] ->
    /// [`phases::synthesize_phase`]}, run to completion synchronously.
    ///
    /// ### Errors
    /// [`SimError::InvalidState`] if the particle set fails its
    /// consistency check. In that case nothing is advanced and the
    /// buffers keep their previous content; the caller must skip
    /// drawing this frame instead of rendering a partial graph.
    pub fn tick(&mut self) -> Result<&RenderBuffers, SimError> {
        self.set.check_consistent()?;

        phases::integrate_phase(&mut self.set, self.cfg.bounds);
        phases::proximity_phase(&self.set, self.cfg.proximity_threshold, &mut self.edges);
        phases::synthesize_phase(&self.set, &self.edges, &mut self.buffers);

        self.tick_count += 1;
        tracing::trace!(
            tick = self.tick_count,
            edges = self.edges.len(),
            "tick complete"
        );
        Ok(&self.buffers)
    }

    pub fn config(&self) -> &SimConfig {
        &self.cfg
    }

    pub fn particles(&self) -> &ParticleSet {
        &self.set
    }

    /// Mutable access to the population, for drivers that edit state
    /// between ticks. The next tick re-checks consistency.
    pub fn particles_mut(&mut self) -> &mut ParticleSet {
        &mut self.set
    }

    /// Edges of the most recent completed tick.
    pub fn edges(&self) -> &EdgeList {
        &self.edges
    }

    /// Buffers of the most recent completed tick.
    pub fn buffers(&self) -> &RenderBuffers {
        &self.buffers
    }

    pub fn ticks(&self) -> u64 {
        self.tick_count
    }
}
