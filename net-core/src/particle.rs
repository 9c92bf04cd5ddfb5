use glam::Vec3;
use rand::Rng;

use crate::config::SimConfig;
use crate::error::SimError;
use crate::types::{Class, ParticleId};

#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec3,
    pub vel: Vec3,
    pub class: Class,
}

/// The full particle population plus its per-class partition.
///
/// `primary` and `secondary` hold the original indices of each class in
/// ascending order. They are computed once at creation and never again:
/// downstream point buffers give every particle a fixed slot, so the
/// partition must stay stable for the instance lifetime.
#[derive(Debug)]
pub struct ParticleSet {
    pub particles: Vec<Particle>,
    pub primary: Vec<ParticleId>,
    pub secondary: Vec<ParticleId>,
}

impl ParticleSet {
    /// Builds a set from explicit particles, deriving the partition.
    ///
    /// Mainly useful for fixed scenarios in tests and replays; random
    /// populations come from [`ParticleSet::spawn`].
    pub fn from_particles(particles: Vec<Particle>) -> Self {
        let mut primary = Vec::new();
        let mut secondary = Vec::new();
        for (id, p) in particles.iter().enumerate() {
            match p.class {
                Class::Primary => primary.push(id),
                Class::Secondary => secondary.push(id),
            }
        }
        Self {
            particles,
            primary,
            secondary,
        }
    }

    /// Creates a randomized population from a validated config.
    ///
    /// Positions are uniform inside the bounding box, velocities uniform
    /// in the per-axis half-ranges (x and y share `velocity_range.x`,
    /// z uses `velocity_range.y`), and each particle is independently
    /// secondary with probability `secondary_probability`.
    ///
    /// The random source is injected so callers can pass a seeded
    /// `StdRng` for reproducible populations; production code passes
    /// `rand::rng()`.
    ///
    /// ### Errors
    /// [`SimError::InvalidConfig`] if `cfg` fails validation.
    pub fn spawn(cfg: &SimConfig, rng: &mut impl Rng) -> Result<Self, SimError> {
        cfg.validate()?;

        let particles = (0..cfg.particle_count)
            .map(|_| {
                let pos = Vec3::new(
                    rng.random_range(-cfg.bounds.x..=cfg.bounds.x),
                    rng.random_range(-cfg.bounds.y..=cfg.bounds.y),
                    rng.random_range(-cfg.bounds.z..=cfg.bounds.z),
                );
                let vel = Vec3::new(
                    rng.random_range(-cfg.velocity_range.x..=cfg.velocity_range.x),
                    rng.random_range(-cfg.velocity_range.x..=cfg.velocity_range.x),
                    rng.random_range(-cfg.velocity_range.y..=cfg.velocity_range.y),
                );
                let class = if rng.random_bool(cfg.secondary_probability) {
                    Class::Secondary
                } else {
                    Class::Primary
                };
                Particle { pos, vel, class }
            })
            .collect();

        let set = Self::from_particles(particles);
        tracing::debug!(
            particles = set.len(),
            primary = set.primary.len(),
            secondary = set.secondary.len(),
            "spawned particle population"
        );
        Ok(set)
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Verifies that the partition still describes the population.
    ///
    /// The fields are public, so a caller can corrupt the set between
    /// ticks; the pipeline runs this check before touching any buffer.
    /// Checks: non-empty population, partition lengths sum to the
    /// population size, indices strictly ascending and in range, and
    /// every index listed under its own class.
    pub fn check_consistent(&self) -> Result<(), SimError> {
        if self.particles.is_empty() {
            return Err(SimError::state("particle set is empty"));
        }
        if self.primary.len() + self.secondary.len() != self.particles.len() {
            return Err(SimError::state(format!(
                "partition covers {} particles, population is {}",
                self.primary.len() + self.secondary.len(),
                self.particles.len()
            )));
        }
        for (order, class) in [(&self.primary, Class::Primary), (&self.secondary, Class::Secondary)] {
            let mut prev: Option<ParticleId> = None;
            for &id in order.iter() {
                if id >= self.particles.len() {
                    return Err(SimError::state(format!("partition index {id} out of range")));
                }
                if self.particles[id].class != class {
                    return Err(SimError::state(format!(
                        "particle {id} listed under the wrong class"
                    )));
                }
                if prev.is_some_and(|p| p >= id) {
                    return Err(SimError::state("partition indices are not ascending"));
                }
                prev = Some(id);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn spawn_default(seed: u64) -> ParticleSet {
        let cfg = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);
        ParticleSet::spawn(&cfg, &mut rng).unwrap()
    }

    #[test]
    fn spawn_produces_exact_population() {
        let set = spawn_default(1);
        assert_eq!(set.len(), 105);
        assert_eq!(set.primary.len() + set.secondary.len(), 105);
        assert!(set.check_consistent().is_ok());
    }

    #[test]
    fn spawn_rejects_invalid_config() {
        let mut cfg = SimConfig::default();
        cfg.particle_count = 0;
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            ParticleSet::spawn(&cfg, &mut rng),
            Err(SimError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn spawned_state_is_within_configured_ranges() {
        let cfg = SimConfig::default();
        let set = spawn_default(2);

        for p in &set.particles {
            assert!(p.pos.x.abs() <= cfg.bounds.x);
            assert!(p.pos.y.abs() <= cfg.bounds.y);
            assert!(p.pos.z.abs() <= cfg.bounds.z);

            assert!(p.vel.x.abs() <= cfg.velocity_range.x);
            assert!(p.vel.y.abs() <= cfg.velocity_range.x);
            assert!(p.vel.z.abs() <= cfg.velocity_range.y);
        }
    }

    #[test]
    fn partition_lists_each_particle_under_its_class() {
        let set = spawn_default(3);

        for &id in &set.primary {
            assert_eq!(set.particles[id].class, Class::Primary);
        }
        for &id in &set.secondary {
            assert_eq!(set.particles[id].class, Class::Secondary);
        }

        // Ascending original-index order within each class.
        assert!(set.primary.windows(2).all(|w| w[0] < w[1]));
        assert!(set.secondary.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn same_seed_spawns_identical_populations() {
        let cfg = SimConfig::default();
        let a = ParticleSet::spawn(&cfg, &mut StdRng::seed_from_u64(7)).unwrap();
        let b = ParticleSet::spawn(&cfg, &mut StdRng::seed_from_u64(7)).unwrap();

        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.particles.iter().zip(b.particles.iter()) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.vel, pb.vel);
            assert_eq!(pa.class, pb.class);
        }
    }

    #[test]
    fn probability_extremes_yield_single_class_populations() {
        let mut cfg = SimConfig::default();
        let mut rng = StdRng::seed_from_u64(4);

        cfg.secondary_probability = 0.0;
        let all_primary = ParticleSet::spawn(&cfg, &mut rng).unwrap();
        assert_eq!(all_primary.primary.len(), cfg.particle_count);
        assert!(all_primary.secondary.is_empty());

        cfg.secondary_probability = 1.0;
        let all_secondary = ParticleSet::spawn(&cfg, &mut rng).unwrap();
        assert_eq!(all_secondary.secondary.len(), cfg.particle_count);
        assert!(all_secondary.primary.is_empty());
    }

    #[test]
    fn check_consistent_detects_corruption() {
        let mut set = spawn_default(5);
        assert!(set.check_consistent().is_ok());

        // Swap one particle's class without touching the partition.
        let victim = set.primary[0];
        set.particles[victim].class = Class::Secondary;
        assert!(matches!(
            set.check_consistent(),
            Err(SimError::InvalidState { .. })
        ));
    }

    #[test]
    fn check_consistent_rejects_empty_population() {
        let set = ParticleSet::from_particles(Vec::new());
        assert!(set.check_consistent().is_err());
    }
}
