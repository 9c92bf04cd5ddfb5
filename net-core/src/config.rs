use glam::{Vec2, Vec3};

use crate::error::SimError;

/// Construction-time parameters for one simulation instance.
///
/// All values are fixed for the lifetime of the instance; changing a
/// parameter means building a new simulation. The defaults reproduce the
/// stock background: 105 particles drifting inside a flat 15 x 10 x 5
/// slab, with 8% of them classified secondary.
#[derive(Clone, Copy, Debug)]
pub struct SimConfig {
    /// Number of particles, fixed for the instance lifetime.
    pub particle_count: usize,
    /// Per-particle probability of being classified [`Class::Secondary`].
    ///
    /// [`Class::Secondary`]: crate::types::Class::Secondary
    pub secondary_probability: f64,
    /// Half-extents of the bounding box on x/y/z.
    pub bounds: Vec3,
    /// Velocity half-ranges: `x` is shared by the x and y axes, `y`
    /// applies to the z axis (motion through the slab is slower).
    pub velocity_range: Vec2,
    /// Strict upper distance bound for two particles to be connected.
    pub proximity_threshold: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            particle_count: 105,
            secondary_probability: 0.08,
            bounds: Vec3::new(7.5, 5.0, 2.5),
            velocity_range: Vec2::new(0.02, 0.01),
            proximity_threshold: 2.1,
        }
    }
}

impl SimConfig {
    /// Checks every field, returning [`SimError::InvalidConfig`] naming
    /// the first offending one. A config that passes here cannot make
    /// [`ParticleSet::spawn`] fail.
    ///
    /// [`ParticleSet::spawn`]: crate::particle::ParticleSet::spawn
    pub fn validate(&self) -> Result<(), SimError> {
        if self.particle_count == 0 {
            return Err(SimError::config("particle_count must be positive"));
        }
        if !(0.0..=1.0).contains(&self.secondary_probability) {
            return Err(SimError::config(format!(
                "secondary_probability must be in [0, 1], got {}",
                self.secondary_probability
            )));
        }
        for (axis, extent) in [("x", self.bounds.x), ("y", self.bounds.y), ("z", self.bounds.z)] {
            if !(extent > 0.0) || !extent.is_finite() {
                return Err(SimError::config(format!(
                    "bounds.{axis} must be positive and finite, got {extent}"
                )));
            }
        }
        for (name, range) in [("xy", self.velocity_range.x), ("z", self.velocity_range.y)] {
            if !(range > 0.0) || !range.is_finite() {
                return Err(SimError::config(format!(
                    "velocity_range.{name} must be positive and finite, got {range}"
                )));
            }
        }
        if !(self.proximity_threshold > 0.0) || !self.proximity_threshold.is_finite() {
            return Err(SimError::config(format!(
                "proximity_threshold must be positive and finite, got {}",
                self.proximity_threshold
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = SimConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.particle_count, 105);
        assert_eq!(cfg.bounds, Vec3::new(7.5, 5.0, 2.5));
        assert_eq!(cfg.proximity_threshold, 2.1);
    }

    #[test]
    fn zero_particle_count_is_rejected() {
        let mut cfg = SimConfig::default();
        cfg.particle_count = 0;
        assert!(matches!(
            cfg.validate(),
            Err(SimError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn probability_outside_unit_interval_is_rejected() {
        let mut cfg = SimConfig::default();
        cfg.secondary_probability = 1.5;
        assert!(cfg.validate().is_err());

        cfg.secondary_probability = -0.1;
        assert!(cfg.validate().is_err());

        // Boundary values are fine.
        cfg.secondary_probability = 0.0;
        assert!(cfg.validate().is_ok());
        cfg.secondary_probability = 1.0;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn non_positive_bounds_are_rejected() {
        let mut cfg = SimConfig::default();
        cfg.bounds.y = 0.0;
        assert!(cfg.validate().is_err());

        cfg.bounds = Vec3::new(7.5, 5.0, -2.5);
        assert!(cfg.validate().is_err());

        cfg.bounds = Vec3::new(f32::NAN, 5.0, 2.5);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn non_positive_velocity_range_is_rejected() {
        let mut cfg = SimConfig::default();
        cfg.velocity_range.x = 0.0;
        assert!(cfg.validate().is_err());

        cfg.velocity_range = Vec2::new(0.02, -0.01);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn non_positive_threshold_is_rejected() {
        let mut cfg = SimConfig::default();
        cfg.proximity_threshold = 0.0;
        assert!(cfg.validate().is_err());

        cfg.proximity_threshold = f32::INFINITY;
        assert!(cfg.validate().is_err());
    }
}
