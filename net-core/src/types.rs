/// Identifier for a particle in a [`crate::particle::ParticleSet`].
///
/// This is an index into `ParticleSet::particles`, and is only meaningful
/// within the lifetime of a given `ParticleSet` instance.
pub type ParticleId = usize;

/// Two-way classification assigned to every particle at spawn time.
///
/// The class never changes after creation. Edges between particles
/// inherit [`Class::Secondary`] if either endpoint is secondary, so the
/// renderer can color the sparse secondary sub-network distinctly.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Class {
    Primary,
    Secondary,
}
