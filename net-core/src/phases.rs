//! Per-tick pipeline phases for the particle-network simulation.
//!
//! One tick runs the phases in a fixed order over explicitly-passed
//! state:
//! 1. [`integrate_phase`] — advance every particle by its velocity and
//!    reflect velocity components at the bounding box.
//! 2. [`proximity_phase`] — rebuild the proximity graph from scratch
//!    into a reusable [`EdgeList`].
//! 3. [`synthesize_phase`] — rewrite the flat [`RenderBuffers`] from
//!    the updated positions and edges.
//!
//! The phases never run concurrently and the integrator is the only
//! writer of particle state, so the later phases always observe the
//! positions produced by this tick's integration.

use glam::Vec3;

use crate::graph::EdgeList;
use crate::particle::{Particle, ParticleSet};
use crate::render_buffer::RenderBuffers;
use crate::types::{Class, ParticleId};

/// Advances every particle by one step and reflects at the bounds.
///
/// For each particle, `pos += vel` componentwise, then for each axis
/// independently: if the resulting coordinate's magnitude exceeds the
/// half-extent for that axis, the velocity component on that axis is
/// negated. The position is *not* clamped back inside the box; a
/// particle may sit slightly outside the bound for one tick before the
/// reversed velocity carries it back in. One call is one simulation
/// step, so perceived speed follows the caller's tick rate.
///
/// ### Parameters
/// - `set` - Population to advance; mutated in place.
/// - `bounds` - Bounding-box half-extents per axis.
pub fn integrate_phase(set: &mut ParticleSet, bounds: Vec3) {
    for p in set.particles.iter_mut() {
        p.pos += p.vel;

        if p.pos.x.abs() > bounds.x {
            p.vel.x = -p.vel.x;
        }
        if p.pos.y.abs() > bounds.y {
            p.vel.y = -p.vel.y;
        }
        if p.pos.z.abs() > bounds.z {
            p.vel.z = -p.vel.z;
        }
    }
}

/// Rebuilds the proximity graph for the current positions.
///
/// Examines all unordered pairs `(i, j)` with `i < j` and records an
/// edge iff the Euclidean distance is strictly below `threshold`
/// (compared in squared form to skip the square root). An edge is
/// [`Class::Secondary`] if either endpoint is secondary, otherwise
/// [`Class::Primary`].
///
/// `edges` is cleared first, so the list always describes exactly this
/// tick. O(N²) pair tests; the dominant cost of a tick, acceptable for
/// populations in the low hundreds.
///
/// ### Parameters
/// - `set` - Population to scan; read-only.
/// - `threshold` - Strict upper distance bound for connectivity.
/// - `edges` - Scratch list receiving this tick's edges.
pub fn proximity_phase(set: &ParticleSet, threshold: f32, edges: &mut EdgeList) {
    edges.clear();
    let threshold_sq = threshold * threshold;
    let particles = &set.particles;

    for i in 0..particles.len() {
        for j in (i + 1)..particles.len() {
            let dist_sq = particles[i].pos.distance_squared(particles[j].pos);
            if dist_sq < threshold_sq {
                let class = if particles[i].class == Class::Secondary
                    || particles[j].class == Class::Secondary
                {
                    Class::Secondary
                } else {
                    Class::Primary
                };
                edges.push(i, j, class);
            }
        }
    }
}

/// Rewrites the four flat output buffers from the current tick's state.
///
/// Point buffers are written in partition order (fixed slot per
/// particle), line buffers in edge-list order. Every buffer is fully
/// rewritten; lengths of the line buffers track the tick's per-class
/// edge counts.
///
/// ### Parameters
/// - `set` - Population providing positions and the partition.
/// - `edges` - This tick's proximity edges.
/// - `out` - Buffers to rewrite.
pub fn synthesize_phase(set: &ParticleSet, edges: &EdgeList, out: &mut RenderBuffers) {
    write_class_points(&set.particles, &set.primary, &mut out.primary_points);
    write_class_points(&set.particles, &set.secondary, &mut out.secondary_points);

    out.primary_lines.clear();
    out.secondary_lines.clear();
    for e in edges.iter() {
        let a = set.particles[e.a].pos;
        let b = set.particles[e.b].pos;
        let dst = match e.class {
            Class::Primary => &mut out.primary_lines,
            Class::Secondary => &mut out.secondary_lines,
        };
        dst.extend_from_slice(&[a.x, a.y, a.z, b.x, b.y, b.z]);
    }
}

fn write_class_points(particles: &[Particle], order: &[ParticleId], out: &mut Vec<f32>) {
    out.clear();
    out.reserve(order.len() * 3);
    for &id in order {
        let p = particles[id].pos;
        out.extend_from_slice(&[p.x, p.y, p.z]);
    }
}
