//! Core particle-network simulation library.
//!
//! A fixed population of points drifts inside a bounding box; every
//! tick the pairwise proximity graph is rebuilt and flattened into
//! renderer-ready coordinate buffers, split by a two-way particle
//! classification.
//!
//! Main components:
//! - [`config`] — construction-time simulation parameters.
//! - [`particle`] — the particle population and its class partition.
//! - [`graph`] — proximity edges and the per-tick edge list.
//! - [`render_buffer`] — flat output buffers for the renderer.
//! - [`phases`] — the per-tick pipeline stages.
//! - [`sim`] — an owned simulation instance driving the pipeline.
//! - [`error`] — error types.
//! - [`types`] — shared type aliases and the classification enum.

pub mod config;
pub mod error;
pub mod graph;
pub mod particle;
pub mod phases;
pub mod render_buffer;
pub mod sim;
pub mod types;
