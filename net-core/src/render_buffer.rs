/// Flat, renderer-ready coordinate buffers for one tick.
///
/// For each class this holds:
///
/// - A point buffer with 3 floats (`x y z`) per particle of that class,
///   in the stable partition order fixed at spawn time. Its length is
///   constant across ticks: 3 x the class population.
/// - A line buffer with 6 floats (`ax ay az bx by bz`) per proximity
///   edge of that class. Its length follows the tick's edge count and
///   may grow or shrink between ticks.
///
/// All four buffers are fully rewritten by every synthesis pass; no
/// float from an earlier tick ever survives into the next one. The
/// renderer consumes them as-is (e.g. uploads them as vertex data) and
/// must not hold on to them across ticks.
#[derive(Debug, Default)]
pub struct RenderBuffers {
    /// `x y z` per primary particle, partition order.
    pub primary_points: Vec<f32>,
    /// `x y z` per secondary particle, partition order.
    pub secondary_points: Vec<f32>,
    /// `ax ay az bx by bz` per primary edge of the current tick.
    pub primary_lines: Vec<f32>,
    /// `ax ay az bx by bz` per secondary edge of the current tick.
    pub secondary_lines: Vec<f32>,
}

impl RenderBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of particle slots across both point buffers.
    ///
    /// Equals the population size once a synthesis pass has run.
    pub fn point_count(&self) -> usize {
        (self.primary_points.len() + self.secondary_points.len()) / 3
    }

    /// Total number of line segments across both line buffers.
    ///
    /// Equals the tick's edge count once a synthesis pass has run.
    pub fn line_count(&self) -> usize {
        (self.primary_lines.len() + self.secondary_lines.len()) / 6
    }
}
