//! Parameters for attributed adjacency graph construction.

use crate::error::{GraphError, Result};
use crate::math::ANGLE_TOLERANCE;

/// Default cap on the shared edges collected per face pair.
///
/// More shared edges than this between two faces indicates degenerate or
/// non-manifold input.
pub const DEFAULT_MAX_SHARED_EDGES: usize = 10;

/// Parameters for [`BuildGraph`](super::BuildGraph).
///
/// # Example
///
/// ```
/// use brep_aag::graph::GraphParams;
///
/// let params = GraphParams::default().parallel(false).max_shared_edges(4);
/// assert_eq!(params.max_shared_edges, 4);
/// assert!(!params.parallel);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GraphParams {
    /// Tolerance in radians for the orientation predicates.
    pub angle_tolerance: f64,

    /// Maximum number of shared edges queried per adjacent face pair.
    pub max_shared_edges: usize,

    /// Whether node attributes and the pair scan run on the rayon pool.
    pub parallel: bool,

    /// Whether pairs with disjoint bounding boxes skip the adjacency query.
    pub bounds_prefilter: bool,

    /// Growth applied to each bounding box before the overlap test.
    pub prefilter_margin: f64,
}

impl Default for GraphParams {
    fn default() -> Self {
        Self {
            angle_tolerance: ANGLE_TOLERANCE,
            max_shared_edges: DEFAULT_MAX_SHARED_EDGES,
            parallel: true,
            bounds_prefilter: false,
            prefilter_margin: 1e-6,
        }
    }
}

impl GraphParams {
    /// Parameters for a single-threaded build.
    #[must_use]
    pub const fn sequential() -> Self {
        Self {
            angle_tolerance: ANGLE_TOLERANCE,
            max_shared_edges: DEFAULT_MAX_SHARED_EDGES,
            parallel: false,
            bounds_prefilter: false,
            prefilter_margin: 1e-6,
        }
    }

    /// Set the orientation tolerance in radians.
    #[must_use]
    pub const fn angle_tolerance(mut self, tolerance: f64) -> Self {
        self.angle_tolerance = tolerance;
        self
    }

    /// Set the shared edge cap.
    #[must_use]
    pub const fn max_shared_edges(mut self, count: usize) -> Self {
        self.max_shared_edges = count;
        self
    }

    /// Enable or disable the rayon pool.
    #[must_use]
    pub const fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Enable the bounding box pre-filter with the given margin.
    #[must_use]
    pub const fn bounds_prefilter(mut self, margin: f64) -> Self {
        self.bounds_prefilter = true;
        self.prefilter_margin = margin;
        self
    }

    /// Checks that the parameters describe a usable build.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::InvalidParams`] for a tolerance outside
    /// `(0, pi/4)`, a zero edge cap, or a negative pre-filter margin.
    pub fn validate(&self) -> Result<()> {
        if !(self.angle_tolerance > 0.0 && self.angle_tolerance < std::f64::consts::FRAC_PI_4) {
            return Err(GraphError::InvalidParams(format!(
                "angle tolerance {} must lie in (0, pi/4)",
                self.angle_tolerance
            ))
            .into());
        }
        if self.max_shared_edges == 0 {
            return Err(GraphError::InvalidParams("shared edge cap must be positive".into()).into());
        }
        if self.prefilter_margin.is_nan() || self.prefilter_margin < 0.0 {
            return Err(GraphError::InvalidParams(format!(
                "pre-filter margin {} must be non-negative",
                self.prefilter_margin
            ))
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params() {
        let params = GraphParams::default();
        assert!((params.angle_tolerance - 0.01).abs() < f64::EPSILON);
        assert_eq!(params.max_shared_edges, 10);
        assert!(params.parallel);
        assert!(!params.bounds_prefilter);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn builder_pattern() {
        let params = GraphParams::sequential()
            .angle_tolerance(0.02)
            .max_shared_edges(3)
            .bounds_prefilter(0.5);
        assert!(!params.parallel);
        assert!(params.bounds_prefilter);
        assert!((params.prefilter_margin - 0.5).abs() < f64::EPSILON);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_unusable_params() {
        assert!(GraphParams::default()
            .max_shared_edges(0)
            .validate()
            .is_err());
        assert!(GraphParams::default()
            .angle_tolerance(0.0)
            .validate()
            .is_err());
        assert!(GraphParams::default()
            .angle_tolerance(f64::NAN)
            .validate()
            .is_err());
        assert!(GraphParams::default()
            .bounds_prefilter(-1.0)
            .validate()
            .is_err());
    }
}
