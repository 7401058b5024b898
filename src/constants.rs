use serde::Deserialize;

use crate::error::{Result, TracerError};

/// Minimum valid hit distance and marching convergence tolerance.
pub const EPSILON: f32 = 1e-3;

/// Rays are clipped (and marches abandoned) past this distance.
pub const MAX_DIST: f32 = 100.0;

/// Hard iteration cap for sphere tracing.
pub const MAX_MARCH_STEPS: usize = 1024;

/// Numeric policy shared by every intersection query.
///
/// `Default` gives the fixed process-wide values above. Tests inject a
/// looser epsilon or a shorter cutoff through `ray_intersect_with`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    pub epsilon: f32,
    pub max_dist: f32,
    pub max_steps: usize,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            epsilon: EPSILON,
            max_dist: MAX_DIST,
            max_steps: MAX_MARCH_STEPS,
        }
    }
}

impl Tolerances {
    pub fn validate(&self) -> Result<()> {
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(TracerError::InvalidTolerances(format!(
                "epsilon must be positive, got {}",
                self.epsilon
            )));
        }
        if !(self.max_dist.is_finite() && self.max_dist > self.epsilon) {
            return Err(TracerError::InvalidTolerances(format!(
                "max_dist must exceed epsilon, got {}",
                self.max_dist
            )));
        }
        if self.max_steps == 0 {
            return Err(TracerError::InvalidTolerances(
                "max_steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
