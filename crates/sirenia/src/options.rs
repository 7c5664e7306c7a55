//! Tunables for the move operation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MoveOptions {
    /// Degrees around 180° within which a placeholder vertex counts as "straight" and is skipped.
    pub straight_angle_tolerance: f64,
    /// Convergence threshold of the untangle refinement, in projected units.
    pub untangle_epsilon: f64,
    pub untangle_max_iterations: usize,
    /// Projected distance under which a path hit counts as the moved endpoint itself.
    pub hit_epsilon: f64,
    /// Per-axis geographic distance under which consecutive vertices count as duplicates.
    pub duplicate_epsilon: f64,
    pub remove_duplicate_vertices: bool,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            straight_angle_tolerance: 5.0,
            untangle_epsilon: 1e-6,
            untangle_max_iterations: 10,
            hit_epsilon: 1e-9,
            duplicate_epsilon: 1e-6,
            remove_duplicate_vertices: true,
        }
    }
}

impl MoveOptions {
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let opts: Self = Self::deserialize(value).map_err(|e| Error::InvalidOptions {
            message: e.to_string(),
        })?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let opts: Self = serde_json::from_str(text).map_err(|e| Error::InvalidOptions {
            message: e.to_string(),
        })?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("straightAngleTolerance", self.straight_angle_tolerance),
            ("untangleEpsilon", self.untangle_epsilon),
            ("hitEpsilon", self.hit_epsilon),
            ("duplicateEpsilon", self.duplicate_epsilon),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidOptions {
                    message: format!("{name} must be a finite, non-negative number (got {value})"),
                });
            }
        }
        if self.straight_angle_tolerance > 180.0 {
            return Err(Error::InvalidOptions {
                message: "straightAngleTolerance must not exceed 180".to_string(),
            });
        }
        if self.untangle_max_iterations == 0 {
            return Err(Error::InvalidOptions {
                message: "untangleMaxIterations must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
