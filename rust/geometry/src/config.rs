// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Classifier configuration

use crate::adjacency::AdjacencyStrategy;
use crate::error::{Error, Result};
use std::f64::consts::{FRAC_PI_4, PI};

/// Default threshold angle between face normals (45°)
pub const DEFAULT_THRESHOLD_ANGLE: f64 = FRAC_PI_4;

/// Which side of the threshold counts as sharp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AngleComparison {
    /// `angle < threshold`: nearly coplanar faces are reported.
    /// This is the historical rule and stays the default.
    #[default]
    LessThan,
    /// `angle > threshold`: folded faces are reported (conventional creases)
    GreaterThan,
}

impl AngleComparison {
    #[inline]
    pub fn passes(self, angle: f64, threshold: f64) -> bool {
        match self {
            AngleComparison::LessThan => angle < threshold,
            AngleComparison::GreaterThan => angle > threshold,
        }
    }
}

/// Treatment of edges that belong to a single triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BoundaryPolicy {
    /// Boundary edges have no defined angle and are never sharp
    #[default]
    Skip,
    /// Every boundary edge is reported as sharp
    Emit,
}

/// Edge classifier settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClassifierConfig {
    /// Angle between face normals in radians, within (0, π)
    pub threshold_angle: f64,
    /// Distance under which two corners are the same vertex (0 = exact)
    pub vertex_tolerance: f64,
    pub strategy: AdjacencyStrategy,
    pub comparison: AngleComparison,
    pub boundary: BoundaryPolicy,
    /// Emit each undirected edge once instead of once per owning triangle
    pub deduplicate: bool,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            threshold_angle: DEFAULT_THRESHOLD_ANGLE,
            vertex_tolerance: 0.0,
            strategy: AdjacencyStrategy::Indexed,
            comparison: AngleComparison::LessThan,
            boundary: BoundaryPolicy::Skip,
            deduplicate: false,
        }
    }
}

impl ClassifierConfig {
    /// Default settings with the given threshold
    pub fn with_threshold(threshold_angle: f64) -> Self {
        Self {
            threshold_angle,
            ..Self::default()
        }
    }

    pub fn with_vertex_tolerance(mut self, tolerance: f64) -> Self {
        self.vertex_tolerance = tolerance;
        self
    }

    pub fn with_strategy(mut self, strategy: AdjacencyStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_comparison(mut self, comparison: AngleComparison) -> Self {
        self.comparison = comparison;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_deduplicate(mut self, deduplicate: bool) -> Self {
        self.deduplicate = deduplicate;
        self
    }

    /// Check numeric parameters; NaN fails both checks.
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold_angle > 0.0 && self.threshold_angle < PI) {
            return Err(Error::InvalidThreshold(self.threshold_angle));
        }
        if !(self.vertex_tolerance.is_finite() && self.vertex_tolerance >= 0.0) {
            return Err(Error::InvalidTolerance(self.vertex_tolerance));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference() {
        let config = ClassifierConfig::default();
        assert_eq!(config.threshold_angle, FRAC_PI_4);
        assert_eq!(config.vertex_tolerance, 0.0);
        assert_eq!(config.strategy, AdjacencyStrategy::Indexed);
        assert_eq!(config.comparison, AngleComparison::LessThan);
        assert_eq!(config.boundary, BoundaryPolicy::Skip);
        assert!(!config.deduplicate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_threshold_must_be_open_interval() {
        for bad in [0.0, -0.1, PI, 4.0, f64::NAN, f64::INFINITY] {
            let err = ClassifierConfig::with_threshold(bad).validate().unwrap_err();
            assert!(matches!(err, Error::InvalidThreshold(_)), "{}", bad);
        }
        assert!(ClassifierConfig::with_threshold(1e-9).validate().is_ok());
        assert!(ClassifierConfig::with_threshold(PI - 1e-9).validate().is_ok());
    }

    #[test]
    fn test_tolerance_must_be_finite_non_negative() {
        for bad in [-1e-6, f64::NAN, f64::INFINITY] {
            let err = ClassifierConfig::default()
                .with_vertex_tolerance(bad)
                .validate()
                .unwrap_err();
            assert!(matches!(err, Error::InvalidTolerance(_)));
        }
    }

    #[test]
    fn test_comparison_direction() {
        assert!(AngleComparison::LessThan.passes(0.1, 0.5));
        assert!(!AngleComparison::LessThan.passes(0.5, 0.5));
        assert!(AngleComparison::GreaterThan.passes(0.6, 0.5));
        assert!(!AngleComparison::GreaterThan.passes(0.5, 0.5));
    }
}
