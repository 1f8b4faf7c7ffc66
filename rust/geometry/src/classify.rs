// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sharp edge classification
//!
//! For every triangle, in input order, each of its three edges is paired with
//! the first other triangle sharing both endpoints. The edge is sharp when the
//! angle between the two face normals passes the configured comparison
//! against the threshold. With the default [`AngleComparison::LessThan`] that
//! means nearly coplanar neighbours are reported; use
//! [`AngleComparison::GreaterThan`] for folded creases.
//!
//! Edges whose angle is undefined (no neighbour, or a degenerate face on
//! either side) are never sharp unless [`BoundaryPolicy::Emit`] is set, in
//! which case true boundary edges of non-degenerate faces are reported. An
//! edge whose endpoints weld to one vertex is never reported.
//!
//! Shared edges are evaluated from both sides and may be emitted twice; set
//! `deduplicate` to keep only the first discovery.

use crate::adjacency::{brute_force_neighbour, AdjacencyStrategy, EdgeIndex, EdgeKey};
use crate::config::{BoundaryPolicy, ClassifierConfig};
use crate::error::Result;
use crate::mesh::{Edge, Triangle, TriangleSoup};
use crate::weld::WeldedSoup;
use nalgebra::Vector3;
use rustc_hash::FxHashSet;

/// Outcome for one triangle edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeClassification {
    /// Owning triangle index
    pub triangle: usize,
    /// Edge slot within the triangle (0..3)
    pub slot: usize,
    /// Directed edge in the owner's winding order
    pub edge: Edge,
    /// Canonical welded vertex ids of the endpoints
    pub key: EdgeKey,
    /// First other triangle sharing the edge
    pub neighbour: Option<usize>,
    /// Angle between face normals, if both are defined
    pub angle: Option<f64>,
    pub is_sharp: bool,
}

/// Angle in radians between two normals.
///
/// Returns `None` if either vector has zero length (degenerate face or no
/// neighbour).
pub fn dihedral_angle(n1: &Vector3<f64>, n2: &Vector3<f64>) -> Option<f64> {
    let denominator = n1.norm() * n2.norm();
    if denominator == 0.0 {
        return None;
    }
    Some((n1.dot(n2) / denominator).clamp(-1.0, 1.0).acos())
}

/// Stateless edge classifier; safe to share across threads
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeClassifier {
    config: ClassifierConfig,
}

impl EdgeClassifier {
    /// Create a classifier, validating the configuration
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Sharp edges in discovery order (triangle order, then slot order)
    pub fn classify(&self, soup: &TriangleSoup) -> Vec<Edge> {
        let mut seen: FxHashSet<EdgeKey> = FxHashSet::default();
        let dedup = self.config.deduplicate;

        self.classify_detailed(soup)
            .into_iter()
            .filter(|c| c.is_sharp)
            .filter(|c| !dedup || seen.insert(c.key))
            .map(|c| c.edge)
            .collect()
    }

    /// One entry per triangle edge (3 per triangle), sharp or not
    pub fn classify_detailed(&self, soup: &TriangleSoup) -> Vec<EdgeClassification> {
        let span = tracing::debug_span!("classify_sharp_edges", triangles = soup.len());
        let _guard = span.enter();

        let welded = WeldedSoup::build(soup, self.config.vertex_tolerance);
        let normals: Vec<Vector3<f64>> = soup.iter().map(Triangle::face_normal).collect();
        let zero = Vector3::zeros();

        tracing::debug!(
            vertices = welded.vertex_count,
            degenerate = normals.iter().filter(|n| **n == zero).count(),
            tolerance = self.config.vertex_tolerance,
            "Welded triangle corners"
        );

        // Build completes before the first query
        let index = match self.config.strategy {
            AdjacencyStrategy::Indexed => {
                let index = EdgeIndex::build(&welded);
                tracing::debug!(
                    edges = index.edge_count(),
                    boundary = index.boundary_edge_count(),
                    non_manifold = index.non_manifold_edge_count(),
                    "Built edge index"
                );
                Some(index)
            }
            AdjacencyStrategy::BruteForce => None,
        };

        let mut results = Vec::with_capacity(soup.len() * 3);
        for (t, triangle) in soup.iter().enumerate() {
            for slot in 0..3 {
                let (a, b) = welded.edge_ids(t, slot);
                let key = EdgeKey::new(a, b);

                let neighbour = match &index {
                    Some(index) => index.neighbour(&welded, t, slot),
                    None => brute_force_neighbour(&welded, t, slot),
                }
                .map(|n| n as usize);

                let angle = neighbour.and_then(|n| dihedral_angle(&normals[t], &normals[n]));

                let is_sharp = match (neighbour, angle) {
                    (_, Some(angle)) => self
                        .config
                        .comparison
                        .passes(angle, self.config.threshold_angle),
                    // Welding can collapse an edge of a non-degenerate face
                    (None, None) => {
                        self.config.boundary == BoundaryPolicy::Emit
                            && normals[t] != zero
                            && !key.is_collapsed()
                    }
                    (Some(_), None) => false,
                };

                results.push(EdgeClassification {
                    triangle: t,
                    slot,
                    edge: triangle.edge(slot),
                    key,
                    neighbour,
                    angle,
                    is_sharp,
                });
            }
        }

        tracing::debug!(
            sharp = results.iter().filter(|c| c.is_sharp).count(),
            evaluated = results.len(),
            "Classified edges"
        );

        results
    }
}

/// Sharp edges of `triangles` with default settings and the given threshold
pub fn classify_sharp_edges(triangles: &[Triangle], threshold_angle: f64) -> Result<Vec<Edge>> {
    let classifier = EdgeClassifier::new(ClassifierConfig::with_threshold(threshold_angle))?;
    let soup = TriangleSoup::from_triangles(triangles.to_vec())?;
    Ok(classifier.classify(&soup))
}

/// Sharp edges of a flat position buffer (nine scalars per triangle)
pub fn classify_sharp_edges_flat(positions: &[f64], threshold_angle: f64) -> Result<Vec<Edge>> {
    let classifier = EdgeClassifier::new(ClassifierConfig::with_threshold(threshold_angle))?;
    let soup = TriangleSoup::from_positions(positions)?;
    Ok(classifier.classify(&soup))
}
