// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Edge-to-face adjacency over welded vertex ids.
//!
//! Two lookups answer the same question ("which other triangle shares this
//! edge?"): [`EdgeIndex`] builds a hash map once and answers in O(1), and
//! [`brute_force_neighbour`] scans every triangle. Both return the first
//! match in input order, so non-manifold edges resolve identically.

use crate::weld::{VertexId, WeldedSoup};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// How neighbouring triangles are located
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AdjacencyStrategy {
    /// Hash map from edge key to triangles, built once per call
    #[default]
    Indexed,
    /// Quadratic scan of all triangles per edge
    BruteForce,
}

/// Order-independent edge identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(pub VertexId, pub VertexId);

impl EdgeKey {
    /// Canonical key with the smaller id first
    #[inline]
    pub fn new(a: VertexId, b: VertexId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    /// Both endpoints are the same vertex
    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.0 == self.1
    }
}

/// Triangles touching each edge, in input order
#[derive(Debug, Clone, Default)]
pub struct EdgeIndex {
    edge_faces: FxHashMap<EdgeKey, SmallVec<[u32; 2]>>,
}

impl EdgeIndex {
    /// Single pass over all triangle edges
    pub fn build(welded: &WeldedSoup) -> Self {
        let mut edge_faces: FxHashMap<EdgeKey, SmallVec<[u32; 2]>> = FxHashMap::default();
        edge_faces.reserve(welded.triangle_count() * 3 / 2);

        // Triangle counts are bounded by `MAX_TRIANGLES`, so indices fit in u32
        for t in 0..welded.triangle_count() {
            for slot in 0..3 {
                let (a, b) = welded.edge_ids(t, slot);
                let key = EdgeKey::new(a, b);
                if key.is_collapsed() {
                    continue;
                }
                let faces = edge_faces.entry(key).or_default();
                // (a, b, a) style triangles touch the same key twice
                if faces.last() != Some(&(t as u32)) {
                    faces.push(t as u32);
                }
            }
        }

        Self { edge_faces }
    }

    /// Triangles touching `key`, in input order
    pub fn faces(&self, key: EdgeKey) -> &[u32] {
        self.edge_faces.get(&key).map(|f| f.as_slice()).unwrap_or(&[])
    }

    /// First triangle other than `triangle` sharing edge `slot`
    pub fn neighbour(&self, welded: &WeldedSoup, triangle: usize, slot: usize) -> Option<u32> {
        let (a, b) = welded.edge_ids(triangle, slot);
        let key = EdgeKey::new(a, b);
        if key.is_collapsed() {
            return None;
        }
        self.faces(key)
            .iter()
            .copied()
            .find(|&f| f as usize != triangle)
    }

    /// Number of distinct non-collapsed edges
    pub fn edge_count(&self) -> usize {
        self.edge_faces.len()
    }

    /// Edges touched by exactly one triangle
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_faces.values().filter(|f| f.len() == 1).count()
    }

    /// Edges touched by more than two triangles
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edge_faces.values().filter(|f| f.len() > 2).count()
    }
}

/// Reference lookup: scan every triangle for one containing both endpoints.
///
/// O(T) per query, O(T²) for a whole mesh. Kept as the oracle the indexed
/// lookup is tested against.
pub fn brute_force_neighbour(welded: &WeldedSoup, triangle: usize, slot: usize) -> Option<u32> {
    let (a, b) = welded.edge_ids(triangle, slot);
    if a == b {
        return None;
    }
    welded
        .corners
        .iter()
        .enumerate()
        .find(|(k, ids)| *k != triangle && ids.contains(&a) && ids.contains(&b))
        .map(|(k, _)| k as u32)
}
