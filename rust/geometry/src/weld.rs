// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vertex identity for triangle soups.
//!
//! Every triangle corner is mapped to a canonical vertex id so adjacency can
//! be decided on integers instead of repeated float comparisons. With zero
//! tolerance two corners share an id exactly when their coordinates compare
//! equal. With a positive tolerance a grid-based spatial hash merges corners
//! within Euclidean distance `tolerance`.

use crate::mesh::TriangleSoup;
use nalgebra::Point3;
use rustc_hash::FxHashMap;

/// Canonical vertex id shared by all corners at the same point
pub type VertexId = u32;

/// Corner-to-vertex mapping for a triangle soup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeldedSoup {
    /// Vertex ids per triangle, in winding order
    pub corners: Vec<[VertexId; 3]>,
    /// Number of distinct vertices
    pub vertex_count: usize,
}

impl WeldedSoup {
    /// Weld corners of `soup`; `tolerance` of zero means exact equality.
    pub fn build(soup: &TriangleSoup, tolerance: f64) -> Self {
        if tolerance > 0.0 {
            weld_with_tolerance(soup, tolerance)
        } else {
            weld_exact(soup)
        }
    }

    /// Number of triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.corners.len()
    }

    /// Endpoint ids of edge `slot` of triangle `triangle`
    #[inline]
    pub fn edge_ids(&self, triangle: usize, slot: usize) -> (VertexId, VertexId) {
        let c = &self.corners[triangle];
        (c[slot], c[(slot + 1) % 3])
    }
}

/// Bit pattern key; `-0.0` is folded onto `0.0` so keys agree with `==`.
#[inline]
fn exact_key(p: &Point3<f64>) -> [u64; 3] {
    let bits = |v: f64| if v == 0.0 { 0u64 } else { v.to_bits() };
    [bits(p.x), bits(p.y), bits(p.z)]
}

fn weld_exact(soup: &TriangleSoup) -> WeldedSoup {
    let mut ids: FxHashMap<[u64; 3], VertexId> = FxHashMap::default();
    let mut corners = Vec::with_capacity(soup.len());

    for triangle in soup {
        let mut tri_ids = [0; 3];
        for (slot, vertex) in triangle.vertices().iter().enumerate() {
            let next = ids.len() as VertexId;
            tri_ids[slot] = *ids.entry(exact_key(vertex)).or_insert(next);
        }
        corners.push(tri_ids);
    }

    WeldedSoup {
        corners,
        vertex_count: ids.len(),
    }
}

/// Grid of cubic cells for tolerance-based vertex lookup.
///
/// Cells have side `tolerance`, so any point within tolerance of a query lies
/// in the 3x3x3 neighbourhood of the query's cell.
struct WeldGrid {
    cell_size: f64,
    cells: FxHashMap<(i64, i64, i64), Vec<VertexId>>,
    positions: Vec<Point3<f64>>,
}

impl WeldGrid {
    fn new(cell_size: f64) -> Self {
        Self {
            cell_size,
            cells: FxHashMap::default(),
            positions: Vec::new(),
        }
    }

    /// Lowest existing id within `cell_size` of `p`, or a fresh id
    fn find_or_insert(&mut self, p: Point3<f64>) -> VertexId {
        let (cx, cy, cz) = self.cell_coords(&p);
        let tol_sq = self.cell_size * self.cell_size;
        let mut best: Option<VertexId> = None;

        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    // Saturated cells at the edge of the i64 range have no neighbour beyond
                    let cell = match (
                        cx.checked_add(dx),
                        cy.checked_add(dy),
                        cz.checked_add(dz),
                    ) {
                        (Some(x), Some(y), Some(z)) => (x, y, z),
                        _ => continue,
                    };
                    if let Some(ids) = self.cells.get(&cell) {
                        for &id in ids {
                            let dist_sq = (self.positions[id as usize] - p).norm_squared();
                            if dist_sq <= tol_sq && best.map_or(true, |b| id < b) {
                                best = Some(id);
                            }
                        }
                    }
                }
            }
        }

        if let Some(id) = best {
            return id;
        }

        let id = self.positions.len() as VertexId;
        self.positions.push(p);
        self.cells.entry((cx, cy, cz)).or_default().push(id);
        id
    }

    /// Cell of `p`; `as i64` saturates for coordinates far beyond the grid range.
    fn cell_coords(&self, p: &Point3<f64>) -> (i64, i64, i64) {
        (
            (p.x / self.cell_size).floor() as i64,
            (p.y / self.cell_size).floor() as i64,
            (p.z / self.cell_size).floor() as i64,
        )
    }
}

fn weld_with_tolerance(soup: &TriangleSoup, tolerance: f64) -> WeldedSoup {
    let mut grid = WeldGrid::new(tolerance);
    let corners = soup
        .iter()
        .map(|t| {
            [
                grid.find_or_insert(t.v0),
                grid.find_or_insert(t.v1),
                grid.find_or_insert(t.v2),
            ]
        })
        .collect();

    WeldedSoup {
        corners,
        vertex_count: grid.positions.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Triangle;

    fn soup(triangles: Vec<Triangle>) -> TriangleSoup {
        TriangleSoup::from_triangles(triangles).unwrap()
    }

    fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(x, y, z)
    }

    #[test]
    fn test_exact_weld_shares_equal_points() {
        let soup = soup(vec![
            Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)),
            Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)),
        ]);
        let welded = WeldedSoup::build(&soup, 0.0);
        assert_eq!(welded.vertex_count, 4);
        assert_eq!(welded.corners, vec![[0, 1, 2], [0, 2, 3]]);
        assert_eq!(welded.edge_ids(1, 2), (3, 0));
    }

    #[test]
    fn test_exact_weld_treats_negative_zero_as_zero() {
        let soup = soup(vec![
            Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)),
            Triangle::new(p(-0.0, 0.0, -0.0), p(1.0, 0.0, 0.0), p(0.0, -1.0, 0.0)),
        ]);
        let welded = WeldedSoup::build(&soup, 0.0);
        assert_eq!(welded.corners[1][0], welded.corners[0][0]);
        assert_eq!(welded.vertex_count, 4);
    }

    #[test]
    fn test_exact_weld_keeps_near_points_apart() {
        let soup = soup(vec![
            Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)),
            Triangle::new(p(1e-12, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, -1.0, 0.0)),
        ]);
        let welded = WeldedSoup::build(&soup, 0.0);
        assert_eq!(welded.vertex_count, 5);
        assert_ne!(welded.corners[1][0], welded.corners[0][0]);
    }

    #[test]
    fn test_tolerance_weld_merges_near_points() {
        let soup = soup(vec![
            Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)),
            Triangle::new(p(1e-7, 0.0, 0.0), p(1.0, 0.0, 1e-7), p(0.0, -1.0, 0.0)),
        ]);
        let welded = WeldedSoup::build(&soup, 1e-6);
        assert_eq!(welded.vertex_count, 4);
        assert_eq!(welded.corners[1], [0, 1, 3]);
    }

    #[test]
    fn test_tolerance_weld_handles_saturated_cells() {
        // 1e8 / 1e-12 exceeds the i64 range, so every cell coordinate saturates.
        let soup = soup(vec![
            Triangle::new(p(1e8, 0.0, 0.0), p(-1e8, 1e8, 0.0), p(0.0, -1e8, 1e8)),
            Triangle::new(p(1e8, 0.0, 0.0), p(-1e8, 1e8, 0.0), p(0.0, 0.0, -1e8)),
        ]);
        let welded = WeldedSoup::build(&soup, 1e-12);
        assert_eq!(welded.vertex_count, 4);
        assert_eq!(welded.corners, vec![[0, 1, 2], [0, 1, 3]]);
    }

    #[test]
    fn test_tolerance_weld_prefers_lowest_id() {
        // Points 0 and 1 are 1.5e-6 apart; the query sits within 1e-6 of both.
        let soup = soup(vec![
            Triangle::new(p(0.0, 0.0, 0.0), p(1.5e-6, 0.0, 0.0), p(0.0, 1.0, 0.0)),
            Triangle::new(p(0.75e-6, 0.0, 0.0), p(5.0, 0.0, 0.0), p(0.0, 5.0, 0.0)),
        ]);
        let welded = WeldedSoup::build(&soup, 1e-6);
        assert_eq!(welded.corners[0], [0, 1, 2]);
        assert_eq!(welded.corners[1][0], 0);
    }
}
