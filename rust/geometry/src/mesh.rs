// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Triangle soup data structures
//!
//! Triangles are stored independently, each with its own copy of its three
//! vertex positions. Two corners are the same point only when their
//! coordinates compare equal; see [`crate::weld`] for how identity is resolved.

use crate::error::{Error, Result};
use nalgebra::{Point3, Vector3};

/// Scalars per triangle in a flat position buffer (3 vertices x 3 components)
pub const FLOATS_PER_TRIANGLE: usize = 9;

/// Largest accepted triangle count; every corner must fit a `u32` vertex id.
pub const MAX_TRIANGLES: usize = (u32::MAX / 3) as usize;

/// Triangle definition, vertices in winding order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub v0: Point3<f64>,
    pub v1: Point3<f64>,
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle
    #[inline]
    pub fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Build a triangle from nine consecutive scalars
    #[inline]
    fn from_chunk(c: &[f64]) -> Self {
        Self::new(
            Point3::new(c[0], c[1], c[2]),
            Point3::new(c[3], c[4], c[5]),
            Point3::new(c[6], c[7], c[8]),
        )
    }

    /// Vertices in winding order
    #[inline]
    pub fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Directed edge `(v_slot, v_(slot+1 mod 3))`
    ///
    /// # Panics
    /// Panics if `slot > 2`.
    #[inline]
    pub fn edge(&self, slot: usize) -> Edge {
        let vertices = self.vertices();
        Edge::new(vertices[slot], vertices[(slot + 1) % 3])
    }

    /// All three directed edges in slot order
    pub fn edges(&self) -> [Edge; 3] {
        [self.edge(0), self.edge(1), self.edge(2)]
    }

    /// Unit face normal from `(v1 - v0) x (v2 - v0)`.
    ///
    /// Degenerate (zero-area) triangles return the zero vector, which callers
    /// treat as "no normal" rather than a direction.
    pub fn face_normal(&self) -> Vector3<f64> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1
            .cross(&edge2)
            .try_normalize(0.0)
            .unwrap_or_else(Vector3::zeros)
    }

    /// True when the face normal is the zero sentinel
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.face_normal() == Vector3::zeros()
    }

    /// Calculate triangle area
    pub fn area(&self) -> f64 {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1.cross(&edge2).norm() * 0.5
    }

    fn is_finite(&self) -> bool {
        self.vertices()
            .iter()
            .all(|v| v.coords.iter().all(|c| c.is_finite()))
    }
}

/// Directed line segment taken from a triangle's winding order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Edge {
    /// Create a new edge
    #[inline]
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    /// Segment length
    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// The same segment traversed end to start
    #[inline]
    pub fn reversed(&self) -> Self {
        Self::new(self.end, self.start)
    }

    /// Order-independent exact comparison of endpoints
    pub fn same_endpoints(&self, other: &Edge) -> bool {
        (self.start == other.start && self.end == other.end)
            || (self.start == other.end && self.end == other.start)
    }
}

/// Validated, non-empty list of independently stored triangles
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleSoup {
    triangles: Vec<Triangle>,
}

impl TriangleSoup {
    /// Build from a flat `[x, y, z, ...]` buffer, nine scalars per triangle.
    pub fn from_positions(positions: &[f64]) -> Result<Self> {
        check_buffer_len(positions.len())?;
        let triangles = positions
            .chunks_exact(FLOATS_PER_TRIANGLE)
            .map(Triangle::from_chunk)
            .collect();
        Self::from_triangles(triangles)
    }

    /// Build from a single-precision buffer (GPU vertex attribute layout).
    /// Values are widened to f64 exactly, so equality is preserved.
    pub fn from_positions_f32(positions: &[f32]) -> Result<Self> {
        check_buffer_len(positions.len())?;
        let mut triangles = Vec::with_capacity(positions.len() / FLOATS_PER_TRIANGLE);
        let mut widened = [0.0f64; FLOATS_PER_TRIANGLE];
        for chunk in positions.chunks_exact(FLOATS_PER_TRIANGLE) {
            for (dst, &src) in widened.iter_mut().zip(chunk) {
                *dst = src as f64;
            }
            triangles.push(Triangle::from_chunk(&widened));
        }
        Self::from_triangles(triangles)
    }

    /// Wrap an existing triangle list.
    pub fn from_triangles(triangles: Vec<Triangle>) -> Result<Self> {
        check_triangle_count(triangles.len())?;
        if let Some(index) = triangles.iter().position(|t| !t.is_finite()) {
            return Err(Error::InvalidMesh(format!(
                "triangle {} has a non-finite coordinate",
                index
            )));
        }
        Ok(Self { triangles })
    }

    /// Number of triangles
    #[inline]
    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    /// Always false for a constructed soup; provided for API symmetry
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Triangles in input order
    #[inline]
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Iterate over triangles in input order
    pub fn iter(&self) -> std::slice::Iter<'_, Triangle> {
        self.triangles.iter()
    }
}

impl<'a> IntoIterator for &'a TriangleSoup {
    type Item = &'a Triangle;
    type IntoIter = std::slice::Iter<'a, Triangle>;

    fn into_iter(self) -> Self::IntoIter {
        self.triangles.iter()
    }
}

fn check_triangle_count(count: usize) -> Result<()> {
    if count == 0 {
        return Err(Error::InvalidMesh(
            "at least one triangle is required".to_string(),
        ));
    }
    if count > MAX_TRIANGLES {
        return Err(Error::InvalidMesh(format!(
            "{} triangles exceeds the limit of {}",
            count, MAX_TRIANGLES
        )));
    }
    Ok(())
}

fn check_buffer_len(len: usize) -> Result<()> {
    if len == 0 {
        return Err(Error::InvalidMesh(
            "at least one triangle is required".to_string(),
        ));
    }
    if len % FLOATS_PER_TRIANGLE != 0 {
        return Err(Error::InvalidMesh(format!(
            "position buffer length {} is not a multiple of {} ({} trailing scalars)",
            len,
            FLOATS_PER_TRIANGLE,
            len % FLOATS_PER_TRIANGLE
        )));
    }
    Ok(())
}

/// Flatten edges into `[sx, sy, sz, ex, ey, ez, ...]` for a line-segment
/// vertex buffer.
pub fn edges_to_line_positions(edges: &[Edge]) -> Vec<f32> {
    let mut positions = Vec::with_capacity(edges.len() * 6);
    for edge in edges {
        positions.push(edge.start.x as f32);
        positions.push(edge.start.y as f32);
        positions.push(edge.start.z as f32);
        positions.push(edge.end.x as f32);
        positions.push(edge.end.y as f32);
        positions.push(edge.end.z as f32);
    }
    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_triangle() -> Triangle {
        Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        )
    }

    #[test]
    fn test_face_normal_follows_winding() {
        let tri = unit_triangle();
        assert_relative_eq!(tri.face_normal(), Vector3::new(0.0, 0.0, 1.0));

        let flipped = Triangle::new(tri.v0, tri.v2, tri.v1);
        assert_relative_eq!(flipped.face_normal(), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_degenerate_normal_is_zero() {
        let p = Point3::new(1.0, 2.0, 3.0);
        let tri = Triangle::new(p, p, Point3::new(4.0, 5.0, 6.0));
        assert_eq!(tri.face_normal(), Vector3::zeros());
        assert!(tri.is_degenerate());
        assert_eq!(tri.area(), 0.0);

        let collinear = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert!(collinear.is_degenerate());
    }

    #[test]
    fn test_edges_follow_winding() {
        let tri = unit_triangle();
        let edges = tri.edges();
        assert_eq!(edges[0], Edge::new(tri.v0, tri.v1));
        assert_eq!(edges[1], Edge::new(tri.v1, tri.v2));
        assert_eq!(edges[2], Edge::new(tri.v2, tri.v0));
        assert_relative_eq!(tri.area(), 0.5);
    }

    #[test]
    fn test_same_endpoints_ignores_direction() {
        let edge = unit_triangle().edge(0);
        assert!(edge.same_endpoints(&edge.reversed()));
        assert!(!edge.same_endpoints(&unit_triangle().edge(1)));
        assert_relative_eq!(edge.length(), 1.0);
    }

    #[test]
    fn test_from_positions_rejects_bad_length() {
        let err = TriangleSoup::from_positions(&[0.0; 10]).unwrap_err();
        assert!(matches!(err, Error::InvalidMesh(_)));

        let err = TriangleSoup::from_positions(&[]).unwrap_err();
        assert!(matches!(err, Error::InvalidMesh(_)));

        let err = TriangleSoup::from_positions_f32(&[0.0; 8]).unwrap_err();
        assert!(matches!(err, Error::InvalidMesh(_)));
    }

    #[test]
    fn test_from_positions_rejects_non_finite() {
        let mut positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
        positions[4] = f64::NAN;
        let err = TriangleSoup::from_positions(&positions).unwrap_err();
        assert!(matches!(err, Error::InvalidMesh(_)));

        positions[4] = f64::INFINITY;
        let err = TriangleSoup::from_positions(&positions).unwrap_err();
        assert!(matches!(err, Error::InvalidMesh(_)));
    }

    #[test]
    fn test_from_positions_splits_triangles() {
        let positions = [
            0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0,
        ];
        let soup = TriangleSoup::from_positions(&positions).unwrap();
        assert_eq!(soup.len(), 2);
        assert_eq!(soup.triangles()[1].v2, Point3::new(0.0, 1.0, 1.0));

        let narrow: Vec<f32> = positions.iter().map(|&v| v as f32).collect();
        let soup_f32 = TriangleSoup::from_positions_f32(&narrow).unwrap();
        assert_eq!(soup, soup_f32);
    }

    #[test]
    fn test_from_triangles_rejects_empty() {
        assert!(TriangleSoup::from_triangles(Vec::new()).is_err());
    }

    #[test]
    fn test_triangle_count_limit() {
        assert!(check_triangle_count(1).is_ok());
        assert!(check_triangle_count(MAX_TRIANGLES).is_ok());
        assert!(matches!(
            check_triangle_count(MAX_TRIANGLES + 1),
            Err(Error::InvalidMesh(_))
        ));
        assert!(MAX_TRIANGLES * 3 <= u32::MAX as usize);
    }

    #[test]
    fn test_edges_to_line_positions() {
        let edge = Edge::new(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 5.0, 6.0));
        assert_eq!(
            edges_to_line_positions(&[edge]),
            vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]
        );
        assert!(edges_to_line_positions(&[]).is_empty());
    }
}
