// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Crease Geometry
//!
//! Sharp edge extraction for triangle soups: unindexed meshes where every
//! triangle carries its own copy of its three vertex positions. Adjacency is
//! recovered by vertex value equality, face normals are compared across each
//! shared edge, and the classified edges come back as plain segments for
//! rendering or export.
//!
//! ```
//! use crease_geometry::{classify_sharp_edges_flat, DEFAULT_THRESHOLD_ANGLE};
//!
//! let positions = [
//!     0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0,
//!     0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
//! ];
//! let edges = classify_sharp_edges_flat(&positions, DEFAULT_THRESHOLD_ANGLE).unwrap();
//! assert_eq!(edges.len(), 2);
//! ```

pub mod adjacency;
pub mod classify;
pub mod config;
pub mod error;
pub mod mesh;
pub mod weld;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use adjacency::{brute_force_neighbour, AdjacencyStrategy, EdgeIndex, EdgeKey};
pub use classify::{
    classify_sharp_edges, classify_sharp_edges_flat, dihedral_angle, EdgeClassification,
    EdgeClassifier,
};
pub use config::{AngleComparison, BoundaryPolicy, ClassifierConfig, DEFAULT_THRESHOLD_ANGLE};
pub use error::{Error, Result};
pub use mesh::{
    edges_to_line_positions, Edge, Triangle, TriangleSoup, FLOATS_PER_TRIANGLE, MAX_TRIANGLES,
};
pub use weld::{VertexId, WeldedSoup};
