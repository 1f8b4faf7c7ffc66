// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sharp edge detection API

use crease_geometry::{
    edges_to_line_positions, ClassifierConfig, EdgeClassifier, TriangleSoup,
    DEFAULT_THRESHOLD_ANGLE,
};
use wasm_bindgen::prelude::*;

/// Classify a triangle-soup position buffer and flatten the sharp edges into
/// `[sx, sy, sz, ex, ey, ez, ...]`.
pub fn detect_line_positions(
    positions: &[f32],
    config: ClassifierConfig,
) -> crease_geometry::Result<Vec<f32>> {
    let classifier = EdgeClassifier::new(config)?;
    let soup = TriangleSoup::from_positions_f32(positions)?;
    Ok(edges_to_line_positions(&classifier.classify(&soup)))
}

/// Detect sharp edges with default settings.
///
/// Example:
/// ```javascript
/// const lines = detectSharpEdges(geometry.attributes.position.array);
/// const edgeGeometry = new THREE.BufferGeometry();
/// edgeGeometry.setAttribute('position', new THREE.BufferAttribute(lines, 3));
/// ```
#[wasm_bindgen(js_name = detectSharpEdges)]
pub fn detect_sharp_edges(
    positions: &[f32],
    threshold_angle: Option<f64>,
) -> Result<js_sys::Float32Array, JsError> {
    let config =
        ClassifierConfig::with_threshold(threshold_angle.unwrap_or(DEFAULT_THRESHOLD_ANGLE));
    let lines = detect_line_positions(positions, config)
        .map_err(|e| JsError::new(&format!("Edge detection error: {}", e)))?;
    Ok(js_sys::Float32Array::from(&lines[..]))
}

/// Reusable detector holding a validated configuration
#[wasm_bindgen]
pub struct SharpEdgeAPI {
    config: ClassifierConfig,
    last_edge_count: usize,
}

#[wasm_bindgen]
impl SharpEdgeAPI {
    /// Create a detector with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
            last_edge_count: 0,
        }
    }

    /// Set classifier configuration from JSON; missing fields keep defaults.
    ///
    /// ```javascript
    /// api.setConfig(JSON.stringify({ threshold_angle: 0.5, comparison: "greater_than" }));
    /// ```
    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&mut self, config_json: &str) -> Result<(), JsError> {
        let config: ClassifierConfig = serde_json::from_str(config_json)
            .map_err(|e| JsError::new(&format!("Invalid config JSON: {}", e)))?;
        config
            .validate()
            .map_err(|e| JsError::new(&format!("Invalid config: {}", e)))?;
        self.config = config;
        Ok(())
    }

    /// Get current configuration as JSON
    #[wasm_bindgen(js_name = getConfig)]
    pub fn get_config(&self) -> String {
        serde_json::to_string(&self.config).unwrap_or_else(|_| "{}".to_string())
    }

    /// Detect sharp edges; returns line-segment endpoints as Float32Array
    #[wasm_bindgen(js_name = detectEdges)]
    pub fn detect_edges(&mut self, positions: &[f32]) -> Result<js_sys::Float32Array, JsError> {
        let lines = detect_line_positions(positions, self.config)
            .map_err(|e| JsError::new(&format!("Edge detection error: {}", e)))?;
        self.last_edge_count = lines.len() / 6;
        Ok(js_sys::Float32Array::from(&lines[..]))
    }

    /// Number of edges returned by the last `detectEdges` call
    #[wasm_bindgen(getter, js_name = lastEdgeCount)]
    pub fn last_edge_count(&self) -> usize {
        self.last_edge_count
    }
}

impl Default for SharpEdgeAPI {
    fn default() -> Self {
        Self::new()
    }
}
