// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Crease WebAssembly Bindings
//!
//! JavaScript/TypeScript API for sharp edge extraction built with wasm-bindgen.
//! Positions go in as the `Float32Array` of an unindexed buffer geometry and
//! come back as line-segment endpoints ready for a line geometry.

use wasm_bindgen::prelude::*;

mod api;
mod utils;

pub use api::{detect_line_positions, detect_sharp_edges, SharpEdgeAPI};
pub use utils::set_panic_hook as init_panic_hook;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    utils::set_panic_hook();
}

/// Get the version of Crease
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
