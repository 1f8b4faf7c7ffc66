// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for edge classification
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while validating classifier input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    #[error("Invalid threshold angle {0}: must lie in (0, π) radians")]
    InvalidThreshold(f64),

    #[error("Invalid vertex tolerance {0}: must be finite and non-negative")]
    InvalidTolerance(f64),
}
