// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure reported by a host application call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("Transaction failed: {0}")]
    Transaction(String),

    #[error("Dimension creation failed: {0}")]
    Dimension(String),

    #[error("Host error: {0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] exterior_dims_config::Error),

    #[error(transparent)]
    Host(#[from] HostError),

    #[error("Scene file is malformed: {0}")]
    Scene(#[from] serde_json::Error),

    #[error("Active view has no cut plane")]
    NoCutPlane,
}
