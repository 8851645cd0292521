// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration file is malformed: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("Configuration file is not well-formed XML: {0}")]
    XmlSyntax(#[from] quick_xml::Error),

    #[error("Exterior configuration without an Id attribute")]
    MissingId,

    #[error("Invalid configuration id {value:?}: {source}")]
    InvalidId {
        value: String,
        #[source]
        source: uuid::Error,
    },

    #[error("A configuration needs at least one dimension chain")]
    LastChain,

    #[error("Chain index {index} out of range (0..{len})")]
    ChainIndex { index: usize, len: usize },

    #[error("Element offset {0} mm is outside 1..=50")]
    ElementOffset(i32),

    #[error("Settings store is read-only (key {0})")]
    ReadOnlySettings(String),
}
