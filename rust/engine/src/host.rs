// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! What the engine needs from a host CAD application.

use std::fmt;

use exterior_dims_geometry::{ExtremeSide, GridData, InsertGeometry, Point3D, Reference, WallData};
use serde::{Deserialize, Serialize};

use crate::error::{Error, HostError, Result};

/// Active view of the host document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ViewInfo {
    #[serde(default)]
    pub name: String,
    pub is_plan: bool,
    /// Elevation of the view's cut plane, for plan views.
    #[serde(default)]
    pub cut_plane_elevation: Option<f64>,
    /// Drawing scale denominator (100 for 1:100).
    pub scale: f64,
}

/// A plan view ready to be dimensioned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlanView {
    pub cut_plane_elevation: f64,
    pub scale: f64,
}

impl PlanView {
    pub fn from_view(view: &ViewInfo) -> Result<Self> {
        let cut_plane_elevation = view.cut_plane_elevation.ok_or(Error::NoCutPlane)?;
        Ok(Self {
            cut_plane_elevation,
            scale: view.scale,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum SelectedElement {
    Wall(WallData),
    Grid(GridData),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Picked(Vec<SelectedElement>),
    Cancelled,
}

/// Straight line a dimension is drawn along.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Baseline {
    pub start: Point3D,
    pub end: Point3D,
}

impl Baseline {
    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

/// Everything the host needs to create one linear dimension.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DimensionRequest {
    pub side: ExtremeSide,
    /// Position of the chain in the configuration, from 0.
    pub chain_index: usize,
    pub baseline: Baseline,
    pub references: Vec<Reference>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionHandle(pub u64);

/// Non-blocking messages shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    NotPlanView,
    NoConfiguration,
    TooFewElements,
    NoDefinedWalls,
    NoWallsAfterWidthFilter,
    NoWallsAtCutPlane,
    DegenerateBaseline { side: ExtremeSide, chain: usize },
    NoReferences { side: ExtremeSide, chain: usize },
    DimensionFailed { side: ExtremeSide, chain: usize, reason: String },
    Unexpected(String),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::NotPlanView => f.write_str("Exterior dimensions can only be placed on a plan view"),
            Notice::NoConfiguration => {
                f.write_str("No exterior dimension configuration selected. Create one in the settings")
            }
            Notice::TooFewElements => f.write_str("Select at least two walls or grids"),
            Notice::NoDefinedWalls => f.write_str("No suitable walls among the selected elements"),
            Notice::NoWallsAfterWidthFilter => {
                f.write_str("No walls left after filtering by minimum width")
            }
            Notice::NoWallsAtCutPlane => f.write_str("No selected wall is cut by the view's cut plane"),
            Notice::DegenerateBaseline { side, chain } => write!(
                f,
                "Could not build the dimension line for chain #{} on the {side} side",
                chain + 1
            ),
            Notice::NoReferences { side, chain } => write!(
                f,
                "Nothing to dimension for chain #{} on the {side} side",
                chain + 1
            ),
            Notice::DimensionFailed {
                side,
                chain,
                reason,
            } => write!(
                f,
                "Dimension for chain #{} on the {side} side failed: {reason}",
                chain + 1
            ),
            Notice::Unexpected(message) => write!(f, "Unexpected error: {message}"),
        }
    }
}

/// Host application services used by a dimensioning run.
///
/// Insert geometry lookup is part of the host so that opening faces can be
/// resolved while walls are wrapped.
pub trait DimensionHost: InsertGeometry {
    fn active_view(&self) -> ViewInfo;

    /// Rectangle pick of walls and grids.
    fn pick_elements(&mut self) -> Selection;

    fn start_transaction(&mut self, name: &str) -> std::result::Result<(), HostError>;
    fn commit_transaction(&mut self) -> std::result::Result<(), HostError>;
    fn rollback_transaction(&mut self);

    fn create_dimension(
        &mut self,
        request: &DimensionRequest,
    ) -> std::result::Result<DimensionHandle, HostError>;

    fn notify(&mut self, notice: &Notice);
}

/// Scoped transaction. Rolled back on drop unless committed.
pub struct Transaction<'h, H: DimensionHost> {
    host: &'h mut H,
    committed: bool,
}

impl<'h, H: DimensionHost> Transaction<'h, H> {
    pub fn start(host: &'h mut H, name: &str) -> std::result::Result<Self, HostError> {
        host.start_transaction(name)?;
        Ok(Self {
            host,
            committed: false,
        })
    }

    pub fn host(&mut self) -> &mut H {
        self.host
    }

    /// A failed commit is rolled back when the guard drops.
    pub fn commit(mut self) -> std::result::Result<(), HostError> {
        let result = self.host.commit_transaction();
        self.committed = result.is_ok();
        result
    }
}

impl<H: DimensionHost> Drop for Transaction<'_, H> {
    fn drop(&mut self) {
        if !self.committed {
            self.host.rollback_transaction();
        }
    }
}
