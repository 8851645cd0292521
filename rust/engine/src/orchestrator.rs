// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One exterior dimensioning run over a picked set of elements.
//!
//! Stages:
//! 1. Pick walls and grids (re-prompting while fewer than two are picked)
//! 2. Wrap them, dropping what cannot be dimensioned
//! 3. Filter walls by width, then by the cut plane
//! 4. Find outer walls and group them by side
//! 5. For every enabled side and every chain, build the line and references
//!    and create the dimension in its own transaction

use exterior_dims_config::ExteriorConfiguration;
use exterior_dims_geometry::ExtremeSide;

use crate::arena::{ElementArena, WallKey};
use crate::dimension::{baseline, chain_references, FaceFilter};
use crate::error::HostError;
use crate::extremes::find_extremes;
use crate::filters::{filter_by_cut_plane, filter_by_width};
use crate::host::{
    DimensionHandle, DimensionHost, DimensionRequest, Notice, PlanView, SelectedElement,
    Selection, Transaction,
};
use crate::perimeter::find_outer_walls;
use crate::settings::PipelineSettings;

/// Name of the transaction every dimension is created in.
pub const TRANSACTION_NAME: &str = "Exterior dimensions";

#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// Dimensions created, possibly none.
    Completed { created: Vec<DimensionHandle> },
    /// The user cancelled the pick.
    Cancelled,
    /// Nothing left to dimension; the notice has been shown.
    Aborted(Notice),
}

pub struct ExteriorDimensions<'a> {
    configuration: &'a ExteriorConfiguration,
    settings: &'a PipelineSettings,
}

fn notify<H: DimensionHost>(host: &mut H, notice: Notice) -> Notice {
    tracing::warn!(%notice, "exterior dimensions notice");
    host.notify(&notice);
    notice
}

impl<'a> ExteriorDimensions<'a> {
    pub fn new(configuration: &'a ExteriorConfiguration, settings: &'a PipelineSettings) -> Self {
        Self {
            configuration,
            settings,
        }
    }

    pub fn run<H: DimensionHost>(&self, host: &mut H, view: &PlanView) -> RunOutcome {
        let Some(elements) = Self::pick(host) else {
            tracing::debug!("selection cancelled");
            return RunOutcome::Cancelled;
        };

        let arena = ElementArena::from_selection(&elements, &*host);
        tracing::debug!(
            picked = elements.len(),
            walls = arena.wall_count(),
            grids = arena.grids().count(),
            "selection wrapped"
        );
        if arena.wall_count() == 0 {
            return RunOutcome::Aborted(notify(host, Notice::NoDefinedWalls));
        }

        let walls = match self.prepare_walls(&arena, view) {
            Ok(walls) => walls,
            Err(notice) => return RunOutcome::Aborted(notify(host, notice)),
        };

        let probe_length = self.settings.probe_length;
        let outer = find_outer_walls(&arena, &walls, probe_length);
        let groups = find_extremes(&arena, &outer, probe_length);

        let mut created = Vec::new();
        for side in self.configuration.enabled_sides() {
            let side_walls = groups.get(side);
            if side_walls.is_empty() {
                tracing::debug!(%side, "no extreme walls on side");
                continue;
            }
            created.extend(self.dimension_side(host, &arena, side, side_walls, &walls, view));
        }

        tracing::info!(count = created.len(), "exterior dimensions created");
        RunOutcome::Completed { created }
    }

    /// Picks until at least two elements are selected. `None` on cancel.
    fn pick<H: DimensionHost>(host: &mut H) -> Option<Vec<SelectedElement>> {
        loop {
            match host.pick_elements() {
                Selection::Cancelled => return None,
                Selection::Picked(elements) if elements.len() < 2 => {
                    notify(host, Notice::TooFewElements);
                }
                Selection::Picked(elements) => return Some(elements),
            }
        }
    }

    fn prepare_walls(
        &self,
        arena: &ElementArena,
        view: &PlanView,
    ) -> std::result::Result<Vec<WallKey>, Notice> {
        let walls = filter_by_width(arena, arena.wall_keys(), self.settings);
        if walls.is_empty() {
            return Err(Notice::NoWallsAfterWidthFilter);
        }
        let walls = filter_by_cut_plane(arena, &walls, view.cut_plane_elevation);
        if walls.is_empty() {
            return Err(Notice::NoWallsAtCutPlane);
        }
        tracing::debug!(count = walls.len(), "walls after filtering");
        Ok(walls)
    }

    /// One dimension per chain. Chains sit further out the later they come.
    fn dimension_side<H: DimensionHost>(
        &self,
        host: &mut H,
        arena: &ElementArena,
        side: ExtremeSide,
        side_walls: &[WallKey],
        candidates: &[WallKey],
        view: &PlanView,
    ) -> Vec<DimensionHandle> {
        let filter = FaceFilter {
            side,
            cut: view.cut_plane_elevation,
            min_width_between: self.settings.min_width_between(),
            remove_variant: self.settings.remove_variant(),
        };

        let mut created = Vec::new();
        let mut cumulative_offset = 0;
        for (chain_index, chain) in self.configuration.chains.iter().enumerate() {
            cumulative_offset += chain.element_offset();
            let offset = self.settings.chain_offset(cumulative_offset, view.scale);

            let Some(line) = baseline(arena, side_walls, side, offset, view.cut_plane_elevation)
            else {
                notify(
                    host,
                    Notice::DegenerateBaseline {
                        side,
                        chain: chain_index,
                    },
                );
                continue;
            };

            let references = chain_references(arena, chain, side_walls, candidates, &filter);
            if references.is_empty() {
                notify(
                    host,
                    Notice::NoReferences {
                        side,
                        chain: chain_index,
                    },
                );
                continue;
            }

            let request = DimensionRequest {
                side,
                chain_index,
                baseline: line,
                references,
            };
            match create_dimension(host, &request) {
                Ok(handle) => {
                    tracing::info!(
                        %side,
                        chain = chain_index,
                        references = request.references.len(),
                        length = request.baseline.length(),
                        "dimension created"
                    );
                    created.push(handle);
                }
                Err(error) => {
                    notify(
                        host,
                        Notice::DimensionFailed {
                            side,
                            chain: chain_index,
                            reason: error.to_string(),
                        },
                    );
                }
            }
        }
        created
    }
}

/// Creates one dimension in its own transaction, rolled back on failure.
fn create_dimension<H: DimensionHost>(
    host: &mut H,
    request: &DimensionRequest,
) -> std::result::Result<DimensionHandle, HostError> {
    let mut transaction = Transaction::start(host, TRANSACTION_NAME)?;
    let handle = transaction.host().create_dimension(request)?;
    transaction.commit()?;
    Ok(handle)
}
