// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory host backed by a JSON scene.
//!
//! A scene carries the active view, the elements a pick returns and the
//! solids of opening inserts. Walls can be given either as full records or
//! as box walls described by their centerline. Everything the run does to
//! the "document" is recorded so callers can inspect it afterwards.

use std::collections::VecDeque;

use exterior_dims_geometry::{
    join_shared_endpoints, BuiltWall, ElementId, GridData, InsertGeometry, Solid, WallBuilder,
    WallData,
};
use serde::{Deserialize, Serialize};

use crate::error::{HostError, Result};
use crate::host::{
    DimensionHandle, DimensionHost, DimensionRequest, Notice, SelectedElement, Selection, ViewInfo,
};

/// Solids of one opening insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InsertRecord {
    pub id: ElementId,
    pub solids: Vec<Solid>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpeningSpec {
    pub id: i64,
    /// Distance along the wall from its start point.
    pub from: f64,
    pub to: f64,
    pub sill: f64,
    pub head: f64,
}

/// Straight wall given by its centerline, built into a box solid on load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoxWallSpec {
    pub id: i64,
    pub start: [f64; 2],
    pub end: [f64; 2],
    #[serde(default)]
    pub width: Option<f64>,
    /// Base and top elevations.
    #[serde(default)]
    pub heights: Option<[f64; 2]>,
    /// Solid extension past the start and end of the location line.
    #[serde(default)]
    pub extend: [f64; 2],
    #[serde(default)]
    pub curtain: bool,
    #[serde(default)]
    pub openings: Vec<OpeningSpec>,
}

impl BoxWallSpec {
    pub fn build(&self) -> BuiltWall {
        let mut builder = WallBuilder::new(
            self.id,
            (self.start[0], self.start[1]),
            (self.end[0], self.end[1]),
        )
        .extend(self.extend[0], self.extend[1]);
        if let Some(width) = self.width {
            builder = builder.width(width);
        }
        if let Some([base, top]) = self.heights {
            builder = builder.heights(base, top);
        }
        if self.curtain {
            builder = builder.curtain();
        }
        for o in &self.openings {
            builder = builder.opening(o.id, o.from, o.to, o.sill, o.head);
        }
        builder.build()
    }
}

/// A dimension that made it into a committed transaction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CreatedDimension {
    pub handle: DimensionHandle,
    #[serde(flatten)]
    pub request: DimensionRequest,
}

#[derive(Debug, Default, Clone)]
struct SceneLog {
    picks: VecDeque<Selection>,
    picked: bool,
    open_transaction: Option<String>,
    pending: Vec<CreatedDimension>,
    created: Vec<CreatedDimension>,
    notices: Vec<Notice>,
    committed: usize,
    rolled_back: usize,
    next_handle: u64,
    failing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub view: ViewInfo,
    #[serde(default)]
    pub elements: Vec<SelectedElement>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub box_walls: Vec<BoxWallSpec>,
    #[serde(default)]
    pub inserts: Vec<InsertRecord>,
    /// Derive end joins from coincident location endpoints on load.
    #[serde(default = "default_auto_join")]
    pub auto_join: bool,
    #[serde(skip)]
    log: SceneLog,
}

fn default_auto_join() -> bool {
    true
}

impl Scene {
    pub fn new(view: ViewInfo) -> Self {
        Self {
            view,
            elements: Vec::new(),
            box_walls: Vec::new(),
            inserts: Vec::new(),
            auto_join: true,
            log: SceneLog::default(),
        }
    }

    /// Parses a scene and builds its box walls.
    pub fn from_json(text: &str) -> Result<Self> {
        let mut scene: Scene = serde_json::from_str(text)?;
        let specs = std::mem::take(&mut scene.box_walls);
        for spec in &specs {
            scene.add_built_wall(spec.build());
        }
        if scene.auto_join {
            scene.connect_walls();
        }
        tracing::debug!(
            elements = scene.elements.len(),
            inserts = scene.inserts.len(),
            "scene loaded"
        );
        Ok(scene)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn add_wall(&mut self, wall: WallData) {
        self.elements.push(SelectedElement::Wall(wall));
    }

    pub fn add_built_wall(&mut self, built: BuiltWall) {
        self.add_wall(built.wall);
        self.inserts.extend(
            built
                .inserts
                .into_iter()
                .map(|(id, solids)| InsertRecord { id, solids }),
        );
    }

    pub fn add_grid(&mut self, grid: GridData) {
        self.elements.push(SelectedElement::Grid(grid));
    }

    /// Fills in wall end joins from location geometry.
    pub fn connect_walls(&mut self) {
        let mut walls: Vec<WallData> = self
            .elements
            .iter()
            .filter_map(|element| match element {
                SelectedElement::Wall(wall) => Some(wall.clone()),
                SelectedElement::Grid(_) => None,
            })
            .collect();
        join_shared_endpoints(&mut walls);

        let mut joined = walls.into_iter();
        for element in &mut self.elements {
            if let SelectedElement::Wall(wall) = element {
                if let Some(updated) = joined.next() {
                    *wall = updated;
                }
            }
        }
    }

    /// Queues the result of the next pick. Without queued picks the first
    /// pick returns every element and later picks are cancelled.
    pub fn queue_pick(&mut self, selection: Selection) {
        self.log.picks.push_back(selection);
    }

    /// Makes every following dimension creation fail.
    pub fn fail_dimension_creation(&mut self) {
        self.log.failing = true;
    }

    pub fn created(&self) -> &[CreatedDimension] {
        &self.log.created
    }

    pub fn notices(&self) -> &[Notice] {
        &self.log.notices
    }

    pub fn committed_transactions(&self) -> usize {
        self.log.committed
    }

    pub fn rolled_back_transactions(&self) -> usize {
        self.log.rolled_back
    }
}

impl InsertGeometry for Scene {
    fn insert_solids(&self, insert: ElementId) -> Vec<Solid> {
        self.inserts
            .iter()
            .find(|record| record.id == insert)
            .map(|record| record.solids.clone())
            .unwrap_or_default()
    }
}

impl DimensionHost for Scene {
    fn active_view(&self) -> ViewInfo {
        self.view.clone()
    }

    fn pick_elements(&mut self) -> Selection {
        if let Some(selection) = self.log.picks.pop_front() {
            return selection;
        }
        if self.log.picked {
            return Selection::Cancelled;
        }
        self.log.picked = true;
        Selection::Picked(self.elements.clone())
    }

    fn start_transaction(&mut self, name: &str) -> std::result::Result<(), HostError> {
        if let Some(open) = &self.log.open_transaction {
            return Err(HostError::Transaction(format!(
                "'{open}' is still open"
            )));
        }
        self.log.open_transaction = Some(name.to_string());
        Ok(())
    }

    fn commit_transaction(&mut self) -> std::result::Result<(), HostError> {
        if self.log.open_transaction.take().is_none() {
            return Err(HostError::Transaction("no open transaction".into()));
        }
        self.log.created.append(&mut self.log.pending);
        self.log.committed += 1;
        Ok(())
    }

    fn rollback_transaction(&mut self) {
        if self.log.open_transaction.take().is_some() {
            self.log.pending.clear();
            self.log.rolled_back += 1;
        }
    }

    fn create_dimension(
        &mut self,
        request: &DimensionRequest,
    ) -> std::result::Result<DimensionHandle, HostError> {
        if self.log.open_transaction.is_none() {
            return Err(HostError::Transaction(
                "dimension created outside a transaction".into(),
            ));
        }
        if self.log.failing {
            return Err(HostError::Dimension("references are not valid".into()));
        }
        if request.references.len() < 2 {
            return Err(HostError::Dimension(format!(
                "need at least 2 references, got {}",
                request.references.len()
            )));
        }
        self.log.next_handle += 1;
        let handle = DimensionHandle(self.log.next_handle);
        self.log.pending.push(CreatedDimension {
            handle,
            request: request.clone(),
        });
        Ok(handle)
    }

    fn notify(&mut self, notice: &Notice) {
        self.log.notices.push(notice.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{Baseline, Transaction};
    use exterior_dims_geometry::{ExtremeSide, Point3D, Reference};

    fn plan() -> ViewInfo {
        ViewInfo {
            name: "Level 1".into(),
            is_plan: true,
            cut_plane_elevation: Some(1500.0),
            scale: 100.0,
        }
    }

    fn request(references: usize) -> DimensionRequest {
        DimensionRequest {
            side: ExtremeSide::Right,
            chain_index: 0,
            baseline: Baseline {
                start: Point3D::new(0.0, 0.0, 0.0),
                end: Point3D::new(0.0, 1.0, 0.0),
            },
            references: (0..references)
                .map(|i| Reference::new(format!("r{i}")))
                .collect(),
        }
    }

    #[test]
    fn test_box_walls_are_built_and_joined() {
        let json = r#"{
            "view": {"is_plan": true, "cut_plane_elevation": 1500.0, "scale": 100.0},
            "box_walls": [
                {"id": 1, "start": [0, 0], "end": [5000, 0]},
                {"id": 2, "start": [5000, 0], "end": [5000, 4000], "width": 300,
                 "openings": [{"id": 20, "from": 1000, "to": 2000, "sill": 900, "head": 2100}]}
            ]
        }"#;
        let scene = Scene::from_json(json).unwrap();
        assert_eq!(scene.elements.len(), 2);
        assert_eq!(scene.inserts.len(), 1);
        let SelectedElement::Wall(first) = &scene.elements[0] else {
            panic!("expected a wall");
        };
        assert!(first.joins.end.contains(&ElementId(2)));
        assert!(!scene.insert_solids(ElementId(20)).is_empty());
        assert!(scene.insert_solids(ElementId(99)).is_empty());
    }

    #[test]
    fn test_second_pick_is_cancelled() {
        let mut scene = Scene::new(plan());
        assert!(matches!(scene.pick_elements(), Selection::Picked(_)));
        assert_eq!(scene.pick_elements(), Selection::Cancelled);
    }

    #[test]
    fn test_dimensions_only_survive_commit() {
        let mut scene = Scene::new(plan());
        {
            let mut tx = Transaction::start(&mut scene, "rolled back").unwrap();
            tx.host().create_dimension(&request(2)).unwrap();
        }
        assert!(scene.created().is_empty());
        assert_eq!(scene.rolled_back_transactions(), 1);

        let mut tx = Transaction::start(&mut scene, "kept").unwrap();
        let handle = tx.host().create_dimension(&request(3)).unwrap();
        tx.commit().unwrap();
        assert_eq!(scene.created().len(), 1);
        assert_eq!(scene.created()[0].handle, handle);
        assert_eq!(scene.committed_transactions(), 1);
    }

    #[test]
    fn test_create_outside_transaction_fails() {
        let mut scene = Scene::new(plan());
        assert!(scene.create_dimension(&request(2)).is_err());
    }
}
