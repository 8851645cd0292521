// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A single dimension chain: what it measures and how far out it sits.

use std::ops::RangeInclusive;

use crate::error::{Error, Result};

/// Offset of a chain from the previous one, in paper millimetres.
pub const DEFAULT_ELEMENT_OFFSET: i32 = 8;

/// Offsets offered for a chain.
pub const ELEMENT_OFFSETS: RangeInclusive<i32> = 1..=50;

/// What a chain dimensions. Exactly one mode is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainMode {
    /// Outer faces of the side walls.
    Walls {
        /// Also faces of walls running into the side walls.
        intersecting_walls: bool,
        /// Also jambs of openings in the side walls.
        openings: bool,
    },
    /// Every grid line crossing the dimension line.
    Grids,
    /// Only the first and the last grid line.
    ExtremeGrids,
    /// Overall length of the side.
    Overall,
}

impl Default for ChainMode {
    fn default() -> Self {
        ChainMode::Walls {
            intersecting_walls: false,
            openings: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DimensionChain {
    element_offset: i32,
    mode: ChainMode,
}

impl Default for DimensionChain {
    fn default() -> Self {
        Self {
            element_offset: DEFAULT_ELEMENT_OFFSET,
            mode: ChainMode::default(),
        }
    }
}

impl DimensionChain {
    pub fn new(mode: ChainMode, element_offset: i32) -> Self {
        Self {
            element_offset,
            mode,
        }
    }

    pub fn mode(&self) -> ChainMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ChainMode) {
        self.mode = mode;
    }

    pub fn element_offset(&self) -> i32 {
        self.element_offset
    }

    /// Rejects offsets outside [`ELEMENT_OFFSETS`].
    pub fn set_element_offset(&mut self, offset: i32) -> Result<()> {
        if !ELEMENT_OFFSETS.contains(&offset) {
            return Err(Error::ElementOffset(offset));
        }
        self.element_offset = offset;
        Ok(())
    }

    pub fn walls(&self) -> bool {
        matches!(self.mode, ChainMode::Walls { .. })
    }

    pub fn intersecting_walls(&self) -> bool {
        matches!(
            self.mode,
            ChainMode::Walls {
                intersecting_walls: true,
                ..
            }
        )
    }

    pub fn openings(&self) -> bool {
        matches!(self.mode, ChainMode::Walls { openings: true, .. })
    }

    pub fn grids(&self) -> bool {
        self.mode == ChainMode::Grids
    }

    pub fn extreme_grids(&self) -> bool {
        self.mode == ChainMode::ExtremeGrids
    }

    pub fn overall(&self) -> bool {
        self.mode == ChainMode::Overall
    }

    pub fn set_walls(&mut self, value: bool) {
        match (value, self.walls()) {
            (true, false) => self.mode = ChainMode::default(),
            (false, true) => self.mode = ChainMode::ExtremeGrids,
            _ => {}
        }
    }

    pub fn set_grids(&mut self, value: bool) {
        self.toggle(ChainMode::Grids, value);
    }

    pub fn set_extreme_grids(&mut self, value: bool) {
        self.toggle(ChainMode::ExtremeGrids, value);
    }

    pub fn set_overall(&mut self, value: bool) {
        self.toggle(ChainMode::Overall, value);
    }

    pub fn set_intersecting_walls(&mut self, value: bool) {
        if let ChainMode::Walls {
            intersecting_walls, ..
        } = &mut self.mode
        {
            *intersecting_walls = value;
        }
    }

    pub fn set_openings(&mut self, value: bool) {
        if let ChainMode::Walls { openings, .. } = &mut self.mode {
            *openings = value;
        }
    }

    fn toggle(&mut self, target: ChainMode, value: bool) {
        if value {
            self.mode = target;
        } else if self.mode == target {
            self.mode = ChainMode::default();
        }
    }
}
