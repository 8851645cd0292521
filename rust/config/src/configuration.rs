// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use exterior_dims_geometry::ExtremeSide;
use uuid::Uuid;

use crate::chains::ChainList;

/// A named recipe: which sides get dimensions and which chains go on each.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExteriorConfiguration {
    pub id: Uuid,
    pub name: String,
    pub top_dimensions: bool,
    pub bottom_dimensions: bool,
    pub left_dimensions: bool,
    pub right_dimensions: bool,
    pub chains: ChainList,
}

impl ExteriorConfiguration {
    /// Fresh configuration with a random id, dimensioning the bottom and left
    /// sides with one default chain.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            top_dimensions: false,
            bottom_dimensions: true,
            left_dimensions: true,
            right_dimensions: false,
            chains: ChainList::default(),
        }
    }

    pub fn is_side_enabled(&self, side: ExtremeSide) -> bool {
        match side {
            ExtremeSide::Top => self.top_dimensions,
            ExtremeSide::Bottom => self.bottom_dimensions,
            ExtremeSide::Left => self.left_dimensions,
            ExtremeSide::Right => self.right_dimensions,
        }
    }

    pub fn set_side(&mut self, side: ExtremeSide, enabled: bool) {
        let flag = match side {
            ExtremeSide::Top => &mut self.top_dimensions,
            ExtremeSide::Bottom => &mut self.bottom_dimensions,
            ExtremeSide::Left => &mut self.left_dimensions,
            ExtremeSide::Right => &mut self.right_dimensions,
        };
        *flag = enabled;
    }

    /// Enabled sides in processing order (right, left, top, bottom).
    pub fn enabled_sides(&self) -> impl Iterator<Item = ExtremeSide> + '_ {
        ExtremeSide::PROCESSING_ORDER
            .into_iter()
            .filter(move |side| self.is_side_enabled(*side))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_configuration_sides() {
        let config = ExteriorConfiguration::new("Facade");
        assert_eq!(
            config.enabled_sides().collect::<Vec<_>>(),
            vec![ExtremeSide::Left, ExtremeSide::Bottom]
        );
        assert_eq!(config.chains.len(), 1);
    }

    #[test]
    fn test_processing_order() {
        let mut config = ExteriorConfiguration::new("All");
        config.set_side(ExtremeSide::Top, true);
        config.set_side(ExtremeSide::Right, true);
        assert_eq!(
            config.enabled_sides().collect::<Vec<_>>(),
            ExtremeSide::PROCESSING_ORDER.to_vec()
        );
    }
}
