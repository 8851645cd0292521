// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::chain::DimensionChain;
use crate::error::{Error, Result};

/// Ordered chains of a configuration. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainList {
    chains: Vec<DimensionChain>,
}

impl Default for ChainList {
    fn default() -> Self {
        Self {
            chains: vec![DimensionChain::default()],
        }
    }
}

impl ChainList {
    /// An empty input yields a single default chain.
    pub fn from_chains(chains: Vec<DimensionChain>) -> Self {
        if chains.is_empty() {
            Self::default()
        } else {
            Self { chains }
        }
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DimensionChain> {
        self.chains.iter()
    }

    pub fn as_slice(&self) -> &[DimensionChain] {
        &self.chains
    }

    pub fn get(&self, index: usize) -> Option<&DimensionChain> {
        self.chains.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut DimensionChain> {
        self.chains.get_mut(index)
    }

    pub fn push(&mut self, chain: DimensionChain) {
        self.chains.push(chain);
    }

    /// Removes a chain. The last remaining chain cannot be removed.
    pub fn remove(&mut self, index: usize) -> Result<DimensionChain> {
        let len = self.chains.len();
        if index >= len {
            return Err(Error::ChainIndex { index, len });
        }
        if len == 1 {
            return Err(Error::LastChain);
        }
        Ok(self.chains.remove(index))
    }

    pub fn move_up(&mut self, index: usize) -> Result<()> {
        let len = self.chains.len();
        if index >= len {
            return Err(Error::ChainIndex { index, len });
        }
        if index > 0 {
            self.chains.swap(index - 1, index);
        }
        Ok(())
    }

    /// "Dimension chain #N", numbered from 1 in list order.
    pub fn display_name(&self, index: usize) -> Option<String> {
        (index < self.chains.len()).then(|| format!("Dimension chain #{}", index + 1))
    }

    pub fn display_names(&self) -> Vec<String> {
        (1..=self.chains.len())
            .map(|n| format!("Dimension chain #{n}"))
            .collect()
    }
}

impl<'a> IntoIterator for &'a ChainList {
    type Item = &'a DimensionChain;
    type IntoIter = std::slice::Iter<'a, DimensionChain>;

    fn into_iter(self) -> Self::IntoIter {
        self.chains.iter()
    }
}
