use crate::spatial::region::{Region, World};
use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset marking which regions of a world are still candidates
///
/// Uses 0-based world positions. Every operation is bounded by the universe
/// size fixed at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateSet {
    bits: BitVec,
}

impl CandidateSet {
    /// Create a set containing every region of the universe
    pub fn all(universe: usize) -> Self {
        Self {
            bits: bitvec![1; universe],
        }
    }

    /// Size of the universe this set ranges over
    pub fn universe(&self) -> usize {
        self.bits.len()
    }

    /// Eliminate a position
    pub fn remove(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, false);
        }
    }

    /// Test membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Test if no candidates remain
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count remaining candidates
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Positions of the remaining candidates in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }

    /// Resolve remaining candidates against the world they index
    pub fn regions<'w>(&self, world: &'w World) -> Vec<&'w Region> {
        self.bits
            .iter_ones()
            .filter_map(|index| world.region_at(index))
            .collect()
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CandidateSet({} of {}: {:?})", self.count(), self.universe(), self.to_vec())
    }
}
