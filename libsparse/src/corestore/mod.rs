/*
 * Created on Tue Mar 11 2025
 *
 * This file is a part of SparseDB
 * SparseDB is a free and open-source sparse, position-addressed index
 * written by Sayan Nandan ("the Author") with the vision to provide a
 * predictable-overhead store for integer keyed data without compromising
 * on lookup or persistence performance.
 *
 * Copyright (c) 2025, Sayan Nandan <ohsayan@outlook.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

//! # The core store
//!
//! The in-memory side of the engine. A [`SparseIndex`] partitions its
//! universe of positions into fixed 64-position [`SparseGroup`]s and routes
//! every operation to the group holding the position. Serialization lives in
//! the storage module; the `write`/`read` methods here only hand the index
//! over to it.

pub mod group;
mod unsafe_apis;


use {
    self::group::SparseGroup,
    crate::{
        storage::{self, interface::DataFile, StorageResult},
        util::NumericRepr,
    },
    core::fmt,
};

/// A sparse, position-addressed index over a fixed universe `[0, size)`
///
/// Position `p` maps to group `p / 64` at slot `p % 64`. Operating on a
/// position `>= size` is a caller bug. The index is strictly
/// append/overwrite: there is no way to remove a single position short of
/// [`SparseIndex::clear`].
pub struct SparseIndex<T: NumericRepr> {
    size: usize,
    groups: Vec<SparseGroup<T>>,
}

impl<T: NumericRepr> SparseIndex<T> {
    /// Create an index over the universe `[0, size)` with every group empty
    pub fn new(size: usize) -> Self {
        let group_count = (size + SparseGroup::<T>::CAPACITY - 1) / SparseGroup::<T>::CAPACITY;
        Self {
            size,
            groups: (0..group_count).map(|_| SparseGroup::new()).collect(),
        }
    }

    /// the declared universe size
    pub fn size(&self) -> usize {
        self.size
    }
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
    /// total populated positions across all groups
    pub fn num_nonempty(&self) -> usize {
        self.groups.iter().map(SparseGroup::len).sum()
    }

    /// Is `pos` populated? `pos` must be `< size`
    pub fn has(&self, pos: usize) -> bool {
        self.groups[self.group_for(pos)].has(Self::slot(pos))
    }

    /// If `pos` is populated, return its value. `pos` must be `< size`
    pub fn get(&self, pos: usize) -> Option<T> {
        self.groups[self.group_for(pos)].get(Self::slot(pos))
    }

    /// Insert `v` at `pos`, returning the previous value if the position was
    /// occupied. `pos` must be `< size`
    pub fn insert(&mut self, pos: usize, v: T) -> Option<T> {
        let group = self.group_for(pos);
        self.groups[group].insert(Self::slot(pos), v)
    }

    /// Return every group to the empty state
    pub fn clear(&mut self) {
        self.groups.iter_mut().for_each(SparseGroup::clear)
    }

    /// Serialize this index into `file`. The index itself is never mutated;
    /// durability is the caller's call (see [`DataFile::sync`])
    pub fn write(&self, file: &mut DataFile) -> StorageResult<()> {
        storage::flush::flush_index(file, self)
    }

    /// Replace this index's contents (universe size included) with the image
    /// in `file`. A failed read leaves the index cleared
    pub fn read(&mut self, file: &mut DataFile) -> StorageResult<()> {
        storage::unflush::read_into(file, self)
    }

    pub(crate) fn groups(&self) -> &[SparseGroup<T>] {
        &self.groups
    }
    pub(crate) fn reset(&mut self) {
        self.size = 0;
        self.groups = Vec::new();
    }
    pub(crate) fn set_contents(&mut self, size: usize, groups: Vec<SparseGroup<T>>) {
        self.size = size;
        self.groups = groups;
    }

    fn group_for(&self, pos: usize) -> usize {
        debug_assert!(pos < self.size, "position out of universe range");
        pos / SparseGroup::<T>::CAPACITY
    }
    fn slot(pos: usize) -> usize {
        pos % SparseGroup::<T>::CAPACITY
    }
}

impl<T: NumericRepr> PartialEq for SparseIndex<T> {
    fn eq(&self, other: &Self) -> bool {
        self.size == other.size && self.groups == other.groups
    }
}

impl<T: NumericRepr> fmt::Debug for SparseIndex<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SparseIndex")
            .field("size", &self.size)
            .field("groups", &self.groups.len())
            .field("num_nonempty", &self.num_nonempty())
            .finish()
    }
}
