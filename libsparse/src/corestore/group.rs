/*
 * Created on Mon Mar 10 2025
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

use {
    super::unsafe_apis,
    crate::util::NumericRepr,
    core::{fmt, ptr, slice},
};

/// A group of up to 64 position-value slots: presence lives in a single
/// bitmap word and the values sit densely packed, in ascending position
/// order, in a heap allocation sized to the population.
///
/// The value for a populated position `p` is at offset
/// `popcount(bitmap & ((1 << p) - 1))`. Storage grows and shrinks in pairs
/// of slots (the allocation is the population rounded up to even), so the
/// allocator only runs on every other fresh insert at the cost of at most
/// one spare slot per group.
pub struct SparseGroup<T: NumericRepr> {
    bitmap: u64,
    data: *mut T,
}

impl<T: NumericRepr> SparseGroup<T> {
    /// positions addressed by one group
    pub const CAPACITY: usize = 64;

    /// An empty group. Holds no allocation
    pub const fn new() -> Self {
        Self {
            bitmap: 0,
            data: core::ptr::NonNull::dangling().as_ptr(),
        }
    }

    /// Reconstitute a group from a bitmap, allocating storage for exactly
    /// its population but leaving the values uninitialized.
    ///
    /// ## Safety
    ///
    /// The caller must fill all `popcount(bitmap)` value slots (through
    /// [`SparseGroup::as_raw_ptr_mut`]) before any of them is read, which
    /// includes [`SparseGroup::get`], [`SparseGroup::as_slice`], equality
    /// and debug formatting
    pub unsafe fn from_bitmap(bitmap: u64) -> Self {
        // UNSAFE(@ohsayan): allocation only; init is the caller's contract
        let data = unsafe_apis::alloc_array(Self::rounded(bitmap.count_ones() as usize));
        Self { bitmap, data }
    }

    /// number of populated slots
    pub const fn len(&self) -> usize {
        self.bitmap.count_ones() as usize
    }
    pub const fn is_empty(&self) -> bool {
        self.bitmap == 0
    }
    /// the presence bitmap: bit `i` is set iff slot `i` is populated
    pub const fn bitmap(&self) -> u64 {
        self.bitmap
    }
    /// bytes occupied by the live (population-sized) value region
    pub fn raw_size(&self) -> usize {
        self.len() * T::WIDTH
    }
    /// the live value region, ascending position order
    pub fn as_slice(&self) -> &[T] {
        unsafe {
            // UNSAFE(@ohsayan): the live region is initialized and in bounds
            slice::from_raw_parts(self.data, self.len())
        }
    }
    /// start of the value region (for serialization)
    pub fn as_raw_ptr(&self) -> *const u8 {
        self.data as *const u8
    }
    /// start of the value region (for deserialization)
    pub fn as_raw_ptr_mut(&mut self) -> *mut u8 {
        self.data as *mut u8
    }

    /// Is `pos` populated? `pos` must be `< 64`
    pub fn has(&self, pos: usize) -> bool {
        debug_assert!(pos < Self::CAPACITY, "position out of group range");
        self.bitmap & (1u64 << pos) != 0
    }

    /// If `pos` is populated, return its value. `pos` must be `< 64`
    pub fn get(&self, pos: usize) -> Option<T> {
        if self.has(pos) {
            unsafe {
                // UNSAFE(@ohsayan): presence checked; the offset is inside
                // the live region
                Some(ptr::read(self.data.add(self.offset(pos))))
            }
        } else {
            None
        }
    }

    /// Insert `v` at `pos`, returning the previous value if the slot was
    /// occupied (occupied slots are overwritten in place). `pos` must be
    /// `< 64`
    pub fn insert(&mut self, pos: usize, v: T) -> Option<T> {
        let offset = self.offset(pos);
        if self.has(pos) {
            unsafe {
                // UNSAFE(@ohsayan): occupied slot, inside the live region
                let slot = self.data.add(offset);
                let previous = ptr::read(slot);
                ptr::write(slot, v);
                Some(previous)
            }
        } else {
            let count = self.len();
            if count % 2 == 0 {
                // an even population also fills its physical capacity: make
                // room for this insert and the next one
                self.resize(count, count + 2);
            }
            unsafe {
                // UNSAFE(@ohsayan): capacity ensured above; shift the suffix
                // one slot up and claim the hole
                let hole = self.data.add(offset);
                ptr::copy(hole, hole.add(1), count - offset);
                ptr::write(hole, v);
            }
            self.bitmap |= 1u64 << pos;
            None
        }
    }

    /// Release the value array and zero the bitmap
    pub fn clear(&mut self) {
        self.resize(self.len(), 0);
        self.bitmap = 0;
    }

    /// offset of `pos` in the packed value array
    fn offset(&self, pos: usize) -> usize {
        debug_assert!(pos < Self::CAPACITY, "position out of group range");
        (self.bitmap & ((1u64 << pos) - 1)).count_ones() as usize
    }

    /// a population rounded up to the allocation granularity (pairs of slots)
    const fn rounded(count: usize) -> usize {
        (count + 1) & !1
    }

    fn resize(&mut self, count: usize, new_count: usize) {
        let (old, new) = (Self::rounded(count), Self::rounded(new_count));
        if old != new {
            self.data = unsafe {
                // UNSAFE(@ohsayan): both lengths track the allocation exactly
                unsafe_apis::realloc_array(self.data, old, new)
            };
        }
    }
}

impl<T: NumericRepr> Drop for SparseGroup<T> {
    fn drop(&mut self) {
        unsafe {
            // UNSAFE(@ohsayan): the allocation is exactly the rounded
            // population; values are plain integers, no dtors to run
            unsafe_apis::dealloc_array(self.data, Self::rounded(self.len()));
        }
    }
}

impl<T: NumericRepr> Default for SparseGroup<T> {
    fn default() -> Self {
        Self::new()
    }
}

// the group exclusively owns its value array
unsafe impl<T: NumericRepr + Send> Send for SparseGroup<T> {}
unsafe impl<T: NumericRepr + Sync> Sync for SparseGroup<T> {}

impl<T: NumericRepr> PartialEq for SparseGroup<T> {
    fn eq(&self, other: &Self) -> bool {
        // compare the live regions only: two groups that agree on contents
        // may still differ in the spare slot of the even-rounded allocation
        self.bitmap == other.bitmap && self.as_slice() == other.as_slice()
    }
}

impl<T: NumericRepr> fmt::Debug for SparseGroup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for pos in 0..Self::CAPACITY {
            if let Some(v) = self.get(pos) {
                map.entry(&pos, &v);
            }
        }
        map.finish()
    }
}
