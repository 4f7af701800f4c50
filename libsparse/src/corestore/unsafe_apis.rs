/*
 * Created on Sun Mar 09 2025
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

/*!
    # Unsafe APIs

    This module provides abstractions (unsafe, still) over the global
    allocator for the group value arrays. Zero-length requests never reach
    the allocator: they hand back (or release to) a dangling, well-aligned
    pointer.

*/

use std::{
    alloc::{self, Layout},
    mem,
    ptr::NonNull,
};

/// Allocate an array of `l` elements of type `T`. This will panic if the
/// allocator returns an error
#[inline(always)]
pub unsafe fn alloc_array<T>(l: usize) -> *mut T {
    if l == 0 {
        return NonNull::dangling().as_ptr();
    }
    let ptr = alloc::alloc(Layout::array::<T>(l).unwrap_unchecked()) as *mut T;
    assert!(!ptr.is_null(), "malloc failed");
    ptr
}

/// Resize the array at `ptr` from `old_l` to `new_l` elements of type `T`,
/// preserving the common prefix. Either length may be zero. This will panic
/// if the allocator returns an error
#[inline(always)]
pub unsafe fn realloc_array<T>(ptr: *mut T, old_l: usize, new_l: usize) -> *mut T {
    if old_l == 0 {
        return self::alloc_array(new_l);
    }
    if new_l == 0 {
        self::dealloc_array(ptr, old_l);
        return NonNull::dangling().as_ptr();
    }
    let layout = Layout::array::<T>(old_l).unwrap_unchecked();
    let nptr = alloc::realloc(ptr as *mut u8, layout, new_l * mem::size_of::<T>()) as *mut T;
    assert!(!nptr.is_null(), "malloc failed");
    nptr
}

/// Deallocate an array of `l` elements of type `T`. This function will ensure
/// that nonzero calls to the allocator are made
#[inline(always)]
pub unsafe fn dealloc_array<T>(ptr: *mut T, l: usize) {
    if l != 0 {
        alloc::dealloc(ptr as *mut u8, Layout::array::<T>(l).unwrap_unchecked())
    }
}
