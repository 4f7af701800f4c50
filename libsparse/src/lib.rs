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

//! # libsparse
//!
//! The core library for SparseDB. A [`SparseIndex`] associates a fixed-width
//! integer value with positions drawn from a large, pre-declared universe
//! `[0, N)`, assuming only a small fraction of positions are ever populated.
//! The universe is partitioned into 64-position groups, each tracking
//! presence in a single bitmap and packing its values into an allocation
//! sized to the population, so membership, reads and inserts stay constant
//! time while empty positions cost nothing but their bitmap bit.
//!
//! The [`storage`] module serializes an index into (and back out of) a
//! [`DataFile`] using a compact header + bitmaps + packed-values layout with
//! vectored I/O on the value region. The [`util`] module carries the
//! deterministic RNG and stopwatch that the benchmark tool and the tests
//! share.

#[macro_use]
extern crate log;

pub mod corestore;
pub mod storage;
pub mod util;

pub use self::{
    corestore::{group::SparseGroup, SparseIndex},
    storage::interface::DataFile,
    util::{rng::Xorshift128, NumericRepr, Stopwatch},
};

/// A generic result for I/O bound operations
pub type IoResult<T> = std::io::Result<T>;
