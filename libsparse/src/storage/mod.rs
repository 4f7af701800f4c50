/*
 * Created on Fri Mar 14 2025
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
# Storage Engine

Persistence for the core store. The on-disk image of an index is:

```text
[ 8B: universe size (LE) ]
[ 8B: group count == ceil(size / 64) (LE) ]
[ 8B x group count: group bitmaps (LE) ]
[ value arrays of all non-empty groups, ascending group order; each array
  is popcount(bitmap) values of the configured width ]
```

There is no magic, version or checksum, and the value width is not recorded:
a file is only meaningful to a reader that agrees on the width out-of-band.
Bitmaps stream in large sequential batches; the value region rides on
vectored I/O so the packed per-group allocations are transferred in place,
never staged through an intermediate buffer. Nothing in the write path
mutates the index, and the read path publishes contents only once the whole
image is in, so an I/O error can never leave a half-rebuilt index behind.
*/

pub mod error;
pub mod flush;
pub mod interface;
pub mod unflush;

#[cfg(test)]
mod tests;

pub use self::error::{StorageError, StorageResult};

/// bytes in the fixed header (universe size + group count)
pub(crate) const HEADER_SIZE: usize = 16;
/// bitmaps buffered per sequential transfer batch
pub(crate) const BITMAP_BATCH: usize = 1024 * 1024;
/// value-array descriptors per vectored transfer (IOV_MAX on Linux)
pub(crate) const IOVEC_BATCH: usize = 1024;
