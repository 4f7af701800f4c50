/*
 * Created on Sun Mar 16 2025
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

//! # Unflush routines
//!
//! The read path: rebuild an index from its on-disk image. Each bitmap
//! reconstitutes a group with storage allocated for exactly its population;
//! a scattered vectored read then fills every value array in place.

use {
    super::{
        interface::{DataFile, IoVector},
        StorageError, StorageResult, BITMAP_BATCH, HEADER_SIZE, IOVEC_BATCH,
    },
    crate::{
        corestore::{group::SparseGroup, SparseIndex},
        util::NumericRepr,
    },
};

/// Read a full index out of `file` at the cursor
pub fn read_full<T: NumericRepr>(file: &mut DataFile) -> StorageResult<SparseIndex<T>> {
    let mut idx = SparseIndex::new(0);
    self::read_into(file, &mut idx)?;
    Ok(idx)
}

/// Replace `idx`'s contents with the image in `file`. The current contents
/// are dropped up front; if any part of the read fails, `idx` is left
/// cleared rather than half-rebuilt
pub fn read_into<T: NumericRepr>(
    file: &mut DataFile,
    idx: &mut SparseIndex<T>,
) -> StorageResult<()> {
    idx.reset();
    let mut header = [0u8; HEADER_SIZE];
    file.read_exact(&mut header)?;
    let size = u64::from_le_bytes(header[..8].try_into().unwrap()) as usize;
    let group_count = u64::from_le_bytes(header[8..].try_into().unwrap()) as usize;
    // the two length fields are redundant; refuse to guess if they disagree
    let expected = (size + SparseGroup::<T>::CAPACITY - 1) / SparseGroup::<T>::CAPACITY;
    if group_count != expected {
        return Err(StorageError::BadMetadata(format!(
            "group count {group_count} does not cover a universe of {size} positions"
        )));
    }
    let mut groups = self::read_bitmaps::<T>(file, group_count)?;
    self::read_values(file, &mut groups)?;
    idx.set_contents(size, groups);
    trace!("unflushed index: {group_count} groups over {size} positions");
    Ok(())
}

fn read_bitmaps<T: NumericRepr>(
    file: &mut DataFile,
    group_count: usize,
) -> StorageResult<Vec<SparseGroup<T>>> {
    let mut groups = Vec::with_capacity(group_count);
    let mut buf = vec![0u8; group_count.min(BITMAP_BATCH) * 8];
    let mut remaining = group_count;
    while remaining != 0 {
        let batch = remaining.min(BITMAP_BATCH);
        let buf = &mut buf[..batch * 8];
        file.read_exact(buf)?;
        for chunk in buf.chunks_exact(8) {
            let bitmap = u64::from_le_bytes(chunk.try_into().unwrap());
            groups.push(unsafe {
                // UNSAFE(@ohsayan): allocates for the population;
                // read_values fills every slot before anyone looks at one
                SparseGroup::from_bitmap(bitmap)
            });
        }
        remaining -= batch;
    }
    Ok(groups)
}

fn read_values<T: NumericRepr>(
    file: &mut DataFile,
    groups: &mut [SparseGroup<T>],
) -> StorageResult<()> {
    let mut iov: Vec<IoVector> = Vec::with_capacity(IOVEC_BATCH);
    for group in groups.iter_mut() {
        if group.is_empty() {
            // empty groups contributed no value bytes at flush time
            continue;
        }
        iov.push(IoVector::writable(group.as_raw_ptr_mut(), group.raw_size()));
        if iov.len() == IOVEC_BATCH {
            file.readv_exact(&iov)?;
            iov.clear();
        }
    }
    file.readv_exact(&iov)
}
