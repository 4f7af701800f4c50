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

//! # Flush routines
//!
//! The write path: header, then every group bitmap in large sequential
//! batches, then the packed value arrays of every non-empty group gathered
//! into vectored writes straight from group storage.

use {
    super::{
        interface::{DataFile, IoVector},
        StorageResult, BITMAP_BATCH, IOVEC_BATCH,
    },
    crate::{corestore::SparseIndex, util::NumericRepr},
};

/// Serialize the full index into `file` at the cursor. The index is not
/// mutated and durability is not forced; sync (or close) the file for that
pub fn flush_index<T: NumericRepr>(
    file: &mut DataFile,
    idx: &SparseIndex<T>,
) -> StorageResult<()> {
    self::flush_header(file, idx)?;
    self::flush_bitmaps(file, idx)?;
    self::flush_values(file, idx)?;
    trace!(
        "flushed index: {} groups, {} populated positions",
        idx.group_count(),
        idx.num_nonempty()
    );
    Ok(())
}

fn flush_header<T: NumericRepr>(file: &mut DataFile, idx: &SparseIndex<T>) -> StorageResult<()> {
    file.write_all(&(idx.size() as u64).to_le_bytes())?;
    file.write_all(&(idx.group_count() as u64).to_le_bytes())
}

fn flush_bitmaps<T: NumericRepr>(file: &mut DataFile, idx: &SparseIndex<T>) -> StorageResult<()> {
    let mut buf: Vec<u8> = Vec::with_capacity(idx.group_count().min(BITMAP_BATCH) * 8);
    for group in idx.groups() {
        buf.extend_from_slice(&group.bitmap().to_le_bytes());
        if buf.len() == BITMAP_BATCH * 8 {
            file.write_all(&buf)?;
            buf.clear();
        }
    }
    // the final batch is usually short but must go out all the same
    file.write_all(&buf)
}

fn flush_values<T: NumericRepr>(file: &mut DataFile, idx: &SparseIndex<T>) -> StorageResult<()> {
    let mut iov: Vec<IoVector> = Vec::with_capacity(IOVEC_BATCH);
    for group in idx.groups() {
        if group.is_empty() {
            // empty groups own no value bytes
            continue;
        }
        iov.push(IoVector::readable(group.as_raw_ptr(), group.raw_size()));
        if iov.len() == IOVEC_BATCH {
            file.writev_all(&iov)?;
            iov.clear();
        }
    }
    file.writev_all(&iov)
}
