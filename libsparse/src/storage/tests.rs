/*
 * Created on Tue Mar 18 2025
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
    super::{interface::DataFile, unflush, StorageError, HEADER_SIZE},
    crate::{corestore::SparseIndex, util::rng::Xorshift128},
};

fn random_index(size: usize, keys: usize, seed: u64) -> SparseIndex<u64> {
    let mut idx = SparseIndex::new(size);
    let mut gen = Xorshift128::seeded(seed);
    for i in 0..keys {
        idx.insert((gen.next_u64() % size as u64) as usize, i as u64);
    }
    idx
}

#[test]
fn roundtrip_random_dense() {
    const N: usize = 1 << 24;
    const DBFILE: &str = "rt_random_dense.db";
    let idx = random_index(N, N, 1234);
    let mut file = DataFile::open_truncated(DBFILE).unwrap();
    idx.write(&mut file).unwrap();
    file.close().unwrap();
    let mut file = DataFile::open(DBFILE).unwrap();
    let mut restored: SparseIndex<u64> = SparseIndex::new(N);
    restored.read(&mut file).unwrap();
    assert!(idx == restored);
    file.remove().unwrap();
}

#[test]
fn roundtrip_on_a_single_handle() {
    const DBFILE: &str = "rt_single_handle.db";
    let idx = random_index(1 << 12, 1 << 10, 99);
    let mut file = DataFile::open_truncated(DBFILE).unwrap();
    idx.write(&mut file).unwrap();
    file.seek_start(0).unwrap();
    let restored: SparseIndex<u64> = unflush::read_full(&mut file).unwrap();
    assert!(idx == restored);
    file.remove().unwrap();
}

#[test]
fn roundtrip_narrow_width() {
    const DBFILE: &str = "rt_narrow_width.db";
    let mut idx: SparseIndex<u16> = SparseIndex::new(1 << 10);
    let mut gen = Xorshift128::seeded(777);
    for i in 0..256u16 {
        idx.insert((gen.next_u64() % (1 << 10)) as usize, i);
    }
    let mut file = DataFile::open_truncated(DBFILE).unwrap();
    idx.write(&mut file).unwrap();
    // the value region shrinks with the width
    assert_eq!(
        file.f_len().unwrap(),
        (HEADER_SIZE + idx.group_count() * 8 + idx.num_nonempty() * 2) as u64
    );
    file.seek_start(0).unwrap();
    let restored: SparseIndex<u16> = unflush::read_full(&mut file).unwrap();
    assert!(idx == restored);
    file.remove().unwrap();
}

#[test]
fn empty_roundtrip_is_header_and_zero_bitmaps() {
    const N: usize = 1 << 16;
    const DBFILE: &str = "rt_empty.db";
    let idx: SparseIndex<u64> = SparseIndex::new(N);
    let mut file = DataFile::open_truncated(DBFILE).unwrap();
    idx.write(&mut file).unwrap();
    file.close().unwrap();
    // nothing but the header and one zero bitmap per group
    let group_count = N / 64;
    let raw = std::fs::read(DBFILE).unwrap();
    assert_eq!(raw.len(), HEADER_SIZE + group_count * 8);
    assert_eq!(&raw[..8], &(N as u64).to_le_bytes());
    assert_eq!(&raw[8..16], &(group_count as u64).to_le_bytes());
    assert!(raw[HEADER_SIZE..].iter().all(|b| *b == 0));
    let mut file = DataFile::open(DBFILE).unwrap();
    let restored: SparseIndex<u64> = unflush::read_full(&mut file).unwrap();
    assert!(idx == restored);
    assert_eq!(restored.num_nonempty(), 0);
    file.remove().unwrap();
}

#[test]
fn zero_universe_roundtrip() {
    const DBFILE: &str = "rt_zero_universe.db";
    let idx: SparseIndex<u64> = SparseIndex::new(0);
    let mut file = DataFile::open_truncated(DBFILE).unwrap();
    idx.write(&mut file).unwrap();
    assert_eq!(file.f_len().unwrap(), HEADER_SIZE as u64);
    file.seek_start(0).unwrap();
    let restored: SparseIndex<u64> = unflush::read_full(&mut file).unwrap();
    assert!(idx == restored);
    file.remove().unwrap();
}

#[test]
fn failed_read_leaves_the_index_cleared() {
    const DBFILE: &str = "rt_bad_header.db";
    std::fs::write(DBFILE, [0u8; 10]).unwrap();
    let mut idx = random_index(1 << 10, 128, 7);
    let mut file = DataFile::open(DBFILE).unwrap();
    match idx.read(&mut file) {
        Err(StorageError::ShortRead { expected, read }) => {
            assert_eq!(expected, HEADER_SIZE);
            assert_eq!(read, 10);
        }
        other => panic!("expected a short read, got {other:?}"),
    }
    assert_eq!(idx.num_nonempty(), 0);
    assert_eq!(idx.size(), 0);
    file.remove().unwrap();
}

#[test]
fn inconsistent_header_is_rejected() {
    const DBFILE: &str = "rt_bad_meta.db";
    let mut raw = Vec::new();
    raw.extend_from_slice(&100u64.to_le_bytes());
    raw.extend_from_slice(&5u64.to_le_bytes()); // a universe of 100 has 2 groups
    std::fs::write(DBFILE, &raw).unwrap();
    let mut file = DataFile::open(DBFILE).unwrap();
    match unflush::read_full::<u64>(&mut file) {
        Err(StorageError::BadMetadata(_)) => {}
        other => panic!("expected bad metadata, got {other:?}"),
    }
    file.remove().unwrap();
}

#[test]
fn truncated_value_region_is_a_short_read() {
    const DBFILE: &str = "rt_truncated_values.db";
    let idx = random_index(1 << 10, 128, 21);
    let mut file = DataFile::open_truncated(DBFILE).unwrap();
    idx.write(&mut file).unwrap();
    file.close().unwrap();
    // chop the file right after the bitmaps
    let bitmaps_end = (HEADER_SIZE + idx.group_count() * 8) as u64;
    let raw = std::fs::read(DBFILE).unwrap();
    std::fs::write(DBFILE, &raw[..bitmaps_end as usize]).unwrap();
    let mut file = DataFile::open(DBFILE).unwrap();
    match unflush::read_full::<u64>(&mut file) {
        Err(StorageError::ShortRead { .. }) => {}
        other => panic!("expected a short read, got {other:?}"),
    }
    file.remove().unwrap();
}

mod interface {
    use super::*;

    #[test]
    fn positioned_io_does_not_move_the_cursor() {
        const DBFILE: &str = "if_positioned.db";
        let mut file = DataFile::open_truncated(DBFILE).unwrap();
        file.write_all(b"0123456789").unwrap();
        file.write_all_at(3, b"abc").unwrap();
        let mut buf = [0u8; 4];
        file.read_exact_at(2, &mut buf).unwrap();
        assert_eq!(&buf, b"2abc");
        // the cursor is still at the end of the sequential write
        file.write_all(b"!").unwrap();
        assert_eq!(file.f_len().unwrap(), 11);
        file.remove().unwrap();
    }

    #[test]
    fn append_grows_the_file() {
        const DBFILE: &str = "if_append.db";
        let mut file = DataFile::open_truncated(DBFILE).unwrap();
        file.write_all(b"head").unwrap();
        file.close().unwrap();
        let mut file = DataFile::open_append(DBFILE).unwrap();
        file.write_all(b"+tail").unwrap();
        file.close().unwrap();
        assert_eq!(std::fs::read(DBFILE).unwrap(), b"head+tail");
        let file = DataFile::open(DBFILE).unwrap();
        file.remove().unwrap();
    }

    #[test]
    fn sync_open_and_truncate() {
        const DBFILE: &str = "if_sync.db";
        let mut file = DataFile::open_sync(DBFILE).unwrap();
        file.write_all(b"durable bytes").unwrap();
        file.sync().unwrap();
        assert_eq!(file.f_len().unwrap(), 13);
        file.truncate().unwrap();
        assert_eq!(file.f_len().unwrap(), 0);
        file.close().unwrap();
        let file = DataFile::open(DBFILE).unwrap();
        file.remove().unwrap();
    }

    #[test]
    fn reading_past_the_end_is_a_short_read() {
        const DBFILE: &str = "if_short.db";
        let mut file = DataFile::open_truncated(DBFILE).unwrap();
        file.write_all(b"tiny").unwrap();
        file.seek_start(0).unwrap();
        let mut buf = [0u8; 16];
        match file.read_exact(&mut buf) {
            Err(StorageError::ShortRead { expected: 16, read: 4 }) => {}
            other => panic!("expected a short read, got {other:?}"),
        }
        file.remove().unwrap();
    }
}
