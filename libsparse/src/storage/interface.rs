/*
 * Created on Sat Mar 15 2025
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

//! Interfaces with the file system
//!
//! [`DataFile`] is the byte blob the storage engine serializes into: a named
//! file opened read-write, with exact-length sequential and positioned
//! transfers plus vectored transfers over the raw descriptor. Every transfer
//! either moves the full byte count or reports how far it got; callers never
//! have to reason about partial progress.

use {
    super::error::{StorageError, StorageResult},
    crate::IoResult,
    std::{
        fs::{self, File, OpenOptions},
        io::{ErrorKind, Read, Seek, SeekFrom, Write},
        os::unix::{
            fs::{FileExt, OpenOptionsExt},
            io::AsRawFd,
        },
    },
};

/// A contiguous memory region in a vectored transfer. Layout-compatible with
/// the host `iovec`
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct IoVector {
    base: *mut libc::c_void,
    len: usize,
}

impl IoVector {
    /// Describe the readable region of `len` bytes at `ptr`
    pub fn readable(ptr: *const u8, len: usize) -> Self {
        Self {
            base: ptr as *mut libc::c_void,
            len,
        }
    }
    /// Describe the writable region of `len` bytes at `ptr`
    pub fn writable(ptr: *mut u8, len: usize) -> Self {
        Self {
            base: ptr as *mut libc::c_void,
            len,
        }
    }
    pub fn len(&self) -> usize {
        self.len
    }
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Debug)]
/// A named, byte-addressable data file
///
/// The handle exclusively owns the descriptor for the duration of a
/// serialization pass. Dropping it releases the descriptor without the
/// durability guarantee of [`DataFile::close`].
pub struct DataFile {
    file: File,
    path: String,
}

impl DataFile {
    /// Open `path` (creating it if needed) for read-write
    pub fn open(path: &str) -> IoResult<Self> {
        Self::_open(path, OpenOptions::new().read(true).write(true).create(true))
    }
    /// Open `path` for read-write, dropping any existing contents
    pub fn open_truncated(path: &str) -> IoResult<Self> {
        Self::_open(
            path,
            OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .truncate(true),
        )
    }
    /// Open `path` for appending
    pub fn open_append(path: &str) -> IoResult<Self> {
        Self::_open(path, OpenOptions::new().read(true).append(true).create(true))
    }
    /// Open `path` for read-write with synchronous durability: every write
    /// reaches the device before returning
    pub fn open_sync(path: &str) -> IoResult<Self> {
        Self::_open(
            path,
            OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .custom_flags(libc::O_SYNC),
        )
    }
    fn _open(path: &str, options: &OpenOptions) -> IoResult<Self> {
        Ok(Self {
            file: options.open(path)?,
            path: path.to_owned(),
        })
    }

    /// Flush buffered data to durable storage and release the handle
    pub fn close(self) -> StorageResult<()> {
        self.sync()
    }
    /// Flush buffered data to durable storage
    pub fn sync(&self) -> StorageResult<()> {
        self.file.sync_all().map_err(StorageError::BadCommit)
    }

    /// Read exactly `buf.len()` bytes at the cursor
    pub fn read_exact(&mut self, buf: &mut [u8]) -> StorageResult<()> {
        let mut read = 0;
        while read != buf.len() {
            match self.file.read(&mut buf[read..]) {
                Ok(0) => {
                    return Err(StorageError::ShortRead {
                        expected: buf.len(),
                        read,
                    })
                }
                Ok(n) => read += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Write all of `buf` at the cursor
    pub fn write_all(&mut self, buf: &[u8]) -> StorageResult<()> {
        let mut written = 0;
        while written != buf.len() {
            match self.file.write(&buf[written..]) {
                Ok(0) => {
                    return Err(StorageError::ShortWrite {
                        expected: buf.len(),
                        written,
                    })
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Read exactly `buf.len()` bytes at absolute offset `pos`. The cursor
    /// does not move
    pub fn read_exact_at(&self, pos: u64, buf: &mut [u8]) -> StorageResult<()> {
        let mut read = 0;
        while read != buf.len() {
            match self.file.read_at(&mut buf[read..], pos + read as u64) {
                Ok(0) => {
                    return Err(StorageError::ShortRead {
                        expected: buf.len(),
                        read,
                    })
                }
                Ok(n) => read += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Write all of `buf` at absolute offset `pos`. The cursor does not move
    pub fn write_all_at(&self, pos: u64, buf: &[u8]) -> StorageResult<()> {
        let mut written = 0;
        while written != buf.len() {
            match self.file.write_at(&buf[written..], pos + written as u64) {
                Ok(0) => {
                    return Err(StorageError::ShortWrite {
                        expected: buf.len(),
                        written,
                    })
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    /// Fill every region in `regions`, in order, from the cursor in a single
    /// vectored read
    pub fn readv_exact(&mut self, regions: &[IoVector]) -> StorageResult<()> {
        if regions.is_empty() {
            return Ok(());
        }
        let expected = Self::total_len(regions);
        let ret = unsafe {
            // UNSAFE(@ohsayan): live (ptr, len) pairs, layout-compatible
            // with iovec
            libc::readv(
                self.file.as_raw_fd(),
                regions.as_ptr() as *const libc::iovec,
                regions.len() as libc::c_int,
            )
        };
        if ret < 0 {
            return Err(std::io::Error::last_os_error().into());
        }
        if ret as usize != expected {
            return Err(StorageError::ShortRead {
                expected,
                read: ret as usize,
            });
        }
        Ok(())
    }

    /// Drain every region in `regions`, in order, to the cursor in a single
    /// vectored write
    pub fn writev_all(&mut self, regions: &[IoVector]) -> StorageResult<()> {
        if regions.is_empty() {
            return Ok(());
        }
        let expected = Self::total_len(regions);
        let ret = unsafe {
            // UNSAFE(@ohsayan): live (ptr, len) pairs, layout-compatible
            // with iovec
            libc::writev(
                self.file.as_raw_fd(),
                regions.as_ptr() as *const libc::iovec,
                regions.len() as libc::c_int,
            )
        };
        if ret < 0 {
            return Err(std::io::Error::last_os_error().into());
        }
        if ret as usize != expected {
            return Err(StorageError::ShortWrite {
                expected,
                written: ret as usize,
            });
        }
        Ok(())
    }

    /// current length in bytes
    pub fn f_len(&self) -> IoResult<u64> {
        self.file.metadata().map(|md| md.len())
    }
    /// Move the cursor to absolute offset `pos`
    pub fn seek_start(&mut self, pos: u64) -> IoResult<()> {
        self.file.seek(SeekFrom::Start(pos)).map(|_| ())
    }
    /// Reset the length to zero. The cursor does not move
    pub fn truncate(&mut self) -> IoResult<()> {
        self.file.set_len(0)
    }
    /// Remove the file from persistent storage, consuming the handle
    pub fn remove(self) -> IoResult<()> {
        fs::remove_file(&self.path)
    }

    fn total_len(regions: &[IoVector]) -> usize {
        regions.iter().map(IoVector::len).sum()
    }
}
