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

use {core::fmt, std::io::Error as IoError};

pub type StorageResult<T> = Result<T, StorageError>;

pub trait ErrorContext<T> {
    /// Provide some context to an error
    fn map_err_context(self, extra: impl ToString) -> StorageResult<T>;
}

impl<T> ErrorContext<T> for Result<T, IoError> {
    fn map_err_context(self, extra: impl ToString) -> StorageResult<T> {
        self.map_err(|e| StorageError::IoExtra(e, extra.to_string()))
    }
}

#[derive(Debug)]
pub enum StorageError {
    /// An I/O error
    Io(IoError),
    /// An I/O error with extra context
    IoExtra(IoError, String),
    /// A read transferred fewer bytes than requested
    ShortRead { expected: usize, read: usize },
    /// A write transferred fewer bytes than requested
    ShortWrite { expected: usize, written: usize },
    /// A sync (or close) failed to durably persist buffered data
    BadCommit(IoError),
    /// The file header is self-inconsistent
    BadMetadata(String),
}

impl From<IoError> for StorageError {
    fn from(ioe: IoError) -> Self {
        Self::Io(ioe)
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(ioe) => write!(f, "I/O error: {ioe}"),
            Self::IoExtra(ioe, extra) => write!(f, "I/O error while {extra}: {ioe}"),
            Self::ShortRead { expected, read } => {
                write!(f, "short read: got {read} of {expected} bytes")
            }
            Self::ShortWrite { expected, written } => {
                write!(f, "short write: put {written} of {expected} bytes")
            }
            Self::BadCommit(ioe) => write!(f, "bad commit: {ioe}"),
            Self::BadMetadata(what) => write!(f, "bad metadata: {what}"),
        }
    }
}
