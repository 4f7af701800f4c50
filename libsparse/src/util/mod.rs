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

//! Utilities shared by the engine, the tests and the tools

pub mod rng;

use core::{fmt, mem};
use std::time::Instant;

/// Fixed-width unsigned integers that group storage can pack and move around
/// as raw bytes
///
/// ## Safety
///
/// Implementors guarantee that every bit pattern is a valid value and that
/// the in-memory representation is exactly [`NumericRepr::WIDTH`] bytes with
/// no padding: the storage layer transfers these values through untyped
/// vectored I/O.
pub unsafe trait NumericRepr: Copy + PartialEq + fmt::Debug {
    /// width of one value in bytes
    const WIDTH: usize;
}

macro_rules! numeric_repr {
    ($($ty:ty),* $(,)?) => {
        $(unsafe impl NumericRepr for $ty {
            const WIDTH: usize = mem::size_of::<$ty>();
        })*
    };
}

numeric_repr!(u8, u16, u32, u64);

#[derive(Debug, Clone, Copy)]
/// A stopwatch over the system's monotonic clock
pub struct Stopwatch {
    start: Instant,
}

impl Stopwatch {
    /// Start a stopwatch right now
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
    /// Replace the start timestamp with "now"
    pub fn reset(&mut self) {
        self.start = Instant::now();
    }
    /// Seconds elapsed since start (or the last reset)
    pub fn elapsed_secs(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Stopwatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.elapsed_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::Stopwatch;
    #[test]
    fn stopwatch_moves_forward() {
        let mut t = Stopwatch::new();
        let first = t.elapsed_secs();
        assert!(first >= 0.0);
        let second = t.elapsed_secs();
        assert!(second >= first);
        t.reset();
        assert!(t.elapsed_secs() <= second + 1.0);
    }
}
