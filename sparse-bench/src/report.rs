/*
 * Created on Sat Apr 05 2025
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

#[derive(serde::Serialize, Debug)]
/// A statistic: one timed benchmark phase
pub struct Stat {
    name: &'static str,
    keys: usize,
    seconds: f64,
    keys_per_second: f64,
}

/// The collected statistics of one full run
pub struct BenchReport {
    stats: Vec<Stat>,
}

impl BenchReport {
    /// Create a report with space for `cap` phases
    pub fn with_capacity(cap: usize) -> Self {
        Self {
            stats: Vec::with_capacity(cap),
        }
    }
    /// Record a phase: `name` took `seconds` for `keys` keys
    pub fn insert(&mut self, name: &'static str, keys: usize, seconds: f64) {
        self.stats.push(Stat {
            name,
            keys,
            seconds,
            keys_per_second: keys as f64 / seconds,
        });
    }
    /// Returns a minified JSON string
    pub fn into_json(self) -> String {
        serde_json::to_string(&self.stats).unwrap()
    }
    /// Print one line per phase
    pub fn print_table(&self) {
        for stat in &self.stats {
            println!(
                "{name:<8}{keys} keys in {seconds:.6} seconds ({rate:.0} keys/s)",
                name = stat.name,
                keys = stat.keys,
                seconds = stat.seconds,
                rate = stat.keys_per_second
            );
        }
    }
}
