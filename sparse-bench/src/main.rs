/*
 * Created on Wed Apr 02 2025
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
    clap::Parser,
    env_logger::Builder,
    std::{env, process},
};

#[macro_use]
extern crate log;

mod bench;
mod cli;
mod error;
mod report;

fn main() {
    Builder::new()
        .parse_filters(&env::var("SPARSE_BENCH_LOG").unwrap_or_else(|_| "info".to_owned()))
        .init();
    if let Err(e) = run() {
        error!("sparse-bench exited with error: {}", e);
        process::exit(0x01);
    }
}

fn run() -> error::BResult<()> {
    let cli = cli::Cli::parse();
    bench::run_bench(&cli)
}
