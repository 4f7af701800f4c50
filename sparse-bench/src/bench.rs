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

//! # Benchmark routines
//!
//! One run times five phases against a fresh data file: fill the index from
//! the deterministic position stream, replay the stream through `get`,
//! serialize to disk, clear, and deserialize back. Re-seeding the engine
//! between the fill and get phases revisits the exact positions that were
//! inserted.

use {
    crate::{
        cli::Cli,
        error::{BResult, Error},
        report::BenchReport,
    },
    libsparse::{storage::error::ErrorContext, DataFile, SparseIndex, Stopwatch, Xorshift128},
};

pub fn run_bench(cli: &Cli) -> BResult<()> {
    if cli.width >= u64::BITS {
        return Err(Error::Config(format!(
            "width must be below {}, got {}",
            u64::BITS,
            cli.width
        )));
    }
    if cli.density == 0 {
        return Err(Error::Config("density factor must be nonzero".to_owned()));
    }
    if cli.seed == 0 {
        return Err(Error::Config("seed must be nonzero".to_owned()));
    }
    let universe = 1usize << cli.width;
    let keys = universe / cli.density as usize;
    info!("sparse index universe: {universe} positions; inserting {keys} keys");

    let mut file = if cli.sync {
        let mut file =
            DataFile::open_sync(&cli.file).map_err_context("opening the data file")?;
        file.truncate().map_err_context("truncating the data file")?;
        file
    } else {
        DataFile::open_truncated(&cli.file).map_err_context("opening the data file")?
    };

    let mut idx: SparseIndex<u64> = SparseIndex::new(universe);
    let mut gen = Xorshift128::seeded(cli.seed);
    let mut report = BenchReport::with_capacity(5);
    let mut t = Stopwatch::new();

    // fill the index
    for i in 0..keys {
        idx.insert(draw(&mut gen, universe), i as u64);
    }
    report.insert("ADD", keys, t.elapsed_secs());
    debug!("populated {} distinct positions", idx.num_nonempty());

    // replay the stream
    gen.reseed(cli.seed);
    t.reset();
    let mut found = 0usize;
    for _ in 0..keys {
        found += idx.get(draw(&mut gen, universe)).is_some() as usize;
    }
    report.insert("GET", keys, t.elapsed_secs());
    debug!("lookups found {found} populated positions");

    // serialize
    t.reset();
    idx.write(&mut file)?;
    report.insert("WRITE", keys, t.elapsed_secs());

    // drop the in-memory image
    t.reset();
    idx.clear();
    report.insert("CLEAR", keys, t.elapsed_secs());

    file.close()?;
    let mut file = DataFile::open(&cli.file).map_err_context("reopening the data file")?;

    // deserialize
    t.reset();
    idx.read(&mut file)?;
    report.insert("READ", keys, t.elapsed_secs());
    file.close()?;
    debug!("restored {} populated positions", idx.num_nonempty());

    if cli.json {
        println!("{}", report.into_json());
    } else {
        report.print_table();
    }
    Ok(())
}

fn draw(gen: &mut Xorshift128, universe: usize) -> usize {
    // a power-of-two universe divides the word range evenly, so the modulo
    // draw is exactly uniform
    (gen.next_u64() % universe as u64) as usize
}
