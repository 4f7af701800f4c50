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

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "sparse-bench",
    about = "The SparseDB benchmark tool",
    version
)]
pub struct Cli {
    #[arg(
        short = 'f',
        long = "file",
        help = "Sets the data file to benchmark against",
        value_name = "PATH",
        default_value = "sparse-bench.db"
    )]
    pub file: String,

    #[arg(
        short = 'w',
        long = "width",
        help = "Sets the universe size to 2^WIDTH positions",
        value_name = "WIDTH",
        default_value_t = 24
    )]
    pub width: u32,

    #[arg(
        short = 'd',
        long = "density",
        help = "Inserts (universe / FACTOR) keys",
        value_name = "FACTOR",
        default_value_t = 1
    )]
    pub density: u64,

    #[arg(
        short = 's',
        long = "seed",
        help = "Sets the seed for the deterministic position stream",
        value_name = "SEED",
        default_value_t = 1234
    )]
    pub seed: u64,

    #[arg(
        long = "sync",
        help = "Opens the data file with synchronous durability",
        default_value_t = false
    )]
    pub sync: bool,

    #[arg(
        short = 'j',
        long = "json",
        help = "Sets output type to JSON",
        default_value_t = false
    )]
    pub json: bool,
}
