//! # crossword-csp
//!
//! Fills crossword structures with words from a word list by treating every slot
//! as a variable of a constraint satisfaction problem.
//!
//! ## Usage
//!
//! ```sh
//! crossword-csp solve <STRUCTURE> <WORDS> [OUTPUT] [OPTIONS]
//! crossword-csp batch <DIR> <WORDS> [--prefix structure] [OPTIONS]
//! crossword-csp completions <SHELL>
//! ```
//!
//! A structure file has one row per line with `_` for open cells; a word list has
//! one word per line. The filled grid is printed with `█` for blocked cells and,
//! for `solve`, optionally written to `OUTPUT`. `No solution.` is printed when the
//! words cannot fill the structure.
//!
//! ## Options
//!
//! -   `--debug`: debug logging (`RUST_LOG` overrides the level).
//! -   `--verify <bool>`: re-check the returned assignment (default `true`).
//! -   `--stats <bool>`: print the statistics table (default `true`).
//! -   `--variable-selection <mrv|fixed>`
//! -   `--value-ordering <lcv|domain|shuffled>` and `--seed <u64>`
//! -   `--inference <none|mac>`

use crate::command_line::cli::{Cli, run};
use clap::Parser;
use log::error;

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the memory
/// statistics.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    let level = if cli.command.debug() { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(cli) {
        error!("{e}");
        std::process::exit(1);
    }
}
