#![allow(clippy::cast_precision_loss)]

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use crossword_csp::crossword::Crossword;
use crossword_csp::crossword::error::CrosswordError;
use crossword_csp::crossword::render::{GridView, save_grid};
use crossword_csp::csp::assignment::Assignment;
use crossword_csp::csp::backtracking::Backtracking;
use crossword_csp::csp::inference::InferenceType;
use crossword_csp::csp::solver::{DynamicConfig, SolutionStats, Solver};
use crossword_csp::csp::value_ordering::ValueOrderingType;
use crossword_csp::csp::variable_selection::VariableSelectionType;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the crossword generator.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "crossword-csp",
    version,
    about = "Fills crossword structures from a word list"
)]
pub(crate) struct Cli {
    /// The subcommand to execute.
    #[clap(subcommand)]
    pub command: Commands,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Fill one structure file.
    Solve {
        /// Path to the structure file (`_` for open cells).
        structure: PathBuf,

        /// Path to the word list, one word per line.
        words: PathBuf,

        /// Where to write the filled grid.
        output: Option<PathBuf>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Fill every structure file in a directory against one word list.
    Batch {
        /// Directory searched recursively for structure files.
        dir: PathBuf,

        /// Path to the word list, one word per line.
        words: PathBuf,

        /// Only files whose name starts with this prefix are solved.
        #[arg(long, default_value = "structure")]
        prefix: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

impl Commands {
    /// Whether debug logging was requested.
    pub(crate) const fn debug(&self) -> bool {
        match self {
            Self::Solve { common, .. } | Self::Batch { common, .. } => common.debug,
            Self::Completions { .. } => false,
        }
    }
}

/// Defines common command-line options shared across the solving subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Enable debug logging during loading and solving.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Re-check a returned assignment for completeness and consistency.
    #[arg(short, long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) verify: bool,

    /// Print problem and search statistics after solving.
    #[arg(short, long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) stats: bool,

    #[arg(long, default_value_t = VariableSelectionType::Mrv)]
    variable_selection: VariableSelectionType,

    #[arg(long, default_value_t = ValueOrderingType::Lcv)]
    value_ordering: ValueOrderingType,

    #[arg(long, default_value_t = InferenceType::None)]
    inference: InferenceType,

    /// Seed for `--value-ordering shuffled`; random when omitted.
    #[arg(long)]
    seed: Option<u64>,
}

/// Runs the parsed command.
///
/// # Errors
///
/// Any loading, verification or output error.
pub(crate) fn run(cli: Cli) -> Result<(), CrosswordError> {
    match cli.command {
        Commands::Solve {
            structure,
            words,
            output,
            common,
        } => solve_file(&structure, &words, output.as_deref(), &common).map(|_| ()),
        Commands::Batch {
            dir,
            words,
            prefix,
            common,
        } => solve_dir(&dir, &words, &prefix, &common),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "crossword-csp",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}

/// Builds a solver for `crossword` from the strategies named in `common`.
pub(crate) fn get_solver(
    common: &CommonOptions,
    crossword: &Crossword,
) -> Backtracking<DynamicConfig> {
    Backtracking::<DynamicConfig>::from_parts(
        crossword.puzzle.clone(),
        crossword.dictionary.clone(),
        common.variable_selection.to_impl(),
        common.value_ordering.to_impl(common.seed),
        common.inference.to_impl(),
    )
}

/// Loads a structure and a word list, solves and reports.
///
/// # Returns
///
/// Whether a solution was found.
///
/// # Errors
///
/// If either file cannot be loaded, the solution fails verification or the output
/// cannot be written.
pub(crate) fn solve_file(
    structure: &Path,
    words: &Path,
    output: Option<&Path>,
    common: &CommonOptions,
) -> Result<bool, CrosswordError> {
    let time = Instant::now();
    let crossword = Crossword::load(structure, words)?;
    let parse_time = time.elapsed();

    solve_and_report(&crossword, common, Some(structure), parse_time, output)
}

/// Solves every file under `dir` whose name starts with `prefix`.
///
/// The word list is read once and shared. Files that fail to load are reported and
/// skipped.
///
/// # Errors
///
/// If `dir` is not a directory, the word list cannot be loaded or a solution fails
/// verification.
pub(crate) fn solve_dir(
    dir: &Path,
    words: &Path,
    prefix: &str,
    common: &CommonOptions,
) -> Result<(), CrosswordError> {
    if !dir.is_dir() {
        return Err(CrosswordError::NotADirectory(dir.to_path_buf()));
    }

    let dictionary = crossword_csp::crossword::words::parse_words_file(words)?;
    let mut solved = 0;
    let mut total = 0;

    for entry in walkdir::WalkDir::new(dir).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in {}: {e}", dir.display());
                continue;
            }
        };
        let path = entry.path();
        if !entry.file_type().is_file()
            || !entry.file_name().to_string_lossy().starts_with(prefix)
        {
            debug!("Skipping {}", path.display());
            continue;
        }

        let time = Instant::now();
        let puzzle = match crossword_csp::crossword::structure::parse_structure_file(path) {
            Ok(puzzle) => puzzle,
            Err(e) => {
                warn!("Skipping {}: {e}", path.display());
                continue;
            }
        };
        let crossword = Crossword {
            puzzle,
            dictionary: dictionary.clone(),
        };
        let parse_time = time.elapsed();

        total += 1;
        if solve_and_report(&crossword, common, Some(path), parse_time, None)? {
            solved += 1;
        }
    }

    info!("Solved {solved} of {total} structures in {}", dir.display());
    Ok(())
}

/// Checks a solution against the crossword it claims to fill.
///
/// # Errors
///
/// `CrosswordError::VerificationFailed` if the assignment is incomplete or breaks a
/// constraint.
pub(crate) fn verify_solution(
    crossword: &Crossword,
    sol: Option<&Assignment>,
) -> Result<(), CrosswordError> {
    if let Some(assignment) = sol {
        crossword.verify(assignment)?;
        println!("Verified: true");
    }
    Ok(())
}

/// Solves `crossword` with the strategies named in `common`.
///
/// # Returns
///
/// The solution if one exists, the time spent solving and the solver statistics.
pub(crate) fn solve(
    crossword: &Crossword,
    common: &CommonOptions,
    label: Option<&Path>,
) -> (Option<Assignment>, Duration, SolutionStats) {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    debug!(
        "{}x{} grid, {} variables, {} words",
        crossword.puzzle.height(),
        crossword.puzzle.width(),
        crossword.puzzle.num_variables(),
        crossword.dictionary.len()
    );
    debug!(
        "strategies: {} / {} / {}",
        common.variable_selection, common.value_ordering, common.inference
    );

    let time = Instant::now();
    let mut solver = get_solver(common, crossword);
    let sol = solver.solve();
    let elapsed = time.elapsed();

    debug!("Time: {elapsed:?}");

    (sol, elapsed, solver.stats())
}

/// Solves, verifies, prints and optionally saves one crossword.
///
/// # Returns
///
/// Whether a solution was found.
///
/// # Errors
///
/// If verification fails or the grid cannot be written to `output`.
pub(crate) fn solve_and_report(
    crossword: &Crossword,
    common: &CommonOptions,
    label: Option<&Path>,
    parse_time: Duration,
    output: Option<&Path>,
) -> Result<bool, CrosswordError> {
    let (sol, elapsed, solver_stats) = solve(crossword, common, label);

    let (allocated_mib, resident_mib) = memory_usage().unwrap_or_default();

    if common.verify {
        verify_solution(crossword, sol.as_ref())?;
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            crossword,
            &solver_stats,
            allocated_mib,
            resident_mib,
        );
    }

    let Some(assignment) = sol else {
        println!("No solution.");
        return Ok(false);
    };

    let view = GridView::new(&crossword.puzzle, &crossword.dictionary, &assignment);
    print!("{view}");

    if let Some(path) = output {
        save_grid(path, &view)?;
        info!("Saved grid to {}", path.display());
    }

    Ok(true)
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
fn memory_usage() -> Option<(f64, f64)> {
    const MIB: f64 = 1024.0 * 1024.0;

    epoch::advance().ok()?;
    let allocated = stats::allocated::read().ok()?;
    let resident = stats::resident::read().ok()?;
    Some((allocated as f64 / MIB, resident as f64 / MIB))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    crossword: &Crossword,
    s: &SolutionStats,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let puzzle = &crossword.puzzle;

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line("Grid", format!("{}x{}", puzzle.height(), puzzle.width()));
    stat_line("Variables", puzzle.num_variables());
    stat_line("Arcs", puzzle.arcs().count());
    stat_line("Words", crossword.dictionary.len());

    println!("=====================[ Consistency Statistics ]======================");
    stat_line("Node-pruned values", s.node_pruned);
    stat_line("Arc-pruned values", s.arc_pruned);
    stat_line("Arc revisions", s.revisions);
    stat_line_with_rate("Arcs processed", s.arcs_processed, elapsed_secs);
    stat_line("Arc consistent", s.arc_consistent);

    println!("========================[ Search Statistics ]========================");
    stat_line("Search invoked", s.search_invoked);
    stat_line_with_rate("Consistency checks", s.consistency_checks, elapsed_secs);
    stat_line_with_rate("Assignments", s.assignments, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line("Max depth", s.max_depth);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_solve_command() {
        let cli = Cli::try_parse_from([
            "crossword-csp",
            "solve",
            "structure.txt",
            "words.txt",
            "out.txt",
            "--inference",
            "mac",
            "--value-ordering",
            "shuffled",
            "--seed",
            "3",
            "--stats",
            "false",
        ])
        .unwrap();

        let Commands::Solve {
            structure,
            output,
            common,
            ..
        } = cli.command
        else {
            panic!("expected solve");
        };
        assert_eq!(structure, PathBuf::from("structure.txt"));
        assert_eq!(output, Some(PathBuf::from("out.txt")));
        assert_eq!(common.inference, InferenceType::Mac);
        assert_eq!(common.value_ordering, ValueOrderingType::Shuffled);
        assert_eq!(common.seed, Some(3));
        assert!(!common.stats);
        assert!(common.verify);
    }

    #[test]
    fn test_parse_batch_defaults() {
        let cli = Cli::try_parse_from(["crossword-csp", "batch", "data", "words.txt"]).unwrap();
        assert!(!cli.command.debug());
        let Commands::Batch { prefix, common, .. } = cli.command else {
            panic!("expected batch");
        };
        assert_eq!(prefix, "structure");
        assert_eq!(common.variable_selection, VariableSelectionType::Mrv);
        assert_eq!(common.value_ordering, ValueOrderingType::Lcv);
        assert_eq!(common.inference, InferenceType::None);
    }

    #[test]
    fn test_solve_and_report() {
        let crossword = Crossword {
            puzzle: crossword_csp::csp::puzzle::Puzzle::from_rows(&[
                vec![true, true, true],
                vec![false, false, true],
                vec![false, false, true],
            ]),
            dictionary: ["CAT", "TEA", "ATE"].into_iter().collect(),
        };
        let common = CommonOptions {
            verify: true,
            ..CommonOptions::default()
        };
        assert!(solve_and_report(&crossword, &common, None, Duration::ZERO, None).unwrap());

        let crossword = Crossword {
            dictionary: ["CAT", "DOG"].into_iter().collect(),
            ..crossword
        };
        assert!(!solve_and_report(&crossword, &common, None, Duration::ZERO, None).unwrap());
    }

    #[test]
    fn test_solve_dir_rejects_files() {
        assert!(matches!(
            solve_dir(
                Path::new("Cargo.toml"),
                Path::new("words.txt"),
                "structure",
                &CommonOptions::default()
            ),
            Err(CrosswordError::NotADirectory(_))
        ));
    }

    #[test]
    fn test_solve_dir_skips_unusable_entries() {
        let dir = std::env::temp_dir().join(format!("crossword-batch-{}", std::process::id()));
        std::fs::create_dir_all(dir.join("structure_dir")).unwrap();
        std::fs::write(dir.join("structure0.txt"), "___\n##_\n##_\n").unwrap();
        std::fs::write(dir.join("structure1.txt"), "").unwrap();
        std::fs::write(dir.join("notes.txt"), "not a structure").unwrap();
        let words = dir.join("words.txt");
        std::fs::write(&words, "cat\ntea\nate\n").unwrap();

        let common = CommonOptions {
            verify: true,
            stats: false,
            ..CommonOptions::default()
        };
        let result = solve_dir(&dir, &words, "structure", &common);
        std::fs::remove_dir_all(&dir).unwrap();

        assert!(result.is_ok());
    }
}
