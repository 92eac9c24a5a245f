use std::io::{self, BufRead, Read, Write};
use std::path::PathBuf;
use std::time::Instant;
use std::fs;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use dedoku::{
    grid::Grid,
    logger,
    report::BatchReport,
    solver::{Solver, DEFAULT_MAX_ITERATIONS},
    state::{Hint, HintSource},
    units::index_of,
};
use itertools::Itertools;
use log::{debug, error, info};

#[derive(Parser, Debug)]
#[command(name = "dedoku", version, about = "Deduction-only Sudoku solver and difficulty grader")]
struct Cli {
    /// Path to a puzzle file, one puzzle per line (81 cells; digits, `.` or
    /// `0` for blanks, commas/spaces ignored). If omitted, reads stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Prompt for a placement whenever no deduction rule applies.
    #[arg(short, long)]
    assist: bool,

    /// Cap on state-machine steps per puzzle.
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: usize,

    /// Log verbosity.
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    log_level: LogLevel,

    /// Print the final report as JSON.
    #[cfg(feature = "serde")]
    #[arg(long)]
    json: bool,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

/// Interactive prompt used when `--assist` is set: shows the grid with its
/// remaining candidates and keeps asking until it has a placement targeting
/// an empty cell with a digit that cell still admits.
struct ConsolePrompt;

impl ConsolePrompt {
    /// Accepts `A5 3` (row letter A-I, column 1-9, digit) or `0 4 3`
    /// (row 0-8, column 0-8, digit).
    fn parse_line(line: &str) -> Option<(usize, usize, u8)> {
        let tokens = line.split_whitespace().collect_vec();
        match tokens.as_slice() {
            [cell, digit] => {
                let mut chars = cell.chars();
                let row_ch = chars.next()?.to_ascii_uppercase();
                let col_ch = chars.next()?;
                if chars.next().is_some() || !('A'..='I').contains(&row_ch) {
                    return None;
                }
                let col = col_ch.to_digit(10).filter(|&c| (1..=9).contains(&c))? as usize - 1;
                let digit = digit.parse::<u8>().ok().filter(|d| (1..=9).contains(d))?;
                Some((row_ch as usize - 'A' as usize, col, digit))
            }
            [row, col, digit] => {
                let row = row.parse::<usize>().ok().filter(|&r| r < 9)?;
                let col = col.parse::<usize>().ok().filter(|&c| c < 9)?;
                let digit = digit.parse::<u8>().ok().filter(|d| (1..=9).contains(d))?;
                Some((row, col, digit))
            }
            _ => None,
        }
    }
}

impl HintSource for ConsolePrompt {
    fn request_hint(&mut self, grid: &Grid) -> Result<Hint> {
        println!("No rule applies. Current grid:\n{}", grid.to_labeled_string());
        println!("{}", grid.to_candidates_string());
        let stdin = io::stdin();
        loop {
            print!("Enter a placement (e.g. `A5 3`, or `row col digit` with 0-8): ");
            io::stdout().flush()?;
            let mut line = String::new();
            if stdin.lock().read_line(&mut line)? == 0 {
                bail!("input closed while waiting for a hint");
            }
            let Some((row, col, digit)) = Self::parse_line(&line) else {
                println!("Could not parse that, try again.");
                continue;
            };
            let index = index_of(row, col);
            if !grid.is_empty(index) {
                println!("That cell already holds {}.", grid.value(index));
                continue;
            }
            if !grid.is_candidate(index, digit) {
                println!(
                    "{digit} is not possible there; candidates are {}.",
                    grid.candidate_digits(index).iter().join(", ")
                );
                continue;
            }
            return Ok(Hint { index, digit });
        }
    }
}

fn read_puzzles(input: &Option<PathBuf>) -> Result<String> {
    match input {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => {
            let mut buf = String::new();
            io::stdin().lock().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::init(cli.log_level.into())?;

    let text = read_puzzles(&cli.input)?;
    let solver = Solver::with_max_iterations(cli.max_iterations);
    let mut prompt = ConsolePrompt;
    let mut report = BatchReport::new();

    let start = Instant::now();
    for (lineno, line) in text.lines().enumerate() {
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        let grid = match Grid::parse(line) {
            Ok(grid) => grid,
            Err(err) => {
                error!("line {}: {err:#}", lineno + 1);
                continue;
            }
        };
        let hints: Option<&mut dyn HintSource> =
            cli.assist.then_some(&mut prompt as &mut dyn HintSource);
        let result = solver.solve(grid, hints)?;
        debug!("puzzle {} ({}):\n{}", lineno + 1, result.difficulty, result.grid);
        report.record(&result);
    }
    let elapsed = start.elapsed();

    #[cfg(feature = "serde")]
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    info!("{report}");
    if report.total > 0 {
        info!(
            "Solved {}/{} puzzles in {} ms ({:.2} ms per puzzle).",
            report.solved,
            report.total,
            elapsed.as_millis(),
            elapsed.as_secs_f64() * 1000.0 / report.total as f64
        );
    }
    Ok(())
}
