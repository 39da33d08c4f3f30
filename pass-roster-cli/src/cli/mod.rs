//! Command-line arguments

use std::path::PathBuf;

use clap::Parser;

/// Roster file processed when no `--file` is given
pub const DEFAULT_ROSTER_FILE: &str = "members.xlsx";

/// Issue Pass2U passes for every member in a roster workbook and write the
/// pass links back into its Pass_URL column.
#[derive(Debug, Parser)]
#[command(name = "pass-roster", version, about)]
pub struct Cli {
    /// Roster workbook, read and overwritten in place
    #[arg(short, long, default_value = DEFAULT_ROSTER_FILE)]
    pub file: PathBuf,

    /// Log debug output (ignored when RUST_LOG is set)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
