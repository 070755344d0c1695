use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

use codesurvey::config::{DEFAULT_MAX_FILE_SIZE, DEFAULT_OUTPUT};
use codesurvey::core::CodebaseAnalyzer;
use codesurvey::{AnalyzerConfig, LogConfig, PathMode};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "codesurvey",
    version = "0.1.0",
    author = "codesurvey developers",
    about = "Survey a source tree: directory layout, symbols and readme text in one JSON file"
)]
struct Cli {
    /// Directory to scan
    #[arg(value_name = "ROOT", default_value = ".")]
    root: PathBuf,

    /// Output file path
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// How files are keyed in the report
    #[arg(long, value_enum, default_value_t = PathModeArg::Relative)]
    path_mode: PathModeArg,

    /// Directory bare file names are opened from (file-name mode only)
    #[arg(long, value_name = "DIR")]
    working_dir: Option<PathBuf>,

    /// Descend into symlinked directories
    #[arg(long)]
    follow_symlinks: bool,

    /// Skip files larger than this many bytes (0 = no limit)
    #[arg(long, value_name = "BYTES", default_value_t = DEFAULT_MAX_FILE_SIZE)]
    max_file_size: u64,

    /// Debug output
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Errors only
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, ValueEnum)]
#[value(rename_all = "kebab-case")]
enum PathModeArg {
    Relative,
    FileName,
}

impl From<PathModeArg> for PathMode {
    fn from(arg: PathModeArg) -> Self {
        match arg {
            PathModeArg::Relative => PathMode::Relative,
            PathModeArg::FileName => PathMode::FileName,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

fn run(cli: Cli) -> Result<()> {
    let level = if cli.verbose {
        LevelFilter::DEBUG
    } else if cli.quiet {
        LevelFilter::ERROR
    } else {
        LevelFilter::INFO
    };

    let mut config = AnalyzerConfig::new(cli.root)
        .with_output(cli.output)
        .with_path_mode(cli.path_mode.into())
        .with_follow_symlinks(cli.follow_symlinks)
        .with_max_file_size(cli.max_file_size)
        .with_log(LogConfig::new(level));
    if let Some(working_dir) = cli.working_dir {
        config = config.with_working_dir(working_dir);
    }

    // Save failures are logged inside the run; the exit status stays zero.
    CodebaseAnalyzer::new(config)?.run();
    Ok(())
}
