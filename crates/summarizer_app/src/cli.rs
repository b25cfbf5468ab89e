use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use summarizer_logging::LogDestination;

#[derive(Debug, Parser)]
#[command(
    name = "summarize",
    version,
    about = "Summarize product reviews with the remote summarization API"
)]
pub struct Cli {
    /// Root of the summarization API.
    #[arg(long, env = "API_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// RON settings file (defaults to ./summarizer.ron when present).
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Where log output goes.
    #[arg(long, value_enum, default_value_t = LogTarget::Terminal, global = true)]
    pub log: LogTarget,

    /// Raise log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Summarize plain text given inline, from a file, or on stdin.
    Text(TextArgs),
    /// Parse a CSV of reviews locally and summarize the joined rows.
    Csv(CsvArgs),
    /// Send a .csv/.json/.jsonl file to the server for summarization.
    Upload(UploadArgs),
    /// Check that the API is reachable.
    Health,
}

#[derive(Debug, Args)]
pub struct TextArgs {
    /// Text to summarize. Read from stdin when neither TEXT nor --file is given.
    pub text: Option<String>,

    /// Read the text from a file.
    #[arg(long, conflicts_with = "text", value_name = "PATH")]
    pub file: Option<PathBuf>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct CsvArgs {
    /// CSV file with a header row (Product, ID, Original_text or text/content/review).
    pub path: PathBuf,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct UploadArgs {
    pub path: PathBuf,

    /// One summary per review instead of a single combined summary.
    #[arg(long)]
    pub separate: bool,

    /// Ask for the short summary.
    #[arg(long)]
    pub short: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args, Default)]
pub struct OutputArgs {
    /// Copy the summary to the clipboard.
    #[arg(long)]
    pub copy: bool,

    /// Save the summary as summary.txt (into DIR, default: the configured output dir).
    #[arg(long, value_name = "DIR")]
    pub download: Option<Option<PathBuf>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    Terminal,
    File,
    Both,
    Off,
}

impl From<LogTarget> for LogDestination {
    fn from(target: LogTarget) -> Self {
        match target {
            LogTarget::Terminal => LogDestination::Terminal,
            LogTarget::File => LogDestination::File,
            LogTarget::Both => LogDestination::Both,
            LogTarget::Off => LogDestination::Off,
        }
    }
}

impl Command {
    pub fn output(&self) -> Option<&OutputArgs> {
        match self {
            Command::Text(args) => Some(&args.output),
            Command::Csv(args) => Some(&args.output),
            Command::Upload(args) => Some(&args.output),
            Command::Health => None,
        }
    }
}
