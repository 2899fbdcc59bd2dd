use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rowlog", about = "Time calls and log them to a Markdown table")]
pub struct Cli {
    /// Markdown table to append to
    #[arg(
        long,
        env = "ROWLOG_OUT",
        default_value = "reports/timings.md",
        global = true
    )]
    pub out: PathBuf,

    /// Log directory and header creation to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Time a command and record pass/fail by its exit status
    Run {
        /// Source file label
        #[arg(long)]
        file: String,
        /// Function label [default: the program name]
        #[arg(long)]
        func: Option<String>,
        /// Test values as JSON [default: the command's arguments]
        #[arg(long)]
        values: Option<String>,
        /// Command to run, after `--`
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Append a row with caller-supplied fields
    Append {
        /// Source file label
        #[arg(long)]
        file: String,
        /// Function label
        #[arg(long)]
        func: String,
        /// Test values as JSON
        #[arg(long, default_value = "null")]
        values: String,
        /// Result label
        #[arg(long)]
        result: String,
        /// Elapsed time in seconds
        #[arg(long)]
        elapsed: f64,
    },
}
