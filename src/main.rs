mod cli;
mod ops;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Command};

fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp_secs()
        .init();
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(1);
        }
    }
}

/// Returns `false` when a timed command failed.
async fn run() -> Result<bool> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Command::Run {
            file,
            func,
            values,
            command,
        } => {
            let passed = ops::run_command(
                &cli.out,
                &file,
                func.as_deref(),
                values.as_deref(),
                &command,
            )
            .await?;
            eprintln!(
                "{} '{}' -> {}",
                ops::result_label(passed),
                command.join(" "),
                cli.out.display()
            );
            Ok(passed)
        }

        Command::Append {
            file,
            func,
            values,
            result,
            elapsed,
        } => {
            ops::append(&cli.out, &file, &func, &values, &result, elapsed)?;
            eprintln!("Appended '{func}' to {}", cli.out.display());
            Ok(true)
        }
    }
}
