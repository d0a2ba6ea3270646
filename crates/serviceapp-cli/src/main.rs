mod commands;
mod session;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Detect installed players and push serviceapp settings into the backend.
#[derive(Parser, Debug)]
#[command(name = "serviceapp")]
#[command(version)]
struct Cli {
    /// Config file (default: platform config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to serviceapp.log in this directory
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Probe both players and print their versions
    Detect {
        #[arg(long)]
        json: bool,
    },
    /// Print the settings screen entries
    Fields {
        #[arg(long)]
        json: bool,
    },
    /// Push every target's settings to the backend
    Apply {
        /// Load the user slot and arm it for the next player instead
        #[arg(long)]
        user: bool,
        #[arg(long)]
        json: bool,
    },
    /// Show or change whether ServiceMp3 is replaced
    Replace {
        state: Option<Switch>,
    },
    /// Apply settings, persist the replacement flag and save the config
    Confirm {
        replace: Switch,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum Switch {
    On,
    Off,
}

impl Switch {
    fn enabled(self) -> bool {
        self == Switch::On
    }
}

fn init_tracing(verbose: bool, log_dir: Option<&PathBuf>) -> Option<WorkerGuard> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "serviceapp={default_level},serviceapp_core={default_level},serviceapp_detect={default_level}"
        ))
    });

    match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, "serviceapp.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.verbose, cli.log_dir.as_ref());

    let result = match cli.command {
        Command::Detect { json } => commands::detect(cli.config.as_deref(), json).await,
        Command::Fields { json } => commands::fields(cli.config.as_deref(), json).await,
        Command::Apply { user, json } => commands::apply(cli.config.as_deref(), user, json),
        Command::Replace { state } => {
            commands::replace(cli.config.as_deref(), state.map(Switch::enabled))
        }
        Command::Confirm { replace } => {
            commands::confirm(cli.config.as_deref(), replace.enabled())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("serviceapp: {e}");
            ExitCode::FAILURE
        }
    }
}
