//! formkit - headless runner for the staff-management demo forms

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use formkit_app::{demo_page, run_loaded_scenario, Scenario};
use formkit_widgets::FormsConfig;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "formkit")]
#[command(about = "Headless runner for formkit demo forms")]
#[command(version)]
struct Cli {
    /// Widget configuration (TOML)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the rendered demo forms as JSON
    Demo,

    /// Play a scenario against the demo forms
    Run {
        /// Scenario file (JSON)
        scenario: PathBuf,

        /// Also write the report to this relative path
        #[arg(long, value_name = "PATH")]
        report: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Demo => {
            let page = demo_page(config);
            let views = serde_json::to_string_pretty(&page.views())?;
            println!("{views}");
            Ok(ExitCode::SUCCESS)
        }
        Command::Run { scenario, report } => {
            let loaded = Scenario::from_path(&scenario)?;
            tracing::info!(scenario = %scenario.display(), steps = loaded.steps.len(), "running scenario");

            let outcome = run_loaded_scenario(&loaded, config)?;
            outcome.report().write_to_writer(&mut io::stdout().lock())?;
            if let Some(path) = report {
                outcome.report().write_to_path(&path)?;
                tracing::info!(path = %path.display(), "report written");
            }

            if outcome.is_failed() {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<FormsConfig> {
    match path {
        Some(path) => Ok(FormsConfig::from_path(path)?),
        None => Ok(FormsConfig::default()),
    }
}
