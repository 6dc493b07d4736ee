//! sync-mcp-configs - keep every tool's MCP servers in step with one master list
//!
//! Usage:
//!   sync-mcp-configs                      # Sync all targets
//!   sync-mcp-configs --target cursor      # Sync selected targets only
//!   sync-mcp-configs --ignore-target codex
//!   sync-mcp-configs targets              # List known targets

mod reporter;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use mcpsync_core::prelude::*;

use crate::reporter::ConsoleReporter;

#[derive(Parser)]
#[command(name = "sync-mcp-configs")]
#[command(about = "Sync MCP server configs from the master list", long_about = None)]
#[command(version)]
struct Cli {
    /// Master config (default: ~/.config/mcp/mcp-master.json)
    #[arg(long, global = true)]
    master: Option<PathBuf>,

    /// Home directory all target paths are resolved against
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    /// Only sync these targets (repeatable)
    #[arg(long = "target", value_name = "ID")]
    targets: Vec<String>,

    /// Skip these targets (repeatable)
    #[arg(long = "ignore-target", value_name = "ID", conflicts_with = "targets")]
    ignore_targets: Vec<String>,

    /// Report through the log instead of the console
    #[arg(long, short)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List known targets with their destination paths
    Targets,
}

impl Cli {
    fn app_context(&self) -> Result<AppContext> {
        let app = match &self.home {
            Some(home) => AppContext::new(home.clone()),
            None => AppContext::from_env()?,
        };
        Ok(match &self.master {
            Some(master) => app.with_master_path(master.clone()),
            None => app,
        })
    }

    fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            targets: (!self.targets.is_empty()).then(|| self.targets.clone()),
            ignore_targets: (!self.ignore_targets.is_empty()).then(|| self.ignore_targets.clone()),
        }
    }
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcpsync=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", style("Error:").red().bold());
            if let Some(hint) = err.downcast_ref::<SyncError>().and_then(SyncError::hint) {
                eprintln!("{hint}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    let service = SyncService::new(cli.app_context()?).with_options(cli.sync_options());

    match cli.command {
        Some(Commands::Targets) => run_targets(&service)?,
        None if cli.quiet => {
            service.run(&mut TracingReporter)?;
        }
        None => run_sync(&service)?,
    }
    Ok(ExitCode::SUCCESS)
}

fn run_sync(service: &SyncService) -> Result<()> {
    println!(
        "{} Syncing MCP configurations from {}",
        style("[info]").cyan(),
        service.app().master_path().display()
    );
    let mut reporter = ConsoleReporter::new(std::io::stdout());
    service.run(&mut reporter)?;
    Ok(())
}

fn run_targets(service: &SyncService) -> Result<()> {
    let targets = service.describe_targets()?;
    println!("  {:<24} {:<12} Path", "Target", "Context");
    for target in targets {
        let context = target.context.as_deref().unwrap_or("-");
        let id = if target.enabled {
            style(target.id).green()
        } else {
            style(target.id).dim()
        };
        println!(
            "  {:<24} {:<12} {}",
            id,
            context,
            target.path.display()
        );
    }
    Ok(())
}
