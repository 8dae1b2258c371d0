//! Acuity CLI - Command-line triage console
//!
//! Usage:
//!   acuity                          - Start an interactive assessment
//!   acuity complaints [id]          - List presenting complaints
//!   acuity levels                   - Show the urgency level table
//!   acuity classify -c <id> [-d <id>]... [vitals]  - Classify one patient

use clap::{Parser, Subcommand};
use cli::commands::{ClassifyCommand, ComplaintsCommand, LevelsCommand};
use cli::interactive::InteractiveCli;
use cli::load_engine;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "acuity")]
#[command(about = "Acuity - Emergency triage classification")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Triage configuration file (JSON or YAML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Protocol catalog file (JSON or YAML)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List presenting complaints and their discriminators
    Complaints(ComplaintsCommand),
    /// Show urgency levels and target response times
    Levels(LevelsCommand),
    /// Classify a patient from the command line
    Classify(ClassifyCommand),
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let engine = load_engine(cli.config.as_deref(), cli.catalog.as_deref())?;

    match cli.command {
        Some(Commands::Complaints(cmd)) => cmd.run(&engine, cli.json),
        Some(Commands::Levels(cmd)) => cmd.run(&engine, cli.json),
        Some(Commands::Classify(cmd)) => cmd.run(&engine, cli.json),
        None => {
            // No subcommand - start interactive mode
            let mut interactive = InteractiveCli::new(engine);
            interactive.run()
        }
    }
}
