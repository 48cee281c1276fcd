mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{export, init, lint, render, ExportArgs, InitArgs, LintArgs, RenderArgs};
use tracing_subscriber::EnvFilter;

/// Mailframe CLI - build, render and check email designs
#[derive(Parser, Debug)]
#[command(name = "mailframe")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Initialize a new Mailframe project
    Init(InitArgs),

    /// Render design JSON to email HTML
    Render(RenderArgs),

    /// Export a design as HTML plus JSON in one result
    Export(ExportArgs),

    /// Check designs for structural and email-client problems
    Lint(LintArgs),
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| {
            let cwd = cwd.display().to_string();
            match cli.command {
                Command::Init(args) => init(args, &cwd),
                Command::Render(args) => render(args, &cwd),
                Command::Export(args) => export(args, &cwd),
                Command::Lint(args) => lint(args, &cwd),
            }
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
