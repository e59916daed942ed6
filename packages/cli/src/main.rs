mod commands;
mod config;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{
    add, connect, delete, disconnect, init, lint, play, show, AddArgs, DeleteArgs, EdgeArgs,
    InitArgs, LintArgs, PlayArgs, ShowArgs,
};
use tracing_subscriber::EnvFilter;

/// StoryMate CLI - Branching story flowcharts
#[derive(Parser, Debug)]
#[command(name = "storymate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a project with a Start and an End node
    Init(InitArgs),

    /// List a project's nodes and edges
    Show(ShowArgs),

    /// Check a project's flowchart for structural problems
    Lint(LintArgs),

    /// Read the story interactively
    Play(PlayArgs),

    /// Add a Story or Decision node
    Add(AddArgs),

    /// Connect two nodes
    Connect(EdgeArgs),

    /// Remove the edge between two nodes
    Disconnect(EdgeArgs),

    /// Delete a node and its edges
    Delete(DeleteArgs),
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Init(args) => init(args, &cwd),
            Command::Show(args) => show(args, &cwd),
            Command::Lint(args) => lint(args, &cwd),
            Command::Play(args) => play(args, &cwd),
            Command::Add(args) => add(args, &cwd),
            Command::Connect(args) => connect(args, &cwd),
            Command::Disconnect(args) => disconnect(args, &cwd),
            Command::Delete(args) => delete(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}
