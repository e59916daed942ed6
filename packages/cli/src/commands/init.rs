use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::Path;
use storymate_editor::EditSession;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project id
    pub project: String,

    /// Force overwrite an existing flowchart
    #[arg(short, long)]
    pub force: bool,
}

pub fn init(args: InitArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let store = config.store(cwd);
    let path = store.path_for(&args.project)?;

    if path.exists() {
        if !args.force {
            println!(
                "{} {} already exists",
                "⚠️".yellow(),
                path.display().to_string().bright_white()
            );
            println!("Use --force to overwrite");
            return Ok(());
        }
        fs::remove_file(&path)?;
    }

    println!(
        "{}",
        format!("📝 Initializing project {}...", args.project)
            .bright_blue()
            .bold()
    );

    let mut session = EditSession::open(&args.project, store, config.editor.clone());
    session.save()?;

    for node in session.graph().nodes() {
        println!("  {} {} {}", "✓".green(), node.kind, node.id.dimmed());
    }
    println!("  {} Created {}", "✓".green(), path.display());
    println!();
    println!("Next steps:");
    println!("  1. Run: storymate add {} story --text \"...\"", args.project);
    println!("  2. Run: storymate lint {}", args.project);
    println!("  3. Run: storymate play {}", args.project);

    Ok(())
}
