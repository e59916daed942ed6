use crate::commands::load_graph;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;
use storymate_flowchart::{FlowchartDto, NodeKind};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Project id
    pub project: String,

    /// Print the stored JSON instead of a listing
    #[arg(long)]
    pub json: bool,
}

pub fn show(args: ShowArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let graph = load_graph(&config, cwd, &args.project)?;

    if args.json {
        println!("{}", FlowchartDto::from_graph(&args.project, &graph, 0).to_json()?);
        return Ok(());
    }

    println!("{} ({} nodes)", args.project.bold(), graph.len());
    println!();

    for node in graph.nodes() {
        let kind = match node.kind {
            NodeKind::Start => node.kind.as_str().green(),
            NodeKind::Story => node.kind.as_str().normal(),
            NodeKind::Decision => node.kind.as_str().cyan(),
            NodeKind::End => node.kind.as_str().red(),
        };
        let image = if node.has_image() { " [image]" } else { "" };

        println!(
            "  {:<8} {}  {:?}{}  ({}, {})",
            kind,
            node.id.bright_white(),
            node.text,
            image.dimmed(),
            node.position.x,
            node.position.y
        );
        for target in &node.outgoing {
            println!("           {} {}", "→".dimmed(), target);
        }
    }

    Ok(())
}
