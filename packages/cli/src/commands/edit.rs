use crate::commands::open_session;
use crate::config::Config;
use anyhow::{anyhow, bail, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use std::path::Path;
use storymate_editor::{EditorEvent, Mutation, MutationResult};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum NewNodeKind {
    Story,
    Decision,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Project id
    pub project: String,

    /// Kind of node to add
    #[arg(value_enum)]
    pub kind: NewNodeKind,

    /// Node text (defaults to a placeholder)
    #[arg(short, long)]
    pub text: Option<String>,

    /// Connect this existing node to the new one
    #[arg(short, long, value_name = "NODE_ID")]
    pub connect_from: Option<String>,
}

#[derive(Debug, Args)]
pub struct EdgeArgs {
    /// Project id
    pub project: String,

    /// Source node id
    pub from: String,

    /// Target node id
    pub to: String,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Project id
    pub project: String,

    /// Node to delete
    pub node_id: String,
}

pub fn add(args: AddArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = open_session(&config, cwd, &args.project)?;

    let node_id = session.with_editor(|editor, graph| -> Result<String> {
        let node_id = match args.kind {
            NewNodeKind::Story => editor.add_story_node(graph),
            NewNodeKind::Decision => editor.add_decision_node(graph),
        };
        if let Some(text) = &args.text {
            editor.set_node_text(graph, &node_id, text.as_str())?;
        }
        Ok(node_id)
    })?;
    println!("  {} Added {}", "✓".green(), node_id.bright_white());

    if let Some(from) = args.connect_from {
        let result = session.apply(Mutation::Connect {
            from_id: from.clone(),
            to_id: node_id.clone(),
        })?;
        report_connect(&result, &from, &node_id);
    }

    session.save()?;
    Ok(())
}

pub fn connect(args: EdgeArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = open_session(&config, cwd, &args.project)?;

    let result = session.apply(Mutation::Connect {
        from_id: args.from.clone(),
        to_id: args.to.clone(),
    })?;
    report_connect(&result, &args.from, &args.to);

    if result.is_applied() {
        session.save()?;
    }
    Ok(())
}

pub fn disconnect(args: EdgeArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = open_session(&config, cwd, &args.project)?;

    let result = session.apply(Mutation::Disconnect {
        from_id: args.from.clone(),
        to_id: args.to.clone(),
    })?;
    if !result.is_applied() {
        bail!("No edge {} -> {}", args.from, args.to);
    }

    println!("  {} Removed {} → {}", "✓".green(), args.from, args.to);
    session.save()?;
    Ok(())
}

pub fn delete(args: DeleteArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let mut session = open_session(&config, cwd, &args.project)?;

    let kind = session
        .graph()
        .find_node(&args.node_id)
        .map(|node| node.kind)
        .ok_or_else(|| anyhow!("Node not found: {}", args.node_id))?;

    let deleted = session.with_editor(|editor, graph| {
        editor.select_node(args.node_id.clone());
        editor.delete_selected_node(graph)
    });
    if !deleted {
        bail!("{} nodes cannot be deleted", kind);
    }

    println!("  {} Deleted {}", "✓".green(), args.node_id);
    session.save()?;
    Ok(())
}

fn report_connect(result: &MutationResult, from: &str, to: &str) {
    match result {
        MutationResult::Applied { events } => {
            for event in events {
                match event {
                    EditorEvent::EdgeRemoved(edge) => {
                        println!("  {} Replaced {}", "↺".yellow(), edge)
                    }
                    EditorEvent::EdgeAdded(edge) => println!("  {} Connected {}", "✓".green(), edge),
                    _ => {}
                }
            }
        }
        MutationResult::Noop { reason } => {
            println!("  {} Not connected {} → {}: {}", "⚠️".yellow(), from, to, reason)
        }
    }
}
