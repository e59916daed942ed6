use crate::commands::load_graph;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::Path;
use storymate_flowchart::Graph;
use storymate_preview::{choice_label, node_title, PreviewError, Step, StoryWalker};

#[derive(Debug, Args)]
pub struct PlayArgs {
    /// Project id
    pub project: String,
}

pub fn play(args: PlayArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let graph = load_graph(&config, cwd, &args.project)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    run_play(&graph, stdin.lock(), stdout.lock())
}

/// Play the story, reading one command per line.
///
/// A number picks a choice, `b` goes back, `r` restarts and `q` quits.
/// Input ending also quits.
pub fn run_play<R: BufRead, W: Write>(graph: &Graph, input: R, mut output: W) -> Result<()> {
    let mut walker = match StoryWalker::start(graph) {
        Ok(walker) => walker,
        Err(PreviewError::NoStartNode) => {
            writeln!(output, "{} No starting node found", "⚠️".yellow())?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let mut lines = input.lines();
    loop {
        let step = render(graph, &walker, &mut output)?;
        write!(output, "> ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            return Ok(());
        };
        let line = line?;

        match line.trim() {
            "q" => return Ok(()),
            "b" => {
                if !walker.back() {
                    writeln!(output, "{}", "Already at the start".dimmed())?;
                }
            }
            "r" => walker.restart(graph)?,
            choice => {
                let targets = step.targets();
                match choice.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
                    Some(index) if index < targets.len() => {
                        walker.advance(targets[index].id.clone())
                    }
                    _ => writeln!(output, "{}", "Unknown choice".dimmed())?,
                }
            }
        }
    }
}

fn render<W: Write>(graph: &Graph, walker: &StoryWalker, output: &mut W) -> Result<Step> {
    let node = walker.current_node(graph)?;
    let step = walker.step(graph)?;

    writeln!(output)?;
    writeln!(output, "{}", node_title(node.kind).bold())?;
    writeln!(output, "{}", node.text)?;
    writeln!(output)?;

    match &step {
        Step::Choices(nodes) => {
            writeln!(output, "{}", "Choose your path:".cyan())?;
            for (i, choice) in nodes.iter().enumerate() {
                writeln!(output, "  {}. {}", i + 1, choice_label(choice))?;
            }
        }
        Step::Continue(_) => writeln!(output, "  1. Continue")?,
        Step::DeadEnd(message) => writeln!(output, "{} {}", "⚠️".yellow(), message)?,
        Step::End => writeln!(output, "{}", "THE END (r to restart)".green().bold())?,
    }

    Ok(step)
}
