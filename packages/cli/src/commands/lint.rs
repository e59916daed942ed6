use crate::commands::load_graph;
use crate::config::Config;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::path::Path;
use storymate_linter::{lint_graph, Diagnostic, DiagnosticLevel, LintOptions};

#[derive(Args, Debug)]
pub struct LintArgs {
    /// Project id
    pub project: String,

    /// Show all diagnostics including info level
    #[arg(short, long)]
    pub all: bool,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,

    /// Rules to skip
    #[arg(long = "disable", value_name = "RULE")]
    pub disabled: Vec<String>,
}

pub fn lint(args: LintArgs, cwd: &Path) -> Result<()> {
    let config = Config::load(cwd)?;
    let graph = load_graph(&config, cwd, &args.project)?;

    let diagnostics = lint_graph(
        &graph,
        LintOptions {
            registry: None,
            disabled: args.disabled.clone(),
        },
    );

    let errors = count(&diagnostics, DiagnosticLevel::Error);
    let warnings = count(&diagnostics, DiagnosticLevel::Warning);

    if args.format == "json" {
        println!("{}", serde_json::to_string_pretty(&diagnostics)?);
    } else {
        print_text(&args, &diagnostics);

        println!(
            "✨ {} Linting complete!",
            if errors > 0 {
                "Done".red().bold()
            } else {
                "Done".green().bold()
            }
        );
        println!("   Nodes checked: {}", graph.len());
        if errors > 0 {
            println!("   {} {}", "Errors:".red(), errors);
        }
        if warnings > 0 {
            println!("   {} {}", "Warnings:".yellow(), warnings);
        }
        if errors == 0 && warnings == 0 {
            println!("   {} No issues found!", "✓".green());
        }
    }

    // Exit with error code if there are errors
    if errors > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn print_text(args: &LintArgs, diagnostics: &[Diagnostic]) {
    println!("{}", args.project.bold());

    for diagnostic in diagnostics {
        if !args.all && diagnostic.level == DiagnosticLevel::Info {
            continue;
        }

        let level_str = match diagnostic.level {
            DiagnosticLevel::Error => "error".red().bold(),
            DiagnosticLevel::Warning => "warning".yellow().bold(),
            DiagnosticLevel::Info => "info".blue().bold(),
        };

        println!("  {} [{}] {}", level_str, diagnostic.rule, diagnostic.message);

        if let Some(suggestion) = &diagnostic.suggestion {
            println!("    {} {}", "💡".dimmed(), suggestion.dimmed());
        }
    }

    println!();
}

fn count(diagnostics: &[Diagnostic], level: DiagnosticLevel) -> usize {
    diagnostics.iter().filter(|d| d.level == level).count()
}
