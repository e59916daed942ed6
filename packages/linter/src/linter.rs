use crate::diagnostic::Diagnostic;
use crate::rules::RuleRegistry;
use storymate_flowchart::Graph;

/// Options for configuring the linter
#[derive(Debug, Default)]
pub struct LintOptions {
    /// Custom rule registry (uses default if None)
    pub registry: Option<RuleRegistry>,

    /// Rule names to skip
    pub disabled: Vec<String>,
}

/// Lint a flowchart and return diagnostics, most severe first.
///
/// Graph-wide checks run before per-node checks; within a level the order
/// follows the registry and then node order.
pub fn lint_graph(graph: &Graph, options: LintOptions) -> Vec<Diagnostic> {
    let registry = options.registry.unwrap_or_default();
    let rules: Vec<_> = registry
        .rules()
        .iter()
        .filter(|rule| !options.disabled.iter().any(|name| name == rule.name()))
        .collect();

    let mut diagnostics = Vec::new();

    for rule in &rules {
        diagnostics.extend(rule.check_graph(graph));
    }

    for node in graph.nodes() {
        for rule in &rules {
            diagnostics.extend(rule.check_node(node, graph));
        }
    }

    diagnostics.sort_by_key(|diagnostic| diagnostic.level);
    diagnostics
}
