mod edges;
mod flow;
mod structure;

pub use edges::{DanglingEdgeRule, DuplicateEdgeRule, IllegalEdgeRule};
pub use flow::{DeadEndRule, StoryFanOutRule, UnreachableRule};
pub use structure::{HasEndRule, SingleStartRule};

use crate::diagnostic::Diagnostic;
use storymate_flowchart::{Graph, Node};

/// Trait for implementing lint rules
pub trait LintRule {
    /// Unique identifier for this rule
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// Check the graph as a whole
    fn check_graph(&self, _graph: &Graph) -> Vec<Diagnostic> {
        Vec::new()
    }

    /// Check a single node in the context of its graph
    fn check_node(&self, _node: &Node, _graph: &Graph) -> Vec<Diagnostic> {
        Vec::new()
    }
}

/// Registry of all available lint rules
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl RuleRegistry {
    /// Create a new registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                Box::new(SingleStartRule),
                Box::new(HasEndRule),
                Box::new(DanglingEdgeRule),
                Box::new(IllegalEdgeRule),
                Box::new(DuplicateEdgeRule),
                Box::new(DeadEndRule),
                Box::new(UnreachableRule),
                Box::new(StoryFanOutRule),
            ],
        }
    }

    /// Get all registered rules
    pub fn rules(&self) -> &[Box<dyn LintRule>] {
        &self.rules
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a custom rule to the registry
    pub fn add_rule(&mut self, rule: Box<dyn LintRule>) {
        self.rules.push(rule);
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}
