mod diagnostic;
mod linter;
mod rules;

pub use diagnostic::{has_errors, Diagnostic, DiagnosticLevel};
pub use linter::{lint_graph, LintOptions};
pub use rules::{
    DanglingEdgeRule, DeadEndRule, DuplicateEdgeRule, HasEndRule, IllegalEdgeRule, LintRule,
    RuleRegistry, SingleStartRule, StoryFanOutRule, UnreachableRule,
};
