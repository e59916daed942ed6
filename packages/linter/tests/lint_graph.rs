use storymate_flowchart::{Graph, Node, NodeKind, Point};
use storymate_linter::{
    has_errors, lint_graph, Diagnostic, DiagnosticLevel, LintOptions, LintRule, RuleRegistry,
};

fn node(id: &str, kind: NodeKind, outgoing: &[&str]) -> Node {
    let mut node = Node::new(id, kind, id, Point::ZERO);
    node.outgoing = outgoing.iter().map(|id| id.to_string()).collect();
    node
}

fn rules_hit(diagnostics: &[Diagnostic]) -> Vec<&str> {
    diagnostics.iter().map(|d| d.rule.as_str()).collect()
}

#[test]
fn test_clean_story_has_no_diagnostics() {
    let graph = Graph::from_nodes([
        node("s", NodeKind::Start, &["a"]),
        node("a", NodeKind::Story, &["d"]),
        node("d", NodeKind::Decision, &["e", "b"]),
        node("b", NodeKind::Story, &["e"]),
        node("e", NodeKind::End, &[]),
    ])
    .unwrap();

    assert!(lint_graph(&graph, LintOptions::default()).is_empty());
}

#[test]
fn test_errors_sorted_first() {
    let graph = Graph::from_nodes([
        node("a", NodeKind::Story, &[]),
        node("s", NodeKind::Start, &["ghost"]),
    ])
    .unwrap();

    let diagnostics = lint_graph(&graph, LintOptions::default());
    assert!(has_errors(&diagnostics));

    let levels: Vec<_> = diagnostics.iter().map(|d| d.level).collect();
    let mut sorted = levels.clone();
    sorted.sort();
    assert_eq!(levels, sorted);

    let rules = rules_hit(&diagnostics);
    assert!(rules.contains(&"has-end"));
    assert!(rules.contains(&"dangling-edge"));
    assert!(rules.contains(&"unreachable"));
}

#[test]
fn test_disabled_rules_are_skipped() {
    let graph = Graph::from_nodes([node("s", NodeKind::Start, &[])]).unwrap();
    let options = LintOptions {
        disabled: vec!["has-end".to_string(), "dead-end".to_string()],
        ..Default::default()
    };

    assert!(lint_graph(&graph, options).is_empty());
}

struct LongTextRule;

impl LintRule for LongTextRule {
    fn name(&self) -> &'static str {
        "long-text"
    }

    fn description(&self) -> &'static str {
        "Keep node text short"
    }

    fn check_node(&self, node: &Node, _graph: &Graph) -> Vec<Diagnostic> {
        if node.text.len() > 10 {
            vec![Diagnostic::info(self.name(), "Long text").with_node(node.id.clone())]
        } else {
            Vec::new()
        }
    }
}

#[test]
fn test_custom_registry() {
    let mut registry = RuleRegistry::empty();
    registry.add_rule(Box::new(LongTextRule));

    let graph = Graph::from_nodes([node("a-very-long-id", NodeKind::Story, &[])]).unwrap();
    let diagnostics = lint_graph(
        &graph,
        LintOptions {
            registry: Some(registry),
            ..Default::default()
        },
    );

    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].level, DiagnosticLevel::Info);
    assert!(!has_errors(&diagnostics));
}

#[test]
fn test_diagnostic_json_shape() {
    let diagnostic = Diagnostic::warning("dead-end", "stuck").with_node("a");
    let json = serde_json::to_value(&diagnostic).unwrap();

    assert_eq!(
        json,
        serde_json::json!({
            "level": "warning",
            "rule": "dead-end",
            "message": "stuck",
            "nodeId": "a"
        })
    );
}
