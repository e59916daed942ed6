//! Preview walker scenarios over small hand-built stories

use storymate_flowchart::{Graph, Node, NodeKind, Point};
use storymate_preview::{available_choices, PreviewError, Step, StoryWalker};

fn add(graph: &mut Graph, id: &str, kind: NodeKind) {
    graph
        .add_node(Node::new(id, kind, id.to_uppercase(), Point::ZERO))
        .unwrap();
}

fn ids(nodes: Vec<&Node>) -> Vec<String> {
    nodes.into_iter().map(|node| node.id.clone()).collect()
}

fn linear_story() -> Graph {
    let mut graph = Graph::new();
    add(&mut graph, "start", NodeKind::Start);
    add(&mut graph, "a", NodeKind::Story);
    add(&mut graph, "end", NodeKind::End);
    assert!(graph.connect("start", "a").is_connected());
    assert!(graph.connect("a", "end").is_connected());
    graph
}

fn branching_story() -> Graph {
    let mut graph = Graph::new();
    add(&mut graph, "start", NodeKind::Start);
    add(&mut graph, "a", NodeKind::Story);
    add(&mut graph, "d1", NodeKind::Decision);
    add(&mut graph, "d2", NodeKind::Decision);
    add(&mut graph, "b", NodeKind::Story);
    add(&mut graph, "end", NodeKind::End);

    for (from, to) in [
        ("start", "a"),
        ("a", "d1"),
        ("a", "d2"),
        ("d1", "end"),
        ("d2", "b"),
        ("b", "end"),
    ] {
        assert!(graph.connect(from, to).is_connected(), "{from} -> {to}");
    }
    graph
}

#[test]
fn test_linear_story() {
    let graph = linear_story();

    assert_eq!(ids(available_choices(&graph, "start")), ["a"]);
    assert_eq!(ids(available_choices(&graph, "a")), ["end"]);
    assert!(available_choices(&graph, "end").is_empty());

    let mut walker = StoryWalker::start(&graph).unwrap();
    while let Step::Continue(next) = walker.step(&graph).unwrap() {
        walker.advance(next.id);
    }
    assert_eq!(walker.step(&graph).unwrap(), Step::End);
    assert_eq!(walker.history(), ["start", "a", "end"]);
}

#[test]
fn test_branching_story() {
    let graph = branching_story();
    let mut walker = StoryWalker::start(&graph).unwrap();

    walker.advance("a");
    assert_eq!(ids(walker.available_choices(&graph)), ["d1", "d2"]);

    walker.advance("d2");
    assert_eq!(ids(walker.available_choices(&graph)), ["b"]);
    assert!(matches!(walker.step(&graph).unwrap(), Step::Choices(ref nodes) if nodes.len() == 1));

    walker.advance("b");
    assert_eq!(walker.step(&graph).unwrap(), Step::Continue(graph.find_node("end").unwrap().clone()));

    walker.advance("end");
    assert_eq!(walker.step(&graph).unwrap(), Step::End);
}

#[test]
fn test_decision_keeps_edge_order() {
    let mut graph = Graph::new();
    add(&mut graph, "d", NodeKind::Decision);
    for id in ["z", "m", "a"] {
        add(&mut graph, id, NodeKind::Story);
    }
    add(&mut graph, "end", NodeKind::End);
    for to in ["m", "end", "z", "a"] {
        graph.connect("d", to);
    }

    assert_eq!(ids(available_choices(&graph, "d")), ["m", "end", "z", "a"]);
}

#[test]
fn test_same_choices_same_path() {
    let graph = branching_story();
    let play = || {
        let mut walker = StoryWalker::start(&graph).unwrap();
        for choice in ["a", "d2", "b", "end"] {
            walker.advance(choice);
        }
        walker
    };

    let first = play();
    for _ in 0..10 {
        assert_eq!(play(), first);
    }
    assert_eq!(first.current(), "end");
}

#[test]
fn test_restart_from_end() {
    let graph = linear_story();
    let mut walker = StoryWalker::start(&graph).unwrap();
    walker.advance("a");
    walker.advance("end");

    walker.restart(&graph).unwrap();
    assert_eq!(walker.current(), "start");
    assert_eq!(walker.history(), ["start"]);
}

#[test]
fn test_restart_without_start_keeps_position() {
    let graph = linear_story();
    let mut walker = StoryWalker::start(&graph).unwrap();
    walker.advance("a");

    let mut broken = graph.clone();
    broken.remove_node("start");

    assert_eq!(walker.restart(&broken), Err(PreviewError::NoStartNode));
    assert_eq!(walker.current(), "a");
}

#[test]
fn test_removed_current_node_is_reported() {
    let graph = linear_story();
    let mut walker = StoryWalker::start(&graph).unwrap();
    walker.advance("a");

    let mut edited = graph.clone();
    edited.remove_node("a");

    assert_eq!(
        walker.step(&edited),
        Err(PreviewError::UnknownNode("a".to_string()))
    );
    assert!(walker.back());
    assert!(walker.step(&edited).unwrap().is_terminal());
}

#[test]
fn test_walker_never_mutates_graph() {
    let graph = branching_story();
    let before = graph.clone();

    let mut walker = StoryWalker::start(&graph).unwrap();
    walker.advance("a");
    let _ = walker.step(&graph);
    walker.advance("d1");
    let _ = walker.available_choices(&graph);

    assert_eq!(graph, before);
}
