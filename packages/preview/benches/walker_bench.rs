use criterion::{black_box, criterion_group, criterion_main, Criterion};
use storymate_flowchart::{Graph, Node, NodeKind, Point};
use storymate_preview::{Step, StoryWalker};

/// Start, then `len` story beats each offering two choices that rejoin
fn long_story(len: usize) -> Graph {
    let mut graph = Graph::new();
    graph
        .add_node(Node::new("start", NodeKind::Start, "", Point::ZERO))
        .unwrap();

    let mut previous = "start".to_string();
    for i in 0..len {
        let story = format!("s{i}");
        let left = format!("l{i}");
        let right = format!("r{i}");
        let x = i as f64 * 300.0;
        graph.add_node(Node::new(&story, NodeKind::Story, "", Point::new(x, 0.0))).unwrap();
        graph.add_node(Node::new(&left, NodeKind::Decision, "", Point::new(x + 100.0, -50.0))).unwrap();
        graph.add_node(Node::new(&right, NodeKind::Decision, "", Point::new(x + 100.0, 50.0))).unwrap();

        graph.connect(&previous, &story);
        graph.connect(&story, &left);
        graph.connect(&story, &right);
        previous = left;
    }
    graph
        .add_node(Node::new("end", NodeKind::End, "", Point::ZERO))
        .unwrap();
    graph.connect(&previous, "end");
    graph
}

fn walk_to_end(c: &mut Criterion) {
    let graph = long_story(500);

    c.bench_function("walk_to_end", |b| {
        b.iter(|| {
            let mut walker = StoryWalker::start(black_box(&graph)).unwrap();
            loop {
                match walker.step(&graph).unwrap() {
                    Step::Continue(next) => walker.advance(next.id),
                    Step::Choices(nodes) => walker.advance(nodes[0].id.clone()),
                    Step::DeadEnd(_) | Step::End => break,
                }
            }
            walker.history().len()
        })
    });
}

criterion_group!(benches, walk_to_end);
criterion_main!(benches);
