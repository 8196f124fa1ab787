use rscc::{AdjacencyGraph, Kosaraju, StepKind, TraceEvent};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn two_cycle_and_tail() -> AdjacencyGraph<&'static str> {
    let mut graph = AdjacencyGraph::new();
    graph.add_edge("A", "B");
    graph.add_edge("B", "A");
    graph.add_edge("B", "C");
    graph.add_edge("C", "D");
    graph
}

fn event(phase: u8, group: u32, kind: StepKind, payload: &str) -> TraceEvent {
    TraceEvent {
        phase,
        group,
        kind,
        payload: payload.to_string(),
    }
}

#[test]
fn four_vertex_example_produces_the_exact_step_sequence() {
    init_logs();
    let graph = two_cycle_and_tail();
    let mut inspector = Kosaraju::new(&graph);
    inspector.strongly_connected_sets().unwrap();

    use StepKind::*;
    let expected = vec![
        // first pass, one traversal tree rooted at A
        event(0, 0, Dfs, "A"),
        event(1, 0, Visit, "A"),
        event(1, 0, Visit, "B"),
        event(1, 0, Visit, "C"),
        event(1, 0, Visit, "D"),
        event(1, 0, PushToOrder, "D"),
        event(1, 0, PushToOrder, "C"),
        event(1, 0, PushToOrder, "B"),
        event(1, 0, PushToOrder, "A"),
        // bookkeeping between the passes
        event(2, 0, OrderStack, "D C B A "),
        event(2, 0, InverseGraph, ""),
        // second pass over the transpose, one group per component
        event(2, 0, Visit, "A"),
        event(2, 0, Visit, "B"),
        event(2, 1, Visit, "C"),
        event(2, 2, Visit, "D"),
        event(2, 0, InverseGraph, ""),
    ];
    assert_eq!(inspector.trace(), expected.as_slice());
}

#[test]
fn visit_precedes_push_to_order_for_every_vertex() {
    let mut graph = AdjacencyGraph::new();
    graph.add_edges("a", ["b", "c"]);
    graph.add_edges("b", ["d"]);
    graph.add_edges("c", ["d", "a"]);
    graph.add_edges("e", ["a"]);

    let mut inspector = Kosaraju::new(&graph);
    inspector.strongly_connected_sets().unwrap();
    let trace = inspector.trace();

    for vertex in ["a", "b", "c", "d", "e"] {
        let visit = trace
            .iter()
            .position(|e| e.kind == StepKind::Visit && e.phase == 1 && e.payload == vertex);
        let pushed = trace
            .iter()
            .position(|e| e.kind == StepKind::PushToOrder && e.payload == vertex);
        assert!(
            visit.unwrap() < pushed.unwrap(),
            "{vertex} pushed to the order before being visited"
        );
    }
}

#[test]
fn groups_partition_the_traversal_trees() {
    // two disconnected two-cycles
    let mut graph = AdjacencyGraph::new();
    graph.add_edge("a", "b");
    graph.add_edge("b", "a");
    graph.add_edge("x", "y");
    graph.add_edge("y", "x");

    let mut inspector = Kosaraju::new(&graph);
    inspector.strongly_connected_sets().unwrap();
    let trace = inspector.trace();

    let dfs_groups: Vec<_> = trace
        .iter()
        .filter(|e| e.kind == StepKind::Dfs)
        .map(|e| e.group)
        .collect();
    assert_eq!(dfs_groups, vec![0, 1]);

    // bookkeeping events always carry phase 2, group 0
    for e in trace
        .iter()
        .filter(|e| matches!(e.kind, StepKind::OrderStack | StepKind::InverseGraph))
    {
        assert_eq!((e.phase, e.group), (2, 0));
    }

    let second_pass_groups: Vec<_> = trace
        .iter()
        .filter(|e| e.kind == StepKind::Visit && e.phase == 2)
        .map(|e| e.group)
        .collect();
    assert_eq!(second_pass_groups, vec![0, 0, 1, 1]);
}

#[test]
fn wire_tags_are_stable() {
    let step = event(1, 0, StepKind::PushToOrder, "A");
    let json = serde_json::to_value(&step).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "phase": 1,
            "group": 0,
            "kind": "push2Stack",
            "payload": "A"
        })
    );

    let tags: Vec<String> = [
        StepKind::Dfs,
        StepKind::Visit,
        StepKind::PushToOrder,
        StepKind::OrderStack,
        StepKind::InverseGraph,
    ]
    .iter()
    .map(|kind| serde_json::to_string(kind).unwrap())
    .collect();
    assert_eq!(
        tags,
        vec![
            "\"dfs\"",
            "\"visit\"",
            "\"push2Stack\"",
            "\"kosarajuAlgStack\"",
            "\"inverseGraph\""
        ]
    );

    let parsed: TraceEvent = serde_json::from_str(&serde_json::to_string(&step).unwrap()).unwrap();
    assert_eq!(parsed, step);
}

#[test]
fn trace_survives_the_inspector() {
    let graph = two_cycle_and_tail();
    let mut inspector = Kosaraju::new(&graph);
    inspector.strongly_connected_sets().unwrap();

    let recorded = inspector.trace().len();
    let events = inspector.into_trace();
    assert_eq!(events.len(), recorded);
}
