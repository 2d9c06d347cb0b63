use stepnet::algorithms::dijkstra::{path_cost, run};
use stepnet::model::Step;
use stepnet::Graph;

fn ids(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[test]
fn worked_example_full_log() {
    let g = Graph::seeded();
    let steps = run(&g, "1", "3");
    let expected = vec![
        Step::Visit { node: "1".into() },
        Step::Relax { edge: "e1-2".into(), from: "1".into(), to: "2".into() },
        Step::Update { edge: "e1-2".into(), from: "1".into(), to: "2".into() },
        Step::Relax { edge: "e1-3".into(), from: "1".into(), to: "3".into() },
        Step::Update { edge: "e1-3".into(), from: "1".into(), to: "3".into() },
        Step::Visit { node: "2".into() },
        Step::Relax { edge: "e2-3".into(), from: "2".into(), to: "3".into() },
        Step::Update { edge: "e2-3".into(), from: "2".into(), to: "3".into() },
        Step::Visit { node: "3".into() },
        Step::Done { path: ids(&["1", "2", "3"]) },
    ];
    assert_eq!(steps, expected);
    // The indirect route wins over the heavier direct edge.
    assert_eq!(path_cost(&g, &ids(&["1", "2", "3"])), Some(3.0));
    assert_eq!(path_cost(&g, &ids(&["1", "3"])), Some(4.0));
}

#[test]
fn unreachable_target_yields_empty_path() {
    let g = Graph::seeded();
    let steps = run(&g, "3", "1");
    // Node 3 has no outgoing edges, so the search visits it and stops.
    assert_eq!(
        steps,
        vec![
            Step::Visit { node: "3".into() },
            Step::Done { path: vec![] },
        ]
    );
}

#[test]
fn unknown_end_yields_empty_path() {
    let g = Graph::seeded();
    match run(&g, "1", "9").last() {
        Some(Step::Done { path }) => assert!(path.is_empty()),
        other => panic!("expected Done, got {:?}", other),
    }
}

#[test]
fn start_equals_end_yields_single_node_path() {
    let g = Graph::seeded();
    match run(&g, "1", "1").last() {
        Some(Step::Done { path }) => assert_eq!(*path, ids(&["1"])),
        other => panic!("expected Done, got {:?}", other),
    }
}

#[test]
fn identical_inputs_produce_identical_logs() {
    let g = Graph::seeded();
    assert_eq!(run(&g, "1", "3"), run(&g, "1", "3"));
    assert_eq!(run(&g, "2", "1"), run(&g, "2", "1"));
}

#[test]
fn done_is_always_last_and_unique() {
    let g = Graph::seeded();
    for (s, e) in [("1", "3"), ("3", "1"), ("2", "2"), ("1", "9")] {
        let steps = run(&g, s, e);
        let dones = steps
            .iter()
            .filter(|s| matches!(s, Step::Done { .. }))
            .count();
        assert_eq!(dones, 1);
        assert!(matches!(steps.last(), Some(Step::Done { .. })));
    }
}

#[test]
fn every_update_follows_its_relax() {
    let g = Graph::seeded();
    let steps = run(&g, "1", "3");
    for (i, step) in steps.iter().enumerate() {
        if let Step::Update { edge, from, to } = step {
            match &steps[i - 1] {
                Step::Relax {
                    edge: re,
                    from: rf,
                    to: rt,
                } => {
                    assert_eq!((re, rf, rt), (edge, from, to));
                }
                other => panic!("update at {} preceded by {:?}", i, other),
            }
        }
    }
}

#[test]
fn zero_weight_traverses_at_cost_one() {
    let mut g = Graph::new();
    g.add_node("a");
    g.add_node("b");
    g.add_node("c");
    g.add_edge("1", "2", 0.0);
    g.add_edge("2", "3", 0.0);
    g.add_edge("1", "3", 1.5);
    // Zero-weight hops each count as 1, so the two-hop route costs 2
    // and the direct 1.5 edge wins.
    match run(&g, "1", "3").last() {
        Some(Step::Done { path }) => assert_eq!(*path, ids(&["1", "3"])),
        other => panic!("expected Done, got {:?}", other),
    }
}

#[test]
fn equal_distances_break_ties_by_insertion_order() {
    let mut g = Graph::new();
    g.add_node("a");
    g.add_node("b");
    g.add_node("c");
    g.add_edge("1", "2", 2.0);
    g.add_edge("1", "3", 2.0);
    let steps = run(&g, "1", "3");
    let visits: Vec<&str> = steps
        .iter()
        .filter_map(|s| match s {
            Step::Visit { node } => Some(node.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(visits, vec!["1", "2", "3"]);
}

#[test]
fn path_cost_is_none_for_broken_paths() {
    let g = Graph::seeded();
    assert_eq!(path_cost(&g, &[]), None);
    assert_eq!(path_cost(&g, &ids(&["2", "1"])), None);
    assert_eq!(path_cost(&g, &ids(&["2"])), Some(0.0));
}
