use stepnet::playback::{Phase, Playback};
use stepnet::Graph;

// The seeded graph's (1, 3) log: Visit 1, Relax/Update e1-2,
// Relax/Update e1-3, Visit 2, Relax/Update e2-3, Visit 3, Done:
// ten steps, Done at index 9, path [1, 2, 3].

fn ids(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

fn drain(p: &mut Playback) -> u32 {
    let mut fired = 0;
    while let Some(t) = p.next_tick() {
        assert!(p.tick(t.epoch));
        fired += 1;
        assert!(fired < 1000, "tick loop did not terminate");
    }
    fired
}

#[test]
fn start_arms_at_the_first_step() {
    let g = Graph::seeded();
    let mut p = Playback::new();
    assert_eq!(p.phase(), Phase::Idle);
    p.start(&g, "1", "3");
    assert_eq!(p.phase(), Phase::Armed);
    assert_eq!(p.index(), 0);
    assert!(!p.paused());
    assert!(p.path().is_empty());
}

#[test]
fn auto_advance_runs_to_completion_then_reveals() {
    let g = Graph::seeded();
    let mut p = Playback::new();
    p.start(&g, "1", "3");
    // Nine advances to reach Done, then two reveal increments for the
    // three-node path.
    assert_eq!(drain(&mut p), 11);
    assert_eq!(p.phase(), Phase::Finished);
    assert_eq!(p.index(), 9);
    assert_eq!(p.path().to_vec(), ids(&["1", "2", "3"]));
    assert_eq!(p.path_reveal(), 2);
    assert!(p.next_tick().is_none());
}

#[test]
fn stale_ticks_are_ignored() {
    let g = Graph::seeded();
    let mut p = Playback::new();
    p.start(&g, "1", "3");
    let t = p.next_tick().unwrap();
    p.set_speed(100); // any intent invalidates the pending tick
    assert!(!p.tick(t.epoch));
    assert_eq!(p.index(), 0);
    assert!(p.tick(p.next_tick().unwrap().epoch));
    assert_eq!(p.index(), 1);
}

#[test]
fn pause_suspends_auto_advance_but_not_stepping() {
    let g = Graph::seeded();
    let mut p = Playback::new();
    p.start(&g, "1", "3");
    p.toggle_pause(&g, "1", "3");
    assert!(p.paused());
    assert!(p.next_tick().is_none());
    p.step_forward(&g, "1", "3");
    assert_eq!(p.index(), 1);
    p.step_back(&g, "1", "3");
    assert_eq!(p.index(), 0);
    p.toggle_pause(&g, "1", "3");
    assert!(!p.paused());
    assert!(p.next_tick().is_some());
}

#[test]
fn step_intents_implicitly_start_a_run() {
    let g = Graph::seeded();

    let mut p = Playback::new();
    p.step_forward(&g, "1", "3");
    // The implicit start lands on index 0 and the step moves past it.
    assert_eq!(p.phase(), Phase::Armed);
    assert_eq!(p.index(), 1);

    let mut p = Playback::new();
    p.step_back(&g, "1", "3");
    assert_eq!(p.index(), 0);

    let mut p = Playback::new();
    p.toggle_pause(&g, "1", "3");
    assert_eq!(p.phase(), Phase::Armed);
    assert_eq!(p.index(), 0);
    assert!(!p.paused());
}

#[test]
fn stepping_clamps_to_the_log() {
    let g = Graph::seeded();
    let mut p = Playback::new();
    p.start(&g, "1", "3");
    p.step_back(&g, "1", "3");
    assert_eq!(p.index(), 0);
    for _ in 0..20 {
        p.step_forward(&g, "1", "3");
    }
    assert_eq!(p.index(), 9);
    assert_eq!(p.phase(), Phase::Finished);
}

#[test]
fn scrubbing_off_done_clears_the_captured_path() {
    let g = Graph::seeded();
    let mut p = Playback::new();
    p.start(&g, "1", "3");
    for _ in 0..9 {
        p.step_forward(&g, "1", "3");
    }
    assert_eq!(p.phase(), Phase::Finished);
    assert_eq!(p.path().to_vec(), ids(&["1", "2", "3"]));
    assert!(p.tick(p.next_tick().unwrap().epoch)); // reveal one segment
    assert_eq!(p.path_reveal(), 1);

    p.step_back(&g, "1", "3");
    assert_eq!(p.phase(), Phase::Armed);
    assert!(p.path().is_empty());
    assert_eq!(p.path_reveal(), 0);

    p.step_forward(&g, "1", "3");
    assert_eq!(p.path().to_vec(), ids(&["1", "2", "3"]));
    assert_eq!(p.path_reveal(), 0);
}

#[test]
fn highlight_folds_the_log_prefix() {
    let g = Graph::seeded();
    let mut p = Playback::new();
    p.start(&g, "1", "3");

    let h = p.highlight();
    assert_eq!(h.node.as_deref(), Some("1"));
    assert_eq!(h.relax_edge, None);
    assert_eq!(h.update_edge, None);

    p.step_forward(&g, "1", "3");
    p.step_forward(&g, "1", "3"); // index 2: Update e1-2
    let h = p.highlight();
    assert_eq!(h.relax_edge.as_deref(), Some("e1-2"));
    assert_eq!(h.update_edge.as_deref(), Some("e1-2"));

    for _ in 0..3 {
        p.step_forward(&g, "1", "3"); // index 5: Visit 2
    }
    let h = p.highlight();
    assert_eq!(h.node.as_deref(), Some("2"));
    assert_eq!(h.relax_edge.as_deref(), Some("e1-3"));
    assert_eq!(h.update_edge.as_deref(), Some("e1-3"));
}

#[test]
fn reveal_ticks_are_independent_of_pause() {
    let g = Graph::seeded();
    let mut p = Playback::new();
    p.start(&g, "1", "3");
    while p.phase() != Phase::Finished {
        let t = p.next_tick().unwrap();
        assert!(p.tick(t.epoch));
    }
    assert_eq!(p.path_reveal(), 0);
    p.toggle_pause(&g, "1", "3");
    assert!(p.paused());
    let t = p.next_tick().expect("reveal still scheduled while paused");
    assert!(p.tick(t.epoch));
    assert_eq!(p.path_reveal(), 1);
}

#[test]
fn reveal_gates_node_and_edge_queries() {
    let g = Graph::seeded();
    let mut p = Playback::new();
    p.start(&g, "1", "3");
    while p.phase() != Phase::Finished {
        let t = p.next_tick().unwrap();
        p.tick(t.epoch);
    }
    // reveal = 0: the first segment and its bounding nodes only.
    assert!(p.is_edge_revealed("1", "2"));
    assert!(!p.is_edge_revealed("2", "3"));
    assert!(p.is_node_revealed("1"));
    assert!(p.is_node_revealed("2"));

    let t = p.next_tick().unwrap();
    p.tick(t.epoch);
    assert!(p.is_edge_revealed("2", "3"));
    assert!(p.is_node_revealed("3"));
    assert!(!p.is_edge_revealed("1", "3"));
}

#[test]
fn unreachable_runs_finish_without_reveal() {
    let g = Graph::seeded();
    let mut p = Playback::new();
    p.start(&g, "3", "1");
    assert_eq!(drain(&mut p), 1);
    assert_eq!(p.phase(), Phase::Finished);
    assert!(p.path().is_empty());
    assert!(!p.is_node_revealed("3"));
}

#[test]
fn single_node_paths_need_no_reveal_ticks() {
    let g = Graph::seeded();
    let mut p = Playback::new();
    p.start(&g, "1", "1");
    drain(&mut p);
    assert_eq!(p.phase(), Phase::Finished);
    assert_eq!(p.path().to_vec(), ids(&["1"]));
    assert!(p.is_node_revealed("1"));
    assert!(p.next_tick().is_none());
}

#[test]
fn starting_again_discards_the_previous_run() {
    let g = Graph::seeded();
    let mut p = Playback::new();
    p.start(&g, "1", "3");
    for _ in 0..9 {
        p.step_forward(&g, "1", "3");
    }
    let stale = p.epoch();
    p.start(&g, "1", "3");
    assert_eq!(p.index(), 0);
    assert!(p.path().is_empty());
    assert!(!p.tick(stale));
}

#[test]
fn graph_edits_make_the_run_stale() {
    let mut g = Graph::seeded();
    let mut p = Playback::new();
    p.start(&g, "1", "3");
    assert!(!p.is_stale(&g));
    let t = p.next_tick().unwrap();

    g.add_node("hub");
    assert!(p.is_stale(&g));
    p.cancel();
    assert_eq!(p.phase(), Phase::Idle);
    assert!(!p.tick(t.epoch));
    assert!(p.next_tick().is_none());
}

#[test]
fn speed_changes_only_affect_future_delays() {
    let g = Graph::seeded();
    let mut p = Playback::new();
    p.start(&g, "1", "3");
    p.step_forward(&g, "1", "3");
    p.set_speed(500);
    assert_eq!(p.index(), 1);
    assert_eq!(p.next_tick().unwrap().delay_ms, 500);
    p.set_speed(0);
    assert_eq!(p.speed_ms(), 1);
}
