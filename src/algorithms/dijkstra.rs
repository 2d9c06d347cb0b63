use crate::model::Step;
use crate::Graph;
use std::collections::{HashMap, HashSet};

/// Step-recording Dijkstra over the graph snapshot. Deliberately the
/// O(V²) scan form: graphs are hand-placed and small, and the scan
/// order is what makes the step log reproducible: nodes are examined
/// in node-insertion order with a strict `<` against the running
/// minimum (first minimum wins), outgoing edges in edge-insertion
/// order.
///
/// Same graph, start and end always produce an identical log.
pub fn run(g: &Graph, start_id: &str, end_id: &str) -> Vec<Step> {
    let mut distance: HashMap<&str, f32> = HashMap::new();
    let mut predecessor: HashMap<&str, &str> = HashMap::new();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut steps: Vec<Step> = Vec::new();

    for n in g.nodes() {
        distance.insert(&n.id, f32::INFINITY);
    }
    distance.insert(start_id, 0.0);

    while visited.len() < g.node_count() {
        let mut current: Option<&str> = None;
        let mut min_dist = f32::INFINITY;
        for n in g.nodes() {
            if visited.contains(n.id.as_str()) {
                continue;
            }
            let d = distance[n.id.as_str()];
            if d < min_dist {
                min_dist = d;
                current = Some(n.id.as_str());
            }
        }
        // Every remaining node is unreachable.
        let current = match current {
            Some(id) => id,
            None => break,
        };
        visited.insert(current);
        steps.push(Step::Visit {
            node: current.to_string(),
        });

        for e in g.edges() {
            if e.source != current || visited.contains(e.target.as_str()) {
                continue;
            }
            // Considered, regardless of outcome.
            steps.push(Step::Relax {
                edge: e.id.clone(),
                from: current.to_string(),
                to: e.target.clone(),
            });
            // A zero weight traverses at cost 1, matching how the edge
            // reads when its weight is left blank.
            let w = if e.weight == 0.0 { 1.0 } else { e.weight };
            let alt = distance[current] + w;
            if alt < distance[e.target.as_str()] {
                distance.insert(&e.target, alt);
                predecessor.insert(&e.target, current);
                steps.push(Step::Update {
                    edge: e.id.clone(),
                    from: current.to_string(),
                    to: e.target.clone(),
                });
            }
        }
    }

    // Walk predecessors back from the end; a walk that does not land on
    // the start means the end is unreachable and the path is empty. The
    // degenerate start == end case trivially lands on the start.
    let mut path: Vec<String> = Vec::new();
    let mut u: Option<&str> = Some(end_id);
    while let Some(id) = u {
        path.insert(0, id.to_string());
        u = predecessor.get(id).copied();
    }
    if path.first().map(String::as_str) != Some(start_id) {
        path.clear();
    }

    steps.push(Step::Done { path });
    steps
}

/// Total weight along a path, or `None` when some consecutive pair has
/// no connecting edge (stale path after an edit) or the path is empty.
pub fn path_cost(g: &Graph, path: &[String]) -> Option<f32> {
    if path.is_empty() {
        return None;
    }
    let mut cost = 0.0;
    for pair in path.windows(2) {
        match g
            .edges()
            .iter()
            .find(|e| e.source == pair[0] && e.target == pair[1])
        {
            Some(e) => cost += e.weight,
            None => return None,
        }
    }
    Some(cost)
}
