use crate::geometry::math;
use crate::geometry::tolerance::CONTROL_SNAP_DIST;
use crate::model::Edge;
use crate::Graph;

// Directed -> undirected: synthesize the missing reverse of every edge,
// carrying the weight. Synthesized reverses are appended after the
// existing edges, never bent.
pub(crate) fn make_undirected(g: &mut Graph) {
    let missing: Vec<Edge> = g
        .edges
        .iter()
        .filter(|e| {
            !g.edges
                .iter()
                .any(|r| r.source == e.target && r.target == e.source)
        })
        .map(|e| Edge {
            id: Edge::derived_id(&e.target, &e.source),
            source: e.target.clone(),
            target: e.source.clone(),
            weight: e.weight,
            control: None,
        })
        .collect();
    g.edges.extend(missing);
}

// Undirected -> directed: of every mirrored pair, only the edge whose
// source id orders before its target id (string comparison) survives.
// Unpaired edges are untouched.
pub(crate) fn make_directed(g: &mut Graph) {
    let snapshot = g.edges.clone();
    g.edges.retain(|e| {
        let mirrored = snapshot
            .iter()
            .any(|r| r.source == e.target && r.target == e.source && r.id != e.id);
        !mirrored || e.source < e.target
    });
}

// After a node moves, an explicit bend may now sit on top of the
// recomputed default route; such bends are dropped so they stop
// fighting the moved endpoint.
pub(crate) fn reconcile_controls(g: &mut Graph) {
    let Graph { nodes, edges, .. } = g;
    for e in edges.iter_mut() {
        let ctrl = match e.control {
            Some(c) => c,
            None => continue,
        };
        let a = nodes.iter().find(|n| n.id == e.source);
        let b = nodes.iter().find(|n| n.id == e.target);
        if let (Some(a), Some(b)) = (a, b) {
            let def = math::default_control(a.x, a.y, b.x, b.y);
            if math::dist(ctrl, def) < CONTROL_SNAP_DIST {
                e.control = None;
            }
        }
    }
}
