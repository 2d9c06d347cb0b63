use crate::model::{Edge, Node, Point, Topology};
use crate::Graph;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// Document exchange with the host: `{version, topology, nodes, edges}`.
// Edge ids are re-derived on load so a hand-edited document cannot
// smuggle in an id that disagrees with its endpoints.

pub fn to_json_impl(g: &Graph) -> Value {
    #[derive(Serialize)]
    struct Doc<'a> {
        version: u32,
        topology: Topology,
        nodes: &'a [Node],
        edges: &'a [Edge],
    }
    serde_json::to_value(Doc {
        version: 1,
        topology: g.topology,
        nodes: &g.nodes,
        edges: &g.edges,
    })
    .unwrap_or(Value::Null)
}

pub fn from_json_impl(g: &mut Graph, v: Value) -> bool {
    from_json_impl_strict(g, v).unwrap_or(false)
}

pub fn from_json_impl_strict(g: &mut Graph, v: Value) -> Result<bool, (&'static str, String)> {
    #[derive(Deserialize)]
    struct NodeDe {
        id: String,
        #[serde(default)]
        label: Option<String>,
        x: f32,
        y: f32,
    }
    #[derive(Deserialize)]
    struct EdgeDe {
        source: String,
        target: String,
        #[serde(default)]
        weight: Option<f32>,
        #[serde(default)]
        control: Option<Point>,
    }
    #[derive(Deserialize)]
    struct Doc {
        #[serde(default)]
        topology: Option<Topology>,
        nodes: Vec<NodeDe>,
        edges: Vec<EdgeDe>,
    }

    let doc: Doc = match serde_json::from_value(v) {
        Ok(d) => d,
        Err(e) => return Err(("json_parse", format!("{}", e))),
    };

    let mut nodes: Vec<Node> = Vec::with_capacity(doc.nodes.len());
    for n in doc.nodes {
        if n.id.trim().is_empty() {
            return Err(("invalid_node", "node id must be non-empty".to_string()));
        }
        if !n.x.is_finite() || !n.y.is_finite() {
            return Err(("non_finite", format!("node '{}' position", n.id)));
        }
        if nodes.iter().any(|p: &Node| p.id == n.id) {
            return Err(("duplicate_node", format!("node id '{}' repeats", n.id)));
        }
        let label = n.label.unwrap_or_else(|| n.id.clone());
        nodes.push(Node {
            id: n.id,
            label,
            x: n.x,
            y: n.y,
        });
    }

    let mut edges: Vec<Edge> = Vec::with_capacity(doc.edges.len());
    for e in doc.edges {
        if e.source == e.target {
            return Err(("invalid_edge", format!("self-loop at '{}'", e.source)));
        }
        if !nodes.iter().any(|n| n.id == e.source) || !nodes.iter().any(|n| n.id == e.target) {
            return Err((
                "dangling_edge",
                format!("edge {} -> {} references a missing node", e.source, e.target),
            ));
        }
        let weight = e.weight.unwrap_or(1.0);
        if !weight.is_finite() || weight < 0.0 {
            return Err((
                "invalid_weight",
                format!("edge {} -> {} weight {}", e.source, e.target, weight),
            ));
        }
        let id = Edge::derived_id(&e.source, &e.target);
        if edges.iter().any(|p: &Edge| p.id == id) {
            return Err(("duplicate_edge", format!("edge id '{}' repeats", id)));
        }
        if let Some(c) = e.control {
            if !c.x.is_finite() || !c.y.is_finite() {
                return Err(("non_finite", format!("edge '{}' control", id)));
            }
        }
        edges.push(Edge {
            id,
            source: e.source,
            target: e.target,
            weight,
            control: e.control,
        });
    }

    g.nodes = nodes;
    g.edges = edges;
    g.topology = doc.topology.unwrap_or(Topology::Directed);
    g.ver = g.ver.wrapping_add(1);
    Ok(true)
}
