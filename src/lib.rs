pub mod model;
pub mod geometry {
    pub mod math;
    pub mod tolerance;
}
pub mod algorithms {
    pub mod dijkstra;
    pub mod topology;
}
pub mod playback;
mod json;

use model::{Edge, Node, Point, Topology};
use rand::{rngs::SmallRng, Rng, SeedableRng};

/// The editable graph: nodes and edges in insertion order, plus the
/// directedness mode. Insertion order is load-bearing: the search scans
/// nodes and edges in it, so edits must only ever append or remove.
///
/// Every operation degrades invalid input to a no-op; nothing here
/// panics on user input.
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) topology: Topology,
    pub(crate) ver: u64,
    rng: SmallRng,
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph {
    pub fn new() -> Self {
        Graph {
            nodes: Vec::new(),
            edges: Vec::new(),
            topology: Topology::Directed,
            ver: 1,
            rng: SmallRng::seed_from_u64(0x5eed),
        }
    }

    /// The fixed demo graph a fresh session starts from: three nodes and
    /// the weighted triangle between them.
    pub fn seeded() -> Self {
        let mut g = Graph::new();
        for (id, x, y) in [("1", 150.0, 150.0), ("2", 450.0, 150.0), ("3", 300.0, 300.0)] {
            g.nodes.push(Node {
                id: id.to_string(),
                label: id.to_string(),
                x,
                y,
            });
        }
        for (s, t, w) in [("1", "2", 1.0), ("2", "3", 2.0), ("1", "3", 4.0)] {
            g.edges.push(Edge {
                id: Edge::derived_id(s, t),
                source: s.to_string(),
                target: t.to_string(),
                weight: w,
                control: None,
            });
        }
        g.bump();
        g
    }

    /// Bumped on every observable mutation. The renderer keys its caches
    /// on this, and the playback layer compares it to detect mid-run
    /// edits.
    pub fn version(&self) -> u64 {
        self.ver
    }

    fn bump(&mut self) {
        self.ver = self.ver.wrapping_add(1);
    }

    // Read access

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }
    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
    pub fn topology(&self) -> Topology {
        self.topology
    }

    /// The control point the renderer should route an edge through: the
    /// explicit bend if one is set, otherwise the computed default.
    pub fn resolved_control(&self, edge_id: &str) -> Option<Point> {
        let e = self.edge(edge_id)?;
        if let Some(c) = e.control {
            return Some(c);
        }
        let a = self.node(&e.source)?;
        let b = self.node(&e.target)?;
        Some(geometry::math::default_control(a.x, a.y, b.x, b.y))
    }

    // Nodes

    /// Creates a node with the next monotonic id at a randomized
    /// placement near the default region. A blank label is rejected.
    pub fn add_node(&mut self, label: &str) -> Option<String> {
        if label.trim().is_empty() {
            return None;
        }
        let next = self
            .nodes
            .iter()
            .filter_map(|n| n.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0)
            + 1;
        let id = next.to_string();
        let x = 250.0 + self.rng.gen_range(0.0..100.0f32);
        let y = 200.0 + self.rng.gen_range(0.0..100.0f32);
        self.nodes.push(Node {
            id: id.clone(),
            label: label.to_string(),
            x,
            y,
        });
        self.bump();
        Some(id)
    }

    /// Removes the node and every incident edge in the same edit.
    pub fn remove_node(&mut self, id: &str) -> bool {
        if self.node(id).is_none() {
            return false;
        }
        self.nodes.retain(|n| n.id != id);
        self.edges.retain(|e| e.source != id && e.target != id);
        self.bump();
        true
    }

    /// Unconditional position update for any finite coordinates;
    /// clamping to a viewport is the renderer's concern. Explicit bends
    /// that the move makes redundant are dropped.
    pub fn move_node(&mut self, id: &str, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        let moved = match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.x = x;
                n.y = y;
                true
            }
            None => false,
        };
        if moved {
            algorithms::topology::reconcile_controls(self);
            self.bump();
        }
        moved
    }

    // Edges

    /// Adds a source->target edge. No-op if the endpoints are missing or
    /// equal, the derived id already exists, or the weight is invalid.
    /// In undirected mode the missing reverse edge is synthesized with
    /// the same weight.
    pub fn add_edge(&mut self, source: &str, target: &str, weight: f32) -> Option<String> {
        if source == target {
            return None;
        }
        if !weight.is_finite() || weight < 0.0 {
            return None;
        }
        if self.node(source).is_none() || self.node(target).is_none() {
            return None;
        }
        let id = Edge::derived_id(source, target);
        if self.edge(&id).is_some() {
            return None;
        }
        self.edges.push(Edge {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            weight,
            control: None,
        });
        if self.topology == Topology::Undirected {
            let rev = Edge::derived_id(target, source);
            if self.edge(&rev).is_none() {
                self.edges.push(Edge {
                    id: rev,
                    source: target.to_string(),
                    target: source.to_string(),
                    weight,
                    control: None,
                });
            }
        }
        self.bump();
        Some(id)
    }

    pub fn remove_edge(&mut self, id: &str) -> bool {
        let before = self.edges.len();
        self.edges.retain(|e| e.id != id);
        if self.edges.len() == before {
            return false;
        }
        self.bump();
        true
    }

    /// Weights must be finite and non-negative; anything else keeps the
    /// prior value.
    pub fn set_edge_weight(&mut self, id: &str, weight: f32) -> bool {
        if !weight.is_finite() || weight < 0.0 {
            return false;
        }
        match self.edges.iter_mut().find(|e| e.id == id) {
            Some(e) => {
                e.weight = weight;
            }
            None => return false,
        }
        self.bump();
        true
    }

    pub fn set_edge_control(&mut self, id: &str, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        match self.edges.iter_mut().find(|e| e.id == id) {
            Some(e) => {
                e.control = Some(Point { x, y });
            }
            None => return false,
        }
        self.bump();
        true
    }

    /// Drops an explicit bend that sits within snap distance of the
    /// recomputed default, so a released drag that lands "straight"
    /// reverts to auto-routing. Returns whether the control was cleared.
    pub fn clear_edge_control_if_near_default(&mut self, id: &str) -> bool {
        let near = match (self.edge(id), self.resolved_control_default(id)) {
            (Some(e), Some(def)) => match e.control {
                Some(c) => geometry::math::dist(c, def) < geometry::tolerance::CONTROL_SNAP_DIST,
                None => false,
            },
            _ => false,
        };
        if near {
            if let Some(e) = self.edges.iter_mut().find(|e| e.id == id) {
                e.control = None;
            }
            self.bump();
        }
        near
    }

    fn resolved_control_default(&self, edge_id: &str) -> Option<Point> {
        let e = self.edge(edge_id)?;
        let a = self.node(&e.source)?;
        let b = self.node(&e.target)?;
        Some(geometry::math::default_control(a.x, a.y, b.x, b.y))
    }

    // Topology

    /// Switches the directedness mode, applying the synthesis/pruning
    /// rules. No-op when the mode is unchanged.
    pub fn set_topology(&mut self, mode: Topology) -> bool {
        if self.topology == mode {
            return false;
        }
        match mode {
            Topology::Undirected => algorithms::topology::make_undirected(self),
            Topology::Directed => algorithms::topology::make_directed(self),
        }
        self.topology = mode;
        self.bump();
        true
    }

    pub fn toggle_topology(&mut self) -> Topology {
        let next = match self.topology {
            Topology::Directed => Topology::Undirected,
            Topology::Undirected => Topology::Directed,
        };
        self.set_topology(next);
        next
    }

    // JSON

    pub fn to_json_value(&self) -> serde_json::Value {
        json::to_json_impl(self)
    }
    pub fn from_json_value(&mut self, v: serde_json::Value) -> bool {
        json::from_json_impl(self, v)
    }
    pub fn from_json_value_strict(
        &mut self,
        v: serde_json::Value,
    ) -> Result<bool, (&'static str, String)> {
        json::from_json_impl_strict(self, v)
    }
}
