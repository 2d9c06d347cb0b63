use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub weight: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub control: Option<Point>,
}

impl Edge {
    // Edge identity is derived from its endpoints, which is what makes
    // source->target pairs unique across the whole graph.
    pub fn derived_id(source: &str, target: &str) -> String {
        format!("e{}-{}", source, target)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    Directed,
    Undirected,
}

/// One recorded step of a search run. The wire shape is
/// `{"type": "visit", "node": ...}` etc., which is what the renderer
/// consumes directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Step {
    Visit { node: String },
    Relax { edge: String, from: String, to: String },
    Update { edge: String, from: String, to: String },
    Done { path: Vec<String> },
}
