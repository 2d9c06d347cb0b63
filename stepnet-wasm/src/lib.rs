use stepnet::playback::Playback;
use wasm_bindgen::prelude::*;

mod api;
mod error;
mod interop;

/// One interactive visualizer session: the editable graph, the playback
/// controller over its latest search run, and the selected endpoints.
#[wasm_bindgen]
pub struct Session {
    pub(crate) graph: stepnet::Graph,
    pub(crate) playback: Playback,
    pub(crate) start: String,
    pub(crate) end: String,
}

impl Session {
    pub fn rs_new() -> Session {
        Session {
            graph: stepnet::Graph::seeded(),
            playback: Playback::new(),
            start: "1".to_string(),
            end: "3".to_string(),
        }
    }

    // Any edit that actually changed the graph invalidates the recorded
    // steps; the run is cancelled rather than left highlighting state
    // that may no longer exist.
    pub(crate) fn after_edit(&mut self) {
        if self.playback.is_stale(&self.graph) {
            self.playback.cancel();
        }
    }
}
