use crate::{error, interop, Session};
use stepnet::model::Topology;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn topology_str(t: Topology) -> &'static str {
    match t {
        Topology::Directed => "directed",
        Topology::Undirected => "undirected",
    }
}

#[wasm_bindgen]
impl Session {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Session {
        Session::rs_new()
    }

    pub fn version(&self) -> u64 {
        self.graph.version()
    }
    pub fn node_count(&self) -> u32 {
        self.graph.node_count() as u32
    }
    pub fn edge_count(&self) -> u32 {
        self.graph.edge_count() as u32
    }
    pub fn topology(&self) -> String {
        topology_str(self.graph.topology()).to_string()
    }

    // Edit intents. Each one that changes the graph cancels an active
    // run (see Session::after_edit).

    pub fn add_node(&mut self, label: &str) -> Option<String> {
        let id = self.graph.add_node(label);
        self.after_edit();
        id
    }
    pub fn add_node_res(&mut self, label: &str) -> JsValue {
        if label.trim().is_empty() {
            return error::blank_label();
        }
        match self.add_node(label) {
            Some(id) => error::ok(JsValue::from_str(&id)),
            None => error::blank_label(),
        }
    }
    pub fn remove_node(&mut self, id: &str) -> bool {
        let removed = self.graph.remove_node(id);
        self.after_edit();
        removed
    }
    pub fn remove_node_res(&mut self, id: &str) -> JsValue {
        if self.graph.node(id).is_none() {
            return error::invalid_id("node", id);
        }
        error::ok(JsValue::from_bool(self.remove_node(id)))
    }
    pub fn move_node(&mut self, id: &str, x: f32, y: f32) -> bool {
        let moved = self.graph.move_node(id, x, y);
        self.after_edit();
        moved
    }
    pub fn move_node_res(&mut self, id: &str, x: f32, y: f32) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        if self.graph.node(id).is_none() {
            return error::invalid_id("node", id);
        }
        error::ok(JsValue::from_bool(self.move_node(id, x, y)))
    }
    pub fn add_edge(&mut self, source: &str, target: &str, weight: f32) -> Option<String> {
        let id = self.graph.add_edge(source, target, weight);
        self.after_edit();
        id
    }
    pub fn add_edge_res(&mut self, source: &str, target: &str, weight: f32) -> JsValue {
        if self.graph.node(source).is_none() {
            return error::invalid_id("node", source);
        }
        if self.graph.node(target).is_none() {
            return error::invalid_id("node", target);
        }
        if source == target {
            return error::self_loop(source);
        }
        if !weight.is_finite() {
            return error::non_finite("weight");
        }
        if weight < 0.0 {
            return error::out_of_range("weight", 0.0, f32::INFINITY, weight);
        }
        let derived = stepnet::model::Edge::derived_id(source, target);
        if self.graph.edge(&derived).is_some() {
            return error::duplicate_edge(&derived);
        }
        match self.add_edge(source, target, weight) {
            Some(id) => error::ok(JsValue::from_str(&id)),
            None => error::err("invalid_edge", "failed to add edge", None),
        }
    }
    pub fn remove_edge(&mut self, id: &str) -> bool {
        let removed = self.graph.remove_edge(id);
        self.after_edit();
        removed
    }
    pub fn remove_edge_res(&mut self, id: &str) -> JsValue {
        if self.graph.edge(id).is_none() {
            return error::invalid_id("edge", id);
        }
        error::ok(JsValue::from_bool(self.remove_edge(id)))
    }
    pub fn set_edge_weight(&mut self, id: &str, weight: f32) -> bool {
        let set = self.graph.set_edge_weight(id, weight);
        self.after_edit();
        set
    }
    pub fn set_edge_weight_res(&mut self, id: &str, weight: f32) -> JsValue {
        if self.graph.edge(id).is_none() {
            return error::invalid_id("edge", id);
        }
        if !weight.is_finite() {
            return error::non_finite("weight");
        }
        if weight < 0.0 {
            return error::out_of_range("weight", 0.0, f32::INFINITY, weight);
        }
        error::ok(JsValue::from_bool(self.set_edge_weight(id, weight)))
    }
    pub fn set_edge_control(&mut self, id: &str, x: f32, y: f32) -> bool {
        let set = self.graph.set_edge_control(id, x, y);
        self.after_edit();
        set
    }
    /// Called when a bend drag is released: a bend that landed back on
    /// the default route is dropped.
    pub fn release_edge_bend(&mut self, id: &str) -> bool {
        let cleared = self.graph.clear_edge_control_if_near_default(id);
        self.after_edit();
        cleared
    }
    pub fn toggle_topology(&mut self) -> String {
        let next = self.graph.toggle_topology();
        self.after_edit();
        topology_str(next).to_string()
    }
    pub fn set_topology(&mut self, mode: &str) -> bool {
        let mode = match mode {
            "directed" => Topology::Directed,
            "undirected" => Topology::Undirected,
            _ => return false,
        };
        let changed = self.graph.set_topology(mode);
        self.after_edit();
        changed
    }

    // Search endpoints

    pub fn set_start(&mut self, id: &str) -> bool {
        if self.graph.node(id).is_none() {
            return false;
        }
        self.start = id.to_string();
        true
    }
    pub fn set_end(&mut self, id: &str) -> bool {
        if self.graph.node(id).is_none() {
            return false;
        }
        self.end = id.to_string();
        true
    }
    pub fn start_id(&self) -> String {
        self.start.clone()
    }
    pub fn end_id(&self) -> String {
        self.end.clone()
    }

    // Playback intents

    pub fn run(&mut self) {
        self.playback.start(&self.graph, &self.start, &self.end);
    }
    pub fn step_forward(&mut self) {
        self.playback.step_forward(&self.graph, &self.start, &self.end);
    }
    pub fn step_back(&mut self) {
        self.playback.step_back(&self.graph, &self.start, &self.end);
    }
    pub fn toggle_pause(&mut self) {
        self.playback.toggle_pause(&self.graph, &self.start, &self.end);
    }
    pub fn set_speed(&mut self, ms: u32) {
        self.playback.set_speed(ms);
    }
    /// Applies a scheduled advance. Ticks carrying a stale epoch do
    /// nothing and return false.
    pub fn tick(&mut self, epoch: f64) -> bool {
        self.playback.tick(epoch as u64)
    }
    /// `{epoch, delay_ms}` for the timer the host should schedule next,
    /// or null when nothing is due.
    pub fn next_tick(&self) -> JsValue {
        match self.playback.next_tick() {
            Some(t) => {
                let o = interop::new_obj();
                interop::set_kv(&o, "epoch", &JsValue::from_f64(t.epoch as f64));
                interop::set_kv(&o, "delay_ms", &JsValue::from_f64(t.delay_ms as f64));
                o.into()
            }
            None => JsValue::NULL,
        }
    }

    pub fn phase(&self) -> String {
        match self.playback.phase() {
            stepnet::playback::Phase::Idle => "idle",
            stepnet::playback::Phase::Armed => "armed",
            stepnet::playback::Phase::Finished => "finished",
        }
        .to_string()
    }
    pub fn step_index(&self) -> i32 {
        self.playback.index()
    }
    pub fn step_count(&self) -> u32 {
        self.playback.steps().len() as u32
    }
    pub fn is_paused(&self) -> bool {
        self.playback.paused()
    }
    pub fn speed_ms(&self) -> u32 {
        self.playback.speed_ms()
    }

    // Scene getters

    pub fn get_node_data(&self) -> JsValue {
        let ids: Vec<&str> = self.graph.nodes().iter().map(|n| n.id.as_str()).collect();
        let labels: Vec<&str> = self.graph.nodes().iter().map(|n| n.label.as_str()).collect();
        let mut pos: Vec<f32> = Vec::with_capacity(ids.len() * 2);
        for n in self.graph.nodes() {
            pos.push(n.x);
            pos.push(n.y);
        }
        let obj = interop::new_obj();
        interop::set_kv(&obj, "ids", &interop::arr_str(&ids).into());
        interop::set_kv(&obj, "labels", &interop::arr_str(&labels).into());
        interop::set_kv(&obj, "positions", &interop::arr_f32(&pos).into());
        obj.into()
    }

    /// Edges with their resolved control points: the explicit bend when
    /// one is set, the auto-routed default otherwise; `bent` flags which
    /// is which.
    pub fn get_edge_data(&self) -> JsValue {
        let mut ids: Vec<&str> = Vec::new();
        let mut sources: Vec<&str> = Vec::new();
        let mut targets: Vec<&str> = Vec::new();
        let mut weights: Vec<f32> = Vec::new();
        let mut controls: Vec<f32> = Vec::new();
        let mut bent: Vec<u8> = Vec::new();
        for e in self.graph.edges() {
            ids.push(&e.id);
            sources.push(&e.source);
            targets.push(&e.target);
            weights.push(e.weight);
            let c = self
                .graph
                .resolved_control(&e.id)
                .unwrap_or(stepnet::model::Point { x: 0.0, y: 0.0 });
            controls.push(c.x);
            controls.push(c.y);
            bent.push(u8::from(e.control.is_some()));
        }
        let obj = interop::new_obj();
        interop::set_kv(&obj, "ids", &interop::arr_str(&ids).into());
        interop::set_kv(&obj, "sources", &interop::arr_str(&sources).into());
        interop::set_kv(&obj, "targets", &interop::arr_str(&targets).into());
        interop::set_kv(&obj, "weights", &interop::arr_f32(&weights).into());
        interop::set_kv(&obj, "controls", &interop::arr_f32(&controls).into());
        interop::set_kv(&obj, "bent", &interop::arr_u8(&bent).into());
        obj.into()
    }

    pub fn playback_view(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.playback.view(&self.graph)).unwrap_or(JsValue::NULL)
    }
    pub fn get_steps(&self) -> JsValue {
        serde_wasm_bindgen::to_value(self.playback.steps()).unwrap_or(JsValue::NULL)
    }
    pub fn highlight(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.playback.highlight()).unwrap_or(JsValue::NULL)
    }
    pub fn is_node_revealed(&self, id: &str) -> bool {
        self.playback.is_node_revealed(id)
    }
    pub fn is_edge_revealed(&self, source: &str, target: &str) -> bool {
        self.playback.is_edge_revealed(source, target)
    }

    // JSON

    pub fn to_json(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.graph.to_json_value()).unwrap_or(JsValue::NULL)
    }
    pub fn from_json(&mut self, v: JsValue) -> bool {
        let loaded = match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => self.graph.from_json_value(val),
            Err(_) => false,
        };
        if !loaded {
            web_sys::console::warn_1(&JsValue::from_str("stepnet: rejected graph document"));
        }
        self.after_edit();
        loaded
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => match self.graph.from_json_value_strict(val) {
                Ok(loaded) => {
                    self.after_edit();
                    error::ok(JsValue::from_bool(loaded))
                }
                Err((code, msg)) => error::err(code, msg, None),
            },
            Err(e) => error::err("json_parse", format!("{}", e), None),
        }
    }
}
