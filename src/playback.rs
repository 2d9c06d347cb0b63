use crate::algorithms::dijkstra;
use crate::model::Step;
use crate::Graph;
use serde::Serialize;

pub const DEFAULT_SPEED_MS: u32 = 350;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// No step log.
    Idle,
    /// A log exists and the index sits before the final `Done` step.
    Armed,
    /// The index sits on the `Done` step; only reveal work remains.
    Finished,
}

/// What the host should schedule next. A tick fired with an `epoch`
/// older than the controller's current one is stale and must be
/// ignored, which is how a new run (or any intent) cancels timers it
/// can no longer see.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Tick {
    pub epoch: u64,
    pub delay_ms: u32,
}

/// Derived highlight state: the last `Visit`/`Relax`/`Update` folded
/// over the log up to and including the current index.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Highlight {
    pub node: Option<String>,
    pub relax_edge: Option<String>,
    pub update_edge: Option<String>,
}

/// Everything the renderer needs about an active run in one snapshot.
#[derive(Clone, Debug, Serialize)]
pub struct PlaybackView {
    pub phase: Phase,
    pub index: i32,
    pub step_count: usize,
    pub paused: bool,
    pub speed_ms: u32,
    pub highlight: Highlight,
    pub path: Vec<String>,
    pub path_reveal: usize,
    pub cost: Option<f32>,
}

/// Playback over a recorded step log: auto-advance, pause/resume,
/// stepping, scrubbing, and the post-completion path reveal.
///
/// The controller owns no timers. After every intent or applied tick
/// the host asks `next_tick()` and schedules the returned token; the
/// epoch guard in `tick()` makes pending callbacks from before the
/// latest intent fall through harmlessly.
pub struct Playback {
    steps: Vec<Step>,
    index: i32, // -1 = no run
    paused: bool,
    speed_ms: u32,
    path: Vec<String>,
    path_reveal: usize,
    epoch: u64,
    graph_ver: u64,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}

impl Playback {
    pub fn new() -> Self {
        Playback {
            steps: Vec::new(),
            index: -1,
            paused: false,
            speed_ms: DEFAULT_SPEED_MS,
            path: Vec::new(),
            path_reveal: 0,
            epoch: 0,
            graph_ver: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.index < 0 || self.steps.is_empty() {
            Phase::Idle
        } else if self.index as usize >= self.steps.len() - 1 {
            Phase::Finished
        } else {
            Phase::Armed
        }
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
    pub fn index(&self) -> i32 {
        self.index
    }
    pub fn paused(&self) -> bool {
        self.paused
    }
    pub fn speed_ms(&self) -> u32 {
        self.speed_ms
    }
    pub fn epoch(&self) -> u64 {
        self.epoch
    }
    /// The final path, once the `Done` step has been reached; empty
    /// before that and for unreachable targets.
    pub fn path(&self) -> &[String] {
        &self.path
    }
    pub fn path_reveal(&self) -> usize {
        self.path_reveal
    }

    pub fn current_step(&self) -> Option<&Step> {
        if self.index < 0 {
            return None;
        }
        self.steps.get(self.index as usize)
    }

    /// Computes a fresh step log and arms playback at its first step.
    /// Any pending tick from a previous run lands stale.
    pub fn start(&mut self, g: &Graph, start_id: &str, end_id: &str) {
        self.steps = dijkstra::run(g, start_id, end_id);
        self.index = 0;
        self.paused = false;
        self.path.clear();
        self.path_reveal = 0;
        self.epoch += 1;
        self.graph_ver = g.version();
        self.sync_path();
    }

    /// Drops the run entirely; used when a graph edit invalidates the
    /// recorded steps.
    pub fn cancel(&mut self) {
        self.steps.clear();
        self.index = -1;
        self.paused = false;
        self.path.clear();
        self.path_reveal = 0;
        self.epoch += 1;
    }

    /// True when the graph has been edited since this run was recorded.
    pub fn is_stale(&self, g: &Graph) -> bool {
        self.phase() != Phase::Idle && g.version() != self.graph_ver
    }

    /// The next timer the host should schedule, if any: an auto-advance
    /// while running, or a reveal increment after completion. Pausing
    /// suspends auto-advance but not the reveal.
    pub fn next_tick(&self) -> Option<Tick> {
        let due = match self.phase() {
            Phase::Idle => false,
            Phase::Armed => !self.paused,
            Phase::Finished => self.path_reveal + 1 < self.path.len(),
        };
        if due {
            Some(Tick {
                epoch: self.epoch,
                delay_ms: self.speed_ms,
            })
        } else {
            None
        }
    }

    /// Applies one scheduled advance. Returns whether anything happened;
    /// stale epochs and paused auto-advance do nothing.
    pub fn tick(&mut self, epoch: u64) -> bool {
        if epoch != self.epoch {
            return false;
        }
        match self.phase() {
            Phase::Idle => false,
            Phase::Armed => {
                if self.paused {
                    return false;
                }
                self.index += 1;
                self.sync_path();
                true
            }
            Phase::Finished => {
                if self.path_reveal + 1 < self.path.len() {
                    self.path_reveal += 1;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Advances the index by one, clamped to the log. With no run yet,
    /// starts one first and then advances, so a fresh session's first
    /// "step" lands on index 1. Works while paused.
    pub fn step_forward(&mut self, g: &Graph, start_id: &str, end_id: &str) {
        if self.phase() == Phase::Idle {
            self.start(g, start_id, end_id);
        }
        self.epoch += 1;
        let last = self.steps.len().saturating_sub(1) as i32;
        if self.index < last {
            self.index += 1;
        }
        self.sync_path();
    }

    /// Moves the index back by one, clamped to zero. Scrubbing off the
    /// `Done` step un-captures the path and resets the reveal.
    pub fn step_back(&mut self, g: &Graph, start_id: &str, end_id: &str) {
        if self.phase() == Phase::Idle {
            self.start(g, start_id, end_id);
        }
        self.epoch += 1;
        if self.index > 0 {
            self.index -= 1;
        }
        self.sync_path();
    }

    /// Flips pause; with no run yet, starts one (running).
    pub fn toggle_pause(&mut self, g: &Graph, start_id: &str, end_id: &str) {
        if self.phase() == Phase::Idle {
            self.start(g, start_id, end_id);
            return;
        }
        self.paused = !self.paused;
        self.epoch += 1;
    }

    /// Only the interval of future advances changes; the current index
    /// and reveal stay where they are.
    pub fn set_speed(&mut self, ms: u32) {
        self.speed_ms = ms.max(1);
        self.epoch += 1;
    }

    pub fn highlight(&self) -> Highlight {
        let mut h = Highlight::default();
        if self.index < 0 {
            return h;
        }
        for step in self.steps.iter().take(self.index as usize + 1) {
            match step {
                Step::Visit { node } => h.node = Some(node.clone()),
                Step::Relax { edge, .. } => h.relax_edge = Some(edge.clone()),
                Step::Update { edge, .. } => h.update_edge = Some(edge.clone()),
                Step::Done { .. } => {}
            }
        }
        h
    }

    /// A path node is revealed once its position is within one step of
    /// the reveal counter (the node ahead of the advancing segment
    /// lights up with it).
    pub fn is_node_revealed(&self, id: &str) -> bool {
        match self.path.iter().position(|n| n == id) {
            Some(i) => i <= self.path_reveal + 1,
            None => false,
        }
    }

    /// A path edge is revealed once its source position is within the
    /// reveal counter.
    pub fn is_edge_revealed(&self, source: &str, target: &str) -> bool {
        for i in 0..=self.path_reveal {
            if i + 1 >= self.path.len() {
                break;
            }
            if self.path[i] == source && self.path[i + 1] == target {
                return true;
            }
        }
        false
    }

    pub fn view(&self, g: &Graph) -> PlaybackView {
        PlaybackView {
            phase: self.phase(),
            index: self.index,
            step_count: self.steps.len(),
            paused: self.paused,
            speed_ms: self.speed_ms,
            highlight: self.highlight(),
            path: self.path.clone(),
            path_reveal: self.path_reveal,
            cost: dijkstra::path_cost(g, &self.path),
        }
    }

    // Keeps the captured path in lockstep with whether the current step
    // is the `Done` step; capture and un-capture both reset the reveal.
    fn sync_path(&mut self) {
        let captured = match self.current_step() {
            Some(Step::Done { path }) => Some(path.clone()),
            _ => None,
        };
        match captured {
            Some(p) => {
                if self.path != p {
                    self.path = p;
                    self.path_reveal = 0;
                }
            }
            None => {
                if !self.path.is_empty() {
                    self.path.clear();
                    self.path_reveal = 0;
                }
            }
        }
    }
}
