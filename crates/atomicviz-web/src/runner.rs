use atomicviz_core::{AppConfig, AppState, DataError, InputEvent, InputQueue};
use log::error;
use serde::Serialize;

/// Owns the application state and its pending input.
///
/// The bridge keeps one runner in a `thread_local!` and exports free
/// functions via `#[wasm_bindgen]`. Inbound calls only enqueue events; they
/// are applied in order at the start of the next `tick`, so JSON snapshots
/// read after a tick always see a consistent state.
pub struct AppRunner {
    state: AppState,
    input: InputQueue,
}

impl AppRunner {
    pub fn new(config: AppConfig) -> Result<Self, DataError> {
        Ok(Self {
            state: AppState::new(config)?,
            input: InputQueue::new(),
        })
    }

    pub fn push_input(&mut self, event: impl Into<InputEvent>) {
        self.input.push(event);
    }

    /// Apply queued events, then advance clocks by `dt` seconds.
    pub fn tick(&mut self, dt: f32) {
        for event in self.input.drain() {
            self.state.handle(&event);
        }
        self.state.tick(dt);
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn pending_inputs(&self) -> usize {
        self.input.len()
    }

    // ---- JSON snapshots for the renderer ----

    pub fn sandbox_snapshot_json(&self) -> String {
        to_json("sandbox snapshot", &self.state.sandbox().snapshot())
    }

    pub fn reaction_frame_json(&self) -> String {
        to_json("reaction frame", &self.state.player().frame())
    }

    pub fn builder_snapshot_json(&self) -> String {
        to_json("builder snapshot", &self.state.builder_snapshot())
    }

    pub fn explorer_frame_json(&self) -> String {
        to_json("explorer frame", &self.state.explorer().frame())
    }

    pub fn periodic_table_json(&self) -> String {
        to_json("periodic table", &self.state.periodic_table())
    }

    pub fn status_json(&self) -> String {
        to_json("status", &self.state.status())
    }
}

/// Serialization of these plain structs cannot realistically fail; if it
/// does, the renderer gets `null` and the console gets the reason.
fn to_json<T: Serialize>(what: &str, value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|err| {
        error!("failed to serialize {}: {}", what, err);
        "null".to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use atomicviz_core::{AtomId, Element, Particle, SandboxEvent, ViewMode};
    use glam::Vec3;
    use serde_json::Value;

    fn runner() -> AppRunner {
        AppRunner::new(AppConfig::default()).unwrap()
    }

    #[test]
    fn events_apply_on_tick() {
        let mut runner = runner();
        runner.push_input(SandboxEvent::AddAtom { element: Element::O });
        assert_eq!(runner.pending_inputs(), 1);
        assert_eq!(runner.state().sandbox().engine().atom_count(), 0);

        runner.tick(1.0 / 60.0);
        assert_eq!(runner.pending_inputs(), 0);
        assert_eq!(runner.state().sandbox().engine().atom_count(), 1);
    }

    #[test]
    fn sandbox_json_reflects_bonds() {
        let mut runner = runner();
        runner.push_input(SandboxEvent::AddAtom { element: Element::O });
        runner.push_input(SandboxEvent::AddAtom { element: Element::H });
        runner.push_input(SandboxEvent::DragAtom { id: AtomId(1), position: Vec3::ZERO });
        runner.push_input(SandboxEvent::DragAtom { id: AtomId(2), position: Vec3::new(0.0, 1.4, 0.0) });
        runner.push_input(SandboxEvent::DragEnd { id: AtomId(2) });
        runner.tick(0.016);

        let json: Value = serde_json::from_str(&runner.sandbox_snapshot_json()).unwrap();
        assert_eq!(json["atoms"].as_array().unwrap().len(), 2);
        assert_eq!(json["bonds"].as_array().unwrap().len(), 1);
        assert_eq!(json["bonds"][0]["a"], 2);
        assert_eq!(json["bonds"][0]["b"], 1);
        let y = json["atoms"][1]["position"][1].as_f64().unwrap();
        assert!((y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn other_views_serialize() {
        let mut runner = runner();
        runner.push_input(InputEvent::SetViewMode(ViewMode::Builder));
        runner.push_input(InputEvent::AddParticle(Particle::Proton));
        runner.tick(0.016);

        let status: Value = serde_json::from_str(&runner.status_json()).unwrap();
        assert_eq!(status["view_mode"], "builder");
        assert_eq!(status["reaction"], "water-formation");

        let builder: Value = serde_json::from_str(&runner.builder_snapshot_json()).unwrap();
        assert_eq!(builder["symbol"], "H");
        assert_eq!(builder["charge"], 1);

        let frame: Value = serde_json::from_str(&runner.reaction_frame_json()).unwrap();
        assert_eq!(frame["stage"], 0);
        assert_eq!(frame["atoms"].as_array().unwrap().len(), 6);

        let explorer: Value = serde_json::from_str(&runner.explorer_frame_json()).unwrap();
        assert_eq!(explorer["symbol"], "U");
        assert_eq!(explorer["electrons"].as_array().unwrap().len(), 92);
    }

    #[test]
    fn periodic_table_marks_selected_element() {
        let mut runner = runner();
        runner.push_input(InputEvent::SelectElement("He".into()));
        runner.tick(0.016);

        let table: Value = serde_json::from_str(&runner.periodic_table_json()).unwrap();
        let cells = table.as_array().unwrap();
        assert_eq!(cells.len(), 39);

        let active: Vec<&Value> = cells.iter().filter(|c| c["active"] == true).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0]["symbol"], "He");
        assert_eq!(active[0]["category"], "noble_gas");
        assert_eq!(active[0]["atomic_number"], 2);
        assert!(active[0]["xpos"].is_u64() && active[0]["ypos"].is_u64());

        let explorer: Value = serde_json::from_str(&runner.explorer_frame_json()).unwrap();
        assert_eq!(explorer["category_name"], "Noble Gas");
        assert_eq!(explorer["valence_electrons"], 2);
        assert!(explorer["extent"].as_f64().unwrap() > 0.0);
    }
}
