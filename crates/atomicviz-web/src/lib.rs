//! WASM bridge for AtomicViz.
//!
//! JS calls the exported functions below: inbound calls enqueue events,
//! `app_tick` applies them, and the `*_snapshot` / `*_frame` getters hand the
//! renderer JSON strings.

pub mod runner;

pub use runner::AppRunner;

use std::cell::RefCell;

use atomicviz_core::{AppConfig, AtomId, Element, InputEvent, Particle, SandboxEvent, ViewMode};
use glam::Vec3;
use log::{info, warn};
use wasm_bindgen::prelude::*;

thread_local! {
    static RUNNER: RefCell<Option<AppRunner>> = RefCell::new(None);
}

/// Run `f` against the runner. Calls made before `app_init` are dropped.
fn with_runner<R>(f: impl FnOnce(&mut AppRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| {
        let mut borrow = cell.borrow_mut();
        match borrow.as_mut() {
            Some(runner) => Some(f(runner)),
            None => {
                warn!("AtomicViz not initialized. Call app_init() first.");
                None
            }
        }
    })
}

fn push(event: impl Into<InputEvent>) {
    with_runner(|r| r.push_input(event));
}

/// Parse a name from JS, logging and dropping it if unknown.
fn parse_or_warn<T: std::str::FromStr>(value: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|err| warn!("{}", err)).ok()
}

/// Create the application. `config_json` may be empty or a partial config.
#[wasm_bindgen]
pub fn app_init(config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    let mut config = if config_json.trim().is_empty() {
        AppConfig::default()
    } else {
        AppConfig::from_json(config_json).map_err(|e| JsValue::from_str(&e.to_string()))?
    };
    if config.sandbox.seed.is_none() {
        config.sandbox.seed = Some((js_sys::Math::random() * u32::MAX as f64) as u64);
    }

    let runner = AppRunner::new(config).map_err(|e| JsValue::from_str(&e.to_string()))?;
    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    info!("atomicviz: initialized");
    Ok(())
}

#[wasm_bindgen]
pub fn app_tick(dt: f32) {
    with_runner(|r| r.tick(dt));
}

// ---- View selection ----

#[wasm_bindgen]
pub fn set_view_mode(name: &str) {
    if let Some(mode) = parse_or_warn::<ViewMode>(name) {
        push(InputEvent::SetViewMode(mode));
    }
}

#[wasm_bindgen]
pub fn select_element(symbol: &str) {
    push(InputEvent::SelectElement(symbol.trim().to_string()));
}

// ---- Molecule sandbox ----

#[wasm_bindgen]
pub fn sandbox_add_atom(symbol: &str) {
    if let Some(element) = parse_or_warn::<Element>(symbol) {
        push(SandboxEvent::AddAtom { element });
    }
}

#[wasm_bindgen]
pub fn sandbox_drag_atom(id: u32, x: f32, y: f32, z: f32) {
    push(SandboxEvent::DragAtom {
        id: AtomId(id),
        position: Vec3::new(x, y, z),
    });
}

#[wasm_bindgen]
pub fn sandbox_drag_end(id: u32) {
    push(SandboxEvent::DragEnd { id: AtomId(id) });
}

#[wasm_bindgen]
pub fn sandbox_remove_atom(id: u32) {
    push(SandboxEvent::RemoveAtom { id: AtomId(id) });
}

#[wasm_bindgen]
pub fn sandbox_reset() {
    push(SandboxEvent::Reset);
}

// ---- Reaction lab ----

#[wasm_bindgen]
pub fn select_reaction(id: &str) {
    push(InputEvent::SelectReaction(id.trim().to_string()));
}

#[wasm_bindgen]
pub fn reaction_toggle_play() {
    push(InputEvent::TogglePlayback);
}

#[wasm_bindgen]
pub fn reaction_reset() {
    push(InputEvent::ResetReaction);
}

// ---- Atom builder ----

#[wasm_bindgen]
pub fn builder_add(kind: &str) {
    if let Some(particle) = parse_or_warn::<Particle>(kind) {
        push(InputEvent::AddParticle(particle));
    }
}

#[wasm_bindgen]
pub fn builder_reset() {
    push(InputEvent::ResetBuilder);
}

// ---- Snapshots ----

fn snapshot(f: impl FnOnce(&mut AppRunner) -> String) -> String {
    with_runner(f).unwrap_or_else(|| "null".to_string())
}

#[wasm_bindgen]
pub fn sandbox_snapshot() -> String {
    snapshot(|r| r.sandbox_snapshot_json())
}

#[wasm_bindgen]
pub fn reaction_frame() -> String {
    snapshot(|r| r.reaction_frame_json())
}

#[wasm_bindgen]
pub fn builder_snapshot() -> String {
    snapshot(|r| r.builder_snapshot_json())
}

#[wasm_bindgen]
pub fn explorer_frame() -> String {
    snapshot(|r| r.explorer_frame_json())
}

#[wasm_bindgen]
pub fn periodic_table() -> String {
    snapshot(|r| r.periodic_table_json())
}

#[wasm_bindgen]
pub fn app_status() -> String {
    snapshot(|r| r.status_json())
}
