//! Electron orbit layout for the atom explorer.
//!
//! Each shell is a ring around the nucleus; electrons on a shell are spread
//! evenly by phase and circle at a speed that drops for outer shells. Every
//! orbit gets a random tilt and a small radius offset so the cloud does not
//! look like a flat Bohr diagram.

use std::f32::consts::{PI, TAU};

use glam::{EulerRot, Quat, Vec3};
use serde::Serialize;

use crate::chem::registry::ElementData;
use crate::config::OrbitConfig;
use crate::core::rng::Rng;

/// One electron's orbit. Positions are relative to the nucleus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectronOrbit {
    /// Shell index, 0 = innermost.
    pub shell: usize,
    pub radius: f32,
    /// Angular speed in radians per second.
    pub speed: f32,
    /// Starting phase in radians.
    pub offset: f32,
    /// Vertical wobble amplitude.
    pub wobble: f32,
    /// Orientation of the orbit plane.
    pub tilt: Quat,
}

impl ElectronOrbit {
    /// Position at `time` seconds.
    pub fn position_at(&self, time: f32) -> Vec3 {
        let a = time * self.speed + self.offset;
        let local = Vec3::new(
            a.cos() * self.radius,
            (a * 2.0).sin() * self.wobble,
            a.sin() * self.radius,
        );
        self.tilt * local
    }
}

/// Base radius of a shell before per-electron jitter.
pub fn shell_radius(element: &ElementData, shell: usize, config: &OrbitConfig) -> f32 {
    element.radius * config.shell_factor + shell as f32 * config.shell_gap
}

/// Radius that contains every orbit, for camera framing.
pub fn outer_radius(element: &ElementData, config: &OrbitConfig) -> f32 {
    match element.shells.len() {
        0 => element.radius,
        n => {
            let r = shell_radius(element, n - 1, config) + config.radius_jitter;
            r * (1.0 + config.wobble * config.wobble).sqrt()
        }
    }
}

/// Lay out one orbit per electron, shell by shell.
pub fn electron_orbits(element: &ElementData, config: &OrbitConfig, rng: &mut Rng) -> Vec<ElectronOrbit> {
    let mut orbits = Vec::with_capacity(element.electron_count() as usize);

    for (shell, &count) in element.shells.iter().enumerate() {
        let base = shell_radius(element, shell, config);
        let speed = config.base_speed - shell as f32 * config.speed_falloff;

        for i in 0..count {
            let radius = base + rng.range(0.0, config.radius_jitter);
            let tilt = Quat::from_euler(
                EulerRot::XYZ,
                rng.range(0.0, PI),
                rng.range(0.0, PI),
                0.0,
            );
            orbits.push(ElectronOrbit {
                shell,
                radius,
                speed,
                offset: (i as f32 / count as f32) * TAU,
                wobble: radius * config.wobble,
                tilt,
            });
        }
    }

    orbits
}

/// What the renderer draws for the explorer at one instant.
#[derive(Debug, Clone, Serialize)]
pub struct ExplorerFrame {
    pub symbol: String,
    pub name: String,
    pub atomic_number: u32,
    pub mass: f64,
    pub description: String,
    pub category_name: String,
    pub valence_electrons: u32,
    pub color: [f32; 3],
    pub nucleus_radius: f32,
    /// Radius enclosing every orbit, for camera framing.
    pub extent: f32,
    pub electrons: Vec<Vec3>,
}

/// The explorer's selected element and its animated electron cloud.
#[derive(Debug, Clone)]
pub struct OrbitModel {
    element: ElementData,
    orbits: Vec<ElectronOrbit>,
    config: OrbitConfig,
    time: f32,
}

impl OrbitModel {
    pub fn new(element: ElementData, config: OrbitConfig, rng: &mut Rng) -> Self {
        let orbits = electron_orbits(&element, &config, rng);
        Self {
            element,
            orbits,
            config,
            time: 0.0,
        }
    }

    /// Switch element; the orbits are regenerated and the clock restarts.
    pub fn set_element(&mut self, element: ElementData, rng: &mut Rng) {
        self.orbits = electron_orbits(&element, &self.config, rng);
        self.element = element;
        self.time = 0.0;
    }

    pub fn element(&self) -> &ElementData {
        &self.element
    }

    pub fn tick(&mut self, dt: f32) {
        self.time += dt;
    }

    pub fn frame(&self) -> ExplorerFrame {
        ExplorerFrame {
            symbol: self.element.symbol.clone(),
            name: self.element.name.clone(),
            atomic_number: self.element.atomic_number,
            mass: self.element.mass,
            description: self.element.description.clone(),
            category_name: self.element.category_name.clone(),
            valence_electrons: self.element.valence_electrons,
            color: self.element.color,
            nucleus_radius: self.element.radius,
            extent: outer_radius(&self.element, &self.config),
            electrons: self.orbits.iter().map(|o| o.position_at(self.time)).collect(),
        }
    }
}
