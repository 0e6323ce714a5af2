//! Particle atom builder: add protons, neutrons and electrons one at a time
//! and see which element (and ion/isotope) results.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use serde::Serialize;

use crate::chem::registry::{ElementData, ElementRegistry};
use crate::config::BuilderConfig;
use crate::error::ParseNameError;

/// Golden angle in radians (137.5°).
const GOLDEN_ANGLE: f32 = 137.5 * PI / 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Particle {
    Proton,
    Neutron,
    Electron,
}

impl Particle {
    pub fn name(self) -> &'static str {
        match self {
            Particle::Proton => "proton",
            Particle::Neutron => "neutron",
            Particle::Electron => "electron",
        }
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Particle {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "proton" | "protons" | "p" => Ok(Particle::Proton),
            "neutron" | "neutrons" | "n" => Ok(Particle::Neutron),
            "electron" | "electrons" | "e" => Ok(Particle::Electron),
            _ => Err(ParseNameError::new("particle", s)),
        }
    }
}

/// A placed nucleon, relative to the nucleus center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Nucleon {
    pub particle: Particle,
    pub position: Vec3,
}

/// Outbound model for the builder view.
#[derive(Debug, Clone, Serialize)]
pub struct BuilderSnapshot {
    pub protons: u32,
    pub neutrons: u32,
    pub electrons: u32,
    pub mass_number: u32,
    pub charge: i32,
    /// Symbol of the element with this proton count, if the table has one.
    pub symbol: Option<String>,
    pub name: Option<String>,
    pub nucleus_radius: f32,
    pub nucleons: Vec<Nucleon>,
    pub electron_positions: Vec<Vec3>,
}

#[derive(Debug, Clone, Default)]
pub struct AtomBuilder {
    protons: u32,
    neutrons: u32,
    electrons: u32,
    config: BuilderConfig,
}

impl AtomBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        Self {
            protons: 0,
            neutrons: 0,
            electrons: 0,
            config,
        }
    }

    pub fn add(&mut self, particle: Particle) {
        match particle {
            Particle::Proton => self.protons += 1,
            Particle::Neutron => self.neutrons += 1,
            Particle::Electron => self.electrons += 1,
        }
    }

    pub fn reset(&mut self) {
        self.protons = 0;
        self.neutrons = 0;
        self.electrons = 0;
    }

    pub fn protons(&self) -> u32 {
        self.protons
    }

    pub fn neutrons(&self) -> u32 {
        self.neutrons
    }

    pub fn electrons(&self) -> u32 {
        self.electrons
    }

    pub fn mass_number(&self) -> u32 {
        self.protons + self.neutrons
    }

    /// Net charge: protons minus electrons.
    pub fn charge(&self) -> i32 {
        self.protons as i32 - self.electrons as i32
    }

    pub fn nucleus_radius(&self) -> f32 {
        (self.mass_number() as f32).cbrt() * self.config.nucleon_scale
    }

    /// Element whose atomic number equals the proton count.
    pub fn identify<'r>(&self, registry: &'r ElementRegistry) -> Option<&'r ElementData> {
        registry.get_by_number(self.protons)
    }

    /// Pack protons then neutrons on a sphere of radius [`Self::nucleus_radius`].
    pub fn nucleon_positions(&self) -> Vec<Nucleon> {
        let count = self.mass_number();
        let radius = self.nucleus_radius();
        let n = count as f32;

        (0..count)
            .map(|idx| {
                let particle = if idx < self.protons {
                    Particle::Proton
                } else {
                    Particle::Neutron
                };
                let cos_phi = (-1.0 + 2.0 * idx as f32 / n.max(1.0)).clamp(-1.0, 1.0);
                let phi = cos_phi.acos();
                let theta = (n * PI).sqrt() * phi;
                let position = Vec3::new(
                    theta.cos() * phi.sin(),
                    theta.sin() * phi.sin(),
                    phi.cos(),
                ) * radius;
                Nucleon { particle, position }
            })
            .collect()
    }

    /// Electrons on flat rings, spaced by the golden angle.
    pub fn electron_positions(&self) -> Vec<Vec3> {
        (0..self.electrons)
            .map(|i| {
                let shell = ((i + 1) as f32).sqrt().floor();
                let r = self.config.electron_base_radius + self.config.electron_shell_gap * shell;
                let angle = i as f32 * GOLDEN_ANGLE;
                Vec3::new(angle.cos() * r, angle.sin() * r, 0.0)
            })
            .collect()
    }

    pub fn snapshot(&self, registry: &ElementRegistry) -> BuilderSnapshot {
        let element = self.identify(registry);
        BuilderSnapshot {
            protons: self.protons,
            neutrons: self.neutrons,
            electrons: self.electrons,
            mass_number: self.mass_number(),
            charge: self.charge(),
            symbol: element.map(|e| e.symbol.clone()),
            name: element.map(|e| e.name.clone()),
            nucleus_radius: self.nucleus_radius(),
            nucleons: self.nucleon_positions(),
            electron_positions: self.electron_positions(),
        }
    }
}
