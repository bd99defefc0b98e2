use crate::core::history::Retention;
use crate::core::particle::{Integrator, BOLTZMANN, DIM};
use crate::error::{Error, Result};

/// Mass of one N2 molecule, roughly (kg).
pub const DEFAULT_MASS: f64 = 4.65e-26;
/// Typical molecular radius (m).
pub const DEFAULT_RADIUS: f64 = 1e-10;
/// Room temperature (K), used for thermal initialization.
pub const DEFAULT_TEMPERATURE: f64 = 300.0;
/// Default integration step (s).
pub const DEFAULT_DT: f64 = 1e-12;
/// Per-particle attempt budget for rejection-sampled placement.
pub const DEFAULT_MAX_PLACEMENT_ATTEMPTS: usize = 1_000_000;

/// Construction parameters for a [`Simulation`](crate::core::Simulation).
///
/// Every field has a physically sensible default; `validate` rejects anything that would
/// produce an unusable ensemble.
#[derive(Debug, Clone, PartialEq)]
pub struct SimConfig {
    /// Box edge lengths `[width, height]` (m). The box spans `[0, L]` on each axis.
    pub box_size: [f64; DIM],
    /// Fixed time step (s).
    pub dt: f64,
    /// Number of particles placed by random initialization.
    pub particle_count: usize,
    /// Mass of every generated particle (kg).
    pub mass: f64,
    /// Radius of every generated particle (m).
    pub radius: f64,
    /// Target temperature for Maxwell-Boltzmann velocities (K).
    pub initial_temperature: f64,
    /// Boltzmann constant used by the temperature and pressure estimators (J/K).
    pub k_b: f64,
    pub integrator: Integrator,
    /// Retention policy for both the aggregate and the per-particle histories.
    pub retention: Retention,
    /// RNG seed; `None` draws one from the thread RNG.
    pub seed: Option<u64>,
    pub max_placement_attempts: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            box_size: [1e-8, 1e-8],
            dt: DEFAULT_DT,
            particle_count: 0,
            mass: DEFAULT_MASS,
            radius: DEFAULT_RADIUS,
            initial_temperature: DEFAULT_TEMPERATURE,
            k_b: BOLTZMANN,
            integrator: Integrator::default(),
            retention: Retention::default(),
            seed: None,
            max_placement_attempts: DEFAULT_MAX_PLACEMENT_ATTEMPTS,
        }
    }
}

impl SimConfig {
    /// Square box of edge `box_size` with `particle_count` particles and step `dt`.
    pub fn square(box_size: f64, particle_count: usize, dt: f64) -> Self {
        Self {
            box_size: [box_size; DIM],
            dt,
            particle_count,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_integrator(mut self, integrator: Integrator) -> Self {
        self.integrator = integrator;
        self
    }

    pub fn with_retention(mut self, retention: Retention) -> Self {
        self.retention = retention;
        self
    }

    /// Box area (m²).
    pub fn area(&self) -> f64 {
        self.box_size.iter().product()
    }

    /// Check every parameter.
    ///
    /// Errors:
    /// - `Error::InvalidParam` naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !self.box_size.iter().all(|&l| l.is_finite() && l > 0.0) {
            return Err(Error::InvalidParam(
                "box_size components must be finite and > 0".into(),
            ));
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(Error::InvalidParam("dt must be finite and > 0".into()));
        }
        if !self.mass.is_finite() || self.mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if self.box_size.iter().any(|&l| l < 2.0 * self.radius) {
            return Err(Error::InvalidParam(
                "box_size must be at least 2 * radius in every dimension".into(),
            ));
        }
        if !self.initial_temperature.is_finite() || self.initial_temperature < 0.0 {
            return Err(Error::InvalidParam(
                "initial_temperature must be finite and >= 0".into(),
            ));
        }
        if !self.k_b.is_finite() || self.k_b <= 0.0 {
            return Err(Error::InvalidParam("k_b must be finite and > 0".into()));
        }
        if self.max_placement_attempts == 0 {
            return Err(Error::InvalidParam(
                "max_placement_attempts must be > 0".into(),
            ));
        }
        Ok(())
    }
}
