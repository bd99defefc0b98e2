//! Core simulation data structures and the fixed-step hard-disk engine.
//!
//! Layering, leaf first: [`particle`] holds per-body state and physics, [`collision`] and
//! [`observables`] operate on particle slices, [`gas`] builds and steps explicit particle
//! lists, and [`sim`] owns an ensemble together with its box, time step and histories.

pub mod collision;
pub mod config;
pub mod diagnostics;
pub mod gas;
pub mod history;
pub mod observables;
pub mod particle;
pub mod sim;

pub use collision::{detect_and_resolve_collisions, resolve_collision, Resolution};
pub use config::SimConfig;
pub use gas::{create_gas, step};
pub use history::{History, Retention};
pub use observables::{temperature, total_energy};
pub use particle::{Integrator, Particle, BOLTZMANN, DIM};
pub use sim::{Simulation, Statistics};
