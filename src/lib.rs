//! Two-dimensional ideal gas of hard disks in a square (or rectangular) box.
//!
//! Particles fly freely between contacts, reflect specularly off the walls and collide
//! elastically with each other. The engine advances with a fixed time step and records
//! total energy, temperature and pressure after every step so conservation can be checked.
//!
//! ```
//! use idealgas::{SimConfig, Simulation};
//!
//! let mut sim = Simulation::new(SimConfig::square(1e-8, 10, 1e-12).with_seed(1))?;
//! sim.initialize_random_particles()?;
//! let e0 = sim.total_energy();
//! sim.step(100);
//! assert!(((sim.total_energy() - e0) / e0).abs() < 0.01);
//! # Ok::<(), idealgas::error::Error>(())
//! ```

pub mod core;
pub mod error;

pub use crate::core::{
    create_gas, step, temperature, total_energy, Integrator, Particle, Retention, SimConfig,
    Simulation, Statistics, BOLTZMANN, DIM,
};
pub use crate::error::{Error, Result};
