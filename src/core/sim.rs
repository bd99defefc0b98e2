use crate::core::collision;
use crate::core::config::SimConfig;
use crate::core::diagnostics;
use crate::core::gas::{self, particle_id, place_non_overlapping, seeded_rng};
use crate::core::history::History;
use crate::core::observables;
use crate::core::particle::{Particle, DIM};
use crate::error::{Error, Result};
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

/// Snapshot of the aggregate observables at the current time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Total kinetic energy (J).
    pub energy: f64,
    /// Equipartition temperature (K).
    pub temperature: f64,
    /// Ideal-gas pressure estimate (N/m).
    pub pressure: f64,
    /// Mean particle speed (m/s).
    pub mean_speed: f64,
    /// Simulated time (s).
    pub time: f64,
}

/// Simulation domain: static axis-aligned 2D box with elastic walls and a fixed time step.
///
/// The box spans `[0, width] x [0, height]`. The ensemble is owned exclusively; callers get
/// slices, so particle order (and therefore pair enumeration order) never changes.
/// Particles may be added only before the first step.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    particles: Vec<Particle>,
    rng: StdRng,
    time_now: f64,
    steps_taken: u64,
    collisions_total: u64,
    energy_history: History<f64>,
    temperature_history: History<f64>,
    pressure_history: History<f64>,
}

impl Simulation {
    /// Create an empty simulation from a validated configuration.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if any configuration field is out of range.
    pub fn new(config: SimConfig) -> Result<Self> {
        config.validate()?;
        let rng = seeded_rng(config.seed);
        log::debug!(
            "new simulation: box={:?} dt={} particle_count={} integrator={:?}",
            config.box_size,
            config.dt,
            config.particle_count,
            config.integrator
        );
        Ok(Self {
            particles: Vec::new(),
            rng,
            time_now: 0.0,
            steps_taken: 0,
            collisions_total: 0,
            energy_history: History::new(config.retention),
            temperature_history: History::new(config.retention),
            pressure_history: History::new(config.retention),
            config,
        })
    }

    /// Empty simulation in a square box with default particle parameters.
    pub fn square(box_size: f64, particle_count: usize, dt: f64) -> Result<Self> {
        Self::new(SimConfig::square(box_size, particle_count, dt))
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Returns current simulation time.
    pub fn time(&self) -> f64 {
        self.time_now
    }

    pub fn dt(&self) -> f64 {
        self.config.dt
    }

    pub fn box_size(&self) -> [f64; DIM] {
        self.config.box_size
    }

    /// Number of completed steps.
    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    /// Pair collisions resolved since construction.
    pub fn collisions_total(&self) -> u64 {
        self.collisions_total
    }

    /// Number of particles.
    pub fn num_particles(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to particle state between steps. The slice cannot grow or shrink.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Positions as a Vec of fixed-size arrays.
    pub fn positions(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(Particle::position).collect()
    }

    /// Velocities as a Vec of fixed-size arrays.
    pub fn velocities(&self) -> Vec<[f64; DIM]> {
        self.particles.iter().map(Particle::velocity).collect()
    }

    pub fn energy_history(&self) -> &History<f64> {
        &self.energy_history
    }

    pub fn temperature_history(&self) -> &History<f64> {
        &self.temperature_history
    }

    pub fn pressure_history(&self) -> &History<f64> {
        &self.pressure_history
    }

    /// Add one particle with the configured mass and radius; returns its id.
    ///
    /// Errors:
    /// - `Error::Sealed` once stepping has begun.
    /// - `Error::InvalidParam` for non-finite state or a center outside `[radius, L - radius]`.
    pub fn add_particle(&mut self, position: [f64; DIM], velocity: [f64; DIM]) -> Result<u32> {
        self.ensure_open()?;
        let radius = self.config.radius;
        for (k, &x) in position.iter().enumerate() {
            if !(radius..=self.config.box_size[k] - radius).contains(&x) {
                return Err(Error::InvalidParam(format!(
                    "position component {k} = {x} lies outside [radius, L - radius]"
                )));
            }
        }
        let id = self.next_id()?;
        let p = Particle::new(id, self.config.mass, radius, position, velocity)?
            .with_retention(self.config.retention);
        self.particles.push(p);
        Ok(id)
    }

    /// Fill the ensemble up to `particle_count` with non-overlapping particles whose velocity
    /// components are drawn from `N(0, k_B T / m)` at the configured initial temperature.
    ///
    /// Errors:
    /// - `Error::Sealed` once stepping has begun.
    /// - `Error::Placement` if a particle cannot be placed within the attempt budget; the
    ///   particles placed before the failure are kept.
    pub fn initialize_random_particles(&mut self) -> Result<()> {
        self.ensure_open()?;
        let cfg = &self.config;
        let sigma = (cfg.k_b * cfg.initial_temperature / cfg.mass).sqrt();
        let normal = Normal::new(0.0, sigma)
            .map_err(|e| Error::InvalidParam(format!("velocity distribution: {e}")))?;

        let start = self.particles.len();
        for index in start..cfg.particle_count {
            let r = place_non_overlapping(
                &mut self.rng,
                &self.particles,
                cfg.radius,
                &cfg.box_size,
                cfg.max_placement_attempts,
            )
            .map_err(|attempts| {
                log::warn!("placement gave up on particle {index} after {attempts} attempts");
                Error::Placement { index, attempts }
            })?;
            let mut v = [0.0_f64; DIM];
            v.iter_mut().for_each(|c| *c = normal.sample(&mut self.rng));
            let id = particle_id(index)?;
            let p = Particle::new(id, cfg.mass, cfg.radius, r, v)?.with_retention(cfg.retention);
            self.particles.push(p);
        }
        log::info!(
            "initialized {} particles at T0 = {} K (sigma = {:.3e} m/s)",
            self.particles.len() - start,
            cfg.initial_temperature,
            sigma
        );
        Ok(())
    }

    /// Advance `n` steps. Each step applies wall reflections, resolves pair collisions,
    /// integrates positions, re-applies the walls, then records energy, temperature and
    /// pressure.
    pub fn step(&mut self, n: usize) {
        let SimConfig {
            box_size,
            dt,
            integrator,
            ..
        } = self.config;
        for _ in 0..n {
            let resolved = gas::step_with(&mut self.particles, dt, box_size, integrator);
            self.collisions_total += resolved as u64;
            self.steps_taken += 1;
            self.time_now += dt;
            self.record();
            log::trace!(
                "step {} t={:.3e} collisions={}",
                self.steps_taken,
                self.time_now,
                resolved
            );
        }
    }

    /// Alias for [`Simulation::step`].
    pub fn advance(&mut self, steps: usize) {
        self.step(steps);
    }

    /// Reflect every particle off the box walls.
    pub fn apply_boundary_conditions(&mut self) {
        let [width, height] = self.config.box_size;
        gas::apply_boundary_conditions(&mut self.particles, width, height);
    }

    /// Resolve all pairs currently in contact; returns how many were resolved.
    pub fn detect_and_resolve_collisions(&mut self) -> usize {
        let resolved = collision::detect_and_resolve_collisions(&mut self.particles);
        self.collisions_total += resolved as u64;
        resolved
    }

    /// Total kinetic energy (J).
    pub fn total_energy(&self) -> f64 {
        observables::total_energy(&self.particles)
    }

    /// Equipartition temperature (K); zero for an empty ensemble.
    pub fn temperature(&self) -> f64 {
        observables::temperature(&self.particles, self.config.k_b)
    }

    /// `N k_B T / A`.
    pub fn pressure(&self) -> f64 {
        observables::pressure(&self.particles, self.config.area(), self.config.k_b)
    }

    pub fn total_momentum(&self) -> [f64; DIM] {
        observables::total_momentum(&self.particles)
    }

    pub fn mean_speed(&self) -> f64 {
        observables::mean_speed(&self.particles)
    }

    /// Per-axis temperatures; see [`observables::temperature_components`].
    pub fn temperature_components(&self) -> [f64; DIM] {
        observables::temperature_components(&self.particles, self.config.k_b)
    }

    pub fn statistics(&self) -> Statistics {
        Statistics {
            energy: self.total_energy(),
            temperature: self.temperature(),
            pressure: self.pressure(),
            mean_speed: self.mean_speed(),
            time: self.time_now,
        }
    }

    /// Speed histogram of the current ensemble.
    pub fn speed_histogram(&self, bins: usize, range: Option<(f64, f64)>) -> Result<(Vec<f64>, Vec<f64>)> {
        diagnostics::speed_histogram(&self.particles, bins, range)
    }

    /// Velocity-component histograms of the current ensemble.
    pub fn velocity_histogram(
        &self,
        axes: &[usize],
        bins: usize,
        range: Option<(f64, f64)>,
    ) -> Result<Vec<(Vec<f64>, Vec<f64>)>> {
        diagnostics::velocity_histogram(&self.particles, axes, bins, range)
    }

    // ============ Internal helpers ============

    fn record(&mut self) {
        let stats = self.statistics();
        self.energy_history.push(stats.energy);
        self.temperature_history.push(stats.temperature);
        self.pressure_history.push(stats.pressure);
    }

    fn ensure_open(&self) -> Result<()> {
        if self.steps_taken > 0 {
            return Err(Error::Sealed(
                "particles cannot be added after stepping has begun".into(),
            ));
        }
        Ok(())
    }

    fn next_id(&self) -> Result<u32> {
        particle_id(self.particles.len())
    }
}
