use crate::core::history::{History, Retention};
use crate::error::{Error, Result};

/// Fixed spatial dimension (2D).
pub const DIM: usize = 2;

/// Boltzmann constant in J/K (exact SI value).
pub const BOLTZMANN: f64 = 1.380649e-23;

/// Position-update scheme applied between contact events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Integrator {
    /// Straight-line motion: `x += v·dt`; velocity changes only at contacts.
    #[default]
    FreeFlight,
    /// Velocity-Verlet over the accumulated external force, held constant across the step.
    Verlet,
}

/// A hard-disk gas particle in D=2.
///
/// Mass and radius are fixed at creation. Position and velocity change through
/// integration, wall reflection and pair collisions. Each integration step records both
/// into the trajectory histories; a standalone [`Particle::reflect_off_walls`] call also
/// records the velocity. A full ensemble step leaves exactly one entry in each history,
/// holding the state at the end of the step, so the two histories line up index by index.
#[derive(Debug, Clone)]
pub struct Particle {
    id: u32,
    mass: f64,
    radius: f64,
    pub(crate) r: [f64; DIM],
    pub(crate) v: [f64; DIM],
    force: [f64; DIM],
    position_history: History<[f64; DIM]>,
    velocity_history: History<[f64; DIM]>,
}

impl Particle {
    /// Create a new particle after validating invariants. Histories start with the
    /// initial state and keep every entry; see [`Particle::with_retention`].
    ///
    /// Errors:
    /// - `Error::InvalidParam` if `radius` or `mass` is non-positive or any component is NaN/inf.
    pub fn new(id: u32, mass: f64, radius: f64, r: [f64; DIM], v: [f64; DIM]) -> Result<Self> {
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        if !all_finite(&r) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !all_finite(&v) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        let mut p = Self {
            id,
            mass,
            radius,
            r,
            v,
            force: [0.0; DIM],
            position_history: History::default(),
            velocity_history: History::default(),
        };
        p.position_history.push(r);
        p.velocity_history.push(v);
        Ok(p)
    }

    /// Replace the trajectory histories with ones under `retention`, seeded with the current state.
    pub fn with_retention(mut self, retention: Retention) -> Self {
        self.position_history = History::new(retention);
        self.velocity_history = History::new(retention);
        self.position_history.push(self.r);
        self.velocity_history.push(self.v);
        self
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    pub fn position(&self) -> [f64; DIM] {
        self.r
    }

    #[inline]
    pub fn velocity(&self) -> [f64; DIM] {
        self.v
    }

    /// Accumulated external force for the current step (N).
    #[inline]
    pub fn force(&self) -> [f64; DIM] {
        self.force
    }

    pub fn position_history(&self) -> &History<[f64; DIM]> {
        &self.position_history
    }

    pub fn velocity_history(&self) -> &History<[f64; DIM]> {
        &self.velocity_history
    }

    /// Set position (validated as finite).
    pub fn set_position(&mut self, r: [f64; DIM]) -> Result<()> {
        if !all_finite(&r) {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        self.r = r;
        Ok(())
    }

    /// Set velocity (validated as finite).
    pub fn set_velocity(&mut self, v: [f64; DIM]) -> Result<()> {
        if !all_finite(&v) {
            return Err(Error::InvalidParam("velocity must be finite".into()));
        }
        self.v = v;
        Ok(())
    }

    /// Add `f` to the force accumulator. Only the Verlet integrator consumes it.
    pub fn apply_force(&mut self, f: [f64; DIM]) -> Result<()> {
        if !all_finite(&f) {
            return Err(Error::InvalidParam("force must be finite".into()));
        }
        for (acc, fk) in self.force.iter_mut().zip(f) {
            *acc += fk;
        }
        Ok(())
    }

    #[inline]
    pub fn clear_force(&mut self) {
        self.force = [0.0; DIM];
    }

    /// Free flight over `dt`: `x += v·dt`. `dt` must be positive (not checked).
    pub fn advance(&mut self, dt: f64) {
        self.advance_with(dt, Integrator::FreeFlight);
    }

    /// Move the particle over `dt` with the given scheme and record the new state.
    pub fn advance_with(&mut self, dt: f64, integrator: Integrator) {
        match integrator {
            Integrator::FreeFlight => {
                for (x, &vk) in self.r.iter_mut().zip(&self.v) {
                    *x += vk * dt;
                }
            }
            Integrator::Verlet => {
                let half = 0.5 * dt / self.mass;
                for k in 0..DIM {
                    let v_half = self.v[k] + self.force[k] * half;
                    self.r[k] += v_half * dt;
                    self.v[k] = v_half + self.force[k] * half;
                }
            }
        }
        self.position_history.push(self.r);
        self.velocity_history.push(self.v);
    }

    /// Specular reflection off the walls of a `[0, width] x [0, height]` box.
    ///
    /// Each axis is checked independently: touching or crossing the lower wall forces the
    /// component positive and clamps to `radius`; the upper wall forces it negative and clamps
    /// to `L - radius`. A corner hit flips both components. Returns whether any wall was touched.
    pub fn reflect_off_walls(&mut self, width: f64, height: f64) -> bool {
        let hit = self.bounce_off_walls(width, height);
        self.velocity_history.push(self.v);
        hit
    }

    /// Wall reflection without touching the histories.
    pub(crate) fn bounce_off_walls(&mut self, width: f64, height: f64) -> bool {
        let extent = [width, height];
        let mut hit = false;
        for (k, &len) in extent.iter().enumerate() {
            if self.r[k] - self.radius <= 0.0 {
                self.v[k] = self.v[k].abs();
                self.r[k] = self.radius;
                hit = true;
            }
            if self.r[k] + self.radius >= len {
                self.v[k] = -self.v[k].abs();
                self.r[k] = len - self.radius;
                hit = true;
            }
        }
        hit
    }

    /// Overwrite the newest history entries with the current state.
    pub(crate) fn amend_last_record(&mut self) {
        self.position_history.replace_last(self.r);
        self.velocity_history.replace_last(self.v);
    }

    /// |v|^2
    #[inline]
    pub fn speed_squared(&self) -> f64 {
        dot(&self.v, &self.v)
    }

    #[inline]
    pub fn speed(&self) -> f64 {
        self.speed_squared().sqrt()
    }

    /// Returns the particle's kinetic energy: 1/2 m |v|^2.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.speed_squared()
    }

    /// Linear momentum m·v.
    #[inline]
    pub fn momentum(&self) -> [f64; DIM] {
        self.v.map(|c| self.mass * c)
    }

    /// Single-particle temperature proxy `m |v|^2 / (2 k_B)`; diagnostic only.
    #[inline]
    pub fn equivalent_temperature(&self, k_b: f64) -> f64 {
        self.mass * self.speed_squared() / (2.0 * k_b)
    }

    /// Distance between centers.
    pub fn distance_to(&self, other: &Particle) -> f64 {
        let d = sub(&self.r, &other.r);
        dot(&d, &d).sqrt()
    }

    /// Contact test; touching (distance equal to the radius sum) counts.
    pub fn is_colliding_with(&self, other: &Particle) -> bool {
        self.distance_to(other) <= self.radius + other.radius
    }
}

// ============ Vector helpers ============

#[inline]
pub(crate) fn dot(a: &[f64; DIM], b: &[f64; DIM]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[inline]
pub(crate) fn sub(a: &[f64; DIM], b: &[f64; DIM]) -> [f64; DIM] {
    let mut out = [0.0_f64; DIM];
    for (o, (x, y)) in out.iter_mut().zip(a.iter().zip(b.iter())) {
        *o = x - y;
    }
    out
}

#[inline]
fn all_finite(a: &[f64; DIM]) -> bool {
    a.iter().all(|x| x.is_finite())
}
