//! Bulk population and the stepping routine shared by every call shape.

use crate::core::collision::detect_and_resolve_collisions;
use crate::core::config::{DEFAULT_MASS, DEFAULT_MAX_PLACEMENT_ATTEMPTS, DEFAULT_RADIUS};
use crate::core::particle::{dot, sub, Integrator, Particle, DIM};
use crate::error::{Error, Result};
use rand::{rng, rngs::StdRng, Rng, SeedableRng};

/// Build `n` non-overlapping particles of default mass and radius in a `width x height` box.
///
/// Positions are uniform in `[radius, L - radius]` with overlap rejection. Every particle
/// moves at exactly `mean_speed` in a uniformly random direction.
///
/// Errors:
/// - `Error::InvalidParam` for a non-positive box, a box narrower than one diameter, or a
///   negative/non-finite speed.
/// - `Error::Placement` if the box is too crowded to fit all particles.
pub fn create_gas(
    n: usize,
    width: f64,
    height: f64,
    mean_speed: f64,
    seed: Option<u64>,
) -> Result<Vec<Particle>> {
    let box_size = [width, height];
    if !box_size.iter().all(|&l| l.is_finite() && l >= 2.0 * DEFAULT_RADIUS) {
        return Err(Error::InvalidParam(
            "box dimensions must be finite and at least 2 * radius".into(),
        ));
    }
    if !mean_speed.is_finite() || mean_speed < 0.0 {
        return Err(Error::InvalidParam(
            "mean_speed must be finite and >= 0".into(),
        ));
    }

    let mut rng = seeded_rng(seed);
    let mut particles: Vec<Particle> = Vec::new();
    for id in 0..n {
        let r = place_non_overlapping(
            &mut rng,
            &particles,
            DEFAULT_RADIUS,
            &box_size,
            DEFAULT_MAX_PLACEMENT_ATTEMPTS,
        )
        .map_err(|attempts| Error::Placement {
            index: id,
            attempts,
        })?;
        let angle = rng.random_range(0.0..std::f64::consts::TAU);
        let (sin, cos) = angle.sin_cos();
        let v = [mean_speed * cos, mean_speed * sin];
        particles.push(Particle::new(particle_id(id)?, DEFAULT_MASS, DEFAULT_RADIUS, r, v)?);
    }
    log::debug!("created gas of {} particles in {}x{} box", n, width, height);
    Ok(particles)
}

/// One free-flight step over an explicit particle list.
///
/// Identical physics to `Simulation::step`; returns the number of resolved pair collisions.
pub fn step(particles: &mut [Particle], dt: f64, width: f64, height: f64) -> usize {
    step_with(particles, dt, [width, height], Integrator::FreeFlight)
}

/// Reflect every particle off the walls of a `width x height` box.
pub fn apply_boundary_conditions(particles: &mut [Particle], width: f64, height: f64) {
    for p in particles.iter_mut() {
        p.reflect_off_walls(width, height);
    }
}

/// Boundaries, pair collisions, integration, then a containment pass so that every particle
/// ends the step inside `[radius, L - radius]`. Forces are consumed by the step.
///
/// Each particle gains exactly one history entry per step, and a containment clamp rewrites
/// that entry so the recorded trajectory never leaves the box.
pub(crate) fn step_with(
    particles: &mut [Particle],
    dt: f64,
    box_size: [f64; DIM],
    integrator: Integrator,
) -> usize {
    let [width, height] = box_size;
    for p in particles.iter_mut() {
        p.bounce_off_walls(width, height);
    }
    let resolved = detect_and_resolve_collisions(particles);
    for p in particles.iter_mut() {
        p.advance_with(dt, integrator);
        p.clear_force();
        if p.bounce_off_walls(width, height) {
            p.amend_last_record();
        }
    }
    resolved
}

/// Ensemble index as a particle id.
pub(crate) fn particle_id(index: usize) -> Result<u32> {
    u32::try_from(index).map_err(|_| Error::InvalidParam("too many particles for u32 ids".into()))
}

pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => SeedableRng::seed_from_u64(s),
        None => SeedableRng::seed_from_u64(rng().random()),
    }
}

/// Rejection-sample a center in `[radius, L - radius]` that does not overlap `existing`.
/// On failure returns the number of attempts spent.
pub(crate) fn place_non_overlapping<R: Rng>(
    rng: &mut R,
    existing: &[Particle],
    radius: f64,
    box_size: &[f64; DIM],
    max_attempts: usize,
) -> std::result::Result<[f64; DIM], usize> {
    for _ in 0..max_attempts {
        let mut r = [0.0_f64; DIM];
        for (k, r_k) in r.iter_mut().enumerate() {
            *r_k = rng.random_range(radius..=box_size[k] - radius);
        }
        if !overlaps_existing(existing, &r, radius) {
            return Ok(r);
        }
    }
    Err(max_attempts)
}

fn overlaps_existing(existing: &[Particle], r: &[f64; DIM], radius: f64) -> bool {
    existing.iter().any(|p| {
        let d = sub(r, &p.r);
        let min = radius + p.radius();
        dot(&d, &d) < min * min
    })
}
