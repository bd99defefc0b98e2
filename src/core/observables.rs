//! Aggregate observables over an ordered particle sequence.
//!
//! These are the single implementation behind both the free-function API and the
//! `Simulation` accessors. Every function is total: an empty slice yields zeros.

use crate::core::particle::{Particle, DIM};

/// Σ ½ m |v|² (J).
pub fn total_energy(particles: &[Particle]) -> f64 {
    particles.iter().map(Particle::kinetic_energy).sum()
}

/// Σ m v (kg·m/s).
pub fn total_momentum(particles: &[Particle]) -> [f64; DIM] {
    let mut out = [0.0_f64; DIM];
    for p in particles {
        for (o, c) in out.iter_mut().zip(p.momentum()) {
            *o += c;
        }
    }
    out
}

/// 2D equipartition temperature `Σ m |v|² / (2 N k_B)` (K). Zero for an empty ensemble.
pub fn temperature(particles: &[Particle], k_b: f64) -> f64 {
    if particles.is_empty() {
        return 0.0;
    }
    let sum_mv2: f64 = particles.iter().map(|p| p.mass() * p.speed_squared()).sum();
    sum_mv2 / (2.0 * particles.len() as f64 * k_b)
}

/// Per-axis temperatures `Σ m v_k² / (N k_B)`; their mean equals [`temperature`].
/// An isotropic gas has the components roughly equal.
pub fn temperature_components(particles: &[Particle], k_b: f64) -> [f64; DIM] {
    let mut out = [0.0_f64; DIM];
    if particles.is_empty() {
        return out;
    }
    for p in particles {
        let v = p.velocity();
        for (o, vk) in out.iter_mut().zip(v) {
            *o += p.mass() * vk * vk;
        }
    }
    let denom = particles.len() as f64 * k_b;
    out.map(|s| s / denom)
}

/// Ideal-gas pressure estimate `N k_B T / A` (N/m in 2D).
pub fn pressure(particles: &[Particle], area: f64, k_b: f64) -> f64 {
    if particles.is_empty() {
        return 0.0;
    }
    particles.len() as f64 * k_b * temperature(particles, k_b) / area
}

/// Mean of |v| over the ensemble; zero when empty.
pub fn mean_speed(particles: &[Particle]) -> f64 {
    if particles.is_empty() {
        return 0.0;
    }
    particles.iter().map(Particle::speed).sum::<f64>() / particles.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::particle::BOLTZMANN;
    use crate::error::Result;

    fn pair() -> Result<Vec<Particle>> {
        Ok(vec![
            Particle::new(0, 2.0, 0.1, [1.0, 1.0], [3.0, 4.0])?,
            Particle::new(1, 1.0, 0.1, [2.0, 2.0], [0.0, -2.0])?,
        ])
    }

    #[test]
    fn empty_ensemble_degrades_to_zero() {
        let empty: Vec<Particle> = Vec::new();
        assert_eq!(total_energy(&empty), 0.0);
        assert_eq!(temperature(&empty, BOLTZMANN), 0.0);
        assert_eq!(pressure(&empty, 1.0, BOLTZMANN), 0.0);
        assert_eq!(mean_speed(&empty), 0.0);
        assert_eq!(total_momentum(&empty), [0.0, 0.0]);
        assert_eq!(temperature_components(&empty, BOLTZMANN), [0.0, 0.0]);
    }

    #[test]
    fn sums_over_particles() -> Result<()> {
        let ps = pair()?;
        // 0.5*2*25 + 0.5*1*4
        assert!((total_energy(&ps) - 27.0).abs() < 1e-12);
        assert_eq!(total_momentum(&ps), [6.0, 6.0]);
        assert!((mean_speed(&ps) - 3.5).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn temperature_uses_2d_equipartition() -> Result<()> {
        let ps = pair()?;
        // (2*25 + 1*4) / (2 * 2 * 1) = 13.5 with k = 1
        assert!((temperature(&ps, 1.0) - 13.5).abs() < 1e-12);
        let [tx, ty] = temperature_components(&ps, 1.0);
        assert!((tx - 9.0).abs() < 1e-12);
        assert!((ty - 18.0).abs() < 1e-12);
        assert!((0.5 * (tx + ty) - 13.5).abs() < 1e-12);
        // N k T / A
        assert!((pressure(&ps, 4.0, 1.0) - 2.0 * 13.5 / 4.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn doubling_velocities_quadruples_temperature() -> Result<()> {
        let mut ps = pair()?;
        let t0 = temperature(&ps, BOLTZMANN);
        for p in &mut ps {
            let v = p.velocity();
            p.set_velocity(v.map(|c| 2.0 * c))?;
        }
        let ratio = temperature(&ps, BOLTZMANN) / t0;
        assert!((ratio - 4.0).abs() < 1e-9);
        Ok(())
    }
}
