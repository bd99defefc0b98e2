//! Velocity-distribution diagnostics for the statistics layer.
//!
//! Histograms return `(edges, counts)` with `bins + 1` edges; the last bin is closed so
//! the maximum sample is counted. Theory curves are the 2D Maxwell-Boltzmann laws.

use crate::core::particle::{Particle, DIM};
use crate::error::{Error, Result};

/// Histograms of selected velocity components.
///
/// Parameters
/// - axes: component indices, each `< DIM`
/// - bins: number of bins (> 0)
/// - range: optional `(min, max)`; defaults to the data min/max per axis
pub fn velocity_histogram(
    particles: &[Particle],
    axes: &[usize],
    bins: usize,
    range: Option<(f64, f64)>,
) -> Result<Vec<(Vec<f64>, Vec<f64>)>> {
    if let Some(&bad) = axes.iter().find(|&&a| a >= DIM) {
        return Err(Error::InvalidParam(format!(
            "axis {bad} out of range for dimension {DIM}"
        )));
    }
    axes.iter()
        .map(|&axis| {
            let samples: Vec<f64> = particles.iter().map(|p| p.velocity()[axis]).collect();
            histogram(&samples, bins, range)
        })
        .collect()
}

/// Histogram of speeds |v|.
pub fn speed_histogram(
    particles: &[Particle],
    bins: usize,
    range: Option<(f64, f64)>,
) -> Result<(Vec<f64>, Vec<f64>)> {
    let samples: Vec<f64> = particles.iter().map(Particle::speed).collect();
    histogram(&samples, bins, range)
}

/// 2D speed distribution (Rayleigh): `v/σ² · exp(-v²/2σ²)` with `σ² = k_B T / m`.
pub fn rayleigh_pdf(speed: f64, temperature: f64, mass: f64, k_b: f64) -> f64 {
    let sigma2 = k_b * temperature / mass;
    if sigma2 <= 0.0 || speed < 0.0 {
        return 0.0;
    }
    speed / sigma2 * (-speed * speed / (2.0 * sigma2)).exp()
}

/// Single-component distribution: zero-mean Gaussian with `σ² = k_B T / m`.
pub fn gaussian_component_pdf(v: f64, temperature: f64, mass: f64, k_b: f64) -> f64 {
    let sigma2 = k_b * temperature / mass;
    if sigma2 <= 0.0 {
        return 0.0;
    }
    (-v * v / (2.0 * sigma2)).exp() / (2.0 * std::f64::consts::PI * sigma2).sqrt()
}

fn histogram(samples: &[f64], bins: usize, range: Option<(f64, f64)>) -> Result<(Vec<f64>, Vec<f64>)> {
    if bins == 0 {
        return Err(Error::InvalidParam("bins must be > 0".into()));
    }
    let (lo, hi) = match range {
        Some((lo, hi)) => {
            if !(lo.is_finite() && hi.is_finite() && lo < hi) {
                return Err(Error::InvalidParam(
                    "range must be finite with min < max".into(),
                ));
            }
            (lo, hi)
        }
        None => data_range(samples),
    };

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0.0_f64; bins];
    for &x in samples {
        if !(lo..=hi).contains(&x) {
            continue;
        }
        let idx = (((x - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1.0;
    }
    Ok((edges, counts))
}

/// Min/max of the samples, widened to a unit interval when degenerate.
fn data_range(samples: &[f64]) -> (f64, f64) {
    let lo = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if lo == hi {
        return (lo - 0.5, hi + 0.5);
    }
    (lo, hi)
}
