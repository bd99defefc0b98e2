//! Pairwise hard-disk contact detection and elastic resolution.
//!
//! Pairs are enumerated as `(i, j)` with `i < j` in the fixed ensemble order and resolved
//! one at a time. A particle touching several neighbours in the same step takes part in
//! several resolutions, each seeing the velocity left by the previous one.

use crate::core::particle::{dot, sub, Particle, DIM};

/// Outcome of [`resolve_collision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Normal velocity components exchanged (and overlap removed if any).
    Resolved,
    /// Centers coincide exactly; no contact normal exists, so nothing changed.
    Degenerate,
}

/// Resolve an elastic hard-disk collision between `p1` and `p2`.
///
/// Only the velocity components along the contact normal `n = (r2 - r1) / |r2 - r1|` change,
/// following the 1D elastic formulas; tangential components are untouched. Any remaining
/// interpenetration is then split evenly and pushed apart along `n`.
///
/// The caller decides whether the two are in contact; this routine does not re-check it.
pub fn resolve_collision(p1: &mut Particle, p2: &mut Particle) -> Resolution {
    let r12 = sub(&p2.r, &p1.r);
    let dist = dot(&r12, &r12).sqrt();
    if dist == 0.0 {
        return Resolution::Degenerate;
    }
    let n = r12.map(|c| c / dist);

    let v1n = dot(&p1.v, &n);
    let v2n = dot(&p2.v, &n);
    let (m1, m2) = (p1.mass(), p2.mass());
    let m_total = m1 + m2;

    let v1n_new = (v1n * (m1 - m2) + 2.0 * m2 * v2n) / m_total;
    let v2n_new = (v2n * (m2 - m1) + 2.0 * m1 * v1n) / m_total;

    let (dv1, dv2) = (v1n_new - v1n, v2n_new - v2n);
    for (k, &nk) in n.iter().enumerate() {
        p1.v[k] += dv1 * nk;
        p2.v[k] += dv2 * nk;
    }

    let overlap = (p1.radius() + p2.radius()) - dist;
    if overlap > 0.0 {
        let half = 0.5 * overlap;
        for (k, &nk) in n.iter().enumerate() {
            p1.r[k] -= half * nk;
            p2.r[k] += half * nk;
        }
    }
    Resolution::Resolved
}

/// Check every unordered pair once and resolve those in contact.
///
/// Returns the number of pairs whose velocities were exchanged. Degenerate pairs are
/// skipped and not counted.
pub fn detect_and_resolve_collisions(particles: &mut [Particle]) -> usize {
    let n = particles.len();
    let mut resolved = 0usize;
    for i in 0..n {
        for j in (i + 1)..n {
            let (a, b) = pair_mut(particles, i, j);
            if !a.is_colliding_with(b) {
                continue;
            }
            match resolve_collision(a, b) {
                Resolution::Resolved => resolved += 1,
                Resolution::Degenerate => {
                    log::debug!(
                        "skipping collision between particles {} and {}: coincident centers",
                        a.id(),
                        b.id()
                    );
                }
            }
        }
    }
    resolved
}

/// Total linear momentum of a pair, used to check conservation.
#[inline]
pub fn pair_momentum(p1: &Particle, p2: &Particle) -> [f64; DIM] {
    let (a, b) = (p1.momentum(), p2.momentum());
    let mut out = [0.0; DIM];
    for k in 0..DIM {
        out[k] = a[k] + b[k];
    }
    out
}

/// Disjoint mutable borrows of `particles[i]` and `particles[j]`, `i < j`.
#[inline]
fn pair_mut(particles: &mut [Particle], i: usize, j: usize) -> (&mut Particle, &mut Particle) {
    debug_assert!(i < j);
    let (head, tail) = particles.split_at_mut(j);
    (&mut head[i], &mut tail[0])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;

    fn energy(a: &Particle, b: &Particle) -> f64 {
        a.kinetic_energy() + b.kinetic_energy()
    }

    #[test]
    fn equal_masses_head_on_swap_velocities() -> Result<()> {
        let mut a = Particle::new(0, 1.0, 0.5, [1.0, 1.0], [1.0, 0.0])?;
        let mut b = Particle::new(1, 1.0, 0.5, [2.0, 1.0], [-1.0, 0.0])?;
        assert_eq!(resolve_collision(&mut a, &mut b), Resolution::Resolved);
        assert!((a.velocity()[0] + 1.0).abs() < 1e-12);
        assert!((b.velocity()[0] - 1.0).abs() < 1e-12);
        // Exactly touching: no positional correction
        assert_eq!(a.position(), [1.0, 1.0]);
        assert_eq!(b.position(), [2.0, 1.0]);
        Ok(())
    }

    #[test]
    fn oblique_unequal_masses_conserve_momentum_and_energy() -> Result<()> {
        let mut a = Particle::new(0, 3.0, 0.4, [1.0, 1.0], [2.0, 0.5])?;
        let mut b = Particle::new(1, 1.0, 0.3, [1.5, 1.3], [-1.0, 0.25])?;
        let p0 = pair_momentum(&a, &b);
        let e0 = energy(&a, &b);
        assert_eq!(resolve_collision(&mut a, &mut b), Resolution::Resolved);
        let p1 = pair_momentum(&a, &b);
        let e1 = energy(&a, &b);
        for k in 0..DIM {
            assert!((p1[k] - p0[k]).abs() < 1e-12, "momentum[{k}] {} vs {}", p1[k], p0[k]);
        }
        assert!(((e1 - e0) / e0).abs() < 1e-12);
        // Overlap removed
        let sep = a.distance_to(&b);
        assert!(sep >= (a.radius() + b.radius()) * (1.0 - 1e-12));
        Ok(())
    }

    #[test]
    fn tangential_component_untouched() -> Result<()> {
        // Normal along x; y components are tangential
        let mut a = Particle::new(0, 1.0, 0.5, [1.0, 1.0], [1.0, 0.7])?;
        let mut b = Particle::new(1, 2.0, 0.5, [1.9, 1.0], [0.0, -0.2])?;
        resolve_collision(&mut a, &mut b);
        assert_eq!(a.velocity()[1], 0.7);
        assert_eq!(b.velocity()[1], -0.2);
        Ok(())
    }

    #[test]
    fn coincident_centers_are_skipped() -> Result<()> {
        let mut a = Particle::new(0, 1.0, 0.5, [1.0, 1.0], [1.0, 0.0])?;
        let mut b = Particle::new(1, 1.0, 0.5, [1.0, 1.0], [0.0, 1.0])?;
        assert_eq!(resolve_collision(&mut a, &mut b), Resolution::Degenerate);
        assert_eq!(a.velocity(), [1.0, 0.0]);
        assert_eq!(b.velocity(), [0.0, 1.0]);
        assert_eq!(a.position(), b.position());

        let mut ps = vec![a, b];
        assert_eq!(detect_and_resolve_collisions(&mut ps), 0);
        Ok(())
    }

    #[test]
    fn only_touching_pairs_are_resolved() -> Result<()> {
        let mut ps = vec![
            Particle::new(0, 1.0, 0.5, [1.0, 1.0], [1.0, 0.0])?,
            Particle::new(1, 1.0, 0.5, [1.8, 1.0], [-1.0, 0.0])?,
            Particle::new(2, 1.0, 0.5, [8.0, 8.0], [0.0, 1.0])?,
        ];
        assert_eq!(detect_and_resolve_collisions(&mut ps), 1);
        assert_eq!(ps[2].velocity(), [0.0, 1.0]);
        assert!(ps[0].velocity()[0] < 0.0);
        assert!(ps[1].velocity()[0] > 0.0);
        Ok(())
    }

    #[test]
    fn chained_contacts_resolve_sequentially() -> Result<()> {
        // Newton's cradle: 0 hits 1, then 1 (now moving) hits 2 in the same sweep.
        let mut ps = vec![
            Particle::new(0, 1.0, 0.5, [1.0, 1.0], [1.0, 0.0])?,
            Particle::new(1, 1.0, 0.5, [2.0, 1.0], [0.0, 0.0])?,
            Particle::new(2, 1.0, 0.5, [3.0, 1.0], [0.0, 0.0])?,
        ];
        assert_eq!(detect_and_resolve_collisions(&mut ps), 2);
        assert!(ps[0].velocity()[0].abs() < 1e-12);
        assert!(ps[1].velocity()[0].abs() < 1e-12);
        assert!((ps[2].velocity()[0] - 1.0).abs() < 1e-12);
        Ok(())
    }
}
