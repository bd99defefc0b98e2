use idealgas::core::collision::{pair_momentum, resolve_collision, Resolution};
use idealgas::core::observables::{total_energy, total_momentum};
use idealgas::error::Result;
use idealgas::{create_gas, step, Particle, SimConfig, Simulation};

/// Energy stays within 1% over 100 steps for a closed 10-particle gas.
#[test]
fn energy_conserved_over_100_steps_simulation() -> Result<()> {
    let mut sim = Simulation::new(SimConfig::square(1e-8, 10, 1e-12).with_seed(12345))?;
    sim.initialize_random_particles()?;
    let e0 = sim.total_energy();
    sim.step(100);
    let e1 = sim.total_energy();
    let rel = ((e1 - e0) / e0).abs();
    assert!(rel < 0.01, "relative energy drift {rel} (E0={e0}, E1={e1})");
    // The recorded history carries the same value at every step
    for e in sim.energy_history().iter() {
        assert!(((e - e0) / e0).abs() < 0.01);
    }
    Ok(())
}

/// 50 particles, 100 free-function steps: maximum variation stays under 1%.
#[test]
fn energy_constant_with_50_particles() -> Result<()> {
    let (w, h) = (1e-8, 1e-8);
    let mut ps = create_gas(50, w, h, 800.0, Some(2024))?;
    let e0 = total_energy(&ps);
    let mut max_var = 0.0_f64;
    for _ in 0..100 {
        step(&mut ps, 1e-12, w, h);
        max_var = max_var.max(((total_energy(&ps) - e0) / e0).abs());
    }
    assert!(max_var < 0.01, "max variation {max_var}");
    Ok(())
}

/// Isolated two-body collision conserves momentum and energy and leaves no overlap.
#[test]
fn isolated_pair_collision() -> Result<()> {
    let mut a = Particle::new(0, 4.65e-26, 1e-10, [4.0e-9, 5.0e-9], [800.0, 120.0])?;
    let mut b = Particle::new(1, 6.63e-26, 1.2e-10, [4.15e-9, 5.08e-9], [-300.0, -40.0])?;
    assert!(a.is_colliding_with(&b));

    let p0 = pair_momentum(&a, &b);
    let e0 = a.kinetic_energy() + b.kinetic_energy();
    assert_eq!(resolve_collision(&mut a, &mut b), Resolution::Resolved);
    let p1 = pair_momentum(&a, &b);
    let e1 = a.kinetic_energy() + b.kinetic_energy();

    for k in 0..2 {
        assert!(
            ((p1[k] - p0[k]) / p0[k]).abs() < 1e-12,
            "momentum component {k}: {} -> {}",
            p0[k],
            p1[k]
        );
    }
    assert!(((e1 - e0) / e0).abs() < 1e-12);
    let sep = a.distance_to(&b);
    assert!(sep >= (a.radius() + b.radius()) * (1.0 - 1e-12), "residual overlap: {sep}");
    Ok(())
}

/// Pair collisions never change total momentum; only walls do.
#[test]
fn collisions_alone_conserve_total_momentum() -> Result<()> {
    // Dense cluster far from the walls, one sweep only
    let mut ps = Vec::new();
    for i in 0..4 {
        for j in 0..4 {
            let r = [4e-9 + i as f64 * 1.9e-10, 4e-9 + j as f64 * 1.9e-10];
            let v = [100.0 * (i as f64 - 1.5), 70.0 * (j as f64 - 1.5) + 10.0];
            ps.push(Particle::new((4 * i + j) as u32, 4.65e-26, 1e-10, r, v)?);
        }
    }
    let p0 = total_momentum(&ps);
    let e0 = total_energy(&ps);
    let resolved = idealgas::core::detect_and_resolve_collisions(&mut ps);
    assert!(resolved > 0);
    let p1 = total_momentum(&ps);
    let scale = ps.iter().map(|p| p.mass() * p.speed()).sum::<f64>();
    for k in 0..2 {
        assert!((p1[k] - p0[k]).abs() < 1e-12 * scale);
    }
    assert!(((total_energy(&ps) - e0) / e0).abs() < 1e-12);
    Ok(())
}
