//! Properties of the non-binary substance variants.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sim::{Cell, PressureField, SimConfig, Simulation, ThermalSand};

#[test]
fn pressure_quantities_are_conserved() {
    for quantum in [1u8, 4, 32] {
        let config = SimConfig {
            width: 48,
            height: 48,
            steps_per_frame: 5,
            quantum_strength: quantum,
            ..SimConfig::default()
        };
        let mut sim = Simulation::new(PressureField::from_config(&config), config).unwrap();

        let mut rng = StdRng::seed_from_u64(quantum as u64);
        for y in 0..sim.height() as i32 {
            for x in 0..sim.width() as i32 {
                let amount: u8 = rng.gen();
                sim.set_cell(x, y, Cell { matter: amount, heat: 0 }).unwrap();
            }
        }
        let before = sim.total_matter();

        for _ in 0..20 {
            sim.advance();
        }

        assert_eq!(
            sim.total_matter(),
            before,
            "quantity leaked with quantum strength {quantum}"
        );
    }
}

#[test]
fn pressure_runs_are_deterministic() {
    let config = SimConfig {
        width: 32,
        height: 32,
        steps_per_frame: 10,
        ..SimConfig::default()
    };
    let mut a = Simulation::new(PressureField::new(2), config.clone()).unwrap();
    let mut b = Simulation::new(PressureField::new(2), config).unwrap();
    for s in [&mut a, &mut b] {
        s.paint(16, 8, 6, 200);
    }

    for _ in 0..10 {
        a.advance();
        b.advance();
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn thermal_heat_is_conserved_and_rides_with_matter() {
    let mut sim = Simulation::new(
        ThermalSand,
        SimConfig {
            width: 48,
            height: 48,
            steps_per_frame: 5,
            ..SimConfig::default()
        },
    )
    .unwrap();

    let mut rng = StdRng::seed_from_u64(11);
    for y in 0..sim.height() as i32 {
        for x in 0..sim.width() as i32 {
            if rng.gen_bool(0.25) {
                sim.set_cell(x, y, Cell::with_heat(rng.gen())).unwrap();
            }
        }
    }
    let matter_before = sim.total_matter();
    let heat_before = sim.total_heat();

    for _ in 0..20 {
        sim.advance();
    }

    assert_eq!(sim.total_matter(), matter_before);
    assert_eq!(sim.total_heat(), heat_before, "heat must travel with grains, never leak");

    // Heat only exists where matter does.
    let matter = sim.snapshot();
    for (id, &heat) in sim.heat_snapshot().iter().enumerate() {
        if heat != 0 {
            assert_eq!(matter[id], 1, "orphaned heat at cell {id}");
        }
    }
}

#[test]
fn hot_grains_rise_more_often_than_cold_ones() {
    // Two sparse lattices of independent grains, one hot and one cold,
    // on identical configurations. Heat multiplies the upward weight
    // (255 -> 8x), so the hot population must move up far more often.
    const SPACING: i32 = 5;

    let upward_fraction = |heat: u8| -> f64 {
        let mut sim = Simulation::new(
            ThermalSand,
            SimConfig {
                width: 320,
                height: 320,
                steps_per_frame: 1,
                ..SimConfig::default()
            },
        )
        .unwrap();

        let mut grains = Vec::new();
        let mut y = SPACING;
        while y < sim.height() as i32 - SPACING {
            let mut x = SPACING;
            while x < sim.width() as i32 - SPACING {
                sim.set_cell(x, y, Cell::with_heat(heat)).unwrap();
                grains.push((x, y));
                x += SPACING;
            }
            y += SPACING;
        }

        sim.advance();

        let went_up = grains
            .iter()
            .filter(|&&(x, y)| sim.cell(x, y - 1).unwrap().matter == 1)
            .count();
        went_up as f64 / grains.len() as f64
    };

    let hot = upward_fraction(255);
    let cold = upward_fraction(0);

    // Expected: cold 1/10 = 0.10, hot 8/17 ~ 0.47.
    assert!(cold < 0.15, "cold upward fraction {cold:.3} too high");
    assert!(hot > 0.35, "hot upward fraction {hot:.3} too low");
    assert!(hot > cold + 0.2);
}
