//! Property tests over generated layouts.

use photon_sieve::{
    config::{ExhaustionPolicy, FabricationConfig, OpticsConfig, PackingConfig, SieveConfig},
    geometry::ZonePlate,
    packing::MIN_RADIUS_WIDTH_FRACTION,
    LayoutChecker, SieveBuilder,
};
use proptest::prelude::*;
use std::f64::consts::{PI, TAU};

fn config(zones: u32, area_prop: f64, seed: u64) -> SieveConfig {
    SieveConfig {
        optics: OpticsConfig {
            zones,
            ..Default::default()
        },
        fabrication: FabricationConfig {
            area_prop,
            ..Default::default()
        },
        packing: PackingConfig {
            max_attempts_per_ring: 200_000,
            seed: Some(seed),
            on_exhaustion: ExhaustionPolicy::Skip,
        },
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn zone_boundaries_follow_formula(
        wavelength in 0.0002f64..0.002,
        focal in 1.0f64..500.0,
        zones in 1u32..64,
    ) {
        let optics = OpticsConfig {
            wavelength_mm: wavelength,
            focal_distance_mm: focal,
            zones,
        };
        let plate = ZonePlate::new(&optics).unwrap();

        prop_assert_eq!(plate.zone_count(), zones as usize);
        prop_assert!(plate.boundaries().windows(2).all(|w| w[0] < w[1]));
        for (i, r) in plate.boundaries().iter().enumerate() {
            let expected = (focal * wavelength * (i + 1) as f64).sqrt();
            prop_assert!((r - expected).abs() <= 1e-12 * expected.max(1.0));
        }
        prop_assert_eq!(plate.ring_pairs().count(), zones as usize / 2);
    }

    #[test]
    fn packed_layouts_satisfy_constraints(
        zones in 2u32..12,
        area_prop in 0.1f64..0.45,
        seed in any::<u64>(),
    ) {
        let config = config(zones, area_prop, seed);
        let fabrication = config.fabrication.clone();
        let layout = SieveBuilder::new(config).unwrap().build().unwrap();
        let sieve = &layout.sieve;

        prop_assert_eq!(
            sieve.rings().len() + layout.skipped.len(),
            zones as usize / 2
        );

        for ring in sieve.rings() {
            let min = fabrication
                .min_feature_mm
                .max(ring.width() * MIN_RADIUS_WIDTH_FRACTION);
            let max = ring.width() * fabrication.max_factor;

            for p in ring.pinholes() {
                prop_assert!(p.radius() >= min && p.radius() <= max);
                prop_assert!(p.azimuth() >= 0.0 && p.azimuth() < TAU);
            }

            let pinholes = ring.pinholes();
            for (i, a) in pinholes.iter().enumerate() {
                for b in &pinholes[i + 1..] {
                    let gap = a.center().distance_to(&b.center()) - a.radius() - b.radius();
                    prop_assert!(gap > fabrication.min_spacing_mm);
                }
            }

            let last = pinholes.last().unwrap();
            prop_assert!(ring.open_area() >= ring.target_open_area());
            prop_assert!(ring.open_area() - ring.target_open_area() < last.area() + 1e-12);
        }

        let area: f64 = sieve.rings().iter().map(|r| r.open_area()).sum();
        prop_assert!((sieve.total_open_area() - area).abs() < 1e-12);
        if area > 0.0 {
            let f = sieve.focal_distance_mm() / (2.0 * (area / PI).sqrt());
            prop_assert!((sieve.f_number() - f).abs() <= 1e-9 * f);
        }

        let violations = LayoutChecker::new(fabrication).check_sieve(sieve);
        prop_assert!(violations.is_empty(), "{:?}", violations);
    }

    #[test]
    fn same_seed_same_layout(seed in any::<u64>()) {
        let builder = SieveBuilder::new(config(8, 0.4, seed)).unwrap();
        let a = builder.build().unwrap();
        let b = builder.build().unwrap();
        prop_assert_eq!(a.sieve.fingerprint(), b.sieve.fingerprint());
        prop_assert_eq!(a, b);
    }
}

#[test]
fn reference_sieve_matches_published_geometry() {
    let config = SieveConfig {
        packing: PackingConfig {
            seed: Some(512),
            ..Default::default()
        },
        ..Default::default()
    };
    let builder = SieveBuilder::new(config).unwrap();

    let plate = builder.zone_plate();
    assert!((plate.boundary(1).unwrap() - 0.1921).abs() < 1e-4);
    assert!((plate.boundary(31).unwrap() - (72.0f64 * 0.0005125 * 31.0).sqrt()).abs() < 1e-12);

    let layout = builder.build().unwrap();
    assert_eq!(layout.sieve.rings().len(), 15);
    assert!(layout.skipped.is_empty());
    assert!(layout.sieve.f_number().is_finite());
}
