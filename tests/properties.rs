#![warn(clippy::pedantic)]

use biasx::{map_angles, solve, SolverOptions, Specimen, SpecimenError, MIN_ASPECT_RATIO};
use ndarray::Array1;
use proptest::prelude::*;
use std::f64::consts::FRAC_PI_2;

proptest! {
    #[test]
    fn valid_specimens_respect_minimum_ratio(
        width in 1.0f64..500.0,
        ratio in 0.5f64..6.0,
        thickness in 0.1f64..5.0,
    ) {
        let length = width * ratio;
        match Specimen::new(width, length, thickness, "prop") {
            Ok(specimen) => prop_assert!(specimen.ratio() >= MIN_ASPECT_RATIO),
            Err(SpecimenError::RatioTooSmall { ratio, .. }) => prop_assert!(ratio < MIN_ASPECT_RATIO),
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }

    #[test]
    fn angles_are_complementary(
        width in 10.0f64..200.0,
        ratio in 2.0f64..5.0,
        fractions in proptest::collection::vec(0.0f64..1.0, 1..50),
    ) {
        let specimen = Specimen::new(width, width * ratio, 1.0, "prop").expect("valid geometry");
        let displacement = Array1::from_iter(
            fractions.iter().map(|fraction| fraction * specimen.max_displacement()),
        );
        let angles = map_angles(&specimen, &displacement).expect("within travel");
        for (shear, inter_fiber) in angles.shear_angles().iter().zip(angles.inter_fiber_angles()) {
            prop_assert!((shear + inter_fiber - FRAC_PI_2).abs() < 1e-12);
        }
    }

    #[test]
    fn recursive_torque_starts_at_zero(
        steps in proptest::collection::vec(0.01f64..2.0, 1..40),
        forces in proptest::collection::vec(0.0f64..500.0, 41),
    ) {
        let specimen = Specimen::new(150.0, 450.0, 1.0, "prop").expect("valid geometry");
        let mut position = 0.0;
        let mut displacement = vec![0.0];
        for step in &steps {
            position += step;
            displacement.push(position);
        }
        let forces = Array1::from(forces[..displacement.len()].to_vec());
        let angles = map_angles(&specimen, &Array1::from(displacement)).expect("within travel");
        let torque = solve(&specimen, &forces, &angles, &SolverOptions::default()).expect("computable");
        prop_assert_eq!(torque.values()[0], 0.0);
        prop_assert!(torque.values().iter().all(|value| value.is_finite()));
    }
}
