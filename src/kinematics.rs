//! Picture-frame kinematics mapping crosshead displacement to fibre angles.

use std::f64::consts::FRAC_PI_2;

use ndarray::Array1;

use crate::errors::AnalysisError;
use crate::geometry::Specimen;

/// Inter-fiber and shear angles for every sample, in radians.
///
/// The two sequences always satisfy `shear = π/2 - inter_fiber`.
#[derive(Clone, Debug, PartialEq)]
pub struct AngleSeries {
    /// Angle between the yarn families.
    inter_fiber: Array1<f64>,
    /// Shear angle.
    shear: Array1<f64>,
}

impl AngleSeries {
    /// Build the series from inter-fiber angles.
    #[must_use]
    pub fn from_inter_fiber_angles(inter_fiber: Array1<f64>) -> Self {
        let shear = inter_fiber.mapv(|angle| FRAC_PI_2 - angle);
        Self { inter_fiber, shear }
    }

    /// Build the series from shear angles.
    ///
    /// Useful when angles come from an optical measurement rather than from the
    /// crosshead displacement.
    #[must_use]
    pub fn from_shear_angles(shear: Array1<f64>) -> Self {
        let inter_fiber = shear.mapv(|angle| FRAC_PI_2 - angle);
        Self { inter_fiber, shear }
    }

    /// Angles between the two yarn families.
    #[must_use]
    pub fn inter_fiber_angles(&self) -> &Array1<f64> {
        &self.inter_fiber
    }

    /// Shear angles, zero in the undeformed state.
    #[must_use]
    pub fn shear_angles(&self) -> &Array1<f64> {
        &self.shear
    }

    /// Shear angles converted to degrees.
    #[must_use]
    pub fn shear_angles_degrees(&self) -> Array1<f64> {
        self.shear.mapv(f64::to_degrees)
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shear.len()
    }

    /// Whether the series holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shear.is_empty()
    }
}

/// Convert crosshead displacements into fibre angles.
///
/// The central zone deforms as a pin-jointed picture frame of diagonal
/// `diagonal_pf`, so the inter-fiber angle is
/// `2 acos((d + diagonal_pf) / (2 length_side_pf))`.
///
/// # Errors
///
/// Returns [`AnalysisError::NumericDomain`] for the first sample whose arccos
/// argument is NaN or outside `[-1, 1]`.
///
/// # Examples
/// ```
/// use biasx::{map_angles, Specimen};
/// use ndarray::array;
///
/// let specimen = Specimen::new(150.0, 450.0, 1.0, "Flax 250").unwrap();
/// let angles = map_angles(&specimen, &array![0.0, 10.0, 20.0]).unwrap();
/// assert!(angles.shear_angles()[0].abs() < 1e-12);
/// assert!(angles.shear_angles()[2] > angles.shear_angles()[1]);
/// ```
pub fn map_angles(
    specimen: &Specimen,
    displacement: &Array1<f64>,
) -> Result<AngleSeries, AnalysisError> {
    let span = 2.0 * specimen.length_side_pf();
    let mut inter_fiber = Array1::zeros(displacement.len());
    for (index, (&d, angle)) in displacement.iter().zip(inter_fiber.iter_mut()).enumerate() {
        let argument = (d + specimen.diagonal_pf()) / span;
        if !(-1.0..=1.0).contains(&argument) {
            return Err(AnalysisError::NumericDomain {
                index,
                value: argument,
            });
        }
        *angle = 2.0 * argument.acos();
    }
    Ok(AngleSeries::from_inter_fiber_angles(inter_fiber))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    fn specimen() -> Specimen {
        Specimen::new(150.0, 450.0, 1.0, "Flax 250").expect("valid geometry")
    }

    #[test]
    fn undeformed_sample_has_right_angle_between_fibres() {
        let angles = map_angles(&specimen(), &array![0.0]).expect("in domain");
        assert_relative_eq!(angles.inter_fiber_angles()[0], FRAC_PI_2, epsilon = 1e-12);
        assert_relative_eq!(angles.shear_angles()[0], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn shear_and_inter_fiber_angles_are_complementary() {
        let angles =
            map_angles(&specimen(), &array![0.0, 5.0, 25.0, 60.0, 110.0]).expect("in domain");
        for (shear, inter_fiber) in angles.shear_angles().iter().zip(angles.inter_fiber_angles()) {
            assert_relative_eq!(shear + inter_fiber, FRAC_PI_2, epsilon = 1e-15);
        }
    }

    #[test]
    fn displacement_beyond_travel_limit_is_a_domain_error() {
        let specimen = specimen();
        let beyond = specimen.max_displacement() + 1.0;
        let error = map_angles(&specimen, &array![0.0, 10.0, beyond]).expect_err("out of domain");
        match error {
            AnalysisError::NumericDomain { index, value } => {
                assert_eq!(index, 2);
                assert!(value > 1.0);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn nan_displacement_is_a_domain_error() {
        let error = map_angles(&specimen(), &array![0.0, f64::NAN]).expect_err("nan");
        assert!(matches!(error, AnalysisError::NumericDomain { index: 1, .. }));
    }

    #[test]
    fn converts_shear_angles_to_degrees() {
        let angles = AngleSeries::from_shear_angles(array![0.0, FRAC_PI_2 / 3.0]);
        assert_relative_eq!(angles.shear_angles_degrees()[1], 30.0, epsilon = 1e-12);
        assert_relative_eq!(angles.inter_fiber_angles()[1], FRAC_PI_2 * 2.0 / 3.0, epsilon = 1e-12);
    }
}
