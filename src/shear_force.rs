//! Shear force derived from shear torque.

use ndarray::Array1;

use crate::errors::AnalysisError;
use crate::kinematics::AngleSeries;
use crate::torque::TorqueSeries;

/// Magnitude of `cos(shear angle)` treated as zero.
pub const SINGULARITY_TOLERANCE: f64 = 1.0e-12;

/// Shear force per sample, `torque / cos(shear angle)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ShearForceSeries {
    /// Shear force per sample.
    values: Array1<f64>,
}

impl ShearForceSeries {
    /// Shear force values in sample order.
    #[must_use]
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Divide each torque by the cosine of its shear angle.
///
/// # Errors
///
/// Returns [`AnalysisError::LengthMismatch`] when the series differ in length and
/// [`AnalysisError::DivisionSingularity`] for the first sample whose shear angle
/// has a cosine within [`SINGULARITY_TOLERANCE`] of zero.
pub fn derive(torque: &TorqueSeries, angles: &AngleSeries) -> Result<ShearForceSeries, AnalysisError> {
    if torque.len() != angles.len() {
        return Err(AnalysisError::LengthMismatch {
            left: "torque",
            left_len: torque.len(),
            right: "angle",
            right_len: angles.len(),
        });
    }
    let mut values = Array1::zeros(torque.len());
    for (index, ((value, &c), &gamma)) in values
        .iter_mut()
        .zip(torque.values())
        .zip(angles.shear_angles())
        .enumerate()
    {
        let cosine = gamma.cos();
        if cosine.abs() < SINGULARITY_TOLERANCE {
            return Err(AnalysisError::DivisionSingularity {
                index,
                shear_angle: gamma,
            });
        }
        *value = c / cosine;
    }
    Ok(ShearForceSeries { values })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Specimen;
    use crate::torque::{solve, SolverOptions};
    use approx::assert_relative_eq;
    use ndarray::array;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_3};

    fn torque_for(angles: &AngleSeries, forces: Array1<f64>) -> TorqueSeries {
        let specimen = Specimen::new(150.0, 450.0, 1.0, "Flax 250").expect("valid geometry");
        solve(&specimen, &forces, angles, &SolverOptions::default()).expect("solvable")
    }

    #[test]
    fn divides_torque_by_cosine() {
        let angles = AngleSeries::from_shear_angles(array![0.0, 0.1, FRAC_PI_3]);
        let torque = torque_for(&angles, array![0.0, 5.0, 9.0]);
        let force = derive(&torque, &angles).expect("regular angles");
        assert_eq!(force.values()[0], 0.0);
        assert_relative_eq!(force.values()[1], torque.values()[1] / 0.1_f64.cos());
        assert_relative_eq!(force.values()[2], 2.0 * torque.values()[2], max_relative = 1e-12);
    }

    #[test]
    fn right_shear_angle_is_singular() {
        let angles = AngleSeries::from_shear_angles(array![0.0, 0.3, FRAC_PI_2]);
        let torque = torque_for(&angles, array![0.0, 5.0, 9.0]);
        let error = derive(&torque, &angles).expect_err("cos(pi/2) = 0");
        assert_eq!(
            error,
            AnalysisError::DivisionSingularity {
                index: 2,
                shear_angle: FRAC_PI_2
            }
        );
    }
}
