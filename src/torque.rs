//! Shear torque from bias extension forces.
//!
//! The specimen is split into a fully sheared central zone, half-sheared
//! triangles near the clamps and undeformed corners. Equating the external
//! work to the shear energy of the zones gives a torque at the current shear
//! angle that depends on the torque at half that angle, carried by the
//! half-sheared triangles. [`TorqueMode::Recursive`] solves this relation by
//! forward substitution. [`TorqueMode::ClosedForm`] drops the half-angle term.

use std::fmt;
use std::str::FromStr;

use ndarray::{Array1, Zip};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::errors::AnalysisError;
use crate::geometry::Specimen;
use crate::interpolation::{first_decrease, interpolate};
use crate::kinematics::AngleSeries;

/// Smallest number of samples accepted by the solver.
pub const MIN_SAMPLES: usize = 2;

/// Formula used to turn forces into shear torques.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TorqueMode {
    /// Recursive relation including the half-sheared zone contribution.
    #[default]
    Recursive,
    /// Explicit approximation without the half-angle term.
    ClosedForm,
}

impl fmt::Display for TorqueMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recursive => f.write_str("recursive"),
            Self::ClosedForm => f.write_str("closed-form"),
        }
    }
}

impl FromStr for TorqueMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "recursive" => Ok(Self::Recursive),
            "closed-form" | "closed_form" => Ok(Self::ClosedForm),
            other => Err(format!(
                "unknown torque mode {other:?} (expected \"recursive\" or \"closed-form\")"
            )),
        }
    }
}

/// Options controlling a single [`solve`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SolverOptions {
    /// Formula to evaluate.
    pub mode: TorqueMode,
    /// Fail instead of warning when the shear angle decreases between samples.
    pub require_monotonic: bool,
}

impl SolverOptions {
    /// Options for the given mode with the monotonicity check left lenient.
    #[must_use]
    pub fn with_mode(mode: TorqueMode) -> Self {
        Self {
            mode,
            require_monotonic: false,
        }
    }
}

/// Shear torque per sample in N·mm/mm² together with the formula that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct TorqueSeries {
    /// Torque per sample.
    values: Array1<f64>,
    /// Formula that produced `values`.
    mode: TorqueMode,
}

impl TorqueSeries {
    /// Torque values in sample order.
    #[must_use]
    pub fn values(&self) -> &Array1<f64> {
        &self.values
    }

    /// Formula used to compute the series.
    #[must_use]
    pub fn mode(&self) -> TorqueMode {
        self.mode
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

/// Compute the shear torque for every sample.
///
/// Every call builds a fresh series; nothing is shared between calls.
///
/// # Errors
///
/// Returns [`AnalysisError::LengthMismatch`] when `forces` and `angles` differ in
/// length, [`AnalysisError::InsufficientSamples`] for fewer than [`MIN_SAMPLES`]
/// samples and, when `options.require_monotonic` is set,
/// [`AnalysisError::NonMonotonicShearAngle`].
///
/// # Examples
/// ```
/// use biasx::{map_angles, solve, SolverOptions, Specimen};
/// use ndarray::array;
///
/// let specimen = Specimen::new(150.0, 450.0, 1.0, "Flax 250").unwrap();
/// let angles = map_angles(&specimen, &array![0.0, 1.0, 2.0, 3.0]).unwrap();
/// let torque = solve(&specimen, &array![0.0, 10.0, 20.0, 30.0], &angles, &SolverOptions::default())
///     .unwrap();
/// assert_eq!(torque.values()[0], 0.0);
/// assert!(torque.values()[3] > torque.values()[1]);
/// ```
pub fn solve(
    specimen: &Specimen,
    forces: &Array1<f64>,
    angles: &AngleSeries,
    options: &SolverOptions,
) -> Result<TorqueSeries, AnalysisError> {
    if forces.len() != angles.len() {
        return Err(AnalysisError::LengthMismatch {
            left: "force",
            left_len: forces.len(),
            right: "angle",
            right_len: angles.len(),
        });
    }
    if forces.len() < MIN_SAMPLES {
        return Err(AnalysisError::InsufficientSamples {
            count: forces.len(),
            required: MIN_SAMPLES,
        });
    }
    check_monotonic(angles, options.require_monotonic)?;

    debug!(mode = %options.mode, samples = forces.len(), "solving shear torque");
    let values = match options.mode {
        TorqueMode::Recursive => solve_recursive(specimen, forces, angles)?,
        TorqueMode::ClosedForm => solve_closed_form(specimen, forces, angles),
    };
    Ok(TorqueSeries {
        values,
        mode: options.mode,
    })
}

/// Warn about, or reject, shear angles that decrease with sample index.
///
/// The recurrence looks up earlier torques by angle, so a decreasing angle
/// picks the wrong table entry without any numerical symptom.
fn check_monotonic(angles: &AngleSeries, strict: bool) -> Result<(), AnalysisError> {
    let shear = angles.shear_angles();
    let Some(index) = shear.as_slice().and_then(first_decrease) else {
        return Ok(());
    };
    let (previous, current) = (shear[index - 1], shear[index]);
    if strict {
        return Err(AnalysisError::NonMonotonicShearAngle {
            index,
            previous,
            current,
        });
    }
    warn!(
        index,
        previous, current, "shear angle decreases; half-angle torque lookup may be wrong"
    );
    Ok(())
}

/// Forward substitution of the recursive torque relation.
fn solve_recursive(
    specimen: &Specimen,
    forces: &Array1<f64>,
    angles: &AngleSeries,
) -> Result<Array1<f64>, AnalysisError> {
    let n = forces.len();
    let side = specimen.length_side_pf();
    let sheared = specimen.sheared_area();
    let semi_sheared = specimen.semi_sheared_area();
    let inter_fiber = angles.inter_fiber_angles();
    let shear = angles.shear_angles().to_vec();

    let mut torque = vec![0.0; n];
    // Nothing to interpolate in yet, so the second sample is bootstrapped.
    torque[1] =
        4.0 * side * forces[1] * (inter_fiber[1] / 2.0).sin() / (4.0 * sheared - semi_sheared);

    for i in 2..n {
        let semi_torque = interpolate(shear[i] / 2.0, &shear[..i], &torque[..i])?;
        torque[i] = (side * forces[i] * (inter_fiber[i] / 2.0).sin()
            - 0.5 * semi_sheared * semi_torque)
            / semi_sheared;
    }
    Ok(Array1::from(torque))
}

/// Explicit approximation evaluated independently for each sample.
fn solve_closed_form(specimen: &Specimen, forces: &Array1<f64>, angles: &AngleSeries) -> Array1<f64> {
    let height = specimen.length();
    let width = specimen.width();
    let scale = (height / width - 1.0) / (2.0 * height - 3.0 * width);
    Zip::from(forces)
        .and(angles.shear_angles())
        .map_collect(|&force, &gamma| {
            scale * force * ((gamma / 2.0).cos() - (gamma / 2.0).sin())
        })
}
