#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]
#![doc = include_str!("../README.md")]

mod config;
mod errors;
mod geometry;
mod ingest;
mod interpolation;
mod kinematics;
mod report;
mod shear_force;
mod torque;

pub use crate::bias_test::{BiasTest, Stage};
pub use crate::config::{parse_delimiter, AnalysisConfig, SpecimenConfig};
pub use crate::errors::{AnalysisError, Error, IngestError, Result, SpecimenError};
pub use crate::geometry::{Specimen, DEFAULT_MATERIAL_NAME, DEFAULT_THICKNESS, MIN_ASPECT_RATIO};
pub use crate::ingest::{load_samples, read_samples, Delimiter, SampleSeries};
pub use crate::interpolation::{first_decrease, interpolate};
pub use crate::kinematics::{map_angles, AngleSeries};
pub use crate::report::{
    angle_displacement, force_displacement, render_summary, shear_force_angle, torque_angle,
    PlotView, Report, Summary,
};
pub use crate::shear_force::{derive, ShearForceSeries, SINGULARITY_TOLERANCE};
pub use crate::torque::{solve, SolverOptions, TorqueMode, TorqueSeries, MIN_SAMPLES};
