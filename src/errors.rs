//! Error types produced while building specimens, reading test data or
//! running the shear analysis.

use thiserror::Error;

/// Error returned when specimen geometry is not physically meaningful.
///
/// # Examples
///
/// ```
/// use biasx::{Specimen, SpecimenError};
///
/// let error = Specimen::new(100.0, 190.0, 1.0, "too short")
///     .expect_err("ratio below 2.0 is rejected");
/// assert!(matches!(error, SpecimenError::RatioTooSmall { .. }));
/// ```
#[derive(Clone, Debug, Error, PartialEq)]
pub enum SpecimenError {
    /// Returned when a dimension is zero or negative.
    #[error("{parameter} must be positive (received {value})")]
    NonPositive {
        /// Name of the rejected dimension.
        parameter: &'static str,
        /// Rejected value in millimetres.
        value: f64,
    },
    /// Returned when a dimension is NaN or infinite.
    #[error("{parameter} must be finite (received {value})")]
    NonFinite {
        /// Name of the rejected dimension.
        parameter: &'static str,
        /// Rejected value.
        value: f64,
    },
    /// Returned when the length/width ratio is below the bias extension minimum.
    #[error("sample ratio (length/width) must be >= {minimum} (received {ratio:.2})")]
    RatioTooSmall {
        /// Ratio computed from the supplied dimensions.
        ratio: f64,
        /// Smallest accepted ratio.
        minimum: f64,
    },
}

/// Error returned while reading displacement/force samples.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Returned when the input cannot be opened or read.
    #[error("failed to read test data: {0}")]
    Io(#[from] std::io::Error),
    /// Returned when the delimited reader rejects a record.
    #[error("malformed delimited record: {0}")]
    Csv(#[from] csv::Error),
    /// Returned when a data row has fewer than two columns.
    #[error("row {row} has {found} column(s); displacement and force are required")]
    MissingColumn {
        /// One-based line number of the row in the input.
        row: usize,
        /// Number of columns found.
        found: usize,
    },
    /// Returned when a cell cannot be parsed as a finite number.
    #[error("row {row}, column {column}: {value:?} is not a finite number")]
    InvalidNumber {
        /// One-based line number of the row in the input.
        row: usize,
        /// Zero-based column index.
        column: usize,
        /// Raw cell content.
        value: String,
    },
    /// Returned when the input holds a header but no data rows.
    #[error("no samples found after the header row")]
    NoSamples,
    /// Returned when displacement and force sequences differ in length.
    #[error(
        "displacement and force must have the same length \
         (displacement: {displacement}, force: {force})"
    )]
    LengthMismatch {
        /// Number of displacement samples.
        displacement: usize,
        /// Number of force samples.
        force: usize,
    },
    /// Returned when an in-memory sample is NaN or infinite.
    #[error("{series} sample {index} is {value}, expected a finite number")]
    NonFinite {
        /// Which sequence holds the sample.
        series: &'static str,
        /// Zero-based sample index.
        index: usize,
        /// Offending value.
        value: f64,
    },
}

/// Error returned when a stage of the shear analysis fails.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum AnalysisError {
    /// Returned when an arccos argument leaves `[-1, 1]`, which happens when a
    /// displacement exceeds the travel allowed by the picture-frame kinematics.
    #[error("sample {index}: arccos argument {value} is outside [-1, 1]")]
    NumericDomain {
        /// Index of the offending sample.
        index: usize,
        /// Rejected argument.
        value: f64,
    },
    /// Returned when an interpolation is requested on an empty table.
    #[error("cannot interpolate in an empty table")]
    EmptyTable,
    /// Returned when too few samples exist to bootstrap the torque recurrence.
    #[error("at least {required} samples are required (received {count})")]
    InsufficientSamples {
        /// Number of samples supplied.
        count: usize,
        /// Minimum number of samples.
        required: usize,
    },
    /// Returned when two series that must be paired differ in length.
    #[error("{left} has {left_len} samples but {right} has {right_len}")]
    LengthMismatch {
        /// Name of the first series.
        left: &'static str,
        /// Length of the first series.
        left_len: usize,
        /// Name of the second series.
        right: &'static str,
        /// Length of the second series.
        right_len: usize,
    },
    /// Returned when the shear angle at `index` is π/2 and the shear force
    /// would require a division by zero.
    #[error("sample {index}: cos(shear angle = {shear_angle}) is zero")]
    DivisionSingularity {
        /// Index of the offending sample.
        index: usize,
        /// Shear angle in radians.
        shear_angle: f64,
    },
    /// Returned in strict mode when the shear angle decreases between samples.
    #[error("sample {index}: shear angle {current} is below the previous value {previous}")]
    NonMonotonicShearAngle {
        /// Index of the first decreasing sample.
        index: usize,
        /// Shear angle at `index - 1`.
        previous: f64,
        /// Shear angle at `index`.
        current: f64,
    },
}

/// Crate-level error joining every failure that can occur in a full run.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid specimen geometry.
    #[error("invalid specimen: {0}")]
    Specimen(#[from] SpecimenError),
    /// Failure while reading test data.
    #[error(transparent)]
    Ingest(#[from] IngestError),
    /// Failure inside the analysis pipeline.
    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
    /// Failure while reading or writing JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Failure while reading a configuration file.
    #[error("failed to read configuration: {0}")]
    Config(#[from] std::io::Error),
    /// Column separator that does not fit in a single byte.
    #[error("delimiter {0:?} must be a single ASCII character")]
    InvalidDelimiter(char),
}

/// Convenience alias for results carrying the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
