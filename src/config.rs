//! JSON configuration describing one analysis run.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::errors::{Error, SpecimenError};
use crate::geometry::{Specimen, DEFAULT_MATERIAL_NAME, DEFAULT_THICKNESS};
use crate::ingest::Delimiter;
use crate::torque::{SolverOptions, TorqueMode};

/// Specimen dimensions as written in a configuration file.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SpecimenConfig {
    /// Width in millimetres.
    pub width: f64,
    /// Length in millimetres.
    pub length: f64,
    /// Thickness in millimetres.
    #[serde(default = "default_thickness")]
    pub thickness: f64,
    /// Material label.
    #[serde(default = "default_name")]
    pub name: String,
}

impl SpecimenConfig {
    /// Validate the dimensions and build a [`Specimen`].
    ///
    /// # Errors
    ///
    /// Same as [`Specimen::new`].
    pub fn to_specimen(&self) -> Result<Specimen, SpecimenError> {
        Specimen::new(self.width, self.length, self.thickness, self.name.clone())
    }
}

/// Settings for one analysis run.
///
/// # Examples
/// ```
/// use biasx::{AnalysisConfig, TorqueMode};
///
/// let config = AnalysisConfig::from_json(
///     r#"{ "specimen": { "width": 150, "length": 450 }, "mode": "closed-form" }"#,
/// )
/// .unwrap();
/// assert_eq!(config.specimen.name, "Generic material");
/// assert_eq!(config.mode, TorqueMode::ClosedForm);
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Specimen geometry.
    pub specimen: SpecimenConfig,
    /// Test data file, relative paths resolved against the working directory.
    #[serde(default)]
    pub input: Option<PathBuf>,
    /// Column separator; omitted or `null` means whitespace.
    #[serde(default = "default_delimiter")]
    pub delimiter: Option<char>,
    /// Torque formula.
    #[serde(default)]
    pub mode: TorqueMode,
    /// Fail when the shear angle decreases between samples.
    #[serde(default)]
    pub require_monotonic: bool,
}

impl AnalysisConfig {
    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for malformed JSON, unknown fields or missing
    /// specimen dimensions.
    pub fn from_json(text: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the file cannot be read and
    /// [`Error::Json`] when it cannot be parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        debug!(path = %path.display(), "read analysis configuration");
        Self::from_json(&text)
    }

    /// Solver options selected by this configuration.
    #[must_use]
    pub fn solver_options(&self) -> SolverOptions {
        SolverOptions {
            mode: self.mode,
            require_monotonic: self.require_monotonic,
        }
    }

    /// Column separator for the input reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDelimiter`] for characters that do not fit in a
    /// single byte.
    pub fn delimiter(&self) -> Result<Delimiter, Error> {
        parse_delimiter(self.delimiter)
    }
}

/// Turn an optional separator character into a [`Delimiter`].
///
/// `None` and whitespace characters select whitespace splitting.
///
/// # Errors
///
/// Returns [`Error::InvalidDelimiter`] for non-ASCII characters.
pub fn parse_delimiter(delimiter: Option<char>) -> Result<Delimiter, Error> {
    match delimiter {
        None => Ok(Delimiter::Whitespace),
        Some(c) if c.is_whitespace() => Ok(Delimiter::Whitespace),
        Some(c) if c.is_ascii() => Ok(Delimiter::Byte(c as u8)),
        Some(c) => Err(Error::InvalidDelimiter(c)),
    }
}

/// Serde default for [`SpecimenConfig::thickness`].
fn default_thickness() -> f64 {
    DEFAULT_THICKNESS
}

/// Serde default for [`SpecimenConfig::name`].
fn default_name() -> String {
    DEFAULT_MATERIAL_NAME.to_string()
}

/// Serde default for [`AnalysisConfig::delimiter`].
fn default_delimiter() -> Option<char> {
    Some(',')
}
