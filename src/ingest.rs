//! Reading displacement/force samples recorded by the tensile machine.
//!
//! Input files hold one header row followed by at least two numeric columns:
//! displacement first, force second. Extra columns are ignored. The first data
//! row is the reference point and is subtracted from every row.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use ndarray::Array1;
use tracing::{debug, info};

use crate::errors::IngestError;

/// Column separator used by the delimited reader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Delimiter {
    /// A single byte such as `,` or `;`.
    Byte(u8),
    /// Runs of spaces or tabs.
    Whitespace,
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::Byte(b',')
    }
}

/// Paired displacement and force samples in measurement order.
///
/// Both sequences always have the same length. Once built the series is never
/// modified; the zero offset, when requested, is applied exactly once.
#[derive(Clone, Debug, PartialEq)]
pub struct SampleSeries {
    /// Crosshead displacement in millimetres.
    displacement: Array1<f64>,
    /// Measured force in newtons.
    force: Array1<f64>,
}

impl SampleSeries {
    /// Pair already-corrected displacement and force samples.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::LengthMismatch`] when the sequences differ in length
    /// and [`IngestError::NonFinite`] for the first NaN or infinite sample.
    pub fn new(displacement: Vec<f64>, force: Vec<f64>) -> Result<Self, IngestError> {
        if displacement.len() != force.len() {
            return Err(IngestError::LengthMismatch {
                displacement: displacement.len(),
                force: force.len(),
            });
        }
        check_finite("displacement", &displacement)?;
        check_finite("force", &force)?;
        Ok(Self {
            displacement: Array1::from(displacement),
            force: Array1::from(force),
        })
    }

    /// Pair raw samples and shift both sequences so the first sample is zero.
    ///
    /// # Errors
    ///
    /// Same as [`SampleSeries::new`].
    ///
    /// # Examples
    /// ```
    /// use biasx::SampleSeries;
    ///
    /// let samples = SampleSeries::from_raw(vec![2.0, 3.0, 4.5], vec![0.5, 10.5, 20.5]).unwrap();
    /// assert_eq!(samples.displacement().to_vec(), vec![0.0, 1.0, 2.5]);
    /// assert_eq!(samples.force().to_vec(), vec![0.0, 10.0, 20.0]);
    /// ```
    pub fn from_raw(displacement: Vec<f64>, force: Vec<f64>) -> Result<Self, IngestError> {
        let mut series = Self::new(displacement, force)?;
        let reference = (series.displacement.get(0).copied(), series.force.get(0).copied());
        if let (Some(d0), Some(f0)) = reference {
            series.displacement.mapv_inplace(|d| d - d0);
            series.force.mapv_inplace(|f| f - f0);
        }
        Ok(series)
    }

    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.displacement.len()
    }

    /// Whether the series holds no samples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.displacement.is_empty()
    }

    /// Displacement samples in millimetres.
    #[must_use]
    pub fn displacement(&self) -> &Array1<f64> {
        &self.displacement
    }

    /// Force samples in newtons.
    #[must_use]
    pub fn force(&self) -> &Array1<f64> {
        &self.force
    }
}

/// Reject the first sample that is NaN or infinite.
fn check_finite(series: &'static str, values: &[f64]) -> Result<(), IngestError> {
    match values.iter().position(|value| !value.is_finite()) {
        Some(index) => Err(IngestError::NonFinite {
            series,
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

/// Read offset-corrected samples from any reader.
///
/// The first line is treated as a header and skipped. Blank lines and lines
/// starting with `#` are ignored.
///
/// # Errors
///
/// Returns [`IngestError`] when the input cannot be read, a row has fewer than
/// two columns, a cell is not a finite number, or no data rows exist.
///
/// # Examples
/// ```
/// use biasx::{read_samples, Delimiter};
///
/// let data = "displacement,force\n1.0,0.2\n2.0,5.2\n3.0,9.2\n";
/// let samples = read_samples(data.as_bytes(), Delimiter::Byte(b',')).unwrap();
/// assert_eq!(samples.len(), 3);
/// assert_eq!(samples.displacement()[2], 2.0);
/// ```
pub fn read_samples<R: Read>(reader: R, delimiter: Delimiter) -> Result<SampleSeries, IngestError> {
    let (displacement, force) = match delimiter {
        Delimiter::Byte(byte) => read_delimited(reader, byte)?,
        Delimiter::Whitespace => read_whitespace(reader)?,
    };
    if displacement.is_empty() {
        return Err(IngestError::NoSamples);
    }
    debug!(rows = displacement.len(), "parsed test data");
    SampleSeries::from_raw(displacement, force)
}

/// Read offset-corrected samples from a file.
///
/// # Errors
///
/// Same as [`read_samples`], plus [`IngestError::Io`] when the file cannot be opened.
pub fn load_samples(path: impl AsRef<Path>, delimiter: Delimiter) -> Result<SampleSeries, IngestError> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let samples = read_samples(BufReader::new(file), delimiter)?;
    info!(path = %path.display(), samples = samples.len(), "loaded bias extension data");
    Ok(samples)
}

/// Parse rows separated by a single byte with the `csv` reader.
fn read_delimited<R: Read>(reader: R, delimiter: u8) -> Result<(Vec<f64>, Vec<f64>), IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut displacement = Vec::new();
    let mut force = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = record
            .position()
            .map_or(displacement.len() + 2, |position| position.line() as usize);
        if record.iter().all(str::is_empty) {
            continue;
        }
        let (d, f) = parse_pair(row, record.iter())?;
        displacement.push(d);
        force.push(f);
    }
    Ok((displacement, force))
}

/// Parse rows whose columns are separated by runs of whitespace.
fn read_whitespace<R: Read>(reader: R) -> Result<(Vec<f64>, Vec<f64>), IngestError> {
    let mut displacement = Vec::new();
    let mut force = Vec::new();
    let mut header_seen = false;
    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if !header_seen {
            header_seen = true;
            continue;
        }
        let (d, f) = parse_pair(index + 1, trimmed.split_whitespace())?;
        displacement.push(d);
        force.push(f);
    }
    Ok((displacement, force))
}

/// Extract the displacement and force cells from a row.
fn parse_pair<'a>(
    row: usize,
    mut cells: impl Iterator<Item = &'a str>,
) -> Result<(f64, f64), IngestError> {
    let displacement = cells
        .next()
        .ok_or(IngestError::MissingColumn { row, found: 0 })?;
    let force = cells
        .next()
        .ok_or(IngestError::MissingColumn { row, found: 1 })?;
    Ok((parse_cell(row, 0, displacement)?, parse_cell(row, 1, force)?))
}

/// Parse one cell, rejecting NaN and infinities.
fn parse_cell(row: usize, column: usize, cell: &str) -> Result<f64, IngestError> {
    match cell.trim().parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(IngestError::InvalidNumber {
            row,
            column,
            value: cell.to_string(),
        }),
    }
}
