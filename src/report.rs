//! Plot-ready series and textual summaries of a bias extension test.
//!
//! Nothing here draws anything. The views carry titles, axis labels and paired
//! data so that any plotting front end can render them, and the whole report
//! serialises to JSON.

use std::fmt::{self, Write};

use serde::Serialize;

use crate::bias_test::BiasTest;
use crate::errors::AnalysisError;
use crate::geometry::Specimen;
use crate::torque::{SolverOptions, TorqueMode};

/// Key figures of a specimen and its data set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Summary {
    /// Material label.
    pub name: String,
    /// Width in millimetres.
    pub width: f64,
    /// Length in millimetres.
    pub length: f64,
    /// Thickness in millimetres.
    pub thickness: f64,
    /// Length divided by width.
    pub ratio: f64,
    /// Fully sheared zone area in square millimetres.
    pub sheared_area: f64,
    /// Half-sheared zone area in square millimetres.
    pub semi_sheared_area: f64,
    /// Number of samples.
    pub sample_count: usize,
}

impl Summary {
    /// Collect the summary of `specimen` tested with `sample_count` samples.
    #[must_use]
    pub fn new(specimen: &Specimen, sample_count: usize) -> Self {
        Self {
            name: specimen.name().to_string(),
            width: specimen.width(),
            length: specimen.length(),
            thickness: specimen.thickness(),
            ratio: specimen.ratio(),
            sheared_area: specimen.sheared_area(),
            semi_sheared_area: specimen.semi_sheared_area(),
            sample_count,
        }
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Bias Extension Properties:")?;
        writeln!(f, "  Material:  {}", self.name)?;
        writeln!(f, "  Width:     {:?} mm", self.width)?;
        writeln!(f, "  Length:    {:?} mm", self.length)?;
        writeln!(f, "  Thickness: {:?} mm", self.thickness)?;
        writeln!(f, "  Sample ratio: {:?}", self.ratio)?;
        writeln!(f, "  Sheared area: {:?} mm^2", self.sheared_area)?;
        writeln!(f, "  Semi-sheared area: {:?} mm^2", self.semi_sheared_area)?;
        write!(f, "  Experimental data: {} points", self.sample_count)
    }
}

/// One curve ready for plotting.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PlotView {
    /// Figure title.
    pub title: String,
    /// Horizontal axis label with unit.
    pub x_label: String,
    /// Vertical axis label with unit.
    pub y_label: String,
    /// Legend entry.
    pub legend: String,
    /// Horizontal coordinates.
    pub x: Vec<f64>,
    /// Vertical coordinates.
    pub y: Vec<f64>,
}

impl PlotView {
    /// Assemble a view from owned data.
    fn new(
        title: String,
        (x_label, y_label): (&str, &str),
        legend: &str,
        x: Vec<f64>,
        y: Vec<f64>,
    ) -> Self {
        Self {
            title,
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            legend: legend.to_string(),
            x,
            y,
        }
    }
}

/// Measured force against displacement.
#[must_use]
pub fn force_displacement(test: &BiasTest) -> PlotView {
    PlotView::new(
        format!("Force = f(displacement) : {}", test.specimen().name()),
        ("Displacement (mm)", "Force (N)"),
        "Experimental",
        test.samples().displacement().to_vec(),
        test.samples().force().to_vec(),
    )
}

/// Shear angle in degrees against displacement.
#[must_use]
pub fn angle_displacement(test: &BiasTest) -> PlotView {
    PlotView::new(
        format!("Shear angle = f(displacement) : {}", test.specimen().name()),
        ("Displacement (mm)", "Shear angle (°)"),
        "Theoretical",
        test.samples().displacement().to_vec(),
        test.angles().shear_angles_degrees().to_vec(),
    )
}

/// Shear torque against shear angle in degrees, computing the torque if needed.
///
/// # Errors
///
/// Propagates the errors of [`BiasTest::compute_shear_torque`].
pub fn torque_angle(test: &mut BiasTest) -> Result<PlotView, AnalysisError> {
    let torque = match test.shear_torque() {
        Some(torque) => torque.values().to_vec(),
        None => test
            .compute_shear_torque(&SolverOptions::default())?
            .values()
            .to_vec(),
    };
    Ok(PlotView::new(
        format!("Shear torque = f(shear angle) : {}", test.specimen().name()),
        ("Shear angle (°)", "Shear torque (N mm/mm^2)"),
        "Experimental",
        test.angles().shear_angles_degrees().to_vec(),
        torque,
    ))
}

/// Shear force against shear angle in degrees, computing it if needed.
///
/// # Errors
///
/// Propagates the errors of [`BiasTest::compute_shear_force`].
pub fn shear_force_angle(test: &mut BiasTest) -> Result<PlotView, AnalysisError> {
    let force = match test.shear_force() {
        Some(force) => force.values().to_vec(),
        None => test.compute_shear_force()?.values().to_vec(),
    };
    Ok(PlotView::new(
        format!("Shear force = f(shear angle) : {}", test.specimen().name()),
        ("Shear angle (°)", "Shear force (N/mm)"),
        "Experimental",
        test.angles().shear_angles_degrees().to_vec(),
        force,
    ))
}

/// Everything a front end needs to present a test.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Report {
    /// Specimen and data set figures.
    pub summary: Summary,
    /// Formula used for the shear torque.
    pub torque_mode: TorqueMode,
    /// Curves in presentation order.
    pub plots: Vec<PlotView>,
}

impl Report {
    /// Build the four standard views, computing missing stages with the
    /// recursive torque formula.
    ///
    /// # Errors
    ///
    /// Propagates errors from the torque and shear force stages.
    pub fn build(test: &mut BiasTest) -> Result<Self, AnalysisError> {
        let torque = torque_angle(test)?;
        let shear_force = shear_force_angle(test)?;
        let torque_mode = test
            .shear_torque()
            .map(|torque| torque.mode())
            .unwrap_or_default();
        Ok(Self {
            summary: test.summary(),
            torque_mode,
            plots: vec![
                force_displacement(test),
                angle_displacement(test),
                torque,
                shear_force,
            ],
        })
    }

    /// Serialise the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns the serialiser error, which only occurs for non-string map keys.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Render the summary followed by the last computed values of each series.
#[must_use]
pub fn render_summary(test: &BiasTest) -> String {
    let mut output = String::new();
    writeln!(&mut output, "{}", test.summary()).expect("writing to string cannot fail");

    let last = test.samples().len().saturating_sub(1);
    if let (Some(&angle), Some(&force)) = (
        test.angles().shear_angles_degrees().get(last),
        test.samples().force().get(last),
    ) {
        writeln!(
            &mut output,
            "Final state: shear angle = {angle:.2}°, force = {force:.2} N"
        )
        .expect("writing to string cannot fail");
    }
    if let Some(torque) = test.shear_torque() {
        if let Some(value) = torque.values().get(last) {
            writeln!(
                &mut output,
                "Final shear torque ({}): {value:.4e} N mm/mm^2",
                torque.mode()
            )
            .expect("writing to string cannot fail");
        }
    }
    if let Some(value) = test.shear_force().and_then(|force| force.values().get(last)) {
        writeln!(&mut output, "Final shear force: {value:.4e} N/mm")
            .expect("writing to string cannot fail");
    }
    output
}
