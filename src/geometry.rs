//! Specimen geometry for the bias extension test.

use serde::Serialize;
use uom::si::{
    f64::Length,
    length::{millimeter, Conversion as LengthConversion, Unit as LengthUnit},
};

use crate::errors::SpecimenError;

/// Smallest length/width ratio for which the three-zone kinematics hold.
pub const MIN_ASPECT_RATIO: f64 = 2.0;

/// Material name used when none is supplied.
pub const DEFAULT_MATERIAL_NAME: &str = "Generic material";

/// Thickness in millimetres used when none is supplied.
pub const DEFAULT_THICKNESS: f64 = 1.0;

/// Rectangular fabric specimen cut at ±45° to the yarns.
///
/// All dimensions are stored in millimetres. The derived picture-frame
/// constants are computed once on construction.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Specimen {
    /// Material label.
    name: String,
    /// Initial width.
    width: f64,
    /// Initial free length between the clamps.
    length: f64,
    /// Initial thickness.
    thickness: f64,
    /// Length divided by width.
    ratio: f64,
    /// Area of one half-sheared triangular zone, `width²`.
    semi_sheared_area: f64,
    /// Area of the fully sheared central zone.
    sheared_area: f64,
    /// Diagonal of the virtual picture frame in the central zone.
    diagonal_pf: f64,
    /// Side length of the virtual picture frame.
    length_side_pf: f64,
}

impl Specimen {
    /// Create a specimen from dimensions in millimetres.
    ///
    /// # Errors
    ///
    /// Returns [`SpecimenError::NonFinite`] or [`SpecimenError::NonPositive`] when a
    /// dimension is not a positive finite number, and
    /// [`SpecimenError::RatioTooSmall`] when `length / width` is below
    /// [`MIN_ASPECT_RATIO`].
    ///
    /// # Examples
    /// ```
    /// use biasx::Specimen;
    ///
    /// let specimen = Specimen::new(150.0, 450.0, 1.0, "Flax 250").unwrap();
    /// assert_eq!(specimen.ratio(), 3.0);
    /// assert_eq!(specimen.semi_sheared_area(), 22_500.0);
    /// assert_eq!(specimen.diagonal_pf(), 300.0);
    /// ```
    pub fn new(
        width: f64,
        length: f64,
        thickness: f64,
        name: impl Into<String>,
    ) -> Result<Self, SpecimenError> {
        check_dimension("width", width)?;
        check_dimension("length", length)?;
        check_dimension("thickness", thickness)?;

        let ratio = length / width;
        if ratio < MIN_ASPECT_RATIO {
            return Err(SpecimenError::RatioTooSmall {
                ratio,
                minimum: MIN_ASPECT_RATIO,
            });
        }

        let semi_sheared_area = width * width;
        let diagonal_pf = length - width;
        Ok(Self {
            name: name.into(),
            width,
            length,
            thickness,
            ratio,
            semi_sheared_area,
            sheared_area: width * length - 1.5 * semi_sheared_area,
            diagonal_pf,
            length_side_pf: diagonal_pf / std::f64::consts::SQRT_2,
        })
    }

    /// Create a specimen from dimensioned lengths in any unit.
    ///
    /// # Errors
    ///
    /// Same as [`Specimen::new`].
    ///
    /// # Examples
    /// ```
    /// use biasx::Specimen;
    /// use uom::si::{f64::Length, length::{centimeter, millimeter}};
    ///
    /// let specimen = Specimen::from_lengths(
    ///     Length::new::<centimeter>(15.0),
    ///     Length::new::<centimeter>(45.0),
    ///     Length::new::<millimeter>(1.0),
    ///     "Flax 250",
    /// )
    /// .unwrap();
    /// assert!((specimen.width() - 150.0).abs() < 1e-9);
    /// ```
    pub fn from_lengths(
        width: Length,
        length: Length,
        thickness: Length,
        name: impl Into<String>,
    ) -> Result<Self, SpecimenError> {
        Self::new(
            width.get::<millimeter>(),
            length.get::<millimeter>(),
            thickness.get::<millimeter>(),
            name,
        )
    }

    /// Create a specimen from bare numbers expressed in the length unit `T`.
    ///
    /// # Errors
    ///
    /// Same as [`Specimen::new`].
    ///
    /// # Examples
    /// ```
    /// use biasx::Specimen;
    /// use uom::si::length::inch;
    ///
    /// let specimen = Specimen::with_units::<inch>(4.0, 12.0, 0.04, "Carbon twill").unwrap();
    /// assert!((specimen.width() - 101.6).abs() < 1e-9);
    /// ```
    pub fn with_units<T: LengthUnit + LengthConversion<f64>>(
        width: f64,
        length: f64,
        thickness: f64,
        name: impl Into<String>,
    ) -> Result<Self, SpecimenError> {
        Self::from_lengths(
            Length::new::<T>(width),
            Length::new::<T>(length),
            Length::new::<T>(thickness),
            name,
        )
    }

    /// Material label.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width in millimetres.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Length in millimetres.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Thickness in millimetres.
    #[must_use]
    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Length divided by width.
    #[must_use]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Half-sheared zone area in square millimetres.
    #[must_use]
    pub fn semi_sheared_area(&self) -> f64 {
        self.semi_sheared_area
    }

    /// Fully sheared zone area in square millimetres.
    #[must_use]
    pub fn sheared_area(&self) -> f64 {
        self.sheared_area
    }

    /// Picture-frame diagonal in millimetres.
    #[must_use]
    pub fn diagonal_pf(&self) -> f64 {
        self.diagonal_pf
    }

    /// Picture-frame side length in millimetres.
    #[must_use]
    pub fn length_side_pf(&self) -> f64 {
        self.length_side_pf
    }

    /// Largest displacement the picture-frame kinematics can represent.
    ///
    /// At this displacement the inter-fiber angle closes to zero. Larger
    /// displacements put the arccos argument outside its domain.
    #[must_use]
    pub fn max_displacement(&self) -> f64 {
        2.0 * self.length_side_pf - self.diagonal_pf
    }
}

/// Reject dimensions that are not positive finite numbers.
fn check_dimension(parameter: &'static str, value: f64) -> Result<(), SpecimenError> {
    if !value.is_finite() {
        return Err(SpecimenError::NonFinite { parameter, value });
    }
    if value <= 0.0 {
        return Err(SpecimenError::NonPositive { parameter, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use uom::si::length::meter;

    #[test]
    fn derives_picture_frame_constants() {
        let specimen = Specimen::new(150.0, 450.0, 1.0, "Flax 250").expect("valid geometry");
        assert_relative_eq!(specimen.ratio(), 3.0);
        assert_relative_eq!(specimen.semi_sheared_area(), 22_500.0);
        assert_relative_eq!(specimen.sheared_area(), 150.0 * 450.0 - 1.5 * 22_500.0);
        assert_relative_eq!(specimen.diagonal_pf(), 300.0);
        assert_relative_eq!(specimen.length_side_pf(), 212.132_034_355_964_25, epsilon = 1e-9);
    }

    #[test]
    fn rejects_short_specimens() {
        let error = Specimen::new(100.0, 190.0, 1.0, "short").expect_err("ratio 1.9");
        match error {
            SpecimenError::RatioTooSmall { ratio, minimum } => {
                assert_relative_eq!(ratio, 1.9);
                assert_relative_eq!(minimum, MIN_ASPECT_RATIO);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn accepts_ratio_of_exactly_two() {
        assert!(Specimen::new(100.0, 200.0, 1.0, "square-ish").is_ok());
    }

    #[test]
    fn rejects_non_positive_and_non_finite_dimensions() {
        assert_eq!(
            Specimen::new(0.0, 450.0, 1.0, "x"),
            Err(SpecimenError::NonPositive {
                parameter: "width",
                value: 0.0
            })
        );
        assert_eq!(
            Specimen::new(150.0, 450.0, -1.0, "x"),
            Err(SpecimenError::NonPositive {
                parameter: "thickness",
                value: -1.0
            })
        );
        assert!(matches!(
            Specimen::new(150.0, f64::INFINITY, 1.0, "x"),
            Err(SpecimenError::NonFinite {
                parameter: "length",
                ..
            })
        ));
        assert!(matches!(
            Specimen::new(f64::NAN, 450.0, 1.0, "x"),
            Err(SpecimenError::NonFinite {
                parameter: "width",
                ..
            })
        ));
    }

    #[test]
    fn converts_units_to_millimetres() {
        let specimen = Specimen::from_lengths(
            Length::new::<meter>(0.15),
            Length::new::<meter>(0.45),
            Length::new::<millimeter>(2.0),
            "Glass plain",
        )
        .expect("valid geometry");
        assert_relative_eq!(specimen.width(), 150.0, epsilon = 1e-9);
        assert_relative_eq!(specimen.length(), 450.0, epsilon = 1e-9);
        assert_relative_eq!(specimen.thickness(), 2.0, epsilon = 1e-9);
    }

    #[test]
    fn travel_limit_closes_the_frame() {
        let specimen = Specimen::new(150.0, 450.0, 1.0, "x").expect("valid geometry");
        let argument = (specimen.max_displacement() + specimen.diagonal_pf())
            / (2.0 * specimen.length_side_pf());
        assert_relative_eq!(argument, 1.0, epsilon = 1e-12);
    }
}
