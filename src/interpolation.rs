//! Piecewise-linear table lookup used by the torque recurrence.

use crate::errors::AnalysisError;

/// Interpolate `fp` at `x` over the abscissae `xp`.
///
/// Queries at or beyond either end of the table return the nearest endpoint
/// value. Inside the table the first segment `j` with `xp[j] <= x < xp[j + 1]`
/// is used, so a non-monotonic table still yields a value: the one from the
/// first ascending bracket containing `x`.
///
/// Only the first `min(xp.len(), fp.len())` points are used.
///
/// # Errors
///
/// Returns [`AnalysisError::EmptyTable`] when the table has no points.
///
/// # Examples
/// ```
/// use biasx::interpolate;
///
/// let xp = [0.0, 1.0, 2.0];
/// let fp = [0.0, 10.0, 40.0];
/// assert_eq!(interpolate(1.5, &xp, &fp).unwrap(), 25.0);
/// assert_eq!(interpolate(-1.0, &xp, &fp).unwrap(), 0.0);
/// assert_eq!(interpolate(9.0, &xp, &fp).unwrap(), 40.0);
/// ```
pub fn interpolate(x: f64, xp: &[f64], fp: &[f64]) -> Result<f64, AnalysisError> {
    let points = xp.len().min(fp.len());
    if points == 0 {
        return Err(AnalysisError::EmptyTable);
    }
    let (xp, fp) = (&xp[..points], &fp[..points]);
    let last = points - 1;

    if x <= xp[0] {
        return Ok(fp[0]);
    }
    if x >= xp[last] {
        return Ok(fp[last]);
    }
    for j in 0..last {
        let (x0, x1) = (xp[j], xp[j + 1]);
        if x0 <= x && x < x1 {
            let t = (x - x0) / (x1 - x0);
            return Ok(fp[j] + t * (fp[j + 1] - fp[j]));
        }
    }
    // Only reachable for a NaN query or NaN abscissae.
    Ok(fp[last])
}

/// Index of the first value that is smaller than its predecessor.
#[must_use]
pub fn first_decrease(values: &[f64]) -> Option<usize> {
    values
        .windows(2)
        .position(|pair| pair[1] < pair[0])
        .map(|position| position + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn interpolates_inside_segments() {
        let xp = [0.0, 0.1, 0.3];
        let fp = [0.0, 1.0, 2.0];
        assert_relative_eq!(interpolate(0.05, &xp, &fp).unwrap(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(interpolate(0.2, &xp, &fp).unwrap(), 1.5, epsilon = 1e-12);
        assert_relative_eq!(interpolate(0.1, &xp, &fp).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn extrapolates_flat_at_both_ends() {
        let xp = [1.0, 2.0];
        let fp = [5.0, 7.0];
        assert_eq!(interpolate(0.0, &xp, &fp).unwrap(), 5.0);
        assert_eq!(interpolate(2.0, &xp, &fp).unwrap(), 7.0);
        assert_eq!(interpolate(100.0, &xp, &fp).unwrap(), 7.0);
    }

    #[test]
    fn single_point_table_is_constant() {
        assert_eq!(interpolate(3.0, &[1.0], &[4.0]).unwrap(), 4.0);
        assert_eq!(interpolate(-3.0, &[1.0], &[4.0]).unwrap(), 4.0);
    }

    #[test]
    fn empty_table_is_rejected() {
        assert_eq!(interpolate(0.0, &[], &[]), Err(AnalysisError::EmptyTable));
    }

    #[test]
    fn non_monotonic_table_uses_first_ascending_bracket() {
        // 0.5 lies in both [0, 1] and [0.2, 2]; the first bracket wins.
        let xp = [0.0, 1.0, 0.2, 2.0];
        let fp = [0.0, 10.0, 0.0, 20.0];
        assert_relative_eq!(interpolate(0.5, &xp, &fp).unwrap(), 5.0, epsilon = 1e-12);
        // 1.5 lies only in the last segment.
        assert_relative_eq!(interpolate(1.5, &xp, &fp).unwrap(), 0.0 + 20.0 * (1.3 / 1.8), epsilon = 1e-12);
    }

    #[test]
    fn finds_first_decrease() {
        assert_eq!(first_decrease(&[0.0, 0.1, 0.1, 0.3]), None);
        assert_eq!(first_decrease(&[0.0, 0.2, 0.1, 0.3]), Some(2));
        assert_eq!(first_decrease(&[]), None);
    }
}
