// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Bessel interpolation over equally spaced samples (Meeus ch. 3).
//!
//! Both functions expect the abscissae in increasing order with a constant
//! step and interpolate around the central sample with the factor
//! `n = (x − x_centre) / step`.  Accuracy degrades when `|n| > 0.5`, i.e.
//! when another sample would be a better centre; that case is reported as a
//! `log` warning and the result is still returned.

use crate::error::{Error, Result};

/// Relative deviation allowed between consecutive sample gaps.
const SPACING_TOLERANCE: f64 = 1e-9;

/// Normalised interpolation factor, plus the range and spacing checks.
fn factor(x: &[f64], centre: usize, xval: f64) -> Result<f64> {
    let (first, last) = (x[0], x[x.len() - 1]);
    if !(xval > first && xval < last) {
        return Err(Error::OutOfRange {
            value: xval,
            min: first,
            max: last,
        });
    }

    let step = x[1] - x[0];
    if step == 0.0 || !step.is_finite() {
        return Err(Error::invalid("sample spacing", step));
    }
    if let Some(gap) = x
        .windows(2)
        .map(|w| w[1] - w[0])
        .find(|gap| (gap - step).abs() > SPACING_TOLERANCE * step.abs())
    {
        return Err(Error::invalid("sample spacing", gap));
    }

    let n = (xval - x[centre]) / step;
    if n.abs() > 0.5 {
        log::warn!(
            "interpolation factor {n:.3} exceeds 0.5 at x = {xval}; results may have low accuracy"
        );
    }
    Ok(n)
}

/// Three-point interpolation (Meeus 3.3).
///
/// Fails with [`Error::OutOfRange`] unless `x[0] < xval < x[2]`.
pub fn interpolate3(x: &[f64; 3], y: &[f64; 3], xval: f64) -> Result<f64> {
    let n = factor(x, 1, xval)?;

    let a = y[1] - y[0];
    let b = y[2] - y[1];
    let c = b - a;

    Ok(y[1] + n / 2.0 * (a + b + n * c))
}

/// Five-point interpolation (Meeus 3.8).
///
/// Fails with [`Error::OutOfRange`] unless `x[0] < xval < x[4]`.
pub fn interpolate5(x: &[f64; 5], y: &[f64; 5], xval: f64) -> Result<f64> {
    let n = factor(x, 2, xval)?;

    // first differences
    let a = y[1] - y[0];
    let b = y[2] - y[1];
    let c = y[3] - y[2];
    let d = y[4] - y[3];
    // second
    let e = b - a;
    let f = c - b;
    let g = d - c;
    // third
    let h = f - e;
    let j = g - f;
    // fourth
    let k = j - h;

    let n2 = n * n;
    Ok(y[2]
        + n / 2.0 * (b + c)
        + n2 / 2.0 * f
        + n * (n2 - 1.0) / 12.0 * (h + j)
        + n2 * (n2 - 1.0) / 24.0 * k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn three_point_meeus_3a() {
        // Distance of Mars, 1992-11-07..09, interpolated at 8d 4h21m.
        let x = [7.0, 8.0, 9.0];
        let y = [0.884_226, 0.877_366, 0.870_531];
        let v = interpolate3(&x, &y, 8.0 + 4.35 / 24.0).unwrap();
        assert_abs_diff_eq!(v, 0.876_125, epsilon = 1e-6);
    }

    #[test]
    fn three_point_reproduces_centre_and_neighbours() {
        let x = [1.0, 2.0, 3.0];
        let y = [4.0, -1.0, 7.5];
        assert_eq!(interpolate3(&x, &y, 2.0).unwrap(), -1.0);
        // exact for a parabola through the samples
        let p = |t: f64| 2.0 * t * t - 3.0 * t + 1.0;
        let y = [p(1.0), p(2.0), p(3.0)];
        assert_abs_diff_eq!(interpolate3(&x, &y, 2.3).unwrap(), p(2.3), epsilon = 1e-12);
        assert_abs_diff_eq!(interpolate3(&x, &y, 1.7).unwrap(), p(1.7), epsilon = 1e-12);
    }

    #[test]
    fn five_point_reproduces_quartics() {
        let p = |t: f64| 0.5 * t.powi(4) - t.powi(3) + 2.0 * t - 7.0;
        let x = [27.0, 27.5, 28.0, 28.5, 29.0];
        let y = x.map(p);
        assert_abs_diff_eq!(interpolate5(&x, &y, 28.0).unwrap(), y[2], epsilon = 1e-9);
        assert_abs_diff_eq!(interpolate5(&x, &y, 28.1).unwrap(), p(28.1), epsilon = 1e-6);
        assert_abs_diff_eq!(interpolate5(&x, &y, 27.8).unwrap(), p(27.8), epsilon = 1e-6);
    }

    #[test]
    fn low_accuracy_factor_still_computes() {
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 1.0, 4.0];
        assert_abs_diff_eq!(interpolate3(&x, &y, 0.2).unwrap(), 0.04, epsilon = 1e-12);
    }

    #[test]
    fn rejects_values_outside_open_interval() {
        let x = [1.0, 2.0, 3.0];
        let y = [1.0, 2.0, 3.0];
        for xval in [1.0, 3.0, 0.0, 4.2, f64::NAN] {
            assert!(matches!(
                interpolate3(&x, &y, xval),
                Err(Error::OutOfRange { .. })
            ));
        }
        let x5 = [1.0, 2.0, 3.0, 4.0, 5.0];
        let y5 = [0.0; 5];
        assert_eq!(
            interpolate5(&x5, &y5, 5.0),
            Err(Error::OutOfRange {
                value: 5.0,
                min: 1.0,
                max: 5.0
            })
        );
    }

    #[test]
    fn rejects_zero_spacing() {
        let x = [1.0, 1.0, 3.0];
        assert!(matches!(
            interpolate3(&x, &[0.0; 3], 2.0),
            Err(Error::InvalidInput { .. })
        ));
    }

    #[test]
    fn rejects_uneven_spacing() {
        assert_eq!(
            interpolate3(&[0.0, 1.0, 5.0], &[0.0; 3], 0.8),
            Err(Error::InvalidInput {
                what: "sample spacing",
                value: 4.0
            })
        );
        let x = [8.0, 9.0, 10.0, 11.5, 12.0];
        assert!(matches!(
            interpolate5(&x, &[0.0; 5], 10.2),
            Err(Error::InvalidInput { what: "sample spacing", .. })
        ));
    }

    #[test]
    fn accepts_rounded_decimal_steps() {
        let x = [0.1, 0.2, 0.3];
        let y = [1.0, 2.0, 3.0];
        assert_abs_diff_eq!(interpolate3(&x, &y, 0.25).unwrap(), 2.5, epsilon = 1e-9);
    }
}
