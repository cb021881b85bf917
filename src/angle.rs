// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Signed angle in decimal degrees.
//!
//! [`Angle`] wraps a [`Degrees`] quantity and is **not** normalised on
//! construction.  Reduction into `(-360°, 360°)` is an explicit step
//! ([`Angle::reduce`]) that every reader (component extraction, unit
//! conversion, trigonometry) performs first.  The reduction truncates
//! toward zero, so the sign of the angle is preserved.
//!
//! ## Sign convention for piecewise values
//!
//! Angles built from components (`d°m's"` or `h m s`) are negative when
//! *any* component is negative; all components contribute their magnitude.
//! Extraction is symmetric: the first non-zero component carries the sign
//! and every later component is a magnitude.
//!
//! ```rust
//! use scalib::Angle;
//!
//! let a = Angle::from_dms(0, -24, 34, 0.0);
//! assert_eq!(a.degrees(), 0);
//! assert_eq!(a.arcmins(), -24);
//! assert_eq!(a.arcsecs(), 34);
//! ```

use qtty::{Degree, Degrees, Radian, Radians};
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const FULL_TURN: f64 = 360.0;
const DEGREES_PER_HOUR: f64 = 15.0;
const MILLIS_PER_UNIT: f64 = 3_600_000.0;
const MILLIS_PER_MINUTE: f64 = 60_000.0;
const MILLIS_PER_SECOND: f64 = 1_000.0;

// Sub-millisecond digits kept when splitting into components.
const EXTRACTION_SCALE: f64 = 1e6;

/// Decimal-degree angle.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Angle {
    degrees: Degrees,
}

impl Angle {
    /// The zero angle.
    pub const ZERO: Self = Self::new(0.0);

    // ── constructors ──────────────────────────────────────────────────

    /// Create from a raw value in decimal degrees.
    #[inline]
    pub const fn new(degrees: f64) -> Self {
        Self {
            degrees: Degrees::new(degrees),
        }
    }

    /// Create from a [`Degrees`] quantity.
    #[inline]
    pub const fn from_quantity(degrees: Degrees) -> Self {
        Self { degrees }
    }

    /// Identity constructor; documents that `value` is already decimal degrees.
    #[inline]
    pub const fn from_decimal_degrees(value: f64) -> Self {
        Self::new(value)
    }

    /// Create from radians.
    #[inline]
    pub fn from_radians(radians: f64) -> Self {
        Self::from_quantity(Radians::new(radians).to::<Degree>())
    }

    /// Create from degrees, arcminutes, arcseconds and milliarcseconds.
    ///
    /// The result is negative when any component is negative.
    pub fn from_dms(degrees: i32, arcmins: i32, arcsecs: i32, milliarcsecs: f64) -> Self {
        let magnitude = f64::from(degrees.unsigned_abs())
            + (f64::from(arcmins.unsigned_abs())
                + (f64::from(arcsecs.unsigned_abs()) + milliarcsecs.abs() / MILLIS_PER_SECOND)
                    / 60.0)
                / 60.0;
        let negative = degrees < 0 || arcmins < 0 || arcsecs < 0 || milliarcsecs < 0.0;
        Self::new(if negative { -magnitude } else { magnitude })
    }

    /// Create from hours, minutes, seconds and milliseconds of time (1 h = 15°).
    ///
    /// The result is negative when any component is negative.
    pub fn from_hms(hours: i32, minutes: i32, seconds: i32, milliseconds: f64) -> Self {
        Self::from_dms(hours, minutes, seconds, milliseconds) * DEGREES_PER_HOUR
    }

    /// Arc tangent of `y / x` using the signs of both to pick the quadrant.
    #[inline]
    pub fn atan2(y: f64, x: f64) -> Self {
        Self::from_radians(y.atan2(x))
    }

    /// Arc sine, in `[-90°, 90°]`.
    #[inline]
    pub fn asin(value: f64) -> Self {
        Self::from_radians(value.asin())
    }

    /// Arc cosine, in `[0°, 180°]`.
    #[inline]
    pub fn acos(value: f64) -> Self {
        Self::from_radians(value.acos())
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// Raw stored value in decimal degrees (not reduced).
    #[inline]
    pub const fn value(&self) -> f64 {
        self.degrees.value()
    }

    /// Raw stored quantity (not reduced).
    #[inline]
    pub const fn quantity(&self) -> Degrees {
        self.degrees
    }

    /// `value - 360·trunc(value / 360)`: the result lies in `(-360, 360)`
    /// and keeps the sign of the input.
    #[inline]
    pub fn reduce(self) -> Self {
        let v = self.value();
        Self::new(v - FULL_TURN * (v / FULL_TURN).trunc())
    }

    /// Wraps into `[0°, 360°)`, for display of right ascensions and azimuths.
    #[inline]
    pub fn normalized(self) -> Self {
        Self::new(self.value().rem_euclid(FULL_TURN))
    }

    /// Absolute value.
    #[inline]
    pub fn abs(self) -> Self {
        Self::new(self.value().abs())
    }

    /// Reduced decimal degrees.
    #[inline]
    pub fn to_degrees(&self) -> f64 {
        self.reduce().value()
    }

    /// Reduced decimal hours.
    #[inline]
    pub fn to_hours(&self) -> f64 {
        self.to_degrees() / DEGREES_PER_HOUR
    }

    /// Reduced radians.
    #[inline]
    pub fn to_radians(&self) -> f64 {
        self.reduce().degrees.to::<Radian>().value()
    }

    // ── component extraction ──────────────────────────────────────────

    /// Integer degrees.
    pub fn degrees(&self) -> i32 {
        split(self.to_degrees()).0
    }

    /// Arcminutes below the degree part.
    pub fn arcmins(&self) -> i32 {
        split(self.to_degrees()).1
    }

    /// Arcseconds below the arcminute part.
    pub fn arcsecs(&self) -> i32 {
        split(self.to_degrees()).2
    }

    /// Milliarcseconds below the arcsecond part.
    pub fn milliarcsecs(&self) -> f64 {
        split(self.to_degrees()).3
    }

    /// Integer hours.
    pub fn hours(&self) -> i32 {
        split(self.to_hours()).0
    }

    /// Minutes of time below the hour part.
    pub fn minutes(&self) -> i32 {
        split(self.to_hours()).1
    }

    /// Seconds of time below the minute part.
    pub fn seconds(&self) -> i32 {
        split(self.to_hours()).2
    }

    /// Milliseconds of time below the second part.
    pub fn milliseconds(&self) -> f64 {
        split(self.to_hours()).3
    }

    /// `(degrees, arcmins, arcsecs, milliarcsecs)` in one pass.
    pub fn to_dms(&self) -> (i32, i32, i32, f64) {
        split(self.to_degrees())
    }

    /// `(hours, minutes, seconds, milliseconds)` in one pass.
    pub fn to_hms(&self) -> (i32, i32, i32, f64) {
        split(self.to_hours())
    }

    // ── trigonometry ──────────────────────────────────────────────────

    /// Sine of the reduced angle.
    #[inline]
    pub fn sin(&self) -> f64 {
        self.reduce().degrees.sin()
    }

    /// Cosine of the reduced angle.
    #[inline]
    pub fn cos(&self) -> f64 {
        self.reduce().degrees.cos()
    }

    /// Tangent of the reduced angle.
    #[inline]
    pub fn tan(&self) -> f64 {
        self.reduce().degrees.tan()
    }

    /// `(sin, cos)` of the reduced angle.
    #[inline]
    pub fn sin_cos(&self) -> (f64, f64) {
        self.reduce().degrees.sin_cos()
    }
}

/// Splits a reduced value into `(unit, minutes, seconds, millis)`.
///
/// The magnitude is rounded to [`EXTRACTION_SCALE`] of a milli-unit so that
/// values assembled from exact components split back into the same integers.
fn split(value: f64) -> (i32, i32, i32, f64) {
    let millis = (value.abs() * MILLIS_PER_UNIT * EXTRACTION_SCALE).round() / EXTRACTION_SCALE;

    let units = (millis / MILLIS_PER_UNIT).floor();
    let mut rest = millis - units * MILLIS_PER_UNIT;
    let minutes = (rest / MILLIS_PER_MINUTE).floor();
    rest -= minutes * MILLIS_PER_MINUTE;
    let seconds = (rest / MILLIS_PER_SECOND).floor();
    rest -= seconds * MILLIS_PER_SECOND;

    let (mut u, mut m, mut s, mut ms) = (units as i32, minutes as i32, seconds as i32, rest);
    if value < 0.0 {
        if u != 0 {
            u = -u;
        } else if m != 0 {
            m = -m;
        } else if s != 0 {
            s = -s;
        } else {
            ms = -ms;
        }
    }
    (u, m, s, ms)
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

// ── Display ───────────────────────────────────────────────────────────────

impl std::fmt::Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let degrees = self.to_degrees();
        // Round once to whole milliarcseconds so the fields carry upward.
        let total = (degrees.abs() * MILLIS_PER_UNIT).round();
        let sign = if degrees < 0.0 && total > 0.0 { "-" } else { "+" };
        let d = (total / MILLIS_PER_UNIT).trunc();
        let rest = total - d * MILLIS_PER_UNIT;
        let m = (rest / MILLIS_PER_MINUTE).trunc();
        let arcsecs = (rest - m * MILLIS_PER_MINUTE) / MILLIS_PER_SECOND;
        write!(f, "{sign}{:02}°{:02}'{arcsecs:06.3}\"", d as u64, m as u64)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for Angle {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for Angle {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add for Angle {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::from_quantity(self.degrees + rhs.degrees)
    }
}

impl AddAssign for Angle {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.degrees += rhs.degrees;
    }
}

impl Sub for Angle {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self::from_quantity(self.degrees - rhs.degrees)
    }
}

impl SubAssign for Angle {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.degrees -= rhs.degrees;
    }
}

impl Neg for Angle {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.value())
    }
}

impl Mul<f64> for Angle {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f64) -> Self::Output {
        Self::new(self.value() * rhs)
    }
}

impl Mul<Angle> for f64 {
    type Output = Angle;
    #[inline]
    fn mul(self, rhs: Angle) -> Self::Output {
        Angle::new(self * rhs.value())
    }
}

impl Div<f64> for Angle {
    type Output = Self;
    #[inline]
    fn div(self, rhs: f64) -> Self::Output {
        Self::new(self.value() / rhs)
    }
}

// ── From/Into Degrees ─────────────────────────────────────────────────────

impl From<Degrees> for Angle {
    #[inline]
    fn from(degrees: Degrees) -> Self {
        Self::from_quantity(degrees)
    }
}

impl From<Angle> for Degrees {
    #[inline]
    fn from(angle: Angle) -> Self {
        angle.degrees
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    #[test]
    fn reduce_keeps_sign_and_range() {
        for v in [0.0, 359.9, 360.0, 725.5, -725.5, -360.0, -0.25, 1.0e6, -1.0e6] {
            let r = Angle::new(v).reduce();
            assert!(r.value() > -360.0 && r.value() < 360.0, "{v} -> {}", r.value());
            assert_eq!(r.reduce(), r, "reduce not idempotent for {v}");
            if r.value() != 0.0 {
                assert_eq!(r.value().signum(), v.signum());
            }
        }
        assert_abs_diff_eq!(Angle::new(725.5).reduce().value(), 5.5, epsilon = 1e-12);
        assert_abs_diff_eq!(Angle::new(-725.5).reduce().value(), -5.5, epsilon = 1e-12);
        assert_abs_diff_eq!(Angle::new(-725.5).normalized().value(), 354.5, epsilon = 1e-12);
    }

    #[test]
    fn dms_roundtrip_positive() {
        let a = Angle::from_dms(30, 23, 50, 0.0);
        assert_eq!(a.degrees(), 30);
        assert_eq!(a.arcmins(), 23);
        assert_eq!(a.arcsecs(), 50);
        assert_abs_diff_eq!(a.milliarcsecs(), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn sign_lives_on_first_nonzero_component() {
        assert_eq!(Angle::from_dms(0, -24, 34, 0.0).to_dms(), (0, -24, 34, 0.0));
        assert_eq!(Angle::from_dms(0, 0, -5, 0.0).to_dms(), (0, 0, -5, 0.0));
        assert_eq!(Angle::from_dms(0, 0, 0, -250.0).to_dms(), (0, 0, 0, -250.0));
        assert_eq!(Angle::from_dms(-12, 0, 0, 500.0).to_dms(), (-12, 0, 0, 500.0));
        assert_eq!(Angle::from_dms(-12, 30, 0, 0.0).to_dms(), (-12, 30, 0, 0.0));
    }

    #[test]
    fn any_negative_component_negates_the_whole() {
        let a = Angle::from_dms(10, -30, 0, 0.0);
        let b = Angle::from_dms(-10, 30, 0, 0.0);
        assert_eq!(a, b);
        assert_abs_diff_eq!(a.value(), -10.5, epsilon = 1e-12);
    }

    #[test]
    fn hms_components() {
        let a = Angle::from_hms(2, 44, 11, 986.0);
        assert_abs_diff_eq!(a.value(), 41.049_941_666_666_67, epsilon = 1e-9);
        assert_eq!(a.hours(), 2);
        assert_eq!(a.minutes(), 44);
        assert_eq!(a.seconds(), 11);
        assert_abs_diff_eq!(a.milliseconds(), 986.0, epsilon = 1e-3);

        let neg = Angle::from_hms(0, -3, 0, 0.0);
        assert_eq!(neg.to_hms(), (0, -3, 0, 0.0));
        assert_abs_diff_eq!(neg.value(), -0.75, epsilon = 1e-12);
    }

    #[test]
    fn decimal_and_radian_roundtrips() {
        for x in [12.5, -400.0, 1234.567, -0.001] {
            assert_eq!(
                Angle::from_decimal_degrees(x).to_degrees(),
                Angle::new(x).reduce().value()
            );
        }
        for r in [0.5, -1.0, 7.0, -20.0] {
            let reduced = r - 2.0 * PI * (r / (2.0 * PI)).trunc();
            assert_abs_diff_eq!(Angle::from_radians(r).to_radians(), reduced, epsilon = 1e-10);
        }
    }

    #[test]
    fn trig_reduces_first() {
        let a = Angle::new(390.0);
        assert_abs_diff_eq!(a.sin(), 0.5, epsilon = 1e-12);
        let (s, c) = Angle::new(-300.0).sin_cos();
        assert_abs_diff_eq!(s, 60f64.to_radians().sin(), epsilon = 1e-12);
        assert_abs_diff_eq!(c, 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(Angle::new(45.0).tan(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn inverse_trig_constructors() {
        assert_abs_diff_eq!(Angle::atan2(1.0, -1.0).value(), 135.0, epsilon = 1e-12);
        assert_abs_diff_eq!(Angle::asin(0.5).value(), 30.0, epsilon = 1e-12);
        assert_abs_diff_eq!(Angle::acos(0.5).value(), 60.0, epsilon = 1e-12);
    }

    #[test]
    fn arithmetic() {
        let mut a = Angle::new(10.0) + Angle::new(5.0) - Angle::new(2.0);
        a += Angle::new(1.0);
        a -= Angle::new(4.0);
        assert_eq!(a, Angle::new(10.0));
        assert_eq!(-a, Angle::new(-10.0));
        assert_eq!(a * 2.0, Angle::new(20.0));
        assert_eq!(2.0 * a, Angle::new(20.0));
        assert_eq!(a / 4.0, Angle::new(2.5));
    }

    #[test]
    fn display_as_dms() {
        assert_eq!(Angle::from_dms(23, 26, 21, 448.0).to_string(), "+23°26'21.448\"");
        assert_eq!(Angle::from_dms(0, -24, 34, 0.0).to_string(), "-00°24'34.000\"");
    }

    #[test]
    fn display_carries_rounded_seconds() {
        assert_eq!(Angle::new(359.999_999_999_9).to_string(), "+360°00'00.000\"");
        assert_eq!(Angle::new(-10.999_999_999_9).to_string(), "-11°00'00.000\"");
        assert_eq!(Angle::from_dms(5, 59, 59, 999.6).to_string(), "+06°00'00.000\"");
        assert_eq!(Angle::new(-1e-12).to_string(), "+00°00'00.000\"");
    }
}
