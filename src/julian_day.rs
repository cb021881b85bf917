// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Continuous day count used as the time axis of every computation.
//!
//! [`JulianDay`] stores the number of days elapsed since −4712-01-01 12:00
//! UT in a [`Days`] quantity.  Construction is infallible and `const`;
//! validity (finite, non-negative) is checked by every operation that
//! consumes a value, which fails with
//! [`Error::NegativeJulianDay`](crate::Error::NegativeJulianDay) instead of
//! returning a meaningless number.
//!
//! Calendar conversions live in [`calendar`](crate::calendar); the
//! dynamical-time shift in [`delta_t`](crate::delta_t).

use chrono::{DateTime, Utc};
use qtty::*;
use std::ops::{Add, AddAssign, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::angle::Angle;
use crate::earth;
use crate::error::{Error, Result};

const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const MJD_OFFSET: Days = Days::new(2_400_000.5);

/// Julian Day (UT unless stated otherwise).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct JulianDay {
    days: Days,
}

impl JulianDay {
    /// J2000.0 epoch: 2000-01-01T12:00:00 (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// First day of the Gregorian calendar, 1582-10-15 00:00.
    pub const GREGORIAN_REFORM: Self = Self::new(2_299_160.5);

    /// One Julian year expressed in days.
    pub const JULIAN_YEAR: Days = Days::new(365.25);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// One Julian millennium expressed in days.
    pub const JULIAN_MILLENNIUM: Days = Days::new(365_250.0);

    // ── constructors ──────────────────────────────────────────────────

    /// Create from a raw day count.
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            days: Days::new(value),
        }
    }

    /// Create from a [`Days`] quantity.
    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self { days }
    }

    /// Build a Julian Day from a `chrono::DateTime<Utc>`.
    ///
    /// The timestamp is taken as Universal Time; no ΔT is applied.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        let seconds_since_epoch = Seconds::new(datetime.timestamp() as f64);
        let nanos = Seconds::new(datetime.timestamp_subsec_nanos() as f64 / 1e9);
        Self::from_days(Days::new(UNIX_EPOCH_JD) + (seconds_since_epoch + nanos).to::<Day>())
    }

    // ── accessors ─────────────────────────────────────────────────────

    /// The underlying quantity in days.
    #[inline]
    pub const fn quantity(&self) -> Days {
        self.days
    }

    /// The underlying scalar value in days.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.days.value()
    }

    /// Returns `self` if it is finite and not negative.
    pub fn validate(self) -> Result<Self> {
        let v = self.value();
        if !v.is_finite() {
            Err(Error::invalid("Julian Day", v))
        } else if v < 0.0 {
            Err(Error::NegativeJulianDay(v))
        } else {
            Ok(self)
        }
    }

    /// Convert to a `chrono::DateTime<Utc>`.
    ///
    /// Returns `None` if the value falls outside chrono's representable range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        let seconds_since_epoch = (self.days - Days::new(UNIX_EPOCH_JD)).to::<Second>().value();
        let secs = seconds_since_epoch.floor() as i64;
        let nanos = ((seconds_since_epoch - secs as f64) * 1e9) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos)
    }

    /// Modified Julian Date, `JD − 2 400 000.5`.
    #[inline]
    pub fn to_mjd(&self) -> Days {
        self.days - MJD_OFFSET
    }

    // ── epoch offsets ─────────────────────────────────────────────────

    /// Julian centuries since J2000.0 (nutation, obliquity, mean elements).
    #[inline]
    pub fn centuries_since_2000(&self) -> Centuries {
        Centuries::new(
            ((*self - Self::J2000) / Self::JULIAN_CENTURY)
                .simplify()
                .value(),
        )
    }

    /// Julian millennia since J2000.0 (VSOP87, solar mean longitude).
    #[inline]
    pub fn millennia_since_2000(&self) -> Millennia {
        Millennia::new(
            ((*self - Self::J2000) / Self::JULIAN_MILLENNIUM)
                .simplify()
                .value(),
        )
    }

    /// Julian years since J2000.0 (proper motion).
    #[inline]
    pub fn julian_years(&self) -> JulianYears {
        JulianYears::new(
            ((*self - Self::J2000) / Self::JULIAN_YEAR)
                .simplify()
                .value(),
        )
    }

    // ── sidereal time ─────────────────────────────────────────────────

    /// Mean Greenwich sidereal time (Meeus 12.4), reduced.
    pub fn mean_sidereal_time(&self) -> Result<Angle> {
        let jd = self.validate()?;
        let t = jd.centuries_since_2000().value();
        let days = (jd - Self::J2000).value();
        Ok(Angle::new(
            280.460_618_37 + 360.985_647_366_29 * days + 0.000_387_933 * t * t
                - t * t * t / 38_710_000.0,
        )
        .reduce())
    }

    /// Apparent Greenwich sidereal time: the mean value plus the equation of
    /// the equinoxes `Δψ·cos ε`, reduced.
    ///
    /// The result keeps the sign convention of [`Angle::reduce`] and may be
    /// negative.
    pub fn sidereal_time(&self) -> Result<Angle> {
        let mean = self.mean_sidereal_time()?;
        let nutation = earth::nutation(*self)?;
        let obliquity = earth::ecliptic_obliquity(*self)?;
        Ok((mean + nutation.longitude * obliquity.cos()).reduce())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

// ── Display ───────────────────────────────────────────────────────────────

impl std::fmt::Display for JulianDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "JD {}", self.days)
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for JulianDay {
    fn serialize<Ser>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for JulianDay {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<Days> for JulianDay {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.days + rhs)
    }
}

impl AddAssign<Days> for JulianDay {
    #[inline]
    fn add_assign(&mut self, rhs: Days) {
        self.days += rhs;
    }
}

impl Sub<Days> for JulianDay {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.days - rhs)
    }
}

impl SubAssign<Days> for JulianDay {
    #[inline]
    fn sub_assign(&mut self, rhs: Days) {
        self.days -= rhs;
    }
}

impl Sub for JulianDay {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.days - rhs.days
    }
}

// ── From/Into Days ────────────────────────────────────────────────────────

impl From<Days> for JulianDay {
    #[inline]
    fn from(days: Days) -> Self {
        Self::from_days(days)
    }
}

impl From<JulianDay> for Days {
    #[inline]
    fn from(jd: JulianDay) -> Self {
        jd.days
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_negative_and_non_finite() {
        assert_eq!(
            JulianDay::new(-0.5).validate(),
            Err(Error::NegativeJulianDay(-0.5))
        );
        assert!(matches!(
            JulianDay::new(f64::NAN).validate(),
            Err(Error::InvalidInput { .. })
        ));
        assert_eq!(JulianDay::new(0.0).validate(), Ok(JulianDay::new(0.0)));
    }

    #[test]
    fn epoch_offsets() {
        let jd = JulianDay::J2000 + Days::new(365_250.0);
        assert!((jd.millennia_since_2000() - Millennia::new(1.0)).abs() < Millennia::new(1e-12));
        assert!((jd.centuries_since_2000() - Centuries::new(10.0)).abs() < Centuries::new(1e-12));
        assert!((jd.julian_years() - JulianYears::new(1000.0)).abs() < JulianYears::new(1e-9));

        let meeus = JulianDay::new(2_448_908.5);
        assert!((meeus.centuries_since_2000().value() - (-0.072_183_436)).abs() < 1e-9);
    }

    #[test]
    fn utc_roundtrip_j2000() {
        // 2000-01-01 12:00:00 UTC is JD 2451545.0 exactly.
        let datetime = DateTime::from_timestamp(946_728_000, 0).unwrap();
        let jd = JulianDay::from_utc(datetime);
        assert_eq!(jd, JulianDay::J2000);
        let back = jd.to_utc().expect("to_utc");
        let delta_ns =
            back.timestamp_nanos_opt().unwrap() - datetime.timestamp_nanos_opt().unwrap();
        assert!(delta_ns.abs() < 1_000, "roundtrip error: {} ns", delta_ns);
    }

    #[test]
    fn mjd_offset() {
        assert_eq!(JulianDay::J2000.to_mjd(), Days::new(51_544.5));
    }

    #[test]
    fn mean_sidereal_time_meeus_12a() {
        // 1987-04-10 0h UT: 13h10m46.3668s
        let theta = JulianDay::new(2_446_895.5).mean_sidereal_time().unwrap();
        let expected = Angle::from_hms(13, 10, 46, 366.8);
        let diff = (theta.value().rem_euclid(360.0) - expected.value()).abs();
        assert!(diff < 1e-5, "mean sidereal time off by {} deg", diff);
    }

    #[test]
    fn apparent_sidereal_time_meeus_12a() {
        // 1987-04-10 0h UT: 13h10m46.1351s
        let theta = JulianDay::new(2_446_895.5).sidereal_time().unwrap();
        let expected = Angle::from_hms(13, 10, 46, 135.1);
        let diff = (theta.value().rem_euclid(360.0) - expected.value()).abs();
        assert!(diff < 2e-5, "apparent sidereal time off by {} deg", diff);
        assert!(theta.value() > -360.0 && theta.value() < 360.0);
    }

    #[test]
    fn sidereal_time_rejects_negative_jd() {
        assert_eq!(
            JulianDay::new(-1.0).sidereal_time(),
            Err(Error::NegativeJulianDay(-1.0))
        );
    }

    #[test]
    fn arithmetic_and_display() {
        let mut jd = JulianDay::new(10.0);
        jd += Days::new(2.5);
        jd -= Days::new(0.5);
        assert_eq!(jd, JulianDay::new(12.0));
        assert_eq!(jd - JulianDay::new(10.0), Days::new(2.0));
        assert!(jd.to_string().starts_with("JD 12"));
    }
}
