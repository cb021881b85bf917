// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Earth orientation and orbit: obliquity, nutation, refraction, parallax,
//! eccentricity, aberration constant and perihelion longitude.
//!
//! Every function that takes a [`JulianDay`] validates it first and fails
//! with [`Error::NegativeJulianDay`](crate::Error::NegativeJulianDay) on a
//! negative day.  Series and polynomials follow Meeus, *Astronomical
//! Algorithms* (2nd ed.), chapters 16, 22, 23, 25 and 40.

use crate::angle::Angle;
use crate::coordinates::{Equatorial, GeoLocation};
use crate::error::{Error, Result};
use crate::julian_day::JulianDay;
use crate::{moon, sun};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Mean obliquity at J2000.0, 23°26'21.448".
const OBLIQUITY_J2000: Angle = Angle::new(23.0 + 26.0 / 60.0 + 21.448 / 3600.0);

/// Laskar (1986) coefficients, arcseconds per power of `U = T/100`.
#[rustfmt::skip]
const LASKAR: [f64; 10] = [
    -4680.93, -1.55, 1999.25, -51.38, -249.67,
      -39.05,  7.12,   27.87,   5.79,    2.45,
];

/// Earth flattening, 1/298.257.
const FLATTENING: f64 = 1.0 / 298.257;

// ═══════════════════════════════════════════════════════════════════════════
// Obliquity
// ═══════════════════════════════════════════════════════════════════════════

/// Mean obliquity of the ecliptic.
///
/// Laskar's polynomial (accurate to 0.01" over 1000 years) while
/// `|T| < 100` centuries, the IAU cubic beyond that.
pub fn ecliptic_obliquity(jd: JulianDay) -> Result<Angle> {
    let t = jd.validate()?.centuries_since_2000().value();

    let arcsecs = if t.abs() < 100.0 {
        let u = t / 100.0;
        LASKAR
            .iter()
            .rev()
            .fold(0.0, |acc, c| (acc + c) * u)
    } else {
        -46.8150 * t - 0.00059 * t * t + 0.001813 * t * t * t
    };
    Ok(OBLIQUITY_J2000 + Angle::new(arcsecs / 3600.0))
}

/// True obliquity, the mean obliquity plus the nutation in obliquity.
pub fn true_obliquity(jd: JulianDay) -> Result<Angle> {
    Ok(ecliptic_obliquity(jd)? + nutation(jd)?.obliquity)
}

// ═══════════════════════════════════════════════════════════════════════════
// Nutation
// ═══════════════════════════════════════════════════════════════════════════

/// Nutation in longitude (Δψ) and in obliquity (Δε).
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Nutation {
    pub longitude: Angle,
    pub obliquity: Angle,
}

/// One row of Meeus table 22.A.
struct NutationTerm {
    /// Multipliers of D, M, M', F, Ω.
    args: [f64; 5],
    /// Δψ coefficients `a + b·T`, arcseconds.
    longitude: (f64, f64),
    /// Δε coefficients `c + d·T`, arcseconds.
    obliquity: (f64, f64),
}

const fn term(args: [i8; 5], a: f64, b: f64, c: f64, d: f64) -> NutationTerm {
    NutationTerm {
        args: [
            args[0] as f64,
            args[1] as f64,
            args[2] as f64,
            args[3] as f64,
            args[4] as f64,
        ],
        longitude: (a, b),
        obliquity: (c, d),
    }
}

#[rustfmt::skip]
static NUTATION_TERMS: [NutationTerm; 63] = [
    term([ 0,  0,  0,  0,  1],  -17.1996, -0.01742,  9.2025,  0.00089),
    term([-2,  0,  0,  2,  2],   -1.3187, -0.00016,  0.5736, -0.00031),
    term([ 0,  0,  0,  2,  2],   -0.2274, -0.00002,  0.0977, -0.00005),
    term([ 0,  0,  0,  0,  2],    0.2062,  0.00002, -0.0895,  0.00005),
    term([ 0,  1,  0,  0,  0],    0.1426, -0.00034,  0.0054, -0.00001),
    term([ 0,  0,  1,  0,  0],    0.0712,  0.00001, -0.0007,  0.00000),
    term([-2,  1,  0,  2,  2],   -0.0517,  0.00012,  0.0224, -0.00006),
    term([ 0,  0,  0,  2,  1],   -0.0386, -0.00004,  0.0200,  0.00000),
    term([ 0,  0,  1,  2,  2],   -0.0301,  0.00000,  0.0129, -0.00001),
    term([-2, -1,  0,  2,  2],    0.0217, -0.00005, -0.0095,  0.00003),
    term([-2,  0,  1,  0,  0],   -0.0158,  0.00000,  0.0001,  0.00000),
    term([-2,  0,  0,  2,  1],    0.0129,  0.00001, -0.0070,  0.00000),
    term([ 0,  0, -1,  2,  2],    0.0123,  0.00000, -0.0053,  0.00000),
    term([ 2,  0,  0,  0,  0],    0.0063,  0.00000,  0.0001,  0.00000),
    term([ 0,  0,  1,  0,  1],    0.0063,  0.00001, -0.0033,  0.00000),
    term([ 2,  0, -1,  2,  2],   -0.0059,  0.00000,  0.0026,  0.00000),
    term([ 0,  0, -1,  0,  1],   -0.0058, -0.00001,  0.0032,  0.00000),
    term([ 0,  0,  1,  2,  1],   -0.0051,  0.00000,  0.0027,  0.00000),
    term([-2,  0,  2,  0,  0],    0.0048,  0.00000,  0.0001,  0.00000),
    term([ 0,  0, -2,  2,  1],    0.0046,  0.00000, -0.0024,  0.00000),
    term([ 2,  0,  0,  2,  2],   -0.0038,  0.00000,  0.0016,  0.00000),
    term([ 0,  0,  2,  2,  2],   -0.0031,  0.00000,  0.0013,  0.00000),
    term([ 0,  0,  2,  0,  0],    0.0029,  0.00000,  0.0001,  0.00000),
    term([-2,  0,  1,  2,  2],    0.0029,  0.00000, -0.0012,  0.00000),
    term([ 0,  0,  0,  2,  0],    0.0026,  0.00000,  0.0001,  0.00000),
    term([-2,  0,  0,  2,  0],   -0.0022,  0.00000,  0.0001,  0.00000),
    term([ 0,  0, -1,  2,  1],    0.0021,  0.00000, -0.0010,  0.00000),
    term([ 0,  2,  0,  0,  0],    0.0017, -0.00001,  0.0001,  0.00000),
    term([ 2,  0, -1,  0,  1],    0.0016,  0.00000, -0.0008,  0.00000),
    term([-2,  2,  0,  2,  2],   -0.0016,  0.00001,  0.0007,  0.00000),
    term([ 0,  1,  0,  0,  1],   -0.0015,  0.00000,  0.0009,  0.00000),
    term([-2,  0,  1,  0,  1],   -0.0013,  0.00000,  0.0007,  0.00000),
    term([ 0, -1,  0,  0,  1],   -0.0012,  0.00000,  0.0006,  0.00000),
    term([ 0,  0,  2, -2,  0],    0.0011,  0.00000,  0.0001,  0.00000),
    term([ 2,  0, -1,  2,  1],   -0.0010,  0.00000,  0.0005,  0.00000),
    term([ 2,  0,  1,  2,  2],   -0.0008,  0.00000,  0.0003,  0.00000),
    term([ 0,  1,  0,  2,  2],    0.0007,  0.00000, -0.0003,  0.00000),
    term([-2,  1,  1,  0,  0],   -0.0007,  0.00000,  0.0001,  0.00000),
    term([ 0, -1,  0,  2,  2],   -0.0007,  0.00000,  0.0003,  0.00000),
    term([ 2,  0,  0,  2,  1],   -0.0007,  0.00000,  0.0003,  0.00000),
    term([ 2,  0,  1,  0,  0],    0.0006,  0.00000,  0.0001,  0.00000),
    term([-2,  0,  2,  2,  2],    0.0006,  0.00000, -0.0003,  0.00000),
    term([-2,  0,  1,  2,  1],    0.0006,  0.00000, -0.0003,  0.00000),
    term([ 2,  0, -2,  0,  1],   -0.0006,  0.00000,  0.0003,  0.00000),
    term([ 2,  0,  0,  0,  1],   -0.0006,  0.00000,  0.0003,  0.00000),
    term([ 0, -1,  1,  0,  0],    0.0005,  0.00000,  0.0001,  0.00000),
    term([-2, -1,  0,  2,  1],   -0.0005,  0.00000,  0.0003,  0.00000),
    term([-2,  0,  0,  0,  1],   -0.0005,  0.00000,  0.0003,  0.00000),
    term([ 0,  0,  2,  2,  1],   -0.0005,  0.00000,  0.0003,  0.00000),
    term([-2,  0,  2,  0,  1],    0.0004,  0.00000,  0.0001,  0.00000),
    term([-2,  1,  0,  2,  1],    0.0004,  0.00000,  0.0001,  0.00000),
    term([ 0,  0,  1, -2,  0],    0.0004,  0.00000,  0.0001,  0.00000),
    term([-1,  0,  1,  0,  0],   -0.0004,  0.00000,  0.0001,  0.00000),
    term([-2,  1,  0,  0,  0],   -0.0004,  0.00000,  0.0001,  0.00000),
    term([ 1,  0,  0,  0,  0],   -0.0004,  0.00000,  0.0001,  0.00000),
    term([ 0,  0,  1,  2,  0],    0.0003,  0.00000,  0.0001,  0.00000),
    term([ 0,  0, -2,  2,  2],   -0.0003,  0.00000,  0.0001,  0.00000),
    term([-1, -1,  1,  0,  0],   -0.0003,  0.00000,  0.0001,  0.00000),
    term([ 0,  1,  1,  0,  0],   -0.0003,  0.00000,  0.0001,  0.00000),
    term([ 0, -1,  1,  2,  2],   -0.0003,  0.00000,  0.0001,  0.00000),
    term([ 2, -1, -1,  2,  2],   -0.0003,  0.00000,  0.0001,  0.00000),
    term([ 0,  0,  3,  2,  2],   -0.0003,  0.00000,  0.0001,  0.00000),
    term([ 2, -1,  0,  2,  2],   -0.0003,  0.00000,  0.0001,  0.00000),
];

/// Nutation from the 63-term IAU 1980 series.
pub fn nutation(jd: JulianDay) -> Result<Nutation> {
    let jd = jd.validate()?;
    let t = jd.centuries_since_2000().value();
    let fundamentals = [
        moon::mean_elongation_from_sun(jd)?.value(),
        sun::mean_anomaly(jd)?.value(),
        moon::mean_anomaly(jd)?.value(),
        moon::latitude_argument(jd)?.value(),
        moon::mean_longitude_of_ascending_node(jd)?.value(),
    ];

    let (mut psi, mut eps) = (0.0, 0.0);
    for term in &NUTATION_TERMS {
        let arg = Angle::new(
            term.args
                .iter()
                .zip(&fundamentals)
                .map(|(k, v)| k * v)
                .sum(),
        );
        let (sin, cos) = arg.sin_cos();
        psi += (term.longitude.0 + term.longitude.1 * t) * sin;
        eps += (term.obliquity.0 + term.obliquity.1 * t) * cos;
    }

    Ok(Nutation {
        longitude: Angle::new(psi / 3600.0),
        obliquity: Angle::new(eps / 3600.0),
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Refraction / parallax
// ═══════════════════════════════════════════════════════════════════════════

/// Atmospheric refraction for a true altitude (Bennett, Meeus 16.4).
///
/// The result is to be **added** to the geometric altitude.  It vanishes at
/// the zenith and is meaningful for altitudes above about −1°.
pub fn refraction(altitude: Angle) -> Angle {
    let h = altitude.value();
    let arcmins = 1.0 / Angle::new(h + 7.31 / (h + 4.4)).tan() + 0.001_351_5;
    Angle::new(arcmins / 60.0)
}

/// Topocentric corrections to add to geocentric equatorial coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ParallaxCorrection {
    pub right_ascension: Angle,
    pub declination: Angle,
}

/// Parallax in right ascension and declination for an observer at
/// `location` (Meeus 40.2 and 40.3, observer at sea level).
///
/// `distance` is the geocentric distance of the body in AU.
pub fn equatorial_parallax(
    jd: JulianDay,
    distance: f64,
    location: &GeoLocation,
    position: &Equatorial,
) -> Result<ParallaxCorrection> {
    let jd = jd.validate()?;
    if !(distance > 0.0 && distance.is_finite()) {
        return Err(Error::invalid("distance", distance));
    }

    let lat = location.latitude();
    let rho = 0.998_327_1 + 0.001_676_4 * (lat * 2.0).cos() - 0.000_003_5 * (lat * 4.0).cos();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let geocentric_lat = Angle::atan2((1.0 - FLATTENING).powi(2) * sin_lat, cos_lat);
    let rho_sin = rho * geocentric_lat.sin();
    let rho_cos = rho * geocentric_lat.cos();

    let sin_parallax = (Angle::from_dms(0, 0, 8, 794.0) / distance).sin();
    let hour_angle = jd.sidereal_time()? - location.longitude() - position.right_ascension;
    let (sin_h, cos_h) = hour_angle.sin_cos();
    let (sin_dec, cos_dec) = position.declination.sin_cos();

    let denominator = cos_dec - rho_cos * sin_parallax * cos_h;
    let delta_ra = Angle::atan2(-rho_cos * sin_parallax * sin_h, denominator);
    let declination = Angle::atan2(
        (sin_dec - rho_sin * sin_parallax) * delta_ra.cos(),
        denominator,
    );

    Ok(ParallaxCorrection {
        right_ascension: delta_ra,
        declination: declination - position.declination,
    })
}

// ═══════════════════════════════════════════════════════════════════════════
// Orbit
// ═══════════════════════════════════════════════════════════════════════════

/// Eccentricity of the Earth's orbit (Meeus 25.4).
pub fn orbit_eccentricity(jd: JulianDay) -> Result<f64> {
    let t = jd.validate()?.centuries_since_2000().value();
    Ok(0.016_708_617 - 0.000_042_037 * t - 0.000_000_123_6 * t * t)
}

/// Constant of aberration, 20.49552".
pub fn aberration_constant() -> Angle {
    Angle::from_dms(0, 0, 20, 495.52)
}

/// Longitude of the Earth's perihelion, reduced.
pub fn perihelion_longitude(jd: JulianDay) -> Result<Angle> {
    let t = jd.validate()?.centuries_since_2000().value();
    Ok(Angle::new(102.937_35 + 1.719_53 * t + 0.000_46 * t * t).reduce())
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEEUS_22A: JulianDay = JulianDay::new(2_446_895.5);

    fn arcsecs(a: Angle) -> f64 {
        a.value() * 3600.0
    }

    #[test]
    fn nutation_meeus_22a() {
        let n = nutation(MEEUS_22A).unwrap();
        assert!((arcsecs(n.longitude) - (-3.788)).abs() < 0.002, "Δψ = {}", arcsecs(n.longitude));
        assert!((arcsecs(n.obliquity) - 9.443).abs() < 0.002, "Δε = {}", arcsecs(n.obliquity));
    }

    #[test]
    fn mean_obliquity_meeus_22a() {
        let eps = ecliptic_obliquity(MEEUS_22A).unwrap();
        let expected = Angle::from_dms(23, 26, 27, 407.0);
        assert!((arcsecs(eps - expected)).abs() < 0.005);
    }

    #[test]
    fn true_obliquity_meeus_22a() {
        let eps = true_obliquity(MEEUS_22A).unwrap();
        let expected = Angle::from_dms(23, 26, 36, 850.0);
        assert!((arcsecs(eps - expected)).abs() < 0.02, "ε = {eps}");
    }

    #[test]
    fn obliquity_far_from_j2000_uses_cubic() {
        let jd = JulianDay::J2000 + JulianDay::JULIAN_CENTURY * 150.0;
        let t = 150.0;
        let expected = OBLIQUITY_J2000.value()
            + (-46.8150 * t - 0.00059 * t * t + 0.001813 * t * t * t) / 3600.0;
        let eps = ecliptic_obliquity(jd).unwrap();
        assert!((eps.value() - expected).abs() < 1e-12);
        assert!((ecliptic_obliquity(JulianDay::J2000).unwrap() - OBLIQUITY_J2000)
            .value()
            .abs()
            < 1e-15);
    }

    #[test]
    fn refraction_bennett() {
        let at_horizon = refraction(Angle::ZERO).value() * 60.0;
        assert!((at_horizon - 34.479).abs() < 0.01, "R(0) = {at_horizon}'");
        let at_10 = refraction(Angle::new(10.0)).value() * 60.0;
        assert!((at_10 - 5.393).abs() < 0.01, "R(10) = {at_10}'");
        assert!(refraction(Angle::new(90.0)).value().abs() < 1e-8);
    }

    #[test]
    fn parallax_meeus_40a() {
        // Mars from Palomar, 2003-08-28 3h17m UT (height above sea level ignored).
        let jd = JulianDay::new(2_452_879.636_805_556);
        let palomar =
            GeoLocation::new(Angle::from_hms(7, 47, 27, 0.0), Angle::from_dms(33, 21, 22, 0.0))
                .unwrap();
        let mars = Equatorial::new(Angle::new(339.530_208), Angle::new(-15.771_083));
        let p = equatorial_parallax(jd, 0.37276, &palomar, &mars).unwrap();

        let ra_seconds = p.right_ascension.value() * 240.0;
        assert!((ra_seconds - 1.29).abs() < 0.01, "Δα = {ra_seconds}s");
        let dec = mars.declination + p.declination;
        let expected = Angle::from_dms(-15, 46, 30, 0.0);
        assert!(arcsecs(dec - expected).abs() < 0.2, "δ' = {dec}");
    }

    #[test]
    fn parallax_rejects_bad_distance() {
        let loc = GeoLocation::new(Angle::ZERO, Angle::ZERO).unwrap();
        let eq = Equatorial::new(Angle::ZERO, Angle::ZERO);
        assert!(matches!(
            equatorial_parallax(JulianDay::J2000, 0.0, &loc, &eq),
            Err(Error::InvalidInput { .. })
        ));
    }

    #[test]
    fn orbit_elements_meeus_25a() {
        let jd = JulianDay::new(2_448_908.5);
        assert!((orbit_eccentricity(jd).unwrap() - 0.016_711_651).abs() < 1e-9);
        assert!((perihelion_longitude(jd).unwrap().value() - 102.813_230_8).abs() < 1e-6);
        assert!((arcsecs(aberration_constant()) - 20.495_52).abs() < 1e-9);
    }

    #[test]
    fn negative_julian_day_fails_everywhere() {
        let bad = JulianDay::new(-10.0);
        let err = Error::NegativeJulianDay(-10.0);
        assert_eq!(ecliptic_obliquity(bad), Err(err.clone()));
        assert_eq!(true_obliquity(bad), Err(err.clone()));
        assert_eq!(nutation(bad), Err(err.clone()));
        assert_eq!(orbit_eccentricity(bad), Err(err.clone()));
        assert_eq!(perihelion_longitude(bad), Err(err.clone()));
        let loc = GeoLocation::new(Angle::ZERO, Angle::ZERO).unwrap();
        let eq = Equatorial::new(Angle::ZERO, Angle::ZERO);
        assert_eq!(equatorial_parallax(bad, 1.0, &loc, &eq), Err(err));
    }
}
