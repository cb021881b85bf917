// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Apparent geocentric position of the Moon (Meeus ch. 47).
//!
//! The longitude, latitude and distance come from the truncated ELP-2000/82
//! series of Meeus tables 47.A and 47.B plus a handful of additive terms for
//! the action of Venus, Jupiter and the Earth's flattening.
//!
//! Unlike [`Sun`](crate::Sun) and [`Star`](crate::Star), the Moon series are
//! evaluated at the Julian Day of the date as given, without the
//! dynamical-time offset.
//!
//! ```rust
//! use scalib::{CalendarDate, CelestialBody, Month, Moon};
//!
//! let mut moon = Moon::new();
//! let pos = moon.update(&CalendarDate::new(1992, Month::April, 12.0)).unwrap();
//! assert!((pos.equatorial.declination.value() - 13.77).abs() < 0.02);
//! ```

use log::debug;

use crate::angle::Angle;
use crate::body::{self, ApparentPosition, CelestialBody};
use crate::calendar::CalendarDate;
use crate::coordinates::{Ecliptic, GeoLocation, Horizontal};
use crate::error::Result;
use crate::julian_day::JulianDay;
use crate::sun;

/// Mean Earth-Moon distance of the series, km.
const MEAN_DISTANCE_KM: f64 = 385_000.56;

/// Astronomical unit, km.
const AU_KM: f64 = 149_597_870.7;

// ═══════════════════════════════════════════════════════════════════════════
// Mean elements
// ═══════════════════════════════════════════════════════════════════════════

fn quartic(jd: JulianDay, c: [f64; 5]) -> Result<Angle> {
    let t = jd.validate()?.centuries_since_2000().value();
    Ok(Angle::new(c[0] + t * (c[1] + t * (c[2] + t * (c[3] + t * c[4])))).reduce())
}

/// Mean elongation of the Moon from the Sun, D (Meeus 47.2).
pub fn mean_elongation_from_sun(jd: JulianDay) -> Result<Angle> {
    quartic(
        jd,
        [297.850_204_2, 445_267.111_516_8, -0.001_630_0, 1.0 / 545_868.0, -1.0 / 113_065_000.0],
    )
}

/// Mean anomaly of the Moon, M' (Meeus 47.4).
pub fn mean_anomaly(jd: JulianDay) -> Result<Angle> {
    quartic(
        jd,
        [134.963_411_4, 477_198.867_631_3, 0.008_997_0, 1.0 / 69_699.0, -1.0 / 14_712_000.0],
    )
}

/// Argument of latitude, F: mean distance of the Moon from its ascending
/// node (Meeus 47.5).
pub fn latitude_argument(jd: JulianDay) -> Result<Angle> {
    quartic(
        jd,
        [93.272_099_3, 483_202.017_527_3, -0.003_402_9, -1.0 / 3_526_000.0, 1.0 / 863_310_000.0],
    )
}

/// Longitude of the ascending node of the mean lunar orbit, Ω.
pub fn mean_longitude_of_ascending_node(jd: JulianDay) -> Result<Angle> {
    quartic(jd, [125.044_52, -1_934.136_261, 0.002_070_8, 1.0 / 450_000.0, 0.0])
}

/// Mean longitude of the Moon, L' (Meeus 47.1).
pub fn mean_longitude(jd: JulianDay) -> Result<Angle> {
    quartic(
        jd,
        [218.316_459_1, 481_267.881_342_36, -0.001_326_8, 1.0 / 538_841.0, -1.0 / 65_194_000.0],
    )
}

// ═══════════════════════════════════════════════════════════════════════════
// Periodic terms
// ═══════════════════════════════════════════════════════════════════════════

/// Multipliers of D, M, M', F.
type Args = [f64; 4];

/// Row of table 47.A: Σl in degrees, Σr in km.
struct LongitudeDistanceTerm {
    args: Args,
    longitude: f64,
    distance: f64,
}

/// Row of table 47.B: Σb in degrees.
struct LatitudeTerm {
    args: Args,
    latitude: f64,
}

const fn args(a: [i8; 4]) -> Args {
    [a[0] as f64, a[1] as f64, a[2] as f64, a[3] as f64]
}

const fn lr(a: [i8; 4], longitude: f64, distance: f64) -> LongitudeDistanceTerm {
    LongitudeDistanceTerm {
        args: args(a),
        longitude,
        distance,
    }
}

const fn lat(a: [i8; 4], latitude: f64) -> LatitudeTerm {
    LatitudeTerm {
        args: args(a),
        latitude,
    }
}

#[rustfmt::skip]
static LONGITUDE_DISTANCE_TERMS: [LongitudeDistanceTerm; 60] = [
    lr([ 0,  0,  1,  0],   6.288774,  -20905.355),
    lr([ 2,  0, -1,  0],   1.274027,   -3699.111),
    lr([ 2,  0,  0,  0],   0.658314,   -2955.968),
    lr([ 0,  0,  2,  0],   0.213618,    -569.925),
    lr([ 0,  1,  0,  0],  -0.185116,      48.888),
    lr([ 0,  0,  0,  2],  -0.114332,      -3.149),
    lr([ 2,  0, -2,  0],   0.058793,     246.158),
    lr([ 2, -1, -1,  0],   0.057066,    -152.138),
    lr([ 2,  0,  1,  0],   0.053322,    -170.733),
    lr([ 2, -1,  0,  0],   0.045758,    -204.586),
    lr([ 0,  1, -1,  0],  -0.040923,     -129.62),
    lr([ 1,  0,  0,  0],   -0.03472,     108.743),
    lr([ 0,  1,  1,  0],  -0.030383,     104.755),
    lr([ 2,  0,  0, -2],   0.015327,      10.321),
    lr([ 0,  0,  1,  2],  -0.012528,         0.0),
    lr([ 0,  0,  1, -2],    0.01098,      79.661),
    lr([ 4,  0, -1,  0],   0.010675,     -34.782),
    lr([ 0,  0,  3,  0],   0.010034,      -23.21),
    lr([ 4,  0, -2,  0],   0.008548,     -21.636),
    lr([ 2,  1, -1,  0],  -0.007888,      24.208),
    lr([ 2,  1,  0,  0],  -0.006766,      30.824),
    lr([ 1,  0, -1,  0],  -0.005163,      -8.379),
    lr([ 1,  1,  0,  0],   0.004987,     -16.675),
    lr([ 2, -1,  1,  0],   0.004036,     -12.831),
    lr([ 2,  0,  2,  0],   0.003994,     -10.445),
    lr([ 4,  0,  0,  0],   0.003861,      -11.65),
    lr([ 2,  0, -3,  0],   0.003665,      14.403),
    lr([ 0,  1, -2,  0],  -0.002689,      -7.003),
    lr([ 2,  0, -1,  2],  -0.002602,         0.0),
    lr([ 2, -1, -2,  0],    0.00239,      10.056),
    lr([ 1,  0,  1,  0],  -0.002348,       6.322),
    lr([ 2, -2,  0,  0],   0.002236,      -9.884),
    lr([ 0,  1,  2,  0],   -0.00212,       5.751),
    lr([ 0,  2,  0,  0],  -0.002069,         0.0),
    lr([ 2, -2, -1,  0],   0.002048,       -4.95),
    lr([ 2,  0,  1, -2],  -0.001773,        4.13),
    lr([ 2,  0,  0,  2],  -0.001595,         0.0),
    lr([ 4, -1, -1,  0],   0.001215,      -3.958),
    lr([ 0,  0,  2,  2],   -0.00111,         0.0),
    lr([ 3,  0, -1,  0],  -0.000892,       3.258),
    lr([ 2,  1,  1,  0],   -0.00081,       2.616),
    lr([ 4, -1, -2,  0],   0.000759,      -1.897),
    lr([ 0,  2, -1,  0],  -0.000713,      -2.117),
    lr([ 2,  2, -1,  0],    -0.0007,       2.354),
    lr([ 2,  1, -2,  0],   0.000691,         0.0),
    lr([ 2, -1,  0, -2],   0.000596,         0.0),
    lr([ 4,  0,  1,  0],   0.000549,      -1.423),
    lr([ 0,  0,  4,  0],   0.000537,      -1.117),
    lr([ 4, -1,  0,  0],    0.00052,      -1.571),
    lr([ 1,  0, -2,  0],  -0.000487,      -1.739),
    lr([ 2,  1,  0, -2],  -0.000399,         0.0),
    lr([ 0,  0,  2, -2],  -0.000381,      -4.421),
    lr([ 1,  1,  1,  0],   0.000351,         0.0),
    lr([ 3,  0, -2,  0],   -0.00034,         0.0),
    lr([ 4,  0, -3,  0],    0.00033,         0.0),
    lr([ 2, -1,  2,  0],   0.000327,         0.0),
    lr([ 0,  2,  1,  0],  -0.000323,       0.165),
    lr([ 1,  1, -1,  0],   0.000299,         0.0),
    lr([ 2,  0,  3,  0],   0.000294,         0.0),
    lr([ 2,  0, -1, -2],        0.0,       8.752),
];

#[rustfmt::skip]
static LATITUDE_TERMS: [LatitudeTerm; 60] = [
    lat([ 0,  0,  0,  1],   5.128122),
    lat([ 0,  0,  1,  1],   0.280602),
    lat([ 0,  0,  1, -1],   0.277693),
    lat([ 2,  0,  0, -1],   0.173237),
    lat([ 2,  0, -1,  1],   0.055413),
    lat([ 2,  0, -1, -1],   0.046271),
    lat([ 2,  0,  0,  1],   0.032573),
    lat([ 0,  0,  2,  1],   0.017198),
    lat([ 2,  0,  1, -1],   0.009266),
    lat([ 0,  0,  2, -1],   0.008822),
    lat([ 2, -1,  0, -1],   0.008216),
    lat([ 2,  0, -2, -1],   0.004324),
    lat([ 2,  0,  1,  1],     0.0042),
    lat([ 2,  1,  0, -1],  -0.003359),
    lat([ 2, -1, -1,  1],   0.002463),
    lat([ 2, -1,  0,  1],   0.002211),
    lat([ 2, -1, -1, -1],   0.002065),
    lat([ 0,  1, -1, -1],   -0.00187),
    lat([ 4,  0, -1, -1],   0.001828),
    lat([ 0,  1,  0,  1],  -0.001794),
    lat([ 0,  0,  0,  3],  -0.001749),
    lat([ 0,  1, -1,  1],  -0.001565),
    lat([ 1,  0,  0,  1],  -0.001491),
    lat([ 0,  1,  1,  1],  -0.001475),
    lat([ 0,  1,  1, -1],   -0.00141),
    lat([ 0,  1,  0, -1],  -0.001344),
    lat([ 1,  0,  0, -1],  -0.001335),
    lat([ 0,  0,  3,  1],   0.001107),
    lat([ 4,  0,  0, -1],   0.001021),
    lat([ 4,  0, -1,  1],   0.000833),
    lat([ 0,  0,  1, -3],   0.000777),
    lat([ 4,  0, -2,  1],   0.000671),
    lat([ 2,  0,  0, -3],   0.000607),
    lat([ 2,  0,  2, -1],   0.000596),
    lat([ 2, -1,  1, -1],   0.000491),
    lat([ 2,  0, -2,  1],  -0.000451),
    lat([ 0,  0,  3, -1],   0.000439),
    lat([ 2,  0,  2,  1],   0.000422),
    lat([ 2,  0, -3, -1],   0.000421),
    lat([ 2,  1, -1,  1],  -0.000366),
    lat([ 2,  1,  0,  1],  -0.000351),
    lat([ 4,  0,  0,  1],   0.000331),
    lat([ 2, -1,  1,  1],   0.000315),
    lat([ 2, -2,  0, -1],   0.000302),
    lat([ 0,  0,  1,  3],  -0.000283),
    lat([ 2,  1,  1, -1],  -0.000229),
    lat([ 1,  1,  0, -1],   0.000223),
    lat([ 1,  1,  0,  1],   0.000223),
    lat([ 0,  1, -2, -1],   -0.00022),
    lat([ 2,  1, -1, -1],   -0.00022),
    lat([ 1,  0,  1,  1],  -0.000185),
    lat([ 2, -1, -2, -1],   0.000181),
    lat([ 0,  1,  2,  1],  -0.000177),
    lat([ 4,  0, -2, -1],   0.000176),
    lat([ 4, -1, -1, -1],   0.000166),
    lat([ 1,  0,  1, -1],  -0.000164),
    lat([ 4,  0,  1, -1],   0.000132),
    lat([ 1,  0, -1, -1],  -0.000119),
    lat([ 4, -1,  0, -1],   0.000115),
    lat([ 2, -2,  0,  1],   0.000107),
];

/// Fundamental arguments D, M, M', F in degrees, in table column order.
struct Arguments {
    values: [f64; 4],
    /// Eccentricity factor E of the Earth's orbit.
    eccentricity: f64,
}

impl Arguments {
    /// Argument angle and `E^|m|` weight of one table row.
    fn term(&self, args: &Args) -> (Angle, f64) {
        let angle = Angle::new(args.iter().zip(&self.values).map(|(k, v)| k * v).sum());
        // rows carry m in {-2, …, 2}
        let weight = self.eccentricity.powi(args[1].abs() as i32);
        (angle, weight)
    }
}

/// Geocentric ecliptic longitude, latitude and distance (km) at `jd`.
fn geocentric(jd: JulianDay) -> Result<(Angle, Angle, f64)> {
    let t = jd.centuries_since_2000().value();
    let l_prime = mean_longitude(jd)?;
    let d = mean_elongation_from_sun(jd)?;
    let m = sun::mean_anomaly(jd)?;
    let m_prime = mean_anomaly(jd)?;
    let f = latitude_argument(jd)?;

    let arguments = Arguments {
        values: [d.value(), m.value(), m_prime.value(), f.value()],
        eccentricity: 1.0 - 0.002_516 * t - 0.000_007_4 * t * t,
    };
    let a1 = Angle::new(119.75 + 131.849 * t).reduce();
    let a2 = Angle::new(53.09 + 479_264.290 * t).reduce();
    let a3 = Angle::new(313.45 + 481_266.484 * t).reduce();

    let (mut sum_l, mut sum_r) = (0.0, 0.0);
    for row in &LONGITUDE_DISTANCE_TERMS {
        let (arg, weight) = arguments.term(&row.args);
        let (sin, cos) = arg.sin_cos();
        sum_l += row.longitude * weight * sin;
        sum_r += row.distance * weight * cos;
    }
    let mut sum_b = 0.0;
    for row in &LATITUDE_TERMS {
        let (arg, weight) = arguments.term(&row.args);
        sum_b += row.latitude * weight * arg.sin();
    }

    // Venus, Jupiter and flattening
    sum_l += 0.003_958 * a1.sin() + 0.001_962 * (l_prime - f).sin() + 0.000_318 * a2.sin();
    sum_b += -0.002_235 * l_prime.sin()
        + 0.000_382 * a3.sin()
        + 0.000_175 * (a1 - f).sin()
        + 0.000_175 * (a1 + f).sin()
        + 0.000_127 * (l_prime - m_prime).sin()
        - 0.000_115 * (l_prime + m_prime).sin();

    Ok((
        (l_prime + Angle::new(sum_l)).reduce(),
        Angle::new(sum_b).reduce(),
        MEAN_DISTANCE_KM + sum_r,
    ))
}

// ═══════════════════════════════════════════════════════════════════════════
// Moon
// ═══════════════════════════════════════════════════════════════════════════

/// The Moon and its last computed apparent position.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Moon {
    position: Option<ApparentPosition>,
}

impl Moon {
    /// An uninitialized Moon; call [`update`](CelestialBody::update) first.
    pub const fn new() -> Self {
        Self { position: None }
    }
}

impl CelestialBody for Moon {
    fn update(&mut self, date: &CalendarDate) -> Result<&ApparentPosition> {
        let jd = date.to_julian_day()?;
        let (longitude, latitude, km) = geocentric(jd)?;
        debug!(
            "moon {jd}: λ = {:.6}°, β = {:.6}°, Δ = {km:.2} km",
            longitude.value(),
            latitude.value()
        );

        let equatorial = Ecliptic::new(longitude, latitude).to_equatorial(jd)?;
        Ok(self.position.insert(ApparentPosition {
            equatorial,
            julian_day: jd,
            distance: km / AU_KM,
        }))
    }

    fn position(&self) -> Result<&ApparentPosition> {
        body::stored(&self.position)
    }

    /// Applies the observer's parallax to the stored position, then converts
    /// it to azimuth and altitude.
    ///
    /// As for the Sun, the shifted place replaces the stored one.
    fn local_coordinates(&mut self, location: &GeoLocation) -> Result<Horizontal> {
        body::topocentric_local(&mut self.position, location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Month;
    use crate::error::Error;

    const MEEUS_47A: JulianDay = JulianDay::new(2_448_724.5);

    #[test]
    fn mean_elements_meeus_47a() {
        let cases = [
            (mean_longitude(MEEUS_47A).unwrap(), 134.290_182),
            (mean_elongation_from_sun(MEEUS_47A).unwrap(), 113.842_304),
            (mean_anomaly(MEEUS_47A).unwrap(), 5.150_833),
            (latitude_argument(MEEUS_47A).unwrap(), 219.889_721),
        ];
        for (angle, expected) in cases {
            let v = angle.normalized().value();
            assert!((v - expected).abs() < 1e-5, "{v} != {expected}");
        }
    }

    #[test]
    fn geocentric_meeus_47a() {
        let (lambda, beta, km) = geocentric(MEEUS_47A).unwrap();
        assert!((lambda.normalized().value() - 133.162_655).abs() < 1e-4, "λ = {lambda}");
        assert!((beta.value() - (-3.229_126)).abs() < 1e-4, "β = {beta}");
        assert!((km - 368_409.7).abs() < 2.0, "Δ = {km}");
    }

    #[test]
    fn apparent_position_meeus_47a() {
        let mut moon = Moon::new();
        let pos = *moon
            .update(&CalendarDate::new(1992, Month::April, 12.0))
            .unwrap();
        let ra = pos.equatorial.right_ascension.normalized().value();
        let dec = pos.equatorial.declination.value();
        // Meeus adds Δψ and uses the true obliquity; the mean-frame place
        // differs by under 20".
        assert!((ra - 134.688_470).abs() < 0.005_6, "α = {ra}");
        assert!((dec - 13.768_368).abs() < 0.005_6, "δ = {dec}");
        assert!((pos.distance * AU_KM - 368_409.7).abs() < 2.0);
        assert_eq!(pos.julian_day, MEEUS_47A);
    }

    #[test]
    fn local_coordinates_shift_the_stored_place() {
        let mut moon = Moon::new();
        let loc = GeoLocation::new(Angle::ZERO, Angle::new(45.0)).unwrap();
        assert_eq!(moon.local_coordinates(&loc), Err(Error::PositionNotComputed));

        let before = *moon
            .update(&CalendarDate::new(1992, Month::April, 12.0))
            .unwrap();
        moon.local_coordinates(&loc).unwrap();
        let topocentric = *moon.position().unwrap();
        // horizontal parallax of the Moon is close to one degree
        let shift = (topocentric.equatorial.declination - before.equatorial.declination).abs();
        assert!(shift.value() > 0.1 && shift.value() < 1.0, "Δδ = {shift}");
    }

    #[test]
    fn negative_julian_day_fails() {
        let bad = JulianDay::new(-0.5);
        assert_eq!(mean_longitude(bad), Err(Error::NegativeJulianDay(-0.5)));
        assert_eq!(mean_longitude_of_ascending_node(bad), Err(Error::NegativeJulianDay(-0.5)));
        let mut moon = Moon::new();
        // -4712-01-01 0h is JD -0.5
        assert_eq!(
            moon.update(&CalendarDate::new(-4712, Month::January, 1.0)).map(|p| *p),
            Err(Error::NegativeJulianDay(-0.5))
        );
        assert_eq!(moon.position(), Err(Error::PositionNotComputed));
    }
}
