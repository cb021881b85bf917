// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Apparent geocentric position of the Sun.
//!
//! The position is derived from the Earth's heliocentric VSOP87 place
//! (Meeus ch. 25, "higher accuracy"): the geocentric longitude is the
//! heliocentric one plus 180°, corrected for nutation and annual
//! aberration, and the ecliptic place is then rotated into right ascension
//! and declination.  The series are evaluated in dynamical time.
//!
//! ```rust
//! use scalib::{CalendarDate, CelestialBody, Month, Sun};
//!
//! let mut sun = Sun::new();
//! let pos = sun.update(&CalendarDate::new(1992, Month::October, 13.0)).unwrap();
//! assert!((pos.equatorial.right_ascension.normalized().value() - 198.38).abs() < 0.01);
//! ```

use log::debug;

use crate::angle::Angle;
use crate::body::{self, ApparentPosition, CelestialBody};
use crate::calendar::CalendarDate;
use crate::coordinates::{Ecliptic, GeoLocation, Horizontal};
use crate::earth;
use crate::error::Result;
use crate::julian_day::JulianDay;
use crate::planet::{Planet, PlanetData, Vsop87};

/// `κ·(1 − e²)`: aberration constant reduced by the orbital eccentricity.
const ABERRATION: Angle = Angle::new(-20.4898 / 3600.0);

// ═══════════════════════════════════════════════════════════════════════════
// Mean elements
// ═══════════════════════════════════════════════════════════════════════════

/// Geometric mean longitude referred to the mean equinox of date
/// (Meeus 28.2), reduced.
pub fn mean_longitude(jd: JulianDay) -> Result<Angle> {
    let tau = jd.validate()?.millennia_since_2000().value();
    Ok(Angle::new(
        280.466_456_7
            + 360_007.698_277_9 * tau
            + 0.030_320_28 * tau.powi(2)
            + tau.powi(3) / 49_931.0
            - tau.powi(4) / 15_300.0
            - tau.powi(5) / 2_000_000.0,
    )
    .reduce())
}

/// Mean anomaly (Meeus 22), reduced.
pub fn mean_anomaly(jd: JulianDay) -> Result<Angle> {
    let t = jd.validate()?.centuries_since_2000().value();
    Ok(Angle::new(
        357.529_10 + 35_999.050_290_9 * t - 0.000_155_9 * t * t - 0.000_000_48 * t * t * t,
    )
    .reduce())
}

/// True geometric longitude: mean longitude plus the equation of the
/// centre (Meeus 25.4), reduced.
pub fn true_longitude(jd: JulianDay) -> Result<Angle> {
    let t = jd.validate()?.centuries_since_2000().value();
    let m = mean_anomaly(jd)?;
    let centre = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (m * 2.0).sin()
        + 0.000_289 * (m * 3.0).sin();
    Ok((mean_longitude(jd)? + Angle::new(centre)).reduce())
}

// ═══════════════════════════════════════════════════════════════════════════
// Sun
// ═══════════════════════════════════════════════════════════════════════════

/// The Sun and its last computed apparent position.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Sun {
    position: Option<ApparentPosition>,
}

impl Sun {
    /// An uninitialized Sun; call [`update`](CelestialBody::update) first.
    pub const fn new() -> Self {
        Self { position: None }
    }

    /// Apparent position for `date`, using `planets` for the Earth's
    /// heliocentric coordinates.
    ///
    /// The series are evaluated in dynamical time; the stored Julian Day is
    /// the UT one of `date`, which local-coordinate queries need for the
    /// sidereal time.
    pub fn update_with<P: PlanetData + ?Sized>(
        &mut self,
        date: &CalendarDate,
        planets: &P,
    ) -> Result<&ApparentPosition> {
        let ut = date.to_julian_day()?;
        let jd = ut.to_dynamical();
        let earth_position = planets.heliocentric_position(Planet::Earth, jd)?;
        let distance = earth_position.distance;

        let mut longitude = earth_position.longitude + Angle::new(180.0);
        let latitude = -earth_position.latitude;
        longitude += earth::nutation(jd)?.longitude;
        longitude += ABERRATION / distance;
        debug!(
            "sun {jd}: λ = {:.6}°, β = {:.6}°, R = {distance:.8} AU",
            longitude.to_degrees(),
            latitude.to_degrees()
        );

        let equatorial = Ecliptic::new(longitude, latitude).to_equatorial(jd)?;
        Ok(self.position.insert(ApparentPosition {
            equatorial,
            julian_day: ut,
            distance,
        }))
    }
}

impl CelestialBody for Sun {
    fn update(&mut self, date: &CalendarDate) -> Result<&ApparentPosition> {
        self.update_with(date, &Vsop87)
    }

    fn position(&self) -> Result<&ApparentPosition> {
        body::stored(&self.position)
    }

    /// Applies the observer's parallax to the stored position, then converts
    /// it to azimuth and altitude.
    ///
    /// The parallax shift is kept in the stored position: a second call
    /// without an intervening update shifts it again.
    fn local_coordinates(&mut self, location: &GeoLocation) -> Result<Horizontal> {
        body::topocentric_local(&mut self.position, location)
    }
}
