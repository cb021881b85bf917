// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Apparent places of fixed stars.
//!
//! A [`Star`] is created from its J2000.0 catalogue place and annual proper
//! motions.  [`update`](CelestialBody::update) then chains, in dynamical
//! time:
//!
//! 1. proper motion and rigorous precession to the mean place of date
//!    ([`precess`], Meeus 21.4);
//! 2. annual aberration ([`aberration_equatorial`], Meeus 23.3);
//! 3. nutation ([`nutation_equatorial`], Meeus 23.1).
//!
//! Both corrections are evaluated at the mean place of date and added
//! together.  Stars are treated as infinitely distant: no parallax is
//! applied to their local coordinates and the stored distance is `+∞`.
//!
//! ```rust
//! use scalib::{Angle, CalendarDate, CelestialBody, Month, Star};
//!
//! // θ Persei
//! let mut star = Star::new(
//!     Angle::from_hms(2, 44, 11, 986.0),
//!     Angle::from_dms(49, 13, 42, 480.0),
//!     Angle::from_hms(0, 0, 0, 34.25),
//!     Angle::from_dms(0, 0, 0, -89.5),
//! );
//! let pos = star.update(&CalendarDate::new(2028, Month::November, 13.19)).unwrap();
//! assert!((pos.equatorial.right_ascension.value() - 41.559_96).abs() < 0.002);
//! ```

use log::{debug, trace};

use crate::angle::Angle;
use crate::body::{self, ApparentPosition, CelestialBody};
use crate::calendar::CalendarDate;
use crate::coordinates::{Ecliptic, Equatorial, GeoLocation, Horizontal};
use crate::earth;
use crate::error::Result;
use crate::julian_day::JulianDay;
use crate::sun;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Catalogue declination beyond which precession switches to the
/// `acos` form for the declination.
const NEAR_POLE: f64 = 80.0;

/// J2000.0 catalogue entry of a star.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StarElements {
    pub ra2000: Angle,
    pub dec2000: Angle,
    /// Proper motion in right ascension per Julian year.
    pub ra_motion: Angle,
    /// Proper motion in declination per Julian year.
    pub dec_motion: Angle,
}

impl StarElements {
    /// Catalogue place at J2000.0, without proper motion.
    pub const fn catalogue_position(&self) -> Equatorial {
        Equatorial::new(self.ra2000, self.dec2000)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Corrections
// ═══════════════════════════════════════════════════════════════════════════

/// Mean place of date: linear proper motion, then the ζ/z/θ rotation from
/// the J2000.0 equator and equinox.
pub fn precess(elements: &StarElements, jd: JulianDay) -> Result<Equatorial> {
    let jd = jd.validate()?;
    let years = jd.julian_years().value();
    let ra0 = (elements.ra2000 + elements.ra_motion * years).reduce();
    let dec0 = (elements.dec2000 + elements.dec_motion * years).reduce();

    let t = jd.centuries_since_2000().value();
    let arcsecs = |a: f64, b: f64, c: f64| Angle::new((a * t + b * t * t + c * t * t * t) / 3600.0);
    let zeta = arcsecs(2306.2181, 0.30188, 0.017_998);
    let z = arcsecs(2306.2181, 1.09468, 0.018_203);
    let theta = arcsecs(2004.3109, -0.42665, -0.041_833);

    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_dec, cos_dec) = dec0.sin_cos();
    let (sin_ra, cos_ra) = (ra0 + zeta).sin_cos();

    let a = cos_dec * sin_ra;
    let b = cos_theta * cos_dec * cos_ra - sin_theta * sin_dec;
    let c = sin_theta * cos_dec * cos_ra + cos_theta * sin_dec;

    let declination = if elements.dec2000.value().abs() > NEAR_POLE {
        let polar = Angle::acos(a.hypot(b).min(1.0));
        if c < 0.0 {
            -polar
        } else {
            polar
        }
    } else {
        Angle::asin(c)
    };

    Ok(Equatorial::new(Angle::atan2(a, b) + z, declination))
}

/// Shared inputs of the aberration formulas.
struct AberrationTerms {
    /// Constant of aberration, κ.
    constant: Angle,
    eccentricity: f64,
    perihelion: Angle,
    sun_longitude: Angle,
}

impl AberrationTerms {
    fn at(jd: JulianDay) -> Result<Self> {
        Ok(Self {
            constant: earth::aberration_constant(),
            eccentricity: earth::orbit_eccentricity(jd)?,
            perihelion: earth::perihelion_longitude(jd)?,
            sun_longitude: sun::true_longitude(jd)?,
        })
    }
}

/// Annual aberration in right ascension and declination (Meeus 23.3),
/// returned as offsets to add to `position`.
pub fn aberration_equatorial(jd: JulianDay, position: &Equatorial) -> Result<Equatorial> {
    let jd = jd.validate()?;
    let terms = AberrationTerms::at(jd)?;
    let obliquity = earth::ecliptic_obliquity(jd)?;

    let k = terms.constant;
    let ek = k * terms.eccentricity;
    let cos_eps = obliquity.cos();
    let tan_eps = obliquity.tan();
    let (sin_ra, cos_ra) = position.right_ascension.sin_cos();
    let (sin_dec, cos_dec) = position.declination.sin_cos();
    let (sin_sun, cos_sun) = terms.sun_longitude.sin_cos();
    let (sin_pi, cos_pi) = terms.perihelion.sin_cos();

    let right_ascension = -k * ((cos_ra * cos_sun * cos_eps + sin_ra * sin_sun) / cos_dec)
        + ek * ((cos_ra * cos_pi * cos_eps + sin_ra * sin_pi) / cos_dec);

    let tilt = tan_eps * cos_dec - sin_ra * sin_dec;
    let declination = -k * (cos_sun * cos_eps * tilt + cos_ra * sin_dec * sin_sun)
        + ek * (cos_pi * cos_eps * tilt + cos_ra * sin_dec * sin_pi);

    Ok(Equatorial::new(right_ascension, declination))
}

/// Annual aberration in ecliptic longitude and latitude (Meeus 23.2) for an
/// equatorial `position`, returned as offsets to add to its ecliptic place.
pub fn aberration_ecliptic(jd: JulianDay, position: &Equatorial) -> Result<Ecliptic> {
    let jd = jd.validate()?;
    let terms = AberrationTerms::at(jd)?;
    let ecliptic = position.to_ecliptic(jd)?;

    let k = terms.constant;
    let e = terms.eccentricity;
    let sun = terms.sun_longitude - ecliptic.longitude;
    let perihelion = terms.perihelion - ecliptic.longitude;

    Ok(Ecliptic::new(
        (-k * sun.cos() + k * e * perihelion.cos()) / ecliptic.latitude.cos(),
        -k * ecliptic.latitude.sin() * (sun.sin() - e * perihelion.sin()),
    ))
}

/// Nutation in ecliptic coordinates: `Δψ` in longitude, nothing in latitude.
pub fn nutation_ecliptic(jd: JulianDay) -> Result<Ecliptic> {
    Ok(Ecliptic::new(earth::nutation(jd)?.longitude, Angle::ZERO))
}

/// Nutation in right ascension and declination (Meeus 23.1), returned as
/// offsets to add to `position`.
pub fn nutation_equatorial(jd: JulianDay, position: &Equatorial) -> Result<Equatorial> {
    let nutation = earth::nutation(jd)?;
    let (sin_eps, cos_eps) = earth::ecliptic_obliquity(jd)?.sin_cos();
    let (sin_ra, cos_ra) = position.right_ascension.sin_cos();
    let tan_dec = position.declination.tan();

    Ok(Equatorial::new(
        nutation.longitude * (cos_eps + sin_eps * sin_ra * tan_dec)
            - nutation.obliquity * (cos_ra * tan_dec),
        nutation.longitude * (sin_eps * cos_ra) + nutation.obliquity * sin_ra,
    ))
}

// ═══════════════════════════════════════════════════════════════════════════
// Star
// ═══════════════════════════════════════════════════════════════════════════

/// A fixed star and its last computed apparent position.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Star {
    elements: StarElements,
    position: Option<ApparentPosition>,
}

impl Star {
    /// Star from its J2000.0 place and annual proper motions, all reduced.
    ///
    /// No apparent position is computed until the first
    /// [`update`](CelestialBody::update).
    pub fn new(ra2000: Angle, dec2000: Angle, ra_motion: Angle, dec_motion: Angle) -> Self {
        Self {
            elements: StarElements {
                ra2000: ra2000.reduce(),
                dec2000: dec2000.reduce(),
                ra_motion: ra_motion.reduce(),
                dec_motion: dec_motion.reduce(),
            },
            position: None,
        }
    }

    pub const fn elements(&self) -> &StarElements {
        &self.elements
    }

    /// J2000.0 catalogue place.
    pub const fn catalogue_position(&self) -> Equatorial {
        self.elements.catalogue_position()
    }
}

impl CelestialBody for Star {
    fn update(&mut self, date: &CalendarDate) -> Result<&ApparentPosition> {
        let ut = date.to_julian_day()?;
        let jd = ut.to_dynamical();

        let mean = precess(&self.elements, jd)?;
        let aberration = aberration_equatorial(jd, &mean)?;
        let nutation = nutation_equatorial(jd, &mean)?;
        trace!(
            "star {jd}: aberration ({:.3}\", {:.3}\"), nutation ({:.3}\", {:.3}\")",
            aberration.right_ascension.value() * 3600.0,
            aberration.declination.value() * 3600.0,
            nutation.right_ascension.value() * 3600.0,
            nutation.declination.value() * 3600.0
        );

        let equatorial = Equatorial::new(
            mean.right_ascension + aberration.right_ascension + nutation.right_ascension,
            mean.declination + aberration.declination + nutation.declination,
        );
        debug!(
            "star {jd}: α = {:.6}°, δ = {:.6}°",
            equatorial.right_ascension.value(),
            equatorial.declination.value()
        );

        Ok(self.position.insert(ApparentPosition {
            equatorial,
            julian_day: ut,
            distance: f64::INFINITY,
        }))
    }

    fn position(&self) -> Result<&ApparentPosition> {
        body::stored(&self.position)
    }

    /// Horizontal coordinates of the stored place; no parallax, no mutation.
    fn local_coordinates(&mut self, location: &GeoLocation) -> Result<Horizontal> {
        let current = body::stored(&self.position)?;
        current.equatorial.to_local(current.julian_day, location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::Month;
    use crate::error::Error;

    fn theta_persei() -> Star {
        Star::new(
            Angle::from_hms(2, 44, 11, 986.0),
            Angle::from_dms(49, 13, 42, 480.0),
            Angle::from_hms(0, 0, 0, 34.25),
            Angle::from_dms(0, 0, 0, -89.5),
        )
    }

    fn date() -> CalendarDate {
        CalendarDate::new(2028, Month::November, 13.19)
    }

    fn arcsecs(a: Angle) -> f64 {
        a.value() * 3600.0
    }

    #[test]
    fn precession_meeus_21b() {
        let jd = date().to_julian_day().unwrap().to_dynamical();
        let mean = precess(theta_persei().elements(), jd).unwrap();
        assert!((mean.right_ascension.value() - 41.547_214).abs() < 1e-4, "α = {}", mean.right_ascension);
        assert!((mean.declination.value() - 49.348_483).abs() < 1e-4, "δ = {}", mean.declination);
    }

    #[test]
    fn corrections_meeus_23a() {
        let jd = date().to_julian_day().unwrap().to_dynamical();
        let mean = Equatorial::new(Angle::new(41.547_214), Angle::new(49.348_483));

        let ab = aberration_equatorial(jd, &mean).unwrap();
        assert!((arcsecs(ab.right_ascension) - 30.045).abs() < 0.01);
        assert!((arcsecs(ab.declination) - 6.697).abs() < 0.01);

        let nut = nutation_equatorial(jd, &mean).unwrap();
        assert!((arcsecs(nut.right_ascension) - 15.843).abs() < 0.01);
        assert!((arcsecs(nut.declination) - 6.217).abs() < 0.01);
    }

    #[test]
    fn ecliptic_aberration_matches_equatorial() {
        let jd = date().to_julian_day().unwrap().to_dynamical();
        let mean = Equatorial::new(Angle::new(41.547_214), Angle::new(49.348_483));
        let ecl = mean.to_ecliptic(jd).unwrap();
        let delta = aberration_ecliptic(jd, &mean).unwrap();
        let shifted = Ecliptic::new(ecl.longitude + delta.longitude, ecl.latitude + delta.latitude)
            .to_equatorial(jd)
            .unwrap();
        let back = ecl.to_equatorial(jd).unwrap();

        let eq = aberration_equatorial(jd, &mean).unwrap();
        let d_ra = shifted.right_ascension - back.right_ascension;
        let d_dec = shifted.declination - back.declination;
        assert!((arcsecs(d_ra) - arcsecs(eq.right_ascension)).abs() < 0.01);
        assert!((arcsecs(d_dec) - arcsecs(eq.declination)).abs() < 0.01);
    }

    #[test]
    fn ecliptic_nutation_is_longitude_only() {
        let jd = JulianDay::new(2_446_895.5);
        let n = nutation_ecliptic(jd).unwrap();
        assert!((arcsecs(n.longitude) - (-3.788)).abs() < 0.002);
        assert_eq!(n.latitude, Angle::ZERO);
    }

    #[test]
    fn apparent_place_meeus_23a() {
        let mut star = theta_persei();
        let pos = *star.update(&date()).unwrap();
        let ra = pos.equatorial.right_ascension.value();
        let dec = pos.equatorial.declination.value();
        assert!((ra - 41.559_96).abs() < 0.002, "α = {ra}");
        assert!((dec - 49.352_07).abs() < 0.002, "δ = {dec}");
        assert_eq!(pos.distance, f64::INFINITY);
        assert_eq!(pos.julian_day, date().to_julian_day().unwrap());
        // the catalogue place is never overwritten
        assert_eq!(star.catalogue_position(), theta_persei().catalogue_position());
    }

    #[test]
    fn near_pole_branch_keeps_the_sign() {
        for dec in [85.0, -85.0] {
            let elements = StarElements {
                ra2000: Angle::new(37.95),
                dec2000: Angle::new(dec),
                ra_motion: Angle::ZERO,
                dec_motion: Angle::ZERO,
            };
            let at_epoch = precess(&elements, JulianDay::J2000).unwrap();
            assert!((at_epoch.right_ascension.value() - 37.95).abs() < 1e-9);
            assert!((at_epoch.declination.value() - dec).abs() < 1e-9);

            let later = precess(&elements, JulianDay::new(2_462_502.5)).unwrap();
            assert_eq!(later.declination.value().signum(), dec.signum());
            assert!((later.declination.value() - dec).abs() < 0.5);
        }
    }

    #[test]
    fn local_coordinates_do_not_mutate() {
        let mut star = theta_persei();
        let loc = GeoLocation::new(Angle::ZERO, Angle::new(51.5)).unwrap();
        assert_eq!(star.local_coordinates(&loc), Err(Error::PositionNotComputed));

        star.update(&date()).unwrap();
        let before = *star.position().unwrap();
        let first = star.local_coordinates(&loc).unwrap();
        let second = star.local_coordinates(&loc).unwrap();
        assert_eq!(first, second);
        assert_eq!(star.position().unwrap(), &before);
    }

    #[test]
    fn new_reduces_the_elements() {
        let star = Star::new(Angle::new(400.0), Angle::new(10.0), Angle::new(-370.0), Angle::ZERO);
        assert_eq!(star.elements().ra2000, Angle::new(40.0));
        assert_eq!(star.elements().ra_motion, Angle::new(-10.0));
        assert_eq!(star.position(), Err(Error::PositionNotComputed));
    }

    #[test]
    fn negative_julian_day_fails() {
        let bad = JulianDay::new(-3.0);
        let eq = theta_persei().catalogue_position();
        let err = Err(Error::NegativeJulianDay(-3.0));
        assert_eq!(precess(theta_persei().elements(), bad), err);
        assert_eq!(aberration_equatorial(bad, &eq), err);
        assert_eq!(nutation_equatorial(bad, &eq), err);
        assert_eq!(aberration_ecliptic(bad, &eq).map(|e| e.longitude), Err(Error::NegativeJulianDay(-3.0)));
    }
}
