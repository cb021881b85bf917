// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Heliocentric planetary positions.
//!
//! The Sun pipeline needs the Earth's heliocentric ecliptic coordinates.
//! They are obtained through the [`PlanetData`] trait so that a caller can
//! plug in a fuller ephemeris; [`Vsop87`] is the bundled provider and
//! covers the Earth only.

use crate::angle::Angle;
use crate::error::{Error, Result};
use crate::julian_day::JulianDay;
use crate::vsop87;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Major planets, numbered outward from the Sun.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Planet {
    Mercury = 1,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl TryFrom<u8> for Planet {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        use Planet::*;
        Ok(match value {
            1 => Mercury,
            2 => Venus,
            3 => Earth,
            4 => Mars,
            5 => Jupiter,
            6 => Saturn,
            7 => Uranus,
            8 => Neptune,
            other => return Err(Error::invalid("planet number", f64::from(other))),
        })
    }
}

/// Heliocentric ecliptic position, mean equinox of date.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeliocentricPosition {
    pub longitude: Angle,
    pub latitude: Angle,
    /// Radius vector in AU.
    pub distance: f64,
}

/// Source of heliocentric planetary positions.
pub trait PlanetData {
    /// Position of `planet` at `jd` (dynamical time).
    ///
    /// Implementations must fail with
    /// [`Error::NegativeJulianDay`] for a negative day.
    fn heliocentric_position(&self, planet: Planet, jd: JulianDay) -> Result<HeliocentricPosition>;
}

/// Abridged VSOP87D provider.
#[derive(Debug, Default, Copy, Clone)]
pub struct Vsop87;

impl PlanetData for Vsop87 {
    fn heliocentric_position(&self, planet: Planet, jd: JulianDay) -> Result<HeliocentricPosition> {
        let jd = jd.validate()?;
        match planet {
            Planet::Earth => {
                let (l, b, r) = vsop87::earth(jd.millennia_since_2000().value());
                Ok(HeliocentricPosition {
                    longitude: Angle::from_radians(l).reduce(),
                    latitude: Angle::from_radians(b),
                    distance: r,
                })
            }
            other => Err(Error::UnsupportedPlanet(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planet_numbering() {
        assert_eq!(Planet::try_from(3).unwrap(), Planet::Earth);
        assert_eq!(Planet::try_from(8).unwrap(), Planet::Neptune);
        assert!(Planet::try_from(0).is_err());
        assert!(Planet::try_from(9).is_err());
        assert_eq!(Planet::Mars as u8, 4);
    }

    #[test]
    fn earth_position_meeus_25b() {
        let pos = Vsop87
            .heliocentric_position(Planet::Earth, JulianDay::new(2_448_908.5))
            .unwrap();
        assert!((pos.longitude.normalized().value() - 19.907_372).abs() < 1e-6);
        assert!((pos.latitude.value() - (-0.000_179)).abs() < 1e-6);
        assert!((pos.distance - 0.997_607_75).abs() < 1e-8);
    }

    #[test]
    fn other_planets_are_unsupported() {
        assert_eq!(
            Vsop87.heliocentric_position(Planet::Jupiter, JulianDay::J2000),
            Err(Error::UnsupportedPlanet(Planet::Jupiter))
        );
    }

    #[test]
    fn negative_julian_day_fails() {
        assert_eq!(
            Vsop87.heliocentric_position(Planet::Earth, JulianDay::new(-2.0)),
            Err(Error::NegativeJulianDay(-2.0))
        );
    }
}
