// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Update/query contract shared by the Sun, the Moon and stars.
//!
//! A body is either *uninitialized* (no position computed yet) or
//! *positioned* at the Julian Day of its last successful
//! [`update`](CelestialBody::update).  Queries on an uninitialized body fail
//! with [`Error::PositionNotComputed`].
//!
//! Bodies are plain values without interior synchronization: `&mut self`
//! on the mutating methods is what serializes access to one instance.

use crate::calendar::CalendarDate;
use crate::coordinates::{Equatorial, GeoLocation, Horizontal};
use crate::earth;
use crate::error::{Error, Result};
use crate::julian_day::JulianDay;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Last computed apparent place of a body.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ApparentPosition {
    pub equatorial: Equatorial,
    /// Julian Day the position refers to.
    pub julian_day: JulianDay,
    /// Geocentric distance in AU; infinite for stars.
    pub distance: f64,
}

/// A body whose apparent position can be computed for a date.
pub trait CelestialBody {
    /// Recompute the apparent position for `date` and store it.
    fn update(&mut self, date: &CalendarDate) -> Result<&ApparentPosition>;

    /// The stored position.
    fn position(&self) -> Result<&ApparentPosition>;

    /// Azimuth and altitude of the stored position for an observer.
    fn local_coordinates(&mut self, location: &GeoLocation) -> Result<Horizontal>;
}

pub(crate) fn stored(position: &Option<ApparentPosition>) -> Result<&ApparentPosition> {
    position.as_ref().ok_or(Error::PositionNotComputed)
}

/// Shifts the stored place by the observer's parallax, then converts it to
/// horizontal coordinates.
///
/// The correction is written back into `position`; calling this twice
/// applies it twice.
pub(crate) fn topocentric_local(
    position: &mut Option<ApparentPosition>,
    location: &GeoLocation,
) -> Result<Horizontal> {
    let current = position.as_mut().ok_or(Error::PositionNotComputed)?;
    let parallax = earth::equatorial_parallax(
        current.julian_day,
        current.distance,
        location,
        &current.equatorial,
    )?;
    current.equatorial.right_ascension += parallax.right_ascension;
    current.equatorial.declination += parallax.declination;
    current.equatorial.to_local(current.julian_day, location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angle::Angle;

    fn sample() -> ApparentPosition {
        ApparentPosition {
            equatorial: Equatorial::new(Angle::new(281.28), Angle::new(-23.03)),
            julian_day: JulianDay::J2000,
            distance: 0.983,
        }
    }

    #[test]
    fn stored_requires_a_position() {
        assert_eq!(stored(&None), Err(Error::PositionNotComputed));
        let pos = Some(sample());
        assert_eq!(stored(&pos).unwrap().distance, 0.983);
    }

    #[test]
    fn topocentric_local_mutates_the_stored_place() {
        let greenwich = GeoLocation::new(Angle::ZERO, Angle::new(51.4769)).unwrap();
        let mut pos = Some(sample());
        topocentric_local(&mut pos, &greenwich).unwrap();
        let once = pos.unwrap().equatorial;
        assert_ne!(once, sample().equatorial);

        topocentric_local(&mut pos, &greenwich).unwrap();
        let twice = pos.unwrap().equatorial;
        assert_ne!(twice, once);

        let mut empty = None;
        assert_eq!(
            topocentric_local(&mut empty, &greenwich),
            Err(Error::PositionNotComputed)
        );
    }
}
