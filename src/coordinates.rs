// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observer location and the equatorial, ecliptic and horizontal frames.
//!
//! Sign conventions:
//!
//! | Quantity | Positive toward |
//! |----------|-----------------|
//! | [`GeoLocation`] longitude | **west** of Greenwich |
//! | [`GeoLocation`] latitude | north |
//! | [`Horizontal`] azimuth | measured from **south**, increasing westward |
//!
//! Use [`GeoLocation::from_east_longitude`] for the usual east-positive
//! longitudes and [`Horizontal::azimuth_from_north`] for navigation-style
//! bearings.

use crate::angle::Angle;
use crate::earth;
use crate::error::{Error, Result};
use crate::julian_day::JulianDay;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// GeoLocation
// ═══════════════════════════════════════════════════════════════════════════

/// Geographic position of an observer.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GeoLocation {
    longitude: Angle,
    latitude: Angle,
}

impl GeoLocation {
    /// Location from a **west-positive** longitude and a latitude.
    ///
    /// Fails when the latitude is outside `[-90°, 90°]` or either value is
    /// not finite.
    pub fn new(longitude: Angle, latitude: Angle) -> Result<Self> {
        if !longitude.value().is_finite() {
            return Err(Error::invalid("longitude", longitude.value()));
        }
        let lat = latitude.value();
        if !(-90.0..=90.0).contains(&lat) {
            return Err(Error::invalid("latitude", lat));
        }
        Ok(Self {
            longitude,
            latitude,
        })
    }

    /// Location from an **east-positive** longitude.
    pub fn from_east_longitude(longitude: Angle, latitude: Angle) -> Result<Self> {
        Self::new(-longitude, latitude)
    }

    /// Longitude, positive west of Greenwich.
    #[inline]
    pub const fn longitude(&self) -> Angle {
        self.longitude
    }

    /// Latitude, positive north.
    #[inline]
    pub const fn latitude(&self) -> Angle {
        self.latitude
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Frames
// ═══════════════════════════════════════════════════════════════════════════

/// Right ascension and declination.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Equatorial {
    pub right_ascension: Angle,
    pub declination: Angle,
}

/// Ecliptic longitude and latitude.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ecliptic {
    pub longitude: Angle,
    pub latitude: Angle,
}

/// Azimuth (from south, westward) and altitude above the horizon.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Horizontal {
    pub azimuth: Angle,
    pub altitude: Angle,
}

impl Equatorial {
    pub const fn new(right_ascension: Angle, declination: Angle) -> Self {
        Self {
            right_ascension,
            declination,
        }
    }

    /// Rotate into the ecliptic frame of date (Meeus 13.1, 13.2).
    pub fn to_ecliptic(&self, jd: JulianDay) -> Result<Ecliptic> {
        let (sin_eps, cos_eps) = earth::ecliptic_obliquity(jd)?.sin_cos();
        let (sin_ra, cos_ra) = self.right_ascension.sin_cos();
        let (sin_dec, cos_dec) = self.declination.sin_cos();

        Ok(Ecliptic {
            longitude: Angle::atan2(
                sin_ra * cos_eps + self.declination.tan() * sin_eps,
                cos_ra,
            ),
            latitude: Angle::asin(sin_dec * cos_eps - cos_dec * sin_eps * sin_ra),
        })
    }

    /// Horizontal coordinates for an observer (Meeus 13.5, 13.6).
    ///
    /// The local hour angle is `θ − L − α` with `θ` the apparent Greenwich
    /// sidereal time and `L` the west-positive longitude.
    pub fn to_local(&self, jd: JulianDay, location: &GeoLocation) -> Result<Horizontal> {
        let hour_angle = jd.sidereal_time()? - location.longitude() - self.right_ascension;
        let (sin_h, cos_h) = hour_angle.sin_cos();
        let (sin_lat, cos_lat) = location.latitude().sin_cos();
        let (sin_dec, cos_dec) = self.declination.sin_cos();

        Ok(Horizontal {
            azimuth: Angle::atan2(sin_h, cos_h * sin_lat - self.declination.tan() * cos_lat),
            altitude: Angle::asin(sin_lat * sin_dec + cos_lat * cos_dec * cos_h),
        })
    }
}

impl Ecliptic {
    pub const fn new(longitude: Angle, latitude: Angle) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Rotate into the equatorial frame of date (Meeus 13.3, 13.4).
    pub fn to_equatorial(&self, jd: JulianDay) -> Result<Equatorial> {
        let (sin_eps, cos_eps) = earth::ecliptic_obliquity(jd)?.sin_cos();
        let (sin_lon, cos_lon) = self.longitude.sin_cos();
        let (sin_lat, cos_lat) = self.latitude.sin_cos();

        Ok(Equatorial {
            right_ascension: Angle::atan2(
                sin_lon * cos_eps - self.latitude.tan() * sin_eps,
                cos_lon,
            ),
            declination: Angle::asin(sin_lat * cos_eps + cos_lat * sin_eps * sin_lon),
        })
    }
}

impl Horizontal {
    pub const fn new(azimuth: Angle, altitude: Angle) -> Self {
        Self { azimuth, altitude }
    }

    /// Same azimuth with the refraction correction added to the altitude.
    pub fn with_refraction(self) -> Self {
        Self {
            azimuth: self.azimuth,
            altitude: self.altitude + earth::refraction(self.altitude),
        }
    }

    /// Azimuth measured from north through east, in `[0°, 360°)`.
    pub fn azimuth_from_north(&self) -> Angle {
        (self.azimuth + Angle::new(180.0)).normalized()
    }
}
