// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Apparent positions of the Sun, the Moon and fixed stars.
//!
//! Given a calendar date and, optionally, an observer's location, the crate
//! computes right ascension and declination (or azimuth and altitude) to
//! roughly one arcsecond, following Meeus, *Astronomical Algorithms*.
//!
//! # Core types
//!
//! - [`Angle`]: decimal-degree angle with reduction, sexagesimal split and
//!   trigonometry.
//! - [`JulianDay`]: continuous day count; sidereal time and epoch offsets.
//! - [`CalendarDate`]: Julian/Gregorian calendar date with a day fraction.
//! - [`GeoLocation`], [`Equatorial`], [`Ecliptic`], [`Horizontal`]: observer
//!   and coordinate frames.
//! - [`Sun`], [`Moon`], [`Star`]: bodies implementing [`CelestialBody`].
//!
//! # Modules
//!
//! | Module | Content |
//! |--------|---------|
//! | [`earth`] | obliquity, nutation, refraction, parallax, orbit elements |
//! | [`sun`] | solar mean elements and [`Sun`] |
//! | [`moon`] | lunar mean elements and [`Moon`] |
//! | [`star`] | precession, aberration, nutation in RA/Dec and [`Star`] |
//! | [`delta_t`] | ΔT = TD − UT and the dynamical-time offset |
//! | [`interpolation`] | three- and five-point Bessel interpolation |
//!
//! # Conventions
//!
//! Longitudes are positive **west** of Greenwich and azimuths are measured
//! from **south**; see [`GeoLocation::from_east_longitude`] and
//! [`Horizontal::azimuth_from_north`] for the usual conventions.
//!
//! Every operation that takes a [`JulianDay`] fails with
//! [`Error::NegativeJulianDay`] when it is negative.
//!
//! ```rust
//! use scalib::{Angle, CalendarDate, CelestialBody, GeoLocation, Month, Sun};
//!
//! let mut sun = Sun::new();
//! sun.update(&CalendarDate::new(2000, Month::January, 1.5)).unwrap();
//!
//! let greenwich = GeoLocation::new(Angle::ZERO, Angle::from_dms(51, 28, 38, 0.0)).unwrap();
//! let local = sun.local_coordinates(&greenwich).unwrap();
//! assert!(local.altitude.value() > 15.0);
//! ```

mod angle;
mod body;
mod calendar;
mod coordinates;
pub mod delta_t;
pub mod earth;
mod error;
pub mod interpolation;
mod julian_day;
pub mod moon;
mod planet;
pub mod star;
pub mod sun;
mod vsop87;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use angle::Angle;
pub use body::{ApparentPosition, CelestialBody};
pub use calendar::{day_fraction, is_leap_year, CalendarDate, Month, Weekday, MIN_YEAR};
pub use coordinates::{Ecliptic, Equatorial, GeoLocation, Horizontal};
pub use earth::{Nutation, ParallaxCorrection};
pub use error::{Error, Result};
pub use interpolation::{interpolate3, interpolate5};
pub use julian_day::JulianDay;
pub use moon::Moon;
pub use planet::{HeliocentricPosition, Planet, PlanetData, Vsop87};
pub use star::{Star, StarElements};
pub use sun::Sun;
