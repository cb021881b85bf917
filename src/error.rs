// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every fallible operation of the crate.
//!
//! | Variant | Raised when |
//! |---------|-------------|
//! | [`NegativeJulianDay`](Error::NegativeJulianDay) | a Julian Day before −4712-01-01 12:00 reaches a computation |
//! | [`YearOutOfRange`](Error::YearOutOfRange) | a calendar year precedes −4712 |
//! | [`InvalidInput`](Error::InvalidInput) | any other out-of-domain argument |
//! | [`OutOfRange`](Error::OutOfRange) | an interpolation argument falls outside the tabulated interval |
//! | [`InvalidMonth`](Error::InvalidMonth) | a month number outside `1..=12` |
//! | [`UnsupportedPlanet`](Error::UnsupportedPlanet) | a planetary-data provider has no series for the body |
//! | [`PositionNotComputed`](Error::PositionNotComputed) | a body is queried before its first update |
//!
//! Failure is all-or-nothing: an operation that returns `Err` produces no
//! partial output.

use crate::planet::Planet;
use thiserror::Error;

/// Unified error type for the position pipeline.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A negative Julian Day was handed to an operation that needs a valid one.
    #[error("Julian Day {0} is negative")]
    NegativeJulianDay(f64),

    /// Calendar year earlier than −4712 (start of the Julian Day count).
    #[error("year {0} precedes -4712")]
    YearOutOfRange(i32),

    /// Argument outside the domain of the operation.
    #[error("invalid {what}: {value}")]
    InvalidInput { what: &'static str, value: f64 },

    /// Interpolation argument outside the open interval spanned by the samples.
    #[error("value {value} is outside the interval ({min}, {max})")]
    OutOfRange { value: f64, min: f64, max: f64 },

    /// Month number outside `1..=12`.
    #[error("month {0} is not in 1..=12")]
    InvalidMonth(u8),

    /// The planetary-data provider cannot produce a position for this planet.
    #[error("no planetary series available for {0:?}")]
    UnsupportedPlanet(Planet),

    /// A body was queried before any successful update.
    #[error("position has not been computed yet")]
    PositionNotComputed,
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn invalid(what: &'static str, value: f64) -> Self {
        Self::InvalidInput { what, value }
    }
}
