// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Civil calendar dates and their Julian Day equivalents.
//!
//! Dates use astronomical year numbering (year 0 = 1 BC) on the hybrid
//! calendar: Julian up to 1582-10-04, Gregorian from 1582-10-15.  The day
//! field is fractional; `14.5` is noon of the 14th.
//!
//! ```rust
//! use scalib::{CalendarDate, Month};
//!
//! let date = CalendarDate::new(2011, Month::February, 14.5);
//! let jd = date.to_julian_day().unwrap();
//! assert_eq!(jd.value(), 2_455_607.0);
//! ```

use chrono::{DateTime, Datelike, Timelike, Utc};
use qtty::{Day, Seconds};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::julian_day::JulianDay;

/// Earliest year with a non-negative Julian Day.
pub const MIN_YEAR: i32 = -4712;

/// Julian Day number (integer part, +0.5) of 1582-10-15.
const GREGORIAN_DAY_NUMBER: f64 = 2_299_161.0;

// ═══════════════════════════════════════════════════════════════════════════
// Month / Weekday
// ═══════════════════════════════════════════════════════════════════════════

/// Calendar month, numbered from 1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// Month number, `1..=12`.
    #[inline]
    pub const fn number(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Month {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        use Month::*;
        Ok(match value {
            1 => January,
            2 => February,
            3 => March,
            4 => April,
            5 => May,
            6 => June,
            7 => July,
            8 => August,
            9 => September,
            10 => October,
            11 => November,
            12 => December,
            other => return Err(Error::InvalidMonth(other)),
        })
    }
}

/// Day of the week, Sunday first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Weekday {
    Sunday = 0,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];
}

// ═══════════════════════════════════════════════════════════════════════════
// CalendarDate
// ═══════════════════════════════════════════════════════════════════════════

/// Fraction of a day elapsed at `hours:minutes:seconds`.
#[inline]
pub fn day_fraction(hours: u32, minutes: u32, seconds: f64) -> f64 {
    Seconds::new(f64::from(hours) * 3600.0 + f64::from(minutes) * 60.0 + seconds)
        .to::<Day>()
        .value()
}

/// `true` for leap years: Gregorian rule after 1582, Julian rule before.
pub fn is_leap_year(year: i32) -> bool {
    if year > 1582 {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    } else {
        year.rem_euclid(4) == 0
    }
}

/// A date on the Julian/Gregorian hybrid calendar.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalendarDate {
    /// Astronomical year (0 = 1 BC).
    pub year: i32,
    pub month: Month,
    /// Day of the month with the time of day as fraction, in `[1, 32)`.
    pub day: f64,
}

impl CalendarDate {
    pub const fn new(year: i32, month: Month, day: f64) -> Self {
        Self { year, month, day }
    }

    /// Date with the time of day given as `hours:minutes:seconds`.
    pub fn with_time(
        year: i32,
        month: Month,
        day: u32,
        hours: u32,
        minutes: u32,
        seconds: f64,
    ) -> Self {
        Self::new(year, month, f64::from(day) + day_fraction(hours, minutes, seconds))
    }

    /// Calendar date of a UTC instant.
    pub fn from_utc(datetime: DateTime<Utc>) -> Result<Self> {
        let seconds = f64::from(datetime.second()) + f64::from(datetime.nanosecond()) / 1e9;
        Ok(Self::with_time(
            datetime.year(),
            Month::try_from(datetime.month() as u8)?,
            datetime.day(),
            datetime.hour(),
            datetime.minute(),
            seconds,
        ))
    }

    /// `true` on and after 1582-10-15.
    pub(crate) fn is_gregorian(&self) -> bool {
        (self.year, self.month.number(), self.day) >= (1582, 10, 15.0)
    }

    /// Julian Day of this date (Meeus 7.1).
    pub fn to_julian_day(&self) -> Result<JulianDay> {
        if self.year < MIN_YEAR {
            return Err(Error::YearOutOfRange(self.year));
        }
        if !(self.day >= 1.0 && self.day < 32.0) {
            return Err(Error::invalid("day of month", self.day));
        }

        let (y, m) = match self.month.number() {
            m @ (1 | 2) => (f64::from(self.year - 1), f64::from(m + 12)),
            m => (f64::from(self.year), f64::from(m)),
        };
        let b = if self.is_gregorian() {
            let a = (y / 100.0).trunc();
            2.0 - a + (a / 4.0).trunc()
        } else {
            0.0
        };

        let jd = (365.25 * (y + 4716.0)).trunc() + (30.6001 * (m + 1.0)).trunc() + self.day + b
            - 1524.5;
        JulianDay::new(jd).validate()
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{:02}-{}", self.year, self.month.number(), self.day)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Calendar-based JulianDay operations
// ═══════════════════════════════════════════════════════════════════════════

impl JulianDay {
    /// Calendar date of this Julian Day (Meeus ch. 7).
    pub fn to_calendar_date(&self) -> Result<CalendarDate> {
        let jd = self.validate()?.value() + 0.5;
        let z = jd.trunc();
        let f = jd - z;

        let a = if z < GREGORIAN_DAY_NUMBER {
            z
        } else {
            let alpha = ((z - 1_867_216.25) / 36_524.25).trunc();
            z + 1.0 + alpha - (alpha / 4.0).trunc()
        };
        let b = a + 1524.0;
        let c = ((b - 122.1) / 365.25).trunc();
        let d = (365.25 * c).trunc();
        let e = ((b - d) / 30.6001).trunc();

        let day = b - d - (30.6001 * e).trunc() + f;
        let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
        let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
        if !(f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&year) {
            return Err(Error::invalid("Julian Day", self.value()));
        }

        Ok(CalendarDate::new(
            year as i32,
            Month::try_from(month as u8)?,
            day,
        ))
    }

    /// Day of the week, `(JD + 1.5) mod 7`.
    pub fn weekday(&self) -> Result<Weekday> {
        let jd = self.validate()?.value();
        let index = (jd + 1.5).rem_euclid(7.0).trunc() as usize;
        Ok(Weekday::ALL[index % 7])
    }

    /// Ordinal day of the year, 1 for January 1st.
    pub fn day_of_year(&self) -> Result<u32> {
        let date = self.to_calendar_date()?;
        let k = if is_leap_year(date.year) { 1.0 } else { 2.0 };
        let m = f64::from(date.month.number());
        let n = (275.0 * m / 9.0).trunc() - k * ((m + 9.0) / 12.0).trunc() + date.day.trunc() - 30.0;
        Ok(n as u32)
    }

    /// Julian Day (0h) of the `number`-th day of `year`.
    pub fn from_day_of_year(year: i32, number: u32) -> Result<Self> {
        if year < MIN_YEAR {
            return Err(Error::YearOutOfRange(year));
        }
        let days_in_year = if is_leap_year(year) { 366 } else { 365 };
        if number == 0 || number > days_in_year {
            return Err(Error::invalid("day of year", f64::from(number)));
        }

        let k = if is_leap_year(year) { 1.0 } else { 2.0 };
        let n = f64::from(number);
        let month = if number < 32 {
            1.0
        } else {
            (9.0 * (k + n) / 275.0 + 0.98).trunc()
        };
        let day = n - (275.0 * month / 9.0).trunc() + k * ((month + 9.0) / 12.0).trunc() + 30.0;

        CalendarDate::new(year, Month::try_from(month as u8)?, day).to_julian_day()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
