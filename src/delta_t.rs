// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # ΔT (Delta T) and the dynamical-time offset
//!
//! Positions of the Sun and of the stars are evaluated on the dynamical
//! time axis, while calendar input is Universal Time.  The difference
//! **ΔT = TD − UT** is modelled here with the Stephenson & Houlden (1986)
//! parabola
//!
//! ```text
//! ΔT = −15 s + (JD − 2 382 148)² / 41 048 480  s
//! ```
//!
//! which is centred on 1810 and is adequate for the arcsecond-level
//! accuracy of the rest of the pipeline.  The offset is returned as a day
//! fraction to be **added** to a UT Julian Day; see
//! [`JulianDay::to_dynamical`].
//!
//! ```rust
//! use scalib::{delta_t, JulianDay};
//!
//! let dt = delta_t::delta_t(JulianDay::J2000);
//! println!("ΔT = {dt}");
//! ```
//!
//! ## Scientific References
//! * Stephenson & Houlden (1986): *Atlas of Historical Eclipse Maps*.
//! * Meeus (1998): *Astronomical Algorithms*, ch. 10.

use crate::julian_day::JulianDay;
use qtty::{Day, Days, Seconds, Simplify};

/// Centre of the parabola (JD of 1810-01-01 12:00 UT).
const JD_EPOCH_1810_UT: JulianDay = JulianDay::new(2_382_148.0);
const DT_OFFSET_S: Seconds = Seconds::new(-15.0);
const QUADRATIC_DIVISOR_D2_PER_S: f64 = 41_048_480.0;

#[inline]
fn days_ratio(num: Days, den: Days) -> f64 {
    (num / den).simplify().value()
}

/// Returns **ΔT** in seconds for a Julian Day on the UT axis.
#[inline]
pub fn delta_t(jd: JulianDay) -> Seconds {
    let t = days_ratio(jd - JD_EPOCH_1810_UT, Days::new(1.0));
    DT_OFFSET_S + Seconds::new((t * t) / QUADRATIC_DIVISOR_D2_PER_S)
}

/// ΔT expressed in days, to be added to a UT Julian Day.
#[inline]
pub fn dynamical_time_offset(jd: JulianDay) -> Days {
    delta_t(jd).to::<Day>()
}

impl JulianDay {
    /// Shifts this UT Julian Day onto the dynamical time axis.
    #[inline]
    pub fn to_dynamical(self) -> Self {
        self + dynamical_time_offset(self)
    }
}
