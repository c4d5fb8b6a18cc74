// Copyright (c) 2026 Ken Barker

// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"),
// to deal in the Software without restriction, including without limitation the
// rights to use, copy, modify, merge, publish, distribute, sublicense, and/or
// sell copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:

// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.

// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! The dms module converts angles between degrees, minutes and seconds and
//! decimal degrees.
//!
//! The sign of a `Dms` angle is carried by its degrees, minutes and seconds
//! are never negative.

use crate::{Degrees, Error};
use core::fmt;

/// The largest number of degrees in a `Dms` angle.
pub const MAX_DEGREES: i32 = 180;

/// Seconds within this many of 60 are carried into the minutes.
const CARRY_TOLERANCE: f64 = 1.0e-10;

/// Convert degrees, minutes and seconds to decimal degrees.
/// * `degrees` - the signed whole degrees, in [-180, 180].
/// * `minutes` - the minutes, in [0, 60].
/// * `seconds` - the seconds, in [0, 60].
///
/// returns the decimal degrees, negative when `degrees` is negative.
/// # Examples
/// ```
/// use grs80_geodetic::dms::dms_to_decimal;
///
/// assert_eq!(45.5, dms_to_decimal(45, 30, 0.0).0);
/// assert_eq!(-45.5, dms_to_decimal(-45, 30, 0.0).0);
/// ```
#[must_use]
pub fn dms_to_decimal(degrees: i32, minutes: u32, seconds: f64) -> Degrees {
    let value = f64::from(degrees.unsigned_abs()) + (f64::from(minutes) + seconds / 60.0) / 60.0;
    Degrees(if degrees < 0 { -value } else { value })
}

/// Convert decimal degrees to degrees, minutes and seconds.
/// * `decimal` - the decimal degrees, in [0, 180].
///
/// Seconds which round to 60 are carried into the minutes and minutes which
/// reach 60 are carried into the degrees.
///
/// # Errors
///
/// `Error::OutOfRange` if `decimal` is negative, greater than 180 or NaN.
/// # Examples
/// ```
/// use grs80_geodetic::dms::decimal_to_dms;
/// use grs80_geodetic::Degrees;
///
/// let dms = decimal_to_dms(Degrees(45.5)).unwrap();
/// assert_eq!((45, 30, 0.0), (dms.degrees(), dms.minutes(), dms.seconds()));
/// ```
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn decimal_to_dms(decimal: Degrees) -> Result<Dms, Error> {
    let upper = f64::from(MAX_DEGREES);
    if !(0.0..=upper).contains(&decimal.0) {
        return Err(Error::out_of_range("decimal degrees", decimal.0, 0.0, upper));
    }

    let whole = libm::floor(decimal.0);
    let fraction = decimal.0 - whole;
    let minutes = libm::floor(60.0 * fraction);
    let seconds = 3600.0 * fraction - 60.0 * minutes;

    // in range, so the casts are exact
    let mut degrees = whole as i32;
    let mut minutes = minutes as u32;
    let mut seconds = seconds.max(0.0);

    if libm::fabs(seconds - 60.0) < CARRY_TOLERANCE {
        seconds = 0.0;
        minutes += 1;
    }
    if minutes == 60 {
        minutes = 0;
        degrees += 1;
    }

    Ok(Dms {
        degrees,
        minutes,
        seconds,
    })
}

/// An angle in degrees, minutes and seconds.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Dms {
    /// The signed whole degrees.
    degrees: i32,
    /// The whole minutes.
    minutes: u32,
    /// The seconds.
    seconds: f64,
}

impl Dms {
    /// Constructor.
    /// * `degrees` - the signed whole degrees.
    /// * `minutes` - the whole minutes.
    /// * `seconds` - the seconds, negative values are treated as zero.
    #[must_use]
    pub const fn new(degrees: i32, minutes: u32, seconds: f64) -> Self {
        Self {
            degrees,
            minutes,
            seconds: if seconds < 0.0 { 0.0 } else { seconds },
        }
    }

    #[must_use]
    pub const fn degrees(&self) -> i32 {
        self.degrees
    }

    #[must_use]
    pub const fn minutes(&self) -> u32 {
        self.minutes
    }

    #[must_use]
    pub const fn seconds(&self) -> f64 {
        self.seconds
    }

    /// Whether the angle is negative.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.degrees < 0
    }

    /// The angle in decimal degrees.
    #[must_use]
    pub fn to_degrees(&self) -> Degrees {
        dms_to_decimal(self.degrees, self.minutes, self.seconds)
    }
}

impl TryFrom<Degrees> for Dms {
    type Error = Error;

    fn try_from(decimal: Degrees) -> Result<Self, Self::Error> {
        decimal_to_dms(decimal)
    }
}

impl From<Dms> for Degrees {
    fn from(dms: Dms) -> Self {
        dms.to_degrees()
    }
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}° {}' {:.6}\"",
            self.degrees, self.minutes, self.seconds
        )
    }
}
