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

//! The utm module estimates the point scale factor of the Universal
//! Transverse Mercator projection and its scale error in parts per million.
//!
//! The scale factor is `K0` on the central meridian of a zone and increases
//! away from it, reaching 1 about 180 km east and west of it.

#![allow(clippy::suboptimal_flops)]

use crate::{Angle, Degrees, Error, LatLong, Metres};

/// The scale factor on the central meridian.
pub const K0: f64 = 0.9996;

/// The number of UTM zones.
pub const NUMBER_OF_ZONES: u8 = 60;

/// The width of a UTM zone in degrees of longitude.
const ZONE_WIDTH: i32 = 6;

/// Estimate the scale factor at a distance from the central meridian.
/// * `distance` - the distance east or west of the central meridian.
/// * `a` - the Semimajor axis of the ellipsoid.
///
/// k = k0·cosh(x / (k0·a))
/// # Examples
/// ```
/// use grs80_geodetic::utm::{scale_error_ppm, scale_factor_at_distance, K0};
/// use grs80_geodetic::{Metres, GRS80_ELLIPSOID};
///
/// let k = scale_factor_at_distance(Metres(0.0), GRS80_ELLIPSOID.a());
/// assert_eq!(K0, k);
///
/// let k = scale_factor_at_distance(Metres(255_000.0), GRS80_ELLIPSOID.a());
/// assert_eq!(400, scale_error_ppm(k));
/// ```
#[must_use]
pub fn scale_factor_at_distance(distance: Metres, a: Metres) -> f64 {
    K0 * libm::cosh(distance.0 / (K0 * a.0))
}

/// Estimate the scale factor at a position.
/// * `position` - the latitude and longitude of the position.
/// * `central_meridian` - the longitude of the central meridian in whole degrees.
///
/// k = k0 / (1 - sin²Δλ·cos²φ), where Δλ is the longitude from the central
/// meridian.
#[must_use]
pub fn scale_factor_at_point(position: &LatLong, central_meridian: i32) -> f64 {
    let lat = Angle::from(position.lat());
    let delta_lon = Angle::from(Degrees(position.lon().0 - f64::from(central_meridian)));
    let b = delta_lon.sin().0 * lat.cos().0;
    K0 / (1.0 - b * b)
}

/// The scale error of a scale factor in parts per million, rounded up.
/// * `k` - the scale factor.
#[allow(clippy::cast_possible_truncation)]
#[must_use]
pub fn scale_error_ppm(k: f64) -> i64 {
    libm::ceil((k - 1.0) * 1.0e6) as i64
}

/// The longitude of the central meridian of a UTM zone.
/// * `zone` - the zone number, in [1, 60].
///
/// # Errors
///
/// `Error::OutOfRange` if the zone is not in [1, 60].
/// # Examples
/// ```
/// use grs80_geodetic::utm::zone_central_meridian;
///
/// assert_eq!(Ok(-177), zone_central_meridian(1));
/// assert_eq!(Ok(177), zone_central_meridian(60));
/// ```
pub fn zone_central_meridian(zone: u8) -> Result<i32, Error> {
    if (1..=NUMBER_OF_ZONES).contains(&zone) {
        Ok(ZONE_WIDTH * i32::from(zone) - 183)
    } else {
        Err(Error::out_of_range(
            "zone",
            f64::from(zone),
            1.0,
            f64::from(NUMBER_OF_ZONES),
        ))
    }
}

/// The UTM zone containing a longitude.
/// * `lon` - the longitude, clamped to [-180, 180].
///
/// The 180° meridian belongs to zone 60.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn longitude_zone(lon: Degrees) -> u8 {
    let lon = if lon.0.is_nan() {
        0.0
    } else {
        lon.0.clamp(-180.0, 180.0)
    };
    let zone = libm::floor((lon + 180.0) / f64::from(ZONE_WIDTH)) as u8 + 1;
    zone.min(NUMBER_OF_ZONES)
}
