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

//! The ellipsoid module contains functions for deriving the parameters of an
//! ellipsoid of revolution from its Semimajor and Semiminor axes.

#![allow(clippy::suboptimal_flops)]

pub mod grs80;
pub mod wgs84;

use crate::Metres;
use angle_sc::Angle;

/// Calculate the Semiminor axis of an ellipsoid.
/// * `a` - the Semimajor axis of an ellipsoid.
/// * `f` - the flattening ratio.
#[must_use]
pub const fn calculate_minor_axis(a: Metres, f: f64) -> Metres {
    Metres(a.0 * (1.0 - f))
}

/// Calculate the flattening ratio of an ellipsoid.
/// * `a`, `b` - the Semimajor and Semiminor axes.
/// # Examples
/// ```
/// use grs80_geodetic::ellipsoid::{calculate_flattening, grs80};
///
/// // The GRS80 flattening.
/// assert_eq!(0.0033528106875094776, calculate_flattening(grs80::A, grs80::B));
/// ```
#[must_use]
pub const fn calculate_flattening(a: Metres, b: Metres) -> f64 {
    1.0 - b.0 / a.0
}

/// Calculate the square of the first Eccentricity of an ellipsoid.
/// * `a`, `b` - the Semimajor and Semiminor axes.
///
/// e² = 1 - b²/a²
#[must_use]
pub const fn calculate_sq_eccentricity(a: Metres, b: Metres) -> f64 {
    1.0 - (b.0 * b.0) / (a.0 * a.0)
}

/// Calculate the square of the second Eccentricity of an ellipsoid.
/// * `a`, `b` - the Semimajor and Semiminor axes.
///
/// e'² = a²/b² - 1
#[must_use]
pub const fn calculate_sq_2nd_eccentricity(a: Metres, b: Metres) -> f64 {
    (a.0 * a.0) / (b.0 * b.0) - 1.0
}

/// Calculate the prime vertical radius of curvature, N, at a latitude.
///
/// N is the distance from the surface of the ellipsoid to the polar axis
/// along the ellipsoid normal.
/// * `lat` - the geodetic latitude.
/// * `a`, `b` - the Semimajor and Semiminor axes.
///
/// N = a² / sqrt(a²cos²φ + b²sin²φ)
/// # Examples
/// ```
/// use grs80_geodetic::ellipsoid::{calculate_prime_vertical_radius, grs80};
/// use grs80_geodetic::{Angle, Degrees};
///
/// // At the Equator N is the Semimajor axis.
/// let n = calculate_prime_vertical_radius(Angle::from(Degrees(0.0)), grs80::A, grs80::B);
/// assert_eq!(grs80::A, n);
/// ```
#[must_use]
pub fn calculate_prime_vertical_radius(lat: Angle, a: Metres, b: Metres) -> Metres {
    let a_cos = a.0 * lat.cos().0;
    let b_sin = b.0 * lat.sin().0;
    Metres(a.0 * a.0 / libm::hypot(a_cos, b_sin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::{is_within_tolerance, Degrees};

    #[test]
    fn test_calculate_sq_eccentricity() {
        let e_2 = calculate_sq_eccentricity(grs80::A, grs80::B);
        assert!(is_within_tolerance(grs80::E_2, e_2, 1.0e-10));

        // a sphere has no eccentricity
        assert_eq!(0.0, calculate_sq_eccentricity(grs80::A, grs80::A));
    }

    #[test]
    fn test_calculate_sq_2nd_eccentricity() {
        let e_2 = calculate_sq_eccentricity(grs80::A, grs80::B);
        let ep_2 = calculate_sq_2nd_eccentricity(grs80::A, grs80::B);
        assert!(is_within_tolerance(e_2 / (1.0 - e_2), ep_2, 1.0e-14));
    }

    #[test]
    fn test_calculate_minor_axis() {
        let wgs84_b = calculate_minor_axis(wgs84::A, wgs84::F);
        assert!(is_within_tolerance(6_356_752.314_245, wgs84_b.0, 1.0e-6));

        // GRS80 and WGS84 differ by about 0.1 mm in the Semiminor axis
        assert!(is_within_tolerance(grs80::B.0, wgs84_b.0, 1.0e-3));
    }

    #[test]
    fn test_calculate_prime_vertical_radius() {
        let n0 = calculate_prime_vertical_radius(Angle::from(Degrees(0.0)), grs80::A, grs80::B);
        assert_eq!(grs80::A, n0);

        let n45 = calculate_prime_vertical_radius(Angle::from(Degrees(45.0)), grs80::A, grs80::B);
        assert!(is_within_tolerance(6_388_838.290_194, n45.0, 1.0e-5));

        // At the poles N = a²/b
        let n90 = calculate_prime_vertical_radius(Angle::from(Degrees(90.0)), grs80::A, grs80::B);
        assert!(is_within_tolerance(
            grs80::A.0 * grs80::A.0 / grs80::B.0,
            n90.0,
            1.0e-8
        ));

        // N increases from the Equator to the poles and is symmetric
        for i in 0..90 {
            let lat = f64::from(i);
            let n = calculate_prime_vertical_radius(Angle::from(Degrees(lat)), grs80::A, grs80::B);
            let next =
                calculate_prime_vertical_radius(Angle::from(Degrees(lat + 1.0)), grs80::A, grs80::B);
            let south =
                calculate_prime_vertical_radius(Angle::from(Degrees(-lat)), grs80::A, grs80::B);
            assert!(n.0 < next.0);
            assert!(is_within_tolerance(n.0, south.0, 1.0e-9));
        }
    }
}
