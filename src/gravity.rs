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

//! The gravity module calculates normal (theoretical) gravity on the surface
//! of the GRS80 ellipsoid.
//!
//! It uses the series expansion of Somigliana's closed formula given by
//! H. Moritz, *Geodetic Reference System 1980*, Eq. 2-78.

#![allow(clippy::suboptimal_flops)]

use crate::Angle;

/// Normal gravity at the Equator in milligals.
pub const GAMMA_E: Milligals = Milligals(978_032.677_15);

/// The coefficients of the series in `sin²φ`, constant term first.
const SERIES: [f64; 5] = [
    1.0,
    0.005_279_041_4,
    0.000_023_271_8,
    0.000_000_126_2,
    0.000_000_000_7,
];

/// The number of milligals in one m/s².
const MILLIGALS_PER_METRE_PER_SECOND_SQUARED: f64 = 100_000.0;

/// An acceleration in milligals, the unit of gravimetry.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Milligals(pub f64);

/// An acceleration in metres per second squared.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct MetresPerSecondSquared(pub f64);

impl From<Milligals> for MetresPerSecondSquared {
    fn from(a: Milligals) -> Self {
        Self(a.0 / MILLIGALS_PER_METRE_PER_SECOND_SQUARED)
    }
}

impl From<MetresPerSecondSquared> for Milligals {
    fn from(a: MetresPerSecondSquared) -> Self {
        Self(a.0 * MILLIGALS_PER_METRE_PER_SECOND_SQUARED)
    }
}

/// Evaluate a polynomial using Horner's method.
/// * `coeffs` - the coefficients, constant term first.
/// * `x` - the variable.
fn evaluate_polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Calculate normal gravity on the GRS80 ellipsoid at a geodetic latitude.
/// * `lat` - the geodetic latitude.
///
/// The series depends on `sin²φ` only, so it is symmetric about the Equator.
///
/// returns normal gravity in milligals.
/// # Examples
/// ```
/// use grs80_geodetic::gravity::normal_gravity;
/// use grs80_geodetic::{Angle, Degrees, MetresPerSecondSquared};
///
/// let g = normal_gravity(Angle::from(Degrees(45.0)));
/// assert!((980_619.920_263 - g.0).abs() < 1.0e-6);
///
/// let g = MetresPerSecondSquared::from(g);
/// assert!((9.806_199_202_63 - g.0).abs() < 1.0e-11);
/// ```
#[must_use]
pub fn normal_gravity(lat: Angle) -> Milligals {
    let sin_lat = lat.sin().0;
    Milligals(GAMMA_E.0 * evaluate_polynomial(&SERIES, sin_lat * sin_lat))
}

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::{is_within_tolerance, Degrees};

    #[test]
    fn test_evaluate_polynomial() {
        assert_eq!(1.0, evaluate_polynomial(&SERIES, 0.0));
        assert_eq!(17.0, evaluate_polynomial(&[1.0, 2.0, 3.0], 2.0));
        assert_eq!(0.0, evaluate_polynomial(&[], 2.0));
    }

    #[test]
    fn test_normal_gravity() {
        assert_eq!(GAMMA_E, normal_gravity(Angle::from(Degrees(0.0))));

        let g45 = normal_gravity(Angle::from(Degrees(45.0)));
        assert!(is_within_tolerance(980_619.920_263, g45.0, 1.0e-6));

        // at the poles, Moritz gives 983218.6378
        let g90 = normal_gravity(Angle::from(Degrees(90.0)));
        assert!(is_within_tolerance(983_218.636_836, g90.0, 1.0e-6));
        assert!(is_within_tolerance(983_218.637_8, g90.0, 1.0e-2));

        // increases from the Equator to the poles
        for i in 0..90 {
            let lat = f64::from(i);
            let g = normal_gravity(Angle::from(Degrees(lat)));
            let next = normal_gravity(Angle::from(Degrees(lat + 1.0)));
            assert!(g < next);
        }
    }

    #[test]
    fn test_normal_gravity_is_symmetric() {
        for i in 0..=90 {
            let lat = f64::from(i);
            let north = normal_gravity(Angle::from(Degrees(lat)));
            let south = normal_gravity(Angle::from(Degrees(-lat)));
            assert!(is_within_tolerance(north.0, south.0, 1.0e-9));
        }
    }

    #[test]
    fn test_gravity_units() {
        let g = MetresPerSecondSquared::from(GAMMA_E);
        assert!(is_within_tolerance(9.780_326_771_5, g.0, 1.0e-14));
        assert_eq!(Milligals(100_000.0), Milligals::from(MetresPerSecondSquared(1.0)));
    }
}
