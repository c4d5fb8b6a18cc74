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

//! grs80-geodetic
//!
//! A library of the everyday conversions of surveying and GIS work on the
//! [GRS80](https://en.wikipedia.org/wiki/Geodetic_Reference_System_1980)
//! ellipsoid:
//!
//! - degrees, minutes and seconds to and from decimal degrees, see [`dms`];
//! - normal (theoretical) gravity by the Somigliana formula, see [`gravity`];
//! - geodetic latitude, longitude and ellipsoidal height to and from
//!   Earth-centred Cartesian coordinates, see [`cartesian`];
//! - the scale error of the Universal Transverse Mercator projection by
//!   distance from the central meridian or by position, see [`utm`];
//! - and the header of an ESRI shapefile, see [`shapefile`].
//!
//! ## Geodetic and Cartesian coordinates
//!
//! A geodetic position is given by its latitude φ, longitude λ and its
//! height h above the ellipsoid along the ellipsoid normal.
//! The conversion to Cartesian coordinates is closed form:
//!
//! ```text
//! X = (N + h)·cosφ·cosλ
//! Y = (N + h)·cosφ·sinλ
//! Z = ((b²/a²)·N + h)·sinφ
//! ```
//!
//! where N is the prime vertical radius of curvature.
//!
//! The conversion back has no closed form in φ and h together, so it is
//! solved by a fixed-point iteration on the height which converges in a
//! handful of steps. The iteration is bounded: points on the polar axis and
//! points where it fails to converge are reported as an [`Error`].
//!
//! ## Design
//!
//! The `Ellipsoid` struct represents an ellipsoid of revolution by its
//! Semimajor and Semiminor axes. It is an immutable value which is passed to
//! the functions that need it; the statics `GRS80_ELLIPSOID` and
//! `WGS84_ELLIPSOID` are built at compile time.
//!
//! The library depends upon the following crates:
//!
//! - [angle-sc](https://crates.io/crates/angle-sc) - to define `Angle`,
//!   `Degrees` and `Radians` and perform trigonometric calculations;
//! - [unit-sphere](https://crates.io/crates/unit-sphere) - to define `LatLong`;
//! - [icao_units](https://crates.io/crates/icao-units) - to define `Metres`.
//!
//! The library is declared [no_std](https://docs.rust-embedded.org/book/intro/no-std.html)
//! so it can be used in embedded applications, e.g. on a survey instrument.
//! The `grs80-geodetic` binary provides an interactive menu and sub-commands
//! over the library.

#![cfg_attr(not(test), no_std)]

extern crate angle_sc;
extern crate icao_units;
extern crate unit_sphere;

pub mod cartesian;
pub mod dms;
pub mod ellipsoid;
pub mod error;
pub mod gravity;
pub mod shapefile;
pub mod utm;

pub use angle_sc::{Angle, Degrees, Radians};
pub use cartesian::{Cartesian, GeodeticPosition, GeodeticSolution};
pub use dms::Dms;
pub use error::Error;
pub use gravity::{MetresPerSecondSquared, Milligals};
pub use icao_units::si::Metres;
pub use unit_sphere::LatLong;

/// The parameters of an `Ellipsoid`.
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// The Semimajor axis of the ellipsoid.
    a: Metres,
    /// The Semiminor axis of the ellipsoid.
    b: Metres,

    /// The flattening of the ellipsoid, a ratio.
    f: f64,
    /// The square of the Eccentricity of the ellipsoid.
    e_2: f64,
    /// The square of the second Eccentricity of the ellipsoid.
    ep_2: f64,
    /// One minus the square of the Eccentricity, i.e. b²/a².
    one_minus_e_2: f64,
}

impl Ellipsoid {
    /// Construct an `Ellipsoid` from axes which are known to be valid.
    const fn from_axes(a: Metres, b: Metres) -> Self {
        let e_2 = ellipsoid::calculate_sq_eccentricity(a, b);
        Self {
            a,
            b,
            f: ellipsoid::calculate_flattening(a, b),
            e_2,
            ep_2: ellipsoid::calculate_sq_2nd_eccentricity(a, b),
            one_minus_e_2: 1.0 - e_2,
        }
    }

    /// Constructor.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `b` - the Semiminor axis of the `Ellipsoid`.
    ///
    /// # Errors
    ///
    /// `Error::InvalidEllipsoid` unless `0 < b <= a` and both are finite.
    pub fn new(a: Metres, b: Metres) -> Result<Self, Error> {
        if a.0.is_finite() && b.0.is_finite() && 0.0 < b.0 && b.0 <= a.0 {
            Ok(Self::from_axes(a, b))
        } else {
            Err(Error::InvalidEllipsoid { a: a.0, b: b.0 })
        }
    }

    /// Construct an `Ellipsoid` from its Semimajor axis and flattening.
    /// * `a` - the Semimajor axis of the `Ellipsoid`.
    /// * `f` - the flattening of the `Ellipsoid`, a ratio.
    ///
    /// # Errors
    ///
    /// `Error::InvalidEllipsoid` if the flattening is not in `[0, 1)`.
    pub fn from_flattening(a: Metres, f: f64) -> Result<Self, Error> {
        Self::new(a, ellipsoid::calculate_minor_axis(a, f))
    }

    /// Construct an `Ellipsoid` with the GRS80 parameters.
    #[must_use]
    pub const fn grs80() -> Self {
        Self::from_axes(ellipsoid::grs80::A, ellipsoid::grs80::B)
    }

    /// Construct an `Ellipsoid` with the WGS-84 parameters.
    #[must_use]
    pub const fn wgs84() -> Self {
        Self::from_axes(
            ellipsoid::wgs84::A,
            ellipsoid::calculate_minor_axis(ellipsoid::wgs84::A, ellipsoid::wgs84::F),
        )
    }

    /// The Semimajor axis of the ellipsoid.
    #[must_use]
    pub const fn a(&self) -> Metres {
        self.a
    }

    /// The Semiminor axis of the ellipsoid.
    #[must_use]
    pub const fn b(&self) -> Metres {
        self.b
    }

    /// The flattening of the ellipsoid, a ratio.
    #[must_use]
    pub const fn f(&self) -> f64 {
        self.f
    }

    /// The square of the Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn e_2(&self) -> f64 {
        self.e_2
    }

    /// The square of the second Eccentricity of the ellipsoid.
    #[must_use]
    pub const fn ep_2(&self) -> f64 {
        self.ep_2
    }

    /// One minus the square of the Eccentricity, i.e. b²/a².
    #[must_use]
    pub const fn one_minus_e_2(&self) -> f64 {
        self.one_minus_e_2
    }

    /// The prime vertical radius of curvature, N, at a geodetic latitude.
    /// * `lat` - the geodetic latitude.
    #[must_use]
    pub fn prime_vertical_radius(&self, lat: Angle) -> Metres {
        ellipsoid::calculate_prime_vertical_radius(lat, self.a, self.b)
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::grs80()
    }
}

/// A static instance of the GRS80 `Ellipsoid`.
pub static GRS80_ELLIPSOID: Ellipsoid = Ellipsoid::grs80();

/// A static instance of the WGS-84 `Ellipsoid`.
pub static WGS84_ELLIPSOID: Ellipsoid = Ellipsoid::wgs84();

#[cfg(test)]
mod tests {
    use super::*;
    use angle_sc::is_within_tolerance;

    #[test]
    fn test_ellipsoid_grs80() {
        let grs80 = Ellipsoid::default();
        assert_eq!(GRS80_ELLIPSOID, grs80);

        assert_eq!(ellipsoid::grs80::A, grs80.a());
        assert_eq!(ellipsoid::grs80::B, grs80.b());

        // The derived e² agrees with the published value
        assert!(is_within_tolerance(ellipsoid::grs80::E_2, grs80.e_2(), 1.0e-10));
        assert!(is_within_tolerance(1.0 / 298.257_222_101, grs80.f(), 1.0e-10));
        assert!(is_within_tolerance(0.006_739_496_775, grs80.ep_2(), 1.0e-10));
        assert_eq!(1.0 - grs80.e_2(), grs80.one_minus_e_2());

        let n = grs80.prime_vertical_radius(Angle::from(Degrees(0.0)));
        assert_eq!(grs80.a(), n);
    }

    #[test]
    fn test_ellipsoid_wgs84() {
        assert_eq!(ellipsoid::wgs84::A, WGS84_ELLIPSOID.a());
        assert!(is_within_tolerance(
            6_356_752.314_245,
            WGS84_ELLIPSOID.b().0,
            1.0e-6
        ));
        assert!(is_within_tolerance(
            0.006_694_379_990_14,
            WGS84_ELLIPSOID.e_2(),
            1.0e-13
        ));

        let wgs84 = Ellipsoid::from_flattening(ellipsoid::wgs84::A, ellipsoid::wgs84::F);
        assert_eq!(Ok(Ellipsoid::wgs84()), wgs84);
    }

    #[test]
    fn test_ellipsoid_new() {
        let sphere = Ellipsoid::new(Metres(6_371_000.0), Metres(6_371_000.0));
        assert!(sphere.is_ok());
        if let Ok(sphere) = sphere {
            assert_eq!(0.0, sphere.e_2());
            assert_eq!(0.0, sphere.f());
        }

        // prolate
        assert_eq!(
            Err(Error::InvalidEllipsoid { a: 1.0, b: 2.0 }),
            Ellipsoid::new(Metres(1.0), Metres(2.0))
        );
        assert!(Ellipsoid::new(Metres(1.0), Metres(0.0)).is_err());
        assert!(Ellipsoid::new(Metres(f64::NAN), Metres(1.0)).is_err());
        assert!(Ellipsoid::new(Metres(f64::INFINITY), Metres(1.0)).is_err());
        assert!(Ellipsoid::from_flattening(Metres(1.0), 1.0).is_err());
        assert!(Ellipsoid::from_flattening(Metres(1.0), -0.5).is_err());
    }
}
