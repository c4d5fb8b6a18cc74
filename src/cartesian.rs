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

//! The cartesian module converts between geodetic coordinates (latitude,
//! longitude and ellipsoidal height) and Earth-centred, Earth-fixed Cartesian
//! coordinates.
//!
//! The conversion from geodetic coordinates is closed form.
//!
//! The conversion to geodetic coordinates uses the fixed-point iteration
//! described by B. Hofmann-Wellenhof, H. Lichtenegger and J. Collins,
//! *GPS Theory and Practice*, section 10.2.1:
//!
//! ```text
//! tanφ = z / ((1 - e²·N/(N + h))·p)
//! h    = p/cosφ - N
//! ```
//!
//! where `p` is the distance from the polar axis. It starts from the latitude
//! for a point on the ellipsoid and stops when the height changes by less than
//! `HEIGHT_TOLERANCE`.

#![allow(clippy::float_cmp)]
#![allow(clippy::suboptimal_flops)]

use crate::{Angle, Degrees, Ellipsoid, Error, LatLong, Metres};
use tracing::{debug, trace, warn};

/// The maximum number of iterations of the latitude and height.
pub const MAX_ITERATIONS: u32 = 100;

/// The iteration has converged when the height changes by less than this.
pub const HEIGHT_TOLERANCE: Metres = Metres(1.0e-10);

/// Points closer than this to the polar axis have no defined longitude.
pub const MIN_AXIS_DISTANCE: Metres = Metres(1.0e-3);

/// A position in geodetic coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct GeodeticPosition {
    /// The geodetic latitude and longitude.
    lat_long: LatLong,
    /// The height above the ellipsoid along the ellipsoid normal.
    height: Metres,
}

impl GeodeticPosition {
    /// Constructor.
    /// * `lat` - the geodetic latitude, in [-90, 90].
    /// * `lon` - the longitude, in [-180, 180].
    /// * `height` - the ellipsoidal height.
    #[must_use]
    pub fn new(lat: Degrees, lon: Degrees, height: Metres) -> Self {
        Self::from_lat_long(LatLong::new(lat, lon), height)
    }

    #[must_use]
    pub const fn from_lat_long(lat_long: LatLong, height: Metres) -> Self {
        Self { lat_long, height }
    }

    #[must_use]
    pub const fn lat_long(&self) -> &LatLong {
        &self.lat_long
    }

    #[must_use]
    pub fn lat(&self) -> Degrees {
        self.lat_long.lat()
    }

    #[must_use]
    pub fn lon(&self) -> Degrees {
        self.lat_long.lon()
    }

    #[must_use]
    pub const fn height(&self) -> Metres {
        self.height
    }

    /// Convert the position to Cartesian coordinates, see `to_cartesian`.
    #[must_use]
    pub fn to_cartesian(&self, ellipsoid: &Ellipsoid) -> Cartesian {
        to_cartesian(self, ellipsoid)
    }
}

/// A point in Earth-centred, Earth-fixed Cartesian coordinates.
///
/// The z axis is the polar axis and the x axis passes through the
/// intersection of the Equator and the prime meridian.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cartesian {
    x: Metres,
    y: Metres,
    z: Metres,
}

impl Cartesian {
    #[must_use]
    pub const fn new(x: Metres, y: Metres, z: Metres) -> Self {
        Self { x, y, z }
    }

    #[must_use]
    pub const fn x(&self) -> Metres {
        self.x
    }

    #[must_use]
    pub const fn y(&self) -> Metres {
        self.y
    }

    #[must_use]
    pub const fn z(&self) -> Metres {
        self.z
    }

    /// The perpendicular distance from the point to the polar axis.
    #[must_use]
    pub fn axis_distance(&self) -> Metres {
        Metres(libm::hypot(self.x.0, self.y.0))
    }

    /// Convert the point to geodetic coordinates, see `to_geodetic`.
    ///
    /// # Errors
    ///
    /// See `to_geodetic`.
    pub fn to_geodetic(&self, ellipsoid: &Ellipsoid) -> Result<GeodeticSolution, Error> {
        to_geodetic(self, ellipsoid)
    }
}

/// The result of converting a Cartesian point to geodetic coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct GeodeticSolution {
    /// The geodetic position.
    position: GeodeticPosition,
    /// The number of iterations required to converge.
    iterations: u32,
}

impl GeodeticSolution {
    #[must_use]
    pub const fn position(&self) -> &GeodeticPosition {
        &self.position
    }

    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }
}

/// Convert a geodetic position to Cartesian coordinates.
/// * `position` - the geodetic position.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// returns the Cartesian coordinates of the position.
/// # Examples
/// ```
/// use grs80_geodetic::cartesian::to_cartesian;
/// use grs80_geodetic::{Degrees, GeodeticPosition, Metres, GRS80_ELLIPSOID};
///
/// let position = GeodeticPosition::new(Degrees(45.0), Degrees(0.0), Metres(0.0));
/// let point = to_cartesian(&position, &GRS80_ELLIPSOID);
///
/// assert!((4_517_590.879 - point.x().0).abs() < 1.0e-3);
/// assert_eq!(0.0, point.y().0);
/// assert!((4_487_348.409 - point.z().0).abs() < 1.0e-3);
/// ```
#[must_use]
pub fn to_cartesian(position: &GeodeticPosition, ellipsoid: &Ellipsoid) -> Cartesian {
    let lat = Angle::from(position.lat());
    let lon = Angle::from(position.lon());
    let n = ellipsoid.prime_vertical_radius(lat).0;
    let h = position.height().0;

    let r = (n + h) * lat.cos().0;
    Cartesian::new(
        Metres(r * lon.cos().0),
        Metres(r * lon.sin().0),
        Metres((ellipsoid.one_minus_e_2() * n + h) * lat.sin().0),
    )
}

/// Calculate the latitude from its tangent, `y / x`, in the range [-90°, 90°].
fn calculate_latitude(y: f64, x: f64) -> Angle {
    if x < 0.0 {
        Angle::from_y_x(-y, -x)
    } else {
        Angle::from_y_x(y, x)
    }
}

/// Calculate the ellipsoidal height.
/// * `p` - the distance from the polar axis.
/// * `lat` - the geodetic latitude.
/// * `n` - the prime vertical radius of curvature at `lat`.
fn calculate_height(p: f64, lat: Angle, n: f64) -> f64 {
    p / lat.cos().0 - n
}

/// Convert a point in Cartesian coordinates to a geodetic position.
/// * `point` - the point in Cartesian coordinates.
/// * `ellipsoid` - the `Ellipsoid`.
///
/// returns the geodetic position and the number of iterations required.
///
/// # Errors
///
/// - `Error::InvalidCoordinate` if a coordinate is NaN or infinite.
/// - `Error::PolarAxis` if the point is within `MIN_AXIS_DISTANCE` of the
///   polar axis.
/// - `Error::NonConvergence` if the height has not converged after
///   `MAX_ITERATIONS`.
///
/// # Examples
/// ```
/// use grs80_geodetic::cartesian::to_geodetic;
/// use grs80_geodetic::{Cartesian, Metres, GRS80_ELLIPSOID};
///
/// let point = Cartesian::new(Metres(4_517_590.879), Metres(0.0), Metres(4_487_348.409));
/// let result = to_geodetic(&point, &GRS80_ELLIPSOID).unwrap();
///
/// assert!((45.0 - result.position().lat().0).abs() < 1.0e-8);
/// assert!(result.position().height().0.abs() < 1.0e-3);
/// ```
pub fn to_geodetic(point: &Cartesian, ellipsoid: &Ellipsoid) -> Result<GeodeticSolution, Error> {
    let (x, y, z) = (point.x().0, point.y().0, point.z().0);
    if !(x.is_finite() && y.is_finite() && z.is_finite()) {
        return Err(Error::InvalidCoordinate);
    }

    let p = point.axis_distance().0;
    if p < MIN_AXIS_DISTANCE.0 {
        warn!(x, y, z, "point is on the polar axis");
        return Err(Error::PolarAxis { distance: p });
    }

    let lon = Angle::from_y_x(y, x);

    // Latitude and height of a point on the ellipsoid
    let mut lat = calculate_latitude(z, ellipsoid.one_minus_e_2() * p);
    let mut n = ellipsoid.prime_vertical_radius(lat).0;
    let mut h = calculate_height(p, lat, n);

    let mut previous = f64::NAN;
    let mut iterations = 0;
    while iterations < MAX_ITERATIONS {
        iterations += 1;
        let older = previous;
        previous = h;

        lat = calculate_latitude(z, (1.0 - ellipsoid.e_2() * n / (n + h)) * p);
        n = ellipsoid.prime_vertical_radius(lat).0;
        h = calculate_height(p, lat, n);
        trace!(iterations, h, "latitude iteration");

        if !h.is_finite() {
            break;
        }

        // HEIGHT_TOLERANCE is finer than a double resolves near N, so the
        // height may also settle into a cycle between two adjacent values.
        if libm::fabs(h - previous) < HEIGHT_TOLERANCE.0 || h == older {
            let position = GeodeticPosition::new(Degrees::from(lat), Degrees::from(lon), Metres(h));
            debug!(
                lat = position.lat().0,
                lon = position.lon().0,
                h,
                iterations,
                "converted to geodetic"
            );
            return Ok(GeodeticSolution {
                position,
                iterations,
            });
        }
    }

    warn!(x, y, z, iterations, "latitude iteration did not converge");
    Err(Error::NonConvergence { iterations })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GRS80_ELLIPSOID;
    use angle_sc::is_within_tolerance;

    fn position(lat: f64, lon: f64, height: f64) -> GeodeticPosition {
        GeodeticPosition::new(Degrees(lat), Degrees(lon), Metres(height))
    }

    #[test]
    fn test_geodetic_position() {
        let a = position(60.0, 25.0, 100.0);
        assert_eq!(Degrees(60.0), a.lat());
        assert_eq!(Degrees(25.0), a.lon());
        assert_eq!(Metres(100.0), a.height());
        assert_eq!(&LatLong::new(Degrees(60.0), Degrees(25.0)), a.lat_long());
    }

    #[test]
    fn test_calculate_latitude() {
        let lat = calculate_latitude(1.0, 1.0);
        assert!(is_within_tolerance(45.0, Degrees::from(lat).0, 1.0e-12));

        // a negative denominator gives the latitude in the other hemisphere
        let lat = calculate_latitude(1.0, -1.0);
        assert!(is_within_tolerance(-45.0, Degrees::from(lat).0, 1.0e-12));
        assert!(0.0 < lat.cos().0);
    }

    #[test]
    fn test_to_cartesian() {
        // On the Equator at the prime meridian
        let point = to_cartesian(&position(0.0, 0.0, 0.0), &GRS80_ELLIPSOID);
        assert_eq!(GRS80_ELLIPSOID.a(), point.x());
        assert_eq!(0.0, point.y().0);
        assert_eq!(0.0, point.z().0);

        let point = position(45.0, 0.0, 0.0).to_cartesian(&GRS80_ELLIPSOID);
        assert!(is_within_tolerance(4_517_590.878_900, point.x().0, 1.0e-6));
        assert_eq!(0.0, point.y().0);
        assert!(is_within_tolerance(4_487_348.408_712, point.z().0, 1.0e-6));

        let point = to_cartesian(&position(60.0, 25.0, 100.0), &GRS80_ELLIPSOID);
        assert!(is_within_tolerance(2_897_606.098_539, point.x().0, 1.0e-6));
        assert!(is_within_tolerance(1_351_175.914_065, point.y().0, 1.0e-6));
        assert!(is_within_tolerance(5_500_563.736_322, point.z().0, 1.0e-6));

        // At the North pole
        let point = to_cartesian(&position(90.0, 0.0, 10.0), &GRS80_ELLIPSOID);
        assert!(is_within_tolerance(0.0, point.x().0, 1.0e-9));
        assert!(is_within_tolerance(
            GRS80_ELLIPSOID.b().0 + 10.0,
            point.z().0,
            1.0e-8
        ));

        // Heights are along the ellipsoid normal
        let lower = to_cartesian(&position(-33.8688, 151.2093, 0.0), &GRS80_ELLIPSOID);
        let upper = to_cartesian(&position(-33.8688, 151.2093, 1000.0), &GRS80_ELLIPSOID);
        let dx = upper.x().0 - lower.x().0;
        let dy = upper.y().0 - lower.y().0;
        let dz = upper.z().0 - lower.z().0;
        assert!(is_within_tolerance(
            1000.0,
            libm::sqrt(dx * dx + dy * dy + dz * dz),
            1.0e-6
        ));
    }

    #[test]
    fn test_to_geodetic() {
        let point = to_cartesian(&position(45.0, 0.0, 0.0), &GRS80_ELLIPSOID);
        let result = to_geodetic(&point, &GRS80_ELLIPSOID).unwrap();
        assert!(result.iterations() < 10);
        assert!(is_within_tolerance(45.0, result.position().lat().0, 1.0e-9));
        assert!(is_within_tolerance(0.0, result.position().lon().0, 1.0e-9));
        assert!(is_within_tolerance(0.0, result.position().height().0, 1.0e-6));

        // All four quadrants of longitude and both hemispheres
        for (lat, lon, height) in [
            (60.0, 25.0, 100.0),
            (-33.8688, 151.2093, 58.0),
            (51.4778, -0.0015, 45.0),
            (-12.5, -77.0, -100.0),
            (19.82, -155.47, 4205.0),
            (-89.0, -179.0, 100_000.0),
        ] {
            let point = to_cartesian(&position(lat, lon, height), &GRS80_ELLIPSOID);
            let result = point.to_geodetic(&GRS80_ELLIPSOID).unwrap();
            assert!(result.iterations() <= 20);
            assert!(is_within_tolerance(lat, result.position().lat().0, 1.0e-9));
            assert!(is_within_tolerance(lon, result.position().lon().0, 1.0e-9));
            assert!(is_within_tolerance(
                height,
                result.position().height().0,
                1.0e-4
            ));
        }
    }

    #[test]
    fn test_to_geodetic_limit_cycle() {
        // The height alternates between values either side of -100 m
        let point = to_cartesian(&position(49.0, 3.0, -100.0), &GRS80_ELLIPSOID);
        let result = to_geodetic(&point, &GRS80_ELLIPSOID).unwrap();
        assert!(result.iterations() <= 20);
        assert!(is_within_tolerance(49.0, result.position().lat().0, 1.0e-9));
        assert!(is_within_tolerance(
            -100.0,
            result.position().height().0,
            1.0e-6
        ));
    }

    #[test]
    fn test_to_geodetic_polar_axis() {
        for z in [0.0, 1.0, -1.0, 6_356_752.314_1, -6_356_752.314_1, 1.0e8] {
            let point = Cartesian::new(Metres(0.0), Metres(0.0), Metres(z));
            assert_eq!(
                Err(Error::PolarAxis { distance: 0.0 }),
                to_geodetic(&point, &GRS80_ELLIPSOID)
            );
        }

        let point = Cartesian::new(Metres(1.0e-4), Metres(-1.0e-4), Metres(6_356_752.0));
        assert!(matches!(
            to_geodetic(&point, &GRS80_ELLIPSOID),
            Err(Error::PolarAxis { .. })
        ));
    }

    #[test]
    fn test_to_geodetic_invalid_coordinate() {
        for point in [
            Cartesian::new(Metres(f64::NAN), Metres(0.0), Metres(0.0)),
            Cartesian::new(Metres(1.0), Metres(f64::INFINITY), Metres(0.0)),
            Cartesian::new(Metres(1.0), Metres(0.0), Metres(f64::NEG_INFINITY)),
        ] {
            assert_eq!(
                Err(Error::InvalidCoordinate),
                to_geodetic(&point, &GRS80_ELLIPSOID)
            );
        }
    }

    #[test]
    fn test_to_geodetic_non_convergence() {
        // Deep inside the ellipsoid, near its centre, the iteration is unstable
        let point = Cartesian::new(Metres(10_000.0), Metres(0.0), Metres(20_000.0));
        assert!(matches!(
            to_geodetic(&point, &GRS80_ELLIPSOID),
            Err(Error::NonConvergence { .. })
        ));
    }
}
