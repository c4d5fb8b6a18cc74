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

//! The error module contains the `Error` type returned by the fallible
//! functions of the library.

use thiserror::Error;

/// The errors that may occur in a geodetic calculation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    /// The axes do not describe an oblate ellipsoid.
    #[error("invalid ellipsoid: semimajor axis {a} m, semiminor axis {b} m")]
    InvalidEllipsoid { a: f64, b: f64 },

    /// A value lies outside the domain of the operation.
    #[error("{name} {value} is outside the range [{lower}, {upper}]")]
    OutOfRange {
        name: &'static str,
        value: f64,
        lower: f64,
        upper: f64,
    },

    /// A Cartesian coordinate is NaN or infinite.
    #[error("Cartesian coordinates must be finite numbers")]
    InvalidCoordinate,

    /// The point lies on (or within a millimetre of) the polar axis, where
    /// the longitude is undefined.
    #[error("point is {distance} m from the polar axis, longitude is undefined")]
    PolarAxis { distance: f64 },

    /// The latitude iteration did not converge.
    #[error("latitude iteration did not converge after {iterations} iterations")]
    NonConvergence { iterations: u32 },

    /// A shapefile header is shorter than 100 bytes.
    #[error("shapefile header is {length} bytes, expected 100")]
    ShortHeader { length: usize },

    /// A shapefile header does not start with the shapefile file code.
    #[error("incorrect file code {code}, file is not a shapefile")]
    FileCode { code: i32 },
}

impl Error {
    /// Construct an `OutOfRange` error.
    #[must_use]
    pub const fn out_of_range(name: &'static str, value: f64, lower: f64, upper: f64) -> Self {
        Self::OutOfRange {
            name,
            value,
            lower,
            upper,
        }
    }
}
