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

//! The command line sub-commands and the calculations behind each menu item.
//!
//! Every calculation writes its result to a `Write` so that the interactive
//! menu and the sub-commands print the same text.

use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Subcommand, ValueEnum};
use grs80_geodetic::cartesian::{to_cartesian, to_geodetic};
use grs80_geodetic::dms::{decimal_to_dms, dms_to_decimal, MAX_DEGREES};
use grs80_geodetic::gravity::normal_gravity;
use grs80_geodetic::shapefile::{has_shapefile_extension, ShapefileHeader, HEADER_LENGTH};
use grs80_geodetic::utm::{
    longitude_zone, scale_error_ppm, scale_factor_at_distance, scale_factor_at_point,
    zone_central_meridian,
};
use grs80_geodetic::{
    Angle, Cartesian, Degrees, Ellipsoid, Error, GeodeticPosition, LatLong, Metres,
    MetresPerSecondSquared, GRS80_ELLIPSOID, WGS84_ELLIPSOID,
};
use tracing::{debug, info};

/// The valid range of a real input value.
#[derive(Clone, Copy, Debug)]
pub struct Limits {
    pub name: &'static str,
    pub lower: f64,
    pub upper: f64,
}

impl Limits {
    const fn new(name: &'static str, lower: f64, upper: f64) -> Self {
        Self { name, lower, upper }
    }

    /// Check that a value is within the limits.
    pub fn check(self, value: f64) -> Result<f64, Error> {
        if (self.lower..=self.upper).contains(&value) {
            Ok(value)
        } else {
            Err(Error::out_of_range(self.name, value, self.lower, self.upper))
        }
    }
}

pub const SECONDS: Limits = Limits::new("seconds", 0.0, 60.0);
pub const DECIMAL_DEGREES: Limits = Limits::new("decimal degrees", 0.0, 180.0);
pub const GRAVITY_LATITUDE: Limits = Limits::new("latitude", 0.0, 90.0);
pub const LATITUDE: Limits = Limits::new("latitude", -90.0, 90.0);
pub const LONGITUDE: Limits = Limits::new("longitude", -180.0, 180.0);
pub const DISTANCE: Limits = Limits::new("distance", 0.0, 1_000_000.0);

/// The range of the whole degrees of a DMS angle.
pub const DMS_DEGREES: (i32, i32) = (-MAX_DEGREES, MAX_DEGREES);

/// The range of the whole minutes of a DMS angle.
pub const DMS_MINUTES: (i32, i32) = (0, 60);

/// The range of a central meridian in whole degrees.
pub const CENTRAL_MERIDIAN: (i32, i32) = (-180, 180);

/// The reference ellipsoids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum EllipsoidName {
    #[default]
    Grs80,
    Wgs84,
}

impl EllipsoidName {
    #[must_use]
    pub fn ellipsoid(self) -> &'static Ellipsoid {
        match self {
            Self::Grs80 => &GRS80_ELLIPSOID,
            Self::Wgs84 => &WGS84_ELLIPSOID,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run the interactive menu (default)
    Menu,

    /// Convert degrees, minutes and seconds to decimal degrees
    #[command(allow_negative_numbers = true)]
    DmsToDd {
        /// Whole degrees, negative for south or west
        #[arg(value_parser = clap::value_parser!(i32).range(-180..=180))]
        degrees: i32,

        /// Whole minutes
        #[arg(value_parser = clap::value_parser!(u32).range(0..=60))]
        minutes: u32,

        /// Seconds
        seconds: f64,
    },

    /// Convert decimal degrees to degrees, minutes and seconds
    DdToDms {
        /// Decimal degrees in [0, 180]
        decimal: f64,
    },

    /// Calculate normal gravity on the GRS80 ellipsoid
    Gravity {
        /// Geodetic latitude in decimal degrees, in [0, 90]
        latitude: f64,
    },

    /// Convert geodetic coordinates to Cartesian coordinates
    #[command(allow_negative_numbers = true)]
    ToCartesian {
        /// Geodetic latitude in decimal degrees
        #[arg(long)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long)]
        lon: f64,

        /// Ellipsoidal height in metres
        #[arg(long, default_value_t = 0.0)]
        height: f64,
    },

    /// Convert Cartesian coordinates to geodetic coordinates
    #[command(allow_negative_numbers = true)]
    ToGeodetic {
        /// X coordinate in metres
        #[arg(short)]
        x: f64,

        /// Y coordinate in metres
        #[arg(short)]
        y: f64,

        /// Z coordinate in metres
        #[arg(short)]
        z: f64,
    },

    /// Calculate the UTM scale error at a distance from the central meridian
    UtmDistance {
        /// Distance from the central meridian in metres, in [0, 1000000]
        distance: f64,
    },

    /// Calculate the UTM scale error at a point
    #[command(allow_negative_numbers = true)]
    UtmPoint {
        /// Geodetic latitude in decimal degrees
        #[arg(long)]
        lat: f64,

        /// Longitude in decimal degrees
        #[arg(long)]
        lon: f64,

        /// Central meridian in whole degrees, default: the point's zone
        #[arg(long, conflicts_with = "zone")]
        central_meridian: Option<i32>,

        /// UTM zone number, in [1, 60]
        #[arg(long)]
        zone: Option<u8>,
    },

    /// Read the header of a shapefile
    Shapefile {
        /// Path to the .shp file
        path: PathBuf,
    },
}

/// Run a sub-command, other than `Menu`, writing its result to `out`.
pub fn run(command: Commands, ellipsoid: &Ellipsoid, out: &mut impl Write) -> Result<()> {
    debug!(?command, "running command");
    match command {
        Commands::Menu => bail!("the menu is not a calculation"),
        Commands::DmsToDd {
            degrees,
            minutes,
            seconds,
        } => cmd_dms_to_dd(out, degrees, minutes, SECONDS.check(seconds)?),
        Commands::DdToDms { decimal } => cmd_dd_to_dms(out, DECIMAL_DEGREES.check(decimal)?),
        Commands::Gravity { latitude } => cmd_gravity(out, GRAVITY_LATITUDE.check(latitude)?),
        Commands::ToCartesian { lat, lon, height } => {
            if !height.is_finite() {
                return Err(Error::InvalidCoordinate.into());
            }
            let position = GeodeticPosition::new(
                Degrees(LATITUDE.check(lat)?),
                Degrees(LONGITUDE.check(lon)?),
                Metres(height),
            );
            cmd_to_cartesian(out, ellipsoid, &position)
        }
        Commands::ToGeodetic { x, y, z } => {
            cmd_to_geodetic(out, ellipsoid, &Cartesian::new(Metres(x), Metres(y), Metres(z)))
        }
        Commands::UtmDistance { distance } => {
            cmd_utm_distance(out, ellipsoid, Metres(DISTANCE.check(distance)?))
        }
        Commands::UtmPoint {
            lat,
            lon,
            central_meridian,
            zone,
        } => {
            let position = LatLong::new(
                Degrees(LATITUDE.check(lat)?),
                Degrees(LONGITUDE.check(lon)?),
            );
            let central_meridian = match (central_meridian, zone) {
                (Some(meridian), _) => {
                    let (lower, upper) = CENTRAL_MERIDIAN;
                    if !(lower..=upper).contains(&meridian) {
                        return Err(Error::out_of_range(
                            "central meridian",
                            f64::from(meridian),
                            f64::from(lower),
                            f64::from(upper),
                        )
                        .into());
                    }
                    meridian
                }
                (None, Some(zone)) => zone_central_meridian(zone)?,
                (None, None) => zone_central_meridian(longitude_zone(position.lon()))?,
            };
            cmd_utm_point(out, &position, central_meridian)
        }
        Commands::Shapefile { path } => cmd_shapefile(out, &path),
    }
}

/// Convert degrees, minutes and seconds to decimal degrees.
pub fn cmd_dms_to_dd(out: &mut impl Write, degrees: i32, minutes: u32, seconds: f64) -> Result<()> {
    let decimal = dms_to_decimal(degrees, minutes, seconds);
    writeln!(out, "Result in decimal degrees: {:.6}°", decimal.0)?;
    Ok(())
}

/// Convert decimal degrees to degrees, minutes and seconds.
pub fn cmd_dd_to_dms(out: &mut impl Write, decimal: f64) -> Result<()> {
    let dms = decimal_to_dms(Degrees(decimal))?;
    writeln!(out, "Result: {dms}")?;
    writeln!(
        out,
        "DMS: {} {} {:.6}",
        dms.degrees(),
        dms.minutes(),
        dms.seconds()
    )?;
    Ok(())
}

/// Calculate normal gravity at a latitude.
pub fn cmd_gravity(out: &mut impl Write, latitude: f64) -> Result<()> {
    let g = normal_gravity(Angle::from(Degrees(latitude)));
    writeln!(
        out,
        "On latitude φ = {latitude:.6}° normal gravity on the GRS80 ellipsoid is {:.6} mgal.",
        g.0
    )?;
    writeln!(
        out,
        "Gravitational acceleration is {:.6} m/s².",
        MetresPerSecondSquared::from(g).0
    )?;
    Ok(())
}

/// Convert a geodetic position to Cartesian coordinates.
pub fn cmd_to_cartesian(
    out: &mut impl Write,
    ellipsoid: &Ellipsoid,
    position: &GeodeticPosition,
) -> Result<()> {
    let point = to_cartesian(position, ellipsoid);
    writeln!(out, "X = {:.3}", point.x().0)?;
    writeln!(out, "Y = {:.3}", point.y().0)?;
    writeln!(out, "Z = {:.3}", point.z().0)?;
    Ok(())
}

/// Convert Cartesian coordinates to a geodetic position.
pub fn cmd_to_geodetic(out: &mut impl Write, ellipsoid: &Ellipsoid, point: &Cartesian) -> Result<()> {
    let solution = to_geodetic(point, ellipsoid)?;
    let position = solution.position();
    writeln!(out, "Iterations completed: {}", solution.iterations())?;
    writeln!(out, "Latitude φ: {:.9}", position.lat().0)?;
    writeln!(out, "Longitude λ: {:.9}", position.lon().0)?;
    writeln!(out, "Ellipsoidal height h: {:.3}", position.height().0)?;
    Ok(())
}

/// Calculate the UTM scale error at a distance from the central meridian.
pub fn cmd_utm_distance(out: &mut impl Write, ellipsoid: &Ellipsoid, distance: Metres) -> Result<()> {
    let k = scale_factor_at_distance(distance, ellipsoid.a());
    writeln!(
        out,
        "Distance from the central meridian: {:.3} km",
        distance.0 / 1000.0
    )?;
    writeln!(out, "Scale factor: {k:.9}")?;
    writeln!(out, "Scale error (PPM): {}", scale_error_ppm(k))?;
    Ok(())
}

/// Calculate the UTM scale error at a point.
pub fn cmd_utm_point(out: &mut impl Write, position: &LatLong, central_meridian: i32) -> Result<()> {
    let k = scale_factor_at_point(position, central_meridian);
    writeln!(out, "Central meridian: {central_meridian}°")?;
    writeln!(
        out,
        "Point (Lon, Lat): ({:.6}°, {:.6}°)",
        position.lon().0,
        position.lat().0
    )?;
    writeln!(out, "Scale factor: {k:.9}")?;
    writeln!(out, "Scale error (PPM): {}", scale_error_ppm(k))?;
    Ok(())
}

/// Read and print the header of a shapefile.
///
/// Nothing is written unless the whole header is valid.
pub fn cmd_shapefile(out: &mut impl Write, path: &Path) -> Result<()> {
    if !has_shapefile_extension(&path.to_string_lossy()) {
        bail!(
            "invalid filename extension, {} is not a shapefile",
            path.display()
        );
    }

    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let mut bytes = Vec::with_capacity(HEADER_LENGTH);
    file.take(HEADER_LENGTH as u64)
        .read_to_end(&mut bytes)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let header = ShapefileHeader::parse(&bytes)
        .with_context(|| format!("{} is not a shapefile", path.display()))?;
    info!(path = %path.display(), shape_type = header.shape_type_code(), "read shapefile header");
    writeln!(out, "{header}")?;
    Ok(())
}
