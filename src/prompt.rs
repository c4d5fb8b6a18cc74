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

//! The interactive menu and bounded numeric input.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::Result;
use grs80_geodetic::{Cartesian, Degrees, Ellipsoid, GeodeticPosition, LatLong, Metres};
use tracing::warn;

use crate::cli::{self, Limits};

/// Standard input ended before a value was read.
#[derive(Debug, thiserror::Error)]
#[error("end of input")]
pub struct EndOfInput;

/// Reads numbers from `input`, prompting on `output` until they are valid.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    fn write_prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    /// Read a line of input, without its line ending.
    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(EndOfInput.into());
        }
        Ok(line.trim().to_owned())
    }

    /// Request a line of text.
    pub fn request_text(&mut self, prompt: &str) -> Result<String> {
        self.write_prompt(prompt)?;
        self.read_line()
    }

    /// Request an integer in [lower, upper], re-prompting until one is entered.
    pub fn request_integer(&mut self, lower: i32, upper: i32, prompt: &str) -> Result<i32> {
        self.write_prompt(prompt)?;
        loop {
            match self.read_line()?.parse::<i32>() {
                Ok(value) if (lower..=upper).contains(&value) => return Ok(value),
                _ => self.write_prompt(&format!(
                    "Invalid input. Enter a number between [{lower}, {upper}]: "
                ))?,
            }
        }
    }

    /// Request a real number in [lower, upper], re-prompting until one is entered.
    pub fn request_real(&mut self, lower: f64, upper: f64, prompt: &str) -> Result<f64> {
        self.write_prompt(prompt)?;
        loop {
            match self.read_line()?.parse::<f64>() {
                Ok(value) if (lower..=upper).contains(&value) => return Ok(value),
                _ => self.write_prompt(&format!(
                    "Invalid input. Enter a number between [{lower:.1}, {upper:.1}]: "
                ))?,
            }
        }
    }

    /// Request a finite real number, re-prompting with `error_text` until one
    /// is entered.
    pub fn request_unchecked_real(&mut self, prompt: &str, error_text: &str) -> Result<f64> {
        self.write_prompt(prompt)?;
        loop {
            match self.read_line()?.parse::<f64>() {
                Ok(value) if value.is_finite() => return Ok(value),
                _ => self.write_prompt(error_text)?,
            }
        }
    }

    fn request_limited(&mut self, limits: Limits, prompt: &str) -> Result<f64> {
        self.request_real(limits.lower, limits.upper, prompt)
    }
}

/// The items of the interactive menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuItem {
    DmsToDecimal,
    DecimalToDms,
    NormalGravity,
    ToCartesian,
    ToGeodetic,
    UtmByDistance,
    UtmByPoint,
    ShapefileHeader,
    Exit,
}

impl MenuItem {
    pub const ALL: [Self; 9] = [
        Self::DmsToDecimal,
        Self::DecimalToDms,
        Self::NormalGravity,
        Self::ToCartesian,
        Self::ToGeodetic,
        Self::UtmByDistance,
        Self::UtmByPoint,
        Self::ShapefileHeader,
        Self::Exit,
    ];

    /// The menu item selected by a number, `None` if there is no such item.
    pub fn from_number(number: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|item| item.number() == number)
    }

    pub const fn number(self) -> i32 {
        match self {
            Self::DmsToDecimal => 1,
            Self::DecimalToDms => 2,
            Self::NormalGravity => 3,
            Self::ToCartesian => 4,
            Self::ToGeodetic => 5,
            Self::UtmByDistance => 6,
            Self::UtmByPoint => 7,
            Self::ShapefileHeader => 8,
            Self::Exit => 9,
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::DmsToDecimal => "DMS to DD.DDD",
            Self::DecimalToDms => "DD.DDD to DMS",
            Self::NormalGravity => "Normal gravity on GRS80 ellipsoid",
            Self::ToCartesian => "Geodetic coordinates to 3D Cartesian coordinates",
            Self::ToGeodetic => "3D Cartesian coordinates to geodetic coordinates",
            Self::UtmByDistance => "UTM scale error by distance to central meridian",
            Self::UtmByPoint => "UTM scale error by point location (Lon/Lat)",
            Self::ShapefileHeader => "Shapefile header",
            Self::Exit => "Exit",
        }
    }
}

fn write_menu(out: &mut impl Write) -> Result<()> {
    writeln!(out)?;
    for item in MenuItem::ALL {
        writeln!(out, "{}. {}", item.number(), item.title())?;
    }
    Ok(())
}

/// Run the interactive menu until `Exit` is selected or the input ends.
///
/// A failed calculation is reported and the menu continues.
pub fn run_menu<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    ellipsoid: &Ellipsoid,
) -> Result<()> {
    loop {
        write_menu(prompter.output())?;
        let selection = match prompter.request_integer(1, 9, "Select an option: ") {
            Ok(number) => MenuItem::from_number(number),
            Err(e) if e.is::<EndOfInput>() => return Ok(()),
            Err(e) => return Err(e),
        };

        let item = match selection {
            None | Some(MenuItem::Exit) => return Ok(()),
            Some(item) => item,
        };

        if let Err(e) = run_item(prompter, item, ellipsoid) {
            if e.is::<EndOfInput>() {
                return Ok(());
            }
            warn!(?item, "{e:#}");
            writeln!(prompter.output(), "Error: {e:#}")?;
        }
    }
}

/// Request the inputs of a menu item and print its result.
fn run_item<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    item: MenuItem,
    ellipsoid: &Ellipsoid,
) -> Result<()> {
    match item {
        MenuItem::DmsToDecimal => {
            writeln!(
                prompter.output(),
                "Converts DMS (Degrees Minutes Seconds) to DD.DDD (Decimal degrees)"
            )?;
            let (lower, upper) = cli::DMS_DEGREES;
            let degrees = prompter.request_integer(lower, upper, "Enter DMS degrees (integer): ")?;
            let (lower, upper) = cli::DMS_MINUTES;
            let minutes =
                prompter.request_integer(lower, upper, "Enter DMS minutes (integer): ")?;
            let seconds = prompter.request_limited(cli::SECONDS, "Enter DMS seconds (real): ")?;
            cli::cmd_dms_to_dd(prompter.output(), degrees, minutes.unsigned_abs(), seconds)
        }
        MenuItem::DecimalToDms => {
            writeln!(
                prompter.output(),
                "Converts DD.DDD (Decimal degrees) to DMS (Degrees Minutes Seconds)"
            )?;
            let decimal = prompter.request_limited(cli::DECIMAL_DEGREES, "Enter decimal degrees: ")?;
            cli::cmd_dd_to_dms(prompter.output(), decimal)
        }
        MenuItem::NormalGravity => {
            writeln!(
                prompter.output(),
                "Calculates normal gravity (theoretical gravity) on a given latitude. GRS80 ellipsoid."
            )?;
            let latitude = prompter.request_limited(cli::GRAVITY_LATITUDE, "Enter latitude φ: ")?;
            cli::cmd_gravity(prompter.output(), latitude)
        }
        MenuItem::ToCartesian => {
            writeln!(
                prompter.output(),
                "Converts geodetic coordinates (φ, λ, h) to 3D Cartesian (X, Y, Z) coordinates."
            )?;
            let lat = prompter
                .request_limited(cli::LATITUDE, "Enter latitude φ in decimal degrees: ")?;
            let lon = prompter
                .request_limited(cli::LONGITUDE, "Enter longitude λ in decimal degrees: ")?;
            let height = prompter.request_unchecked_real(
                "Enter ellipsoidal height in metres: ",
                "Invalid input. Enter height in metres: ",
            )?;
            let position = GeodeticPosition::new(Degrees(lat), Degrees(lon), Metres(height));
            cli::cmd_to_cartesian(prompter.output(), ellipsoid, &position)
        }
        MenuItem::ToGeodetic => {
            writeln!(
                prompter.output(),
                "Converts 3D Cartesian (X, Y, Z) coordinates to geodetic (φ, λ, h) coordinates."
            )?;
            let error_text = "Invalid input. Enter coordinate in decimal metres: ";
            let x = prompter
                .request_unchecked_real("Enter X-coordinate in decimal metres: ", error_text)?;
            let y = prompter
                .request_unchecked_real("Enter Y-coordinate in decimal metres: ", error_text)?;
            let z = prompter
                .request_unchecked_real("Enter Z-coordinate in decimal metres: ", error_text)?;
            let point = Cartesian::new(Metres(x), Metres(y), Metres(z));
            cli::cmd_to_geodetic(prompter.output(), ellipsoid, &point)
        }
        MenuItem::UtmByDistance => {
            writeln!(
                prompter.output(),
                "Calculates UTM scale error based on distance from the central meridian."
            )?;
            let distance = prompter.request_limited(
                cli::DISTANCE,
                "Enter distance from the central meridian in metres: ",
            )?;
            cli::cmd_utm_distance(prompter.output(), ellipsoid, Metres(distance))
        }
        MenuItem::UtmByPoint => {
            writeln!(
                prompter.output(),
                "Calculates UTM scale error based on point location (Lon/Lat) and a given central meridian."
            )?;
            let lat = prompter
                .request_limited(cli::LATITUDE, "Enter latitude φ in decimal degrees: ")?;
            let lon = prompter
                .request_limited(cli::LONGITUDE, "Enter longitude λ in decimal degrees: ")?;
            let (lower, upper) = cli::CENTRAL_MERIDIAN;
            let central_meridian = prompter.request_integer(
                lower,
                upper,
                "Enter longitude of central meridian in whole degrees: ",
            )?;
            let position = LatLong::new(Degrees(lat), Degrees(lon));
            cli::cmd_utm_point(prompter.output(), &position, central_meridian)
        }
        MenuItem::ShapefileHeader => {
            let path = prompter.request_text("Enter the path of a shapefile (.shp): ")?;
            cli::cmd_shapefile(prompter.output(), Path::new(&path))
        }
        MenuItem::Exit => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grs80_geodetic::GRS80_ELLIPSOID;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<&[u8]>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes()), Vec::new())
    }

    fn menu_output(input: &str) -> String {
        let mut prompter = prompter(input);
        run_menu(&mut prompter, &GRS80_ELLIPSOID).unwrap();
        String::from_utf8(prompter.output).unwrap()
    }

    #[test]
    fn test_request_integer() {
        let mut p = prompter("abc\n-181\n 45 \n");
        assert_eq!(45, p.request_integer(-180, 180, "Degrees: ").unwrap());
        let text = String::from_utf8(p.output).unwrap();
        assert_eq!(
            "Degrees: Invalid input. Enter a number between [-180, 180]: \
             Invalid input. Enter a number between [-180, 180]: ",
            text
        );
    }

    #[test]
    fn test_request_real() {
        let mut p = prompter("90.5\nNaN\n\n45.25\n");
        assert_eq!(45.25, p.request_real(0.0, 90.0, "Latitude: ").unwrap());
        let text = String::from_utf8(p.output).unwrap();
        assert_eq!(
            3,
            text.matches("Invalid input. Enter a number between [0.0, 90.0]: ")
                .count()
        );
    }

    #[test]
    fn test_request_unchecked_real() {
        let mut p = prompter("x\ninf\n-123.5\n");
        assert_eq!(
            -123.5,
            p.request_unchecked_real("Height: ", "Try again: ").unwrap()
        );
        let text = String::from_utf8(p.output).unwrap();
        assert_eq!("Height: Try again: Try again: ", text);
    }

    #[test]
    fn test_end_of_input() {
        let mut p = prompter("abc\n");
        let e = p.request_integer(1, 9, "Select: ").unwrap_err();
        assert!(e.is::<EndOfInput>());
    }

    #[test]
    fn test_menu_item() {
        for (i, item) in MenuItem::ALL.into_iter().enumerate() {
            assert_eq!(Some(item), MenuItem::from_number(item.number()));
            assert_eq!(i32::try_from(i + 1).unwrap(), item.number());
        }
        assert_eq!(None, MenuItem::from_number(0));
        assert_eq!(None, MenuItem::from_number(10));
    }

    #[test]
    fn test_run_menu_exit() {
        let text = menu_output("9\n");
        assert!(text.contains("1. DMS to DD.DDD\n"));
        assert!(text.contains("9. Exit\n"));

        // the end of the input also ends the menu
        let text = menu_output("");
        assert!(text.ends_with("Select an option: "));
    }

    #[test]
    fn test_run_menu_calculations() {
        let text = menu_output("1\n-45\n30\n0\n3\n45\n6\n255000\n9\n");
        assert!(text.contains("Result in decimal degrees: -45.500000°\n"));
        assert!(text.contains("is 980619.920263 mgal."));
        assert!(text.contains("Scale error (PPM): 400\n"));
    }

    #[test]
    fn test_run_menu_geodetic() {
        let text = menu_output("4\n45\n0\n0\n5\n0\n0\n6356752\n7\n60\n30\n27\n9\n");
        assert!(text.contains("X = 4517590.879\n"));
        assert!(text.contains("m from the polar axis"));
        assert!(text.contains("Scale error (PPM): 285\n"));
    }

    #[test]
    fn test_run_menu_shapefile_error() {
        let text = menu_output("8\nparcels.dbf\n9\n");
        assert!(text.contains("Error: invalid filename extension"));
        assert!(text.contains("9. Exit\n"));
    }
}
