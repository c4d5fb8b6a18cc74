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

//! The shapefile module reads the fixed length header of an
//! [ESRI shapefile](https://www.esri.com/content/dam/esrisites/sitecore-archive/Files/Pdfs/library/whitepapers/pdfs/shapefile.pdf).
//!
//! The header mixes byte orders: the file code and file length are
//! big-endian, the version, shape type and bounding box are little-endian.

use crate::Error;
use core::fmt;

/// The length of a shapefile header in bytes.
pub const HEADER_LENGTH: usize = 100;

/// The file code of a shapefile.
pub const FILE_CODE: i32 = 9994;

/// The shape types of a shapefile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeType {
    Null,
    Point,
    Polyline,
    Polygon,
    MultiPoint,
    PointZ,
    PolylineZ,
    PolygonZ,
    MultiPointZ,
    PointM,
    PolylineM,
    PolygonM,
    MultiPointM,
    MultiPatch,
}

impl ShapeType {
    /// The `ShapeType` of a shape type code, `None` if the code is unknown.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Null),
            1 => Some(Self::Point),
            3 => Some(Self::Polyline),
            5 => Some(Self::Polygon),
            8 => Some(Self::MultiPoint),
            11 => Some(Self::PointZ),
            13 => Some(Self::PolylineZ),
            15 => Some(Self::PolygonZ),
            18 => Some(Self::MultiPointZ),
            21 => Some(Self::PointM),
            23 => Some(Self::PolylineM),
            25 => Some(Self::PolygonM),
            28 => Some(Self::MultiPointM),
            31 => Some(Self::MultiPatch),
            _ => None,
        }
    }

    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Null => 0,
            Self::Point => 1,
            Self::Polyline => 3,
            Self::Polygon => 5,
            Self::MultiPoint => 8,
            Self::PointZ => 11,
            Self::PolylineZ => 13,
            Self::PolygonZ => 15,
            Self::MultiPointZ => 18,
            Self::PointM => 21,
            Self::PolylineM => 23,
            Self::PolygonM => 25,
            Self::MultiPointM => 28,
            Self::MultiPatch => 31,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "Null shape",
            Self::Point => "Point",
            Self::Polyline => "Polyline",
            Self::Polygon => "Polygon",
            Self::MultiPoint => "MultiPoint",
            Self::PointZ => "PointZ",
            Self::PolylineZ => "PolylineZ",
            Self::PolygonZ => "PolygonZ",
            Self::MultiPointZ => "MultiPointZ",
            Self::PointM => "PointM",
            Self::PolylineM => "PolylineM",
            Self::PolygonM => "PolygonM",
            Self::MultiPointM => "MultiPointM",
            Self::MultiPatch => "MultiPatch",
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The bounding box of the shapes in a shapefile.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundingBox {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
    pub z_min: f64,
    pub z_max: f64,
    pub m_min: f64,
    pub m_max: f64,
}

/// The header of a shapefile.
#[derive(Clone, Debug, PartialEq)]
pub struct ShapefileHeader {
    /// The length of the file in bytes.
    file_length: i64,
    version: i32,
    /// The shape type code.
    shape_type: i32,
    bounding_box: BoundingBox,
}

/// Read `N` bytes at `offset`, which must be within `bytes`.
fn read_bytes<const N: usize>(bytes: &[u8], offset: usize) -> [u8; N] {
    let mut buffer = [0; N];
    buffer.copy_from_slice(&bytes[offset..offset + N]);
    buffer
}

fn read_be_i32(bytes: &[u8], offset: usize) -> i32 {
    i32::from_be_bytes(read_bytes(bytes, offset))
}

fn read_le_i32(bytes: &[u8], offset: usize) -> i32 {
    i32::from_le_bytes(read_bytes(bytes, offset))
}

fn read_le_f64(bytes: &[u8], offset: usize) -> f64 {
    f64::from_le_bytes(read_bytes(bytes, offset))
}

impl ShapefileHeader {
    /// Parse the header at the start of a shapefile.
    /// * `bytes` - at least the first `HEADER_LENGTH` bytes of the file.
    ///
    /// # Errors
    ///
    /// - `Error::ShortHeader` if there are fewer than `HEADER_LENGTH` bytes.
    /// - `Error::FileCode` if the file code is not `FILE_CODE`.
    pub fn parse(bytes: &[u8]) -> Result<Self, Error> {
        if bytes.len() < HEADER_LENGTH {
            return Err(Error::ShortHeader {
                length: bytes.len(),
            });
        }

        let code = read_be_i32(bytes, 0);
        if code != FILE_CODE {
            return Err(Error::FileCode { code });
        }

        // The file length is in 16 bit words
        let file_length = 2 * i64::from(read_be_i32(bytes, 24));

        let bounding_box = BoundingBox {
            x_min: read_le_f64(bytes, 36),
            y_min: read_le_f64(bytes, 44),
            x_max: read_le_f64(bytes, 52),
            y_max: read_le_f64(bytes, 60),
            z_min: read_le_f64(bytes, 68),
            z_max: read_le_f64(bytes, 76),
            m_min: read_le_f64(bytes, 84),
            m_max: read_le_f64(bytes, 92),
        };

        Ok(Self {
            file_length,
            version: read_le_i32(bytes, 28),
            shape_type: read_le_i32(bytes, 32),
            bounding_box,
        })
    }

    #[must_use]
    pub const fn file_code(&self) -> i32 {
        FILE_CODE
    }

    /// The length of the file in bytes.
    #[must_use]
    pub const fn file_length(&self) -> i64 {
        self.file_length
    }

    #[must_use]
    pub const fn version(&self) -> i32 {
        self.version
    }

    /// The shape type code.
    #[must_use]
    pub const fn shape_type_code(&self) -> i32 {
        self.shape_type
    }

    /// The `ShapeType`, `None` if the code is unknown.
    #[must_use]
    pub const fn shape_type(&self) -> Option<ShapeType> {
        ShapeType::from_code(self.shape_type)
    }

    #[must_use]
    pub const fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }
}

impl fmt::Display for ShapefileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "File code: {}", self.file_code())?;
        writeln!(f, "File length: {} bytes", self.file_length)?;
        writeln!(f, "Version: {}", self.version)?;
        match self.shape_type() {
            Some(shape_type) => writeln!(f, "Shape type: {shape_type} ({})", self.shape_type)?,
            None => writeln!(f, "Shape type: unknown ({})", self.shape_type)?,
        }
        let b = &self.bounding_box;
        writeln!(f, "X range: {} to {}", b.x_min, b.x_max)?;
        writeln!(f, "Y range: {} to {}", b.y_min, b.y_max)?;
        writeln!(f, "Z range: {} to {}", b.z_min, b.z_max)?;
        write!(f, "M range: {} to {}", b.m_min, b.m_max)
    }
}

/// Whether a file name has the shapefile extension, `.shp`.
/// * `name` - the file name or path.
/// # Examples
/// ```
/// use grs80_geodetic::shapefile::has_shapefile_extension;
///
/// assert!(has_shapefile_extension("data/parcels.shp"));
/// assert!(!has_shapefile_extension("data/parcels.dbf"));
/// ```
#[must_use]
pub fn has_shapefile_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(stem, extension)| !stem.is_empty() && extension.eq_ignore_ascii_case("shp"))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A header of a polygon shapefile.
    fn polygon_header() -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LENGTH);
        bytes.extend_from_slice(&FILE_CODE.to_be_bytes());
        bytes.extend_from_slice(&[0; 20]);
        bytes.extend_from_slice(&1_234_i32.to_be_bytes());
        bytes.extend_from_slice(&1000_i32.to_le_bytes());
        bytes.extend_from_slice(&5_i32.to_le_bytes());
        for value in [
            144.5, -38.25, 145.75, -37.5, 0.0, 120.5, -1.0, 1.0_f64,
        ] {
            bytes.extend_from_slice(&value.to_le_bytes());
        }
        bytes
    }

    #[test]
    fn test_shape_type() {
        for code in [0, 1, 3, 5, 8, 11, 13, 15, 18, 21, 23, 25, 28, 31] {
            let shape_type = ShapeType::from_code(code).unwrap();
            assert_eq!(code, shape_type.code());
        }
        assert_eq!(Some(ShapeType::Polygon), ShapeType::from_code(5));
        assert_eq!("Null shape", ShapeType::Null.to_string());
        assert_eq!("MultiPatch", ShapeType::MultiPatch.name());

        for code in [-1, 2, 4, 32, 9994] {
            assert_eq!(None, ShapeType::from_code(code));
        }
    }

    #[test]
    fn test_parse_header() {
        let bytes = polygon_header();
        assert_eq!(HEADER_LENGTH, bytes.len());

        let header = ShapefileHeader::parse(&bytes).unwrap();
        assert_eq!(FILE_CODE, header.file_code());
        assert_eq!(2468, header.file_length());
        assert_eq!(1000, header.version());
        assert_eq!(5, header.shape_type_code());
        assert_eq!(Some(ShapeType::Polygon), header.shape_type());

        let b = header.bounding_box();
        assert_eq!(144.5, b.x_min);
        assert_eq!(-38.25, b.y_min);
        assert_eq!(145.75, b.x_max);
        assert_eq!(-37.5, b.y_max);
        assert_eq!(0.0, b.z_min);
        assert_eq!(120.5, b.z_max);
        assert_eq!(-1.0, b.m_min);
        assert_eq!(1.0, b.m_max);

        // Records after the header are ignored
        let mut bytes = polygon_header();
        bytes.extend_from_slice(&[0xff; 28]);
        assert_eq!(Ok(header), ShapefileHeader::parse(&bytes));
    }

    #[test]
    fn test_parse_header_errors() {
        let bytes = polygon_header();
        assert_eq!(
            Err(Error::ShortHeader { length: 99 }),
            ShapefileHeader::parse(&bytes[..99])
        );
        assert_eq!(
            Err(Error::ShortHeader { length: 0 }),
            ShapefileHeader::parse(&[])
        );

        let mut bytes = polygon_header();
        bytes[..4].copy_from_slice(&9993_i32.to_be_bytes());
        assert_eq!(
            Err(Error::FileCode { code: 9993 }),
            ShapefileHeader::parse(&bytes)
        );

        // A little-endian file code is not recognised
        let mut bytes = polygon_header();
        bytes[..4].copy_from_slice(&FILE_CODE.to_le_bytes());
        assert!(matches!(
            ShapefileHeader::parse(&bytes),
            Err(Error::FileCode { .. })
        ));
    }

    #[test]
    fn test_header_display() {
        let mut bytes = polygon_header();
        bytes[32..36].copy_from_slice(&7_i32.to_le_bytes());
        let header = ShapefileHeader::parse(&bytes).unwrap();
        assert_eq!(None, header.shape_type());

        let text = header.to_string();
        assert!(text.starts_with("File code: 9994\n"));
        assert!(text.contains("File length: 2468 bytes\n"));
        assert!(text.contains("Shape type: unknown (7)\n"));
        assert!(text.ends_with("M range: -1 to 1"));
    }

    #[test]
    fn test_has_shapefile_extension() {
        assert!(has_shapefile_extension("parcels.shp"));
        assert!(has_shapefile_extension("/data/survey.v2/PARCELS.SHP"));
        assert!(!has_shapefile_extension("parcels.shx"));
        assert!(!has_shapefile_extension("parcels"));
        assert!(!has_shapefile_extension("shp"));
        assert!(!has_shapefile_extension(".shp"));
    }
}
