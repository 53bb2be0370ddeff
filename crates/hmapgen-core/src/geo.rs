//! Geographic primitives: bounding boxes, points and geodesic distances.

use crate::{HeightmapError, Result};
use std::fmt;

/// Equatorial earth radius (WGS84) used for distance calculations, in meters.
///
/// Grid sizes are `floor(distance / precision)`, so changing the radius can
/// move a dimension by one cell.
pub const EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Number of fractional digits in the wire form of a coordinate.
pub const WIRE_DECIMALS: usize = 6;

/// A west/south/east/north rectangle in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    /// Western longitude.
    pub west: f64,
    /// Southern latitude.
    pub south: f64,
    /// Eastern longitude.
    pub east: f64,
    /// Northern latitude.
    pub north: f64,
}

impl Bound {
    /// Create a bound. No validation is performed; see [`Bound::validate`].
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// Check that the bound describes a non-empty area on the globe.
    pub fn validate(&self) -> Result<()> {
        let edges = [self.west, self.south, self.east, self.north];
        if edges.iter().any(|v| !v.is_finite()) {
            return Err(HeightmapError::InvalidBound(format!(
                "non-finite edge in {}",
                self
            )));
        }
        if !(-90.0..=90.0).contains(&self.south) || !(-90.0..=90.0).contains(&self.north) {
            return Err(HeightmapError::InvalidBound(format!(
                "latitude outside [-90, 90] in {}",
                self
            )));
        }
        if !(-180.0..=180.0).contains(&self.west) || !(-180.0..=180.0).contains(&self.east) {
            return Err(HeightmapError::InvalidBound(format!(
                "longitude outside [-180, 180] in {}",
                self
            )));
        }
        if self.west >= self.east {
            return Err(HeightmapError::InvalidBound(format!(
                "west edge {} is not west of east edge {}",
                self.west, self.east
            )));
        }
        if self.south >= self.north {
            return Err(HeightmapError::InvalidBound(format!(
                "south edge {} is not south of north edge {}",
                self.south, self.north
            )));
        }
        Ok(())
    }

    /// Width in degrees of longitude.
    pub fn width_deg(&self) -> f64 {
        self.east - self.west
    }

    /// Height in degrees of latitude.
    pub fn height_deg(&self) -> f64 {
        self.north - self.south
    }

    /// Latitude of the horizontal center line.
    pub fn center_lat(&self) -> f64 {
        (self.south + self.north) / 2.0
    }

    /// East-west extent in meters, measured along the center latitude.
    ///
    /// Longitude degrees shrink toward the poles, so the width is taken at
    /// the middle of the box rather than at either edge.
    pub fn geo_width(&self) -> f64 {
        let lat = self.center_lat();
        haversine_distance(lat, self.west, lat, self.east)
    }

    /// North-south extent in meters, measured along the western edge.
    pub fn geo_height(&self) -> f64 {
        haversine_distance(self.south, self.west, self.north, self.west)
    }

    /// Check if a coordinate is within the bound (edges included).
    pub fn contains(&self, point: &Point) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lng >= self.west
            && point.lng <= self.east
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[W {}, S {}, E {}, N {}]",
            self.west, self.south, self.east, self.north
        )
    }
}

/// A sampled position on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    /// Latitude in decimal degrees.
    pub lat: f64,
    /// Longitude in decimal degrees.
    pub lng: f64,
}

impl Point {
    /// Create a point from latitude and longitude.
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Latitude as sent to elevation providers (6 fractional digits).
    pub fn lat_wire(&self) -> String {
        format!("{:.*}", WIRE_DECIMALS, self.lat)
    }

    /// Longitude as sent to elevation providers (6 fractional digits).
    pub fn lng_wire(&self) -> String {
        format!("{:.*}", WIRE_DECIMALS, self.lng)
    }
}

/// Formats as `lat,lng` with wire precision.
impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.*},{:.*}",
            WIRE_DECIMALS, self.lat, WIRE_DECIMALS, self.lng
        )
    }
}

/// Calculate the distance between two points using the haversine formula.
///
/// Returns the distance in meters.
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}
