//! Point and location definitions

use std::fmt;

use geo::geometry::Point;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Recorded point of an input track
#[derive(Clone, Debug, PartialEq)]
pub struct TrackPoint {
    /// x = longitude, y = latitude
    pub coordinates: Point,
    pub elevation: Option<f64>,
    pub time: Option<OffsetDateTime>,
}

impl TrackPoint {
    pub fn basic(coordinates: Point) -> Self {
        Self {
            coordinates,
            elevation: None,
            time: None,
        }
    }

    pub fn lat(&self) -> f64 {
        self.coordinates.y()
    }

    pub fn lon(&self) -> f64 {
        self.coordinates.x()
    }
}

impl From<&gpx::Waypoint> for TrackPoint {
    fn from(wp: &gpx::Waypoint) -> Self {
        Self {
            coordinates: wp.point(),
            elevation: wp.elevation,
            time: wp
                .time
                .as_ref()
                .and_then(|t| t.format().ok())
                .and_then(|s| OffsetDateTime::parse(&s, &Rfc3339).ok()),
        }
    }
}

/// Location used on the Overpass `around` filter
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<&TrackPoint> for Location {
    fn from(tp: &TrackPoint) -> Self {
        Self::new(tp.lat(), tp.lon())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.lat, self.lon)
    }
}
