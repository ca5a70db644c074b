//! Query locations sampling

use super::point::{Location, TrackPoint};

/// Reduce the track points to the unique locations, keeping the
/// first occurrence of each one
pub fn sample_locations(points: &[TrackPoint]) -> Vec<Location> {
    let mut locations: Vec<Location> = Vec::with_capacity(points.len());

    // f64 is not Hash, compare the bit patterns
    let mut seen = std::collections::HashSet::with_capacity(points.len());

    for tp in points {
        let loc = Location::from(tp);
        if seen.insert((loc.lat.to_bits(), loc.lon.to_bits())) {
            locations.push(loc);
        }
    }

    tracing::debug!(
        "Sampled {} locations from {} track points",
        locations.len(),
        points.len()
    );

    locations
}
