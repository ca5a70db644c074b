//! GPX generator API

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use geo::Point;
use gpx::{Gpx, GpxVersion, Metadata, Track, TrackSegment, Waypoint};

use crate::element::{ElementKind, MapElement};
use crate::error::{Error, Result};
use crate::track::InputTrack;

/// Everything written to the output file
pub struct OutputDocument {
    pub title: Option<String>,
    pub original_track: InputTrack,
    pub elements: Vec<MapElement>,
    /// Also write the way geometries as tracks
    pub way_tracks: bool,
}

pub struct GpxGenerator {
    pub doc: OutputDocument,
}

impl GpxGenerator {
    pub fn new(doc: OutputDocument) -> Self {
        Self { doc }
    }

    pub fn generate(self) -> Gpx {
        let mut gpx: Gpx = Default::default();
        gpx.version = GpxVersion::Gpx11;
        gpx.creator = Some("overpass2gpx".to_string());

        if let Some(title) = self.doc.title {
            let mut meta = Metadata::default();
            meta.name = Some(title);
            gpx.metadata = Some(meta);
        }

        gpx.waypoints = self.doc.elements.iter().map(element_waypoint).collect();
        gpx.tracks = self.doc.original_track.tracks;

        if self.doc.way_tracks {
            let ways = self
                .doc
                .elements
                .iter()
                .filter(|el| el.kind() == ElementKind::Way);
            for way in ways {
                gpx.tracks.push(way_track(way));
            }
        }

        gpx
    }
}

fn element_waypoint(el: &MapElement) -> Waypoint {
    let mut wp = Waypoint::new(Point::new(el.lon, el.lat));

    wp.name = Some(el.display_name());
    wp.comment = Some(el.id.to_string());
    wp.description = el.tags_description();

    wp
}

fn way_track(way: &MapElement) -> Track {
    let mut track = Track::new();
    track.name = Some(way.id.to_string());
    track.description = way.tags_description();
    track._type = Some("osm-way".to_string());

    let mut seg = TrackSegment::new();
    seg.points = way
        .geometry
        .iter()
        .map(|loc| Waypoint::new(Point::new(loc.lon, loc.lat)))
        .collect();
    track.segments.push(seg);

    track
}

pub fn write_gpx<W: Write>(doc: OutputDocument, writer: W) -> std::result::Result<(), String> {
    let gpx = GpxGenerator::new(doc).generate();
    gpx::write(&gpx, writer).map_err(|e| e.to_string())
}

/// Create the destination file and write the document on it
pub fn write_document(doc: OutputDocument, path: &Path) -> Result<()> {
    let waypoints = doc.elements.len();

    let destination = File::create(path).map_err(|e| Error::Write {
        path: path.to_path_buf(),
        reason: format!("Failed on create the destination file: {}", e),
    })?;

    let mut writer = BufWriter::new(destination);
    write_gpx(doc, &mut writer).map_err(|reason| Error::Write {
        path: path.to_path_buf(),
        reason,
    })?;
    writer.flush().map_err(|e| Error::Write {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    tracing::info!("Wrote {} waypoints to {}", waypoints, path.display());

    Ok(())
}
