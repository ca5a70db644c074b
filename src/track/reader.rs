//! GPX track reader

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use gpx::Track;

use super::point::TrackPoint;
use crate::error::{Error, Result};

/// Tracks read from one or more input files
#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputTrack {
    pub tracks: Vec<Track>,
}

impl InputTrack {
    /// All the track points, segment after segment, in file order
    pub fn points(&self) -> Vec<TrackPoint> {
        self.tracks
            .iter()
            .flat_map(|trk| trk.segments.iter())
            .flat_map(|seg| seg.points.iter())
            .map(TrackPoint::from)
            .collect()
    }

    pub fn total_points(&self) -> usize {
        self.tracks
            .iter()
            .flat_map(|trk| trk.segments.iter())
            .map(|seg| seg.points.len())
            .sum()
    }

    pub fn append(&mut self, other: InputTrack) {
        self.tracks.extend(other.tracks);
    }
}

/// Parse a GPX document. `path` only names the source on errors.
pub fn read_track<R: Read>(reader: R, path: &Path) -> Result<InputTrack> {
    let doc = gpx::read(reader).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let input = InputTrack { tracks: doc.tracks };

    if input.total_points() == 0 {
        return Err(Error::Parse {
            path: path.to_path_buf(),
            reason: "no track points found".to_string(),
        });
    }

    Ok(input)
}

pub fn read_track_file(path: &Path) -> Result<InputTrack> {
    let file = File::open(path).map_err(|e| Error::Parse {
        path: path.to_path_buf(),
        reason: format!("Failed on open the file: {}", e),
    })?;

    let input = read_track(BufReader::new(file), path)?;
    tracing::info!(
        "Read {} track points from {}",
        input.total_points(),
        path.display()
    );

    Ok(input)
}

/// Read and concatenate the files in the given order
pub fn read_track_files(paths: &[PathBuf]) -> Result<InputTrack> {
    let mut input = InputTrack::default();

    for path in paths {
        input.append(read_track_file(path)?);
    }

    Ok(input)
}
