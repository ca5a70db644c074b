//! Input tracks API

pub mod point;
pub mod reader;
pub mod sampler;

pub use point::{Location, TrackPoint};
pub use reader::{read_track, read_track_file, read_track_files, InputTrack};
pub use sampler::sample_locations;
