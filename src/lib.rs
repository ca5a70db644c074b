//! overpass2gpx - Query the Overpass API along GPX tracks

pub mod api;
pub mod config;
pub mod element;
pub mod error;
mod generator;
pub mod query;
pub mod runner;
pub mod track;

pub use api::{send_with_retries, HttpOverpass, OverpassApi, QueryError, RetryPolicy};
pub use config::{Config, Overrides};
pub use element::{ElementId, ElementKind, MapElement};
pub use error::{Error, Result};
pub use generator::aggregator::Aggregator;
pub use generator::gpx::{write_document, write_gpx, GpxGenerator, OutputDocument};
pub use query::{QueryBatch, QueryBuilder};
pub use runner::{Options, Runner, Summary};
pub use track::{read_track_file, read_track_files, sample_locations, InputTrack, Location, TrackPoint};
