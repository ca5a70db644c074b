//! overpass2gpx cli - Query the Overpass API along GPX tracks

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use argopt::cmd;
use tracing::level_filters::LevelFilter;

use overpass2gpx::{Config, HttpOverpass, Options, Overrides, Runner};

/// Query the Overpass API along GPX files and write the result to a GPX file.
///
/// Example: overpass2gpx -o out.gpx -q 'way["highway"][!"surface"]' in.gpx
#[cmd]
fn main(
    /// GPX files to read
    files: Vec<PathBuf>,
    /// Output GPX file
    #[opt(short, long)]
    outfile: Option<PathBuf>,
    /// Overpass API tag query, eg.: 'node["amenity"~"bench|waste_basket"]'. Repeatable
    #[opt(short, long)]
    query: Vec<String>,
    /// File with Overpass API tag queries, one per line
    #[opt(short = 'f', long)]
    queryfile: Option<PathBuf>,
    /// Title of the resulting GPX file
    #[opt(short, long)]
    name: Option<String>,
    /// Timeout of each Overpass API query in seconds. Default: 120
    #[opt(short, long)]
    timeout: Option<u32>,
    /// Distance around the track, in meters, to query the Overpass API for. Default: 20
    #[opt(short, long)]
    distance: Option<f64>,
    /// Max locations per Overpass API query, 0 for unlimited (try 500 if requests fail). Default: 0
    #[opt(short, long)]
    limit: Option<usize>,
    /// Retries if a call to the Overpass API fails. Default: 3
    #[opt(short, long)]
    retries: Option<u32>,
    /// Overpass API instance. Default: https://overpass-api.de/api/
    #[opt(short, long)]
    url: Option<String>,
    /// Only print the Overpass API queries
    #[opt(long)]
    dry_run: bool,
    /// Also write the ways geometries as tracks
    #[opt(long)]
    way_tracks: bool,
    /// Defaults configuration. Default: .overpass2gpx.yaml, ~/.overpass2gpx.yaml
    #[opt(long)]
    config: Option<PathBuf>,
    /// Print debugging information, twice to be more verbose
    #[opt(short, long, parse(from_occurrences))]
    verbose: u8,
) {
    init_logging(verbose);

    let opts = Options {
        files,
        outfile,
        queries: query,
        queryfile,
        name,
        dry_run,
        way_tracks,
    };

    let overrides = Overrides {
        url,
        timeout,
        distance,
        limit,
        retries,
    };

    let res = Config::load(config.as_deref(), &config_candidates()).and_then(|conf| {
        let conf = conf.with_overrides(overrides);
        let api = HttpOverpass::new(&conf.url, conf.timeout);
        Runner::new(api, conf).run(&opts)
    });

    match res {
        Ok(summary) if dry_run => {
            tracing::info!("Dry run, {} queries not sent", summary.batches);
        }
        Ok(summary) => {
            tracing::info!(
                "Wrote {} elements from {} queries",
                summary.elements,
                summary.batches
            );
        }
        Err(e) => {
            tracing::error!("{}", e);
            process::exit(1);
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();
}

/// Config files looked up when none is given
fn config_candidates() -> Vec<PathBuf> {
    let mut options = vec![PathBuf::from(".overpass2gpx.yaml")];

    if let Some(home) = dirs::home_dir() {
        options.push(home.join(".overpass2gpx.yaml"));
    }

    options
}
