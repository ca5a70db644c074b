//! Track -> queries -> elements -> GPX pipeline

use std::io::{self, Write};
use std::path::PathBuf;

use crate::api::{send_with_retries, OverpassApi};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::generator::aggregator::Aggregator;
use crate::generator::gpx::{write_document, OutputDocument};
use crate::query::{read_query_file, QueryBuilder};
use crate::track::{read_track_files, sample_locations};

/// Command line options not covered by the configuration
#[derive(Clone, Debug, Default)]
pub struct Options {
    pub files: Vec<PathBuf>,
    pub outfile: Option<PathBuf>,
    pub queries: Vec<String>,
    pub queryfile: Option<PathBuf>,
    pub name: Option<String>,
    pub dry_run: bool,
    pub way_tracks: bool,
}

impl Options {
    /// Check the options and resolve the tag queries: the inline ones
    /// first, then the query file ones
    pub fn validate(&self) -> Result<Vec<String>> {
        if self.files.is_empty() {
            return Err(Error::Argument("no input GPX file given".to_string()));
        }

        if self.queries.is_empty() && self.queryfile.is_none() {
            return Err(Error::Argument(
                "need a query (-q) or a query file (-f)".to_string(),
            ));
        }

        if self.outfile.is_none() && !self.dry_run {
            return Err(Error::Argument("need an output file (-o)".to_string()));
        }

        let mut queries: Vec<String> = self
            .queries
            .iter()
            .map(|q| q.trim().to_string())
            .filter(|q| !q.is_empty())
            .collect();

        if let Some(qf) = &self.queryfile {
            queries.extend(read_query_file(qf)?);
        }

        if queries.is_empty() {
            return Err(Error::Argument("all the given queries are empty".to_string()));
        }

        Ok(queries)
    }
}

/// What a run did
#[derive(Clone, Debug, PartialEq)]
pub struct Summary {
    pub track_points: usize,
    pub locations: usize,
    pub batches: usize,
    pub elements: usize,
}

pub struct Runner<A> {
    api: A,
    config: Config,
}

impl<A> Runner<A>
where
    A: OverpassApi,
{
    pub fn new(api: A, config: Config) -> Self {
        Self { api, config }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Run with the dry-run queries printed on stdout
    pub fn run(&mut self, opts: &Options) -> Result<Summary> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.run_with_output(opts, &mut lock)
    }

    pub fn run_with_output<W: Write>(&mut self, opts: &Options, out: &mut W) -> Result<Summary> {
        let queries = opts.validate()?;
        tracing::info!("Queries: {:?}", queries);

        let input = read_track_files(&opts.files)?;
        let points = input.points();
        let locations = sample_locations(&points);

        let builder = QueryBuilder::new(
            queries,
            self.config.distance,
            self.config.limit,
            self.config.timeout,
        );
        let batches = builder.build(&locations);

        let mut summary = Summary {
            track_points: points.len(),
            locations: locations.len(),
            batches: batches.len(),
            elements: 0,
        };

        if opts.dry_run {
            for batch in &batches {
                writeln!(out, "{}\n", batch.to_query()).map_err(|e| Error::Write {
                    path: PathBuf::from("<stdout>"),
                    reason: e.to_string(),
                })?;
            }

            return Ok(summary);
        }

        let policy = self.config.retry_policy();
        let mut aggregator = Aggregator::new();

        let chunks = batches.last().map_or(0, |b| b.chunk + 1);

        for (i, batch) in batches.iter().enumerate() {
            tracing::info!(
                "Performing Overpass API query {} of {}: chunk {} of {} for {} locations from {} to {}",
                i + 1,
                batches.len(),
                batch.chunk + 1,
                chunks,
                batch.locations.len(),
                batch.offset + 1,
                batch.offset + batch.locations.len()
            );
            tracing::trace!("Query:\n{}", batch.to_query());

            let elements = send_with_retries(&mut self.api, batch, i + 1, &policy)?;
            let added = aggregator.extend(elements);
            tracing::debug!("Batch {} added {} new elements", i + 1, added);
        }

        summary.elements = aggregator.len();

        // validate() makes sure of it outside of dry-run
        let outfile = match &opts.outfile {
            Some(o) => o,
            None => return Err(Error::Argument("need an output file (-o)".to_string())),
        };

        write_document(
            OutputDocument {
                title: opts.name.clone(),
                original_track: input,
                elements: aggregator.into_elements(),
                way_tracks: opts.way_tracks,
            },
            outfile,
        )?;

        Ok(summary)
    }
}
