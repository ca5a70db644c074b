//! Overpass queries API

mod builder;

pub use builder::{QueryBatch, QueryBuilder};

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Read the tag queries of a file, one per line. Blank lines are skipped.
pub fn read_query_file(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        Error::Argument(format!(
            "Failed on read the query file `{}`: {}",
            path.display(),
            e
        ))
    })?;

    Ok(parse_queries(&content))
}

pub fn parse_queries(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .map(|l| l.to_string())
        .collect()
}

#[test]
fn queries_from_text() {
    let text = "node[\"amenity\"=\"bench\"]\n\n   \n  way[\"highway\"][!\"surface\"]  \n";
    assert_eq!(
        vec![
            "node[\"amenity\"=\"bench\"]".to_string(),
            "way[\"highway\"][!\"surface\"]".to_string()
        ],
        parse_queries(text)
    );
}
