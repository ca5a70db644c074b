//! Overpass query builder

use crate::track::Location;

/// One Overpass API request
#[derive(Clone, Debug, PartialEq)]
pub struct QueryBatch {
    pub locations: Vec<Location>,
    pub tag_queries: Vec<String>,
    /// Search radius in meters
    pub radius: f64,
    /// Server side timeout in seconds
    pub timeout: u32,
    /// Index of the locations chunk
    pub chunk: usize,
    /// Position of the first location on the whole sampled set
    pub offset: usize,
}

impl QueryBatch {
    /// Render the Overpass QL program of this batch
    pub fn to_query(&self) -> String {
        let latlon: Vec<String> = self.locations.iter().map(|l| l.to_string()).collect();
        let latlon = latlon.join(",");

        let mut query = format!("[out:json][timeout:{}];\n(\n", self.timeout);
        for tq in &self.tag_queries {
            query.push_str(&format!("    {}(around:{},{});\n", tq, self.radius, latlon));
        }
        query.push_str(");\nout geom;");

        query
    }
}

pub struct QueryBuilder {
    pub tag_queries: Vec<String>,
    pub radius: f64,
    /// Max locations per batch, 0 for unlimited
    pub limit: usize,
    pub timeout: u32,
}

impl QueryBuilder {
    pub fn new(tag_queries: Vec<String>, radius: f64, limit: usize, timeout: u32) -> Self {
        Self {
            tag_queries,
            radius,
            limit,
            timeout,
        }
    }

    /// Split the locations in chunks and make one batch for each
    /// chunk and tag query
    pub fn build(&self, locations: &[Location]) -> Vec<QueryBatch> {
        let chunk_size = if self.limit == 0 {
            locations.len().max(1)
        } else {
            self.limit
        };

        let mut chunks: Vec<&[Location]> = locations.chunks(chunk_size).collect();
        if chunks.is_empty() {
            chunks.push(&[]);
        }

        tracing::debug!(
            "Building {} batches of up to {} locations for {} locations in total",
            chunks.len() * self.tag_queries.len(),
            chunk_size,
            locations.len()
        );

        let mut batches = vec![];
        for (i, chunk) in chunks.iter().enumerate() {
            for tq in &self.tag_queries {
                batches.push(QueryBatch {
                    locations: chunk.to_vec(),
                    tag_queries: vec![tq.clone()],
                    radius: self.radius,
                    timeout: self.timeout,
                    chunk: i,
                    offset: i * chunk_size,
                });
            }
        }

        batches
    }
}

#[cfg(test)]
mod tests {
    use super::{QueryBatch, QueryBuilder};
    use crate::track::Location;

    fn locations(n: usize) -> Vec<Location> {
        (0..n)
            .map(|i| Location::new(51.0 + i as f64 / 100.0, 13.5))
            .collect()
    }

    fn queries() -> Vec<String> {
        vec![
            r#"node["amenity"="bench"]"#.to_string(),
            r#"way["highway"][!"surface"]"#.to_string(),
        ]
    }

    #[test]
    fn render() {
        let batch = QueryBatch {
            locations: vec![Location::new(51.05, 13.74), Location::new(51.06, 13.75)],
            tag_queries: vec![r#"node["amenity"="bench"]"#.to_string()],
            radius: 20.0,
            timeout: 120,
            chunk: 0,
            offset: 0,
        };

        assert_eq!(
            "[out:json][timeout:120];\n(\n    node[\"amenity\"=\"bench\"](around:20,51.05,13.74,51.06,13.75);\n);\nout geom;",
            batch.to_query()
        );
    }

    #[test]
    fn unlimited() {
        let locs = locations(7);
        let batches = QueryBuilder::new(queries(), 50.0, 0, 25).build(&locs);

        assert_eq!(2, batches.len());
        for batch in &batches {
            assert_eq!(locs, batch.locations);
            assert_eq!(1, batch.tag_queries.len());
            assert_eq!(50.0, batch.radius);
            assert_eq!(25, batch.timeout);
        }
        assert_eq!(queries()[0], batches[0].tag_queries[0]);
        assert_eq!(queries()[1], batches[1].tag_queries[0]);
    }

    #[test]
    fn limited() {
        let locs = locations(7);
        let batches = QueryBuilder::new(queries(), 50.0, 3, 25).build(&locs);

        // ceil(7 / 3) chunks for each query
        assert_eq!(2 * 3, batches.len());
        assert!(batches.iter().all(|b| b.locations.len() <= 3));

        let chunks: Vec<(usize, usize)> = batches.iter().map(|b| (b.chunk, b.offset)).collect();
        assert_eq!(vec![(0, 0), (0, 0), (1, 3), (1, 3), (2, 6), (2, 6)], chunks);

        for tq in queries() {
            let joined: Vec<_> = batches
                .iter()
                .filter(|b| b.tag_queries[0] == tq)
                .flat_map(|b| b.locations.iter().copied())
                .collect();
            assert_eq!(locs, joined);
        }
    }

    #[test]
    fn limit_bigger_than_locations() {
        let locs = locations(2);
        let batches = QueryBuilder::new(queries(), 50.0, 500, 25).build(&locs);
        assert_eq!(2, batches.len());
        assert_eq!(locs, batches[0].locations);
    }
}
