//! Overpass API client

use std::thread;
use std::time::{Duration, Instant};

use crate::element::MapElement;
use crate::error::{Error, Result};
use crate::query::QueryBatch;

mod http;
pub mod response;

pub use http::HttpOverpass;

/// Failure of a single request
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("HTTP status {0}")]
    Status(u16),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("invalid response: {0}")]
    Decode(String),

    #[error("remark from Overpass API: {0}")]
    Remark(String),
}

impl QueryError {
    /// Too many requests
    pub fn is_throttled(&self) -> bool {
        matches!(self, QueryError::Status(429))
    }
}

/// Overpass API endpoint
pub trait OverpassApi {
    /// Run the batch query and decode the returned elements
    fn send(&mut self, batch: &QueryBatch) -> std::result::Result<Vec<MapElement>, QueryError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct RetryPolicy {
    /// Extra tries after the first one
    pub retries: u32,
    pub delay: Duration,
    /// Delay after a HTTP 429
    pub throttle_delay: Duration,
}

/// Send the batch, trying again up to `policy.retries` times.
/// `batch_number` is 1-based and only names the batch on errors.
pub fn send_with_retries<A>(
    api: &mut A,
    batch: &QueryBatch,
    batch_number: usize,
    policy: &RetryPolicy,
) -> Result<Vec<MapElement>>
where
    A: OverpassApi + ?Sized,
{
    let tries = policy.retries.saturating_add(1);
    let mut attempt = 0;

    loop {
        attempt += 1;
        if attempt > 1 {
            tracing::debug!("Retry {} of {}", attempt - 1, policy.retries);
        }

        let start = Instant::now();
        let err = match api.send(batch) {
            Ok(elements) => {
                tracing::info!(
                    "Overpass API query took {:.1} seconds",
                    start.elapsed().as_secs_f64()
                );
                return Ok(elements);
            }
            Err(e) => e,
        };

        tracing::warn!(
            "Querying Overpass API failed in try {}/{} after {:.1} seconds: {}",
            attempt,
            tries,
            start.elapsed().as_secs_f64(),
            err
        );

        if attempt >= tries {
            return Err(Error::Query {
                batch: batch_number,
                attempts: tries,
                source: err,
            });
        }

        let delay = if err.is_throttled() {
            tracing::info!("Too many requests, delaying next request");
            policy.throttle_delay
        } else {
            policy.delay
        };
        if !delay.is_zero() {
            thread::sleep(delay);
        }
    }
}

#[cfg(test)]
pub mod tests {
    use std::collections::VecDeque;
    use std::time::Duration;

    use super::{send_with_retries, OverpassApi, QueryError, RetryPolicy};
    use crate::element::MapElement;
    use crate::error::{Error, Result};
    use crate::query::QueryBatch;
    use crate::track::Location;

    /// Fake endpoint answering with canned responses
    pub struct CannedApi {
        pub responses: VecDeque<std::result::Result<Vec<MapElement>, QueryError>>,
        pub sent: Vec<QueryBatch>,
    }

    impl CannedApi {
        pub fn new(responses: Vec<std::result::Result<Vec<MapElement>, QueryError>>) -> Self {
            Self {
                responses: responses.into(),
                sent: vec![],
            }
        }
    }

    impl OverpassApi for CannedApi {
        fn send(
            &mut self,
            batch: &QueryBatch,
        ) -> std::result::Result<Vec<MapElement>, QueryError> {
            self.sent.push(batch.clone());
            self.responses
                .pop_front()
                .unwrap_or_else(|| Err(QueryError::Transport("no more responses".to_string())))
        }
    }

    /// No waiting between tries
    pub fn immediate(retries: u32) -> RetryPolicy {
        RetryPolicy {
            retries,
            delay: Duration::ZERO,
            throttle_delay: Duration::ZERO,
        }
    }

    fn batch() -> QueryBatch {
        QueryBatch {
            locations: vec![Location::new(51.05, 13.74)],
            tag_queries: vec![r#"node["amenity"="bench"]"#.to_string()],
            radius: 20.0,
            timeout: 25,
            chunk: 0,
            offset: 0,
        }
    }

    #[test]
    fn first_try() -> Result<()> {
        let mut api = CannedApi::new(vec![Ok(vec![MapElement::node(1, 51.05, 13.74)])]);

        let elements = send_with_retries(&mut api, &batch(), 0, &immediate(0))?;
        assert_eq!(1, elements.len());
        assert_eq!(1, api.sent.len());

        Ok(())
    }

    #[test]
    fn success_after_retries() -> Result<()> {
        let mut api = CannedApi::new(vec![
            Err(QueryError::Status(504)),
            Err(QueryError::Status(429)),
            Err(QueryError::Remark("runtime error: timeout".to_string())),
            Ok(vec![MapElement::node(1, 51.05, 13.74)]),
        ]);

        let elements = send_with_retries(&mut api, &batch(), 0, &immediate(3))?;
        assert_eq!(1, elements.len());
        assert_eq!(4, api.sent.len());

        Ok(())
    }

    #[test]
    fn retries_exhausted() {
        let mut api = CannedApi::new(vec![
            Err(QueryError::Transport("connection refused".to_string())),
            Err(QueryError::Status(502)),
            Ok(vec![]),
        ]);

        let res = send_with_retries(&mut api, &batch(), 4, &immediate(1));
        match res {
            Err(Error::Query {
                batch,
                attempts,
                source: QueryError::Status(502),
            }) => {
                assert_eq!(4, batch);
                assert_eq!(2, attempts);
            }
            other => panic!("unexpected result: {:?}", other),
        }
        assert_eq!(2, api.sent.len());
    }

    #[test]
    fn max_retries() -> Result<()> {
        let mut api = CannedApi::new(vec![Ok(vec![MapElement::node(1, 51.05, 13.74)])]);

        let elements = send_with_retries(&mut api, &batch(), 1, &immediate(u32::MAX))?;
        assert_eq!(1, elements.len());
        assert_eq!(1, api.sent.len());

        Ok(())
    }

    #[test]
    fn throttled() {
        assert!(QueryError::Status(429).is_throttled());
        assert!(!QueryError::Status(500).is_throttled());
    }
}
