//! Overpass API over HTTP

use std::time::Duration;

use ureq::Agent;

use super::{response, OverpassApi, QueryError};
use crate::element::MapElement;
use crate::query::QueryBatch;

/// Extra time, over the server side timeout, before giving up on a request
const TIMEOUT_MARGIN: Duration = Duration::from_secs(10);

pub struct HttpOverpass {
    url: String,
    agent: Agent,
}

impl HttpOverpass {
    /// `url` is the API instance, eg.: `https://overpass-api.de/api/`
    pub fn new(url: &str, timeout: u32) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(timeout.into()) + TIMEOUT_MARGIN))
            .build();
        let agent: Agent = config.into();

        HttpOverpass {
            agent,
            url: interpreter_url(url),
        }
    }
}

impl OverpassApi for HttpOverpass {
    fn send(&mut self, batch: &QueryBatch) -> Result<Vec<MapElement>, QueryError> {
        let query = batch.to_query();

        let mut resp = self
            .agent
            .post(&self.url)
            .send_form([("data", query.as_str())])
            .map_err(|e| match e {
                ureq::Error::StatusCode(code) => QueryError::Status(code),
                e => QueryError::Transport(e.to_string()),
            })?;

        response::decode_reader(resp.body_mut().as_reader())
    }
}

/// The `interpreter` endpoint of an API instance
pub fn interpreter_url(url: &str) -> String {
    let url = url.trim();
    if url.trim_end_matches('/').ends_with("interpreter") {
        return url.to_string();
    }

    format!("{}/interpreter", url.trim_end_matches('/'))
}

#[test]
fn endpoints() {
    assert_eq!(
        "https://overpass-api.de/api/interpreter",
        interpreter_url("https://overpass-api.de/api/")
    );
    assert_eq!(
        "https://overpass-api.de/api/interpreter",
        interpreter_url("https://overpass-api.de/api")
    );
    assert_eq!(
        "http://localhost:12345/api/interpreter",
        interpreter_url("http://localhost:12345/api/interpreter")
    );
}
