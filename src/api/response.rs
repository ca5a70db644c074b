//! Overpass JSON response decoding

use std::collections::BTreeMap;
use std::io::Read;

use geo::{Centroid, LineString};
use serde::Deserialize;

use super::QueryError;
use crate::element::{ElementId, ElementKind, MapElement};
use crate::track::Location;

#[derive(Debug, Deserialize)]
struct RawResponse {
    #[serde(default)]
    elements: Vec<RawElement>,
    remark: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawElement {
    #[serde(rename = "type")]
    kind: String,
    id: u64,
    lat: Option<f64>,
    lon: Option<f64>,
    #[serde(default)]
    tags: BTreeMap<String, String>,
    /// Clipped members come as `null`
    #[serde(default)]
    geometry: Vec<Option<RawCoord>>,
}

#[derive(Debug, Deserialize)]
struct RawCoord {
    lat: f64,
    lon: f64,
}

pub fn decode_str(body: &str) -> Result<Vec<MapElement>, QueryError> {
    let raw: RawResponse =
        serde_json::from_str(body).map_err(|e| QueryError::Decode(e.to_string()))?;
    convert(raw)
}

pub fn decode_reader<R: Read>(reader: R) -> Result<Vec<MapElement>, QueryError> {
    let raw: RawResponse =
        serde_json::from_reader(reader).map_err(|e| QueryError::Decode(e.to_string()))?;
    convert(raw)
}

fn convert(raw: RawResponse) -> Result<Vec<MapElement>, QueryError> {
    if let Some(remark) = raw.remark {
        return Err(QueryError::Remark(remark));
    }

    let mut elements = vec![];
    let (mut nodes, mut ways) = (0, 0);

    for rel in raw.elements {
        let kind = rel.kind.clone();
        let element = match kind.as_str() {
            "node" => parse_node(rel),
            "way" => parse_way(rel),
            other => {
                tracing::debug!("Skipping {} {}", other, rel.id);
                None
            }
        };

        if let Some(el) = element {
            match el.kind() {
                ElementKind::Node => nodes += 1,
                ElementKind::Way => ways += 1,
            }
            elements.push(el);
        }
    }

    tracing::info!(
        "Obtained {} ways and {} nodes from Overpass API",
        ways,
        nodes
    );

    Ok(elements)
}

fn parse_node(rel: RawElement) -> Option<MapElement> {
    let (lat, lon) = match (rel.lat, rel.lon) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            tracing::warn!("Skipping node {} without coordinates", rel.id);
            return None;
        }
    };

    Some(MapElement {
        id: ElementId {
            kind: ElementKind::Node,
            osm_id: rel.id,
        },
        lat,
        lon,
        tags: rel.tags,
        geometry: vec![],
    })
}

fn parse_way(rel: RawElement) -> Option<MapElement> {
    let geometry: Vec<Location> = rel
        .geometry
        .iter()
        .flatten()
        .map(|c| Location::new(c.lat, c.lon))
        .collect();

    let first = match geometry.first() {
        Some(f) => *f,
        None => {
            tracing::warn!("Skipping way {} without geometry", rel.id);
            return None;
        }
    };

    let line: LineString = geometry.iter().map(|l| (l.lon, l.lat)).collect();
    let (lat, lon) = match line.centroid() {
        Some(c) => (c.y(), c.x()),
        None => (first.lat, first.lon),
    };

    Some(MapElement {
        id: ElementId {
            kind: ElementKind::Way,
            osm_id: rel.id,
        },
        lat,
        lon,
        tags: rel.tags,
        geometry,
    })
}
