//! Map elements returned by the Overpass API

use std::collections::BTreeMap;
use std::fmt;

use crate::track::Location;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Node,
    Way,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Node => write!(f, "node"),
            ElementKind::Way => write!(f, "way"),
        }
    }
}

/// OSM id qualified by the element type, eg.: `node/123`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId {
    pub kind: ElementKind,
    pub osm_id: u64,
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.osm_id)
    }
}

/// Node or way found near the track
#[derive(Clone, Debug, PartialEq)]
pub struct MapElement {
    pub id: ElementId,
    /// Node position, or the way geometry centroid
    pub lat: f64,
    pub lon: f64,
    pub tags: BTreeMap<String, String>,
    /// Way member coordinates. Empty for nodes
    pub geometry: Vec<Location>,
}

impl MapElement {
    pub fn node(osm_id: u64, lat: f64, lon: f64) -> Self {
        Self {
            id: ElementId {
                kind: ElementKind::Node,
                osm_id,
            },
            lat,
            lon,
            tags: BTreeMap::new(),
            geometry: vec![],
        }
    }

    pub fn kind(&self) -> ElementKind {
        self.id.kind
    }

    pub fn tag(mut self, key: &str, value: &str) -> Self {
        self.tags.insert(key.to_string(), value.to_string());

        self
    }

    /// Tags as `key=value` lines, sorted by key
    pub fn tags_description(&self) -> Option<String> {
        if self.tags.is_empty() {
            return None;
        }

        let lines: Vec<String> = self
            .tags
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();

        Some(lines.join("\n"))
    }

    /// The `name` tag, falling back to the element id
    pub fn display_name(&self) -> String {
        match self.tags.get("name") {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => self.id.to_string(),
        }
    }
}
