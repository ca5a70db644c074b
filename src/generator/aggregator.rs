//! Results aggregation across batches

use std::collections::HashSet;

use crate::element::{ElementId, MapElement};

/// Collects the elements of every batch, keeping the first
/// occurrence of each id in insertion order
#[derive(Default)]
pub struct Aggregator {
    seen: HashSet<ElementId>,
    elements: Vec<MapElement>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the elements of a batch, returns how many were new
    pub fn extend(&mut self, elements: Vec<MapElement>) -> usize {
        let mut added = 0;

        for el in elements {
            if !self.seen.insert(el.id) {
                tracing::debug!("Skipping previously obtained {}", el.id);
                continue;
            }

            tracing::trace!("Adding new {}", el.id);
            self.elements.push(el);
            added += 1;
        }

        added
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn into_elements(self) -> Vec<MapElement> {
        self.elements
    }
}
