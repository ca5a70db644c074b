//! Output generation API

pub mod aggregator;
pub mod gpx;

#[cfg(test)]
mod tests;
