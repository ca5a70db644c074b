
use std::path::Path;

use gpx::Gpx;

use super::aggregator::Aggregator;
use super::gpx::{write_document, write_gpx, OutputDocument};
use crate::element::{ElementId, ElementKind, MapElement};
use crate::error::Error;
use crate::track::{read_track, InputTrack, Location};
use crate::track::reader::tests::TWO_SEGMENTS;

fn input() -> Result<InputTrack, String> {
    read_track(TWO_SEGMENTS.as_bytes(), Path::new("two.gpx")).map_err(|e| e.to_string())
}

fn render(doc: OutputDocument) -> Result<(Vec<u8>, Gpx), String> {
    let mut out: Vec<u8> = vec![];
    write_gpx(doc, &mut out)?;
    let gpx = gpx::read(&out[..]).map_err(|e| e.to_string())?;

    Ok((out, gpx))
}

fn way(osm_id: u64) -> MapElement {
    MapElement {
        id: ElementId {
            kind: ElementKind::Way,
            osm_id,
        },
        lat: 51.0,
        lon: 13.1,
        tags: Default::default(),
        geometry: vec![Location::new(51.0, 13.0), Location::new(51.0, 13.2)],
    }
    .tag("highway", "track")
}

#[test]
fn aggregate_first_wins() {
    let mut agg = Aggregator::new();

    let first = vec![
        MapElement::node(1, 51.0, 13.0).tag("amenity", "bench"),
        MapElement::node(2, 51.1, 13.1),
    ];
    let second = vec![
        MapElement::node(1, 51.0, 13.0).tag("amenity", "waste_basket"),
        way(1),
        MapElement::node(3, 51.2, 13.2),
    ];

    assert_eq!(2, agg.extend(first));
    assert_eq!(2, agg.extend(second));
    assert_eq!(4, agg.len());

    let elements = agg.into_elements();
    let ids: Vec<String> = elements.iter().map(|el| el.id.to_string()).collect();
    assert_eq!(vec!["node/1", "node/2", "way/1", "node/3"], ids);
    assert_eq!(
        Some(&"bench".to_string()),
        elements[0].tags.get("amenity")
    );
}

#[test]
fn round_trip_without_elements() -> Result<(), String> {
    let original = input()?;
    let points = original.points();

    let (_, gpx) = render(OutputDocument {
        title: None,
        original_track: original,
        elements: vec![],
        way_tracks: false,
    })?;
    assert!(gpx.waypoints.is_empty());
    assert!(gpx.metadata.and_then(|m| m.name).is_none());

    let (out, _) = render(OutputDocument {
        title: None,
        original_track: input()?,
        elements: vec![],
        way_tracks: false,
    })?;
    let reread = read_track(&out[..], Path::new("out.gpx")).map_err(|e| e.to_string())?;
    assert_eq!(points, reread.points());
    assert_eq!(2, reread.tracks[0].segments.len());
    assert_eq!(Some("morning ride".to_string()), reread.tracks[0].name);

    Ok(())
}

#[test]
fn waypoints_from_elements() -> Result<(), String> {
    let elements = vec![
        MapElement::node(7, 51.051, 13.741)
            .tag("amenity", "bench")
            .tag("name", "Elbe view"),
        MapElement::node(8, 51.061, 13.751),
        way(9),
    ];

    let (_, gpx) = render(OutputDocument {
        title: Some("Benches along the Elbe".to_string()),
        original_track: input()?,
        elements,
        way_tracks: false,
    })?;

    assert_eq!(
        Some("Benches along the Elbe".to_string()),
        gpx.metadata.and_then(|m| m.name)
    );
    assert_eq!(1, gpx.tracks.len());
    assert_eq!(3, gpx.waypoints.len());

    let bench = &gpx.waypoints[0];
    assert_eq!(geo::Point::new(13.741, 51.051), bench.point());
    assert_eq!(Some("Elbe view".to_string()), bench.name);
    assert_eq!(
        Some("amenity=bench\nname=Elbe view".to_string()),
        bench.description
    );

    let unnamed = &gpx.waypoints[1];
    assert_eq!(Some("node/8".to_string()), unnamed.name);
    assert_eq!(None, unnamed.description);

    let track = &gpx.waypoints[2];
    assert_eq!(Some("way/9".to_string()), track.name);
    assert_eq!(geo::Point::new(13.1, 51.0), track.point());

    Ok(())
}

#[test]
fn way_geometries_as_tracks() -> Result<(), String> {
    let (_, gpx) = render(OutputDocument {
        title: None,
        original_track: input()?,
        elements: vec![MapElement::node(8, 51.061, 13.751), way(9)],
        way_tracks: true,
    })?;

    assert_eq!(2, gpx.waypoints.len());
    assert_eq!(2, gpx.tracks.len());

    let way_track = &gpx.tracks[1];
    assert_eq!(Some("way/9".to_string()), way_track.name);
    assert_eq!(Some("osm-way".to_string()), way_track._type);
    assert_eq!(1, way_track.segments.len());
    assert_eq!(2, way_track.segments[0].points.len());
    assert_eq!(
        geo::Point::new(13.2, 51.0),
        way_track.segments[0].points[1].point()
    );

    Ok(())
}

#[test]
fn unwritable_destination() -> Result<(), String> {
    let dir = tempfile::tempdir().map_err(|e| e.to_string())?;
    let path = dir.path().join("missing-dir").join("out.gpx");

    let res = write_document(
        OutputDocument {
            title: None,
            original_track: input()?,
            elements: vec![],
            way_tracks: false,
        },
        &path,
    );
    assert!(matches!(res, Err(Error::Write { .. })));
    assert!(!path.exists());

    Ok(())
}
