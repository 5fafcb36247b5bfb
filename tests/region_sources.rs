use std::path::{Path, PathBuf};

use georegion::{Crs, Region, RegionError, RowLookup};

fn fixture(filename: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(filename)
}

fn lookup() -> RowLookup {
    RowLookup::default()
        .with_id_column("region_id")
        .with_name_column("region_name")
}

fn regions() -> String {
    fixture("regions.geojson").display().to_string()
}

#[test]
fn single_feature_file() {
    let region = Region::from_vector_file(
        fixture("square.geojson"),
        "EPSG:32633",
        Some("field 7".to_string()),
    )
    .unwrap();
    assert_eq!(region.bounds(), [500000.0, 4000000.0, 500100.0, 4000100.0]);
    assert_eq!(region.name(), Some("field 7"));
    assert_eq!(region.crs(), &Crs::from_epsg(32633).unwrap());
}

#[test]
fn two_feature_file() {
    match Region::from_vector_file(fixture("two_squares.geojson"), "EPSG:4326", None) {
        Err(RegionError::MultiFeature { path, count }) => {
            assert!(path.ends_with("two_squares.geojson"));
            assert_eq!(count, 2);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn empty_feature_file() {
    match Region::from_vector_file(fixture("empty.geojson"), "EPSG:4326", None) {
        Err(RegionError::MultiFeature { path, count }) => {
            assert!(path.ends_with("empty.geojson"));
            assert_eq!(count, 0);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn line_file() {
    match Region::from_vector_file(fixture("line.geojson"), "EPSG:4326", None) {
        Err(RegionError::UnsupportedGeometry(name)) => assert_eq!(name, "LINESTRING"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn missing_vector_file() {
    let result = Region::from_vector_file(fixture("nowhere.geojson"), "EPSG:4326", None);
    assert!(matches!(result, Err(RegionError::Unreadable { .. })));
}

#[test]
fn raster_outline() {
    let region = Region::from_raster_bounds(fixture("tile.vrt"), None).unwrap();
    assert_eq!(region.bounds(), [500000.0, 3999970.0, 500040.0, 4000000.0]);
    assert_eq!(region.crs(), &Crs::from_epsg(32633).unwrap());
    assert_eq!(region.name(), None);

    let first = region.polygon().exterior().0[0];
    assert_eq!((first.x, first.y), (500000.0, 4000000.0));

    let json = region.to_json(true).unwrap();
    let back = Region::from_json(&json).unwrap();
    assert_eq!(back, region);
}

#[test]
fn missing_raster() {
    let result = Region::from_raster_bounds(fixture("nowhere.tif"), None);
    assert!(matches!(result, Err(RegionError::Unreadable { .. })));
}

#[test]
fn row_with_name() {
    let region = Region::from_db_row(1, "regions", &regions(), &lookup()).unwrap();
    assert_eq!(region.name(), Some("west"));
    assert_eq!(region.bounds(), [10.0, 50.0, 11.0, 51.0]);
    assert!(region.crs().is_geographic());
    assert!(region.properties().is_empty());
}

#[test]
fn row_with_single_member_multipolygon() {
    let region = Region::from_db_row(2, "regions", &regions(), &lookup()).unwrap();
    assert_eq!(region.name(), Some("east"));
    assert_eq!(region.bounds(), [12.0, 50.0, 13.0, 51.0]);
}

#[test]
fn row_with_null_name() {
    let region = Region::from_db_row(3, "regions", &regions(), &lookup()).unwrap();
    assert_eq!(region.name(), None);

    let unnamed = RowLookup::default().with_id_column("region_id");
    let region = Region::from_db_row(1, "regions", &regions(), &unnamed).unwrap();
    assert_eq!(region.name(), None);
}

#[test]
fn missing_row() {
    match Region::from_db_row(99, "regions", &regions(), &lookup()) {
        Err(RegionError::NotFound { table, id }) => {
            assert_eq!(table, "regions");
            assert_eq!(id, 99);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn hostile_id_column_matches_nothing() {
    let hostile = RowLookup::default().with_id_column("region_id = 1 OR 1");
    assert!(Region::from_db_row(1, "regions", &regions(), &hostile).is_err());
}

#[test]
fn missing_table() {
    assert!(Region::from_db_row(1, "parcels", &regions(), &lookup()).is_err());
}
