use geo_types::polygon;

use super::{AxisUnit, CoordTransform, Crs};
use crate::assert_near;
use crate::errors::RegionError;
use crate::test_utils::{SuppressGDALErrorLog, TempFixture};

#[test]
fn from_definition_accepts_authority_codes() {
    let crs = Crs::from_definition("EPSG:4326").unwrap();
    assert_eq!(crs.name(), "WGS 84");
    assert_eq!(crs.authority().unwrap(), "EPSG:4326");
    assert!(crs.is_geographic());
}

#[test]
fn from_definition_accepts_proj_strings() {
    let crs = Crs::from_definition(
        "+proj=laea +lat_0=52 +lon_0=10 +x_0=4321000 +y_0=3210000 +ellps=GRS80 +units=m +no_defs",
    )
    .unwrap();
    assert!(!crs.is_geographic());
    assert_eq!(crs.axis_unit(), AxisUnit::Metre);
    // no authority, so the short form falls back to PROJ
    assert!(crs.compact().unwrap().starts_with("+proj=laea"));
}

#[test]
fn invalid_definition_is_rejected() {
    let _nolog = SuppressGDALErrorLog::new();
    let err = Crs::from_definition("not-a-crs").unwrap_err();
    match err {
        RegionError::InvalidCrs { definition, .. } => assert_eq!(definition, "not-a-crs"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(
        Crs::from_definition("  ").unwrap_err(),
        RegionError::InvalidCrs { .. }
    ));
}

const WGS84_WKT: &str = r#"GEOGCS["WGS 84",DATUM["WGS_1984",SPHEROID["WGS 84",6378137,298.257223563]],PRIMEM["Greenwich",0],UNIT["degree",0.0174532925199433],AUTHORITY["EPSG","4326"]]"#;

#[test]
fn from_definition_accepts_inline_wkt() {
    let crs = Crs::from_definition(WGS84_WKT).unwrap();
    assert_eq!(crs, Crs::from_epsg(4326).unwrap());
}

#[test]
fn definition_files_are_not_read() {
    let _nolog = SuppressGDALErrorLog::new();
    let wkt_file = TempFixture::empty("wgs84.wkt");
    std::fs::write(wkt_file.path(), WGS84_WKT).unwrap();
    let path = wkt_file.path().to_str().unwrap();

    match Crs::from_definition(path) {
        Err(RegionError::InvalidCrs { definition, .. }) => assert_eq!(definition, path),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn projjson_round_trip() {
    let crs = Crs::from_epsg(32633).unwrap();
    let projjson: serde_json::Value = serde_json::from_str(&crs.to_projjson().unwrap()).unwrap();
    assert_eq!(projjson["name"], "WGS 84 / UTM zone 33N");
    let parsed = Crs::from_projjson(&projjson).unwrap();
    assert_eq!(parsed, crs);
    assert_eq!(parsed.compact().unwrap(), "EPSG:32633");
}

#[test]
fn comparison() {
    let wgs84 = Crs::from_epsg(4326).unwrap();
    let from_proj = Crs::from_definition("+proj=longlat +datum=WGS84 +no_defs").unwrap();
    let utm = Crs::from_epsg(32633).unwrap();
    assert!(wgs84 == from_proj);
    assert!(wgs84 != utm);
    assert!(wgs84.clone() == wgs84);
}

#[test]
fn axis_units() {
    assert_eq!(Crs::from_epsg(4326).unwrap().axis_unit(), AxisUnit::Degree);
    assert_eq!(Crs::from_epsg(3857).unwrap().axis_unit(), AxisUnit::Metre);
    // NAD83 / Texas North Central (ftUS)
    match Crs::from_epsg(2276).unwrap().axis_unit() {
        AxisUnit::Other(name) => assert!(name.to_lowercase().contains("foot")),
        unit => panic!("unexpected unit {unit}"),
    }
}

#[test]
fn transform_uses_xy_order() {
    let wgs84 = Crs::from_epsg(4326).unwrap();
    let web_mercator = Crs::from_epsg(3857).unwrap();
    let transform = CoordTransform::new(&wgs84, &web_mercator).unwrap();
    let mut xs = [10.0];
    let mut ys = [0.0];
    transform.transform_coords(&mut xs, &mut ys).unwrap();
    assert_near!(xs[0], 1113194.9079327357, epsilon = 1e-6);
    assert_near!(ys[0], 0.0, epsilon = 1e-6);
}

#[test]
fn transform_polygon_keeps_rings() {
    let wgs84 = Crs::from_epsg(4326).unwrap();
    let web_mercator = Crs::from_epsg(3857).unwrap();
    let transform = CoordTransform::new(&web_mercator, &wgs84).unwrap();
    let square = polygon![
        exterior: [
            (x: 0.0, y: 0.0),
            (x: 1113194.9079327357, y: 0.0),
            (x: 1113194.9079327357, y: 1118889.9748579594),
            (x: 0.0, y: 1118889.9748579594),
            (x: 0.0, y: 0.0),
        ],
        interiors: [[
            (x: 100.0, y: 100.0),
            (x: 200.0, y: 100.0),
            (x: 200.0, y: 200.0),
            (x: 100.0, y: 100.0),
        ]],
    ];
    let lonlat = transform.transform_polygon(&square).unwrap();
    assert_eq!(lonlat.exterior().0.len(), 5);
    assert_eq!(lonlat.interiors().len(), 1);
    assert_near!(lonlat.exterior().0[2].x, 10.0, epsilon = 1e-7);
    assert_near!(lonlat.exterior().0[2].y, 10.0, epsilon = 1e-7);
}

#[test]
fn failing_transformation() {
    let _nolog = SuppressGDALErrorLog::new();
    let wgs84 = Crs::from_epsg(4326).unwrap();
    let web_mercator = Crs::from_epsg(3857).unwrap();
    let transform = CoordTransform::new(&wgs84, &web_mercator).unwrap();

    let mut xs = [1000000.0];
    let mut ys = [1000000.0];
    let r = transform.transform_coords(&mut xs, &mut ys);

    match r.unwrap_err() {
        RegionError::InvalidCoordinateRange { from, to, .. } => {
            assert_eq!(from, "EPSG:4326");
            assert_eq!(to, "EPSG:3857");
        }
        other => panic!("Wrong error type: {other:?}"),
    }
}

#[test]
fn transformation_between_crs_without_authority() {
    let laea = Crs::from_definition(
        "+proj=laea +lat_0=52 +lon_0=10 +x_0=4321000 +y_0=3210000 +ellps=GRS80 +units=m +no_defs",
    )
    .unwrap();
    let shifted = Crs::from_definition(
        "+proj=laea +lat_0=52 +lon_0=10 +x_0=0 +y_0=0 +ellps=GRS80 +units=m +no_defs",
    )
    .unwrap();
    let transform = CoordTransform::new(&laea, &shifted).unwrap();

    let mut xs = [4321000.0];
    let mut ys = [3210000.0];
    transform.transform_coords(&mut xs, &mut ys).unwrap();
    assert_near!(xs[0], 0.0, epsilon = 1e-6);
    assert_near!(ys[0], 0.0, epsilon = 1e-6);
}
