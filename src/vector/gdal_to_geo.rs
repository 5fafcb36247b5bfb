use gdal_sys::{OGRGeometryH, OGRwkbGeometryType};
use std::ffi::c_int;

use crate::errors::{RegionError, Result};
use crate::utils::_string;
use crate::vector::Geometry;

impl TryFrom<&Geometry> for geo_types::Geometry<f64> {
    type Error = RegionError;

    fn try_from(geo: &Geometry) -> Result<geo_types::Geometry<f64>> {
        unsafe { c_geometry_to_geo(geo.c_geometry()) }
    }
}

impl TryFrom<Geometry> for geo_types::Geometry<f64> {
    type Error = RegionError;

    fn try_from(geo: Geometry) -> Result<geo_types::Geometry<f64>> {
        geo_types::Geometry::try_from(&geo)
    }
}

unsafe fn sub_geometries(c_geom: OGRGeometryH) -> impl Iterator<Item = OGRGeometryH> {
    let count = gdal_sys::OGR_G_GetGeometryCount(c_geom);
    (0..count).map(move |n| gdal_sys::OGR_G_GetGeometryRef(c_geom, n))
}

unsafe fn coords(c_geom: OGRGeometryH) -> Vec<geo_types::Coord<f64>> {
    let count = gdal_sys::OGR_G_GetPointCount(c_geom);
    (0..count)
        .map(|i: c_int| {
            let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
            gdal_sys::OGR_G_GetPoint(c_geom, i, &mut x, &mut y, &mut z);
            geo_types::Coord { x, y }
        })
        .collect()
}

unsafe fn polygon(c_geom: OGRGeometryH) -> geo_types::Polygon<f64> {
    let mut rings = sub_geometries(c_geom).map(|ring| geo_types::LineString(coords(ring)));
    let exterior = rings.next().unwrap_or_else(|| geo_types::LineString(vec![]));
    geo_types::Polygon::new(exterior, rings.collect())
}

/// Converts a borrowed OGR geometry. Curved and unknown types are rejected.
unsafe fn c_geometry_to_geo(c_geom: OGRGeometryH) -> Result<geo_types::Geometry<f64>> {
    let geometry_type = gdal_sys::OGR_GT_Flatten(gdal_sys::OGR_G_GetGeometryType(c_geom));
    let geometry = match geometry_type {
        OGRwkbGeometryType::wkbPoint => {
            let (mut x, mut y, mut z) = (0.0, 0.0, 0.0);
            gdal_sys::OGR_G_GetPoint(c_geom, 0, &mut x, &mut y, &mut z);
            geo_types::Geometry::Point(geo_types::Point::new(x, y))
        }
        OGRwkbGeometryType::wkbLineString | OGRwkbGeometryType::wkbLinearRing => {
            geo_types::Geometry::LineString(geo_types::LineString(coords(c_geom)))
        }
        OGRwkbGeometryType::wkbPolygon => geo_types::Geometry::Polygon(polygon(c_geom)),
        OGRwkbGeometryType::wkbMultiPoint => {
            let points = sub_geometries(c_geom)
                .filter_map(|p| coords(p).first().copied().map(geo_types::Point))
                .collect();
            geo_types::Geometry::MultiPoint(geo_types::MultiPoint(points))
        }
        OGRwkbGeometryType::wkbMultiLineString => {
            let strings = sub_geometries(c_geom)
                .map(|s| geo_types::LineString(coords(s)))
                .collect();
            geo_types::Geometry::MultiLineString(geo_types::MultiLineString(strings))
        }
        OGRwkbGeometryType::wkbMultiPolygon => {
            let polygons = sub_geometries(c_geom).map(|p| polygon(p)).collect();
            geo_types::Geometry::MultiPolygon(geo_types::MultiPolygon(polygons))
        }
        OGRwkbGeometryType::wkbGeometryCollection => {
            let items = sub_geometries(c_geom)
                .map(|g| c_geometry_to_geo(g))
                .collect::<Result<Vec<_>>>()?;
            geo_types::Geometry::GeometryCollection(geo_types::GeometryCollection(items))
        }
        _ => {
            return Err(RegionError::UnsupportedGeometry(_string(
                gdal_sys::OGR_G_GetGeometryName(c_geom),
            )))
        }
    };
    Ok(geometry)
}
