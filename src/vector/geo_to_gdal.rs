use gdal_sys::OGRwkbGeometryType;

use crate::errors::Result;
use crate::vector::{Geometry, ToGdal};

fn geometry_with_points(
    wkb_type: OGRwkbGeometryType::Type,
    points: &geo_types::LineString<f64>,
) -> Result<Geometry> {
    let mut geom = Geometry::empty(wkb_type)?;
    for (i, coordinate) in points.coords().enumerate() {
        geom.set_point_2d(i, (coordinate.x, coordinate.y));
    }
    Ok(geom)
}

impl ToGdal for geo_types::Polygon<f64> {
    fn to_gdal(&self) -> Result<Geometry> {
        let mut geom = Geometry::empty(OGRwkbGeometryType::wkbPolygon)?;
        geom.add_geometry(geometry_with_points(
            OGRwkbGeometryType::wkbLinearRing,
            self.exterior(),
        )?)?;
        for ring in self.interiors() {
            geom.add_geometry(geometry_with_points(
                OGRwkbGeometryType::wkbLinearRing,
                ring,
            )?)?;
        }
        Ok(geom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::polygon;

    #[test]
    fn polygon_to_wkt() {
        let square = polygon![
            (x: 0.0, y: 0.0),
            (x: 1.0, y: 0.0),
            (x: 1.0, y: 1.0),
            (x: 0.0, y: 1.0),
        ];
        assert_eq!(
            square.to_gdal().unwrap().wkt().unwrap(),
            "POLYGON ((0 0,1 0,1 1,0 1,0 0))"
        );
    }

    #[test]
    fn round_trip_keeps_holes() {
        let framed = polygon![
            exterior: [
                (x: 0.0, y: 0.0),
                (x: 10.0, y: 0.0),
                (x: 10.0, y: 10.0),
                (x: 0.0, y: 10.0),
            ],
            interiors: [[
                (x: 4.0, y: 4.0),
                (x: 6.0, y: 4.0),
                (x: 6.0, y: 6.0),
                (x: 4.0, y: 6.0),
            ]],
        ];
        let back = geo_types::Geometry::try_from(framed.to_gdal().unwrap()).unwrap();
        assert_eq!(back, geo_types::Geometry::Polygon(framed));
    }
}
