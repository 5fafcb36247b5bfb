use std::ffi::c_int;

use crate::errors::Result;
use crate::utils::_last_null_pointer_err;
use crate::vector::Geometry;

/// # Geometry operations
///
/// Delegated to OGR, which needs to be built with GEOS for them to work.
impl Geometry {
    /// Compute buffer of geometry
    ///
    /// # Arguments
    /// * `distance`: the buffer distance to be applied. Should be expressed in
    ///   the same unit as the coordinates of the geometry.
    /// * `n_quad_segs` specifies the number of segments used to approximate a
    ///   90 degree (quadrant) of curvature.
    ///
    /// See: [`OGR_G_Buffer`](https://gdal.org/api/vector_c_api.html#_CPPv412OGR_G_Buffer12OGRGeometryHdi)
    pub fn buffer(&self, distance: f64, n_quad_segs: u32) -> Result<Self> {
        let c_geom =
            unsafe { gdal_sys::OGR_G_Buffer(self.c_geometry(), distance, n_quad_segs as c_int) };
        if c_geom.is_null() {
            return Err(_last_null_pointer_err("OGR_G_Buffer"));
        };

        Ok(unsafe { Geometry::with_c_geometry(c_geom) })
    }

    /// Compute the part of `self` not covered by `other`.
    ///
    /// See: [`OGR_G_Difference`](https://gdal.org/api/vector_c_api.html#_CPPv416OGR_G_Difference12OGRGeometryH12OGRGeometryH)
    pub fn difference(&self, other: &Self) -> Result<Self> {
        let c_geom = unsafe { gdal_sys::OGR_G_Difference(self.c_geometry(), other.c_geometry()) };
        if c_geom.is_null() {
            return Err(_last_null_pointer_err("OGR_G_Difference"));
        }
        Ok(unsafe { Geometry::with_c_geometry(c_geom) })
    }

    /// Area of a polygonal geometry, 0 for everything else.
    #[cfg(test)]
    pub fn area(&self) -> f64 {
        unsafe { gdal_sys::OGR_G_Area(self.c_geometry()) }
    }
}

#[cfg(test)]
mod tests {
    use crate::vector::Geometry;

    #[test]
    #[allow(clippy::float_cmp)]
    fn difference_of_overlapping_squares() {
        let geom =
            Geometry::from_wkt("POLYGON ((0.0 10.0, 0.0 0.0, 10.0 0.0, 10.0 10.0, 0.0 10.0))")
                .unwrap();
        let other =
            Geometry::from_wkt("POLYGON ((0.0 5.0, 0.0 0.0, 5.0 0.0, 5.0 5.0, 0.0 5.0))").unwrap();

        let diff = geom.difference(&other).unwrap();

        assert_eq!(diff.area(), 75.0);
    }

    #[test]
    fn difference_of_disjoint_squares_is_the_receiver() {
        let geom =
            Geometry::from_wkt("POLYGON ((0.0 5.0, 0.0 0.0, 5.0 0.0, 5.0 5.0, 0.0 5.0))").unwrap();
        let other =
            Geometry::from_wkt("POLYGON ((15.0 15.0, 15.0 20.0, 20.0 20.0, 20.0 15.0, 15.0 15.0))")
                .unwrap();

        let diff = geom.difference(&other).unwrap();

        assert_eq!(diff.area(), 25.0);
    }

    #[test]
    fn buffer_grows_square() {
        let geom = Geometry::from_wkt("POLYGON ((0 0, 10 0, 10 10, 0 10, 0 0))").unwrap();
        let grown = geom.buffer(1.0, 30).unwrap();
        // 10x10 + four 10x1 strips + a near-circle of radius 1
        assert!(grown.area() > 140.0 + 3.13 && grown.area() < 140.0 + std::f64::consts::PI);
    }
}
