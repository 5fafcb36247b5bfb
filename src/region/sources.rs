use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{polygon_from_ogr, Region};
use crate::dataset::Dataset;
use crate::errors::*;
use crate::vector::Layer;
use crate::vsi;

/// Column names used by [`Region::from_db_row`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowLookup {
    pub id_column: String,
    pub geometry_column: String,
    /// Column holding the region name. Regions are unnamed when `None`.
    pub name_column: Option<String>,
}

impl Default for RowLookup {
    fn default() -> Self {
        RowLookup {
            id_column: "id".to_string(),
            geometry_column: "geometry".to_string(),
            name_column: None,
        }
    }
}

impl RowLookup {
    pub fn with_id_column(mut self, column: impl Into<String>) -> Self {
        self.id_column = column.into();
        self
    }

    pub fn with_geometry_column(mut self, column: impl Into<String>) -> Self {
        self.geometry_column = column.into();
        self
    }

    pub fn with_name_column(mut self, column: impl Into<String>) -> Self {
        self.name_column = Some(column.into());
        self
    }

    /// `WHERE` clause matching `id`. The column is always quoted, so it is
    /// never parsed as anything but an identifier.
    fn id_filter(&self, id: i64) -> Result<String> {
        Ok(format!("{} = {id}", quote_identifier(&self.id_column)?))
    }

    /// Index of the geometry column, falling back to a layer's only unnamed
    /// geometry field (GeoJSON, shapefiles).
    fn geometry_field(&self, layer: &Layer<'_>) -> Result<usize> {
        if let Some(idx) = layer.geom_field_index(&self.geometry_column)? {
            return Ok(idx);
        }
        if layer.geom_field_count() == 1 && layer.geom_field_name(0).is_empty() {
            log::debug!(
                "no geometry column '{}' in '{}', using its only geometry field",
                self.geometry_column,
                layer.name()
            );
            return Ok(0);
        }
        Err(RegionError::InvalidIdentifier(self.geometry_column.clone()))
    }
}

fn quote_identifier(name: &str) -> Result<String> {
    if name.is_empty() || name.contains('\0') {
        return Err(RegionError::InvalidIdentifier(name.to_string()));
    }
    Ok(format!("\"{}\"", name.replace('"', "\"\"")))
}

impl Region {
    /// Reads the only feature of the first layer in a vector dataset.
    ///
    /// `crs` is the CRS of the coordinates in the file; the file's own CRS is
    /// not consulted.
    pub fn from_vector_file(
        path: impl AsRef<Path>,
        crs: &str,
        name: Option<String>,
    ) -> Result<Region> {
        let path = path.as_ref();
        let multi_feature = |count| RegionError::MultiFeature {
            path: path.display().to_string(),
            count,
        };

        let dataset = Dataset::open_vector(path)?;
        let layer = dataset.layer(0)?;
        let count = layer.feature_count();
        log::debug!("{} has {count} feature(s)", path.display());
        if count != 1 {
            return Err(multi_feature(count));
        }
        let feature = layer.next_feature().ok_or_else(|| multi_feature(0))?;
        let geometry = feature
            .geometry_by_index(0)?
            .ok_or_else(|| RegionError::UnsupportedGeometry("NULL".to_string()))?;

        Region::from_polygon(polygon_from_ogr(&geometry)?, crs, name)
    }

    /// Looks up row `id` of `table` in any OGR datasource, e.g. a PostGIS
    /// connection string such as `PG:dbname=gis host=localhost`.
    ///
    /// The region takes the CRS of the geometry column.
    pub fn from_db_row(
        id: i64,
        table: &str,
        connection: &str,
        lookup: &RowLookup,
    ) -> Result<Region> {
        let dataset = Dataset::open_vector(Path::new(connection))?;
        let layer = dataset.layer_by_name(table)?;
        let geom_idx = lookup.geometry_field(&layer)?;

        let filter = lookup.id_filter(id)?;
        log::debug!("querying '{table}' where {filter}");
        layer.set_attribute_filter(&filter)?;

        let feature = layer.next_feature().ok_or_else(|| RegionError::NotFound {
            table: table.to_string(),
            id,
        })?;
        let geometry = feature
            .geometry_by_index(geom_idx)?
            .ok_or_else(|| RegionError::UnsupportedGeometry("NULL".to_string()))?;
        let crs = layer
            .geom_field_crs(geom_idx)?
            .ok_or_else(|| RegionError::InvalidCrs {
                definition: String::new(),
                msg: format!("geometry column of '{table}' has no CRS"),
            })?;
        let name = match &lookup.name_column {
            Some(column) => feature.field_as_string(column)?,
            None => None,
        };

        Ok(Region::new(polygon_from_ogr(&geometry)?, crs, name))
    }

    /// The outline of a raster, in the raster's CRS.
    ///
    /// With a `blob_connection` string, `path` names a `<container>/<blob>` in
    /// Azure blob storage which is downloaded to a temporary file first. The
    /// download is removed again once the bounds are read.
    pub fn from_raster_bounds(
        path: impl AsRef<Path>,
        blob_connection: Option<&str>,
    ) -> Result<Region> {
        let download = match blob_connection {
            Some(connection) => Some(vsi::fetch_blob(
                &path.as_ref().to_string_lossy(),
                connection,
            )?),
            None => None,
        };
        let path: &Path = download.as_deref().unwrap_or(path.as_ref());

        let dataset = Dataset::open_raster(path)?;
        let bounds = dataset.raster_bounds()?;
        let crs = dataset.spatial_ref()?;
        log::debug!("{} covers {bounds:?} in {crs}", path.display());

        Ok(Region::new(bounds.to_polygon(), crs, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_are_quoted() {
        assert_eq!(quote_identifier("id").unwrap(), "\"id\"");
        assert_eq!(
            quote_identifier("id\" = 1 OR \"x").unwrap(),
            "\"id\"\" = 1 OR \"\"x\""
        );
        assert!(matches!(
            quote_identifier(""),
            Err(RegionError::InvalidIdentifier(_))
        ));
    }

    #[test]
    fn id_filter_uses_typed_id() {
        let lookup = RowLookup::default().with_id_column("region_id");
        assert_eq!(lookup.id_filter(-7).unwrap(), "\"region_id\" = -7");
    }

    #[test]
    fn lookup_defaults_fill_missing_keys() {
        let lookup: RowLookup = serde_json::from_str(r#"{"name_column": "label"}"#).unwrap();
        assert_eq!(
            lookup,
            RowLookup::default().with_name_column("label")
        );
    }
}
