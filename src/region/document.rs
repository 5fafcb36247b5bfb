//! JSON documents of the form `{"properties": {...}, "crs": ..., "geometry": {...}}`.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

use super::{polygon_from_ogr, Properties, Region};
use crate::crs::Crs;
use crate::errors::*;
use crate::vector::{Geometry, ToGdal};

const RESERVED_PROPERTIES: [&str; 2] = ["polygon", "crs"];

fn malformed(msg: impl Into<String>) -> RegionError {
    RegionError::MalformedDocument(msg.into())
}

impl Region {
    /// The region as a JSON document.
    ///
    /// With `compact`, the CRS is written as `AUTHORITY:CODE` (or a PROJ
    /// string when it has no authority) instead of PROJJSON.
    ///
    /// `properties.name` is the region name. A `name` entry in the property
    /// bag is only written when the region itself has no name.
    pub fn to_dict(&self, compact: bool) -> Result<Value> {
        let mut properties: Map<String, Value> = self
            .properties
            .iter()
            .filter(|(key, _)| !RESERVED_PROPERTIES.contains(&key.as_str()))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect();
        match &self.name {
            Some(name) => {
                let name = Value::String(name.clone());
                if let Some(shadowed) = properties.insert("name".to_string(), name.clone()) {
                    if shadowed != name {
                        log::warn!("{} overrides property name={shadowed}", self);
                    }
                }
            }
            None => {
                properties.entry("name").or_insert(Value::Null);
            }
        }

        let crs = if compact {
            Value::String(self.crs.compact()?)
        } else {
            serde_json::from_str(&self.crs.to_projjson()?)?
        };
        let geometry: Value = serde_json::from_str(&self.polygon.to_gdal()?.json()?)?;

        let mut document = Map::new();
        document.insert("properties".to_string(), Value::Object(properties));
        document.insert("crs".to_string(), crs);
        document.insert("geometry".to_string(), geometry);
        Ok(Value::Object(document))
    }

    /// Reads a document produced by [`Region::to_dict`].
    ///
    /// `crs` may be a PROJJSON object or any definition string. A string
    /// `name` property becomes the region name.
    pub fn from_dict(document: &Value) -> Result<Region> {
        let document = document
            .as_object()
            .ok_or_else(|| malformed("expected a JSON object"))?;

        let geometry = match document.get("geometry") {
            Some(geometry @ Value::Object(_)) => geometry,
            Some(_) => return Err(malformed("'geometry' must be a GeoJSON object")),
            None => return Err(malformed("missing 'geometry'")),
        };
        let polygon = polygon_from_ogr(&Geometry::from_geojson(&geometry.to_string())?)?;

        let crs = match document.get("crs") {
            Some(Value::String(definition)) => Crs::from_definition(definition)?,
            Some(projjson @ Value::Object(_)) => Crs::from_projjson(projjson)?,
            Some(_) => return Err(malformed("'crs' must be a string or a PROJJSON object")),
            None => return Err(malformed("missing 'crs'")),
        };

        let mut properties: Properties = match document.get("properties") {
            Some(Value::Object(properties)) => properties
                .iter()
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
            Some(_) => return Err(malformed("'properties' must be an object")),
            None => return Err(malformed("missing 'properties'")),
        };
        let name = match properties.remove("name") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name),
            Some(_) => return Err(malformed("'name' must be a string")),
        };

        log::debug!("read region {name:?} from document");
        Ok(Region::new(polygon, crs, name).with_properties(properties))
    }

    /// Parses JSON text, or reads the file at `json` when it does not look like
    /// a JSON object.
    pub fn from_json(json: &str) -> Result<Region> {
        if json.trim_start().starts_with('{') {
            let document: Value = serde_json::from_str(json)?;
            Region::from_dict(&document)
        } else {
            Region::from_json_file(json)
        }
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Region> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let document: Value = serde_json::from_reader(reader)?;
        Region::from_dict(&document)
    }

    /// [`Region::to_dict`] rendered with 4-space indentation.
    pub fn to_json(&self, compact: bool) -> Result<String> {
        let document = self.to_dict(compact)?;
        let mut out = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"    "));
        document.serialize(&mut serializer)?;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Writes [`Region::to_json`] to `path`, replacing any existing file.
    pub fn write_json(&self, path: impl AsRef<Path>, compact: bool) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json(compact)?)?;
        log::debug!("wrote region to {}", path.as_ref().display());
        Ok(())
    }

    /// Persisting regions to a database is not supported yet.
    pub fn to_db(&self) -> Result<()> {
        Err(RegionError::NotImplemented("to_db"))
    }
}
