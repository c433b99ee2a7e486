use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use geojson::{GeoJson, Geometry, Value};
use serde::Deserialize;

use crate::geo::GeoPoint;

/// A candidate city for labeling. File order is significant: the label
/// placer is first-come-first-served, so earlier rows win contested screen
/// space.
#[derive(Clone, Debug, Deserialize)]
pub struct CityRecord {
    #[serde(rename = "cityLabel")]
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl CityRecord {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }
}

/// Raw geographic inputs for one map: coastline rings plus the city table
#[derive(Default)]
pub struct MapData {
    pub coastline: Vec<Vec<GeoPoint>>,
    pub cities: Vec<CityRecord>,
}

/// Load both data files, warning and continuing on failure: a missing file
/// leaves that layer empty, it never aborts the app.
pub fn load_map_data(dir: &Path) -> MapData {
    let mut data = MapData::default();

    let coastline_path = dir.join("coastline.json");
    match load_coastline(&coastline_path) {
        Ok(rings) => {
            log::info!("loaded {} coastline rings", rings.len());
            data.coastline = rings;
        }
        Err(e) => log::warn!("failed to load {}: {e:#}", coastline_path.display()),
    }

    let cities_path = dir.join("cities.csv");
    match load_cities(&cities_path) {
        Ok(cities) => {
            log::info!("loaded {} city records", cities.len());
            data.cities = cities;
        }
        Err(e) => log::warn!("failed to load {}: {e:#}", cities_path.display()),
    }

    data
}

/// Load a GeoJSON coastline file: every feature contributes its line
/// strings and polygon exterior rings as sequences of GeoPoints.
pub fn load_coastline(path: &Path) -> Result<Vec<Vec<GeoPoint>>> {
    let bytes =
        fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    parse_coastline(bytes).with_context(|| format!("parsing {}", path.display()))
}

/// Parse coastline GeoJSON from raw bytes (simd-json fast path)
pub fn parse_coastline(mut bytes: Vec<u8>) -> Result<Vec<Vec<GeoPoint>>> {
    let geojson: GeoJson = simd_json::serde::from_slice(&mut bytes)?;
    let mut rings = Vec::new();
    collect_rings(&geojson, &mut rings);
    Ok(rings)
}

fn collect_rings(geojson: &GeoJson, rings: &mut Vec<Vec<GeoPoint>>) {
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                if let Some(ref geometry) = feature.geometry {
                    collect_geometry_rings(geometry, rings);
                }
            }
        }
        GeoJson::Feature(f) => {
            if let Some(ref geometry) = f.geometry {
                collect_geometry_rings(geometry, rings);
            }
        }
        GeoJson::Geometry(geometry) => collect_geometry_rings(geometry, rings),
    }
}

fn collect_geometry_rings(geometry: &Geometry, rings: &mut Vec<Vec<GeoPoint>>) {
    // GeoJSON positions are [longitude, latitude]
    let to_ring = |coords: &[Vec<f64>]| {
        coords
            .iter()
            .filter(|c| c.len() >= 2)
            .map(|c| GeoPoint::new(c[1], c[0]))
            .collect::<Vec<_>>()
    };

    match &geometry.value {
        Value::LineString(coords) => rings.push(to_ring(coords)),
        Value::MultiLineString(lines) => {
            for coords in lines {
                rings.push(to_ring(coords));
            }
        }
        Value::Polygon(poly) => {
            if let Some(exterior) = poly.first() {
                rings.push(to_ring(exterior));
            }
        }
        Value::MultiPolygon(polygons) => {
            for poly in polygons {
                if let Some(exterior) = poly.first() {
                    rings.push(to_ring(exterior));
                }
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                collect_geometry_rings(g, rings);
            }
        }
        _ => {}
    }
}

/// Load the city table. Rows that fail to deserialize (missing fields,
/// non-numeric coordinates) are skipped silently; file order is preserved.
pub fn load_cities(path: &Path) -> Result<Vec<CityRecord>> {
    let reader = csv::Reader::from_path(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(parse_cities(reader))
}

/// Parse city records from any CSV reader
pub fn parse_cities<R: Read>(mut reader: csv::Reader<R>) -> Vec<CityRecord> {
    reader.deserialize().filter_map(|row| row.ok()).collect()
}
