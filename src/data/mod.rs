mod builtin;

use crate::map::{CountryShape, LineString, Lod, MapRenderer};
use anyhow::{Context, Result};
use geojson::{GeoJson, Geometry, JsonObject, Value};
use std::fs;
use std::path::Path;

pub use builtin::load_builtin_world;

/// Natural Earth coastline files and the detail level they serve
const COASTLINE_FILES: [(&str, Lod); 3] = [
    ("ne_110m_coastline.json", Lod::Low),
    ("ne_50m_coastline.json", Lod::Medium),
    ("ne_10m_coastline.json", Lod::High),
];

/// Natural Earth admin-0 country files
const COUNTRY_FILES: [(&str, Lod); 3] = [
    ("ne_110m_admin_0_countries.json", Lod::Low),
    ("ne_50m_admin_0_countries.json", Lod::Medium),
    ("ne_10m_admin_0_countries.json", Lod::High),
];

/// Feature properties that hold a country's name, primary first
const NAME_PROPERTIES: [&str; 5] = ["NAME", "ADMIN", "NAME_LONG", "SOVEREIGNT", "name"];

/// Load geography into `renderer`: Natural Earth files from `data_dir` when
/// present, otherwise the built-in coarse world. Returns the number of
/// country shapes available at world zoom.
pub fn load_world(renderer: &mut MapRenderer, data_dir: &Path) -> usize {
    if data_dir.exists() {
        load_all_geojson(renderer, data_dir);
    } else {
        tracing::info!(dir = %data_dir.display(), "no geography directory");
    }

    if !renderer.has_countries() {
        tracing::info!("using built-in coarse world");
        load_builtin_world(renderer);
    }

    renderer.reindex();
    renderer.country_count(Lod::Low)
}

/// Load every Natural Earth file found in `data_dir`; failures are logged and skipped
pub fn load_all_geojson(renderer: &mut MapRenderer, data_dir: &Path) {
    for (filename, lod) in COASTLINE_FILES {
        let path = data_dir.join(filename);
        if !path.exists() {
            continue;
        }
        match read_geojson(&path) {
            Ok(geojson) => {
                let mut count = 0;
                for_each_ring(&geojson, |line| {
                    renderer.add_coastline(line, lod);
                    count += 1;
                });
                tracing::info!(file = filename, lines = count, "loaded coastlines");
            }
            Err(e) => tracing::warn!(file = filename, error = %e, "failed to load coastlines"),
        }
    }

    for (filename, lod) in COUNTRY_FILES {
        let path = data_dir.join(filename);
        if !path.exists() {
            continue;
        }
        match read_geojson(&path) {
            Ok(geojson) => {
                let shapes = country_shapes(&geojson);
                tracing::info!(file = filename, countries = shapes.len(), "loaded countries");
                for shape in shapes {
                    renderer.add_country(shape, lod);
                }
            }
            Err(e) => tracing::warn!(file = filename, error = %e, "failed to load countries"),
        }
    }
}

fn read_geojson(path: &Path) -> Result<GeoJson> {
    let mut bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    parse_geojson(&mut bytes).with_context(|| format!("parsing {}", path.display()))
}

/// Parse GeoJSON in place with simd-json
pub fn parse_geojson(bytes: &mut [u8]) -> Result<GeoJson> {
    Ok(simd_json::serde::from_slice(bytes)?)
}

/// Build one shape per named feature of a country collection
pub fn country_shapes(geojson: &GeoJson) -> Vec<CountryShape> {
    let GeoJson::FeatureCollection(fc) = geojson else {
        return Vec::new();
    };

    fc.features
        .iter()
        .filter_map(|feature| {
            let names = feature_names(feature.properties.as_ref());
            let (name, aliases) = names.split_first()?;
            let mut rings = Vec::new();
            if let Some(geometry) = &feature.geometry {
                collect_polygon_rings(geometry, &mut rings);
            }
            CountryShape::new(name, aliases.to_vec(), rings)
        })
        .collect()
}

/// Distinct names of a feature, primary name first
fn feature_names(props: Option<&JsonObject>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for key in NAME_PROPERTIES {
        let Some(name) = props.and_then(|p| p.get(key)).and_then(|v| v.as_str()) else {
            continue;
        };
        let name = name.trim();
        if !name.is_empty() && !names.iter().any(|n| n.eq_ignore_ascii_case(name)) {
            names.push(name.to_string());
        }
    }
    names
}

/// All rings (exteriors and holes) of polygonal geometry
fn collect_polygon_rings(geometry: &Geometry, rings: &mut Vec<LineString>) {
    match &geometry.value {
        Value::Polygon(polygon) => {
            rings.extend(polygon.iter().map(|ring| to_line(ring)));
        }
        Value::MultiPolygon(polygons) => {
            for polygon in polygons {
                rings.extend(polygon.iter().map(|ring| to_line(ring)));
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                collect_polygon_rings(g, rings);
            }
        }
        _ => {}
    }
}

/// Visit every line in a GeoJSON document (polygon exteriors count as lines)
fn for_each_ring<F>(geojson: &GeoJson, mut add_line: F)
where
    F: FnMut(LineString),
{
    match geojson {
        GeoJson::FeatureCollection(fc) => {
            for feature in &fc.features {
                if let Some(geometry) = &feature.geometry {
                    geometry_lines(geometry, &mut add_line);
                }
            }
        }
        GeoJson::Feature(f) => {
            if let Some(geometry) = &f.geometry {
                geometry_lines(geometry, &mut add_line);
            }
        }
        GeoJson::Geometry(geometry) => geometry_lines(geometry, &mut add_line),
    }
}

fn geometry_lines<F>(geometry: &Geometry, add_line: &mut F)
where
    F: FnMut(LineString),
{
    match &geometry.value {
        Value::LineString(coords) => add_line(to_line(coords)),
        Value::MultiLineString(lines) => lines.iter().for_each(|l| add_line(to_line(l))),
        Value::Polygon(rings) => {
            if let Some(exterior) = rings.first() {
                add_line(to_line(exterior));
            }
        }
        Value::MultiPolygon(polygons) => {
            for exterior in polygons.iter().filter_map(|rings| rings.first()) {
                add_line(to_line(exterior));
            }
        }
        Value::GeometryCollection(geometries) => {
            for g in geometries {
                geometry_lines(g, add_line);
            }
        }
        _ => {}
    }
}

fn to_line(coords: &[Vec<f64>]) -> LineString {
    coords
        .iter()
        .filter(|c| c.len() >= 2)
        .map(|c| (c[0], c[1]))
        .collect()
}
