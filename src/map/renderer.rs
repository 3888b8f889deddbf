use crate::braille::BrailleCanvas;
use crate::map::colors::ColorAxis;
use crate::map::geometry::{draw_line, fill_rings, ring_contains};
use crate::map::projection::{BoundingBox, Viewport};
use crate::map::spatial::FeatureGrid;
use crate::view::MapData;
use ratatui::style::Color;
use rayon::prelude::*;

/// A geographic line (sequence of lon/lat coordinates)
pub type LineString = Vec<(f64, f64)>;

/// Grid cell size for country hit-testing, in degrees
const COUNTRY_GRID_DEGREES: f64 = 10.0;

/// Level of detail for map data
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lod {
    Low,    // 110m - world view
    Medium, // 50m - continental
    High,   // 10m - regional
}

impl Lod {
    pub fn from_zoom(zoom: f64) -> Self {
        if zoom < 2.0 {
            Lod::Low
        } else if zoom < 8.0 {
            Lod::Medium
        } else {
            Lod::High
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Lod::Low => "110m",
            Lod::Medium => "50m",
            Lod::High => "10m",
        }
    }
}

/// Outline of one country, located by name
#[derive(Clone, Debug)]
pub struct CountryShape {
    pub name: String,
    /// Other names the shape answers to (long name, admin name)
    pub aliases: Vec<String>,
    /// Exterior and interior rings; filled with the even-odd rule
    pub rings: Vec<LineString>,
    pub bbox: BoundingBox,
}

impl CountryShape {
    /// `None` when there is no ring with at least three points
    pub fn new(name: &str, aliases: Vec<String>, rings: Vec<LineString>) -> Option<Self> {
        let rings: Vec<LineString> = rings.into_iter().filter(|r| r.len() >= 3).collect();
        let bbox = rings
            .iter()
            .filter_map(|r| BoundingBox::of(r))
            .reduce(|a, b| a.union(&b))?;
        Some(Self {
            name: name.to_string(),
            aliases,
            rings,
            bbox,
        })
    }

    /// Case-insensitive match on the name or any alias
    pub fn matches(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.bbox.contains(lon, lat)
            && self.rings.iter().filter(|r| ring_contains(r, lon, lat)).count() % 2 == 1
    }

    /// Where to put the label: centre of the largest ring's bbox
    pub fn label_anchor(&self) -> (f64, f64) {
        self.rings
            .iter()
            .filter_map(|r| BoundingBox::of(r))
            .max_by(|a, b| a.area().total_cmp(&b.area()))
            .unwrap_or(self.bbox)
            .center()
    }
}

/// Countries at one level of detail, with a hit-test index
struct CountryLayer {
    shapes: Vec<CountryShape>,
    grid: FeatureGrid,
}

impl CountryLayer {
    fn new() -> Self {
        Self {
            shapes: Vec::new(),
            grid: FeatureGrid::new(COUNTRY_GRID_DEGREES),
        }
    }

    fn reindex(&mut self) {
        self.grid = FeatureGrid::build(self.shapes.iter().map(|s| &s.bbox), COUNTRY_GRID_DEGREES);
    }

    fn find(&self, name: &str) -> Option<&CountryShape> {
        self.shapes.iter().find(|s| s.matches(name))
    }

    fn shape_at(&self, lon: f64, lat: f64) -> Option<&CountryShape> {
        if self.grid.is_empty() {
            return self.shapes.iter().find(|s| s.contains(lon, lat));
        }
        self.grid
            .query_point(lon, lat)
            .iter()
            .filter_map(|&idx| self.shapes.get(idx))
            .find(|s| s.contains(lon, lat))
    }
}

/// Display settings for map layers
#[derive(Clone, Debug)]
pub struct DisplaySettings {
    pub show_coastlines: bool,
    pub show_borders: bool,
    pub show_labels: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_coastlines: true,
            show_borders: true,
            show_labels: true,
        }
    }
}

/// One frame of the choropleth, ready to be painted
pub struct MapLayers {
    /// Coastlines and country borders
    pub outlines: BrailleCanvas,
    /// Filled countries with their colour, in map-data order
    pub fills: Vec<(Color, BrailleCanvas)>,
    /// (column, row, text) of country labels
    pub labels: Vec<(u16, u16, String)>,
}

/// Choropleth renderer with multi-resolution coastline and country data
pub struct MapRenderer {
    coastlines_low: Vec<LineString>,
    coastlines_medium: Vec<LineString>,
    coastlines_high: Vec<LineString>,
    countries_low: CountryLayer,
    countries_medium: CountryLayer,
    countries_high: CountryLayer,
    pub settings: DisplaySettings,
}

impl MapRenderer {
    pub fn new() -> Self {
        Self {
            coastlines_low: Vec::new(),
            coastlines_medium: Vec::new(),
            coastlines_high: Vec::new(),
            countries_low: CountryLayer::new(),
            countries_medium: CountryLayer::new(),
            countries_high: CountryLayer::new(),
            settings: DisplaySettings::default(),
        }
    }

    /// Coastlines for the given LOD, falling back to coarser data
    fn get_coastlines(&self, lod: Lod) -> &[LineString] {
        match lod {
            Lod::High if !self.coastlines_high.is_empty() => &self.coastlines_high,
            Lod::High | Lod::Medium if !self.coastlines_medium.is_empty() => {
                &self.coastlines_medium
            }
            _ => &self.coastlines_low,
        }
    }

    /// Countries for the given LOD, falling back to whatever is loaded
    fn get_countries(&self, lod: Lod) -> &CountryLayer {
        let preference = match lod {
            Lod::High => [&self.countries_high, &self.countries_medium, &self.countries_low],
            Lod::Medium => [&self.countries_medium, &self.countries_low, &self.countries_high],
            Lod::Low => [&self.countries_low, &self.countries_medium, &self.countries_high],
        };
        preference
            .into_iter()
            .find(|layer| !layer.shapes.is_empty())
            .unwrap_or(&self.countries_low)
    }

    /// Render outlines, filled countries and labels for `map`
    pub fn render(
        &self,
        width: usize,
        height: usize,
        viewport: &Viewport,
        map: &MapData,
    ) -> MapLayers {
        let lod = Lod::from_zoom(viewport.zoom);
        let countries = self.get_countries(lod);
        let mut outlines = BrailleCanvas::new(width, height);

        if self.settings.show_coastlines {
            for line in self.get_coastlines(lod) {
                draw_linestring(&mut outlines, line, viewport, false);
            }
        }

        if self.settings.show_borders {
            for shape in &countries.shapes {
                if viewport.bbox_visible(&shape.bbox) {
                    for ring in &shape.rings {
                        draw_linestring(&mut outlines, ring, viewport, true);
                    }
                }
            }
        }

        let located: Vec<(&CountryShape, u32)> = map
            .entries
            .iter()
            .filter_map(|entry| countries.find(&entry.country).map(|shape| (shape, entry.value)))
            .collect();

        let fills: Vec<(Color, BrailleCanvas)> = match map.value_range() {
            Some((min, max)) => {
                let axis = ColorAxis::new(map.scale, min, max);
                located
                    .par_iter()
                    .filter(|(shape, _)| viewport.bbox_visible(&shape.bbox))
                    .map(|(shape, value)| {
                        let mut canvas = BrailleCanvas::new(width, height);
                        fill_shape(&mut canvas, shape, viewport);
                        (axis.color(*value), canvas)
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        let mut labels = Vec::new();
        if self.settings.show_labels && viewport.zoom >= 2.0 {
            for (shape, _) in &located {
                let (lon, lat) = shape.label_anchor();
                let (px, py) = viewport.project(lon, lat);
                if px < 0
                    || py < 0
                    || px as usize >= viewport.width
                    || py as usize >= viewport.height
                {
                    continue;
                }
                let col = (px / 2) as u16;
                let row = (py / 4) as u16;
                let half = (shape.name.chars().count() / 2) as u16;
                labels.push((col.saturating_sub(half), row, shape.name.clone()));
            }
        }

        MapLayers {
            outlines,
            fills,
            labels,
        }
    }

    /// The country under a geographic point at the given zoom
    pub fn country_at(&self, lon: f64, lat: f64, zoom: f64) -> Option<&CountryShape> {
        self.get_countries(Lod::from_zoom(zoom)).shape_at(lon, lat)
    }

    pub fn add_coastline(&mut self, line: LineString, lod: Lod) {
        match lod {
            Lod::Low => self.coastlines_low.push(line),
            Lod::Medium => self.coastlines_medium.push(line),
            Lod::High => self.coastlines_high.push(line),
        }
    }

    /// Add a country shape; call [`MapRenderer::reindex`] once loading is done
    pub fn add_country(&mut self, shape: CountryShape, lod: Lod) {
        match lod {
            Lod::Low => self.countries_low.shapes.push(shape),
            Lod::Medium => self.countries_medium.shapes.push(shape),
            Lod::High => self.countries_high.shapes.push(shape),
        }
    }

    /// Rebuild the hit-test indexes
    pub fn reindex(&mut self) {
        self.countries_low.reindex();
        self.countries_medium.reindex();
        self.countries_high.reindex();
    }

    pub fn has_countries(&self) -> bool {
        !self.countries_low.shapes.is_empty()
            || !self.countries_medium.shapes.is_empty()
            || !self.countries_high.shapes.is_empty()
    }

    pub fn country_count(&self, lod: Lod) -> usize {
        self.get_countries(lod).shapes.len()
    }

    pub fn toggle_coastlines(&mut self) {
        self.settings.show_coastlines = !self.settings.show_coastlines;
    }

    pub fn toggle_borders(&mut self) {
        self.settings.show_borders = !self.settings.show_borders;
    }

    pub fn toggle_labels(&mut self) {
        self.settings.show_labels = !self.settings.show_labels;
    }
}

impl Default for MapRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Draw a linestring with viewport culling; `closed` joins the last point to the first
fn draw_linestring(
    canvas: &mut BrailleCanvas,
    line: &[(f64, f64)],
    viewport: &Viewport,
    closed: bool,
) {
    if line.len() < 2 {
        return;
    }

    let first = line[0];
    let tail = if closed { Some(first) } else { None };
    let mut prev: Option<(i32, i32)> = None;

    for &(lon, lat) in line.iter().chain(tail.iter()) {
        let (px, py) = viewport.project(lon, lat);

        if let Some((prev_x, prev_y)) = prev {
            // Skip segments that wrap around the antimeridian
            let dist = ((px - prev_x).abs() + (py - prev_y).abs()) as usize;
            if dist < viewport.width && viewport.line_might_be_visible((prev_x, prev_y), (px, py)) {
                draw_line(canvas, prev_x, prev_y, px, py);
            }
        }

        prev = Some((px, py));
    }
}

fn fill_shape(canvas: &mut BrailleCanvas, shape: &CountryShape, viewport: &Viewport) {
    let projected: Vec<Vec<(i32, i32)>> = shape
        .rings
        .iter()
        .map(|ring| ring.iter().map(|&(lon, lat)| viewport.project(lon, lat)).collect())
        .collect();
    fill_rings(canvas, &projected);
}
