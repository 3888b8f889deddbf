use std::f64::consts::PI;

const MIN_ZOOM: f64 = 0.5;
const MAX_ZOOM: f64 = 50.0;
const ZOOM_STEP: f64 = 1.5;
/// Web Mercator is undefined at the poles
const MAX_LAT: f64 = 85.0511;

/// Normalized Web Mercator y in [0, 1] (0 = north edge)
#[inline(always)]
fn mercator_y(lat: f64) -> f64 {
    let lat_rad = lat.clamp(-MAX_LAT, MAX_LAT).to_radians();
    (1.0 - (lat_rad.tan() + 1.0 / lat_rad.cos()).ln() / PI) / 2.0
}

#[inline(always)]
fn mercator_x(lon: f64) -> f64 {
    (lon + 180.0) / 360.0
}

/// Visible map area and zoom level, in braille pixels
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Center longitude (-180 to 180)
    pub center_lon: f64,
    /// Center latitude (-85 to 85)
    pub center_lat: f64,
    /// Zoom level (1.0 = whole world fits the width)
    pub zoom: f64,
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(center_lon: f64, center_lat: f64, zoom: f64, width: usize, height: usize) -> Self {
        Self {
            center_lon,
            center_lat,
            zoom,
            width,
            height,
        }
    }

    /// World view, nudged north so the populated latitudes fill the screen
    pub fn world(width: usize, height: usize) -> Self {
        Self::new(0.0, 20.0, 1.0, width, height)
    }

    fn scale(&self) -> f64 {
        self.zoom * self.width as f64
    }

    /// Pan the viewport by pixel delta
    pub fn pan(&mut self, dx: i32, dy: i32) {
        // A zero-width map has no pixel scale
        if self.width == 0 {
            return;
        }
        let degrees_per_pixel = 360.0 / self.scale();
        self.center_lon += dx as f64 * degrees_per_pixel;
        self.center_lat -= dy as f64 * degrees_per_pixel * 0.5;

        if self.center_lon > 180.0 {
            self.center_lon -= 360.0;
        } else if self.center_lon < -180.0 {
            self.center_lon += 360.0;
        }
        self.center_lat = self.center_lat.clamp(-85.0, 85.0);
    }

    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).min(MAX_ZOOM);
    }

    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).max(MIN_ZOOM);
    }

    /// Zoom in keeping the point under (px, py) fixed
    pub fn zoom_in_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, ZOOM_STEP);
    }

    pub fn zoom_out_at(&mut self, px: i32, py: i32) {
        self.zoom_at(px, py, 1.0 / ZOOM_STEP);
    }

    fn zoom_at(&mut self, px: i32, py: i32, factor: f64) {
        if self.width == 0 {
            self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
            return;
        }
        let (lon, lat) = self.unproject(px, py);
        self.zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);

        // Pan so the same location lands back under the cursor
        let (new_px, new_py) = self.project(lon, lat);
        self.pan(new_px - px, new_py - py);
    }

    /// Project a geographic coordinate (lon, lat) to pixel coordinates
    pub fn project(&self, lon: f64, lat: f64) -> (i32, i32) {
        let scale = self.scale();
        let px = (mercator_x(lon) - mercator_x(self.center_lon)) * scale + self.width as f64 / 2.0;
        let py =
            (mercator_y(lat) - mercator_y(self.center_lat)) * scale + self.height as f64 / 2.0;
        (px as i32, py as i32)
    }

    /// Pixel coordinates back to (lon, lat)
    pub fn unproject(&self, px: i32, py: i32) -> (f64, f64) {
        let scale = self.scale();
        let x = (px as f64 - self.width as f64 / 2.0) / scale + mercator_x(self.center_lon);
        let y = (py as f64 - self.height as f64 / 2.0) / scale + mercator_y(self.center_lat);

        let lon = x * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();
        (lon, lat)
    }

    /// Rough bounding box check for a projected segment
    pub fn line_might_be_visible(&self, p1: (i32, i32), p2: (i32, i32)) -> bool {
        p1.0.max(p2.0) >= 0
            && p1.0.min(p2.0) < self.width as i32
            && p1.1.max(p2.1) >= 0
            && p1.1.min(p2.1) < self.height as i32
    }

    /// Whether a geographic bounding box overlaps the screen
    pub fn bbox_visible(&self, bbox: &BoundingBox) -> bool {
        let (x0, y0) = self.project(bbox.min_lon, bbox.max_lat);
        let (x1, y1) = self.project(bbox.max_lon, bbox.min_lat);
        self.line_might_be_visible((x0, y0), (x1, y1))
    }
}

/// Geographic bounding box
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    pub fn of(points: &[(f64, f64)]) -> Option<Self> {
        let (&(lon, lat), rest) = points.split_first()?;
        let mut bbox = Self {
            min_lon: lon,
            min_lat: lat,
            max_lon: lon,
            max_lat: lat,
        };
        for &(lon, lat) in rest {
            bbox.min_lon = bbox.min_lon.min(lon);
            bbox.min_lat = bbox.min_lat.min(lat);
            bbox.max_lon = bbox.max_lon.max(lon);
            bbox.max_lat = bbox.max_lat.max(lat);
        }
        Some(bbox)
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            min_lon: self.min_lon.min(other.min_lon),
            min_lat: self.min_lat.min(other.min_lat),
            max_lon: self.max_lon.max(other.max_lon),
            max_lat: self.max_lat.max(other.max_lat),
        }
    }

    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }

    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lon + self.max_lon) / 2.0,
            (self.min_lat + self.max_lat) / 2.0,
        )
    }

    pub fn area(&self) -> f64 {
        (self.max_lon - self.min_lon) * (self.max_lat - self.min_lat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_projects_to_middle() {
        let vp = Viewport::new(0.0, 0.0, 1.0, 100, 100);
        assert_eq!(vp.project(0.0, 0.0), (50, 50));
    }

    #[test]
    fn unproject_inverts_project() {
        let vp = Viewport::new(10.0, 30.0, 2.0, 400, 200);
        let (px, py) = vp.project(-58.4, -34.6);
        let (lon, lat) = vp.unproject(px, py);
        assert!((lon - -58.4).abs() < 1.0, "lon {lon}");
        assert!((lat - -34.6).abs() < 1.0, "lat {lat}");
    }

    #[test]
    fn poles_stay_finite() {
        let vp = Viewport::world(200, 100);
        let (_, north) = vp.project(0.0, 90.0);
        let (_, south) = vp.project(0.0, -90.0);
        assert!(north < south);
    }

    #[test]
    fn pan_wraps_longitude_and_clamps_latitude() {
        let mut vp = Viewport::new(179.0, 84.0, 1.0, 100, 100);
        vp.pan(10, -100);
        assert!(vp.center_lon < 0.0);
        assert_eq!(vp.center_lat, 85.0);
    }

    #[test]
    fn zero_width_keeps_center_finite() {
        let mut vp = Viewport::world(0, 0);
        vp.pan(10, 5);
        vp.zoom_in_at(0, 0);
        vp.zoom_out_at(3, 3);
        assert_eq!((vp.center_lon, vp.center_lat), (0.0, 20.0));
        assert!((vp.zoom - 1.0).abs() < 1e-9);

        vp.width = 80;
        vp.height = 40;
        vp.pan(10, 0);
        assert!(vp.center_lon.is_finite() && vp.center_lat.is_finite());
    }

    #[test]
    fn zoom_is_bounded() {
        let mut vp = Viewport::world(100, 100);
        for _ in 0..50 {
            vp.zoom_in();
        }
        assert_eq!(vp.zoom, MAX_ZOOM);
        for _ in 0..50 {
            vp.zoom_out();
        }
        assert_eq!(vp.zoom, MIN_ZOOM);
    }

    #[test]
    fn bounding_box_of_points() {
        let bbox = BoundingBox::of(&[(1.0, 2.0), (-3.0, 5.0), (4.0, -1.0)]).unwrap();
        assert_eq!(bbox.min_lon, -3.0);
        assert_eq!(bbox.max_lat, 5.0);
        assert!(bbox.contains(0.0, 0.0));
        assert!(!bbox.contains(5.0, 0.0));
        assert!(BoundingBox::of(&[]).is_none());
    }
}
