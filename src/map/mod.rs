mod colors;
mod geometry;
mod projection;
mod renderer;
mod spatial;

pub use colors::{color_at, ColorAxis};
pub use projection::{BoundingBox, Viewport};
pub use renderer::{CountryShape, DisplaySettings, LineString, Lod, MapLayers, MapRenderer};
