use crate::view::ColorScale;
use ratatui::style::Color;

/// Sequential "reds" stops, lightest to darkest
const REDS: [(u8, u8, u8); 9] = [
    (255, 245, 240),
    (254, 224, 210),
    (252, 187, 161),
    (252, 146, 114),
    (251, 106, 74),
    (239, 59, 44),
    (203, 24, 29),
    (165, 15, 21),
    (103, 0, 13),
];

fn stops(scale: ColorScale) -> &'static [(u8, u8, u8)] {
    match scale {
        ColorScale::Reds => &REDS,
    }
}

/// Colour at position `t` in [0, 1] along the scale, linearly interpolated
pub fn color_at(scale: ColorScale, t: f64) -> Color {
    let stops = stops(scale);
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
    let pos = t * (stops.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(stops.len() - 1);
    let frac = pos - lo as f64;

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (stops[lo], stops[hi]);
    Color::Rgb(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Maps values onto a colour scale between the data's min and max
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorAxis {
    pub scale: ColorScale,
    pub min: u32,
    pub max: u32,
}

impl ColorAxis {
    pub fn new(scale: ColorScale, min: u32, max: u32) -> Self {
        Self { scale, min, max }
    }

    /// Normalized position of `value`; a single-valued axis sits at the top
    pub fn position(&self, value: u32) -> f64 {
        if self.max <= self.min {
            return 1.0;
        }
        (value.saturating_sub(self.min)) as f64 / (self.max - self.min) as f64
    }

    pub fn color(&self, value: u32) -> Color {
        color_at(self.scale, self.position(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_match_stops() {
        assert_eq!(color_at(ColorScale::Reds, 0.0), Color::Rgb(255, 245, 240));
        assert_eq!(color_at(ColorScale::Reds, 1.0), Color::Rgb(103, 0, 13));
        assert_eq!(color_at(ColorScale::Reds, 7.0), Color::Rgb(103, 0, 13));
    }

    #[test]
    fn midpoint_is_middle_stop() {
        assert_eq!(color_at(ColorScale::Reds, 0.5), Color::Rgb(251, 106, 74));
    }

    #[test]
    fn axis_spans_data_range() {
        let axis = ColorAxis::new(ColorScale::Reds, 1, 5);
        assert_eq!(axis.position(1), 0.0);
        assert_eq!(axis.position(5), 1.0);
        assert_eq!(axis.position(3), 0.5);
        assert_eq!(axis.color(5), Color::Rgb(103, 0, 13));
    }

    #[test]
    fn degenerate_axis_uses_darkest() {
        let axis = ColorAxis::new(ColorScale::Reds, 4, 4);
        assert_eq!(axis.color(4), Color::Rgb(103, 0, 13));
    }

    #[test]
    fn year_view_runner_up_is_lightest() {
        let axis = ColorAxis::new(ColorScale::Reds, 0, 1);
        assert_eq!(axis.color(0), Color::Rgb(255, 245, 240));
        assert_eq!(axis.color(1), Color::Rgb(103, 0, 13));
    }
}
