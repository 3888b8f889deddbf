use crate::braille::BrailleCanvas;

/// Draw a line using Bresenham's algorithm
pub fn draw_line(canvas: &mut BrailleCanvas, x0: i32, y0: i32, x1: i32, y1: i32) {
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    let (mut x, mut y) = (x0, y0);

    loop {
        canvas.set_pixel_signed(x, y);

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 >= dy {
            if x == x1 {
                break;
            }
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            if y == y1 {
                break;
            }
            err += dx;
            y += sy;
        }
    }
}

/// Fill a set of projected rings with the even-odd rule.
///
/// Rings are sampled at the centre of each dot row, so holes and
/// multi-part countries come out right when passed together.
pub fn fill_rings(canvas: &mut BrailleCanvas, rings: &[Vec<(i32, i32)>]) {
    let (min_y, max_y) = match rings
        .iter()
        .flatten()
        .map(|&(_, y)| y)
        .fold(None, |acc: Option<(i32, i32)>, y| match acc {
            Some((lo, hi)) => Some((lo.min(y), hi.max(y))),
            None => Some((y, y)),
        }) {
        Some(range) => range,
        None => return,
    };

    let top = min_y.max(0);
    let bottom = max_y.min(canvas.pixel_height() as i32 - 1);
    let mut crossings: Vec<f64> = Vec::new();

    for y in top..=bottom {
        let scan = y as f64 + 0.5;
        crossings.clear();

        for ring in rings {
            if ring.len() < 3 {
                continue;
            }
            let mut prev = ring[ring.len() - 1];
            for &cur in ring {
                let (y0, y1) = (prev.1 as f64, cur.1 as f64);
                if (y0 <= scan) != (y1 <= scan) {
                    let t = (scan - y0) / (y1 - y0);
                    crossings.push(prev.0 as f64 + t * (cur.0 - prev.0) as f64);
                }
                prev = cur;
            }
        }

        crossings.sort_by(|a, b| a.total_cmp(b));
        for pair in crossings.chunks_exact(2) {
            canvas.fill_span(y, pair[0].round() as i32, pair[1].round() as i32 - 1);
        }
    }
}

/// Even-odd point-in-polygon test in geographic coordinates
pub fn ring_contains(ring: &[(f64, f64)], lon: f64, lat: f64) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut prev = ring[ring.len() - 1];
    for &cur in ring {
        if (cur.1 > lat) != (prev.1 > lat) {
            let x = cur.0 + (lat - cur.1) * (prev.0 - cur.0) / (prev.1 - cur.1);
            if lon < x {
                inside = !inside;
            }
        }
        prev = cur;
    }
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_line_covers_top_row() {
        let mut canvas = BrailleCanvas::new(5, 1);
        draw_line(&mut canvas, 0, 0, 9, 0);
        assert_eq!(canvas.row_to_string(0), "⠉⠉⠉⠉⠉");
    }

    #[test]
    fn vertical_line_spans_cells() {
        let mut canvas = BrailleCanvas::new(1, 2);
        draw_line(&mut canvas, 0, 0, 0, 7);
        assert_eq!(canvas.dot_count(), 8);
    }

    #[test]
    fn square_fills_solid() {
        let mut canvas = BrailleCanvas::new(4, 2);
        let square = vec![(0, 0), (8, 0), (8, 8), (0, 8)];
        fill_rings(&mut canvas, &[square]);
        assert_eq!(canvas.dot_count(), 64);
        assert_eq!(canvas.row_to_string(0), "⣿⣿⣿⣿");
    }

    #[test]
    fn hole_stays_empty() {
        let mut canvas = BrailleCanvas::new(4, 2);
        let outer = vec![(0, 0), (8, 0), (8, 8), (0, 8)];
        let hole = vec![(2, 2), (6, 2), (6, 6), (2, 6)];
        fill_rings(&mut canvas, &[outer, hole]);
        assert_eq!(canvas.dot_count(), 64 - 16);
    }

    #[test]
    fn fill_is_clipped_to_canvas() {
        let mut canvas = BrailleCanvas::new(2, 1);
        let huge = vec![(-100, -100), (100, -100), (100, 100), (-100, 100)];
        fill_rings(&mut canvas, &[huge]);
        assert_eq!(canvas.dot_count(), 16);
    }

    #[test]
    fn point_in_triangle() {
        let tri = [(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)];
        assert!(ring_contains(&tri, 2.0, 2.0));
        assert!(!ring_contains(&tri, 8.0, 8.0));
        assert!(!ring_contains(&tri[..2], 1.0, 0.0));
    }
}
