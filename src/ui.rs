use crate::braille::BrailleCanvas;
use crate::dashboard::{Dashboard, Focus, Picker, COUNTRY_PLACEHOLDER, YEAR_PLACEHOLDER};
use crate::map::{color_at, Lod, MapLayers};
use crate::view::ColorScale;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Widget},
    Frame,
};

const CAPTION_COLOR: Color = Color::Red;
const LEGEND_STEPS: usize = 8;

/// Screen regions of the dashboard
#[derive(Clone, Copy, Debug)]
pub struct DashboardLayout {
    pub title: Rect,
    pub map: Rect,
    /// Map area inside its border; mouse and viewport coordinates are relative to this
    pub map_inner: Rect,
    pub country: Rect,
    pub year: Rect,
    pub status: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Title
                Constraint::Min(6),    // Map
                Constraint::Length(4), // Filters
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let filters = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[2]);

        Self {
            title: rows[0],
            map: rows[1],
            map_inner: map_block("").inner(rows[1]),
            country: filters[0],
            year: filters[1],
            status: rows[3],
        }
    }

    /// Map-relative cell under a terminal position
    pub fn map_cell(&self, col: u16, row: u16) -> Option<(u16, u16)> {
        let inner = self.map_inner;
        let inside = col >= inner.x
            && col < inner.x + inner.width
            && row >= inner.y
            && row < inner.y + inner.height;
        inside.then(|| (col - inner.x, row - inner.y))
    }
}

fn map_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
}

/// Render the UI
pub fn render(frame: &mut Frame, dashboard: &Dashboard) {
    let layout = DashboardLayout::new(frame.area());

    let title = Paragraph::new(Line::from(Span::styled(
        "FIFA World Cup Dashboard",
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(title, layout.title);

    render_map(frame, dashboard, &layout);
    render_filter(
        frame,
        layout.country,
        "Country",
        dashboard.selection().country.clone(),
        COUNTRY_PLACEHOLDER,
        &dashboard.views().country_caption,
        dashboard.focus == Focus::Country,
    );
    render_filter(
        frame,
        layout.year,
        "Year",
        dashboard.selection().year.map(|y| y.to_string()),
        YEAR_PLACEHOLDER,
        &dashboard.views().year_caption,
        dashboard.focus == Focus::Year,
    );
    render_status_bar(frame, dashboard, layout.status);

    if dashboard.country_picker.is_open() {
        let picker = &dashboard.country_picker;
        render_picker(frame, picker, layout.country, layout.map, |c| c.clone());
    }
    if dashboard.year_picker.is_open() {
        let picker = &dashboard.year_picker;
        render_picker(frame, picker, layout.year, layout.map, |y| y.to_string());
    }
}

fn render_map(frame: &mut Frame, dashboard: &Dashboard, layout: &DashboardLayout) {
    let map = &dashboard.views().map;
    let mut block = map_block(map.title);
    if dashboard.focus == Focus::Map {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    if let Some((min, max)) = map.value_range() {
        block = block.title_bottom(legend(map.scale, min, max).alignment(Alignment::Right));
    }
    frame.render_widget(block, layout.map);

    let inner = layout.map_inner;
    let mut viewport = dashboard.viewport.clone();
    // Braille gives 2x4 resolution per character
    viewport.width = inner.width as usize * 2;
    viewport.height = inner.height as usize * 4;

    let layers = dashboard
        .map_renderer
        .render(inner.width as usize, inner.height as usize, &viewport, map);

    frame.render_widget(
        MapWidget {
            layers,
            cursor_pos: dashboard.mouse_pos,
        },
        inner,
    );
}

/// Colour bar from `min` to `max`; a single value gets one swatch at the top of the scale
fn legend(scale: ColorScale, min: u32, max: u32) -> Line<'static> {
    let label = Style::default().fg(Color::Gray);
    let mut spans = Vec::with_capacity(LEGEND_STEPS + 2);
    if min == max {
        spans.push(Span::styled(" ", label));
        spans.push(Span::styled("█", Style::default().fg(color_at(scale, 1.0))));
    } else {
        spans.push(Span::styled(format!(" {min} "), label));
        for step in 0..LEGEND_STEPS {
            let t = step as f64 / (LEGEND_STEPS - 1) as f64;
            spans.push(Span::styled("█", Style::default().fg(color_at(scale, t))));
        }
    }
    spans.push(Span::styled(format!(" {max} Wins "), label));
    Line::from(spans)
}

/// Braille choropleth with labels overlaid
struct MapWidget {
    layers: MapLayers,
    cursor_pos: Option<(u16, u16)>,
}

impl MapWidget {
    fn render_layer(canvas: &BrailleCanvas, color: Color, area: Rect, buf: &mut Buffer) {
        let rows = canvas.height().min(area.height as usize);
        let cols = canvas.width().min(area.width as usize);
        for row in 0..rows {
            for col in 0..cols {
                if let Some(ch) = canvas.glyph(col, row) {
                    let (x, y) = (area.x + col as u16, area.y + row as u16);
                    buf[(x, y)].set_char(ch).set_fg(color);
                }
            }
        }
    }
}

impl Widget for MapWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Outlines at the back, filled countries over them
        Self::render_layer(&self.layers.outlines, Color::DarkGray, area, buf);
        for (color, canvas) in &self.layers.fills {
            Self::render_layer(canvas, *color, area, buf);
        }

        let label_style = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        for (lx, ly, text) in &self.layers.labels {
            if *ly >= area.height || *lx >= area.width {
                continue;
            }
            let max_len = (area.width - *lx) as usize;
            for (i, ch) in text.chars().take(max_len).enumerate() {
                buf[(area.x + *lx + i as u16, area.y + *ly)]
                    .set_char(ch)
                    .set_style(label_style);
            }
        }

        if let Some((cx, cy)) = self.cursor_pos {
            if cx < area.width && cy < area.height {
                buf[(area.x + cx, area.y + cy)].set_char('╋').set_fg(Color::Yellow);
            }
        }
    }
}

fn render_filter(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    value: Option<String>,
    placeholder: &str,
    caption: &str,
    focused: bool,
) {
    let border = if focused { Color::Yellow } else { Color::DarkGray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(format!(" {title} "), Style::default().fg(Color::Cyan)));

    let value_line = match value {
        Some(v) => Line::from(vec![
            Span::styled(v, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::styled("  ▾ ✕", Style::default().fg(Color::DarkGray)),
        ]),
        None => Line::from(vec![
            Span::styled(placeholder.to_string(), Style::default().fg(Color::DarkGray)),
            Span::styled("  ▾", Style::default().fg(Color::DarkGray)),
        ]),
    };
    let caption_line = Line::from(Span::styled(
        caption.to_string(),
        Style::default().fg(CAPTION_COLOR),
    ));

    frame.render_widget(Paragraph::new(vec![value_line, caption_line]).block(block), area);
}

/// Open dropdown list, drawn over the map just above its filter box
fn render_picker<T, F>(frame: &mut Frame, picker: &Picker<T>, anchor: Rect, map: Rect, label: F)
where
    T: Clone + PartialEq,
    F: Fn(&T) -> String,
{
    let wanted = picker.options().len() as u16 + 2;
    let height = wanted.min(map.height);
    let area = Rect {
        x: anchor.x,
        y: anchor.y.saturating_sub(height),
        width: anchor.width,
        height,
    };

    let items: Vec<ListItem> = picker
        .options()
        .iter()
        .map(|o| ListItem::new(label(o)))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("› ");

    let mut state = ListState::default().with_selected(Some(picker.cursor()));
    frame.render_widget(Clear, area);
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status_bar(frame: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let settings = &dashboard.map_renderer.settings;
    let toggle = |on: bool, on_text: &'static str, off_text: &'static str| {
        Span::styled(
            if on { on_text } else { off_text },
            Style::default().fg(if on { Color::Green } else { Color::DarkGray }),
        )
    };

    let mut spans = vec![
        Span::styled(" Zoom: ", Style::default().fg(Color::DarkGray)),
        Span::styled(dashboard.zoom_level(), Style::default().fg(Color::Yellow)),
        Span::styled(" (", Style::default().fg(Color::DarkGray)),
        Span::styled(dashboard.lod_level(), Style::default().fg(Color::Magenta)),
        Span::styled(") ", Style::default().fg(Color::DarkGray)),
        toggle(settings.show_coastlines, "[C]oast ", "[c]oast "),
        toggle(settings.show_borders, "[B]order ", "[b]order "),
        toggle(settings.show_labels, "[L]abels ", "[l]abels "),
        Span::styled("| ", Style::default().fg(Color::DarkGray)),
        Span::styled(dashboard.center_coords(), Style::default().fg(Color::Cyan)),
    ];

    if let Some((country, wins)) = dashboard.hovered() {
        spans.push(Span::styled(" | ", Style::default().fg(Color::DarkGray)));
        spans.push(Span::styled(
            country,
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::styled(
            format!("  Wins: {wins}"),
            Style::default().fg(CAPTION_COLOR),
        ));
    }

    if dashboard.debug {
        let map = &dashboard.views().map;
        let lod = Lod::from_zoom(dashboard.viewport.zoom);
        spans.push(Span::styled(
            format!(
                " | dbg entries={} shapes={} finals={} winners={} top={}",
                map.entries.len(),
                dashboard.map_renderer.country_count(lod),
                dashboard.dataset().len(),
                dashboard.wins().len(),
                dashboard.wins().max_wins(),
            ),
            Style::default().fg(Color::Magenta),
        ));
    }

    spans.push(Span::styled(
        if dashboard.debug {
            " | Tab:focus Enter:pick Del:clear hjkl:pan +/-:zoom r:reset F5:reload q:quit"
        } else {
            " | Tab:focus Enter:pick Del:clear hjkl:pan +/-:zoom r:reset q:quit"
        },
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_builtin_world;
    use crate::dataset::Dataset;
    use crate::map::MapRenderer;
    use ratatui::{backend::TestBackend, Terminal};

    fn dashboard(width: u16, height: u16) -> Dashboard {
        let mut renderer = MapRenderer::new();
        load_builtin_world(&mut renderer);
        renderer.reindex();
        let layout = DashboardLayout::new(Rect::new(0, 0, width, height));
        Dashboard::new(
            Dataset::builtin(),
            renderer,
            layout.map_inner.width as usize,
            layout.map_inner.height as usize,
        )
    }

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn draws_title_captions_and_placeholders() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let d = dashboard(120, 40);
        terminal.draw(|frame| render(frame, &d)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("FIFA World Cup Dashboard"));
        assert!(text.contains("FIFA World Cup Wins"));
        assert!(text.contains(COUNTRY_PLACEHOLDER));
        assert!(text.contains("Select a year to see the winner and runner-up."));
    }

    #[test]
    fn shows_selection_and_caption() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut d = dashboard(120, 40);
        d.set_year(Some(2022));
        terminal.draw(|frame| render(frame, &d)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("2022"));
        assert!(text.contains("In 2022, Argentina won against France."));
    }

    #[test]
    fn open_picker_lists_options() {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        let mut d = dashboard(120, 40);
        d.focus = Focus::Country;
        d.activate();
        terminal.draw(|frame| render(frame, &d)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("United Kingdom"));
        assert!(text.contains("Uruguay"));
    }

    #[test]
    fn single_value_legend_is_one_dark_swatch() {
        let swatches = |line: &Line| -> Vec<Color> {
            line.spans
                .iter()
                .filter(|span| span.content == "█")
                .filter_map(|span| span.style.fg)
                .collect()
        };

        let single = legend(ColorScale::Reds, 4, 4);
        assert_eq!(swatches(&single), vec![color_at(ColorScale::Reds, 1.0)]);
        assert!(single.to_string().contains("4 Wins"));

        let range = legend(ColorScale::Reds, 1, 5);
        let colors = swatches(&range);
        assert_eq!(colors.len(), LEGEND_STEPS);
        assert_eq!(colors[0], color_at(ColorScale::Reds, 0.0));
        assert!(range.to_string().contains(" 1 "));
    }

    #[test]
    fn debug_status_reports_win_counts() {
        let mut terminal = Terminal::new(TestBackend::new(200, 40)).unwrap();
        let mut d = dashboard(200, 40);
        d.debug = true;
        terminal.draw(|frame| render(frame, &d)).unwrap();

        let text = screen(&terminal);
        assert!(text.contains("winners=8 top=5"), "{text}");
        assert!(text.contains("[C]oast"));
    }

    #[test]
    fn map_cell_is_relative_to_inner_area() {
        let layout = DashboardLayout::new(Rect::new(0, 0, 100, 30));
        let inner = layout.map_inner;
        assert_eq!(layout.map_cell(inner.x, inner.y), Some((0, 0)));
        assert_eq!(layout.map_cell(0, 0), None);
        assert_eq!(layout.map_cell(inner.x + inner.width, inner.y), None);
    }
}
