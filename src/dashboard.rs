use crate::dataset::Dataset;
use crate::map::{Lod, MapRenderer, Viewport};
use crate::stats::{aggregate, WinCounts};
use crate::view::{DerivedViews, Selection};

pub const COUNTRY_PLACEHOLDER: &str = "Select a Country";
pub const YEAR_PLACEHOLDER: &str = "Select a Year";

/// Which part of the dashboard receives keys
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    Map,
    Country,
    Year,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Map => Focus::Country,
            Focus::Country => Focus::Year,
            Focus::Year => Focus::Map,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Map => Focus::Year,
            Focus::Country => Focus::Map,
            Focus::Year => Focus::Country,
        }
    }
}

/// A dropdown: fixed options, a cursor, and whether the list is open
#[derive(Clone, Debug)]
pub struct Picker<T> {
    options: Vec<T>,
    cursor: usize,
    open: bool,
}

impl<T: Clone + PartialEq> Picker<T> {
    pub fn new(options: Vec<T>) -> Self {
        Self {
            options,
            cursor: 0,
            open: false,
        }
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Open the list with the cursor on `current` when it is an option
    pub fn open_at(&mut self, current: Option<&T>) {
        if let Some(idx) = current.and_then(|c| self.options.iter().position(|o| o == c)) {
            self.cursor = idx;
        }
        self.open = !self.options.is_empty();
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn move_cursor(&mut self, delta: i32) {
        if self.options.is_empty() {
            return;
        }
        let last = self.options.len() as i32 - 1;
        self.cursor = (self.cursor as i32 + delta).clamp(0, last) as usize;
    }

    /// Close the list and return the option under the cursor
    pub fn confirm(&mut self) -> Option<T> {
        self.open = false;
        self.options.get(self.cursor).cloned()
    }
}

/// Dashboard state: the injected dataset, the two selections, and
/// everything derived from them.
pub struct Dashboard {
    dataset: Dataset,
    wins: WinCounts,
    selection: Selection,
    views: DerivedViews,
    pub country_picker: Picker<String>,
    pub year_picker: Picker<u16>,
    pub focus: Focus,
    pub viewport: Viewport,
    pub map_renderer: MapRenderer,
    pub debug: bool,
    pub should_quit: bool,
    /// Last mouse position for drag tracking
    pub last_mouse: Option<(u16, u16)>,
    /// Current mouse position for hover
    pub mouse_pos: Option<(u16, u16)>,
}

impl Dashboard {
    /// `width`/`height` are the map area in terminal cells
    pub fn new(dataset: Dataset, map_renderer: MapRenderer, width: usize, height: usize) -> Self {
        let wins = aggregate(&dataset);
        let selection = Selection::default();
        let views = DerivedViews::compute(&dataset, &wins, &selection);

        Self {
            country_picker: Picker::new(wins.countries()),
            year_picker: Picker::new(dataset.years()),
            dataset,
            wins,
            selection,
            views,
            focus: Focus::Map,
            viewport: Viewport::world(width * 2, height * 4),
            map_renderer,
            debug: false,
            should_quit: false,
            last_mouse: None,
            mouse_pos: None,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn wins(&self) -> &WinCounts {
        &self.wins
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn views(&self) -> &DerivedViews {
        &self.views
    }

    pub fn set_country(&mut self, country: Option<String>) {
        tracing::debug!(?country, "country selection changed");
        self.selection.country = country;
        self.refresh();
    }

    pub fn set_year(&mut self, year: Option<u16>) {
        tracing::debug!(?year, "year selection changed");
        self.selection.year = year;
        self.refresh();
    }

    pub fn clear_country(&mut self) {
        self.set_country(None);
    }

    pub fn clear_year(&mut self) {
        self.set_year(None);
    }

    /// Swap in a new table of finals, keeping selections that still exist
    pub fn replace_dataset(&mut self, dataset: Dataset) {
        self.wins = aggregate(&dataset);
        self.country_picker = Picker::new(self.wins.countries());
        self.year_picker = Picker::new(dataset.years());
        self.dataset = dataset;

        if let Some(country) = &self.selection.country {
            if self.wins.get(country).is_none() {
                self.selection.country = None;
            }
        }
        if let Some(year) = self.selection.year {
            if self.dataset.find_year(year).is_err() {
                self.selection.year = None;
            }
        }
        self.refresh();
    }

    pub fn replace_map(&mut self, map_renderer: MapRenderer) {
        self.map_renderer = map_renderer;
    }

    /// Recompute map data and both captions from the current selection
    fn refresh(&mut self) {
        self.views = DerivedViews::compute(&self.dataset, &self.wins, &self.selection);
    }

    pub fn focus_next(&mut self) {
        self.close_pickers();
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.close_pickers();
        self.focus = self.focus.prev();
    }

    pub fn close_pickers(&mut self) {
        self.country_picker.close();
        self.year_picker.close();
    }

    pub fn picker_open(&self) -> bool {
        self.country_picker.is_open() || self.year_picker.is_open()
    }

    /// Enter: open the focused picker, or confirm its cursor when open
    pub fn activate(&mut self) {
        match self.focus {
            Focus::Map => {}
            Focus::Country if self.country_picker.is_open() => {
                let country = self.country_picker.confirm();
                self.set_country(country);
            }
            Focus::Country => {
                self.country_picker.open_at(self.selection.country.as_ref());
            }
            Focus::Year if self.year_picker.is_open() => {
                let year = self.year_picker.confirm();
                self.set_year(year);
            }
            Focus::Year => {
                self.year_picker.open_at(self.selection.year.as_ref());
            }
        }
    }

    /// Move the cursor of the open picker
    pub fn move_cursor(&mut self, delta: i32) {
        match self.focus {
            Focus::Country => self.country_picker.move_cursor(delta),
            Focus::Year => self.year_picker.move_cursor(delta),
            Focus::Map => {}
        }
    }

    /// Clear the selection of the focused picker
    pub fn clear_focused(&mut self) {
        match self.focus {
            Focus::Country => {
                self.country_picker.close();
                self.clear_country();
            }
            Focus::Year => {
                self.year_picker.close();
                self.clear_year();
            }
            Focus::Map => {}
        }
    }

    /// Update viewport size when the map area changes (terminal cells)
    pub fn resize(&mut self, width: usize, height: usize) {
        self.viewport.width = width * 2;
        self.viewport.height = height * 4;
    }

    pub fn pan(&mut self, dx: i32, dy: i32) {
        self.viewport.pan(dx, dy);
    }

    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
    }

    /// Zoom towards a map-relative cell
    pub fn zoom_in_at(&mut self, col: u16, row: u16) {
        self.viewport.zoom_in_at(col as i32 * 2, row as i32 * 4);
    }

    pub fn zoom_out_at(&mut self, col: u16, row: u16) {
        self.viewport.zoom_out_at(col as i32 * 2, row as i32 * 4);
    }

    pub fn reset_view(&mut self) {
        self.viewport = Viewport::world(self.viewport.width, self.viewport.height);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn zoom_level(&self) -> String {
        format!("{:.1}x", self.viewport.zoom)
    }

    pub fn lod_level(&self) -> &'static str {
        Lod::from_zoom(self.viewport.zoom).label()
    }

    pub fn center_coords(&self) -> String {
        format!(
            "{:.1}°{}, {:.1}°{}",
            self.viewport.center_lat.abs(),
            if self.viewport.center_lat >= 0.0 { "N" } else { "S" },
            self.viewport.center_lon.abs(),
            if self.viewport.center_lon >= 0.0 { "E" } else { "W" }
        )
    }

    /// Drag the map with the mouse (map-relative cells)
    pub fn handle_drag(&mut self, col: u16, row: u16) {
        if let Some((last_col, last_row)) = self.last_mouse {
            let dx = last_col as i32 - col as i32;
            let dy = last_row as i32 - row as i32;
            // Braille cells are 2x4 pixels
            self.pan(dx * 2, dy * 4);
        }
        self.last_mouse = Some((col, row));
    }

    pub fn end_drag(&mut self) {
        self.last_mouse = None;
    }

    /// Track the mouse (map-relative cells), `None` when outside the map
    pub fn set_mouse_pos(&mut self, pos: Option<(u16, u16)>) {
        self.mouse_pos = pos;
    }

    /// Country under the mouse and its value, if it is on the current map
    pub fn hovered(&self) -> Option<(String, u32)> {
        let (col, row) = self.mouse_pos?;
        let (lon, lat) = self.viewport.unproject(col as i32 * 2 + 1, row as i32 * 4 + 2);
        let shape = self.map_renderer.country_at(lon, lat, self.viewport.zoom)?;
        self.views
            .map
            .entries
            .iter()
            .find(|e| shape.matches(&e.country))
            .map(|e| (e.country.clone(), e.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::load_builtin_world;
    use crate::view::{COUNTRY_PROMPT, YEAR_PROMPT};

    fn dashboard() -> Dashboard {
        let mut renderer = MapRenderer::new();
        load_builtin_world(&mut renderer);
        renderer.reindex();
        Dashboard::new(Dataset::builtin(), renderer, 80, 20)
    }

    #[test]
    fn starts_with_nothing_selected() {
        let d = dashboard();
        assert_eq!(d.selection(), &Selection::default());
        assert_eq!(d.views().country_caption, COUNTRY_PROMPT);
        assert_eq!(d.views().year_caption, YEAR_PROMPT);
        assert_eq!(d.views().map.entries.len(), 8);
        assert_eq!(d.country_picker.options().len(), 8);
        assert_eq!(d.year_picker.options().len(), 22);
    }

    #[test]
    fn setters_recompute_every_view() {
        let mut d = dashboard();
        d.set_country(Some("Germany".into()));
        assert_eq!(d.views().country_caption, "Germany has won 4 times.");
        assert_eq!(d.views().map.value_of("Germany"), Some(4));
        assert_eq!(d.views().map.entries.len(), 1);

        d.set_year(Some(1966));
        assert_eq!(
            d.views().year_caption,
            "In 1966, United Kingdom won against West Germany."
        );
        // Year overrides the country on the map but not in its caption
        assert_eq!(d.views().map.value_of("United Kingdom"), Some(1));
        assert_eq!(d.views().country_caption, "Germany has won 4 times.");

        d.clear_year();
        assert_eq!(d.views().year_caption, YEAR_PROMPT);
        assert_eq!(d.views().map.value_of("Germany"), Some(4));
    }

    #[test]
    fn forged_selections_fall_back() {
        let mut d = dashboard();
        d.set_country(Some("Atlantis".into()));
        d.set_year(Some(2026));
        assert!(d.views().map.entries.is_empty());
        assert_eq!(d.views().year_caption, "No World Cup final was played in 2026.");
        assert_eq!(
            d.views().country_caption,
            "Atlantis is not among the World Cup winners."
        );
    }

    #[test]
    fn picker_flow_selects_and_clears() {
        let mut d = dashboard();
        d.focus_next();
        assert_eq!(d.focus, Focus::Country);

        d.activate();
        assert!(d.country_picker.is_open());
        d.move_cursor(1);
        d.activate();
        assert!(!d.picker_open());
        assert_eq!(d.selection().country.as_deref(), Some("Germany"));

        // Reopening starts on the current selection
        d.activate();
        assert_eq!(d.country_picker.cursor(), 1);
        d.close_pickers();

        d.clear_focused();
        assert_eq!(d.selection().country, None);

        d.focus_next();
        d.activate();
        d.move_cursor(-5);
        d.activate();
        assert_eq!(d.selection().year, Some(2022));
        assert_eq!(d.views().map.value_of("France"), Some(0));
    }

    #[test]
    fn collapsed_map_survives_pan_and_resize() {
        let mut renderer = MapRenderer::new();
        load_builtin_world(&mut renderer);
        renderer.reindex();
        let mut d = Dashboard::new(Dataset::builtin(), renderer, 0, 0);
        d.pan(10, 0);
        d.zoom_in_at(0, 0);
        d.resize(80, 20);
        assert!(d.viewport.center_lon.is_finite());
        assert!(d.viewport.center_lat.is_finite());
        assert_eq!(d.center_coords(), "20.0°N, 0.0°E");
    }

    #[test]
    fn cursor_stays_in_range() {
        let mut picker = Picker::new(vec![1, 2, 3]);
        picker.move_cursor(10);
        assert_eq!(picker.cursor(), 2);
        picker.move_cursor(-10);
        assert_eq!(picker.cursor(), 0);

        let mut empty: Picker<u16> = Picker::new(vec![]);
        empty.open_at(None);
        assert!(!empty.is_open());
        assert_eq!(empty.confirm(), None);
    }

    #[test]
    fn focus_cycles_both_ways() {
        assert_eq!(Focus::Map.next().next().next(), Focus::Map);
        assert_eq!(Focus::Map.prev(), Focus::Year);
    }

    #[test]
    fn replacing_dataset_drops_stale_selections() {
        let mut d = dashboard();
        d.set_country(Some("Spain".into()));
        d.set_year(Some(1930));

        let recent: Vec<_> = Dataset::builtin()
            .records()
            .iter()
            .filter(|r| r.year >= 2000)
            .cloned()
            .collect();
        d.replace_dataset(Dataset::from_records(recent).unwrap());

        assert_eq!(d.selection().country.as_deref(), Some("Spain"));
        assert_eq!(d.selection().year, None);
        assert_eq!(d.year_picker.options().len(), 6);
        assert_eq!(d.views().country_caption, "Spain has won 1 times.");
    }

    #[test]
    fn hover_reports_coloured_country() {
        let mut d = dashboard();
        // Centre the view on Brazil and point at the middle of the map
        d.viewport = Viewport::new(-50.0, -12.0, 3.0, 160, 80);
        d.set_mouse_pos(Some((40, 10)));
        assert_eq!(d.hovered(), Some(("Brazil".to_string(), 5)));

        d.set_year(Some(2022));
        assert_eq!(d.hovered(), None);

        d.set_mouse_pos(None);
        assert_eq!(d.hovered(), None);
    }
}
