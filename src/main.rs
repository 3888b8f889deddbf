use anyhow::{Context, Result};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use ratatui::layout::Rect;
use ratatui::DefaultTerminal;
use std::fs::File;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use wc_map::config::{Config, FRAME_INTERVAL};
use wc_map::dashboard::{Dashboard, Focus};
use wc_map::data;
use wc_map::dataset::Dataset;
use wc_map::map::MapRenderer;
use wc_map::ui::{self, DashboardLayout};

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let config = Config::from_env();
    init_tracing(&config)?;

    // Load before touching the terminal so errors print normally
    let dataset = load_dataset(&config)?;
    let renderer = load_map(&config);
    tracing::info!(finals = dataset.len(), debug = config.debug, "starting dashboard");

    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, &config, dataset, renderer);

    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();

    if let Err(e) = &result {
        tracing::error!(error = %e, "dashboard exited with error");
    }
    result
}

/// Log to the configured file; stdout belongs to the UI
fn init_tracing(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.log_filter))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn load_dataset(config: &Config) -> Result<Dataset> {
    match &config.dataset_path {
        Some(path) => Dataset::load(path),
        None => Ok(Dataset::builtin()),
    }
}

fn load_map(config: &Config) -> MapRenderer {
    let mut renderer = MapRenderer::new();
    let countries = data::load_world(&mut renderer, &config.data_dir);
    tracing::info!(countries, dir = %config.data_dir.display(), "geography ready");
    renderer
}

/// F5 in debug mode: reread the dataset and geography from disk
fn reload(dashboard: &mut Dashboard, config: &Config) {
    match load_dataset(config) {
        Ok(dataset) => dashboard.replace_dataset(dataset),
        Err(e) => tracing::warn!(error = %e, "reload kept the previous dataset"),
    }
    let mut renderer = load_map(config);
    renderer.settings = dashboard.map_renderer.settings.clone();
    dashboard.replace_map(renderer);
    tracing::info!("reloaded");
}

fn handle_key(dashboard: &mut Dashboard, key: KeyEvent, config: &Config) {
    match key.code {
        KeyCode::Char('q') => dashboard.quit(),
        KeyCode::Esc if dashboard.picker_open() => dashboard.close_pickers(),
        KeyCode::Esc => dashboard.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => dashboard.quit(),

        KeyCode::Tab => dashboard.focus_next(),
        KeyCode::BackTab => dashboard.focus_prev(),
        KeyCode::Enter => dashboard.activate(),
        KeyCode::Backspace | KeyCode::Delete => dashboard.clear_focused(),
        KeyCode::F(5) if config.debug => reload(dashboard, config),

        // Picker navigation
        KeyCode::Up | KeyCode::Char('k') if dashboard.picker_open() => dashboard.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') if dashboard.picker_open() => dashboard.move_cursor(1),
        KeyCode::PageUp if dashboard.picker_open() => dashboard.move_cursor(-10),
        KeyCode::PageDown if dashboard.picker_open() => dashboard.move_cursor(10),
        // Down on a closed picker opens it, like a dropdown
        KeyCode::Down if dashboard.focus != Focus::Map => dashboard.activate(),

        // Pan with hjkl or arrow keys
        KeyCode::Left | KeyCode::Char('h') => dashboard.pan(-10, 0),
        KeyCode::Right | KeyCode::Char('l') => dashboard.pan(10, 0),
        KeyCode::Up | KeyCode::Char('k') => dashboard.pan(0, -6),
        KeyCode::Down | KeyCode::Char('j') => dashboard.pan(0, 6),

        KeyCode::Char('+') | KeyCode::Char('=') => dashboard.zoom_in(),
        KeyCode::Char('-') | KeyCode::Char('_') => dashboard.zoom_out(),

        KeyCode::Char('c') | KeyCode::Char('C') => dashboard.map_renderer.toggle_coastlines(),
        KeyCode::Char('b') | KeyCode::Char('B') => dashboard.map_renderer.toggle_borders(),
        KeyCode::Char('L') => dashboard.map_renderer.toggle_labels(),

        KeyCode::Char('r') | KeyCode::Char('0') => dashboard.reset_view(),
        _ => {}
    }
}

/// Mouse over the map: wheel zooms at the cursor, left drag pans
fn handle_mouse(dashboard: &mut Dashboard, mouse: MouseEvent, layout: &DashboardLayout) {
    let cell = layout.map_cell(mouse.column, mouse.row);
    dashboard.set_mouse_pos(cell);

    match (mouse.kind, cell) {
        (MouseEventKind::ScrollUp, Some((col, row))) => dashboard.zoom_in_at(col, row),
        (MouseEventKind::ScrollDown, Some((col, row))) => dashboard.zoom_out_at(col, row),
        (MouseEventKind::ScrollLeft, _) => dashboard.pan(-15, 0),
        (MouseEventKind::ScrollRight, _) => dashboard.pan(15, 0),
        (MouseEventKind::Down(MouseButton::Left), Some(cell)) => {
            dashboard.focus = Focus::Map;
            dashboard.close_pickers();
            dashboard.last_mouse = Some(cell);
        }
        (MouseEventKind::Drag(MouseButton::Left), Some((col, row))) => {
            dashboard.handle_drag(col, row);
        }
        (MouseEventKind::Up(MouseButton::Left), _) => dashboard.end_drag(),
        _ => {}
    }
}

fn run(
    terminal: &mut DefaultTerminal,
    config: &Config,
    dataset: Dataset,
    renderer: MapRenderer,
) -> Result<()> {
    let size = terminal.size()?;
    let mut layout = DashboardLayout::new(Rect::new(0, 0, size.width, size.height));
    let mut dashboard = Dashboard::new(
        dataset,
        renderer,
        layout.map_inner.width as usize,
        layout.map_inner.height as usize,
    );
    dashboard.debug = config.debug;

    loop {
        terminal.draw(|frame| ui::render(frame, &dashboard))?;

        if event::poll(FRAME_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    handle_key(&mut dashboard, key, config);
                }
                Event::Mouse(mouse) => handle_mouse(&mut dashboard, mouse, &layout),
                Event::Resize(width, height) => {
                    layout = DashboardLayout::new(Rect::new(0, 0, width, height));
                    let inner = layout.map_inner;
                    dashboard.resize(inner.width as usize, inner.height as usize);
                }
                _ => {}
            }
        }

        if dashboard.should_quit {
            break;
        }
    }

    Ok(())
}
