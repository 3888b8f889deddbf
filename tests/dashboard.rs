use wc_map::dashboard::{Dashboard, Focus};
use wc_map::data::load_builtin_world;
use wc_map::dataset::Dataset;
use wc_map::map::MapRenderer;

fn dashboard() -> Dashboard {
    let mut renderer = MapRenderer::new();
    load_builtin_world(&mut renderer);
    renderer.reindex();
    Dashboard::new(Dataset::builtin(), renderer, 100, 30)
}

#[test]
fn all_four_selection_combinations() {
    let mut d = dashboard();

    // Neither
    assert_eq!(d.views().map.entries.len(), 8);

    // Country only
    d.set_country(Some("Uruguay".into()));
    assert_eq!(d.views().map.value_of("Uruguay"), Some(2));
    assert_eq!(d.views().country_caption, "Uruguay has won 2 times.");

    // Both: year decides the map
    d.set_year(Some(1950));
    assert_eq!(d.views().map.value_of("Uruguay"), Some(1));
    assert_eq!(d.views().map.value_of("Brazil"), Some(0));
    assert_eq!(d.views().year_caption, "In 1950, Uruguay won against Brazil.");

    // Year only
    d.clear_country();
    assert_eq!(d.views().map.entries.len(), 2);
    assert_eq!(
        d.views().country_caption,
        "Select a country to see the number of wins."
    );
}

#[test]
fn keyboard_style_selection_of_a_year() {
    let mut d = dashboard();
    d.focus_next();
    d.focus_next();
    assert_eq!(d.focus, Focus::Year);

    d.activate();
    d.move_cursor(21);
    d.activate();
    assert_eq!(d.selection().year, Some(1930));
    assert_eq!(
        d.views().year_caption,
        "In 1930, Uruguay won against Argentina."
    );
}
