//! Coarse world used when no Natural Earth data is installed: continent
//! outlines plus rough shapes for the present-day countries that reached a
//! World Cup final.

use crate::map::{CountryShape, Lod, MapRenderer};

type Ring = &'static [(f64, f64)];

const CONTINENTS: [Ring; 7] = [
    // North America
    &[
        (-166.0, 68.0), (-164.0, 60.0), (-152.0, 59.0), (-140.0, 59.5), (-132.0, 54.0),
        (-124.5, 48.5), (-124.0, 41.0), (-120.5, 34.5), (-117.0, 32.5), (-110.0, 23.0),
        (-105.5, 20.0), (-97.0, 16.0), (-92.0, 14.5), (-86.0, 12.0), (-83.0, 9.0),
        (-77.5, 8.5), (-81.0, 13.0), (-83.5, 15.5), (-88.0, 16.0), (-87.0, 21.0),
        (-90.5, 21.0), (-94.0, 18.5), (-97.5, 22.0), (-97.0, 28.0), (-90.0, 29.5),
        (-84.0, 30.0), (-82.5, 27.5), (-80.5, 25.5), (-80.0, 31.0), (-76.0, 35.0),
        (-74.0, 40.5), (-70.0, 42.0), (-66.5, 45.0), (-60.0, 46.0), (-53.0, 47.0),
        (-56.0, 52.0), (-61.0, 56.0), (-65.0, 60.0), (-78.0, 62.5), (-88.0, 64.0),
        (-94.0, 60.0), (-93.0, 67.0), (-110.0, 68.5), (-130.0, 70.0), (-141.0, 69.5),
        (-156.0, 71.5), (-166.0, 68.0),
    ],
    // South America
    &[
        (-77.5, 8.5), (-72.0, 12.0), (-63.0, 10.5), (-60.0, 8.5), (-52.0, 5.0),
        (-50.0, 0.0), (-44.0, -2.5), (-35.0, -5.0), (-35.0, -9.0), (-39.0, -14.0),
        (-40.0, -21.0), (-44.5, -23.5), (-48.5, -26.0), (-50.5, -31.0), (-53.5, -34.0),
        (-58.0, -34.5), (-57.5, -38.0), (-62.0, -39.0), (-65.0, -41.0), (-65.5, -45.0),
        (-67.5, -46.5), (-68.5, -50.5), (-68.5, -53.0), (-71.0, -54.0), (-74.5, -52.0),
        (-75.5, -46.0), (-73.5, -40.0), (-71.5, -30.0), (-70.0, -18.0), (-75.5, -15.0),
        (-79.0, -8.0), (-81.0, -5.0), (-80.0, 0.0), (-78.5, 2.0), (-77.5, 8.5),
    ],
    // Europe
    &[
        (-9.5, 37.0), (-9.5, 43.0), (-1.5, 43.5), (-1.2, 46.2), (-4.7, 48.0),
        (-1.6, 49.7), (1.6, 50.4), (4.2, 51.4), (4.7, 52.9), (8.6, 53.9),
        (8.6, 57.0), (10.5, 57.6), (10.9, 54.0), (14.2, 53.9), (19.0, 54.4),
        (21.0, 56.8), (24.0, 59.5), (30.0, 60.0), (22.5, 60.5), (21.5, 63.0),
        (25.0, 65.5), (21.0, 65.0), (17.5, 62.5), (18.8, 59.4), (16.4, 56.7),
        (12.6, 56.1), (10.5, 59.5), (5.5, 58.5), (5.0, 62.0), (14.0, 67.5),
        (20.0, 70.0), (28.0, 71.0), (40.0, 67.5), (44.0, 68.5), (60.0, 69.0),
        (60.0, 55.0), (50.0, 46.5), (41.5, 42.0), (36.5, 45.0), (33.5, 44.5),
        (30.5, 46.5), (28.0, 42.0), (26.0, 40.8), (23.0, 40.3), (22.5, 36.5),
        (19.5, 41.5), (17.0, 43.5), (13.6, 45.7), (12.3, 44.6), (16.0, 41.5),
        (18.5, 40.2), (16.0, 38.0), (13.0, 41.2), (10.1, 44.0), (7.5, 43.8),
        (3.1, 43.1), (3.2, 41.9), (0.0, 39.0), (-2.1, 36.7), (-5.4, 36.1),
        (-9.5, 37.0),
    ],
    // Africa
    &[
        (-17.0, 21.0), (-16.5, 14.0), (-13.5, 9.5), (-8.0, 4.5), (-2.0, 5.0),
        (5.0, 6.0), (9.5, 4.0), (9.5, -1.0), (12.0, -5.0), (13.5, -11.0),
        (11.8, -17.0), (15.0, -27.0), (18.5, -34.5), (22.5, -34.0), (27.5, -33.5),
        (32.5, -28.5), (35.5, -24.0), (35.0, -19.0), (40.5, -15.0), (40.0, -10.0),
        (39.5, -5.0), (42.0, -1.0), (51.0, 11.0), (43.5, 11.5), (39.0, 16.0),
        (35.0, 23.0), (33.5, 28.0), (32.0, 31.0), (25.0, 31.8), (20.0, 30.5),
        (19.5, 32.5), (10.5, 34.0), (11.0, 37.0), (3.0, 36.8), (-2.0, 35.1),
        (-6.0, 35.8), (-9.8, 30.0), (-13.0, 27.5), (-17.0, 21.0),
    ],
    // Asia
    &[
        (26.0, 40.0), (27.0, 37.0), (36.0, 36.0), (35.0, 33.0), (34.5, 28.0),
        (43.0, 13.0), (52.0, 16.5), (57.0, 19.0), (59.5, 22.5), (56.5, 24.5),
        (51.5, 24.0), (48.5, 29.5), (50.5, 30.0), (57.0, 25.5), (66.5, 25.0),
        (72.5, 21.0), (73.5, 15.5), (77.5, 8.0), (80.0, 10.0), (80.5, 15.5),
        (87.0, 21.5), (91.5, 22.5), (94.5, 17.5), (98.0, 16.0), (98.5, 8.0),
        (103.5, 1.5), (104.5, 10.0), (109.0, 12.0), (106.5, 20.0), (111.0, 21.5),
        (117.0, 23.0), (122.0, 29.0), (122.0, 31.5), (119.0, 35.0), (122.5, 37.0),
        (118.0, 39.0), (121.5, 41.0), (126.0, 37.5), (129.5, 35.0), (129.5, 42.0),
        (135.5, 43.5), (141.0, 52.0), (135.0, 54.5), (143.0, 59.5), (156.0, 61.5),
        (163.0, 60.0), (156.5, 51.0), (163.5, 56.0), (170.0, 60.0), (180.0, 65.0),
        (180.0, 68.5), (170.0, 70.0), (160.0, 69.5), (140.0, 72.5), (128.0, 71.5),
        (112.0, 73.5), (104.0, 77.5), (96.0, 76.0), (80.0, 73.5), (70.0, 73.0),
        (66.5, 70.5), (60.0, 69.0), (60.0, 55.0), (50.0, 46.5), (47.0, 43.0),
        (41.5, 42.0), (36.0, 41.5), (29.0, 41.0), (26.0, 40.0),
    ],
    // Australia
    &[
        (113.5, -22.0), (114.0, -26.0), (115.0, -34.0), (118.0, -35.0), (124.0, -33.5),
        (131.0, -31.5), (135.5, -35.0), (138.0, -34.5), (140.0, -38.0), (146.0, -39.0),
        (150.0, -37.5), (153.5, -28.5), (153.0, -25.0), (146.0, -19.0), (145.5, -15.0),
        (142.5, -10.8), (141.5, -13.5), (141.5, -17.5), (136.5, -15.5), (136.5, -12.0),
        (131.0, -11.3), (126.0, -14.0), (122.0, -18.0), (113.5, -22.0),
    ],
    // Great Britain and Ireland
    &[
        (-5.7, 50.0), (1.4, 51.2), (1.7, 52.7), (0.3, 53.4), (-1.6, 55.6),
        (-1.8, 57.6), (-3.0, 58.6), (-5.0, 58.6), (-6.2, 56.8), (-4.9, 54.8),
        (-3.1, 53.4), (-4.6, 53.3), (-5.3, 51.7), (-5.7, 50.0),
    ],
];

/// (name, aliases, rings)
const COUNTRIES: [(&str, &[&str], &[Ring]); 12] = [
    (
        "Argentina",
        &["Argentine Republic"],
        &[&[
            (-68.6, -22.0), (-62.8, -22.0), (-57.6, -25.3), (-53.7, -26.2), (-55.7, -28.0),
            (-58.4, -33.0), (-58.4, -34.5), (-57.0, -36.3), (-57.6, -38.2), (-62.3, -38.8),
            (-65.0, -41.0), (-63.8, -42.0), (-65.3, -45.0), (-67.6, -46.5), (-65.6, -47.8),
            (-68.4, -50.2), (-68.4, -52.3), (-71.9, -52.0), (-72.3, -50.7), (-73.4, -49.3),
            (-71.6, -44.2), (-71.8, -39.5), (-70.4, -35.0), (-69.8, -30.0), (-68.3, -26.0),
            (-68.6, -22.0),
        ]],
    ),
    (
        "Brazil",
        &["Federative Republic of Brazil"],
        &[&[
            (-60.0, 5.2), (-51.6, 4.2), (-50.0, 1.7), (-48.4, -1.2), (-44.3, -2.5),
            (-39.0, -3.7), (-35.0, -5.5), (-34.8, -7.5), (-37.0, -11.0), (-39.0, -14.0),
            (-39.2, -17.7), (-40.9, -21.9), (-44.6, -23.4), (-48.6, -26.0), (-50.7, -31.0),
            (-53.4, -33.7), (-57.6, -30.2), (-53.7, -26.2), (-54.6, -25.6), (-58.2, -20.2),
            (-60.0, -16.3), (-65.0, -10.5), (-70.0, -11.0), (-73.0, -7.3), (-70.0, -4.0),
            (-69.5, 1.1), (-64.0, 2.0), (-60.0, 5.2),
        ]],
    ),
    (
        "Uruguay",
        &["Oriental Republic of Uruguay"],
        &[&[
            (-58.4, -33.0), (-57.6, -30.2), (-53.4, -33.7), (-54.9, -34.9), (-56.2, -34.9),
            (-57.8, -34.5), (-58.4, -33.0),
        ]],
    ),
    (
        "France",
        &["French Republic"],
        &[&[
            (2.5, 51.1), (4.2, 49.9), (8.2, 49.0), (7.6, 47.6), (6.0, 46.3),
            (7.0, 45.2), (7.5, 43.8), (6.0, 43.1), (3.1, 43.1), (1.7, 42.5),
            (-1.8, 43.4), (-1.2, 46.2), (-2.2, 47.1), (-4.7, 48.0), (-3.0, 48.8),
            (-1.4, 48.6), (-1.9, 49.7), (0.2, 49.7), (1.6, 50.4), (2.5, 51.1),
        ]],
    ),
    (
        "Germany",
        &["Federal Republic of Germany"],
        &[&[
            (6.0, 51.9), (6.9, 53.5), (8.8, 54.0), (8.6, 55.0), (10.9, 54.0),
            (13.6, 54.1), (14.2, 53.9), (14.6, 52.5), (15.0, 51.1), (12.2, 50.3),
            (13.8, 48.8), (13.0, 47.5), (10.2, 47.3), (7.6, 47.6), (8.2, 49.0),
            (6.4, 49.5), (6.1, 50.8), (6.0, 51.9),
        ]],
    ),
    (
        "Spain",
        &["Kingdom of Spain"],
        &[&[
            (-9.3, 43.0), (-7.7, 43.8), (-1.8, 43.4), (1.7, 42.5), (3.2, 41.9),
            (0.7, 40.7), (0.0, 39.0), (-0.7, 37.6), (-2.1, 36.7), (-5.4, 36.1),
            (-6.4, 36.9), (-7.4, 37.2), (-7.0, 38.0), (-7.3, 39.5), (-6.8, 41.0),
            (-8.2, 42.0), (-9.3, 43.0),
        ]],
    ),
    (
        "Italy",
        &["Italian Republic"],
        &[
            &[
                (6.8, 45.9), (8.5, 46.4), (10.4, 46.9), (12.4, 47.1), (13.7, 46.5),
                (13.6, 45.7), (12.4, 45.4), (12.3, 44.6), (13.6, 43.6), (14.0, 42.4),
                (16.1, 41.9), (18.5, 40.2), (17.0, 39.0), (16.0, 38.0), (15.6, 38.9),
                (15.1, 40.2), (13.0, 41.2), (11.1, 42.4), (10.1, 44.0), (8.4, 44.2),
                (7.5, 43.8), (7.0, 45.2), (6.8, 45.9),
            ],
            // Sicily
            &[(12.4, 38.0), (15.6, 38.3), (15.1, 36.7), (12.4, 38.0)],
            // Sardinia
            &[(8.2, 41.1), (9.8, 40.9), (9.6, 39.2), (8.4, 39.0), (8.2, 41.1)],
        ],
    ),
    (
        "United Kingdom",
        &["United Kingdom of Great Britain and Northern Ireland", "England"],
        &[
            &[
                (-5.7, 50.0), (1.4, 51.2), (1.7, 52.7), (0.3, 53.4), (-0.4, 54.5),
                (-1.6, 55.6), (-2.1, 57.1), (-1.8, 57.6), (-4.1, 57.7), (-3.0, 58.6),
                (-5.0, 58.6), (-6.2, 56.8), (-5.6, 55.3), (-4.9, 54.8), (-3.4, 54.9),
                (-3.1, 53.4), (-4.6, 53.3), (-4.2, 52.3), (-5.3, 51.7), (-3.4, 51.4),
                (-5.7, 50.0),
            ],
            // Northern Ireland
            &[(-5.7, 54.6), (-6.2, 55.2), (-7.6, 55.1), (-8.2, 54.5), (-6.9, 54.1), (-5.7, 54.6)],
        ],
    ),
    (
        "Croatia",
        &["Republic of Croatia"],
        &[&[
            (13.6, 45.5), (15.2, 45.5), (16.5, 46.5), (19.0, 45.9), (19.4, 45.2),
            (16.0, 45.2), (15.8, 44.2), (17.6, 43.0), (18.5, 42.4), (16.0, 43.5),
            (14.9, 44.6), (13.6, 45.5),
        ]],
    ),
    (
        "Netherlands",
        &["Kingdom of the Netherlands"],
        &[&[
            (3.4, 51.4), (4.7, 52.9), (6.9, 53.5), (7.2, 53.2), (7.1, 52.2),
            (6.0, 51.9), (5.9, 50.8), (4.3, 51.4), (3.4, 51.4),
        ]],
    ),
    (
        "Sweden",
        &["Kingdom of Sweden"],
        &[&[
            (11.0, 58.9), (12.6, 56.1), (14.3, 55.5), (16.4, 56.7), (16.6, 57.9),
            (18.8, 59.4), (17.3, 60.7), (17.3, 62.5), (20.6, 63.8), (22.2, 65.7),
            (24.1, 65.8), (23.6, 67.9), (20.6, 69.1), (18.0, 68.6), (16.1, 67.3),
            (12.2, 64.2), (12.5, 61.3), (11.0, 58.9),
        ]],
    ),
    (
        "Hungary",
        &[],
        &[&[
            (16.1, 46.9), (16.5, 47.7), (17.2, 48.0), (18.8, 47.8), (20.8, 48.6),
            (22.1, 48.4), (22.7, 47.9), (21.1, 46.3), (18.8, 45.9), (17.6, 45.9),
            (16.1, 46.9),
        ]],
    ),
];

/// Add the coarse world at the lowest level of detail
pub fn load_builtin_world(renderer: &mut MapRenderer) {
    for outline in CONTINENTS {
        renderer.add_coastline(outline.to_vec(), Lod::Low);
    }

    for (name, aliases, rings) in COUNTRIES {
        let aliases = aliases.iter().map(|a| a.to_string()).collect();
        let rings = rings.iter().map(|r| r.to_vec()).collect();
        if let Some(shape) = CountryShape::new(name, aliases, rings) {
            renderer.add_country(shape, Lod::Low);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;

    #[test]
    fn every_present_day_finalist_has_a_shape() {
        let mut renderer = MapRenderer::new();
        load_builtin_world(&mut renderer);
        renderer.reindex();

        // Historical states are not on today's map
        let historical = ["West Germany", "Czechoslovakia"];
        for record in Dataset::builtin().records() {
            for country in [&record.winner, &record.runner_up] {
                if historical.contains(&country.as_str()) {
                    continue;
                }
                assert!(
                    COUNTRIES.iter().any(|(name, _, _)| *name == country.as_str()),
                    "{country} has no built-in shape"
                );
            }
        }
        assert_eq!(renderer.country_count(Lod::Low), COUNTRIES.len());
    }

    #[test]
    fn capitals_fall_inside_their_country() {
        let mut renderer = MapRenderer::new();
        load_builtin_world(&mut renderer);
        renderer.reindex();

        let capitals = [
            ("Argentina", -64.0, -34.0),
            ("Brazil", -47.9, -15.8),
            ("Uruguay", -56.2, -34.0),
            ("France", 2.35, 48.85),
            ("Germany", 13.4, 52.5),
            ("Spain", -3.7, 40.4),
            ("Italy", 12.5, 41.9),
            ("United Kingdom", -0.1, 51.5),
            ("Sweden", 15.0, 59.3),
            ("Hungary", 19.0, 47.5),
        ];
        for (country, lon, lat) in capitals {
            let found = renderer.country_at(lon, lat, 1.0).map(|s| s.name.as_str());
            assert_eq!(found, Some(country), "({lon}, {lat})");
        }
    }
}
