use crate::dataset::Dataset;
use crate::error::LookupError;
use crate::stats::WinCounts;

pub const MAP_TITLE: &str = "FIFA World Cup Wins";
pub const COUNTRY_PROMPT: &str = "Select a country to see the number of wins.";
pub const YEAR_PROMPT: &str = "Select a year to see the winner and runner-up.";

/// Colour scale used for choropleth values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorScale {
    Reds,
}

/// How map entries are matched to shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationMode {
    CountryNames,
}

/// One coloured country on the map
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    pub country: String,
    pub value: u32,
}

impl MapEntry {
    fn new(country: &str, value: u32) -> Self {
        Self {
            country: country.to_string(),
            value,
        }
    }
}

/// Everything the choropleth renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapData {
    pub title: &'static str,
    pub entries: Vec<MapEntry>,
    pub scale: ColorScale,
    pub location_mode: LocationMode,
}

impl MapData {
    fn with_entries(entries: Vec<MapEntry>) -> Self {
        Self {
            title: MAP_TITLE,
            entries,
            scale: ColorScale::Reds,
            location_mode: LocationMode::CountryNames,
        }
    }

    /// A map with nothing coloured
    pub fn empty() -> Self {
        Self::with_entries(Vec::new())
    }

    /// (min, max) of the values, the extent of the colour axis
    pub fn value_range(&self) -> Option<(u32, u32)> {
        let min = self.entries.iter().map(|e| e.value).min()?;
        let max = self.entries.iter().map(|e| e.value).max()?;
        Some((min, max))
    }

    pub fn value_of(&self, country: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.country == country)
            .map(|e| e.value)
    }
}

/// The two optional filters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub country: Option<String>,
    pub year: Option<u16>,
}

/// Countries to colour for the current selection.
///
/// A selected year wins over a selected country: the final's winner is
/// coloured 1 and the runner-up 0. A country alone colours just that
/// country with its win count, or nothing if it never won. No selection
/// colours every winner.
pub fn map_data(
    dataset: &Dataset,
    wins: &WinCounts,
    selection: &Selection,
) -> Result<MapData, LookupError> {
    if let Some(year) = selection.year {
        let record = dataset.find_year(year)?;
        return Ok(MapData::with_entries(vec![
            MapEntry::new(&record.winner, 1),
            MapEntry::new(&record.runner_up, 0),
        ]));
    }

    if let Some(country) = selection.country.as_deref() {
        let entries = wins
            .get(country)
            .map(|n| vec![MapEntry::new(country, n)])
            .unwrap_or_default();
        return Ok(MapData::with_entries(entries));
    }

    Ok(MapData::with_entries(
        wins.iter()
            .map(|e| MapEntry::new(&e.country, e.wins))
            .collect(),
    ))
}

pub fn country_caption(wins: &WinCounts, country: Option<&str>) -> Result<String, LookupError> {
    match country {
        Some(country) => {
            let n = wins.lookup(country)?;
            Ok(format!("{country} has won {n} times."))
        }
        None => Ok(COUNTRY_PROMPT.to_string()),
    }
}

pub fn year_caption(dataset: &Dataset, year: Option<u16>) -> Result<String, LookupError> {
    match year {
        Some(year) => {
            let record = dataset.find_year(year)?;
            Ok(format!(
                "In {year}, {} won against {}.",
                record.winner, record.runner_up
            ))
        }
        None => Ok(YEAR_PROMPT.to_string()),
    }
}

/// Map and captions for one selection, with lookup failures already
/// resolved into fallbacks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedViews {
    pub map: MapData,
    pub country_caption: String,
    pub year_caption: String,
}

impl DerivedViews {
    pub fn compute(dataset: &Dataset, wins: &WinCounts, selection: &Selection) -> Self {
        let map = map_data(dataset, wins, selection).unwrap_or_else(|err| {
            tracing::warn!(%err, "map selection has no match");
            MapData::empty()
        });
        let country_caption =
            country_caption(wins, selection.country.as_deref()).unwrap_or_else(|err| {
                tracing::warn!(%err, "country selection has no match");
                err.to_string()
            });
        let year_caption = year_caption(dataset, selection.year).unwrap_or_else(|err| {
            tracing::warn!(%err, "year selection has no match");
            err.to_string()
        });

        Self {
            map,
            country_caption,
            year_caption,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::aggregate;

    fn fixture() -> (Dataset, WinCounts) {
        let dataset = Dataset::builtin();
        let wins = aggregate(&dataset);
        (dataset, wins)
    }

    fn pairs(map: &MapData) -> Vec<(&str, u32)> {
        map.entries
            .iter()
            .map(|e| (e.country.as_str(), e.value))
            .collect()
    }

    #[test]
    fn year_takes_precedence_over_country() {
        let (dataset, wins) = fixture();
        for country in [None, Some("Brazil"), Some("Narnia")] {
            let selection = Selection {
                country: country.map(str::to_string),
                year: Some(2022),
            };
            let map = map_data(&dataset, &wins, &selection).unwrap();
            assert_eq!(pairs(&map), [("Argentina", 1), ("France", 0)]);
        }
    }

    #[test]
    fn unknown_year_is_a_lookup_error() {
        let (dataset, wins) = fixture();
        let selection = Selection {
            country: None,
            year: Some(1942),
        };
        assert_eq!(
            map_data(&dataset, &wins, &selection),
            Err(LookupError::Year(1942))
        );
        assert_eq!(year_caption(&dataset, Some(1942)), Err(LookupError::Year(1942)));
    }

    #[test]
    fn country_alone_colours_one_country() {
        let (dataset, wins) = fixture();
        let selection = Selection {
            country: Some("Italy".into()),
            year: None,
        };
        let map = map_data(&dataset, &wins, &selection).unwrap();
        assert_eq!(pairs(&map), [("Italy", 4)]);
    }

    #[test]
    fn unknown_country_colours_nothing() {
        let (dataset, wins) = fixture();
        let selection = Selection {
            country: Some("Netherlands".into()),
            year: None,
        };
        let map = map_data(&dataset, &wins, &selection).unwrap();
        assert!(map.entries.is_empty());
        assert_eq!(map.value_range(), None);
    }

    #[test]
    fn no_selection_colours_every_winner() {
        let (dataset, wins) = fixture();
        let map = map_data(&dataset, &wins, &Selection::default()).unwrap();
        assert_eq!(map.entries.len(), 8);
        assert_eq!(map.value_of("Brazil"), Some(5));
        assert_eq!(map.value_of("United Kingdom"), Some(1));
        assert_eq!(map.value_of("Croatia"), None);
        assert_eq!(map.value_range(), Some((1, 5)));
        assert_eq!(map.scale, ColorScale::Reds);
        assert_eq!(map.location_mode, LocationMode::CountryNames);
    }

    #[test]
    fn captions() {
        let (dataset, wins) = fixture();
        assert_eq!(
            country_caption(&wins, Some("Brazil")).unwrap(),
            "Brazil has won 5 times."
        );
        assert_eq!(country_caption(&wins, None).unwrap(), COUNTRY_PROMPT);
        assert_eq!(
            year_caption(&dataset, Some(2022)).unwrap(),
            "In 2022, Argentina won against France."
        );
        assert_eq!(year_caption(&dataset, None).unwrap(), YEAR_PROMPT);
    }

    #[test]
    fn derived_views_fall_back_instead_of_failing() {
        let (dataset, wins) = fixture();
        let selection = Selection {
            country: Some("Croatia".into()),
            year: Some(1942),
        };
        let views = DerivedViews::compute(&dataset, &wins, &selection);
        assert!(views.map.entries.is_empty());
        assert_eq!(
            views.country_caption,
            "Croatia is not among the World Cup winners."
        );
        assert_eq!(views.year_caption, "No World Cup final was played in 1942.");
    }

    #[test]
    fn derived_views_are_repeatable() {
        let (dataset, wins) = fixture();
        let selection = Selection {
            country: Some("France".into()),
            year: None,
        };
        assert_eq!(
            DerivedViews::compute(&dataset, &wins, &selection),
            DerivedViews::compute(&dataset, &wins, &selection)
        );
    }
}
