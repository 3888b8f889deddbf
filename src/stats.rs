use crate::dataset::Dataset;
use crate::error::LookupError;
use std::collections::HashMap;

/// A country and how many finals it won
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryWins {
    pub country: String,
    pub wins: u32,
}

/// Wins per country, ordered by wins (descending) then name.
///
/// Only winners appear. A country that only ever finished runner-up has no
/// entry at all, which is not the same as an entry with zero wins.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WinCounts {
    entries: Vec<CountryWins>,
}

/// Tally wins per country in a single pass over the finals
pub fn aggregate(dataset: &Dataset) -> WinCounts {
    let mut tally: HashMap<&str, u32> = HashMap::new();
    for record in dataset.records() {
        *tally.entry(record.winner.as_str()).or_insert(0) += 1;
    }

    let mut entries: Vec<CountryWins> = tally
        .into_iter()
        .map(|(country, wins)| CountryWins {
            country: country.to_string(),
            wins,
        })
        .collect();
    entries.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.country.cmp(&b.country)));

    WinCounts { entries }
}

impl WinCounts {
    pub fn get(&self, country: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|e| e.country == country)
            .map(|e| e.wins)
    }

    pub fn lookup(&self, country: &str) -> Result<u32, LookupError> {
        self.get(country)
            .ok_or_else(|| LookupError::Country(country.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CountryWins> {
        self.entries.iter()
    }

    /// Winning countries in display order (the country dropdown's options)
    pub fn countries(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.country.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total wins across all countries; equals the number of finals
    pub fn total(&self) -> u32 {
        self.entries.iter().map(|e| e.wins).sum()
    }

    pub fn max_wins(&self) -> u32 {
        self.entries.first().map(|e| e.wins).unwrap_or(0)
    }
}
