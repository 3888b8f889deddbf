use crate::error::{DatasetError, LookupError};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// One World Cup final
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub year: u16,
    pub winner: String,
    #[serde(alias = "runnerUp")]
    pub runner_up: String,
}

/// Finals from 1930 to 2022, most recent first
const FINALS: [(u16, &str, &str); 22] = [
    (2022, "Argentina", "France"),
    (2018, "France", "Croatia"),
    (2014, "Germany", "Argentina"),
    (2010, "Spain", "Netherlands"),
    (2006, "Italy", "France"),
    (2002, "Brazil", "Germany"),
    (1998, "France", "Brazil"),
    (1994, "Brazil", "Italy"),
    (1990, "Germany", "Argentina"),
    (1986, "Argentina", "West Germany"),
    (1982, "Italy", "West Germany"),
    (1978, "Argentina", "Netherlands"),
    (1974, "Germany", "Netherlands"),
    (1970, "Brazil", "Italy"),
    (1966, "United Kingdom", "West Germany"),
    (1962, "Brazil", "Czechoslovakia"),
    (1958, "Brazil", "Sweden"),
    (1954, "Germany", "Hungary"),
    (1950, "Uruguay", "Brazil"),
    (1938, "Italy", "Hungary"),
    (1934, "Italy", "Czechoslovakia"),
    (1930, "Uruguay", "Argentina"),
];

/// Immutable table of finals.
///
/// Construction validates the invariants every view relies on: names are
/// non-blank, winner and runner-up differ, and years are unique. After that
/// the table is never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<MatchRecord>,
}

impl Dataset {
    /// The embedded 1930-2022 table
    pub fn builtin() -> Self {
        let records = FINALS
            .iter()
            .map(|&(year, winner, runner_up)| MatchRecord {
                year,
                winner: winner.to_string(),
                runner_up: runner_up.to_string(),
            })
            .collect();
        Self { records }
    }

    pub fn from_records(records: Vec<MatchRecord>) -> Result<Self, DatasetError> {
        if records.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            if record.winner.trim().is_empty() || record.runner_up.trim().is_empty() {
                return Err(DatasetError::BlankCountry { year: record.year });
            }
            if record.winner == record.runner_up {
                return Err(DatasetError::SameFinalists {
                    year: record.year,
                    country: record.winner.clone(),
                });
            }
            if !seen.insert(record.year) {
                return Err(DatasetError::DuplicateYear(record.year));
            }
        }

        Ok(Self { records })
    }

    /// Load a JSON array of records from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading dataset {}", path.display()))?;
        let records: Vec<MatchRecord> = serde_json::from_str(&content)
            .with_context(|| format!("parsing dataset {}", path.display()))?;
        let dataset = Self::from_records(records)
            .with_context(|| format!("validating dataset {}", path.display()))?;
        tracing::info!(path = %path.display(), finals = dataset.len(), "loaded dataset");
        Ok(dataset)
    }

    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Find the final played in `year`
    pub fn find_year(&self, year: u16) -> Result<&MatchRecord, LookupError> {
        self.records
            .iter()
            .find(|r| r.year == year)
            .ok_or(LookupError::Year(year))
    }

    /// Years in stored order (the year dropdown's options)
    pub fn years(&self) -> Vec<u16> {
        self.records.iter().map(|r| r.year).collect()
    }
}

impl Default for Dataset {
    fn default() -> Self {
        Self::builtin()
    }
}
