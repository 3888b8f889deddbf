use std::fmt;

/// A selection that does not match anything in the dataset.
///
/// The display text is user-facing: the dashboard shows it in place of the
/// caption it could not build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No final was recorded for this year
    Year(u16),
    /// Country is not among the recorded winners
    Country(String),
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Year(year) => write!(f, "No World Cup final was played in {year}."),
            LookupError::Country(country) => {
                write!(f, "{country} is not among the World Cup winners.")
            }
        }
    }
}

impl std::error::Error for LookupError {}

/// A table of finals that breaks one of the dataset invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    Empty,
    BlankCountry { year: u16 },
    SameFinalists { year: u16, country: String },
    DuplicateYear(u16),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Empty => write!(f, "dataset has no finals"),
            DatasetError::BlankCountry { year } => {
                write!(f, "final of {year} has a blank country name")
            }
            DatasetError::SameFinalists { year, country } => {
                write!(f, "final of {year} lists {country} as both winner and runner-up")
            }
            DatasetError::DuplicateYear(year) => write!(f, "year {year} appears more than once"),
        }
    }
}

impl std::error::Error for DatasetError {}
