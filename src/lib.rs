//! Terminal dashboard of FIFA World Cup finals: a braille choropleth world
//! map of titles per country, filtered by country or by year.

pub mod braille;
pub mod config;
pub mod dashboard;
pub mod data;
pub mod dataset;
pub mod error;
pub mod map;
pub mod stats;
pub mod ui;
pub mod view;
