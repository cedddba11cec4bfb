//! Place catalog records and the criteria used to query them

use serde::{Deserialize, Serialize};

use super::Coordinate;

/// Season tag that matches every season filter
pub const ALL_SEASONS: &str = "all";

/// A point of interest in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Best time to visit; `"all"` means year-round
    pub season: String,
    /// Image URL
    pub image: String,
    pub state: String,
    pub district: String,
}

impl Place {
    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    #[must_use]
    pub fn is_year_round(&self) -> bool {
        self.season == ALL_SEASONS
    }

    /// Human readable season label
    #[must_use]
    pub fn season_label(&self) -> &str {
        if self.is_year_round() {
            "All year"
        } else {
            &self.season
        }
    }
}

/// Client supplied filters; every field is optional and they combine with AND
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryCriteria {
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

impl QueryCriteria {
    #[must_use]
    pub fn with_season(mut self, season: impl Into<String>) -> Self {
        self.season = Some(season.into());
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Season filter, `None` when unset, empty or the `"all"` wildcard
    #[must_use]
    pub fn season_filter(&self) -> Option<&str> {
        non_empty(&self.season).filter(|season| *season != ALL_SEASONS)
    }

    #[must_use]
    pub fn state_filter(&self) -> Option<&str> {
        non_empty(&self.state)
    }

    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        non_empty(&self.search)
    }
}

// `?season=` arrives as Some("")
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
