//! Catalog filtering by season, state and free-text search

use std::collections::BTreeSet;

use tracing::info;

use super::PlaceRepository;
use crate::models::{ALL_SEASONS, Place, QueryCriteria};

/// Filter the catalog by the given criteria.
///
/// Season, state and search combine with AND. When a search term leaves no
/// results, the whole catalog is searched again on state and district only, so
/// a region name still lists every place in that region even when the season
/// or state filters had excluded them.
pub fn query(catalog: &dyn PlaceRepository, criteria: &QueryCriteria) -> Vec<Place> {
    let season = criteria.season_filter();
    let state = criteria.state_filter().map(str::to_lowercase);
    let search = criteria.search_term().map(str::to_lowercase);

    let mut places: Vec<Place> = catalog
        .all()
        .iter()
        .filter(|place| season.is_none_or(|season| matches_season(place, season)))
        .filter(|place| {
            state
                .as_deref()
                .is_none_or(|state| place.state.to_lowercase() == state)
        })
        .filter(|place| {
            search
                .as_deref()
                .is_none_or(|term| matches_search(place, term))
        })
        .cloned()
        .collect();

    if let Some(term) = search.as_deref() {
        if places.is_empty() {
            places = catalog
                .all()
                .iter()
                .filter(|place| matches_region(place, term))
                .cloned()
                .collect();
        }

        info!(
            "Search for \"{}\" returned {} results",
            criteria.search_term().unwrap_or_default(),
            places.len()
        );
    }

    places
}

/// Unique season tags, sorted
pub fn seasons(catalog: &dyn PlaceRepository) -> Vec<String> {
    unique_sorted(catalog.all().iter().map(|place| place.season.as_str()))
}

/// Unique states, sorted
pub fn states(catalog: &dyn PlaceRepository) -> Vec<String> {
    unique_sorted(catalog.all().iter().map(|place| place.state.as_str()))
}

fn unique_sorted<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    values
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

fn matches_season(place: &Place, season: &str) -> bool {
    place.season == season || place.season == ALL_SEASONS
}

// `term` is already lowercase
fn matches_search(place: &Place, term: &str) -> bool {
    [&place.name, &place.description, &place.state, &place.district]
        .iter()
        .any(|field| field.to_lowercase().contains(term))
}

fn matches_region(place: &Place, term: &str) -> bool {
    place.state.to_lowercase().contains(term) || place.district.to_lowercase().contains(term)
}
