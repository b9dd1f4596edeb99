//! Summary counts for the cards above each list page

use std::collections::BTreeSet;

use jiff::civil::Date;
use jiff::tz::TimeZone;
use serde::Serialize;

use crate::entity::Entity;
use crate::types::Resource;

use super::filter::{FilterContext, Tab};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieStats {
    pub total: usize,
    pub recent: usize,
    pub high_rated: usize,
    pub genres: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserStats {
    pub total: usize,
    pub male: usize,
    pub female: usize,
    pub registered_this_month: usize,
}

/// Stats for either resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Stats {
    Movies(MovieStats),
    Users(UserStats),
}

impl Stats {
    /// Labelled values in display order
    pub fn cards(&self) -> Vec<(&'static str, usize)> {
        match self {
            Stats::Movies(s) => vec![
                ("Total Movies", s.total),
                ("Recent Releases", s.recent),
                ("High Rated", s.high_rated),
                ("Genres", s.genres),
            ],
            Stats::Users(s) => vec![
                ("Total Users", s.total),
                ("Male", s.male),
                ("Female", s.female),
                ("Joined This Month", s.registered_this_month),
            ],
        }
    }
}

/// Compute stats over the whole collection (tab and search are ignored)
pub fn compute_stats(entities: &[Entity], resource: Resource, today: Date) -> Stats {
    match resource {
        Resource::Movies => Stats::Movies(movie_stats(entities, today)),
        Resource::Users => Stats::Users(user_stats(entities, today)),
    }
}

fn count(entities: &[Entity], tab: Tab, ctx: FilterContext) -> usize {
    entities.iter().filter(|e| tab.matches(e, ctx)).count()
}

fn movie_stats(entities: &[Entity], today: Date) -> MovieStats {
    let ctx = FilterContext::at_year(i64::from(today.year()));
    let genres: BTreeSet<&str> = entities
        .iter()
        .flat_map(|e| e.str_list("genres"))
        .collect();

    MovieStats {
        total: entities.len(),
        recent: count(entities, Tab::Recent, ctx),
        high_rated: count(entities, Tab::HighRated, ctx),
        genres: genres.len(),
    }
}

fn user_stats(entities: &[Entity], today: Date) -> UserStats {
    let ctx = FilterContext::at_year(i64::from(today.year()));
    let registered_this_month = entities
        .iter()
        .filter_map(registered_on)
        .filter(|d| d.year() == today.year() && d.month() == today.month())
        .count();

    UserStats {
        total: entities.len(),
        male: count(entities, Tab::Male, ctx),
        female: count(entities, Tab::Female, ctx),
        registered_this_month,
    }
}

/// UTC registration date from the RFC 3339 `registeredAt` field
fn registered_on(entity: &Entity) -> Option<Date> {
    let timestamp: jiff::Timestamp = entity.str_field("registeredAt")?.parse().ok()?;
    Some(timestamp.to_zoned(TimeZone::UTC).date())
}
