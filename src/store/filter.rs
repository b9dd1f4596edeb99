//! Filter tabs and search for list pages
//!
//! A tab is a named predicate applied to the collection before pagination.
//! Time-relative tabs compare against the year captured in a [`FilterContext`]
//! when the derivation runs, so one render never mixes two clocks.

use std::fmt;
use std::str::FromStr;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::entity::Entity;
use crate::error::BoardError;
use crate::types::Resource;

/// Movies released within this many years count as recent
pub const RECENT_YEARS: i64 = 5;

/// Minimum IMDb rating for the high-rated tab
pub const HIGH_RATING: f64 = 7.0;

/// Movies released before this year are classics
pub const CLASSICS_BEFORE: i64 = 2000;

/// Clock-derived inputs for time-relative predicates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterContext {
    pub current_year: i64,
}

impl FilterContext {
    /// Capture the current year from the system clock
    pub fn now() -> Self {
        Self {
            current_year: i64::from(jiff::Zoned::now().year()),
        }
    }

    pub fn at_year(current_year: i64) -> Self {
        Self { current_year }
    }
}

/// Named filter tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    All,
    Recent,
    HighRated,
    Classics,
    Action,
    Male,
    Female,
}

impl Tab {
    pub const MOVIE_TABS: &[Tab] = &[
        Tab::All,
        Tab::Recent,
        Tab::HighRated,
        Tab::Classics,
        Tab::Action,
    ];

    pub const USER_TABS: &[Tab] = &[Tab::All, Tab::Male, Tab::Female];

    /// Tabs shown on the page for a resource
    pub fn for_resource(resource: Resource) -> &'static [Tab] {
        match resource {
            Resource::Movies => Self::MOVIE_TABS,
            Resource::Users => Self::USER_TABS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tab::All => "All",
            Tab::Recent => "Recent",
            Tab::HighRated => "High Rated",
            Tab::Classics => "Classics",
            Tab::Action => "Action",
            Tab::Male => "Male",
            Tab::Female => "Female",
        }
    }

    /// Parse a label leniently. Unrecognized labels fall back to `All`.
    pub fn from_label(label: &str) -> Self {
        label.parse().unwrap_or_default()
    }

    /// Reject a tab that is not shown on `resource`'s page
    pub fn for_checked(self, resource: Resource) -> Result<Self, BoardError> {
        let tabs = Self::for_resource(resource);
        if tabs.contains(&self) {
            return Ok(self);
        }
        let expected: Vec<&str> = tabs.iter().map(|tab| tab.label()).collect();
        Err(BoardError::Other(format!(
            "tab '{self}' does not apply to {resource}, expected one of: {}",
            expected.join(", ")
        )))
    }

    pub fn matches(self, entity: &Entity, ctx: FilterContext) -> bool {
        match self {
            Tab::All => true,
            Tab::Recent => entity
                .i64_field("year")
                .is_some_and(|year| year >= ctx.current_year - RECENT_YEARS),
            Tab::HighRated => entity
                .f64_field("imdb.rating")
                .is_some_and(|rating| rating >= HIGH_RATING),
            Tab::Classics => entity
                .i64_field("year")
                .is_some_and(|year| year < CLASSICS_BEFORE),
            Tab::Action => entity
                .str_list("genres")
                .iter()
                .any(|genre| genre.to_lowercase().contains("action")),
            Tab::Male => gender_is(entity, "male"),
            Tab::Female => gender_is(entity, "female"),
        }
    }
}

fn gender_is(entity: &Entity, gender: &str) -> bool {
    entity
        .str_field("gender")
        .is_some_and(|g| g.trim().eq_ignore_ascii_case(gender))
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "all" | "" => Ok(Tab::All),
            "recent" => Ok(Tab::Recent),
            "highrated" => Ok(Tab::HighRated),
            "classics" | "classic" => Ok(Tab::Classics),
            "action" => Ok(Tab::Action),
            "male" => Ok(Tab::Male),
            "female" => Ok(Tab::Female),
            _ => Err(format!("unknown tab '{s}'")),
        }
    }
}

/// Fuzzy search over the fields a person would type into the search box.
///
/// Built once per derivation and reused for every entity.
pub struct SearchQuery<'q> {
    query: &'q str,
    matcher: SkimMatcherV2,
}

impl<'q> SearchQuery<'q> {
    pub fn new(query: &'q str) -> Self {
        Self {
            query: query.trim(),
            matcher: SkimMatcherV2::default().smart_case(),
        }
    }

    /// An empty query matches everything
    pub fn matches(&self, entity: &Entity, resource: Resource) -> bool {
        if self.query.is_empty() {
            return true;
        }
        self.matcher
            .fuzzy_match(&search_text(entity, resource), self.query)
            .is_some()
    }
}

fn search_text(entity: &Entity, resource: Resource) -> String {
    let label = entity.str_field(resource.label_field()).unwrap_or("");
    match resource {
        Resource::Movies => format!(
            "{} {} {}",
            entity.id(),
            label,
            entity.str_list("genres").join(" ")
        ),
        Resource::Users => format!(
            "{} {} {} {}",
            entity.id(),
            label,
            entity.str_field("email").unwrap_or(""),
            entity.str_field("country").unwrap_or("")
        ),
    }
}
