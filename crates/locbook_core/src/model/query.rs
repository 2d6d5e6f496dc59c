//! Caller-owned query state for listing locations.
//!
//! # Responsibility
//! - Hold the filter, sort and optional page used by `LocationCatalog::query`.
//! - Apply them to an in-memory collection.
//!
//! # Invariants
//! - Exactly one sort key is active at a time.
//! - Invalid `min_rate` input never changes the filter.
//! - Paging is applied after sorting.
//!
//! # See also
//! - `LocationCatalog::query`, the only caller of `LocationQuery::apply`.

use crate::model::location::Location;
use log::debug;
use regex::{Regex, RegexBuilder};
use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Rows per page when a page is requested without an explicit size.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Name/rating constraints. Defaults to "no constraint".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationFilter {
    /// Case-insensitive pattern matched against `Location::name`.
    pub text: String,
    /// Inclusive lower bound on `Location::rate`. `0` disables the bound.
    pub min_rate: f64,
}

/// Partial filter update, typically straight from UI input.
///
/// `min_rate` is kept as raw text: values that do not parse as a finite
/// number are ignored on merge, and a blank value resets the bound to 0.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub text: Option<String>,
    pub min_rate: Option<String>,
}

impl FilterPatch {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_min_rate(mut self, min_rate: impl ToString) -> Self {
        self.min_rate = Some(min_rate.to_string());
        self
    }
}

impl LocationFilter {
    /// Merges supplied fields into this filter and returns the result.
    pub fn merge(&mut self, patch: FilterPatch) -> &Self {
        if let Some(text) = patch.text {
            self.text = text;
        }
        if let Some(raw) = patch.min_rate {
            match parse_min_rate(&raw) {
                Some(min_rate) => self.min_rate = min_rate,
                None => debug!(
                    "event=filter_merge module=query status=ignored field=min_rate value={raw:?}"
                ),
            }
        }
        self
    }

    fn retain(&self, locations: &mut Vec<Location>) {
        if !self.text.is_empty() {
            let matcher = NameMatcher::new(&self.text);
            locations.retain(|location| matcher.matches(&location.name));
        }
        if self.min_rate != 0.0 {
            locations.retain(|location| f64::from(location.rate) >= self.min_rate);
        }
    }
}

fn parse_min_rate(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

enum NameMatcher {
    Pattern(Regex),
    /// Lowercased literal, used when the text is not a valid pattern.
    Literal(String),
}

impl NameMatcher {
    fn new(text: &str) -> Self {
        match RegexBuilder::new(text).case_insensitive(true).build() {
            Ok(regex) => Self::Pattern(regex),
            Err(_) => Self::Literal(text.to_lowercase()),
        }
    }

    fn matches(&self, name: &str) -> bool {
        match self {
            Self::Pattern(regex) => regex.is_match(name),
            Self::Literal(needle) => name.to_lowercase().contains(needle.as_str()),
        }
    }
}

/// Field a query result is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Rate,
    Name,
    /// Last update time (`updated_at`).
    Date,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Single-key ordering. Defaults to rate, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationSort {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl LocationSort {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    fn compare(&self, left: &Location, right: &Location) -> Ordering {
        let ordering = match self.key {
            SortKey::Rate => left.rate.cmp(&right.rate),
            SortKey::Name => compare_names(&left.name, &right.name),
            SortKey::Date => left.updated_at.cmp(&right.updated_at),
        };
        self.direction.apply(ordering)
    }
}

impl Default for LocationSort {
    fn default() -> Self {
        Self::new(SortKey::Rate, SortDirection::Descending)
    }
}

// Accents and case are folded away first so "Éilat" sorts next to "Eilat";
// the raw names only break ties.
fn compare_names(left: &str, right: &str) -> Ordering {
    name_sort_key(left)
        .cmp(&name_sort_key(right))
        .then_with(|| left.cmp(right))
}

fn name_sort_key(name: &str) -> String {
    name.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Zero-based page slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub index: usize,
    pub size: usize,
}

impl PageRequest {
    /// Page `index` with `DEFAULT_PAGE_SIZE` rows.
    pub fn new(index: usize) -> Self {
        Self::with_size(index, DEFAULT_PAGE_SIZE)
    }

    /// A size of 0 is clamped to 1.
    pub fn with_size(index: usize, size: usize) -> Self {
        Self {
            index,
            size: size.max(1),
        }
    }

    fn start(&self) -> usize {
        self.index.saturating_mul(self.size)
    }
}

/// Everything `LocationCatalog::query` needs to shape a result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationQuery {
    pub filter: LocationFilter,
    pub sort: LocationSort,
    pub page: Option<PageRequest>,
}

impl LocationQuery {
    /// Merges a partial filter and returns the full resulting filter.
    pub fn set_filter_by(&mut self, patch: FilterPatch) -> &LocationFilter {
        self.filter.merge(patch)
    }

    /// Replaces the sort wholesale.
    pub fn set_sort_by(&mut self, sort: LocationSort) {
        self.sort = sort;
    }

    pub fn set_page(&mut self, page: Option<PageRequest>) {
        self.page = page;
    }

    /// Filters, sorts and pages `locations`.
    ///
    /// The sort is stable, so ties keep storage order.
    pub fn apply(&self, mut locations: Vec<Location>) -> Vec<Location> {
        self.filter.retain(&mut locations);
        locations.sort_by(|left, right| self.sort.compare(left, right));

        match self.page {
            Some(page) => locations
                .into_iter()
                .skip(page.start())
                .take(page.size)
                .collect(),
            None => locations,
        }
    }
}
