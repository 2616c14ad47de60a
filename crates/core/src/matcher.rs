//! Keyword matching over trip records.
//!
//! A raw search term is split on whitespace into [`Keyword`]s. A trip matches when any keyword
//! is a case-insensitive substring of its title, its description, or one of its tags.
//!
//! Notes:
//! - Keywords are OR-ed: adding a keyword can only widen the result set.
//! - A term with no keywords (empty or whitespace only) matches every trip. This is the
//!   documented policy for the empty search box, which lists the whole catalogue.
//! - Matching is literal substring search; no part of the term is interpreted as a pattern.
//! - Results keep catalogue order. There is no ranking.

use crate::trip::Trip;
use trips_types::Keyword;

/// Matcher built from one raw search term.
#[derive(Clone, Debug)]
pub struct KeywordMatcher {
    keywords: Vec<Keyword>,
}

impl KeywordMatcher {
    pub fn new(term: &str) -> Self {
        Self {
            keywords: Keyword::split(term),
        }
    }

    pub fn keywords(&self) -> &[Keyword] {
        &self.keywords
    }

    /// True when the term carried no keywords, so every trip matches.
    pub fn matches_everything(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn is_match(&self, trip: &Trip) -> bool {
        if self.matches_everything() {
            return true;
        }

        trip.searchable_text()
            .any(|field| self.keywords.iter().any(|keyword| keyword.is_found_in(field)))
    }

    /// Returns the matching trips in their original order.
    pub fn filter<'a>(&self, trips: &'a [Trip]) -> Vec<&'a Trip> {
        trips.iter().filter(|trip| self.is_match(trip)).collect()
    }
}

/// Convenience wrapper: build a matcher for `term` and filter `trips` with it.
pub fn match_trips<'a>(term: &str, trips: &'a [Trip]) -> Vec<&'a Trip> {
    KeywordMatcher::new(term).filter(trips)
}
