//! Trip search service.
//!
//! Owns the boundary check for the search term: an absent term is a caller error, while an
//! empty one is a valid search that returns the whole catalogue.

use crate::catalog::TripCatalog;
use crate::constants::KEYWORDS_PARAM;
use crate::matcher::KeywordMatcher;
use crate::trip::Trip;
use crate::{TripError, TripResult};

/// Pure trip search operations - no API concerns
#[derive(Clone, Debug)]
pub struct TripService {
    catalog: TripCatalog,
}

impl TripService {
    pub fn new(catalog: TripCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &TripCatalog {
        &self.catalog
    }

    /// Search the catalogue for `keywords`.
    ///
    /// # Errors
    /// Returns [`TripError::MissingParameter`] when `keywords` is `None`.
    pub fn search(&self, keywords: Option<&str>) -> TripResult<Vec<&Trip>> {
        let term = keywords.ok_or(TripError::MissingParameter(KEYWORDS_PARAM))?;
        let matcher = KeywordMatcher::new(term);
        let results = matcher.filter(self.catalog.trips());

        tracing::debug!(
            keywords = matcher.keywords().len(),
            matched = results.len(),
            "trip search"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TripService {
        let catalog = TripCatalog::from_yaml_str(
            r#"
- id: "1"
  title: Beach Trip
  tags: [sun, sand]
- id: "2"
  title: Mountain Hike
  tags: [cold]
"#,
        )
        .expect("catalogue");
        TripService::new(catalog)
    }

    #[test]
    fn missing_keywords_is_an_error() {
        let err = service().search(None).expect_err("absent keywords should fail");
        assert!(matches!(err, TripError::MissingParameter("keywords")));
        assert_eq!(
            err.to_string(),
            "Please send keywords parameter in the URL endpoint"
        );
    }

    #[test]
    fn empty_keywords_return_whole_catalogue() {
        let service = service();
        let results = service.search(Some("")).expect("empty search");
        assert_eq!(results.len(), service.catalog().len());
    }

    #[test]
    fn keywords_filter_catalogue() {
        let service = service();
        let results = service.search(Some("SAND")).expect("search");
        let ids: Vec<&str> = results.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1"]);
    }
}
