//! # Book Query Layer
//!
//! Translates raw listing parameters into a typed, deterministic query.
//!
//! ## How a Request Becomes a Query
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              GET /api/books/?title=harry&ordering=-publication_year     │
//! │                                │                                        │
//! │                                ▼                                        │
//! │  BookQueryParams { title: Some("harry"), ordering: Some("-publ…") }    │
//! │                                │  BookQuery::parse                      │
//! │                                ▼                                        │
//! │  BookQuery {                                                           │
//! │      title_contains: Some("harry"),        ← case-insensitive contains │
//! │      ordering: [publication_year DESC, id ASC],  ← stable tie-break    │
//! │      ...                                                               │
//! │  }                                                                     │
//! │                                │  BookRepository::list                  │
//! │                                ▼                                        │
//! │  SELECT … WHERE … ORDER BY … (shelf-db)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//! - Filters combine with logical AND; absent parameters impose nothing
//! - Empty-string values are treated as absent
//! - Unknown ordering fields are skipped
//! - Malformed numeric values are a hard validation error, not a no-op

use serde::Deserialize;

use crate::error::{ValidationError, ValidationResult};
use crate::validation::validate_search_query;

// =============================================================================
// Raw Parameters
// =============================================================================

/// Raw string parameters accepted by the book listing endpoint.
///
/// All fields are optional strings: the HTTP layer deserializes straight
/// into this struct (unrecognized parameters are dropped by serde), and
/// [`BookQuery::parse`] does the typed interpretation. Numeric fields stay
/// `String` here so that a malformed value can be rejected with an error
/// naming the exact parameter instead of a generic deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookQueryParams {
    /// Case-insensitive title substring.
    pub title: Option<String>,
    /// Exact author id.
    pub author: Option<String>,
    /// Case-insensitive author-name substring.
    pub author_name: Option<String>,
    /// Exact publication year.
    pub publication_year: Option<String>,
    /// Lower publication-year bound, inclusive.
    pub publication_year_min: Option<String>,
    /// Upper publication-year bound, inclusive.
    pub publication_year_max: Option<String>,
    /// Matches title OR author name, case-insensitive.
    pub search: Option<String>,
    /// Comma-separated ordering keys, `-` prefix for descending.
    pub ordering: Option<String>,
}

// =============================================================================
// Ordering
// =============================================================================

/// A sortable field of the book listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    Title,
    PublicationYear,
    AuthorName,
    /// Record id. Not user-selectable; appended as the stable tie-break.
    Id,
}

impl OrderField {
    /// Parses a user-supplied ordering field name. Unknown names yield None
    /// and are skipped by the caller.
    fn from_param(name: &str) -> Option<Self> {
        match name {
            "title" => Some(OrderField::Title),
            "publication_year" => Some(OrderField::PublicationYear),
            "author_name" => Some(OrderField::AuthorName),
            _ => None,
        }
    }
}

/// One ordering key: a field plus a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderKey {
    pub field: OrderField,
    pub descending: bool,
}

impl OrderKey {
    pub const fn asc(field: OrderField) -> Self {
        OrderKey {
            field,
            descending: false,
        }
    }

    pub const fn desc(field: OrderField) -> Self {
        OrderKey {
            field,
            descending: true,
        }
    }
}

// =============================================================================
// Typed Query
// =============================================================================

/// A fully parsed book query: typed filters plus a complete ordering.
///
/// Invariants (upheld by [`BookQuery::parse`] and [`BookQuery::default`]):
/// - `ordering` is never empty
/// - the last ordering key is always `id ASC`, making results deterministic
///   for any filter combination
#[derive(Debug, Clone, PartialEq)]
pub struct BookQuery {
    pub title_contains: Option<String>,
    pub author_id: Option<String>,
    pub author_name_contains: Option<String>,
    pub year: Option<i64>,
    pub year_min: Option<i64>,
    pub year_max: Option<i64>,
    pub search: Option<String>,
    pub ordering: Vec<OrderKey>,
}

impl Default for BookQuery {
    /// An unfiltered query with the catalog's default ordering:
    /// newest first, then by title, then by id.
    fn default() -> Self {
        BookQuery {
            title_contains: None,
            author_id: None,
            author_name_contains: None,
            year: None,
            year_min: None,
            year_max: None,
            search: None,
            ordering: default_ordering(),
        }
    }
}

/// Default ordering when the caller supplies none: `-publication_year, title`.
fn default_ordering() -> Vec<OrderKey> {
    vec![
        OrderKey::desc(OrderField::PublicationYear),
        OrderKey::asc(OrderField::Title),
        OrderKey::asc(OrderField::Id),
    ]
}

impl BookQuery {
    /// Parses raw parameters into a typed query.
    ///
    /// ## Errors
    /// Returns a [`ValidationError`] naming the offending parameter when a
    /// year parameter is not an integer, or when the search query exceeds
    /// its length cap. Unknown ordering fields are silently skipped; if no
    /// recognized ordering field remains, the default ordering applies.
    pub fn parse(params: &BookQueryParams) -> ValidationResult<Self> {
        let mut query = BookQuery {
            title_contains: non_empty(&params.title),
            author_id: non_empty(&params.author),
            author_name_contains: non_empty(&params.author_name),
            year: parse_year(&params.publication_year, "publication_year")?,
            year_min: parse_year(&params.publication_year_min, "publication_year_min")?,
            year_max: parse_year(&params.publication_year_max, "publication_year_max")?,
            search: None,
            ordering: default_ordering(),
        };

        if let Some(raw) = non_empty(&params.search) {
            let trimmed = validate_search_query(&raw)?;
            if !trimmed.is_empty() {
                query.search = Some(trimmed);
            }
        }

        if let Some(raw) = non_empty(&params.ordering) {
            let keys = parse_ordering(&raw);
            if !keys.is_empty() {
                query.ordering = keys;
            }
        }

        Ok(query)
    }

    /// True when no filter parameter constrains the result.
    pub fn is_unfiltered(&self) -> bool {
        self.title_contains.is_none()
            && self.author_id.is_none()
            && self.author_name_contains.is_none()
            && self.year.is_none()
            && self.year_min.is_none()
            && self.year_max.is_none()
            && self.search.is_none()
    }
}

// =============================================================================
// Parse Helpers
// =============================================================================

/// Treats absent and empty-string parameters alike.
fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

/// Parses an optional year parameter, rejecting non-integer values.
fn parse_year(value: &Option<String>, field: &str) -> ValidationResult<Option<i64>> {
    let Some(raw) = non_empty(value) else {
        return Ok(None);
    };

    raw.trim()
        .parse::<i64>()
        .map(Some)
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be an integer".to_string(),
        })
}

/// Parses the comma-separated ordering parameter.
///
/// Recognized keys are applied in listed priority order; the stable id
/// tie-break is always appended last.
fn parse_ordering(raw: &str) -> Vec<OrderKey> {
    let mut keys: Vec<OrderKey> = Vec::new();

    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        let (name, descending) = match part.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (part, false),
        };

        if let Some(field) = OrderField::from_param(name) {
            keys.push(OrderKey { field, descending });
        }
    }

    if keys.is_empty() {
        return keys;
    }

    keys.push(OrderKey::asc(OrderField::Id));
    keys
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> BookQueryParams {
        BookQueryParams::default()
    }

    #[test]
    fn test_empty_params_give_default_query() {
        let query = BookQuery::parse(&params()).unwrap();
        assert!(query.is_unfiltered());
        assert_eq!(query, BookQuery::default());
        assert_eq!(
            query.ordering,
            vec![
                OrderKey::desc(OrderField::PublicationYear),
                OrderKey::asc(OrderField::Title),
                OrderKey::asc(OrderField::Id),
            ]
        );
    }

    #[test]
    fn test_filters_parse() {
        let mut p = params();
        p.title = Some("harry".to_string());
        p.author = Some("a1".to_string());
        p.author_name = Some("rowling".to_string());
        p.publication_year = Some("1997".to_string());

        let query = BookQuery::parse(&p).unwrap();
        assert_eq!(query.title_contains.as_deref(), Some("harry"));
        assert_eq!(query.author_id.as_deref(), Some("a1"));
        assert_eq!(query.author_name_contains.as_deref(), Some("rowling"));
        assert_eq!(query.year, Some(1997));
        assert!(!query.is_unfiltered());
    }

    #[test]
    fn test_year_range_parses() {
        let mut p = params();
        p.publication_year_min = Some("2000".to_string());
        p.publication_year_max = Some("2010".to_string());

        let query = BookQuery::parse(&p).unwrap();
        assert_eq!(query.year_min, Some(2000));
        assert_eq!(query.year_max, Some(2010));
    }

    #[test]
    fn test_malformed_year_names_the_parameter() {
        let mut p = params();
        p.publication_year_min = Some("abc".to_string());

        let err = BookQuery::parse(&p).unwrap_err();
        assert_eq!(err.field(), "publication_year_min");

        let mut p = params();
        p.publication_year = Some("19.97".to_string());
        let err = BookQuery::parse(&p).unwrap_err();
        assert_eq!(err.field(), "publication_year");
    }

    #[test]
    fn test_empty_string_params_are_absent() {
        let mut p = params();
        p.title = Some(String::new());
        p.publication_year_min = Some(String::new());
        p.search = Some("   ".to_string());

        let query = BookQuery::parse(&p).unwrap();
        assert!(query.is_unfiltered());
    }

    #[test]
    fn test_ordering_parses_in_priority_order() {
        let mut p = params();
        p.ordering = Some("-publication_year,title".to_string());

        let query = BookQuery::parse(&p).unwrap();
        assert_eq!(
            query.ordering,
            vec![
                OrderKey::desc(OrderField::PublicationYear),
                OrderKey::asc(OrderField::Title),
                OrderKey::asc(OrderField::Id),
            ]
        );
    }

    #[test]
    fn test_ordering_author_name_descending() {
        let mut p = params();
        p.ordering = Some("-author_name".to_string());

        let query = BookQuery::parse(&p).unwrap();
        assert_eq!(
            query.ordering,
            vec![
                OrderKey::desc(OrderField::AuthorName),
                OrderKey::asc(OrderField::Id),
            ]
        );
    }

    #[test]
    fn test_unknown_ordering_fields_are_skipped() {
        let mut p = params();
        p.ordering = Some("rank,-title, ,price".to_string());

        let query = BookQuery::parse(&p).unwrap();
        assert_eq!(
            query.ordering,
            vec![
                OrderKey::desc(OrderField::Title),
                OrderKey::asc(OrderField::Id),
            ]
        );
    }

    #[test]
    fn test_all_unknown_ordering_falls_back_to_default() {
        let mut p = params();
        p.ordering = Some("rank,price".to_string());

        let query = BookQuery::parse(&p).unwrap();
        assert_eq!(query.ordering, BookQuery::default().ordering);
    }

    #[test]
    fn test_search_is_trimmed_and_capped() {
        let mut p = params();
        p.search = Some("  potter ".to_string());
        let query = BookQuery::parse(&p).unwrap();
        assert_eq!(query.search.as_deref(), Some("potter"));

        let mut p = params();
        p.search = Some("x".repeat(200));
        let err = BookQuery::parse(&p).unwrap_err();
        assert_eq!(err.field(), "search");
    }
}
