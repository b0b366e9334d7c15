//! Search query value object.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A hospital search: free-text term, optional specialty and target page.
///
/// Two queries are equal when their term and specialty match; the page is
/// ignored. Equality decides whether an incoming page continues the current
/// accumulation or belongs to a different session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    term: String,
    specialty: Option<String>,
    page: u32,
}

impl SearchQuery {
    /// Creates a query for page 1.
    ///
    /// The term is trimmed. An empty or whitespace-only specialty means
    /// "all specialties".
    pub fn new(term: impl Into<String>, specialty: Option<String>) -> Self {
        let specialty = specialty
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        Self {
            term: term.into().trim().to_string(),
            specialty,
            page: 1,
        }
    }

    /// Returns the same query targeting another page. Pages below 1 become 1.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            term: self.term.clone(),
            specialty: self.specialty.clone(),
            page: page.max(1),
        }
    }

    /// Returns the free-text term.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// Returns the specialty filter, if any.
    pub fn specialty(&self) -> Option<&str> {
        self.specialty.as_deref()
    }

    /// Returns the 1-based target page.
    pub fn page(&self) -> u32 {
        self.page
    }
}

impl Default for SearchQuery {
    fn default() -> Self {
        Self::new("", None)
    }
}

impl PartialEq for SearchQuery {
    fn eq(&self, other: &Self) -> bool {
        self.term == other.term && self.specialty == other.specialty
    }
}

impl Eq for SearchQuery {}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.specialty {
            Some(specialty) => write!(f, "'{}' in {} (page {})", self.term, specialty, self.page),
            None => write!(f, "'{}' (page {})", self.term, self.page),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_ignores_page() {
        let q = SearchQuery::new("apollo", Some("Cardiology".to_string()));
        assert_eq!(q, q.with_page(3));
        assert_ne!(q, SearchQuery::new("apollo", None));
        assert_ne!(q, SearchQuery::new("aiims", Some("Cardiology".to_string())));
    }

    #[test]
    fn test_blank_specialty_is_none() {
        let q = SearchQuery::new("  apollo ", Some("  ".to_string()));
        assert_eq!(q.term(), "apollo");
        assert_eq!(q.specialty(), None);
        assert_eq!(q.page(), 1);
    }

    #[test]
    fn test_page_floor() {
        let q = SearchQuery::new("x", None).with_page(0);
        assert_eq!(q.page(), 1);
    }

    #[test]
    fn test_display() {
        let q = SearchQuery::new("apollo", Some("Cardiology".to_string())).with_page(2);
        assert_eq!(q.to_string(), "'apollo' in Cardiology (page 2)");
    }
}
