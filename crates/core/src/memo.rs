//! Memo validation, list filters, and search matching.

use std::fmt;
use std::str::FromStr;

use crate::types::DbId;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Sentinel accepted by the `categoryId` list filter meaning "every category".
pub const ALL_CATEGORIES: &str = "all";

/// Maximum length of a memo title in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate memo title and content: both required, title bounded.
pub fn validate_memo_fields(title: &str, content: &str) -> Result<(), String> {
    if title.trim().is_empty() || content.trim().is_empty() {
        return Err("Title and content are required".to_string());
    }
    if title.chars().count() > MAX_TITLE_LENGTH {
        return Err(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        ));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Category filter
// ---------------------------------------------------------------------------

/// The `categoryId` filter of a memo listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(DbId),
}

impl CategoryFilter {
    /// Parse the optional query value. Absent, empty, and `"all"` mean [`CategoryFilter::All`].
    pub fn from_query(value: Option<&str>) -> Result<Self, String> {
        match value.map(str::trim) {
            None | Some("") => Ok(Self::All),
            Some(v) => v.parse(),
        }
    }

    /// The category id to restrict to, if any.
    pub fn category_id(self) -> Option<DbId> {
        match self {
            Self::All => None,
            Self::Category(id) => Some(id),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_CATEGORIES {
            return Ok(Self::All);
        }
        s.parse::<DbId>()
            .map(Self::Category)
            .map_err(|_| format!("Invalid categoryId: {s}"))
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CATEGORIES),
            Self::Category(id) => write!(f, "{id}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Normalize a raw search query into a lowercase term.
///
/// Returns `None` for absent or whitespace-only input, which disables the
/// search filter entirely.
pub fn normalize_search(query: Option<&str>) -> Option<String> {
    query
        .filter(|q| !q.trim().is_empty())
        .map(str::to_lowercase)
}

/// Case-insensitive substring match over title or content.
///
/// `term` must already be lowercased (see [`normalize_search`]).
pub fn matches_search(title: &str, content: &str, term: &str) -> bool {
    title.to_lowercase().contains(term) || content.to_lowercase().contains(term)
}
