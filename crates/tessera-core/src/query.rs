//! Query types for searching entities within a project

use crate::limits::MAX_PAGE_SIZE;
use serde::{Deserialize, Serialize};

/// Search mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Case-insensitive substring matching
    #[default]
    Exact,
    /// Fuzzy matching ranked by match score
    Fuzzy,
}

impl std::str::FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "fuzzy" => Ok(Self::Fuzzy),
            other => Err(format!("unknown search mode '{}'", other)),
        }
    }
}

/// Label matching mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelMatchMode {
    /// Match any of the specified labels
    #[default]
    Any,
    /// Match all of the specified labels
    All,
}

/// Pagination options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Page number (0-indexed)
    #[serde(default)]
    pub page: usize,

    /// Number of results per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: default_page_size(),
        }
    }
}

fn default_page_size() -> usize {
    20
}

impl Pagination {
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// Items skipped before this page, saturating at `usize::MAX`
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.page_size)
    }

    /// `None` when the page lies past any addressable offset
    pub fn checked_offset(&self) -> Option<usize> {
        self.page.checked_mul(self.page_size)
    }
}

/// Entity search query builder
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Text to search for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Search mode
    #[serde(default)]
    pub mode: SearchMode,

    /// Filter by entity types
    #[serde(default)]
    pub entity_types: Vec<String>,

    /// Filter by labels
    #[serde(default)]
    pub labels: Vec<String>,

    /// Label matching mode
    #[serde(default)]
    pub label_match_mode: LabelMatchMode,

    /// Pagination
    #[serde(default)]
    pub pagination: Pagination,
}

impl SearchQuery {
    /// Create a new search query with text
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Default::default()
        }
    }

    /// Create an empty search query (filter-only search)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set search mode
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Add entity type filter
    pub fn with_entity_type(mut self, entity_type: impl Into<String>) -> Self {
        self.entity_types.push(entity_type.into());
        self
    }

    /// Add label filter
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.push(label.into());
        self
    }

    /// Set label match mode
    pub fn with_label_match_mode(mut self, mode: LabelMatchMode) -> Self {
        self.label_match_mode = mode;
        self
    }

    /// Set pagination
    pub fn with_pagination(mut self, page: usize, page_size: usize) -> Self {
        self.pagination = Pagination::new(page, page_size);
        self
    }

    /// Text to match, ignoring blank input
    pub fn search_text(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim).filter(|t| !t.is_empty())
    }
}

/// Paginated results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResults<T> {
    /// The data for this page
    pub data: Vec<T>,

    /// Pagination metadata
    pub pagination: PaginationInfo,
}

impl<T> PaginatedResults<T> {
    /// Cut one page out of a full, ordered result list
    pub fn from_full(items: Vec<T>, pagination: &Pagination) -> Self {
        let total = items.len();
        let data = items
            .into_iter()
            .skip(pagination.offset())
            .take(pagination.page_size)
            .collect();
        Self {
            data,
            pagination: PaginationInfo::new(pagination.page, pagination.page_size, total),
        }
    }
}

/// Pagination metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationInfo {
    pub current_page: usize,
    pub page_size: usize,
    pub total_count: usize,
    pub total_pages: usize,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PaginationInfo {
    pub fn new(current_page: usize, page_size: usize, total_count: usize) -> Self {
        let total_pages = total_count.div_ceil(page_size.max(1));
        Self {
            current_page,
            page_size,
            total_count,
            total_pages,
            has_next_page: current_page.saturating_add(1) < total_pages,
            has_previous_page: current_page > 0,
        }
    }
}
