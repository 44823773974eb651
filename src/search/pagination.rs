// src/search/pagination.rs
use crate::search::criteria::QueryParams;
use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// A 1-indexed page request. Both fields are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Zero values fall back to the defaults.
    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: if page == 0 { DEFAULT_PAGE } else { page },
            limit: if limit == 0 { DEFAULT_PAGE_SIZE } else { limit },
        }
    }

    /// Reads `page` and `limit`; missing, non-numeric or non-positive
    /// values become the defaults.
    pub fn from_params(params: &QueryParams) -> Self {
        let positive = |key: &str, default: usize| {
            params
                .get(key)
                .and_then(|raw| raw.trim().parse::<usize>().ok())
                .filter(|n| *n >= 1)
                .unwrap_or(default)
        };

        Self {
            page: positive("page", DEFAULT_PAGE),
            limit: positive("limit", DEFAULT_PAGE_SIZE),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// One page of results plus the totals needed to render pagination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub properties: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
    pub limit: usize,
}

/// Slice `items` to the requested page. Pages past the end are empty.
pub fn paginate<T>(items: Vec<T>, req: PageRequest) -> Page<T> {
    let total = items.len();
    let total_pages = total.div_ceil(req.limit);

    let properties = items
        .into_iter()
        .skip(req.offset())
        .take(req.limit)
        .collect();

    Page {
        properties,
        total,
        page: req.page,
        total_pages,
        limit: req.limit,
    }
}
