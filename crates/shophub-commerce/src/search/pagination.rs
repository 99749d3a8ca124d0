//! Server-backed pagination.

use serde::{Deserialize, Serialize};

/// Pagination info for the catalog grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Total number of items reported by the server.
    pub total: u64,
    /// Total number of pages.
    pub total_pages: u32,
}

impl Pagination {
    /// Create pagination info, clamping `page` into range.
    pub fn new(page: u32, per_page: u32, total: u64) -> Self {
        let total_pages = Self::total_pages_for(total, per_page);
        Self {
            page: clamp_page(page, total_pages),
            per_page,
            total,
            total_pages,
        }
    }

    /// `ceil(total / per_page)`; zero items means zero pages.
    pub fn total_pages_for(total: u64, per_page: u32) -> u32 {
        if per_page == 0 {
            return 0;
        }
        let pages = total.div_ceil(u64::from(per_page));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Record a new server-reported item count, keeping the page in range.
    pub fn set_total(&mut self, total: u64) {
        *self = Self::new(self.page, self.per_page, total);
    }

    /// Clamp `n` into `[1, total_pages]`.
    pub fn clamp(&self, n: u32) -> u32 {
        clamp_page(n, self.total_pages)
    }

    /// Move to page `n`, clamped. Returns the page actually selected.
    pub fn go_to(&mut self, n: u32) -> u32 {
        self.page = self.clamp(n);
        self.page
    }

    /// Whether pagination controls should be rendered.
    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    /// Whether there's a next page.
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Whether there's a previous page.
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    /// Page numbers for display, at most `max_visible` centred on the current page.
    pub fn page_numbers(&self, max_visible: usize) -> Vec<u32> {
        if max_visible == 0 || self.total_pages == 0 {
            return Vec::new();
        }
        if self.total_pages as usize <= max_visible {
            return (1..=self.total_pages).collect();
        }

        let window = max_visible as u32;
        let half = window / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + window - 1).min(self.total_pages);
        let start = (end + 1).saturating_sub(window).max(1);

        (start..=end).collect()
    }

    /// Get start item number (1-indexed).
    pub fn start_item(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            u64::from(self.page - 1) * u64::from(self.per_page) + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> u64 {
        (u64::from(self.page) * u64::from(self.per_page)).min(self.total)
    }
}

fn clamp_page(n: u32, total_pages: u32) -> u32 {
    n.clamp(1, total_pages.max(1))
}
