use serde::{Deserialize, Serialize};

use crate::domain::entities::query::OffsetWindow;

/// Listing body of the paged backend: `{results, page, pages, total}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagedListing<T> {
    pub results: Vec<T>,
    pub page: u32,
    pub pages: u32,
    pub total: u64,
}

/// Listing body of the offset backend: `{items, limit, offset, total}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffsetListing<T> {
    pub items: Vec<T>,
    pub limit: u32,
    pub offset: u64,
    pub total: u64,
}

/// A listing tagged with the contract it was decoded under.
#[derive(Debug, Clone, PartialEq)]
pub enum WireListing<T> {
    Paged(PagedListing<T>),
    Offset(OffsetListing<T>),
}

impl<T> From<PagedListing<T>> for WireListing<T> {
    fn from(value: PagedListing<T>) -> Self {
        WireListing::Paged(value)
    }
}

impl<T> From<OffsetListing<T>> for WireListing<T> {
    fn from(value: OffsetListing<T>) -> Self {
        WireListing::Offset(value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope<T> {
    pub records: Vec<T>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    /// Present only when the backend paged by offset.
    pub window: Option<OffsetWindow>,
}

impl<T> ResponseEnvelope<T> {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn pager(&self) -> PagerState {
        PagerState::from_envelope(self)
    }
}

pub fn normalize<T>(listing: WireListing<T>) -> ResponseEnvelope<T> {
    match listing {
        WireListing::Paged(paged) => ResponseEnvelope {
            records: paged.results,
            current_page: paged.page.max(1),
            total_pages: paged.pages,
            total_count: paged.total,
            window: None,
        },
        WireListing::Offset(offset) => {
            let limit = offset.limit.max(1);
            ResponseEnvelope {
                records: offset.items,
                current_page: page_for_offset(offset.offset, limit),
                total_pages: pages_for_total(offset.total, limit),
                total_count: offset.total,
                window: Some(OffsetWindow::new(limit, offset.offset)),
            }
        }
    }
}

pub fn page_for_offset(offset: u64, limit: u32) -> u32 {
    let page = offset / u64::from(limit.max(1)) + 1;
    u32::try_from(page).unwrap_or(u32::MAX)
}

pub fn pages_for_total(total: u64, limit: u32) -> u32 {
    let pages = total.div_ceil(u64::from(limit.max(1)));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerState {
    pub previous_enabled: bool,
    pub next_enabled: bool,
    pub current_page: u32,
    pub total_pages: u32,
}

impl PagerState {
    pub fn from_envelope<T>(envelope: &ResponseEnvelope<T>) -> Self {
        let (previous_enabled, next_enabled) = match envelope.window {
            Some(window) => (
                window.offset() > 0,
                window
                    .offset()
                    .saturating_add(u64::from(window.limit()))
                    < envelope.total_count,
            ),
            None => (
                envelope.current_page > 1,
                envelope.current_page < envelope.total_pages,
            ),
        };
        Self {
            previous_enabled,
            next_enabled,
            current_page: envelope.current_page,
            total_pages: envelope.total_pages,
        }
    }

    /// Page to request for "Next", counted from the response on screen and
    /// never past its last page.
    pub fn next_page(&self) -> Option<u32> {
        self.next_enabled
            .then(|| self.current_page.saturating_add(1).min(self.total_pages))
    }

    pub fn previous_page(&self) -> Option<u32> {
        self.previous_enabled
            .then(|| self.current_page.saturating_sub(1).max(1))
    }

    pub fn disabled() -> Self {
        Self {
            previous_enabled: false,
            next_enabled: false,
            current_page: 1,
            total_pages: 0,
        }
    }
}
