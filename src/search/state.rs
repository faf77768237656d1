//! Filter state held by a list view and the reducer that updates it.

use crate::search::request::OrderBy;

/// Page size used when a list does not configure its own.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Snapshot of everything a list view searches by.
///
/// `page_index` is 0-based; the request builder translates it to the 1-based
/// wire page.
#[derive(Clone, Debug, PartialEq)]
pub struct FilterState<F> {
    pub search_text: String,
    pub page_index: usize,
    pub page_size: usize,
    pub order_by: Option<OrderBy>,
    pub filters: F,
}

impl<F: Default> Default for FilterState<F> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<F: Default> FilterState<F> {
    pub fn new(page_size: usize) -> Self {
        Self {
            search_text: String::new(),
            page_index: 0,
            page_size,
            order_by: None,
            filters: F::default(),
        }
    }
}

impl<F> FilterState<F> {
    #[must_use]
    pub fn with_filters(mut self, filters: F) -> Self {
        self.filters = filters;
        self
    }

    #[must_use]
    pub fn with_search_text(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    #[must_use]
    pub fn with_order(mut self, order_by: OrderBy) -> Self {
        self.order_by = Some(order_by);
        self
    }
}

impl<F: Default> FilterState<F> {
    /// Returns the state after `action`.
    ///
    /// Every action except [`FilterAction::SetPage`] sends the view back to
    /// the first page.
    #[must_use]
    pub fn apply(mut self, action: FilterAction<F>) -> Self {
        match action {
            FilterAction::SetPage(index) => {
                self.page_index = index;
                return self;
            }
            FilterAction::SetSearchText(text) => self.search_text = text,
            FilterAction::SetFilters(filters) => self.filters = filters,
            FilterAction::SetPageSize(size) => self.page_size = size.max(1),
            FilterAction::SetOrder(order_by) => self.order_by = order_by,
            FilterAction::Reset => {
                self.search_text.clear();
                self.order_by = None;
                self.filters = F::default();
            }
        }
        self.page_index = 0;
        self
    }
}

/// Interactions that change a list's search state.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterAction<F> {
    SetSearchText(String),
    SetFilters(F),
    SetPage(usize),
    SetPageSize(usize),
    SetOrder(Option<OrderBy>),
    /// Clears text, filters and sort, keeping the page size.
    Reset,
}
