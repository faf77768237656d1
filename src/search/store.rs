//! Current page of projected rows rendered by a list view.

use crate::pagination::{PageControls, total_pages};
use crate::search::request::SearchResult;

/// Single source of truth a list view renders from.
///
/// Failures are not a distinct state: a failed search leaves an empty page.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultStore<R> {
    results: Vec<R>,
    total: usize,
    is_loading: bool,
}

impl<R> Default for ResultStore<R> {
    fn default() -> Self {
        Self {
            results: Vec::new(),
            total: 0,
            is_loading: false,
        }
    }
}

impl<R> ResultStore<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn results(&self) -> &[R] {
        &self.results
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn total_pages(&self, page_size: usize) -> usize {
        total_pages(self.total, page_size)
    }

    pub fn page_controls(&self, page_index: usize, page_size: usize) -> PageControls {
        PageControls::new(self.total, page_index, page_size)
    }

    pub fn begin_loading(&mut self) {
        self.is_loading = true;
    }

    /// Replaces rows and total in one step.
    pub fn apply_success(&mut self, page: SearchResult<R>) {
        self.results = page.results;
        self.total = page.total;
        self.is_loading = false;
    }

    pub fn apply_failure(&mut self) {
        self.results.clear();
        self.total = 0;
        self.is_loading = false;
    }
}
