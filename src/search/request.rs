//! Outbound search request and the pure builder that produces it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::search::state::FilterState;

/// Sentinel a selector uses for "no filter".
pub const SELECTION_ANY: i32 = -1;
/// Sentinel a selector uses for "Sin asignar" (explicitly unassigned).
pub const SELECTION_UNASSIGNED: i32 = -2;

/// Wire format for request dates.
pub const WIRE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Three-way selector value.
///
/// `Any` leaves the key out of the request, `Unassigned` sends an explicit
/// `null`, `Id` sends the identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Selection<T> {
    Any,
    Unassigned,
    Id(T),
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::Any
    }
}

impl<T> Selection<T>
where
    T: TryFrom<i32>,
{
    /// Interprets a raw selector value, honouring the `-1`/`-2` sentinels.
    ///
    /// Any other value that is not a valid identifier is treated as `Any`.
    pub fn from_raw(raw: i32) -> Self {
        match raw {
            SELECTION_ANY => Selection::Any,
            SELECTION_UNASSIGNED => Selection::Unassigned,
            other => T::try_from(other).map(Selection::Id).unwrap_or(Selection::Any),
        }
    }
}

impl<T> Selection<T>
where
    T: Copy + Into<i32>,
{
    /// Raw selector value, the inverse of [`Selection::from_raw`].
    pub fn to_raw(self) -> i32 {
        match self {
            Selection::Any => SELECTION_ANY,
            Selection::Unassigned => SELECTION_UNASSIGNED,
            Selection::Id(id) => id.into(),
        }
    }
}

/// Sort direction sent to the backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}

/// Named filter values in the outbound request.
///
/// Every writer skips empty/default values so that an absent key always
/// means "no constraint".
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FilterMap(Map<String, Value>);

impl FilterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a trimmed string filter unless it is blank.
    pub fn text(&mut self, key: &str, value: &str) -> &mut Self {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            self.0.insert(key.to_string(), Value::from(trimmed));
        }
        self
    }

    /// Adds an array filter unless it has no elements.
    pub fn list<I, T>(&mut self, key: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        if !values.is_empty() {
            self.0.insert(key.to_string(), Value::Array(values));
        }
        self
    }

    /// Adds a `YYYY-MM-DD` date filter when present.
    pub fn date(&mut self, key: &str, value: Option<NaiveDate>) -> &mut Self {
        if let Some(date) = value {
            self.0.insert(
                key.to_string(),
                Value::from(date.format(WIRE_DATE_FORMAT).to_string()),
            );
        }
        self
    }

    /// Adds a boolean filter when present.
    pub fn flag(&mut self, key: &str, value: Option<bool>) -> &mut Self {
        if let Some(flag) = value {
            self.0.insert(key.to_string(), Value::Bool(flag));
        }
        self
    }

    /// Adds a selector filter following the omitted/null/value contract.
    pub fn selection<T>(&mut self, key: &str, value: Selection<T>) -> &mut Self
    where
        T: Into<i32>,
    {
        match value {
            Selection::Any => {}
            Selection::Unassigned => {
                self.0.insert(key.to_string(), Value::Null);
            }
            Selection::Id(id) => {
                self.0.insert(key.to_string(), Value::from(id.into()));
            }
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Module-specific filter criteria.
pub trait SearchFilters: Clone + Default + Send + Sync + 'static {
    /// Writes the non-empty criteria into `filters`.
    fn write_filters(&self, filters: &mut FilterMap);
}

impl SearchFilters for () {
    fn write_filters(&self, _filters: &mut FilterMap) {}
}

/// Body of `POST {baseUrl}/search` and `POST {baseUrl}/download`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub search_text: String,
    pub page: usize,
    pub page_size: usize,
    pub filters: FilterMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<OrderBy>,
}

/// Page of raw results returned by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SearchResult<T> {
    pub total: usize,
    pub results: Vec<T>,
}

impl<T> SearchResult<T> {
    pub fn empty() -> Self {
        Self {
            total: 0,
            results: Vec::new(),
        }
    }

    /// Projects every item, keeping the total.
    pub fn map<U, M>(self, f: M) -> SearchResult<U>
    where
        M: FnMut(T) -> U,
    {
        SearchResult {
            total: self.total,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

/// Snapshots `state` into the outbound request.
///
/// The UI page index is 0-based; the wire page is 1-based.
pub fn build_request<F: SearchFilters>(state: &FilterState<F>) -> SearchRequest {
    let mut filters = FilterMap::new();
    state.filters.write_filters(&mut filters);

    SearchRequest {
        search_text: state.search_text.trim().to_string(),
        page: state.page_index + 1,
        page_size: state.page_size.max(1),
        filters,
        order_by: state.order_by.clone(),
    }
}

/// A range is valid when either bound is missing or `from <= to`.
///
/// Advisory only: an invalid range never blocks a search.
pub fn is_date_range_valid(from: Option<NaiveDate>, to: Option<NaiveDate>) -> bool {
    match (from, to) {
        (Some(from), Some(to)) => from <= to,
        _ => true,
    }
}
