//! Status presentation shared by every list module.
//!
//! Each module declares one [`StatusTable`] mapping its status enum to a
//! display label and a [`PillCategory`]. Lookups never fail: statuses missing
//! from the table resolve to the table's default entry.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Semantic bucket used to colour a status badge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PillCategory {
    #[default]
    Initial,
    InProgress,
    Done,
    Cancelled,
    Warning,
}

impl PillCategory {
    pub const ALL: [PillCategory; 5] = [
        PillCategory::Initial,
        PillCategory::InProgress,
        PillCategory::Done,
        PillCategory::Cancelled,
        PillCategory::Warning,
    ];

    /// CSS-friendly name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            PillCategory::Initial => "initial",
            PillCategory::InProgress => "in-progress",
            PillCategory::Done => "done",
            PillCategory::Cancelled => "cancelled",
            PillCategory::Warning => "warning",
        }
    }
}

impl Display for PillCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label and pill colour for one status value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusStyle {
    pub label: &'static str,
    pub pill: PillCategory,
}

impl StatusStyle {
    pub const fn new(label: &'static str, pill: PillCategory) -> Self {
        Self { label, pill }
    }
}

/// Fixed lookup from a status value to its [`StatusStyle`].
pub struct StatusTable<S: 'static> {
    entries: &'static [(S, StatusStyle)],
    default: StatusStyle,
}

impl<S: PartialEq> StatusTable<S> {
    pub const fn new(entries: &'static [(S, StatusStyle)], default: StatusStyle) -> Self {
        Self { entries, default }
    }

    pub fn style(&self, status: &S) -> StatusStyle {
        self.entries
            .iter()
            .find(|(candidate, _)| candidate == status)
            .map(|(_, style)| *style)
            .unwrap_or(self.default)
    }

    pub fn label(&self, status: &S) -> &'static str {
        self.style(status).label
    }

    pub fn pill(&self, status: &S) -> PillCategory {
        self.style(status).pill
    }

    pub fn default_style(&self) -> StatusStyle {
        self.default
    }
}
