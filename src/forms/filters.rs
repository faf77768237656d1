use chrono::NaiveDate;
use serde::Deserialize;

use crate::forms::FormError;
use crate::search::request::{WIRE_DATE_FORMAT, is_date_range_valid};

/// Date range inputs shared by the list filter panels.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeForm {
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    /// Advisory check; the search still runs with an inverted range.
    pub fn is_valid(&self) -> bool {
        is_date_range_valid(self.from, self.to)
    }
}

/// Parses a `YYYY-MM-DD` input, treating blank as absent.
pub fn parse_optional_date(value: Option<&str>) -> Result<Option<NaiveDate>, FormError> {
    match value.map(str::trim).filter(|value| !value.is_empty()) {
        Some(value) => NaiveDate::parse_from_str(value, WIRE_DATE_FORMAT)
            .map(Some)
            .map_err(|_| FormError::InvalidDate),
        None => Ok(None),
    }
}

impl TryFrom<DateRangeForm> for DateRange {
    type Error = FormError;

    fn try_from(form: DateRangeForm) -> Result<Self, Self::Error> {
        Ok(Self {
            from: parse_optional_date(form.date_from.as_deref())?,
            to: parse_optional_date(form.date_to.as_deref())?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_inputs_are_absent() {
        let range = DateRange::try_from(DateRangeForm {
            date_from: Some("  ".into()),
            date_to: None,
        })
        .unwrap();

        assert_eq!(range, DateRange::default());
        assert!(range.is_valid());
    }

    #[test]
    fn inverted_range_parses_but_is_flagged() {
        let range = DateRange::try_from(DateRangeForm {
            date_from: Some("2024-05-10".into()),
            date_to: Some("2024-05-01".into()),
        })
        .unwrap();

        assert!(!range.is_valid());
    }

    #[test]
    fn malformed_dates_are_rejected() {
        assert!(matches!(
            parse_optional_date(Some("10/05/2024")),
            Err(FormError::InvalidDate)
        ));
    }
}
