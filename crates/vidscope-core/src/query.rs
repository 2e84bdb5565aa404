//! Query composition
//!
//! Turns raw user input into a [`SearchRequest`]. Pure: the same input always
//! yields the same result and nothing is sent anywhere.

use crate::error::ValidationError;
use crate::types::{DateRange, RawFilters, SearchFilters, SearchRequest};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Build a normalized search request from raw input.
///
/// The query is trimmed and must not be empty. Only populated filter fields
/// are copied: a camera id that trims to nothing is treated as absent, and a
/// date range needs both bounds. A half-filled, unparseable, or reversed range
/// is an error rather than being dropped, so the caller never searches
/// unfiltered by accident.
pub fn compose(raw_text: &str, raw_filters: &RawFilters) -> Result<SearchRequest, ValidationError> {
    let query = raw_text.trim();
    if query.is_empty() {
        return Err(ValidationError::EmptyQuery);
    }

    let filters = SearchFilters {
        date_range: parse_range(raw_filters.start.as_deref(), raw_filters.end.as_deref())?,
        camera_id: non_blank(raw_filters.camera_id.as_deref()).map(str::to_string),
    };

    let filters = (!filters.is_empty()).then_some(filters);
    Ok(SearchRequest::new(query.to_string(), filters))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_range(start: Option<&str>, end: Option<&str>) -> Result<Option<DateRange>, ValidationError> {
    match (non_blank(start), non_blank(end)) {
        (None, None) => Ok(None),
        (Some(_), None) => Err(ValidationError::InvalidDateRange(
            "end date is missing".to_string(),
        )),
        (None, Some(_)) => Err(ValidationError::InvalidDateRange(
            "start date is missing".to_string(),
        )),
        (Some(start), Some(end)) => {
            let start = parse_date(start)?;
            let end = parse_date(end)?;
            DateRange::new(start, end).map(Some).ok_or_else(|| {
                ValidationError::InvalidDateRange(format!("start {} is after end {}", start, end))
            })
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| ValidationError::InvalidDateRange(format!("'{}' is not a YYYY-MM-DD date", value)))
}
