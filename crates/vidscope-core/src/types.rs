//! Data model shared by the orchestrator and its collaborators.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Inclusive calendar-day range; `start <= end` always holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct UncheckedRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<UncheckedRange> for DateRange {
    type Error = String;

    fn try_from(raw: UncheckedRange) -> Result<Self, Self::Error> {
        Self::new(raw.start, raw.end)
            .ok_or_else(|| format!("start {} is after end {}", raw.start, raw.end))
    }
}

impl DateRange {
    /// Create a range, returning `None` when `start > end`
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    /// First day of the range
    #[must_use]
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the range
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// Validated, optional search filters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilters {
    /// Restrict hits to this day range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    /// Restrict hits to this camera (never empty)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub camera_id: Option<String>,
}

impl SearchFilters {
    /// True when no filter field is populated
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.date_range.is_none() && self.camera_id.is_none()
    }
}

/// Filter fields exactly as the user typed them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFilters {
    /// Range start, expected as `YYYY-MM-DD`
    pub start: Option<String>,
    /// Range end, expected as `YYYY-MM-DD`
    pub end: Option<String>,
    /// Camera identifier
    pub camera_id: Option<String>,
}

impl RawFilters {
    /// No filters at all
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Set the date range bounds
    #[must_use]
    pub fn with_dates(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self.end = Some(end.into());
        self
    }

    /// Set the camera identifier
    #[must_use]
    pub fn with_camera(mut self, camera_id: impl Into<String>) -> Self {
        self.camera_id = Some(camera_id.into());
        self
    }
}

/// Normalized search request, built by [`compose`](crate::compose)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    filters: Option<SearchFilters>,
}

impl SearchRequest {
    pub(crate) fn new(query: String, filters: Option<SearchFilters>) -> Self {
        Self { query, filters }
    }

    /// Trimmed, non-empty query text
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Filters, present only when at least one field is populated
    #[must_use]
    pub fn filters(&self) -> Option<&SearchFilters> {
        self.filters.as_ref()
    }
}

/// One matched detection returned by the search collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    /// Detected text
    pub text: String,
    /// Offset of the detection into the source video, in seconds (>= 0)
    #[serde(rename = "timestamp")]
    pub timestamp_seconds: f64,
    /// Camera that recorded the source video
    pub camera_id: String,
    /// Identifier of the source video on the asset server
    #[serde(rename = "source_video")]
    pub source_video_id: String,
    /// Opaque screenshot identifier on the asset server
    #[serde(rename = "screenshot_filename", default, skip_serializing_if = "Option::is_none")]
    pub screenshot_id: Option<String>,
}

/// Known video source listed by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSource {
    /// Video identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Camera that recorded it
    pub camera_id: String,
}

/// Acknowledgement of a processing job request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingAck {
    /// Status reported by the collaborator
    pub status: String,
    /// Optional human-readable detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
