//! Tech radar entries and the guidance query over them.

pub mod entry;
pub mod filter;
pub mod normalize;
pub mod response;

use std::time::Instant;

pub use entry::{Axis, RadarEntry, MAX_AXIS_VALUE, MIN_AXIS_VALUE, SORTS_LAST, UNCLASSIFIED};
pub use filter::filter_entries;
pub use normalize::{normalize, normalize_filters, FilterError, FilterSet};
pub use response::{Filters, RadarResponse};

/// The loaded radar: entries plus the URL they came from.
///
/// Built once at startup and never mutated; handlers share it behind an
/// `Arc` and only read.
#[derive(Debug, Clone)]
pub struct Radar {
    source_url: String,
    entries: Vec<RadarEntry>,
}

impl Radar {
    pub fn new(source_url: impl Into<String>, entries: Vec<RadarEntry>) -> Self {
        Self {
            source_url: source_url.into(),
            entries,
        }
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    pub fn entries(&self) -> &[RadarEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Filter and sort the entries, and wrap them with response metadata.
    pub fn guidance(&self, filters: Filters) -> RadarResponse<'_> {
        let started = Instant::now();
        let entries = filter_entries(&self.entries, filters.quadrant.as_ref(), filters.ring.as_ref());
        let duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        RadarResponse {
            source_url: &self.source_url,
            filters,
            count: entries.len(),
            duration_ms,
            entries,
        }
    }
}
