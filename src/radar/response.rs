use serde::Serialize;

use super::entry::RadarEntry;
use super::normalize::FilterSet;

/// Normalized filters, echoed back as ascending arrays or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Filters {
    pub quadrant: Option<FilterSet>,
    pub ring: Option<FilterSet>,
}

impl Filters {
    pub fn is_unfiltered(&self) -> bool {
        self.quadrant.is_none() && self.ring.is_none()
    }
}

/// Result of one `get_tech_stack_guidance` call.
#[derive(Debug, Clone, Serialize)]
pub struct RadarResponse<'a> {
    pub source_url: &'a str,
    pub filters: Filters,
    pub count: usize,
    pub duration_ms: u64,
    pub entries: Vec<&'a RadarEntry>,
}

impl RadarResponse<'_> {
    /// Labels in result order.
    pub fn labels(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.label().into_owned()).collect()
    }
}
