use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Axis value used for matching when an entry has no usable quadrant or ring.
///
/// Unclassified entries are excluded by any active filter on that axis.
pub const UNCLASSIFIED: i64 = -1;

/// Ring sort key for entries without a ring; sorts after every real ring.
pub const SORTS_LAST: i64 = 99;

/// Lowest valid quadrant/ring value.
pub const MIN_AXIS_VALUE: i64 = 0;

/// Highest valid quadrant/ring value.
pub const MAX_AXIS_VALUE: i64 = 3;

const QUADRANT_LABELS: [&str; 4] = [
    "Infrastructure",
    "Languages & Frameworks",
    "Services & LLMs",
    "Tools & Methodologies",
];

const RING_LABELS: [&str; 4] = ["Primary", "Consider", "Experiment", "Avoid"];

/// The two classification axes of the radar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Quadrant,
    Ring,
}

impl Axis {
    /// Field name used both in entry records and in tool arguments.
    pub fn key(self) -> &'static str {
        match self {
            Self::Quadrant => "quadrant",
            Self::Ring => "ring",
        }
    }

    /// Display names for axis values, indexed by value.
    pub fn labels(self) -> &'static [&'static str; 4] {
        match self {
            Self::Quadrant => &QUADRANT_LABELS,
            Self::Ring => &RING_LABELS,
        }
    }

    pub fn label_of(self, value: i64) -> Option<&'static str> {
        usize::try_from(value)
            .ok()
            .and_then(|idx| self.labels().get(idx))
            .copied()
    }

    /// `0=Infrastructure, 1=Languages & Frameworks, ...`
    pub fn legend(self) -> String {
        self.labels()
            .iter()
            .enumerate()
            .map(|(value, label)| format!("{value}={label}"))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One technology recommendation, kept as the record it was loaded from.
///
/// Only `label`, `quadrant` and `ring` are interpreted. Every other field
/// (`summary`, `decision`, `when_to_use`, `consider_alternitive`, `links`,
/// `logo`, or anything else upstream adds) passes through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RadarEntry {
    record: Map<String, Value>,
}

impl RadarEntry {
    pub fn from_record(record: Map<String, Value>) -> Self {
        Self { record }
    }

    /// Returns `None` unless the value is a JSON object.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(record) => Some(Self::from_record(record)),
            _ => None,
        }
    }

    pub fn record(&self) -> &Map<String, Value> {
        &self.record
    }

    /// Sort label. Missing or null labels read as the empty string;
    /// non-string labels use their JSON text.
    pub fn label(&self) -> Cow<'_, str> {
        match self.record.get("label") {
            Some(Value::String(s)) => Cow::Borrowed(s),
            None | Some(Value::Null) => Cow::Borrowed(""),
            Some(other) => Cow::Owned(other.to_string()),
        }
    }

    pub fn quadrant(&self) -> Option<i64> {
        self.axis_value(Axis::Quadrant)
    }

    pub fn ring(&self) -> Option<i64> {
        self.axis_value(Axis::Ring)
    }

    /// Integer value of an axis field, if present and numeric.
    ///
    /// Accepts integers, floats (truncated), booleans and numeric strings,
    /// since upstream documents are hand-edited.
    pub fn axis_value(&self, axis: Axis) -> Option<i64> {
        match self.record.get(axis.key())? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
            Value::Bool(b) => Some(i64::from(*b)),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Value compared against filter sets.
    pub fn match_key(&self, axis: Axis) -> i64 {
        self.axis_value(axis).unwrap_or(UNCLASSIFIED)
    }

    /// Primary sort key.
    pub fn ring_rank(&self) -> i64 {
        self.ring().unwrap_or(SORTS_LAST)
    }
}
