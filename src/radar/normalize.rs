//! Filter argument normalization.
//!
//! Tool clients send quadrant/ring filters in whatever shape their model
//! produced: a bare integer, an array, `"1,2"`, `"1 2"`, or a JSON array
//! smuggled inside a string. Everything is reduced to a [`FilterSet`], or
//! `None` when the axis is unfiltered.
//!
//! Range is not checked here. Out-of-range values survive normalization and
//! simply match no entry; the tool boundary rejects them separately.

use std::collections::btree_set;
use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::{Number, Value};

use super::entry::Axis;
use super::response::Filters;

/// A filter token could not be read as an integer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {axis} filter: {token:?} is not an integer")]
pub struct FilterError {
    pub axis: Axis,
    pub token: String,
}

impl FilterError {
    fn new(axis: Axis, token: impl Into<String>) -> Self {
        Self {
            axis,
            token: token.into(),
        }
    }
}

/// Deduplicated axis values a caller restricted one axis to.
///
/// An empty set is a real filter that matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterSet(BTreeSet<i64>);

impl FilterSet {
    pub fn contains(&self, value: i64) -> bool {
        self.0.contains(&value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<i64> {
        self.iter().collect()
    }
}

impl FromIterator<i64> for FilterSet {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for FilterSet {
    type Item = i64;
    type IntoIter = btree_set::IntoIter<i64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Intermediate token before integer conversion.
enum Token {
    Int(i64),
    Text(String),
}

impl Token {
    /// Element of an array. Integers (and booleans) are taken as-is,
    /// everything else goes through its text form.
    fn from_element(value: &Value) -> Self {
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Int(i),
                None => Self::Text(n.to_string()),
            },
            Value::Bool(b) => Self::Int(i64::from(*b)),
            Value::String(s) => Self::Text(s.clone()),
            other => Self::Text(other.to_string()),
        }
    }
}

/// Normalize both axes of a `get_tech_stack_guidance` call.
pub fn normalize_filters(
    quadrant: Option<&Value>,
    ring: Option<&Value>,
) -> Result<Filters, FilterError> {
    Ok(Filters {
        quadrant: normalize(Axis::Quadrant, quadrant)?,
        ring: normalize(Axis::Ring, ring)?,
    })
}

/// Normalize one axis: coerce to a list, then reduce to a set.
pub fn normalize(axis: Axis, value: Option<&Value>) -> Result<Option<FilterSet>, FilterError> {
    match value {
        None => Ok(None),
        Some(value) => coerce_to_int_list(axis, value).map(to_filter_set),
    }
}

pub fn to_filter_set(values: Option<Vec<i64>>) -> Option<FilterSet> {
    values.map(FilterSet::from_iter)
}

/// Coerce a raw filter value to a list of integers.
///
/// Precedence: null, integer, string (JSON array text first, then
/// comma/whitespace separated), collection, and finally direct conversion
/// of a non-integral number.
pub fn coerce_to_int_list(axis: Axis, value: &Value) -> Result<Option<Vec<i64>>, FilterError> {
    let tokens: Vec<Token> = match value {
        Value::Null => return Ok(None),
        Value::Bool(b) => return Ok(Some(vec![i64::from(*b)])),
        Value::Number(n) => {
            return number_to_int(n)
                .map(|i| Some(vec![i]))
                .ok_or_else(|| FilterError::new(axis, n.to_string()));
        }
        Value::String(text) => text_tokens(text),
        Value::Array(items) => items.iter().map(Token::from_element).collect(),
        Value::Object(map) => map.keys().cloned().map(Token::Text).collect(),
    };

    let mut ints = Vec::with_capacity(tokens.len());
    for token in tokens {
        match token {
            Token::Int(i) => ints.push(i),
            Token::Text(text) => {
                let text = text.trim();
                if text.is_empty() {
                    continue;
                }
                let i = text
                    .parse::<i64>()
                    .map_err(|_| FilterError::new(axis, text))?;
                ints.push(i);
            }
        }
    }
    Ok(Some(ints))
}

/// Integers pass through; finite floats truncate toward zero.
fn number_to_int(n: &Number) -> Option<i64> {
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    let f = n.as_f64()?;
    // i64::MAX as f64 rounds up to 2^63, hence the strict bound.
    if f.is_finite() && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f.trunc() as i64)
    } else {
        None
    }
}

fn text_tokens(text: &str) -> Vec<Token> {
    let trimmed = text.trim();
    match trimmed.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
        Some(inner) => match serde_json::from_str::<Vec<Value>>(trimmed) {
            Ok(items) => items.iter().map(Token::from_element).collect(),
            Err(_) => split_tokens(inner),
        },
        None => split_tokens(trimmed),
    }
}

fn split_tokens(text: &str) -> Vec<Token> {
    text.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| Token::Text(t.to_string()))
        .collect()
}
