use super::entry::{Axis, RadarEntry};
use super::normalize::FilterSet;

/// Select the entries admitted by both axis filters, ordered by
/// `(ring, label)`.
///
/// `None` leaves an axis unrestricted. Entries without a ring sort after
/// every classified ring. The sort is stable, and the result borrows from
/// `entries`.
pub fn filter_entries<'a>(
    entries: &'a [RadarEntry],
    quadrants: Option<&FilterSet>,
    rings: Option<&FilterSet>,
) -> Vec<&'a RadarEntry> {
    let mut kept: Vec<&RadarEntry> = entries
        .iter()
        .filter(|entry| {
            admits(quadrants, entry.match_key(Axis::Quadrant))
                && admits(rings, entry.match_key(Axis::Ring))
        })
        .collect();

    kept.sort_by(|a, b| {
        a.ring_rank()
            .cmp(&b.ring_rank())
            .then_with(|| a.label().cmp(&b.label()))
    });
    kept
}

fn admits(filter: Option<&FilterSet>, value: i64) -> bool {
    filter.map_or(true, |set| set.contains(value))
}
