// Date-keyed selection.
// The same calendar date always lands on the same list element.

use chrono::NaiveDate;

/// Canonical `YYYY-MM-DD` form of a date.
pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Index for a date: running sum of the key's character codes, reduced
/// modulo `len` at every step.
pub fn index_for_date(date: NaiveDate, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let index = date_key(date)
        .chars()
        .fold(0usize, |sum, c| (sum + c as usize) % len);
    Some(index)
}

/// Pick the element for a date. `None` only for an empty list.
pub fn pick_for_date<T>(candidates: &[T], date: NaiveDate) -> Option<&T> {
    index_for_date(date, candidates.len()).and_then(|i| candidates.get(i))
}
