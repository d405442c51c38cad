//! Pure evaluation of which recurring occurrences are due.

use chrono::NaiveDate;

use outlay_domain::RecurringExpenseTemplate;

/// Returns the occurrence dates due for materialization, in ascending order.
///
/// A template never processed before is due exactly at its start date.
/// Otherwise the cadence is walked forward from `last_processed`, and every
/// stop that is on or before `today` (and inside the inclusive end date,
/// when one is set) is due. This is a full catch-up: a daily template left
/// unvisited for three months yields every missed day, not just the latest.
///
/// The template is never mutated; calling this twice with the same inputs
/// returns the same sequence.
pub fn due_occurrences(template: &RecurringExpenseTemplate, today: NaiveDate) -> Vec<NaiveDate> {
    if !template.is_active(today) {
        return Vec::new();
    }
    let Some(last_processed) = template.last_processed else {
        if template.start_date <= today {
            return vec![template.start_date];
        }
        return Vec::new();
    };

    let within_end = |date: NaiveDate| template.end_date.map_or(true, |end| date <= end);
    let mut due = Vec::new();
    let mut cursor = template.frequency.next_date(last_processed);
    while cursor <= today && within_end(cursor) {
        due.push(cursor);
        cursor = template.frequency.next_date(cursor);
    }
    due
}
