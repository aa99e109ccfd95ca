use crate::domain::model::{CallRecord, Direction};

/// Keep inbound calls involving `user` that lasted at least `min_duration`
/// seconds. Input order is preserved.
pub fn filter_records(records: Vec<CallRecord>, user: &str, min_duration: u64) -> Vec<CallRecord> {
    let initial = records.len();
    let filtered: Vec<CallRecord> = records
        .into_iter()
        .filter(|record| {
            record.direction == Direction::Inbound
                && record.involves(user)
                && record.duration_seconds >= min_duration
        })
        .collect();

    tracing::debug!(
        "{} of {} row(s) matched user '{}' with duration >= {}s",
        filtered.len(),
        initial,
        user,
        min_duration
    );
    filtered
}
