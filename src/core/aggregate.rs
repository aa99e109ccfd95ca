use crate::core::resolver::PbxRules;
use crate::domain::model::{CallRecord, PbxGroup};
use std::collections::HashMap;

/// Group filtered records by resolved PBX name.
///
/// Every record lands in exactly one group; identifiers no rule matches go to
/// "Unknown". Groups are ordered by descending call count, ties broken
/// alphabetically. The average is the truncated integer mean.
pub fn aggregate(records: &[CallRecord], user: &str, rules: &PbxRules) -> Vec<PbxGroup> {
    let mut totals: HashMap<String, (u64, u64)> = HashMap::new();

    for record in records {
        let name = rules.resolve(record.counterpart(user));
        let entry = totals.entry(name.to_string()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += record.duration_seconds;
    }

    let mut groups: Vec<PbxGroup> = totals
        .into_iter()
        .map(|(name, (count, total_seconds))| PbxGroup {
            name,
            count,
            total_seconds,
            avg_seconds: total_seconds / count,
        })
        .collect();

    groups.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

    tracing::debug!("{} record(s) grouped into {} PBX group(s)", records.len(), groups.len());
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::{PbxRule, UNKNOWN_PBX};
    use crate::domain::model::Direction;
    use std::collections::HashMap;

    fn record(from: &str, duration: u64) -> CallRecord {
        CallRecord {
            timestamp: None,
            raw_timestamp: String::new(),
            direction: Direction::Inbound,
            from: from.to_string(),
            to: "user1".to_string(),
            duration_seconds: duration,
            source_file: "calls.csv".to_string(),
            raw: HashMap::new(),
        }
    }

    fn test_rules() -> PbxRules {
        PbxRules::new(vec![
            PbxRule::prefix("pbxA", "PBX A"),
            PbxRule::prefix("pbxB", "PBX B"),
        ])
    }

    #[test]
    fn test_aggregate_worked_example() {
        let records = vec![record("pbxA-123", 45)];
        let groups = aggregate(&records, "user1", &test_rules());

        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0],
            PbxGroup {
                name: "PBX A".to_string(),
                count: 1,
                total_seconds: 45,
                avg_seconds: 45,
            }
        );
    }

    #[test]
    fn test_aggregate_sums_and_truncated_average() {
        let records = vec![
            record("pbxA-1", 30),
            record("pbxA-2", 31),
            record("pbxA-3", 32),
        ];
        let groups = aggregate(&records, "user1", &test_rules());

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].count, 3);
        assert_eq!(groups[0].total_seconds, 93);
        // 93 / 3 == 31 exactly; 94 / 3 would truncate to 31 as well.
        assert_eq!(groups[0].avg_seconds, 31);
    }

    #[test]
    fn test_aggregate_orders_by_count_then_name() {
        let records = vec![
            record("pbxB-1", 40),
            record("pbxB-2", 40),
            record("pbxA-1", 40),
            record("someone", 40),
        ];
        let groups = aggregate(&records, "user1", &test_rules());

        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, vec!["PBX B", "PBX A", UNKNOWN_PBX]);
    }

    #[test]
    fn test_group_counts_cover_every_record() {
        let records = vec![
            record("pbxA-1", 40),
            record("mystery-leg", 50),
            record("pbxB-1", 60),
            record("another-mystery", 70),
        ];
        let groups = aggregate(&records, "user1", &test_rules());

        let total: u64 = groups.iter().map(|g| g.count).sum();
        assert_eq!(total as usize, records.len());

        let unknown = groups.iter().find(|g| g.name == UNKNOWN_PBX).unwrap();
        assert_eq!(unknown.count, 2);
        assert_eq!(unknown.total_seconds, 120);
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let records = vec![
            record("pbxA-1", 40),
            record("pbxB-1", 50),
            record("x", 60),
        ];
        let first = aggregate(&records, "user1", &test_rules());
        let second = aggregate(&records, "user1", &test_rules());
        assert_eq!(first, second);
    }
}
