//! The active/archived split of a call snapshot.
//!
//! Everything here is derived: a snapshot is only ever read, and relative
//! order is always preserved.

use chrono::{NaiveDate, TimeZone};

use crate::record::CallRecord;

/// Which half of the snapshot is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Partition {
    #[default]
    Active,
    Archived,
}

impl Partition {
    pub fn from_archived(archived: bool) -> Self {
        if archived {
            Partition::Archived
        } else {
            Partition::Active
        }
    }

    pub fn is_archived(self) -> bool {
        self == Partition::Archived
    }

    pub fn contains(self, record: &CallRecord) -> bool {
        record.is_archived == self.is_archived()
    }
}

/// Records whose `is_archived` equals `archived`, in snapshot order.
pub fn filter(snapshot: &[CallRecord], archived: bool) -> Vec<&CallRecord> {
    let partition = Partition::from_archived(archived);
    snapshot
        .iter()
        .filter(|record| partition.contains(record))
        .collect()
}

/// A run of consecutive records that share a calendar date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayGroup<'a> {
    pub date: NaiveDate,
    pub records: Vec<&'a CallRecord>,
}

/// Group records by the date of `created_at` in `tz`.
///
/// Only adjacent records are merged, so the flattened groups always equal the
/// input sequence. A date can therefore appear twice if the server interleaves
/// days.
pub fn group_by_day<'a, Tz, I>(records: I, tz: &Tz) -> Vec<DayGroup<'a>>
where
    Tz: TimeZone,
    I: IntoIterator<Item = &'a CallRecord>,
{
    let mut groups: Vec<DayGroup<'a>> = Vec::new();
    for record in records {
        let date = record.created_at.with_timezone(tz).date_naive();
        match groups.last_mut() {
            Some(group) if group.date == date => group.records.push(record),
            _ => groups.push(DayGroup {
                date,
                records: vec![record],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CallId, CallType, Direction};
    use chrono::{DateTime, FixedOffset, Utc};
    use proptest::prelude::*;

    fn record(id: &str, archived: bool, created_at: &str) -> CallRecord {
        CallRecord {
            id: CallId::from(id),
            direction: Direction::Outbound,
            from: "+1 415 555 0100".into(),
            to: "+1 415 555 0199".into(),
            via: None,
            call_type: CallType::Answered,
            duration: 30,
            created_at: created_at.parse::<DateTime<Utc>>().unwrap(),
            is_archived: archived,
        }
    }

    fn snapshot_from_flags(flags: &[bool]) -> Vec<CallRecord> {
        flags
            .iter()
            .enumerate()
            .map(|(i, &archived)| record(&i.to_string(), archived, "2024-07-12T10:00:00Z"))
            .collect()
    }

    proptest! {
        #[test]
        fn filter_partitions_snapshot_exactly(
            flags in proptest::collection::vec(any::<bool>(), 0..64)
        ) {
            let snapshot = snapshot_from_flags(&flags);
            let active = filter(&snapshot, false);
            let archived = filter(&snapshot, true);

            prop_assert!(active.iter().all(|r| !r.is_archived));
            prop_assert!(archived.iter().all(|r| r.is_archived));
            prop_assert_eq!(active.len() + archived.len(), snapshot.len());

            // Each side keeps snapshot order: ids were assigned ascending.
            let position = |r: &CallRecord| r.id.as_str().parse::<usize>().unwrap();
            let ascending = |side: &[&CallRecord]| {
                side.windows(2).all(|w| position(w[0]) < position(w[1]))
            };
            prop_assert!(ascending(&active));
            prop_assert!(ascending(&archived));
        }

        #[test]
        fn grouping_never_reorders(flags in proptest::collection::vec(any::<bool>(), 0..32)) {
            let snapshot = snapshot_from_flags(&flags);
            let flattened: Vec<&CallRecord> = group_by_day(&snapshot, &Utc)
                .into_iter()
                .flat_map(|g| g.records)
                .collect();
            prop_assert_eq!(flattened, snapshot.iter().collect::<Vec<_>>());
        }
    }

    #[test]
    fn empty_snapshot_has_empty_partitions() {
        assert!(filter(&[], false).is_empty());
        assert!(filter(&[], true).is_empty());
        assert!(group_by_day(Vec::<&CallRecord>::new(), &Utc).is_empty());
    }

    #[test]
    fn partition_helpers() {
        assert_eq!(Partition::default(), Partition::Active);
        assert_eq!(Partition::from_archived(true), Partition::Archived);
        assert!(Partition::Archived.is_archived());
        let archived = record("a", true, "2024-07-12T10:00:00Z");
        assert!(Partition::Archived.contains(&archived));
        assert!(!Partition::Active.contains(&archived));
    }

    #[test]
    fn groups_consecutive_records_by_date() {
        let snapshot = vec![
            record("1", false, "2024-07-12T23:00:00Z"),
            record("2", false, "2024-07-12T08:00:00Z"),
            record("3", false, "2024-07-11T12:00:00Z"),
            record("4", false, "2024-07-12T09:00:00Z"),
        ];
        let groups = group_by_day(&snapshot, &Utc);
        let shape: Vec<(String, usize)> = groups
            .iter()
            .map(|g| (g.date.to_string(), g.records.len()))
            .collect();
        assert_eq!(
            shape,
            vec![
                ("2024-07-12".to_owned(), 2),
                ("2024-07-11".to_owned(), 1),
                ("2024-07-12".to_owned(), 1),
            ]
        );
    }

    #[test]
    fn grouping_follows_the_supplied_time_zone() {
        let snapshot = vec![
            record("1", false, "2024-07-12T23:00:00Z"),
            record("2", false, "2024-07-12T08:00:00Z"),
        ];
        let paris = FixedOffset::east_opt(2 * 3600).unwrap();
        let groups = group_by_day(&snapshot, &paris);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date.to_string(), "2024-07-13");
        assert_eq!(groups[1].date.to_string(), "2024-07-12");
    }
}
