//! Plain-text rendering of the visible partition.

use std::fmt::{self, Write};

use callbox_types::{CallRecord, DayGroup, Direction, Partition};
use chrono::TimeZone;

/// `+1 415-555-0100` for 11-digit North American numbers, the raw input
/// otherwise.
pub fn format_phone_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    match digits.strip_prefix('1') {
        Some(rest) if rest.len() == 10 => {
            format!("+1 {}-{}-{}", &rest[..3], &rest[3..6], &rest[6..])
        }
        _ => raw.to_owned(),
    }
}

pub fn format_duration(total_seconds: u64) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    let plural = |n: u64, unit: &str| {
        if n == 1 {
            format!("{n} {unit}")
        } else {
            format!("{n} {unit}s")
        }
    };

    if minutes == 0 {
        plural(seconds, "second")
    } else {
        format!("{} and {}", plural(minutes, "minute"), plural(seconds, "second"))
    }
}

fn headline(record: &CallRecord) -> (String, String) {
    let secondary = match record.direction {
        Direction::Outbound => format!("called from {}", format_phone_number(&record.from)),
        Direction::Inbound => format!("tried to call {}", format_phone_number(&record.to)),
    };
    (format_phone_number(record.counterpart()), secondary)
}

fn write_record<Tz>(out: &mut String, record: &CallRecord, tz: &Tz) -> fmt::Result
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let (primary, secondary) = headline(record);
    let time = record.created_at.with_timezone(tz).format("%H:%M");
    let unanswered = if record.is_answered() { "" } else { "  (no answer)" };
    writeln!(out, "  {time}  {primary}  {secondary}{unanswered}")?;
    writeln!(
        out,
        "         {} · {} · id {}",
        record.call_type,
        format_duration(record.duration),
        record.id
    )
}

pub fn render_partition<Tz>(partition: Partition, groups: &[DayGroup<'_>], tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let title = match partition {
        Partition::Active => "Active calls",
        Partition::Archived => "Archived calls",
    };
    let count: usize = groups.iter().map(|g| g.records.len()).sum();

    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{title} ({count})");
    if groups.is_empty() {
        let _ = writeln!(out, "\n  No calls.");
        return out;
    }

    for group in groups {
        let _ = writeln!(out, "\n-- {} --", group.date.format("%Y-%m-%d"));
        for record in &group.records {
            let _ = write_record(&mut out, record, tz);
        }
    }
    out
}
