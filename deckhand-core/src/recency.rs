//! Recency formatting shared across the list views.
//!
//! Two jobs: turn an instant into a human-relative age string ("5m ago"),
//! and partition timestamped records into day buckets (Today / Yesterday /
//! This Week / Older) for section headers.

use chrono::{DateTime, Datelike, Days, Local, NaiveDate, Utc};

/// Format an instant as a relative age string against an explicit "now".
///
/// Under a minute (including instants in the future) reads "Just now";
/// beyond a week the month and day are shown instead of a relative unit.
pub fn relative_age_at(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(ts);

    if duration.num_seconds() < 60 {
        "Just now".to_string()
    } else if duration.num_minutes() < 60 {
        format!("{}m ago", duration.num_minutes())
    } else if duration.num_hours() < 24 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_days() < 7 {
        format!("{}d ago", duration.num_days())
    } else {
        format!("{} {}", month_abbrev(ts.month()), ts.day())
    }
}

/// Format an instant as a relative age string against the current time.
pub fn relative_age(ts: DateTime<Utc>) -> String {
    relative_age_at(ts, Utc::now())
}

/// Format an optional instant, degrading to an empty string when missing.
pub fn relative_age_opt(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => relative_age(ts),
        None => String::new(),
    }
}

fn month_abbrev(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}

// ============================================
// Day Buckets
// ============================================

/// Recency category for section-header grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecencyBucket {
    Today,
    Yesterday,
    ThisWeek,
    Older,
}

impl RecencyBucket {
    /// Section header label for this bucket.
    pub fn label(&self) -> &'static str {
        match self {
            RecencyBucket::Today => "Today",
            RecencyBucket::Yesterday => "Yesterday",
            RecencyBucket::ThisWeek => "This Week",
            RecencyBucket::Older => "Older",
        }
    }

    /// Classify a midnight-normalized date against "today".
    ///
    /// Yesterday wins over This Week: a record dated exactly at yesterday's
    /// midnight is Yesterday, never ThisWeek. Dates with no timestamp are
    /// handled by [`group_by_day`], not here.
    pub fn classify(date: NaiveDate, today: NaiveDate) -> Self {
        let yesterday = today.pred_opt().unwrap_or(today);
        let week_ago = today.checked_sub_days(Days::new(7)).unwrap_or(today);

        if date == today {
            RecencyBucket::Today
        } else if date == yesterday {
            RecencyBucket::Yesterday
        } else if date > week_ago {
            RecencyBucket::ThisWeek
        } else {
            RecencyBucket::Older
        }
    }
}

/// Records partitioned into the four recency buckets.
///
/// Input order is preserved within each bucket (stable partition, no sort).
#[derive(Debug, Clone)]
pub struct DayGroups<T> {
    pub today: Vec<T>,
    pub yesterday: Vec<T>,
    pub this_week: Vec<T>,
    pub older: Vec<T>,
}

impl<T> Default for DayGroups<T> {
    fn default() -> Self {
        Self {
            today: Vec::new(),
            yesterday: Vec::new(),
            this_week: Vec::new(),
            older: Vec::new(),
        }
    }
}

impl<T> DayGroups<T> {
    /// Total number of records across all buckets.
    pub fn len(&self) -> usize {
        self.today.len() + self.yesterday.len() + self.this_week.len() + self.older.len()
    }

    /// True when every bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Non-empty buckets in render order (Today first, Older last).
    ///
    /// Empty buckets yield no section at all, so callers can render headers
    /// directly from this iterator.
    pub fn sections(&self) -> impl Iterator<Item = (RecencyBucket, &[T])> {
        [
            (RecencyBucket::Today, self.today.as_slice()),
            (RecencyBucket::Yesterday, self.yesterday.as_slice()),
            (RecencyBucket::ThisWeek, self.this_week.as_slice()),
            (RecencyBucket::Older, self.older.as_slice()),
        ]
        .into_iter()
        .filter(|(_, items)| !items.is_empty())
    }
}

/// Partition records into day buckets by their own date, preserving order.
///
/// `date_of` returns the record's midnight-normalized date; records without
/// one land in Older so the partition stays exhaustive.
pub fn group_by_day<T, F>(items: impl IntoIterator<Item = T>, date_of: F, today: NaiveDate) -> DayGroups<T>
where
    F: Fn(&T) -> Option<NaiveDate>,
{
    let mut groups = DayGroups::default();

    for item in items {
        let bucket = match date_of(&item) {
            Some(date) => RecencyBucket::classify(date, today),
            None => RecencyBucket::Older,
        };
        match bucket {
            RecencyBucket::Today => groups.today.push(item),
            RecencyBucket::Yesterday => groups.yesterday.push(item),
            RecencyBucket::ThisWeek => groups.this_week.push(item),
            RecencyBucket::Older => groups.older.push(item),
        }
    }

    groups
}

/// The calendar day an instant falls on in the local timezone.
pub fn local_day(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&Local).date_naive()
}

/// Today's date in the local timezone.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}
