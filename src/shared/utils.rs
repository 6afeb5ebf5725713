//! Shared utility functions

use crate::domain::DiaryEntry;
use chrono::{DateTime, Local, LocalResult, NaiveDate, TimeZone, Utc};

/// Root prefix for user image storage; objects live under
/// `images/{owner_id}/{file_name}`
pub const IMAGES_PREFIX: &str = "images";

/// Entries grouped by local calendar date, newest date first
pub type GroupedEntries = Vec<(NaiveDate, Vec<DiaryEntry>)>;

/// Build the remote object path for a new image.
///
/// Shape: `images/{owner}/{file_stem}-{millis}.{ext}` - the millisecond
/// suffix keeps repeated picks of the same local file from colliding.
pub fn remote_image_path(owner_id: &str, local_uri: &str, image_type: &str) -> String {
    let file_stem = local_uri
        .rsplit('/')
        .next()
        .unwrap_or(local_uri)
        .split('.')
        .next()
        .unwrap_or(local_uri);
    format!(
        "{IMAGES_PREFIX}/{owner_id}/{file_stem}-{}.{image_type}",
        Utc::now().timestamp_millis()
    )
}

/// Recover the canonical `images/{owner}/{name}` path from a storage
/// download URL, which percent-encodes the separators as `%2F` and carries
/// a query string after the object name.
pub fn extract_remote_image_path(owner_id: &str, download_url: &str) -> Option<String> {
    let chunks: Vec<&str> = download_url.split("%2F").collect();
    let image_name = chunks.get(2)?.split('?').next()?;
    Some(format!("{IMAGES_PREFIX}/{owner_id}/{image_name}"))
}

/// Group entries by the local calendar date of their timestamp,
/// preserving the incoming order within and across groups.
///
/// Input is expected sorted date-descending, so groups come out
/// newest-first.
pub fn group_by_local_date(entries: Vec<DiaryEntry>) -> GroupedEntries {
    let mut grouped: GroupedEntries = Vec::new();
    for entry in entries {
        let day = entry.date.with_timezone(&Local).date_naive();
        match grouped.iter_mut().find(|(d, _)| *d == day) {
            Some((_, bucket)) => bucket.push(entry),
            None => grouped.push((day, vec![entry])),
        }
    }
    grouped
}

/// UTC instants for local midnight of `day` and local midnight of the
/// following day. Used as half-open `[start, end)` bounds for the
/// date-filtered query.
pub fn local_day_bounds_utc(day: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = day.and_hms_opt(0, 0, 0).expect("midnight is always valid");
    let end = start + chrono::Duration::days(1);
    (resolve_local(start), resolve_local(end))
}

fn resolve_local(naive: chrono::NaiveDateTime) -> DateTime<Utc> {
    // DST gaps/overlaps: take the earlier of two mappings, or shift
    // forward out of a gap
    match Local.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let shifted = naive + chrono::Duration::hours(1);
            match Local.from_local_datetime(&shifted) {
                LocalResult::Single(dt) | LocalResult::Ambiguous(dt, _) => {
                    dt.with_timezone(&Utc)
                }
                LocalResult::None => Utc.from_utc_datetime(&naive),
            }
        }
    }
}
