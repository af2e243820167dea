use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::models::domain::Show;

/// Splits `shows` into `(past, upcoming)`. A show starting exactly at `now`
/// counts as upcoming. Input order is kept within each half.
pub fn split_shows(shows: Vec<Show>, now: DateTime<Utc>) -> (Vec<Show>, Vec<Show>) {
    shows.into_iter().partition(|show| show.start_time < now)
}

/// Upcoming show counts keyed by `key` (a venue or artist id).
pub fn upcoming_counts_by(
    shows: &[Show],
    now: DateTime<Utc>,
    key: impl Fn(&Show) -> i64,
) -> HashMap<i64, usize> {
    let mut counts = HashMap::new();
    for show in shows.iter().filter(|show| show.start_time >= now) {
        *counts.entry(key(show)).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2035, 6, 1, 20, 0, 0).unwrap()
    }

    #[test]
    fn test_split_by_start_time() {
        let now = now();
        let shows = vec![
            Show::new(1, 1, 1, now - Duration::days(30)),
            Show::new(2, 1, 1, now + Duration::days(3)),
            Show::new(3, 2, 1, now - Duration::minutes(1)),
            Show::new(4, 2, 1, now),
        ];

        let (past, upcoming) = split_shows(shows, now);
        assert_eq!(past.iter().map(|s| s.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(upcoming.iter().map(|s| s.id).collect::<Vec<_>>(), vec![2, 4]);
    }

    #[test]
    fn test_upcoming_counts_match_split() {
        let now = now();
        let shows = vec![
            Show::new(1, 1, 1, now - Duration::hours(2)),
            Show::new(2, 1, 1, now + Duration::hours(2)),
            Show::new(3, 1, 1, now + Duration::days(40)),
        ];

        let upcoming = upcoming_counts_by(&shows, now, |s| s.venue_id);
        let (_, split_upcoming) = split_shows(shows, now);
        assert_eq!(upcoming.get(&1), Some(&2));
        assert_eq!(split_upcoming.len(), 2);
    }

    #[test]
    fn test_split_empty() {
        let (past, upcoming) = split_shows(Vec::new(), now());
        assert!(past.is_empty());
        assert!(upcoming.is_empty());
    }

    #[test]
    fn test_upcoming_counts_by_venue_and_artist() {
        let now = now();
        let shows = vec![
            Show::new(1, 10, 100, now + Duration::days(1)),
            Show::new(2, 10, 200, now + Duration::days(2)),
            Show::new(3, 11, 100, now),
            Show::new(4, 11, 100, now - Duration::days(1)),
        ];

        let by_venue = upcoming_counts_by(&shows, now, |s| s.venue_id);
        assert_eq!(by_venue.get(&100), Some(&2));
        assert_eq!(by_venue.get(&200), Some(&1));

        let by_artist = upcoming_counts_by(&shows, now, |s| s.artist_id);
        assert_eq!(by_artist.get(&10), Some(&2));
        assert_eq!(by_artist.get(&11), Some(&1));
        assert!(by_artist.get(&12).is_none());
    }
}
