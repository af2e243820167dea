use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A booking of one artist at one venue. Holds plain foreign keys only.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Show {
    pub id: i64,
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

impl Show {
    pub fn new(id: i64, artist_id: i64, venue_id: i64, start_time: DateTime<Utc>) -> Self {
        Show {
            id,
            artist_id,
            venue_id,
            start_time,
        }
    }
}
