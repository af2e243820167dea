use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{Artist, Category, Question, Show, Venue};

/// `{ "success": true, ...fields of T }`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(flatten)]
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse {
            success: true,
            data,
        }
    }
}

/// Categories keyed by id, the shape the trivia frontend indexes into.
pub fn category_map(categories: &[Category]) -> BTreeMap<String, String> {
    categories
        .iter()
        .map(|c| (c.id.to_string(), c.kind.clone()))
        .collect()
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub categories: BTreeMap<String, String>,
}

#[derive(Debug, Serialize)]
pub struct QuestionListResponse {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<BTreeMap<String, String>>,
    pub current_category: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub created: i64,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: i64,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub previous_questions: Vec<i64>,
    pub question: Question,
}

#[derive(Debug, Serialize)]
pub struct DrinksResponse<T: Serialize> {
    pub drinks: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct DrinkDeletedResponse {
    pub delete: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ListingSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

#[derive(Debug, Serialize)]
pub struct AreaVenues {
    pub city: String,
    pub state: String,
    pub venues: Vec<ListingSummary>,
}

#[derive(Debug, Serialize)]
pub struct AreasResponse {
    pub areas: Vec<AreaVenues>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub count: usize,
    pub data: Vec<ListingSummary>,
}

#[derive(Debug, Serialize)]
pub struct ArtistSummary {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ArtistsResponse {
    pub artists: Vec<ArtistSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VenueShowEntry {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    pub past_shows: Vec<VenueShowEntry>,
    pub upcoming_shows: Vec<VenueShowEntry>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ArtistShowEntry {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    pub past_shows: Vec<ArtistShowEntry>,
    pub upcoming_shows: Vec<ArtistShowEntry>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShowListing {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ShowsResponse {
    pub shows: Vec<ShowListing>,
}

#[derive(Debug, Serialize)]
pub struct VenueResponse {
    pub venue: Venue,
}

#[derive(Debug, Serialize)]
pub struct ArtistResponse {
    pub artist: Artist,
}

#[derive(Debug, Serialize)]
pub struct ShowResponse {
    pub show: Show,
}
