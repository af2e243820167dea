use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{Artist, Show, Venue},
        dto::{
            request::{ArtistRequest, ShowRequest, VenueRequest},
            response::{
                AreaVenues, AreasResponse, ArtistDetail, ArtistShowEntry, ArtistSummary,
                ArtistsResponse, ListingSummary, SearchResponse, ShowListing, ShowsResponse,
                VenueDetail, VenueShowEntry,
            },
        },
    },
    repositories::{ArtistRepository, ShowRepository, VenueRepository},
    services::show_schedule::{split_shows, upcoming_counts_by},
};

/// Venues, artists and the shows joining them.
///
/// Times are compared against a caller-supplied `now`; the handlers pass
/// `Utc::now()`.
pub struct BookingService {
    venues: Arc<dyn VenueRepository>,
    artists: Arc<dyn ArtistRepository>,
    shows: Arc<dyn ShowRepository>,
}

impl BookingService {
    pub fn new(
        venues: Arc<dyn VenueRepository>,
        artists: Arc<dyn ArtistRepository>,
        shows: Arc<dyn ShowRepository>,
    ) -> Self {
        Self {
            venues,
            artists,
            shows,
        }
    }

    // Venues

    /// Venues grouped by area, ordered by state then city. Venues within an
    /// area are sorted by name.
    pub async fn venue_areas(&self, now: DateTime<Utc>) -> AppResult<AreasResponse> {
        let venues = self.venues.find_all().await?;
        let shows = self.shows.find_all().await?;

        let upcoming_by_venue = upcoming_counts_by(&shows, now, |s| s.venue_id);

        let mut areas: BTreeMap<(String, String), Vec<ListingSummary>> = BTreeMap::new();
        for venue in venues {
            let upcoming = upcoming_by_venue.get(&venue.id).copied().unwrap_or(0);
            areas
                .entry((venue.state.clone(), venue.city.clone()))
                .or_default()
                .push(ListingSummary {
                    id: venue.id,
                    name: venue.name,
                    num_upcoming_shows: upcoming,
                });
        }

        let areas = areas
            .into_iter()
            .map(|((state, city), mut venues)| {
                venues.sort_by(|a, b| a.name.cmp(&b.name));
                AreaVenues {
                    city,
                    state,
                    venues,
                }
            })
            .collect();

        Ok(AreasResponse { areas })
    }

    pub async fn search_venues(&self, term: &str, now: DateTime<Utc>) -> AppResult<SearchResponse> {
        let venues = self.venues.search_by_name(term).await?;
        let upcoming = upcoming_counts_by(&self.shows.find_all().await?, now, |s| s.venue_id);

        let data: Vec<ListingSummary> = venues
            .into_iter()
            .map(|venue| ListingSummary {
                num_upcoming_shows: upcoming.get(&venue.id).copied().unwrap_or(0),
                id: venue.id,
                name: venue.name,
            })
            .collect();

        Ok(SearchResponse {
            count: data.len(),
            data,
        })
    }

    pub async fn venue_detail(&self, id: i64, now: DateTime<Utc>) -> AppResult<VenueDetail> {
        let venue = self.find_venue(id).await?;
        let artists: HashMap<i64, Artist> = self
            .artists
            .find_all()
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        let (past, upcoming) = split_shows(sorted_by_start(self.shows.find_by_venue(id).await?), now);
        let entry = |show: Show| -> Option<VenueShowEntry> {
            let artist = artists.get(&show.artist_id)?;
            Some(VenueShowEntry {
                artist_id: artist.id,
                artist_name: artist.name.clone(),
                artist_image_link: artist.image_link.clone(),
                start_time: show.start_time,
            })
        };

        let past_shows: Vec<VenueShowEntry> = past.into_iter().filter_map(&entry).collect();
        let upcoming_shows: Vec<VenueShowEntry> = upcoming.into_iter().filter_map(&entry).collect();

        Ok(VenueDetail {
            venue,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        })
    }

    pub async fn create_venue(&self, request: VenueRequest) -> AppResult<Venue> {
        request.validate()?;

        let id = self.venues.next_id().await?;
        let venue = self.venues.create(Venue::from_request(id, request)).await?;

        log::info!("Venue {} '{}' was successfully listed", venue.id, venue.name);
        Ok(venue)
    }

    pub async fn update_venue(&self, id: i64, request: VenueRequest) -> AppResult<Venue> {
        request.validate()?;
        self.find_venue(id).await?;

        let venue = self.venues.update(Venue::from_request(id, request)).await?;
        log::info!("Venue {} was successfully updated", venue.id);
        Ok(venue)
    }

    /// Deletes the venue and every show booked at it.
    pub async fn delete_venue(&self, id: i64) -> AppResult<i64> {
        self.find_venue(id).await?;

        let removed = self.shows.delete_by_venue(id).await?;
        self.venues.delete(id).await?;

        log::info!("Deleted venue {} and {} of its shows", id, removed);
        Ok(id)
    }

    // Artists

    pub async fn list_artists(&self) -> AppResult<ArtistsResponse> {
        let artists = self
            .artists
            .find_all()
            .await?
            .into_iter()
            .map(|a| ArtistSummary {
                id: a.id,
                name: a.name,
            })
            .collect();

        Ok(ArtistsResponse { artists })
    }

    pub async fn search_artists(&self, term: &str, now: DateTime<Utc>) -> AppResult<SearchResponse> {
        let artists = self.artists.search_by_name(term).await?;
        let upcoming = upcoming_counts_by(&self.shows.find_all().await?, now, |s| s.artist_id);

        let data: Vec<ListingSummary> = artists
            .into_iter()
            .map(|artist| ListingSummary {
                num_upcoming_shows: upcoming.get(&artist.id).copied().unwrap_or(0),
                id: artist.id,
                name: artist.name,
            })
            .collect();

        Ok(SearchResponse {
            count: data.len(),
            data,
        })
    }

    pub async fn artist_detail(&self, id: i64, now: DateTime<Utc>) -> AppResult<ArtistDetail> {
        let artist = self.find_artist(id).await?;
        let venues: HashMap<i64, Venue> = self
            .venues
            .find_all()
            .await?
            .into_iter()
            .map(|v| (v.id, v))
            .collect();

        let (past, upcoming) =
            split_shows(sorted_by_start(self.shows.find_by_artist(id).await?), now);
        let entry = |show: Show| -> Option<ArtistShowEntry> {
            let venue = venues.get(&show.venue_id)?;
            Some(ArtistShowEntry {
                venue_id: venue.id,
                venue_name: venue.name.clone(),
                venue_image_link: venue.image_link.clone(),
                start_time: show.start_time,
            })
        };

        let past_shows: Vec<ArtistShowEntry> = past.into_iter().filter_map(&entry).collect();
        let upcoming_shows: Vec<ArtistShowEntry> =
            upcoming.into_iter().filter_map(&entry).collect();

        Ok(ArtistDetail {
            artist,
            past_shows_count: past_shows.len(),
            upcoming_shows_count: upcoming_shows.len(),
            past_shows,
            upcoming_shows,
        })
    }

    pub async fn create_artist(&self, request: ArtistRequest) -> AppResult<Artist> {
        request.validate()?;

        let id = self.artists.next_id().await?;
        let artist = self.artists.create(Artist::from_request(id, request)).await?;

        log::info!("Artist {} '{}' was successfully listed", artist.id, artist.name);
        Ok(artist)
    }

    pub async fn update_artist(&self, id: i64, request: ArtistRequest) -> AppResult<Artist> {
        request.validate()?;
        self.find_artist(id).await?;

        let artist = self.artists.update(Artist::from_request(id, request)).await?;
        log::info!("Artist {} was successfully updated", artist.id);
        Ok(artist)
    }

    /// Deletes the artist and every show they were booked for.
    pub async fn delete_artist(&self, id: i64) -> AppResult<i64> {
        self.find_artist(id).await?;

        let removed = self.shows.delete_by_artist(id).await?;
        self.artists.delete(id).await?;

        log::info!("Deleted artist {} and {} of their shows", id, removed);
        Ok(id)
    }

    // Shows

    /// All shows, newest first.
    pub async fn list_shows(&self) -> AppResult<ShowsResponse> {
        let venues: HashMap<i64, Venue> = self
            .venues
            .find_all()
            .await?
            .into_iter()
            .map(|v| (v.id, v))
            .collect();
        let artists: HashMap<i64, Artist> = self
            .artists
            .find_all()
            .await?
            .into_iter()
            .map(|a| (a.id, a))
            .collect();

        let mut shows = sorted_by_start(self.shows.find_all().await?);
        shows.reverse();

        let shows = shows
            .into_iter()
            .filter_map(|show| {
                let venue = venues.get(&show.venue_id)?;
                let artist = artists.get(&show.artist_id)?;
                Some(ShowListing {
                    id: show.id,
                    venue_id: venue.id,
                    venue_name: venue.name.clone(),
                    artist_id: artist.id,
                    artist_name: artist.name.clone(),
                    artist_image_link: artist.image_link.clone(),
                    start_time: show.start_time,
                })
            })
            .collect();

        Ok(ShowsResponse { shows })
    }

    pub async fn create_show(&self, request: ShowRequest) -> AppResult<Show> {
        request.validate()?;

        if self.artists.find_by_id(request.artist_id).await?.is_none() {
            return Err(AppError::Unprocessable(format!(
                "Artist with id '{}' does not exist",
                request.artist_id
            )));
        }
        if self.venues.find_by_id(request.venue_id).await?.is_none() {
            return Err(AppError::Unprocessable(format!(
                "Venue with id '{}' does not exist",
                request.venue_id
            )));
        }

        let id = self.shows.next_id().await?;
        let show = self
            .shows
            .create(Show::new(id, request.artist_id, request.venue_id, request.start_time))
            .await?;

        log::info!(
            "Show {} was successfully listed (artist {}, venue {})",
            show.id,
            show.artist_id,
            show.venue_id
        );
        Ok(show)
    }

    async fn find_venue(&self, id: i64) -> AppResult<Venue> {
        self.venues
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Venue with id '{}' not found", id)))
    }

    async fn find_artist(&self, id: i64) -> AppResult<Artist> {
        self.artists
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Artist with id '{}' not found", id)))
    }
}

fn sorted_by_start(mut shows: Vec<Show>) -> Vec<Show> {
    shows.sort_by_key(|s| (s.start_time, s.id));
    shows
}
