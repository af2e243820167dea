use serde::{Deserialize, Serialize};

use crate::models::dto::request::ArtistRequest;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl Artist {
    pub fn from_request(id: i64, request: ArtistRequest) -> Self {
        Artist {
            id,
            name: request.name,
            city: request.city,
            state: request.state,
            phone: request.phone,
            genres: request.genres,
            image_link: request.image_link,
            facebook_link: request.facebook_link,
            website: request.website,
            seeking_venue: request.seeking_venue,
            seeking_description: request.seeking_description,
        }
    }
}
