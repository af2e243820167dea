use serde::{Deserialize, Serialize};

use crate::models::dto::request::VenueRequest;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl Venue {
    pub fn from_request(id: i64, request: VenueRequest) -> Self {
        Venue {
            id,
            name: request.name,
            city: request.city,
            state: request.state,
            address: request.address,
            phone: request.phone,
            genres: request.genres,
            image_link: request.image_link,
            facebook_link: request.facebook_link,
            website: request.website,
            seeking_talent: request.seeking_talent,
            seeking_description: request.seeking_description,
        }
    }
}
