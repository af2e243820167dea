pub mod artist_repository;
pub mod category_repository;
pub mod drink_repository;
pub mod question_repository;
pub mod show_repository;
pub mod venue_repository;

pub use artist_repository::{ArtistRepository, MongoArtistRepository};
pub use category_repository::{CategoryRepository, MongoCategoryRepository};
pub use drink_repository::{DrinkRepository, MongoDrinkRepository};
pub use question_repository::{MongoQuestionRepository, QuestionRepository};
pub use show_repository::{MongoShowRepository, ShowRepository};
pub use venue_repository::{MongoVenueRepository, VenueRepository};

#[cfg(test)]
pub use artist_repository::MockArtistRepository;
#[cfg(test)]
pub use category_repository::MockCategoryRepository;
#[cfg(test)]
pub use drink_repository::MockDrinkRepository;
#[cfg(test)]
pub use question_repository::MockQuestionRepository;
#[cfg(test)]
pub use show_repository::MockShowRepository;
#[cfg(test)]
pub use venue_repository::MockVenueRepository;

use mongodb::bson::{doc, Document};

/// Case-insensitive substring match on `field`.
pub(crate) fn contains_ignore_case(field: &str, term: &str) -> Document {
    let mut filter = Document::new();
    filter.insert(
        field,
        doc! { "$regex": regex::escape(term.trim()), "$options": "i" },
    );
    filter
}
