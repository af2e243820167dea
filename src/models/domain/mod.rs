pub mod artist;
pub mod category;
pub mod drink;
pub mod question;
pub mod show;
pub mod venue;
pub use artist::Artist;
pub use category::Category;
pub use drink::{Drink, RecipePart};
pub use question::Question;
pub use show::Show;
pub use venue::Venue;
