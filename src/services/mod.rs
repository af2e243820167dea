pub mod booking_service;
pub mod drink_service;
pub mod pagination;
pub mod quiz_picker;
pub mod show_schedule;
pub mod trivia_service;

pub use booking_service::BookingService;
pub use drink_service::DrinkService;
pub use trivia_service::TriviaService;
