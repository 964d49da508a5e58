pub mod models;
pub mod pii;

pub use models::events::{BookingCancelledEvent, BookingConfirmedEvent, BookingEvent};
pub use models::profile::UserProfile;
pub use pii::Masked;
