pub mod models;
pub mod token;
pub mod flow;

pub use models::{Booking, BookingError, BookingStatus};
pub use token::{ConfirmationToken, RandomTokenGenerator, SequenceTokenGenerator, TokenError, TokenGenerator};
pub use flow::{Actions, BookingFlow, Confirmation, FlowError, FlowState};
