use buzzes_core::CoreError;
use buzzes_order::{BookingError, FlowError};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Route not found")]
    RouteNotFound,

    #[error("{0}")]
    Flow(#[from] FlowError),

    #[error("{0}")]
    Booking(#[from] BookingError),

    #[error("Unknown command: {0} (type `help`)")]
    InvalidCommand(String),

    #[error("Open a route first")]
    NoRouteOpen,

    #[error("Internal error: {0}")]
    Core(#[from] CoreError),
}

impl AppError {
    /// Errors the user caused and can fix; everything else is worth a warning in the log.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, AppError::Core(_))
    }
}
