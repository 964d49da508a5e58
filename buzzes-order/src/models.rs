use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Booking status in the history
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Upcoming,
    Completed,
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BookingStatus::Upcoming => "Upcoming",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        };
        f.write_str(label)
    }
}

/// A purchased trip as it appears on the bookings and profile screens.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Booking {
    pub id: String,
    pub origin: String,
    pub destination: String,
    pub date: NaiveDate,
    pub time: String,
    pub status: BookingStatus,
    /// Opaque token handed out at purchase. Older entries may predate the 8-character format.
    pub token: String,
}

impl Booking {
    pub fn new(
        id: impl Into<String>,
        origin: impl Into<String>,
        destination: impl Into<String>,
        date: NaiveDate,
        time: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            origin: origin.into(),
            destination: destination.into(),
            date,
            time: time.into(),
            status: BookingStatus::Upcoming,
            token: token.into(),
        }
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_upcoming(&self) -> bool {
        self.status == BookingStatus::Upcoming
    }

    /// Transition: Upcoming → Cancelled. There is no way back.
    pub fn cancel(&mut self) -> Result<(), BookingError> {
        if self.status != BookingStatus::Upcoming {
            return Err(BookingError::NotCancellable {
                id: self.id.clone(),
                status: self.status,
            });
        }

        self.status = BookingStatus::Cancelled;
        Ok(())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BookingError {
    #[error("Booking not found: {0}")]
    NotFound(String),

    #[error("Booking {id} is {status} and cannot be cancelled")]
    NotCancellable {
        id: String,
        status: BookingStatus,
    },
}
