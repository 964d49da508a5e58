use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seat {
    pub number: u32,
    pub available: bool,
}

/// Fixed seat layout of a route. Availability is decided once, when the map is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<Seat>", into = "Vec<Seat>")]
pub struct SeatMap {
    seats: Vec<Seat>,
}

impl SeatMap {
    /// Seats `1..=count`; every seat whose number is a multiple of `blocked_every` is unavailable.
    /// A `blocked_every` of 0 leaves every seat open.
    pub fn with_blocked_every(count: u32, blocked_every: u32) -> Self {
        let seats = (1..=count)
            .map(|number| Seat {
                number,
                available: blocked_every == 0 || number % blocked_every != 0,
            })
            .collect();
        Self { seats }
    }

    pub fn from_seats(mut seats: Vec<Seat>) -> Result<Self, SeatMapError> {
        seats.sort_by_key(|s| s.number);
        for pair in seats.windows(2) {
            if pair[0].number == pair[1].number {
                return Err(SeatMapError::DuplicateSeat(pair[0].number));
            }
        }
        if let Some(seat) = seats.iter().find(|s| s.number == 0) {
            return Err(SeatMapError::InvalidNumber(seat.number));
        }
        Ok(Self { seats })
    }

    pub fn get(&self, number: u32) -> Option<&Seat> {
        self.seats
            .binary_search_by_key(&number, |s| s.number)
            .ok()
            .map(|idx| &self.seats[idx])
    }

    pub fn is_available(&self, number: u32) -> bool {
        self.get(number).is_some_and(|s| s.available)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter()
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn available_count(&self) -> usize {
        self.seats.iter().filter(|s| s.available).count()
    }
}

impl TryFrom<Vec<Seat>> for SeatMap {
    type Error = SeatMapError;

    fn try_from(seats: Vec<Seat>) -> Result<Self, Self::Error> {
        Self::from_seats(seats)
    }
}

impl From<SeatMap> for Vec<Seat> {
    fn from(map: SeatMap) -> Self {
        map.seats
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SeatMapError {
    #[error("Duplicate seat number: {0}")]
    DuplicateSeat(u32),

    #[error("Seat numbers start at 1, got {0}")]
    InvalidNumber(u32),
}
