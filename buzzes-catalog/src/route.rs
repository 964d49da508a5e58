use serde::{Deserialize, Serialize};
use std::fmt;

use crate::seat_map::SeatMap;

/// Currency used when a route does not carry its own.
pub const DEFAULT_CURRENCY: &str = "LKR";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct RouteId(pub u32);

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for RouteId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(RouteId)
    }
}

/// A bus route with its schedule, fare and seat map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Route {
    pub id: RouteId,
    pub origin: String,
    pub destination: String,
    /// Travel duration as shown to the user, e.g. "1h 40m".
    pub duration: String,
    /// Price per seat in whole currency units.
    pub price: u32,
    pub currency: Option<String>,
    pub timetable: Vec<String>,
    pub seats: SeatMap,
    #[serde(default)]
    pub featured: bool,
}

impl Route {
    pub fn new(
        id: RouteId,
        origin: impl Into<String>,
        destination: impl Into<String>,
        duration: impl Into<String>,
        price: u32,
        timetable: Vec<String>,
        seats: SeatMap,
    ) -> Self {
        Self {
            id,
            origin: origin.into(),
            destination: destination.into(),
            duration: duration.into(),
            price,
            currency: None,
            timetable,
            seats,
            featured: false,
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    pub fn featured(mut self) -> Self {
        self.featured = true;
        self
    }

    pub fn currency_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        self.currency.as_deref().unwrap_or(fallback)
    }

    pub fn has_departure(&self, time: &str) -> bool {
        self.timetable.iter().any(|t| t == time)
    }

    /// "Colombo to Matara"
    pub fn title(&self) -> String {
        format!("{} to {}", self.origin, self.destination)
    }
}
