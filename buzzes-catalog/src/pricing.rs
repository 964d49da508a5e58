use serde::{Deserialize, Serialize};

use crate::route::{Route, RouteId};

/// The bill shown before a purchase is confirmed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Bill {
    pub route_id: RouteId,
    pub origin: String,
    pub destination: String,
    pub departure_time: String,
    /// Ascending seat numbers.
    pub seats: Vec<u32>,
    pub price_per_seat: u32,
    pub currency: String,
    pub total: u64,
}

impl Bill {
    pub fn new(route: &Route, departure_time: &str, seats: Vec<u32>, currency: &str) -> Self {
        let total = seat_total(route.price, seats.len());
        Self {
            route_id: route.id,
            origin: route.origin.clone(),
            destination: route.destination.clone(),
            departure_time: departure_time.to_string(),
            seats,
            price_per_seat: route.price,
            currency: currency.to_string(),
            total,
        }
    }

    /// "4, 7, 11"
    pub fn seat_list(&self) -> String {
        self.seats
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Flat fare: every seat costs the route price.
pub fn seat_total(price: u32, seat_count: usize) -> u64 {
    u64::from(price) * seat_count as u64
}
