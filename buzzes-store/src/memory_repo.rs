use async_trait::async_trait;
use buzzes_catalog::{Route, RouteId};
use buzzes_core::{BookingRepository, CoreResult, RouteRepository};
use buzzes_order::Booking;
use tokio::sync::RwLock;
use tracing::debug;

use crate::app_config::Config;
use crate::seed;

/// Holds the catalogue and booking history for one session. Nothing survives a restart.
pub struct InMemoryStore {
    routes: Vec<Route>,
    bookings: RwLock<Vec<Booking>>,
}

impl InMemoryStore {
    pub fn new(routes: Vec<Route>, bookings: Vec<Booking>) -> Self {
        Self {
            routes,
            bookings: RwLock::new(bookings),
        }
    }

    /// Store preloaded with the mock catalogue and history.
    pub fn seeded(config: &Config) -> Self {
        Self::new(seed::routes(config), seed::bookings())
    }
}

#[async_trait]
impl RouteRepository for InMemoryStore {
    async fn get_route_by_id(&self, id: RouteId) -> CoreResult<Option<Route>> {
        Ok(self.routes.iter().find(|r| r.id == id).cloned())
    }

    async fn list_routes(&self) -> CoreResult<Vec<Route>> {
        Ok(self.routes.clone())
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn list_bookings(&self) -> CoreResult<Vec<Booking>> {
        Ok(self.bookings.read().await.clone())
    }

    async fn get_booking(&self, id: &str) -> CoreResult<Option<Booking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings.iter().find(|b| b.id == id).cloned())
    }

    async fn save_booking(&self, booking: &Booking) -> CoreResult<()> {
        let mut bookings = self.bookings.write().await;
        match bookings.iter_mut().find(|b| b.id == booking.id) {
            Some(existing) => *existing = booking.clone(),
            None => bookings.push(booking.clone()),
        }
        debug!(booking_id = %booking.id, status = %booking.status, "Booking saved");
        Ok(())
    }

    async fn create_booking(&self, mut booking: Booking) -> CoreResult<Booking> {
        // Id allocation and insert happen under one write lock.
        let mut bookings = self.bookings.write().await;
        let max = bookings
            .iter()
            .filter_map(|b| b.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        booking.id = (max + 1).to_string();
        bookings.push(booking.clone());
        debug!(booking_id = %booking.id, "Booking created");
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buzzes_order::BookingStatus;
    use chrono::NaiveDate;

    #[tokio::test]
    async fn test_route_lookup() {
        let store = InMemoryStore::seeded(&Config::default());

        let route = store.get_route_by_id(RouteId(7)).await.unwrap().unwrap();
        assert_eq!(route.origin, "Panadura");
        assert!(store.get_route_by_id(RouteId(99)).await.unwrap().is_none());
        assert_eq!(store.list_routes().await.unwrap().len(), 12);
    }

    #[tokio::test]
    async fn test_save_replaces_existing() {
        let store = InMemoryStore::seeded(&Config::default());

        let mut booking = store.get_booking("1").await.unwrap().unwrap();
        booking.cancel().unwrap();
        store.save_booking(&booking).await.unwrap();

        let all = store.list_bookings().await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].status, BookingStatus::Cancelled);
    }

    fn draft() -> Booking {
        Booking::new(
            String::new(),
            "Colombo",
            "Kandy",
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            "08:00 AM",
            "K7Q2M9XA",
        )
    }

    #[tokio::test]
    async fn test_create_booking_assigns_next_id() {
        let store = InMemoryStore::seeded(&Config::default());
        let created = store.create_booking(draft()).await.unwrap();
        assert_eq!(created.id, "5");
        assert_eq!(store.get_booking("5").await.unwrap(), Some(created));

        let empty = InMemoryStore::new(vec![], vec![]);
        assert_eq!(empty.create_booking(draft()).await.unwrap().id, "1");
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let store = InMemoryStore::seeded(&Config::default());

        let (a, b) = tokio::join!(store.create_booking(draft()), store.create_booking(draft()));
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_ne!(a.id, b.id);
        let mut ids = vec![a.id, b.id];
        ids.sort();
        assert_eq!(ids, vec!["5", "6"]);
        assert_eq!(store.list_bookings().await.unwrap().len(), 6);
    }
}
