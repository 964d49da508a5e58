use async_trait::async_trait;
use buzzes_catalog::{Route, RouteId};
use buzzes_order::Booking;

use crate::CoreResult;

/// Read access to the route catalogue
#[async_trait]
pub trait RouteRepository: Send + Sync {
    async fn get_route_by_id(&self, id: RouteId) -> CoreResult<Option<Route>>;

    /// Catalogue order.
    async fn list_routes(&self) -> CoreResult<Vec<Route>>;
}

/// Booking history access
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Every booking regardless of status, in insertion order.
    async fn list_bookings(&self) -> CoreResult<Vec<Booking>>;

    async fn get_booking(&self, id: &str) -> CoreResult<Option<Booking>>;

    /// Insert or replace by id.
    async fn save_booking(&self, booking: &Booking) -> CoreResult<()>;

    /// Stores a new booking under the next free id and returns it with that id.
    /// The id passed in is ignored.
    async fn create_booking(&self, booking: Booking) -> CoreResult<Booking>;
}
