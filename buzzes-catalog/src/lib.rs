pub mod route;
pub mod seat_map;
pub mod pricing;
pub mod search;

pub use route::{Route, RouteId, DEFAULT_CURRENCY};
pub use seat_map::{Seat, SeatMap, SeatMapError};
pub use pricing::Bill;
pub use search::RouteQuery;
