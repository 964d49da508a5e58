pub mod home;
pub mod routes;
pub mod route_details;
pub mod bookings;
pub mod profile;

use buzzes_catalog::RouteId;

pub use route_details::RouteDetails;

/// Named screens the user can move between.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home { query: String },
    Routes { query: String },
    RouteDetails(Option<RouteId>),
    Bookings,
    Profile,
}

impl Default for Screen {
    fn default() -> Self {
        Screen::Home { query: String::new() }
    }
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home { .. } => "home",
            Screen::Routes { .. } => "routes",
            Screen::RouteDetails(_) => "route-details",
            Screen::Bookings => "bookings",
            Screen::Profile => "profile",
        }
    }
}
