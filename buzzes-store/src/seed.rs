//! Mock catalogue, booking history and profile loaded at startup.

use buzzes_catalog::{Route, RouteId, SeatMap};
use buzzes_order::{Booking, BookingStatus};
use buzzes_shared::UserProfile;
use chrono::NaiveDate;

use crate::app_config::Config;

struct RouteRow {
    id: u32,
    origin: &'static str,
    destination: &'static str,
    duration: &'static str,
    price: u32,
    timetable: [&'static str; 3],
    featured: bool,
}

const ROUTES: &[RouteRow] = &[
    // Highway routes
    RouteRow { id: 1, origin: "Colombo", destination: "Matara", duration: "1h 40m", price: 450, timetable: ["08:00 AM", "10:00 AM", "12:00 PM"], featured: false },
    RouteRow { id: 2, origin: "Colombo", destination: "Galle", duration: "1h 20m", price: 400, timetable: ["07:30 AM", "09:30 AM", "11:30 AM"], featured: false },
    RouteRow { id: 3, origin: "Kottawa", destination: "Kadawatha", duration: "30m", price: 300, timetable: ["08:00 AM", "10:00 AM", "02:00 PM"], featured: false },
    RouteRow { id: 4, origin: "Colombo", destination: "Katunayake", duration: "40m", price: 300, timetable: ["09:00 AM", "01:00 PM", "05:00 PM"], featured: false },
    RouteRow { id: 5, origin: "Kottawa", destination: "Galle", duration: "1h 10m", price: 350, timetable: ["08:30 AM", "12:30 PM", "04:30 PM"], featured: false },
    RouteRow { id: 6, origin: "Kadawatha", destination: "Matara", duration: "2h", price: 500, timetable: ["06:00 AM", "10:00 AM", "02:00 PM"], featured: false },
    // Popular routes shown on the home screen
    RouteRow { id: 7, origin: "Panadura", destination: "Kaduwela", duration: "40m", price: 300, timetable: ["08:00 AM", "10:00 AM", "12:00 PM"], featured: true },
    RouteRow { id: 8, origin: "Galle", destination: "Matara", duration: "1h", price: 150, timetable: ["09:00 AM", "11:00 AM", "01:00 PM"], featured: true },
    RouteRow { id: 9, origin: "Negombo", destination: "Colombo", duration: "1h 20m", price: 200, timetable: ["06:00 AM", "12:00 PM", "06:00 PM"], featured: true },
    RouteRow { id: 10, origin: "Jaffna", destination: "Anuradhapura", duration: "5h 30m", price: 750, timetable: ["08:00 AM", "02:00 PM", "08:00 PM"], featured: true },
    RouteRow { id: 11, origin: "Badulla", destination: "Colombo", duration: "6h", price: 600, timetable: ["07:00 AM", "01:00 PM", "07:00 PM"], featured: true },
    RouteRow { id: 12, origin: "Kurunegala", destination: "Kandy", duration: "1h 40m", price: 250, timetable: ["09:00 AM", "11:00 AM", "03:00 PM"], featured: true },
];

/// Odd routes block every 3rd seat, even routes every 4th.
pub fn blocked_every(id: RouteId) -> u32 {
    if id.0 % 2 == 1 {
        3
    } else {
        4
    }
}

pub fn routes(config: &Config) -> Vec<Route> {
    ROUTES
        .iter()
        .map(|row| {
            let id = RouteId(row.id);
            let route = Route::new(
                id,
                row.origin,
                row.destination,
                row.duration,
                row.price,
                row.timetable.iter().map(|t| t.to_string()).collect(),
                SeatMap::with_blocked_every(config.seat_map.seat_count, blocked_every(id)),
            );
            if row.featured {
                route.featured()
            } else {
                route
            }
        })
        .collect()
}

pub fn bookings() -> Vec<Booking> {
    let rows = [
        ("1", "Panadura", "Kaduwela", (2024, 3, 15), "09:00 AM", BookingStatus::Upcoming, "ABC123"),
        ("2", "Colombo", "Kandy", (2024, 2, 28), "10:30 AM", BookingStatus::Completed, "XYZ456"),
        ("3", "Galle", "Matara", (2024, 4, 5), "02:00 PM", BookingStatus::Upcoming, "LMN789"),
        ("4", "Negombo", "Colombo", (2024, 1, 20), "07:30 AM", BookingStatus::Cancelled, "DEF101"),
    ];

    rows.into_iter()
        .filter_map(|(id, origin, destination, (y, m, d), time, status, token)| {
            let date = NaiveDate::from_ymd_opt(y, m, d)?;
            Some(Booking::new(id, origin, destination, date, time, token).with_status(status))
        })
        .collect()
}

pub fn profile() -> UserProfile {
    UserProfile::new("John Doe", "john.doe@example.com", "+1 (123) 456-7890")
}
