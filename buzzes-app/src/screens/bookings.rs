use buzzes_order::{Booking, BookingError};
use buzzes_shared::{BookingCancelledEvent, BookingEvent};
use tracing::info;

use crate::error::AppError;
use crate::state::AppState;

/// Only upcoming bookings are listed here.
pub async fn upcoming_bookings(state: &AppState) -> Result<Vec<Booking>, AppError> {
    let bookings = state.bookings.list_bookings().await?;
    Ok(bookings.into_iter().filter(Booking::is_upcoming).collect())
}

/// The booking behind a `cancel <id>` request, provided it can still be cancelled.
/// Nothing changes until the user confirms.
pub async fn cancellable_booking(state: &AppState, booking_id: &str) -> Result<Booking, AppError> {
    let booking = state
        .bookings
        .get_booking(booking_id)
        .await?
        .ok_or_else(|| BookingError::NotFound(booking_id.to_string()))?;

    if !booking.is_upcoming() {
        return Err(BookingError::NotCancellable {
            id: booking.id,
            status: booking.status,
        }
        .into());
    }
    Ok(booking)
}

/// Upcoming → Cancelled, then the refreshed upcoming list. No undo.
pub async fn cancel_booking(state: &AppState, booking_id: &str) -> Result<Vec<Booking>, AppError> {
    let mut booking = state
        .bookings
        .get_booking(booking_id)
        .await?
        .ok_or_else(|| BookingError::NotFound(booking_id.to_string()))?;

    booking.cancel()?;
    state.bookings.save_booking(&booking).await?;

    state.publish(BookingEvent::Cancelled(BookingCancelledEvent::new(
        state.session_id,
        booking.id.clone(),
    )));
    info!(booking_id = %booking.id, "Booking cancelled");

    upcoming_bookings(state).await
}

pub fn render(bookings: &[Booking]) -> String {
    let mut out = String::from("My Upcoming Bookings\n\n");
    if bookings.is_empty() {
        out.push_str("  No upcoming bookings\n");
        return out;
    }
    for b in bookings {
        out.push_str(&format!(
            "  [{}] {} to {}  {}  {}  token {}\n",
            b.id, b.origin, b.destination, b.date, b.time, b.token
        ));
    }
    out.push_str("\n`cancel <id>` to cancel a booking.\n");
    out
}

pub fn render_cancel_prompt(booking: &Booking) -> String {
    format!(
        "--- Confirm Cancellation ---\nAre you sure you want to cancel this booking?\n  [{}] {} to {}  {}  {}  token {}\n[ No ] [ Yes, Cancel ]  (`close` / `confirm`)\n",
        booking.id, booking.origin, booking.destination, booking.date, booking.time, booking.token
    )
}
