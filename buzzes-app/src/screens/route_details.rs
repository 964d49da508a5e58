use buzzes_catalog::RouteId;
use buzzes_order::{Actions, Booking, BookingFlow, Confirmation, FlowState};
use buzzes_shared::{BookingConfirmedEvent, BookingEvent};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

const SEATS_PER_ROW: usize = 5;

/// The route-details screen. Without a resolvable route it shows "Route not found" and nothing else.
#[derive(Debug, Clone)]
pub enum RouteDetails {
    NotFound,
    Ready(BookingFlow),
}

impl RouteDetails {
    pub async fn load(state: &AppState, route_id: Option<RouteId>) -> Result<Self, AppError> {
        let Some(id) = route_id else {
            warn!("Route details opened without a route reference");
            return Ok(RouteDetails::NotFound);
        };

        match state.routes.get_route_by_id(id).await? {
            Some(route) => {
                info!(route_id = %id, "Route details opened");
                let flow = BookingFlow::new(route)
                    .with_currency_fallback(&state.business_rules.default_currency);
                Ok(RouteDetails::Ready(flow))
            }
            None => {
                warn!(route_id = %id, "Unknown route");
                Ok(RouteDetails::NotFound)
            }
        }
    }

    pub fn flow(&self) -> Option<&BookingFlow> {
        match self {
            RouteDetails::Ready(flow) => Some(flow),
            RouteDetails::NotFound => None,
        }
    }

    pub fn flow_mut(&mut self) -> Result<&mut BookingFlow, AppError> {
        match self {
            RouteDetails::Ready(flow) => Ok(flow),
            RouteDetails::NotFound => Err(AppError::RouteNotFound),
        }
    }

    pub fn actions(&self) -> Actions {
        self.flow().map(BookingFlow::actions).unwrap_or_default()
    }

    pub fn render(&self) -> String {
        match self {
            RouteDetails::NotFound => "Route not found\n".to_string(),
            RouteDetails::Ready(flow) => render_flow(flow),
        }
    }
}

/// Confirms the purchase under review and records it as an upcoming booking.
/// The flow only moves to `Confirmed` once the booking is stored.
pub async fn confirm_purchase(
    state: &AppState,
    details: &mut RouteDetails,
) -> Result<(Confirmation, Booking), AppError> {
    let flow = details.flow_mut()?;
    let mut staged = flow.clone();
    let confirmation = staged.confirm_purchase(state.tokens.as_ref())?;
    let route = staged.route();

    let draft = Booking::new(
        String::new(),
        route.origin.clone(),
        route.destination.clone(),
        Utc::now().date_naive(),
        confirmation.bill.departure_time.clone(),
        confirmation.token.to_string(),
    );
    let booking = state.bookings.create_booking(draft).await?;
    let route_id = route.id.0;
    *flow = staged;

    state.publish(BookingEvent::Confirmed(BookingConfirmedEvent {
        event_id: Uuid::new_v4(),
        session_id: state.session_id,
        booking_id: booking.id.clone(),
        route_id,
        departure_time: booking.time.clone(),
        seats: confirmation.bill.seats.clone(),
        total: confirmation.bill.total,
        currency: confirmation.bill.currency.clone(),
        token: booking.token.clone(),
        timestamp: Utc::now().timestamp(),
    }));

    info!(booking_id = %booking.id, "Booking recorded");
    Ok((confirmation, booking))
}

fn render_flow(flow: &BookingFlow) -> String {
    let route = flow.route();
    let mut out = format!(
        "{}\nTravel time: {}\nPrice per seat: {} {}\n\nSelect a Time\n",
        route.title(),
        route.duration,
        flow.currency(),
        route.price
    );

    for time in &route.timetable {
        let marker = if flow.selected_time() == Some(time.as_str()) { '>' } else { ' ' };
        out.push_str(&format!(" {} {}\n", marker, time));
    }

    if flow.selected_time().is_some() {
        out.push_str("\nSelect Seats   (xx = taken, * = yours)\n");
        let seats: Vec<_> = route.seats.iter().collect();
        for row in seats.chunks(SEATS_PER_ROW) {
            let cells: Vec<String> = row
                .iter()
                .map(|seat| {
                    if !seat.available {
                        "[xx ]".to_string()
                    } else if flow.is_selected(seat.number) {
                        format!("[{:>2}*]", seat.number)
                    } else {
                        format!("[{:>2} ]", seat.number)
                    }
                })
                .collect();
            out.push_str(&format!("  {}\n", cells.join(" ")));
        }
        out.push_str(&format!("{} seat(s) selected\n", flow.selected_seats().len()));
    }

    let button = match flow.selected_time() {
        Some(time) => format!("Book {} Seat(s) for {}", flow.selected_seats().len(), time),
        None => "Select a Time and Seats to Book".to_string(),
    };
    let hint = if flow.actions().book { "`book`" } else { "disabled" };
    out.push_str(&format!("\n[ {} ] ({})\n", button, hint));

    match flow.state() {
        FlowState::BillReview => {
            if let Some(bill) = flow.bill() {
                out.push_str(&format!(
                    "\n--- Billing Details ---\nRoute: {} to {}\nTime: {}\nSeats: {}\nPrice per seat: {} {}\nTotal: {} {}\n[ Close ] [ Confirm Purchase ]  (`close` / `confirm`)\n",
                    bill.origin,
                    bill.destination,
                    bill.departure_time,
                    bill.seat_list(),
                    bill.currency,
                    bill.price_per_seat,
                    bill.currency,
                    bill.total
                ));
            }
        }
        FlowState::Confirmed => {
            if let Some(confirmation) = flow.confirmation() {
                let bill = &confirmation.bill;
                out.push_str(&format!(
                    "\n--- Booking Confirmed ---\nUnique Token: {}\nRoute: {} to {}\nTime: {}\nSeats: {}\nThank you for your purchase!\n[ Close ]  (`close`)\n",
                    confirmation.token,
                    bill.origin,
                    bill.destination,
                    bill.departure_time,
                    bill.seat_list()
                ));
            }
        }
        _ => {}
    }

    out
}
