use buzzes_catalog::{Bill, Route, DEFAULT_CURRENCY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::{debug, info};

use crate::token::{ConfirmationToken, TokenGenerator};

/// Where the user is in the route-details screen.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlowState {
    Browsing,
    TimeChosen,
    SeatsChosen,
    BillReview,
    Confirmed,
}

impl fmt::Display for FlowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FlowState::Browsing => "BROWSING",
            FlowState::TimeChosen => "TIME_CHOSEN",
            FlowState::SeatsChosen => "SEATS_CHOSEN",
            FlowState::BillReview => "BILL_REVIEW",
            FlowState::Confirmed => "CONFIRMED",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overlay {
    Closed,
    Bill,
    Confirmation,
}

/// Issued token together with the bill it paid for.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Confirmation {
    pub token: ConfirmationToken,
    pub bill: Bill,
}

/// Which controls are enabled right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Actions {
    pub select_time: bool,
    pub toggle_seat: bool,
    pub book: bool,
    pub confirm: bool,
    pub close_bill: bool,
    pub close_confirmation: bool,
}

impl Actions {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn any(&self) -> bool {
        *self != Self::none()
    }
}

/// Drives one route from "pick a time" to "here is your token".
///
/// All transitions are synchronous and either apply fully or return an error
/// leaving the flow untouched.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    route: Route,
    currency: String,
    selected_time: Option<String>,
    selected_seats: BTreeSet<u32>,
    overlay: Overlay,
    bill: Option<Bill>,
    confirmation: Option<Confirmation>,
}

impl BookingFlow {
    pub fn new(route: Route) -> Self {
        let currency = route.currency_or(DEFAULT_CURRENCY).to_string();
        Self {
            route,
            currency,
            selected_time: None,
            selected_seats: BTreeSet::new(),
            overlay: Overlay::Closed,
            bill: None,
            confirmation: None,
        }
    }

    /// Currency used when the route does not name one.
    pub fn with_currency_fallback(mut self, fallback: &str) -> Self {
        self.currency = self.route.currency_or(fallback).to_string();
        self
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn state(&self) -> FlowState {
        match (self.overlay, &self.selected_time) {
            (Overlay::Confirmation, _) => FlowState::Confirmed,
            (Overlay::Bill, _) => FlowState::BillReview,
            (Overlay::Closed, None) => FlowState::Browsing,
            (Overlay::Closed, Some(_)) if self.selected_seats.is_empty() => FlowState::TimeChosen,
            (Overlay::Closed, Some(_)) => FlowState::SeatsChosen,
        }
    }

    pub fn selected_time(&self) -> Option<&str> {
        self.selected_time.as_deref()
    }

    /// Ascending.
    pub fn selected_seats(&self) -> Vec<u32> {
        self.selected_seats.iter().copied().collect()
    }

    pub fn is_selected(&self, seat: u32) -> bool {
        self.selected_seats.contains(&seat)
    }

    /// The bill under review, if the bill overlay is open.
    pub fn bill(&self) -> Option<&Bill> {
        match self.overlay {
            Overlay::Bill => self.bill.as_ref(),
            _ => None,
        }
    }

    /// Most recent confirmation. Stays readable after the confirmation overlay is closed.
    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    /// Running total for the current selection.
    pub fn total(&self) -> u64 {
        buzzes_catalog::pricing::seat_total(self.route.price, self.selected_seats.len())
    }

    pub fn actions(&self) -> Actions {
        match self.overlay {
            Overlay::Bill => Actions {
                confirm: true,
                close_bill: true,
                ..Actions::none()
            },
            Overlay::Confirmation => Actions {
                close_confirmation: true,
                ..Actions::none()
            },
            Overlay::Closed => Actions {
                select_time: !self.route.timetable.is_empty(),
                toggle_seat: self.selected_time.is_some(),
                book: self.selected_time.is_some() && !self.selected_seats.is_empty(),
                ..Actions::none()
            },
        }
    }

    /// Any state with overlays closed → TimeChosen. Always clears the seat selection.
    pub fn select_time(&mut self, time: &str) -> Result<(), FlowError> {
        self.ensure_no_overlay(FlowState::TimeChosen)?;

        if !self.route.has_departure(time) {
            return Err(FlowError::UnknownTime(time.to_string()));
        }

        self.selected_time = Some(time.to_string());
        self.selected_seats.clear();
        debug!(route_id = %self.route.id, time, "Departure time selected");
        Ok(())
    }

    /// TimeChosen ⇄ SeatsChosen. Returns whether the seat is selected afterwards.
    pub fn toggle_seat(&mut self, seat: u32) -> Result<bool, FlowError> {
        self.ensure_no_overlay(FlowState::SeatsChosen)?;

        if self.selected_time.is_none() {
            return Err(FlowError::NoTimeSelected);
        }
        let entry = self
            .route
            .seats
            .get(seat)
            .ok_or(FlowError::UnknownSeat(seat))?;
        if !entry.available {
            return Err(FlowError::SeatUnavailable(seat));
        }

        let selected = if self.selected_seats.remove(&seat) {
            false
        } else {
            self.selected_seats.insert(seat);
            true
        };
        debug!(route_id = %self.route.id, seat, selected, "Seat toggled");
        Ok(selected)
    }

    /// SeatsChosen → BillReview
    pub fn request_bill(&mut self) -> Result<Bill, FlowError> {
        self.ensure_no_overlay(FlowState::BillReview)?;

        let time = match &self.selected_time {
            Some(t) if !self.selected_seats.is_empty() => t.clone(),
            _ => return Err(FlowError::NothingToBill),
        };

        let bill = Bill::new(&self.route, &time, self.selected_seats(), &self.currency);
        self.bill = Some(bill.clone());
        self.overlay = Overlay::Bill;
        debug!(route_id = %self.route.id, total = bill.total, "Bill opened");
        Ok(bill)
    }

    /// BillReview → SeatsChosen
    pub fn close_bill(&mut self) -> Result<(), FlowError> {
        if self.overlay != Overlay::Bill {
            return Err(FlowError::InvalidTransition {
                from: self.state(),
                to: FlowState::SeatsChosen,
            });
        }

        self.overlay = Overlay::Closed;
        Ok(())
    }

    /// BillReview → Confirmed
    pub fn confirm_purchase(&mut self, generator: &dyn TokenGenerator) -> Result<Confirmation, FlowError> {
        let bill = match (self.overlay, &self.bill) {
            (Overlay::Bill, Some(bill)) => bill.clone(),
            _ => {
                return Err(FlowError::InvalidTransition {
                    from: self.state(),
                    to: FlowState::Confirmed,
                })
            }
        };

        let confirmation = Confirmation {
            token: generator.generate_token(),
            bill,
        };
        self.confirmation = Some(confirmation.clone());
        self.bill = None;
        self.overlay = Overlay::Confirmation;

        info!(
            route_id = %self.route.id,
            token = %confirmation.token,
            seats = confirmation.bill.seats.len(),
            total = confirmation.bill.total,
            "Purchase confirmed"
        );
        Ok(confirmation)
    }

    /// Confirmed → SeatsChosen. Time, seats and the confirmation are kept.
    pub fn close_confirmation(&mut self) -> Result<(), FlowError> {
        if self.overlay != Overlay::Confirmation {
            return Err(FlowError::InvalidTransition {
                from: self.state(),
                to: FlowState::SeatsChosen,
            });
        }

        self.overlay = Overlay::Closed;
        Ok(())
    }

    fn ensure_no_overlay(&self, to: FlowState) -> Result<(), FlowError> {
        if self.overlay != Overlay::Closed {
            return Err(FlowError::InvalidTransition { from: self.state(), to });
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FlowError {
    #[error("Departure time not in timetable: {0}")]
    UnknownTime(String),

    #[error("Select a departure time first")]
    NoTimeSelected,

    #[error("No such seat: {0}")]
    UnknownSeat(u32),

    #[error("Seat {0} is not available")]
    SeatUnavailable(u32),

    #[error("Select a time and at least one seat to book")]
    NothingToBill,

    #[error("Invalid state transition from {from} to {to}")]
    InvalidTransition {
        from: FlowState,
        to: FlowState,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::SequenceTokenGenerator;
    use buzzes_catalog::{RouteId, SeatMap};

    fn route(price: u32) -> Route {
        Route::new(
            RouteId(3),
            "Kottawa",
            "Kadawatha",
            "30m",
            price,
            vec!["08:00 AM".to_string(), "10:00 AM".to_string()],
            SeatMap::with_blocked_every(30, 3),
        )
    }

    fn tokens() -> SequenceTokenGenerator {
        SequenceTokenGenerator::from_strs(&["TOKEN001", "TOKEN002"]).unwrap()
    }

    #[test]
    fn test_starts_browsing_with_seat_grid_hidden() {
        let flow = BookingFlow::new(route(300));

        assert_eq!(flow.state(), FlowState::Browsing);
        assert!(flow.actions().select_time);
        assert!(!flow.actions().toggle_seat);
        assert!(!flow.actions().book);
    }

    #[test]
    fn test_unknown_time_rejected() {
        let mut flow = BookingFlow::new(route(300));

        let err = flow.select_time("11:00 PM").unwrap_err();
        assert_eq!(err, FlowError::UnknownTime("11:00 PM".to_string()));
        assert_eq!(flow.state(), FlowState::Browsing);
    }

    #[test]
    fn test_seat_requires_time() {
        let mut flow = BookingFlow::new(route(300));

        assert_eq!(flow.toggle_seat(1), Err(FlowError::NoTimeSelected));
        assert!(flow.selected_seats().is_empty());
    }

    #[test]
    fn test_unavailable_seats_leave_selection_unchanged() {
        let mut flow = BookingFlow::new(route(300));
        flow.select_time("08:00 AM").unwrap();
        flow.toggle_seat(1).unwrap();

        for seat in 1..=30 {
            if flow.route().seats.is_available(seat) {
                continue;
            }
            let before = flow.selected_seats();
            assert_eq!(flow.toggle_seat(seat), Err(FlowError::SeatUnavailable(seat)));
            assert_eq!(flow.selected_seats(), before);
        }

        assert_eq!(flow.toggle_seat(31), Err(FlowError::UnknownSeat(31)));
        assert_eq!(flow.selected_seats(), vec![1]);
    }

    #[test]
    fn test_changing_time_clears_seats() {
        let times = ["08:00 AM", "10:00 AM"];
        for t1 in times {
            for t2 in times.iter().filter(|t| **t != t1) {
                let mut flow = BookingFlow::new(route(300));
                flow.select_time(t1).unwrap();
                flow.toggle_seat(4).unwrap();
                assert_eq!(flow.state(), FlowState::SeatsChosen);

                flow.select_time(t2).unwrap();
                assert!(flow.selected_seats().is_empty());
                assert_eq!(flow.state(), FlowState::TimeChosen);
                assert_eq!(flow.selected_time(), Some(*t2));
            }
        }
    }

    #[test]
    fn test_reselecting_same_time_also_clears_seats() {
        let mut flow = BookingFlow::new(route(300));
        flow.select_time("08:00 AM").unwrap();
        flow.toggle_seat(2).unwrap();

        flow.select_time("08:00 AM").unwrap();
        assert!(flow.selected_seats().is_empty());
    }

    #[test]
    fn test_toggle_is_involutive() {
        let mut flow = BookingFlow::new(route(300));
        flow.select_time("10:00 AM").unwrap();
        flow.toggle_seat(5).unwrap();

        for seat in (1..=30).filter(|s| s % 3 != 0) {
            let before = flow.selected_seats();
            flow.toggle_seat(seat).unwrap();
            flow.toggle_seat(seat).unwrap();
            assert_eq!(flow.selected_seats(), before);
        }
    }

    #[test]
    fn test_toggle_moves_between_time_and_seats_chosen() {
        let mut flow = BookingFlow::new(route(300));
        flow.select_time("08:00 AM").unwrap();

        assert_eq!(flow.toggle_seat(7), Ok(true));
        assert_eq!(flow.state(), FlowState::SeatsChosen);
        assert_eq!(flow.toggle_seat(7), Ok(false));
        assert_eq!(flow.state(), FlowState::TimeChosen);
    }

    #[test]
    fn test_bill_total() {
        let mut flow = BookingFlow::new(route(300));
        flow.select_time("08:00 AM").unwrap();
        for seat in [1, 2, 4] {
            flow.toggle_seat(seat).unwrap();
        }

        assert_eq!(flow.total(), 900);
        let bill = flow.request_bill().unwrap();
        assert_eq!(bill.total, 900);
        assert_eq!(bill.seats, vec![1, 2, 4]);
        assert_eq!(bill.currency, "LKR");
        assert_eq!(flow.state(), FlowState::BillReview);
    }

    #[test]
    fn test_bill_requires_time_and_seats() {
        let mut flow = BookingFlow::new(route(300));
        assert_eq!(flow.request_bill(), Err(FlowError::NothingToBill));

        flow.select_time("08:00 AM").unwrap();
        assert_eq!(flow.request_bill(), Err(FlowError::NothingToBill));
        assert!(!flow.actions().book);
    }

    #[test]
    fn test_confirm_outside_bill_review_rejected() {
        let mut flow = BookingFlow::new(route(300));
        flow.select_time("08:00 AM").unwrap();
        flow.toggle_seat(1).unwrap();

        let err = flow.confirm_purchase(&tokens()).unwrap_err();
        assert_eq!(
            err,
            FlowError::InvalidTransition { from: FlowState::SeatsChosen, to: FlowState::Confirmed }
        );
        assert!(flow.confirmation().is_none());
    }

    #[test]
    fn test_full_scenario() {
        let mut flow = BookingFlow::new(route(300));
        flow.select_time("08:00 AM").unwrap();
        flow.toggle_seat(1).unwrap();
        assert!(flow.toggle_seat(3).is_err());
        assert_eq!(flow.selected_seats(), vec![1]);

        assert!(flow.actions().book);
        flow.request_bill().unwrap();
        assert!(flow.actions().confirm);

        let confirmation = flow.confirm_purchase(&tokens()).unwrap();
        assert_eq!(flow.state(), FlowState::Confirmed);
        assert_eq!(confirmation.token.as_str(), "TOKEN001");
        assert_eq!(confirmation.bill.seats, vec![1]);
        assert_eq!(confirmation.bill.total, 300);
        assert!(flow.bill().is_none());

        flow.close_confirmation().unwrap();
        assert_eq!(flow.state(), FlowState::SeatsChosen);
        assert_eq!(flow.selected_seats(), vec![1]);
        assert_eq!(flow.confirmation(), Some(&confirmation));
    }

    #[test]
    fn test_close_bill_keeps_selection() {
        let mut flow = BookingFlow::new(route(450));
        flow.select_time("10:00 AM").unwrap();
        flow.toggle_seat(2).unwrap();
        flow.request_bill().unwrap();

        flow.close_bill().unwrap();
        assert_eq!(flow.state(), FlowState::SeatsChosen);
        assert_eq!(flow.selected_seats(), vec![2]);
        assert_eq!(flow.selected_time(), Some("10:00 AM"));
    }

    #[test]
    fn test_selection_frozen_while_bill_open() {
        let mut flow = BookingFlow::new(route(300));
        flow.select_time("08:00 AM").unwrap();
        flow.toggle_seat(1).unwrap();
        flow.request_bill().unwrap();

        assert!(matches!(flow.toggle_seat(2), Err(FlowError::InvalidTransition { .. })));
        assert!(matches!(flow.select_time("10:00 AM"), Err(FlowError::InvalidTransition { .. })));
        assert!(matches!(flow.request_bill(), Err(FlowError::InvalidTransition { .. })));
        assert_eq!(flow.selected_seats(), vec![1]);
    }

    #[test]
    fn test_close_confirmation_only_when_confirmed() {
        let mut flow = BookingFlow::new(route(300));
        assert!(flow.close_confirmation().is_err());
        assert!(flow.close_bill().is_err());
    }

    #[test]
    fn test_second_purchase_issues_new_token() {
        let generator = tokens();
        let mut flow = BookingFlow::new(route(300));
        flow.select_time("08:00 AM").unwrap();
        flow.toggle_seat(1).unwrap();
        flow.request_bill().unwrap();
        flow.confirm_purchase(&generator).unwrap();
        flow.close_confirmation().unwrap();

        flow.request_bill().unwrap();
        let second = flow.confirm_purchase(&generator).unwrap();
        assert_eq!(second.token.as_str(), "TOKEN002");
    }

    #[test]
    fn test_currency_fallback() {
        let flow = BookingFlow::new(route(300)).with_currency_fallback("USD");
        assert_eq!(flow.currency(), "USD");

        let flow = BookingFlow::new(route(300).with_currency("EUR")).with_currency_fallback("USD");
        assert_eq!(flow.currency(), "EUR");
    }
}
