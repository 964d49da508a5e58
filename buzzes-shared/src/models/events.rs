use chrono::Utc;
use uuid::Uuid;

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct BookingConfirmedEvent {
    pub event_id: Uuid,
    pub session_id: Uuid,
    pub booking_id: String,
    pub route_id: u32,
    pub departure_time: String,
    pub seats: Vec<u32>,
    pub total: u64,
    pub currency: String,
    pub token: String,
    pub timestamp: i64,
}

#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
pub struct BookingCancelledEvent {
    pub event_id: Uuid,
    pub session_id: Uuid,
    pub booking_id: String,
    pub timestamp: i64,
}

impl BookingCancelledEvent {
    pub fn new(session_id: Uuid, booking_id: impl Into<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            session_id,
            booking_id: booking_id.into(),
            timestamp: Utc::now().timestamp(),
        }
    }
}

/// Everything the booking screens broadcast to in-process listeners.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BookingEvent {
    Confirmed(BookingConfirmedEvent),
    Cancelled(BookingCancelledEvent),
}

impl BookingEvent {
    pub fn booking_id(&self) -> &str {
        match self {
            BookingEvent::Confirmed(e) => &e.booking_id,
            BookingEvent::Cancelled(e) => &e.booking_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            BookingEvent::Confirmed(_) => "booking.confirmed",
            BookingEvent::Cancelled(_) => "booking.cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_is_tagged_by_type() {
        let event = BookingEvent::Cancelled(BookingCancelledEvent::new(Uuid::new_v4(), "3"));
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "cancelled");
        assert_eq!(json["booking_id"], "3");
        assert_eq!(event.name(), "booking.cancelled");
    }
}
