use buzzes_shared::BookingEvent;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{error, info, warn};

/// Logs every booking event until the channel closes.
pub async fn run_event_logger(mut rx: broadcast::Receiver<BookingEvent>) {
    info!("Event logger started");

    loop {
        match rx.recv().await {
            Ok(event) => match serde_json::to_string(&event) {
                Ok(payload) => info!(event = event.name(), booking_id = event.booking_id(), %payload, "Booking event"),
                Err(e) => error!("Failed to serialize {}: {}", event.name(), e),
            },
            Err(RecvError::Lagged(skipped)) => warn!(skipped, "Event logger fell behind"),
            Err(RecvError::Closed) => break,
        }
    }

    info!("Event logger stopped");
}
