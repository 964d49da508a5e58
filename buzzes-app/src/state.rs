use std::sync::Arc;

use buzzes_core::{BookingRepository, RouteRepository};
use buzzes_order::{RandomTokenGenerator, TokenGenerator};
use buzzes_shared::{BookingEvent, UserProfile};
use buzzes_store::app_config::BusinessRules;
use buzzes_store::{Config, InMemoryStore};
use tokio::sync::broadcast;
use uuid::Uuid;

const EVENT_CHANNEL_CAPACITY: usize = 100;

#[derive(Clone)]
pub struct AppState {
    pub session_id: Uuid,
    pub routes: Arc<dyn RouteRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub tokens: Arc<dyn TokenGenerator>,
    pub events: broadcast::Sender<BookingEvent>,
    pub profile: UserProfile,
    pub business_rules: BusinessRules,
}

impl AppState {
    pub fn new(
        config: &Config,
        routes: Arc<dyn RouteRepository>,
        bookings: Arc<dyn BookingRepository>,
        profile: UserProfile,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            session_id: Uuid::new_v4(),
            routes,
            bookings,
            tokens: Arc::new(RandomTokenGenerator),
            events,
            profile,
            business_rules: config.business_rules.clone(),
        }
    }

    /// Seeded in-memory store behind both repositories.
    pub fn in_memory(config: &Config) -> Self {
        let store = Arc::new(InMemoryStore::seeded(config));
        Self::new(config, store.clone(), store, buzzes_store::seed::profile())
    }

    pub fn with_token_generator(mut self, tokens: Arc<dyn TokenGenerator>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Broadcast to in-process listeners. Having none is fine.
    pub fn publish(&self, event: BookingEvent) {
        if self.events.send(event).is_err() {
            tracing::trace!("No event listeners");
        }
    }
}
