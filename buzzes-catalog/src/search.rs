use serde::{Deserialize, Serialize};

use crate::route::Route;

/// Free-text route filter used by the listing screens.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteQuery {
    pub text: String,
    #[serde(default)]
    pub featured_only: bool,
}

impl RouteQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            featured_only: false,
        }
    }

    pub fn featured(mut self) -> Self {
        self.featured_only = true;
        self
    }

    /// Case-insensitive substring match on origin or destination. Empty text matches everything.
    pub fn matches(&self, route: &Route) -> bool {
        if self.featured_only && !route.featured {
            return false;
        }
        let needle = self.text.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        route.origin.to_lowercase().contains(&needle)
            || route.destination.to_lowercase().contains(&needle)
    }

    pub fn apply<'a, I>(&self, routes: I) -> Vec<Route>
    where
        I: IntoIterator<Item = &'a Route>,
    {
        routes.into_iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
