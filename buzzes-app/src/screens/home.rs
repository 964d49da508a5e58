use buzzes_catalog::{Route, RouteQuery};

use crate::error::AppError;
use crate::state::AppState;

/// Featured routes matching the search box.
pub async fn featured_routes(state: &AppState, query: &str) -> Result<Vec<Route>, AppError> {
    let routes = state.routes.list_routes().await?;
    Ok(RouteQuery::new(query).featured().apply(&routes))
}

pub fn render(routes: &[Route], query: &str, currency: &str) -> String {
    let mut out = String::from("Buzzes\n\nPopular routes");
    if !query.trim().is_empty() {
        out.push_str(&format!(" matching \"{}\"", query.trim()));
    }
    out.push('\n');
    super::routes::render_cards(&mut out, routes, currency);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use buzzes_store::Config;

    #[tokio::test]
    async fn test_fares_show_default_currency() {
        let state = AppState::in_memory(&Config::default());

        let routes = featured_routes(&state, "").await.unwrap();
        let text = render(&routes, "", &state.business_rules.default_currency);
        assert!(text.contains("Panadura to Kaduwela"));
        assert!(text.contains("LKR "));
    }
}
