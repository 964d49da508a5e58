use buzzes_catalog::{Route, RouteQuery};

use crate::error::AppError;
use crate::state::AppState;

pub async fn search_routes(state: &AppState, query: &str) -> Result<Vec<Route>, AppError> {
    let routes = state.routes.list_routes().await?;
    Ok(RouteQuery::new(query).apply(&routes))
}

pub fn render(routes: &[Route], query: &str, currency: &str) -> String {
    let mut out = String::from("Sri Lankan Highway Routes\n");
    if !query.trim().is_empty() {
        out.push_str(&format!("Search: \"{}\"\n", query.trim()));
    }
    out.push('\n');
    render_cards(&mut out, routes, currency);
    if !routes.is_empty() {
        out.push_str("\n`open <id>` to book.\n");
    }
    out
}

/// One line per route. Routes without their own currency are priced in `fallback_currency`.
pub(crate) fn render_cards(out: &mut String, routes: &[Route], fallback_currency: &str) {
    if routes.is_empty() {
        out.push_str("  No routes found\n");
        return;
    }
    for route in routes {
        let fare = format!("{} {}", route.currency_or(fallback_currency), route.price);
        out.push_str(&format!(
            "  [{:>2}] {:<32} {:>8}  {}\n",
            route.id.0,
            route.title(),
            route.duration,
            fare
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buzzes_catalog::{RouteId, SeatMap};

    #[test]
    fn test_render_lists_cards() {
        let routes = vec![Route::new(
            RouteId(2),
            "Colombo",
            "Galle",
            "1h 20m",
            400,
            vec![],
            SeatMap::with_blocked_every(30, 4),
        )];

        let text = render(&routes, "", "LKR");
        assert!(text.contains("Colombo to Galle"));
        assert!(text.contains("1h 20m"));
        assert!(text.contains("LKR 400"));
    }

    #[test]
    fn test_route_currency_wins_over_fallback() {
        let routes = vec![Route::new(
            RouteId(3),
            "Colombo",
            "Kandy",
            "3h",
            500,
            vec![],
            SeatMap::with_blocked_every(30, 3),
        )
        .with_currency("USD")];

        let text = render(&routes, "", "LKR");
        assert!(text.contains("USD 500"));
        assert!(!text.contains("LKR"));
    }

    #[test]
    fn test_render_empty() {
        assert!(render(&[], "jaffna", "LKR").contains("No routes found"));
    }
}
