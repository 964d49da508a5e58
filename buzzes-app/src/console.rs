//! Line-oriented front-end: parses a command, applies it, renders the current screen as text.

use std::time::Duration;

use buzzes_catalog::RouteId;
use buzzes_order::Booking;
use tracing::debug;

use crate::error::AppError;
use crate::screens::{bookings, home, profile, route_details, routes, RouteDetails, Screen};
use crate::state::AppState;

pub const HELP: &str = "\
Commands:
  home [query]        popular routes
  routes [query]      all routes, filtered by origin/destination
  open <route-id>     route details
  time <hh:mm AM>     pick a departure time
  seat <n>            select / deselect a seat
  book                review the bill
  confirm             confirm the purchase or the pending cancellation
  close               close the bill, confirmation or cancellation prompt
  bookings            upcoming bookings
  cancel <id>         ask to cancel an upcoming booking
  profile             profile and booking history
  help | quit
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Home(String),
    Routes(String),
    Open(Option<RouteId>),
    Time(String),
    Seat(u32),
    Book,
    Confirm,
    Close,
    Bookings,
    Cancel(String),
    Profile,
    Help,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, AppError> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let cmd = match head.to_ascii_lowercase().as_str() {
            "home" => Command::Home(rest.to_string()),
            "routes" => Command::Routes(rest.to_string()),
            // An unparsable id is the same as no reference at all.
            "open" => Command::Open(rest.parse().ok()),
            "time" if !rest.is_empty() => Command::Time(rest.to_ascii_uppercase()),
            "seat" => Command::Seat(
                rest.parse()
                    .map_err(|_| AppError::InvalidCommand(line.to_string()))?,
            ),
            "book" => Command::Book,
            "confirm" => Command::Confirm,
            "close" => Command::Close,
            "bookings" => Command::Bookings,
            "cancel" if !rest.is_empty() => Command::Cancel(rest.to_string()),
            "profile" => Command::Profile,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            _ => return Err(AppError::InvalidCommand(line.to_string())),
        };
        Ok(cmd)
    }
}

/// What the front-end should do with the result of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    /// Cosmetic pause before showing `text`.
    pub pause: Option<Duration>,
    pub quit: bool,
}

impl Reply {
    fn show(text: String) -> Self {
        Self { text, pause: None, quit: false }
    }
}

pub struct Console {
    state: AppState,
    screen: Screen,
    details: Option<RouteDetails>,
    /// Booking awaiting a yes/no on the cancellation prompt.
    pending_cancel: Option<Booking>,
}

impl Console {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            screen: Screen::default(),
            details: None,
            pending_cancel: None,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn details(&self) -> Option<&RouteDetails> {
        self.details.as_ref()
    }

    pub fn pending_cancel(&self) -> Option<&Booking> {
        self.pending_cancel.as_ref()
    }

    pub async fn start(&mut self) -> Result<Reply, AppError> {
        self.handle(Command::Home(String::new())).await
    }

    pub async fn handle_line(&mut self, line: &str) -> Result<Reply, AppError> {
        let command = Command::parse(line)?;
        self.handle(command).await
    }

    pub async fn handle(&mut self, command: Command) -> Result<Reply, AppError> {
        debug!(screen = self.screen.name(), ?command, "Handling command");

        match command {
            Command::Home(query) => {
                let found = home::featured_routes(&self.state, &query).await?;
                self.navigate(Screen::Home { query: query.clone() });
                Ok(Reply::show(home::render(
                    &found,
                    &query,
                    &self.state.business_rules.default_currency,
                )))
            }
            Command::Routes(query) => {
                let found = routes::search_routes(&self.state, &query).await?;
                self.navigate(Screen::Routes { query: query.clone() });
                Ok(Reply::show(routes::render(
                    &found,
                    &query,
                    &self.state.business_rules.default_currency,
                )))
            }
            Command::Open(route_id) => {
                let details = RouteDetails::load(&self.state, route_id).await?;
                self.navigate(Screen::RouteDetails(route_id));
                let text = details.render();
                self.details = Some(details);
                Ok(Reply::show(text))
            }
            Command::Time(time) => {
                self.details_mut()?.flow_mut()?.select_time(&time)?;
                self.render_details()
            }
            Command::Seat(seat) => {
                self.details_mut()?.flow_mut()?.toggle_seat(seat)?;
                self.render_details()
            }
            Command::Book => {
                self.details_mut()?.flow_mut()?.request_bill()?;
                self.render_details()
            }
            Command::Confirm => {
                if let Some(booking) = self.pending_cancel.take() {
                    let upcoming = bookings::cancel_booking(&self.state, &booking.id).await?;
                    return Ok(Reply::show(bookings::render(&upcoming)));
                }
                let state = self.state.clone();
                let details = self.details_mut()?;
                route_details::confirm_purchase(&state, details).await?;
                let mut reply = self.render_details()?;
                reply.pause = Some(Duration::from_millis(state.business_rules.confirmation_delay_ms))
                    .filter(|d| !d.is_zero());
                Ok(reply)
            }
            Command::Close => {
                if self.pending_cancel.take().is_some() {
                    debug!("Cancellation dismissed");
                    let upcoming = bookings::upcoming_bookings(&self.state).await?;
                    return Ok(Reply::show(bookings::render(&upcoming)));
                }
                let flow = self.details_mut()?.flow_mut()?;
                if flow.actions().close_bill {
                    flow.close_bill()?;
                } else {
                    flow.close_confirmation()?;
                }
                self.render_details()
            }
            Command::Bookings => {
                let upcoming = bookings::upcoming_bookings(&self.state).await?;
                self.navigate(Screen::Bookings);
                Ok(Reply::show(bookings::render(&upcoming)))
            }
            Command::Cancel(id) => {
                let booking = bookings::cancellable_booking(&self.state, &id).await?;
                self.navigate(Screen::Bookings);
                let text = bookings::render_cancel_prompt(&booking);
                self.pending_cancel = Some(booking);
                Ok(Reply::show(text))
            }
            Command::Profile => {
                let view = profile::load(&self.state).await?;
                self.navigate(Screen::Profile);
                Ok(Reply::show(profile::render(&view)))
            }
            Command::Help => Ok(Reply::show(HELP.to_string())),
            Command::Quit => Ok(Reply {
                text: String::new(),
                pause: None,
                quit: true,
            }),
        }
    }

    /// Leaving the details screen drops its selection, like unmounting the view.
    /// Any screen change also dismisses the cancellation prompt.
    fn navigate(&mut self, screen: Screen) {
        self.pending_cancel = None;
        if !matches!(screen, Screen::RouteDetails(_)) {
            self.details = None;
        }
        self.screen = screen;
    }

    fn details_mut(&mut self) -> Result<&mut RouteDetails, AppError> {
        self.details.as_mut().ok_or(AppError::NoRouteOpen)
    }

    fn render_details(&self) -> Result<Reply, AppError> {
        let details = self.details.as_ref().ok_or(AppError::NoRouteOpen)?;
        Ok(Reply::show(details.render()))
    }
}
