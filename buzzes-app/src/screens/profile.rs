use buzzes_order::Booking;
use buzzes_shared::UserProfile;

use crate::error::AppError;
use crate::state::AppState;

pub struct ProfileView {
    pub profile: UserProfile,
    /// Full history, every status.
    pub bookings: Vec<Booking>,
}

pub async fn load(state: &AppState) -> Result<ProfileView, AppError> {
    tracing::debug!(email = %state.profile.email, "Profile opened");
    Ok(ProfileView {
        profile: state.profile.clone(),
        bookings: state.bookings.list_bookings().await?,
    })
}

pub fn render(view: &ProfileView) -> String {
    let p = &view.profile;
    let mut out = format!(
        "{}\n{}\nPhone: {}\n\nMy Bookings\n",
        p.name,
        p.email.expose(),
        p.phone.expose()
    );
    for b in &view.bookings {
        out.push_str(&format!(
            "  {} to {}  {}  {}  {}\n",
            b.origin, b.destination, b.date, b.time, b.status
        ));
    }
    out
}
