mod choose;
mod new;

use axum::{routing::post, Router};

use crate::AppState;

/// Notification text for poll messages.
pub(crate) const POLL_TEXT: &str = "Which room would you like to be in?";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/whichroom", post(new::new_poll))
        .route("/", post(choose::choose_room))
}
