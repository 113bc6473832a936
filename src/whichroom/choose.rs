use std::sync::Arc;

use axum::{debug_handler, extract::State, http::StatusCode};

use crate::{
    roster::{Room, RosterError, RosterStore},
    slack::{InteractionForm, SlackClient, SlackForm},
    AppResult, AppState,
};

use super::POLL_TEXT;

#[debug_handler(state = AppState)]
pub(crate) async fn choose_room(
    State(rosters): State<Arc<RosterStore>>,
    State(slack): State<SlackClient>,
    SlackForm(form): SlackForm<InteractionForm>,
) -> AppResult<StatusCode> {
    let actions = form.block_actions()?;
    let id = actions.roster_id()?;
    let user = actions.user();

    let outcome = match actions.action_value()?.parse::<Room>() {
        Ok(room) => rosters.assign(id, user, room).await,
        Err(err) => Err(err),
    };

    tokio::spawn(async move {
        let sent = match outcome {
            Ok(blocks) => slack.respond(&actions.response_url, POLL_TEXT, &blocks, true).await,
            Err(err) => {
                tracing::warn!(%id, user = %actions.user.id, %err, "room choice rejected");
                slack.respond_ephemeral(&actions.response_url, &rejection(&err)).await
            }
        };
        if let Err(err) = sent {
            tracing::error!(%id, err = format!("{err:#}"), "couldn't update room poll");
        }
    });

    Ok(StatusCode::OK)
}

fn rejection(err: &RosterError) -> String {
    match err {
        RosterError::RosterNotFound(_) => {
            "This room poll has expired. Start a new one with `/whichroom`.".to_owned()
        }
        RosterError::InvalidRoom(room) => {
            format!("Sorry, there is no room called {room:?}. Pick slow, medium or fast.")
        }
    }
}
