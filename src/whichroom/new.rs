use std::sync::Arc;

use axum::{debug_handler, extract::State, http::StatusCode};

use crate::{roster::RosterStore, slack::{SlackClient, SlackForm, SlashCommand}, AppResult, AppState};

use super::POLL_TEXT;

#[debug_handler(state = AppState)]
pub(crate) async fn new_poll(
    State(rosters): State<Arc<RosterStore>>,
    State(slack): State<SlackClient>,
    SlackForm(command): SlackForm<SlashCommand>,
) -> AppResult<StatusCode> {
    let (id, blocks) = rosters.create(command.user()).await;
    tracing::info!(%id, user = %command.user_id, channel = %command.channel_id, "whichroom command");

    tokio::spawn(async move {
        if let Err(err) = slack.post_message(&command.channel_id, POLL_TEXT, &blocks).await {
            tracing::error!(%id, err = format!("{err:#}"), "couldn't post room poll");
        }
    });

    Ok(StatusCode::OK)
}
