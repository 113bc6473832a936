use axum::{debug_handler, extract::State, http::StatusCode, routing::post, Router};

use crate::{
    blocks::Block,
    reddit::{error_blocks, RedditClient, TopQuery},
    slack::{SlackClient, SlackForm, SlashCommand},
    AppResult, AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/subreddit", post(subreddit))
}

#[debug_handler(state = AppState)]
pub(crate) async fn subreddit(
    State(reddit): State<RedditClient>,
    State(slack): State<SlackClient>,
    SlackForm(command): SlackForm<SlashCommand>,
) -> AppResult<StatusCode> {
    tracing::info!(user = %command.user_id, channel = %command.channel_id, text = %command.text, "subreddit command");

    tokio::spawn(async move {
        let (text, blocks) = random_post_blocks(&reddit, &command).await;
        if let Err(err) = slack.post_message(&command.channel_id, &text, &blocks).await {
            tracing::error!(channel = %command.channel_id, err = format!("{err:#}"), "couldn't post subreddit reply");
        }
    });

    Ok(StatusCode::OK)
}

/// Fallback text and blocks for the reply, an error message if no post
/// could be fetched.
async fn random_post_blocks(reddit: &RedditClient, command: &SlashCommand) -> (String, Vec<Block>) {
    let post = match command.text.parse::<TopQuery>() {
        Ok(query) => reddit.random_top_post(&query).await,
        Err(err) => Err(err.into()),
    };

    match post {
        Ok(post) => (post.title.clone(), post.to_blocks(&command.user_id)),
        Err(err) => {
            tracing::warn!(text = %command.text, err = format!("{err:#}"), "no post for subreddit command");
            let message = err.to_string();
            (message.clone(), error_blocks(&message, &command.user_id))
        }
    }
}
