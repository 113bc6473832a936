mod client;
mod payload;
mod verify;

pub use client::SlackClient;
pub use payload::{Action, BlockActions, Channel, InteractionForm, Message, PayloadUser, SlashCommand};
pub use verify::{SignatureError, SigningSecret, SlackForm, MAX_AGE_SECS, SIGNATURE_HEADER, TIMESTAMP_HEADER};

/// Slack's markup for mentioning a user.
pub fn mention(user_id: &str) -> String {
    format!("<@{user_id}>")
}
