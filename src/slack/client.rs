use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

use crate::blocks::Block;

#[derive(Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    text: &'a str,
    blocks: &'a [Block],
}

#[derive(Serialize)]
struct ResponseMessage<'a> {
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    blocks: Option<&'a [Block]>,
    replace_original: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_type: Option<&'a str>,
}

#[derive(Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
}

/// Posts messages through Slack's Web API and interaction response URLs.
#[derive(Clone)]
pub struct SlackClient {
    http: reqwest::Client,
    token: String,
    api_url: String,
}

impl SlackClient {
    pub fn new(http: reqwest::Client, token: impl Into<String>, api_url: impl Into<String>) -> SlackClient {
        SlackClient {
            http,
            token: token.into(),
            api_url: api_url.into().trim_end_matches('/').to_owned(),
        }
    }

    /// `chat.postMessage` into `channel`. `text` is the notification fallback.
    pub async fn post_message(&self, channel: &str, text: &str, blocks: &[Block]) -> anyhow::Result<()> {
        let response: ApiResponse = self.http.post(format!("{}/chat.postMessage", self.api_url))
            .bearer_auth(&self.token)
            .json(&PostMessage { channel, text, blocks })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
            .context("chat.postMessage returned an unreadable body")?;

        if !response.ok {
            return Err(anyhow!(
                "chat.postMessage failed: {}",
                response.error.unwrap_or_else(|| "unknown error".to_owned())
            ));
        }

        tracing::debug!(channel, blocks = blocks.len(), "posted message");
        Ok(())
    }

    /// Posts `blocks` to an interaction's response URL, optionally
    /// replacing the message the interaction came from.
    pub async fn respond(&self, response_url: &str, text: &str, blocks: &[Block], replace_original: bool) -> anyhow::Result<()> {
        self.send_response(response_url, &ResponseMessage {
            text,
            blocks: Some(blocks),
            replace_original,
            response_type: None,
        }).await
    }

    /// Message only the user who triggered the interaction can see.
    pub async fn respond_ephemeral(&self, response_url: &str, text: &str) -> anyhow::Result<()> {
        self.send_response(response_url, &ResponseMessage {
            text,
            blocks: None,
            replace_original: false,
            response_type: Some("ephemeral"),
        }).await
    }

    async fn send_response(&self, response_url: &str, message: &ResponseMessage<'_>) -> anyhow::Result<()> {
        self.http.post(response_url)
            .json(message)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
