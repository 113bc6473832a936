use anyhow::anyhow;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use crate::{roster::User, AppResult, GetField};

/// Form body Slack posts for a slash command.
#[derive(Debug, Deserialize)]
pub struct SlashCommand {
    pub user_id: String,
    #[serde(default)]
    pub user_name: String,
    pub channel_id: String,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub response_url: Option<String>,
}

impl SlashCommand {
    pub fn user(&self) -> User {
        User::new(&self.user_id, &self.user_name)
    }
}

/// Interactivity requests carry their JSON in a single form field.
#[derive(Debug, Deserialize)]
pub struct InteractionForm {
    pub payload: String,
}

impl InteractionForm {
    pub fn block_actions(&self) -> AppResult<BlockActions> {
        Ok(serde_json::from_str(&self.payload)?)
    }
}

#[derive(Debug, Deserialize)]
pub struct BlockActions {
    pub user: PayloadUser,
    #[serde(default)]
    pub channel: Option<Channel>,
    pub response_url: String,
    pub message: Message,
    #[serde(default)]
    pub actions: Vec<Action>,
}

#[derive(Debug, Deserialize)]
pub struct PayloadUser {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Channel {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub blocks: Vec<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Action {
    #[serde(default)]
    pub value: Option<String>,
}

impl BlockActions {
    pub fn user(&self) -> User {
        let name = self
            .user
            .name
            .as_ref()
            .or(self.user.username.as_ref())
            .cloned()
            .unwrap_or_default();
        User::new(&self.user.id, name)
    }

    /// The poll posts its roster id as the first block's `block_id`.
    pub fn roster_id(&self) -> AppResult<Uuid> {
        let first = self
            .message
            .blocks
            .first()
            .ok_or(anyhow!("interaction message has no blocks"))?;
        Ok(Uuid::parse_str(&first.get_str_field("block_id")?)?)
    }

    pub fn action_value(&self) -> AppResult<&str> {
        Ok(
            self.actions
                .first()
                .and_then(|action| action.value.as_deref())
                .ok_or(anyhow!("interaction without an action value"))?
        )
    }
}
