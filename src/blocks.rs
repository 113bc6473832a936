//! Slack Block Kit layout types, serialized straight into message payloads.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section {
        #[serde(skip_serializing_if = "Option::is_none")]
        block_id: Option<String>,
        text: Text,
        #[serde(skip_serializing_if = "Option::is_none")]
        accessory: Option<Accessory>,
    },
    Divider,
    Image {
        image_url: String,
        alt_text: String,
    },
    Context {
        elements: Vec<Text>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Text {
    Mrkdwn { text: String },
    PlainText { text: String, emoji: bool },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Accessory {
    Button { text: Text, value: String },
}

impl Block {
    pub fn section(text: impl Into<String>) -> Block {
        Block::Section {
            block_id: None,
            text: Text::mrkdwn(text),
            accessory: None,
        }
    }

    pub fn image(image_url: impl Into<String>, alt_text: impl Into<String>) -> Block {
        Block::Image {
            image_url: image_url.into(),
            alt_text: alt_text.into(),
        }
    }

    pub fn context(text: impl Into<String>) -> Block {
        Block::Context {
            elements: vec![Text::mrkdwn(text)],
        }
    }

    pub fn with_block_id(self, id: impl Into<String>) -> Block {
        match self {
            Block::Section { text, accessory, .. } => Block::Section {
                block_id: Some(id.into()),
                text,
                accessory,
            },
            other => other,
        }
    }

    pub fn with_button(self, label: impl Into<String>, value: impl Into<String>) -> Block {
        match self {
            Block::Section { block_id, text, .. } => Block::Section {
                block_id,
                text,
                accessory: Some(Accessory::Button {
                    text: Text::PlainText { text: label.into(), emoji: true },
                    value: value.into(),
                }),
            },
            other => other,
        }
    }

    /// Text of a section, or of the first context element.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Section { text, .. } => Some(text.as_str()),
            Block::Context { elements } => elements.first().map(Text::as_str),
            _ => None,
        }
    }
}

impl Text {
    pub fn mrkdwn(text: impl Into<String>) -> Text {
        Text::Mrkdwn { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Text::Mrkdwn { text } | Text::PlainText { text, .. } => text,
        }
    }
}

/// Footer naming whoever invoked the bot.
pub fn called_by(user_id: &str) -> Block {
    Block::context(format!("Bot called by {}", crate::slack::mention(user_id)))
}
