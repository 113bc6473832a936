use serde::Deserialize;

use crate::blocks::{called_by, Block};

/// Slack caps section text at 3000 characters.
pub const MAX_SECTION_CHARS: usize = 3000;

const IMAGE_EXTENSIONS: [&str; 3] = [".jpg", ".gif", ".png"];

#[derive(Debug, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Deserialize)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Child>,
}

#[derive(Debug, Deserialize)]
pub struct Child {
    pub data: Post,
}

impl Listing {
    pub fn into_posts(self) -> Vec<Post> {
        self.data.children.into_iter().map(|child| child.data).collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Post {
    pub title: String,
    #[serde(default)]
    pub is_self: bool,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub media: Option<Media>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Media {
    #[serde(default)]
    pub oembed: Option<Oembed>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Oembed {
    #[serde(default)]
    pub thumbnail_url: Option<String>,
}

impl Post {
    /// Link target with gfycat pages swapped for their thumbnail and imgur
    /// `.gifv` pages for the plain `.gif`.
    pub fn media_url(&self) -> &str {
        if self.url.starts_with("https://gfycat.com/") {
            if let Some(thumbnail) = self
                .media
                .as_ref()
                .and_then(|media| media.oembed.as_ref())
                .and_then(|oembed| oembed.thumbnail_url.as_deref())
            {
                return thumbnail;
            }
        }

        if self.url.starts_with("https://i.imgur.com/") && self.url.ends_with(".gifv") {
            return &self.url[..self.url.len() - 1];
        }

        &self.url
    }

    pub fn is_image(&self) -> bool {
        let url = self.media_url().to_ascii_lowercase();
        IMAGE_EXTENSIONS.iter().any(|ext| url.ends_with(ext))
    }

    pub fn to_blocks(&self, user_id: &str) -> Vec<Block> {
        let mut blocks = vec![Block::section(format!("*{}*", self.title))];

        if self.is_self {
            if !self.selftext.is_empty() {
                blocks.push(Block::section(truncate(&self.selftext, MAX_SECTION_CHARS)));
            }
        } else if self.is_image() {
            blocks.push(Block::image(self.media_url(), "image1"));
        } else if !self.url.is_empty() {
            blocks.push(Block::section(self.media_url()));
        }

        blocks.push(called_by(user_id));
        blocks
    }
}

/// Message shown in place of a post when fetching one failed.
pub fn error_blocks(message: &str, user_id: &str) -> Vec<Block> {
    vec![
        Block::section(message),
        called_by(user_id),
    ]
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((end, _)) => text[..end].to_owned(),
        None => text.to_owned(),
    }
}
