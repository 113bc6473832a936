//! Top posts from Reddit, fetched with an app-only OAuth token.

mod post;

pub use post::{error_blocks, Listing, Media, Oembed, Post, MAX_SECTION_CHARS};

use std::{fmt, str::FromStr};

use oauth2::{basic::BasicClient, ClientId, ClientSecret, EndpointNotSet, EndpointSet, TokenResponse, TokenUrl};
use rand::seq::IndexedRandom;

use crate::config::Config;

type AppOnlyClient = BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

pub const DEFAULT_SUBREDDIT: &str = "funny";

#[derive(Debug, thiserror::Error)]
pub enum RedditError {
    #[error("Cannot find any posts in your subreddit for the provided timeframe")]
    NoPosts,

    #[error("{0:?} is not a timeframe, use one of hour, day, week, month, year or all")]
    InvalidTimeFrame(String),

    #[error("{0:?} is not a subreddit name")]
    InvalidSubreddit(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeFrame {
    Hour,
    #[default]
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeFrame {
    const ALL: [TimeFrame; 6] = [
        TimeFrame::Hour,
        TimeFrame::Day,
        TimeFrame::Week,
        TimeFrame::Month,
        TimeFrame::Year,
        TimeFrame::All,
    ];

    pub fn as_str(self) -> &'static str {
        use TimeFrame::*;
        match self {
            Hour => "hour",
            Day => "day",
            Week => "week",
            Month => "month",
            Year => "year",
            All => "all",
        }
    }
}

impl FromStr for TimeFrame {
    type Err = RedditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        TimeFrame::ALL
            .into_iter()
            .find(|tf| tf.as_str() == lower)
            .ok_or_else(|| RedditError::InvalidTimeFrame(s.to_owned()))
    }
}

impl fmt::Display for TimeFrame {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a `/subreddit` command asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopQuery {
    pub subreddit: String,
    pub time_frame: TimeFrame,
}

impl FromStr for TopQuery {
    type Err = RedditError;

    /// `"[subreddit] [timeframe]"`, both optional.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut words = text.split_whitespace();
        let subreddit = words
            .next()
            .map(|s| s.trim_start_matches("r/").trim_start_matches("/r/"))
            .unwrap_or(DEFAULT_SUBREDDIT);
        let valid = !subreddit.is_empty()
            && subreddit.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '+');
        if !valid {
            return Err(RedditError::InvalidSubreddit(subreddit.to_owned()));
        }

        let time_frame = match words.next() {
            Some(word) => word.parse()?,
            None => TimeFrame::default(),
        };

        Ok(TopQuery { subreddit: subreddit.to_owned(), time_frame })
    }
}

#[derive(Clone)]
pub struct RedditClient {
    http: reqwest::Client,
    oauth: AppOnlyClient,
    api_url: String,
}

impl RedditClient {
    pub fn new(config: &Config) -> anyhow::Result<RedditClient> {
        let http = reqwest::ClientBuilder::new()
            .user_agent(&config.reddit_user_agent)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let oauth = BasicClient::new(ClientId::new(config.reddit_app_id.clone()))
            .set_client_secret(ClientSecret::new(config.reddit_app_secret.clone()))
            .set_token_uri(TokenUrl::new(config.reddit_token_url.clone())?);

        Ok(
            RedditClient {
                http,
                oauth,
                api_url: config.reddit_api_url.trim_end_matches('/').to_owned(),
            }
        )
    }

    async fn access_token(&self) -> anyhow::Result<String> {
        let token = self.oauth
            .exchange_client_credentials()
            .request_async(&self.http)
            .await?;
        Ok(token.access_token().secret().to_owned())
    }

    pub async fn top_posts(&self, query: &TopQuery) -> anyhow::Result<Vec<Post>> {
        let token = self.access_token().await?;
        let url = format!(
            "{}/r/{}/top/?sort=top&t={}",
            self.api_url, query.subreddit, query.time_frame
        );

        let listing: Listing = self.http.get(url)
            .bearer_auth(token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let posts = listing.into_posts();
        tracing::debug!(subreddit = %query.subreddit, t = %query.time_frame, posts = posts.len(), "fetched top posts");
        Ok(posts)
    }

    pub async fn random_top_post(&self, query: &TopQuery) -> anyhow::Result<Post> {
        let posts = self.top_posts(query).await?;
        Ok(posts.choose(&mut rand::rng()).cloned().ok_or(RedditError::NoPosts)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_uses_defaults() {
        let query: TopQuery = "".parse().unwrap();
        assert_eq!(query, TopQuery { subreddit: "funny".to_owned(), time_frame: TimeFrame::Day });
    }

    #[test]
    fn reads_subreddit_and_timeframe() {
        let query: TopQuery = "  aww   week ".parse().unwrap();
        assert_eq!(query.subreddit, "aww");
        assert_eq!(query.time_frame, TimeFrame::Week);

        let query: TopQuery = "r/rust ALL".parse().unwrap();
        assert_eq!(query.subreddit, "rust");
        assert_eq!(query.time_frame, TimeFrame::All);
    }

    #[test]
    fn rejects_unknown_timeframe() {
        let err = "aww fortnight".parse::<TopQuery>().unwrap_err();
        assert!(matches!(err, RedditError::InvalidTimeFrame(ref tf) if tf == "fortnight"));
    }

    #[test]
    fn rejects_path_like_subreddits() {
        assert!(matches!(
            "../api".parse::<TopQuery>().unwrap_err(),
            RedditError::InvalidSubreddit(_)
        ));
        assert!("pics+aww".parse::<TopQuery>().is_ok());
    }

    #[test]
    fn no_posts_message_matches_what_users_see() {
        assert_eq!(
            RedditError::NoPosts.to_string(),
            "Cannot find any posts in your subreddit for the provided timeframe"
        );
    }
}
