use std::{str::FromStr, time::Duration};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("environment variable {0} is not valid: {1}")]
    Invalid(&'static str, String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub reddit_app_id: String,
    pub reddit_app_secret: String,
    pub slack_token: String,
    pub slack_signing_secret: String,

    pub port: u16,
    pub roster_ttl: Duration,

    pub slack_api_url: String,
    pub reddit_token_url: String,
    pub reddit_api_url: String,
    pub reddit_user_agent: String,
}

impl Config {
    /// Reads the config from the process environment. Call `dotenv::dotenv()`
    /// beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Config, ConfigError> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Config, ConfigError> {
        let required = |key: &'static str| lookup(key).ok_or(ConfigError::Missing(key));
        let optional = |key: &'static str, default: &str| lookup(key).unwrap_or_else(|| default.to_owned());

        Ok(
            Config {
                reddit_app_id: required("REDDIT_APP_ID")?,
                reddit_app_secret: required("REDDIT_APP_SECRET")?,
                slack_token: required("SLACK_TOKEN")?,
                slack_signing_secret: required("SLACK_SIGNING_SECRET")?,

                port: parse(&lookup, "PORT", 3000)?,
                roster_ttl: Duration::from_secs(parse(&lookup, "ROSTER_TTL_SECS", 24 * 60 * 60)?),

                slack_api_url: optional("SLACK_API_URL", "https://slack.com/api"),
                reddit_token_url: optional("REDDIT_TOKEN_URL", "https://www.reddit.com/api/v1/access_token"),
                reddit_api_url: optional("REDDIT_API_URL", "https://oauth.reddit.com"),
                reddit_user_agent: optional("REDDIT_USER_AGENT", "Script slackbot by hexagonatron"),
            }
        )
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid(key, e.to_string())),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: [(&str, &str); 4] = [
        ("REDDIT_APP_ID", "app"),
        ("REDDIT_APP_SECRET", "secret"),
        ("SLACK_TOKEN", "xoxb-1"),
        ("SLACK_SIGNING_SECRET", "signing"),
    ];

    #[test]
    fn defaults_fill_optional_values() {
        let config = Config::from_lookup(env(&REQUIRED)).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.roster_ttl, Duration::from_secs(86400));
        assert_eq!(config.slack_api_url, "https://slack.com/api");
        assert_eq!(config.reddit_api_url, "https://oauth.reddit.com");
        assert_eq!(config.slack_signing_secret, "signing");
    }

    #[test]
    fn missing_required_variable_is_named() {
        let err = Config::from_lookup(env(&REQUIRED[1..])).unwrap_err();
        assert!(matches!(err, ConfigError::Missing("REDDIT_APP_ID")));
    }

    #[test]
    fn bad_port_is_rejected() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "eighty"));
        let err = Config::from_lookup(env(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid("PORT", _)));
    }

    #[test]
    fn overrides_are_used() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "8080"));
        pairs.push(("ROSTER_TTL_SECS", "60"));
        pairs.push(("SLACK_API_URL", "http://127.0.0.1:9999"));
        let config = Config::from_lookup(env(&pairs)).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.roster_ttl, Duration::from_secs(60));
        assert_eq!(config.slack_api_url, "http://127.0.0.1:9999");
    }
}
