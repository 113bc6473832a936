use std::time::{SystemTime, UNIX_EPOCH};

use axum::{
    body::Bytes,
    extract::{FromRef, FromRequest, Request},
    http::HeaderMap,
};
use hmac::{Hmac, Mac};
use serde::de::DeserializeOwned;
use sha2::Sha256;

use crate::AppError;

pub const TIMESTAMP_HEADER: &str = "x-slack-request-timestamp";
pub const SIGNATURE_HEADER: &str = "x-slack-signature";

/// Requests older (or newer) than this are treated as replays.
pub const MAX_AGE_SECS: u64 = 60 * 5;

const VERSION: &str = "v0";

#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("missing {0} header")]
    MissingHeader(&'static str),

    #[error("request timestamp is more than {MAX_AGE_SECS}s away from now")]
    Stale,

    #[error("malformed signature header")]
    Malformed,

    #[error("signature does not match")]
    Mismatch,
}

/// Secret Slack signs every request with.
#[derive(Clone)]
pub struct SigningSecret(pub String);

impl SigningSecret {
    /// `v0=` + hex HMAC-SHA256 of `v0:{timestamp}:{body}`.
    pub fn sign(&self, timestamp: u64, body: &[u8]) -> String {
        let digest = self.mac(timestamp, body).finalize().into_bytes();
        format!("{VERSION}={}", hex::encode(digest))
    }

    pub fn verify(&self, headers: &HeaderMap, body: &[u8]) -> Result<(), SignatureError> {
        self.verify_at(headers, body, unix_now())
    }

    pub fn verify_at(&self, headers: &HeaderMap, body: &[u8], now: u64) -> Result<(), SignatureError> {
        let timestamp: u64 = header(headers, TIMESTAMP_HEADER)?
            .trim()
            .parse()
            .map_err(|_| SignatureError::Malformed)?;
        if now.abs_diff(timestamp) > MAX_AGE_SECS {
            return Err(SignatureError::Stale);
        }

        let signature = header(headers, SIGNATURE_HEADER)?
            .strip_prefix("v0=")
            .ok_or(SignatureError::Malformed)?;
        let signature = hex::decode(signature).map_err(|_| SignatureError::Malformed)?;

        self.mac(timestamp, body)
            .verify_slice(&signature)
            .map_err(|_| SignatureError::Mismatch)
    }

    fn mac(&self, timestamp: u64, body: &[u8]) -> Hmac<Sha256> {
        let mut mac = <Hmac<Sha256> as Mac>::new_from_slice(self.0.as_bytes())
            .expect("hmac takes keys of any length");
        mac.update(format!("{VERSION}:{timestamp}:").as_bytes());
        mac.update(body);
        mac
    }
}

fn header<'a>(headers: &'a HeaderMap, name: &'static str) -> Result<&'a str, SignatureError> {
    headers
        .get(name)
        .ok_or(SignatureError::MissingHeader(name))?
        .to_str()
        .map_err(|_| SignatureError::Malformed)
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

/// Form body of a Slack request whose signature checked out.
pub struct SlackForm<T>(pub T);

impl<T, S> FromRequest<S> for SlackForm<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
    SigningSecret: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let secret = SigningSecret::from_ref(state);
        let headers = req.headers().clone();
        let body = Bytes::from_request(req, state).await?;

        secret.verify(&headers, &body)?;
        Ok(SlackForm(serde_urlencoded::from_bytes(&body)?))
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    const NOW: u64 = 1_531_420_618;

    fn secret() -> SigningSecret {
        SigningSecret("8f742231b10e8888abcd99yyyzzz85a5".to_owned())
    }

    fn headers(timestamp: u64, signature: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(TIMESTAMP_HEADER, HeaderValue::from_str(&timestamp.to_string()).unwrap());
        headers.insert(SIGNATURE_HEADER, HeaderValue::from_str(signature).unwrap());
        headers
    }

    // Worked example from Slack's request signing documentation.
    const SLACK_BODY: &str = "token=xyzz0WbapA4vBCDEFasx0q6G&team_id=T1DC2JH3J&team_domain=testteamnow&channel_id=G8PSS9T3V&channel_name=foobar&user_id=U2CERLKJA&user_name=roadrunner&command=%2Fwebhook-collect&text=&response_url=https%3A%2F%2Fhooks.slack.com%2Fcommands%2FT1DC2JH3J%2F397700885554%2F96rGlfmibIGlgcZRskXaIFfN&trigger_id=398738663015.47445629121.803a0bc887a14d10d2c447fce8b6703c";

    #[test]
    fn matches_slack_documentation_example() {
        let expected = "v0=a2114d57b48eac39b9ad189dd8316235a7b4a8d21a10bd27519666489c69b503";
        assert_eq!(secret().sign(NOW, SLACK_BODY.as_bytes()), expected);
        secret()
            .verify_at(&headers(NOW, expected), SLACK_BODY.as_bytes(), NOW)
            .unwrap();
    }

    #[test]
    fn tampered_body_is_rejected() {
        let signature = secret().sign(NOW, b"text=funny");
        let err = secret()
            .verify_at(&headers(NOW, &signature), b"text=aww", NOW)
            .unwrap_err();
        assert!(matches!(err, SignatureError::Mismatch));
    }

    #[test]
    fn other_secret_is_rejected() {
        let signature = SigningSecret("nope".to_owned()).sign(NOW, b"text=funny");
        let err = secret()
            .verify_at(&headers(NOW, &signature), b"text=funny", NOW)
            .unwrap_err();
        assert!(matches!(err, SignatureError::Mismatch));
    }

    #[test]
    fn old_and_future_timestamps_are_stale() {
        let signature = secret().sign(NOW, b"");
        let err = secret()
            .verify_at(&headers(NOW, &signature), b"", NOW + MAX_AGE_SECS + 1)
            .unwrap_err();
        assert!(matches!(err, SignatureError::Stale));

        let err = secret()
            .verify_at(&headers(NOW, &signature), b"", NOW - MAX_AGE_SECS - 1)
            .unwrap_err();
        assert!(matches!(err, SignatureError::Stale));

        secret()
            .verify_at(&headers(NOW, &signature), b"", NOW + MAX_AGE_SECS)
            .unwrap();
    }

    #[test]
    fn missing_or_garbled_headers() {
        let err = secret().verify_at(&HeaderMap::new(), b"", NOW).unwrap_err();
        assert!(matches!(err, SignatureError::MissingHeader(TIMESTAMP_HEADER)));

        let mut only_ts = HeaderMap::new();
        only_ts.insert(TIMESTAMP_HEADER, HeaderValue::from_static("1531420618"));
        let err = secret().verify_at(&only_ts, b"", NOW).unwrap_err();
        assert!(matches!(err, SignatureError::MissingHeader(SIGNATURE_HEADER)));

        let err = secret().verify_at(&headers(NOW, "v1=abcd"), b"", NOW).unwrap_err();
        assert!(matches!(err, SignatureError::Malformed));

        let err = secret().verify_at(&headers(NOW, "v0=zz"), b"", NOW).unwrap_err();
        assert!(matches!(err, SignatureError::Malformed));
    }
}
