use axum::{http::StatusCode, response::{IntoResponse, Response}};

use crate::slack::SignatureError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(err) = self.0.downcast_ref::<SignatureError>() {
            tracing::warn!(%err, "rejected unsigned request");
            return (StatusCode::UNAUTHORIZED, err.to_string()).into_response();
        }

        tracing::error!(err = %self.0, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("{}\n\n{}", self.0, self.0.backtrace()),
        )
            .into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
