use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug, Display};

#[derive(Clone, Debug, PartialEq)]
pub struct Error {
    pub code: i32,
    pub message: String,
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for Error {}

impl From<env::VarError> for Error {
    fn from(err: env::VarError) -> Self {
        env_var_error(err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        reqwest_error(err)
    }
}

impl<T> From<async_channel::SendError<T>> for Error {
    fn from(_: async_channel::SendError<T>) -> Self {
        channel_closed_error()
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn env_var_error(_: env::VarError) -> Error {
    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn config_error(key: &str) -> Error {
    Error {
        code: 2,
        message: format!("invalid configuration value for {}", key),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    transport_error(err.to_string())
}

pub fn transport_error(detail: impl Into<String>) -> Error {
    Error {
        code: 3,
        message: format!("transport error: {}", detail.into()),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 4,
        message: "unexpected error".into(),
    }
}

pub fn channel_closed_error() -> Error {
    Error {
        code: 5,
        message: "coordinator channel closed".into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 100,
        message: "invalid input".into(),
    }
}

pub fn permission_denied_error() -> Error {
    Error {
        code: 101,
        message: "location permission denied".into(),
    }
}

pub fn empty_route_response_error() -> Error {
    Error {
        code: 102,
        message: "no routes found".into(),
    }
}

pub fn precondition_error(detail: &str) -> Error {
    Error {
        code: 103,
        message: format!("precondition violated: {}", detail),
    }
}
