use axum::extract::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::env;
use std::fmt::{self, Debug, Display};

#[derive(Debug, Clone, PartialEq, Eq)]
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

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_message) = match self.code {
            1..=99 => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
            103 => (StatusCode::NOT_FOUND, self.message.as_str()),
            _ => (StatusCode::BAD_REQUEST, self.message.as_str()),
        };

        let body = Json(json!({
            "code": self.code,
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

pub fn invalid_state_error() -> Error {
    Error {
        code: 100,
        message: "invalid state".into(),
    }
}

pub fn invalid_input_error() -> Error {
    Error {
        code: 101,
        message: "invalid input".into(),
    }
}

pub fn invalid_fare_input_error(argument: &str) -> Error {
    Error {
        code: 102,
        message: format!("invalid fare input: {} must be a finite, non-negative number", argument),
    }
}

pub fn not_found_error() -> Error {
    Error {
        code: 103,
        message: "not found".into(),
    }
}

pub fn route_not_found_error() -> Error {
    Error {
        code: 104,
        message: "no route found between pickup and destination".into(),
    }
}

pub fn env_var_error<T: Debug>(err: T) -> Error {
    tracing::error!(?err, "environment variable error");

    Error {
        code: 1,
        message: "environment variable error".into(),
    }
}

pub fn reqwest_error(err: reqwest::Error) -> Error {
    tracing::warn!(%err, "reqwest error");

    Error {
        code: 3,
        message: "reqwest error".into(),
    }
}

pub fn upstream_error() -> Error {
    Error {
        code: 4,
        message: "upstream error".into(),
    }
}

pub fn unexpected_error() -> Error {
    Error {
        code: 5,
        message: "unexpected error".into(),
    }
}

pub fn route_unavailable_error() -> Error {
    Error {
        code: 6,
        message: "route service unavailable".into(),
    }
}

#[test]
fn server_errors_hide_their_message() {
    let response = upstream_error().into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = route_unavailable_error().into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn client_errors_map_to_client_statuses() {
    assert_eq!(
        invalid_state_error().into_response().status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        invalid_fare_input_error("distance_km").into_response().status(),
        StatusCode::BAD_REQUEST
    );
    assert_eq!(
        not_found_error().into_response().status(),
        StatusCode::NOT_FOUND
    );
}

#[test]
fn fare_input_error_names_the_argument() {
    let err = invalid_fare_input_error("duration_minutes");

    assert_eq!(err.code, 102);
    assert!(err.message.contains("duration_minutes"));
}

#[test]
fn env_var_errors_convert_to_code_one() {
    let err: Error = env::VarError::NotUnicode("\u{fffd}".into()).into();

    assert_eq!(err.code, 1);
}
