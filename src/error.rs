use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{fetch, parse};
use std::fmt::{self, Display, Formatter};

#[derive(Debug)]
pub enum Error {
    /// No source is registered under this key.
    UnknownCanteen(String),
    Fetch(fetch::Error),
    Parse(parse::Error),
}

impl From<fetch::Error> for Error {
    fn from(e: fetch::Error) -> Self {
        Error::Fetch(e)
    }
}

impl From<parse::Error> for Error {
    fn from(e: parse::Error) -> Self {
        Error::Parse(e)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownCanteen(_) => write!(f, "Canteen not available"),
            Error::Fetch(e) => write!(f, "Fetch error: {}", e),
            Error::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "success": false,
            "message": self.to_string(),
        });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
