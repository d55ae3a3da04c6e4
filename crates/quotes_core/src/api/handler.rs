//! Quote request handler.
//!
//! # Responsibility
//! - Map an HTTP method and path onto one repository call.
//! - Render every outcome as a status code plus JSON body.
//!
//! # Invariants
//! - The handler keeps no state between requests.
//! - A body that fails to serialize yields `500` with an empty body.

use crate::model::quote::{NewQuote, Quote, QuoteId};
use crate::repo::quote_repo::{QuoteRepository, RepoError};
use http::{Method, StatusCode};
use log::{error, warn};
use serde::Serialize;
use std::sync::Arc;

pub const JSON_CONTENT_TYPE: &str = "application/json";

const EMPTY_BODY_ERROR: &str = "JSON body cannot be empty";
const INVALID_ID_ERROR: &str = "the id must be a positive integer";
const ALLOWED_METHODS_ERROR: &str = "allowed methods [POST, GET]";
const CREATED_MESSAGE: &str = "succesfully created quote";

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

#[derive(Serialize)]
struct MessageBody<'a> {
    message: &'a str,
}

#[derive(Serialize)]
struct QuoteList<'a> {
    quotes: &'a [Quote],
}

/// Status and serialized JSON body for one handled request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

impl QuoteResponse {
    fn json<T: Serialize>(status: StatusCode, payload: &T) -> Self {
        match serde_json::to_vec(payload) {
            Ok(body) => Self { status, body },
            Err(err) => {
                error!(
                    "event=http_respond module=http status=error intended_status={} error={}",
                    status.as_u16(),
                    err
                );
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    body: Vec::new(),
                }
            }
        }
    }

    fn error(status: StatusCode, message: &str) -> Self {
        Self::json(status, &ErrorBody { error: message })
    }

    /// Content type to advertise; `None` when the body is empty.
    pub fn content_type(&self) -> Option<&'static str> {
        (!self.body.is_empty()).then_some(JSON_CONTENT_TYPE)
    }
}

/// Request-scoped state machine over any `QuoteRepository`.
#[derive(Clone)]
pub struct QuoteHandler {
    repo: Arc<dyn QuoteRepository>,
}

impl QuoteHandler {
    pub fn new(repo: Arc<dyn QuoteRepository>) -> Self {
        Self { repo }
    }

    /// Handles one request.
    ///
    /// Only the first path segment is significant: `/` lists all quotes and
    /// `/<id>` (or `/<id>/...`) fetches one.
    pub fn handle(&self, method: &Method, path: &str, body: &[u8]) -> QuoteResponse {
        if *method == Method::POST {
            self.create(body)
        } else if *method == Method::GET {
            match first_segment(path) {
                "" => self.list(),
                segment => self.show(segment),
            }
        } else {
            QuoteResponse::error(StatusCode::METHOD_NOT_ALLOWED, ALLOWED_METHODS_ERROR)
        }
    }

    fn create(&self, body: &[u8]) -> QuoteResponse {
        let quote: NewQuote = match serde_json::from_slice(body) {
            Ok(quote) => quote,
            Err(_) => return QuoteResponse::error(StatusCode::BAD_REQUEST, EMPTY_BODY_ERROR),
        };

        if let Err(err) = quote.validate() {
            return QuoteResponse::error(StatusCode::BAD_REQUEST, &err.to_string());
        }

        match self.repo.create(&quote) {
            Ok(_) => QuoteResponse::json(
                StatusCode::CREATED,
                &MessageBody {
                    message: CREATED_MESSAGE,
                },
            ),
            Err(err) => {
                warn!("event=quote_create module=http status=error error={err}");
                QuoteResponse::error(StatusCode::BAD_REQUEST, &err.to_string())
            }
        }
    }

    fn list(&self) -> QuoteResponse {
        match self.repo.all() {
            Ok(quotes) => QuoteResponse::json(StatusCode::OK, &QuoteList { quotes: &quotes }),
            Err(err) => backend_failure("quote_list", &err),
        }
    }

    fn show(&self, segment: &str) -> QuoteResponse {
        let Ok(id) = segment.parse::<QuoteId>() else {
            return QuoteResponse::error(StatusCode::BAD_REQUEST, INVALID_ID_ERROR);
        };

        match self.repo.by_id(id) {
            Ok(quote) => QuoteResponse::json(StatusCode::OK, &quote),
            Err(err @ RepoError::NotFound(_)) => QuoteResponse::json(
                StatusCode::NOT_FOUND,
                &MessageBody {
                    message: &err.to_string(),
                },
            ),
            Err(err) => backend_failure("quote_get", &err),
        }
    }
}

fn backend_failure(event: &str, err: &RepoError) -> QuoteResponse {
    error!("event={event} module=http status=error error={err}");
    QuoteResponse::error(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string())
}

fn first_segment(path: &str) -> &str {
    let rest = path.strip_prefix('/').unwrap_or(path);
    rest.split('/').next().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::first_segment;

    #[test]
    fn first_segment_of_root_is_empty() {
        assert_eq!(first_segment("/"), "");
        assert_eq!(first_segment(""), "");
    }

    #[test]
    fn first_segment_ignores_trailing_components() {
        assert_eq!(first_segment("/42"), "42");
        assert_eq!(first_segment("/42/extra"), "42");
        assert_eq!(first_segment("//42"), "");
    }
}
