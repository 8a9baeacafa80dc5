//! Query parameter failures and their JSON-API error documents.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::response::{ContentType, IntoResponse, Response};
use crate::status::Status;

/// Reported in `meta.creator` of every error object this middleware writes.
const CREATOR: &str = "query middleware";

/// Which bracketed parameter family a malformed key belonged to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyFamily {
    Fields,
    Filter,
}

impl fmt::Display for KeyFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Fields => "fields",
            Self::Filter => "filter",
        })
    }
}

/// Why a request's query parameters were rejected.
///
/// The `Display` output is the `detail` member of the error document.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum QueryError {
    /// A `fields…` or `filter…` key is not of the form `name[sub]`.
    #[error("Unable to match {family} query param {value}")]
    MalformedParameterKey { family: KeyFamily, value: String },

    /// Filter parameters were sent without the filtering media type in `Accept`.
    #[error("The given Accept header value {accept} is incorrect for filter query extension")]
    UnacceptableMediaType { accept: String },

    /// `Content-Type` differs from `Accept` on a filter request.
    #[error("The given media type {content_type} in Content-Type header is not supported")]
    MediaTypeMismatch { content_type: String },
}

impl QueryError {
    pub fn status(&self) -> Status {
        match self {
            Self::MalformedParameterKey { .. } => Status::BadRequest,
            Self::UnacceptableMediaType { .. } => Status::NotAcceptable,
            Self::MediaTypeMismatch { .. } => Status::UnsupportedMediaType,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::MalformedParameterKey { .. } => "Invalid query parameter",
            Self::UnacceptableMediaType { .. } => "Accept header is not acceptable",
            Self::MediaTypeMismatch { .. } => "Media type is not supported",
        }
    }
}

#[derive(Serialize)]
struct ErrorDocument<'a> {
    errors: [ErrorObject<'a>; 1],
}

#[derive(Serialize)]
struct ErrorObject<'a> {
    status: String,
    title: &'a str,
    detail: String,
    meta: ErrorMeta,
}

#[derive(Serialize)]
struct ErrorMeta {
    creator: &'static str,
}

/// Renders the error as a single-entry JSON-API error document with
/// `Content-Type: application/vnd.api+json`. Falls back to a plain-text 500
/// if the document cannot be serialized.
impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        let status = self.status();
        let document = ErrorDocument {
            errors: [ErrorObject {
                status: status.as_u16().to_string(),
                title: self.title(),
                detail: self.to_string(),
                meta: ErrorMeta { creator: CREATOR },
            }],
        };

        match serde_json::to_vec(&document) {
            Ok(body) => Response::builder()
                .status(status)
                .bytes(ContentType::JsonApi, body),
            Err(e) => Response::builder()
                .status(Status::InternalServerError)
                .text(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;

    #[test]
    fn malformed_key_renders_400_document() {
        let err = QueryError::MalformedParameterKey {
            family: KeyFamily::Fields,
            value: "title".into(),
        };
        let res = err.into_response();

        assert_eq!(res.status_code(), 400);
        assert_eq!(res.header("content-type"), Some("application/vnd.api+json"));
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(
            body,
            json!({
                "errors": [{
                    "status": "400",
                    "title": "Invalid query parameter",
                    "detail": "Unable to match fields query param title",
                    "meta": { "creator": "query middleware" }
                }]
            })
        );
    }

    #[test]
    fn media_type_errors_carry_received_values() {
        let not_acceptable = QueryError::UnacceptableMediaType { accept: "text/html".into() };
        assert_eq!(not_acceptable.status(), Status::NotAcceptable);
        assert_eq!(
            not_acceptable.to_string(),
            "The given Accept header value text/html is incorrect for filter query extension"
        );

        let mismatch = QueryError::MediaTypeMismatch { content_type: "application/json".into() };
        assert_eq!(mismatch.status(), Status::UnsupportedMediaType);
        assert_eq!(mismatch.title(), "Media type is not supported");
        assert_eq!(
            mismatch.to_string(),
            "The given media type application/json in Content-Type header is not supported"
        );
    }
}
