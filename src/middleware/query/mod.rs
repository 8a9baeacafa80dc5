//! JSON-API query parameter middleware.
//!
//! Recognized parameters:
//!
//! | Parameter | Example | Stored as |
//! |---|---|---|
//! | `include` | `?include=author,comments` | [`ParameterBundle::includes`] |
//! | sparse fieldsets | `?fields[articles]=title,body&fields[people]=name` | [`ParameterBundle::fields`] |
//! | `filter` | `?filter[name]=foo&filter[country]=argentina` | [`ParameterBundle::filters`] |
//!
//! `include` and `fields` are plain JSON-API. `filter` is the
//! `dictybase/filtering-resouce` extension and is only honoured when the
//! client negotiates it: `Accept` must be [`FILTER_MEDIA_TYPE`] and
//! `Content-Type` must equal `Accept`. Otherwise the chain stops with
//! `406 Not Acceptable` or `415 Unsupported Media Type`. A `fields` or
//! `filter` key not shaped like `name[sub]` stops it with `400 Bad Request`.
//!
//! ```rust,no_run
//! use herald::middleware::query::QueryParams;
//! use herald::{Method, Request, Response, Router};
//!
//! async fn list_articles(req: Request) -> Response {
//!     let wanted = req.parameters().map(|p| p.includes().join(" ")).unwrap_or_default();
//!     Response::text(wanted)
//! }
//!
//! let app = Router::new()
//!     .layer(QueryParams)
//!     .on(Method::Get, "/articles", list_articles);
//! ```

mod bundle;
mod error;

pub use bundle::{ParameterBundle, bracket_key, parse_query};
pub use error::{KeyFamily, QueryError};

use tracing::{debug, warn};

use crate::handler::BoxFuture;
use crate::middleware::{Middleware, Next};
use crate::request::Request;
use crate::response::IntoResponse;

/// Media type a client must send in both `Accept` and `Content-Type` to use
/// `filter[...]` parameters.
pub const FILTER_MEDIA_TYPE: &str =
    r#"application/vnd.api+json; supported-ext="dictybase/filtering-resouce""#;

/// Checks the filtering extension was negotiated. A missing header compares
/// as the empty string.
pub fn validate_headers(
    accept: Option<&str>,
    content_type: Option<&str>,
) -> Result<(), QueryError> {
    let accept = accept.unwrap_or_default();
    let content_type = content_type.unwrap_or_default();

    if accept != FILTER_MEDIA_TYPE {
        return Err(QueryError::UnacceptableMediaType { accept: accept.to_owned() });
    }
    if accept != content_type {
        return Err(QueryError::MediaTypeMismatch { content_type: content_type.to_owned() });
    }
    Ok(())
}

/// Parses JSON-API query parameters and attaches them to the request.
///
/// The bundle is attached only when at least one of `include`, `fields` or
/// `filter` was present; otherwise the request is forwarded untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct QueryParams;

impl Middleware for QueryParams {
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        match ParameterBundle::from_request(&req) {
            Ok(bundle) if bundle.is_empty() => next.run(req),
            Ok(bundle) => {
                debug!(
                    path = req.path(),
                    includes = bundle.has_includes(),
                    fields = bundle.has_fields(),
                    filters = bundle.has_filters(),
                    "query parameters attached"
                );
                next.run(req.with_parameters(bundle))
            }
            Err(err) => {
                warn!(
                    path = req.path(),
                    status = err.status().as_u16(),
                    title = err.title(),
                    detail = %err,
                    "query parameters rejected"
                );
                let response = err.into_response();
                Box::pin(async move { response })
            }
        }
    }
}
