//! Incoming HTTP request type.

use std::borrow::Cow;
use std::collections::HashMap;

use bytes::Bytes;
use http::{HeaderMap, Uri};

use crate::middleware::query::ParameterBundle;

/// An incoming HTTP request with its body fully read.
///
/// Build one from an [`http::Request`] when driving a [`Router`](crate::Router)
/// directly:
///
/// ```rust
/// use bytes::Bytes;
/// use herald::Request;
///
/// let req: Request = http::Request::builder()
///     .uri("/articles?include=author")
///     .body(Bytes::new())
///     .unwrap()
///     .into();
/// assert_eq!(req.query(), Some("include=author"));
/// ```
#[derive(Debug)]
pub struct Request {
    pub(crate) method: http::Method,
    pub(crate) uri: Uri,
    pub(crate) headers: HeaderMap,
    pub(crate) body: Bytes,
    pub(crate) params: HashMap<String, String>,
    parameters: Option<ParameterBundle>,
}

impl Request {
    pub fn method(&self) -> &http::Method { &self.method }
    pub fn uri(&self) -> &Uri { &self.uri }
    pub fn path(&self) -> &str { self.uri.path() }
    pub fn query(&self) -> Option<&str> { self.uri.query() }
    pub fn headers(&self) -> &HeaderMap { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    /// Case-insensitive header lookup. Values that are not visible ASCII
    /// read as absent.
    pub fn header(&self, name: impl http::header::AsHeaderName) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Header lookup that keeps values [`header`](Request::header) would
    /// drop: bytes outside visible ASCII are decoded lossily. `None` only
    /// when the header is absent.
    pub fn header_lossy(&self, name: impl http::header::AsHeaderName) -> Option<Cow<'_, str>> {
        self.headers.get(name).map(|v| String::from_utf8_lossy(v.as_bytes()))
    }

    /// Returns a named path parameter.
    ///
    /// For a route `/articles/{id}`, `req.param("id")` on `/articles/42` returns `Some("42")`.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    /// JSON-API query parameters attached by
    /// [`QueryParams`](crate::middleware::query::QueryParams).
    ///
    /// `None` when the middleware is not installed or the query string
    /// carried no `include`, `fields[..]` or `filter[..]` keys.
    pub fn parameters(&self) -> Option<&ParameterBundle> {
        self.parameters.as_ref()
    }

    pub(crate) fn with_parameters(mut self, bundle: ParameterBundle) -> Self {
        self.parameters = Some(bundle);
        self
    }
}

impl From<http::Request<Bytes>> for Request {
    fn from(req: http::Request<Bytes>) -> Self {
        let (parts, body) = req.into_parts();
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
            params: HashMap::new(),
            parameters: None,
        }
    }
}
