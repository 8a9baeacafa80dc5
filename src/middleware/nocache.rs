//! Headers that disable HTTP caching.
//!
//! Follows nginx's proxy module conventions:
//!
//! ```text
//! Expires: Thu, 01 Jan 1970 00:00:00 GMT
//! Cache-Control: no-cache, no-store, no-transform, must-revalidate, private, max-age=0
//! Pragma: no-cache            (HTTP/1.0 proxies and clients)
//! X-Accel-Expires: 0          (nginx)
//! ```

use http::header::{CACHE_CONTROL, EXPIRES, HeaderName, HeaderValue, PRAGMA};

use crate::handler::BoxFuture;
use crate::middleware::{Middleware, Next};
use crate::request::Request;

pub const CACHE_CONTROL_VALUE: &str =
    "no-cache, no-store, no-transform, must-revalidate, private, max-age=0";

/// The Unix epoch as an HTTP-date.
pub const EPOCH: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

const X_ACCEL_EXPIRES: HeaderName = HeaderName::from_static("x-accel-expires");

/// Sets the four no-cache headers on every response it wraps. A handler that
/// sets one of them itself keeps its own value.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCache;

impl NoCache {
    fn headers() -> [(HeaderName, HeaderValue); 4] {
        [
            (EXPIRES, HeaderValue::from_static(EPOCH)),
            (CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL_VALUE)),
            (PRAGMA, HeaderValue::from_static("no-cache")),
            (X_ACCEL_EXPIRES, HeaderValue::from_static("0")),
        ]
    }
}

impl Middleware for NoCache {
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        Box::pin(async move {
            let mut res = next.run(req).await;
            for (name, value) in Self::headers() {
                res.headers_mut().entry(name).or_insert(value);
            }
            res
        })
    }
}
