//! HTTP caching headers.
//!
//! [`HttpCache`] marks responses as publicly cacheable for a fixed number of
//! days:
//!
//! ```text
//! Cache-Control: public, max-age=2592000
//! Expires: Thu, 19 Nov 2026 10:00:00 GMT
//! ```

use chrono::{DateTime, TimeDelta, Utc};
use http::HeaderValue;
use http::header::{CACHE_CONTROL, EXPIRES};

use crate::handler::BoxFuture;
use crate::middleware::{Middleware, Next};
use crate::request::Request;

const SECONDS_PER_DAY: u64 = 86_400;

/// 9999-12-31T23:59:59Z, the last instant an IMF-fixdate can carry.
const LATEST_EXPIRY: i64 = 253_402_300_799;

/// Formats `at` as an IMF-fixdate, the preferred HTTP-date form of
/// RFC 7231 §7.1.1.1 (`Sun, 06 Nov 1994 08:49:37 GMT`).
pub fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Sets `Cache-Control: public, max-age=<seconds>` and `Expires` on every
/// response it wraps.
///
/// Both values are computed once, at construction. A handler that sets
/// either header itself keeps its own value.
#[derive(Clone, Debug)]
pub struct HttpCache {
    max_age: u64,
    expires: String,
    cache_control: HeaderValue,
    expires_value: HeaderValue,
}

impl HttpCache {
    /// Cache for `days`, with `Expires` counted from `reference`.
    ///
    /// `Expires` never goes past the end of year 9999; later expiries are
    /// clamped to `Fri, 31 Dec 9999 23:59:59 GMT`. `max-age` is not clamped.
    pub fn new(days: u32, reference: DateTime<Utc>) -> Self {
        let max_age = u64::from(days) * SECONDS_PER_DAY;
        let expiry = TimeDelta::try_days(i64::from(days))
            .and_then(|span| reference.checked_add_signed(span))
            .filter(|at| at.timestamp() <= LATEST_EXPIRY)
            .or_else(|| DateTime::<Utc>::from_timestamp(LATEST_EXPIRY, 0))
            .unwrap_or(reference);
        let expires = http_date(expiry);

        // Both strings are plain ASCII built above.
        let cache_control = HeaderValue::try_from(format!("public, max-age={max_age}"))
            .unwrap_or_else(|_| HeaderValue::from_static("public"));
        let expires_value = HeaderValue::try_from(expires.as_str())
            .unwrap_or_else(|_| HeaderValue::from_static("0"));

        Self { max_age, expires, cache_control, expires_value }
    }

    /// Cache for `days` from the current time.
    pub fn from_now(days: u32) -> Self {
        Self::new(days, Utc::now())
    }

    /// Lifetime in seconds, as sent in `max-age`.
    pub fn max_age(&self) -> u64 { self.max_age }

    /// Expiry as sent in `Expires`.
    pub fn expires(&self) -> &str { &self.expires }
}

impl Middleware for HttpCache {
    fn call(&self, req: Request, next: Next) -> BoxFuture {
        let cache_control = self.cache_control.clone();
        let expires = self.expires_value.clone();
        Box::pin(async move {
            let mut res = next.run(req).await;
            let headers = res.headers_mut();
            headers.entry(CACHE_CONTROL).or_insert(cache_control);
            headers.entry(EXPIRES).or_insert(expires);
            res
        })
    }
}
