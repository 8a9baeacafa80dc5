//! Middleware layer.
//!
//! A [`Middleware`] sits between the router and a handler. It sees the
//! [`Request`] first, decides whether to forward it through [`Next`], and
//! sees the [`Response`] on the way back out.
//!
//! Built-in middleware:
//! - [`query::QueryParams`]: parses JSON-API `include` / `fields` / `filter`
//!   query parameters and attaches them to the request
//! - [`cache::HttpCache`]: `Cache-Control: public, max-age=…` plus `Expires`
//! - [`nocache::NoCache`]: headers that disable caching in browsers and proxies
//!
//! Install for every route with [`Router::layer`](crate::Router::layer), or for
//! a single route with [`wrap`]:
//!
//! ```rust,no_run
//! use herald::middleware::{self, cache::HttpCache, query::QueryParams};
//! use herald::{Method, Request, Response, Router};
//!
//! async fn articles(req: Request) -> Response { Response::text("") }
//! async fn logo(req: Request) -> Response { Response::text("") }
//!
//! let app = Router::new()
//!     .layer(QueryParams)
//!     .on(Method::Get, "/articles", articles)
//!     .on(Method::Get, "/logo.svg", middleware::wrap(HttpCache::from_now(30), logo));
//! ```

pub mod cache;
pub mod nocache;
pub mod query;

use std::sync::Arc;

use crate::handler::{BoxFuture, BoxedHandler, Handler};
use crate::request::Request;

#[cfg(doc)]
use crate::response::Response;

/// Request-interception hook.
///
/// Return `next.run(req)` to forward, or a finished response to stop the
/// chain. Implementations must be cheap to share: one instance serves every
/// concurrent request.
pub trait Middleware: Send + Sync + 'static {
    fn call(&self, req: Request, next: Next) -> BoxFuture;
}

pub(crate) type Stack = Arc<[Arc<dyn Middleware>]>;

/// The remainder of the middleware chain, ending in the route handler.
pub struct Next {
    stack: Stack,
    index: usize,
    handler: BoxedHandler,
}

impl Next {
    pub(crate) fn new(stack: Stack, handler: BoxedHandler) -> Self {
        Self { stack, index: 0, handler }
    }

    /// Passes `req` to the next middleware, or to the handler once the stack
    /// is exhausted.
    pub fn run(mut self, req: Request) -> BoxFuture {
        let current = self.stack.get(self.index).cloned();
        match current {
            Some(middleware) => {
                self.index += 1;
                middleware.call(req, self)
            }
            None => self.handler.call(req),
        }
    }
}

/// Wraps a single handler in `middleware`, producing a new handler.
///
/// Wrapped handlers nest: `wrap(a, wrap(b, h))` runs `a`, then `b`, then `h`.
pub fn wrap(middleware: impl Middleware, handler: impl Handler) -> impl Handler {
    let stack: Stack = Arc::from(vec![Arc::new(middleware) as Arc<dyn Middleware>]);
    let handler = handler.into_boxed_handler();
    move |req: Request| Next::new(Arc::clone(&stack), Arc::clone(&handler)).run(req)
}
