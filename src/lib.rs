//! # herald
//!
//! JSON-API request middleware on a minimal hyper framework.
//!
//! herald ships three middleware and just enough framework to run them:
//!
//! - [`middleware::query::QueryParams`]: parses `include`, sparse `fields`
//!   and `filter` query parameters into a [`ParameterBundle`] handlers read
//!   with [`Request::parameters`]; rejects filter requests that did not
//!   negotiate the filtering media type
//! - [`middleware::cache::HttpCache`]: `Cache-Control` / `Expires` for a
//!   fixed number of days
//! - [`middleware::nocache::NoCache`]: headers that switch caching off
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use herald::middleware::{nocache::NoCache, query::QueryParams};
//! use herald::{Config, Method, Request, Response, Router, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), herald::Error> {
//!     let config = Config::load()?;
//!     let app = Router::new()
//!         .layer(NoCache)
//!         .layer(QueryParams)
//!         .on(Method::Get, "/articles", list_articles);
//!
//!     Server::at(config.addr).serve(app).await
//! }
//!
//! async fn list_articles(req: Request) -> Response {
//!     match req.parameters().and_then(|p| p.filter("name")) {
//!         Some(name) => Response::text(format!("articles named {name}")),
//!         None => Response::text("all articles"),
//!     }
//! }
//! ```

mod config;
mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod middleware;

pub use config::Config;
pub use error::Error;
pub use handler::{BoxFuture, Handler};
pub use method::Method;
pub use middleware::query::ParameterBundle;
pub use request::Request;
pub use response::{ContentType, IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
pub use status::Status;
