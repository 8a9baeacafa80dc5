//! herald demo: JSON-API query parameters and cache headers.
//!
//! Run with:
//!   RUST_LOG=herald=debug,info cargo run --example basic
//!
//! Try:
//!   curl -i 'http://localhost:3000/articles?include=author,comments&fields[articles]=title,body'
//!   curl -i 'http://localhost:3000/articles?filter[name]=foo'                 # 406
//!   curl -i 'http://localhost:3000/articles?filter[name]=foo' \
//!        -H 'accept: application/vnd.api+json; supported-ext="dictybase/filtering-resouce"' \
//!        -H 'content-type: application/vnd.api+json; supported-ext="dictybase/filtering-resouce"'
//!   curl -i 'http://localhost:3000/articles?fieldsX=title'                    # 400
//!   curl -i http://localhost:3000/logo.svg                                    # cached

use herald::middleware::{self, cache::HttpCache, nocache::NoCache, query::QueryParams};
use herald::{Config, ContentType, Method, Request, Response, Router, Server};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), herald::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;

    let cache = HttpCache::from_now(config.cache_days);
    let app = Router::new()
        .layer(QueryParams)
        .on(Method::Get, "/articles", middleware::wrap(NoCache, list_articles))
        .on(Method::Get, "/logo.svg", middleware::wrap(cache, logo));

    Server::at(config.addr).serve(app).await
}

// GET /articles
//
// Echoes the parsed parameters back as plain text.
async fn list_articles(req: Request) -> Response {
    let Some(params) = req.parameters() else {
        return Response::text("no JSON-API parameters\n");
    };

    let mut out = String::new();
    if params.has_includes() {
        out.push_str(&format!("include: {}\n", params.includes().join(", ")));
    }
    for (resource, fields) in params.fields() {
        out.push_str(&format!("fields[{resource}]: {}\n", fields.join(", ")));
    }
    for (key, value) in params.filters() {
        out.push_str(&format!("filter[{key}]: {value}\n"));
    }
    Response::text(out)
}

// GET /logo.svg
async fn logo(_req: Request) -> Response {
    Response::builder().bytes(
        ContentType::OctetStream,
        br#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#.to_vec(),
    )
}
