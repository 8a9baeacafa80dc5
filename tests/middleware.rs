//! End-to-end behaviour of the built-in middleware, driven through
//! `Router::handle` without a network.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use chrono::{TimeZone, Utc};
use herald::middleware::cache::HttpCache;
use herald::middleware::nocache::NoCache;
use herald::middleware::query::{FILTER_MEDIA_TYPE, QueryParams};
use herald::middleware;
use herald::{Method, Request, Response, Router, Status};
use http::HeaderValue;
use pretty_assertions::assert_eq;
use serde_json::Value;

fn get(uri: &str) -> http::request::Builder {
    http::Request::builder().method("GET").uri(uri)
}

fn send(builder: http::request::Builder) -> Request {
    builder.body(Bytes::new()).unwrap().into()
}

/// Renders whatever the handler received so assertions can inspect it.
async fn describe(req: Request) -> Response {
    let Some(params) = req.parameters() else {
        return Response::text("none");
    };
    let mut fields: Vec<_> = params
        .fields()
        .iter()
        .map(|(k, v)| format!("{k}={}", v.join("|")))
        .collect();
    fields.sort();
    let mut filters: Vec<_> = params.filters().iter().map(|(k, v)| format!("{k}={v}")).collect();
    filters.sort();
    Response::text(format!(
        "includes:{} fields:{} filters:{}",
        params.includes().join("|"),
        fields.join(","),
        filters.join(","),
    ))
}

fn query_app() -> Router {
    Router::new()
        .layer(QueryParams)
        .on(Method::Get, "/articles", describe)
}

fn body_text(res: &Response) -> &str {
    std::str::from_utf8(res.body()).unwrap()
}

fn error_object(res: &Response) -> Value {
    assert_eq!(res.header("content-type"), Some("application/vnd.api+json"));
    let doc: Value = serde_json::from_slice(res.body()).unwrap();
    let errors = doc["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["meta"]["creator"], "query middleware");
    errors[0].clone()
}

// ── query ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn unrelated_query_reaches_handler_undecorated() {
    let res = query_app().handle(send(get("/articles?page=2&sort=title"))).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(body_text(&res), "none");
}

#[tokio::test]
async fn no_query_string_at_all() {
    let res = query_app().handle(send(get("/articles"))).await;
    assert_eq!(body_text(&res), "none");
}

#[tokio::test]
async fn include_and_fields_are_attached() {
    let res = query_app()
        .handle(send(get(
            "/articles?include=author,comments&fields[articles]=title,body&fields[people]=name",
        )))
        .await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(
        body_text(&res),
        "includes:author|comments fields:articles=title|body,people=name filters:"
    );
}

#[tokio::test]
async fn fields_without_brackets_is_400() {
    let res = query_app().handle(send(get("/articles?fieldsX=title"))).await;
    assert_eq!(res.status_code(), 400);
    let error = error_object(&res);
    assert_eq!(error["status"], "400");
    assert_eq!(error["title"], "Invalid query parameter");
    assert_eq!(error["detail"], "Unable to match fields query param title");
}

#[tokio::test]
async fn malformed_filter_key_is_400_once_negotiated() {
    let req = send(
        get("/articles?filter[a-b]=foo")
            .header("accept", FILTER_MEDIA_TYPE)
            .header("content-type", FILTER_MEDIA_TYPE),
    );
    let res = query_app().handle(req).await;
    assert_eq!(res.status_code(), 400);
    let error = error_object(&res);
    assert_eq!(error["status"], "400");
    assert_eq!(error["detail"], "Unable to match filter query param foo");
}

#[tokio::test]
async fn percent_encoded_brackets_are_decoded() {
    let res = query_app()
        .handle(send(get("/articles?fields%5Barticles%5D=title")))
        .await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(body_text(&res), "includes: fields:articles=title filters:");
}

#[tokio::test]
async fn filter_with_negotiated_media_type_is_attached() {
    let req = send(
        get("/articles?filter[name]=foo")
            .header("accept", FILTER_MEDIA_TYPE)
            .header("content-type", FILTER_MEDIA_TYPE),
    );
    let res = query_app().handle(req).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(body_text(&res), "includes: fields: filters:name=foo");
}

#[tokio::test]
async fn filter_without_accept_is_406() {
    let res = query_app().handle(send(get("/articles?filter[name]=foo"))).await;
    assert_eq!(res.status_code(), 406);
    let error = error_object(&res);
    assert_eq!(error["status"], "406");
    assert_eq!(error["title"], "Accept header is not acceptable");
}

#[tokio::test]
async fn filter_with_wrong_accept_names_it_in_detail() {
    let req = send(get("/articles?filter[name]=foo").header("accept", "application/json"));
    let res = query_app().handle(req).await;
    assert_eq!(res.status_code(), 406);
    assert_eq!(
        error_object(&res)["detail"],
        "The given Accept header value application/json is incorrect for filter query extension"
    );
}

#[tokio::test]
async fn filter_with_mismatched_content_type_is_415() {
    let req = send(
        get("/articles?filter[name]=foo")
            .header("accept", FILTER_MEDIA_TYPE)
            .header("content-type", "application/vnd.api+json"),
    );
    let res = query_app().handle(req).await;
    assert_eq!(res.status_code(), 415);
    let error = error_object(&res);
    assert_eq!(error["title"], "Media type is not supported");
    assert_eq!(
        error["detail"],
        "The given media type application/vnd.api+json in Content-Type header is not supported"
    );
}

#[tokio::test]
async fn non_ascii_accept_is_reported_lossily() {
    let accept = HeaderValue::from_bytes(b"text/caf\xe9").unwrap();
    let req = send(get("/articles?filter[name]=foo").header("accept", accept));
    let res = query_app().handle(req).await;
    assert_eq!(res.status_code(), 406);
    assert_eq!(
        error_object(&res)["detail"],
        "The given Accept header value text/caf\u{FFFD} is incorrect for filter query extension"
    );
}

#[tokio::test]
async fn non_ascii_content_type_is_reported_lossily() {
    let content_type = HeaderValue::from_bytes(b"application/caf\xe9").unwrap();
    let req = send(
        get("/articles?filter[name]=foo")
            .header("accept", FILTER_MEDIA_TYPE)
            .header("content-type", content_type),
    );
    let res = query_app().handle(req).await;
    assert_eq!(res.status_code(), 415);
    assert_eq!(
        error_object(&res)["detail"],
        "The given media type application/caf\u{FFFD} in Content-Type header is not supported"
    );
}

#[tokio::test]
async fn rejected_requests_never_reach_the_handler() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let app = Router::new().layer(QueryParams).on(Method::Get, "/articles", move |_req: Request| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Status::Ok
        }
    });

    for uri in ["/articles?filter[name]=foo", "/articles?fields=title"] {
        let res = app.handle(send(get(uri))).await;
        assert!(res.status_code() >= 400, "{uri} was accepted");
    }
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    let res = app.handle(send(get("/articles?include=a"))).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn independent_requests_parse_identically() {
    let app = query_app();
    let uri = "/articles?include=a,b&fields[articles]=title";
    let first = app.handle(send(get(uri))).await;
    let second = app.handle(send(get(uri))).await;
    assert_eq!(first.body(), second.body());
}

// ── cache ─────────────────────────────────────────────────────────────────────

async fn plain(_req: Request) -> Response {
    Response::text("ok")
}

#[tokio::test]
async fn cache_headers_for_thirty_days() {
    let reference = Utc.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap();
    let app = Router::new()
        .layer(HttpCache::new(30, reference))
        .on(Method::Get, "/logo.svg", plain);

    let res = app.handle(send(get("/logo.svg"))).await;

    assert_eq!(res.status_code(), 200);
    assert_eq!(res.header("cache-control"), Some("public, max-age=2592000"));
    assert_eq!(res.header("expires"), Some("Wed, 18 Nov 2026 10:00:00 GMT"));
}

#[tokio::test]
async fn handler_set_cache_control_wins() {
    async fn private(_req: Request) -> Response {
        Response::builder()
            .header("cache-control", HeaderValue::from_static("private"))
            .text("mine")
    }

    let app = Router::new().on(
        Method::Get,
        "/me",
        middleware::wrap(HttpCache::new(1, Utc::now()), private),
    );
    let res = app.handle(send(get("/me"))).await;
    assert_eq!(res.header("cache-control"), Some("private"));
    assert!(res.header("expires").is_some());
}

// ── nocache ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn nocache_sets_all_four_headers() {
    let app = Router::new()
        .layer(NoCache)
        .on(Method::Get, "/articles", plain)
        .on(Method::Post, "/articles", plain);

    for req in [
        send(get("/articles?include=a")),
        send(http::Request::builder().method("POST").uri("/articles").header("accept", "*/*")),
    ] {
        let res = app.handle(req).await;
        assert_eq!(res.header("expires"), Some("Thu, 01 Jan 1970 00:00:00 GMT"));
        assert_eq!(
            res.header("cache-control"),
            Some("no-cache, no-store, no-transform, must-revalidate, private, max-age=0")
        );
        assert_eq!(res.header("pragma"), Some("no-cache"));
        assert_eq!(res.header("x-accel-expires"), Some("0"));
    }
}

#[tokio::test]
async fn nocache_wraps_query_rejections_too() {
    let app = Router::new()
        .layer(NoCache)
        .layer(QueryParams)
        .on(Method::Get, "/articles", describe);

    let res = app.handle(send(get("/articles?filter[name]=foo"))).await;
    assert_eq!(res.status_code(), 406);
    assert_eq!(res.header("pragma"), Some("no-cache"));
}
