//! In-process HTTP server for exercising the network tools.
//!
//! Routes:
//! - `/status/{code}` responds with that status code
//! - `/redirect` responds `302` to `/final`
//! - `/hang` accepts the request and never answers
//! - `/weather` serves a canned OpenWeatherMap payload
//! - `/weather/unauthorized` serves a `401` OpenWeatherMap error
//! - anything else responds `200`
//!
//! Every echo response carries the request back as its body (request line,
//! headers, blank line, body) and sets the `X-Echo` header twice.

use axum::{
    Router,
    extract::Path,
    http::{HeaderMap, Method, StatusCode, Uri, Version, header},
    response::{AppendHeaders, IntoResponse, Response},
    routing::any,
};
use tokio::net::TcpListener;

const WEATHER_BODY: &str = r#"{"name":"Paris","main":{"temp":18.4,"humidity":72},"weather":[{"description":"light rain"}],"wind":{"speed":5.0}}"#;
const WEATHER_UNAUTHORIZED_BODY: &str = r#"{"cod":401,"message":"Invalid API key"}"#;

/// Start the server and return its base URL, e.g. `http://127.0.0.1:40123`.
pub async fn spawn_echo_server() -> String {
    let app = Router::new()
        .route("/status/{code}", any(status))
        .route("/redirect", any(redirect))
        .route("/hang", any(hang))
        .route("/weather", any(weather))
        .route("/weather/unauthorized", any(weather_unauthorized))
        .fallback(echo);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

/// A base URL on which nothing is listening.
pub async fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", addr)
}

async fn echo(
    method: Method,
    uri: Uri,
    version: Version,
    headers: HeaderMap,
    body: String,
) -> Response {
    echo_with_status(StatusCode::OK, describe_request(&method, &uri, version, &headers, &body))
}

async fn status(
    Path(code): Path<u16>,
    method: Method,
    uri: Uri,
    version: Version,
    headers: HeaderMap,
    body: String,
) -> Response {
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    echo_with_status(status, describe_request(&method, &uri, version, &headers, &body))
}

async fn redirect() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/final")])
}

async fn hang() -> Response {
    std::future::pending::<Response>().await
}

async fn weather() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        WEATHER_BODY,
    )
}

async fn weather_unauthorized() -> impl IntoResponse {
    (
        StatusCode::UNAUTHORIZED,
        [(header::CONTENT_TYPE, "application/json")],
        WEATHER_UNAUTHORIZED_BODY,
    )
}

fn echo_with_status(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/plain")],
        AppendHeaders([("x-echo", "one"), ("x-echo", "two")]),
        body,
    )
        .into_response()
}

/// Render the request roughly as it appeared on the wire.
fn describe_request(
    method: &Method,
    uri: &Uri,
    version: Version,
    headers: &HeaderMap,
    body: &str,
) -> String {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");
    let mut text = format!("{} {} {:?}\r\n", method, target, version);
    for (name, value) in headers {
        text.push_str(&format!(
            "{}: {}\r\n",
            name,
            String::from_utf8_lossy(value.as_bytes())
        ));
    }
    text.push_str("\r\n");
    text.push_str(body);
    text
}
