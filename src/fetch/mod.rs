mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use anyhow::Result;
use reqwest::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// GETs `url` through `client` and deserializes the JSON response body.
///
/// Non-2xx responses become errors carrying the status and response text.
pub async fn fetch_json<C: HttpClient, T: DeserializeOwned>(client: &C, url: &str) -> Result<T> {
    let req = reqwest::Request::new(reqwest::Method::GET, url.parse()?);

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("GET {url} returned status {status}: {body}");
    }

    Ok(resp.json().await?)
}

/// POSTs `value` as JSON to `url` through `client`, with any extra headers
/// the endpoint wants (e.g. PostgREST's `Prefer`).
pub async fn post_json<C: HttpClient>(
    client: &C,
    url: &str,
    value: &impl Serialize,
    extra_headers: &[(&str, &str)],
) -> Result<()> {
    let mut req = reqwest::Request::new(reqwest::Method::POST, url.parse()?);

    req.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in extra_headers {
        req.headers_mut()
            .insert(HeaderName::from_bytes(name.as_bytes())?, value.parse()?);
    }
    *req.body_mut() = Some(serde_json::to_vec(value)?.into());

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        anyhow::bail!("POST {url} returned status {status}: {body}");
    }

    Ok(())
}
