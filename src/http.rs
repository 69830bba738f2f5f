use anyhow::{Context, Result};
use reqwest::{Client, Url};
use serde::Serialize;
use std::time::{Duration, Instant};

#[derive(Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
    pub duration: Duration,
}

/// Build the HTTP client used for every check in a run.
pub fn build_client(timeout: Option<Duration>) -> Result<Client> {
    let mut builder = Client::builder().user_agent(concat!("rezide-smoke/", env!("CARGO_PKG_VERSION")));
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().context("failed to build HTTP client")
}

/// Parse the base URL the server is expected at.
pub fn parse_base_url(base_url: &str) -> Result<Url> {
    let url = Url::parse(base_url).with_context(|| format!("invalid base URL: {base_url}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("invalid base URL: {base_url} (expected http or https)");
    }
    Ok(url)
}

/// Resolve an absolute path (e.g. `/api/likes`) against the server origin.
pub fn endpoint_url(base: &Url, path: &str) -> Result<Url> {
    base.join(path)
        .with_context(|| format!("failed to resolve {path} against {base}"))
}

/// GET a URL and return status and body regardless of status code.
pub async fn get_unchecked(client: &Client, url: Url) -> Result<HttpResponse> {
    tracing::debug!(%url, "GET");
    let start = Instant::now();
    let response = client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {url} failed"))?;
    read_response(response, start).await
}

/// POST a JSON body and return status and body regardless of status code.
pub async fn post_json_unchecked<T: Serialize + ?Sized>(
    client: &Client,
    url: Url,
    payload: &T,
) -> Result<HttpResponse> {
    tracing::debug!(%url, "POST");
    let start = Instant::now();
    let response = client
        .post(url.clone())
        .json(payload)
        .send()
        .await
        .with_context(|| format!("POST {url} failed"))?;
    read_response(response, start).await
}

async fn read_response(response: reqwest::Response, start: Instant) -> Result<HttpResponse> {
    let status = response.status().as_u16();
    let url = response.url().clone();
    let body = response
        .text()
        .await
        .with_context(|| format!("failed to read response body from {url}"))?;
    let duration = start.elapsed();
    tracing::debug!(%url, status, bytes = body.len(), "response");

    Ok(HttpResponse {
        status,
        body,
        duration,
    })
}
