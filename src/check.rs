use anyhow::Result;
use reqwest::{Client, Url};
use serde_json::{Value, json};

use crate::config::{PageExpectations, SmokeConfig};
use crate::http::{build_client, endpoint_url, get_unchecked, parse_base_url, post_json_unchecked};
use crate::progress::{finish_spinner, stage_spinner};
use crate::report;
use crate::types::{CheckOutcome, HomePageResult, LikesResult, OverallResult};

const LIKES_PATH: &str = "/api/likes";
const POST_LIKES: &str = "POST /api/likes";
const GET_LIKES: &str = "GET /api/likes";

/// Evaluate the home page predicates against a response body.
pub fn evaluate_home_page(status: u16, body: &str, page: &PageExpectations) -> HomePageResult {
    HomePageResult {
        status,
        has_images: page.image_paths.iter().all(|p| body.contains(p.as_str())),
        has_like_button: body.contains(page.like_marker.as_str()),
        has_share_button: body.contains(page.share_marker.as_str()),
        has_rezide_content: body.contains(page.content_marker.as_str()),
        outcome: CheckOutcome::Responded,
    }
}

/// Read the `likes` count from a likes endpoint response.
///
/// A body that is not JSON is recorded as an invalid response with the
/// status kept and `likes` at 0; it never produces an error.
pub fn parse_likes(endpoint: &str, status: u16, body: &str) -> LikesResult {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => {
            let likes = value.get("likes").and_then(Value::as_i64);
            LikesResult {
                endpoint: endpoint.to_string(),
                status,
                likes: likes.unwrap_or(0),
                likes_reported: likes.is_some(),
                outcome: CheckOutcome::Responded,
            }
        }
        Err(e) => {
            tracing::debug!(endpoint, status, error = %e, "response body is not JSON");
            LikesResult {
                endpoint: endpoint.to_string(),
                status,
                likes: 0,
                likes_reported: false,
                outcome: CheckOutcome::InvalidResponse,
            }
        }
    }
}

pub async fn check_home_page(client: &Client, base: &Url, page: &PageExpectations) -> HomePageResult {
    match get_unchecked(client, base.clone()).await {
        Ok(resp) => {
            tracing::debug!(
                status = resp.status,
                elapsed_ms = resp.duration.as_millis() as u64,
                "home page fetched"
            );
            evaluate_home_page(resp.status, &resp.body, page)
        }
        Err(e) => {
            tracing::debug!(error = %format!("{e:#}"), "home page unreachable");
            HomePageResult::unreachable()
        }
    }
}

pub async fn check_like_post(client: &Client, base: &Url, post_id: &str) -> LikesResult {
    let url = match endpoint_url(base, LIKES_PATH) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(error = %format!("{e:#}"), "cannot resolve likes endpoint");
            return LikesResult::unreachable(POST_LIKES);
        }
    };
    match post_json_unchecked(client, url, &json!({ "postId": post_id })).await {
        Ok(resp) => parse_likes(POST_LIKES, resp.status, &resp.body),
        Err(e) => {
            tracing::debug!(error = %format!("{e:#}"), "POST likes failed");
            LikesResult::unreachable(POST_LIKES)
        }
    }
}

pub async fn check_like_get(client: &Client, base: &Url, post_id: &str) -> LikesResult {
    let mut url = match endpoint_url(base, LIKES_PATH) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(error = %format!("{e:#}"), "cannot resolve likes endpoint");
            return LikesResult::unreachable(GET_LIKES);
        }
    };
    url.query_pairs_mut().clear().append_pair("postId", post_id);
    match get_unchecked(client, url).await {
        Ok(resp) => parse_likes(GET_LIKES, resp.status, &resp.body),
        Err(e) => {
            tracing::debug!(error = %format!("{e:#}"), "GET likes failed");
            LikesResult::unreachable(GET_LIKES)
        }
    }
}

/// Run the three checks in order, printing each as it resolves, then the summary.
///
/// Unreachable servers and bad bodies are recorded in the results. Only setup
/// problems (bad base URL, client construction) come back as errors.
pub async fn run_smoke_tests(config: &SmokeConfig) -> Result<OverallResult> {
    let base = parse_base_url(&config.base_url)?;
    let client = build_client(config.timeout)?;

    report::print_header(&config.base_url);

    let pb = stage_spinner("Checking home page...");
    let home = check_home_page(&client, &base, &config.page).await;
    finish_spinner(&pb, home.is_ok());
    report::print_home_page(&home);

    report::print_api_header();

    let pb = stage_spinner(&format!("Checking {POST_LIKES}..."));
    let post = check_like_post(&client, &base, &config.post_id).await;
    finish_spinner(&pb, post.is_ok());
    report::print_likes(&post);

    let pb = stage_spinner(&format!("Checking {GET_LIKES}..."));
    let get = check_like_get(&client, &base, &config.post_id).await;
    finish_spinner(&pb, get.is_ok());
    report::print_likes(&get);

    let overall = OverallResult::evaluate(&home, &post, &get);
    tracing::debug!(passed = overall.passed, "smoke run complete");
    report::print_summary(&overall);

    Ok(overall)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FULL_PAGE: &str = r#"<html><body>
<img src="/images/rezide-logo.png"><img src="/images/presentation.jpg">
<p>Rezide is a modern real estate discovery platform built for renters.</p>
<button>Like</button><button>Share</button>
</body></html>"#;

    fn unused_base_url() -> Url {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);
        parse_base_url(&format!("http://127.0.0.1:{port}")).unwrap()
    }

    #[test]
    fn test_all_markers_present() {
        let result = evaluate_home_page(200, FULL_PAGE, &PageExpectations::default());
        assert!(result.is_ok());
    }

    #[test]
    fn test_each_marker_is_independent() {
        let page = PageExpectations::default();
        let cases = [
            ("/images/presentation.jpg", "images"),
            ("/images/rezide-logo.png", "images"),
            ("Like", "like"),
            ("Share", "share"),
            ("Rezide is a modern real estate discovery platform", "content"),
        ];
        for (marker, which) in cases {
            let body = FULL_PAGE.replace(marker, "");
            let r = evaluate_home_page(200, &body, &page);
            assert_eq!(r.has_images, which != "images", "{marker}");
            assert_eq!(r.has_like_button, which != "like", "{marker}");
            assert_eq!(r.has_share_button, which != "share", "{marker}");
            assert_eq!(r.has_rezide_content, which != "content", "{marker}");
        }
    }

    #[test]
    fn test_markers_are_case_sensitive() {
        let body = "like share /images/rezide-logo.png /images/presentation.jpg \
                    rezide is a modern real estate discovery platform";
        let r = evaluate_home_page(200, body, &PageExpectations::default());
        assert!(r.has_images);
        assert!(!r.has_like_button);
        assert!(!r.has_share_button);
        assert!(!r.has_rezide_content);
    }

    #[test]
    fn test_parse_likes_valid() {
        let r = parse_likes(POST_LIKES, 200, r#"{"likes": 5}"#);
        assert_eq!(r.likes, 5);
        assert!(r.likes_reported);
        assert_eq!(r.outcome, CheckOutcome::Responded);
    }

    #[test]
    fn test_parse_likes_malformed_keeps_status() {
        let r = parse_likes(GET_LIKES, 200, "<html>oops</html>");
        assert_eq!(r.status, 200);
        assert_eq!(r.likes, 0);
        assert_eq!(r.outcome, CheckOutcome::InvalidResponse);
        assert!(r.is_ok());
    }

    #[test]
    fn test_parse_likes_missing_field() {
        let r = parse_likes(GET_LIKES, 200, r#"{"count": 3}"#);
        assert_eq!(r.likes, 0);
        assert!(!r.likes_reported);
        assert_eq!(r.outcome, CheckOutcome::Responded);
    }

    #[tokio::test]
    async fn test_home_page_against_server() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(FULL_PAGE))
            .mount(&server)
            .await;

        let client = build_client(None).unwrap();
        let base = parse_base_url(&server.uri()).unwrap();
        let r = check_home_page(&client, &base, &PageExpectations::default()).await;
        assert_eq!(r.status, 200);
        assert!(r.is_ok());
    }

    #[tokio::test]
    async fn test_like_post_sends_post_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/likes"))
            .and(body_json(json!({ "postId": "main-post" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "likes": 5 })))
            .expect(1)
            .mount(&server)
            .await;

        let client = build_client(None).unwrap();
        let base = parse_base_url(&server.uri()).unwrap();
        let r = check_like_post(&client, &base, "main-post").await;
        assert_eq!(r.status, 200);
        assert_eq!(r.likes, 5);
    }

    #[tokio::test]
    async fn test_like_get_uses_query_param() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/likes"))
            .and(query_param("postId", "post with space"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "likes": 6 })))
            .expect(1)
            .mount(&server)
            .await;

        let client = build_client(None).unwrap();
        let base = parse_base_url(&server.uri()).unwrap();
        let r = check_like_get(&client, &base, "post with space").await;
        assert_eq!(r.status, 200);
        assert_eq!(r.likes, 6);
    }

    #[tokio::test]
    async fn test_like_get_non_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/likes"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&server)
            .await;

        let client = build_client(None).unwrap();
        let base = parse_base_url(&server.uri()).unwrap();
        let r = check_like_get(&client, &base, "main-post").await;
        assert_eq!(r.status, 500);
        assert_eq!(r.likes, 0);
        assert_eq!(r.outcome, CheckOutcome::InvalidResponse);
    }

    #[tokio::test]
    async fn test_like_post_non_json_body_with_200() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/likes"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>liked!</html>"))
            .mount(&server)
            .await;

        let client = build_client(None).unwrap();
        let base = parse_base_url(&server.uri()).unwrap();
        let r = check_like_post(&client, &base, "main-post").await;
        assert_eq!(r.status, 200);
        assert_eq!(r.likes, 0);
        assert_eq!(r.outcome, CheckOutcome::InvalidResponse);
        assert!(r.is_ok());
    }

    #[tokio::test]
    async fn test_connection_failure_records_defaults() {
        let client = build_client(None).unwrap();
        let base = unused_base_url();

        let home = check_home_page(&client, &base, &PageExpectations::default()).await;
        assert_eq!(home, HomePageResult::unreachable());

        let post = check_like_post(&client, &base, "main-post").await;
        assert_eq!(post, LikesResult::unreachable(POST_LIKES));

        let get = check_like_get(&client, &base, "main-post").await;
        assert_eq!(get, LikesResult::unreachable(GET_LIKES));
    }

    #[tokio::test]
    async fn test_run_rejects_bad_base_url() {
        let config = SmokeConfig {
            base_url: "localhost:3000 nope".to_string(),
            ..SmokeConfig::default()
        };
        assert!(run_smoke_tests(&config).await.is_err());
    }
}
