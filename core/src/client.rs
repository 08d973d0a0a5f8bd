//! Stateless HTTP request builder and response parser for the posts API.
//!
//! # Design
//! `PostsClient` holds only a `base_url`. Creating a post is split into
//! `build_create_post`, which produces an `HttpRequest`, and
//! `parse_create_post`, which consumes an `HttpResponse`. The host runs the
//! round-trip in between.

use crate::error::ApiError;
use crate::form::FormState;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::Post;

/// Public endpoint the form posts to when no other base is configured.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

#[derive(Debug, Clone)]
pub struct PostsClient {
    base_url: String,
}

impl Default for PostsClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PostsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_create_post(&self, input: &FormState) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/posts", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    /// Any 2xx is accepted; the public endpoint answers 201, some proxies 200.
    pub fn parse_create_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        check_status(&response)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PostsClient {
        PostsClient::new("http://localhost:3000")
    }

    fn form() -> FormState {
        FormState {
            user_id: "7".to_string(),
            title: "Hello".to_string(),
            body: "World".to_string(),
        }
    }

    #[test]
    fn build_create_post_produces_correct_request() {
        let req = client().build_create_post(&form()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/posts");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["userId"], "7");
        assert_eq!(body["title"], "Hello");
        assert_eq!(body["body"], "World");
    }

    #[test]
    fn build_create_post_sends_empty_fields() {
        let req = client().build_create_post(&FormState::default()).unwrap();
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, serde_json::json!({"userId": "", "title": "", "body": ""}));
    }

    #[test]
    fn default_client_targets_public_endpoint() {
        let req = PostsClient::default().build_create_post(&form()).unwrap();
        assert_eq!(req.path, "https://jsonplaceholder.typicode.com/posts");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = PostsClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn parse_create_post_accepts_201() {
        let response = HttpResponse::new(201, r#"{"userId":"7","title":"Hello","body":"World","id":101}"#);
        let post = client().parse_create_post(response).unwrap();
        assert_eq!(post.id, Some(101));
        assert_eq!(post.title, "Hello");
        assert_eq!(post.body, "World");
    }

    #[test]
    fn parse_create_post_accepts_200_without_id() {
        let response = HttpResponse::new(200, r#"{"title":"T","body":"B"}"#);
        let post = client().parse_create_post(response).unwrap();
        assert_eq!(post.id, None);
        assert_eq!(post.title, "T");
    }

    #[test]
    fn parse_create_post_rejects_non_2xx() {
        let response = HttpResponse::new(500, "internal error");
        let err = client().parse_create_post(response).unwrap_err();
        assert_eq!(
            err,
            ApiError::HttpError {
                status: 500,
                body: "internal error".to_string()
            }
        );
    }

    #[test]
    fn parse_create_post_404_is_plain_http_error() {
        let response = HttpResponse::new(404, "");
        let err = client().parse_create_post(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 404, .. }));
    }

    #[test]
    fn parse_create_post_missing_title_fails() {
        let response = HttpResponse::new(201, r#"{"id":101,"body":"B"}"#);
        let err = client().parse_create_post(response).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_create_post_bad_json() {
        let response = HttpResponse::new(201, "not json");
        let err = client().parse_create_post(response).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
