// ============================================================================
// Console API - HTTP Client
// File: crates/console-api/src/client.rs
// Description: Bearer-authenticated JSON client for the admin backend
// ============================================================================

use std::sync::RwLock;
use std::time::Duration;

use console_shared::config::ApiSettings;
use console_shared::constants::DEFAULT_API_TIMEOUT_SECS;
use console_shared::utils::{join_url, mask_token};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::response::{Envelope, Page};

/// Shared HTTP client. The bearer token is swapped in place on login and
/// logout so every endpoint wrapper sees the current session.
#[derive(Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Result<Self, ApiError> {
        let timeout = match settings.timeout_seconds {
            0 => DEFAULT_API_TIMEOUT_SECS,
            secs => secs,
        };
        let http = Client::builder().timeout(Duration::from_secs(timeout)).build()?;
        Ok(Self::with_client(http, &settings.base_url))
    }

    pub fn with_client(http: Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let token = token.into();
        debug!(token = %mask_token(&token), "api token set");
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token);
    }

    pub fn clear_token(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    // ------------------------------------------------------------------
    // Verbs
    // ------------------------------------------------------------------

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::GET, path), path).await?.into_data()
    }

    pub async fn get_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request_with_query(Method::GET, path, query)?, path).await?.into_data()
    }

    /// Table listing; `rows`/`total` may sit at the top level or in `data`.
    pub async fn get_page<Q, T>(&self, path: &str, query: &Q) -> Result<Page<T>, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request_with_query(Method::GET, path, query)?, path).await?.into_page()
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body), path).await?.into_data()
    }

    /// POST without a body.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::POST, path), path).await?.into_data()
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::PUT, path).json(body), path).await?.into_data()
    }

    /// PUT with the payload in the query string.
    pub async fn put_query<Q, T>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        Q: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request_with_query(Method::PUT, path, query)?, path).await?.into_data()
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        self.send(self.request(Method::DELETE, path), path).await?.into_data()
    }

    // ------------------------------------------------------------------
    // Plumbing
    // ------------------------------------------------------------------

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.authorize(self.http.request(method, join_url(&self.base_url, path)))
    }

    /// Flattens `query` into URL parameters. Null fields are omitted and
    /// arrays are comma-joined.
    fn request_with_query<Q>(&self, method: Method, path: &str, query: &Q) -> Result<RequestBuilder, ApiError>
    where
        Q: Serialize + ?Sized,
    {
        let mut url = Url::parse(&join_url(&self.base_url, path)).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        if let Value::Object(params) = serde_json::to_value(query)? {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params {
                if let Some(value) = query_value(value) {
                    pairs.append_pair(&key, &value);
                }
            }
        }
        Ok(self.authorize(self.http.request(method, url)))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json;charset=UTF-8"));
        match self.token() {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    async fn send(&self, request: RequestBuilder, path: &str) -> Result<Envelope, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(path, status = status.as_u16(), "api response");

        if status == StatusCode::UNAUTHORIZED {
            warn!(path, "backend rejected the session token");
            return Err(ApiError::Unauthorized);
        }

        let body = response.bytes().await?;
        let envelope: Envelope = match serde_json::from_slice(&body) {
            Ok(envelope) => envelope,
            Err(_) if !status.is_success() => return Err(ApiError::Status(status.as_u16())),
            Err(e) => return Err(e.into()),
        };

        envelope.check().inspect_err(|e| match e {
            ApiError::Unauthorized => warn!(path, "backend reported an expired session"),
            other => warn!(path, "api call failed: {}", other),
        })
    }
}

fn query_value(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Array(items) => Some(items.into_iter().filter_map(query_value).collect::<Vec<_>>().join(",")),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> ApiClient {
        let http = Client::builder().no_proxy().build().unwrap();
        ApiClient::with_client(http, &server.uri())
    }

    #[tokio::test]
    async fn test_bearer_token_attached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/ping"))
            .and(header("authorization", "Bearer tok-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 200, "data": "pong"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = client(&server);
        client.set_token("tok-123");
        let pong: String = client.get("/api/ping").await.unwrap();
        assert_eq!(pong, "pong");
    }

    #[tokio::test]
    async fn test_business_code_401_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 401, "msg": "登录已过期"})))
            .mount(&server)
            .await;

        let err = client(&server).get::<serde_json::Value>("/api/x").await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_http_401_is_unauthorized() {
        let server = MockServer::start().await;
        Mock::given(method("GET")).respond_with(ResponseTemplate::new(401)).mount(&server).await;
        let err = client(&server).get::<serde_json::Value>("/api/x").await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[tokio::test]
    async fn test_business_error_carries_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/system/post"))
            .and(body_json(json!({"postName": "CEO"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 500, "msg": "岗位名称已存在"})))
            .mount(&server)
            .await;

        let err = client(&server)
            .post::<_, ()>("/api/system/post", &json!({"postName": "CEO"}))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Request rejected (500): 岗位名称已存在");
    }

    #[tokio::test]
    async fn test_non_json_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
            .mount(&server)
            .await;
        let err = client(&server).get::<()>("/api/x").await.unwrap_err();
        assert!(matches!(err, ApiError::Status(502)));
    }

    #[tokio::test]
    async fn test_page_query_params() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/system/notice/list"))
            .and(query_param("pageNum", "2"))
            .and(query_param("pageSize", "5"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"code": 200, "rows": [{"a": 1}], "total": 6})),
            )
            .mount(&server)
            .await;

        let page: Page<serde_json::Value> = client(&server)
            .get_page("/api/system/notice/list", &console_shared::PageQuery::new(2, 5))
            .await
            .unwrap();
        assert_eq!(page.total, 6);
        assert_eq!(page.rows.len(), 1);
    }

    #[test]
    fn test_query_value_flattening() {
        assert_eq!(query_value(json!(null)), None);
        assert_eq!(query_value(json!("0")), Some("0".into()));
        assert_eq!(query_value(json!(7)), Some("7".into()));
        assert_eq!(query_value(json!([1, 2, 3])), Some("1,2,3".into()));
    }

    #[test]
    fn test_token_cleared() {
        let client = ApiClient::with_client(Client::new(), "http://localhost/");
        assert_eq!(client.base_url(), "http://localhost");
        client.set_token("abc");
        client.clear_token();
        assert!(client.token().is_none());
    }
}
