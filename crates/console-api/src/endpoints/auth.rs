//! Sign-in endpoints: captcha, login, logout

use console_core::UserInfo;
use console_security::LoginGrant;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::client::ApiClient;
use crate::error::ApiError;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaptchaInfo {
    #[serde(default)]
    pub captcha_enabled: bool,
    #[serde(default)]
    pub uuid: String,
    /// Base64 image, empty when captcha is disabled.
    #[serde(default)]
    pub img: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct LoginForm {
    #[validate(length(min = 1, max = 30, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, max = 64, message = "Password is required"))]
    pub password: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

impl LoginForm {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self { username: username.into(), password: password.into(), ..Default::default() }
    }

    pub fn with_captcha(mut self, code: impl Into<String>, uuid: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self.uuid = Some(uuid.into());
        self
    }
}

/// Login payload. Token fields keep the backend's snake_case names.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct LoginResult {
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expire_in: Option<i64>,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub user: Option<Value>,
    #[serde(default)]
    pub permissions: Option<Vec<String>>,
    #[serde(default)]
    pub roles: Option<Vec<String>>,
}

impl LoginResult {
    /// Session grant for the store. A `user` object that does not decode
    /// as a profile is dropped.
    pub fn into_grant(self) -> LoginGrant {
        let user = self
            .user
            .filter(Value::is_object)
            .and_then(|value| serde_json::from_value::<UserInfo>(value).ok());
        LoginGrant {
            token: self.access_token,
            user,
            permissions: self.permissions,
            roles: self.roles,
        }
    }
}

pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }
}

impl AuthApi<'_> {
    pub async fn captcha(&self) -> Result<CaptchaInfo, ApiError> {
        self.client.get("/auth/captcha").await
    }

    pub async fn login(&self, form: &LoginForm) -> Result<LoginResult, ApiError> {
        form.validate()?;
        self.client.post("/auth/login", form).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client.post_empty("/auth/logout").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_json(json!({"username": "admin", "password": "admin123"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "msg": "操作成功",
                "data": {
                    "access_token": "tok",
                    "expire_in": 604800,
                    "user": {"userId": 1, "userName": "admin", "deptName": "研发部门"},
                    "permissions": ["*:*:*"],
                    "roles": ["admin"]
                }
            })))
            .mount(&server)
            .await;

        let client = ApiClient::with_client(reqwest::Client::new(), &server.uri());
        let result = client.auth().login(&LoginForm::new("admin", "admin123")).await.unwrap();
        assert_eq!(result.expire_in, Some(604800));

        let grant = result.into_grant();
        assert_eq!(grant.token, "tok");
        let user = grant.user.unwrap();
        assert_eq!(user.user_name.as_deref(), Some("admin"));
        assert_eq!(user.extra["deptName"], "研发部门");
        assert_eq!(grant.roles, Some(vec!["admin".to_string()]));
    }

    #[tokio::test]
    async fn test_blank_credentials_never_sent() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

        let client = ApiClient::with_client(reqwest::Client::new(), &server.uri());
        let err = client.auth().login(&LoginForm::new("", "secret")).await.unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn test_captcha_disabled() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/auth/captcha"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "code": 200,
                "data": {"captchaEnabled": false, "uuid": "abc", "img": ""}
            })))
            .mount(&server)
            .await;

        let client = ApiClient::with_client(reqwest::Client::new(), &server.uri());
        let captcha = client.auth().captcha().await.unwrap();
        assert!(!captcha.captcha_enabled);
        assert_eq!(captcha.uuid, "abc");
    }

    #[test]
    fn test_grant_without_codes() {
        let grant = LoginResult { access_token: "t".into(), user: Some(json!("n/a")), ..Default::default() }
            .into_grant();
        assert!(grant.user.is_none());
        assert!(grant.permissions.is_none());
    }
}
