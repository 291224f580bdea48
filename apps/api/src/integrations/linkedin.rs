//! LinkedIn OAuth 2.0 (authorization-code flow) plus the OpenID userinfo
//! fetch. The API only brokers the flow; tokens are returned to the caller,
//! never stored.

use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const AUTHORIZATION_URL: &str = "https://www.linkedin.com/oauth/v2/authorization";
const TOKEN_URL: &str = "https://www.linkedin.com/oauth/v2/accessToken";
const USERINFO_URL: &str = "https://api.linkedin.com/v2/userinfo";
const SCOPES: &str = "openid profile email";

pub struct OauthConfig<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub redirect_uri: &'a str,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: u64,
    #[serde(default)]
    pub scope: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkedInProfile {
    pub sub: String,
    pub name: Option<String>,
    pub email: Option<String>,
    pub picture: Option<String>,
    pub locale: Option<serde_json::Value>,
}

/// Builds the browser redirect URL that starts the flow. `state` is the
/// caller's CSRF token, echoed back on the redirect.
pub fn authorize_url(config: &OauthConfig<'_>, state: &str) -> Result<String, AppError> {
    let url = Url::parse_with_params(
        AUTHORIZATION_URL,
        &[
            ("response_type", "code"),
            ("client_id", config.client_id),
            ("redirect_uri", config.redirect_uri),
            ("state", state),
            ("scope", SCOPES),
        ],
    )
    .map_err(|e| anyhow::anyhow!("could not build authorization URL: {e}"))?;
    Ok(url.into())
}

/// Exchanges an authorization code for an access token. One POST, no retry.
pub async fn exchange_code(
    http: &Client,
    config: &OauthConfig<'_>,
    code: &str,
) -> Result<TokenResponse, AppError> {
    let response = http
        .post(TOKEN_URL)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_id", config.client_id),
            ("client_secret", config.client_secret),
            ("redirect_uri", config.redirect_uri),
        ])
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("LinkedIn token request failed: {e}")))?;

    match response.status() {
        StatusCode::TOO_MANY_REQUESTS => Err(AppError::RateLimited("LinkedIn".to_string())),
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => Err(AppError::Validation(
            "LinkedIn rejected the authorization code".to_string(),
        )),
        status if !status.is_success() => Err(AppError::Upstream(format!(
            "LinkedIn returned status {status}"
        ))),
        _ => response
            .json::<TokenResponse>()
            .await
            .map_err(|e| AppError::Upstream(format!("LinkedIn token parse failed: {e}"))),
    }
}

/// Fetches the OpenID userinfo document for a bearer token.
pub async fn fetch_profile(http: &Client, access_token: &str) -> Result<LinkedInProfile, AppError> {
    let response = http
        .get(USERINFO_URL)
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("LinkedIn userinfo request failed: {e}")))?;

    match response.status() {
        StatusCode::UNAUTHORIZED => Err(AppError::Validation(
            "LinkedIn access token is invalid or expired".to_string(),
        )),
        StatusCode::TOO_MANY_REQUESTS => Err(AppError::RateLimited("LinkedIn".to_string())),
        status if !status.is_success() => Err(AppError::Upstream(format!(
            "LinkedIn returned status {status}"
        ))),
        _ => response
            .json::<LinkedInProfile>()
            .await
            .map_err(|e| AppError::Upstream(format!("LinkedIn userinfo parse failed: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> OauthConfig<'static> {
        OauthConfig {
            client_id: "client123",
            client_secret: "secret",
            redirect_uri: "https://app.example.com/auth/callback",
        }
    }

    #[test]
    fn test_authorize_url_encodes_params() {
        let url = authorize_url(&config(), "csrf token").unwrap();
        assert!(url.starts_with(AUTHORIZATION_URL));
        assert!(url.contains("client_id=client123"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fapp.example.com%2Fauth%2Fcallback"));
        assert!(url.contains("state=csrf+token") || url.contains("state=csrf%20token"));
        assert!(url.contains("scope=openid"));
    }

    #[test]
    fn test_token_response_parses_without_scope() {
        let raw = r#"{"access_token": "tok", "expires_in": 5183999}"#;
        let token: TokenResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(token.access_token, "tok");
        assert_eq!(token.scope, "");
    }

    #[test]
    fn test_userinfo_parses_minimal_document() {
        let raw = r#"{"sub": "abc123"}"#;
        let profile: LinkedInProfile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.sub, "abc123");
        assert_eq!(profile.name, None);
    }
}
