use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing; third-party credentials
/// are optional and surface as `NotConfigured` when a handler needs them.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub openai_api_key: Option<String>,
    pub github_token: Option<String>,
    pub serper_api_key: Option<String>,
    pub linkedin_client_id: Option<String>,
    pub linkedin_client_secret: Option<String>,
    pub linkedin_redirect_uri: Option<String>,
    pub enable_llm_analysis: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            openai_api_key: optional_env("OPENAI_API_KEY"),
            github_token: optional_env("GITHUB_TOKEN"),
            serper_api_key: optional_env("SERPER_API_KEY"),
            linkedin_client_id: optional_env("LINKEDIN_CLIENT_ID"),
            linkedin_client_secret: optional_env("LINKEDIN_CLIENT_SECRET"),
            linkedin_redirect_uri: optional_env("LINKEDIN_REDIRECT_URI"),
            enable_llm_analysis: std::env::var("ENABLE_LLM_ANALYSIS")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Empty strings count as unset so a blank line in .env does not masquerade
/// as a configured credential.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
