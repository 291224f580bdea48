//! GitHub REST wrapper. Profile and repository pages are fetched
//! concurrently and folded into one signal block for the comparison and
//! recommendation views. Single-shot calls, no retries.

use std::collections::HashMap;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const GITHUB_API: &str = "https://api.github.com";
/// GitHub rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("laurel-api/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct GithubUser {
    login: String,
    name: Option<String>,
    followers: u32,
    public_repos: u32,
    bio: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GithubRepo {
    stargazers_count: u32,
    forks_count: u32,
    language: Option<String>,
    fork: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct GithubSignals {
    pub username: String,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub followers: u32,
    pub public_repos: u32,
    pub original_repos: usize,
    pub total_stars: u32,
    pub total_forks: u32,
    pub top_languages: Vec<String>,
}

pub async fn fetch_signals(
    http: &Client,
    token: Option<&str>,
    username: &str,
) -> Result<GithubSignals, AppError> {
    let user_url = format!("{GITHUB_API}/users/{username}");
    let repos_url = format!("{GITHUB_API}/users/{username}/repos?per_page=100&sort=updated");

    let (user, repos) = tokio::try_join!(
        get_json::<GithubUser>(http, token, &user_url, username),
        get_json::<Vec<GithubRepo>>(http, token, &repos_url, username),
    )?;

    let originals: Vec<&GithubRepo> = repos.iter().filter(|r| !r.fork).collect();

    let mut language_counts: HashMap<&str, usize> = HashMap::new();
    for repo in &originals {
        if let Some(lang) = repo.language.as_deref() {
            *language_counts.entry(lang).or_default() += 1;
        }
    }
    let mut languages: Vec<(&str, usize)> = language_counts.into_iter().collect();
    languages.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    Ok(GithubSignals {
        username: user.login,
        display_name: user.name,
        bio: user.bio,
        followers: user.followers,
        public_repos: user.public_repos,
        original_repos: originals.len(),
        total_stars: originals.iter().map(|r| r.stargazers_count).sum(),
        total_forks: originals.iter().map(|r| r.forks_count).sum(),
        top_languages: languages
            .into_iter()
            .take(3)
            .map(|(lang, _)| lang.to_string())
            .collect(),
    })
}

async fn get_json<T: serde::de::DeserializeOwned>(
    http: &Client,
    token: Option<&str>,
    url: &str,
    username: &str,
) -> Result<T, AppError> {
    let mut request = http
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", "application/vnd.github+json");
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }

    let response = request
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("GitHub request failed: {e}")))?;

    match response.status() {
        StatusCode::NOT_FOUND => Err(AppError::NotFound(format!(
            "GitHub user '{username}' not found"
        ))),
        // Unauthenticated rate limits surface as 403 with a rate-limit body.
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS => {
            Err(AppError::RateLimited("GitHub".to_string()))
        }
        status if !status.is_success() => Err(AppError::Upstream(format!(
            "GitHub returned status {status}"
        ))),
        _ => response
            .json::<T>()
            .await
            .map_err(|e| AppError::Upstream(format!("GitHub response parse failed: {e}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_shape_deserializes_from_api_payload() {
        let raw = r#"[
            {"stargazers_count": 12, "forks_count": 3, "language": "Rust", "fork": false},
            {"stargazers_count": 99, "forks_count": 1, "language": "Rust", "fork": true},
            {"stargazers_count": 5, "forks_count": 0, "language": null, "fork": false}
        ]"#;
        let repos: Vec<GithubRepo> = serde_json::from_str(raw).unwrap();
        assert_eq!(repos.len(), 3);
        assert!(repos[1].fork);
        assert_eq!(repos[2].language, None);
    }

    #[test]
    fn test_user_shape_tolerates_null_optionals() {
        let raw = r#"{"login": "octocat", "name": null, "followers": 10, "public_repos": 2, "bio": null}"#;
        let user: GithubUser = serde_json::from_str(raw).unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(user.name, None);
    }
}
