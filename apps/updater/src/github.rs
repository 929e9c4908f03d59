//! GitHub API collaborator: paged repo listing plus per-repo README,
//! language, and contributor enrichment.
//!
//! Derived per-repo values are memoized in an explicitly passed
//! `EnrichmentCache` so behavior is reproducible in tests without
//! global state. A cache miss is indistinguishable from "no data":
//! every failure path degrades to an empty result, never a retry.

use std::collections::HashMap;
use std::sync::LazyLock;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use regex::Regex;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::repo::{LanguageUsage, RepoRecord};

const API_BASE_URL: &str = "https://api.github.com";
const ACCEPT_HEADER: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("profile-updater/", env!("CARGO_PKG_VERSION"));
const REPOS_PER_PAGE: u32 = 100;
const MAX_REPO_PAGES: u32 = 10;
const README_MAX_LINES: usize = 30;
const LANGUAGE_FALLBACK_BYTES: u64 = 1;

/// README lines that are headings, badges, or images carry no prose
/// worth curating.
const README_SKIP_PREFIXES: &[&str] = &["#", "![", "[![", "<img", "<p align"];

static LINK_LAST_PAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[?&]page=(\d+)>;\s*rel="last""#).expect("static pattern"));

/// Memoized per-repository derivations, keyed by repo id.
#[derive(Debug, Default)]
pub struct EnrichmentCache {
    languages: HashMap<u64, LanguageUsage>,
    contributors: HashMap<u64, u32>,
}

pub struct GitHubClient {
    http: reqwest::Client,
    username: String,
    token: Option<String>,
}

impl GitHubClient {
    pub fn new(username: String, token: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            username,
            token,
        }
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .get(url)
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .header(reqwest::header::USER_AGENT, USER_AGENT);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Fetches all accessible repositories, paging until an empty page
    /// or the page cap. With a token the authenticated endpoint returns
    /// private repos too; without one only public repos are listed.
    pub async fn fetch_repos(&self) -> Result<Vec<RepoRecord>, AppError> {
        let base_url = if self.token.is_some() {
            info!("Using authenticated /user/repos endpoint");
            format!("{API_BASE_URL}/user/repos")
        } else {
            info!("Using public-only /users/{}/repos endpoint", self.username);
            format!("{API_BASE_URL}/users/{}/repos", self.username)
        };

        let mut repos = Vec::new();
        for page in 1..=MAX_REPO_PAGES {
            let mut url = format!(
                "{base_url}?sort=pushed&direction=desc&per_page={REPOS_PER_PAGE}&page={page}"
            );
            if self.token.is_none() {
                url.push_str("&type=public");
            }

            let response = self.request(&url).send().await?.error_for_status()?;
            let batch: Vec<RepoRecord> = response.json().await?;
            if batch.is_empty() {
                break;
            }
            debug!("Page {page}: found {} repositories", batch.len());
            repos.extend(batch);
        }
        Ok(repos)
    }

    /// Fetches and condenses README prose for context text. Any failure
    /// yields an empty string.
    pub async fn fetch_readme_text(&self, full_name: &str) -> String {
        let url = format!("{API_BASE_URL}/repos/{full_name}/readme");
        let Ok(response) = self.request(&url).send().await else {
            return String::new();
        };
        if !response.status().is_success() {
            return String::new();
        }
        let Ok(payload) = response.json::<serde_json::Value>().await else {
            return String::new();
        };

        let content = payload
            .get("content")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let encoding = payload
            .get("encoding")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        if content.is_empty() || encoding != "base64" {
            return String::new();
        }

        let Ok(decoded) = BASE64.decode(content.replace(['\n', '\r'], "")) else {
            return String::new();
        };
        condense_readme(&String::from_utf8_lossy(&decoded))
    }

    /// Fetches the language byte map for a repository, memoized by repo
    /// id. Falls back to `[(primary_language, 1)]` on any miss.
    pub async fn fetch_language_usage(
        &self,
        repo: &RepoRecord,
        cache: &mut EnrichmentCache,
    ) -> LanguageUsage {
        if let Some(usage) = cache.languages.get(&repo.id) {
            return usage.clone();
        }

        let usage = self.fetch_language_usage_uncached(repo).await;
        cache.languages.insert(repo.id, usage.clone());
        usage
    }

    async fn fetch_language_usage_uncached(&self, repo: &RepoRecord) -> LanguageUsage {
        if repo.languages_url.is_empty() {
            return primary_language_fallback(repo);
        }
        let Ok(response) = self.request(&repo.languages_url).send().await else {
            return primary_language_fallback(repo);
        };
        if !response.status().is_success() {
            return primary_language_fallback(repo);
        }
        let Ok(languages) = response.json::<HashMap<String, u64>>().await else {
            return primary_language_fallback(repo);
        };
        if languages.is_empty() {
            return primary_language_fallback(repo);
        }

        let mut usage: LanguageUsage = languages.into_iter().collect();
        usage.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        usage
    }

    /// Fetches the contributor count, memoized by repo id. Uses the
    /// `Link: rel="last"` pagination header with `per_page=1` so the
    /// last page index *is* the count; falls back to body length.
    pub async fn fetch_contributor_count(
        &self,
        repo: &RepoRecord,
        cache: &mut EnrichmentCache,
    ) -> u32 {
        if let Some(&count) = cache.contributors.get(&repo.id) {
            return count;
        }

        let count = self.fetch_contributor_count_uncached(repo).await;
        cache.contributors.insert(repo.id, count);
        count
    }

    async fn fetch_contributor_count_uncached(&self, repo: &RepoRecord) -> u32 {
        if repo.full_name.is_empty() {
            return 0;
        }
        let url = format!(
            "{API_BASE_URL}/repos/{}/contributors?per_page=1&anon=true",
            repo.full_name
        );
        let Ok(response) = self.request(&url).send().await else {
            return 0;
        };
        if !response.status().is_success() {
            return 0;
        }

        let link_header = response
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let last_page = parse_last_page_from_link_header(&link_header);
        if last_page > 0 {
            return last_page;
        }

        match response.json::<serde_json::Value>().await {
            Ok(serde_json::Value::Array(items)) => items.len() as u32,
            _ => 0,
        }
    }
}

/// Keeps the first prose lines of a README, skipping headings, badges,
/// and images, and joins them into one context string.
pub fn condense_readme(decoded: &str) -> String {
    let mut kept = Vec::new();
    for line in decoded.lines() {
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }
        if README_SKIP_PREFIXES
            .iter()
            .any(|prefix| stripped.starts_with(prefix))
        {
            continue;
        }
        kept.push(stripped);
        if kept.len() >= README_MAX_LINES {
            break;
        }
    }
    kept.join(" ")
}

fn primary_language_fallback(repo: &RepoRecord) -> LanguageUsage {
    match &repo.language {
        Some(primary) if !primary.is_empty() => {
            vec![(primary.clone(), LANGUAGE_FALLBACK_BYTES)]
        }
        _ => Vec::new(),
    }
}

/// Parses the last page index out of a GitHub `Link` header; zero when
/// the header has no last-page reference.
fn parse_last_page_from_link_header(link_header: &str) -> u32 {
    LINK_LAST_PAGE_RE
        .captures(link_header)
        .and_then(|captures| captures[1].parse().ok())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_link_header_with_last_page() {
        let header = r#"<https://api.github.com/repositories/1/contributors?per_page=1&anon=true&page=2>; rel="next", <https://api.github.com/repositories/1/contributors?per_page=1&anon=true&page=57>; rel="last""#;
        assert_eq!(parse_last_page_from_link_header(header), 57);
    }

    #[test]
    fn test_parse_link_header_without_last() {
        assert_eq!(parse_last_page_from_link_header(""), 0);
        assert_eq!(
            parse_last_page_from_link_header(r#"<https://x>; rel="next""#),
            0
        );
    }

    #[test]
    fn test_condense_readme_skips_headings_and_badges() {
        let readme = "\
# Title
[![CI](https://ci.example/badge.svg)](https://ci.example)
![logo](logo.png)
<img src=\"banner.png\">
<p align=\"center\">centered</p>

Real prose line one.
Real prose line two.";
        assert_eq!(
            condense_readme(readme),
            "Real prose line one. Real prose line two."
        );
    }

    #[test]
    fn test_condense_readme_caps_line_count() {
        let many_lines = (0..100)
            .map(|i| format!("line number {i} with words"))
            .collect::<Vec<_>>()
            .join("\n");
        let condensed = condense_readme(&many_lines);
        assert_eq!(condensed.matches("line number").count(), README_MAX_LINES);
    }

    #[test]
    fn test_condense_readme_empty() {
        assert_eq!(condense_readme(""), "");
    }

    #[test]
    fn test_primary_language_fallback() {
        let repo: RepoRecord = serde_json::from_value(serde_json::json!({
            "id": 1, "name": "x", "language": "Rust",
        }))
        .unwrap();
        assert_eq!(
            primary_language_fallback(&repo),
            vec![("Rust".to_string(), 1)]
        );

        let bare: RepoRecord =
            serde_json::from_value(serde_json::json!({"id": 2, "name": "y"})).unwrap();
        assert!(primary_language_fallback(&bare).is_empty());
    }
}
