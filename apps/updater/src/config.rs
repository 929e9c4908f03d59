use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Default values for configuration parameters.
const DEFAULT_GITHUB_USERNAME: &str = "superbode";
const DEFAULT_RECENT_DAYS: i64 = 30;
const DEFAULT_USES_CAP: usize = 10;
const DEFAULT_LANGUAGE_SUMMARY_TOP: usize = 10;
const DEFAULT_README_FILENAME: &str = "README.md";
const DEFAULT_RESUME_FILENAME: &str = "resume.pdf";

/// Repositories below this size (in KB) with no stars, forks, or
/// description are treated as bare profile-README repos and skipped.
pub const MIN_PROFILE_REPO_SIZE: u64 = 50;

/// A paired sentinel delimiting one generated region of the README.
#[derive(Debug, Clone, Copy)]
pub struct MarkerPair {
    pub start: &'static str,
    pub end: &'static str,
}

pub const LANGUAGE_SUMMARY_MARKERS: MarkerPair = MarkerPair {
    start: "<!-- LANGUAGE_SUMMARY:start -->",
    end: "<!-- LANGUAGE_SUMMARY:end -->",
};
pub const CURRENT_PROJECTS_MARKERS: MarkerPair = MarkerPair {
    start: "<!-- CURRENT_PROJECTS:start -->",
    end: "<!-- CURRENT_PROJECTS:end -->",
};
pub const PAST_PROJECTS_MARKERS: MarkerPair = MarkerPair {
    start: "<!-- PAST_PROJECTS:start -->",
    end: "<!-- PAST_PROJECTS:end -->",
};
pub const RESUME_EXPERIENCE_MARKERS: MarkerPair = MarkerPair {
    start: "<!-- RESUME_EXPERIENCE:start -->",
    end: "<!-- RESUME_EXPERIENCE:end -->",
};
pub const RESUME_SKILLS_MARKERS: MarkerPair = MarkerPair {
    start: "<!-- RESUME_SKILLS:start -->",
    end: "<!-- RESUME_SKILLS:end -->",
};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub github_username: String,
    pub github_token: Option<String>,
    pub readme_path: PathBuf,
    pub resume_path: PathBuf,
    pub config_dir: PathBuf,
    pub excluded_private_repos: HashSet<String>,
    pub recent_days: i64,
    pub uses_cap: usize,
    pub language_summary_top: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let recent_days = match std::env::var("RECENT_DAYS") {
            Ok(raw) => raw
                .parse::<i64>()
                .context("RECENT_DAYS must be a whole number of days")?,
            Err(_) => DEFAULT_RECENT_DAYS,
        };

        Ok(Config {
            github_username: env_or("GITHUB_USERNAME", DEFAULT_GITHUB_USERNAME),
            github_token: std::env::var("GITHUB_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            readme_path: PathBuf::from(env_or("README_PATH", DEFAULT_README_FILENAME)),
            resume_path: PathBuf::from(env_or("RESUME_PATH", DEFAULT_RESUME_FILENAME)),
            config_dir: PathBuf::from(env_or("CONFIG_DIR", "config")),
            excluded_private_repos: parse_name_list(
                &std::env::var("EXCLUDE_PRIVATE_REPOS").unwrap_or_default(),
            ),
            recent_days,
            uses_cap: DEFAULT_USES_CAP,
            language_summary_top: DEFAULT_LANGUAGE_SUMMARY_TOP,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn overrides_path(&self) -> PathBuf {
        self.config_dir.join("repo_description_overrides.json")
    }

    pub fn ignored_repos_path(&self) -> PathBuf {
        self.config_dir.join("repo_ignore_list.json")
    }

    pub fn ignored_languages_path(&self) -> PathBuf {
        self.config_dir.join("language_ignore_list.json")
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parses a comma-separated list into lowercased names.
pub fn parse_name_list(raw: &str) -> HashSet<String> {
    raw.split(',')
        .map(|item| item.trim().to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}

/// Loads the repository description override map.
///
/// Keys are lowercased for case-insensitive matching. A missing file or
/// one that is not a string-to-string object degrades to an empty map.
pub fn load_description_overrides(path: &Path) -> HashMap<String, String> {
    let Some(value) = load_json(path) else {
        return HashMap::new();
    };
    let Some(object) = value.as_object() else {
        return HashMap::new();
    };
    object
        .iter()
        .filter_map(|(key, value)| {
            let text = value.as_str()?.trim();
            if text.is_empty() {
                return None;
            }
            Some((key.trim().to_lowercase(), text.to_string()))
        })
        .collect()
}

/// Loads a JSON array of names as a lowercased set.
///
/// Used for both the repo ignore list and the language ignore list; any
/// malformed input degrades to an empty set.
pub fn load_ignored_names(path: &Path) -> HashSet<String> {
    let Some(value) = load_json(path) else {
        return HashSet::new();
    };
    let Some(items) = value.as_array() else {
        return HashSet::new();
    };
    items
        .iter()
        .filter_map(|item| {
            let name = item.as_str()?.trim();
            if name.is_empty() {
                return None;
            }
            Some(name.to_lowercase())
        })
        .collect()
}

fn load_json(path: &Path) -> Option<serde_json::Value> {
    let raw = std::fs::read_to_string(path).ok()?;
    serde_json::from_str(&raw).ok()
}
