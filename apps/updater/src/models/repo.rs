use serde::{Deserialize, Serialize};

/// Repository owner as reported by the GitHub REST API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoOwner {
    #[serde(default)]
    pub login: String,
    /// "User" or "Organization".
    #[serde(rename = "type", default = "default_owner_kind")]
    pub kind: String,
}

impl Default for RepoOwner {
    fn default() -> Self {
        Self {
            login: String::new(),
            kind: default_owner_kind(),
        }
    }
}

fn default_owner_kind() -> String {
    "User".to_string()
}

/// Source metadata describing one repository, deserialized straight
/// from the GitHub REST shape. Every field beyond `id` and `name` has a
/// documented default so a sparse payload is a typed contract rather
/// than an implicit attribute lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub owner: RepoOwner,
    #[serde(default)]
    pub description: Option<String>,
    /// ISO-8601 timestamp; lexicographic order is chronological order.
    #[serde(default)]
    pub pushed_at: String,
    /// Repository size in KB.
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub html_url: String,
    #[serde(default)]
    pub languages_url: String,
    /// Primary language, used as the languages fallback.
    #[serde(default)]
    pub language: Option<String>,
}

/// Ranked byte-count breakdown of languages detected in a repository,
/// byte-count descending.
pub type LanguageUsage = Vec<(String, u64)>;

/// The author's relationship to a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    Collaborator,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::Owner => "Owner",
            Role::Collaborator => "Contributor/Collaborator",
        }
    }
}

/// Display-ready repository data, created once per kept record and
/// discarded after rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoPresentation {
    pub name: String,
    pub url: String,
    pub summary: String,
    /// Comma-joined label string, or "Not specified".
    pub languages: String,
    pub contributors: u32,
    pub owner_label: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_record_deserializes_sparse_payload() {
        let json = r#"{"id": 7, "name": "demo"}"#;
        let repo: RepoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(repo.id, 7);
        assert_eq!(repo.name, "demo");
        assert_eq!(repo.owner.kind, "User");
        assert!(repo.description.is_none());
        assert!(!repo.private);
        assert_eq!(repo.size, 0);
    }

    #[test]
    fn test_repo_record_deserializes_github_shape() {
        let json = r#"{
            "id": 42,
            "name": "widget",
            "full_name": "acme/widget",
            "owner": {"login": "acme", "type": "Organization"},
            "description": "A widget factory.",
            "pushed_at": "2024-06-01T00:00:00Z",
            "size": 120,
            "stargazers_count": 3,
            "forks_count": 1,
            "private": false,
            "fork": false,
            "html_url": "https://github.com/acme/widget",
            "languages_url": "https://api.github.com/repos/acme/widget/languages",
            "language": "Rust"
        }"#;
        let repo: RepoRecord = serde_json::from_str(json).unwrap();
        assert_eq!(repo.owner.kind, "Organization");
        assert_eq!(repo.language.as_deref(), Some("Rust"));
        assert_eq!(repo.pushed_at, "2024-06-01T00:00:00Z");
    }

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::Owner.label(), "Owner");
        assert_eq!(Role::Collaborator.label(), "Contributor/Collaborator");
    }
}
