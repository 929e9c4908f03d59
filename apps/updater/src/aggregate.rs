//! Repository aggregation: filtering, deduplication, recency sorting,
//! time-bucket partitioning, and language byte totals.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::models::repo::{LanguageUsage, RepoRecord};

/// Drops ignored repos, excluded private repos, and the bare
/// profile-README repo heuristic: a repo named after its owner with no
/// stars, no forks, no description, and a size under `min_profile_size`.
pub fn filter_repos(
    records: Vec<RepoRecord>,
    ignored_names: &HashSet<String>,
    excluded_private_names: &HashSet<String>,
    owner_username: &str,
    min_profile_size: u64,
) -> Vec<RepoRecord> {
    records
        .into_iter()
        .filter(|repo| {
            let key = repo.name.trim().to_lowercase();
            if ignored_names.contains(&key) {
                debug!("Skipping ignored repo: {}", repo.name);
                return false;
            }
            if repo.private && excluded_private_names.contains(&key) {
                debug!("Skipping excluded private repo: {}", repo.name);
                return false;
            }
            let bare_profile_repo = repo.name == owner_username
                && repo.stargazers_count == 0
                && repo.forks_count == 0
                && repo
                    .description
                    .as_deref()
                    .map(str::trim)
                    .unwrap_or_default()
                    .is_empty()
                && repo.size < min_profile_size;
            if bare_profile_repo {
                debug!("Skipping minimal profile repo: {}", repo.name);
                return false;
            }
            true
        })
        .collect()
}

/// Deduplicates by case-insensitive name, keeping the record with the
/// lexicographically greatest `pushed_at` (ISO-8601 strings sort
/// chronologically); ties keep the first encountered. Output order is
/// the insertion order of surviving groups. Nameless records are dropped.
pub fn deduplicate(records: Vec<RepoRecord>) -> Vec<RepoRecord> {
    let mut kept: Vec<RepoRecord> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for repo in records {
        let key = repo.name.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        match index_by_name.get(&key) {
            Some(&index) => {
                if repo.pushed_at > kept[index].pushed_at {
                    kept[index] = repo;
                }
            }
            None => {
                index_by_name.insert(key, kept.len());
                kept.push(repo);
            }
        }
    }

    kept
}

/// Stable sort by `pushed_at` descending (most recent first).
pub fn sort_by_recency(mut records: Vec<RepoRecord>) -> Vec<RepoRecord> {
    records.sort_by(|a, b| b.pushed_at.cmp(&a.pushed_at));
    records
}

/// Splits records into (current, past) around a cutoff timestamp.
/// `current` holds records with `pushed_at >= cutoff`; order within
/// each bucket is preserved from the input.
pub fn partition_by_cutoff(
    records: Vec<RepoRecord>,
    cutoff: &str,
) -> (Vec<RepoRecord>, Vec<RepoRecord>) {
    records
        .into_iter()
        .partition(|repo| repo.pushed_at.as_str() >= cutoff)
}

/// Sums language byte counts across repositories, skipping empty names
/// and ignored languages (case-insensitive), and returns the top `top_n`
/// ranked by total descending; ties keep first-seen order.
pub fn aggregate_language_totals(
    usages: &[LanguageUsage],
    ignored_languages: &HashSet<String>,
    top_n: usize,
) -> Vec<(String, u64)> {
    let mut totals: Vec<(String, u64)> = Vec::new();
    let mut index_by_name: HashMap<String, usize> = HashMap::new();

    for usage in usages {
        for (language, byte_count) in usage {
            if language.is_empty() {
                continue;
            }
            if ignored_languages.contains(&language.trim().to_lowercase()) {
                continue;
            }
            match index_by_name.get(language) {
                Some(&index) => totals[index].1 += byte_count,
                None => {
                    index_by_name.insert(language.clone(), totals.len());
                    totals.push((language.clone(), *byte_count));
                }
            }
        }
    }

    totals.sort_by(|a, b| b.1.cmp(&a.1));
    totals.truncate(top_n);
    totals
}
