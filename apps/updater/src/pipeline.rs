//! End-to-end README update: fetch, curate, aggregate, render, merge.

use chrono::{Duration, Utc};
use tracing::{debug, info};

use crate::aggregate::{
    aggregate_language_totals, deduplicate, filter_repos, partition_by_cutoff, sort_by_recency,
};
use crate::config::{
    load_description_overrides, load_ignored_names, Config, CURRENT_PROJECTS_MARKERS,
    LANGUAGE_SUMMARY_MARKERS, MIN_PROFILE_REPO_SIZE, PAST_PROJECTS_MARKERS,
    RESUME_EXPERIENCE_MARKERS, RESUME_SKILLS_MARKERS,
};
use crate::curation::{clean_text, select_description, select_languages};
use crate::errors::AppError;
use crate::github::{EnrichmentCache, GitHubClient};
use crate::merge::{remove_duplicate_sections, replace_section};
use crate::models::repo::{LanguageUsage, RepoPresentation, RepoRecord, Role};
use crate::render::{
    render_experience_section, render_language_summary, render_repo_section,
    render_skills_section, NO_OLDER_REPOS_MESSAGE, NO_RECENT_REPOS_MESSAGE,
};
use crate::resume::extract::load_resume_snapshot;

/// Runs one full update pass over the README named by `config`.
pub async fn run_update(config: &Config) -> Result<(), AppError> {
    let overrides = load_description_overrides(&config.overrides_path());
    let ignored_repos = load_ignored_names(&config.ignored_repos_path());
    let ignored_languages = load_ignored_names(&config.ignored_languages_path());
    debug!(
        "Loaded {} overrides, {} ignored repos, {} ignored languages",
        overrides.len(),
        ignored_repos.len(),
        ignored_languages.len()
    );

    let client = GitHubClient::new(config.github_username.clone(), config.github_token.clone());
    let mut cache = EnrichmentCache::default();

    let fetched = client.fetch_repos().await?;
    info!("Fetched {} repositories", fetched.len());

    let kept = filter_repos(
        fetched,
        &ignored_repos,
        &config.excluded_private_repos,
        &config.github_username,
        MIN_PROFILE_REPO_SIZE,
    );
    let kept = sort_by_recency(deduplicate(kept));
    info!("{} repositories after filtering and dedup", kept.len());

    let cutoff = (Utc::now() - Duration::days(config.recent_days))
        .format("%Y-%m-%dT%H:%M:%SZ")
        .to_string();
    let (recent, older) = partition_by_cutoff(kept, &cutoff);
    info!(
        "{} recent, {} older (cutoff {})",
        recent.len(),
        older.len(),
        cutoff
    );

    let mut language_usages: Vec<LanguageUsage> = Vec::new();
    let mut present_all = Vec::with_capacity(recent.len() + older.len());
    for repo in recent.iter().chain(older.iter()) {
        let (presentation, usage) =
            present_repo(&client, &mut cache, config, repo, &overrides).await;
        language_usages.push(usage);
        present_all.push(presentation);
    }
    let (recent_presentations, older_presentations) = present_all.split_at(recent.len());

    let language_totals = aggregate_language_totals(
        &language_usages,
        &ignored_languages,
        config.language_summary_top,
    );

    let snapshot = load_resume_snapshot(&config.resume_path);
    info!(
        "Resume snapshot: {} experiences, {} skill categories",
        snapshot.experiences.len(),
        snapshot.skills.len()
    );

    let document = std::fs::read_to_string(&config.readme_path)?;

    let mut updated = remove_duplicate_sections(
        &document,
        &[
            LANGUAGE_SUMMARY_MARKERS.start,
            CURRENT_PROJECTS_MARKERS.start,
            PAST_PROJECTS_MARKERS.start,
            RESUME_EXPERIENCE_MARKERS.start,
            RESUME_SKILLS_MARKERS.start,
        ],
    );
    updated = replace_section(
        &updated,
        LANGUAGE_SUMMARY_MARKERS.start,
        LANGUAGE_SUMMARY_MARKERS.end,
        &render_language_summary(&language_totals),
    );
    updated = replace_section(
        &updated,
        CURRENT_PROJECTS_MARKERS.start,
        CURRENT_PROJECTS_MARKERS.end,
        &render_repo_section(recent_presentations, NO_RECENT_REPOS_MESSAGE),
    );
    updated = replace_section(
        &updated,
        PAST_PROJECTS_MARKERS.start,
        PAST_PROJECTS_MARKERS.end,
        &render_repo_section(older_presentations, NO_OLDER_REPOS_MESSAGE),
    );
    updated = replace_section(
        &updated,
        RESUME_EXPERIENCE_MARKERS.start,
        RESUME_EXPERIENCE_MARKERS.end,
        &render_experience_section(&snapshot.experiences),
    );
    updated = replace_section(
        &updated,
        RESUME_SKILLS_MARKERS.start,
        RESUME_SKILLS_MARKERS.end,
        &render_skills_section(&snapshot.skills),
    );

    if updated == document {
        info!("README already up to date");
    } else {
        std::fs::write(&config.readme_path, &updated)?;
        info!("Wrote updated README to {}", config.readme_path.display());
    }
    Ok(())
}

/// Curates one repository into display form, returning its language
/// usage alongside so the summary can aggregate it.
async fn present_repo(
    client: &GitHubClient,
    cache: &mut EnrichmentCache,
    config: &Config,
    repo: &RepoRecord,
    overrides: &std::collections::HashMap<String, String>,
) -> (RepoPresentation, LanguageUsage) {
    let readme_text = client.fetch_readme_text(&repo.full_name).await;
    let context = clean_text(&format!(
        "{} {}",
        repo.description.as_deref().unwrap_or_default(),
        readme_text
    ));

    let summary = select_description(repo, &context, overrides);
    let usage = client.fetch_language_usage(repo, cache).await;
    let languages = select_languages(&usage, &context, config.uses_cap);
    let contributors = client.fetch_contributor_count(repo, cache).await;

    let owner_label = if repo.owner.kind.eq_ignore_ascii_case("organization") {
        format!("Organization ({})", repo.owner.login)
    } else {
        format!("Owner ({})", repo.owner.login)
    };
    let role = if repo
        .owner
        .login
        .eq_ignore_ascii_case(&config.github_username)
    {
        Role::Owner
    } else {
        Role::Collaborator
    };

    debug!("Curated {}: {}", repo.name, summary);
    (
        RepoPresentation {
            name: repo.name.clone(),
            url: repo.html_url.clone(),
            summary,
            languages,
            contributors,
            owner_label,
            role,
        },
        usage,
    )
}
