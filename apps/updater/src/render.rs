//! Markdown rendering of curated repository and resume data.
//!
//! Every renderer produces the body that goes *between* a marker pair;
//! merging decides where it lands. Empty inputs render an italicized
//! placeholder so the section never disappears from the document.

use crate::models::repo::RepoPresentation;
use crate::models::resume::{ResumeExperienceEntry, SkillCategory};

pub const NO_RECENT_REPOS_MESSAGE: &str = "_No repositories updated within the last month._";
pub const NO_OLDER_REPOS_MESSAGE: &str = "_No repositories older than one month found._";
pub const NO_LANGUAGE_DATA_MESSAGE: &str = "_No language data available yet._";
pub const NO_EXPERIENCE_MESSAGE: &str = "_No experience entries extracted from resume yet._";
pub const NO_SKILLS_MESSAGE: &str = "_No skills extracted from resume yet._";

/// Renders one repository as a linked title plus metadata bullets.
pub fn render_repo_block(repo: &RepoPresentation) -> String {
    format!(
        "**[{name}]({url})** - {summary}\n\
         - **Languages:** {languages}\n\
         - **Contributors:** {contributors}\n\
         - **Organization/Owner:** {owner_label}\n\
         - **Role:** {role}",
        name = repo.name,
        url = repo.url,
        summary = repo.summary,
        languages = repo.languages,
        contributors = repo.contributors,
        owner_label = repo.owner_label,
        role = repo.role.label(),
    )
}

/// Renders a list of repositories as blank-line-separated blocks, or
/// the given placeholder when the list is empty.
pub fn render_repo_section(repos: &[RepoPresentation], empty_message: &str) -> String {
    if repos.is_empty() {
        return empty_message.to_string();
    }
    repos
        .iter()
        .map(render_repo_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders aggregated language totals as percentage bullets. Percentages
/// are relative to the totals shown, formatted to one decimal place.
pub fn render_language_summary(totals: &[(String, u64)]) -> String {
    let grand_total: u64 = totals.iter().map(|(_, bytes)| bytes).sum();
    if grand_total == 0 {
        return NO_LANGUAGE_DATA_MESSAGE.to_string();
    }
    totals
        .iter()
        .map(|(language, bytes)| {
            let percent = *bytes as f64 / grand_total as f64 * 100.0;
            format!("- **{language}:** {percent:.1}%")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders experience entries as bold title lines with highlight
/// bullets underneath.
pub fn render_experience_section(entries: &[ResumeExperienceEntry]) -> String {
    if entries.is_empty() {
        return NO_EXPERIENCE_MESSAGE.to_string();
    }
    entries
        .iter()
        .map(|entry| {
            let mut block = format!("**{}**", entry.title_line);
            for highlight in &entry.highlights {
                block.push_str("\n- ");
                block.push_str(highlight);
            }
            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders skill categories as one bullet per category.
pub fn render_skills_section(categories: &[SkillCategory]) -> String {
    if categories.is_empty() {
        return NO_SKILLS_MESSAGE.to_string();
    }
    categories
        .iter()
        .map(|category| format!("- **{}:** {}", category.name, category.items.join(", ")))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::repo::Role;

    fn make_presentation(name: &str) -> RepoPresentation {
        RepoPresentation {
            name: name.to_string(),
            url: format!("https://github.com/someone/{name}"),
            summary: "A small tool that does one thing well.".to_string(),
            languages: "Rust, Shell".to_string(),
            contributors: 2,
            owner_label: "Owner (someone)".to_string(),
            role: Role::Owner,
        }
    }

    #[test]
    fn test_repo_block_layout() {
        let block = render_repo_block(&make_presentation("widget"));
        let expected = "\
**[widget](https://github.com/someone/widget)** - A small tool that does one thing well.
- **Languages:** Rust, Shell
- **Contributors:** 2
- **Organization/Owner:** Owner (someone)
- **Role:** Owner";
        assert_eq!(block, expected);
    }

    #[test]
    fn test_repo_block_collaborator_role_label() {
        let mut repo = make_presentation("widget");
        repo.role = Role::Collaborator;
        assert!(render_repo_block(&repo).ends_with("- **Role:** Contributor/Collaborator"));
    }

    #[test]
    fn test_repo_section_joins_with_blank_line() {
        let section = render_repo_section(
            &[make_presentation("a"), make_presentation("b")],
            NO_RECENT_REPOS_MESSAGE,
        );
        assert!(section.contains("- **Role:** Owner\n\n**[b]"));
    }

    #[test]
    fn test_repo_section_empty_placeholder() {
        assert_eq!(
            render_repo_section(&[], NO_RECENT_REPOS_MESSAGE),
            NO_RECENT_REPOS_MESSAGE
        );
        assert_eq!(
            render_repo_section(&[], NO_OLDER_REPOS_MESSAGE),
            NO_OLDER_REPOS_MESSAGE
        );
    }

    #[test]
    fn test_language_summary_percentages() {
        let totals = vec![("Rust".to_string(), 750), ("Shell".to_string(), 250)];
        assert_eq!(
            render_language_summary(&totals),
            "- **Rust:** 75.0%\n- **Shell:** 25.0%"
        );
    }

    #[test]
    fn test_language_summary_empty() {
        assert_eq!(render_language_summary(&[]), NO_LANGUAGE_DATA_MESSAGE);
    }

    #[test]
    fn test_experience_section_layout() {
        let entries = vec![ResumeExperienceEntry {
            title_line: "Acme Corp — Engineer — Jan 2020 – Present".to_string(),
            highlights: vec!["Built a data pipeline used across teams.".to_string()],
        }];
        assert_eq!(
            render_experience_section(&entries),
            "**Acme Corp — Engineer — Jan 2020 – Present**\n- Built a data pipeline used across teams."
        );
    }

    #[test]
    fn test_experience_section_empty() {
        assert_eq!(render_experience_section(&[]), NO_EXPERIENCE_MESSAGE);
    }

    #[test]
    fn test_skills_section_layout() {
        let categories = vec![
            SkillCategory {
                name: "Languages".to_string(),
                items: vec!["Rust".to_string(), "Go".to_string()],
            },
            SkillCategory {
                name: "Tools".to_string(),
                items: vec!["Git".to_string()],
            },
        ];
        assert_eq!(
            render_skills_section(&categories),
            "- **Languages:** Rust, Go\n- **Tools:** Git"
        );
    }

    #[test]
    fn test_skills_section_empty() {
        assert_eq!(render_skills_section(&[]), NO_SKILLS_MESSAGE);
    }
}
