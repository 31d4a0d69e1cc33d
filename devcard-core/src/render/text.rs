//! Plain-text DevCard for terminals

use std::fmt::Write;

use crate::config::CardConfig;
use crate::models::DevCard;

use super::{contributions_label, joined_label, percent_label, NOT_AVAILABLE};

const WIDTH: usize = 60;
const BAR_WIDTH: usize = 30;

/// Render the card as plain text
pub fn card(card: &DevCard, config: &CardConfig) -> String {
    let profile = &card.profile;
    let mut out = String::new();
    let rule = "─".repeat(WIDTH);

    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(
        out,
        "{} (@{})",
        printable(profile.display_name()),
        printable(&profile.login)
    );
    if let Some(bio) = profile.bio.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
        let _ = writeln!(out, "{}", truncate(bio, WIDTH));
    }
    let _ = writeln!(out, "{}", rule);

    row(&mut out, "Repos", &profile.public_repos.to_string());
    row(&mut out, "Contributions", &contributions_label(card));
    row(&mut out, "Location", profile.location().unwrap_or(NOT_AVAILABLE));
    row(
        &mut out,
        "Followers",
        &format!("{} · {} following", profile.followers, profile.following),
    );
    if let Some(company) = profile.company() {
        row(&mut out, "Company", company);
    }
    if let Some(email) = profile.email() {
        row(&mut out, "Email", email);
    }
    if let Some(handle) = profile.twitter_handle() {
        row(&mut out, "Twitter", &format!("@{}", handle));
    }
    if let Some(website) = profile.website() {
        row(&mut out, "Website", &website);
    }
    if let Some(ref linkedin) = card.linkedin {
        row(&mut out, "LinkedIn", linkedin);
    }
    row(&mut out, "Joined", &joined_label(card));

    let _ = writeln!(out);
    let _ = writeln!(out, "Top Languages");
    if card.languages.is_empty() {
        let _ = writeln!(out, "  (no language data)");
    }
    for share in card.languages.iter().take(config.shown_languages) {
        let filled = ((share.percent / 100.0) * BAR_WIDTH as f64).round() as usize;
        let _ = writeln!(
            out,
            "  {:<14} {}{} {:>4}",
            truncate(&share.name, 14),
            "█".repeat(filled.min(BAR_WIDTH)),
            "░".repeat(BAR_WIDTH - filled.min(BAR_WIDTH)),
            percent_label(share.percent)
        );
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "Top Repositories");
    if card.repositories.is_empty() {
        let _ = writeln!(out, "  (no repositories)");
    }
    for repo in card.repositories.iter().take(config.featured_repos) {
        let _ = writeln!(
            out,
            "  {}  ★ {}  ⑂ {}",
            printable(&repo.name),
            repo.stars,
            repo.forks
        );
        if let Some(description) = repo.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = writeln!(out, "    {}", truncate(description, WIDTH - 4));
        }
    }
    let _ = writeln!(out, "{}", rule);
    out
}

/// Placeholder printed while a fetch is in flight
pub fn skeleton(username: &str) -> String {
    let rule = "─".repeat(WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "{}", rule);
    let _ = writeln!(out, "Fetching @{} ...", username);
    for _ in 0..3 {
        let _ = writeln!(out, "{}", "░".repeat(BAR_WIDTH));
    }
    let _ = writeln!(out, "{}", rule);
    out
}

/// Error panel
pub fn error_panel(message: &str) -> String {
    format!("Error! {}\n", message)
}

fn row(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {:<14} {}", format!("{}:", label), printable(value));
}

/// Drop control characters so profile text cannot emit terminal escapes
fn printable(value: &str) -> String {
    value.chars().filter(|c| !c.is_control()).collect()
}

fn truncate(value: &str, max: usize) -> String {
    let value = printable(value);
    if value.chars().count() <= max {
        return value;
    }
    let kept: String = value.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{card as card_fixture, repo};

    #[test]
    fn test_text_placeholders() {
        let text = card(&card_fixture("octocat"), &CardConfig::default());
        assert!(text.contains("octocat (@octocat)"));
        assert!(text.contains("Contributions: N/A"));
        assert!(text.contains("Location:      N/A"));
        assert!(text.contains("(no language data)"));
        assert!(text.contains("(no repositories)"));
        assert!(!text.contains("Email:"));
    }

    #[test]
    fn test_text_languages_and_repos() {
        let mut data = card_fixture("octocat");
        data.contributions = Some(99);
        data.languages = crate::languages::top_languages(
            vec![[("Rust".to_string(), 3u64), ("Go".to_string(), 1)]
                .into_iter()
                .collect()],
            5,
        );
        data.repositories = vec![repo("devcard", 7)];

        let text = card(&data, &CardConfig::default());
        assert!(text.contains("Contributions: 99"));
        assert!(text.contains("75%"));
        assert!(text.contains("25%"));
        assert!(text.contains("devcard  ★ 7  ⑂ 3"));
    }

    #[test]
    fn test_text_strips_control_characters() {
        let mut data = card_fixture("octocat");
        data.profile.name = Some("\u{1b}[31mOcto\u{7}".to_string());
        data.profile.bio = Some("line one\nline two\u{1b}[2J".to_string());
        data.profile.company = Some("\u{1b}]0;pwned\u{7}GitHub".to_string());
        let mut repo_data = repo("devcard", 1);
        repo_data.description = Some("desc\u{1b}[0m".to_string());
        data.repositories = vec![repo_data];

        let text = card(&data, &CardConfig::default());
        assert!(!text.contains('\u{1b}'));
        assert!(!text.contains('\u{7}'));
        assert!(text.contains("[31mOcto (@octocat)"));
        assert!(text.contains("line oneline two[2J"));
        assert!(text.contains("]0;pwnedGitHub"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
