//! HTML fragments for the DevCard page

use std::fmt::Write;

use crate::config::CardConfig;
use crate::languages::language_color;
use crate::models::{DevCard, LanguageShare, RepoSummary};
use crate::page::{PageState, ProfileForm};

use super::{contributions_label, joined_label, percent_label, NOT_AVAILABLE};

const STYLE: &str = r#"
body { font-family: system-ui, -apple-system, "Segoe UI", sans-serif; background: #f3f4f6; margin: 0; }
.devcard-page { width: 700px; margin: 40px auto; }
.devcard-form { display: flex; background: #fff; border-radius: 8px; box-shadow: 0 1px 2px rgba(0,0,0,.08); overflow: hidden; margin-bottom: 16px; }
.devcard-form input { flex-grow: 1; padding: 8px; border: none; font-size: 14px; }
.devcard-form input:focus { outline: none; }
.devcard-form button { background: #2563eb; color: #fff; border: none; padding: 8px 16px; cursor: pointer; }
.devcard-form button:hover { background: #1d4ed8; }
.card { position: relative; width: 700px; height: 400px; box-sizing: border-box; display: flex; padding: 16px; border-radius: 12px; overflow: hidden; background: linear-gradient(to bottom right, #dbeafe, #f3e8ff); box-shadow: 0 10px 15px rgba(0,0,0,.1); }
.card-left { width: 33%; padding-right: 16px; border-right: 1px solid #e5e7eb; }
.card-right { width: 67%; padding-left: 16px; display: flex; flex-direction: column; }
.card-section { flex: 1; }
.identity { display: flex; align-items: center; margin-bottom: 16px; }
.avatar { width: 64px; height: 64px; border-radius: 50%; border: 2px solid #fff; box-shadow: 0 1px 2px rgba(0,0,0,.1); display: flex; align-items: center; justify-content: center; background: #c7d2fe; font-weight: 700; color: #3730a3; overflow: hidden; }
.avatar img { width: 100%; height: 100%; }
.identity-text { margin-left: 12px; min-width: 0; }
.identity-text h2 { margin: 0; font-size: 18px; color: #1f2937; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }
.identity-text p { margin: 0; font-size: 14px; color: #4b5563; }
.detail { display: flex; gap: 6px; font-size: 13px; margin-bottom: 8px; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }
.detail-label { font-weight: 500; color: #374151; }
.detail-value { color: #4b5563; overflow: hidden; text-overflow: ellipsis; }
.card a { color: #2563eb; text-decoration: none; }
.card a:hover { text-decoration: underline; }
h3 { font-size: 14px; font-weight: 600; color: #1f2937; margin: 0 0 8px; }
.language-bar { display: flex; height: 10px; border-radius: 9999px; overflow: hidden; background: #e5e7eb; margin-bottom: 8px; }
.language-row { display: flex; justify-content: space-between; font-size: 12px; margin-bottom: 6px; }
.language-name { color: #374151; display: flex; align-items: center; gap: 6px; }
.language-dot { width: 10px; height: 10px; border-radius: 50%; display: inline-block; }
.language-percent { color: #6b7280; }
.repo { display: block; background: #fff; border-radius: 6px; padding: 8px; margin-bottom: 8px; box-shadow: 0 1px 2px rgba(0,0,0,.06); }
.repo-head { display: flex; justify-content: space-between; align-items: center; }
.repo-name { font-size: 14px; font-weight: 500; color: #2563eb; margin: 0; }
.repo-stats { font-size: 12px; color: #6b7280; display: flex; gap: 8px; }
.repo-description { font-size: 12px; color: #4b5563; margin: 4px 0 0; white-space: nowrap; overflow: hidden; text-overflow: ellipsis; }
.empty { font-size: 12px; color: #9ca3af; }
.badge { position: absolute; bottom: 8px; left: 8px; background: #fff; border-radius: 9999px; padding: 4px 12px; font-size: 14px; font-weight: 500; color: #374151; box-shadow: 0 1px 2px rgba(0,0,0,.08); }
.skeleton-card { background: #fff; }
.skeleton { background: #e5e7eb; border-radius: 6px; margin-bottom: 8px; animation: pulse 1.5s ease-in-out infinite; }
@keyframes pulse { 50% { opacity: .5; } }
.error-wrap { width: 700px; height: 400px; display: flex; align-items: center; justify-content: center; }
.error { background: #fee2e2; border: 1px solid #f87171; color: #b91c1c; padding: 12px 16px; border-radius: 6px; font-size: 14px; }
"#;

/// Escape text for use in HTML content and attribute values
pub fn escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// Wrap `body` in a complete HTML document with the card stylesheet
pub fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{}</title>\n<style>{}</style>\n</head>\n<body>\n<main class=\"devcard-page\">\n{}\n</main>\n</body>\n</html>\n",
        escape(title),
        STYLE,
        body
    )
}

/// The username form, submitting to `/` with a `username` query
pub fn form(input: &str) -> String {
    format!(
        r#"<form class="devcard-form" method="get" action="/">
<input type="text" name="username" placeholder="Enter GitHub username" value="{}" required>
<button type="submit">Fetch Profile</button>
</form>"#,
        escape(input)
    )
}

/// The section of the page matching the current state
pub fn state_section(state: &PageState, config: &CardConfig) -> String {
    match state {
        PageState::Idle => String::new(),
        PageState::Loading { .. } => skeleton(),
        PageState::Ready(card_data) => card(card_data, config),
        PageState::Failed { message } => error_panel(message),
    }
}

/// A full page for the given form state
pub fn page(form_state: &ProfileForm, config: &CardConfig) -> String {
    let body = format!(
        "{}\n<section id=\"devcard\">{}</section>",
        form(form_state.input()),
        state_section(form_state.state(), config)
    );
    document("DevCard", &body)
}

/// The error panel shown in place of the card
pub fn error_panel(message: &str) -> String {
    format!(
        r#"<div class="error-wrap"><div class="error" role="alert"><strong>Error!</strong> <span>{}</span></div></div>"#,
        escape(message)
    )
}

/// Placeholder with the card's layout, shown while loading
pub fn skeleton() -> String {
    let bar = |height: u32, width: &str| {
        format!(
            r#"<div class="skeleton" style="height:{}px;width:{}"></div>"#,
            height, width
        )
    };

    let mut out = String::from(r#"<div class="card skeleton-card" aria-busy="true"><div class="card-left"><div class="identity">"#);
    out.push_str(r#"<div class="skeleton" style="width:64px;height:64px;border-radius:50%;margin:0"></div>"#);
    out.push_str(r#"<div class="identity-text">"#);
    out.push_str(&bar(20, "128px"));
    out.push_str(&bar(16, "96px"));
    out.push_str("</div></div>");
    for _ in 0..5 {
        out.push_str(&bar(16, "100%"));
    }
    out.push_str(r#"</div><div class="card-right"><div class="card-section">"#);
    out.push_str(&bar(16, "128px"));
    for _ in 0..4 {
        out.push_str(&bar(16, "100%"));
    }
    out.push_str(r#"</div><div class="card-section">"#);
    out.push_str(&bar(16, "128px"));
    out.push_str(&bar(64, "100%"));
    out.push_str(&bar(64, "100%"));
    out.push_str("</div></div></div>");
    out
}

/// The DevCard itself
pub fn card(card: &DevCard, config: &CardConfig) -> String {
    let profile = &card.profile;
    let mut out = String::new();

    out.push_str(r#"<div class="card"><div class="card-left"><div class="identity">"#);
    let _ = write!(
        out,
        r#"<div class="avatar"><img src="{}" alt="{}" onerror="this.remove()">{}</div>"#,
        escape(&profile.avatar_url),
        escape(profile.display_name()),
        escape(&profile.initials())
    );
    let _ = write!(
        out,
        r#"<div class="identity-text"><h2>{}</h2><p>@{}</p></div></div>"#,
        escape(profile.display_name()),
        escape(&profile.login)
    );

    out.push_str(&detail("Repos", &escape(&profile.public_repos.to_string())));
    out.push_str(&detail("Contributions", &escape(&contributions_label(card))));
    out.push_str(&detail(
        "Location",
        &escape(profile.location().unwrap_or(NOT_AVAILABLE)),
    ));
    out.push_str(&detail(
        "Followers",
        &format!("{} · {} following", profile.followers, profile.following),
    ));
    if let Some(company) = profile.company() {
        out.push_str(&detail("Company", &escape(company)));
    }
    if let Some(email) = profile.email() {
        out.push_str(&detail("Email", &link(&format!("mailto:{}", email), email)));
    }
    if let (Some(handle), Some(url)) = (profile.twitter_handle(), profile.twitter_url()) {
        out.push_str(&detail("Twitter", &link(&url, &format!("@{}", handle))));
    }
    if let Some(website) = profile.website() {
        out.push_str(&detail("Website", &link(&website, &website)));
    }
    if let Some(ref linkedin) = card.linkedin {
        out.push_str(&detail("LinkedIn", &link(linkedin, "Profile")));
    }
    out.push_str(&detail("Joined", &escape(&joined_label(card))));
    out.push_str("</div>");

    out.push_str(r#"<div class="card-right"><div class="card-section"><h3>Top Languages</h3>"#);
    out.push_str(&languages(&card.languages, config.shown_languages));
    out.push_str(r#"</div><div class="card-section"><h3>Top Repositories</h3>"#);
    if card.repositories.is_empty() {
        out.push_str(r#"<p class="empty">No repositories to show</p>"#);
    } else {
        for repo_data in card.repositories.iter().take(config.featured_repos) {
            out.push_str(&repo(repo_data));
        }
    }
    out.push_str("</div></div>");
    out.push_str(r#"<div class="badge">DevCard</div></div>"#);
    out
}

fn detail(label: &str, value_html: &str) -> String {
    format!(
        r#"<div class="detail"><span class="detail-label">{}:</span><span class="detail-value">{}</span></div>"#,
        escape(label),
        value_html
    )
}

fn link(href: &str, text: &str) -> String {
    format!(
        r#"<a href="{}" target="_blank" rel="noopener noreferrer">{}</a>"#,
        escape(href),
        escape(text)
    )
}

fn languages(shares: &[LanguageShare], shown: usize) -> String {
    if shares.is_empty() {
        return r#"<p class="empty">No language data</p>"#.to_string();
    }

    let mut out = String::from(r#"<div class="language-bar">"#);
    for (index, share) in shares.iter().enumerate() {
        let _ = write!(
            out,
            r#"<div style="width:{:.2}%;background:{}" title="{} {}"></div>"#,
            share.percent,
            language_color(&share.name, index),
            escape(&share.name),
            percent_label(share.percent)
        );
    }
    out.push_str("</div>");

    for (index, share) in shares.iter().enumerate().take(shown) {
        let _ = write!(
            out,
            r#"<div class="language-row"><span class="language-name"><span class="language-dot" style="background:{}"></span>{}</span><span class="language-percent">{}</span></div>"#,
            language_color(&share.name, index),
            escape(&share.name),
            percent_label(share.percent)
        );
    }
    out
}

fn repo(repo: &RepoSummary) -> String {
    format!(
        r#"<a class="repo" href="{}" target="_blank" rel="noopener noreferrer"><div class="repo-head"><h4 class="repo-name">{}</h4><div class="repo-stats"><span>★ {}</span><span>⑂ {}</span></div></div><p class="repo-description">{}</p></a>"#,
        escape(&repo.url),
        escape(&repo.name),
        repo.stars,
        repo.forks,
        escape(repo.description.as_deref().unwrap_or(""))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::{card as card_fixture, repo as repo_fixture};
    use crate::models::SocialAccount;
    use crate::page::FETCH_ERROR_MESSAGE;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_card_placeholders_for_missing_fields() {
        let html = card(&card_fixture("octocat"), &CardConfig::default());

        assert!(html.contains("<h2>octocat</h2>"));
        assert!(html.contains("Contributions:</span><span class=\"detail-value\">N/A"));
        assert!(html.contains("Location:</span><span class=\"detail-value\">N/A"));
        assert!(!html.contains("Email:"));
        assert!(!html.contains("Twitter:"));
        assert!(!html.contains("Website:"));
        assert!(!html.contains("LinkedIn:"));
        assert!(html.contains("No language data"));
        assert!(html.contains("No repositories to show"));
        assert!(html.contains("Joined:</span><span class=\"detail-value\">Mar 14, 2015"));
    }

    #[test]
    fn test_card_optional_rows_when_present() {
        let mut data = card_fixture("octocat");
        data.profile.name = Some("The Octocat".to_string());
        data.profile.email = Some("octo@example.com".to_string());
        data.profile.twitter_username = Some("octo".to_string());
        data.profile.blog = Some("octo.dev".to_string());
        data.contributions = Some(42);
        data.linkedin = crate::models::linkedin_url(&[SocialAccount {
            provider: "linkedin".to_string(),
            url: "https://linkedin.com/in/octo".to_string(),
        }]);

        let html = card(&data, &CardConfig::default());
        assert!(html.contains("<h2>The Octocat</h2>"));
        assert!(html.contains("href=\"mailto:octo@example.com\""));
        assert!(html.contains("href=\"https://twitter.com/octo\""));
        assert!(html.contains("href=\"https://octo.dev\""));
        assert!(html.contains("href=\"https://linkedin.com/in/octo\""));
        assert!(html.contains("Contributions:</span><span class=\"detail-value\">42"));
    }

    #[test]
    fn test_card_escapes_user_content() {
        let mut data = card_fixture("octocat");
        data.profile.name = Some("<script>alert(1)</script>".to_string());
        let html = card(&data, &CardConfig::default());
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_languages_limited_to_shown() {
        let mut data = card_fixture("octocat");
        data.languages = crate::languages::top_languages(
            vec![[("Rust", 50u64), ("Go", 20), ("C", 15), ("Java", 10), ("Ruby", 5)]
                .into_iter()
                .map(|(n, b)| (n.to_string(), b))
                .collect()],
            5,
        );

        let html = card(&data, &CardConfig::default());
        assert_eq!(html.matches("class=\"language-row\"").count(), 4);
        assert!(html.contains(">50%<"));
        assert!(!html.contains(">Ruby<"));
        // the bar still covers every ranked language
        assert!(html.contains("title=\"Ruby 5%\""));
    }

    #[test]
    fn test_repositories_capped() {
        let mut data = card_fixture("octocat");
        data.repositories = (0..5).map(|i| repo_fixture(&format!("repo{}", i), i)).collect();

        let html = card(&data, &CardConfig::default());
        assert_eq!(html.matches("class=\"repo\"").count(), 3);
    }

    #[test]
    fn test_page_states() {
        let config = CardConfig::default();

        let mut form = ProfileForm::with_input("octocat");
        assert!(!page(&form, &config).contains("class=\"card"));

        let ticket = form.submit().unwrap();
        let loading = page(&form, &config);
        assert!(loading.contains("aria-busy=\"true\""));
        assert!(loading.contains("value=\"octocat\""));

        form.complete(ticket, Err(crate::Error::Other("boom".to_string())));
        let failed = page(&form, &config);
        assert!(failed.contains(FETCH_ERROR_MESSAGE));
        assert!(!failed.contains("class=\"badge\""));
    }
}
