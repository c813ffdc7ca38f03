//! Content card generation.
//!
//! Every field that can carry attacker-controlled text goes through
//! [`escape_html`] before interpolation; that is the safety contract of this
//! module, including URL fields, which end up in attribute position.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::escape::escape_html;
use crate::format::format_date;

/// Repository record in the shape the GitHub API returns.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Repo {
    pub name: String,
    pub html_url: String,
    #[serde(default)]
    pub language: Option<String>,
    /// Left as raw JSON so numeric strings from sloppy feeds still count.
    #[serde(default)]
    pub stargazers_count: Value,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Article record from the (future) article source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub published_date: Option<String>,
    #[serde(default)]
    pub read_time: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Renders one repository card fragment.
pub fn repo_card(repo: &Repo) -> String {
    let name = escape_html(&repo.name);
    let html_url = escape_html(&repo.html_url);
    let language = escape_html(non_empty(repo.language.as_deref()).unwrap_or("Unknown"));
    let stars = star_count(&repo.stargazers_count);
    let description = escape_html(
        non_empty(repo.description.as_deref()).unwrap_or("No description available"),
    );
    let topics = tag_spans(&repo.topics, "topic-tag");
    let updated_at = escape_html(repo.updated_at.as_deref().unwrap_or(""));
    let updated_date = repo
        .updated_at
        .as_deref()
        .map(format_date)
        .unwrap_or_default();

    format!(
        r#"<article class="repo-card">
    <header class="repo-header">
        <h3 class="repo-name">
            <a href="{html_url}" target="_blank" rel="noopener noreferrer">{name}</a>
        </h3>
        <div class="repo-meta">
            <span class="repo-language">{language}</span>
            <span class="repo-stars">⭐ {stars}</span>
        </div>
    </header>
    <p class="repo-description">{description}</p>
    <footer class="repo-footer">
        <div class="repo-topics">{topics}</div>
        <time class="repo-updated" datetime="{updated_at}">Updated {updated_date}</time>
    </footer>
</article>"#
    )
}

/// Renders one article card fragment.
pub fn article_card(article: &Article) -> String {
    let title = escape_html(&article.title);
    let slug = escape_html(&article.slug);
    let excerpt = escape_html(article.excerpt.as_deref().unwrap_or(""));
    let published_date = escape_html(article.published_date.as_deref().unwrap_or(""));
    let formatted_date = article
        .published_date
        .as_deref()
        .map(format_date)
        .unwrap_or_default();
    let read_time = escape_html(non_empty(article.read_time.as_deref()).unwrap_or("5 min read"));
    let tags = tag_spans(&article.tags, "article-tag");

    format!(
        r#"<article class="article-card">
    <header class="article-header">
        <h3 class="article-title">
            <a href="/articles/{slug}" class="article-link">{title}</a>
        </h3>
        <div class="article-meta">
            <time class="article-date" datetime="{published_date}">{formatted_date}</time>
            <span class="article-read-time">{read_time}</span>
        </div>
    </header>
    <p class="article-excerpt">{excerpt}</p>
    <footer class="article-footer">
        <div class="article-tags">{tags}</div>
        <a href="/articles/{slug}" class="article-read-more">Read more →</a>
    </footer>
</article>"#
    )
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn tag_spans(items: &[String], class: &str) -> String {
    items
        .iter()
        .map(|item| format!(r#"<span class="{class}">{}</span>"#, escape_html(item)))
        .collect()
}

/// Numeric coercion for the star count: JSON numbers and numeric strings
/// parse, everything else falls back to 0.
fn star_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite() && *f >= 0.0)
            .map(|f| f as u64)
            .unwrap_or(0),
        _ => 0,
    }
}

/// Result of [`validate_required`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Validation {
    pub is_valid: bool,
    pub missing: Vec<String>,
}

/// Checks that `record` is an object carrying a non-null, non-empty value
/// for every required field.
pub fn validate_required(record: &Value, required: &[&str]) -> Validation {
    let Some(map) = record.as_object() else {
        return Validation {
            is_valid: false,
            missing: required.iter().map(|f| f.to_string()).collect(),
        };
    };
    let missing: Vec<String> = required
        .iter()
        .filter(|field| match map.get(**field) {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        })
        .map(|f| f.to_string())
        .collect();
    Validation {
        is_valid: missing.is_empty(),
        missing,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_repo() -> Repo {
        Repo {
            name: "good-vibes".to_string(),
            html_url: "https://github.com/example/good-vibes".to_string(),
            language: Some("Rust".to_string()),
            stargazers_count: json!(42),
            description: Some("Utility functions for the Good Vibes project".to_string()),
            topics: vec!["utilities".to_string(), "spa".to_string()],
            updated_at: Some("2025-01-03".to_string()),
        }
    }

    #[test]
    fn repo_card_renders_all_fields() {
        let html = repo_card(&sample_repo());
        assert!(html.contains(r#"<article class="repo-card">"#));
        assert!(html.contains("good-vibes"));
        assert!(html.contains(r#"<span class="repo-language">Rust</span>"#));
        assert!(html.contains("⭐ 42"));
        assert!(html.contains(r#"<span class="topic-tag">utilities</span>"#));
        assert!(html.contains(r#"<span class="topic-tag">spa</span>"#));
        assert!(html.contains("Updated January 3, 2025"));
        // The URL is escaped, so its slashes are character references.
        assert!(html.contains("https:&#47;&#47;github.com&#47;example&#47;good-vibes"));
    }

    #[test]
    fn repo_card_escapes_hostile_fields() {
        let repo = Repo {
            name: "<script>alert(\"xss\")</script>".to_string(),
            ..sample_repo()
        };
        let html = repo_card(&repo);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(&quot;xss&quot;)&lt;&#47;script&gt;"));
    }

    #[test]
    fn repo_card_applies_defaults() {
        let repo = Repo {
            name: "bare".to_string(),
            html_url: "https://example.com".to_string(),
            ..Repo::default()
        };
        let html = repo_card(&repo);
        assert!(html.contains(r#"<span class="repo-language">Unknown</span>"#));
        assert!(html.contains("No description available"));
        assert!(html.contains("⭐ 0"));
        assert!(html.contains(r#"<div class="repo-topics"></div>"#));
        assert!(html.contains(r#"datetime="">Updated </time>"#));
    }

    #[test]
    fn star_count_coerces_numbers_and_strings() {
        assert_eq!(star_count(&json!(42)), 42);
        assert_eq!(star_count(&json!("17")), 17);
        assert_eq!(star_count(&json!("4.9")), 4);
        assert_eq!(star_count(&json!("not-a-number")), 0);
        assert_eq!(star_count(&json!(null)), 0);
        assert_eq!(star_count(&json!([1, 2])), 0);
    }

    #[test]
    fn repo_card_survives_invalid_date() {
        let repo = Repo {
            updated_at: Some("soon".to_string()),
            ..sample_repo()
        };
        assert!(repo_card(&repo).contains("Updated Invalid date"));
    }

    #[test]
    fn article_card_renders_and_defaults() {
        let article = Article {
            title: "Shipping Good Vibes".to_string(),
            slug: "shipping-good-vibes".to_string(),
            excerpt: Some("How the page engine came together.".to_string()),
            published_date: Some("2025-01-03".to_string()),
            read_time: None,
            tags: vec!["rust".to_string()],
        };
        let html = article_card(&article);
        assert!(html.contains(r#"<article class="article-card">"#));
        assert!(html.contains(r#"href="/articles/shipping-good-vibes""#));
        assert!(html.contains("January 3, 2025"));
        assert!(html.contains(r#"<span class="article-read-time">5 min read</span>"#));
        assert!(html.contains(r#"<span class="article-tag">rust</span>"#));
        assert!(html.contains("Read more →"));
    }

    #[test]
    fn article_card_escapes_title_and_tags() {
        let article = Article {
            title: "a < b".to_string(),
            slug: "a-b".to_string(),
            tags: vec!["<img>".to_string()],
            ..Article::default()
        };
        let html = article_card(&article);
        assert!(html.contains("a &lt; b"));
        assert!(html.contains(r#"<span class="article-tag">&lt;img&gt;</span>"#));
    }

    #[test]
    fn records_deserialize_with_missing_optionals() {
        let repo: Repo = serde_json::from_value(json!({
            "name": "tiny",
            "html_url": "https://example.com/tiny",
            "stargazers_count": "7"
        }))
        .unwrap();
        assert_eq!(star_count(&repo.stargazers_count), 7);
        assert!(repo.topics.is_empty());

        let article: Article = serde_json::from_value(json!({
            "title": "T",
            "slug": "t"
        }))
        .unwrap();
        assert!(article.tags.is_empty());
    }

    #[test]
    fn validate_required_accepts_complete_records() {
        let record = json!({ "name": "John", "email": "john@example.com" });
        let result = validate_required(&record, &["name", "email"]);
        assert!(result.is_valid);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn validate_required_reports_missing_fields() {
        let record = json!({ "name": "John" });
        let result = validate_required(&record, &["name", "email", "phone"]);
        assert!(!result.is_valid);
        assert_eq!(result.missing, vec!["email", "phone"]);
    }

    #[test]
    fn validate_required_treats_empty_and_null_as_missing() {
        let record = json!({ "name": "", "email": null });
        let result = validate_required(&record, &["name", "email", "phone"]);
        assert!(!result.is_valid);
        assert_eq!(result.missing, vec!["name", "email", "phone"]);
    }

    #[test]
    fn validate_required_rejects_non_objects() {
        let result = validate_required(&json!(null), &["title"]);
        assert!(!result.is_valid);
        assert_eq!(result.missing, vec!["title"]);
    }
}
