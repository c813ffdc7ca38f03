//! The static Good Vibes page: semantic landmarks, navigation, three
//! content sections, and the two loading/content/error panels.

use crate::dom::{Document, NodeId};
use crate::state::Panel;

/// Panel ids for the repositories section.
pub const REPOS_PANEL: Panel<'static> =
    Panel::new("repos-container", "repos-loading", "repos-error");
/// Panel ids for the articles section.
pub const ARTICLES_PANEL: Panel<'static> =
    Panel::new("articles-container", "articles-loading", "articles-error");

/// Section ids in navigation order; the first one starts active.
pub const SECTION_IDS: &[&str] = &["introduction", "repositories", "articles"];

/// Builds the full page document.
pub fn build_page() -> Document {
    let mut doc = Document::new();
    let root = doc.root();

    let header = doc.create_element_with("header", &[("class", "site-header")], "");
    let title = doc.create_element_with("h1", &[("class", "site-title")], "");
    doc.set_text(title, "Good Vibes");
    doc.append_child(header, title);
    let nav = build_nav(&mut doc);
    doc.append_child(header, nav);
    doc.append_child(root, header);

    let main = doc.create_element_with("main", &[("class", "main-content")], "");
    let introduction = build_introduction(&mut doc);
    doc.append_child(main, introduction);
    let repositories = build_repositories(&mut doc);
    doc.append_child(main, repositories);
    let articles = build_articles(&mut doc);
    doc.append_child(main, articles);
    doc.append_child(root, main);

    let footer = doc.create_element_with("footer", &[("class", "site-footer")], "");
    let tagline = doc.create_element("p");
    doc.set_text(tagline, "Keep the vibes good.");
    doc.append_child(footer, tagline);
    doc.append_child(root, footer);

    doc
}

fn build_nav(doc: &mut Document) -> NodeId {
    let nav = doc.create_element_with(
        "nav",
        &[("class", "main-nav"), ("aria-label", "Main navigation")],
        "",
    );
    let list = doc.create_element_with("ul", &[("class", "nav-list")], "");
    for (index, &section_id) in SECTION_IDS.iter().enumerate() {
        let item = doc.create_element_with("li", &[("class", "nav-item")], "");
        let fragment = format!("#{section_id}");
        let link = if index == 0 {
            doc.create_element_with(
                "a",
                &[
                    ("href", fragment.as_str()),
                    ("class", "nav-link active"),
                    ("aria-current", "page"),
                ],
                "",
            )
        } else {
            doc.create_element_with(
                "a",
                &[("href", fragment.as_str()), ("class", "nav-link")],
                "",
            )
        };
        doc.set_text(link, &title_case(section_id));
        doc.append_child(item, link);
        doc.append_child(list, item);
    }
    doc.append_child(nav, list);
    nav
}

fn build_introduction(doc: &mut Document) -> NodeId {
    let section = doc.create_element_with(
        "section",
        &[
            ("id", "introduction"),
            ("class", "content-section active"),
            ("aria-hidden", "false"),
        ],
        "",
    );
    let heading = doc.create_element("h2");
    doc.set_text(heading, "Welcome to Good Vibes");
    let lede = doc.create_element_with("p", &[("class", "section-lede")], "");
    doc.set_text(
        lede,
        "A small corner of the web for projects and writing that spark joy.",
    );
    doc.append_child(section, heading);
    doc.append_child(section, lede);
    section
}

fn build_repositories(doc: &mut Document) -> NodeId {
    build_panel_section(
        doc,
        "repositories",
        "Repositories",
        REPOS_PANEL,
        "repo-grid",
        "Loading repositories...",
        "Could not load repositories.",
        "retry-repos-btn",
    )
}

fn build_articles(doc: &mut Document) -> NodeId {
    build_panel_section(
        doc,
        "articles",
        "Articles",
        ARTICLES_PANEL,
        "article-grid",
        "Loading articles...",
        "Could not load articles.",
        "retry-articles-btn",
    )
}

#[allow(clippy::too_many_arguments)]
fn build_panel_section(
    doc: &mut Document,
    section_id: &str,
    heading_text: &str,
    panel: Panel<'_>,
    grid_class: &str,
    loading_text: &str,
    error_text: &str,
    retry_id: &str,
) -> NodeId {
    let section = doc.create_element_with(
        "section",
        &[
            ("id", section_id),
            ("class", "content-section"),
            ("aria-hidden", "true"),
        ],
        "",
    );
    let heading = doc.create_element("h2");
    doc.set_text(heading, heading_text);
    doc.append_child(section, heading);

    let loading = doc.create_element_with(
        "div",
        &[
            ("id", panel.loading),
            ("class", "loading-state"),
            ("role", "status"),
            ("aria-live", "polite"),
        ],
        "",
    );
    doc.set_display(loading, "none");
    let spinner = doc.create_element_with("div", &[("class", "spinner")], "");
    let loading_label = doc.create_element("p");
    doc.set_text(loading_label, loading_text);
    doc.append_child(loading, spinner);
    doc.append_child(loading, loading_label);
    doc.append_child(section, loading);

    let container =
        doc.create_element_with("div", &[("id", panel.container), ("class", grid_class)], "");
    doc.append_child(section, container);

    let error = doc.create_element_with("div", &[("id", panel.error), ("class", "error-state")], "");
    doc.set_display(error, "none");
    let error_label = doc.create_element("p");
    doc.set_text(error_label, error_text);
    let retry = doc.create_element_with(
        "button",
        &[("id", retry_id), ("type", "button"), ("class", "retry-btn")],
        "",
    );
    doc.set_text(retry, "Try again");
    doc.append_child(error, error_label);
    doc.append_child(error, retry);
    doc.append_child(section, error);

    section
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
