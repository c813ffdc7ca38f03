//! Page-level state managers: section visibility, navigation highlighting,
//! and the loading/content/error panel toggle.
//!
//! Each call operates over a fresh snapshot of the matching elements, so
//! every invocation is a full, idempotent sweep.

use once_cell::sync::Lazy;

use crate::dom::{Document, NodeId};
use crate::selector::Selector;

/// Default selector for content sections.
pub const SECTION_SELECTOR: &str = ".content-section";
/// Default selector for navigation links.
pub const NAV_SELECTOR: &str = ".nav-link";
/// Display value a content container gets when its panel shows content.
pub const DEFAULT_CONTENT_DISPLAY: &str = "grid";

static SECTIONS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(SECTION_SELECTOR).expect("valid section selector"));
static NAV_LINKS: Lazy<Selector> =
    Lazy::new(|| Selector::parse(NAV_SELECTOR).expect("valid nav selector"));

/// Marks the section whose id equals `active_id` active and hides the rest.
///
/// Every section gets `aria-hidden` rewritten (`"false"` on the active one,
/// `"true"` elsewhere). An unknown id simply hides everything.
pub fn show_only_section(doc: &mut Document, active_id: &str) {
    let sections = doc.query(doc.root(), &SECTIONS);
    apply_sections(doc, active_id, &sections);
}

/// [`show_only_section`] over a caller-supplied container selector.
pub fn show_only_section_in(doc: &mut Document, active_id: &str, container_selector: &str) {
    let sections = doc.select_all(container_selector);
    apply_sections(doc, active_id, &sections);
}

fn apply_sections(doc: &mut Document, active_id: &str, sections: &[NodeId]) {
    for &section in sections {
        let is_active = doc.element_id(section) == Some(active_id);
        doc.set_class(section, "active", is_active);
        doc.set_attr(section, "aria-hidden", if is_active { "false" } else { "true" });
    }
}

/// Highlights the nav link whose `href` is `#active_id` and clears the rest.
///
/// Inactive links have `aria-current` removed entirely, not set to a falsy
/// value.
pub fn update_navigation(doc: &mut Document, active_id: &str) {
    let links = doc.query(doc.root(), &NAV_LINKS);
    apply_navigation(doc, active_id, &links);
}

/// [`update_navigation`] over a caller-supplied link selector.
pub fn update_navigation_in(doc: &mut Document, active_id: &str, nav_selector: &str) {
    let links = doc.select_all(nav_selector);
    apply_navigation(doc, active_id, &links);
}

fn apply_navigation(doc: &mut Document, active_id: &str, links: &[NodeId]) {
    let fragment = format!("#{active_id}");
    for &link in links {
        let is_active = doc.attr(link, "href") == Some(fragment.as_str());
        doc.set_class(link, "active", is_active);
        if is_active {
            doc.set_attr(link, "aria-current", "page");
        } else {
            doc.remove_attr(link, "aria-current");
        }
    }
}

/// Element-id triple for one loading/content/error panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel<'a> {
    pub container: &'a str,
    pub loading: &'a str,
    pub error: &'a str,
}

impl<'a> Panel<'a> {
    pub const fn new(container: &'a str, loading: &'a str, error: &'a str) -> Self {
        Self {
            container,
            loading,
            error,
        }
    }
}

/// Loading state: spinner visible, container and error hidden.
pub fn show_loading(doc: &mut Document, panel: Panel<'_>) {
    set_display_by_id(doc, panel.container, "none");
    set_display_by_id(doc, panel.loading, "block");
    set_display_by_id(doc, panel.error, "none");
}

/// Content state: container visible with the given display value.
pub fn show_content(doc: &mut Document, panel: Panel<'_>, display_type: &str) {
    set_display_by_id(doc, panel.container, display_type);
    set_display_by_id(doc, panel.loading, "none");
    set_display_by_id(doc, panel.error, "none");
}

/// Error state: error block visible, container and spinner hidden.
pub fn show_error(doc: &mut Document, panel: Panel<'_>) {
    set_display_by_id(doc, panel.container, "none");
    set_display_by_id(doc, panel.loading, "none");
    set_display_by_id(doc, panel.error, "block");
}

// Missing elements are skipped one by one; a partial DOM never blocks the
// remaining writes.
fn set_display_by_id(doc: &mut Document, id: &str, value: &str) {
    if let Some(node) = doc.get_element_by_id(id) {
        doc.set_display(node, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_sections(doc: &mut Document) -> (NodeId, NodeId, NodeId) {
        let intro = doc.create_element_with(
            "section",
            &[("id", "intro"), ("class", "content-section active")],
            "Intro",
        );
        let about =
            doc.create_element_with("section", &[("id", "about"), ("class", "content-section")], "About");
        let contact = doc.create_element_with(
            "section",
            &[("id", "contact"), ("class", "content-section")],
            "Contact",
        );
        let root = doc.root();
        doc.append_child(root, intro);
        doc.append_child(root, about);
        doc.append_child(root, contact);
        (intro, about, contact)
    }

    fn panel_fixture(doc: &mut Document) -> Panel<'static> {
        for (id, display) in [
            ("test-container", None),
            ("test-loading", Some("none")),
            ("test-error", Some("none")),
        ] {
            let node = doc.create_element_with("div", &[("id", id)], "");
            if let Some(value) = display {
                doc.set_display(node, value);
            }
            let root = doc.root();
            doc.append_child(root, node);
        }
        Panel::new("test-container", "test-loading", "test-error")
    }

    #[test]
    fn show_only_section_activates_exactly_one() {
        let mut doc = Document::new();
        let (intro, about, contact) = three_sections(&mut doc);

        show_only_section(&mut doc, "about");

        assert!(!doc.has_class(intro, "active"));
        assert!(doc.has_class(about, "active"));
        assert!(!doc.has_class(contact, "active"));
        assert_eq!(doc.attr(intro, "aria-hidden"), Some("true"));
        assert_eq!(doc.attr(about, "aria-hidden"), Some("false"));
        assert_eq!(doc.attr(contact, "aria-hidden"), Some("true"));
    }

    #[test]
    fn show_only_section_is_idempotent() {
        let mut doc = Document::new();
        three_sections(&mut doc);

        show_only_section(&mut doc, "about");
        let once = doc.to_html();
        show_only_section(&mut doc, "about");
        assert_eq!(doc.to_html(), once);
    }

    #[test]
    fn unknown_section_hides_everything() {
        let mut doc = Document::new();
        let (intro, about, contact) = three_sections(&mut doc);

        show_only_section(&mut doc, "missing");

        for section in [intro, about, contact] {
            assert!(!doc.has_class(section, "active"));
            assert_eq!(doc.attr(section, "aria-hidden"), Some("true"));
        }
    }

    #[test]
    fn update_navigation_moves_the_active_marker() {
        let mut doc = Document::new();
        let intro = doc.create_element_with(
            "a",
            &[
                ("href", "#intro"),
                ("class", "nav-link active"),
                ("aria-current", "page"),
            ],
            "Intro",
        );
        let about = doc.create_element_with("a", &[("href", "#about"), ("class", "nav-link")], "About");
        let contact =
            doc.create_element_with("a", &[("href", "#contact"), ("class", "nav-link")], "Contact");
        let root = doc.root();
        doc.append_child(root, intro);
        doc.append_child(root, about);
        doc.append_child(root, contact);

        update_navigation(&mut doc, "about");

        assert!(!doc.has_class(intro, "active"));
        assert!(doc.has_class(about, "active"));
        assert!(!doc.has_class(contact, "active"));
        assert_eq!(doc.attr(about, "aria-current"), Some("page"));
        // Absent, not falsy.
        assert_eq!(doc.attr(intro, "aria-current"), None);
        assert_eq!(doc.attr(contact, "aria-current"), None);
    }

    #[test]
    fn loading_state_shows_only_the_spinner() {
        let mut doc = Document::new();
        let panel = panel_fixture(&mut doc);

        show_loading(&mut doc, panel);

        assert_eq!(display_of(&doc, "test-container"), Some("none".into()));
        assert_eq!(display_of(&doc, "test-loading"), Some("block".into()));
        assert_eq!(display_of(&doc, "test-error"), Some("none".into()));
    }

    #[test]
    fn content_state_honors_custom_display_types() {
        let mut doc = Document::new();
        let panel = panel_fixture(&mut doc);

        for display in ["block", "flex", "inline-block", "table"] {
            show_content(&mut doc, panel, display);
            assert_eq!(display_of(&doc, "test-container"), Some(display.into()));
        }
    }

    #[test]
    fn state_transitions_end_exclusive() {
        let mut doc = Document::new();
        let panel = panel_fixture(&mut doc);

        show_loading(&mut doc, panel);
        show_error(&mut doc, panel);
        show_loading(&mut doc, panel);
        show_content(&mut doc, panel, DEFAULT_CONTENT_DISPLAY);

        assert_eq!(display_of(&doc, "test-container"), Some("grid".into()));
        assert_eq!(display_of(&doc, "test-loading"), Some("none".into()));
        assert_eq!(display_of(&doc, "test-error"), Some("none".into()));

        let visible = ["test-container", "test-loading", "test-error"]
            .iter()
            .filter(|id| display_of(&doc, id).as_deref() != Some("none"))
            .count();
        assert_eq!(visible, 1);
    }

    #[test]
    fn missing_panel_elements_are_skipped() {
        let mut doc = Document::new();
        let container = doc.create_element_with("div", &[("id", "only-container")], "");
        let root = doc.root();
        doc.append_child(root, container);

        show_loading(
            &mut doc,
            Panel::new("only-container", "absent-loading", "absent-error"),
        );
        assert_eq!(doc.display(container), Some("none"));
    }

    #[test]
    fn panel_updates_touch_only_display() {
        let mut doc = Document::new();
        let panel = panel_fixture(&mut doc);
        let container = doc.get_element_by_id("test-container").unwrap();
        doc.add_class(container, "custom-class");
        doc.set_attr(container, "data-test", "value");

        show_loading(&mut doc, panel);

        assert!(doc.has_class(container, "custom-class"));
        assert_eq!(doc.attr(container, "data-test"), Some("value"));
        assert_eq!(doc.display(container), Some("none"));
    }

    fn display_of(doc: &Document, id: &str) -> Option<String> {
        doc.get_element_by_id(id)
            .and_then(|node| doc.display(node).map(str::to_string))
    }
}
