//! Wires the static page together: navigation clicks, retry buttons,
//! and the loading/content/error lifecycle for both feeds.

use tracing::{debug, warn};

use crate::cards::{article_card, repo_card, Article, Repo};
use crate::dom::{Document, NodeId};
use crate::page::{build_page, ARTICLES_PANEL, REPOS_PANEL, SECTION_IDS};
use crate::state::{show_content, show_error, show_loading, show_only_section, update_navigation};

/// What a bound element does when activated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Navigate,
    RetryRepositories,
    RetryArticles,
}

#[derive(Clone, Copy, Debug)]
struct Binding {
    target: NodeId,
    action: Action,
}

/// Owns the document plus the activation bindings attached to it.
pub struct Controller {
    doc: Document,
    bindings: Vec<Binding>,
}

impl Controller {
    /// Builds the page and wires it up.
    pub fn new() -> Self {
        Self::mount(build_page())
    }

    /// Attaches bindings to an existing document and kicks off the
    /// initial feed loads.
    pub fn mount(doc: Document) -> Self {
        let mut controller = Self {
            doc,
            bindings: Vec::new(),
        };
        for link in controller.doc.select_all(".nav-link") {
            controller.bind(link, Action::Navigate);
        }
        if let Some(retry) = controller.doc.get_element_by_id("retry-repos-btn") {
            controller.bind(retry, Action::RetryRepositories);
        }
        if let Some(retry) = controller.doc.get_element_by_id("retry-articles-btn") {
            controller.bind(retry, Action::RetryArticles);
        }
        controller.load_repositories();
        controller.load_articles();
        controller
    }

    fn bind(&mut self, target: NodeId, action: Action) {
        self.bindings.push(Binding { target, action });
    }

    /// Activates whatever is bound to `target`. Unbound nodes are ignored.
    pub fn click(&mut self, target: NodeId) {
        let Some(action) = self
            .bindings
            .iter()
            .find(|binding| binding.target == target)
            .map(|binding| binding.action)
        else {
            debug!(?target, "click on unbound element ignored");
            return;
        };
        match action {
            Action::Navigate => {
                let Some(fragment) = self
                    .doc
                    .attr(target, "href")
                    .and_then(|href| href.strip_prefix('#'))
                    .map(str::to_owned)
                else {
                    warn!("navigation link without a fragment href");
                    return;
                };
                self.navigate_to(&fragment);
            }
            Action::RetryRepositories => self.load_repositories(),
            Action::RetryArticles => self.load_articles(),
        }
    }

    /// Convenience for tests and the CLI: click the first match.
    pub fn click_selector(&mut self, selector: &str) -> bool {
        match self.doc.select(selector) {
            Some(target) => {
                self.click(target);
                true
            }
            None => false,
        }
    }

    /// Navigation state updates before section visibility, so the nav
    /// never points at a section that is not yet shown.
    pub fn navigate_to(&mut self, section_id: &str) {
        debug!(section_id, "navigating");
        update_navigation(&mut self.doc, section_id);
        show_only_section(&mut self.doc, section_id);
    }

    /// Id of the currently active section, if any.
    pub fn active_section(&self) -> Option<&str> {
        SECTION_IDS.iter().copied().find(|id| {
            self.doc
                .get_element_by_id(id)
                .is_some_and(|section| self.doc.has_class(section, "active"))
        })
    }

    /// Repository data arrives out of band; loading here only flips the
    /// panel into its waiting state.
    pub fn load_repositories(&mut self) {
        debug!("loading repositories");
        show_loading(&mut self.doc, REPOS_PANEL);
    }

    pub fn load_articles(&mut self) {
        debug!("loading articles");
        show_loading(&mut self.doc, ARTICLES_PANEL);
    }

    /// Renders repository cards into the container and reveals it.
    pub fn populate_repositories(&mut self, repos: &[Repo]) {
        let html: String = repos.iter().map(repo_card).collect();
        self.fill_panel(REPOS_PANEL.container, &html);
        show_content(&mut self.doc, REPOS_PANEL, "grid");
    }

    pub fn populate_articles(&mut self, articles: &[Article]) {
        let html: String = articles.iter().map(article_card).collect();
        self.fill_panel(ARTICLES_PANEL.container, &html);
        show_content(&mut self.doc, ARTICLES_PANEL, "grid");
    }

    /// Flips a panel into its error state, keeping stale content hidden.
    pub fn fail_repositories(&mut self) {
        show_error(&mut self.doc, REPOS_PANEL);
    }

    pub fn fail_articles(&mut self) {
        show_error(&mut self.doc, ARTICLES_PANEL);
    }

    fn fill_panel(&mut self, container_id: &str, html: &str) {
        match self.doc.get_element_by_id(container_id) {
            Some(container) => self.doc.set_inner_html(container, html),
            None => warn!(container_id, "panel container missing"),
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new()
    }
}
