//! Good Vibes: a single-page site engine.
//!
//! The crate models the page as an in-memory document ([`dom::Document`]),
//! renders untrusted feed data through an escaping template layer
//! ([`escape`], [`cards`]), and drives navigation and panel state the way
//! the live page does ([`state`], [`controller`]).

pub mod cards;
pub mod controller;
pub mod dom;
pub mod escape;
pub mod format;
pub mod page;
pub mod selector;
pub mod state;

pub use cards::{article_card, repo_card, validate_required, Article, Repo, Validation};
pub use controller::{Action, Controller};
pub use dom::{Document, NodeId};
pub use escape::{escape_html, escape_value, render_template};
pub use format::{format_date, relative_time, relative_time_since};
pub use page::{build_page, ARTICLES_PANEL, REPOS_PANEL, SECTION_IDS};
pub use selector::{Selector, SelectorError};
pub use state::{
    show_content, show_error, show_loading, show_only_section, update_navigation, Panel,
};
