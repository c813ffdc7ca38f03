//! In-memory document tree for the Good Vibes page.
//!
//! Nodes live in an arena owned by [`Document`]; callers hold [`NodeId`]
//! handles. Query helpers return explicit snapshots (a `Vec` of handles
//! taken at call time), never live views, and degrade on invalid selectors
//! instead of propagating the parse error.

use std::collections::BTreeMap;

use tracing::warn;

use crate::escape::{escape_attr, escape_html, render_template};
use crate::selector::Selector;

/// Handle to a node inside a [`Document`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug, Clone, Default)]
struct Node {
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    children: Vec<NodeId>,
    text: Option<String>,
    inner_html: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document: a lone `body` root.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: NodeId(0),
        };
        doc.root = doc.push_node("body");
        doc
    }

    fn push_node(&mut self, tag: &str) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag: tag.to_ascii_lowercase(),
            ..Node::default()
        });
        id
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Creates a detached element.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push_node(tag)
    }

    /// Creates a detached element with attributes and inner content.
    ///
    /// `class` and `className` entries populate the class list instead of
    /// landing in the attribute map; a non-empty `content` becomes the
    /// element's inner HTML.
    pub fn create_element_with(
        &mut self,
        tag: &str,
        attrs: &[(&str, &str)],
        content: &str,
    ) -> NodeId {
        let node = self.push_node(tag);
        for (name, value) in attrs {
            match *name {
                "class" | "className" => {
                    for class in value.split_whitespace() {
                        self.add_class(node, class);
                    }
                }
                _ => self.set_attr(node, name, value),
            }
        }
        if !content.is_empty() {
            self.set_inner_html(node, content);
        }
        node
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.node_mut(parent).children.push(child);
    }

    pub fn tag(&self, node: NodeId) -> &str {
        &self.node(node).tag
    }

    pub fn element_id(&self, node: NodeId) -> Option<&str> {
        self.attr(node, "id")
    }

    // ------------------------------------------------------------------
    // Classes
    // ------------------------------------------------------------------

    pub fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.node(node).classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, node: NodeId, class: &str) {
        if !self.has_class(node, class) {
            self.node_mut(node).classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, node: NodeId, class: &str) {
        self.node_mut(node).classes.retain(|c| c != class);
    }

    /// Flips the class and reports whether it is present afterwards.
    pub fn toggle_class(&mut self, node: NodeId, class: &str) -> bool {
        if self.has_class(node, class) {
            self.remove_class(node, class);
            false
        } else {
            self.add_class(node, class);
            true
        }
    }

    /// Forces the class on or off.
    pub fn set_class(&mut self, node: NodeId, class: &str, present: bool) {
        if present {
            self.add_class(node, class);
        } else {
            self.remove_class(node, class);
        }
    }

    // ------------------------------------------------------------------
    // Attributes and inline style
    // ------------------------------------------------------------------

    pub fn attr(&self, node: NodeId, name: &str) -> Option<&str> {
        self.node(node).attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, node: NodeId, name: &str, value: &str) {
        self.node_mut(node)
            .attrs
            .insert(name.to_string(), value.to_string());
    }

    /// Removes the attribute entirely; a later [`Self::attr`] returns `None`.
    pub fn remove_attr(&mut self, node: NodeId, name: &str) {
        self.node_mut(node).attrs.remove(name);
    }

    pub fn style(&self, node: NodeId, property: &str) -> Option<&str> {
        self.node(node).style.get(property).map(String::as_str)
    }

    pub fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        self.node_mut(node)
            .style
            .insert(property.to_string(), value.to_string());
    }

    pub fn display(&self, node: NodeId) -> Option<&str> {
        self.style(node, "display")
    }

    pub fn set_display(&mut self, node: NodeId, value: &str) {
        self.set_style(node, "display", value);
    }

    // ------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------

    /// Plain text content; escaped when the document is serialized.
    pub fn set_text(&mut self, node: NodeId, text: &str) {
        let node = self.node_mut(node);
        node.text = Some(text.to_string());
        node.inner_html = None;
    }

    pub fn text(&self, node: NodeId) -> Option<&str> {
        self.node(node).text.as_deref()
    }

    /// Replaces the node's contents with a raw markup string, dropping any
    /// child nodes it had.
    pub fn set_inner_html(&mut self, node: NodeId, html: impl Into<String>) {
        let node = self.node_mut(node);
        node.children.clear();
        node.text = None;
        node.inner_html = Some(html.into());
    }

    pub fn inner_html(&self, node: NodeId) -> Option<&str> {
        self.node(node).inner_html.as_deref()
    }

    /// Renders the template with escaped data and assigns it as inner HTML.
    ///
    /// A missing target or empty template is a no-op, not an error.
    pub fn set_safe_html(&mut self, target: Option<NodeId>, template: &str, data: &[(&str, &str)]) {
        let Some(node) = target else { return };
        if template.is_empty() {
            return;
        }
        let html = render_template(template, data);
        self.set_inner_html(node, html);
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// First descendant of the root matching `selector`, or `None`.
    ///
    /// An invalid selector logs a warning and yields `None`.
    pub fn select(&self, selector: &str) -> Option<NodeId> {
        self.select_in(self.root, selector)
    }

    /// Scoped variant of [`Self::select`]: searches `scope`'s descendants only.
    pub fn select_in(&self, scope: NodeId, selector: &str) -> Option<NodeId> {
        match Selector::parse(selector) {
            Ok(parsed) => self.query(scope, &parsed).into_iter().next(),
            Err(err) => {
                warn!(selector, %err, "invalid selector");
                None
            }
        }
    }

    /// Snapshot of all descendants of the root matching `selector`.
    ///
    /// An invalid selector logs a warning and yields an empty snapshot.
    pub fn select_all(&self, selector: &str) -> Vec<NodeId> {
        self.select_all_in(self.root, selector)
    }

    pub fn select_all_in(&self, scope: NodeId, selector: &str) -> Vec<NodeId> {
        match Selector::parse(selector) {
            Ok(parsed) => self.query(scope, &parsed),
            Err(err) => {
                warn!(selector, %err, "invalid selector");
                Vec::new()
            }
        }
    }

    /// Query with a pre-parsed selector; skips the parse-and-degrade step.
    pub fn query(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        self.descendants(scope)
            .into_iter()
            .filter(|&node| selector.matches(self, node))
            .collect()
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .into_iter()
            .find(|&node| self.element_id(node) == Some(id))
    }

    /// Preorder snapshot of `scope`'s descendants, excluding `scope` itself.
    fn descendants(&self, scope: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(scope).children.iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.node(node).children.iter().rev().copied());
        }
        out
    }

    // ------------------------------------------------------------------
    // Serialization
    // ------------------------------------------------------------------

    /// Serializes the whole document from the root.
    pub fn to_html(&self) -> String {
        self.node_html(self.root)
    }

    /// Serializes one node and its subtree.
    pub fn node_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_node(node, &mut out);
        out
    }

    fn write_node(&self, id: NodeId, out: &mut String) {
        const VOID_TAGS: &[&str] = &[
            "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
            "track", "wbr",
        ];

        let node = self.node(id);
        out.push('<');
        out.push_str(&node.tag);
        if !node.classes.is_empty() {
            out.push_str(" class=\"");
            out.push_str(&escape_attr(&node.classes.join(" ")));
            out.push('"');
        }
        for (name, value) in &node.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_attr(value));
            out.push('"');
        }
        if !node.style.is_empty() {
            let css: Vec<String> = node
                .style
                .iter()
                .map(|(property, value)| format!("{property}: {value}"))
                .collect();
            out.push_str(" style=\"");
            out.push_str(&escape_attr(&css.join("; ")));
            out.push('"');
        }
        out.push('>');
        if VOID_TAGS.contains(&node.tag.as_str()) {
            return;
        }
        if let Some(html) = &node.inner_html {
            out.push_str(html);
        } else {
            if let Some(text) = &node.text {
                out.push_str(&escape_html(text));
            }
            for &child in &node.children {
                self.write_node(child, out);
            }
        }
        out.push_str("</");
        out.push_str(&node.tag);
        out.push('>');
    }
}
