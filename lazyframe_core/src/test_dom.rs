// Copyright 2026 the Lazyframe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory [`Dom`] for unit tests.
//!
//! Nodes live in an arena and are never freed; replacing a node detaches it.
//! Markup handed to [`Dom::replace_with_markup`] is parsed by a tiny
//! tag-only parser that understands the double-quoted attributes this crate
//! emits. Text content is dropped.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use kurbo::Rect;

use crate::backend::Dom;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct NodeId(usize);

#[derive(Debug)]
struct Node {
    tag: String,
    attrs: Vec<(String, String)>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    rect: Rect,
    scroll_height: f64,
    offset_height: f64,
    display_none: bool,
}

#[derive(Debug)]
pub(crate) struct TestDom {
    nodes: Vec<Node>,
    viewport_height: f64,
    replacements: usize,
}

const DEFAULT_RECT: Rect = Rect::new(0.0, 0.0, 200.0, 300.0);

impl TestDom {
    pub(crate) fn new() -> Self {
        let mut dom = Self {
            nodes: Vec::new(),
            viewport_height: 800.0,
            replacements: 0,
        };
        dom.alloc("html".to_string(), Vec::new(), None);
        dom
    }

    pub(crate) fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub(crate) fn add_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        self.alloc(tag.to_string(), Vec::new(), Some(parent))
    }

    /// Parses `markup` and appends it to `parent`, returning the first
    /// top-level element.
    pub(crate) fn add_markup(&mut self, parent: NodeId, markup: &str) -> NodeId {
        self.parse(markup, Some(parent))[0]
    }

    pub(crate) fn set_rect(&mut self, node: NodeId, rect: Rect) {
        self.nodes[node.0].rect = rect;
    }

    pub(crate) fn set_scroll_metrics(
        &mut self,
        node: NodeId,
        scroll_height: f64,
        offset_height: f64,
    ) {
        let n = &mut self.nodes[node.0];
        n.scroll_height = scroll_height;
        n.offset_height = offset_height;
    }

    pub(crate) fn set_display_none(&mut self, node: NodeId, none: bool) {
        self.nodes[node.0].display_none = none;
    }

    pub(crate) fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height;
    }

    pub(crate) fn is_attached(&self, node: NodeId) -> bool {
        let mut current = node;
        while let Some(parent) = self.nodes[current.0].parent {
            current = parent;
        }
        current == self.root()
    }

    pub(crate) fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.attribute(&node, "class")
            .is_some_and(|c| c.split_whitespace().any(|c| c == class))
    }

    /// Number of outer-HTML replacements performed so far.
    pub(crate) fn replacements(&self) -> usize {
        self.replacements
    }

    fn alloc(
        &mut self,
        tag: String,
        attrs: Vec<(String, String)>,
        parent: Option<NodeId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            tag,
            attrs,
            parent,
            children: Vec::new(),
            rect: DEFAULT_RECT,
            scroll_height: 0.0,
            offset_height: 0.0,
            display_none: false,
        });
        if let Some(p) = parent {
            self.nodes[p.0].children.push(id);
        }
        id
    }

    fn parse(&mut self, markup: &str, parent: Option<NodeId>) -> Vec<NodeId> {
        let mut tops = Vec::new();
        let mut stack: Vec<NodeId> = Vec::new();
        let mut rest = markup;
        while let Some(start) = rest.find('<') {
            rest = &rest[start + 1..];
            let end = rest.find('>').expect("unterminated tag in test markup");
            let tag = &rest[..end];
            rest = &rest[end + 1..];
            if tag.starts_with('/') {
                stack.pop();
                continue;
            }
            let (name, attrs) = parse_tag(tag);
            let id = self.alloc(name, attrs, stack.last().copied().or(parent));
            if stack.is_empty() {
                tops.push(id);
            }
            stack.push(id);
        }
        tops
    }

    fn serialize(&self, node: NodeId, out: &mut String) {
        let n = &self.nodes[node.0];
        out.push('<');
        out.push_str(&n.tag);
        for (name, value) in &n.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        out.push('>');
        for &child in &n.children {
            self.serialize(child, out);
        }
        out.push_str("</");
        out.push_str(&n.tag);
        out.push('>');
    }

    fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.nodes[node.0].children.iter().rev().copied().collect();
        while let Some(n) = stack.pop() {
            out.push(n);
            stack.extend(self.nodes[n.0].children.iter().rev());
        }
        out
    }
}

fn parse_tag(src: &str) -> (String, Vec<(String, String)>) {
    let src = src.trim();
    let (name, mut rest) = src.split_once(char::is_whitespace).unwrap_or((src, ""));
    let mut attrs = Vec::new();
    loop {
        rest = rest.trim_start();
        if rest.is_empty() {
            break;
        }
        let name_end = rest
            .find(|c: char| c == '=' || c.is_whitespace())
            .unwrap_or(rest.len());
        let attr = rest[..name_end].to_string();
        rest = &rest[name_end..];
        if let Some(after_eq) = rest.strip_prefix('=') {
            let quoted = after_eq
                .strip_prefix('"')
                .expect("attribute values are quoted");
            let close = quoted.find('"').expect("unterminated attribute value");
            attrs.push((attr, quoted[..close].to_string()));
            rest = &quoted[close + 1..];
        } else {
            attrs.push((attr, String::new()));
        }
    }
    (name.to_ascii_lowercase(), attrs)
}

impl Dom for TestDom {
    type Node = NodeId;

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes[node.0]
            .attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn set_attribute(&mut self, node: &NodeId, name: &str, value: &str) {
        let attrs = &mut self.nodes[node.0].attrs;
        match attrs.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_string(),
            None => attrs.push((name.to_string(), value.to_string())),
        }
    }

    fn parent_element(&self, node: &NodeId) -> Option<NodeId> {
        self.nodes[node.0].parent
    }

    fn node_name(&self, node: &NodeId) -> String {
        self.nodes[node.0].tag.to_ascii_uppercase()
    }

    fn outer_html(&self, node: &NodeId) -> String {
        let mut out = String::new();
        self.serialize(*node, &mut out);
        out
    }

    fn replace_with_markup(&mut self, node: &NodeId, markup: &str) {
        let parent = self.nodes[node.0]
            .parent
            .expect("cannot replace a detached node");
        let position = self.nodes[parent.0]
            .children
            .iter()
            .position(|c| c == node)
            .expect("child listed in parent");
        self.nodes[parent.0].children.remove(position);
        self.nodes[node.0].parent = None;

        let new_nodes = self.parse(markup, None);
        for (offset, &id) in new_nodes.iter().enumerate() {
            self.nodes[id.0].parent = Some(parent);
            self.nodes[parent.0].children.insert(position + offset, id);
        }
        self.replacements += 1;
    }

    fn find_by_uuid(&self, uuid: &str) -> Option<NodeId> {
        (0..self.nodes.len()).map(NodeId).find(|&id| {
            self.is_attached(id) && self.attribute(&id, "data-esb-uuid").as_deref() == Some(uuid)
        })
    }

    fn find_iframe(&self, within: &NodeId) -> Option<NodeId> {
        self.descendants(*within)
            .into_iter()
            .find(|id| self.nodes[id.0].tag == "iframe")
    }

    fn add_class(&mut self, node: &NodeId, class: &str) {
        if self.has_class(*node, class) {
            return;
        }
        let classes = match self.attribute(node, "class") {
            Some(existing) if !existing.is_empty() => alloc::format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set_attribute(node, "class", &classes);
    }

    fn remove_class(&mut self, node: &NodeId, class: &str) {
        if let Some(existing) = self.attribute(node, "class") {
            let kept: Vec<&str> = existing
                .split_whitespace()
                .filter(|c| *c != class)
                .collect();
            self.set_attribute(node, "class", &kept.join(" "));
        }
    }

    fn has_layout_box(&self, node: &NodeId) -> bool {
        if !self.is_attached(*node) {
            return false;
        }
        let mut current = Some(*node);
        while let Some(id) = current {
            if self.nodes[id.0].display_none {
                return false;
            }
            current = self.nodes[id.0].parent;
        }
        true
    }

    fn bounding_rect(&self, node: &NodeId) -> Rect {
        self.nodes[node.0].rect
    }

    fn scroll_height(&self, node: &NodeId) -> f64 {
        self.nodes[node.0].scroll_height
    }

    fn offset_height(&self, node: &NodeId) -> f64 {
        self.nodes[node.0].offset_height
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markup_round_trips_through_the_arena() {
        let mut dom = TestDom::new();
        let body = dom.add_element(dom.root(), "body");
        let el = dom.add_markup(
            body,
            "<div class=\"a\" data-x=\"1\"><iframe data-src=\"s\"></iframe></div>",
        );
        assert_eq!(
            dom.outer_html(&el),
            "<div class=\"a\" data-x=\"1\"><iframe data-src=\"s\"></iframe></div>"
        );
        assert!(dom.find_iframe(&el).is_some());
    }

    #[test]
    fn replacement_detaches_old_node() {
        let mut dom = TestDom::new();
        let body = dom.add_element(dom.root(), "body");
        let el = dom.add_markup(body, "<div data-a=\"1\"></div>");
        dom.replace_with_markup(&el, "<div data-esb-uuid=\"u\">text</div>");
        assert!(!dom.is_attached(el));
        assert!(!dom.has_layout_box(&el));
        let new = dom.find_by_uuid("u").unwrap();
        assert_eq!(dom.parent_element(&new), Some(body));
    }

    #[test]
    fn classes_are_added_once_and_removed() {
        let mut dom = TestDom::new();
        let el = dom.add_element(dom.root(), "div");
        dom.add_class(&el, "x");
        dom.add_class(&el, "x");
        dom.add_class(&el, "y");
        assert_eq!(dom.attribute(&el, "class").as_deref(), Some("x y"));
        dom.remove_class(&el, "x");
        assert!(!dom.has_class(el, "x"));
        assert!(dom.has_class(el, "y"));
    }
}
