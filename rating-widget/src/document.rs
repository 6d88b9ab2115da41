use crate::host::{ElementKind, Host, ResizeListener};
use std::collections::BTreeSet;
use std::fmt::Write;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    kind: ElementKind,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    client_size: (f64, f64),
}

impl Node {
    fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attributes: vec![],
            text: String::new(),
            children: vec![],
            parent: None,
            client_size: (0.0, 0.0),
        }
    }
}

/// A minimal element tree that stands in for a browser page. Nodes are
/// never freed; removing one only detaches it from its parent.
#[derive(Debug, Default)]
pub struct Document {
    nodes: Vec<Node>,
    listeners: BTreeSet<ResizeListener>,
    next_listener: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a detached `div` with the given client size, to embed a widget in.
    pub fn create_root(&mut self, width: f64, height: f64) -> NodeId {
        let root = self.create_element(ElementKind::Div);
        self.set_client_size(root, width, height);
        root
    }

    pub fn set_client_size(&mut self, id: NodeId, width: f64, height: f64) {
        self.nodes[id.0].client_size = (width, height);
    }

    pub fn kind(&self, id: NodeId) -> ElementKind {
        self.nodes[id.0].kind
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.nodes[id.0]
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn text(&self, id: NodeId) -> &str {
        &self.nodes[id.0].text
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// All text below `id`, concatenated in document order.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = self.nodes[id.0].text.clone();
        for &child in &self.nodes[id.0].children {
            out += &self.text_content(child);
        }
        out
    }

    /// Attached descendants of `id` with the given kind, in document order.
    pub fn descendants_of_kind(&self, id: NodeId, kind: ElementKind) -> Vec<NodeId> {
        let mut found = vec![];
        let mut stack: Vec<_> = self.nodes[id.0].children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            if self.nodes[next.0].kind == kind {
                found.push(next);
            }
            stack.extend(self.nodes[next.0].children.iter().rev());
        }
        found
    }

    pub fn resize_listeners(&self) -> impl Iterator<Item = ResizeListener> + '_ {
        self.listeners.iter().copied()
    }

    /// Serializes the subtree rooted at `id` as HTML with inline SVG.
    pub fn render(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.render_into(id, &mut out);
        out
    }

    fn render_into(&self, id: NodeId, out: &mut String) {
        let node = &self.nodes[id.0];
        let tag = node.kind.tag_name();
        let _ = write!(out, "<{}", tag);
        for (name, value) in &node.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape(value));
        }
        if node.kind.is_svg() && node.text.is_empty() && node.children.is_empty() {
            out.push_str("/>");
            return;
        }
        out.push('>');
        out.push_str(&escape(&node.text));
        for &child in &node.children {
            self.render_into(child, out);
        }
        let _ = write!(out, "</{}>", tag);
    }
}

fn escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl Host for Document {
    type Element = NodeId;

    fn client_size(&self, element: &NodeId) -> (f64, f64) {
        self.nodes[element.0].client_size
    }

    fn create_element(&mut self, kind: ElementKind) -> NodeId {
        self.nodes.push(Node::new(kind));
        NodeId(self.nodes.len() - 1)
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        if let Some(old_parent) = self.nodes[child.0].parent.take() {
            self.nodes[old_parent.0].children.retain(|c| c != child);
        }
        self.nodes[parent.0].children.push(*child);
        self.nodes[child.0].parent = Some(*parent);
    }

    fn remove_child(&mut self, parent: &NodeId, child: &NodeId) {
        if self.nodes[child.0].parent != Some(*parent) {
            tracing::warn!(?parent, ?child, "Tried to remove a node from a non-parent");
            return;
        }
        self.nodes[parent.0].children.retain(|c| c != child);
        self.nodes[child.0].parent = None;
    }

    fn set_attribute(&mut self, element: &NodeId, name: &str, value: &str) {
        let attributes = &mut self.nodes[element.0].attributes;
        match attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, old)) => *old = value.to_string(),
            None => attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn set_text(&mut self, element: &NodeId, text: &str) {
        self.nodes[element.0].text = text.to_string();
    }

    fn add_resize_listener(&mut self) -> ResizeListener {
        let listener = ResizeListener(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(listener);
        listener
    }

    fn remove_resize_listener(&mut self, listener: ResizeListener) {
        self.listeners.remove(&listener);
    }
}
