//! Tree Traversal
//!
//! Two walkers over the content tree:
//!
//! - [`traverse_document`] walks a persisted document as raw JSON and hands
//!   each node object to the visitor registered for its `type`. Migration steps
//!   use it because older schema versions do not decode into the typed model.
//! - [`walk`] walks a typed [`NoHeadingContent`] tree read-only, giving the
//!   visitor every node together with its chain of enclosing nodes.
//!
//! Both visit a node first, then its `children`, then its `summary`.

use crate::models::{
    ContentHeading, ContentParagraph, NoHeadingContent, Section, SectionContainer, UntitledSection,
};
use serde_json::{Map, Value};

/// Rewrite applied in place to one raw node object
pub type NodeRewrite = fn(&mut Map<String, Value>);

/// Per-type visitors for [`traverse_document`]; unset types pass through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct NodeVisitors {
    pub section: Option<NodeRewrite>,
    pub section_container: Option<NodeRewrite>,
    pub paragraph: Option<NodeRewrite>,
    pub untitled_section: Option<NodeRewrite>,
}

impl NodeVisitors {
    fn for_type(&self, node_type: &str) -> Option<NodeRewrite> {
        match node_type {
            "section" => self.section,
            "section-container" => self.section_container,
            "paragraph" => self.paragraph,
            "untitled-section" => self.untitled_section,
            _ => None,
        }
    }
}

/// Apply `visitors` to every node under the document's `content`
///
/// Takes the document by value and returns the rewritten document; the
/// caller's copy is never touched. A document without `content` is returned
/// unchanged.
///
/// # Examples
///
/// ```rust
/// use quire_core::traversal::{traverse_document, NodeVisitors};
/// use serde_json::json;
///
/// let doc = json!({ "content": { "type": "paragraph", "content": "hi" } });
/// let visitors = NodeVisitors {
///     paragraph: Some(|node| {
///         node.insert("content".to_string(), json!("bye"));
///     }),
///     ..Default::default()
/// };
///
/// let out = traverse_document(doc, &visitors);
/// assert_eq!(out["content"]["content"], "bye");
/// ```
pub fn traverse_document(mut document: Value, visitors: &NodeVisitors) -> Value {
    if let Some(content) = document.get_mut("content") {
        traverse_node(content, visitors);
    }
    document
}

/// Apply `visitors` to `node` and everything below it
pub fn traverse_node(node: &mut Value, visitors: &NodeVisitors) {
    let Some(object) = node.as_object_mut() else {
        return;
    };

    if let Some(rewrite) = object
        .get("type")
        .and_then(Value::as_str)
        .and_then(|t| visitors.for_type(t))
    {
        rewrite(object);
    }

    for key in ["children", "summary"] {
        if let Some(Value::Array(items)) = object.get_mut(key) {
            for item in items.iter_mut() {
                traverse_node(item, visitors);
            }
        }
    }
}

/// Borrowed view of any node in a typed tree, headings included
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Paragraph(&'a ContentParagraph),
    Heading(&'a ContentHeading),
    Section(&'a Section),
    SectionContainer(&'a SectionContainer),
    UntitledSection(&'a UntitledSection),
}

impl<'a> NodeRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            NodeRef::Paragraph(p) => &p.id,
            NodeRef::Heading(h) => &h.id,
            NodeRef::Section(s) => &s.id,
            NodeRef::SectionContainer(c) => &c.id,
            NodeRef::UntitledSection(u) => &u.id,
        }
    }

    pub fn as_section(&self) -> Option<&'a Section> {
        match self {
            NodeRef::Section(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_section_container(&self) -> Option<&'a SectionContainer> {
        match self {
            NodeRef::SectionContainer(c) => Some(c),
            _ => None,
        }
    }
}

impl<'a> From<&'a NoHeadingContent> for NodeRef<'a> {
    fn from(node: &'a NoHeadingContent) -> Self {
        match node {
            NoHeadingContent::Paragraph(p) => NodeRef::Paragraph(p),
            NoHeadingContent::Section(s) => NodeRef::Section(s),
            NoHeadingContent::UntitledSection(u) => NodeRef::UntitledSection(u),
            NoHeadingContent::SectionContainer(c) => NodeRef::SectionContainer(c),
        }
    }
}

/// Read-only visitor for [`walk`]
///
/// `ancestors` runs from the root down to the node's immediate owner.
pub trait ContentVisitor<'a> {
    fn visit(&mut self, node: NodeRef<'a>, ancestors: &[NodeRef<'a>]);
}

impl<'a, F> ContentVisitor<'a> for F
where
    F: FnMut(NodeRef<'a>, &[NodeRef<'a>]),
{
    fn visit(&mut self, node: NodeRef<'a>, ancestors: &[NodeRef<'a>]) {
        self(node, ancestors)
    }
}

/// Visit every node under `root` in document order
pub fn walk<'a, V: ContentVisitor<'a>>(root: &'a NoHeadingContent, visitor: &mut V) {
    let mut ancestors = Vec::new();
    walk_ref(NodeRef::from(root), &mut ancestors, visitor);
}

fn walk_ref<'a, V: ContentVisitor<'a>>(
    node: NodeRef<'a>,
    ancestors: &mut Vec<NodeRef<'a>>,
    visitor: &mut V,
) {
    visitor.visit(node, ancestors);

    ancestors.push(node);
    match node {
        NodeRef::Paragraph(_) | NodeRef::Heading(_) => {}
        NodeRef::Section(s) => {
            walk_ref(NodeRef::Heading(&s.heading), ancestors, visitor);
            for child in s.children.iter().chain(s.summary.iter()) {
                walk_ref(NodeRef::from(child), ancestors, visitor);
            }
        }
        NodeRef::SectionContainer(c) => {
            for section in &c.children {
                walk_ref(NodeRef::Section(section), ancestors, visitor);
            }
        }
        NodeRef::UntitledSection(u) => {
            for child in &u.children {
                walk_ref(NodeRef::from(child), ancestors, visitor);
            }
        }
    }
    ancestors.pop();
}

/// Ids of the nodes enclosing `id`, root first; `None` when `id` is absent
pub fn path_to<'a>(root: &'a NoHeadingContent, id: &str) -> Option<Vec<NodeRef<'a>>> {
    let mut found = None;
    walk(root, &mut |node: NodeRef<'a>, ancestors: &[NodeRef<'a>]| {
        if found.is_none() && node.id() == id {
            found = Some(ancestors.to_vec());
        }
    });
    found
}
