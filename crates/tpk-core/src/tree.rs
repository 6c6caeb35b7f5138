//! Table-of-contents tree as published by the Tipitaka site.
//!
//! Every `<tree>` element is exactly one of three things: a pointer to another
//! document that holds its children, a leaf pointing at a downloadable resource,
//! or a branch whose children are inline.

use serde::Serialize;

/// One node of a table-of-contents document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tree {
    /// Human-readable label (`text` attribute). Diagnostic only.
    pub text: String,
    #[serde(flatten)]
    pub node: Node,
}

/// What a tree node refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Node {
    /// Children live in another document (`src` attribute), relative to the corpus root.
    Deferred(String),
    /// Terminal resource to download (`action` attribute), relative to the corpus root.
    Leaf(String),
    /// Children already present in this document.
    Branch(Vec<Tree>),
}

/// Flat view of a node for logging: label, source, action, child count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary<'a> {
    pub text: &'a str,
    pub src: &'a str,
    pub action: &'a str,
    pub children: usize,
}

impl Tree {
    pub fn deferred(text: impl Into<String>, src: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            node: Node::Deferred(src.into()),
        }
    }

    pub fn leaf(text: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            node: Node::Leaf(action.into()),
        }
    }

    pub fn branch(text: impl Into<String>, children: Vec<Tree>) -> Self {
        Self {
            text: text.into(),
            node: Node::Branch(children),
        }
    }

    pub fn summary(&self) -> Summary<'_> {
        let (src, action, children) = match &self.node {
            Node::Deferred(src) => (src.as_str(), "", 0),
            Node::Leaf(action) => ("", action.as_str(), 0),
            Node::Branch(children) => ("", "", children.len()),
        };
        Summary {
            text: &self.text,
            src,
            action,
            children,
        }
    }

    /// Number of nodes in this tree, including itself. Deferred documents count as one node.
    pub fn node_count(&self) -> usize {
        match &self.node {
            Node::Branch(children) => 1 + children.iter().map(Tree::node_count).sum::<usize>(),
            Node::Deferred(_) | Node::Leaf(_) => 1,
        }
    }
}
