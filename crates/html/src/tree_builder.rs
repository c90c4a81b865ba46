//! Permissive tree builder: one pass over the markup, an explicit stack of
//! open elements, and implicit-tag synthesis so the top-level structure is
//! always `html > head, body` no matter what came in.
//!
//! The contract is "always produce a tree": unknown tags, unmatched closers,
//! stray angle brackets, and bad attributes all degrade into a best-effort
//! tree. This is intentionally not the HTML5 tree-construction algorithm.

use memchr::memchr2;

use crate::entities::decode_entities;
use crate::lexer::lex_tag;
use crate::types::{Dom, Id, Node};

fn is_self_closing(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

fn is_head_tag(name: &str) -> bool {
    matches!(
        name,
        "base" | "basefont" | "bgsound" | "noscript" | "link" | "meta" | "title" | "style"
            | "script"
    )
}

/// Parse a complete markup string into a [`Dom`]. Never fails.
pub fn parse(markup: &str) -> Dom {
    TreeBuilder::new().feed(markup)
}

/// Shape of the open-element stack that implicit-tag insertion dispatches on.
enum OpenShape {
    Empty,
    JustHtml,
    HtmlHead,
    Other,
}

pub struct TreeBuilder {
    nodes: Vec<Node>,
    /// Open elements, root first. Entries are always `Element`s.
    unfinished: Vec<Id>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            unfinished: Vec::new(),
        }
    }

    /// Single pass over the markup. `<` flips into tag-collection mode and
    /// flushes the pending run as text; `>` flips back and dispatches the
    /// pending run as a tag body. A trailing run still in tag mode at end of
    /// input is dropped.
    pub fn feed(mut self, markup: &str) -> Dom {
        let bytes = markup.as_bytes();
        let mut in_tag = false;
        let mut run_start = 0;
        let mut i = 0;
        // `<` and `>` are ASCII, so every slice endpoint below lands on a
        // UTF-8 char boundary.
        while let Some(rel) = memchr2(b'<', b'>', &bytes[i..]) {
            let pos = i + rel;
            debug_assert!(markup.is_char_boundary(pos));
            if bytes[pos] == b'<' {
                if pos > run_start {
                    self.add_text(&markup[run_start..pos]);
                }
                in_tag = true;
            } else {
                self.add_tag(&markup[run_start..pos]);
                in_tag = false;
            }
            run_start = pos + 1;
            i = pos + 1;
        }
        if !in_tag && run_start < markup.len() {
            self.add_text(&markup[run_start..]);
        }
        self.finish()
    }

    fn add_text(&mut self, run: &str) {
        if run.chars().all(char::is_whitespace) {
            return;
        }
        self.implicit_tags("");
        let Some(&parent) = self.unfinished.last() else {
            log::debug!(target: "html.tree_builder", "dropping text run with no open element");
            return;
        };
        let id = self.push_node(Node::Text {
            text: decode_entities(run),
            parent: Some(parent),
        });
        self.attach(parent, id);
    }

    fn add_tag(&mut self, body: &str) {
        let (name, attributes) = lex_tag(body);
        if name.starts_with('!') {
            // Comments and doctypes carry no tree structure here.
            return;
        }
        log::trace!(target: "html.tree_builder", "tag <{name}>");
        self.implicit_tags(&name);

        if name.starts_with('/') {
            if self.unfinished.len() <= 1 {
                // Nothing to close, or only the root: the root never closes.
                return;
            }
            let Some(node) = self.unfinished.pop() else {
                return;
            };
            let Some(&parent) = self.unfinished.last() else {
                return;
            };
            self.attach(parent, node);
        } else if is_self_closing(&name) {
            let Some(&parent) = self.unfinished.last() else {
                log::debug!(target: "html.tree_builder", "dropping <{name}> with no open element");
                return;
            };
            let id = self.push_node(Node::Element {
                name,
                attributes,
                parent: Some(parent),
                children: Vec::new(),
            });
            self.attach(parent, id);
        } else {
            let parent = self.unfinished.last().copied();
            let id = self.push_node(Node::Element {
                name,
                attributes,
                parent,
                children: Vec::new(),
            });
            self.unfinished.push(id);
        }
    }

    /// Close the gap between what the open stack looks like and what the
    /// top-level structure must look like, synthesizing `html`, `head`,
    /// `body`, or a `/head` closure until no rule fires. An empty `tag`
    /// probes on behalf of a text run.
    fn implicit_tags(&mut self, tag: &str) {
        loop {
            let shape = match self.unfinished.as_slice() {
                [] => OpenShape::Empty,
                [a] if self.is_named(*a, "html") => OpenShape::JustHtml,
                [a, b] if self.is_named(*a, "html") && self.is_named(*b, "head") => {
                    OpenShape::HtmlHead
                }
                _ => OpenShape::Other,
            };
            match shape {
                OpenShape::Empty if tag != "html" => {
                    log::trace!(target: "html.tree_builder", "implicit <html> before <{tag}>");
                    self.add_tag("html");
                }
                OpenShape::JustHtml if !matches!(tag, "head" | "body" | "/html") => {
                    if is_head_tag(tag) {
                        log::trace!(target: "html.tree_builder", "implicit <head> before <{tag}>");
                        self.add_tag("head");
                    } else {
                        log::trace!(target: "html.tree_builder", "implicit <body> before <{tag}>");
                        self.add_tag("body");
                    }
                }
                OpenShape::HtmlHead if tag != "/head" && !is_head_tag(tag) => {
                    log::trace!(target: "html.tree_builder", "implicit </head> before <{tag}>");
                    self.add_tag("/head");
                }
                _ => break,
            }
        }
    }

    /// Fold whatever is still open into its parent and hand out the root.
    /// Unterminated markup still yields a rooted tree.
    fn finish(mut self) -> Dom {
        if self.unfinished.is_empty() {
            // Empty input never triggered implicit insertion; probe once so
            // even "" parses to `html > body`.
            self.implicit_tags("");
        }
        while self.unfinished.len() > 1 {
            let Some(node) = self.unfinished.pop() else {
                break;
            };
            let Some(&parent) = self.unfinished.last() else {
                break;
            };
            self.attach(parent, node);
        }
        let root = self.unfinished.pop().unwrap_or(Id(0));
        Dom::new(self.nodes, root)
    }

    fn push_node(&mut self, node: Node) -> Id {
        let id = Id(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Append `child` to `parent`'s child list and point its back-reference
    /// at the parent it actually landed under. Attaching to a non-element is
    /// a defect state and drops the child rather than crashing.
    fn attach(&mut self, parent: Id, child: Id) {
        match &mut self.nodes[parent.0 as usize] {
            Node::Element { children, .. } => children.push(child),
            Node::Text { .. } => {
                log::debug!(target: "html.tree_builder", "dropping node attached to a text parent");
                return;
            }
        }
        match &mut self.nodes[child.0 as usize] {
            Node::Element { parent: p, .. } => *p = Some(parent),
            Node::Text { parent: p, .. } => *p = Some(parent),
        }
    }

    fn is_named(&self, id: Id, name: &str) -> bool {
        matches!(
            self.nodes.get(id.0 as usize),
            Some(Node::Element { name: n, .. }) if n == name
        )
    }
}
