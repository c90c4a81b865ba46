//! Diagnostic tree dump. Debug aid only; nothing downstream depends on the
//! exact shape of these lines.

use crate::types::{Dom, Id, Node};

const INDENT_STEP: &str = "  ";
const PREVIEW_CHARS: usize = 40;

fn push_preview_replace_newlines(out: &mut String, s: &str, max_chars: usize) {
    let mut truncated = false;
    for (i, ch) in s.chars().enumerate() {
        if i == max_chars {
            truncated = true;
            break;
        }
        out.push(if ch == '\n' { ' ' } else { ch });
    }
    if truncated {
        out.push('\u{2026}');
    }
}

/// Indented recursive dump of the tree, capped at `cap` lines.
pub fn outline(dom: &Dom, cap: usize) -> Vec<String> {
    fn walk(dom: &Dom, id: Id, indent: &mut String, out: &mut Vec<String>, left: &mut usize) {
        if *left == 0 {
            return;
        }
        *left -= 1;
        match dom.get(id) {
            Some(Node::Element {
                name, attributes, ..
            }) => {
                let mut line = String::with_capacity(indent.len() + 64);
                line.push_str(indent);
                line.push('<');
                line.push_str(name);
                for (k, v) in attributes {
                    line.push(' ');
                    line.push_str(k);
                    if !v.is_empty() {
                        line.push_str("=\"");
                        line.push_str(v);
                        line.push('"');
                    }
                }
                line.push('>');
                out.push(line);

                indent.push_str(INDENT_STEP);
                for &child in dom.children(id) {
                    walk(dom, child, indent, out, left);
                }
                let new_len = indent.len() - INDENT_STEP.len();
                indent.truncate(new_len);
            }
            Some(Node::Text { text, .. }) => {
                let mut line = String::with_capacity(indent.len() + 64);
                line.push_str(indent);
                line.push('"');
                push_preview_replace_newlines(&mut line, text, PREVIEW_CHARS);
                line.push('"');
                out.push(line);
            }
            None => {}
        }
    }

    let mut out = Vec::new();
    let mut indent = String::new();
    let mut left = cap;
    walk(dom, dom.root(), &mut indent, &mut out, &mut left);
    out
}
