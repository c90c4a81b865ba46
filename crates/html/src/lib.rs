//! Permissive HTML parsing: a tag/attribute lexer and a tree builder that
//! recover a rooted element tree from arbitrary markup without ever failing.

pub mod debug;

mod entities;
mod lexer;
mod tree_builder;
mod types;

pub use crate::tree_builder::{TreeBuilder, parse};
pub use crate::types::{Dom, Id, Node, NodeId};
