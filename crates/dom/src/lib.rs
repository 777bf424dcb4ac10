//! Renderable node tree for radar print documents.
//!
//! This crate provides the document model the page builders work on:
//!
//! - [`Document`]: an arena of elements, text and comments addressed by [`NodeId`]
//! - [`Selector`]: a CSS selector subset used to locate nodes
//! - inline style helpers (`style`, `set_style`, `remove_style`)
//! - markup input via `roxmltree` and output via `quick-xml`
//!
//! The tree is fully in-memory, so everything built on top of it can be
//! exercised against hand-built fixtures without a browser.

mod document;
mod error;
mod markup;
pub mod selector;
pub mod style;

pub use document::{Attribute, Document, NodeId, NodeKind};
pub use error::{DomError, SelectorError};
pub use selector::Selector;
