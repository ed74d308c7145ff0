//! DOM arena: slotmap-backed element tree with selector queries, layout boxes
//! and markup serialization.

pub mod layout;
pub mod markup;
pub mod node;
pub mod query;
pub mod tree;

pub use node::{NodeData, NodeId};
pub use tree::Dom;
