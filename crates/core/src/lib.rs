//! Domain types and pure logic for the product catalog.
//!
//! Nothing in this crate performs I/O; the `db` and `api` crates build on it.

pub mod attribute;
pub mod category_tree;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod search;
pub mod types;
