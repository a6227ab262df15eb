//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async read methods
//! that accept `&PgPool` as the first argument.

pub mod attribute_repo;
pub mod category_repo;
pub mod product_repo;

mod bind;

pub use attribute_repo::AttributeRepo;
pub use category_repo::CategoryRepo;
pub use product_repo::ProductRepo;
