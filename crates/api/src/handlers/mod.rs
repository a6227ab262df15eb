pub mod attributes;
pub mod categories;
pub mod health;
pub mod meta;
pub mod products;
