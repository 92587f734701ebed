//! Catalog change handlers.

mod catalog_change;

pub use catalog_change::CatalogChangeHandler;
