pub mod catalog;

pub use catalog::{CatalogEntry, ProjectedEntry};
