pub mod cache;
pub mod catalog;
pub mod loader;
pub mod source;

pub use cache::{CacheSlot, CatalogCache};
pub use catalog::{filter_by_type, streams_for, Catalog};
pub use loader::Loader;
pub use source::{DataSource, Source};
