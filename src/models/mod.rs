mod item;
mod manifest;

pub use item::{Collection, Item, Stream};
pub use manifest::{CatalogDescriptor, Manifest};
