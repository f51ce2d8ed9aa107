//! Data module - Sheet loading, typed rows and display ordering

mod item;
mod loader;
mod processor;

pub use item::{Table, WishlistItem};
pub use loader::WishlistLoader;
pub use processor::{DataProcessor, SortCriterion};

#[cfg(test)]
pub(crate) use item::sample_item;
