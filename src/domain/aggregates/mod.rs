//! Aggregates module
pub mod product;
pub mod selection;
pub mod gallery;
pub mod resolver;

pub use product::{Product, ProductOption, Variant};
pub use selection::Selection;
pub use gallery::{GalleryKey, GalleryLayout};
pub use resolver::{Resolution, SharedResolver, SubscriptionId, VariantResolver};
