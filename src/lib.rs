//! OpenSASE Storefront
//!
//! Product detail page state for the OpenSASE storefront theme.
//!
//! ## Features
//! - Variant resolution from selected option values
//! - Change notification to price, availability, gallery and link views
//! - Shareable variant links and address-bar history updates
//! - Collection sort query handling

pub mod config;
pub mod domain;
pub mod query;
pub mod views;

use thiserror::Error;

pub use config::{ThemeConfig, ThemeStrings};
pub use domain::aggregates::{GalleryKey, GalleryLayout, Product, ProductOption, Resolution, Selection, SharedResolver, SubscriptionId, Variant, VariantResolver};
pub use domain::events::VariantChanged;
pub use domain::value_objects::{ImageId, Money, MoneyFormat, OptionPosition, VariantId};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum StorefrontError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid product data: {0}")]
    ProductData(String),

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid theme configuration: {0}")]
    InvalidConfig(#[from] validator::ValidationErrors),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<domain::value_objects::OptionPositionError> for StorefrontError {
    fn from(e: domain::value_objects::OptionPositionError) -> Self { Self::InvalidArgument(e.to_string()) }
}

impl From<domain::value_objects::MoneyFormatError> for StorefrontError {
    fn from(e: domain::value_objects::MoneyFormatError) -> Self { Self::Configuration(e.to_string()) }
}

pub type Result<T> = std::result::Result<T, StorefrontError>;
