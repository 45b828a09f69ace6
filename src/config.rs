//! Theme settings consumed by the product page views

use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::domain::value_objects::{MoneyFormat, OptionPosition};
use crate::{Result, StorefrontError};

const ENV_PREFIX: &str = "STOREFRONT_";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ThemeConfig {
    pub money_format: MoneyFormat,
    pub strings: ThemeStrings,
    /// Write the selected variant into the address bar.
    pub enable_history_state: bool,
    /// Overrides the position used to pick a gallery in multi-gallery layouts.
    #[validate(range(min = 1, max = 3))]
    pub gallery_option_position: Option<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ThemeStrings {
    #[validate(length(min = 1))]
    pub add_to_cart: String,
    #[validate(length(min = 1))]
    pub sold_out: String,
    #[validate(length(min = 1))]
    pub unavailable: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self { money_format: MoneyFormat::default(), strings: ThemeStrings::default(), enable_history_state: true, gallery_option_position: None }
    }
}

impl Default for ThemeStrings {
    fn default() -> Self {
        Self { add_to_cart: "Add to Cart".to_string(), sold_out: "Sold Out".to_string(), unavailable: "Unavailable".to_string() }
    }
}

impl ThemeConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validated()
    }

    /// Reads `STOREFRONT_*` variables, keeping defaults for unset ones.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |name: &str| lookup(&format!("{ENV_PREFIX}{name}"));
        let mut config = Self::default();
        if let Some(format) = var("MONEY_FORMAT") { config.money_format = MoneyFormat::new(format)?; }
        if let Some(flag) = var("ENABLE_HISTORY_STATE") {
            config.enable_history_state = flag.parse().map_err(|_| StorefrontError::Configuration(format!("ENABLE_HISTORY_STATE must be true or false, got {flag:?}")))?;
        }
        if let Some(position) = var("GALLERY_OPTION_POSITION") {
            let position = position.parse().map_err(|_| StorefrontError::Configuration(format!("GALLERY_OPTION_POSITION must be 1, 2 or 3, got {position:?}")))?;
            config.gallery_option_position = Some(position);
        }
        if let Some(text) = var("ADD_TO_CART_TEXT") { config.strings.add_to_cart = text; }
        if let Some(text) = var("SOLD_OUT_TEXT") { config.strings.sold_out = text; }
        if let Some(text) = var("UNAVAILABLE_TEXT") { config.strings.unavailable = text; }
        config.validated()
    }

    pub fn validated(self) -> Result<Self> {
        self.validate()?;
        self.strings.validate()?;
        Ok(self)
    }

    pub fn gallery_option_position(&self) -> Option<OptionPosition> {
        self.gallery_option_position.and_then(|p| OptionPosition::new(p).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let c = ThemeConfig::from_json("{}").unwrap();
        assert!(c.enable_history_state);
        assert_eq!(c.money_format.template(), "${{amount}}");
        assert_eq!(c.strings.sold_out, "Sold Out");
    }

    #[test]
    fn test_from_json_overrides() {
        let c = ThemeConfig::from_json(r#"{"money_format": "{{amount_with_comma_separator}} €", "enable_history_state": false, "strings": {"sold_out": "Ausverkauft"}}"#).unwrap();
        assert!(!c.enable_history_state);
        assert_eq!(c.strings.sold_out, "Ausverkauft");
        assert_eq!(c.strings.add_to_cart, "Add to Cart");
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(matches!(ThemeConfig::from_json(r#"{"gallery_option_position": 5}"#), Err(StorefrontError::InvalidConfig(_))));
        assert!(matches!(ThemeConfig::from_json(r#"{"strings": {"unavailable": ""}}"#), Err(StorefrontError::InvalidConfig(_))));
        assert!(ThemeConfig::from_json(r#"{"money_format": "$"}"#).is_err());
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("STOREFRONT_ENABLE_HISTORY_STATE", "false"),
            ("STOREFRONT_GALLERY_OPTION_POSITION", "2"),
            ("STOREFRONT_MONEY_FORMAT", "£{{amount}}"),
        ]);
        let c = ThemeConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert!(!c.enable_history_state);
        assert_eq!(c.gallery_option_position().map(|p| p.get()), Some(2));
        assert_eq!(c.money_format.template(), "£{{amount}}");
        assert!(ThemeConfig::from_lookup(|k| (k == "STOREFRONT_ENABLE_HISTORY_STATE").then(|| "maybe".to_string())).is_err());
    }
}
