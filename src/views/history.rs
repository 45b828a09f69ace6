//! Keeps the selected variant in the address bar so reloads and shared links preserve it

use std::fmt;
use crate::domain::events::{VariantChanged, VariantSubscriber};
use crate::query::with_query_param;
use crate::views::link::VARIANT_PARAM;
use crate::views::AddressBar;

pub struct HistoryAdapter {
    enabled: bool,
    address_bar: Box<dyn AddressBar>,
}

impl HistoryAdapter {
    pub fn new(enabled: bool, address_bar: impl AddressBar + 'static) -> Self {
        Self { enabled, address_bar: Box::new(address_bar) }
    }

    pub fn is_enabled(&self) -> bool { self.enabled }
}

impl VariantSubscriber for HistoryAdapter {
    fn on_variant_change(&mut self, event: &VariantChanged) {
        if !self.enabled { return; }
        let Some(variant) = event.variant() else { return };
        let current = self.address_bar.current();
        match with_query_param(&current, VARIANT_PARAM, variant.id.as_str()) {
            Ok(url) if url != current => self.address_bar.replace_state(&url),
            Ok(_) => {}
            Err(error) => tracing::warn!(url = %current, %error, "could not write variant into address"),
        }
    }
}

impl fmt::Debug for HistoryAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HistoryAdapter").field("enabled", &self.enabled).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::Variant;
    use crate::domain::value_objects::Money;
    use crate::views::testing::FakeAddressBar;

    #[test]
    fn test_replaces_state() {
        let bar = FakeAddressBar::at("https://shop.example/products/shirt?utm_source=mail");
        let mut history = HistoryAdapter::new(true, bar.clone());
        history.on_variant_change(&VariantChanged::resolved(Variant::new("3", Money::from_minor(1))));
        history.on_variant_change(&VariantChanged::resolved(Variant::new("3", Money::from_minor(1))));
        history.on_variant_change(&VariantChanged::no_match());
        assert_eq!(bar.replaced.calls(), vec!["https://shop.example/products/shirt?utm_source=mail&variant=3"]);
    }

    #[test]
    fn test_disabled() {
        let bar = FakeAddressBar::at("https://shop.example/products/shirt");
        let mut history = HistoryAdapter::new(false, bar.clone());
        history.on_variant_change(&VariantChanged::resolved(Variant::new("3", Money::from_minor(1))));
        assert!(bar.replaced.calls().is_empty());
        assert_eq!(bar.current(), "https://shop.example/products/shirt");
    }
}
