//! Price and compare-at price text

use crate::domain::aggregates::Variant;
use crate::domain::events::{VariantChanged, VariantSubscriber};
use crate::domain::value_objects::MoneyFormat;

#[derive(Clone, Debug)]
pub struct PriceView {
    format: MoneyFormat,
    price: Option<String>,
    compare_at: Option<String>,
}

impl PriceView {
    pub fn new(format: MoneyFormat, initial: Option<&Variant>) -> Self {
        let mut view = Self { format, price: None, compare_at: None };
        view.render(initial);
        view
    }

    pub fn price_text(&self) -> Option<&str> { self.price.as_deref() }
    /// Compare-at text, present only for marked-down variants.
    pub fn compare_at_text(&self) -> Option<&str> { self.compare_at.as_deref() }
    pub fn shows_compare_at(&self) -> bool { self.compare_at.is_some() }

    fn render(&mut self, variant: Option<&Variant>) {
        self.price = variant.map(|v| v.price.format(&self.format));
        self.compare_at = variant
            .filter(|v| v.is_marked_down())
            .and_then(|v| v.compare_at_price)
            .map(|c| c.format(&self.format));
    }
}

impl VariantSubscriber for PriceView {
    fn on_variant_change(&mut self, event: &VariantChanged) { self.render(event.variant()); }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Money;

    #[test]
    fn test_markdown_shown() {
        let v = Variant::new("1", Money::from_minor(1000)).with_compare_at_price(Money::from_minor(1500));
        let view = PriceView::new(MoneyFormat::default(), Some(&v));
        assert_eq!(view.price_text(), Some("$10.00"));
        assert_eq!(view.compare_at_text(), Some("$15.00"));
    }

    #[test]
    fn test_equal_compare_at_hidden() {
        let mut view = PriceView::new(MoneyFormat::default(), None);
        assert_eq!(view.price_text(), None);
        let v = Variant::new("1", Money::from_minor(1000)).with_compare_at_price(Money::from_minor(1000));
        view.on_variant_change(&VariantChanged::resolved(v));
        assert_eq!(view.price_text(), Some("$10.00"));
        assert!(!view.shows_compare_at());
    }

    #[test]
    fn test_no_match_clears() {
        let v = Variant::new("1", Money::from_minor(250));
        let mut view = PriceView::new(MoneyFormat::new("{{amount_with_comma_separator}} €").unwrap(), Some(&v));
        assert_eq!(view.price_text(), Some("2,50 €"));
        view.on_variant_change(&VariantChanged::no_match());
        assert_eq!(view.price_text(), None);
        assert_eq!(view.compare_at_text(), None);
    }
}
