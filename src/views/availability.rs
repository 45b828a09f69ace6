//! Add-to-cart button and quantity select state

use std::fmt;
use serde::Serialize;
use crate::config::ThemeStrings;
use crate::domain::aggregates::Variant;
use crate::domain::events::{VariantChanged, VariantSubscriber};
use crate::views::EnhancedSelect;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AddToCartState {
    pub disabled: bool,
    pub label: String,
    /// Price elements are hidden when the selection matches no variant.
    pub price_hidden: bool,
}

pub struct AvailabilityView {
    strings: ThemeStrings,
    add_to_cart: AddToCartState,
    quantity_disabled: bool,
    quantity_select: Option<Box<dyn EnhancedSelect>>,
}

impl AvailabilityView {
    pub fn new(strings: ThemeStrings, initial: Option<&Variant>) -> Self {
        let add_to_cart = add_to_cart_state(&strings, initial);
        Self { strings, add_to_cart, quantity_disabled: !initial.is_some_and(|v| v.available), quantity_select: None }
    }

    pub fn with_quantity_select(mut self, select: impl EnhancedSelect + 'static) -> Self {
        self.quantity_select = Some(Box::new(select));
        self
    }

    pub fn add_to_cart(&self) -> &AddToCartState { &self.add_to_cart }
    pub fn quantity_disabled(&self) -> bool { self.quantity_disabled }
}

fn add_to_cart_state(strings: &ThemeStrings, variant: Option<&Variant>) -> AddToCartState {
    match variant {
        None => AddToCartState { disabled: true, label: strings.unavailable.clone(), price_hidden: true },
        Some(v) if v.available => AddToCartState { disabled: false, label: strings.add_to_cart.clone(), price_hidden: false },
        Some(_) => AddToCartState { disabled: true, label: strings.sold_out.clone(), price_hidden: false },
    }
}

impl VariantSubscriber for AvailabilityView {
    fn on_variant_change(&mut self, event: &VariantChanged) {
        self.add_to_cart = add_to_cart_state(&self.strings, event.variant());
        if let Some(select) = self.quantity_select.as_mut() { select.close(); }
        self.quantity_disabled = !event.variant().is_some_and(|v| v.available);
        if let Some(select) = self.quantity_select.as_mut() { select.refresh(); }
    }
}

impl fmt::Debug for AvailabilityView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AvailabilityView")
            .field("add_to_cart", &self.add_to_cart)
            .field("quantity_disabled", &self.quantity_disabled)
            .finish()
    }
}
