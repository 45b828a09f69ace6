//! Selection of option values currently chosen on the page

use serde::Serialize;
use crate::domain::aggregates::product::{Product, Variant};
use crate::domain::value_objects::OptionPosition;

/// Chosen value per option position. `None` means unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Selection { chosen: [Option<String>; 3] }

impl Selection {
    /// Seeds every position from the variant's own values.
    pub fn from_variant(variant: &Variant) -> Self {
        Self { chosen: OptionPosition::ALL.map(|p| variant.option(p).map(str::to_string)) }
    }

    pub fn get(&self, position: OptionPosition) -> Option<&str> { self.chosen[position.index()].as_deref() }

    /// Replaces one position. Returns false when the value was already chosen.
    pub fn set(&mut self, position: OptionPosition, value: &str) -> bool {
        let slot = &mut self.chosen[position.index()];
        if slot.as_deref() == Some(value) { return false; }
        *slot = Some(value.to_string());
        true
    }

    /// A variant matches when it agrees at every declared position.
    /// An unset value on either side never matches.
    pub fn matches(&self, product: &Product, variant: &Variant) -> bool {
        product.positions().all(|p| match (self.get(p), variant.option(p)) {
            (Some(chosen), Some(value)) => chosen == value,
            _ => false,
        })
    }
}
