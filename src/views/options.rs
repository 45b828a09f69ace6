//! Option inputs: dropdowns and swatch lists
//!
//! Inbound, user picks become [`OptionChange`]s applied to the resolver.
//! Outbound, [`OptionInputs`] marks the resolved variant's values active.

use std::fmt;
use std::str::FromStr;
use crate::domain::aggregates::{Variant, VariantResolver};
use crate::domain::events::{VariantChanged, VariantSubscriber};
use crate::domain::value_objects::OptionPosition;
use crate::views::EnhancedSelect;
use crate::{Result, StorefrontError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionChange { pub position: OptionPosition, pub value: String }

impl OptionChange {
    pub fn new(position: u8, value: impl Into<String>) -> Result<Self> {
        Ok(Self { position: OptionPosition::new(position)?, value: value.into() })
    }

    /// From a dropdown whose index attribute reads `option1`..`option3`.
    pub fn from_selector_index(index: &str, value: impl Into<String>) -> Result<Self> {
        Ok(Self { position: OptionPosition::from_selector_index(index)?, value: value.into() })
    }

    /// Returns whether the resolved variant changed.
    pub fn apply(&self, resolver: &mut VariantResolver) -> Result<bool> {
        resolver.set_option(self.position.get(), &self.value)
    }
}

/// Parses `POSITION=VALUE`, e.g. `2=Blue`.
impl FromStr for OptionChange {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self> {
        let (position, value) = s.split_once('=')
            .ok_or_else(|| StorefrontError::InvalidArgument(format!("expected POSITION=VALUE, got {s:?}")))?;
        let position = position.trim().parse::<u8>()
            .map_err(|_| StorefrontError::InvalidArgument(format!("option position {position:?} is not a number")))?;
        Self::new(position, value)
    }
}

pub struct OptionInputs {
    active: [Option<String>; 3],
    labels: [Option<String>; 3],
    selects: Option<Box<dyn EnhancedSelect>>,
}

impl OptionInputs {
    pub fn new(initial: Option<&Variant>) -> Self {
        let mut inputs = Self { active: Default::default(), labels: Default::default(), selects: None };
        if let Some(variant) = initial { inputs.mark_active(variant); }
        inputs
    }

    pub fn with_selects(mut self, selects: impl EnhancedSelect + 'static) -> Self {
        self.selects = Some(Box::new(selects));
        self
    }

    pub fn active(&self, position: OptionPosition) -> Option<&str> { self.active[position.index()].as_deref() }
    pub fn is_active(&self, position: OptionPosition, value: &str) -> bool { self.active(position) == Some(value) }
    /// Title of the value last clicked at `position`, shown next to the option name.
    pub fn label(&self, position: OptionPosition) -> Option<&str> { self.labels[position.index()].as_deref() }

    /// Handles a click on a swatch. Clicking the active value does nothing and
    /// returns false; otherwise the value is marked active, its title becomes
    /// the position's label, and the caller applies `change` to the resolver.
    pub fn click(&mut self, change: &OptionChange, title: impl Into<String>) -> bool {
        if self.is_active(change.position, &change.value) { return false; }
        let i = change.position.index();
        self.active[i] = Some(change.value.clone());
        self.labels[i] = Some(title.into());
        true
    }

    // Lists are scoped per position: two options may share values ("32" waist and inseam).
    fn mark_active(&mut self, variant: &Variant) {
        for position in OptionPosition::ALL {
            let Some(value) = variant.option(position) else { break };
            self.active[position.index()] = Some(value.to_string());
        }
    }
}

impl VariantSubscriber for OptionInputs {
    fn on_variant_change(&mut self, event: &VariantChanged) {
        if let Some(variant) = event.variant() { self.mark_active(variant); }
        if let Some(selects) = self.selects.as_mut() { selects.refresh(); }
    }
}

impl fmt::Debug for OptionInputs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionInputs").field("active", &self.active).field("labels", &self.labels).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Money;
    use crate::views::testing::Recorder;

    fn pos(n: u8) -> OptionPosition { OptionPosition::new(n).unwrap() }

    #[test]
    fn test_parse_change() {
        assert_eq!("2=Blue".parse::<OptionChange>().unwrap(), OptionChange::new(2, "Blue").unwrap());
        assert_eq!("1=a=b".parse::<OptionChange>().unwrap().value, "a=b");
        assert!("Blue".parse::<OptionChange>().is_err());
        assert!("x=Blue".parse::<OptionChange>().is_err());
        assert!("7=Blue".parse::<OptionChange>().is_err());
        assert_eq!(OptionChange::from_selector_index("option3", "Wool").unwrap().position, pos(3));
    }

    #[test]
    fn test_marks_active_until_first_gap() {
        let v = Variant::new("1", Money::from_minor(1)).with_option(pos(1), "32").with_option(pos(3), "Tall");
        let inputs = OptionInputs::new(Some(&v));
        assert!(inputs.is_active(pos(1), "32"));
        assert_eq!(inputs.active(pos(3)), None);
    }

    #[test]
    fn test_no_match_keeps_marks_and_refreshes() {
        let selects = Recorder::default();
        let v = Variant::new("1", Money::from_minor(1)).with_option(pos(1), "S");
        let mut inputs = OptionInputs::new(Some(&v)).with_selects(selects.clone());
        inputs.on_variant_change(&VariantChanged::no_match());
        assert!(inputs.is_active(pos(1), "S"));
        inputs.on_variant_change(&VariantChanged::resolved(Variant::new("2", Money::from_minor(1)).with_option(pos(1), "M")));
        assert!(inputs.is_active(pos(1), "M"));
        assert_eq!(selects.calls(), vec!["refresh", "refresh"]);
    }

    #[test]
    fn test_click_sets_label() {
        let v = Variant::new("1", Money::from_minor(1)).with_option(pos(1), "S").with_option(pos(2), "Red");
        let mut inputs = OptionInputs::new(Some(&v));
        assert_eq!(inputs.label(pos(2)), None);
        assert!(!inputs.click(&OptionChange::new(2, "Red").unwrap(), "Cherry Red"));
        assert_eq!(inputs.label(pos(2)), None);

        let blue = OptionChange::new(2, "Blue").unwrap();
        assert!(inputs.click(&blue, "Navy Blue"));
        assert!(inputs.is_active(pos(2), "Blue"));
        assert_eq!(inputs.label(pos(2)), Some("Navy Blue"));
        assert_eq!(inputs.label(pos(1)), None);
        assert!(!inputs.click(&blue, "Navy Blue"));
    }
}
