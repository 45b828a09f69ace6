//! Domain events
use serde::{Serialize, Serializer};
use crate::domain::aggregates::Variant;

/// Emitted when the resolved variant changes, carrying the new variant or no match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VariantChanged { pub variant: Option<Variant> }

impl VariantChanged {
    pub fn resolved(variant: Variant) -> Self { Self { variant: Some(variant) } }
    pub fn no_match() -> Self { Self { variant: None } }
    pub fn variant(&self) -> Option<&Variant> { self.variant.as_ref() }
    pub fn is_no_match(&self) -> bool { self.variant.is_none() }
}

/// Receives resolution changes. Views implement this and are attached to a resolver.
pub trait VariantSubscriber {
    fn on_variant_change(&mut self, event: &VariantChanged);
}

#[derive(Serialize)]
#[serde(untagged)]
enum Wire<'a> {
    Variant { variant: &'a Variant },
    NoMatch { #[serde(rename = "noMatch")] no_match: bool },
}

impl Serialize for VariantChanged {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.variant {
            Some(variant) => Wire::Variant { variant }.serialize(serializer),
            None => Wire::NoMatch { no_match: true }.serialize(serializer),
        }
    }
}
