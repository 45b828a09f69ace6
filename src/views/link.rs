//! "View full details" link on quick view, kept pointing at the selected variant

use crate::domain::events::{VariantChanged, VariantSubscriber};
use crate::query::with_query_param;

pub const VARIANT_PARAM: &str = "variant";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkView { href: String }

impl LinkView {
    pub fn new(href: impl Into<String>) -> Self { Self { href: href.into() } }
    pub fn href(&self) -> &str { &self.href }
}

impl VariantSubscriber for LinkView {
    fn on_variant_change(&mut self, event: &VariantChanged) {
        let Some(variant) = event.variant() else { return };
        match with_query_param(&self.href, VARIANT_PARAM, variant.id.as_str()) {
            Ok(href) => self.href = href,
            Err(error) => tracing::warn!(href = %self.href, %error, "could not update full details link"),
        }
    }
}
