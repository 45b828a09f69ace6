//! Variant resolver
//!
//! Owns the chosen option values for one product, resolves them to a variant
//! and notifies subscribers synchronously, in subscription order, whenever the
//! resolved variant changes.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use crate::domain::aggregates::gallery::{GalleryKey, GalleryLayout};
use crate::domain::aggregates::product::{Product, Variant};
use crate::domain::aggregates::selection::Selection;
use crate::domain::events::{VariantChanged, VariantSubscriber};
use crate::domain::value_objects::{Money, OptionPosition, VariantId};
use crate::{Result, StorefrontError};

type Subscriber = Box<dyn FnMut(&VariantChanged) + Send>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)] pub struct SubscriptionId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution<'a> { Resolved(&'a Variant), Unresolved }

pub struct VariantResolver {
    product: Arc<Product>,
    selection: Selection,
    current: Option<usize>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl VariantResolver {
    /// Seeds the selection from the variant named by `initial`, falling back to
    /// the first variant in source order that has a value at every declared position.
    pub fn new(product: impl Into<Arc<Product>>, initial: Option<&VariantId>) -> Result<Self> {
        let product = product.into();
        if product.variants().is_empty() {
            return Err(StorefrontError::Configuration("product has no variants".to_string()));
        }
        let requested = initial.and_then(|id| {
            let found = product.variant_index(id);
            if found.is_none() { tracing::warn!(variant = %id, "requested variant not found, using default"); }
            found
        });
        let seed = requested
            .or_else(|| product.variants().iter().position(|v| product.is_complete(v)))
            .unwrap_or(0);
        let variant = &product.variants()[seed];
        tracing::info!(variants = product.variants().len(), variant = %variant.id, "variant resolver ready");
        Ok(Self {
            selection: Selection::from_variant(variant),
            current: Some(seed),
            product,
            subscribers: Vec::new(),
            next_subscription: 0,
        })
    }

    pub fn product(&self) -> &Product { &self.product }
    pub fn selection(&self) -> &Selection { &self.selection }

    pub fn resolution(&self) -> Resolution<'_> {
        match self.variant() { Some(v) => Resolution::Resolved(v), None => Resolution::Unresolved }
    }

    pub fn variant(&self) -> Option<&Variant> { self.current.map(|i| &self.product.variants()[i]) }

    /// Replaces the value at one position and re-resolves.
    ///
    /// Returns `Ok(true)` when a `VariantChanged` was emitted. Setting the value
    /// already chosen is a no-op. Unknown positions and empty values are
    /// rejected without touching state.
    pub fn set_option(&mut self, position: u8, value: &str) -> Result<bool> {
        let position = match OptionPosition::new(position) {
            Ok(p) if self.product.declares(p) => p,
            _ => {
                tracing::warn!(position, "rejected option change for undeclared position");
                return Err(StorefrontError::InvalidArgument(format!("option position {position} is not declared by the product")));
            }
        };
        if value.is_empty() {
            tracing::warn!(%position, "rejected empty option value");
            return Err(StorefrontError::InvalidArgument(format!("empty value for option position {position}")));
        }
        if !self.selection.set(position, value) { return Ok(false); }

        let next = self.resolve();
        tracing::debug!(%position, value, resolved = ?next.map(|i| self.product.variants()[i].id.as_str()), "option changed");
        if next == self.current { return Ok(false); }
        self.current = next;
        let event = match self.variant() {
            Some(v) => VariantChanged::resolved(v.clone()),
            None => VariantChanged::no_match(),
        };
        self.raise_event(&event);
        Ok(true)
    }

    /// First variant in source order that agrees with the selection at every declared position.
    fn resolve(&self) -> Option<usize> {
        self.product.variants().iter().position(|v| self.selection.matches(&self.product, v))
    }

    pub fn is_available(&self) -> bool { self.variant().is_some_and(|v| v.available) }
    pub fn display_price(&self) -> Option<Money> { self.variant().map(|v| v.price) }
    pub fn display_compare_at_price(&self) -> Option<Money> {
        self.variant().filter(|v| v.is_marked_down()).and_then(|v| v.compare_at_price)
    }
    pub fn matching_gallery_key(&self, layout: &GalleryLayout) -> Option<GalleryKey> {
        self.variant().and_then(|v| layout.key_for(v))
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&VariantChanged) + Send + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Attaches a shared view so the host can keep reading its state.
    pub fn attach<V: VariantSubscriber + Send + 'static>(&mut self, view: Arc<Mutex<V>>) -> SubscriptionId {
        self.subscribe(move |event| view.lock().unwrap_or_else(PoisonError::into_inner).on_variant_change(event))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(s, _)| *s != id);
        self.subscribers.len() != before
    }

    fn raise_event(&mut self, event: &VariantChanged) {
        for (_, subscriber) in self.subscribers.iter_mut() { subscriber(event); }
    }
}

impl fmt::Debug for VariantResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VariantResolver")
            .field("selection", &self.selection)
            .field("variant", &self.variant().map(|v| &v.id))
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Resolver shared between input sources. Each `set_option` runs mutation,
/// resolution and notification under one lock; subscribers must not call
/// back into the same handle.
#[derive(Clone, Debug)]
pub struct SharedResolver(Arc<Mutex<VariantResolver>>);

impl SharedResolver {
    pub fn new(resolver: VariantResolver) -> Self { Self(Arc::new(Mutex::new(resolver))) }
    pub fn set_option(&self, position: u8, value: &str) -> Result<bool> { self.lock().set_option(position, value) }
    pub fn with<R>(&self, f: impl FnOnce(&mut VariantResolver) -> R) -> R { f(&mut self.lock()) }
    fn lock(&self) -> MutexGuard<'_, VariantResolver> { self.0.lock().unwrap_or_else(PoisonError::into_inner) }
}
