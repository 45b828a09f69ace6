//! Product galleries
//!
//! Multi-gallery pages show the gallery matching the resolved variant's option
//! value. Single-gallery pages slide to the variant's featured image.

use std::fmt;
use crate::domain::aggregates::{GalleryKey, GalleryLayout, Product, VariantResolver};
use crate::domain::events::{VariantChanged, VariantSubscriber};
use crate::domain::value_objects::{ImageId, OptionPosition};
use crate::views::SliderWidget;
use crate::{Result, StorefrontError};

/// One gallery: a slideshow plus its synced thumbnail strip.
pub struct Gallery {
    option_value: Option<String>,
    slides: Vec<ImageId>,
    active_slide: usize,
    hidden: bool,
    sliders: Vec<Box<dyn SliderWidget>>,
}

impl Gallery {
    pub fn new(slides: Vec<ImageId>) -> Self {
        Self { option_value: None, slides, active_slide: 0, hidden: false, sliders: Vec::new() }
    }

    pub fn for_option_value(mut self, value: impl Into<String>) -> Self { self.option_value = Some(value.into()); self }
    pub fn hidden(mut self, hidden: bool) -> Self { self.hidden = hidden; self }
    /// Starts on the slide marked as initial; out-of-range indexes start at 0.
    pub fn with_initial_slide(mut self, index: usize) -> Self {
        self.active_slide = if index < self.slides.len() { index } else { 0 };
        self
    }
    pub fn with_slider(mut self, slider: impl SliderWidget + 'static) -> Self { self.sliders.push(Box::new(slider)); self }

    pub fn option_value(&self) -> Option<&str> { self.option_value.as_deref() }
    pub fn is_hidden(&self) -> bool { self.hidden }
    pub fn active_image(&self) -> Option<&ImageId> { self.slides.get(self.active_slide) }
    /// A lone slide needs no thumbnail strip.
    pub fn shows_thumbnails(&self) -> bool { self.slides.len() > 1 }
}

pub struct GalleryView {
    layout: GalleryLayout,
    galleries: Vec<Gallery>,
}

impl GalleryView {
    pub fn new(product: &Product, galleries: Vec<Gallery>, configured_position: Option<OptionPosition>) -> Result<Self> {
        if galleries.is_empty() {
            return Err(StorefrontError::Configuration("gallery view needs at least one gallery".to_string()));
        }
        let values: Vec<&str> = galleries.iter().map(|g| g.option_value().unwrap_or_default()).collect();
        let layout = GalleryLayout::for_galleries(product, &values, configured_position);
        Ok(Self { layout, galleries })
    }

    pub fn layout(&self) -> &GalleryLayout { &self.layout }
    pub fn galleries(&self) -> &[Gallery] { &self.galleries }
    pub fn visible_gallery(&self) -> Option<&Gallery> { self.galleries.iter().find(|g| !g.hidden) }

    /// Brings the galleries in line with the resolver's current variant, e.g.
    /// after construction with a requested variant from a shared link.
    pub fn sync_with(&mut self, resolver: &VariantResolver) {
        self.show(resolver.matching_gallery_key(&self.layout));
    }

    fn show(&mut self, key: Option<GalleryKey>) {
        match key {
            Some(GalleryKey::OptionValue(value)) => self.show_gallery(&value),
            Some(GalleryKey::Image(image)) => self.show_image(&image),
            None => {}
        }
    }

    fn show_gallery(&mut self, value: &str) {
        let Some(target) = self.galleries.iter().position(|g| g.option_value() == Some(value)) else { return };
        if !self.galleries[target].hidden { return; }
        for gallery in self.galleries.iter_mut() { gallery.hidden = true; }
        let gallery = &mut self.galleries[target];
        gallery.hidden = false;
        for slider in gallery.sliders.iter_mut() { slider.refresh(); }
        tracing::debug!(gallery = value, "switched product gallery");
    }

    fn show_image(&mut self, image: &ImageId) {
        let gallery = &mut self.galleries[0];
        if gallery.active_image() == Some(image) { return; }
        let Some(index) = gallery.slides.iter().position(|s| s == image) else { return };
        gallery.active_slide = index;
        for slider in gallery.sliders.iter_mut() { slider.slide_to_loop(index); }
    }
}

impl VariantSubscriber for GalleryView {
    fn on_variant_change(&mut self, event: &VariantChanged) {
        // Same key as VariantResolver::matching_gallery_key, taken from the event's variant.
        let Some(variant) = event.variant() else { return };
        self.show(self.layout.key_for(variant));
    }
}

impl fmt::Debug for GalleryView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GalleryView")
            .field("layout", &self.layout)
            .field("visible", &self.visible_gallery().and_then(Gallery::option_value))
            .finish()
    }
}
