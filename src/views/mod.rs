//! Views driven by variant resolution
//!
//! Views keep plain state that the host renders. Third-party widgets (sliders,
//! enhanced selects, the address bar) sit behind the traits below and only
//! receive outbound calls.

pub mod availability;
pub mod collection;
pub mod gallery;
pub mod history;
pub mod link;
pub mod options;
pub mod price;

pub use crate::domain::events::VariantSubscriber;
pub use availability::{AddToCartState, AvailabilityView};
pub use collection::{CollectionData, CollectionSort, SortOrder};
pub use gallery::{Gallery, GalleryView};
pub use history::HistoryAdapter;
pub use link::LinkView;
pub use options::{OptionChange, OptionInputs};
pub use price::PriceView;

/// Slideshow or thumbnail carousel.
pub trait SliderWidget: Send {
    /// Re-measure after the gallery became visible.
    fn refresh(&mut self);
    fn slide_to_loop(&mut self, index: usize);
}

/// Enhanced `<select>` replacement.
pub trait EnhancedSelect: Send {
    fn close(&mut self) {}
    fn refresh(&mut self);
}

/// Browser-visible address.
pub trait AddressBar: Send {
    fn current(&self) -> String;
    /// Replaces the current history entry without reloading.
    fn replace_state(&mut self, url: &str);
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::{Arc, Mutex};
    use super::{AddressBar, EnhancedSelect, SliderWidget};

    /// Widget double that logs every call it receives.
    #[derive(Clone, Default)]
    pub struct Recorder(pub Arc<Mutex<Vec<String>>>);

    impl Recorder {
        pub fn calls(&self) -> Vec<String> { self.0.lock().unwrap().clone() }
        fn push(&self, call: String) { self.0.lock().unwrap().push(call); }
    }

    impl SliderWidget for Recorder {
        fn refresh(&mut self) { self.push("refresh".into()); }
        fn slide_to_loop(&mut self, index: usize) { self.push(format!("slide:{index}")); }
    }

    impl EnhancedSelect for Recorder {
        fn close(&mut self) { self.push("close".into()); }
        fn refresh(&mut self) { self.push("refresh".into()); }
    }

    #[derive(Clone)]
    pub struct FakeAddressBar { pub url: Arc<Mutex<String>>, pub replaced: Recorder }

    impl FakeAddressBar {
        pub fn at(url: &str) -> Self { Self { url: Arc::new(Mutex::new(url.to_string())), replaced: Recorder::default() } }
    }

    impl AddressBar for FakeAddressBar {
        fn current(&self) -> String { self.url.lock().unwrap().clone() }
        fn replace_state(&mut self, url: &str) {
            *self.url.lock().unwrap() = url.to_string();
            self.replaced.push(url.to_string());
        }
    }
}
