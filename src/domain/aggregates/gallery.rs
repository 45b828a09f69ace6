//! Gallery layout: which key picks the gallery or slide for a variant

use crate::domain::aggregates::product::{Product, Variant};
use crate::domain::value_objects::{ImageId, OptionPosition};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GalleryLayout {
    /// One gallery; variants select a slide by featured image.
    Single,
    /// One gallery per option value at `position`.
    Multi { position: OptionPosition },
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum GalleryKey { OptionValue(String), Image(ImageId) }

impl GalleryLayout {
    /// Builds the layout for the galleries present on the page, given each
    /// gallery's option value. A configured position wins when the product declares it.
    pub fn for_galleries<S: AsRef<str>>(product: &Product, gallery_values: &[S], configured: Option<OptionPosition>) -> Self {
        if gallery_values.len() <= 1 { return Self::Single; }
        let configured = configured.filter(|p| {
            let declared = product.declares(*p);
            if !declared { tracing::warn!(position = %p, "configured gallery position is not declared by the product"); }
            declared
        });
        let position = configured
            .or_else(|| determining_position(product, gallery_values))
            .or_else(|| product.positions().next())
            .unwrap_or(OptionPosition::ALL[0]);
        Self::Multi { position }
    }

    pub fn key_for(&self, variant: &Variant) -> Option<GalleryKey> {
        match self {
            Self::Single => variant.featured_image_id.clone().map(GalleryKey::Image),
            Self::Multi { position } => variant.option(*position).map(|v| GalleryKey::OptionValue(v.to_string())),
        }
    }
}

/// Lowest position where more than one distinct gallery value occurs among
/// the variants, else the lowest position where any does.
fn determining_position<S: AsRef<str>>(product: &Product, gallery_values: &[S]) -> Option<OptionPosition> {
    let hits = |p: OptionPosition| {
        product.values_at(p).into_iter().filter(|v| gallery_values.iter().any(|g| g.as_ref() == *v)).count()
    };
    product.positions().find(|p| hits(*p) > 1).or_else(|| product.positions().find(|p| hits(*p) > 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::product::ProductOption;
    use crate::domain::value_objects::Money;

    fn pos(n: u8) -> OptionPosition { OptionPosition::new(n).unwrap() }

    fn jeans() -> Product {
        let options = vec![
            ProductOption { position: pos(1), name: "Color".into() },
            ProductOption { position: pos(2), name: "Waist".into() },
        ];
        let variants = vec![
            Variant::new("1", Money::from_minor(100)).with_option(pos(1), "Indigo").with_option(pos(2), "32"),
            Variant::new("2", Money::from_minor(100)).with_option(pos(1), "Black").with_option(pos(2), "32"),
            Variant::new("3", Money::from_minor(100)).with_option(pos(1), "Black").with_option(pos(2), "34").with_featured_image(ImageId::new("9")),
        ];
        Product::new(options, variants).unwrap()
    }

    #[test]
    fn test_single_gallery_uses_featured_image() {
        let p = jeans();
        let layout = GalleryLayout::for_galleries::<&str>(&p, &["main"], None);
        assert_eq!(layout, GalleryLayout::Single);
        assert_eq!(layout.key_for(&p.variants()[2]), Some(GalleryKey::Image(ImageId::new("9"))));
        assert_eq!(layout.key_for(&p.variants()[0]), None);
    }

    #[test]
    fn test_multi_gallery_picks_lowest_distinguishing_position() {
        let p = jeans();
        let layout = GalleryLayout::for_galleries(&p, &["Indigo", "Black"], None);
        assert_eq!(layout, GalleryLayout::Multi { position: pos(1) });
        assert_eq!(layout.key_for(&p.variants()[1]), Some(GalleryKey::OptionValue("Black".into())));
    }

    #[test]
    fn test_multi_gallery_prefers_distinguishing_over_lower_single_hit() {
        let p = jeans();
        let layout = GalleryLayout::for_galleries(&p, &["Black", "32", "34"], None);
        assert_eq!(layout, GalleryLayout::Multi { position: pos(2) });
    }

    #[test]
    fn test_configured_position_must_be_declared() {
        let p = jeans();
        assert_eq!(GalleryLayout::for_galleries(&p, &["32", "34"], Some(pos(2))), GalleryLayout::Multi { position: pos(2) });
        assert_eq!(GalleryLayout::for_galleries(&p, &["Indigo", "Black"], Some(pos(3))), GalleryLayout::Multi { position: pos(1) });
    }
}
