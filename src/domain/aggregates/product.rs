//! Product Aggregate
//!
//! Immutable product and variant data, built once from the JSON the product
//! template embeds in the page.

use serde::{Deserialize, Serialize};
use crate::domain::value_objects::{ImageId, Money, OptionPosition, VariantId};
use crate::{Result, StorefrontError};

#[derive(Clone, Debug, Serialize)]
pub struct Product {
    id: Option<String>,
    title: String,
    options: Vec<ProductOption>,
    variants: Vec<Variant>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)] pub struct ProductOption { pub position: OptionPosition, pub name: String }

/// A purchasable combination of option values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Variant {
    pub id: VariantId,
    pub title: String,
    option_values: [Option<String>; 3],
    pub price: Money,
    pub compare_at_price: Option<Money>,
    pub available: bool,
    pub featured_image_id: Option<ImageId>,
}

impl Variant {
    pub fn new(id: impl Into<String>, price: Money) -> Self {
        Self {
            id: VariantId::new(id), title: String::new(), option_values: Default::default(),
            price, compare_at_price: None, available: true, featured_image_id: None,
        }
    }

    pub fn with_option(mut self, position: OptionPosition, value: impl Into<String>) -> Self {
        self.option_values[position.index()] = Some(value.into());
        self
    }
    pub fn with_title(mut self, title: impl Into<String>) -> Self { self.title = title.into(); self }
    pub fn with_compare_at_price(mut self, price: Money) -> Self { self.compare_at_price = Some(price); self }
    pub fn with_availability(mut self, available: bool) -> Self { self.available = available; self }
    pub fn with_featured_image(mut self, image: ImageId) -> Self { self.featured_image_id = Some(image); self }

    /// Value at `position`, `None` when the variant has no value there.
    pub fn option(&self, position: OptionPosition) -> Option<&str> { self.option_values[position.index()].as_deref() }

    /// True when the compare-at price is strictly above the selling price.
    pub fn is_marked_down(&self) -> bool { self.compare_at_price.is_some_and(|c| c > self.price) }
}

impl Product {
    pub fn new(options: Vec<ProductOption>, variants: Vec<Variant>) -> Result<Self> {
        if options.len() > usize::from(OptionPosition::MAX) {
            return Err(StorefrontError::ProductData(format!("{} options declared, at most 3 allowed", options.len())));
        }
        for (i, option) in options.iter().enumerate() {
            if option.name.trim().is_empty() {
                return Err(StorefrontError::ProductData(format!("option at position {} has no name", option.position)));
            }
            if options[..i].iter().any(|o| o.position == option.position) {
                return Err(StorefrontError::ProductData(format!("option position {} declared twice", option.position)));
            }
        }
        let mut options = options;
        options.sort_by_key(|o| o.position);
        Ok(Self { id: None, title: String::new(), options, variants })
    }

    /// Parses the product JSON embedded by the product template.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: ProductJson = serde_json::from_str(json)?;
        raw.try_into()
    }

    pub fn id(&self) -> Option<&str> { self.id.as_deref() }
    pub fn title(&self) -> &str { &self.title }
    pub fn options(&self) -> &[ProductOption] { &self.options }
    pub fn variants(&self) -> &[Variant] { &self.variants }

    pub fn positions(&self) -> impl Iterator<Item = OptionPosition> + '_ { self.options.iter().map(|o| o.position) }
    pub fn declares(&self, position: OptionPosition) -> bool { self.positions().any(|p| p == position) }

    /// Source-order index of the variant with `id`.
    pub fn variant_index(&self, id: &VariantId) -> Option<usize> { self.variants.iter().position(|v| &v.id == id) }

    /// True when the variant has a value at every declared position.
    pub fn is_complete(&self, variant: &Variant) -> bool { self.positions().all(|p| variant.option(p).is_some()) }

    /// Distinct values at `position`, in variant source order.
    pub fn values_at(&self, position: OptionPosition) -> Vec<&str> {
        let mut values: Vec<&str> = Vec::new();
        for value in self.variants.iter().filter_map(|v| v.option(position)) {
            if !values.contains(&value) { values.push(value); }
        }
        values
    }
}

// Wire shapes of the embedded product JSON.

#[derive(Deserialize)]
struct ProductJson {
    #[serde(default)] id: Option<JsonId>,
    #[serde(default)] title: String,
    #[serde(default)] options: Vec<OptionJson>,
    #[serde(default)] variants: Vec<VariantJson>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonId { Number(u64), Text(String) }

impl JsonId {
    fn into_string(self) -> String {
        match self { Self::Number(n) => n.to_string(), Self::Text(s) => s }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OptionJson { Name(String), Detailed { name: String, position: u8 } }

#[derive(Deserialize)]
struct VariantJson {
    id: JsonId,
    #[serde(default)] title: String,
    #[serde(default)] option1: Option<String>,
    #[serde(default)] option2: Option<String>,
    #[serde(default)] option3: Option<String>,
    price: u64,
    #[serde(default)] compare_at_price: Option<u64>,
    #[serde(default)] available: bool,
    #[serde(default)] featured_image: Option<FeaturedImageJson>,
}

#[derive(Deserialize)]
struct FeaturedImageJson { id: JsonId }

impl TryFrom<ProductJson> for Product {
    type Error = StorefrontError;

    fn try_from(raw: ProductJson) -> Result<Self> {
        let mut options = Vec::with_capacity(raw.options.len());
        for (i, option) in raw.options.into_iter().enumerate() {
            let (name, position) = match option {
                OptionJson::Name(name) => (name, u8::try_from(i + 1).unwrap_or(u8::MAX)),
                OptionJson::Detailed { name, position } => (name, position),
            };
            let position = OptionPosition::new(position).map_err(|e| StorefrontError::ProductData(e.to_string()))?;
            options.push(ProductOption { position, name });
        }
        let variants = raw.variants.into_iter().map(|v| Variant {
            id: VariantId::new(v.id.into_string()),
            title: v.title,
            option_values: [v.option1, v.option2, v.option3].map(|value| value.filter(|s| !s.is_empty())),
            price: Money::from_minor(v.price),
            compare_at_price: v.compare_at_price.map(Money::from_minor),
            available: v.available,
            featured_image_id: v.featured_image.map(|image| ImageId::new(image.id.into_string())),
        }).collect();
        let mut product = Product::new(options, variants)?;
        product.id = raw.id.map(JsonId::into_string);
        product.title = raw.title;
        Ok(product)
    }
}
