//! Collection listing sort control

use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::query::{get_param, set_param};
use crate::{Result, StorefrontError};

pub const SORT_PARAM: &str = "sort_by";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    Manual,
    BestSelling,
    TitleAscending,
    TitleDescending,
    PriceAscending,
    PriceDescending,
    CreatedAscending,
    CreatedDescending,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Manual => "manual",
            SortOrder::BestSelling => "best-selling",
            SortOrder::TitleAscending => "title-ascending",
            SortOrder::TitleDescending => "title-descending",
            SortOrder::PriceAscending => "price-ascending",
            SortOrder::PriceDescending => "price-descending",
            SortOrder::CreatedAscending => "created-ascending",
            SortOrder::CreatedDescending => "created-descending",
        }
    }
}

impl FromStr for SortOrder {
    type Err = StorefrontError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "manual" => Ok(SortOrder::Manual),
            "best-selling" => Ok(SortOrder::BestSelling),
            "title-ascending" => Ok(SortOrder::TitleAscending),
            "title-descending" => Ok(SortOrder::TitleDescending),
            "price-ascending" => Ok(SortOrder::PriceAscending),
            "price-descending" => Ok(SortOrder::PriceDescending),
            "created-ascending" => Ok(SortOrder::CreatedAscending),
            "created-descending" => Ok(SortOrder::CreatedDescending),
            other => Err(StorefrontError::InvalidArgument(format!("unknown sort order {other:?}"))),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

/// Collection data embedded by the collection template.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionData {
    pub handle: String,
    #[serde(default)]
    pub default_sort_by: SortOrder,
}

#[derive(Clone, Debug)]
pub struct CollectionSort { collection: CollectionData }

impl CollectionSort {
    /// Pages without collection data get no sort control.
    pub fn new(collection: Option<CollectionData>) -> Option<Self> { collection.map(|collection| Self { collection }) }

    pub fn handle(&self) -> &str { &self.collection.handle }

    /// Sort order in effect for `search`, falling back to the collection default.
    pub fn current_sort(&self, search: &str) -> SortOrder {
        get_param(search, SORT_PARAM).and_then(|s| s.parse().ok()).unwrap_or(self.collection.default_sort_by)
    }

    /// New search string with `sort_by` set and every other parameter kept.
    pub fn apply_sort(&self, search: &str, sort_by: &str) -> Result<String> {
        let order: SortOrder = sort_by.parse()?;
        tracing::debug!(collection = %self.collection.handle, sort_by = %order, "applying collection sort");
        Ok(set_param(search, SORT_PARAM, order.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorter() -> CollectionSort {
        CollectionSort::new(Some(CollectionData { handle: "shirts".into(), default_sort_by: SortOrder::BestSelling })).unwrap()
    }

    #[test]
    fn test_requires_collection_data() { assert!(CollectionSort::new(None).is_none()); }

    #[test]
    fn test_apply_sort_keeps_other_params() {
        let s = sorter();
        assert_eq!(s.apply_sort("?filter.v.color=Red&page=2", "price-descending").unwrap(), "filter.v.color=Red&page=2&sort_by=price-descending");
        assert_eq!(s.apply_sort("sort_by=manual&page=2", "title-ascending").unwrap(), "sort_by=title-ascending&page=2");
        assert!(matches!(s.apply_sort("", "cheapest"), Err(StorefrontError::InvalidArgument(_))));
    }

    #[test]
    fn test_current_sort() {
        let s = sorter();
        assert_eq!(s.current_sort("?sort_by=created-descending"), SortOrder::CreatedDescending);
        assert_eq!(s.current_sort("?sort_by=bogus"), SortOrder::BestSelling);
        assert_eq!(s.current_sort(""), SortOrder::BestSelling);
    }

    #[test]
    fn test_collection_data_json() {
        let data: CollectionData = serde_json::from_str(r#"{"handle": "all", "default_sort_by": "price-ascending"}"#).unwrap();
        assert_eq!(data.default_sort_by, SortOrder::PriceAscending);
    }
}
