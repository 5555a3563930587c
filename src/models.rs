//! Catalog records, interchange rows and reconciled updates

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// Opaque WooCommerce identifier.
///
/// The API hands out integers, but the interchange file stores text, so the id
/// is kept as text and only turned back into a number when serialized.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ResourceId(String);

impl ResourceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ResourceId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<u64> for ResourceId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

impl Serialize for ResourceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // only canonical digits go out as numbers; "007" stays text
        match self.0.parse::<u64>() {
            Ok(numeric) if numeric.to_string() == self.0 => serializer.serialize_u64(numeric),
            _ => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Unsigned(u64),
            Signed(i64),
            Text(String),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Unsigned(id) => Self(id.to_string()),
            RawId::Signed(id) => Self(id.to_string()),
            RawId::Text(id) => Self(id),
        })
    }
}

/// Treats JSON `null` like an absent field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// WooCommerce product, reduced to the fields the sync needs
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: ResourceId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub permalink: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<Image>,
}

/// Image attached to a product
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Image {
    pub id: ResourceId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub src: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alt: String,
}

/// One (product, image) pair as stored in the interchange CSV.
///
/// Field order matches the column order of the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct Row {
    #[serde(rename = "Product name")]
    pub product_name: String,

    #[serde(rename = "Image name")]
    pub image_name: String,

    #[serde(rename = "Alt")]
    pub alt: String,

    #[serde(rename = "Suggested")]
    pub suggested: String,

    #[serde(rename = "Src")]
    pub src: String,

    #[serde(rename = "Product")]
    pub permalink: String,

    #[serde(rename = "Product ID")]
    pub product_id: String,

    #[serde(rename = "Image ID")]
    pub image_id: String,
}

/// Alt (and optionally title) change for one image, as sent to `PUT /products/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImagePatch {
    pub id: ResourceId,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Every image patch for a single product, in row order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub product_id: ResourceId,
    pub images: Vec<ImagePatch>,
}

/// Image patches grouped by product.
///
/// Products keep the order in which they were first seen; patches keep the
/// order of the rows they came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconciledUpdate {
    products: Vec<ProductUpdate>,
    positions: HashMap<ResourceId, usize>,
}

impl ReconciledUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a patch to the product's list, creating the entry on first use
    pub fn push(&mut self, product_id: ResourceId, patch: ImagePatch) {
        match self.positions.get(&product_id) {
            Some(&index) => self.products[index].images.push(patch),
            None => {
                self.positions
                    .insert(product_id.clone(), self.products.len());
                self.products.push(ProductUpdate {
                    product_id,
                    images: vec![patch],
                });
            }
        }
    }

    /// Patches collected for a product
    pub fn get(&self, product_id: &ResourceId) -> Option<&[ImagePatch]> {
        self.positions
            .get(product_id)
            .map(|&index| self.products[index].images.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProductUpdate> {
        self.products.iter()
    }

    /// Number of products, i.e. the number of write calls
    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Number of image patches across all products
    pub fn image_count(&self) -> usize {
        self.products.iter().map(|p| p.images.len()).sum()
    }
}
