//! Products & Variants
//!
//! The promotion engine only needs product identity: which product each
//! purchased variant belongs to.

use rustc_hash::FxHashSet;

use crate::uuids::TypedUuid;

/// Marker for product identifiers.
#[derive(Debug)]
pub enum Product {}

/// Marker for variant (size/colour SKU) identifiers.
#[derive(Debug)]
pub enum Variant {}

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Variant UUID
pub type VariantUuid = TypedUuid<Variant>;

/// What an order line refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemRef {
    /// A specific variant; its product has to be looked up.
    Variant(VariantUuid),

    /// A product directly.
    Product(ProductUuid),
}

/// A single order line as submitted for promotion validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineItem {
    /// The purchased variant or product.
    pub item: ItemRef,

    /// Units purchased.
    pub quantity: u32,
}

/// A set of product identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSet(FxHashSet<ProductUuid>);

impl ProductSet {
    /// Empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product.
    pub fn insert(&mut self, product: ProductUuid) -> bool {
        self.0.insert(product)
    }

    /// Whether the product is a member.
    pub fn contains(&self, product: &ProductUuid) -> bool {
        self.0.contains(product)
    }

    /// Whether the two sets share at least one product.
    pub fn intersects(&self, other: &ProductSet) -> bool {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };

        small.iter().any(|product| large.contains(product))
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the products in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &ProductUuid> {
        self.0.iter()
    }

    /// Products sorted by identifier, for stable output.
    pub fn to_sorted_vec(&self) -> Vec<ProductUuid> {
        let mut products: Vec<ProductUuid> = self.0.iter().copied().collect();

        products.sort_unstable();

        products
    }
}

impl FromIterator<ProductUuid> for ProductSet {
    fn from_iter<I: IntoIterator<Item = ProductUuid>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Extend<ProductUuid> for ProductSet {
    fn extend<I: IntoIterator<Item = ProductUuid>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
