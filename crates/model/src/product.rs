//! Product records
//!
//! Products are the sellable catalog: each row carries an externally assigned
//! SKU (immutable once created) and owns a gallery of attached images.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopdesk_core::{Identifiable, Labelled, Record};
use uuid::Uuid;

/// Selectable product categories
pub const PRODUCT_TYPES: [&str; 4] = ["Finished good", "Raw material", "Packaging", "Other"];

// ============================================================================
// Product
// ============================================================================

/// A catalog product row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    /// External identifier; read-only after creation
    pub sku: String,
    pub name: String,
    pub supplier: String,
    pub product_type: String,
    pub price_usd: f64,
    pub min_stock: u32,
    pub created_at: DateTime<Utc>,
}

/// Insert/edit shape for a product.
///
/// Numeric fields are `Option` so an empty input stays distinguishable from
/// an explicit zero until validation runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductDraft {
    pub sku: String,
    pub name: String,
    pub supplier: String,
    pub product_type: String,
    pub price_usd: Option<f64>,
    pub min_stock: Option<u32>,
}

impl Identifiable for Product {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Labelled for Product {
    fn row_label(&self) -> String {
        self.name.clone()
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.name, self.sku)
    }
}

impl Record for Product {
    type Insert = ProductDraft;
    type Patch = ProductDraft;

    const NOUN: &'static str = "product";

    fn materialize(insert: Self::Insert) -> Self {
        Self {
            id: Uuid::new_v4(),
            sku: insert.sku,
            name: insert.name,
            supplier: insert.supplier,
            product_type: insert.product_type,
            price_usd: insert.price_usd.unwrap_or(0.0),
            min_stock: insert.min_stock.unwrap_or(0),
            created_at: Utc::now(),
        }
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        // SKU is deliberately not patched: the field is disabled in edit mode
        self.name = patch.name;
        self.supplier = patch.supplier;
        self.product_type = patch.product_type;
        self.price_usd = patch.price_usd.unwrap_or(0.0);
        self.min_stock = patch.min_stock.unwrap_or(0);
    }
}

impl Product {
    /// Re-express this row as a draft, seeding an edit form
    pub fn as_draft(&self) -> ProductDraft {
        ProductDraft {
            sku: self.sku.clone(),
            name: self.name.clone(),
            supplier: self.supplier.clone(),
            product_type: self.product_type.clone(),
            price_usd: Some(self.price_usd),
            min_stock: Some(self.min_stock),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
