//! Purchase records and their line items
//!
//! A purchase is an inbound supplier order; its line items reference catalog
//! SKUs by value. Structure mirrors orders: parent row plus `ChildRecord`
//! line items keyed by `purchase_id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopdesk_core::{ChildRecord, Identifiable, Labelled, Record};
use uuid::Uuid;

// ============================================================================
// Purchase
// ============================================================================

/// A supplier purchase row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: Uuid,
    pub purchase_order_no: String,
    pub order_date: Option<DateTime<Utc>>,
    pub date_received: Option<DateTime<Utc>>,
    pub shipping_fee_domestic: f64,
    pub shipping_fee_international: f64,
    pub created_at: DateTime<Utc>,
}

/// Insert/edit shape for a purchase
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseDraft {
    pub purchase_order_no: String,
    pub order_date: Option<DateTime<Utc>>,
    pub date_received: Option<DateTime<Utc>>,
    pub shipping_fee_domestic: Option<f64>,
    pub shipping_fee_international: Option<f64>,
}

impl Identifiable for Purchase {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Labelled for Purchase {
    fn row_label(&self) -> String {
        self.purchase_order_no.clone()
    }
}

impl Record for Purchase {
    type Insert = PurchaseDraft;
    type Patch = PurchaseDraft;

    const NOUN: &'static str = "purchase";

    fn materialize(insert: Self::Insert) -> Self {
        Self {
            id: Uuid::new_v4(),
            purchase_order_no: insert.purchase_order_no,
            order_date: insert.order_date,
            date_received: insert.date_received,
            shipping_fee_domestic: insert.shipping_fee_domestic.unwrap_or(0.0),
            shipping_fee_international: insert.shipping_fee_international.unwrap_or(0.0),
            created_at: Utc::now(),
        }
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        self.purchase_order_no = patch.purchase_order_no;
        self.order_date = patch.order_date;
        self.date_received = patch.date_received;
        self.shipping_fee_domestic = patch.shipping_fee_domestic.unwrap_or(0.0);
        self.shipping_fee_international = patch.shipping_fee_international.unwrap_or(0.0);
    }
}

impl Purchase {
    /// Re-express this row as a draft, seeding an edit form
    pub fn as_draft(&self) -> PurchaseDraft {
        PurchaseDraft {
            purchase_order_no: self.purchase_order_no.clone(),
            order_date: self.order_date,
            date_received: self.date_received,
            shipping_fee_domestic: Some(self.shipping_fee_domestic),
            shipping_fee_international: Some(self.shipping_fee_international),
        }
    }
}

// ============================================================================
// PurchaseItem
// ============================================================================

/// A line item owned by one purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseItem {
    pub id: Uuid,
    pub purchase_id: Uuid,
    pub sku: String,
    pub quantity: u32,
}

/// Edited line-item shape; see `OrderItemDraft` for the id conventions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseItemDraft {
    pub id: Option<Uuid>,
    pub purchase_id: Option<Uuid>,
    pub sku: String,
    pub quantity: u32,
}

/// Minimal patch: exactly the columns that differ from the original
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PurchaseItemPatch {
    pub sku: Option<String>,
    pub quantity: Option<u32>,
}

impl Identifiable for PurchaseItem {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for PurchaseItem {
    type Insert = PurchaseItemDraft;
    type Patch = PurchaseItemPatch;

    const NOUN: &'static str = "purchase item";

    fn materialize(insert: Self::Insert) -> Self {
        Self {
            id: Uuid::new_v4(),
            purchase_id: insert.purchase_id.unwrap_or_default(),
            sku: insert.sku,
            quantity: insert.quantity,
        }
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        if let Some(sku) = patch.sku {
            self.sku = sku;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
    }
}

impl ChildRecord for PurchaseItem {
    fn parent_id(&self) -> Uuid {
        self.purchase_id
    }

    fn insert_id(insert: &Self::Insert) -> Option<Uuid> {
        insert.id
    }

    fn attach_parent(insert: &mut Self::Insert, parent_id: Uuid) {
        insert.purchase_id = Some(parent_id);
    }

    fn diff_against(&self, edited: &Self::Insert) -> Option<Self::Patch> {
        let mut patch = PurchaseItemPatch::default();
        if edited.sku != self.sku {
            patch.sku = Some(edited.sku.clone());
        }
        if edited.quantity != self.quantity {
            patch.quantity = Some(edited.quantity);
        }
        if patch == PurchaseItemPatch::default() {
            None
        } else {
            Some(patch)
        }
    }

    fn as_insert(&self) -> Self::Insert {
        PurchaseItemDraft {
            id: Some(self.id),
            purchase_id: Some(self.purchase_id),
            sku: self.sku.clone(),
            quantity: self.quantity,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_diff_round_trip() {
        let row = PurchaseItem {
            id: Uuid::new_v4(),
            purchase_id: Uuid::new_v4(),
            sku: "WAX-10".into(),
            quantity: 3,
        };
        assert_eq!(row.diff_against(&row.as_insert()), None);

        let mut edited = row.as_insert();
        edited.sku = "WAX-20".into();
        edited.quantity = 4;
        let patch = row.diff_against(&edited).expect("both columns changed");
        assert_eq!(patch.sku.as_deref(), Some("WAX-20"));
        assert_eq!(patch.quantity, Some(4));
    }

    #[test]
    fn test_purchase_fee_defaults() {
        let row = Purchase::materialize(PurchaseDraft {
            purchase_order_no: "#88".into(),
            ..Default::default()
        });
        assert_eq!(row.shipping_fee_domestic, 0.0);
        assert_eq!(row.shipping_fee_international, 0.0);
        assert_eq!(row.row_label(), "#88");
    }
}
