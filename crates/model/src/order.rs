//! Order records and their line items
//!
//! An order is a parent row; its line items are owned children related by
//! `order_id`. Line items implement `ChildRecord` so the diff engine can
//! reconcile an edited item list against the persisted snapshot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopdesk_core::{ChildRecord, Identifiable, Labelled, Record};
use uuid::Uuid;

// ============================================================================
// Order
// ============================================================================

/// A customer order row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub order_no: String,
    pub customer_name: String,
    pub order_date: Option<DateTime<Utc>>,
    pub date_fulfilled: Option<DateTime<Utc>>,
    pub delivery_fee: f64,
    pub other_fees: f64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

/// Insert/edit shape for an order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderDraft {
    pub order_no: String,
    pub customer_name: String,
    pub order_date: Option<DateTime<Utc>>,
    pub date_fulfilled: Option<DateTime<Utc>>,
    pub delivery_fee: Option<f64>,
    pub other_fees: Option<f64>,
    pub notes: String,
}

impl Identifiable for Order {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Labelled for Order {
    fn row_label(&self) -> String {
        self.order_no.clone()
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.order_no, self.customer_name)
    }
}

impl Record for Order {
    type Insert = OrderDraft;
    type Patch = OrderDraft;

    const NOUN: &'static str = "order";

    fn materialize(insert: Self::Insert) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_no: insert.order_no,
            customer_name: insert.customer_name,
            order_date: insert.order_date,
            date_fulfilled: insert.date_fulfilled,
            delivery_fee: insert.delivery_fee.unwrap_or(0.0),
            other_fees: insert.other_fees.unwrap_or(0.0),
            notes: insert.notes,
            created_at: Utc::now(),
        }
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        self.order_no = patch.order_no;
        self.customer_name = patch.customer_name;
        self.order_date = patch.order_date;
        self.date_fulfilled = patch.date_fulfilled;
        self.delivery_fee = patch.delivery_fee.unwrap_or(0.0);
        self.other_fees = patch.other_fees.unwrap_or(0.0);
        self.notes = patch.notes;
    }
}

impl Order {
    /// Re-express this row as a draft, seeding an edit form
    pub fn as_draft(&self) -> OrderDraft {
        OrderDraft {
            order_no: self.order_no.clone(),
            customer_name: self.customer_name.clone(),
            order_date: self.order_date,
            date_fulfilled: self.date_fulfilled,
            delivery_fee: Some(self.delivery_fee),
            other_fees: Some(self.other_fees),
            notes: self.notes.clone(),
        }
    }
}

// ============================================================================
// OrderItem
// ============================================================================

/// A line item owned by one order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub order_id: Uuid,
    pub product_sku: String,
    pub quantity: u32,
}

/// Edited line-item shape.
///
/// A present `id` means the row was persisted before; `order_id` is left
/// unset on fresh rows for the caller to fill in once the parent has an id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderItemDraft {
    pub id: Option<Uuid>,
    pub order_id: Option<Uuid>,
    pub product_sku: String,
    pub quantity: u32,
}

/// Minimal patch: exactly the columns that differ from the original
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderItemPatch {
    pub product_sku: Option<String>,
    pub quantity: Option<u32>,
}

impl Identifiable for OrderItem {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for OrderItem {
    type Insert = OrderItemDraft;
    type Patch = OrderItemPatch;

    const NOUN: &'static str = "order item";

    fn materialize(insert: Self::Insert) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_id: insert.order_id.unwrap_or_default(),
            product_sku: insert.product_sku,
            quantity: insert.quantity,
        }
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        if let Some(product_sku) = patch.product_sku {
            self.product_sku = product_sku;
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
    }
}

impl ChildRecord for OrderItem {
    fn parent_id(&self) -> Uuid {
        self.order_id
    }

    fn insert_id(insert: &Self::Insert) -> Option<Uuid> {
        insert.id
    }

    fn attach_parent(insert: &mut Self::Insert, parent_id: Uuid) {
        insert.order_id = Some(parent_id);
    }

    fn diff_against(&self, edited: &Self::Insert) -> Option<Self::Patch> {
        let mut patch = OrderItemPatch::default();
        if edited.product_sku != self.product_sku {
            patch.product_sku = Some(edited.product_sku.clone());
        }
        if edited.quantity != self.quantity {
            patch.quantity = Some(edited.quantity);
        }
        if patch == OrderItemPatch::default() {
            None
        } else {
            Some(patch)
        }
    }

    fn as_insert(&self) -> Self::Insert {
        OrderItemDraft {
            id: Some(self.id),
            order_id: Some(self.order_id),
            product_sku: self.product_sku.clone(),
            quantity: self.quantity,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
