//! Purchases screen
//!
//! Inbound supplier purchases with their line items; structurally the same
//! screen as orders, over the purchase record pair.

use crate::screens::line_items::{LineItemScreen, WithItems};
use shopdesk_engine::{FieldDescriptor, FieldLayout, FieldValue, non_negative, required};
use shopdesk_model::{Purchase, PurchaseDraft, PurchaseItem, PurchaseItemDraft};
use shopdesk_store::RecordStore;
use std::sync::Arc;

/// The purchases screen: a line-item screen over `Purchase` and `PurchaseItem`
pub type PurchasesScreen = LineItemScreen<Purchase, PurchaseItem>;

/// A purchase joined with its line items
pub type PurchaseWithItems = WithItems<Purchase, PurchaseItem>;

/// Wire up a purchases screen against its collaborators
pub fn purchases_screen(
    purchases: Arc<dyn RecordStore<Purchase>>,
    items: Arc<dyn RecordStore<PurchaseItem>>,
) -> PurchasesScreen {
    LineItemScreen::new(purchases, items)
}

/// Field descriptors for the purchase form
pub fn purchase_fields() -> Vec<FieldDescriptor<PurchaseDraft>> {
    vec![
        FieldDescriptor::text(
            "purchase_order_no",
            "Purchase Order Number",
            |d: &PurchaseDraft| FieldValue::Text(d.purchase_order_no.clone()),
            |d, raw| d.purchase_order_no = raw.trim().to_string(),
        )
        .with_placeholder("#123456789")
        .with_layout(FieldLayout::span(4))
        .validate_with(required("Purchase Order Number is required")),
        FieldDescriptor::datetime(
            "order_date",
            "Order Date",
            |d: &PurchaseDraft| d.order_date,
            |d, ts| d.order_date = ts,
        )
        .with_layout(FieldLayout::span(2)),
        FieldDescriptor::datetime(
            "date_received",
            "Date Received",
            |d: &PurchaseDraft| d.date_received,
            |d, ts| d.date_received = ts,
        )
        .with_layout(FieldLayout::span(2)),
        FieldDescriptor::number(
            "shipping_fee_domestic",
            "Shipping (Domestic)",
            |d: &PurchaseDraft| FieldValue::Number(d.shipping_fee_domestic),
            |d, raw| d.shipping_fee_domestic = raw.trim().parse().ok(),
        )
        .validate_with(non_negative("Must be ≥ 0")),
        FieldDescriptor::number(
            "shipping_fee_international",
            "Shipping (International)",
            |d: &PurchaseDraft| FieldValue::Number(d.shipping_fee_international),
            |d, raw| d.shipping_fee_international = raw.trim().parse().ok(),
        )
        .validate_with(non_negative("Must be ≥ 0")),
    ]
}

/// A fresh line-item row as the item editor produces it
pub fn purchase_item_draft(sku: &str, quantity: u32) -> PurchaseItemDraft {
    PurchaseItemDraft {
        sku: sku.into(),
        quantity,
        ..Default::default()
    }
}

// ============================================================================
// Tests
// ============================================================================
