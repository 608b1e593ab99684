//! Orders screen
//!
//! Customer orders with their line items. Edits reconcile the item list
//! through the diff engine: deletions, then patches, then insertions.

use crate::screens::line_items::{LineItemScreen, WithItems};
use shopdesk_engine::{FieldDescriptor, FieldLayout, FieldValue, non_negative, required};
use shopdesk_model::{Order, OrderDraft, OrderItem, OrderItemDraft};
use shopdesk_store::RecordStore;
use std::sync::Arc;

/// The orders screen: a line-item screen over `Order` and `OrderItem`
pub type OrdersScreen = LineItemScreen<Order, OrderItem>;

/// An order joined with its line items
pub type OrderWithItems = WithItems<Order, OrderItem>;

/// Wire up an orders screen against its collaborators
pub fn orders_screen(
    orders: Arc<dyn RecordStore<Order>>,
    items: Arc<dyn RecordStore<OrderItem>>,
) -> OrdersScreen {
    LineItemScreen::new(orders, items)
}

/// Field descriptors for the order form
pub fn order_fields() -> Vec<FieldDescriptor<OrderDraft>> {
    vec![
        FieldDescriptor::text(
            "order_no",
            "Order Number",
            |d: &OrderDraft| FieldValue::Text(d.order_no.clone()),
            |d, raw| d.order_no = raw.trim().to_string(),
        )
        .with_layout(FieldLayout::span(2))
        .validate_with(required("Order Number is required")),
        FieldDescriptor::text(
            "customer_name",
            "Customer Name",
            |d: &OrderDraft| FieldValue::Text(d.customer_name.clone()),
            |d, raw| d.customer_name = raw.trim().to_string(),
        )
        .with_layout(FieldLayout::span(2))
        .validate_with(required("Customer Name is required")),
        FieldDescriptor::datetime(
            "order_date",
            "Order Date",
            |d: &OrderDraft| d.order_date,
            |d, ts| d.order_date = ts,
        )
        .with_layout(FieldLayout::span(2)),
        FieldDescriptor::datetime(
            "date_fulfilled",
            "Date Fulfilled",
            |d: &OrderDraft| d.date_fulfilled,
            |d, ts| d.date_fulfilled = ts,
        )
        .with_layout(FieldLayout::span(2)),
        FieldDescriptor::number(
            "delivery_fee",
            "Delivery Fee",
            |d: &OrderDraft| FieldValue::Number(d.delivery_fee),
            |d, raw| d.delivery_fee = raw.trim().parse().ok(),
        )
        .validate_with(non_negative("Must be ≥ 0")),
        FieldDescriptor::number(
            "other_fees",
            "Other Fees",
            |d: &OrderDraft| FieldValue::Number(d.other_fees),
            |d, raw| d.other_fees = raw.trim().parse().ok(),
        )
        .validate_with(non_negative("Must be ≥ 0")),
        FieldDescriptor::textarea(
            "notes",
            "Notes",
            |d: &OrderDraft| FieldValue::Text(d.notes.clone()),
            |d, raw| d.notes = raw.to_string(),
        )
        .with_layout(FieldLayout::span(4).on_new_row()),
    ]
}

/// A fresh line-item row as the item editor produces it
pub fn order_item_draft(product_sku: &str, quantity: u32) -> OrderItemDraft {
    OrderItemDraft {
        product_sku: product_sku.into(),
        quantity,
        ..Default::default()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shopdesk_core::{ChildRecord, Mode};
    use shopdesk_engine::FormModel;
    use shopdesk_store::MemoryTable;
    use uuid::Uuid;

    fn fixture() -> (OrdersScreen, Arc<MemoryTable<OrderItem>>) {
        let items = Arc::new(MemoryTable::<OrderItem>::new());
        let screen = orders_screen(
            Arc::new(MemoryTable::<Order>::new()),
            Arc::clone(&items) as Arc<dyn RecordStore<OrderItem>>,
        );
        (screen, items)
    }

    #[tokio::test]
    async fn test_create_attaches_parent_to_items() {
        let (mut screen, items) = fixture();

        let mut form = FormModel::new(Mode::Create, OrderDraft::default(), order_fields());
        form.set_field("order_no", "#1042");
        form.set_field("customer_name", "June");
        form.set_field("delivery_fee", "5");
        let draft = form.submit().expect("valid order draft");

        screen.dialogs.start_add();
        screen
            .submit_add(draft, vec![order_item_draft("SOAP-001", 2), order_item_draft("SOAP-002", 1)])
            .await
            .unwrap();
        assert!(screen.dialogs.is_idle());

        let row = &screen.rows()[0];
        assert_eq!(row.items.len(), 2);
        for item in &row.items {
            assert_eq!(item.order_id, row.parent.id);
        }
        assert_eq!(items.len().await, 2);
    }

    #[tokio::test]
    async fn test_edit_reconciles_items_against_snapshot() {
        let (mut screen, items) = fixture();

        let draft = OrderDraft {
            order_no: "#1".into(),
            customer_name: "Ada".into(),
            ..Default::default()
        };
        screen
            .submit_add(draft, vec![order_item_draft("X", 2), order_item_draft("Y", 1)])
            .await
            .unwrap();

        let row = screen.rows()[0].clone();
        let kept = row
            .items
            .iter()
            .find(|item| item.product_sku == "X")
            .unwrap()
            .clone();
        let dropped = row
            .items
            .iter()
            .find(|item| item.product_sku == "Y")
            .unwrap()
            .clone();

        // keep X with a new quantity, drop Y, add Z
        let mut edited_kept = kept.as_insert();
        edited_kept.quantity = 5;
        let edited = vec![edited_kept, order_item_draft("Z", 1)];

        screen
            .submit_edit(row.parent.id, row.parent.as_draft(), edited)
            .await
            .unwrap();

        let after = &screen.rows()[0];
        assert_eq!(after.items.len(), 2);
        let fresh_kept = after.items.iter().find(|i| i.id == kept.id).unwrap();
        assert_eq!(fresh_kept.quantity, 5);
        assert!(after.items.iter().any(|i| i.product_sku == "Z"));
        assert!(!after.items.iter().any(|i| i.id == dropped.id));

        // the store agrees with the folded read model
        let persisted = items.list_all().await.unwrap();
        assert_eq!(persisted.len(), 2);
        assert!(!persisted.iter().any(|i| i.id == dropped.id));
    }

    #[tokio::test]
    async fn test_identity_edit_issues_no_item_operations() {
        let (mut screen, items) = fixture();

        let draft = OrderDraft {
            order_no: "#2".into(),
            customer_name: "Grace".into(),
            ..Default::default()
        };
        screen
            .submit_add(draft, vec![order_item_draft("X", 2)])
            .await
            .unwrap();

        let row = screen.rows()[0].clone();
        let before = items.list_all().await.unwrap();
        let edited: Vec<OrderItemDraft> = row.items.iter().map(|i| i.as_insert()).collect();

        screen
            .submit_edit(row.parent.id, row.parent.as_draft(), edited)
            .await
            .unwrap();

        assert_eq!(items.list_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_failed_parent_update_closes_dialog_and_keeps_rows() {
        let (mut screen, _items) = fixture();

        let draft = OrderDraft {
            order_no: "#3".into(),
            customer_name: "Joan".into(),
            ..Default::default()
        };
        screen.submit_add(draft, vec![]).await.unwrap();

        let missing = Uuid::new_v4();
        screen.dialogs.start_edit(missing);
        let err = screen
            .submit_edit(missing, OrderDraft::default(), vec![])
            .await
            .unwrap_err();
        assert!(err.is_store());
        assert!(screen.dialogs.is_idle());
        assert_eq!(screen.rows()[0].parent.order_no, "#3");
    }

    #[tokio::test]
    async fn test_delete_removes_joined_row() {
        let (mut screen, _items) = fixture();
        let draft = OrderDraft {
            order_no: "#4".into(),
            customer_name: "Mary".into(),
            ..Default::default()
        };
        screen.submit_add(draft, vec![order_item_draft("X", 1)]).await.unwrap();

        let id = screen.rows()[0].parent.id;
        screen.dialogs.start_delete(id);
        screen.confirm_delete(id).await.unwrap();
        assert!(screen.rows().is_empty());
        assert!(screen.dialogs.is_idle());
    }
}
