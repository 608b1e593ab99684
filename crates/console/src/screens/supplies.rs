//! Supplies screen
//!
//! Plain CRUD over supply rows; the generic screen with no children or
//! images attached.

use crate::screens::crud::CrudScreen;
use shopdesk_engine::{FieldDescriptor, FieldLayout, FieldValue, non_negative, required};
use shopdesk_model::{Supply, SupplyDraft};
use shopdesk_store::RecordStore;
use std::sync::Arc;

/// The supplies screen: a plain CRUD screen over `Supply`
pub type SuppliesScreen = CrudScreen<Supply>;

/// Wire up a supplies screen against its collaborator
pub fn supplies_screen(store: Arc<dyn RecordStore<Supply>>) -> SuppliesScreen {
    CrudScreen::new(store)
}

/// Field descriptors for the supply form
pub fn supply_fields() -> Vec<FieldDescriptor<SupplyDraft>> {
    vec![
        FieldDescriptor::text(
            "name",
            "Name",
            |d: &SupplyDraft| FieldValue::Text(d.name.clone()),
            |d, raw| d.name = raw.trim().to_string(),
        )
        .with_layout(FieldLayout::span(2))
        .validate_with(required("Name is required")),
        FieldDescriptor::text(
            "supplier",
            "Supplier",
            |d: &SupplyDraft| FieldValue::Text(d.supplier.clone()),
            |d, raw| d.supplier = raw.trim().to_string(),
        )
        .with_layout(FieldLayout::span(2)),
        FieldDescriptor::number(
            "quantity",
            "Quantity",
            |d: &SupplyDraft| FieldValue::Number(d.quantity.map(f64::from)),
            |d, raw| d.quantity = raw.trim().parse().ok(),
        ),
        FieldDescriptor::number(
            "unit_cost",
            "Unit Cost",
            |d: &SupplyDraft| FieldValue::Number(d.unit_cost),
            |d, raw| d.unit_cost = raw.trim().parse().ok(),
        )
        .validate_with(non_negative("Must be ≥ 0")),
        FieldDescriptor::textarea(
            "description",
            "Description",
            |d: &SupplyDraft| FieldValue::Text(d.description.clone()),
            |d, raw| d.description = raw.to_string(),
        )
        .with_layout(FieldLayout::span(4).on_new_row()),
    ]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shopdesk_core::Mode;
    use shopdesk_engine::FormModel;
    use shopdesk_store::MemoryTable;

    #[tokio::test]
    async fn test_form_to_screen_round_trip() {
        let mut screen = supplies_screen(Arc::new(MemoryTable::<Supply>::new()));

        let mut form = FormModel::new(Mode::Create, SupplyDraft::default(), supply_fields());
        form.set_field("name", "Beeswax");
        form.set_field("quantity", "40");
        form.set_field("unit_cost", "2.25");
        let draft = form.submit().expect("valid supply draft");

        screen.submit_add(draft).await.unwrap();
        assert_eq!(screen.rows()[0].name, "Beeswax");
        assert_eq!(screen.rows()[0].quantity, 40);
        assert_eq!(screen.rows()[0].unit_cost, 2.25);
    }

    #[test]
    fn test_negative_unit_cost_rejected() {
        let mut form = FormModel::new(Mode::Create, SupplyDraft::default(), supply_fields());
        form.set_field("name", "Wicks");
        form.set_field("unit_cost", "-3");
        let err = form.submit().expect_err("negative cost fails");
        assert_eq!(
            err.field_errors().and_then(|e| e.get("unit_cost")),
            Some("Must be ≥ 0")
        );
    }
}
