//! Expenses screen
//!
//! Plain CRUD over expense rows with a fixed category list and an optional
//! expense date.

use crate::screens::crud::CrudScreen;
use shopdesk_engine::{
    FieldDescriptor, FieldLayout, FieldValue, non_negative, one_of, required,
};
use shopdesk_model::{EXPENSE_CATEGORIES, Expense, ExpenseDraft};
use shopdesk_store::RecordStore;
use std::sync::Arc;

/// The expenses screen: a plain CRUD screen over `Expense`
pub type ExpensesScreen = CrudScreen<Expense>;

/// Wire up an expenses screen against its collaborator
pub fn expenses_screen(store: Arc<dyn RecordStore<Expense>>) -> ExpensesScreen {
    CrudScreen::new(store)
}

/// Field descriptors for the expense form
pub fn expense_fields() -> Vec<FieldDescriptor<ExpenseDraft>> {
    let category_options: Vec<String> = EXPENSE_CATEGORIES.iter().map(|s| s.to_string()).collect();
    vec![
        FieldDescriptor::text(
            "name",
            "Name",
            |d: &ExpenseDraft| FieldValue::Text(d.name.clone()),
            |d, raw| d.name = raw.trim().to_string(),
        )
        .with_layout(FieldLayout::span(2))
        .validate_with(required("Name is required")),
        FieldDescriptor::select(
            "category",
            "Category",
            category_options.clone(),
            |d: &ExpenseDraft| FieldValue::Text(d.category.clone()),
            |d, raw| d.category = raw.to_string(),
        )
        .validate_with(one_of(category_options, "Unknown category")),
        FieldDescriptor::number(
            "amount",
            "Amount",
            |d: &ExpenseDraft| FieldValue::Number(d.amount),
            |d, raw| d.amount = raw.trim().parse().ok(),
        )
        .validate_with(required("Amount is required"))
        .validate_with(non_negative("Must be ≥ 0")),
        FieldDescriptor::datetime(
            "expense_date",
            "Date",
            |d: &ExpenseDraft| d.expense_date,
            |d, ts| d.expense_date = ts,
        ),
        FieldDescriptor::textarea(
            "description",
            "Description",
            |d: &ExpenseDraft| FieldValue::Text(d.description.clone()),
            |d, raw| d.description = raw.to_string(),
        )
        .with_layout(FieldLayout::span(4).on_new_row()),
    ]
}

// ============================================================================
// Tests
// ============================================================================
