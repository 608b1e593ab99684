//! Expense records
//!
//! One-off operational costs: plain CRUD rows with a category picked from a
//! fixed list and an optional expense date.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopdesk_core::{Identifiable, Labelled, Record};
use uuid::Uuid;

/// Selectable expense categories
pub const EXPENSE_CATEGORIES: [&str; 5] =
    ["Supplies", "Shipping", "Marketing", "Fees", "Other"];

/// An expense row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub amount: f64,
    pub expense_date: Option<DateTime<Utc>>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Insert/edit shape for an expense
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseDraft {
    pub name: String,
    pub category: String,
    pub amount: Option<f64>,
    pub expense_date: Option<DateTime<Utc>>,
    pub description: String,
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Labelled for Expense {
    fn row_label(&self) -> String {
        self.name.clone()
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.name, self.category)
    }
}

impl Record for Expense {
    type Insert = ExpenseDraft;
    type Patch = ExpenseDraft;

    const NOUN: &'static str = "expense";

    fn materialize(insert: Self::Insert) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: insert.name,
            category: insert.category,
            amount: insert.amount.unwrap_or(0.0),
            expense_date: insert.expense_date,
            description: insert.description,
            created_at: Utc::now(),
        }
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        self.name = patch.name;
        self.category = patch.category;
        self.amount = patch.amount.unwrap_or(0.0);
        self.expense_date = patch.expense_date;
        self.description = patch.description;
    }
}

impl Expense {
    /// Re-express this row as a draft, seeding an edit form
    pub fn as_draft(&self) -> ExpenseDraft {
        ExpenseDraft {
            name: self.name.clone(),
            category: self.category.clone(),
            amount: Some(self.amount),
            expense_date: self.expense_date,
            description: self.description.clone(),
        }
    }
}
