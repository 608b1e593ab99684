//! Supply records
//!
//! Supplies are the consumables purchased from suppliers (raw materials,
//! packaging). Plain CRUD rows with no children or images.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopdesk_core::{Identifiable, Labelled, Record};
use uuid::Uuid;

/// A supply row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supply {
    pub id: Uuid,
    pub name: String,
    pub supplier: String,
    pub quantity: u32,
    pub unit_cost: f64,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

/// Insert/edit shape for a supply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplyDraft {
    pub name: String,
    pub supplier: String,
    pub quantity: Option<u32>,
    pub unit_cost: Option<f64>,
    pub description: String,
}

impl Identifiable for Supply {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Labelled for Supply {
    fn row_label(&self) -> String {
        self.name.clone()
    }

    fn search_text(&self) -> String {
        format!("{} {}", self.name, self.supplier)
    }
}

impl Record for Supply {
    type Insert = SupplyDraft;
    type Patch = SupplyDraft;

    const NOUN: &'static str = "supply";

    fn materialize(insert: Self::Insert) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: insert.name,
            supplier: insert.supplier,
            quantity: insert.quantity.unwrap_or(0),
            unit_cost: insert.unit_cost.unwrap_or(0.0),
            description: insert.description,
            created_at: Utc::now(),
        }
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        self.name = patch.name;
        self.supplier = patch.supplier;
        self.quantity = patch.quantity.unwrap_or(0);
        self.unit_cost = patch.unit_cost.unwrap_or(0.0);
        self.description = patch.description;
    }
}

impl Supply {
    /// Re-express this row as a draft, seeding an edit form
    pub fn as_draft(&self) -> SupplyDraft {
        SupplyDraft {
            name: self.name.clone(),
            supplier: self.supplier.clone(),
            quantity: Some(self.quantity),
            unit_cost: Some(self.unit_cost),
            description: self.description.clone(),
        }
    }
}
