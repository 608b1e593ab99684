//! Note records
//!
//! Free-form team notes. Each note owns a gallery of attached images through
//! the shared image metadata table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopdesk_core::{Identifiable, Labelled, Record};
use uuid::Uuid;

/// A note row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Insert/edit shape for a note
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub title: String,
    pub body: String,
}

impl Identifiable for Note {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Labelled for Note {
    fn row_label(&self) -> String {
        self.title.clone()
    }
}

impl Record for Note {
    type Insert = NoteDraft;
    type Patch = NoteDraft;

    const NOUN: &'static str = "note";

    fn materialize(insert: Self::Insert) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: insert.title,
            body: insert.body,
            created_at: Utc::now(),
        }
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        self.title = patch.title;
        self.body = patch.body;
    }
}

impl Note {
    /// Re-express this row as a draft, seeding an edit form
    pub fn as_draft(&self) -> NoteDraft {
        NoteDraft {
            title: self.title.clone(),
            body: self.body.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_round_trip() {
        let row = Note::materialize(NoteDraft {
            title: "Restock reminder".into(),
            body: "Order more jars before Friday".into(),
        });
        assert_eq!(row.as_draft().title, "Restock reminder");
        assert_eq!(row.row_label(), "Restock reminder");
    }
}
