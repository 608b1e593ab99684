//! Image metadata rows
//!
//! One row per stored image: the parent record it belongs to, the object
//! store path, and the resolved public URL. Products and notes each keep
//! their own table of this shape; the row type is shared.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopdesk_core::{Identifiable, Record};
use uuid::Uuid;

/// An image metadata row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRow {
    pub id: Uuid,
    /// The record this image is attached to (product, note, ...)
    pub parent_id: Uuid,
    /// Object store path, used for removal
    pub path: String,
    /// Resolved public URL, used for display
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Insert shape for an image row; created only after its upload succeeded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRowInsert {
    pub parent_id: Uuid,
    pub path: String,
    pub url: String,
}

/// Patch shape for an image row (rarely used; images are mostly immutable)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRowPatch {
    pub path: Option<String>,
    pub url: Option<String>,
}

impl Identifiable for ImageRow {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for ImageRow {
    type Insert = ImageRowInsert;
    type Patch = ImageRowPatch;

    const NOUN: &'static str = "image";

    fn materialize(insert: Self::Insert) -> Self {
        Self {
            id: Uuid::new_v4(),
            parent_id: insert.parent_id,
            path: insert.path,
            url: insert.url,
            created_at: Utc::now(),
        }
    }

    fn apply_patch(&mut self, patch: Self::Patch) {
        if let Some(path) = patch.path {
            self.path = path;
        }
        if let Some(url) = patch.url {
            self.url = url;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_materialize_keeps_parent_and_path() {
        let parent_id = Uuid::new_v4();
        let row = ImageRow::materialize(ImageRowInsert {
            parent_id,
            path: "product/x/1.jpg".into(),
            url: "https://cdn.test/product/x/1.jpg".into(),
        });
        assert_eq!(row.parent_id, parent_id);
        assert_eq!(row.path, "product/x/1.jpg");
    }
}
