//! Notes screen
//!
//! Free-form team notes with attached images; a gallery screen over `Note`.

use crate::screens::gallery::{GalleryScreen, WithImages};
use shopdesk_engine::{FieldDescriptor, FieldLayout, FieldValue, required};
use shopdesk_model::{ImageRow, Note, NoteDraft};
use shopdesk_store::{ObjectStore, RecordStore};
use std::sync::Arc;

/// Storage key namespace for note images
pub const NOTE_IMAGE_SCOPE: &str = "note";

/// The notes screen: a gallery screen over `Note`
pub type NotesScreen = GalleryScreen<Note>;

/// A note joined with its gallery
pub type NoteWithImages = WithImages<Note>;

/// Wire up a notes screen against its collaborators
pub fn notes_screen(
    records: Arc<dyn RecordStore<Note>>,
    image_records: Arc<dyn RecordStore<ImageRow>>,
    storage: Arc<dyn ObjectStore>,
) -> NotesScreen {
    GalleryScreen::new(records, image_records, storage, NOTE_IMAGE_SCOPE)
}

/// Field descriptors for the note form
pub fn note_fields() -> Vec<FieldDescriptor<NoteDraft>> {
    vec![
        FieldDescriptor::text(
            "title",
            "Title",
            |d: &NoteDraft| FieldValue::Text(d.title.clone()),
            |d, raw| d.title = raw.trim().to_string(),
        )
        .with_layout(FieldLayout::span(4))
        .validate_with(required("Title is required")),
        FieldDescriptor::textarea(
            "body",
            "Body",
            |d: &NoteDraft| FieldValue::Text(d.body.clone()),
            |d, raw| d.body = raw.to_string(),
        )
        .with_layout(FieldLayout::span(4)),
    ]
}

// ============================================================================
// Tests
// ============================================================================
