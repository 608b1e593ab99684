//! Shared types for Shopdesk
//!
//! Small vocabulary types used across the engine, the stores, and the
//! screens: form mode, id aliases, and staged binary payloads.

use serde::{Deserialize, Serialize};

// ============================================================================
// Id Aliases
// ============================================================================

/// Identifier for a persisted record row
pub type RecordId = uuid::Uuid;

/// Identifier for an image metadata row or a locally staged image
pub type ImageId = uuid::Uuid;

// ============================================================================
// Mode
// ============================================================================

/// Whether a form is creating a new record or editing an existing one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Creating a record that does not exist yet
    #[default]
    Create,
    /// Editing a previously persisted record
    Edit,
}

impl Mode {
    /// Check if this is create mode
    pub fn is_create(self) -> bool {
        matches!(self, Mode::Create)
    }

    /// Check if this is edit mode
    pub fn is_edit(self) -> bool {
        matches!(self, Mode::Edit)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Create => write!(f, "create"),
            Mode::Edit => write!(f, "edit"),
        }
    }
}

// ============================================================================
// LocalFile
// ============================================================================

/// A binary payload staged on the client, not yet uploaded anywhere.
///
/// Forms route selected binaries here instead of into the value bag, so the
/// value bag stays serializable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalFile {
    /// Original file name, used to derive the storage key extension
    pub file_name: String,
    /// Raw bytes
    pub bytes: Vec<u8>,
}

impl LocalFile {
    /// Create a staged file from a name and its contents
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }

    /// Size of the payload in bytes
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// File extension without the dot, falling back to "jpg"
    pub fn extension(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .unwrap_or("jpg")
    }
}

// ============================================================================
// Tests
// ============================================================================
