//! Error types for Shopdesk
//!
//! This module provides unified error handling across the console core,
//! covering form validation failures, collaborator (store) failures, and
//! configuration problems.

use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// FieldErrors
// ============================================================================

/// Per-field validation messages keyed by descriptor key.
///
/// Collected in full on every submit: validation never short-circuits after
/// the first failing field, so the UI always has the complete error set.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Create an empty error set
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field (last write wins per key)
    pub fn insert(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.0.insert(key.into(), message.into());
    }

    /// Get the message for a field, if any
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Check whether any field has a message
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with messages
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over `(key, message)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Remove all messages
    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (key, message) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", key, message)?;
            first = false;
        }
        Ok(())
    }
}

// ============================================================================
// StoreError
// ============================================================================

/// Failures raised at the collaborator boundary (record store or object store)
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No row with the given id
    #[error("record not found: {0}")]
    NotFound(Uuid),

    /// The store rejected the operation (uniqueness, constraint, ...)
    #[error("conflict on {entity}: {message}")]
    Conflict { entity: String, message: String },

    /// The store could not be reached or answered with a transport error
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Object storage failed for a given path or key
    #[error("object storage error for '{path}': {message}")]
    Storage { path: String, message: String },
}

impl StoreError {
    /// Create a conflict error
    pub fn conflict(entity: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Conflict {
            entity: entity.into(),
            message: message.into(),
        }
    }

    /// Create an object storage error
    pub fn storage(path: impl Into<String>, message: impl Into<String>) -> Self {
        StoreError::Storage {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for collaborator calls
pub type StoreResult<T> = Result<T, StoreError>;

// ============================================================================
// OpsError
// ============================================================================

/// The main error type for Shopdesk operations
///
/// The taxonomy mirrors how errors actually travel through a screen:
/// validation failures never leave the form, store failures surface once and
/// terminate the operation (no retry, no rollback of partial effects).
#[derive(Debug, Error)]
pub enum OpsError {
    /// One or more form fields failed validation; submission was aborted
    /// before any collaborator call.
    #[error("validation failed: {0}")]
    Validation(FieldErrors),

    /// A collaborator call failed mid-operation. Already-applied effects are
    /// left in place pending a refetch.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Configuration file could not be read or parsed
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),

    /// Internal error (should not happen)
    #[error("internal error: {0}")]
    Internal(String),
}

impl OpsError {
    /// Create a validation error from a collected error set
    pub fn validation(errors: FieldErrors) -> Self {
        OpsError::Validation(errors)
    }

    /// Create a validation error for a single field
    pub fn field_validation(key: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = FieldErrors::new();
        errors.insert(key, message);
        OpsError::Validation(errors)
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        OpsError::Config(message.into())
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        OpsError::Internal(message.into())
    }

    /// Check if this error is a validation failure
    pub fn is_validation(&self) -> bool {
        matches!(self, OpsError::Validation(_))
    }

    /// Check if this error came from a collaborator
    pub fn is_store(&self) -> bool {
        matches!(self, OpsError::Store(_))
    }

    /// The per-field error set, if this is a validation failure
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            OpsError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// Result type alias using OpsError
pub type OpsResult<T> = Result<T, OpsError>;

// ============================================================================
// Tests
// ============================================================================
