//! # Shopdesk Core
//!
//! Core types, traits, and error handling for the Shopdesk operations
//! console.
//!
//! This crate provides the foundational building blocks used throughout the
//! Shopdesk workspace, including:
//!
//! - **Errors**: Unified error handling with `OpsError`, `StoreError`, and
//!   per-field `FieldErrors`
//! - **Traits**: Record contracts (`Record`, `ChildRecord`) and row behaviors
//!   (`Identifiable`, `Labelled`)
//! - **Types**: Form mode, id aliases, staged binary payloads
//! - **Datetime**: Minute-granularity local/absolute conversion for forms
//!

pub mod datetime;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use datetime::{LOCAL_INPUT_FORMAT, from_local_input, to_local_input, truncate_to_minute};
pub use error::{FieldErrors, OpsError, OpsResult, StoreError, StoreResult};
pub use traits::{ChildRecord, Identifiable, Labelled, Record};
pub use types::{ImageId, LocalFile, Mode, RecordId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
