//! Field descriptors and the form model
//!
//! A screen describes one record type's editable attributes as a vector of
//! `FieldDescriptor`s; the descriptors drive rendering, parsing, and
//! validation, and the `FormModel` turns them into a validated value bag.
//! Descriptors are data: adding a field to a screen never touches submit
//! logic.
//!
//! Every descriptor carries an explicit typed accessor pair bound at
//! construction (`read` / `write_raw`), so field access is compile-time
//! checked instead of going through runtime reflection. `write_raw` must be
//! total over raw input: invalid text maps to an unset sentinel that a
//! validator can reject, never a panic.

use chrono::{DateTime, Utc};
use shopdesk_core::{FieldErrors, LocalFile, Mode, OpsError, OpsResult, from_local_input, to_local_input};

// ============================================================================
// FieldValue
// ============================================================================

/// A field's current value as seen through its descriptor
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text-backed kinds (text, textarea, select, image preview URL)
    Text(String),
    /// Numeric kinds; `None` means "not entered", which is distinct from zero
    Number(Option<f64>),
    /// Datetime kinds; `None` means the field is unset
    DateTime(Option<DateTime<Utc>>),
}

impl FieldValue {
    /// The text content, if this is a text-backed value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric content, if entered
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => *n,
            _ => None,
        }
    }

    /// The timestamp content, if set
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::DateTime(ts) => *ts,
            _ => None,
        }
    }

    /// Check whether the value is empty/unset (what "required" means)
    pub fn is_unset(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(n) => n.is_none(),
            FieldValue::DateTime(ts) => ts.is_none(),
        }
    }

    /// Render as the raw input string a widget would display
    pub fn to_input(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(Some(n)) => n.to_string(),
            FieldValue::Number(None) => String::new(),
            FieldValue::DateTime(ts) => to_local_input(*ts),
        }
    }
}

// ============================================================================
// FieldKind
// ============================================================================

/// The widget family of a field, with one payload shape per kind
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Single-line text input
    Text { placeholder: Option<String> },
    /// Numeric input; empty input parses to the unset sentinel
    Number { placeholder: Option<String> },
    /// Multi-line text area
    TextArea { rows: u32 },
    /// Dropdown over a fixed option list
    Select { options: Vec<String> },
    /// Minute-granularity local datetime input
    DateTime,
    /// Image picker; the binary goes to the form's side channel, never into
    /// the value bag
    Image { max_bytes: usize },
}

// ============================================================================
// FieldLayout
// ============================================================================

/// Grid placement hints for a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    /// Columns spanned (1-4)
    pub span: u8,
    /// Explicit starting column, if any
    pub start: Option<u8>,
    /// Force the field onto a new row
    pub break_before: bool,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            span: 1,
            start: None,
            break_before: false,
        }
    }
}

impl FieldLayout {
    /// A field spanning the given number of columns
    pub fn span(span: u8) -> Self {
        Self {
            span,
            ..Default::default()
        }
    }

    /// Set the starting column
    pub fn starting_at(mut self, start: u8) -> Self {
        self.start = Some(start);
        self
    }

    /// Force the field onto a new row
    pub fn on_new_row(mut self) -> Self {
        self.break_before = true;
        self
    }
}

// ============================================================================
// FieldDescriptor
// ============================================================================

type ReadFn<T> = Box<dyn Fn(&T) -> FieldValue + Send + Sync>;
type WriteFn<T> = Box<dyn Fn(&mut T, &str) + Send + Sync>;
type DisabledFn = Box<dyn Fn(Mode) -> bool + Send + Sync>;
type ValidateFn<T> = Box<dyn Fn(&FieldValue, &T, Mode) -> Option<String> + Send + Sync>;

/// Declarative schema entry for one editable attribute of a record
pub struct FieldDescriptor<T> {
    key: &'static str,
    label: String,
    kind: FieldKind,
    layout: FieldLayout,
    read: ReadFn<T>,
    write_raw: WriteFn<T>,
    disabled: Option<DisabledFn>,
    validators: Vec<ValidateFn<T>>,
}

impl<T> FieldDescriptor<T> {
    /// Create a descriptor with an explicit kind and accessor pair
    pub fn new(
        key: &'static str,
        label: impl Into<String>,
        kind: FieldKind,
        read: impl Fn(&T) -> FieldValue + Send + Sync + 'static,
        write_raw: impl Fn(&mut T, &str) + Send + Sync + 'static,
    ) -> Self {
        Self {
            key,
            label: label.into(),
            kind,
            layout: FieldLayout::default(),
            read: Box::new(read),
            write_raw: Box::new(write_raw),
            disabled: None,
            validators: Vec::new(),
        }
    }

    /// Single-line text field
    pub fn text(
        key: &'static str,
        label: impl Into<String>,
        read: impl Fn(&T) -> FieldValue + Send + Sync + 'static,
        write_raw: impl Fn(&mut T, &str) + Send + Sync + 'static,
    ) -> Self {
        Self::new(key, label, FieldKind::Text { placeholder: None }, read, write_raw)
    }

    /// Numeric field
    pub fn number(
        key: &'static str,
        label: impl Into<String>,
        read: impl Fn(&T) -> FieldValue + Send + Sync + 'static,
        write_raw: impl Fn(&mut T, &str) + Send + Sync + 'static,
    ) -> Self {
        Self::new(key, label, FieldKind::Number { placeholder: None }, read, write_raw)
    }

    /// Multi-line text field
    pub fn textarea(
        key: &'static str,
        label: impl Into<String>,
        read: impl Fn(&T) -> FieldValue + Send + Sync + 'static,
        write_raw: impl Fn(&mut T, &str) + Send + Sync + 'static,
    ) -> Self {
        Self::new(key, label, FieldKind::TextArea { rows: 4 }, read, write_raw)
    }

    /// Dropdown field over a fixed option list
    pub fn select(
        key: &'static str,
        label: impl Into<String>,
        options: Vec<String>,
        read: impl Fn(&T) -> FieldValue + Send + Sync + 'static,
        write_raw: impl Fn(&mut T, &str) + Send + Sync + 'static,
    ) -> Self {
        Self::new(key, label, FieldKind::Select { options }, read, write_raw)
    }

    /// Minute-granularity datetime field editing an `Option<DateTime<Utc>>`
    pub fn datetime(
        key: &'static str,
        label: impl Into<String>,
        read: impl Fn(&T) -> Option<DateTime<Utc>> + Send + Sync + 'static,
        write: impl Fn(&mut T, Option<DateTime<Utc>>) + Send + Sync + 'static,
    ) -> Self {
        Self::new(
            key,
            label,
            FieldKind::DateTime,
            move |values| FieldValue::DateTime(read(values)),
            move |values, raw| write(values, from_local_input(raw)),
        )
    }

    /// Image field; `read` exposes the current preview URL. The selected
    /// binary is routed through the form's side channel, so the raw-input
    /// writer is a no-op.
    pub fn image(
        key: &'static str,
        label: impl Into<String>,
        max_bytes: usize,
        read: impl Fn(&T) -> FieldValue + Send + Sync + 'static,
    ) -> Self {
        Self::new(key, label, FieldKind::Image { max_bytes }, read, |_, _| {})
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Set the placeholder (text and number kinds; no-op otherwise)
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        match &mut self.kind {
            FieldKind::Text { placeholder: p } | FieldKind::Number { placeholder: p } => {
                *p = Some(placeholder.into());
            }
            _ => {}
        }
        self
    }

    /// Set the grid layout
    pub fn with_layout(mut self, layout: FieldLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Disable the field when the predicate holds for the form's mode
    pub fn disabled_when(mut self, predicate: impl Fn(Mode) -> bool + Send + Sync + 'static) -> Self {
        self.disabled = Some(Box::new(predicate));
        self
    }

    /// Add a validator; validators run in order, first message wins
    pub fn validate_with(
        mut self,
        validate: impl Fn(&FieldValue, &T, Mode) -> Option<String> + Send + Sync + 'static,
    ) -> Self {
        self.validators.push(Box::new(validate));
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The descriptor key (a valid attribute of `T` by construction)
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// The display label
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The field kind and its payload
    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    /// The grid layout
    pub fn layout(&self) -> &FieldLayout {
        &self.layout
    }

    /// Check whether the field is read-only in the given mode
    pub fn is_disabled(&self, mode: Mode) -> bool {
        self.disabled.as_ref().is_some_and(|predicate| predicate(mode))
    }

    /// Read the field's current value out of a value bag
    pub fn value_of(&self, values: &T) -> FieldValue {
        (self.read)(values)
    }

    /// Write a raw input string into a value bag through the field's parser
    pub fn write(&self, values: &mut T, raw: &str) {
        (self.write_raw)(values, raw);
    }

    fn first_validation_error(&self, value: &FieldValue, values: &T, mode: Mode) -> Option<String> {
        self.validators
            .iter()
            .find_map(|validate| validate(value, values, mode))
    }
}

impl<T> std::fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("kind", &self.kind)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Common validators
// ============================================================================

/// Reject unset/empty values
pub fn required<T>(message: &'static str) -> impl Fn(&FieldValue, &T, Mode) -> Option<String> {
    move |value, _, _| value.is_unset().then(|| message.to_string())
}

/// Reject entered numbers below zero (unset values pass)
pub fn non_negative<T>(message: &'static str) -> impl Fn(&FieldValue, &T, Mode) -> Option<String> {
    move |value, _, _| match value.as_number() {
        Some(n) if n < 0.0 => Some(message.to_string()),
        _ => None,
    }
}

/// Reject entered text not present in the option list (unset values pass)
pub fn one_of<T>(
    options: Vec<String>,
    message: &'static str,
) -> impl Fn(&FieldValue, &T, Mode) -> Option<String> {
    move |value, _, _| match value.as_text() {
        Some(s) if !s.trim().is_empty() && !options.iter().any(|o| o == s) => {
            Some(message.to_string())
        }
        _ => None,
    }
}

// ============================================================================
// FormModel
// ============================================================================

/// Live state of one open form: the value bag, the collected errors, and the
/// staged binary side channel
pub struct FormModel<T: Clone> {
    mode: Mode,
    values: T,
    fields: Vec<FieldDescriptor<T>>,
    errors: FieldErrors,
    staged_file: Option<LocalFile>,
}

impl<T: Clone> FormModel<T> {
    /// Open a form seeded with an initial value bag
    pub fn new(mode: Mode, initial: T, fields: Vec<FieldDescriptor<T>>) -> Self {
        Self {
            mode,
            values: initial,
            fields,
            errors: FieldErrors::new(),
            staged_file: None,
        }
    }

    /// The form's mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// The current value bag
    pub fn values(&self) -> &T {
        &self.values
    }

    /// The error set collected by the last submit
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// The descriptors driving this form
    pub fn fields(&self) -> &[FieldDescriptor<T>] {
        &self.fields
    }

    /// Look up a descriptor by key
    pub fn field(&self, key: &str) -> Option<&FieldDescriptor<T>> {
        self.fields.iter().find(|field| field.key() == key)
    }

    /// Read a field's current value by key
    pub fn value_of(&self, key: &str) -> Option<FieldValue> {
        self.field(key).map(|field| field.value_of(&self.values))
    }

    /// Write a raw input string into a field by key.
    ///
    /// Returns `false` (and writes nothing) for unknown keys and for fields
    /// disabled in the current mode.
    pub fn set_field(&mut self, key: &str, raw: &str) -> bool {
        let Some(index) = self.fields.iter().position(|field| field.key() == key) else {
            tracing::debug!("set_field: unknown key '{key}'");
            return false;
        };
        if self.fields[index].is_disabled(self.mode) {
            return false;
        }
        let field = &self.fields[index];
        (field.write_raw)(&mut self.values, raw);
        true
    }

    /// Stage a selected binary on the side channel.
    ///
    /// The value bag is never touched: image fields only ever carry a
    /// preview URL there. Rejects payloads above the image field's
    /// `max_bytes`, if the form has one with a limit.
    pub fn stage_file(&mut self, file: LocalFile) -> OpsResult<()> {
        let limit = self.fields.iter().find_map(|field| match field.kind() {
            FieldKind::Image { max_bytes } if *max_bytes > 0 => Some((field.key(), *max_bytes)),
            _ => None,
        });
        if let Some((key, max_bytes)) = limit {
            if file.size() > max_bytes {
                return Err(OpsError::field_validation(
                    key,
                    format!("File exceeds the {max_bytes} byte limit"),
                ));
            }
        }
        self.staged_file = Some(file);
        Ok(())
    }

    /// The staged binary, if any
    pub fn staged_file(&self) -> Option<&LocalFile> {
        self.staged_file.as_ref()
    }

    /// Take the staged binary out of the side channel
    pub fn take_staged_file(&mut self) -> Option<LocalFile> {
        self.staged_file.take()
    }

    /// Validate every field and yield the value bag.
    ///
    /// No short-circuit: all fields are validated even after the first
    /// failure, so the full error set is available to the UI. On any
    /// failure the save callback must not be invoked; the error carries the
    /// complete per-field map.
    pub fn submit(&mut self) -> OpsResult<T> {
        let mut collected = FieldErrors::new();
        for field in &self.fields {
            let value = field.value_of(&self.values);
            if let Some(message) = field.first_validation_error(&value, &self.values, self.mode) {
                collected.insert(field.key(), message);
            }
        }
        self.errors = collected;
        if self.errors.is_empty() {
            Ok(self.values.clone())
        } else {
            Err(OpsError::Validation(self.errors.clone()))
        }
    }
}

impl<T: Clone> std::fmt::Debug for FormModel<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormModel")
            .field("mode", &self.mode)
            .field("fields", &self.fields.len())
            .field("errors", &self.errors)
            .field("staged_file", &self.staged_file.is_some())
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Draft {
        sku: String,
        name: String,
        category: String,
        price: Option<f64>,
        available_from: Option<DateTime<Utc>>,
        thumbnail_url: String,
    }

    fn fields() -> Vec<FieldDescriptor<Draft>> {
        vec![
            FieldDescriptor::text(
                "sku",
                "SKU",
                |d: &Draft| FieldValue::Text(d.sku.clone()),
                |d, raw| d.sku = raw.trim().to_string(),
            )
            .disabled_when(Mode::is_edit)
            .validate_with(required("SKU is required")),
            FieldDescriptor::text(
                "name",
                "Name",
                |d: &Draft| FieldValue::Text(d.name.clone()),
                |d, raw| d.name = raw.trim().to_string(),
            )
            .validate_with(required("Name is required")),
            FieldDescriptor::select(
                "category",
                "Category",
                vec!["Finished good".into(), "Other".into()],
                |d: &Draft| FieldValue::Text(d.category.clone()),
                |d, raw| d.category = raw.to_string(),
            )
            .validate_with(one_of(
                vec!["Finished good".into(), "Other".into()],
                "Unknown category",
            )),
            FieldDescriptor::number(
                "price",
                "Price",
                |d: &Draft| FieldValue::Number(d.price),
                |d, raw| d.price = raw.trim().parse().ok(),
            )
            .validate_with(required("Price is required"))
            .validate_with(non_negative("Must be ≥ 0")),
            FieldDescriptor::datetime(
                "available_from",
                "Available From",
                |d: &Draft| d.available_from,
                |d, ts| d.available_from = ts,
            ),
            FieldDescriptor::image("thumbnail", "Thumbnail", 1024, |d: &Draft| {
                FieldValue::Text(d.thumbnail_url.clone())
            }),
        ]
    }

    fn valid_draft() -> Draft {
        Draft {
            sku: "SOAP-001".into(),
            name: "Lavender Soap".into(),
            category: "Finished good".into(),
            price: Some(4.5),
            available_from: None,
            thumbnail_url: String::new(),
        }
    }

    #[test]
    fn test_submit_collects_all_errors() {
        let mut form = FormModel::new(Mode::Create, Draft::default(), fields());
        let err = form.submit().expect_err("empty draft fails validation");

        // No short-circuit: sku, name, and price all report at once
        let errors = err.field_errors().expect("validation error");
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get("sku"), Some("SKU is required"));
        assert_eq!(errors.get("name"), Some("Name is required"));
        assert_eq!(errors.get("price"), Some("Price is required"));
        assert_eq!(form.errors().len(), 3);
    }

    #[test]
    fn test_submit_yields_values_when_valid() {
        let mut form = FormModel::new(Mode::Create, valid_draft(), fields());
        let values = form.submit().expect("valid draft submits");
        assert_eq!(values, valid_draft());
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_correct_and_resubmit() {
        let mut form = FormModel::new(Mode::Create, valid_draft(), fields());
        form.set_field("name", "");
        assert!(form.submit().is_err());

        form.set_field("name", "Rose Soap");
        let values = form.submit().expect("corrected draft submits");
        assert_eq!(values.name, "Rose Soap");
        assert!(form.errors().is_empty());
    }

    #[test]
    fn test_number_empty_input_is_unset_not_zero() {
        let mut form = FormModel::new(Mode::Create, valid_draft(), fields());
        form.set_field("price", "");
        assert_eq!(form.value_of("price"), Some(FieldValue::Number(None)));

        // unset is rejected by required, which zero would have passed
        let err = form.submit().expect_err("unset price fails");
        assert_eq!(
            err.field_errors().and_then(|e| e.get("price")),
            Some("Price is required")
        );

        form.set_field("price", "0");
        assert!(form.submit().is_ok());
    }

    #[test]
    fn test_number_garbage_input_is_unset() {
        let mut form = FormModel::new(Mode::Create, valid_draft(), fields());
        form.set_field("price", "not a number");
        assert_eq!(form.value_of("price"), Some(FieldValue::Number(None)));
    }

    #[test]
    fn test_negative_number_rejected() {
        let mut form = FormModel::new(Mode::Create, valid_draft(), fields());
        form.set_field("price", "-1.5");
        let err = form.submit().expect_err("negative price fails");
        assert_eq!(
            err.field_errors().and_then(|e| e.get("price")),
            Some("Must be ≥ 0")
        );
    }

    #[test]
    fn test_disabled_field_rejects_writes_in_edit_mode() {
        let mut form = FormModel::new(Mode::Edit, valid_draft(), fields());
        assert!(!form.set_field("sku", "CHANGED"));
        assert_eq!(form.values().sku, "SOAP-001");

        // still required (and writable) in create mode
        let mut create = FormModel::new(Mode::Create, valid_draft(), fields());
        assert!(create.set_field("sku", "SOAP-002"));
        assert_eq!(create.values().sku, "SOAP-002");
    }

    #[test]
    fn test_unknown_key_is_ignored() {
        let mut form = FormModel::new(Mode::Create, valid_draft(), fields());
        assert!(!form.set_field("no_such_field", "x"));
        assert_eq!(form.values(), &valid_draft());
    }

    #[test]
    fn test_select_rejects_unknown_option() {
        let mut form = FormModel::new(Mode::Create, valid_draft(), fields());
        form.set_field("category", "Mystery");
        let err = form.submit().expect_err("unknown option fails");
        assert_eq!(
            err.field_errors().and_then(|e| e.get("category")),
            Some("Unknown category")
        );
    }

    #[test]
    fn test_datetime_round_trips_through_raw_input() {
        let mut form = FormModel::new(Mode::Create, valid_draft(), fields());
        form.set_field("available_from", "2026-08-07T09:30");

        let value = form.value_of("available_from").expect("field exists");
        let ts = value.as_datetime().expect("parsed");
        assert_eq!(value.to_input(), "2026-08-07T09:30");

        // absolute timestamp renders back to the same local input
        assert_eq!(to_local_input(Some(ts)), "2026-08-07T09:30");
    }

    #[test]
    fn test_datetime_garbage_clears_the_field() {
        let mut form = FormModel::new(Mode::Create, valid_draft(), fields());
        form.set_field("available_from", "2026-08-07T09:30");
        form.set_field("available_from", "nonsense");
        assert_eq!(
            form.value_of("available_from"),
            Some(FieldValue::DateTime(None))
        );
    }

    #[test]
    fn test_image_binary_stays_out_of_the_value_bag() {
        let mut form = FormModel::new(Mode::Create, valid_draft(), fields());
        form.stage_file(LocalFile::new("photo.png", vec![0u8; 512]))
            .expect("within limit");

        assert_eq!(form.values(), &valid_draft());
        let staged = form.take_staged_file().expect("staged");
        assert_eq!(staged.file_name, "photo.png");
        assert!(form.staged_file().is_none());
    }

    #[test]
    fn test_image_over_limit_is_rejected() {
        let mut form = FormModel::new(Mode::Create, valid_draft(), fields());
        let err = form
            .stage_file(LocalFile::new("huge.png", vec![0u8; 4096]))
            .expect_err("over the 1024 byte limit");
        assert!(err.is_validation());
        assert!(form.staged_file().is_none());
    }
}
