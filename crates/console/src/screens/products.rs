//! Products screen
//!
//! Catalog products with a gallery of attached images. The SKU is an
//! external identifier: required when creating, read-only once persisted.

use crate::screens::gallery::{GalleryScreen, WithImages};
use shopdesk_core::Mode;
use shopdesk_engine::{FieldDescriptor, FieldLayout, FieldValue, non_negative, one_of, required};
use shopdesk_model::{ImageRow, PRODUCT_TYPES, Product, ProductDraft};
use shopdesk_store::{ObjectStore, RecordStore};
use std::sync::Arc;

/// Storage key namespace for product images
pub const PRODUCT_IMAGE_SCOPE: &str = "product";

/// The products screen: a gallery screen over `Product`
pub type ProductsScreen = GalleryScreen<Product>;

/// A product joined with its gallery
pub type ProductWithImages = WithImages<Product>;

/// Wire up a products screen against its collaborators
pub fn products_screen(
    records: Arc<dyn RecordStore<Product>>,
    image_records: Arc<dyn RecordStore<ImageRow>>,
    storage: Arc<dyn ObjectStore>,
) -> ProductsScreen {
    GalleryScreen::new(records, image_records, storage, PRODUCT_IMAGE_SCOPE)
}

/// Field descriptors for the product form
pub fn product_fields() -> Vec<FieldDescriptor<ProductDraft>> {
    let type_options: Vec<String> = PRODUCT_TYPES.iter().map(|s| s.to_string()).collect();
    vec![
        FieldDescriptor::text(
            "name",
            "Name",
            |d: &ProductDraft| FieldValue::Text(d.name.clone()),
            |d, raw| d.name = raw.trim().to_string(),
        )
        .with_layout(FieldLayout::span(2))
        .validate_with(required("Name is required")),
        FieldDescriptor::text(
            "sku",
            "SKU",
            |d: &ProductDraft| FieldValue::Text(d.sku.clone()),
            |d, raw| d.sku = raw.trim().to_string(),
        )
        .with_placeholder("SOAP-001")
        .disabled_when(Mode::is_edit)
        .validate_with(required("SKU is required")),
        FieldDescriptor::text(
            "supplier",
            "Supplier",
            |d: &ProductDraft| FieldValue::Text(d.supplier.clone()),
            |d, raw| d.supplier = raw.trim().to_string(),
        ),
        FieldDescriptor::select(
            "product_type",
            "Type",
            type_options.clone(),
            |d: &ProductDraft| FieldValue::Text(d.product_type.clone()),
            |d, raw| d.product_type = raw.to_string(),
        )
        .validate_with(one_of(type_options, "Unknown product type")),
        FieldDescriptor::number(
            "price_usd",
            "Sell Price (USD)",
            |d: &ProductDraft| FieldValue::Number(d.price_usd),
            |d, raw| d.price_usd = raw.trim().parse().ok(),
        )
        .validate_with(non_negative("Must be ≥ 0")),
        FieldDescriptor::number(
            "min_stock",
            "Minimum Stock",
            |d: &ProductDraft| FieldValue::Number(d.min_stock.map(f64::from)),
            |d, raw| d.min_stock = raw.trim().parse().ok(),
        ),
    ]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shopdesk_core::LocalFile;
    use shopdesk_engine::{FormModel, ImageDraft};
    use shopdesk_store::{MemoryObjectStore, MemoryTable};

    fn fixture() -> (ProductsScreen, Arc<MemoryObjectStore>) {
        let storage = Arc::new(MemoryObjectStore::new("memory://bucket"));
        let screen = products_screen(
            Arc::new(MemoryTable::<Product>::new()),
            Arc::new(MemoryTable::<ImageRow>::new()),
            Arc::clone(&storage) as Arc<dyn ObjectStore>,
        );
        (screen, storage)
    }

    #[tokio::test]
    async fn test_form_to_screen_create_with_images() {
        let (mut screen, storage) = fixture();

        let mut form = FormModel::new(Mode::Create, ProductDraft::default(), product_fields());
        form.set_field("name", "Lavender Soap");
        form.set_field("sku", "SOAP-001");
        form.set_field("product_type", "Finished good");
        form.set_field("price_usd", "4.50");
        let draft = form.submit().expect("valid product draft");

        let mut images = ImageDraft::new();
        images.add_files(vec![LocalFile::new("front.jpg", vec![1, 2])]);

        screen.dialogs.start_add();
        screen.submit_add(draft, images).await.unwrap();
        assert!(screen.dialogs.is_idle());

        let row = &screen.rows()[0];
        assert_eq!(row.parent.name, "Lavender Soap");
        assert_eq!(row.images.len(), 1);
        assert!(row.images[0]
            .path
            .starts_with(&format!("{PRODUCT_IMAGE_SCOPE}/{}", row.parent.id)));
        assert!(storage.contains(&row.images[0].path).await);
    }

    #[tokio::test]
    async fn test_edit_removes_marked_image() {
        let (mut screen, storage) = fixture();

        let mut images = ImageDraft::new();
        images.add_files(vec![
            LocalFile::new("a.jpg", vec![1]),
            LocalFile::new("b.jpg", vec![2]),
        ]);
        let draft = ProductDraft {
            sku: "SOAP-002".into(),
            name: "Rose Soap".into(),
            product_type: "Finished good".into(),
            ..Default::default()
        };
        screen.submit_add(draft, images).await.unwrap();

        let row = screen.rows()[0].clone();
        let doomed = row.images[0].clone();
        let mut edit_draft = row.image_draft();
        edit_draft.mark_removed(doomed.id);

        screen
            .submit_edit(row.parent.id, row.parent.as_draft(), edit_draft)
            .await
            .unwrap();

        let after = &screen.rows()[0];
        assert_eq!(after.images.len(), 1);
        assert!(!after.images.iter().any(|img| img.id == doomed.id));
        assert!(!storage.contains(&doomed.path).await);
    }

    #[test]
    fn test_sku_immutable_in_edit_mode() {
        let draft = ProductDraft {
            sku: "SOAP-001".into(),
            name: "Lavender Soap".into(),
            ..Default::default()
        };
        let mut form = FormModel::new(Mode::Edit, draft, product_fields());
        assert!(!form.set_field("sku", "SOAP-999"));
        assert_eq!(form.values().sku, "SOAP-001");
    }

    #[test]
    fn test_empty_draft_reports_name_and_sku() {
        let mut form = FormModel::new(Mode::Create, ProductDraft::default(), product_fields());
        let err = form.submit().expect_err("empty draft fails");
        let errors = err.field_errors().expect("validation");
        assert!(errors.get("name").is_some());
        assert!(errors.get("sku").is_some());
    }
}
