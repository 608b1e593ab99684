//! Demo runner
//!
//! Wires every screen against in-memory collaborators and walks one full
//! create/edit/delete cycle per screen shape, the way the binary exercises
//! the console without a rendering layer attached.

use crate::config::ConsoleConfig;
use crate::screens::{
    expenses_screen, notes_screen, order_item_draft, orders_screen, products_screen,
    supplies_screen,
};
use shopdesk_core::{ChildRecord, LocalFile, OpsResult};
use shopdesk_engine::ImageDraft;
use shopdesk_model::{
    Expense, ExpenseDraft, ImageRow, Note, NoteDraft, Order, OrderDraft, OrderItem, Product,
    ProductDraft, Supply, SupplyDraft,
};
use shopdesk_store::{MemoryObjectStore, MemoryTable, ObjectStore, RecordStore};
use std::sync::Arc;

/// Run the demo cycle against fresh in-memory collaborators
pub async fn run(config: &ConsoleConfig) -> OpsResult<()> {
    let storage = Arc::new(MemoryObjectStore::new(config.storage_base_url.clone()));

    let products = Arc::new(MemoryTable::<Product>::new());
    let product_images = Arc::new(MemoryTable::<ImageRow>::new());
    let supplies = Arc::new(MemoryTable::<Supply>::new());
    let orders = Arc::new(MemoryTable::<Order>::new());
    let order_items = Arc::new(MemoryTable::<OrderItem>::new());
    let expenses = Arc::new(MemoryTable::<Expense>::new());
    let notes = Arc::new(MemoryTable::<Note>::new());
    let note_images = Arc::new(MemoryTable::<ImageRow>::new());

    if config.seed_demo_data {
        seed(&supplies).await?;
    }

    // products: create with a staged image
    let mut products_screen = products_screen(
        products,
        product_images,
        Arc::clone(&storage) as Arc<dyn ObjectStore>,
    );
    let mut gallery = ImageDraft::new();
    gallery.add_files(vec![LocalFile::new("lavender-front.jpg", vec![0xFF, 0xD8])]);
    products_screen
        .submit_add(
            ProductDraft {
                sku: "SOAP-001".into(),
                name: "Lavender Soap".into(),
                supplier: "Acme Botanicals".into(),
                product_type: "Finished good".into(),
                price_usd: Some(4.5),
                min_stock: Some(12),
            },
            gallery,
        )
        .await?;
    tracing::info!("products: {} row(s)", products_screen.rows().len());

    // orders: create with items, then reconcile an edited item list
    let mut orders_screen = orders_screen(orders, order_items);
    orders_screen
        .submit_add(
            OrderDraft {
                order_no: "#1042".into(),
                customer_name: "June Castillo".into(),
                delivery_fee: Some(5.0),
                ..Default::default()
            },
            vec![order_item_draft("SOAP-001", 2)],
        )
        .await?;

    let order = orders_screen.rows()[0].clone();
    let mut edited = order.items[0].as_insert();
    edited.quantity = 3;
    orders_screen
        .submit_edit(
            order.parent.id,
            order.parent.as_draft(),
            vec![edited, order_item_draft("SOAP-002", 1)],
        )
        .await?;
    tracing::info!(
        "orders: '{}' now carries {} item(s)",
        orders_screen.rows()[0].parent.order_no,
        orders_screen.rows()[0].items.len()
    );
    tracing::debug!(
        "order read model: {}",
        serde_json::to_string_pretty(&orders_screen.rows()[0].parent)?
    );

    // notes: create with an image, then remove it through an edit
    let mut notes_screen = notes_screen(notes, note_images, storage);
    let mut note_gallery = ImageDraft::new();
    note_gallery.add_files(vec![LocalFile::new("whiteboard.png", vec![0x89])]);
    notes_screen
        .submit_add(
            NoteDraft {
                title: "Restock reminder".into(),
                body: "Order more jars before Friday".into(),
            },
            note_gallery,
        )
        .await?;

    let note = notes_screen.rows()[0].clone();
    let mut note_edit = note.image_draft();
    if let Some(image) = note.images.first() {
        note_edit.mark_removed(image.id);
    }
    notes_screen
        .submit_edit(note.parent.id, note.parent.as_draft(), note_edit)
        .await?;
    tracing::info!(
        "notes: '{}' has {} image(s) after edit",
        notes_screen.rows()[0].parent.title,
        notes_screen.rows()[0].images.len()
    );

    // supplies and expenses: plain CRUD
    let mut supplies_screen = supplies_screen(supplies);
    supplies_screen.refetch().await?;
    tracing::info!("supplies: {} row(s) seeded", supplies_screen.rows().len());

    let mut expenses_screen = expenses_screen(expenses);
    expenses_screen
        .submit_add(ExpenseDraft {
            name: "Label printer".into(),
            category: "Supplies".into(),
            amount: Some(129.99),
            ..Default::default()
        })
        .await?;
    let expense_id = expenses_screen.rows()[0].id;
    expenses_screen.confirm_delete(expense_id).await?;
    tracing::info!("expenses: cycle complete, {} row(s)", expenses_screen.rows().len());

    Ok(())
}

async fn seed(supplies: &Arc<MemoryTable<Supply>>) -> OpsResult<()> {
    for (name, quantity, unit_cost) in [
        ("Shea butter", 24, 3.2),
        ("Beeswax", 40, 2.25),
        ("Glass jars", 120, 0.8),
    ] {
        supplies
            .create(SupplyDraft {
                name: name.into(),
                supplier: "Acme Botanicals".into(),
                quantity: Some(quantity),
                unit_cost: Some(unit_cost),
                description: String::new(),
            })
            .await?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
