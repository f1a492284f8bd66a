//! Cart durability across sessions on the same device.

use sticker_craft_core::{Price, StickerMaterial, StickerShape};
use sticker_craft_integration_tests::{priced_draft, temp_storage_dir};
use sticker_craft_storefront::cart::{
    CartStore, DEFAULT_CART_NAMESPACE, FileBackend, StorageBackend,
};

#[test]
fn cart_survives_a_restart() {
    let dir = temp_storage_dir();
    let added_id;

    {
        let backend = FileBackend::new(&dir);
        let mut store = CartStore::open(backend, DEFAULT_CART_NAMESPACE).unwrap();
        added_id = store
            .add_item(priced_draft(
                StickerShape::DieCut,
                StickerMaterial::Holographic,
                50,
            ))
            .unwrap();
        store
            .add_item(priced_draft(StickerShape::Sheet, StickerMaterial::Matte, 10))
            .unwrap();
    }

    let backend = FileBackend::new(&dir);
    let reopened = CartStore::open(backend, DEFAULT_CART_NAMESPACE).unwrap();

    assert_eq!(reopened.len(), 2);
    assert_eq!(reopened.items()[0].id, added_id);
    assert_eq!(reopened.total_item_count(), 60);
    // 210.00 + 52.25
    assert_eq!(reopened.total_price(), Price::from_cents(262_25));

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn reopened_items_equal_what_was_added() {
    let dir = temp_storage_dir();
    let backend = FileBackend::new(&dir);

    let mut store = CartStore::open(backend.clone(), DEFAULT_CART_NAMESPACE).unwrap();
    let draft = priced_draft(StickerShape::Oval, StickerMaterial::Gloss, 7);
    store.add_item(draft.clone()).unwrap();
    let original = store.items()[0].clone();
    drop(store);

    let reopened = CartStore::open(backend, DEFAULT_CART_NAMESPACE).unwrap();
    let restored = &reopened.items()[0];

    // Field-for-field equal, including the generated ID and timestamp.
    assert_eq!(restored, &original);
    // And the caller-supplied fields match the draft.
    assert_eq!(restored.shape, draft.shape);
    assert_eq!(restored.quantity, draft.quantity);
    assert_eq!(restored.price, draft.price);

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn clearing_persists_the_empty_collection() {
    let dir = temp_storage_dir();
    let backend = FileBackend::new(&dir);

    let mut store = CartStore::open(backend.clone(), DEFAULT_CART_NAMESPACE).unwrap();
    store
        .add_item(priced_draft(StickerShape::Square, StickerMaterial::Gloss, 5))
        .unwrap();
    store.clear().unwrap();
    drop(store);

    assert_eq!(
        backend.read(DEFAULT_CART_NAMESPACE).unwrap().as_deref(),
        Some("[]")
    );
    let reopened = CartStore::open(backend, DEFAULT_CART_NAMESPACE).unwrap();
    assert!(reopened.is_empty());
    assert_eq!(reopened.total_price(), Price::ZERO);

    std::fs::remove_dir_all(dir).unwrap();
}

#[test]
fn unreadable_payload_starts_empty_and_heals_on_next_write() {
    let dir = temp_storage_dir();
    let backend = FileBackend::new(&dir);
    backend
        .write(DEFAULT_CART_NAMESPACE, "{ definitely not a cart")
        .unwrap();

    let mut store = CartStore::open(backend.clone(), DEFAULT_CART_NAMESPACE).unwrap();
    assert!(store.is_empty());

    store
        .add_item(priced_draft(StickerShape::Rectangle, StickerMaterial::Matte, 1))
        .unwrap();
    drop(store);

    let reopened = CartStore::open(backend, DEFAULT_CART_NAMESPACE).unwrap();
    assert_eq!(reopened.len(), 1);

    std::fs::remove_dir_all(dir).unwrap();
}
