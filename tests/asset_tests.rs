//! Asset Storage & Loading Tests
//!
//! Tests for:
//! - AssetStorage: add, get, len, keyed deduplication
//! - Thread safety: concurrent reads via RwLock
//! - AssetServer: clone shares storage, texture loading from file / data URI
//! - ColorSpace selection and decode failures

use base64::Engine as _;
use gallery::assets::{AssetServer, AssetStorage, ColorSpace};
use gallery::errors::AssetError;
use gallery::resources::ImageFormat;
use slotmap::new_key_type;

new_key_type! { struct TestHandle; }

fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(rgba));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

// ============================================================================
// AssetStorage Basic CRUD
// ============================================================================

#[test]
fn storage_add_and_get() {
    let storage = AssetStorage::<TestHandle, String>::new();
    let handle = storage.add("hello".to_string());
    let value = storage.get(handle).unwrap();
    assert_eq!(&**value, "hello");
}

#[test]
fn storage_get_foreign_handle_returns_none() {
    let storage = AssetStorage::<TestHandle, String>::new();
    let handle = storage.add("test".to_string());
    let storage2 = AssetStorage::<TestHandle, String>::new();
    assert!(storage2.get(handle).is_none());
    assert!(!storage2.contains(handle));
}

#[test]
fn storage_multiple_assets() {
    let storage = AssetStorage::<TestHandle, i32>::new();
    let h1 = storage.add(10);
    let h2 = storage.add(20);

    assert_eq!(*storage.get(h1).unwrap(), 10);
    assert_eq!(*storage.get(h2).unwrap(), 20);
    assert_eq!(storage.len(), 2);
}

#[test]
fn storage_add_keyed_keeps_first_insert() {
    let storage = AssetStorage::<TestHandle, String>::new();
    let first = storage.add_keyed("a.png", "first".to_string());
    let second = storage.add_keyed("a.png", "second".to_string());
    let other = storage.add_keyed("b.png", "other".to_string());

    assert_eq!(first, second);
    assert_ne!(first, other);
    assert_eq!(&**storage.get(first).unwrap(), "first");
    assert_eq!(storage.get_handle_by_key("b.png"), Some(other));
    assert_eq!(storage.get_handle_by_key("c.png"), None);
    assert_eq!(storage.len(), 2);
}

#[test]
fn storage_concurrent_reads() {
    use std::sync::Arc;
    use std::thread;

    let storage = Arc::new(AssetStorage::<TestHandle, i32>::new());
    let handle = storage.add(42);

    let mut handles = Vec::new();
    for _ in 0..4 {
        let s = Arc::clone(&storage);
        handles.push(thread::spawn(move || {
            assert_eq!(*s.get(handle).unwrap(), 42);
        }));
    }

    for h in handles {
        h.join().unwrap();
    }
}

// ============================================================================
// AssetServer
// ============================================================================

#[test]
fn asset_server_clone_shares_storage() {
    let server = AssetServer::new();
    let clone = server.clone();
    let handle = server.materials.add(gallery::Material::default());
    assert!(clone.materials.get(handle).is_some());
}

#[tokio::test]
async fn load_texture_from_file_uses_srgb() {
    let dir = std::env::temp_dir().join(format!("gallery-assets-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("red.png");
    std::fs::write(&path, png_bytes(4, 2, [255, 0, 0, 255])).unwrap();

    let server = AssetServer::new();
    let handle = server
        .load_texture_async(path.to_str().unwrap(), ColorSpace::Srgb)
        .await
        .unwrap();

    let texture = server.textures.get(handle).unwrap();
    assert_eq!(texture.name, "red.png");
    assert_eq!((texture.width(), texture.height()), (4, 2));
    assert_eq!(texture.image.format(), ImageFormat::Rgba8UnormSrgb);
    assert_eq!(&texture.image.data()[..4], &[255, 0, 0, 255]);

    std::fs::remove_dir_all(&dir).ok();
}

#[tokio::test]
async fn loading_a_locator_twice_reuses_the_texture() -> anyhow::Result<()> {
    let payload = base64::engine::general_purpose::STANDARD.encode(png_bytes(1, 1, [9, 9, 9, 255]));
    let uri = format!("data:image/png;base64,{payload}");

    let server = AssetServer::new();
    let first = server.load_texture_async(&uri, ColorSpace::Srgb).await?;
    let again = server.load_texture_async(&uri, ColorSpace::Srgb).await?;
    assert_eq!(first, again);
    assert_eq!(server.textures.len(), 1);

    let linear = server.load_texture_async(&uri, ColorSpace::Linear).await?;
    assert_ne!(first, linear, "Color space is part of the key");
    assert_eq!(server.textures.len(), 2);
    Ok(())
}

#[tokio::test]
async fn load_texture_from_data_uri() {
    let payload = base64::engine::general_purpose::STANDARD.encode(png_bytes(1, 1, [0, 0, 255, 255]));
    let uri = format!("data:image/png;base64,{payload}");

    let server = AssetServer::new();
    let handle = server
        .load_texture_async(&uri, ColorSpace::Linear)
        .await
        .unwrap();

    let texture = server.textures.get(handle).unwrap();
    assert_eq!(texture.image.format(), ImageFormat::Rgba8Unorm);
    assert_eq!(texture.image.data(), &[0, 0, 255, 255]);
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let server = AssetServer::new();
    let err = server
        .load_texture_async("/definitely/not/here.png", ColorSpace::Srgb)
        .await
        .unwrap_err();
    assert!(matches!(err, AssetError::NotFound(_)), "got {err:?}");
    assert!(server.textures.is_empty());
}

#[tokio::test]
async fn undecodable_bytes_are_a_format_error() {
    let server = AssetServer::new();
    let err = server
        .load_texture_from_bytes_async("junk", b"not an image".to_vec(), ColorSpace::Srgb)
        .await
        .unwrap_err();
    assert!(matches!(err, AssetError::Format(_)), "got {err:?}");
}
