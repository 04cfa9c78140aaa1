//! Shared fixtures: a small room scene and a loader whose fetches the test
//! completes by hand, in any order.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use parking_lot::Mutex;
use tokio::sync::oneshot;

use gallery::assets::{AssetServer, MaterialHandle};
use gallery::errors::AssetError;
use gallery::frames::{AppearanceLoader, Locator};
use gallery::resources::Material;
use gallery::scene::{Mesh, NodeHandle, Scene};

pub struct Room {
    pub scene: Scene,
    pub assets: AssetServer,
    /// Authored canvas material per picture index (1-based).
    pub originals: Vec<MaterialHandle>,
}

impl Room {
    /// `Room` → `picture-N` group → { `Frame` (wood), `picture-N-image` (canvas) }
    /// for N in `pictures`.
    pub fn new(pictures: impl IntoIterator<Item = usize>) -> Self {
        let assets = AssetServer::new();
        let mut scene = Scene::new();
        let room = scene.create_node_with_name("Room");
        let wood = assets.materials.add(Material::default().named("wood"));

        let mut originals = vec![MaterialHandle::default(); 9];
        for n in pictures {
            let group = scene.add_to_parent(&format!("picture-{n}"), room);
            let frame = scene.add_to_parent("Frame", group);
            scene.set_mesh(frame, Mesh::new(wood));

            let canvas = scene.add_to_parent(&format!("picture-{n}-image"), group);
            let material = assets
                .materials
                .add(Material::default().named(&format!("canvas-{n}")));
            scene.set_mesh(canvas, Mesh::new(material));
            originals[n] = material;
        }

        Self {
            scene,
            assets,
            originals,
        }
    }

    pub fn canvas(&self, n: usize) -> NodeHandle {
        self.scene
            .find_by_name(&format!("picture-{n}-image"))
            .expect("canvas exists")
    }

    pub fn shown(&self, n: usize) -> MaterialHandle {
        self.scene.get_mesh(self.canvas(n)).unwrap().material
    }
}

type Reply = Result<MaterialHandle, AssetError>;

/// Loader whose fetches stay pending until [`ManualLoader::complete`].
#[derive(Clone, Default)]
pub struct ManualLoader {
    waiting: Arc<Mutex<HashMap<String, Vec<oneshot::Sender<Reply>>>>>,
    requested: Arc<Mutex<Vec<String>>>,
}

impl ManualLoader {
    pub fn complete(&self, locator: &str, reply: Reply) {
        let sender = self
            .waiting
            .lock()
            .get_mut(locator)
            .and_then(|queue| (!queue.is_empty()).then(|| queue.remove(0)))
            .unwrap_or_else(|| panic!("no fetch in flight for {locator}"));
        let _ = sender.send(reply);
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().clone()
    }
}

impl AppearanceLoader for ManualLoader {
    type Appearance = MaterialHandle;

    fn load(&self, locator: &Locator) -> BoxFuture<'static, Reply> {
        let (tx, rx) = oneshot::channel();
        self.waiting
            .lock()
            .entry(locator.as_str().to_string())
            .or_default()
            .push(tx);
        self.requested.lock().push(locator.as_str().to_string());
        Box::pin(async move {
            rx.await
                .unwrap_or_else(|_| Err(AssetError::Network("fetch dropped".to_string())))
        })
    }
}

/// Lets spawned fetch tasks run on the current-thread test runtime.
pub async fn let_tasks_run() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

pub fn png_bytes(rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(2, 2, image::Rgba(rgba));
    let mut out = std::io::Cursor::new(Vec::new());
    img.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
