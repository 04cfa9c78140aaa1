//! Asset storage and async image loading.

pub mod io;
pub mod server;
pub mod storage;

pub use io::AssetReaderVariant;
pub use server::{AssetServer, MaterialHandle, TextureHandle};
pub use storage::AssetStorage;

use crate::resources::ImageFormat;
use std::future::Future;

/// How decoded bytes are to be interpreted by the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColorSpace {
    /// Surface colors. Picture frame images always use this.
    #[default]
    Srgb,
    Linear,
}

impl ColorSpace {
    #[must_use]
    pub fn image_format(self) -> ImageFormat {
        match self {
            ColorSpace::Srgb => ImageFormat::Rgba8UnormSrgb,
            ColorSpace::Linear => ImageFormat::Rgba8Unorm,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn get_asset_runtime() -> &'static tokio::runtime::Runtime {
    use std::sync::OnceLock;
    static RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("gallery-assets")
            .enable_all()
            .build()
            .expect("Failed to create asset loader runtime")
    })
}

/// Runs `future` in the background.
///
/// Native: on the ambient tokio runtime when called from inside one, otherwise
/// on a shared asset runtime. Web: on the browser's microtask queue.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + Send + 'static,
{
    match tokio::runtime::Handle::try_current() {
        Ok(handle) => {
            handle.spawn(future);
        }
        Err(_) => {
            get_asset_runtime().spawn(future);
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub fn spawn_detached<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}
