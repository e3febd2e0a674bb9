//! Asset cache owned by the rendering layer.
//!
//! Textures and other shared assets are loaded once, looked up by path, and
//! released together when the cache is disposed or dropped.

use crate::error::Result;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

/// Wood grain used on furniture.
pub const WOODEN_TEXTURE: &str = "/images/wooden-texture.jpg";

/// Plank texture used on the wall.
pub const WOODEN_PLANK_TEXTURE: &str = "/images/wooden-plank-texture.jpg";

/// Assets loaded at startup.
pub const DEFAULT_ASSETS: &[&str] = &[WOODEN_TEXTURE, WOODEN_PLANK_TEXTURE];

/// Loads and releases one kind of asset.
pub trait AssetLoader {
    type Asset;

    /// Load the asset at `path`.
    fn load(&self, path: &str) -> Result<Self::Asset>;

    /// Release an asset evicted from the cache.
    fn dispose(&self, _asset: Self::Asset) {}
}

/// Path-keyed cache over an [`AssetLoader`].
pub struct AssetCache<L: AssetLoader> {
    loader: L,
    assets: HashMap<String, L::Asset>,
}

impl<L: AssetLoader> AssetCache<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            assets: HashMap::new(),
        }
    }

    /// Load every path not already cached. Failures are logged and skipped.
    ///
    /// Returns how many assets are newly loaded.
    pub fn populate<'a>(&mut self, paths: impl IntoIterator<Item = &'a str>) -> usize {
        let mut loaded = 0;
        for path in paths {
            if self.assets.contains_key(path) {
                continue;
            }
            match self.loader.load(path) {
                Ok(asset) => {
                    self.assets.insert(path.to_string(), asset);
                    loaded += 1;
                }
                Err(e) => log::warn!("Skipping asset: {}", e),
            }
        }
        log::info!("Asset cache populated: {} loaded, {} cached", loaded, self.assets.len());
        loaded
    }

    /// Cached asset at `path`, loading it on first use.
    pub fn load(&mut self, path: &str) -> Result<&L::Asset> {
        match self.assets.entry(path.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => Ok(entry.insert(self.loader.load(path)?)),
        }
    }

    /// Cached asset at `path`, without loading.
    pub fn get(&self, path: &str) -> Option<&L::Asset> {
        self.assets.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.assets.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }

    /// Release every cached asset. The cache can be populated again.
    pub fn dispose(&mut self) {
        if self.assets.is_empty() {
            return;
        }
        log::debug!("Disposing {} cached assets", self.assets.len());
        for (_, asset) in self.assets.drain() {
            self.loader.dispose(asset);
        }
    }

    pub fn loader(&self) -> &L {
        &self.loader
    }
}

impl<L: AssetLoader> Drop for AssetCache<L> {
    fn drop(&mut self) {
        self.dispose();
    }
}
