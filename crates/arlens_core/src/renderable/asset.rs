//! Asset identity + loaded renderable + asset backends

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::error::LoadError;

/// Тип renderable: 3D модель или 2D view surface (layout)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Model,
    View,
}

/// Identity ассета (ключ кэша loader'а)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetKey {
    pub kind: AssetKind,
    /// Путь относительно asset root (модель) или имя layout (view)
    pub path: String,
}

impl AssetKey {
    pub fn model(path: impl Into<String>) -> Self {
        Self {
            kind: AssetKind::Model,
            path: path.into(),
        }
    }

    pub fn view(layout: impl Into<String>) -> Self {
        Self {
            kind: AssetKind::View,
            path: layout.into(),
        }
    }
}

impl std::fmt::Display for AssetKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            AssetKind::Model => write!(f, "model:{}", self.path),
            AssetKind::View => write!(f, "view:{}", self.path),
        }
    }
}

/// Загруженный, attachable visual asset
///
/// Immutable после resolve — шарится всеми anchor nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Renderable {
    pub key: AssetKey,
    pub byte_len: usize,
}

impl Renderable {
    pub fn new(key: AssetKey, byte_len: usize) -> Self {
        Self { key, byte_len }
    }

    pub fn kind(&self) -> AssetKind {
        self.key.kind
    }
}

/// External asset loader (Sceneform builder, filesystem, APK assets, ...)
///
/// Вызывается на IoTaskPool — блокирующий I/O допустим.
pub trait AssetBackend: Send + Sync + 'static {
    fn load(&self, key: &AssetKey) -> Result<Renderable, LoadError>;
}

/// Читает ассеты с диска относительно `root`
#[derive(Debug, Clone)]
pub struct FileAssetBackend {
    root: PathBuf,
}

impl FileAssetBackend {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, key: &AssetKey) -> PathBuf {
        match key.kind {
            AssetKind::Model => self.root.join(&key.path),
            // Views лежат в layout/ (как res/layout на Android)
            AssetKind::View => self.root.join("layout").join(&key.path),
        }
    }
}

impl AssetBackend for FileAssetBackend {
    fn load(&self, key: &AssetKey) -> Result<Renderable, LoadError> {
        let path = self.resolve(key);
        let bytes = std::fs::read(&path).map_err(|err| match err.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound {
                path: path.display().to_string(),
            },
            _ => LoadError::Io {
                path: path.display().to_string(),
                reason: err.to_string(),
            },
        })?;

        if bytes.is_empty() {
            return Err(LoadError::Empty {
                path: path.display().to_string(),
            });
        }

        Ok(Renderable::new(key.clone(), bytes.len()))
    }
}

/// In-memory asset bank (headless demo, тесты)
#[derive(Debug, Clone, Default)]
pub struct MemoryAssetBackend {
    assets: HashMap<AssetKey, Vec<u8>>,
}

impl MemoryAssetBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: AssetKey, bytes: impl Into<Vec<u8>>) {
        self.assets.insert(key, bytes.into());
    }

    pub fn with_asset(mut self, key: AssetKey, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(key, bytes);
        self
    }

    /// Регистрирует все ассеты manifest'а с placeholder содержимым
    pub fn from_keys<'a>(keys: impl IntoIterator<Item = &'a AssetKey>) -> Self {
        let mut backend = Self::new();
        for key in keys {
            let placeholder = format!("placeholder {}", key).into_bytes();
            backend.insert(key.clone(), placeholder);
        }
        backend
    }

    pub fn without(mut self, key: &AssetKey) -> Self {
        self.assets.remove(key);
        self
    }
}

impl AssetBackend for MemoryAssetBackend {
    fn load(&self, key: &AssetKey) -> Result<Renderable, LoadError> {
        let bytes = self.assets.get(key).ok_or_else(|| LoadError::NotFound {
            path: key.path.clone(),
        })?;

        if bytes.is_empty() {
            return Err(LoadError::Empty {
                path: key.path.clone(),
            });
        }

        Ok(Renderable::new(key.clone(), bytes.len()))
    }
}
