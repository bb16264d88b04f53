//! Набор ассетов, которые нужны одному anchor node

use serde::{Deserialize, Serialize};

use super::asset::AssetKey;
use super::loader::{RenderableHandle, RenderableLoader};

/// Ассеты anchor subtree (data-driven, переопределяется из config)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetManifest {
    /// Рамка картинки: upper-left, upper-right, lower-right, lower-left
    pub corner_models: [String; 4],
    /// Layout панели с описанием + аллергенами
    pub detail_view: String,
    /// Layout кнопки выбора блюда
    pub button_view: String,
    /// Модель блюда на каждый пункт меню (порядок = Content Registry)
    pub content_models: Vec<String>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self {
            corner_models: [
                "models/frame_upper_left.sfb".into(),
                "models/frame_upper_right.sfb".into(),
                "models/frame_lower_right.sfb".into(),
                "models/frame_lower_left.sfb".into(),
            ],
            detail_view: "description.xml".into(),
            button_view: "menu_button.xml".into(),
            content_models: vec![
                "models/sushi.sfb".into(),
                "models/burger.sfb".into(),
                "models/pizza.sfb".into(),
                "models/rice.sfb".into(),
            ],
        }
    }
}

impl AssetManifest {
    pub fn corner_keys(&self) -> [AssetKey; 4] {
        self.corner_models.clone().map(AssetKey::model)
    }

    pub fn detail_key(&self) -> AssetKey {
        AssetKey::view(self.detail_view.clone())
    }

    pub fn button_key(&self) -> AssetKey {
        AssetKey::view(self.button_view.clone())
    }

    pub fn content_keys(&self) -> Vec<AssetKey> {
        self.content_models.iter().cloned().map(AssetKey::model).collect()
    }

    /// Все ключи manifest'а (для preload / MemoryAssetBackend)
    pub fn all_keys(&self) -> Vec<AssetKey> {
        let mut keys: Vec<AssetKey> = self.corner_keys().into();
        keys.push(self.detail_key());
        keys.push(self.button_key());
        keys.extend(self.content_keys());
        keys
    }
}

/// Component: handles всех renderables, нужных anchor subtree
///
/// `acquire` идемпотентен — несколько anchors шарят одни и те же загрузки.
#[derive(bevy::prelude::Component, Debug, Clone)]
pub struct AnchorRenderables {
    pub corners: [RenderableHandle; 4],
    pub detail: RenderableHandle,
    pub button: RenderableHandle,
    pub content: Vec<RenderableHandle>,
}

impl AnchorRenderables {
    pub fn acquire(manifest: &AssetManifest, loader: &mut RenderableLoader) -> Self {
        Self {
            corners: manifest.corner_keys().map(|key| loader.acquire(&key)),
            detail: loader.acquire(&manifest.detail_key()),
            button: loader.acquire(&manifest.button_key()),
            content: manifest
                .content_keys()
                .iter()
                .map(|key| loader.acquire(key))
                .collect(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderableHandle> {
        self.corners
            .iter()
            .chain(std::iter::once(&self.detail))
            .chain(std::iter::once(&self.button))
            .chain(self.content.iter())
    }

    /// Все загрузки завершены (Ready или Failed) — можно строить subtree
    pub fn all_settled(&self, loader: &RenderableLoader) -> bool {
        self.iter().all(|handle| loader.is_settled(handle))
    }

    pub fn pending_count(&self, loader: &RenderableLoader) -> usize {
        self.iter().filter(|handle| !loader.is_settled(handle)).count()
    }
}
