//! Renderable domain — async загрузка 3D моделей / 2D views
//!
//! - asset: AssetKey, Renderable, AssetBackend (+ file / memory backends)
//! - loader: RenderableLoader (exactly-once cache), RenderableSettled event
//! - manifest: AssetManifest + AnchorRenderables (handles одного anchor)

use bevy::prelude::*;

pub mod asset;
pub mod error;
pub mod loader;
pub mod manifest;


pub use asset::{AssetBackend, AssetKey, AssetKind, FileAssetBackend, MemoryAssetBackend, Renderable};
pub use error::LoadError;
pub use loader::{poll_renderable_loads, LoadStatus, RenderableHandle, RenderableLoader, RenderableSettled};
pub use manifest::{AnchorRenderables, AssetManifest};

use crate::ArLensSet;

/// Renderable Plugin
///
/// RenderableLoader вставляет host (выбор backend'а), plugin только регистрирует
/// event и poll систему в начале frame.
pub struct RenderablePlugin;

impl Plugin for RenderablePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<RenderableSettled>()
            .add_systems(Update, poll_renderable_loads.in_set(ArLensSet::LoadResources));
    }
}
