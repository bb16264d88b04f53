//! ArLens Core
//!
//! Augmented-image tracking lifecycle + node attachment engine на Bevy 0.16.
//!
//! HOST ARCHITECTURE:
//! - Host (Android/ARCore bridge, headless demo) = tracking provider + asset backend + tap/UI events
//! - ECS = scene graph (anchor entities + ChildOf subtree), один update callback на frame
//!
//! Порядок внутри frame (ArLensSet, chained):
//! 1. LoadResources — завершённые загрузки → RenderableSettled
//! 2. Reconcile — provider frame ↔ AnchorRegistry
//! 3. Build — anchor subtrees (Unbuilt / resumed Waiting)
//! 4. Interact — MenuButton taps
//! 5. Translate — language selection, translation round-trips

use bevy::prelude::*;

// Публичные модули
pub mod anchor;
pub mod config;
pub mod content;
pub mod logger;
pub mod renderable;
pub mod tracking;
pub mod translation;

// Re-export основных типов
pub use anchor::{
    AnchorBuildState, AnchorPlugin, AttachedRenderable, AugmentedImageAnchor, ContentItem, Corner, CornerMarker,
    DetailPanel, MenuButton, MenuButtonTapped,
};
pub use config::{ArLensConfig, ConfigError};
pub use content::ContentRegistry;
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, set_logger, LogLevel, LogPrinter};
pub use renderable::{
    AssetBackend, AssetKey, AssetManifest, FileAssetBackend, MemoryAssetBackend, RenderableLoader, RenderablePlugin,
};
pub use tracking::{
    AnchorRegistry, CameraFrame, FitToScanHint, ImageIndex, Pose, RandomTracker, ScriptedTracker, TrackedImage,
    TrackingPlugin, TrackingProvider, TrackingSource, TrackingState,
};
pub use translation::{
    GoogleTranslateClient, LanguageSelected, TranslationBackend, TranslationPlugin, TranslationService,
};

/// Фазы одного frame (выполняются строго последовательно)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArLensSet {
    LoadResources,
    Reconcile,
    Build,
    Interact,
    Translate,
}

/// Главный plugin (объединяет все подсистемы)
///
/// Ресурсы, которые host может вставить ДО plugin'а (иначе defaults):
/// - ArLensConfig
/// - ContentRegistry
/// - RenderableLoader (default: FileAssetBackend от config.asset_root)
///
/// Вставляются host'ом в любой момент: TrackingSource, TranslationBackend.
pub struct ArLensPlugin;

impl Plugin for ArLensPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<ArLensConfig>()
            .cloned()
            .unwrap_or_default();

        logger::set_log_level(config.log_level);

        if !app.world().contains_resource::<ContentRegistry>() {
            let mut content = ContentRegistry::default();
            content.set_target_language(config.default_language.clone());
            app.insert_resource(content);
        }

        let item_count = app.world().resource::<ContentRegistry>().item_count();
        if let Err(err) = config.validate(item_count) {
            // Пункты без модели показываются без геометрии
            logger::log_error(&format!("❌ {}", err));
        }

        if !app.world().contains_resource::<RenderableLoader>() {
            app.insert_resource(RenderableLoader::new(FileAssetBackend::new(config.asset_root.clone())));
        }

        app.insert_resource(config)
            .configure_sets(
                Update,
                (
                    ArLensSet::LoadResources,
                    ArLensSet::Reconcile,
                    ArLensSet::Build,
                    ArLensSet::Interact,
                    ArLensSet::Translate,
                )
                    .chain(),
            )
            .add_plugins((RenderablePlugin, TrackingPlugin, AnchorPlugin, TranslationPlugin));
    }
}

/// Создаёт minimal Bevy App для headless запуска (demo, тесты)
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins);
    app
}
