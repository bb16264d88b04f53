//! Порядок выбора языков vs порядок ответов translation service
//!
//! Ответ для раньше выбранного языка может прийти позже — registry всё равно
//! должен закончить на последнем выбранном языке.

use arlens_core::translation::{TranslationError, TranslationTasks};
use arlens_core::*;
use bevy::prelude::*;
use bevy::tasks::{IoTaskPool, TaskPoolBuilder};
use std::time::Duration;

/// Danish отвечает медленно, остальные языки — сразу
struct SlowDanishTranslator;

impl TranslationService for SlowDanishTranslator {
    fn translate(&self, texts: &[String], target: &str) -> Result<Vec<String>, TranslationError> {
        if target == "da" {
            std::thread::sleep(Duration::from_millis(400));
        }
        Ok(texts.iter().map(|_| format!("{}-text", target)).collect())
    }
}

#[test]
fn test_last_selected_language_wins_over_late_answer() {
    // Несколько IO потоков, чтобы round-trips реально шли параллельно
    IoTaskPool::get_or_init(|| TaskPoolBuilder::new().num_threads(4).build());

    let mut app = create_headless_app();
    let backend = MemoryAssetBackend::from_keys(&AssetManifest::default().all_keys());
    app.insert_resource(RenderableLoader::new(backend));
    app.insert_resource(TranslationBackend::new(SlowDanishTranslator));
    app.add_plugins(ArLensPlugin);

    app.world_mut().send_event(LanguageSelected::new("da"));
    app.update();
    app.world_mut().send_event(LanguageSelected::new("it"));
    app.update();

    for _ in 0..1000 {
        if app.world().resource::<TranslationTasks>().in_flight() == 0 {
            break;
        }
        std::thread::sleep(Duration::from_millis(2));
        app.update();
    }
    assert_eq!(app.world().resource::<TranslationTasks>().in_flight(), 0);

    let content = app.world().resource::<ContentRegistry>();
    assert_eq!(content.target_language(), "it");
    for index in 0..content.item_count() {
        assert_eq!(content.translation(index), "it-text");
    }
}
