//! Translation domain — language selector → background round-trip → Content Registry
//!
//! Flow:
//! 1. Host (spinner) шлёт LanguageSelected { code }
//! 2. start_translations: target language в registry, новый generation, task на IoTaskPool
//! 3. Task: TranslationService::translate → одна атомарная замена translation array
//!    (только если за это время не выбрали другой язык)
//! 4. poll_translation_tasks (update thread): лог результата, Built anchors → Unbuilt
//!    (следующий build покажет новый текст)
//!
//! Ошибки transport/parse только логируются — registry остаётся прежним, UI не блокируется.

use bevy::prelude::*;
use bevy::tasks::{block_on, futures_lite::future, IoTaskPool, Task, TaskPool};
use std::sync::Arc;

pub mod client;

#[cfg(test)]
mod translation_tests;

pub use client::{parse_translate_response, GoogleTranslateClient, TranslationError, TranslationService};

use crate::anchor::AnchorBuildState;
use crate::content::{ContentRegistry, TranslationSlot, DEFAULT_LANGUAGE};
use crate::logger;
use crate::ArLensSet;

/// Event от language selector UI
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct LanguageSelected {
    pub code: String,
}

impl LanguageSelected {
    pub fn new(code: impl Into<String>) -> Self {
        Self { code: code.into() }
    }
}

/// Resource: активный translation service
///
/// Нет ресурса → выбор языка только меняет target language (warning в лог).
#[derive(Resource, Clone)]
pub struct TranslationBackend {
    service: Arc<dyn TranslationService>,
}

impl TranslationBackend {
    pub fn new(service: impl TranslationService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Чем закончился успешный round-trip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationApplied {
    /// Массив заменён (число строк)
    Published(usize),
    /// Пока шёл запрос, выбрали другой язык — ответ отброшен
    Superseded,
}

/// Результат одного round-trip (возвращается task'ом на update thread)
#[derive(Debug)]
pub struct TranslationOutcome {
    pub target_language: String,
    pub result: Result<TranslationApplied, TranslationError>,
}

/// In-flight round-trips (не отменяемые)
#[derive(Resource, Default)]
pub struct TranslationTasks {
    tasks: Vec<Task<TranslationOutcome>>,
}

impl TranslationTasks {
    pub fn in_flight(&self) -> usize {
        self.tasks.len()
    }
}

/// Один round-trip: перевести `texts` и опубликовать массив целиком
///
/// `generation` — из `TranslationSlot::begin_request` в момент выбора языка.
/// Target == исходный язык → публикуем оригиналы без сети.
/// Любая ошибка → slot не трогается.
pub fn translate_into(
    service: &dyn TranslationService,
    texts: &[String],
    target_language: &str,
    slot: &TranslationSlot,
    generation: u64,
) -> Result<TranslationApplied, TranslationError> {
    let translations = if target_language == DEFAULT_LANGUAGE {
        texts.to_vec()
    } else {
        if !slot.is_latest(generation) {
            return Ok(TranslationApplied::Superseded);
        }
        service.translate(texts, target_language)?
    };

    if translations.len() != slot.item_count() {
        return Err(TranslationError::CountMismatch {
            expected: slot.item_count(),
            actual: translations.len(),
        });
    }

    let count = translations.len();
    if slot.publish_if_latest(generation, translations) {
        Ok(TranslationApplied::Published(count))
    } else {
        Ok(TranslationApplied::Superseded)
    }
}

/// Система: LanguageSelected → target language + background round-trip
pub fn start_translations(
    mut selections: EventReader<LanguageSelected>,
    mut content: ResMut<ContentRegistry>,
    backend: Option<Res<TranslationBackend>>,
    mut tasks: ResMut<TranslationTasks>,
) {
    for selection in selections.read() {
        content.set_target_language(selection.code.clone());
        logger::log_info(&format!("🌐 Target language → {}", selection.code));

        // Generation берётся здесь, на update thread — порядок = порядок выбора.
        // Все ещё идущие round-trips для прошлых языков больше не опубликуются.
        let slot = content.translation_slot();
        let generation = slot.begin_request();

        let Some(backend) = backend.as_ref() else {
            logger::log_warning("⚠️ No translation service configured, keeping current texts");
            continue;
        };

        let service = Arc::clone(&backend.service);
        let texts = content.descriptions().to_vec();
        let target_language = selection.code.clone();

        let task = IoTaskPool::get_or_init(TaskPool::new).spawn(async move {
            let result = translate_into(service.as_ref(), &texts, &target_language, &slot, generation);
            TranslationOutcome {
                target_language,
                result,
            }
        });
        tasks.tasks.push(task);
    }
}

/// Система: забирает завершённые round-trips
///
/// Успех → все Built anchors перестраиваются в следующем build (новый текст).
pub fn poll_translation_tasks(mut tasks: ResMut<TranslationTasks>, mut anchors: Query<&mut AnchorBuildState>) {
    let mut refresh_anchors = false;

    tasks.tasks.retain_mut(|task| {
        let Some(outcome) = block_on(future::poll_once(task)) else {
            return true;
        };

        match outcome.result {
            Ok(TranslationApplied::Published(count)) => {
                logger::log_info(&format!(
                    "✅ {} texts translated to '{}'",
                    count, outcome.target_language
                ));
                refresh_anchors = true;
            }
            Ok(TranslationApplied::Superseded) => {
                logger::log(&format!(
                    "Translation to '{}' superseded by a newer selection",
                    outcome.target_language
                ));
            }
            Err(err) => {
                logger::log_error(&format!(
                    "❌ Translation to '{}' failed: {}",
                    outcome.target_language, err
                ));
            }
        }
        false
    });

    if refresh_anchors {
        for mut state in anchors.iter_mut() {
            if *state == AnchorBuildState::Built {
                *state = AnchorBuildState::Unbuilt;
            }
        }
    }
}

/// Translation Plugin
pub struct TranslationPlugin;

impl Plugin for TranslationPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LanguageSelected>()
            .init_resource::<TranslationTasks>()
            .add_systems(
                Update,
                (start_translations, poll_translation_tasks)
                    .chain()
                    .in_set(ArLensSet::Translate),
            );
    }
}
