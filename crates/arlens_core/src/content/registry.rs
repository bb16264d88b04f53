//! Content Registry — тексты пунктов меню (description / translation / allergens)
//!
//! Индексация позиционная и фиксированная: индекс вне диапазона = programming error (panic).
//! Translation array заменяется целиком одной атомарной заменой (ArcSwap) — reader
//! видит либо весь старый массив, либо весь новый.

use arc_swap::ArcSwap;
use bevy::prelude::*;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Описания по умолчанию (исходный язык меню — английский)
pub const DEFAULT_DESCRIPTIONS: [&str; 4] = [
    "Sushi set - special of the chief famous salmon sushi",
    "French fries and bacon and Cheddar burger",
    "pizza pepperoni",
    "chief's special rice",
];

pub const DEFAULT_ALLERGENS: [&str; 4] = [
    "Fish, Sesame Seeds, Milk, Soybeans",
    "Wheat, Soy, Egg, Milk",
    "Milk, Gluten",
    "No allergens",
];

pub const DEFAULT_LANGUAGE: &str = "en";

/// Опубликованный translation array + generation запроса, который его принёс
struct PublishedTranslations {
    generation: u64,
    texts: Arc<Vec<String>>,
}

/// Publisher handle для translation array
///
/// Clone уходит в background translation task; запись — одна атомарная замена.
/// Каждый round-trip получает generation через `begin_request`; опубликовать
/// может только самый новый запрос (выбор языка "da" → "it" не откатится на "da",
/// даже если ответ для "da" придёт последним).
#[derive(Clone)]
pub struct TranslationSlot {
    translations: Arc<ArcSwap<PublishedTranslations>>,
    latest_request: Arc<AtomicU64>,
    item_count: usize,
}

impl TranslationSlot {
    fn new(initial: Vec<String>) -> Self {
        let item_count = initial.len();
        Self {
            translations: Arc::new(ArcSwap::from_pointee(PublishedTranslations {
                generation: 0,
                texts: Arc::new(initial),
            })),
            latest_request: Arc::new(AtomicU64::new(0)),
            item_count,
        }
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Регистрирует новый round-trip; все более старые становятся устаревшими
    pub fn begin_request(&self) -> u64 {
        self.latest_request.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_latest(&self, generation: u64) -> bool {
        self.latest_request.load(Ordering::SeqCst) == generation
    }

    /// Заменяет весь массив, если запрос `generation` всё ещё самый новый
    ///
    /// Возвращает false для устаревшего запроса (slot не тронут).
    /// Panics если длина не совпадает с числом пунктов (caller валидирует ответ заранее).
    pub fn publish_if_latest(&self, generation: u64, translations: Vec<String>) -> bool {
        assert_eq!(
            translations.len(),
            self.item_count,
            "translation array length must match the fixed item count"
        );

        if !self.is_latest(generation) {
            return false;
        }

        let texts = Arc::new(translations);
        let mut published = false;
        // Более новый запрос мог успеть опубликоваться между проверкой и записью
        self.translations.rcu(|current| {
            if current.generation > generation {
                published = false;
                Arc::clone(current)
            } else {
                published = true;
                Arc::new(PublishedTranslations {
                    generation,
                    texts: Arc::clone(&texts),
                })
            }
        });
        published
    }

    /// Безусловная замена (новый generation, вытесняет все in-flight запросы)
    pub fn publish(&self, translations: Vec<String>) {
        let generation = self.begin_request();
        self.publish_if_latest(generation, translations);
    }

    /// Consistent snapshot всего массива
    pub fn snapshot(&self) -> Arc<Vec<String>> {
        Arc::clone(&self.translations.load().texts)
    }
}

/// Resource: все тексты меню + выбранный язык
#[derive(Resource, Clone)]
pub struct ContentRegistry {
    descriptions: Arc<[String]>,
    allergens: Arc<[String]>,
    translations: TranslationSlot,
    target_language: String,
}

impl Default for ContentRegistry {
    fn default() -> Self {
        Self::new(
            DEFAULT_DESCRIPTIONS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_ALLERGENS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl ContentRegistry {
    /// Translations стартуют равными descriptions (исходный язык)
    pub fn new(descriptions: Vec<String>, allergens: Vec<String>) -> Self {
        assert_eq!(
            descriptions.len(),
            allergens.len(),
            "every menu item needs exactly one allergen line"
        );

        Self {
            translations: TranslationSlot::new(descriptions.clone()),
            descriptions: descriptions.into(),
            allergens: allergens.into(),
            target_language: DEFAULT_LANGUAGE.to_string(),
        }
    }

    pub fn item_count(&self) -> usize {
        self.descriptions.len()
    }

    pub fn descriptions(&self) -> &[String] {
        &self.descriptions
    }

    pub fn description(&self, index: usize) -> &str {
        &self.descriptions[index]
    }

    pub fn allergen(&self, index: usize) -> &str {
        &self.allergens[index]
    }

    pub fn translation(&self, index: usize) -> String {
        self.translations.snapshot()[index].clone()
    }

    pub fn translations(&self) -> Arc<Vec<String>> {
        self.translations.snapshot()
    }

    pub fn set_translations(&self, translations: Vec<String>) {
        self.translations.publish(translations);
    }

    pub fn translation_slot(&self) -> TranslationSlot {
        self.translations.clone()
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// Запоминает язык для следующего translation round-trip
    pub fn set_target_language(&mut self, code: impl Into<String>) {
        self.target_language = code.into();
    }
}
