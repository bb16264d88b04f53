//! Content domain — тексты меню и языки

pub mod languages;
pub mod registry;

#[cfg(test)]
mod content_tests;

pub use languages::{code_at, code_for_name, language_codes, language_names, name_for_code, SELECTABLE_LANGUAGES};
pub use registry::{ContentRegistry, TranslationSlot, DEFAULT_ALLERGENS, DEFAULT_DESCRIPTIONS, DEFAULT_LANGUAGE};
