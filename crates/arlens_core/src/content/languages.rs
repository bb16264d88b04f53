//! Языки для language selector (spinner)

/// (code, display name) в порядке отображения в selector
pub const SELECTABLE_LANGUAGES: [(&str, &str); 5] = [
    ("en", "English"),
    ("da", "Danish"),
    ("it", "Italian"),
    ("pl", "Polish"),
    ("es", "Spanish"),
];

/// Известные, но не показанные в selector языки
const EXTRA_LANGUAGES: [(&str, &str); 1] = [("de", "German")];

pub fn language_codes() -> impl Iterator<Item = &'static str> {
    SELECTABLE_LANGUAGES.iter().map(|(code, _)| *code)
}

pub fn language_names() -> impl Iterator<Item = &'static str> {
    SELECTABLE_LANGUAGES.iter().map(|(_, name)| *name)
}

/// Code по позиции в selector (то, что эмитит spinner)
pub fn code_at(position: usize) -> Option<&'static str> {
    SELECTABLE_LANGUAGES.get(position).map(|(code, _)| *code)
}

pub fn name_for_code(code: &str) -> Option<&'static str> {
    SELECTABLE_LANGUAGES
        .iter()
        .chain(EXTRA_LANGUAGES.iter())
        .find(|(known, _)| *known == code)
        .map(|(_, name)| *name)
}

pub fn code_for_name(name: &str) -> Option<&'static str> {
    SELECTABLE_LANGUAGES
        .iter()
        .find(|(_, known)| known.eq_ignore_ascii_case(name))
        .map(|(code, _)| *code)
}
