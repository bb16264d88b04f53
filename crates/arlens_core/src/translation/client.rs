//! Translation service boundary + Google Translate v2 client
//!
//! Wire format:
//! GET {endpoint}?q=..&q=..&target=da&format=text&key=..
//! → {"data":{"translations":[{"translatedText":"..."}, ...]}} (порядок = порядок q)

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslationError {
    #[error("translation request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("translation service answered HTTP {status}")]
    Status { status: u16 },

    #[error("malformed translation response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("expected {expected} translations, got {actual}")]
    CountMismatch { expected: usize, actual: usize },

    #[error("no translation API key configured")]
    MissingApiKey,
}

/// External translation API
///
/// Вызывается с IoTaskPool — блокирующий I/O допустим.
pub trait TranslationService: Send + Sync + 'static {
    /// Возвращает переводы в том же порядке, что `texts`
    fn translate(&self, texts: &[String], target_language: &str) -> Result<Vec<String>, TranslationError>;
}

#[derive(Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Deserialize)]
struct TranslateData {
    translations: Vec<TranslatedText>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedText {
    translated_text: String,
}

/// Разбирает тело ответа; число переводов обязано совпасть с числом запрошенных строк
///
/// API экранирует символы (`&#39;`, `&#233;`, ...) даже с format=text на части языков.
pub fn parse_translate_response(body: &str, expected: usize) -> Result<Vec<String>, TranslationError> {
    let response: TranslateResponse = serde_json::from_str(body)?;
    let translations: Vec<String> = response
        .data
        .translations
        .into_iter()
        .map(|entry| html_escape::decode_html_entities(&entry.translated_text).into_owned())
        .collect();

    if translations.len() != expected {
        return Err(TranslationError::CountMismatch {
            expected,
            actual: translations.len(),
        });
    }

    Ok(translations)
}

/// Google Cloud Translation v2 (REST, API key)
pub struct GoogleTranslateClient {
    http: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

impl GoogleTranslateClient {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::blocking::Client::new(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    /// Клиент из config; без API key — MissingApiKey
    pub fn from_config(config: &crate::config::ArLensConfig) -> Result<Self, TranslationError> {
        let api_key = config
            .translate_api_key
            .clone()
            .ok_or(TranslationError::MissingApiKey)?;
        Ok(Self::new(config.translate_endpoint.clone(), api_key))
    }

    pub fn query_params<'a>(&'a self, texts: &'a [String], target_language: &'a str) -> Vec<(&'static str, &'a str)> {
        let mut params: Vec<(&'static str, &'a str)> = texts.iter().map(|text| ("q", text.as_str())).collect();
        params.push(("target", target_language));
        params.push(("format", "text"));
        params.push(("key", self.api_key.as_str()));
        params
    }
}

impl TranslationService for GoogleTranslateClient {
    fn translate(&self, texts: &[String], target_language: &str) -> Result<Vec<String>, TranslationError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&self.query_params(texts, target_language))
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(TranslationError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text()?;
        parse_translate_response(&body, texts.len())
    }
}
