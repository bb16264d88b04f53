//! Tests for translation round-trip + wire format.

#[cfg(test)]
mod tests {
    use super::super::client::{parse_translate_response, GoogleTranslateClient, TranslationError, TranslationService};
    use super::super::{translate_into, TranslationApplied};
    use crate::content::{ContentRegistry, DEFAULT_DESCRIPTIONS};

    /// Фиксированный ответ (как будто сервис вернул JSON)
    struct FixedTranslator(Vec<&'static str>);

    impl TranslationService for FixedTranslator {
        fn translate(&self, _texts: &[String], _target: &str) -> Result<Vec<String>, TranslationError> {
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    struct BrokenTranslator;

    impl TranslationService for BrokenTranslator {
        fn translate(&self, _texts: &[String], _target: &str) -> Result<Vec<String>, TranslationError> {
            Err(TranslationError::Status { status: 503 })
        }
    }

    #[test]
    fn test_parse_google_response() {
        let body = r#"{"data":{"translations":[
            {"translatedText":"x","detectedSourceLanguage":"en"},
            {"translatedText":"y"},
            {"translatedText":"z"},
            {"translatedText":"chef&#39;s ris"}
        ]}}"#;

        let translations = parse_translate_response(body, 4).unwrap();
        assert_eq!(translations, vec!["x", "y", "z", "chef's ris"]);
    }

    #[test]
    fn test_parse_rejects_malformed_body() {
        let result = parse_translate_response(r#"{"error":{"code":400}}"#, 4);
        assert!(matches!(result, Err(TranslationError::Parse(_))));
    }

    #[test]
    fn test_parse_rejects_short_response() {
        let body = r#"{"data":{"translations":[{"translatedText":"x"},{"translatedText":"y"}]}}"#;
        let result = parse_translate_response(body, 4);
        assert!(matches!(
            result,
            Err(TranslationError::CountMismatch { expected: 4, actual: 2 })
        ));
    }

    #[test]
    fn test_successful_round_trip_replaces_translations() {
        let content = ContentRegistry::default();
        let service = FixedTranslator(vec!["x", "y", "z", "w"]);

        let slot = content.translation_slot();
        let generation = slot.begin_request();

        let applied = translate_into(&service, content.descriptions(), "da", &slot, generation).unwrap();

        assert_eq!(applied, TranslationApplied::Published(4));
        assert_eq!(*content.translations(), vec!["x", "y", "z", "w"]);
    }

    #[test]
    fn test_failed_round_trip_keeps_previous_content() {
        let content = ContentRegistry::default();

        let slot = content.translation_slot();
        let generation = slot.begin_request();

        let result = translate_into(&BrokenTranslator, content.descriptions(), "it", &slot, generation);

        assert!(result.is_err());
        assert_eq!(content.translation(0), DEFAULT_DESCRIPTIONS[0]);
    }

    #[test]
    fn test_short_service_answer_keeps_previous_content() {
        let content = ContentRegistry::default();
        let service = FixedTranslator(vec!["x"]);

        let slot = content.translation_slot();
        let generation = slot.begin_request();

        let result = translate_into(&service, content.descriptions(), "pl", &slot, generation);

        assert!(matches!(result, Err(TranslationError::CountMismatch { .. })));
        assert_eq!(content.translation(0), DEFAULT_DESCRIPTIONS[0]);
    }

    #[test]
    fn test_source_language_restores_descriptions_without_service() {
        let content = ContentRegistry::default();
        content.set_translations(vec!["x".into(), "y".into(), "z".into(), "w".into()]);

        // BrokenTranslator не вызывается для исходного языка
        let slot = content.translation_slot();
        let generation = slot.begin_request();
        let result = translate_into(&BrokenTranslator, content.descriptions(), "en", &slot, generation);

        assert_eq!(result.unwrap(), TranslationApplied::Published(4));
        assert_eq!(content.translation(2), DEFAULT_DESCRIPTIONS[2]);
    }

    #[test]
    fn test_parse_decodes_numeric_entities() {
        let body = r#"{"data":{"translations":[{"translatedText":"caf&#233; &#x27;x&#x27; &amp; co"}]}}"#;

        let translations = parse_translate_response(body, 1).unwrap();
        assert_eq!(translations, vec!["café 'x' & co"]);
    }

    #[test]
    fn test_late_answer_for_older_selection_is_dropped() {
        let content = ContentRegistry::default();
        let slot = content.translation_slot();

        // "da" выбран первым, "it" следом; ответ для "da" приходит последним
        let danish = slot.begin_request();
        let italian = slot.begin_request();

        let italian_service = FixedTranslator(vec!["i0", "i1", "i2", "i3"]);
        let applied = translate_into(&italian_service, content.descriptions(), "it", &slot, italian);
        assert_eq!(applied.unwrap(), TranslationApplied::Published(4));

        let danish_service = FixedTranslator(vec!["d0", "d1", "d2", "d3"]);
        let applied = translate_into(&danish_service, content.descriptions(), "da", &slot, danish);
        assert_eq!(applied.unwrap(), TranslationApplied::Superseded);
        assert_eq!(content.translation(0), "i0");
    }

    #[test]
    fn test_older_request_skips_service_once_superseded() {
        let content = ContentRegistry::default();
        let slot = content.translation_slot();
        let danish = slot.begin_request();
        slot.begin_request();

        // BrokenTranslator ошибся бы, но до сервиса дело не доходит
        let applied = translate_into(&BrokenTranslator, content.descriptions(), "da", &slot, danish);

        assert_eq!(applied.unwrap(), TranslationApplied::Superseded);
        assert_eq!(content.translation(0), DEFAULT_DESCRIPTIONS[0]);
    }

    #[test]
    fn test_query_params_keep_text_order() {
        let client = GoogleTranslateClient::new("http://localhost/translate", "secret");
        let texts = vec!["first".to_string(), "second".to_string()];

        let params = client.query_params(&texts, "da");

        assert_eq!(
            params,
            vec![
                ("q", "first"),
                ("q", "second"),
                ("target", "da"),
                ("format", "text"),
                ("key", "secret"),
            ]
        );
    }
}
