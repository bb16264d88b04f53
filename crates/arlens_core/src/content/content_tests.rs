//! Tests for ContentRegistry + languages.

#[cfg(test)]
mod tests {
    use super::super::languages::{code_at, code_for_name, language_codes, language_names, name_for_code};
    use super::super::registry::{ContentRegistry, DEFAULT_DESCRIPTIONS};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_translations_start_as_descriptions() {
        let content = ContentRegistry::default();

        assert_eq!(content.item_count(), 4);
        assert_eq!(content.target_language(), "en");
        for (index, description) in DEFAULT_DESCRIPTIONS.iter().enumerate() {
            assert_eq!(content.translation(index), *description);
        }
        assert_eq!(content.allergen(3), "No allergens");
    }

    #[test]
    fn test_set_translations_replaces_whole_array() {
        let content = ContentRegistry::default();
        content.set_translations(vec!["x".into(), "y".into(), "z".into(), "w".into()]);

        assert_eq!(content.translation(0), "x");
        assert_eq!(content.translation(3), "w");
        // Descriptions не трогаются
        assert_eq!(content.description(0), DEFAULT_DESCRIPTIONS[0]);
    }

    #[test]
    fn test_translation_slot_publishes_into_registry() {
        let content = ContentRegistry::default();
        let slot = content.translation_slot();

        slot.publish(vec!["a".into(), "b".into(), "c".into(), "d".into()]);

        assert_eq!(content.translation(1), "b");
    }

    #[test]
    fn test_set_target_language() {
        let mut content = ContentRegistry::default();
        content.set_target_language("da");
        assert_eq!(content.target_language(), "da");
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_index_is_fatal() {
        let content = ContentRegistry::default();
        let _ = content.translation(4);
    }

    #[test]
    #[should_panic]
    fn test_length_mismatch_is_fatal() {
        let content = ContentRegistry::default();
        content.set_translations(vec!["only one".into()]);
    }

    /// Reader никогда не видит полу-обновлённый массив
    #[test]
    fn test_replacement_is_atomic_for_readers() {
        let content = ContentRegistry::default();
        let slot = content.translation_slot();
        let done = Arc::new(AtomicBool::new(false));

        let writer_done = Arc::clone(&done);
        let writer = std::thread::spawn(move || {
            for generation in 0..2_000 {
                let tag = format!("gen{}", generation);
                slot.publish(vec![tag.clone(), tag.clone(), tag.clone(), tag]);
            }
            writer_done.store(true, Ordering::SeqCst);
        });

        let mut observed = 0;
        while !done.load(Ordering::SeqCst) || observed == 0 {
            let snapshot = content.translations();
            let first = &snapshot[0];
            let consistent = snapshot.iter().all(|entry| entry == first);
            let untouched = snapshot
                .iter()
                .zip(DEFAULT_DESCRIPTIONS.iter())
                .all(|(entry, description)| entry.as_str() == *description);
            assert!(consistent || untouched, "torn read: {:?}", snapshot);
            observed += 1;
        }

        writer.join().unwrap();
        assert_eq!(content.translation(0), "gen1999");
    }

    #[test]
    fn test_language_table() {
        let names: Vec<_> = language_names().collect();
        assert_eq!(names, vec!["English", "Danish", "Italian", "Polish", "Spanish"]);
        let codes: Vec<_> = language_codes().collect();
        assert_eq!(codes, vec!["en", "da", "it", "pl", "es"]);

        assert_eq!(code_at(1), Some("da"));
        assert_eq!(code_at(5), None);
        assert_eq!(code_for_name("polish"), Some("pl"));
        assert_eq!(name_for_code("de"), Some("German"));
        assert_eq!(name_for_code("xx"), None);
    }
}
