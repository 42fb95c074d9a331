mod common;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use zdict_core::compression::{Codec, DictionaryRegistry, RegistryError, ZstdCodec};

    use crate::common::{raw_dictionary, themed_payload, ProbeCodec};

    #[test]
    fn add_then_lookup() {
        let registry = DictionaryRegistry::default();
        registry.add("orders", &raw_dictionary("orders")).unwrap();

        let dict = registry.lookup("orders").expect("registered");
        assert_eq!(dict.name(), "orders");
        assert_eq!(dict.raw_len(), raw_dictionary("orders").len());
        assert!(registry.lookup("missing").is_none());
        assert_eq!(registry.names(), vec!["orders".to_string()]);
    }

    #[test]
    fn empty_name_is_rejected() {
        let registry = DictionaryRegistry::default();
        assert_eq!(registry.add("", &raw_dictionary("x")), Err(RegistryError::InvalidName));
        assert!(registry.is_empty());
    }

    #[test]
    fn invalid_bytes_leave_registry_untouched() {
        let registry = DictionaryRegistry::default();
        let err = registry.add("tiny", b"1234").unwrap_err();
        assert!(matches!(err, RegistryError::InvalidDictionaryData { ref name, .. } if name == "tiny"));
        assert!(!registry.contains("tiny"));
    }

    #[test]
    fn failed_decompressor_compile_releases_compressor_form() {
        let (codec, probe) = ProbeCodec::failing_decompressor();
        let registry = DictionaryRegistry::new(Arc::new(codec));

        assert!(registry.add("x", &raw_dictionary("x")).is_err());
        assert!(registry.is_empty());
        assert_eq!(probe.live(), 0, "partially compiled form leaked");
    }

    #[test]
    fn readd_replaces_and_frees_previous_forms() {
        let (codec, probe) = ProbeCodec::new();
        let registry = DictionaryRegistry::new(Arc::new(codec));

        registry.add("x", &raw_dictionary("first")).unwrap();
        let first_id = registry.lookup("x").unwrap().dict_id();
        registry.add("x", &raw_dictionary("second")).unwrap();

        assert_eq!(registry.len(), 1);
        assert_ne!(registry.lookup("x").unwrap().dict_id(), first_id);
        assert_eq!(probe.live(), 2, "only the current pair should be alive");
    }

    #[test]
    fn replaced_forms_survive_while_held() {
        let (codec, probe) = ProbeCodec::new();
        let registry = DictionaryRegistry::new(Arc::new(codec));

        registry.add("x", &raw_dictionary("first")).unwrap();
        let held = registry.lookup("x").unwrap();
        registry.add("x", &raw_dictionary("second")).unwrap();
        assert_eq!(probe.live(), 4);

        let frame = registry.codec().compress_with_dictionary(b"abc", held.compressor()).unwrap();
        assert_eq!(registry.codec().decompress_with_dictionary(&frame, held.decompressor()).unwrap(), b"abc");

        drop(held);
        assert_eq!(probe.live(), 2);
    }

    #[test]
    fn release_all_is_idempotent() {
        let registry = DictionaryRegistry::default();
        assert_eq!(registry.release_all(), 0);

        registry.add("a", &raw_dictionary("a")).unwrap();
        registry.add("b", &raw_dictionary("b")).unwrap();
        assert_eq!(registry.release_all(), 2);
        assert_eq!(registry.release_all(), 0);
        assert!(registry.is_empty());
    }

    #[test]
    fn handle_outlives_release_all() {
        let (codec, probe) = ProbeCodec::new();
        let registry = DictionaryRegistry::new(Arc::new(codec));
        registry.add("x", &raw_dictionary("x")).unwrap();

        let held = registry.lookup("x").unwrap();
        assert_eq!(registry.release_all(), 1);
        assert!(registry.lookup("x").is_none());
        assert_eq!(probe.live(), 2, "held pair must stay alive");

        let frame = registry.codec().compress_with_dictionary(b"payload", held.compressor()).unwrap();
        assert_eq!(frame.len(), 4 + 7);

        drop(held);
        assert_eq!(probe.live(), 0);
    }

    #[test]
    fn zstd_handle_outlives_release_all() {
        let codec = Arc::new(ZstdCodec::default());
        let registry = DictionaryRegistry::new(Arc::clone(&codec));
        registry.add("orders", &raw_dictionary("orders")).unwrap();

        let held = registry.lookup("orders").unwrap();
        registry.release_all();

        let payload = themed_payload("orders");
        let frame = codec.compress_with_dictionary(&payload, held.compressor()).unwrap();
        assert_eq!(codec.decompress_with_dictionary(&frame, held.decompressor()).unwrap(), payload);
    }
}
