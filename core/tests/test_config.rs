#[cfg(test)]
mod tests {
    use zdict_core::config::ServiceConfig;
    use zdict_core::constants::{DEFAULT_LEVEL, DEFAULT_MAX_OUTPUT_SIZE};
    use zdict_core::types::ConfigurationError;

    #[test]
    fn empty_json_gives_defaults() {
        let config = ServiceConfig::from_json("{}").unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.level, DEFAULT_LEVEL);
        assert_eq!(config.max_output_size, DEFAULT_MAX_OUTPUT_SIZE);
        assert!(config.checksum);
        assert!(!config.debug);
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config = ServiceConfig::from_json(
            r#"{ "level": 9, "debug": true, "dictionaries": [ { "name": "orders", "path": "/etc/zdict/orders.dict" } ] }"#,
        )
        .unwrap();
        assert_eq!(config.level, 9);
        assert!(config.debug);
        assert_eq!(config.dictionaries.len(), 1);
        assert_eq!(config.dictionaries[0].name, "orders");
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(matches!(
            ServiceConfig::from_json(r#"{ "levle": 9 }"#),
            Err(ConfigurationError::Config(_))
        ));
    }

    #[test]
    fn out_of_range_level_is_rejected() {
        assert!(ServiceConfig::from_json(r#"{ "level": 1000 }"#).is_err());
    }

    #[test]
    fn zero_output_cap_is_rejected() {
        assert!(ServiceConfig::from_json(r#"{ "max_output_size": 0 }"#).is_err());
    }

    #[test]
    fn duplicate_dictionary_names_are_rejected() {
        let json = r#"{ "dictionaries": [
            { "name": "a", "path": "/tmp/a" },
            { "name": "a", "path": "/tmp/b" }
        ] }"#;
        assert!(ServiceConfig::from_json(json).is_err());
    }

    #[test]
    fn from_file_reads_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zdict.json");
        std::fs::write(&path, r#"{ "checksum": false }"#).unwrap();

        let config = ServiceConfig::from_file(&path).unwrap();
        assert!(!config.checksum);
        assert!(!config.codec().unwrap().checksum());
    }

    #[test]
    fn from_file_missing_is_unreadable() {
        assert!(matches!(
            ServiceConfig::from_file("/nonexistent/zdict.json"),
            Err(ConfigurationError::Unreadable { .. })
        ));
    }

    #[test]
    fn from_file_non_utf8_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zdict.json");
        std::fs::write(&path, [0xff, 0xfe, b'{', b'}']).unwrap();
        assert!(matches!(ServiceConfig::from_file(&path), Err(ConfigurationError::Config(_))));
    }
}
