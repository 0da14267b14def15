//! Tests for TOML configuration parsing.

use super::toml::{TomlConfig, default_config_template};

mod parsing {
    use super::*;

    #[test]
    fn parse_api_section() {
        let toml = r#"
            [api]
            api_key = "sk_live_1"
            environment = "testnet"
            timeout = 15
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        assert_eq!(config.api.api_key.as_deref(), Some("sk_live_1"));
        assert_eq!(config.api.environment.as_deref(), Some("testnet"));
        assert_eq!(config.api.timeout, Some(15));
    }

    #[test]
    fn parse_retry_and_webhook_sections() {
        let toml = r#"
            [retry]
            max_retries = 0
            delay_ms = 250

            [webhook]
            secret = "whsec_1"
        "#;

        let config = TomlConfig::parse(toml).unwrap();
        assert_eq!(config.retry.max_retries, Some(0));
        assert_eq!(config.retry.delay_ms, Some(250));
        assert_eq!(config.webhook.secret.as_deref(), Some("whsec_1"));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = TomlConfig::parse("").unwrap();

        assert!(config.api.api_key.is_none());
        assert!(config.retry.max_retries.is_none());
        assert!(config.webhook.secret.is_none());
    }
}

mod errors {
    use super::*;

    #[test]
    fn unknown_field_is_rejected() {
        let toml = r#"
            [api]
            apikey = "typo"
        "#;

        assert!(TomlConfig::parse(toml).is_err());
    }

    #[test]
    fn unknown_section_is_rejected() {
        assert!(TomlConfig::parse("[monitor]\npoll_interval = 5").is_err());
    }

    #[test]
    fn wrong_type_is_rejected() {
        assert!(TomlConfig::parse("[api]\ntimeout = \"30\"").is_err());
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = TomlConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }
}

mod redaction {
    use super::*;

    #[test]
    fn debug_hides_secrets() {
        let toml = r#"
            [api]
            api_key = "sk_live_secret"

            [webhook]
            secret = "whsec_secret"
        "#;

        let debug = format!("{:?}", TomlConfig::parse(toml).unwrap());
        assert!(!debug.contains("sk_live_secret"));
        assert!(!debug.contains("whsec_secret"));
        assert!(debug.contains("<redacted>"));
    }
}

mod template {
    use super::*;

    #[test]
    fn default_template_parses() {
        let template = default_config_template();
        let config = TomlConfig::parse(&template).unwrap();

        assert_eq!(config.api.environment.as_deref(), Some("production"));
        assert!(config.api.api_key.is_none());
    }

    #[test]
    fn default_template_documents_every_section() {
        let template = default_config_template();

        assert!(template.contains("[api]"));
        assert!(template.contains("[retry]"));
        assert!(template.contains("[webhook]"));
    }
}
