//! Tests for CLI argument parsing.

use std::path::PathBuf;

use clap::Parser;

use super::cli::{Cli, Command};

mod parsing {
    use super::*;

    #[test]
    fn parse_ping_without_options() {
        let cli = Cli::parse_from_iter(["xrpl-sale", "ping"]);

        assert_eq!(cli.command, Command::Ping);
        assert!(cli.api_key.is_none());
        assert!(cli.environment.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn parse_global_options_before_subcommand() {
        let cli = Cli::parse_from_iter([
            "xrpl-sale",
            "--api-key",
            "sk_test_1",
            "--environment",
            "testnet",
            "--timeout",
            "10",
            "--max-retries",
            "5",
            "--retry-delay-ms",
            "250",
            "status",
        ]);

        assert_eq!(cli.command, Command::Status);
        assert_eq!(cli.api_key.as_deref(), Some("sk_test_1"));
        assert_eq!(cli.environment.as_deref(), Some("testnet"));
        assert_eq!(cli.timeout, Some(10));
        assert_eq!(cli.max_retries, Some(5));
        assert_eq!(cli.retry_delay_ms, Some(250));
    }

    #[test]
    fn parse_global_options_after_subcommand() {
        let cli = Cli::parse_from_iter(["xrpl-sale", "ping", "--api-key", "sk_1", "-v"]);

        assert_eq!(cli.api_key.as_deref(), Some("sk_1"));
        assert!(cli.verbose);
    }

    #[test]
    fn parse_config_short_flag() {
        let cli = Cli::parse_from_iter(["xrpl-sale", "-c", "my.toml", "status"]);

        assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
    }
}

mod request_command {
    use super::*;

    #[test]
    fn parse_method_and_path() {
        let cli = Cli::parse_from_iter(["xrpl-sale", "request", "GET", "/projects"]);

        assert_eq!(
            cli.command,
            Command::Request {
                method: "GET".to_string(),
                path: "/projects".to_string(),
                data: None,
                query: Vec::new(),
            }
        );
    }

    #[test]
    fn parse_data_and_repeated_query() {
        let cli = Cli::parse_from_iter([
            "xrpl-sale",
            "request",
            "POST",
            "/projects",
            "--data",
            r#"{"name":"x"}"#,
            "--query",
            "page=2",
            "--query",
            "limit=5",
        ]);

        let Command::Request { data, query, .. } = cli.command else {
            panic!("expected request command");
        };
        assert_eq!(data.as_deref(), Some(r#"{"name":"x"}"#));
        assert_eq!(query, vec!["page=2".to_string(), "limit=5".to_string()]);
    }

    #[test]
    fn missing_path_is_rejected() {
        let result = Cli::try_parse_from(["xrpl-sale", "request", "GET"]);

        assert!(result.is_err());
    }
}

mod webhook_commands {
    use super::*;

    #[test]
    fn parse_sign() {
        let cli = Cli::parse_from_iter([
            "xrpl-sale",
            "--webhook-secret",
            "whsec_1",
            "sign",
            "--payload",
            "event.json",
        ]);

        assert_eq!(
            cli.command,
            Command::Sign {
                payload: PathBuf::from("event.json")
            }
        );
        assert_eq!(cli.webhook_secret.as_deref(), Some("whsec_1"));
    }

    #[test]
    fn parse_verify_requires_signature() {
        let result = Cli::try_parse_from(["xrpl-sale", "verify", "--payload", "event.json"]);
        assert!(result.is_err());

        let cli = Cli::parse_from_iter([
            "xrpl-sale",
            "verify",
            "--payload",
            "event.json",
            "--signature",
            "sha256=abc",
        ]);
        assert_eq!(
            cli.command,
            Command::Verify {
                payload: PathBuf::from("event.json"),
                signature: "sha256=abc".to_string(),
            }
        );
    }

    #[test]
    fn parse_parse() {
        let cli = Cli::parse_from_iter(["xrpl-sale", "parse", "--payload", "event.json"]);

        assert!(matches!(cli.command, Command::Parse { .. }));
        assert!(!cli.command.needs_api());
    }
}

mod init_command {
    use super::*;

    #[test]
    fn parse_init_without_output() {
        let cli = Cli::parse_from_iter(["xrpl-sale", "init"]);

        assert!(cli.is_init());
        assert_eq!(cli.command, Command::Init { output: None });
    }

    #[test]
    fn parse_init_with_output() {
        let cli = Cli::parse_from_iter(["xrpl-sale", "init", "-o", "custom.toml"]);

        assert_eq!(
            cli.command,
            Command::Init {
                output: Some(PathBuf::from("custom.toml"))
            }
        );
    }

    #[test]
    fn api_commands_need_api() {
        assert!(Command::Ping.needs_api());
        assert!(Command::Status.needs_api());
        assert!(!Command::Init { output: None }.needs_api());
    }
}

mod errors {
    use super::*;

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["xrpl-sale"]).is_err());
    }

    #[test]
    fn non_numeric_timeout_is_rejected() {
        assert!(Cli::try_parse_from(["xrpl-sale", "--timeout", "soon", "ping"]).is_err());
    }
}
