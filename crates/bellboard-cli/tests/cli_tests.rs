//! CLI argument parsing and output helper tests.

// ============================================================================
// Clap argument parsing
// ============================================================================

mod clap_parsing {
    use bellboard_cli::cli::{Cli, Commands, log_filter};
    use clap::Parser;

    #[test]
    fn test_submit_defaults() {
        let cli = Cli::try_parse_from(["bellboard", "submit", "--username", "alice"]).unwrap();
        match cli.command {
            Commands::Submit {
                username,
                q1,
                q2,
                format,
            } => {
                assert_eq!(username, "alice");
                assert_eq!((q1, q2), (0, 1));
                assert_eq!(format, "text");
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(cli.verbose, 0);
        assert!(cli.endpoint.is_none());
    }

    #[test]
    fn test_submit_explicit_pair() {
        let cli = Cli::try_parse_from([
            "bellboard", "submit", "-u", "bob", "--q1", "12", "--q2", "13", "-f", "json",
        ])
        .unwrap();
        match cli.command {
            Commands::Submit { q1, q2, format, .. } => {
                assert_eq!((q1, q2), (12, 13));
                assert_eq!(format, "json");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_submit_requires_username() {
        assert!(Cli::try_parse_from(["bellboard", "submit"]).is_err());
    }

    #[test]
    fn test_negative_qubit_rejected() {
        assert!(Cli::try_parse_from(["bellboard", "submit", "-u", "a", "--q1", "-1"]).is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Cli::try_parse_from(["bellboard", "leaderboard", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_missing_subcommand_rejected() {
        assert!(Cli::try_parse_from(["bellboard"]).is_err());
    }

    #[test]
    fn test_leaderboard_defaults() {
        let cli = Cli::try_parse_from(["bellboard", "leaderboard"]).unwrap();
        match cli.command {
            Commands::Leaderboard { limit, format } => {
                assert!(limit.is_none());
                assert_eq!(format, "text");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "bellboard",
            "leaderboard",
            "--limit",
            "5",
            "-vv",
            "--endpoint",
            "http://bell.lab:8000",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.endpoint.as_deref(), Some("http://bell.lab:8000"));
        assert!(matches!(
            cli.command,
            Commands::Leaderboard { limit: Some(5), .. }
        ));
    }

    #[test]
    fn test_log_filter_levels() {
        assert_eq!(log_filter(0), "warn");
        assert_eq!(log_filter(1), "info");
        assert_eq!(log_filter(2), "debug");
        assert_eq!(log_filter(7), "trace");
    }
}

// ============================================================================
// commands::common
// ============================================================================

mod common_tests {
    use bellboard_cli::commands::common::{bar, histogram_json};
    use bellboard_core::{Counts, ScoredResult};

    #[test]
    fn test_bar_full_and_empty() {
        assert_eq!(bar(8, 8).chars().count(), 40);
        assert!(bar(0, 8).is_empty());
    }

    #[test]
    fn test_histogram_json_has_every_outcome() {
        let counts: Counts = [("00", 10), ("01", 2), ("10", 1), ("11", 7)]
            .into_iter()
            .collect();
        let value = histogram_json(&ScoredResult::from_counts(&counts));
        assert_eq!(value.as_array().map(Vec::len), Some(4));
        assert_eq!(value[3]["outcome"], "11");
        assert_eq!(value[3]["count"], 7);
    }
}
