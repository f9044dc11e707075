//! Property and edge-case tests for argument interpretation

use super::{ConfigParser, ConfigValidator};
use crate::cli::{parse_args, Cli, Invocation};
use proptest::prelude::*;

/// Test edge cases in configuration parsing
mod config_edge_cases {
    use super::*;

    #[test]
    fn test_many_ports_keep_order() {
        let list: Vec<String> = (1..=500).map(|p| p.to_string()).collect();
        let cli = Cli {
            ports: Some(list.join(",")),
            hosts: vec!["host".to_string()],
            ..Default::default()
        };

        let loaded = ConfigParser::new(cli).parse().unwrap();
        assert_eq!(loaded.config.ports, list);
        assert_eq!(loaded.config.ops_per_cycle_all_ports(), 2000);
    }

    #[test]
    fn test_command_line_to_config() {
        let args = ["zing", "-6", "-c", "abc", "-op", "2", "-p", "443", "-t", "100", "::1"];
        let cli = match parse_args(args).unwrap() {
            Invocation::Run(cli) => cli,
            Invocation::Help => panic!("expected a probe invocation"),
        };

        let loaded = ConfigParser::new(cli).parse().unwrap();
        assert_eq!(loaded.config.cycles, 4);
        assert_eq!(loaded.config.ops_per_cycle, 2);
        assert_eq!(loaded.config.ports, vec!["443"]);
        assert_eq!(loaded.config.timeout_ms, 100);
        assert_eq!(loaded.config.host_name, "::1");
        assert_eq!(loaded.warnings.len(), 1);
        assert_eq!(loaded.warnings[0].flag, "-c");
    }

    #[test]
    fn test_whitespace_is_not_a_number() {
        assert!(ConfigValidator::parse_count(" 4", 1).is_err());
        assert!(ConfigValidator::parse_timeout_ms("").is_err());
    }
}

mod property_tests {
    use super::*;

    proptest! {
        /// Any count of at least one is taken as given
        #[test]
        fn positive_counts_accepted(n in 1u32..=u32::MAX) {
            prop_assert_eq!(ConfigValidator::parse_count(&n.to_string(), 1), Ok(n));
        }

        /// Zero and negative counts are always rejected
        #[test]
        fn non_positive_counts_rejected(n in i64::MIN..=0i64) {
            prop_assert!(ConfigValidator::parse_count(&n.to_string(), 1).is_err());
        }

        /// Strings that are not integers never parse
        #[test]
        fn alphabetic_counts_rejected(raw in "[a-zA-Z]{1,12}") {
            prop_assert!(ConfigValidator::parse_count(&raw, 1).is_err());
            prop_assert!(ConfigValidator::parse_timeout_ms(&raw).is_err());
        }

        /// Whatever the input, the resulting configuration is valid
        #[test]
        fn parsed_config_is_always_valid(
            count in "[-0-9a-z]{0,6}",
            ops in "[-0-9a-z]{0,6}",
            ports in "[0-9,]{0,20}",
            timeout in "[-0-9]{0,6}",
        ) {
            let cli = Cli {
                count: Some(count),
                ops: Some(ops),
                ports: Some(ports),
                timeout: Some(timeout),
                hosts: vec!["host".to_string()],
                ..Default::default()
            };

            let loaded = ConfigParser::new(cli).parse().unwrap();
            prop_assert!(loaded.config.cycles >= 1);
            prop_assert!(loaded.config.ops_per_cycle >= 1);
            prop_assert!(!loaded.config.ports.is_empty());
            prop_assert!(loaded.config.validate().is_ok());
        }

        /// Port lists keep order and duplicates
        #[test]
        fn port_order_preserved(ports in proptest::collection::vec(1u16..=65535, 1..20)) {
            let raw = ports.iter().map(|p| p.to_string()).collect::<Vec<_>>().join(",");
            let parsed = ConfigValidator::parse_ports(&raw).unwrap();
            let expected: Vec<String> = ports.iter().map(|p| p.to_string()).collect();
            prop_assert_eq!(parsed, expected);
        }
    }
}
