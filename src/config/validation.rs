//! Validation of raw command-line values
//!
//! Each validator returns the parsed value or the reason it was rejected;
//! the parser turns a rejection into a warning and falls back to the default.

use crate::models::config::split_ports;

/// Validators for the numeric and list flags
pub struct ConfigValidator;

impl ConfigValidator {
    /// Integer flag with a lower bound (`-c`, `-op` use 1)
    pub fn parse_count(raw: &str, min: i64) -> std::result::Result<u32, String> {
        let value = Self::parse_integer(raw)?;

        if value < min {
            return Err(format!("value {} is below the minimum of {}", value, min));
        }

        u32::try_from(value).map_err(|_| format!("parsing {:?}: value out of range", raw))
    }

    /// Timeout in milliseconds; zero is allowed
    pub fn parse_timeout_ms(raw: &str) -> std::result::Result<u64, String> {
        let value = Self::parse_integer(raw)?;

        if value < 0 {
            return Err(format!("timeout {} ms is negative", value));
        }

        u64::try_from(value).map_err(|_| format!("parsing {:?}: value out of range", raw))
    }

    /// Comma-separated port list; order and duplicates are kept
    pub fn parse_ports(raw: &str) -> std::result::Result<Vec<String>, String> {
        let ports = split_ports(raw);

        if ports.is_empty() {
            return Err(format!("port list {:?} is empty", raw));
        }

        Ok(ports)
    }

    fn parse_integer(raw: &str) -> std::result::Result<i64, String> {
        raw.parse::<i64>()
            .map_err(|e| format!("parsing {:?}: {}", raw, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(ConfigValidator::parse_count("4", 1), Ok(4));
        assert_eq!(ConfigValidator::parse_count("1", 1), Ok(1));
        assert!(ConfigValidator::parse_count("0", 1).is_err());
        assert!(ConfigValidator::parse_count("-3", 1).is_err());
        assert!(ConfigValidator::parse_count("99999999999", 1).is_err());

        let reason = ConfigValidator::parse_count("abc", 1).unwrap_err();
        assert_eq!(reason, "parsing \"abc\": invalid digit found in string");
    }

    #[test]
    fn test_parse_timeout() {
        assert_eq!(ConfigValidator::parse_timeout_ms("4000"), Ok(4000));
        assert_eq!(ConfigValidator::parse_timeout_ms("0"), Ok(0));
        assert!(ConfigValidator::parse_timeout_ms("-1").is_err());
        assert!(ConfigValidator::parse_timeout_ms("2s").is_err());
    }

    #[test]
    fn test_parse_ports() {
        assert_eq!(ConfigValidator::parse_ports("80,443").unwrap(), vec!["80", "443"]);
        assert_eq!(ConfigValidator::parse_ports("22").unwrap(), vec!["22"]);
        assert!(ConfigValidator::parse_ports(",").is_err());
        assert!(ConfigValidator::parse_ports("").is_err());
    }
}
