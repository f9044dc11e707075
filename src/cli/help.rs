//! Usage text for zing

use colored::*;

const USAGE: &str = "Usage: zing -h | [-4|-6] [-c count] [-op ops] [-p ports] [-t timeout] host";
const EXAMPLE: &str = "zing -4 -c 4 -op 4 -p 80,443 -t 4000 google.com";

/// Usage and version text
pub struct HelpSystem {
    use_colors: bool,
}

impl HelpSystem {
    /// Create a new help system
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Usage line, example, option list and version
    pub fn usage(&self) -> String {
        let mut help = String::new();

        help.push('\n');
        if self.use_colors {
            help.push_str(&format!("{}\n{}\n\n", USAGE.bold(), EXAMPLE.green()));
        } else {
            help.push_str(&format!("{}\n{}\n\n", USAGE, EXAMPLE));
        }

        help.push_str(&self.format_options());
        help.push('\n');
        help.push_str(&Self::version_line());
        help.push_str("\n\n");

        help
    }

    fn format_options(&self) -> String {
        let defaults = format!(
            "cycles {}, ops {}, ports {}, timeout {} ms",
            crate::defaults::DEFAULT_CYCLES,
            crate::defaults::DEFAULT_OPS_PER_CYCLE,
            crate::defaults::DEFAULT_PORTS,
            crate::defaults::DEFAULT_TIMEOUT_MS
        );

        let options = [
            ("-4", "use IPv4 only"),
            ("-6", "use IPv6 only"),
            ("-c count", "cycles per port"),
            ("-op ops", "connect operations per cycle"),
            ("-p ports", "comma-separated port list"),
            ("-t timeout", "connect timeout in milliseconds"),
            ("-d", "debug logging on stderr"),
            ("-h", "show this help"),
        ];

        let mut text = String::from("Options:\n");
        for (flag, description) in options {
            let flag = format!("{:<12}", flag);
            if self.use_colors {
                text.push_str(&format!("  {}{}\n", flag.cyan(), description));
            } else {
                text.push_str(&format!("  {}{}\n", flag, description));
            }
        }
        text.push_str(&format!("\nDefaults: {}\n", defaults));

        text
    }

    /// `zing <version>` plus build metadata when available
    pub fn version_line() -> String {
        let mut line = format!("{} {}", crate::PKG_NAME, crate::VERSION);

        match (option_env!("GIT_COMMIT"), option_env!("BUILD_TIME")) {
            (Some(commit), Some(built)) => line.push_str(&format!(" ({}, built {})", commit, built)),
            (None, Some(built)) => line.push_str(&format!(" (built {})", built)),
            _ => {}
        }

        line
    }
}

impl Default for HelpSystem {
    fn default() -> Self {
        Self::new(false)
    }
}
