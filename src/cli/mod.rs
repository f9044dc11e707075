//! Command-line interface
//!
//! zing keeps its traditional single-dash flags (`-c 4 -op 4 -p 80,443`).
//! `-op` is not a valid clap short flag, so it is rewritten to `--op` before
//! parsing. clap's own help and version flags are disabled; `-h` prints the
//! zing usage text instead.

pub mod help;

pub use help::HelpSystem;

use crate::error::{AppError, Result};
use clap::Parser;
use std::io::IsTerminal;

/// zing - zero-packet ping over TCP connects
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(name = "zing")]
#[command(disable_help_flag = true, disable_version_flag = true)]
#[command(args_override_self = true)]
pub struct Cli {
    /// Use IPv4 only
    #[arg(short = '4', overrides_with = "ipv6")]
    pub ipv4: bool,

    /// Use IPv6 only
    #[arg(short = '6', overrides_with = "ipv4")]
    pub ipv6: bool,

    /// Number of cycles per port
    #[arg(short = 'c', value_name = "count", allow_hyphen_values = true)]
    pub count: Option<String>,

    /// Connect operations per cycle
    #[arg(long = "op", value_name = "ops", allow_hyphen_values = true)]
    pub ops: Option<String>,

    /// Comma-separated port list
    #[arg(short = 'p', value_name = "ports", allow_hyphen_values = true)]
    pub ports: Option<String>,

    /// Connect timeout in milliseconds
    #[arg(short = 't', value_name = "timeout", allow_hyphen_values = true)]
    pub timeout: Option<String>,

    /// Debug logging on stderr
    #[arg(short = 'd')]
    pub debug: bool,

    /// Show usage and exit
    #[arg(short = 'h')]
    pub help: bool,

    /// Host name or address; the last one given is probed
    #[arg(value_name = "host")]
    pub hosts: Vec<String>,
}

impl Cli {
    /// The host to probe, if any was given
    pub fn host(&self) -> Option<&str> {
        self.hosts.last().map(String::as_str)
    }

    /// Check if colors should be enabled for diagnostics
    pub fn use_colors(&self) -> bool {
        supports_color()
    }
}

/// What the command line asks for
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    /// Print usage and exit 0
    Help,
    /// Probe with these arguments
    Run(Cli),
}

/// Flags that consume the following token as their value
const VALUE_FLAGS: [&str; 4] = ["-c", "-op", "-p", "-t"];

/// Every flag zing accepts, spelled exactly as typed
const KNOWN_FLAGS: [&str; 8] = ["-4", "-6", "-c", "-op", "-p", "-t", "-d", "-h"];

/// Reject dash tokens clap would otherwise accept (`--`, `--op`, `-c1`, `-46`)
pub fn check_flags(args: &[String]) -> Result<()> {
    let mut expecting_value = false;

    for arg in args.iter().skip(1) {
        if expecting_value {
            expecting_value = false;
            continue;
        }

        if arg.starts_with('-') && !KNOWN_FLAGS.contains(&arg.as_str()) {
            return Err(AppError::usage(format!(
                "Error '{}' is invalid command-line parameter!",
                arg
            )));
        }

        expecting_value = VALUE_FLAGS.contains(&arg.as_str());
    }

    Ok(())
}

/// Rewrite `-op` to `--op`, leaving flag values untouched
pub fn normalize_args<I, S>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut normalized = Vec::new();
    let mut expecting_value = false;

    for (index, arg) in args.into_iter().enumerate() {
        let arg = arg.into();
        if index == 0 || expecting_value {
            expecting_value = false;
            normalized.push(arg);
            continue;
        }

        expecting_value = VALUE_FLAGS.contains(&arg.as_str());
        if arg == "-op" {
            normalized.push("--op".to_string());
        } else {
            normalized.push(arg);
        }
    }

    normalized
}

/// Parse a full argument vector (program name first)
pub fn parse_args<I, S>(args: I) -> Result<Invocation>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();

    if args.len() <= 1 {
        return Ok(Invocation::Help);
    }

    check_flags(&args)?;
    let cli = Cli::try_parse_from(normalize_args(args))?;

    if cli.help {
        return Ok(Invocation::Help);
    }

    Ok(Invocation::Run(cli))
}

/// Check if standard error is a terminal that can show colors
pub fn supports_color() -> bool {
    std::io::stderr().is_terminal()
}
