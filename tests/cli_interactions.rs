//! CLI options interaction tests
//!
//! These tests run the zing binary and check how flags, bad values and
//! unknown parameters show up on stdout, stderr and the exit code.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::net::TcpListener;
use std::process::Command;
use std::thread;

/// Helper function to create a test command
fn create_test_cmd() -> Command {
    Command::cargo_bin("zing").unwrap()
}

/// Listen on a loopback port and accept connections until the test exits
fn spawn_listener() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming() {
            drop(stream);
        }
    });
    port
}

#[test]
fn test_help_flag_prints_usage() {
    create_test_cmd()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Usage: zing -h | [-4|-6] [-c count] [-op ops] [-p ports] [-t timeout] host",
        ))
        .stdout(predicate::str::contains("zing -4 -c 4 -op 4 -p 80,443 -t 4000 google.com"))
        .stdout(predicate::str::contains("ZING:").not());
}

#[test]
fn test_no_arguments_prints_usage() {
    create_test_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: zing"));
}

#[test]
fn test_help_wins_over_other_flags() {
    create_test_cmd()
        .args(["-c", "2", "-h", "127.0.0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage: zing"))
        .stdout(predicate::str::contains("ZING:").not());
}

#[test]
fn test_unknown_flag_is_rejected() {
    create_test_cmd()
        .arg("-z")
        .assert()
        .code(1)
        .stdout(predicate::str::diff("Error '-z' is invalid command-line parameter!\n\n"));
}

#[test]
fn test_unknown_flag_after_host_is_rejected() {
    create_test_cmd()
        .args(["127.0.0.1", "--bogus"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error '--bogus' is invalid command-line parameter!"))
        .stdout(predicate::str::contains("ZING:").not());
}

#[test]
fn test_missing_flag_value_is_usage_error() {
    create_test_cmd()
        .arg("-c")
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with("Error: "));
}

#[test]
fn test_bad_count_falls_back_to_default() {
    let port = spawn_listener().to_string();

    create_test_cmd()
        .args(["-c", "abc", "-op", "1", "-p", &port, "-t", "2000", "127.0.0.1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "\nError: parsing \"abc\": invalid digit found in string\n\n\
             Using default value of 4 for -c param.\n\n",
        ))
        .stdout(predicate::str::contains("#4 ... 1 ops to 127.0.0.1 (127.0.0.1): Active time = "))
        .stdout(predicate::str::contains("#5 .").not())
        .stdout(predicate::str::contains("4 total ops used"));
}

#[test]
fn test_bad_values_warn_in_flag_order() {
    let port = spawn_listener().to_string();

    let output = create_test_cmd()
        .args(["-t", "-5", "-op", "0", "-c", "1", "-p", &port, "127.0.0.1"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();

    let op_warning = stdout.find("Using default value of 4 for -op param.").unwrap();
    let timeout_warning = stdout.find("Using default value of 3000 for -t param.").unwrap();
    let banner = stdout.find("ZING: 127.0.0.1 (127.0.0.1): 1 ports used, 4 ops per cycle").unwrap();

    assert!(op_warning < timeout_warning);
    assert!(timeout_warning < banner);
}

#[test]
fn test_debug_logs_go_to_stderr() {
    let port = spawn_listener().to_string();

    create_test_cmd()
        .args(["-d", "-c", "1", "-op", "1", "-p", &port, "127.0.0.1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("DEBUG [APP] Configuration loaded"))
        .stderr(predicate::str::contains("[PROBE]"))
        .stdout(predicate::str::contains("DEBUG").not());
}

#[test]
fn test_no_debug_keeps_stderr_quiet() {
    let port = spawn_listener().to_string();

    create_test_cmd()
        .args(["-c", "1", "-op", "1", "-p", &port, "127.0.0.1"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_last_host_is_probed() {
    let port = spawn_listener().to_string();

    create_test_cmd()
        .args(["ignored.invalid", "-c", "1", "-op", "1", "-p", &port, "127.0.0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ZING: 127.0.0.1 (127.0.0.1)"))
        .stdout(predicate::str::contains("ignored.invalid").not());
}

#[test]
fn test_end_of_options_marker_is_rejected() {
    let port = spawn_listener().to_string();

    create_test_cmd()
        .args(["--", "-c", "1", "-op", "1", "-p", &port, "127.0.0.1"])
        .assert()
        .code(1)
        .stdout(predicate::str::diff("Error '--' is invalid command-line parameter!\n\n"));
}

#[test]
fn test_long_op_spelling_is_rejected() {
    let port = spawn_listener().to_string();

    create_test_cmd()
        .args(["--op", "1", "-c", "1", "-p", &port, "127.0.0.1"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error '--op' is invalid command-line parameter!"))
        .stdout(predicate::str::contains("ZING:").not());
}

#[test]
fn test_attached_flag_value_is_rejected() {
    let port = spawn_listener().to_string();

    create_test_cmd()
        .args(["-c1", "-op", "1", "-p", &port, "127.0.0.1"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Error '-c1' is invalid command-line parameter!"))
        .stdout(predicate::str::contains("ZING:").not());
}

#[test]
fn test_zero_timeout_dials_without_deadline() {
    let port = spawn_listener().to_string();

    create_test_cmd()
        .args(["-c", "2", "-op", "2", "-p", &port, "-t", "0", "127.0.0.1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#2 ... 2 ops to 127.0.0.1 (127.0.0.1): Active time = "))
        .stdout(predicate::str::contains("i/o timeout").not())
        .stdout(predicate::str::contains("4 total ops used"));
}
