//! zing - TCP connect latency prober
//!
//! Times repeated TCP connects to each port of a host and prints per-cycle
//! means followed by a min/avg/max/stddev summary.

use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("zing panic: {}", panic_info);
        process::exit(99);
    }));

    let args = std::env::args_os().map(|arg| arg.to_string_lossy().into_owned());
    let code = zing::app::run_cli(args).await;

    process::exit(code);
}
