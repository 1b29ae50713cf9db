//! Binary entry point for `cargo-retarget`.

use std::process;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    if let Err(e) = cargo_retarget::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
