//! Shared fixtures for the command-line tests.

use assert_cmd::cargo::cargo_bin_cmd;
use std::fs;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;
use tempfile::TempDir;
use toml_edit::DocumentMut;

pub const WORKSPACE_MANIFEST: &str = r#"# Agave workspace
[workspace]
members = ["sdk", "programs/bpf_loader"]
exclude = ["programs/sbf"]
resolver = "2"

[workspace.package]
version = "2.1.0"
edition = "2021"

[workspace.dependencies]
bincode = "1.3.3"
pickledb = { version = "0.5.1", default-features = false }
solana-sdk = { path = "sdk", version = "=2.1.0" }
solana-bpf-loader-program = { path = "programs/bpf_loader", version = "=2.1.0" }
winreg = "0.50"

[patch.crates-io]
solana-zk-sdk = { path = "zk-sdk" }
"#;

pub const FRAGMENT: &str = r#"[lib]
crate-type = ["cdylib", "rlib"]

[dependencies]
prost = "0.11"
bincode = "1.3.1"

[features]
core-bpf = []
"#;

/// Creates a scratch directory holding the fragment file and an `agave/`
/// checkout with the given root manifest.
#[allow(unused)]
pub fn create_checkout(manifest: &str) -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("solfuzz_agave.toml"), FRAGMENT).unwrap();

    let agave = temp.path().join("agave");
    fs::create_dir(&agave).unwrap();
    fs::write(agave.join("Cargo.toml"), manifest).unwrap();

    temp
}

/// Stages a manifest where a previous remote run would have downloaded it.
#[allow(unused)]
pub fn stage_manifest(root: &Path, manifest: &str) {
    let dump = root.join("dump");
    fs::create_dir_all(&dump).unwrap();
    fs::write(dump.join("Cargo.toml"), manifest).unwrap();
}

#[allow(unused)]
pub fn read_output(path: &Path) -> DocumentMut {
    fs::read_to_string(path).unwrap().parse().unwrap()
}

/// Starts a raw-file host that answers one request with `status` and `body`.
///
/// Returns the base URL to pass as `--raw-base-url`.
#[allow(unused)]
pub fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        let response = format!(
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        stream.write_all(response.as_bytes()).unwrap();
    });
    format!("http://{}", addr)
}

/// Runs `cargo retarget` from `cwd` with the given arguments.
pub fn run_retarget(cwd: &Path, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = cargo_bin_cmd!("cargo-retarget");
    cmd.arg("retarget")
        .args(args)
        .env("RUST_LOG", "info")
        .current_dir(cwd);
    cmd.assert()
}
