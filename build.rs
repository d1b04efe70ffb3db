//! Build script for netcarbs
//!
//! Bumps the local build number and embeds build metadata.

use std::fs;
use std::path::Path;

fn main() {
    println!("cargo:rerun-if-changed=src");

    let build_number_path = Path::new("build_number.txt");

    let previous: u64 = fs::read_to_string(build_number_path)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(0);
    let build_number = previous + 1;

    // A read-only checkout still builds; it just keeps reporting the old number
    if let Err(e) = fs::write(build_number_path, build_number.to_string()) {
        println!("cargo:warning=could not persist build number: {}", e);
    }

    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();

    println!("cargo:rustc-env=NETCARBS_BUILD_NUMBER={}", build_number);
    println!("cargo:rustc-env=NETCARBS_BUILD_TIMESTAMP={}", timestamp);
}
