// Version string for `vitalrisk --version`
//
// Tagged builds report the tag ("v0.2.0" -> "0.2.0", "v0.2.0-3-gabc123" -> "0.2.0").
// Untagged checkouts report the crate version plus the short hash, and a
// missing git binary falls back to the crate version alone.

use std::process::Command;

fn main() {
    let version = describe().unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=VITALRISK_VERSION={}", version);
    for path in [".git/HEAD", ".git/refs/heads", ".git/refs/tags"] {
        println!("cargo:rerun-if-changed={}", path);
    }
}

fn describe() -> Option<String> {
    let output = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()?;
    if !output.status.success() {
        return None;
    }

    let described = String::from_utf8(output.stdout).ok()?;
    Some(version_from_describe(described.trim()))
}

fn version_from_describe(described: &str) -> String {
    match described.strip_prefix('v') {
        Some(tagged) => tagged.split('-').next().unwrap_or(tagged).to_string(),
        None => format!("{}-{}", env!("CARGO_PKG_VERSION"), described),
    }
}
