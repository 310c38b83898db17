use chrono::Local;
use std::process::Command;

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    output
        .status
        .success()
        .then(|| String::from_utf8_lossy(&output.stdout).trim().to_string())
}

fn main() {
    let hash = git(&["rev-parse", "--short", "HEAD"]).unwrap_or_else(|| "unknown".to_string());

    // Modified tracked files get a timestamp so local builds are distinguishable.
    let dirty = Command::new("git")
        .args(["diff", "--quiet", "HEAD"])
        .status()
        .is_ok_and(|s| !s.success());

    let build_hash = if dirty {
        format!("{hash}-dirty-{}", Local::now().format("%Y%m%d-%H%M%S"))
    } else {
        hash
    };
    println!("cargo:rustc-env=BUILD_HASH={build_hash}");

    // Workspace root is two levels up.
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/index");
}
