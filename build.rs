use std::path::Path;
use std::process::Command;

/// Embeds a short commit id as `SYSCOLOR_GIT_HASH` for `--version`.
fn main() {
    let hash = git(&["describe", "--always", "--dirty", "--abbrev=8"]);
    let hash = hash.as_deref().unwrap_or("unknown");
    println!("cargo:rustc-env=SYSCOLOR_GIT_HASH={hash}");

    if let Some(git_dir) = git(&["rev-parse", "--git-dir"]) {
        let git_dir = Path::new(&git_dir);
        for watched in ["HEAD", "index", "packed-refs", "refs"] {
            let path = git_dir.join(watched);
            if path.exists() {
                println!("cargo:rerun-if-changed={}", path.display());
            }
        }
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }

    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (!text.is_empty()).then_some(text)
}
