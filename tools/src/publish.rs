//! Commit and push the generated report with git.
//!
//! Publication problems are logged, never fatal: the report file on disk
//! is the primary output.

use std::process::{Command, Output};

pub fn publish(file_path: &str, generated_at: &str) {
    if let Err(e) = Command::new("git").arg("--version").output() {
        log::warn!("git executable not found ({e}); skipping publication");
        return;
    }

    match git(&["rev-parse", "--is-inside-work-tree"]) {
        Ok(out) if out.status.success() => {}
        _ => {
            log::warn!("Not inside a git repository; skipping publication");
            return;
        }
    }

    let message = format!("Auto-update: report generated {generated_at}");
    let steps: [&[&str]; 3] = [
        &["add", file_path],
        &["commit", "-m", message.as_str()],
        &["push"],
    ];

    for args in steps {
        let out = match git(args) {
            Ok(out) => out,
            Err(e) => {
                log::warn!("git {} failed to start: {e}", args[0]);
                return;
            }
        };
        if out.status.success() {
            continue;
        }
        let stdout = String::from_utf8_lossy(&out.stdout);
        let stderr = String::from_utf8_lossy(&out.stderr);
        if args[0] == "commit" && (stdout.contains("nothing to commit") || stderr.contains("nothing to commit")) {
            log::info!("Report unchanged; nothing to commit");
        } else {
            log::warn!("git {} failed: {}", args[0], stderr.trim());
        }
        return;
    }

    log::info!("Report committed and pushed");
}

fn git(args: &[&str]) -> std::io::Result<Output> {
    Command::new("git").args(args).output()
}
