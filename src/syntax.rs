// rbsort/src/syntax.rs
//! Ruby syntax validation via `ruby -c` on stdin. Consulted only in safety
//! mode, and it fails closed: when the interpreter cannot be spawned the
//! check reports a failure rather than letting a write through.

use std::io::Write;
use std::process::{Command, Stdio};

/// True when `ruby -c` accepts the text.
pub fn is_valid(text: &str) -> bool {
    check_syntax(text).is_none()
}

/// None when the text parses; otherwise a one-line failure message.
pub fn check_syntax(text: &str) -> Option<String> {
    let child = Command::new("ruby")
        .arg("-c")
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn();

    let mut child = match child {
        Ok(c) => c,
        // Fails closed.
        Err(e) => return Some(format!("ruby interpreter unavailable: {e}")),
    };

    if let Some(stdin) = child.stdin.as_mut() {
        if let Err(e) = stdin.write_all(text.as_bytes()) {
            let _ = child.kill();
            let _ = child.wait();
            return Some(format!("could not feed ruby -c: {e}"));
        }
    }

    match child.wait_with_output() {
        Ok(out) if out.status.success() => None,
        Ok(out) => {
            let stderr = String::from_utf8_lossy(&out.stderr);
            let first = stderr.lines().next().unwrap_or("syntax check failed");
            Some(first.trim().to_string())
        }
        Err(e) => Some(format!("ruby -c did not finish: {e}")),
    }
}

/* ================================ Tests ================================ */
// Exercised only where a ruby interpreter is on PATH; the pipeline tests
// cover the fails-closed path without one.
