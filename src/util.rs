// rbsort/src/util.rs

use std::path::Path;

use memchr::memchr;

/// Files we treat as Ruby: by extension, or by well-known basename for the
/// extensionless tool files.
pub fn is_ruby_file(path: &Path) -> bool {
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        return matches!(ext.to_ascii_lowercase().as_str(), "rb" | "rake" | "gemspec");
    }
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    matches!(name, "Rakefile" | "Gemfile" | "Guardfile" | "Capfile" | "Vagrantfile")
}

/// Quick binary sniff: any NUL byte disqualifies the content as text.
pub fn looks_binary(bytes: &[u8]) -> bool {
    memchr(0, bytes).is_some()
}

/// RFC3339 (sortable) stamp for report headers.
pub fn now_rfc3339() -> String {
    use chrono::{SecondsFormat, Utc};
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/* ================================ Tests ================================ */
