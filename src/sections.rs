// rbsort/src/sections.rs
//! Section classification: which of the four ordered groups an import
//! belongs to. Classification is a static lexical heuristic over curated
//! name lists. No filesystem or gem lookup happens here, so an unlisted
//! stdlib module will land in `Thirdparty`. Treat the lists below as
//! versioned configuration data, not logic.

use std::fmt;

use crate::statement::ImportKind;

/// Ordered grouping buckets. The derived `Ord` is the section order used
/// for sorting: Stdlib < Thirdparty < Firstparty < LocalFolder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Section {
    Stdlib,
    Thirdparty,
    Firstparty,
    LocalFolder,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Section::Stdlib => "stdlib",
            Section::Thirdparty => "thirdparty",
            Section::Firstparty => "firstparty",
            Section::LocalFolder => "localfolder",
        };
        f.write_str(s)
    }
}

/// Map a parsed import to its section.
/// - `require` → Stdlib when the path matches the curated list, else Thirdparty
/// - `require_relative` → always LocalFolder
/// - `include` / `extend` / `using` → Firstparty unless the constant is a
///   known stdlib mixin
/// - `autoload` → always Firstparty
pub fn classify_section(kind: ImportKind, target: &str) -> Section {
    match kind {
        ImportKind::Require => {
            if is_stdlib_path(target) {
                Section::Stdlib
            } else {
                Section::Thirdparty
            }
        }
        ImportKind::RequireRelative => Section::LocalFolder,
        ImportKind::Include | ImportKind::Extend | ImportKind::Using => {
            if is_stdlib_mixin(target) {
                Section::Stdlib
            } else {
                Section::Firstparty
            }
        }
        ImportKind::Autoload => Section::Firstparty,
    }
}

/// True when `path` names a stdlib library: an exact list entry, or related
/// to one by a `/`-boundary prefix in either direction (`net/http` covers
/// both `net` and `net/http/persistent`).
pub fn is_stdlib_path(path: &str) -> bool {
    STDLIB_PATHS.iter().any(|m| {
        path == *m
            || (path.len() > m.len() && path.as_bytes()[m.len()] == b'/' && path.starts_with(m))
            || (m.len() > path.len() && m.as_bytes()[path.len()] == b'/' && m.starts_with(path))
    })
}

/// True when `constant` is a mixin/refinement shipped with Ruby itself.
pub fn is_stdlib_mixin(constant: &str) -> bool {
    STDLIB_MIXINS.iter().any(|m| constant == *m)
}

/* ============================ Curated lists ============================ */
// Ruby 3.3 default + bundled gem names, by require path. Incomplete by
// design; keep sorted when editing.

pub const STDLIB_PATHS: &[&str] = &[
    "abbrev",
    "base64",
    "benchmark",
    "bigdecimal",
    "cgi",
    "coverage",
    "csv",
    "date",
    "delegate",
    "did_you_mean",
    "digest",
    "drb",
    "english",
    "erb",
    "etc",
    "fcntl",
    "fiddle",
    "fileutils",
    "find",
    "forwardable",
    "getoptlong",
    "io/console",
    "io/nonblock",
    "io/wait",
    "ipaddr",
    "irb",
    "json",
    "logger",
    "matrix",
    "minitest",
    "monitor",
    "mutex_m",
    "net/ftp",
    "net/http",
    "net/imap",
    "net/pop",
    "net/protocol",
    "net/smtp",
    "nkf",
    "objspace",
    "observer",
    "open-uri",
    "open3",
    "openssl",
    "optparse",
    "ostruct",
    "pathname",
    "pp",
    "prettyprint",
    "prime",
    "pstore",
    "psych",
    "racc",
    "rake",
    "rdoc",
    "readline",
    "reline",
    "resolv",
    "rexml",
    "rinda",
    "ripper",
    "rss",
    "rubygems",
    "securerandom",
    "set",
    "shellwords",
    "singleton",
    "socket",
    "stringio",
    "strscan",
    "syslog",
    "tempfile",
    "time",
    "timeout",
    "tmpdir",
    "tsort",
    "un",
    "uri",
    "weakref",
    "yaml",
    "zlib",
];

// Modules commonly pulled in with `include`/`extend`/`using` that belong to
// core or the standard library rather than the host project.
pub const STDLIB_MIXINS: &[&str] = &[
    "Comparable",
    "Enumerable",
    "Forwardable",
    "Kernel",
    "Math",
    "MonitorMixin",
    "Mutex_m",
    "Observable",
    "Singleton",
    "SingleForwardable",
];

/* ================================ Tests ================================ */
