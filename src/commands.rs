// rbsort/src/commands.rs

use anyhow::{
    bail,
    Result,
};
use ignore::WalkBuilder;
use serde::Serialize;
use std::{
    env,
    path::{
        PathBuf,
    },
};
use crate::{
    process::{self, Options, Outcome},
    util,
};


pub fn run_cli() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();
    let cli = match parse_args(&args)? {
        Some(c) => c,
        None => {
            print_help();
            return Ok(());
        }
    };

    let files = collect_ruby_files(&cli.paths);
    if files.is_empty() {
        eprintln!("[rbsort] warn: no Ruby files found under the given paths");
        return Ok(());
    }

    let mut reports: Vec<FileReport> = Vec::new();
    let opts = Options { safe: cli.safe };

    for file in &files {
        let shown = file.display().to_string();
        let report = match cli.mode {
            Mode::Sort => match process::process_file(file, &opts) {
                Ok(Outcome::Changed) => {
                    if !cli.json {
                        println!("rewrote {shown}");
                    }
                    FileReport::ok(shown, "changed")
                }
                Ok(Outcome::Unchanged) => FileReport::ok(shown, "unchanged"),
                Ok(Outcome::Skipped) => {
                    if !cli.json {
                        println!("skipped {shown} (isort:skip_file)");
                    }
                    FileReport::ok(shown, "skipped")
                }
                Err(e) => {
                    eprintln!("[rbsort] warn: {e}");
                    FileReport::err(shown, e.to_string())
                }
            },
            Mode::Check => match process::check_only(file) {
                Ok(true) => {
                    if !cli.json {
                        println!("would rewrite {shown}");
                    }
                    FileReport::ok(shown, "changed")
                }
                Ok(false) => FileReport::ok(shown, "unchanged"),
                Err(e) => {
                    eprintln!("[rbsort] warn: {e}");
                    FileReport::err(shown, e.to_string())
                }
            },
            Mode::Diff => match process::diff_preview(file) {
                Ok(Some(diff)) => {
                    if !cli.json {
                        print!("{diff}");
                    }
                    FileReport::ok(shown, "changed")
                }
                Ok(None) => FileReport::ok(shown, "unchanged"),
                Err(e) => {
                    eprintln!("[rbsort] warn: {e}");
                    FileReport::err(shown, e.to_string())
                }
            },
        };
        reports.push(report);
    }

    let changed = reports.iter().filter(|r| r.outcome == "changed").count();
    let skipped = reports.iter().filter(|r| r.outcome == "skipped").count();
    let errors = reports.iter().filter(|r| r.outcome == "error").count();

    if cli.json {
        let doc = serde_json::json!({
            "version": 1,
            "generated": util::now_rfc3339(),
            "mode": cli.mode.name(),
            "summary": {
                "files": reports.len(),
                "changed": changed,
                "unchanged": reports.len() - changed - skipped - errors,
                "skipped": skipped,
                "errors": errors,
            },
            "files": reports,
        });
        println!("{}", serde_json::to_string_pretty(&doc)?);
    } else {
        let verb = match cli.mode {
            Mode::Sort => "rewrote",
            Mode::Check => "would rewrite",
            Mode::Diff => "would rewrite",
        };
        println!("{} file(s) scanned, {verb} {changed}, {skipped} skipped, {errors} error(s)", reports.len());
    }

    if errors > 0 || (cli.mode == Mode::Check && changed > 0) {
        std::process::exit(1);
    }
    Ok(())
}

/* ============================ CLI plumbing ============================= */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    Sort,
    Check,
    Diff,
}

impl Mode {
    fn name(self) -> &'static str {
        match self {
            Mode::Sort => "sort",
            Mode::Check => "check",
            Mode::Diff => "diff",
        }
    }
}

#[derive(Debug)]
struct Cli {
    mode: Mode,
    safe: bool,
    json: bool,
    paths: Vec<PathBuf>,
}

/// Parse argv. `Ok(None)` means "show help".
fn parse_args(args: &[String]) -> Result<Option<Cli>> {
    let mut cli = Cli { mode: Mode::Sort, safe: false, json: false, paths: Vec::new() };
    for arg in args {
        match arg.as_str() {
            "help" | "--help" | "-h" => return Ok(None),
            "--check" => cli.mode = Mode::Check,
            "--diff" => cli.mode = Mode::Diff,
            "--safe" => cli.safe = true,
            "--json" => cli.json = true,
            s if s.starts_with('-') => bail!("unknown flag: {s} (try `rbsort help`)"),
            s => cli.paths.push(PathBuf::from(s)),
        }
    }
    if cli.paths.is_empty() {
        return Ok(None);
    }
    Ok(Some(cli))
}

/// Expand the given paths into a sorted, deduplicated file list. Explicit
/// file arguments are taken as-is (missing ones surface as NotFound later);
/// directories are walked with the standard ignore filters.
fn collect_ruby_files(paths: &[PathBuf]) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = Vec::new();
    for path in paths {
        if path.is_dir() {
            let walker = WalkBuilder::new(path).standard_filters(true).build();
            for dent in walker.filter_map(|e| e.ok()) {
                let p = dent.path();
                if p.is_file() && util::is_ruby_file(p) {
                    files.push(p.to_path_buf());
                }
            }
        } else {
            files.push(path.clone());
        }
    }
    files.sort();
    files.dedup();
    files
}

#[derive(Serialize)]
struct FileReport {
    path: String,
    outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl FileReport {
    fn ok(path: String, outcome: &'static str) -> Self {
        FileReport { path, outcome, error: None }
    }

    fn err(path: String, message: String) -> Self {
        FileReport { path, outcome: "error", error: Some(message) }
    }
}

fn print_help() {
    println!(
r#"
rbsort: sort Ruby require/include/autoload statements

USAGE:
    rbsort <path>...          # Sort files (or directories, recursively) in place
    rbsort --check <path>...  # Report files that would change; exit 1 if any
    rbsort --diff <path>...   # Print unified diffs, mutate nothing
    rbsort --safe <path>...   # Syntax-check with `ruby -c` before and after
    rbsort --json ...         # Machine-readable run report on stdout
    rbsort help               # Show this message

Statements are grouped stdlib / third-party / first-party / local, each
group alphabetized. `# isort:skip` pins a line; `# isort:skip_file` within
the first 50 lines leaves the whole file alone.
"#    );
}

/* ================================ Tests ================================ */
