use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use entrysynth_core::lang::{members, synthetic};

/// Guardrail against stringly-typed member and synthetic-name checks.
///
/// Looks for `== "GetAwaiter"`, `"<Main>" => ...` and similar in Rust sources where callers should go through the
/// `entrysynth_core::lang` registries instead. Coarse by intent: registries and tests are allowed to spell names.
#[test]
fn no_stringly_member_name_checks_in_rust_sources() {
    let root = repo_root();
    let spellings = registry_spellings();
    let mut offenders: Vec<(PathBuf, usize, String)> = Vec::new();

    for dir in [root.join("src"), root.join("crates")] {
        if dir.exists() {
            scan_dir(&root, &dir, &spellings, &mut offenders);
        }
    }

    if !offenders.is_empty() {
        let mut msg = String::new();
        msg.push_str("Found stringly-typed member/synthetic name checks. Prefer entrysynth_core registries.\n\n");
        for (path, line_no, line) in offenders.into_iter().take(80) {
            msg.push_str(&format!(
                "- {}:{}: {}\n",
                path.strip_prefix(&root).unwrap_or(&path).display(),
                line_no,
                line.trim()
            ));
        }
        panic!("{msg}");
    }
}

fn repo_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn registry_spellings() -> Vec<&'static str> {
    let mut set: BTreeSet<&'static str> = BTreeSet::new();
    for m in members::WELL_KNOWN_MEMBERS {
        set.insert(m.canonical);
        for &a in m.aliases {
            set.insert(a);
        }
    }
    for n in synthetic::SYNTHETIC_NAMES {
        set.insert(n.canonical);
    }
    set.into_iter().collect()
}

fn is_allowed_file(root: &Path, path: &Path) -> bool {
    let rel = path.strip_prefix(root).unwrap_or(path).to_string_lossy();
    if !rel.ends_with(".rs") {
        return true;
    }
    // Registries define the spellings.
    if rel.starts_with("crates/entrysynth_core/src/lang/") {
        return true;
    }
    if rel.starts_with("tests/") || rel.contains("/tests/") {
        return true;
    }
    false
}

fn scan_dir(root: &Path, dir: &Path, spellings: &[&'static str], offenders: &mut Vec<(PathBuf, usize, String)>) {
    let Ok(entries) = fs::read_dir(dir) else { return };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            scan_dir(root, &path, spellings, offenders);
            continue;
        }
        if is_allowed_file(root, &path) {
            continue;
        }
        let Ok(contents) = fs::read_to_string(&path) else {
            continue;
        };
        for (idx, line) in contents.lines().enumerate() {
            // Unit-test modules sit at the bottom of each file.
            if line.trim_start().starts_with("#[cfg(test)]") {
                break;
            }
            if is_suspicious_line(line, spellings) {
                offenders.push((path.clone(), idx + 1, line.to_string()));
            }
        }
    }
}

fn is_suspicious_line(line: &str, spellings: &[&'static str]) -> bool {
    let trimmed = line.trim_start();
    if trimmed.starts_with("//") {
        return false;
    }
    for s in spellings {
        let eq = format!("== \"{s}\"");
        let arm = format!("\"{s}\" =>");
        let ordinary = format!("ordinary(\"{s}\"");
        if line.contains(&eq) || line.contains(&arm) || line.contains(&ordinary) {
            return true;
        }
    }
    false
}
