use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// File-name stem the decompiler ships under (ffdec.jar, ffdec_24.1.1.jar, FFDec.app).
pub const DEFAULT_TOOL_STEM: &str = "ffdec";

/// Jar locations inside a macOS .app bundle, in probe order.
const BUNDLE_JAR_DIRS: [&str; 3] = ["Contents/Java", "Contents/Resources/Java", "Contents/MacOS"];

/// Locate the decompiler jar by probing the filesystem only.
///
/// An explicit path wins when it points at an existing file. Otherwise each
/// search root is scanned one level deep: jar files whose name contains the
/// stem match directly, `.app` bundles are probed at the conventional interior
/// locations, and directories named after the tool are checked for
/// `<stem>.jar`. Entries are visited in name order so discovery is
/// deterministic across runs.
pub fn locate_jar(explicit: Option<&Path>, search_roots: &[PathBuf], stem: &str) -> Option<PathBuf> {
    if let Some(path) = explicit {
        if path.is_file() {
            return Some(path.to_path_buf());
        }
    }

    for root in search_roots {
        if root.is_file() {
            if is_matching_jar(root, stem) {
                return Some(root.clone());
            }
            continue;
        }

        let entries = match fs::read_dir(root) {
            Ok(entries) => entries,
            Err(_) => continue,
        };

        let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
        paths.sort();

        for path in paths {
            if path.is_file() && is_matching_jar(&path, stem) {
                return Some(path);
            }

            if !path.is_dir() {
                continue;
            }

            let name = match path.file_name().and_then(|n| n.to_str()) {
                Some(name) => name.to_lowercase(),
                None => continue,
            };

            if !name.contains(stem) {
                continue;
            }

            if name.ends_with(".app") {
                for inner in BUNDLE_JAR_DIRS {
                    let candidate = path.join(inner).join(format!("{}.jar", stem));
                    if candidate.is_file() {
                        return Some(candidate);
                    }
                }
            } else {
                let candidate = path.join(format!("{}.jar", stem));
                if candidate.is_file() {
                    return Some(candidate);
                }
            }
        }
    }

    None
}

fn is_matching_jar(path: &Path, stem: &str) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| {
            let lower = n.to_lowercase();
            lower.contains(stem) && lower.ends_with(".jar")
        })
        .unwrap_or(false)
}

/// A verified Java runtime.
#[derive(Debug, Clone)]
pub struct JavaRuntime {
    pub path: PathBuf,
    pub version_banner: String,
}

/// Find a working Java runtime by probing candidates with `-version`.
///
/// An explicit path is tried first, then `java` on PATH, then well-known
/// install locations.
pub fn find_java(explicit: Option<&Path>) -> Option<JavaRuntime> {
    let mut candidates: Vec<PathBuf> = Vec::new();

    if let Some(path) = explicit {
        candidates.push(path.to_path_buf());
    }
    candidates.push(PathBuf::from("java"));
    candidates.push(PathBuf::from("/opt/homebrew/opt/openjdk/bin/java"));
    candidates.push(PathBuf::from("/usr/bin/java"));

    for candidate in candidates {
        if let Some(banner) = probe_runtime(&candidate) {
            return Some(JavaRuntime {
                path: candidate,
                version_banner: banner,
            });
        }
    }

    None
}

fn probe_runtime(path: &Path) -> Option<String> {
    // `java -version` prints its banner on stderr.
    let output = Command::new(path).arg("-version").output().ok()?;

    if !output.status.success() {
        return None;
    }

    let banner = String::from_utf8_lossy(&output.stderr);
    Some(banner.lines().next().unwrap_or("").to_string())
}

/// Run `java -jar <jar> -version` and return the tool's version text.
pub fn jar_version(java: &Path, jar: &Path) -> std::io::Result<(bool, String)> {
    let output = Command::new(java)
        .arg("-Djava.awt.headless=true")
        .arg("-jar")
        .arg(jar)
        .arg("-version")
        .output()?;

    let mut text = String::from_utf8_lossy(&output.stdout).to_string();
    text.push_str(&String::from_utf8_lossy(&output.stderr));

    Ok((output.status.success(), text.trim().to_string()))
}
