use crate::config::AssetKind;
use crate::extractor::batch::FileOutcome;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use walkdir::WalkDir;

/// Output file extensions counted as produced visual assets.
const ASSET_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "svg"];

/// How much captured stderr is kept as a failure diagnostic.
const DIAGNOSTIC_LIMIT: usize = 100;

/// One configured invocation target: the external decompiler jar hosted by a
/// Java runtime, exporting a fixed set of asset kinds.
#[derive(Debug, Clone)]
pub struct Decompiler {
    java: PathBuf,
    jar: PathBuf,
    kinds: Vec<AssetKind>,
    timeout: Duration,
}

impl Decompiler {
    pub fn new(java: PathBuf, jar: PathBuf, kinds: Vec<AssetKind>, timeout: Duration) -> Self {
        Self {
            java,
            jar,
            kinds,
            timeout,
        }
    }

    /// The comma-joined kind list passed to `-export`.
    pub fn export_argument(&self) -> String {
        self.kinds
            .iter()
            .map(|k| k.export_name())
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Decompile one container file into `output_subdir`.
    ///
    /// The process runs headless: GUI creation is disabled through both the
    /// JVM flag and JAVA_TOOL_OPTIONS, and DISPLAY is scrubbed so no window
    /// system is reachable. Stdout is discarded; stderr is captured for the
    /// failure diagnostic. Never returns an error: every problem is folded
    /// into the file's own outcome so sibling tasks are unaffected.
    pub async fn extract_one(&self, input: &Path, output_subdir: &Path) -> FileOutcome {
        if let Err(e) = std::fs::create_dir_all(output_subdir) {
            return FileOutcome::Failure {
                detail: truncate_detail(&format!("create output dir: {}", e)),
            };
        }

        let mut command = Command::new(&self.java);
        command
            .arg("-Djava.awt.headless=true")
            .arg("-jar")
            .arg(&self.jar)
            .arg("-export")
            .arg(self.export_argument())
            .arg(output_subdir)
            .arg(input)
            .env("JAVA_TOOL_OPTIONS", "-Djava.awt.headless=true")
            .env_remove("DISPLAY")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let result = tokio::time::timeout(self.timeout, command.output()).await;

        let output = match result {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                remove_if_unproductive(output_subdir);
                return FileOutcome::Failure {
                    detail: truncate_detail(&format!("spawn failed: {}", e)),
                };
            }
            Err(_) => {
                // kill_on_drop has reaped the process by the time we get here.
                remove_if_unproductive(output_subdir);
                return FileOutcome::Failure {
                    detail: format!("timed out after {}s", self.timeout.as_secs()),
                };
            }
        };

        let produced = count_asset_files(output_subdir);
        let stderr = String::from_utf8_lossy(&output.stderr);

        classify(output.status.success(), produced, &stderr, output_subdir)
    }
}

/// Map an invocation result onto the per-file outcome taxonomy.
///
/// Success needs a zero exit code and at least one produced file. A zero
/// count with a clean exit is the empty outcome, and the output directory is
/// removed so no empty directories survive a batch. A non-zero exit with no
/// output is a failure carrying a stderr snippet; a non-zero exit that still
/// produced files is reported as a failure but keeps what was written.
fn classify(exit_ok: bool, produced: usize, stderr: &str, output_subdir: &Path) -> FileOutcome {
    if exit_ok && produced > 0 {
        return FileOutcome::Success { produced };
    }

    if produced == 0 {
        let _ = std::fs::remove_dir_all(output_subdir);
        if exit_ok {
            return FileOutcome::Empty;
        }
        let detail = if stderr.trim().is_empty() {
            "decompiler exited with an error".to_string()
        } else {
            truncate_detail(stderr.trim())
        };
        return FileOutcome::Failure { detail };
    }

    FileOutcome::Failure {
        detail: truncate_detail(&format!(
            "exited with an error after producing {} files",
            produced
        )),
    }
}

/// Count produced image files recursively under one output directory.
///
/// The decompiler fans exports out into kind sub-folders, so the count must
/// descend the whole tree.
pub fn count_asset_files(dir: &Path) -> usize {
    WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| {
            e.path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| {
                    let lower = ext.to_lowercase();
                    ASSET_EXTENSIONS.contains(&lower.as_str())
                })
                .unwrap_or(false)
        })
        .count()
}

fn remove_if_unproductive(output_subdir: &Path) {
    if count_asset_files(output_subdir) == 0 {
        let _ = std::fs::remove_dir_all(output_subdir);
    }
}

fn truncate_detail(detail: &str) -> String {
    if detail.len() <= DIAGNOSTIC_LIMIT {
        detail.to_string()
    } else {
        let mut cut = DIAGNOSTIC_LIMIT;
        while !detail.is_char_boundary(cut) {
            cut -= 1;
        }
        detail[..cut].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn decompiler(kinds: Vec<AssetKind>) -> Decompiler {
        Decompiler::new(
            PathBuf::from("java"),
            PathBuf::from("ffdec.jar"),
            kinds,
            Duration::from_secs(120),
        )
    }

    #[test]
    fn test_export_argument_all_kinds() {
        let d = decompiler(AssetKind::ALL.to_vec());
        assert_eq!(d.export_argument(), "image,shape,sprite,button,frame");
    }

    #[test]
    fn test_export_argument_images_only() {
        let d = decompiler(vec![AssetKind::Image]);
        assert_eq!(d.export_argument(), "image");
    }

    #[test]
    fn test_count_asset_files_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let images = temp_dir.path().join("images");
        let shapes = temp_dir.path().join("shapes");
        fs::create_dir_all(&images).unwrap();
        fs::create_dir_all(&shapes).unwrap();

        fs::write(images.join("1.png"), b"png").unwrap();
        fs::write(images.join("2.JPG"), b"jpg").unwrap();
        fs::write(shapes.join("3.svg"), b"svg").unwrap();
        fs::write(shapes.join("notes.txt"), b"ignored").unwrap();

        assert_eq!(count_asset_files(temp_dir.path()), 3);
    }

    #[test]
    fn test_classify_success() {
        let temp_dir = TempDir::new().unwrap();
        let outcome = classify(true, 5, "", temp_dir.path());
        assert!(matches!(outcome, FileOutcome::Success { produced: 5 }));
        assert!(temp_dir.path().exists());
    }

    #[test]
    fn test_classify_empty_removes_directory() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("asset_0001.swf");
        fs::create_dir_all(&subdir).unwrap();

        let outcome = classify(true, 0, "", &subdir);
        assert!(matches!(outcome, FileOutcome::Empty));
        assert!(!subdir.exists());
    }

    #[test]
    fn test_classify_failure_removes_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("asset_0002.swf");
        fs::create_dir_all(&subdir).unwrap();

        let outcome = classify(false, 0, "boom: bad tag", &subdir);
        match outcome {
            FileOutcome::Failure { detail } => assert!(detail.contains("boom")),
            other => panic!("expected failure, got {:?}", other),
        }
        assert!(!subdir.exists());
    }

    #[test]
    fn test_classify_failure_keeps_partial_output() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("asset_0003.swf");
        fs::create_dir_all(&subdir).unwrap();

        let outcome = classify(false, 2, "", &subdir);
        assert!(matches!(outcome, FileOutcome::Failure { .. }));
        assert!(subdir.exists());
    }

    #[test]
    fn test_diagnostic_truncation() {
        let long = "x".repeat(500);
        assert_eq!(truncate_detail(&long).len(), 100);
        assert_eq!(truncate_detail("short"), "short");
    }

    #[tokio::test]
    async fn test_spawn_failure_is_a_file_outcome() {
        let temp_dir = TempDir::new().unwrap();
        let d = Decompiler::new(
            temp_dir.path().join("no-such-java"),
            PathBuf::from("ffdec.jar"),
            vec![AssetKind::Image],
            Duration::from_secs(5),
        );

        let outdir = temp_dir.path().join("out");
        let outcome = d.extract_one(Path::new("input.swf"), &outdir).await;
        assert!(matches!(outcome, FileOutcome::Failure { .. }));
        assert!(!outdir.exists());
    }
}
