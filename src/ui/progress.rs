use crate::extractor::{BatchProgress, FileOutcome, FileReport};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::time::Duration;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>7}/{len:7}";

pub struct ProgressManager {
    multi_progress: MultiProgress,
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            enabled,
        }
    }

    pub fn create_batch_progress(&self, total_files: u64) -> ProgressBar {
        self.counted_bar(total_files, "files", "Extracting...")
    }

    pub fn create_organize_progress(&self, total_dirs: u64) -> ProgressBar {
        self.counted_bar(total_dirs, "assets", "Organizing...")
    }

    fn counted_bar(&self, total: u64, unit: &str, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi_progress.add(ProgressBar::new(total));
        pb.set_style(
            ProgressStyle::with_template(&format!("{} {} {{msg}}", BAR_TEMPLATE, unit))
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }

    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        if !self.enabled {
            return ProgressBar::hidden();
        }

        let pb = self.multi_progress.add(ProgressBar::new_spinner());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_style(
            ProgressStyle::with_template("{spinner:.green} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        pb.set_message(message.to_string());
        pb
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Update the extraction bar after one completion-order report.
pub fn update_batch_progress(pb: &ProgressBar, progress: &BatchProgress, report: &FileReport) {
    pb.set_position(progress.completed as u64);

    let status = match &report.outcome {
        FileOutcome::Success { produced } => format!("{} images", produced),
        FileOutcome::Empty => "no images".to_string(),
        FileOutcome::Failure { detail } => {
            let mut detail = detail.clone();
            if detail.len() > 30 {
                let mut cut = 30;
                while !detail.is_char_boundary(cut) {
                    cut -= 1;
                }
                detail.truncate(cut);
            }
            detail
        }
    };

    let eta = progress.estimated_remaining();
    if eta.as_secs() > 0 {
        pb.set_message(format!(
            "{} ({}) ETA: {}",
            report.name,
            status,
            format_duration(eta)
        ));
    } else {
        pb.set_message(format!("{} ({})", report.name, status));
    }
}

pub fn finish_progress_with_summary(pb: &ProgressBar, message: &str, duration: Duration) {
    pb.finish_with_message(format!(
        "{} (completed in {})",
        message,
        format_duration(duration)
    ));
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_manager_creation() {
        let manager = ProgressManager::new(true);
        assert!(manager.is_enabled());

        let disabled_manager = ProgressManager::new(false);
        assert!(!disabled_manager.is_enabled());
    }

    #[test]
    fn test_disabled_progress_bars() {
        let manager = ProgressManager::new(false);

        assert!(manager.create_batch_progress(10).is_hidden());
        assert!(manager.create_organize_progress(10).is_hidden());
        assert!(manager.create_spinner("test").is_hidden());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "61m 1s");
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
    }

    #[test]
    fn test_batch_progress_update() {
        let manager = ProgressManager::new(false);
        let pb = manager.create_batch_progress(4);

        let mut progress = BatchProgress::new(4);
        progress.completed = 1;

        let report = FileReport {
            name: "pet_01.swf".to_string(),
            outcome: FileOutcome::Success { produced: 3 },
            elapsed: Duration::from_millis(10),
        };

        update_batch_progress(&pb, &progress, &report);
        assert!(pb.message().contains("pet_01.swf"));
        assert!(pb.message().contains("3 images"));
    }

    #[test]
    fn test_failure_detail_truncated_in_message() {
        let manager = ProgressManager::new(false);
        let pb = manager.create_batch_progress(2);

        let mut progress = BatchProgress::new(2);
        progress.completed = 1;

        let report = FileReport {
            name: "broken.swf".to_string(),
            outcome: FileOutcome::Failure {
                detail: "x".repeat(100),
            },
            elapsed: Duration::from_millis(10),
        };

        update_batch_progress(&pb, &progress, &report);
        assert!(pb.message().len() < 60);
    }
}
