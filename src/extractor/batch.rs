use crate::error::{PipelineError, Result};
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task::JoinSet;

/// One legacy container file, keyed by its file name for the whole pipeline.
#[derive(Debug, Clone)]
pub struct InputAsset {
    pub path: PathBuf,
    pub name: String,
}

impl InputAsset {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("")
            .to_string();
        Self { path, name }
    }
}

/// Outcome of processing one input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Success { produced: usize },
    Empty,
    Failure { detail: String },
}

#[derive(Debug, Clone)]
pub struct FileReport {
    pub name: String,
    pub outcome: FileOutcome,
    pub elapsed: Duration,
}

/// Running aggregate over a batch. Only ever mutated by the collecting task,
/// so no synchronization is needed.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    pub processed: usize,
    pub success_count: usize,
    pub empty_count: usize,
    pub failure_count: usize,
    pub total_produced: usize,
    pub elapsed: Duration,
    pub cancelled: bool,
}

impl BatchSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, report: &FileReport) {
        self.processed += 1;
        match &report.outcome {
            FileOutcome::Success { produced } => {
                self.success_count += 1;
                self.total_produced += produced;
            }
            FileOutcome::Empty => self.empty_count += 1,
            FileOutcome::Failure { .. } => self.failure_count += 1,
        }
    }

    /// success + empty + failure must always equal processed.
    pub fn is_consistent(&self) -> bool {
        self.success_count + self.empty_count + self.failure_count == self.processed
    }
}

#[derive(Debug, Clone)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
    pub start_time: Instant,
}

impl BatchProgress {
    pub fn new(total: usize) -> Self {
        Self {
            completed: 0,
            total,
            start_time: Instant::now(),
        }
    }

    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.completed as f64 / self.total as f64) * 100.0
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn estimated_remaining(&self) -> Duration {
        if self.completed == 0 {
            return Duration::from_secs(0);
        }

        let elapsed = self.elapsed();
        let rate = self.completed as f64 / elapsed.as_secs_f64();
        let remaining = self.total - self.completed;

        if rate > 0.0 {
            Duration::from_secs_f64(remaining as f64 / rate)
        } else {
            Duration::from_secs(0)
        }
    }
}

/// List the container files in a source directory, sorted by name.
pub fn list_inputs(source_dir: &Path) -> Result<Vec<InputAsset>> {
    if !source_dir.is_dir() {
        return Err(PipelineError::Prerequisite {
            what: "source directory".to_string(),
            detail: format!("{} does not exist", source_dir.display()),
        });
    }

    let mut inputs: Vec<InputAsset> = std::fs::read_dir(source_dir)?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .map(InputAsset::new)
        .collect();

    inputs.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(inputs)
}

/// Narrow the input sequence for test mode or resumption.
///
/// Test mode caps the batch at 10 files; otherwise the start offset is
/// applied before the limit, matching how a re-run resumes an interrupted
/// batch.
pub fn plan_inputs(
    mut inputs: Vec<InputAsset>,
    test_mode: bool,
    start: usize,
    limit: Option<usize>,
) -> Vec<InputAsset> {
    if test_mode {
        inputs.truncate(10);
        return inputs;
    }

    if start > 0 {
        inputs = inputs.split_off(start.min(inputs.len()));
    }

    if let Some(limit) = limit {
        inputs.truncate(limit);
    }

    inputs
}

/// Drive the per-file worker over the batch with bounded parallelism.
///
/// Seeds `parallelism` tasks, then refills one slot per completion, so at
/// most N invocations are ever in flight. Reports arrive in completion order,
/// not input order, and each one is merged into the single accumulator before
/// the progress callback runs. A cancelled batch stops refilling and aborts
/// in-flight tasks; their subprocesses die through kill-on-drop.
pub async fn run_batch<W, Fut, P>(
    inputs: Vec<InputAsset>,
    parallelism: usize,
    worker: W,
    mut on_report: P,
    is_cancelled: impl Fn() -> bool,
) -> BatchSummary
where
    W: Fn(InputAsset) -> Fut,
    Fut: Future<Output = FileReport> + Send + 'static,
    P: FnMut(&BatchProgress, &FileReport),
{
    let total = inputs.len();
    let started = Instant::now();
    let mut progress = BatchProgress::new(total);
    let mut summary = BatchSummary::new();

    let mut queue = inputs.into_iter();
    let mut tasks: JoinSet<FileReport> = JoinSet::new();

    for _ in 0..parallelism.max(1) {
        if let Some(input) = queue.next() {
            tasks.spawn(worker(input));
        }
    }

    while let Some(joined) = tasks.join_next().await {
        let report = joined.unwrap_or_else(|e| FileReport {
            name: "<worker>".to_string(),
            outcome: FileOutcome::Failure {
                detail: format!("task aborted: {}", e),
            },
            elapsed: Duration::from_secs(0),
        });

        progress.completed += 1;
        summary.record(&report);
        on_report(&progress, &report);

        if is_cancelled() {
            summary.cancelled = true;
            tasks.shutdown().await;
            break;
        }

        if let Some(input) = queue.next() {
            tasks.spawn(worker(input));
        }
    }

    summary.elapsed = started.elapsed();
    summary
}
