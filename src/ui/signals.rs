use crate::error::{PipelineError, Result};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Ctrl-C coordination for the pipeline.
///
/// The first press flips the batch into wind-down: no new decompiler
/// invocations start, and in-flight ones are killed when their tasks drop.
/// A second press exits on the spot.
pub struct GracefulShutdown {
    presses: Arc<AtomicUsize>,
}

impl GracefulShutdown {
    pub fn new() -> Result<Self> {
        let presses = Arc::new(AtomicUsize::new(0));
        let counter = presses.clone();

        ctrlc::set_handler(move || {
            let earlier = counter.fetch_add(1, Ordering::SeqCst);
            if earlier == 0 {
                eprintln!("\nStopping after in-flight files... (press Ctrl+C again to force exit)");
            } else {
                eprintln!("\nForce stopping...");
                std::process::exit(1);
            }
        })
        .map_err(|e| PipelineError::Config {
            message: format!("Failed to set signal handler: {}", e),
        })?;

        Ok(Self { presses })
    }

    /// Handler-free instance so tests never race over the global signal hook.
    pub fn new_for_test() -> Self {
        Self {
            presses: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn is_running(&self) -> bool {
        self.presses.load(Ordering::SeqCst) == 0
    }

    pub fn is_cancelled(&self) -> bool {
        !self.is_running()
    }

    /// Refuse to start the next pipeline step once cancellation was requested.
    pub fn check_shutdown(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }
        Ok(())
    }

    pub fn request_shutdown(&self) {
        self.presses.fetch_add(1, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.presses.store(0, Ordering::SeqCst);
    }
}
