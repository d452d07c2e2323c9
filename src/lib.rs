pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod locator;
pub mod organizer;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, Command, OutputFormat};
pub use config::{AssetKind, CliOverrides, Config, ExtractConfig, OrganizeConfig, ToolConfig};
pub use error::{PipelineError, Result, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{BatchSummary, Decompiler, FileOutcome, FileReport, InputAsset};
pub use locator::{find_java, locate_jar, JavaRuntime};
pub use organizer::{LookupWriter, Materializer, OrganizeWriter};
pub use ui::{GracefulShutdown, OutputFormatter, OutputMode, ProgressManager};

use crate::extractor::batch;
use crate::locator::tool_locator;
use crate::organizer::writer::{LookupReport, MaterializeReport, OrganizeReport};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Main library interface wiring the two pipeline stages together.
pub struct Pipeline {
    config: Config,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
    shutdown: GracefulShutdown,
}

impl Pipeline {
    /// Create a new Pipeline instance with the provided configuration
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Result<Self> {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet);
        let shutdown = GracefulShutdown::new()?;

        Ok(Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        })
    }

    /// Create a new Pipeline instance for testing (no signal handler conflicts)
    #[cfg(test)]
    pub fn new_for_test(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(!quiet);
        let shutdown = GracefulShutdown::new_for_test();

        Self {
            config,
            output_formatter,
            progress_manager,
            shutdown,
        }
    }

    /// Create a Pipeline instance from CLI arguments
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            cli::OutputFormat::Human => OutputMode::Human,
            cli::OutputFormat::Json => OutputMode::Json,
            cli::OutputFormat::Plain => OutputMode::Plain,
        };

        Self::new(config, output_mode, cli_args.verbosity_level(), cli_args.quiet)
    }

    /// Run the Extraction Stage over the configured source directory.
    pub async fn extract(
        &self,
        test_mode: bool,
        start: usize,
        limit: Option<usize>,
        skip_confirmation: bool,
    ) -> Result<BatchSummary> {
        self.shutdown.check_shutdown()?;
        self.output_formatter.start_operation("Checking requirements");

        let (java, jar) = self.resolve_tooling()?;
        self.output_formatter
            .debug(&format!("Java runtime: {}", java.path.display()));
        self.output_formatter
            .debug(&format!("Decompiler jar: {}", jar.display()));

        let inputs = batch::list_inputs(&self.config.extract.source_dir)?;
        self.output_formatter
            .info(&format!("Found {} asset files to process", inputs.len()));

        let planned = batch::plan_inputs(inputs, test_mode, start, limit);
        if test_mode {
            self.output_formatter
                .info("Test mode: processing only the first 10 files");
        } else if start > 0 {
            self.output_formatter
                .info(&format!("Starting from file #{}", start));
        }

        if planned.is_empty() {
            self.output_formatter.warning("Nothing to do");
            return Ok(BatchSummary::new());
        }

        if !skip_confirmation && !test_mode {
            let question = format!(
                "Ready to extract {} files using {} parallel processes. This may take a while. Proceed?",
                planned.len(),
                self.config.extract.parallelism
            );
            if !self.output_formatter.confirm(&question) {
                return Err(PipelineError::Cancelled);
            }
        }

        std::fs::create_dir_all(&self.config.extract.output_dir)?;

        self.output_formatter.start_operation("Starting extraction");
        let summary = self.run_extraction(planned, java, jar).await;
        self.output_formatter
            .print_batch_summary(&summary, &self.config.extract.output_dir);

        if summary.cancelled {
            return Err(PipelineError::Cancelled);
        }

        Ok(summary)
    }

    async fn run_extraction(
        &self,
        planned: Vec<InputAsset>,
        java: JavaRuntime,
        jar: std::path::PathBuf,
    ) -> BatchSummary {
        let decompiler = Arc::new(Decompiler::new(
            java.path,
            jar,
            self.config.extract.kinds.clone(),
            self.config.file_timeout(),
        ));

        let output_root = self.config.extract.output_dir.clone();
        let progress_bar = self
            .progress_manager
            .create_batch_progress(planned.len() as u64);

        let worker = move |input: InputAsset| {
            let decompiler = Arc::clone(&decompiler);
            let output_subdir = output_root.join(&input.name);
            async move {
                let started = Instant::now();
                let outcome = decompiler.extract_one(&input.path, &output_subdir).await;
                FileReport {
                    name: input.name,
                    outcome,
                    elapsed: started.elapsed(),
                }
            }
        };

        let parallelism = self.config.extract.parallelism;
        let summary = batch::run_batch(
            planned,
            parallelism,
            worker,
            |progress, report| {
                ui::progress::update_batch_progress(&progress_bar, progress, report);
            },
            || self.shutdown.is_cancelled(),
        )
        .await;

        ui::progress::finish_progress_with_summary(
            &progress_bar,
            &format!("Extracted {} files", summary.success_count),
            summary.elapsed,
        );

        summary
    }

    /// Run the Organization Stage: categorized layout plus mapping document.
    pub fn organize(&self) -> Result<OrganizeReport> {
        self.shutdown.check_shutdown()?;
        self.output_formatter
            .start_operation("Organizing extracted assets");

        let writer = OrganizeWriter::new(self.config.organize.organized_dir.clone())
            .with_copy(self.config.organize.copy);

        let asset_dirs = organizer::list_asset_dirs(&self.config.organize.extracted_dir)?;
        let progress_bar = self
            .progress_manager
            .create_organize_progress(asset_dirs.len() as u64);

        let report = writer.organize(
            &self.config.organize.extracted_dir,
            Some(&|done, _total| progress_bar.set_position(done as u64)),
        )?;

        ui::progress::finish_progress_with_summary(
            &progress_bar,
            &format!("Organized {} assets", report.organized),
            progress_bar.elapsed(),
        );

        for error in &report.errors {
            self.output_formatter.warning(&format!("Skipped {}", error));
        }
        self.output_formatter.print_category_table(&report);

        Ok(report)
    }

    /// Run the flat hash-lookup variant of the Organization Stage.
    pub fn lookup(&self) -> Result<LookupReport> {
        self.shutdown.check_shutdown()?;
        self.output_formatter
            .start_operation("Building asset lookup");

        let writer = LookupWriter::new(
            self.config.organize.lookup_dir.clone(),
            self.config.organize.resource_prefix.clone(),
        );

        let asset_dirs = organizer::list_asset_dirs(&self.config.organize.extracted_dir)?;
        let progress_bar = self
            .progress_manager
            .create_organize_progress(asset_dirs.len() as u64);

        let report = writer.build(
            &self.config.organize.extracted_dir,
            Some(&|done, _total| progress_bar.set_position(done as u64)),
        )?;

        ui::progress::finish_progress_with_summary(
            &progress_bar,
            &format!("Linked {} assets", report.organized),
            progress_bar.elapsed(),
        );

        for error in &report.errors {
            self.output_formatter.warning(&format!("Skipped {}", error));
        }
        self.output_formatter.print_lookup_summary(&report);

        Ok(report)
    }

    /// Copy the organized layout into the engine project, resolving references.
    pub fn materialize(&self) -> Result<MaterializeReport> {
        self.shutdown.check_shutdown()?;
        self.output_formatter
            .start_operation("Copying assets into the engine project");

        let materializer = Materializer::new(self.config.organize.engine_root.clone());
        let report = materializer.materialize(&self.config.organize.organized_dir)?;

        for error in &report.errors {
            self.output_formatter.warning(&format!("Failed {}", error));
        }
        self.output_formatter
            .print_materialize_summary(&report, &self.config.organize.engine_root);

        Ok(report)
    }

    /// Verify the Java runtime and decompiler jar, reporting what was found.
    pub fn check(&self) -> Result<()> {
        self.output_formatter
            .start_operation("Checking prerequisites");

        let java = match find_java(self.config.tool.java_path.as_deref()) {
            Some(java) => {
                self.output_formatter.success(&format!(
                    "Java runtime: {} ({})",
                    java.path.display(),
                    java.version_banner
                ));
                java
            }
            None => {
                return Err(PipelineError::Prerequisite {
                    what: "Java runtime".to_string(),
                    detail: "no working java on PATH or in common install locations".to_string(),
                });
            }
        };

        let jar = match locate_jar(
            self.config.tool.jar_path.as_deref(),
            &self.config.tool.search_roots,
            tool_locator::DEFAULT_TOOL_STEM,
        ) {
            Some(jar) => {
                self.output_formatter
                    .success(&format!("Decompiler jar: {}", jar.display()));
                jar
            }
            None => {
                return Err(PipelineError::Prerequisite {
                    what: "decompiler jar".to_string(),
                    detail: format!(
                        "not found in {} search roots",
                        self.config.tool.search_roots.len()
                    ),
                });
            }
        };

        // JVM startup makes this probe take a few seconds.
        let spinner = self.progress_manager.create_spinner("Probing the decompiler");
        let probe = tool_locator::jar_version(&java.path, &jar);
        spinner.finish_and_clear();

        match probe {
            Ok((true, version)) => {
                let line = version.lines().next().unwrap_or("");
                self.output_formatter
                    .success(&format!("Decompiler responds: {}", line));
            }
            Ok((false, output)) => {
                self.output_formatter.warning(&format!(
                    "Decompiler found but failed to run: {}",
                    output.lines().next().unwrap_or("no output")
                ));
            }
            Err(e) => {
                self.output_formatter
                    .warning(&format!("Could not probe the decompiler: {}", e));
            }
        }

        self.output_formatter
            .success("Ready to extract. Try `swfpipe extract --test` first.");
        Ok(())
    }

    fn resolve_tooling(&self) -> Result<(JavaRuntime, std::path::PathBuf)> {
        let java = find_java(self.config.tool.java_path.as_deref()).ok_or_else(|| {
            PipelineError::Prerequisite {
                what: "Java runtime".to_string(),
                detail: "no working java on PATH or in common install locations".to_string(),
            }
        })?;

        let jar = locate_jar(
            self.config.tool.jar_path.as_deref(),
            &self.config.tool.search_roots,
            tool_locator::DEFAULT_TOOL_STEM,
        )
        .ok_or_else(|| PipelineError::Prerequisite {
            what: "decompiler jar".to_string(),
            detail: format!(
                "not found in {} search roots",
                self.config.tool.search_roots.len()
            ),
        })?;

        Ok((java, jar))
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(PipelineError::Io)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn is_running(&self) -> bool {
        self.shutdown.is_running()
    }

    pub fn request_shutdown(&self) {
        self.shutdown.request_shutdown();
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &PipelineError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}
